//! Cross-context controller state
//!
//! The only mutable data shared between the button handlers (interrupt
//! context) and the control loop. Everything else is owned by the loop.

pub mod flags;

pub use flags::{ModeFlags, SharedFlags};
