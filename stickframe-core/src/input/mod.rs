//! Operator input
//!
//! Stick sampling runs on the control loop; button edges arrive from
//! interrupt context and go through the debounced [`EventLatch`].

pub mod debounce;
pub mod sampler;

pub use debounce::{Button, DebounceGuard, EdgeOutcome, EventLatch};
pub use sampler::{AxisSample, DeadZone, Sampler};
