//! Embassy async tasks
//!
//! The control loop runs on the thread-mode executor; button tasks run on
//! an interrupt executor at higher priority. They share only the mode
//! flags, through the event latch.

pub mod buttons;
pub mod control;

pub use buttons::button_task;
pub use control::control_task;
