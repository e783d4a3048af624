//! Hardware abstraction traits
//!
//! These traits define the interface between the control pipeline
//! and the board-specific peripherals that feed and display it.

pub mod analog;
pub mod display;
pub mod light;

pub use analog::{Axis, AxisInput};
pub use display::DisplayTransport;
pub use light::{LightChannel, LightOutput};
