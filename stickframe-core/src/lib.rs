//! Board-agnostic core logic for the Stickframe joystick controller
//!
//! This crate contains everything that does not depend on a specific
//! board:
//!
//! - Hardware abstraction traits (stick ADC, PWM lights, display)
//! - Stick sampling, dead zone and button debouncing
//! - Cursor position and light duty mapping
//! - Frame rendering
//! - The per-tick control pipeline
//! - Profile types and parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod input;
pub mod light;
pub mod motion;
pub mod render;
pub mod state;
pub mod traits;

pub use controller::{Controller, TickReport};
