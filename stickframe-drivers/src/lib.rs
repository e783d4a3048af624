//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in stickframe-core for the board's peripherals:
//!
//! - SSD1306 128x64 OLED over I2C (frame transport)
//! - Bridge from `embedded-hal` blocking I2C to the HAL bus trait

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod display;
