//! Stickframe Hardware Abstraction Layer
//!
//! Chip-level primitives the board support implements and the drivers and
//! firmware tasks consume. Application logic lives in `stickframe-core`
//! and never touches these directly.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  stickframe-firmware (tasks, board)     │
//! └─────────────────────────────────────────┘
//!          │                      │
//!          ▼                      ▼
//! ┌──────────────────┐   ┌──────────────────┐
//! │ stickframe-core  │◄──│stickframe-drivers│
//! └──────────────────┘   └──────────────────┘
//!                                 │
//!                                 ▼
//!               ┌─────────────────────────────────┐
//!               │ stickframe-hal (this crate)     │
//!               └─────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - I2C master writes (display link)
//! - [`clock::MonotonicClock`] - Microsecond uptime for debouncing
//! - [`boot::ProgrammingReset`] - Reboot into the USB bootloader

#![no_std]
#![deny(unsafe_code)]

pub mod boot;
pub mod clock;
pub mod i2c;

pub use boot::ProgrammingReset;
pub use clock::MonotonicClock;
pub use i2c::{I2cBus, I2cConfig};
