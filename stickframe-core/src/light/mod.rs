//! Light output mapping

pub mod duty;

pub use duty::{DutyFrame, DutyMapper};
