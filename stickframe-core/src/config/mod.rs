//! Configuration types
//!
//! A controller profile collects every tunable of the pipeline. Profiles
//! are written in a TOML subset and parsed on the device without an
//! allocator.

pub mod parse;
pub mod types;

pub use parse::{parse_profile, ParseError, ParseErrorKind};
pub use types::*;
