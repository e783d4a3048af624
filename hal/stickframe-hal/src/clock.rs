//! Time source abstractions

/// Monotonic microsecond clock
///
/// Must never go backwards while the device is running. Consumers treat a
/// reading earlier than one they have already seen as an anomaly.
pub trait MonotonicClock {
    /// Microseconds since boot
    fn now_us(&self) -> u64;
}

