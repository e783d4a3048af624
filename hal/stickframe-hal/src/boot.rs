//! Boot mode control

/// Restart into the chip's programming mode (USB mass-storage bootloader
/// on the RP2040)
///
/// Fire-and-forget: the call does not return, and nothing running at the
/// time gets to clean up.
pub trait ProgrammingReset {
    /// Reset into programming mode
    fn enter_programming_mode(&mut self) -> !;
}
