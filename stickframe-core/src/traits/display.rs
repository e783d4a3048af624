//! Display transport trait

use crate::render::FrameBuffer;

/// Moves a finished frame to the physical display
///
/// The pipeline draws into a [`FrameBuffer`] it owns; the transport only
/// ever sees complete frames and never participates in rendering.
pub trait DisplayTransport {
    /// Transport error (bus failure, missing device)
    type Error;

    /// Send the whole frame to the display
    fn flush(&mut self, frame: &FrameBuffer) -> Result<(), Self::Error>;
}
