//! PWM light output trait

/// One of the three dimmable light channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LightChannel {
    /// Brightness follows the stick's X deviation
    Red,
    /// Brightness follows the stick's Y deviation
    Blue,
    /// On/off, toggled by the mode button
    Green,
}

impl LightChannel {
    /// All channels in output order
    pub const ALL: [LightChannel; 3] = [LightChannel::Red, LightChannel::Blue, LightChannel::Green];
}

/// PWM output with a fixed 12-bit carrier resolution
pub trait LightOutput {
    /// Set the compare value of a channel
    ///
    /// `duty` is in `0..=MAX_DUTY`; callers clamp before calling.
    fn set_duty(&mut self, channel: LightChannel, duty: u16);
}
