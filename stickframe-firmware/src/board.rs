//! Board support for the RP2040 reference board
//!
//! Binds the core's hardware traits to embassy-rp peripherals. Pin
//! assignments:
//!
//! | Function        | Pin    | Peripheral       |
//! |-----------------|--------|------------------|
//! | Stick X         | GPIO26 | ADC0             |
//! | Stick Y         | GPIO27 | ADC1             |
//! | Stick button    | GPIO22 | input, pull-up   |
//! | Button A        | GPIO5  | input, pull-up   |
//! | Button B        | GPIO6  | input, pull-up   |
//! | Green light     | GPIO11 | PWM slice 5 B    |
//! | Blue light      | GPIO12 | PWM slice 6 A    |
//! | Red light       | GPIO13 | PWM slice 6 B    |
//! | Display SDA/SCL | 14/15  | I2C1 @ 400 kHz   |

use defmt::*;
use embassy_rp::adc::{Adc, Blocking as AdcBlocking, Channel};
use embassy_rp::i2c::{Blocking as I2cBlocking, I2c};
use embassy_rp::peripherals::I2C1;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_time::Instant;

use stickframe_core::config::{CalibrationConfig, MAX_DUTY};
use stickframe_core::traits::{Axis, AxisInput, LightChannel, LightOutput};
use stickframe_drivers::display::{BlockingI2c, Ssd1306};
use stickframe_hal::{MonotonicClock, ProgrammingReset};

/// The board's OLED
pub type Display = Ssd1306<BlockingI2c<I2c<'static, I2C1, I2cBlocking>>>;

/// Two-axis analog stick on ADC0/ADC1
pub struct JoystickAdc {
    adc: Adc<'static, AdcBlocking>,
    x: Channel<'static>,
    y: Channel<'static>,
    center_x: u16,
    center_y: u16,
}

impl JoystickAdc {
    pub fn new(
        adc: Adc<'static, AdcBlocking>,
        x: Channel<'static>,
        y: Channel<'static>,
        calibration: &CalibrationConfig,
    ) -> Self {
        Self {
            adc,
            x,
            y,
            center_x: calibration.center_x,
            center_y: calibration.center_y,
        }
    }
}

impl AxisInput for JoystickAdc {
    fn read_axis(&mut self, axis: Axis) -> u16 {
        let (channel, center) = match axis {
            Axis::X => (&mut self.x, self.center_x),
            Axis::Y => (&mut self.y, self.center_y),
        };
        match self.adc.blocking_read(channel) {
            Ok(raw) => raw,
            Err(e) => {
                // Centered reading keeps the cursor still
                warn!("ADC read failed on {}: {}", axis, Debug2Format(&e));
                center
            }
        }
    }
}

/// RGB light on PWM slices 5 and 6, 12-bit resolution
pub struct LightPwm {
    green: Pwm<'static>,
    green_config: PwmConfig,
    red_blue: Pwm<'static>,
    red_blue_config: PwmConfig,
}

impl LightPwm {
    /// PWM configuration for a dark channel pair at `top = MAX_DUTY`
    pub fn config() -> PwmConfig {
        let mut config = PwmConfig::default();
        config.top = MAX_DUTY;
        config.compare_a = 0;
        config.compare_b = 0;
        config
    }

    /// `green` drives channel B only; `red_blue` drives blue on A, red on B
    pub fn new(green: Pwm<'static>, red_blue: Pwm<'static>) -> Self {
        Self {
            green,
            green_config: Self::config(),
            red_blue,
            red_blue_config: Self::config(),
        }
    }
}

impl LightOutput for LightPwm {
    fn set_duty(&mut self, channel: LightChannel, duty: u16) {
        let duty = duty.min(MAX_DUTY);
        match channel {
            LightChannel::Green => {
                self.green_config.compare_b = duty;
                self.green.set_config(&self.green_config);
            }
            LightChannel::Blue => {
                self.red_blue_config.compare_a = duty;
                self.red_blue.set_config(&self.red_blue_config);
            }
            LightChannel::Red => {
                self.red_blue_config.compare_b = duty;
                self.red_blue.set_config(&self.red_blue_config);
            }
        }
    }
}

/// Embassy time driver uptime
#[derive(Clone, Copy)]
pub struct UptimeClock;

impl MonotonicClock for UptimeClock {
    fn now_us(&self) -> u64 {
        Instant::now().as_micros()
    }
}

/// RP2040 boot ROM reset into USB mass-storage mode
#[derive(Clone, Copy)]
pub struct BootselReset;

impl ProgrammingReset for BootselReset {
    fn enter_programming_mode(&mut self) -> ! {
        embassy_rp::rom_data::reset_to_usb_boot(0, 0);
        loop {
            cortex_m::asm::wfi();
        }
    }
}
