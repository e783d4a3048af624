//! Stickframe - Joystick Cursor & RGB Light Controller Firmware
//!
//! Firmware binary for the RP2040 reference board: a two-axis stick moves
//! a cursor inside a decorated frame on a 128x64 OLED and dims an RGB
//! light, three buttons switch modes.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{Config as I2cPeriphConfig, I2c};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::pwm::Pwm;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use stickframe_core::config::ControllerConfig;
use stickframe_core::input::{Button, EventLatch};
use stickframe_core::state::SharedFlags;
use stickframe_drivers::display::{BlockingI2c, Ssd1306};
use stickframe_hal::I2cConfig;

use crate::board::{BootselReset, JoystickAdc, LightPwm, UptimeClock};

mod board;
mod profile;
mod tasks;

/// Executor for the button tasks, preempts the control loop
static EXECUTOR_BUTTONS: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_BUTTONS.on_interrupt()
}

// Shared between the control loop and the button tasks (must live forever)
static CONFIG: StaticCell<ControllerConfig> = StaticCell::new();
static FLAGS: StaticCell<SharedFlags> = StaticCell::new();
static LATCH: StaticCell<EventLatch<'static>> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Stickframe firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config: &'static ControllerConfig = CONFIG.init(profile::load_profile());
    profile::log_profile(config);

    let flags: &'static SharedFlags = FLAGS.init(SharedFlags::default());
    let latch: &'static EventLatch<'static> =
        LATCH.init(EventLatch::new(flags, &config.timing, &config.border));

    // Stick on ADC0/ADC1
    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let stick = JoystickAdc::new(
        adc,
        Channel::new_pin(p.PIN_26, Pull::None),
        Channel::new_pin(p.PIN_27, Pull::None),
        &config.calibration,
    );
    info!("ADC initialized");

    // Green on slice 5 B, blue/red on slice 6 A/B
    let lights = LightPwm::new(
        Pwm::new_output_b(p.PWM_SLICE5, p.PIN_11, LightPwm::config()),
        Pwm::new_output_ab(p.PWM_SLICE6, p.PIN_12, p.PIN_13, LightPwm::config()),
    );
    info!("PWM initialized");

    // OLED on I2C1
    let mut i2c_config = I2cPeriphConfig::default();
    i2c_config.frequency = I2cConfig::FAST.frequency;
    let i2c = I2c::new_blocking(p.I2C1, p.PIN_15, p.PIN_14, i2c_config);
    let mut display = Ssd1306::new(BlockingI2c::new(i2c));
    match display.init() {
        Ok(()) => info!("Display initialized"),
        Err(e) => warn!("Display init failed: {}", Debug2Format(&e)),
    }

    // Button tasks preempt the control loop
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let button_spawner = EXECUTOR_BUTTONS.start(interrupt::SWI_IRQ_1);
    let buttons = [
        (Input::new(p.PIN_22, Pull::Up), Button::ModeSelect),
        (Input::new(p.PIN_5, Pull::Up), Button::PwmGate),
        (Input::new(p.PIN_6, Pull::Up), Button::Reprogram),
    ];
    for (pin, button) in buttons {
        unwrap!(button_spawner.spawn(tasks::button_task(
            pin,
            button,
            latch,
            UptimeClock,
            BootselReset,
        )));
    }

    unwrap!(spawner.spawn(tasks::control_task(config, flags, stick, lights, display)));

    info!("All tasks spawned, firmware running");
}
