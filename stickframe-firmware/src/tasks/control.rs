//! Control loop task
//!
//! Runs the core pipeline at the profile's tick rate. A late tick runs as
//! soon as the previous one finishes; no tick is skipped.

use defmt::*;
use embassy_time::{Duration, Ticker};

use stickframe_core::config::ControllerConfig;
use stickframe_core::state::SharedFlags;
use stickframe_core::Controller;

use crate::board::{Display, JoystickAdc, LightPwm};

/// Ticks between display re-init attempts while the display is down
const DISPLAY_RETRY_TICKS: u32 = 50;

#[embassy_executor::task]
pub async fn control_task(
    config: &'static ControllerConfig,
    flags: &'static SharedFlags,
    mut stick: JoystickAdc,
    mut lights: LightPwm,
    mut display: Display,
) {
    info!("Control task started ({} ms tick)", config.timing.tick_ms);

    let mut controller = Controller::new(config, flags);
    let mut ticker = Ticker::every(Duration::from_millis(u64::from(config.timing.tick_ms)));
    let mut display_ok = display.is_initialized();

    loop {
        let report = controller.tick(&mut stick, &mut lights, &mut display);
        debug!("{}", report);

        if report.flushed != display_ok {
            if report.flushed {
                info!("Display link restored");
            } else {
                warn!("Display flush failed, retrying every {} ticks", DISPLAY_RETRY_TICKS);
            }
            display_ok = report.flushed;
        }

        if !report.flushed && report.tick % DISPLAY_RETRY_TICKS == 0 {
            if let Err(e) = display.init() {
                debug!("Display init failed: {}", Debug2Format(&e));
            }
        }

        ticker.next().await;
    }
}
