//! Controller profile loading
//!
//! The profile is compiled into the firmware from `controller.toml`; the
//! build script has already rejected malformed files, so a parse failure
//! here means the on-device parser and the build-time check disagree.

use defmt::*;

use stickframe_core::config::{parse_profile, ControllerConfig};

/// Embedded profile (compiled into firmware)
/// Edit controller.toml and rebuild to customize
const EMBEDDED_PROFILE: &str = include_str!("../controller.toml");

/// Parse the embedded profile, falling back to built-in defaults
pub fn load_profile() -> ControllerConfig {
    match parse_profile(EMBEDDED_PROFILE) {
        Ok(config) => {
            info!("Parsed embedded profile");
            config
        }
        Err(e) => {
            error!("Embedded profile rejected: {}", e);
            error!("Using built-in defaults");
            ControllerConfig::default()
        }
    }
}

/// List every tunable in the log
pub fn log_profile(config: &ControllerConfig) {
    let cal = &config.calibration;
    info!(
        "Calibration: center=({}, {}), dead_zone={}",
        cal.center_x, cal.center_y, cal.dead_zone
    );

    let pos = &config.position;
    info!(
        "Position: policy={}, spring_return={}, gain={}/{}, rest=({}, {})",
        pos.policy, pos.spring_return, pos.gain, pos.scale, pos.rest_x, pos.rest_y
    );

    info!("Duty formula: {}", config.duty_formula);
    info!("Border cycle: {}", config.border);
    info!(
        "Timing: tick={} ms, debounce={} ms",
        config.timing.tick_ms, config.timing.debounce_ms
    );
}
