//! Controller profile parser
//!
//! A minimal TOML reader covering only what a controller profile needs.
//! It runs on the device without an allocator, so it does NOT support the
//! full TOML grammar.
//!
//! Supported:
//! - `[section]` headers
//! - `key = value` with integer, boolean, string and single-line string
//!   array values
//! - Comments (`# ...`), both whole-line and trailing
//!
//! Keys left out of the profile keep their [`ControllerConfig::default`]
//! value. Unknown sections and keys are rejected so typos do not silently
//! fall back to defaults.

use heapless::Vec;

use super::types::{
    BorderCycle, ControllerConfig, DutyFormula, PositionPolicy, TimingConfig, ADC_MAX,
    ADC_SPAN, CURSOR_SIZE, DISPLAY_HEIGHT, DISPLAY_WIDTH, MAX_BORDER_STYLES,
};
use crate::render::BorderStyle;

/// What went wrong on a profile line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseErrorKind {
    /// Malformed `[section]` header
    InvalidSection,
    /// Section name not known
    UnknownSection,
    /// Key not known in the current section (or key outside any section)
    UnknownKey,
    /// Line is neither a header nor `key = value`
    MissingEquals,
    /// Value has the wrong type or cannot be parsed
    InvalidValue,
    /// Value parsed but lies outside the allowed range
    OutOfRange,
    /// Border list is empty, too long or names an unknown style
    InvalidBorderCycle,
}

/// Profile parse error with the 1-based line it occurred on
///
/// `line` is 0 for errors found while validating the finished profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParseError {
    /// Line number (1-based), 0 for whole-profile checks
    pub line: u16,
    /// Error kind
    pub kind: ParseErrorKind,
}

impl ParseError {
    fn at(line: u16, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Calibration,
    Position,
    Duty,
    Border,
    Timing,
}

/// Parse a controller profile
pub fn parse_profile(input: &str) -> Result<ControllerConfig, ParseError> {
    let mut config = ControllerConfig::default();
    let mut section = Section::Root;

    for (idx, raw_line) in input.lines().enumerate() {
        let line_no = u16::try_from(idx + 1).unwrap_or(u16::MAX);
        let line = strip_comment(raw_line).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            if !line.ends_with(']') {
                return Err(ParseError::at(line_no, ParseErrorKind::InvalidSection));
            }
            section = parse_section_header(line[1..line.len() - 1].trim())
                .map_err(|kind| ParseError::at(line_no, kind))?;
            continue;
        }

        let (key, value) = line
            .split_once('=')
            .ok_or(ParseError::at(line_no, ParseErrorKind::MissingEquals))?;

        apply_key(&mut config, section, key.trim(), value.trim())
            .map_err(|kind| ParseError::at(line_no, kind))?;
    }

    validate(&config).map_err(|kind| ParseError::at(0, kind))?;
    Ok(config)
}

/// Check cross-field constraints of a finished profile
pub fn validate(config: &ControllerConfig) -> Result<(), ParseErrorKind> {
    let cal = &config.calibration;
    if cal.center_x > ADC_MAX || cal.center_y > ADC_MAX {
        return Err(ParseErrorKind::OutOfRange);
    }
    // The magnitude formula divides by (half span - dead zone)
    if i32::from(cal.dead_zone) >= ADC_SPAN / 2 {
        return Err(ParseErrorKind::OutOfRange);
    }

    let pos = &config.position;
    if pos.scale <= 0 {
        return Err(ParseErrorKind::OutOfRange);
    }
    if !(0..=DISPLAY_WIDTH - CURSOR_SIZE).contains(&pos.rest_x)
        || !(0..=DISPLAY_HEIGHT - CURSOR_SIZE).contains(&pos.rest_y)
    {
        return Err(ParseErrorKind::OutOfRange);
    }

    let timing = &config.timing;
    if !(TimingConfig::MIN_TICK_MS..=TimingConfig::MAX_TICK_MS).contains(&timing.tick_ms) {
        return Err(ParseErrorKind::OutOfRange);
    }
    if timing.debounce_ms == 0 {
        return Err(ParseErrorKind::OutOfRange);
    }

    if config.border.len() < 2 {
        return Err(ParseErrorKind::InvalidBorderCycle);
    }

    Ok(())
}

fn parse_section_header(name: &str) -> Result<Section, ParseErrorKind> {
    if name.is_empty() || name.contains(char::is_whitespace) {
        return Err(ParseErrorKind::InvalidSection);
    }
    match name {
        "calibration" => Ok(Section::Calibration),
        "position" => Ok(Section::Position),
        "duty" => Ok(Section::Duty),
        "border" => Ok(Section::Border),
        "timing" => Ok(Section::Timing),
        _ => Err(ParseErrorKind::UnknownSection),
    }
}

fn apply_key(
    config: &mut ControllerConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ParseErrorKind> {
    match (section, key) {
        (Section::Calibration, "center_x") => config.calibration.center_x = parse_u16(value)?,
        (Section::Calibration, "center_y") => config.calibration.center_y = parse_u16(value)?,
        (Section::Calibration, "dead_zone") => config.calibration.dead_zone = parse_u16(value)?,

        (Section::Position, "policy") => {
            config.position.policy = match parse_str(value)? {
                "absolute" => PositionPolicy::Absolute,
                "incremental" => PositionPolicy::Incremental,
                _ => return Err(ParseErrorKind::InvalidValue),
            }
        }
        (Section::Position, "spring_return") => config.position.spring_return = parse_bool(value)?,
        (Section::Position, "gain") => config.position.gain = parse_int(value)?,
        (Section::Position, "scale") => config.position.scale = parse_int(value)?,
        (Section::Position, "rest_x") => config.position.rest_x = parse_int(value)?,
        (Section::Position, "rest_y") => config.position.rest_y = parse_int(value)?,

        (Section::Duty, "formula") => {
            config.duty_formula = match parse_str(value)? {
                "signed_offset" => DutyFormula::SignedOffset,
                "magnitude" => DutyFormula::Magnitude,
                _ => return Err(ParseErrorKind::InvalidValue),
            }
        }

        (Section::Border, "styles") => config.border = parse_border_cycle(value)?,

        (Section::Timing, "debounce_ms") => config.timing.debounce_ms = parse_u32(value)?,
        (Section::Timing, "tick_ms") => config.timing.tick_ms = parse_u32(value)?,

        _ => return Err(ParseErrorKind::UnknownKey),
    }
    Ok(())
}

/// Cut a trailing `# comment`, ignoring `#` inside double quotes
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_int(value: &str) -> Result<i32, ParseErrorKind> {
    value.parse().map_err(|_| ParseErrorKind::InvalidValue)
}

fn parse_u16(value: &str) -> Result<u16, ParseErrorKind> {
    let v = parse_int(value)?;
    u16::try_from(v).map_err(|_| ParseErrorKind::OutOfRange)
}

fn parse_u32(value: &str) -> Result<u32, ParseErrorKind> {
    let v = parse_int(value)?;
    u32::try_from(v).map_err(|_| ParseErrorKind::OutOfRange)
}

fn parse_bool(value: &str) -> Result<bool, ParseErrorKind> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseErrorKind::InvalidValue),
    }
}

fn parse_str(value: &str) -> Result<&str, ParseErrorKind> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .filter(|v| !v.contains('"'))
        .ok_or(ParseErrorKind::InvalidValue)
}

fn parse_border_cycle(value: &str) -> Result<BorderCycle, ParseErrorKind> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseErrorKind::InvalidValue)?;

    let mut styles: Vec<BorderStyle, MAX_BORDER_STYLES> = Vec::new();
    for item in inner.split(',') {
        let item = item.trim();
        // Allow a trailing comma
        if item.is_empty() {
            continue;
        }
        let style = BorderStyle::from_name(parse_str(item)?)
            .ok_or(ParseErrorKind::InvalidBorderCycle)?;
        styles
            .push(style)
            .map_err(|_| ParseErrorKind::InvalidBorderCycle)?;
    }

    BorderCycle::new(&styles).ok_or(ParseErrorKind::InvalidBorderCycle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::CalibrationConfig;

    const FULL_PROFILE: &str = r#"
# Three-style profile with absolute mapping
[calibration]
center_x = 2048
center_y = 2000   # measured on the bench
dead_zone = 60

[position]
policy = "absolute"
spring_return = false
gain = 4
scale = 1024
rest_x = 10
rest_y = 20

[duty]
formula = "magnitude"

[border]
styles = ["solid", "double", "dashed"]

[timing]
debounce_ms = 150
tick_ms = 50
"#;

    #[test]
    fn test_empty_profile_is_default() {
        let config = parse_profile("").unwrap();
        assert_eq!(config, ControllerConfig::default());
    }

    #[test]
    fn test_full_profile() {
        let config = parse_profile(FULL_PROFILE).unwrap();
        assert_eq!(
            config.calibration,
            CalibrationConfig {
                center_x: 2048,
                center_y: 2000,
                dead_zone: 60,
            }
        );
        assert_eq!(config.position.policy, PositionPolicy::Absolute);
        assert!(!config.position.spring_return);
        assert_eq!(config.position.gain, 4);
        assert_eq!(config.position.scale, 1024);
        assert_eq!(config.position.rest_x, 10);
        assert_eq!(config.position.rest_y, 20);
        assert_eq!(config.duty_formula, DutyFormula::Magnitude);
        assert_eq!(config.border.len(), 3);
        assert_eq!(config.border.style(1), BorderStyle::DoubleSolid);
        assert_eq!(config.border.style(2), BorderStyle::Dashed);
        assert_eq!(config.timing.debounce_ms, 150);
        assert_eq!(config.timing.tick_ms, 50);
    }

    #[test]
    fn test_partial_profile_keeps_defaults() {
        let config = parse_profile("[calibration]\ndead_zone = 80\n").unwrap();
        assert_eq!(config.calibration.dead_zone, 80);
        assert_eq!(config.calibration.center_x, 1929);
        assert_eq!(config.position.policy, PositionPolicy::Incremental);
    }

    #[test]
    fn test_unknown_key_reports_line() {
        let err = parse_profile("[timing]\ntick_ms = 20\ntick_us = 5\n").unwrap_err();
        assert_eq!(err, ParseError::at(3, ParseErrorKind::UnknownKey));
    }

    #[test]
    fn test_key_outside_section() {
        let err = parse_profile("dead_zone = 80").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnknownKey);
    }

    #[test]
    fn test_bad_sections() {
        assert_eq!(
            parse_profile("[lights]").unwrap_err().kind,
            ParseErrorKind::UnknownSection
        );
        assert_eq!(
            parse_profile("[timing").unwrap_err().kind,
            ParseErrorKind::InvalidSection
        );
        assert_eq!(
            parse_profile("[]").unwrap_err().kind,
            ParseErrorKind::InvalidSection
        );
    }

    #[test]
    fn test_bad_values() {
        assert_eq!(
            parse_profile("[calibration]\ncenter_x = lots").unwrap_err().kind,
            ParseErrorKind::InvalidValue
        );
        assert_eq!(
            parse_profile("[calibration]\ncenter_x = -1").unwrap_err().kind,
            ParseErrorKind::OutOfRange
        );
        assert_eq!(
            parse_profile("[position]\npolicy = absolute").unwrap_err().kind,
            ParseErrorKind::InvalidValue
        );
        assert_eq!(
            parse_profile("[position]\nspring_return = yes").unwrap_err().kind,
            ParseErrorKind::InvalidValue
        );
        assert_eq!(
            parse_profile("[timing]\ntick_ms").unwrap_err().kind,
            ParseErrorKind::MissingEquals
        );
    }

    #[test]
    fn test_validation_errors() {
        let err = parse_profile("[timing]\ntick_ms = 10").unwrap_err();
        assert_eq!(err, ParseError::at(0, ParseErrorKind::OutOfRange));

        let err = parse_profile("[calibration]\ncenter_x = 4096").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::OutOfRange);

        let err = parse_profile("[calibration]\ndead_zone = 2048").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::OutOfRange);

        let err = parse_profile("[position]\nrest_x = 121").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::OutOfRange);

        let err = parse_profile("[position]\nscale = 0").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::OutOfRange);
    }

    #[test]
    fn test_border_cycle_errors() {
        for bad in [
            r#"styles = []"#,
            r#"styles = ["solid"]"#,
            r#"styles = ["solid", "wavy"]"#,
            r#"styles = ["solid", "double", "triple", "dashed", "solid"]"#,
            r#"styles = "solid""#,
        ] {
            let profile = format!("[border]\n{bad}\n");
            let err = parse_profile(&profile).unwrap_err();
            assert!(
                matches!(
                    err.kind,
                    ParseErrorKind::InvalidBorderCycle | ParseErrorKind::InvalidValue
                ),
                "{bad}: {err:?}"
            );
        }
    }

    #[test]
    fn test_hash_inside_string_is_not_comment() {
        assert_eq!(strip_comment(r#"a = "x#y" # note"#), r#"a = "x#y" "#);
    }

    #[test]
    fn test_trailing_comma_in_border_list() {
        let config = parse_profile("[border]\nstyles = [\"dashed\", \"solid\",]\n").unwrap();
        assert_eq!(config.border.style(0), BorderStyle::Dashed);
        assert_eq!(config.border.len(), 2);
    }
}
