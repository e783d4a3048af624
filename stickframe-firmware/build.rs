//! Build script for stickframe-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates controller.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

const SECTIONS: &[(&str, &[&str])] = &[
    ("calibration", &["center_x", "center_y", "dead_zone"]),
    (
        "position",
        &["policy", "spring_return", "gain", "scale", "rest_x", "rest_y"],
    ),
    ("duty", &["formula"]),
    ("border", &["styles"]),
    ("timing", &["debounce_ms", "tick_ms"]),
];

const BORDER_STYLES: &[&str] = &["solid", "double", "triple", "dashed"];

fn main() {
    setup_linker();
    validate_profile();
}

/// Set up linker search paths and scripts
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).expect("create memory.x");
    f.write_all(memory_x).expect("write memory.x");

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate controller.toml at compile time
fn validate_profile() {
    println!("cargo:rerun-if-changed=controller.toml");

    let path = Path::new("controller.toml");
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => fail(&[format!("cannot read controller.toml: {}", e)]),
    };

    let profile: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail(&[format!("invalid TOML syntax: {}", e.message())]),
    };

    let errors = check_profile(&profile);
    if !errors.is_empty() {
        fail(&errors);
    }
}

fn check_profile(profile: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    let Some(root) = profile.as_table() else {
        return vec!["profile must be a table".into()];
    };

    for (name, value) in root {
        let Some((_, keys)) = SECTIONS.iter().find(|(section, _)| section == name) else {
            errors.push(format!("unknown section [{}]", name));
            continue;
        };
        let Some(table) = value.as_table() else {
            errors.push(format!("[{}] must be a table", name));
            continue;
        };
        for key in table.keys() {
            if !keys.contains(&key.as_str()) {
                errors.push(format!("[{}] unknown key '{}'", name, key));
            }
        }
    }

    let int = |section: &str, key: &str| -> Option<i64> {
        root.get(section)
            .and_then(|s| s.get(key))
            .and_then(toml::Value::as_integer)
    };
    let mut range = |section: &str, key: &str, min: i64, max: i64| {
        if let Some(v) = int(section, key) {
            if v < min || v > max {
                errors.push(format!("[{}] {} must be {}..={}", section, key, min, max));
            }
        }
    };

    range("calibration", "center_x", 0, 4095);
    range("calibration", "center_y", 0, 4095);
    range("calibration", "dead_zone", 0, 2047);
    range("position", "scale", 1, i64::from(i32::MAX));
    range("position", "gain", i64::from(i32::MIN), i64::from(i32::MAX));
    range("position", "rest_x", 0, 120);
    range("position", "rest_y", 0, 56);
    range("timing", "debounce_ms", 1, i64::from(u32::MAX));
    range("timing", "tick_ms", 20, 50);

    let string = |section: &str, key: &str| -> Option<String> {
        root.get(section)
            .and_then(|s| s.get(key))
            .and_then(toml::Value::as_str)
            .map(str::to_owned)
    };
    if let Some(policy) = string("position", "policy") {
        if !["absolute", "incremental"].contains(&policy.as_str()) {
            errors.push(format!("[position] unknown policy '{}'", policy));
        }
    }
    if let Some(formula) = string("duty", "formula") {
        if !["signed_offset", "magnitude"].contains(&formula.as_str()) {
            errors.push(format!("[duty] unknown formula '{}'", formula));
        }
    }

    if let Some(styles) = root.get("border").and_then(|b| b.get("styles")) {
        match styles.as_array() {
            Some(styles) if (2..=4).contains(&styles.len()) => {
                for style in styles {
                    match style.as_str() {
                        Some(s) if BORDER_STYLES.contains(&s) => {}
                        _ => errors.push(format!("[border] unknown style {}", style)),
                    }
                }
            }
            _ => errors.push("[border] styles must list 2 to 4 styles".into()),
        }
    }

    errors
}

fn fail(errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: Invalid controller.toml                                  ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}
