//! Build script for tripad-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates macropad.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate macropad.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=macropad.toml");

    let config_path = Path::new("macropad.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: macropad.toml not found!                                 ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds a macropad.toml configuration file.         ║\n\
            ║  Please create one in the tripad-firmware directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read macropad.toml                             ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in macropad.toml                     ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_required_sections(&config, &mut errors);
    validate_usb(&config, &mut errors);
    validate_timing(&config, &mut errors);
    validate_outputs(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid macropad.toml configuration                      ║\n\
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

    println!("cargo:warning=macropad.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn validate_required_sections(config: &toml::Value, errors: &mut Vec<String>) {
    for section in ["usb", "timing"] {
        match config.get(section) {
            Some(toml::Value::Table(_)) => {}
            Some(_) => errors.push(format!("[{}] must be a table", section)),
            None => errors.push(format!("Missing [{}] section", section)),
        }
    }
}

/// Check that `[section] key` is an integer within `min..=max`, if present
fn check_range(
    config: &toml::Value,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) {
    match config.get(section).and_then(|s| s.get(key)) {
        Some(toml::Value::Integer(value)) => {
            if *value < min || *value > max {
                errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
            }
        }
        Some(_) => errors.push(format!("[{}] {} must be an integer", section, key)),
        None => {}
    }
}

fn validate_usb(config: &toml::Value, errors: &mut Vec<String>) {
    check_range(config, "usb", "vendor_id", 0, 0xFFFF, errors);
    check_range(config, "usb", "product_id", 0, 0xFFFF, errors);

    for key in ["manufacturer", "product", "serial"] {
        match config.get("usb").and_then(|s| s.get(key)) {
            Some(toml::Value::String(value)) => {
                if value.len() > 32 {
                    errors.push(format!("[usb] {} must be at most 32 bytes", key));
                }
                if value.contains(['"', '\\']) {
                    errors.push(format!("[usb] {} cannot contain escapes", key));
                }
            }
            Some(_) => errors.push(format!("[usb] {} must be a string", key)),
            None => {}
        }
    }
}

fn validate_timing(config: &toml::Value, errors: &mut Vec<String>) {
    check_range(config, "timing", "long_press_ms", 100, 10_000, errors);
    check_range(config, "timing", "debounce_ms", 0, 100, errors);
    check_range(config, "timing", "repeat_start_ms", 100, 2000, errors);
    check_range(config, "timing", "repeat_continue_ms", 50, 1000, errors);
}

fn validate_outputs(config: &toml::Value, errors: &mut Vec<String>) {
    check_range(config, "indicator", "brightness", 0, 255, errors);

    if let Some(value) = config.get("display").and_then(|s| s.get("rotate_180")) {
        if !value.is_bool() {
            errors.push("[display] rotate_180 must be true or false".to_string());
        }
    }
}
