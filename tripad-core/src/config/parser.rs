//! Minimal TOML parser for device configuration
//!
//! Handles only the subset `macropad.toml` uses. It does NOT support the
//! full TOML grammar.
//!
//! Supported features:
//! - `[section]` headers
//! - `key = value` pairs (string, integer, boolean)
//! - Decimal and `0x` hexadecimal integers, `_` separators
//! - Comments (`# ...`), including after a value
//!
//! NOT supported:
//! - Escape sequences, multi-line strings
//! - Arrays, inline tables, dotted keys
//! - Floats and datetimes

use heapless::String;

use super::DeviceConfig;

/// Parse error, with the 1-based line it was found on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Malformed `[section]` header
    InvalidSection { line: u16 },
    /// Line is neither a header nor `key = value`
    InvalidLine { line: u16 },
    /// Value could not be parsed
    InvalidValue { line: u16 },
    /// Value has the wrong type for its key
    WrongType { line: u16 },
    /// Number outside the key's range, or string too long
    OutOfRange { line: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Usb,
    Timing,
    Display,
    Indicator,
    /// Sections this firmware does not use; keys are skipped
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Value<'a> {
    Int(i64),
    Bool(bool),
    Str(&'a str),
}

/// Parse TOML configuration into a [`DeviceConfig`]
///
/// Unknown sections and keys are ignored. Any malformed line fails the
/// whole parse so the caller can fall back to the defaults.
pub fn parse_config(input: &str) -> Result<DeviceConfig, ConfigError> {
    let mut config = DeviceConfig::default();
    let mut section = Section::Root;

    for (index, raw) in input.lines().enumerate() {
        let line = u16::try_from(index + 1).unwrap_or(u16::MAX);
        let text = strip_comment(raw).trim();

        // Skip empty lines and comments
        if text.is_empty() {
            continue;
        }

        if let Some(header) = text.strip_prefix('[') {
            let name = header
                .strip_suffix(']')
                .ok_or(ConfigError::InvalidSection { line })?
                .trim();
            section = parse_section(name).ok_or(ConfigError::InvalidSection { line })?;
            continue;
        }

        let (key, value) = text
            .split_once('=')
            .ok_or(ConfigError::InvalidLine { line })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(ConfigError::InvalidLine { line });
        }
        let value = parse_value(value.trim()).ok_or(ConfigError::InvalidValue { line })?;

        apply(&mut config, section, key, value, line)?;
    }

    Ok(config)
}

fn parse_section(name: &str) -> Option<Section> {
    if name.is_empty() || name.contains(['[', ']']) {
        return None;
    }
    Some(match name {
        "usb" => Section::Usb,
        "timing" => Section::Timing,
        "display" => Section::Display,
        "indicator" => Section::Indicator,
        _ => Section::Other,
    })
}

/// Cut a trailing `#` comment that is not inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_value(text: &str) -> Option<Value<'_>> {
    match text {
        "true" => return Some(Value::Bool(true)),
        "false" => return Some(Value::Bool(false)),
        _ => {}
    }

    if let Some(inner) = text.strip_prefix('"') {
        let inner = inner.strip_suffix('"')?;
        if inner.contains(['"', '\\']) {
            return None;
        }
        return Some(Value::Str(inner));
    }

    parse_int(text).map(Value::Int)
}

fn parse_int(text: &str) -> Option<i64> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let (radix, digits) = match digits.strip_prefix("0x") {
        Some(hex) => (16, hex),
        None => (10, digits),
    };
    if digits.is_empty() || digits.starts_with('_') || digits.ends_with('_') {
        return None;
    }

    let mut value: i64 = 0;
    for c in digits.chars().filter(|&c| c != '_') {
        let digit = c.to_digit(radix)? as i64;
        value = value.checked_mul(radix as i64)?.checked_add(digit)?;
    }
    Some(if negative { -value } else { value })
}

fn int<T: TryFrom<i64>>(value: Value<'_>, line: u16) -> Result<T, ConfigError> {
    match value {
        Value::Int(i) => T::try_from(i).map_err(|_| ConfigError::OutOfRange { line }),
        _ => Err(ConfigError::WrongType { line }),
    }
}

fn boolean(value: Value<'_>, line: u16) -> Result<bool, ConfigError> {
    match value {
        Value::Bool(b) => Ok(b),
        _ => Err(ConfigError::WrongType { line }),
    }
}

fn string<const N: usize>(value: Value<'_>, line: u16) -> Result<String<N>, ConfigError> {
    match value {
        Value::Str(s) => {
            let mut out = String::new();
            out.push_str(s)
                .map_err(|_| ConfigError::OutOfRange { line })?;
            Ok(out)
        }
        _ => Err(ConfigError::WrongType { line }),
    }
}

fn apply(
    config: &mut DeviceConfig,
    section: Section,
    key: &str,
    value: Value<'_>,
    line: u16,
) -> Result<(), ConfigError> {
    match (section, key) {
        (Section::Usb, "vendor_id") => config.usb.vendor_id = int(value, line)?,
        (Section::Usb, "product_id") => config.usb.product_id = int(value, line)?,
        (Section::Usb, "manufacturer") => config.usb.manufacturer = string(value, line)?,
        (Section::Usb, "product") => config.usb.product = string(value, line)?,
        (Section::Usb, "serial") => config.usb.serial = string(value, line)?,

        (Section::Timing, "long_press_ms") => config.timing.long_press_ms = int(value, line)?,
        (Section::Timing, "debounce_ms") => config.timing.debounce_ms = int(value, line)?,
        (Section::Timing, "repeat_start_ms") => {
            config.timing.repeat_start_ms = int(value, line)?
        }
        (Section::Timing, "repeat_continue_ms") => {
            config.timing.repeat_continue_ms = int(value, line)?
        }

        (Section::Display, "rotate_180") => config.display.rotate_180 = boolean(value, line)?,

        (Section::Indicator, "brightness") => config.indicator.brightness = int(value, line)?,

        // Unknown keys are ignored
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipped_config_parses() {
        let config = parse_config(include_str!("../../../tripad-firmware/macropad.toml")).unwrap();
        assert_eq!(config.usb.vendor_id, 0x16C0);
        assert_eq!(config.timing.long_press_ms, 1000);
        assert!(config.display.rotate_180);
    }

    #[test]
    fn test_full_example() {
        let input = r#"
# Tripad configuration
[usb]
vendor_id = 0x1209
product_id = 0x0001 # pid.codes test id
manufacturer = "Example # Co"
product = "Pad"
serial = "42"

[timing]
long_press_ms = 1_500
debounce_ms = 20
repeat_start_ms = 400
repeat_continue_ms = 100

[display]
rotate_180 = false

[indicator]
brightness = 64
"#;
        let config = parse_config(input).unwrap();
        assert_eq!(config.usb.vendor_id, 0x1209);
        assert_eq!(config.usb.product_id, 1);
        assert_eq!(config.usb.manufacturer.as_str(), "Example # Co");
        assert_eq!(config.usb.serial.as_str(), "42");
        assert_eq!(config.timing.long_press_ms, 1500);
        assert_eq!(config.debounce_ticks(), 2);
        assert_eq!(config.timing.repeat_start_ms, 400);
        assert_eq!(config.timing.repeat_continue_ms, 100);
        assert!(!config.display.rotate_180);
        assert_eq!(config.indicator.brightness, 64);
    }

    #[test]
    fn test_empty_input_gives_defaults() {
        assert_eq!(parse_config(""), Ok(DeviceConfig::default()));
    }

    #[test]
    fn test_unknown_keys_and_sections_ignored() {
        let input = "[usb]\ncolour = \"red\"\n[keyboard]\nlayout = \"us\"\n";
        assert_eq!(parse_config(input), Ok(DeviceConfig::default()));
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        assert_eq!(
            parse_config("[usb\n"),
            Err(ConfigError::InvalidSection { line: 1 })
        );
        assert_eq!(
            parse_config("[usb]\nvendor_id\n"),
            Err(ConfigError::InvalidLine { line: 2 })
        );
        assert_eq!(
            parse_config("[timing]\ndebounce_ms = ten\n"),
            Err(ConfigError::InvalidValue { line: 2 })
        );
        assert_eq!(
            parse_config("[display]\nrotate_180 = 1\n"),
            Err(ConfigError::WrongType { line: 2 })
        );
        assert_eq!(
            parse_config("\n[indicator]\nbrightness = 300\n"),
            Err(ConfigError::OutOfRange { line: 3 })
        );
        assert_eq!(
            parse_config("[usb]\nvendor_id = -1\n"),
            Err(ConfigError::OutOfRange { line: 2 })
        );
    }

    #[test]
    fn test_string_too_long() {
        let input = "[usb]\nproduct = \"0123456789012345678901234567890123456789\"\n";
        assert_eq!(
            parse_config(input),
            Err(ConfigError::OutOfRange { line: 2 })
        );
    }

    #[test]
    fn test_parse_int_forms() {
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int("0x2A"), Some(42));
        assert_eq!(parse_int("1_000"), Some(1000));
        assert_eq!(parse_int("-7"), Some(-7));
        assert_eq!(parse_int("_1"), None);
        assert_eq!(parse_int("0x"), None);
        assert_eq!(parse_int("99999999999999999999"), None);
    }
}
