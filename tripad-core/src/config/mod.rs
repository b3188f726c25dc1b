//! Device configuration
//!
//! The firmware embeds `macropad.toml` and parses it at boot with
//! [`parse_config`]. Missing sections and keys keep the defaults below.

mod parser;

pub use parser::{parse_config, ConfigError};

use heapless::String;

use crate::controller::{ControllerConfig, DEFAULT_LONG_PRESS_MS};
use crate::input::RepeatTiming;
use crate::TICK_PERIOD_MS;

/// Maximum length of a USB string descriptor value
pub const MAX_USB_STRING_LEN: usize = 32;

/// USB identity
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UsbConfig {
    pub vendor_id: u16,
    pub product_id: u16,
    pub manufacturer: String<MAX_USB_STRING_LEN>,
    pub product: String<MAX_USB_STRING_LEN>,
    pub serial: String<MAX_USB_STRING_LEN>,
}

impl Default for UsbConfig {
    fn default() -> Self {
        Self {
            vendor_id: 0x16C0,
            product_id: 0x27DB,
            manufacturer: short("Tripad"),
            product: short("Tripad Macro Pad"),
            serial: short("0001"),
        }
    }
}

fn short(s: &str) -> String<MAX_USB_STRING_LEN> {
    let mut out = String::new();
    let _ = out.push_str(s);
    out
}

/// Button timing in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingConfig {
    pub long_press_ms: u32,
    pub debounce_ms: u32,
    pub repeat_start_ms: u16,
    pub repeat_continue_ms: u16,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            long_press_ms: DEFAULT_LONG_PRESS_MS,
            debounce_ms: TICK_PERIOD_MS,
            repeat_start_ms: RepeatTiming::DEFAULT_START_MS,
            repeat_continue_ms: RepeatTiming::DEFAULT_CONTINUE_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// Mount the panel upside down
    pub rotate_180: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { rotate_180: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IndicatorConfig {
    /// Scale applied to layer colours, 255 is unscaled
    pub brightness: u8,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self { brightness: 255 }
    }
}

/// Complete device configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceConfig {
    pub usb: UsbConfig,
    pub timing: TimingConfig,
    pub display: DisplayConfig,
    pub indicator: IndicatorConfig,
}

impl DeviceConfig {
    /// Stable samples a switch needs, at least one
    pub fn debounce_ticks(&self) -> u8 {
        (self.timing.debounce_ms / TICK_PERIOD_MS).clamp(1, u8::MAX as u32) as u8
    }

    /// Initial repeat timing, before persisted settings are applied
    pub fn repeat_timing(&self) -> RepeatTiming {
        RepeatTiming::new(self.timing.repeat_start_ms, self.timing.repeat_continue_ms)
    }

    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            long_press_ms: self.timing.long_press_ms,
            brightness: self.indicator.brightness,
        }
    }
}
