//! Board-agnostic core logic for the macro-pad firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Per-switch debounce, edge, long-press and auto-repeat detection
//! - Static layer/keymap tables per host OS profile
//! - Macro-string table and its flash override format
//! - Settings menu tree with edit/commit/cancel semantics
//! - Persisted settings record and load/save against block storage
//! - The per-tick device controller tying it all together
//! - Collaborator traits for the display, indicator LED and HID transport
//! - Device configuration parsing

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod hid;
pub mod input;
pub mod keymap;
pub mod macros;
pub mod menu;
pub mod runtime;
pub mod settings;
pub mod traits;

#[cfg(test)]
mod testing;

/// Nominal control-loop period in milliseconds
///
/// Every time-based threshold (debounce, long press, repeat) is a
/// millisecond value divided by this period, so changing it rescales
/// all of them.
pub const TICK_PERIOD_MS: u32 = 10;

/// Convert a millisecond duration to a whole number of ticks
pub const fn ms_to_ticks(ms: u32) -> u32 {
    ms / TICK_PERIOD_MS
}
