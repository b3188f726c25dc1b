//! RP2040-specific HAL for the macro-pad firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `tripad-hal` traits:
//!
//! - Active-low button inputs with internal pull-ups
//! - Blocking flash access for the settings block and the
//!   macro-string override region

#![no_std]

pub mod flash;
pub mod gpio;

// Re-export shared traits from tripad-hal for convenience
pub use tripad_hal::{BlockStorage, FlashError, InputPin};
