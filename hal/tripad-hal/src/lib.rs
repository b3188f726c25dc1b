//! Tripad Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the board-agnostic
//! core needs from a chip-specific HAL. The same core logic can then run
//! against RP2040 peripherals on the device and against in-memory mocks
//! on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  tripad-firmware / tripad-core          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tripad-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │  tripad-hal-  │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`] - Digital input sampled once per tick
//! - [`flash::BlockStorage`] - Whole-block persistent storage

#![no_std]
#![deny(unsafe_code)]

pub mod flash;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use flash::{BlockStorage, FlashError};
pub use gpio::InputPin;
