//! Collaborator traits
//!
//! The controller renders through these and never touches hardware.
//! The firmware implements them by posting to inter-task channels; the
//! tests implement them by recording calls.

pub mod display;
pub mod hid;
pub mod indicator;

pub use display::{DisplayError, StatusDisplay};
pub use hid::{HidError, HidTransport};
pub use indicator::{Indicator, Rgb};
