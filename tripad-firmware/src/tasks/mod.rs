//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod controller;
pub mod display;
pub mod indicator;
pub mod tick;
pub mod usb;

pub use controller::{controller_task, Controller};
pub use display::display_task;
pub use indicator::indicator_task;
pub use tick::tick_task;
pub use usb::usb_task;
