//! Inter-task communication channels
//!
//! The controller task owns all application state. Its collaborators post
//! rendered frames, indicator colours and key strokes here for the
//! hardware tasks to pick up.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use heapless::String;

use tripad_core::hid::KeyStroke;
use tripad_core::menu::MAX_VALUE_LEN;
use tripad_core::traits::Rgb;

/// Characters per display line
pub const LINE_LEN: usize = MAX_VALUE_LEN;

/// Channel capacity for key strokes, enough for one full macro string
const HID_CHANNEL_SIZE: usize = 64;

/// One display frame as drawn by the controller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub lines: Option<[String<LINE_LEN>; 2]>,
    /// Width of the caption progress bar in pixels
    pub progress: Option<u8>,
}

/// Latest frame for the display task (older frames are replaced)
pub static FRAME: Signal<CriticalSectionRawMutex, Frame> = Signal::new();

/// Latest indicator colour
pub static LED_COLOR: Signal<CriticalSectionRawMutex, Rgb> = Signal::new();

/// Key strokes waiting to be reported to the host
pub static HID_STROKES: Channel<CriticalSectionRawMutex, KeyStroke, HID_CHANNEL_SIZE> =
    Channel::new();
