//! Events reported by the controller

use heapless::Vec;

use crate::input::RepeatTiming;
use crate::settings::{SettingsError, SettingsRecord};
use crate::traits::{DisplayError, HidError};

/// Most events a single tick can report
pub const MAX_EVENTS: usize = 8;

/// Events produced by one tick
pub type Events = Vec<ControllerEvent, MAX_EVENTS>;

/// Notable transitions, returned from [`tick`](super::DeviceController::tick)
/// for the caller to log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerEvent {
    /// Active layer changed
    LayerChanged { profile: u8, layer: u8 },
    /// Modifier + C gesture started stepping layers backwards
    LayerBackEngaged,
    /// Active profile changed from the menu
    ProfileChanged { profile: u8 },
    /// Repeat timing changed from the menu
    TimingChanged(RepeatTiming),
    MenuEntered,
    MenuExited,
    /// A macro string was queued for typing
    MacroSent { index: u8 },
    SettingsSaved,
    SettingsLoaded(SettingsRecord),
    SaveFailed(SettingsError),
    LoadFailed(SettingsError),
    /// Keystroke dropped by the transport
    Hid(HidError),
    /// Frame could not be drawn
    Display(DisplayError),
}

pub(super) fn emit(events: &mut Events, event: ControllerEvent) {
    // A full buffer only loses log lines
    let _ = events.push(event);
}
