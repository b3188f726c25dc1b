//! Main controller task
//!
//! Runs one controller step per tick and logs what it reports.

use defmt::*;

use tripad_core::controller::{ControllerEvent, DeviceController};
use tripad_core::TICK_PERIOD_MS;
use tripad_hal_rp2040::flash::Rp2040FlashBlock;
use tripad_hal_rp2040::gpio::ButtonInput;

use crate::collaborators::{ChannelDisplay, ChannelHid, SignalIndicator};
use crate::tasks::tick::TICK_SIGNAL;

/// The controller wired to this board
pub type Controller = DeviceController<
    ButtonInput<'static>,
    ChannelDisplay,
    SignalIndicator,
    ChannelHid,
    Rp2040FlashBlock<'static>,
>;

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(controller: &'static mut Controller) {
    info!("Controller task started");

    let mut last_ms: Option<u32> = None;

    loop {
        let now_ms = TICK_SIGNAL.wait().await;

        // Flash erase during a save blocks the loop; missed ticks coalesce
        if let Some(last) = last_ms {
            let elapsed = now_ms.wrapping_sub(last);
            if elapsed > 2 * TICK_PERIOD_MS {
                debug!("Controller fell behind by {}ms", elapsed);
            }
        }
        last_ms = Some(now_ms);

        for event in controller.tick() {
            log_event(event);
        }
    }
}

fn log_event(event: ControllerEvent) {
    match event {
        ControllerEvent::LayerChanged { profile, layer } => {
            info!("Layer {} (profile {})", layer, profile);
        }
        ControllerEvent::LayerBackEngaged => debug!("Layer-back engaged"),
        ControllerEvent::ProfileChanged { profile } => info!("Profile changed to {}", profile),
        ControllerEvent::TimingChanged(timing) => info!("Repeat timing {:?}", timing),
        ControllerEvent::MenuEntered => info!("Menu entered"),
        ControllerEvent::MenuExited => info!("Menu exited"),
        ControllerEvent::MacroSent { index } => debug!("Macro {} sent", index),
        ControllerEvent::SettingsSaved => info!("Settings saved"),
        ControllerEvent::SettingsLoaded(record) => info!("Settings loaded: {:?}", record),
        ControllerEvent::SaveFailed(e) => error!("Settings save failed: {:?}", e),
        ControllerEvent::LoadFailed(e) => warn!("Settings load failed: {:?}", e),
        ControllerEvent::Hid(e) => warn!("Key stroke dropped: {:?}", e),
        ControllerEvent::Display(e) => warn!("Frame not drawn: {:?}", e),
    }
}
