//! Tripad - three-button macro-pad firmware
//!
//! Main firmware binary for a Seeed XIAO RP2040 carrier with three key
//! switches, a modifier switch, a 128x32 OLED and one RGB pixel.
//!
//! Pin assignments:
//!
//! | Function        | Pin          |
//! |-----------------|--------------|
//! | Button A/B/C    | GPIO26/27/28 |
//! | Modifier        | GPIO29       |
//! | OLED SDA / SCL  | GPIO6 / GPIO7 (I2C1) |
//! | Pixel power     | GPIO11       |
//! | Pixel data      | GPIO12 (PIO0 SM0) |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{PIO0, USB};
use embassy_rp::pio::{self, Pio};
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_rp::usb::{self, Driver};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use tripad_core::config::{parse_config, DeviceConfig};
use tripad_core::controller::{DeviceController, Outputs};
use tripad_core::input::Switches;
use tripad_core::keymap::Keymap;
use tripad_core::macros::MacroTable;
use tripad_core::runtime::RuntimeContext;
use tripad_core::settings::{SettingsError, SettingsStore};
use tripad_hal_rp2040::flash::{
    Rp2040Flash, MACRO_REGION_OFFSET, MACRO_REGION_SIZE, SETTINGS_OFFSET,
};
use tripad_hal_rp2040::gpio::ButtonInput;

use crate::collaborators::{ChannelDisplay, ChannelHid, SignalIndicator};
use crate::tasks::Controller;

mod channels;
mod collaborators;
mod tasks;

/// Embedded device configuration (compiled into firmware)
/// Edit macropad.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../macropad.toml");

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => usb::InterruptHandler<USB>;
    PIO0_IRQ_0 => pio::InterruptHandler<PIO0>;
});

// Static cells for state shared with tasks (must live forever)
static DEVICE_CONFIG: StaticCell<DeviceConfig> = StaticCell::new();
static CONTROLLER: StaticCell<Controller> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Tripad firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config: &'static DeviceConfig = DEVICE_CONFIG.init(load_config());

    // Macro strings, optionally overridden from flash
    let mut flash = Rp2040Flash::new(p.FLASH);
    let macros = load_macros(&mut flash);

    let keymap = Keymap::builtin();
    let macros = match keymap.validate(&macros) {
        Ok(()) => macros,
        Err(e) => {
            error!("Keymap rejects macro table: {:?}", e);
            warn!("Using built-in macro strings");
            MacroTable::new()
        }
    };

    let settings_block = match flash.into_block(SETTINGS_OFFSET) {
        Ok(block) => block,
        Err(e) => defmt::panic!("Settings block unavailable: {:?}", e),
    };
    info!("Flash initialized");

    // Buttons: A0-A3 on the XIAO header
    let switches = Switches::new(
        ButtonInput::new(p.PIN_26),
        ButtonInput::new(p.PIN_27),
        ButtonInput::new(p.PIN_28),
        ButtonInput::new(p.PIN_29),
        config.debounce_ticks(),
    );

    let outputs = Outputs {
        display: ChannelDisplay::default(),
        indicator: SignalIndicator::default(),
        hid: ChannelHid,
    };

    let controller = match DeviceController::new(
        switches,
        outputs,
        SettingsStore::new(settings_block),
        keymap,
        macros,
        RuntimeContext::new(config.repeat_timing()),
        config.controller_config(),
    ) {
        Ok(controller) => controller,
        Err(e) => defmt::panic!("Failed to build settings menu: {:?}", e),
    };
    let controller = CONTROLLER.init(controller);

    match controller.restore() {
        Ok(record) => info!("Restored settings: {:?}", record),
        Err(SettingsError::BadMagic) => info!("No saved settings, using defaults"),
        Err(e) => warn!("Failed to restore settings: {:?}", e),
    }

    // OLED on I2C1
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = 400_000;
    let i2c = I2c::new_blocking(p.I2C1, p.PIN_7, p.PIN_6, i2c_config);
    info!("I2C initialized for display");

    // RGB pixel: power switch, then data via PIO
    let pixel_power = Output::new(p.PIN_11, Level::High);
    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, Irqs);
    let program = PioWs2812Program::new(&mut common);
    let led = PioWs2812::new(&mut common, sm0, p.DMA_CH0, p.PIN_12, &program);
    info!("PIO pixel initialized");

    let driver = Driver::new(p.USB, Irqs);

    // Spawn tasks
    spawner.spawn(unwrap!(tasks::tick_task()));
    spawner.spawn(unwrap!(tasks::display_task(i2c, config.display.rotate_180)));
    spawner.spawn(unwrap!(tasks::indicator_task(led, pixel_power)));
    spawner.spawn(unwrap!(tasks::usb_task(driver, &config.usb)));
    spawner.spawn(unwrap!(tasks::controller_task(controller)));

    info!("All tasks spawned, firmware running");

    // Keeps the PIO common block alive for the pixel state machine
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Parse the embedded configuration, falling back to defaults
fn load_config() -> DeviceConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            // build.rs validates macropad.toml, so this is a subset mismatch
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using default configuration");
            DeviceConfig::default()
        }
    }
}

/// Built-in macro strings with the flash override applied
fn load_macros(flash: &mut Rp2040Flash<'_>) -> MacroTable {
    let mut macros = MacroTable::new();
    let mut region = [0u8; MACRO_REGION_SIZE];

    if let Err(e) = flash.read(MACRO_REGION_OFFSET, &mut region) {
        warn!("Failed to read macro region: {:?}", e);
        return macros;
    }

    match macros.apply_override(&region) {
        Ok(0) => info!("Using {} built-in macro strings", macros.len()),
        Ok(count) => info!("Loaded {} macro strings from flash", count),
        Err(e) => warn!("Ignoring macro override: {:?}", e),
    }
    macros
}
