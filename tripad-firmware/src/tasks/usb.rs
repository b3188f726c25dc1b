//! USB HID keyboard task
//!
//! Enumerates as a boot keyboard and turns each queued [`KeyStroke`] into
//! a press report followed by a release report.

use defmt::*;
use embassy_futures::join::join;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::hid::{self, HidBootProtocol, HidSubclass, HidWriter, State};
use embassy_usb::{Builder, Config};
use usbd_hid::descriptor::{KeyboardReport, SerializedDescriptor};

use tripad_core::config::UsbConfig;
use tripad_core::hid::KeyStroke;

use crate::channels::HID_STROKES;

/// Boot keyboard report size
const REPORT_SIZE: usize = 8;

fn press_report(stroke: KeyStroke) -> KeyboardReport {
    KeyboardReport {
        modifier: stroke.modifiers.bits(),
        reserved: 0,
        leds: 0,
        keycodes: [stroke.usage, 0, 0, 0, 0, 0],
    }
}

fn release_report() -> KeyboardReport {
    KeyboardReport {
        modifier: 0,
        reserved: 0,
        leds: 0,
        keycodes: [0; 6],
    }
}

#[embassy_executor::task]
pub async fn usb_task(driver: Driver<'static, USB>, usb: &'static UsbConfig) {
    info!(
        "USB task started ({:04x}:{:04x})",
        usb.vendor_id, usb.product_id
    );

    let mut config = Config::new(usb.vendor_id, usb.product_id);
    config.manufacturer = Some(usb.manufacturer.as_str());
    config.product = Some(usb.product.as_str());
    config.serial_number = Some(usb.serial.as_str());
    config.max_power = 100;
    config.max_packet_size_0 = 64;

    let mut config_descriptor = [0; 256];
    let mut bos_descriptor = [0; 256];
    let mut msos_descriptor = [0; 256];
    let mut control_buf = [0; 64];
    let mut state = State::new();

    let mut builder = Builder::new(
        driver,
        config,
        &mut config_descriptor,
        &mut bos_descriptor,
        &mut msos_descriptor,
        &mut control_buf,
    );

    let hid_config = hid::Config {
        report_descriptor: KeyboardReport::desc(),
        request_handler: None,
        poll_ms: 10,
        max_packet_size: 8,
        hid_subclass: HidSubclass::Boot,
        hid_boot_protocol: HidBootProtocol::Keyboard,
    };
    let mut writer = HidWriter::<_, REPORT_SIZE>::new(&mut builder, &mut state, hid_config);
    let mut device = builder.build();

    let report_fut = async {
        loop {
            let stroke = HID_STROKES.receive().await;
            writer.ready().await;

            if let Err(e) = writer.write_serialize(&press_report(stroke)).await {
                warn!("HID press report failed: {:?}", e);
                continue;
            }
            if let Err(e) = writer.write_serialize(&release_report()).await {
                warn!("HID release report failed: {:?}", e);
            }
        }
    };

    join(device.run(), report_fut).await;
}
