//! OLED status display task
//!
//! Draws the latest [`Frame`] on a 128x32 SSD1306 over I2C.

use defmt::*;
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C1;
use embedded_graphics::mono_font::ascii::FONT_5X8;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};

use crate::channels::{Frame, FRAME};

/// Baseline offsets of the two text lines
const LINE_Y: [i32; 2] = [2, 13];

/// Top of the caption progress bar
const BAR_Y: i32 = 28;

const BAR_HEIGHT: u32 = 3;

#[embassy_executor::task]
pub async fn display_task(i2c: I2c<'static, I2C1, Blocking>, rotate_180: bool) {
    info!("Display task started");

    let rotation = if rotate_180 {
        DisplayRotation::Rotate180
    } else {
        DisplayRotation::Rotate0
    };
    let interface = I2CDisplayInterface::new(i2c);
    let mut display =
        Ssd1306::new(interface, DisplaySize128x32, rotation).into_buffered_graphics_mode();

    if let Err(e) = display.init() {
        error!("Failed to initialize display: {:?}", Debug2Format(&e));
    } else {
        info!("OLED initialized");
    }

    loop {
        let frame = FRAME.wait().await;

        draw(&mut display, &frame);
        if let Err(e) = display.flush() {
            warn!("Display flush failed: {:?}", Debug2Format(&e));
        }
    }
}

fn draw<D>(target: &mut D, frame: &Frame)
where
    D: DrawTarget<Color = BinaryColor>,
{
    target.clear(BinaryColor::Off).ok();

    if let Some(lines) = &frame.lines {
        let style = MonoTextStyle::new(&FONT_5X8, BinaryColor::On);
        for (text, y) in lines.iter().zip(LINE_Y) {
            Text::with_baseline(text, Point::new(0, y), style, Baseline::Top)
                .draw(target)
                .ok();
        }
    }

    if let Some(width) = frame.progress.filter(|w| *w > 0) {
        Rectangle::new(Point::new(0, BAR_Y), Size::new(width as u32, BAR_HEIGHT))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(target)
            .ok();
    }
}
