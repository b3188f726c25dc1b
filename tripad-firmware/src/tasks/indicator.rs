//! RGB indicator task
//!
//! The board's WS2812 pixel is driven from PIO0. Its supply is switched by
//! a separate GPIO that must stay high.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio_programs::ws2812::{Grb, PioWs2812};
use smart_leds::RGB8;

use crate::channels::LED_COLOR;

#[embassy_executor::task]
pub async fn indicator_task(mut led: PioWs2812<'static, PIO0, 0, 1, Grb>, power: Output<'static>) {
    info!("Indicator task started");

    // Owned here so the pixel stays powered
    let _power = power;

    led.write(&[RGB8::default()]).await;

    loop {
        let color = LED_COLOR.wait().await;
        led.write(&[RGB8::new(color.r, color.g, color.b)]).await;
    }
}
