//! Button inputs for RP2040
//!
//! The switches short the pin to ground, so inputs use the internal
//! pull-up and read low while held. Debouncing is done in software by
//! the core's switch scanner.

use embassy_rp::gpio::{Input, Pin, Pull};
use embassy_rp::Peri;

pub use tripad_hal::gpio::InputPin;

/// Active-low push button input
pub struct ButtonInput<'d> {
    input: Input<'d>,
}

impl<'d> ButtonInput<'d> {
    /// Configure `pin` as an input with the internal pull-up enabled
    pub fn new(pin: Peri<'d, impl Pin>) -> Self {
        let mut input = Input::new(pin, Pull::Up);
        input.set_schmitt(true);
        Self { input }
    }
}

impl<'d> InputPin for ButtonInput<'d> {
    fn is_high(&self) -> bool {
        self.input.is_high()
    }
}
