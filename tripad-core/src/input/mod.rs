//! Button input handling
//!
//! Four active-low switches are sampled once per tick. Each switch turns
//! its raw samples into a small event vocabulary (`on`, `pressed`,
//! `release`, `repeat`, `long_pressed`) that both the menu navigator and
//! the key dispatcher consume.

pub mod switch;

pub use switch::{InputSwitch, RepeatTiming};

use tripad_hal::InputPin;

/// The three action buttons, in keymap order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    A,
    B,
    C,
}

impl Button {
    pub const ALL: [Button; 3] = [Button::A, Button::B, Button::C];
}

/// All switches on the pad
pub struct Switches<P: InputPin> {
    pub a: InputSwitch<P>,
    pub b: InputSwitch<P>,
    pub c: InputSwitch<P>,
    pub modifier: InputSwitch<P>,
}

impl<P: InputPin> Switches<P> {
    /// Group four switches sharing the same debounce window
    pub fn new(a: P, b: P, c: P, modifier: P, debounce_ticks: u8) -> Self {
        Self {
            a: InputSwitch::with_debounce(a, debounce_ticks),
            b: InputSwitch::with_debounce(b, debounce_ticks),
            c: InputSwitch::with_debounce(c, debounce_ticks),
            modifier: InputSwitch::with_debounce(modifier, debounce_ticks),
        }
    }

    /// Sample every switch; call exactly once per tick before any dispatch
    pub fn update(&mut self, timing: &RepeatTiming) {
        self.a.update(timing);
        self.b.update(timing);
        self.c.update(timing);
        self.modifier.update(timing);
    }

    /// Switch for an action button
    pub fn button(&self, button: Button) -> &InputSwitch<P> {
        match button {
            Button::A => &self.a,
            Button::B => &self.b,
            Button::C => &self.c,
        }
    }
}
