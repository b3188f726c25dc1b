//! Per-switch debounce, edge, long-press and auto-repeat detection

use tripad_hal::InputPin;

use crate::{ms_to_ticks, TICK_PERIOD_MS};

/// Auto-repeat thresholds in milliseconds
///
/// Shared by every switch and owned by the runtime context. A change
/// takes effect on the next `update`, never retroactively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RepeatTiming {
    /// Hold time before auto-repeat starts
    pub start_ms: u16,
    /// Interval between auto-repeats once started
    pub continue_ms: u16,
}

impl RepeatTiming {
    pub const DEFAULT_START_MS: u16 = 500;
    pub const DEFAULT_CONTINUE_MS: u16 = 200;

    pub const fn new(start_ms: u16, continue_ms: u16) -> Self {
        Self {
            start_ms,
            continue_ms,
        }
    }

    fn start_ticks(&self) -> u32 {
        ms_to_ticks(self.start_ms as u32)
    }

    fn continue_ticks(&self) -> u32 {
        ms_to_ticks(self.continue_ms as u32).max(1)
    }
}

impl Default for RepeatTiming {
    fn default() -> Self {
        Self::new(Self::DEFAULT_START_MS, Self::DEFAULT_CONTINUE_MS)
    }
}

/// A single debounced push switch
///
/// The pin is active-low: a low level means the switch is held.
#[derive(Debug)]
pub struct InputSwitch<P: InputPin> {
    pin: P,
    /// Consecutive identical raw samples required to accept a level
    debounce_ticks: u8,
    last_raw: bool,
    raw_run: u8,
    pressed: bool,
    prev: bool,
    /// Ticks held, 1 on the first held tick, 0 while released
    count: u32,
    on: bool,
    repeat: bool,
}

impl<P: InputPin> InputSwitch<P> {
    /// Create a switch that accepts every sample (one-tick debounce)
    pub fn new(pin: P) -> Self {
        Self::with_debounce(pin, 1)
    }

    /// Create a switch requiring `debounce_ticks` stable samples
    pub fn with_debounce(pin: P, debounce_ticks: u8) -> Self {
        let debounce_ticks = debounce_ticks.max(1);
        Self {
            pin,
            debounce_ticks,
            last_raw: false,
            raw_run: debounce_ticks,
            pressed: false,
            prev: false,
            count: 0,
            on: false,
            repeat: false,
        }
    }

    /// Sample the pin and advance the switch state by one tick
    pub fn update(&mut self, timing: &RepeatTiming) {
        let raw = self.pin.is_low();
        if raw == self.last_raw {
            self.raw_run = self.raw_run.saturating_add(1);
        } else {
            self.last_raw = raw;
            self.raw_run = 1;
        }

        self.prev = self.pressed;
        if self.raw_run >= self.debounce_ticks {
            self.pressed = raw;
        }

        self.on = self.pressed && !self.prev;
        self.count = if self.pressed {
            self.count.saturating_add(1)
        } else {
            0
        };

        self.repeat = self.pressed
            && self.count >= timing.start_ticks()
            && self.count % timing.continue_ticks() == 0;
    }

    /// Rising edge: released last tick, held this tick
    pub fn on(&self) -> bool {
        self.on
    }

    /// Held this tick
    pub fn pressed(&self) -> bool {
        self.pressed
    }

    /// Falling edge: held last tick, released this tick
    pub fn release(&self) -> bool {
        !self.pressed && self.prev
    }

    /// Key-repeat event: the initial press, then periodic repeats
    pub fn repeat(&self) -> bool {
        self.on || self.repeat
    }

    /// Held for longer than `ms`
    pub fn long_pressed(&self, ms: u32) -> bool {
        self.count > ms_to_ticks(ms)
    }

    /// How long the switch has been held, in milliseconds
    pub fn press_duration_ms(&self) -> u32 {
        self.count * TICK_PERIOD_MS
    }

    /// Ticks held so far
    pub fn held_ticks(&self) -> u32 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestPin;
    use proptest::prelude::*;

    fn hold_for(
        switch: &mut InputSwitch<&TestPin>,
        pin: &TestPin,
        timing: &RepeatTiming,
        ticks: u32,
    ) -> std::vec::Vec<u32> {
        pin.set_held(true);
        let mut fired = std::vec::Vec::new();
        for tick in 0..ticks {
            switch.update(timing);
            if switch.repeat() {
                fired.push(tick);
            }
        }
        fired
    }

    #[test]
    fn test_edges() {
        let pin = TestPin::new();
        let mut switch = InputSwitch::new(&pin);
        let timing = RepeatTiming::default();

        switch.update(&timing);
        assert!(!switch.pressed());
        assert!(!switch.on());

        pin.set_held(true);
        switch.update(&timing);
        assert!(switch.on());
        assert!(switch.pressed());
        assert!(!switch.release());

        switch.update(&timing);
        assert!(!switch.on());
        assert!(switch.pressed());

        pin.set_held(false);
        switch.update(&timing);
        assert!(switch.release());
        assert!(!switch.pressed());
        assert_eq!(switch.held_ticks(), 0);

        switch.update(&timing);
        assert!(!switch.release());
    }

    #[test]
    fn test_repeat_cadence_default_timing() {
        let pin = TestPin::new();
        let mut switch = InputSwitch::new(&pin);
        let timing = RepeatTiming::new(500, 200);

        let fired = hold_for(&mut switch, &pin, &timing, 100);
        assert_eq!(fired, [0, 59, 79, 99]);
    }

    #[test]
    fn test_long_pressed_threshold() {
        let pin = TestPin::new();
        let mut switch = InputSwitch::new(&pin);
        let timing = RepeatTiming::default();
        pin.set_held(true);

        for _ in 0..100 {
            switch.update(&timing);
        }
        assert_eq!(switch.press_duration_ms(), 1000);
        assert!(!switch.long_pressed(1000));

        switch.update(&timing);
        assert!(switch.long_pressed(1000));
    }

    #[test]
    fn test_timing_change_applies_next_tick() {
        let pin = TestPin::new();
        let mut switch = InputSwitch::new(&pin);
        pin.set_held(true);

        let slow = RepeatTiming::new(2000, 1000);
        for _ in 0..59 {
            switch.update(&slow);
        }
        assert!(!switch.repeat());

        // count becomes 60: >= 50 and a multiple of 20 under the faster timing
        switch.update(&RepeatTiming::new(500, 200));
        assert!(switch.repeat());
    }

    #[test]
    fn test_debounce_rejects_short_glitch() {
        let pin = TestPin::new();
        let mut switch = InputSwitch::with_debounce(&pin, 3);
        let timing = RepeatTiming::default();

        pin.set_held(true);
        switch.update(&timing);
        switch.update(&timing);
        pin.set_held(false);
        switch.update(&timing);
        assert!(!switch.pressed());

        pin.set_held(true);
        switch.update(&timing);
        switch.update(&timing);
        assert!(!switch.pressed());
        switch.update(&timing);
        assert!(switch.on());
    }

    #[test]
    fn test_no_repeat_while_released() {
        let pin = TestPin::new();
        let mut switch = InputSwitch::new(&pin);
        let timing = RepeatTiming::new(0, 10);
        for _ in 0..10 {
            switch.update(&timing);
            assert!(!switch.repeat());
        }
    }

    proptest! {
        #[test]
        fn prop_repeat_click_pause_then_steady(
            start_step in 1u16..=20,
            cont_step in 5u16..=100,
            extra in 0u32..200,
        ) {
            let timing = RepeatTiming::new(start_step * 100, cont_step * 10);
            let start_ticks = (timing.start_ms / 10) as u32;
            let cont_ticks = (timing.continue_ms / 10) as u32;

            let pin = TestPin::new();
            let mut switch = InputSwitch::new(&pin);
            let fired = hold_for(&mut switch, &pin, &timing, start_ticks + 2 * cont_ticks + extra);

            // Initial click on the first held tick
            prop_assert_eq!(fired[0], 0);
            // Dead zone: nothing until the held counter reaches the start threshold
            prop_assert!(fired.iter().skip(1).all(|&t| t + 1 >= start_ticks));
            // Steady repeat at the continue interval afterwards
            prop_assert!(fired.len() >= 3);
            for pair in fired[1..].windows(2) {
                prop_assert_eq!(pair[1] - pair[0], cont_ticks);
            }
        }
    }
}
