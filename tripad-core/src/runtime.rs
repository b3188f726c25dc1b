//! Live device state
//!
//! Everything the menu can change and the settings record persists lives
//! in one [`RuntimeContext`] owned by the controller and passed by
//! reference to whoever needs it.

use crate::input::RepeatTiming;
use crate::keymap::{Keymap, Layer, Profile};

/// Allowed values of a millisecond tunable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRange {
    pub min: u16,
    pub max: u16,
    pub step: u16,
}

impl FieldRange {
    pub const fn clamp(&self, value: u16) -> u16 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }
}

pub const REPEAT_START_RANGE: FieldRange = FieldRange {
    min: 100,
    max: 2000,
    step: 100,
};

pub const REPEAT_CONTINUE_RANGE: FieldRange = FieldRange {
    min: 50,
    max: 1000,
    step: 10,
};

/// Active profile, active layer and repeat timing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RuntimeContext {
    pub profile_index: u8,
    pub layer_index: u8,
    pub timing: RepeatTiming,
}

impl RuntimeContext {
    pub fn new(timing: RepeatTiming) -> Self {
        Self {
            profile_index: 0,
            layer_index: 0,
            timing,
        }
    }

    /// Force every value into range
    ///
    /// Out-of-range indices become 0 and timings are clamped to the menu
    /// limits. Returns `true` if anything changed.
    pub fn sanitize(&mut self, keymap: &Keymap) -> bool {
        let before = *self;

        if self.profile_index as usize >= keymap.profile_count() {
            self.profile_index = 0;
        }
        if self.layer_index as usize >= self.profile(keymap).layer_count() {
            self.layer_index = 0;
        }
        self.timing.start_ms = REPEAT_START_RANGE.clamp(self.timing.start_ms);
        self.timing.continue_ms = REPEAT_CONTINUE_RANGE.clamp(self.timing.continue_ms);

        *self != before
    }

    /// Switch profile; the layer resets to 0 when the profile changes
    pub fn select_profile(&mut self, index: u8) -> bool {
        if index == self.profile_index {
            return false;
        }
        self.profile_index = index;
        self.layer_index = 0;
        true
    }

    /// Advance to the next layer, wrapping to 0
    pub fn next_layer(&mut self, keymap: &Keymap) {
        let count = self.profile(keymap).layer_count().max(1);
        self.layer_index = ((self.layer_index as usize + 1) % count) as u8;
    }

    /// Step back one layer, wrapping from 0 to the last
    pub fn previous_layer(&mut self, keymap: &Keymap) {
        let count = self.profile(keymap).layer_count().max(1);
        self.layer_index = ((self.layer_index as usize + count - 1) % count) as u8;
    }

    pub fn profile<'k>(&self, keymap: &'k Keymap) -> &'k Profile {
        keymap.profile(self.profile_index)
    }

    pub fn layer<'k>(&self, keymap: &'k Keymap) -> &'k Layer {
        self.profile(keymap).layer(self.layer_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_cycling_wraps() {
        let keymap = Keymap::builtin();
        let mut ctx = RuntimeContext::default();
        ctx.select_profile(1);
        let count = ctx.profile(&keymap).layer_count() as u8;

        for expected in (1..count).chain(core::iter::once(0)) {
            ctx.next_layer(&keymap);
            assert_eq!(ctx.layer_index, expected);
        }

        ctx.previous_layer(&keymap);
        assert_eq!(ctx.layer_index, count - 1);
    }

    #[test]
    fn test_profile_change_resets_layer() {
        let mut ctx = RuntimeContext::default();
        ctx.layer_index = 3;
        assert!(!ctx.select_profile(0));
        assert_eq!(ctx.layer_index, 3);
        assert!(ctx.select_profile(1));
        assert_eq!(ctx.layer_index, 0);
    }

    #[test]
    fn test_sanitize() {
        let keymap = Keymap::builtin();
        let mut ctx = RuntimeContext {
            profile_index: 7,
            layer_index: 40,
            timing: RepeatTiming::new(5, 60000),
        };
        assert!(ctx.sanitize(&keymap));
        assert_eq!(ctx.profile_index, 0);
        assert_eq!(ctx.layer_index, 0);
        assert_eq!(ctx.timing, RepeatTiming::new(100, 1000));
        assert!(!ctx.sanitize(&keymap));
    }
}
