//! Layer and keymap tables
//!
//! A [`Profile`] is the ordered layer list for one host OS family. Each
//! [`Layer`] binds the three action buttons, an indicator colour and two
//! caption lines. All of it is immutable static data; the runtime only
//! holds indices into it.

mod layers;

pub use layers::{MAC_LAYERS, PROFILES, WIN_LAYERS};

use crate::hid::{Key, KeyCode, Modifiers};
use crate::input::Button;
use crate::macros::MacroTable;
use crate::traits::Rgb;

/// Errors found when validating keymap tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeymapError {
    /// The profile table is empty
    NoProfiles,
    /// A profile has no layers
    EmptyProfile { profile: u8 },
    /// A binding refers to a macro slot the table does not have
    MacroOutOfRange { profile: u8, layer: u8, index: u8 },
}

/// What one button sends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    /// 0 sends `code` + `modifiers`; k > 0 types macro string k
    pub macro_index: u8,
}

impl KeyBinding {
    /// Bind an ASCII character
    pub const fn char(c: u8, modifiers: Modifiers) -> Self {
        Self {
            code: KeyCode::Char(c),
            modifiers,
            macro_index: 0,
        }
    }

    /// Bind a symbolic key
    pub const fn key(key: Key, modifiers: Modifiers) -> Self {
        Self {
            code: KeyCode::Key(key),
            modifiers,
            macro_index: 0,
        }
    }

    /// Bind a macro string (1-based)
    pub const fn macro_string(index: u8) -> Self {
        Self {
            code: KeyCode::Char(0),
            modifiers: Modifiers::NONE,
            macro_index: index,
        }
    }
}

/// One layer of bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layer {
    /// Bindings for buttons A, B and C
    pub keys: [KeyBinding; 3],
    pub color: Rgb,
    pub captions: [&'static str; 2],
}

impl Layer {
    pub fn binding(&self, button: Button) -> &KeyBinding {
        match button {
            Button::A => &self.keys[0],
            Button::B => &self.keys[1],
            Button::C => &self.keys[2],
        }
    }
}

/// Layer list for one host OS family
#[derive(Debug, Clone, Copy)]
pub struct Profile {
    /// Label shown in the OS select menu
    pub name: &'static str,
    pub layers: &'static [Layer],
}

impl Profile {
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Layer at `index`, wrapping out-of-range indices to 0
    ///
    /// Profiles passed through [`Keymap::new`] are never empty.
    pub fn layer(&self, index: u8) -> &Layer {
        self.layers
            .get(index as usize)
            .unwrap_or(&self.layers[0])
    }
}

/// Set of profiles selectable from the menu
#[derive(Debug, Clone, Copy)]
pub struct Keymap {
    profiles: &'static [Profile],
}

impl Keymap {
    /// Wrap a profile table, rejecting empty tables and empty profiles
    pub fn new(profiles: &'static [Profile]) -> Result<Self, KeymapError> {
        if profiles.is_empty() {
            return Err(KeymapError::NoProfiles);
        }
        for (i, profile) in profiles.iter().enumerate() {
            if profile.layers.is_empty() {
                return Err(KeymapError::EmptyProfile { profile: i as u8 });
            }
        }
        Ok(Self { profiles })
    }

    /// The built-in macOS and Windows profiles
    pub fn builtin() -> Self {
        Self {
            profiles: &PROFILES,
        }
    }

    pub fn profile_count(&self) -> usize {
        self.profiles.len()
    }

    /// Profile at `index`, wrapping out-of-range indices to 0
    pub fn profile(&self, index: u8) -> &Profile {
        self.profiles
            .get(index as usize)
            .unwrap_or(&self.profiles[0])
    }

    /// Check every macro binding against `macros`
    pub fn validate(&self, macros: &MacroTable) -> Result<(), KeymapError> {
        for (p, profile) in self.profiles.iter().enumerate() {
            for (l, layer) in profile.layers.iter().enumerate() {
                for binding in &layer.keys {
                    if binding.macro_index != 0 && !macros.contains(binding.macro_index) {
                        return Err(KeymapError::MacroOutOfRange {
                            profile: p as u8,
                            layer: l as u8,
                            index: binding.macro_index,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
