//! Built-in layer tables

use super::{KeyBinding, Layer, Profile};
use crate::hid::{Key, Modifiers};
use crate::traits::Rgb;

const NONE: Modifiers = Modifiers::NONE;
const CTRL: Modifiers = Modifiers::CTRL;
const SHIFT: Modifiers = Modifiers::SHIFT;
const ALT: Modifiers = Modifiers::ALT;
const GUI: Modifiers = Modifiers::GUI;

const ESC: u8 = 0x1B;

pub const MAC_LAYERS: &[Layer] = &[
    Layer {
        keys: [
            KeyBinding::char(b'\t', CTRL),
            KeyBinding::char(b'\t', CTRL.with(SHIFT)),
            KeyBinding::char(b'\n', NONE),
        ],
        color: Rgb::new(5, 0, 0),
        captions: ["M:Tab Change", "Btn C: Enter"],
    },
    Layer {
        keys: [
            KeyBinding::key(Key::RightArrow, CTRL),
            KeyBinding::key(Key::LeftArrow, CTRL),
            KeyBinding::char(b' ', GUI),
        ],
        color: Rgb::new(0, 5, 0),
        captions: ["M:Win Change", "Btn C: Spotlight"],
    },
    Layer {
        keys: [
            KeyBinding::char(b'\t', GUI),
            KeyBinding::char(b'\t', GUI.with(SHIFT)),
            KeyBinding::char(b'\t', ALT),
        ],
        color: Rgb::new(0, 0, 5),
        captions: ["M:App Change", "Btn C: Next Win"],
    },
    Layer {
        keys: [
            KeyBinding::char(b'5', GUI.with(SHIFT)),
            KeyBinding::char(b'\n', NONE),
            KeyBinding::char(ESC, NONE),
        ],
        color: Rgb::new(5, 5, 0),
        captions: ["M:Screen Shot", "A:Shot B:OK C:NG"],
    },
    Layer {
        keys: [
            KeyBinding::key(Key::PageUp, NONE),
            KeyBinding::key(Key::PageDown, NONE),
            KeyBinding::char(b' ', NONE),
        ],
        color: Rgb::new(5, 0, 5),
        captions: ["M:Page Scroll", "Btn C: Space"],
    },
    Layer {
        keys: [
            KeyBinding::macro_string(1),
            KeyBinding::macro_string(2),
            KeyBinding::macro_string(3),
        ],
        color: Rgb::new(2, 2, 2),
        captions: ["M:Snippets", "A:1 B:2 C:3"],
    },
];

pub const WIN_LAYERS: &[Layer] = &[
    Layer {
        keys: [
            KeyBinding::char(b'\t', CTRL),
            KeyBinding::char(b'\t', CTRL.with(SHIFT)),
            KeyBinding::char(b'\n', NONE),
        ],
        color: Rgb::new(0, 5, 5),
        captions: ["W:Tab Change", "Btn C: Enter"],
    },
    Layer {
        keys: [
            KeyBinding::char(b'\t', ALT),
            KeyBinding::char(b'\t', ALT.with(SHIFT)),
            KeyBinding::char(b'\n', NONE),
        ],
        color: Rgb::new(5, 5, 5),
        captions: ["W:App Change", "Btn C: App List"],
    },
    Layer {
        keys: [
            KeyBinding::macro_string(1),
            KeyBinding::macro_string(2),
            KeyBinding::macro_string(3),
        ],
        color: Rgb::new(2, 2, 2),
        captions: ["W:Snippets", "A:1 B:2 C:3"],
    },
];

const _: () = assert!(!MAC_LAYERS.is_empty() && MAC_LAYERS.len() <= u8::MAX as usize);
const _: () = assert!(!WIN_LAYERS.is_empty() && WIN_LAYERS.len() <= u8::MAX as usize);

/// Profiles in OS select order
pub static PROFILES: [Profile; 2] = [
    Profile {
        name: "MacOS",
        layers: MAC_LAYERS,
    },
    Profile {
        name: "Windows",
        layers: WIN_LAYERS,
    },
];
