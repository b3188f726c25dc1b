//! HID keyboard transport trait

use crate::hid::{text_strokes, KeyCode, KeyStroke, Modifiers};

/// Errors from the HID transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HidError {
    /// Outgoing report queue is full, the stroke was dropped
    QueueFull,
    /// Key code has no usage on the US layout
    Unmapped,
}

/// Keyboard output
///
/// Each stroke is a press immediately followed by a release. The core
/// never waits on the host; a full queue drops strokes.
pub trait HidTransport {
    /// Queue one resolved stroke
    fn send_stroke(&mut self, stroke: KeyStroke) -> Result<(), HidError>;

    /// Strokes that can still be queued without rejection
    fn free_capacity(&self) -> usize {
        usize::MAX
    }

    /// Queue a single key with modifiers
    fn send_key(&mut self, code: KeyCode, modifiers: Modifiers) -> Result<(), HidError> {
        let stroke = KeyStroke::resolve(code, modifiers).ok_or(HidError::Unmapped)?;
        self.send_stroke(stroke)
    }

    /// Queue `text` as a sequence of strokes
    ///
    /// Either the whole string is queued or nothing is.
    fn send_text(&mut self, text: &str) -> Result<(), HidError> {
        if text_strokes(text).count() > self.free_capacity() {
            return Err(HidError::QueueFull);
        }
        for stroke in text_strokes(text) {
            self.send_stroke(stroke)?;
        }
        Ok(())
    }
}
