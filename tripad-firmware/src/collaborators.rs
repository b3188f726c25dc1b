//! Controller collaborators backed by the inter-task channels
//!
//! Each one only stages data and hands it off on `flush`, so a tick never
//! waits on I2C, PIO or USB.

use heapless::String;

use tripad_core::hid::KeyStroke;
use tripad_core::traits::{DisplayError, HidError, HidTransport, Indicator, Rgb, StatusDisplay};

use crate::channels::{Frame, FRAME, HID_STROKES, LED_COLOR, LINE_LEN};

/// Display that publishes whole frames to the display task
#[derive(Default)]
pub struct ChannelDisplay {
    pending: Frame,
    shown: Option<Frame>,
}

fn line(text: &str) -> Result<String<LINE_LEN>, DisplayError> {
    let mut out = String::new();
    out.push_str(text).map_err(|_| DisplayError::Overflow)?;
    Ok(out)
}

impl StatusDisplay for ChannelDisplay {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.pending = Frame::default();
        Ok(())
    }

    fn draw_lines(&mut self, line1: &str, line2: &str) -> Result<(), DisplayError> {
        self.pending.lines = Some([line(line1)?, line(line2)?]);
        Ok(())
    }

    fn draw_progress(&mut self, width: u8) -> Result<(), DisplayError> {
        self.pending.progress = Some(width);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        // Unchanged frames are not redrawn
        if self.shown.as_ref() != Some(&self.pending) {
            FRAME.signal(self.pending.clone());
            self.shown = Some(self.pending.clone());
        }
        Ok(())
    }
}

/// Indicator that publishes colour changes to the LED task
#[derive(Default)]
pub struct SignalIndicator {
    pending: Rgb,
    shown: Option<Rgb>,
}

impl Indicator for SignalIndicator {
    fn clear(&mut self) {
        self.pending = Rgb::OFF;
    }

    fn set_color(&mut self, color: Rgb) {
        self.pending = color;
    }

    fn flush(&mut self) {
        if self.shown != Some(self.pending) {
            LED_COLOR.signal(self.pending);
            self.shown = Some(self.pending);
        }
    }
}

/// HID transport that queues strokes for the USB task
#[derive(Default)]
pub struct ChannelHid;

impl HidTransport for ChannelHid {
    fn send_stroke(&mut self, stroke: KeyStroke) -> Result<(), HidError> {
        HID_STROKES
            .try_send(stroke)
            .map_err(|_| HidError::QueueFull)
    }

    fn free_capacity(&self) -> usize {
        HID_STROKES.free_capacity()
    }
}
