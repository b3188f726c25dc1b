//! Mock collaborators shared by the unit tests

use core::cell::{Cell, RefCell};
use std::rc::Rc;
use std::string::String;
use std::vec::Vec;

use tripad_hal::{BlockStorage, FlashError, InputPin};

use crate::hid::KeyStroke;
use crate::traits::{DisplayError, HidError, HidTransport, Indicator, Rgb, StatusDisplay};

/// Active-low pin driven from the test
#[derive(Debug, Default)]
pub struct TestPin {
    held: Cell<bool>,
}

impl TestPin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_held(&self, held: bool) {
        self.held.set(held);
    }
}

impl InputPin for TestPin {
    fn is_high(&self) -> bool {
        !self.held.get()
    }
}

/// Pin whose level is shared with the test through an `Rc`
#[derive(Debug, Clone, Default)]
pub struct SharedPin {
    held: Rc<Cell<bool>>,
}

impl SharedPin {
    pub fn set_held(&self, held: bool) {
        self.held.set(held);
    }
}

impl InputPin for SharedPin {
    fn is_high(&self) -> bool {
        !self.held.get()
    }
}

/// In-memory NOR-style block: erase sets `0xFF`, program can only clear bits
#[derive(Debug)]
pub struct MemoryStorage {
    data: Vec<u8>,
    erase_count: usize,
    fail_erase: bool,
}

impl MemoryStorage {
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0xFF; size],
            erase_count: 0,
            fail_erase: false,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn erase_count(&self) -> usize {
        self.erase_count
    }

    pub fn fail_erase(&mut self, fail: bool) {
        self.fail_erase = fail;
    }
}

impl BlockStorage for MemoryStorage {
    fn block_size(&self) -> usize {
        self.data.len()
    }

    fn read_block(&mut self, buffer: &mut [u8]) -> Result<(), FlashError> {
        let len = self.data.len();
        let out = buffer.get_mut(..len).ok_or(FlashError::BufferTooSmall)?;
        out.copy_from_slice(&self.data);
        Ok(())
    }

    fn erase_block(&mut self) -> Result<(), FlashError> {
        if self.fail_erase {
            return Err(FlashError::Erase);
        }
        self.data.fill(0xFF);
        self.erase_count += 1;
        Ok(())
    }

    fn program_block(&mut self, data: &[u8]) -> Result<(), FlashError> {
        if data.len() != self.data.len() {
            return Err(FlashError::BufferTooSmall);
        }
        for (cell, byte) in self.data.iter_mut().zip(data) {
            *cell &= *byte;
        }
        Ok(())
    }
}

/// One rendered display frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub lines: Option<(String, String)>,
    pub progress: Option<u8>,
}

impl Frame {
    pub fn is_blank(&self) -> bool {
        self.lines.is_none() && self.progress.is_none()
    }

    pub fn line1(&self) -> &str {
        self.lines.as_ref().map(|l| l.0.as_str()).unwrap_or("")
    }

    pub fn line2(&self) -> &str {
        self.lines.as_ref().map(|l| l.1.as_str()).unwrap_or("")
    }
}

#[derive(Debug, Default)]
struct DisplayLog {
    pending: Frame,
    frames: Vec<Frame>,
    reject_line1: Option<String>,
}

/// Display that records every flushed frame
#[derive(Debug, Clone, Default)]
pub struct RecordingDisplay {
    log: Rc<RefCell<DisplayLog>>,
}

impl RecordingDisplay {
    pub fn last(&self) -> Frame {
        self.log.borrow().frames.last().cloned().unwrap_or_default()
    }

    pub fn frames(&self) -> Vec<Frame> {
        self.log.borrow().frames.clone()
    }

    pub fn clear_frames(&self) {
        self.log.borrow_mut().frames.clear();
    }

    /// Fail every draw whose first line is `line1`
    pub fn reject_line1(&self, line1: &str) {
        self.log.borrow_mut().reject_line1 = Some(line1.into());
    }
}

impl StatusDisplay for RecordingDisplay {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.log.borrow_mut().pending = Frame::default();
        Ok(())
    }

    fn draw_lines(&mut self, line1: &str, line2: &str) -> Result<(), DisplayError> {
        if self.log.borrow().reject_line1.as_deref() == Some(line1) {
            return Err(DisplayError::Overflow);
        }
        self.log.borrow_mut().pending.lines = Some((line1.into(), line2.into()));
        Ok(())
    }

    fn draw_progress(&mut self, width: u8) -> Result<(), DisplayError> {
        self.log.borrow_mut().pending.progress = Some(width);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        let mut log = self.log.borrow_mut();
        let frame = log.pending.clone();
        log.frames.push(frame);
        Ok(())
    }
}

#[derive(Debug, Default)]
struct IndicatorLog {
    pending: Option<Rgb>,
    shown: Option<Rgb>,
}

/// Indicator that remembers the last latched colour
#[derive(Debug, Clone, Default)]
pub struct RecordingIndicator {
    log: Rc<RefCell<IndicatorLog>>,
}

impl RecordingIndicator {
    /// Colour on the LED, `None` when dark
    pub fn shown(&self) -> Option<Rgb> {
        self.log.borrow().shown
    }
}

impl Indicator for RecordingIndicator {
    fn clear(&mut self) {
        self.log.borrow_mut().pending = None;
    }

    fn set_color(&mut self, color: Rgb) {
        self.log.borrow_mut().pending = Some(color);
    }

    fn flush(&mut self) {
        let mut log = self.log.borrow_mut();
        log.shown = log.pending;
    }
}

/// HID transport that records strokes
#[derive(Debug, Clone, Default)]
pub struct RecordingHid {
    strokes: Rc<RefCell<Vec<KeyStroke>>>,
}

impl RecordingHid {
    pub fn strokes(&self) -> Vec<KeyStroke> {
        self.strokes.borrow().clone()
    }

    pub fn take(&self) -> Vec<KeyStroke> {
        core::mem::take(&mut *self.strokes.borrow_mut())
    }
}

impl HidTransport for RecordingHid {
    fn send_stroke(&mut self, stroke: KeyStroke) -> Result<(), HidError> {
        self.strokes.borrow_mut().push(stroke);
        Ok(())
    }
}
