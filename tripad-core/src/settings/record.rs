//! Settings record layout
//!
//! ```text
//! offset  size  field
//!      0     4  magic "MPAD"
//!      4     1  layer index
//!      5     1  profile index
//!      6     2  repeat start ms (little endian)
//!      8     2  repeat continue ms (little endian)
//! ```

use super::SettingsError;
use crate::input::RepeatTiming;
use crate::runtime::RuntimeContext;

/// Marks a block holding a valid record
pub const SETTINGS_MAGIC: [u8; 4] = *b"MPAD";

/// Encoded record size in bytes
pub const RECORD_LEN: usize = 10;

/// Decoded settings record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SettingsRecord {
    pub layer_index: u8,
    pub profile_index: u8,
    pub repeat_start_ms: u16,
    pub repeat_continue_ms: u16,
}

impl SettingsRecord {
    pub fn from_runtime(ctx: &RuntimeContext) -> Self {
        Self {
            layer_index: ctx.layer_index,
            profile_index: ctx.profile_index,
            repeat_start_ms: ctx.timing.start_ms,
            repeat_continue_ms: ctx.timing.continue_ms,
        }
    }

    /// Copy every field into `ctx`
    pub fn apply(&self, ctx: &mut RuntimeContext) {
        ctx.layer_index = self.layer_index;
        ctx.profile_index = self.profile_index;
        ctx.timing = RepeatTiming::new(self.repeat_start_ms, self.repeat_continue_ms);
    }

    /// Write the record, magic included, into the first `RECORD_LEN` bytes
    pub fn encode(&self, buf: &mut [u8]) -> Result<(), SettingsError> {
        let buf = buf
            .get_mut(..RECORD_LEN)
            .ok_or(SettingsError::BlockSize)?;
        buf[0..4].copy_from_slice(&SETTINGS_MAGIC);
        buf[4] = self.layer_index;
        buf[5] = self.profile_index;
        buf[6..8].copy_from_slice(&self.repeat_start_ms.to_le_bytes());
        buf[8..10].copy_from_slice(&self.repeat_continue_ms.to_le_bytes());
        Ok(())
    }

    /// Read a record, checking length and magic first
    pub fn decode(buf: &[u8]) -> Result<Self, SettingsError> {
        let buf = buf.get(..RECORD_LEN).ok_or(SettingsError::BlockSize)?;
        if buf[0..4] != SETTINGS_MAGIC {
            return Err(SettingsError::BadMagic);
        }
        Ok(Self {
            layer_index: buf[4],
            profile_index: buf[5],
            repeat_start_ms: u16::from_le_bytes([buf[6], buf[7]]),
            repeat_continue_ms: u16::from_le_bytes([buf[8], buf[9]]),
        })
    }
}
