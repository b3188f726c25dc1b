//! Persisted settings
//!
//! The live [`RuntimeContext`](crate::runtime::RuntimeContext) is saved as
//! a fixed 10-byte record at the start of one flash erase block.

mod record;
mod store;

pub use record::{SettingsRecord, RECORD_LEN, SETTINGS_MAGIC};
pub use store::{SaveProgress, SettingsStore, MAX_BLOCK_SIZE};

use tripad_hal::FlashError;

/// Errors from loading or saving settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsError {
    /// Storage driver failed
    Flash(FlashError),
    /// Block does not start with the settings magic
    BadMagic,
    /// Block is smaller than a record or larger than the scratch buffer
    BlockSize,
}

impl From<FlashError> for SettingsError {
    fn from(e: FlashError) -> Self {
        SettingsError::Flash(e)
    }
}
