//! Load and save settings against block storage

use tripad_hal::BlockStorage;

use super::record::{SettingsRecord, RECORD_LEN};
use super::SettingsError;
use crate::keymap::Keymap;
use crate::runtime::RuntimeContext;

/// Largest erase block the store can rewrite
pub const MAX_BLOCK_SIZE: usize = 4096;

/// Phase reported while a save is in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SaveProgress {
    Erasing,
    Writing,
}

/// Settings persistence over one erase block
///
/// Saving rewrites the whole block, so the store keeps a block-sized
/// scratch buffer to carry the bytes after the record across the erase.
pub struct SettingsStore<S: BlockStorage> {
    storage: S,
    scratch: [u8; MAX_BLOCK_SIZE],
}

impl<S: BlockStorage> SettingsStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            scratch: [0; MAX_BLOCK_SIZE],
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn block_len(&self) -> Result<usize, SettingsError> {
        let len = self.storage.block_size();
        if !(RECORD_LEN..=MAX_BLOCK_SIZE).contains(&len) {
            return Err(SettingsError::BlockSize);
        }
        Ok(len)
    }

    /// Read the stored record without applying it
    pub fn read(&mut self) -> Result<SettingsRecord, SettingsError> {
        let len = self.block_len()?;
        self.storage.read_block(&mut self.scratch[..len])?;
        SettingsRecord::decode(&self.scratch[..len])
    }

    /// Load the stored record into `ctx`
    ///
    /// On any error `ctx` is left untouched. A valid record is sanitized
    /// against `keymap` before it is applied.
    pub fn load(
        &mut self,
        ctx: &mut RuntimeContext,
        keymap: &Keymap,
    ) -> Result<SettingsRecord, SettingsError> {
        let record = self.read()?;
        let mut loaded = *ctx;
        record.apply(&mut loaded);
        loaded.sanitize(keymap);
        *ctx = loaded;
        Ok(record)
    }

    /// Persist `ctx`
    ///
    /// Reads the current block, overlays the record, erases and programs
    /// the whole block. `progress` is called before the erase and before
    /// the program step.
    pub fn save(
        &mut self,
        ctx: &RuntimeContext,
        mut progress: impl FnMut(SaveProgress),
    ) -> Result<(), SettingsError> {
        let len = self.block_len()?;
        let block = &mut self.scratch[..len];

        self.storage.read_block(block)?;
        SettingsRecord::from_runtime(ctx).encode(block)?;

        progress(SaveProgress::Erasing);
        self.storage.erase_block()?;

        progress(SaveProgress::Writing);
        self.storage.program_block(block)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::RepeatTiming;
    use crate::settings::SETTINGS_MAGIC;
    use crate::testing::MemoryStorage;
    use proptest::prelude::*;
    use tripad_hal::FlashError;

    #[test]
    fn test_load_from_erased_flash_fails_and_keeps_state() {
        let mut store = SettingsStore::new(MemoryStorage::new(256));
        let mut ctx = RuntimeContext {
            profile_index: 1,
            layer_index: 2,
            timing: RepeatTiming::new(700, 80),
        };
        let before = ctx;

        assert_eq!(
            store.load(&mut ctx, &Keymap::builtin()),
            Err(SettingsError::BadMagic)
        );
        assert_eq!(ctx, before);
    }

    #[test]
    fn test_save_preserves_trailing_bytes() {
        let mut storage = MemoryStorage::new(64);
        storage.data_mut()[RECORD_LEN..].fill(0xA5);
        let mut store = SettingsStore::new(storage);

        let mut phases = std::vec::Vec::new();
        store
            .save(&RuntimeContext::default(), |p| phases.push(p))
            .unwrap();

        assert_eq!(phases, [SaveProgress::Erasing, SaveProgress::Writing]);
        let data = store.storage().data();
        assert_eq!(&data[..4], &SETTINGS_MAGIC);
        assert!(data[RECORD_LEN..].iter().all(|&b| b == 0xA5));
        assert_eq!(store.storage().erase_count(), 1);
    }

    #[test]
    fn test_load_sanitizes_out_of_range_values() {
        let mut store = SettingsStore::new(MemoryStorage::new(64));
        let wild = RuntimeContext {
            profile_index: 9,
            layer_index: 200,
            timing: RepeatTiming::new(10, 5000),
        };
        store.save(&wild, |_| {}).unwrap();

        let mut ctx = RuntimeContext::default();
        store.load(&mut ctx, &Keymap::builtin()).unwrap();
        assert_eq!(ctx.profile_index, 0);
        assert_eq!(ctx.layer_index, 0);
        assert_eq!(ctx.timing, RepeatTiming::new(100, 1000));
    }

    #[test]
    fn test_flash_errors_propagate() {
        let mut storage = MemoryStorage::new(64);
        storage.fail_erase(true);
        let mut store = SettingsStore::new(storage);

        assert_eq!(
            store.save(&RuntimeContext::default(), |_| {}),
            Err(SettingsError::Flash(FlashError::Erase))
        );
    }

    #[test]
    fn test_oversized_block_rejected() {
        let mut store = SettingsStore::new(MemoryStorage::new(MAX_BLOCK_SIZE + 1));
        assert_eq!(store.read(), Err(SettingsError::BlockSize));
    }

    proptest! {
        #[test]
        fn prop_save_then_load_round_trips(
            profile in 0u8..2,
            layer in 0u8..3,
            start in 1u16..=20,
            cont in 5u16..=100,
        ) {
            let keymap = Keymap::builtin();
            let saved = RuntimeContext {
                profile_index: profile,
                layer_index: layer,
                timing: RepeatTiming::new(start * 100, cont * 10),
            };

            let mut store = SettingsStore::new(MemoryStorage::new(MAX_BLOCK_SIZE));
            store.save(&saved, |_| {}).unwrap();

            let mut loaded = RuntimeContext::default();
            store.load(&mut loaded, &keymap).unwrap();
            prop_assert_eq!(loaded, saved);
        }
    }
}
