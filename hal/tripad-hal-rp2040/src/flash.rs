//! Flash storage driver for RP2040
//!
//! The last two 4KB sectors of the 2MB flash are reserved:
//!
//! ```text
//! 0x1F_E000 ┌──────────────────────────┐
//!           │ macro-string override    │  read once at boot
//! 0x1F_F000 ├──────────────────────────┤
//!           │ settings block           │  erased + programmed on Save
//! 0x20_0000 └──────────────────────────┘
//! ```
//!
//! Implements the `BlockStorage` trait from `tripad-hal`.

use embassy_rp::flash::{Blocking, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;

pub use tripad_hal::flash::{BlockStorage, FlashError};

/// Flash size on the XIAO RP2040
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;

/// Flash erase size for RP2040
pub const FLASH_ERASE_SIZE: usize = ERASE_SIZE;

/// Offset of the settings block (last sector)
pub const SETTINGS_OFFSET: u32 = (FLASH_SIZE - FLASH_ERASE_SIZE) as u32;

/// Offset of the macro-string override region (sector before settings)
pub const MACRO_REGION_OFFSET: u32 = (FLASH_SIZE - 2 * FLASH_ERASE_SIZE) as u32;

/// Size of the macro-string override region
pub const MACRO_REGION_SIZE: usize = FLASH_ERASE_SIZE;

/// Raw RP2040 flash access
pub struct Rp2040Flash<'d> {
    flash: Flash<'d, FLASH, Blocking, FLASH_SIZE>,
}

impl<'d> Rp2040Flash<'d> {
    /// Create a new blocking flash instance
    pub fn new(flash: Peri<'d, FLASH>) -> Self {
        Self {
            flash: Flash::new_blocking(flash),
        }
    }

    /// Read an arbitrary region of flash
    pub fn read(&mut self, offset: u32, buffer: &mut [u8]) -> Result<(), FlashError> {
        if offset as usize + buffer.len() > FLASH_SIZE {
            return Err(FlashError::OutOfBounds);
        }
        self.flash
            .blocking_read(offset, buffer)
            .map_err(|_| FlashError::Read)
    }

    /// Bind this flash to a single erase block
    ///
    /// Fails if `offset` is not sector aligned or lies outside the device.
    pub fn into_block(self, offset: u32) -> Result<Rp2040FlashBlock<'d>, FlashError> {
        let offset_usize = offset as usize;
        if offset_usize % FLASH_ERASE_SIZE != 0 || offset_usize + FLASH_ERASE_SIZE > FLASH_SIZE {
            return Err(FlashError::OutOfBounds);
        }
        Ok(Rp2040FlashBlock {
            flash: self.flash,
            offset,
        })
    }
}

/// One flash erase block at a fixed offset
pub struct Rp2040FlashBlock<'d> {
    flash: Flash<'d, FLASH, Blocking, FLASH_SIZE>,
    offset: u32,
}

impl<'d> BlockStorage for Rp2040FlashBlock<'d> {
    fn block_size(&self) -> usize {
        FLASH_ERASE_SIZE
    }

    fn read_block(&mut self, buffer: &mut [u8]) -> Result<(), FlashError> {
        if buffer.len() < FLASH_ERASE_SIZE {
            return Err(FlashError::BufferTooSmall);
        }
        self.flash
            .blocking_read(self.offset, &mut buffer[..FLASH_ERASE_SIZE])
            .map_err(|_| FlashError::Read)
    }

    fn erase_block(&mut self) -> Result<(), FlashError> {
        self.flash
            .blocking_erase(self.offset, self.offset + FLASH_ERASE_SIZE as u32)
            .map_err(|_| FlashError::Erase)
    }

    fn program_block(&mut self, data: &[u8]) -> Result<(), FlashError> {
        if data.len() != FLASH_ERASE_SIZE {
            return Err(FlashError::BufferTooSmall);
        }
        self.flash
            .blocking_write(self.offset, data)
            .map_err(|_| FlashError::Program)
    }
}
