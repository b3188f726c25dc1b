//! Flash storage abstractions
//!
//! The settings record lives in a single erase block at a fixed offset.
//! The core only ever reads the whole block, or erases it and programs a
//! whole new image, so that is all this trait exposes.

/// Errors from flash storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// Flash read failed
    Read,
    /// Flash erase failed
    Erase,
    /// Flash program failed
    Program,
    /// Buffer does not match the block size
    BufferTooSmall,
    /// Offset outside the flash device or not block aligned
    OutOfBounds,
}

/// Whole-block persistent storage
///
/// Implementations are bound to one erase block at a fixed logical offset.
/// All operations are synchronous; callers accept that they block for the
/// duration of the underlying flash operation.
pub trait BlockStorage {
    /// Size of the block in bytes
    fn block_size(&self) -> usize;

    /// Read the whole block into `buffer`
    ///
    /// `buffer` must be at least [`block_size`](Self::block_size) bytes;
    /// only the first `block_size` bytes are written.
    fn read_block(&mut self, buffer: &mut [u8]) -> Result<(), FlashError>;

    /// Erase the block (all bytes become `0xFF`)
    fn erase_block(&mut self) -> Result<(), FlashError>;

    /// Program a full block image
    ///
    /// `data` must be exactly [`block_size`](Self::block_size) bytes and the
    /// block must have been erased first.
    fn program_block(&mut self, data: &[u8]) -> Result<(), FlashError>;
}

impl<T: BlockStorage + ?Sized> BlockStorage for &mut T {
    fn block_size(&self) -> usize {
        (**self).block_size()
    }

    fn read_block(&mut self, buffer: &mut [u8]) -> Result<(), FlashError> {
        (**self).read_block(buffer)
    }

    fn erase_block(&mut self) -> Result<(), FlashError> {
        (**self).erase_block()
    }

    fn program_block(&mut self, data: &[u8]) -> Result<(), FlashError> {
        (**self).program_block(data)
    }
}
