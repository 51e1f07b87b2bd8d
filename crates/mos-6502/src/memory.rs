//! Flat 64 KiB memory.

use crate::MemoryError;

/// Number of addressable cells.
pub const MEMORY_SIZE: usize = 0x1_0000;

/// Flat byte-addressable memory covering the whole 16-bit address space.
///
/// The backing storage is allocated once and never resized; [`clear`]
/// zero-fills it in place.
///
/// [`clear`]: Memory::clear
#[derive(Clone)]
pub struct Memory {
    cells: Box<[u8]>,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let used = self.cells.iter().filter(|&&b| b != 0).count();
        f.debug_struct("Memory")
            .field("size", &self.cells.len())
            .field("non_zero", &used)
            .finish()
    }
}

impl Memory {
    /// Allocate zero-filled memory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: vec![0; MEMORY_SIZE].into_boxed_slice(),
        }
    }

    /// Read the byte at `address`.
    pub fn read(&self, address: u32) -> Result<u8, MemoryError> {
        self.cells
            .get(address as usize)
            .copied()
            .ok_or(MemoryError::OutOfBounds { address })
    }

    /// Store `value` at `address`.
    pub fn write(&mut self, address: u32, value: u8) -> Result<(), MemoryError> {
        let cell = self
            .cells
            .get_mut(address as usize)
            .ok_or(MemoryError::OutOfBounds { address })?;
        *cell = value;
        Ok(())
    }

    /// Copy `data` into memory starting at `start`.
    ///
    /// Nothing is written if any byte would land past the end.
    pub fn load(&mut self, start: u32, data: &[u8]) -> Result<(), MemoryError> {
        let begin = start as usize;
        let end = begin + data.len();
        if end > self.cells.len() {
            // Report the first address that does not exist.
            let address = u32::try_from(self.cells.len().max(begin)).unwrap_or(u32::MAX);
            return Err(MemoryError::OutOfBounds { address });
        }
        self.cells[begin..end].copy_from_slice(data);
        Ok(())
    }

    /// Zero-fill every cell.
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// The whole address space.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }
}
