//! Error types raised by memory access and instruction execution.

use thiserror::Error;

/// A fault on the data bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MemoryError {
    /// The address lies outside the 64 KiB address space.
    #[error("address ${address:X} is outside the 64 KiB address space")]
    OutOfBounds { address: u32 },
}

/// A fault that stops instruction execution.
///
/// Both kinds are fatal to the current run. The engine never retries or
/// skips past them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CpuError {
    /// The opcode at `pc` has no entry in the dispatch table.
    #[error("unimplemented opcode ${opcode:02X} at ${pc:04X}")]
    UnimplementedOpcode { opcode: u8, pc: u16 },

    #[error(transparent)]
    Memory(#[from] MemoryError),
}
