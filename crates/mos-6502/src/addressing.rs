//! 6502 addressing modes.
//!
//! Every opcode implies exactly one mode:
//! - Implied: No operand (e.g., NOP, CLC)
//! - Immediate: #$nn (literal value)
//! - Zero Page: $nn (8-bit address in page zero)
//! - Relative: Branch offset (-128 to +127)

use std::fmt;

use crate::{CpuError, MemoryError, Processor};

/// How an instruction locates its operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    Implied,
    Immediate,
    ZeroPage,
    Relative,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    #[must_use]
    pub const fn operand_len(self) -> u16 {
        match self {
            AddressingMode::Implied => 0,
            AddressingMode::Immediate | AddressingMode::ZeroPage | AddressingMode::Relative => 1,
        }
    }
}

impl fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AddressingMode::Implied => "implied",
            AddressingMode::Immediate => "immediate",
            AddressingMode::ZeroPage => "zero page",
            AddressingMode::Relative => "relative",
        };
        f.write_str(name)
    }
}

/// A resolved operand, handed to the instruction handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    None,
    /// Literal value (immediate mode).
    Value(u8),
    /// Effective address (zero page).
    Address(u16),
    /// Signed branch displacement.
    Offset(i8),
}

impl Operand {
    /// The byte this operand refers to: the literal itself, or the memory
    /// cell at its address.
    ///
    /// Only valid for value-reading modes; the dispatch table guarantees
    /// handlers that call this are registered with one.
    pub fn value(self, cpu: &Processor) -> Result<u8, CpuError> {
        match self {
            Operand::Value(v) => Ok(v),
            Operand::Address(addr) => Ok(cpu.read(u32::from(addr))?),
            Operand::None | Operand::Offset(_) => {
                unreachable!("{self:?} does not name a value")
            }
        }
    }

    /// The effective address for store and read-modify-write handlers.
    #[must_use]
    pub fn address(self) -> u16 {
        match self {
            Operand::Address(addr) => addr,
            Operand::None | Operand::Value(_) | Operand::Offset(_) => {
                unreachable!("{self:?} does not name an address")
            }
        }
    }
}

/// True when `a` and `b` lie in different 256-byte pages.
#[must_use]
pub const fn page_crossed(a: u16, b: u16) -> bool {
    (a & 0xFF00) != (b & 0xFF00)
}

impl Processor {
    /// Consume the operand bytes for `mode` and resolve them.
    pub(crate) fn resolve_operand(&mut self, mode: AddressingMode) -> Result<Operand, MemoryError> {
        Ok(match mode {
            AddressingMode::Implied => Operand::None,
            AddressingMode::Immediate => Operand::Value(self.fetch_next()?),
            // Zero Page: $nn
            AddressingMode::ZeroPage => Operand::Address(u16::from(self.fetch_next()?)),
            AddressingMode::Relative => Operand::Offset(self.fetch_next()? as i8),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_each_mode() {
        let mut cpu = Processor::new();
        cpu.load(&[0x42, 0x10, 0xF6], 0).unwrap();
        cpu.write(0x10, 0x99).unwrap();

        assert_eq!(cpu.resolve_operand(AddressingMode::Implied), Ok(Operand::None));
        assert_eq!(cpu.regs.pc, 0);

        let imm = cpu.resolve_operand(AddressingMode::Immediate).unwrap();
        assert_eq!(imm, Operand::Value(0x42));
        assert_eq!(imm.value(&cpu), Ok(0x42));

        let zp = cpu.resolve_operand(AddressingMode::ZeroPage).unwrap();
        assert_eq!(zp, Operand::Address(0x0010));
        assert_eq!(zp.value(&cpu), Ok(0x99));
        assert_eq!(zp.address(), 0x0010);

        assert_eq!(
            cpu.resolve_operand(AddressingMode::Relative),
            Ok(Operand::Offset(-10))
        );
        assert_eq!(cpu.regs.pc, 3);
    }

    #[test]
    fn page_crossing() {
        assert!(!page_crossed(0x0002, 0x00FF));
        assert!(page_crossed(0x00FF, 0x0100));
        assert!(page_crossed(0x0002, 0xFF82));
    }

    #[test]
    fn operand_lengths() {
        assert_eq!(AddressingMode::Implied.operand_len(), 0);
        assert_eq!(AddressingMode::Relative.operand_len(), 1);
    }
}
