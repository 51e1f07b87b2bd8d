//! The opcode dispatch table.
//!
//! Each implemented opcode maps to its mnemonic, addressing mode, base cycle
//! cost and handler. Adding an instruction means adding a row to
//! [`INSTRUCTIONS`]; the engine loop never changes.

use std::fmt;

use crate::addressing::AddressingMode::{Immediate, Implied, Relative, ZeroPage};
use crate::addressing::{AddressingMode, Operand};
use crate::{CpuError, Processor, alu, branch, load_store, system};

/// What the engine should do after a handler returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Keep running, charging `penalty` cycles on top of the base cost.
    Continue { penalty: u32 },
    /// Stop the engine (BRK).
    Halt,
}

impl Outcome {
    /// Continue with no extra cycles.
    pub const NEXT: Self = Outcome::Continue { penalty: 0 };
}

/// An instruction handler: applies one opcode's effect to the processor.
pub type Handler = fn(&mut Processor, Operand) -> Result<Outcome, CpuError>;

/// One row of the dispatch table.
#[derive(Clone, Copy)]
pub struct Instruction {
    pub opcode: u8,
    pub mnemonic: &'static str,
    pub mode: AddressingMode,
    /// Base cost, including operand fetch and memory access.
    pub cycles: u32,
    pub handler: Handler,
}

impl Instruction {
    /// Opcode plus operand bytes.
    #[must_use]
    pub const fn size(&self) -> u16 {
        1 + self.mode.operand_len()
    }
}

impl fmt::Debug for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instruction")
            .field("opcode", &format_args!("${:02X}", self.opcode))
            .field("mnemonic", &self.mnemonic)
            .field("mode", &self.mode)
            .field("cycles", &self.cycles)
            .finish_non_exhaustive()
    }
}

const fn op(
    opcode: u8,
    mnemonic: &'static str,
    mode: AddressingMode,
    cycles: u32,
    handler: Handler,
) -> Instruction {
    Instruction {
        opcode,
        mnemonic,
        mode,
        cycles,
        handler,
    }
}

/// Every implemented instruction.
pub const INSTRUCTIONS: &[Instruction] = &[
    // System
    op(0x00, "BRK", Implied, 7, system::brk),
    op(0xEA, "NOP", Implied, 2, system::nop),
    op(0x18, "CLC", Implied, 2, system::clc),
    op(0x38, "SEC", Implied, 2, system::sec),
    // Load/store
    op(0xA9, "LDA", Immediate, 2, load_store::lda),
    op(0xA5, "LDA", ZeroPage, 3, load_store::lda),
    op(0x85, "STA", ZeroPage, 3, load_store::sta),
    // Arithmetic
    op(0x69, "ADC", Immediate, 2, alu::adc),
    op(0x65, "ADC", ZeroPage, 3, alu::adc),
    op(0xC9, "CMP", Immediate, 2, alu::cmp),
    op(0xC5, "CMP", ZeroPage, 3, alu::cmp),
    op(0xE6, "INC", ZeroPage, 5, alu::inc),
    // Branches
    op(0x90, "BCC", Relative, 2, branch::bcc),
    op(0xB0, "BCS", Relative, 2, branch::bcs),
];

static TABLE: [Option<Instruction>; 256] = build_table();

const fn build_table() -> [Option<Instruction>; 256] {
    let mut table: [Option<Instruction>; 256] = [None; 256];
    let mut i = 0;
    while i < INSTRUCTIONS.len() {
        let instruction = INSTRUCTIONS[i];
        assert!(
            table[instruction.opcode as usize].is_none(),
            "duplicate opcode in dispatch table"
        );
        table[instruction.opcode as usize] = Some(instruction);
        i += 1;
    }
    table
}

/// Decode an opcode byte.
#[must_use]
pub fn lookup(opcode: u8) -> Option<&'static Instruction> {
    TABLE[opcode as usize].as_ref()
}

/// Find the opcode for a mnemonic in a given mode (case-insensitive).
#[must_use]
pub fn find(mnemonic: &str, mode: AddressingMode) -> Option<&'static Instruction> {
    INSTRUCTIONS
        .iter()
        .find(|i| i.mode == mode && i.mnemonic.eq_ignore_ascii_case(mnemonic))
}

/// All addressing modes a mnemonic supports.
pub fn modes(mnemonic: &str) -> impl Iterator<Item = AddressingMode> + '_ {
    INSTRUCTIONS
        .iter()
        .filter(move |i| i.mnemonic.eq_ignore_ascii_case(mnemonic))
        .map(|i| i.mode)
}
