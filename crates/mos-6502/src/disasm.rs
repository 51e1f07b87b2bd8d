//! Disassembler for the implemented instruction set.

use crate::addressing::AddressingMode;
use crate::opcodes;

/// One decoded instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disassembly {
    /// Bytes consumed (1 for unknown opcodes).
    pub len: u16,
    pub text: String,
}

/// Mnemonic for an opcode byte, if implemented.
#[must_use]
pub fn mnemonic(opcode: u8) -> Option<&'static str> {
    opcodes::lookup(opcode).map(|i| i.mnemonic)
}

/// Decode the instruction at `pc`.
///
/// `memory` is indexed by absolute address; bytes past its end read as zero.
/// Branch operands are shown as their absolute target.
#[must_use]
pub fn disassemble_one(memory: &[u8], pc: u16) -> Disassembly {
    let byte = |addr: u16| memory.get(usize::from(addr)).copied().unwrap_or(0);
    let opcode = byte(pc);
    let Some(instruction) = opcodes::lookup(opcode) else {
        return Disassembly {
            len: 1,
            text: format!(".byte ${opcode:02X}"),
        };
    };

    let operand = byte(pc.wrapping_add(1));
    let m = instruction.mnemonic;
    let text = match instruction.mode {
        AddressingMode::Implied => m.to_string(),
        AddressingMode::Immediate => format!("{m} #${operand:02X}"),
        AddressingMode::ZeroPage => format!("{m} ${operand:02X}"),
        AddressingMode::Relative => {
            let next = pc.wrapping_add(instruction.size());
            let target = next.wrapping_add(operand as i8 as u16);
            format!("{m} ${target:04X}")
        }
    };
    Disassembly {
        len: instruction.size(),
        text,
    }
}

/// Disassemble `len` bytes of `memory` starting at `start`, one line per
/// instruction, each prefixed with its address and raw bytes.
#[must_use]
pub fn listing(memory: &[u8], start: u16, len: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut offset = 0usize;
    while offset < len {
        let pc = start.wrapping_add(offset as u16);
        let d = disassemble_one(memory, pc);
        let raw: Vec<String> = (0..d.len)
            .map(|i| {
                let addr = usize::from(pc.wrapping_add(i));
                format!("{:02X}", memory.get(addr).copied().unwrap_or(0))
            })
            .collect();
        lines.push(format!("{pc:04X}  {:<8}{}", raw.join(" "), d.text));
        offset += usize::from(d.len);
    }
    lines
}
