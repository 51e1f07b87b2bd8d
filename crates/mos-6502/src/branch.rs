//! Conditional branches.
//!
//! A branch costs its base cycles when not taken, one more when taken, and
//! one more again when the target lies in a different page from the
//! address of the next instruction.

use crate::addressing::{Operand, page_crossed};
use crate::opcodes::Outcome;
use crate::{CpuError, Processor};

/// BCC - Branch if Carry Clear.
pub(crate) fn bcc(cpu: &mut Processor, operand: Operand) -> Result<Outcome, CpuError> {
    Ok(branch_if(cpu, operand, !cpu.flags.c))
}

/// BCS - Branch if Carry Set.
pub(crate) fn bcs(cpu: &mut Processor, operand: Operand) -> Result<Outcome, CpuError> {
    Ok(branch_if(cpu, operand, cpu.flags.c))
}

/// Take a relative branch if `condition` holds. PC wraps within 16 bits.
fn branch_if(cpu: &mut Processor, operand: Operand, condition: bool) -> Outcome {
    let Operand::Offset(offset) = operand else {
        unreachable!("branch handler given {operand:?}")
    };
    if !condition {
        return Outcome::NEXT;
    }

    let target = cpu.regs.pc.wrapping_add(offset as u16);
    let penalty = if page_crossed(cpu.regs.pc, target) { 2 } else { 1 };
    cpu.regs.pc = target;
    Outcome::Continue { penalty }
}
