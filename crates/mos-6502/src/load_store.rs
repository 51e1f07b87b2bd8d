//! Load and store instructions.

use crate::addressing::Operand;
use crate::opcodes::Outcome;
use crate::{CpuError, Processor};

/// LDA - Load Accumulator. A,Z,N = M
pub(crate) fn lda(cpu: &mut Processor, operand: Operand) -> Result<Outcome, CpuError> {
    cpu.regs.a = operand.value(cpu)?;
    cpu.flags.update_nz(cpu.regs.a);
    Ok(Outcome::NEXT)
}

/// STA - Store Accumulator. M = A
pub(crate) fn sta(cpu: &mut Processor, operand: Operand) -> Result<Outcome, CpuError> {
    cpu.write(u32::from(operand.address()), cpu.regs.a)?;
    Ok(Outcome::NEXT)
}
