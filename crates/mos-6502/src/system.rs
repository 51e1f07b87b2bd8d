//! Implied-mode control and flag instructions.

use crate::addressing::Operand;
use crate::opcodes::Outcome;
use crate::{CpuError, Processor};

/// BRK - set the break flag and halt the engine.
pub(crate) fn brk(cpu: &mut Processor, _operand: Operand) -> Result<Outcome, CpuError> {
    cpu.flags.b = true;
    Ok(Outcome::Halt)
}

/// NOP - no effect beyond the PC advance.
pub(crate) fn nop(_cpu: &mut Processor, _operand: Operand) -> Result<Outcome, CpuError> {
    Ok(Outcome::NEXT)
}

/// CLC - Clear Carry.
pub(crate) fn clc(cpu: &mut Processor, _operand: Operand) -> Result<Outcome, CpuError> {
    cpu.flags.c = false;
    Ok(Outcome::NEXT)
}

/// SEC - Set Carry.
pub(crate) fn sec(cpu: &mut Processor, _operand: Operand) -> Result<Outcome, CpuError> {
    cpu.flags.c = true;
    Ok(Outcome::NEXT)
}
