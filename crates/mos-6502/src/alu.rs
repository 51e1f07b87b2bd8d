//! Arithmetic and compare instructions.
//!
//! Binary mode only; the decimal flag does not change ADC.

use crate::addressing::Operand;
use crate::opcodes::Outcome;
use crate::{CpuError, Processor};

/// ADC - Add with Carry. A,Z,C,N,V = A+M+C
pub(crate) fn adc(cpu: &mut Processor, operand: Operand) -> Result<Outcome, CpuError> {
    let value = operand.value(cpu)?;
    let a = cpu.regs.a;
    let result = u16::from(a) + u16::from(value) + u16::from(cpu.flags.c);
    let result8 = result as u8;

    cpu.flags.c = result > 0xFF;
    // Signed overflow: both inputs share a sign the result does not.
    cpu.flags.v = (a ^ result8) & (value ^ result8) & 0x80 != 0;
    cpu.flags.update_nz(result8);
    cpu.regs.a = result8;
    Ok(Outcome::NEXT)
}

/// CMP - Compare accumulator. Z,C,N = A-M
pub(crate) fn cmp(cpu: &mut Processor, operand: Operand) -> Result<Outcome, CpuError> {
    let value = operand.value(cpu)?;
    let a = cpu.regs.a;
    cpu.flags.c = a >= value;
    cpu.flags.update_nz(a.wrapping_sub(value));
    Ok(Outcome::NEXT)
}

/// INC - Increment memory. M,Z,N = M+1
pub(crate) fn inc(cpu: &mut Processor, operand: Operand) -> Result<Outcome, CpuError> {
    let addr = u32::from(operand.address());
    let result = cpu.read(addr)?.wrapping_add(1);
    cpu.write(addr, result)?;
    cpu.flags.update_nz(result);
    Ok(Outcome::NEXT)
}
