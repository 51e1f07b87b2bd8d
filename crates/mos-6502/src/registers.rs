//! 6502 CPU registers.

/// Stack pointer value after reset.
pub const RESET_SP: u8 = 0xFD;

/// 6502 CPU register set.
///
/// - A: 8-bit accumulator
/// - X, Y: 8-bit index registers
/// - SP: 8-bit stack pointer (stack is at $0100-$01FF)
/// - PC: 16-bit program counter
///
/// Status flags live in [`Flags`](crate::Flags).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Registers {
    /// Accumulator.
    pub a: u8,
    /// X index register.
    pub x: u8,
    /// Y index register.
    pub y: u8,
    /// Stack pointer.
    pub sp: u8,
    /// Program counter.
    pub pc: u16,
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl Registers {
    /// Create registers in power-up state with PC at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self::at(0)
    }

    /// Create registers in power-up state with PC at `origin`.
    #[must_use]
    pub const fn at(origin: u16) -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: RESET_SP,
            pc: origin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_up_state() {
        let regs = Registers::at(0x0600);
        assert_eq!(regs.a, 0);
        assert_eq!(regs.x, 0);
        assert_eq!(regs.y, 0);
        assert_eq!(regs.sp, 0xFD);
        assert_eq!(regs.pc, 0x0600);
        assert_eq!(Registers::default(), Registers::at(0));
    }
}
