//! 6502 processor status flags.
//!
//! Each flag is an independent boolean. The packed status byte (P) is only a
//! derived view, laid out as:
//! - Bit 0: C (Carry)
//! - Bit 1: Z (Zero)
//! - Bit 2: I (Interrupt disable)
//! - Bit 3: D (Decimal mode)
//! - Bit 4: B (Break)
//! - Bit 5: - (Always 1)
//! - Bit 6: V (Overflow)
//! - Bit 7: N (Negative)

/// Carry flag - set if operation resulted in carry/borrow.
pub const C: u8 = 0x01;

/// Zero flag - set if result is zero.
pub const Z: u8 = 0x02;

/// Interrupt disable.
pub const I: u8 = 0x04;

/// Decimal mode.
pub const D: u8 = 0x08;

/// Break flag.
pub const B: u8 = 0x10;

/// Unused bit - always reads as 1.
pub const U: u8 = 0x20;

/// Overflow flag - set if signed arithmetic overflowed.
pub const V: u8 = 0x40;

/// Negative flag - set if result has bit 7 set.
pub const N: u8 = 0x80;

/// Processor status flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Flags {
    /// Negative.
    pub n: bool,
    /// Overflow.
    pub v: bool,
    /// Break.
    pub b: bool,
    /// Decimal mode.
    pub d: bool,
    /// Interrupt disable.
    pub i: bool,
    /// Zero.
    pub z: bool,
    /// Carry.
    pub c: bool,
}

impl Flags {
    /// All flags clear.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            n: false,
            v: false,
            b: false,
            d: false,
            i: false,
            z: false,
            c: false,
        }
    }

    /// Unpack a status byte. Bit 5 is ignored.
    #[must_use]
    pub const fn from_byte(value: u8) -> Self {
        Self {
            n: value & N != 0,
            v: value & V != 0,
            b: value & B != 0,
            d: value & D != 0,
            i: value & I != 0,
            z: value & Z != 0,
            c: value & C != 0,
        }
    }

    /// Packed status byte with the unused bit set.
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        let mut p = U;
        if self.n {
            p |= N;
        }
        if self.v {
            p |= V;
        }
        if self.b {
            p |= B;
        }
        if self.d {
            p |= D;
        }
        if self.i {
            p |= I;
        }
        if self.z {
            p |= Z;
        }
        if self.c {
            p |= C;
        }
        p
    }

    /// Update N and Z flags based on a value.
    pub fn update_nz(&mut self, value: u8) {
        self.n = value & 0x80 != 0;
        self.z = value == 0;
    }
}

impl std::fmt::Display for Flags {
    /// Renders as `NV-BDIZC`, upper case when set.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bits = [
            (self.n, 'N'),
            (self.v, 'V'),
            (true, '-'),
            (self.b, 'B'),
            (self.d, 'D'),
            (self.i, 'I'),
            (self.z, 'Z'),
            (self.c, 'C'),
        ];
        for (set, ch) in bits {
            let ch = if set { ch } else { ch.to_ascii_lowercase() };
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_view_sets_unused_bit() {
        assert_eq!(Flags::new().to_byte(), 0x20);
        let flags = Flags {
            n: true,
            c: true,
            ..Flags::new()
        };
        assert_eq!(flags.to_byte(), 0xA1);
    }

    #[test]
    fn byte_round_trip_ignores_unused_bit() {
        for p in 0..=255u8 {
            assert_eq!(Flags::from_byte(p).to_byte(), p | U);
        }
    }

    #[test]
    fn update_nz() {
        let mut flags = Flags::new();
        flags.update_nz(0);
        assert!(flags.z && !flags.n);
        flags.update_nz(0x80);
        assert!(!flags.z && flags.n);
        flags.update_nz(0x7F);
        assert!(!flags.z && !flags.n);
    }

    #[test]
    fn display() {
        let flags = Flags {
            z: true,
            c: true,
            ..Flags::new()
        };
        assert_eq!(flags.to_string(), "nv-bdiZC");
    }
}
