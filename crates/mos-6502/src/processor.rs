//! Processor state: registers, flags, memory and the cycle counter.

use log::debug;
use mos_core::{Observable, Ticks, Value};

use crate::{Flags, Memory, MemoryError, Registers};

/// Whether the processor may execute further instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Running,
    /// BRK was executed. Only [`Processor::reset`] leaves this state.
    Halted,
}

/// The aggregate processor state.
///
/// Owns the register file, status flags, 64 KiB of memory and the cycle
/// counter as one unit. Registers and flags are public for inspection;
/// memory and the cycle counter go through accessors so bounds and
/// monotonicity hold.
#[derive(Debug, Clone)]
pub struct Processor {
    /// CPU registers.
    pub regs: Registers,
    /// Status flags.
    pub flags: Flags,
    memory: Memory,
    cycles: Ticks,
    state: RunState,
}

impl Default for Processor {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor {
    /// Create a processor in power-up state with PC at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            regs: Registers::new(),
            flags: Flags::new(),
            memory: Memory::new(),
            cycles: Ticks::ZERO,
            state: RunState::Running,
        }
    }

    /// Restore power-up defaults and set PC to `origin`.
    ///
    /// Memory is zero-filled in place.
    pub fn reset(&mut self, origin: u16) {
        self.regs = Registers::at(origin);
        self.flags = Flags::new();
        self.memory.clear();
        self.cycles = Ticks::ZERO;
        self.state = RunState::Running;
        debug!("reset, PC=${origin:04X}");
    }

    /// Read the byte at `address`.
    pub fn read(&self, address: u32) -> Result<u8, MemoryError> {
        self.memory.read(address)
    }

    /// Store `value` at `address`.
    pub fn write(&mut self, address: u32, value: u8) -> Result<(), MemoryError> {
        self.memory.write(address, value)
    }

    /// Read the byte at PC and advance PC, wrapping at $FFFF.
    pub fn fetch_next(&mut self) -> Result<u8, MemoryError> {
        let value = self.memory.read(u32::from(self.regs.pc))?;
        self.regs.pc = self.regs.pc.wrapping_add(1);
        Ok(value)
    }

    /// Write `program` into memory starting at `origin`.
    ///
    /// Registers are untouched. A program that would run past $FFFF is
    /// rejected whole.
    pub fn load(&mut self, program: &[u8], origin: u16) -> Result<(), MemoryError> {
        self.memory.load(u32::from(origin), program)?;
        debug!("loaded {} bytes at ${origin:04X}", program.len());
        Ok(())
    }

    /// The whole address space.
    #[must_use]
    pub fn memory(&self) -> &[u8] {
        self.memory.as_slice()
    }

    /// Cycles elapsed since reset.
    #[must_use]
    pub fn cycles(&self) -> u64 {
        self.cycles.get()
    }

    /// Packed status byte (NV-BDIZC).
    #[must_use]
    pub fn status(&self) -> u8 {
        self.flags.to_byte()
    }

    #[must_use]
    pub fn run_state(&self) -> RunState {
        self.state
    }

    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.state == RunState::Halted
    }

    pub(crate) fn add_cycles(&mut self, cycles: u32) {
        self.cycles += cycles;
    }

    pub(crate) fn halt(&mut self) {
        self.state = RunState::Halted;
    }
}

const PROCESSOR_QUERY_PATHS: &[&str] = &[
    "a", "x", "y", "sp", "pc", "p",
    "flags.n", "flags.v", "flags.b", "flags.d",
    "flags.i", "flags.z", "flags.c",
    "cycles", "halted",
];

impl Observable for Processor {
    fn query(&self, path: &str) -> Option<Value> {
        match path {
            "a" => Some(self.regs.a.into()),
            "x" => Some(self.regs.x.into()),
            "y" => Some(self.regs.y.into()),
            "sp" => Some(self.regs.sp.into()),
            "pc" => Some(self.regs.pc.into()),
            "p" => Some(self.status().into()),

            "flags.n" => Some(self.flags.n.into()),
            "flags.v" => Some(self.flags.v.into()),
            "flags.b" => Some(self.flags.b.into()),
            "flags.d" => Some(self.flags.d.into()),
            "flags.i" => Some(self.flags.i.into()),
            "flags.z" => Some(self.flags.z.into()),
            "flags.c" => Some(self.flags.c.into()),

            "cycles" => Some(self.cycles().into()),
            "halted" => Some(self.is_halted().into()),

            // memory.XXXX (hex address)
            _ => {
                let hex = path.strip_prefix("memory.")?;
                let hex = hex.strip_prefix('$').unwrap_or(hex);
                let address = u16::from_str_radix(hex, 16).ok()?;
                self.read(u32::from(address)).ok().map(Value::from)
            }
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        PROCESSOR_QUERY_PATHS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_next_advances_and_wraps() {
        let mut cpu = Processor::new();
        cpu.write(0xFFFF, 0x42).unwrap();
        cpu.regs.pc = 0xFFFF;
        assert_eq!(cpu.fetch_next(), Ok(0x42));
        assert_eq!(cpu.regs.pc, 0x0000);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut cpu = Processor::new();
        cpu.regs.a = 1;
        cpu.regs.sp = 0;
        cpu.flags = Flags::from_byte(0xFF);
        cpu.write(0x8000, 9).unwrap();
        cpu.add_cycles(12);
        cpu.halt();

        cpu.reset(0x0600);

        assert_eq!(cpu.regs, Registers::at(0x0600));
        assert_eq!(cpu.flags, Flags::new());
        assert_eq!(cpu.cycles(), 0);
        assert_eq!(cpu.run_state(), RunState::Running);
        assert!(cpu.memory().iter().all(|&b| b == 0));
    }

    #[test]
    fn load_leaves_registers_alone() {
        let mut cpu = Processor::new();
        cpu.load(&[0xA9, 0x02], 0x0200).unwrap();
        assert_eq!(cpu.read(0x0200), Ok(0xA9));
        assert_eq!(cpu.read(0x0201), Ok(0x02));
        assert_eq!(cpu.regs.pc, 0);
    }

    #[test]
    fn query_registers_flags_and_memory() {
        let mut cpu = Processor::new();
        cpu.regs.a = 0x0A;
        cpu.flags.z = true;
        cpu.write(0x00FF, 0x33).unwrap();

        assert_eq!(cpu.query("a"), Some(Value::U8(0x0A)));
        assert_eq!(cpu.query("sp"), Some(Value::U8(0xFD)));
        assert_eq!(cpu.query("flags.z"), Some(Value::Bool(true)));
        assert_eq!(cpu.query("p"), Some(Value::U8(0x22)));
        assert_eq!(cpu.query("memory.00FF"), Some(Value::U8(0x33)));
        assert_eq!(cpu.query("memory.$FF"), Some(Value::U8(0x33)));
        assert_eq!(cpu.query("memory.zz"), None);
        assert_eq!(cpu.query("bogus"), None);

        for path in cpu.query_paths() {
            assert!(cpu.query(path).is_some(), "{path} should resolve");
        }
    }
}
