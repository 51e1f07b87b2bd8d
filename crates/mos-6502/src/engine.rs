//! Fetch/decode/execute loop.
//!
//! The engine owns no processor state. Every call borrows the [`Processor`]
//! mutably for the duration of one instruction (or one bounded run), so each
//! instruction is atomic with respect to anything the caller can observe.

use log::{debug, trace, warn};

use crate::opcodes::{self, Instruction, Outcome};
use crate::{CpuError, Flags, Processor, Registers};

/// Result of executing one instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// An instruction ran and cost `cycles`.
    Executed { cycles: u32 },
    /// The processor is halted, either by the BRK just executed or from an
    /// earlier one.
    Halted,
}

/// Mandatory ceiling for [`Engine::run`].
///
/// A program without BRK would otherwise never return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunLimit {
    /// Stop after this many instructions.
    Steps(u64),
    /// Stop before starting an instruction once the cycle counter has
    /// reached this value. The last instruction may overshoot it.
    Cycles(u64),
}

/// How a bounded run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// BRK was executed.
    Halted { steps: u64, cycles: u64 },
    /// The run limit was reached first.
    LimitReached { steps: u64, cycles: u64 },
}

impl RunOutcome {
    /// Instructions executed during this run.
    #[must_use]
    pub fn steps(&self) -> u64 {
        match *self {
            RunOutcome::Halted { steps, .. } | RunOutcome::LimitReached { steps, .. } => steps,
        }
    }

    /// Processor cycle count when the run ended.
    #[must_use]
    pub fn cycles(&self) -> u64 {
        match *self {
            RunOutcome::Halted { cycles, .. } | RunOutcome::LimitReached { cycles, .. } => cycles,
        }
    }

    #[must_use]
    pub fn is_halted(&self) -> bool {
        matches!(self, RunOutcome::Halted { .. })
    }
}

/// Processor state captured just before an instruction executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TraceEvent {
    /// Address of the opcode.
    pub pc: u16,
    pub opcode: u8,
    pub mnemonic: &'static str,
    pub registers: Registers,
    pub flags: Flags,
    /// Cycle count before the instruction.
    pub cycles: u64,
}

impl TraceEvent {
    fn capture(cpu: &Processor, instruction: &Instruction) -> Self {
        Self {
            pc: cpu.regs.pc,
            opcode: instruction.opcode,
            mnemonic: instruction.mnemonic,
            registers: cpu.regs,
            flags: cpu.flags,
            cycles: cpu.cycles(),
        }
    }
}

impl std::fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let r = &self.registers;
        write!(
            f,
            "{:04X}  {:02X}  {:<4} A:{:02X} X:{:02X} Y:{:02X} SP:{:02X} P:{} CYC:{}",
            self.pc, self.opcode, self.mnemonic, r.a, r.x, r.y, r.sp, self.flags, self.cycles
        )
    }
}

/// Observer called with every [`TraceEvent`].
pub type TraceHook = Box<dyn FnMut(&TraceEvent)>;

/// The instruction execution engine.
#[derive(Default)]
pub struct Engine {
    trace: Option<TraceHook>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("trace", &self.trace.is_some())
            .finish()
    }
}

impl Engine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`set_trace`](Self::set_trace).
    #[must_use]
    pub fn with_trace(mut self, hook: impl FnMut(&TraceEvent) + 'static) -> Self {
        self.set_trace(hook);
        self
    }

    /// Install a per-step trace hook, replacing any previous one.
    ///
    /// The hook only sees a shared snapshot and cannot affect execution.
    pub fn set_trace(&mut self, hook: impl FnMut(&TraceEvent) + 'static) {
        self.trace = Some(Box::new(hook));
    }

    pub fn clear_trace(&mut self) {
        self.trace = None;
    }

    /// Execute one instruction.
    ///
    /// An unknown opcode fails before anything is mutated: PC still points
    /// at the offending byte and no cycles are charged.
    pub fn execute_one(&mut self, cpu: &mut Processor) -> Result<Step, CpuError> {
        if cpu.is_halted() {
            return Ok(Step::Halted);
        }

        let pc = cpu.regs.pc;
        let opcode = cpu.read(u32::from(pc))?;
        let Some(instruction) = opcodes::lookup(opcode) else {
            warn!("unimplemented opcode ${opcode:02X} at ${pc:04X}");
            return Err(CpuError::UnimplementedOpcode { opcode, pc });
        };

        if let Some(hook) = self.trace.as_mut() {
            hook(&TraceEvent::capture(cpu, instruction));
        }

        cpu.fetch_next()?;
        let operand = cpu.resolve_operand(instruction.mode)?;
        let outcome = (instruction.handler)(cpu, operand)?;
        trace!(
            "{pc:04X}  {} {operand:?} -> A:{:02X} P:{}",
            instruction.mnemonic, cpu.regs.a, cpu.flags
        );

        match outcome {
            Outcome::Continue { penalty } => {
                let cycles = instruction.cycles + penalty;
                cpu.add_cycles(cycles);
                Ok(Step::Executed { cycles })
            }
            Outcome::Halt => {
                cpu.add_cycles(instruction.cycles);
                cpu.halt();
                debug!("halted at ${pc:04X} after {} cycles", cpu.cycles());
                Ok(Step::Halted)
            }
        }
    }

    /// Set PC to `origin` and execute until BRK or `limit`.
    ///
    /// Errors propagate unchanged. A processor that is already halted
    /// returns at once without being touched; reset it to run again.
    pub fn run(
        &mut self,
        cpu: &mut Processor,
        origin: u16,
        limit: RunLimit,
    ) -> Result<RunOutcome, CpuError> {
        if cpu.is_halted() {
            return Ok(RunOutcome::Halted {
                steps: 0,
                cycles: cpu.cycles(),
            });
        }

        cpu.regs.pc = origin;
        debug!("run from ${origin:04X}, limit {limit:?}");

        let mut steps = 0u64;
        loop {
            let exhausted = match limit {
                RunLimit::Steps(max) => steps >= max,
                RunLimit::Cycles(max) => cpu.cycles() >= max,
            };
            if exhausted {
                debug!("limit reached after {steps} steps, {} cycles", cpu.cycles());
                return Ok(RunOutcome::LimitReached {
                    steps,
                    cycles: cpu.cycles(),
                });
            }

            let step = self.execute_one(cpu)?;
            steps += 1;
            if step == Step::Halted {
                return Ok(RunOutcome::Halted {
                    steps,
                    cycles: cpu.cycles(),
                });
            }
        }
    }
}
