//! Table-driven 6502 instruction execution engine.
//!
//! [`Processor`] holds all state: registers, boolean status flags, 64 KiB
//! of memory and a cycle counter. [`Engine`] fetches, decodes and executes
//! instructions against a borrowed processor, charging each opcode's base
//! cost plus any branch or page-cross penalty.
//!
//! ```
//! use mos_6502::{Engine, Processor, RunLimit};
//!
//! let mut cpu = Processor::new();
//! cpu.load(&[0xA9, 0x02, 0x69, 0xFF, 0x00], 0x0200)?; // LDA #$02; ADC #$FF; BRK
//! let outcome = Engine::new().run(&mut cpu, 0x0200, RunLimit::Steps(100))?;
//!
//! assert!(outcome.is_halted());
//! assert_eq!(cpu.regs.a, 0x01);
//! assert!(cpu.flags.c);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Opcodes are rows in the [`opcodes`] dispatch table; the engine loop does
//! not know about individual instructions. Decimal mode and interrupts are
//! not modelled.

mod addressing;
mod alu;
mod branch;
mod engine;
mod error;
pub mod flags;
mod load_store;
mod memory;
pub mod opcodes;
mod processor;
mod registers;
mod system;

pub mod asm;
pub mod disasm;
pub mod program;

pub use addressing::{AddressingMode, Operand, page_crossed};
pub use engine::{Engine, RunLimit, RunOutcome, Step, TraceEvent, TraceHook};
pub use error::{CpuError, MemoryError};
pub use flags::Flags;
pub use memory::{MEMORY_SIZE, Memory};
pub use opcodes::{Instruction, Outcome};
pub use processor::{Processor, RunState};
pub use registers::{RESET_SP, Registers};

pub use mos_core::{Observable, Value};
