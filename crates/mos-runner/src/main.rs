//! `mos-run`: load a program into a fresh processor and run it to BRK.
//!
//! ```text
//! mos-run "a9 02 ea 69 ff 00"
//! mos-run --asm count.s --origin 0200 --trace
//! mos-run prog.bin --max-cycles 5000 --json --show memory.00FF
//! ```
//!
//! Exit status: 0 when the program halts on BRK, 2 when the step or cycle
//! limit is reached first, 1 on any error.

mod input;
mod logger;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use mos_6502::{
    Engine, Flags, Observable, Processor, Registers, RunLimit, RunOutcome, TraceEvent, disasm,
};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "mos-run", version, about = "Run a 6502 program until BRK")]
struct Cli {
    /// Binary file, assembly file (with --asm), or a hex byte list.
    program: String,

    /// Treat PROGRAM as assembly source.
    #[arg(long)]
    asm: bool,

    /// Load and start address, in hex.
    #[arg(long, default_value = "0000", value_parser = input::parse_address)]
    origin: u16,

    /// Stop after this many instructions.
    #[arg(long, default_value_t = 10_000)]
    max_steps: u64,

    /// Stop once this many cycles have elapsed (replaces --max-steps).
    #[arg(long, conflicts_with = "max_steps")]
    max_cycles: Option<u64>,

    /// Print every instruction before it executes.
    #[arg(long)]
    trace: bool,

    /// Emit trace events and the final state as JSON lines.
    #[arg(long)]
    json: bool,

    /// Print a disassembly listing of the program and exit.
    #[arg(long)]
    list: bool,

    /// Print a processor value after the run (e.g. `a`, `flags.c`, `memory.00FF`).
    #[arg(long, value_name = "PATH")]
    show: Vec<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv per-instruction trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn limit(&self) -> RunLimit {
        match self.max_cycles {
            Some(cycles) => RunLimit::Cycles(cycles),
            None => RunLimit::Steps(self.max_steps),
        }
    }
}

/// Final machine state, as printed by `--json`.
#[derive(Serialize)]
struct Summary<'a> {
    outcome: &'static str,
    steps: u64,
    cycles: u64,
    registers: Registers,
    flags: Flags,
    status: u8,
    values: Vec<(&'a str, String)>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let (bytes, source) = input::load(&cli.program, cli.asm)?;
    info!("loaded {} bytes ({source:?}) at ${:04X}", bytes.len(), cli.origin);

    let mut cpu = Processor::new();
    cpu.reset(cli.origin);
    cpu.load(&bytes, cli.origin)
        .with_context(|| format!("loading program at ${:04X}", cli.origin))?;

    if cli.list {
        for line in disasm::listing(cpu.memory(), cli.origin, bytes.len()) {
            println!("{line}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    let mut engine = Engine::new();
    if cli.json {
        engine.set_trace(print_json_event);
    } else if cli.trace {
        engine.set_trace(|event: &TraceEvent| println!("{event}"));
    }

    let outcome = engine.run(&mut cpu, cli.origin, cli.limit())?;
    let values = cli
        .show
        .iter()
        .map(|path| {
            cpu.query(path)
                .map(|value| (path.as_str(), value.to_string()))
                .with_context(|| {
                    format!(
                        "unknown value {path:?}; expected one of {} or memory.XXXX",
                        cpu.query_paths().join(", ")
                    )
                })
        })
        .collect::<Result<Vec<_>>>()?;

    if cli.json {
        let summary = Summary {
            outcome: if outcome.is_halted() { "halted" } else { "limit" },
            steps: outcome.steps(),
            cycles: outcome.cycles(),
            registers: cpu.regs,
            flags: cpu.flags,
            status: cpu.status(),
            values,
        };
        println!("{}", serde_json::to_string(&summary)?);
    } else {
        print_summary(&cpu, outcome, &values);
    }

    Ok(match outcome {
        RunOutcome::Halted { .. } => ExitCode::SUCCESS,
        RunOutcome::LimitReached { .. } => ExitCode::from(2),
    })
}

fn print_json_event(event: &TraceEvent) {
    match serde_json::to_string(event) {
        Ok(line) => println!("{line}"),
        Err(e) => log::error!("trace event at ${:04X} not serialisable: {e}", event.pc),
    }
}

fn print_summary(cpu: &Processor, outcome: RunOutcome, values: &[(&str, String)]) {
    match outcome {
        RunOutcome::Halted { steps, cycles } => {
            println!("halted after {steps} steps, {cycles} cycles");
        }
        RunOutcome::LimitReached { steps, cycles } => {
            println!("limit reached after {steps} steps, {cycles} cycles");
        }
    }
    let r = &cpu.regs;
    println!(
        "PC:{:04X} A:{:02X} X:{:02X} Y:{:02X} SP:{:02X} P:{} ({:02X})",
        r.pc,
        r.a,
        r.x,
        r.y,
        r.sp,
        cpu.flags,
        cpu.status()
    );
    for (path, value) in values {
        println!("{path} = {value}");
    }
}
