//! Random programs built from the implemented instruction set must execute
//! identically every time, and the reported cycles must match the trace.

use std::cell::RefCell;
use std::rc::Rc;

use mos_6502::opcodes::INSTRUCTIONS;
use mos_6502::{CpuError, Engine, Processor, RunLimit, RunOutcome, TraceEvent};
use proptest::prelude::*;

const ORIGIN: u16 = 0x0200;

fn program() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec((0..INSTRUCTIONS.len(), any::<u8>()), 1..48).prop_map(|ops| {
        let mut bytes = Vec::new();
        for (index, operand) in ops {
            let instruction = &INSTRUCTIONS[index];
            bytes.push(instruction.opcode);
            if instruction.size() == 2 {
                bytes.push(operand);
            }
        }
        bytes
    })
}

type Run = (Result<RunOutcome, CpuError>, Vec<TraceEvent>, Processor);

fn execute(program: &[u8], limit: RunLimit) -> Run {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let mut engine = Engine::new().with_trace(move |e| sink.borrow_mut().push(*e));

    let mut cpu = Processor::new();
    cpu.load(program, ORIGIN).unwrap();
    let result = engine.run(&mut cpu, ORIGIN, limit);
    drop(engine);

    let events = Rc::try_unwrap(events).unwrap().into_inner();
    (result, events, cpu)
}

proptest! {
    #[test]
    fn same_program_same_result(bytes in program()) {
        let (first, first_trace, a) = execute(&bytes, RunLimit::Cycles(2_000));
        let (second, second_trace, b) = execute(&bytes, RunLimit::Cycles(2_000));

        prop_assert_eq!(first, second);
        prop_assert_eq!(first_trace, second_trace);
        prop_assert_eq!(a.regs, b.regs);
        prop_assert_eq!(a.flags, b.flags);
        prop_assert_eq!(a.cycles(), b.cycles());
        prop_assert!(a.memory() == b.memory());
    }

    #[test]
    fn outcome_matches_processor(bytes in program()) {
        let (result, trace, cpu) = execute(&bytes, RunLimit::Cycles(2_000));
        if let Ok(outcome) = result {
            prop_assert_eq!(outcome.cycles(), cpu.cycles());
            prop_assert_eq!(outcome.steps(), trace.len() as u64);
            prop_assert!(trace.windows(2).all(|w| w[0].cycles < w[1].cycles));
        }
    }

    #[test]
    fn step_limit_is_exact(bytes in program(), limit in 1u64..64) {
        let (result, trace, _) = execute(&bytes, RunLimit::Steps(limit));
        if let Ok(outcome) = result {
            prop_assert!(outcome.steps() <= limit);
            prop_assert_eq!(outcome.steps(), trace.len() as u64);
            if !outcome.is_halted() {
                prop_assert_eq!(outcome.steps(), limit);
            }
        }
    }
}
