//! Core types shared by the 6502 execution core and its tooling.
//!
//! Time is counted in CPU cycles. Every component that holds state can be
//! inspected through [`Observable`] without disturbing it.

mod observable;
mod ticks;

pub use observable::{Observable, Value};
pub use ticks::Ticks;
