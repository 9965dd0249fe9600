//! CHIP-8 interpreter core.
//!
//! [`Interpreter`] owns the whole machine (RAM, registers, stack, timers,
//! framebuffer and keypad) and advances it one instruction per
//! [`Interpreter::cycle`]. Windowing, input polling and pacing are left to the
//! host; the interpreter plugs into `chip8_base::run` through its
//! `chip8_base::Interpreter` impl.

pub mod interpreter;

pub use interpreter::{Chip8Error, Instruction, Interpreter};
