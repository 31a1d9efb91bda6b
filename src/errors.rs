use std::io;
use thiserror::Error;

/// Fatal conditions that stop an LS-8 run. None of these are retried;
/// the dispatcher surfaces them to the driver and the run is over.
#[derive(Error, Debug)]
pub enum Ls8Error {
    /// program text whose first 8 characters aren't binary digits
    #[error("load error at line {line}: {reason}")]
    Load { line: usize, reason: String },

    /// more program lines than memory cells
    #[error("program image does not fit in memory")]
    ProgramTooLarge,

    /// instruction byte that decodes to nothing in the opcode table
    #[error("illegal instruction {byte:#010b} at {pc:#04x}")]
    IllegalInstruction { byte: u8, pc: usize },

    /// a non-ALU opcode was handed to the ALU; dispatch defect, not a
    /// program error
    #[error("unsupported ALU operation {0}")]
    UnsupportedAlu(&'static str),

    /// MOD with a divisor register holding zero
    #[error("divide by zero at {pc:#04x}")]
    DivideByZero { pc: usize },

    /// operand named a register outside 0..=7
    #[error("register index {index} out of range at {pc:#04x}")]
    BadRegister { index: u8, pc: usize },

    /// push with the stack pointer already at the bottom of memory
    #[error("stack overflow at {pc:#04x}")]
    StackOverflow { pc: usize },

    /// pop that would wrap the stack pointer past the top of memory
    #[error("stack underflow at {pc:#04x}")]
    StackUnderflow { pc: usize },

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}
