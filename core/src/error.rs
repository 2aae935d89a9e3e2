use thiserror::Error;

use crate::constants::MAX_PROGRAM_SIZE;

/// Failure to place a ROM into memory. The machine state is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("ROM is too large ({size} bytes), max size is {} bytes", MAX_PROGRAM_SIZE)]
    TooLarge { size: usize },
}

/// A recoverable fault raised while executing a single cycle.
///
/// Faults never abort the engine: the cycle's timers still tick and the next `step` resumes
/// from the current program counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineFault {
    #[error("unrecognized opcode {word:#06X} at {pc:#05X}")]
    UnknownOpcode { word: u16, pc: u16 },

    #[error("stack underflow: return with an empty call stack at {pc:#05X}")]
    StackUnderflow { pc: u16 },

    #[error("stack overflow: call nested deeper than the stack allows at {pc:#05X}")]
    StackOverflow { pc: u16 },

    #[error("memory access out of bounds at address {addr:#06X} (pc {pc:#05X})")]
    MemoryOutOfBounds { addr: usize, pc: u16 },

    #[error("key {key:#04X} is outside the keypad (pc {pc:#05X})")]
    KeyOutOfRange { key: u8, pc: u16 },
}

/// Failure to read a ROM from some source
#[derive(Debug, Error)]
pub enum RomError {
    #[error("unable to read ROM")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Load(#[from] LoadError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("key {0:#X} is outside the keypad range 0x0..=0xF")]
    KeyOutOfRange(usize),
}
