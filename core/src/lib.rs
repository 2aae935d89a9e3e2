pub use chip8::{Chip8, StepOutcome};
pub use config::{Config, EdgePolicy, Quirks};
pub use display::FrameBuffer;
pub use error::{EngineFault, InputError, LoadError, RomError};
pub use instruction::{decode, Instruction};
pub use keypad::Keypad;
pub use memory::Memory;
pub use registers::Registers;
pub use stack::Stack;

mod chip8;
pub mod config;
pub mod constants;
pub mod display;
pub mod error;
mod instruction;
pub mod keypad;
pub mod memory;
mod opcode;
mod operations;
pub mod registers;
pub mod stack;
mod state;
