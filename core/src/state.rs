use crate::display::FrameBuffer;
use crate::memory::Memory;
use crate::registers::Registers;
use crate::stack::Stack;

/// The Chip8 machine state
///
/// ## CPU
/// See `Registers`: V0..VF, I, the program counter and the two timers.
///
/// ## Memory
/// - 16 level call stack of return addresses
/// - 4096 bytes of addressable memory
/// - 64x32 frame buffer
///     - stores the contents of the next frame to be drawn
///
/// Everything here is replaced together on reset; the keypad lives outside the state
/// because the host writes to it.
#[derive(Clone, Default)]
pub struct State {
    pub registers: Registers,
    pub memory: Memory,
    pub stack: Stack,
    pub frame_buffer: FrameBuffer,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }
}
