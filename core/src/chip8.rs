use std::io::Read;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, trace, warn};

use crate::config::Config;
use crate::constants::{DISPLAY_SIZE, MAX_ADDRESS, MAX_PROGRAM_SIZE};
use crate::display::FrameBuffer;
use crate::error::{EngineFault, InputError, LoadError, RomError};
use crate::instruction::{decode, Instruction};
use crate::keypad::Keypad;
use crate::memory::Memory;
use crate::operations::Context;
use crate::registers::Registers;
use crate::stack::Stack;
use crate::state::State;

/// What a single cycle did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepOutcome {
    /// The frame buffer was cleared or drawn to and should be redrawn
    pub dirty: bool,
    /// The cycle hit a fault; execution may still continue
    pub fault: Option<EngineFault>,
}

impl StepOutcome {
    pub fn is_ok(&self) -> bool {
        self.fault.is_none()
    }
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - the `keypad`, shared with whoever produces key presses
///  - the engine `config` and the random number generator behind `RND`
///
/// Supplies interfaces for:
/// - resetting the machine and loading roms
/// - pressing and releasing keys
/// - advancing the CPU one cycle at a time
/// - inspecting its frame buffer for rendering by some display
///
/// The engine never sleeps or blocks; how often `step` is called sets the effective clock and
/// timer rates. `step`, `load` and `reset` take `&mut self`, so the borrow checker serializes
/// them; the keypad is the only part another thread may touch concurrently.
pub struct Chip8 {
    state: State,
    keypad: Arc<Keypad>,
    config: Config,
    rng: StdRng,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Chip8 {
            state: State::new(),
            keypad: Arc::new(Keypad::new()),
            config,
            rng: Self::seed_rng(&config),
        }
    }

    fn seed_rng(config: &Config) -> StdRng {
        match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Zeroes memory, registers, stack, frame buffer and keypad, reloads the sprite sheet and
    /// points the pc back at the start of the program region. A seeded RNG is reseeded so
    /// runs stay reproducible.
    pub fn reset(&mut self) {
        self.state = State::new();
        self.keypad.release_all();
        self.rng = Self::seed_rng(&self.config);
        debug!("reset");
    }

    /// Copies a ROM into memory at 0x200.
    /// An oversized ROM is rejected and leaves the machine untouched.
    pub fn load(&mut self, rom: &[u8]) -> Result<(), LoadError> {
        self.state.memory.load_program(rom)?;
        debug!(size = rom.len(), "loaded ROM");
        Ok(())
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<(), RomError> {
        // One byte past the limit is enough to tell an oversized ROM apart
        let mut rom = Vec::new();
        reader
            .take(MAX_PROGRAM_SIZE as u64 + 1)
            .read_to_end(&mut rom)?;
        self.load(&rom)?;
        Ok(())
    }

    /// Advances the CPU by a single cycle
    /// - fetches the opcode at the pc and moves the pc past it
    /// - decodes and executes it
    /// - ticks both timers, whatever happened above
    pub fn step(&mut self) -> StepOutcome {
        self.state.frame_buffer.mark_clean();
        let fault = self.execute_next().err();
        self.state.registers.tick_timers();

        if let Some(fault) = fault {
            warn!(%fault, "fault");
        }
        StepOutcome {
            dirty: self.state.frame_buffer.is_dirty(),
            fault,
        }
    }

    fn execute_next(&mut self) -> Result<(), EngineFault> {
        let pc = self.state.registers.pc;
        let op = self.state.memory.fetch(pc)?;
        self.state.registers.pc = (pc + 0x2) & MAX_ADDRESS;

        let instruction = decode(op).ok_or(EngineFault::UnknownOpcode { word: op, pc })?;
        trace!(
            "{:04X} {:<14} v{:02X?} i{:03X} pc{:03X}",
            op,
            instruction.to_string(),
            self.state.registers.v,
            self.state.registers.i,
            pc
        );

        let mut ctx = Context {
            pc,
            keypad: &self.keypad,
            rng: &mut self.rng,
            quirks: self.config.quirks,
        };
        instruction.execute(&mut self.state, &mut ctx)
    }

    /// Decodes the instruction at the pc without executing it
    pub fn peek_instruction(&self) -> Option<Instruction> {
        self.state
            .memory
            .fetch(self.state.registers.pc)
            .ok()
            .and_then(decode)
    }

    /// Set the pressed status of a key
    ///
    /// # Arguments
    /// * `key` the index of the key, 0x0..=0xF
    /// * `pressed` whether it is held down
    pub fn set_key(&self, key: usize, pressed: bool) -> Result<(), InputError> {
        self.keypad.set(key, pressed)
    }

    /// A handle to the keypad for producing key presses from another thread
    pub fn keypad(&self) -> Arc<Keypad> {
        Arc::clone(&self.keypad)
    }

    pub fn display(&self) -> &[bool; DISPLAY_SIZE] {
        self.state.frame_buffer.cells()
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    pub fn registers(&self) -> &Registers {
        &self.state.registers
    }

    pub fn memory(&self) -> &Memory {
        &self.state.memory
    }

    pub fn stack(&self) -> &Stack {
        &self.state.stack
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
