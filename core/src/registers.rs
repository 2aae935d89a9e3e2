use crate::constants::PROGRAM_START;

/// # Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry/borrow/collision flag
/// - (i) the index register; only its low 12 bits are ever set
/// - (pc) the program counter
///
/// ## Timers
/// - 2 8-bit timers (delay & sound)
/// - both count down once per cycle until they reach 0
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub delay_timer: u8,
    pub sound_timer: u8,
}

impl Registers {
    pub fn new() -> Self {
        Registers {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            delay_timer: 0,
            sound_timer: 0,
        }
    }

    /// VF = 1 if `set` else 0
    pub fn set_flag(&mut self, set: bool) {
        self.v[0xF] = u8::from(set);
    }

    /// Counts both timers down by one, stopping at 0
    pub fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}
