use crate::constants::{MAX_PROGRAM_SIZE, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET};
use crate::error::{EngineFault, LoadError};

/// # Memory
/// 4096 bytes of flat, byte-addressable memory.
///
/// ```text
/// 0x000..0x050  sprite sheet (glyphs 0..F)
/// 0x050..0x200  unused
/// 0x200..0x1000 program
/// ```
///
/// Every access is bounds checked; out of range accesses surface as
/// `EngineFault::MemoryOutOfBounds` tagged with the program counter that caused them.
#[derive(Clone)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Zeroed memory with the sprite sheet in place
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        bytes[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        Memory { bytes }
    }

    /// Copies a ROM into the program region starting at `PROGRAM_START`.
    /// Nothing is written if the ROM doesn't fit.
    pub fn load_program(&mut self, rom: &[u8]) -> Result<(), LoadError> {
        if rom.len() > MAX_PROGRAM_SIZE {
            return Err(LoadError::TooLarge { size: rom.len() });
        }
        let start = PROGRAM_START as usize;
        self.bytes[start..start + rom.len()].copy_from_slice(rom);
        Ok(())
    }

    /// Reads the big-endian opcode at `pc` and `pc + 1`
    pub fn fetch(&self, pc: u16) -> Result<u16, EngineFault> {
        let word = self.slice(pc, 2, pc)?;
        Ok(u16::from(word[0]) << 8 | u16::from(word[1]))
    }

    pub fn read(&self, addr: u16, pc: u16) -> Result<u8, EngineFault> {
        self.bytes
            .get(addr as usize)
            .copied()
            .ok_or(EngineFault::MemoryOutOfBounds {
                addr: addr as usize,
                pc,
            })
    }

    /// Borrows `len` bytes starting at `addr`
    pub fn slice(&self, addr: u16, len: usize, pc: u16) -> Result<&[u8], EngineFault> {
        let range = Self::range(addr, len, pc)?;
        Ok(&self.bytes[range])
    }

    /// Mutably borrows `len` bytes starting at `addr`
    pub fn slice_mut(&mut self, addr: u16, len: usize, pc: u16) -> Result<&mut [u8], EngineFault> {
        let range = Self::range(addr, len, pc)?;
        Ok(&mut self.bytes[range])
    }

    /// The whole address space
    pub fn bytes(&self) -> &[u8; MEMORY_SIZE] {
        &self.bytes
    }

    fn range(addr: u16, len: usize, pc: u16) -> Result<std::ops::Range<usize>, EngineFault> {
        let start = addr as usize;
        let end = start + len;
        if end > MEMORY_SIZE {
            // Report the first byte that falls outside memory
            return Err(EngineFault::MemoryOutOfBounds {
                addr: start.max(MEMORY_SIZE),
                pc,
            });
        }
        Ok(start..end)
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
