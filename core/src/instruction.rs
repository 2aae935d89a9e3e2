use std::fmt;

use crate::opcode::Opcode;
use crate::operations::{self, Context, OpResult};
use crate::state::State;

/// A decoded Chip-8 instruction with its operands pulled out of the opcode.
///
/// Mnemonics follow Cowgod's technical reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `00E0` CLS
    Cls,
    /// `00EE` RET
    Ret,
    /// `1nnn` JP addr
    Jump { addr: u16 },
    /// `2nnn` CALL addr
    Call { addr: u16 },
    /// `3xkk` SE Vx, byte
    SkipEqImm { x: u8, kk: u8 },
    /// `4xkk` SNE Vx, byte
    SkipNeImm { x: u8, kk: u8 },
    /// `5xy0` SE Vx, Vy
    SkipEqReg { x: u8, y: u8 },
    /// `6xkk` LD Vx, byte
    LoadImm { x: u8, kk: u8 },
    /// `7xkk` ADD Vx, byte
    AddImm { x: u8, kk: u8 },
    /// `8xy0` LD Vx, Vy
    Move { x: u8, y: u8 },
    /// `8xy1` OR Vx, Vy
    Or { x: u8, y: u8 },
    /// `8xy2` AND Vx, Vy
    And { x: u8, y: u8 },
    /// `8xy3` XOR Vx, Vy
    Xor { x: u8, y: u8 },
    /// `8xy4` ADD Vx, Vy
    AddReg { x: u8, y: u8 },
    /// `8xy5` SUB Vx, Vy
    Sub { x: u8, y: u8 },
    /// `8xy6` SHR Vx
    Shr { x: u8 },
    /// `8xy7` SUBN Vx, Vy
    SubN { x: u8, y: u8 },
    /// `8xyE` SHL Vx
    Shl { x: u8 },
    /// `9xy0` SNE Vx, Vy
    SkipNeReg { x: u8, y: u8 },
    /// `Annn` LD I, addr
    LoadIndex { addr: u16 },
    /// `Bnnn` JP V0, addr
    JumpOffset { addr: u16 },
    /// `Cxkk` RND Vx, byte
    Random { x: u8, kk: u8 },
    /// `Dxyn` DRW Vx, Vy, nibble
    Draw { x: u8, y: u8, n: u8 },
    /// `Ex9E` SKP Vx
    SkipKey { x: u8 },
    /// `ExA1` SKNP Vx
    SkipNotKey { x: u8 },
    /// `Fx07` LD Vx, DT
    LoadDelay { x: u8 },
    /// `Fx0A` LD Vx, K
    WaitKey { x: u8 },
    /// `Fx15` LD DT, Vx
    SetDelay { x: u8 },
    /// `Fx18` LD ST, Vx
    SetSound { x: u8 },
    /// `Fx1E` ADD I, Vx
    AddIndex { x: u8 },
    /// `Fx29` LD F, Vx
    LoadFont { x: u8 },
    /// `Fx33` LD B, Vx
    Bcd { x: u8 },
    /// `Fx55` LD [I], Vx
    StoreRegs { x: u8 },
    /// `Fx65` LD Vx, [I]
    LoadRegs { x: u8 },
}

/// Selects the Instruction for a given Opcode, or None if it isn't one.
///
/// Decoding happens in two levels. The most significant nibble picks a category; the 0x0, 0xE
/// and 0xF categories are then told apart by their low byte and the 0x8 category by its low
/// nibble. Every arm is distinct so no instruction can shadow another.
pub fn decode(op: u16) -> Option<Instruction> {
    use Instruction::*;

    let (x, y, n, kk, addr) = (op.x(), op.y(), op.n(), op.kk(), op.addr());
    let instruction = match op.category() {
        0x0000 => match op.family_low_byte() {
            0x00E0 => Cls,
            0x00EE => Ret,
            // 0nnn (SYS addr) calls native code, which interpreters don't support
            _ => return None,
        },
        0x1000 => Jump { addr },
        0x2000 => Call { addr },
        0x3000 => SkipEqImm { x, kk },
        0x4000 => SkipNeImm { x, kk },
        0x5000 if n == 0x0 => SkipEqReg { x, y },
        0x6000 => LoadImm { x, kk },
        0x7000 => AddImm { x, kk },
        0x8000 => match op.family_low_nibble() {
            0x8000 => Move { x, y },
            0x8001 => Or { x, y },
            0x8002 => And { x, y },
            0x8003 => Xor { x, y },
            0x8004 => AddReg { x, y },
            0x8005 => Sub { x, y },
            0x8006 => Shr { x },
            0x8007 => SubN { x, y },
            0x800E => Shl { x },
            _ => return None,
        },
        0x9000 if n == 0x0 => SkipNeReg { x, y },
        0xA000 => LoadIndex { addr },
        0xB000 => JumpOffset { addr },
        0xC000 => Random { x, kk },
        0xD000 => Draw { x, y, n },
        0xE000 => match op.family_low_byte() {
            0xE09E => SkipKey { x },
            0xE0A1 => SkipNotKey { x },
            _ => return None,
        },
        0xF000 => match op.family_low_byte() {
            0xF007 => LoadDelay { x },
            0xF00A => WaitKey { x },
            0xF015 => SetDelay { x },
            0xF018 => SetSound { x },
            0xF01E => AddIndex { x },
            0xF029 => LoadFont { x },
            0xF033 => Bcd { x },
            0xF055 => StoreRegs { x },
            0xF065 => LoadRegs { x },
            _ => return None,
        },
        _ => return None,
    };
    Some(instruction)
}

impl Instruction {
    /// Applies the instruction to `state`.
    /// The program counter must already point at the following instruction.
    pub(crate) fn execute(self, state: &mut State, ctx: &mut Context) -> OpResult {
        use Instruction::*;

        match self {
            Cls => operations::clr(state),
            Ret => operations::rts(state, ctx),
            Jump { addr } => operations::jump(state, addr),
            Call { addr } => operations::call(state, ctx, addr),
            SkipEqImm { x, kk } => operations::ske(state, x, kk),
            SkipNeImm { x, kk } => operations::skne(state, x, kk),
            SkipEqReg { x, y } => operations::skre(state, x, y),
            LoadImm { x, kk } => operations::load(state, x, kk),
            AddImm { x, kk } => operations::add(state, x, kk),
            Move { x, y } => operations::mv(state, x, y),
            Or { x, y } => operations::or(state, x, y),
            And { x, y } => operations::and(state, x, y),
            Xor { x, y } => operations::xor(state, x, y),
            AddReg { x, y } => operations::addr(state, x, y),
            Sub { x, y } => operations::sub(state, x, y),
            Shr { x } => operations::shr(state, x),
            SubN { x, y } => operations::subn(state, x, y),
            Shl { x } => operations::shl(state, x),
            SkipNeReg { x, y } => operations::skrne(state, x, y),
            LoadIndex { addr } => operations::loadi(state, addr),
            JumpOffset { addr } => operations::jumpi(state, addr),
            Random { x, kk } => operations::rand(state, ctx, x, kk),
            Draw { x, y, n } => operations::draw(state, ctx, x, y, n),
            SkipKey { x } => operations::skpr(state, ctx, x),
            SkipNotKey { x } => operations::skup(state, ctx, x),
            LoadDelay { x } => operations::moved(state, x),
            WaitKey { x } => operations::keyd(state, ctx, x),
            SetDelay { x } => operations::loads(state, x),
            SetSound { x } => operations::ld(state, x),
            AddIndex { x } => operations::addi(state, x),
            LoadFont { x } => operations::ldspr(state, x),
            Bcd { x } => operations::bcd(state, ctx, x),
            StoreRegs { x } => operations::stor(state, ctx, x),
            LoadRegs { x } => operations::read(state, ctx, x),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;

        match *self {
            Cls => write!(f, "CLS"),
            Ret => write!(f, "RET"),
            Jump { addr } => write!(f, "JP {:#05X}", addr),
            Call { addr } => write!(f, "CALL {:#05X}", addr),
            SkipEqImm { x, kk } => write!(f, "SE V{:X}, {:#04X}", x, kk),
            SkipNeImm { x, kk } => write!(f, "SNE V{:X}, {:#04X}", x, kk),
            SkipEqReg { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            LoadImm { x, kk } => write!(f, "LD V{:X}, {:#04X}", x, kk),
            AddImm { x, kk } => write!(f, "ADD V{:X}, {:#04X}", x, kk),
            Move { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            AddReg { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Sub { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            Shr { x } => write!(f, "SHR V{:X}", x),
            SubN { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            Shl { x } => write!(f, "SHL V{:X}", x),
            SkipNeReg { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            LoadIndex { addr } => write!(f, "LD I, {:#05X}", addr),
            JumpOffset { addr } => write!(f, "JP V0, {:#05X}", addr),
            Random { x, kk } => write!(f, "RND V{:X}, {:#04X}", x, kk),
            Draw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            SkipKey { x } => write!(f, "SKP V{:X}", x),
            SkipNotKey { x } => write!(f, "SKNP V{:X}", x),
            LoadDelay { x } => write!(f, "LD V{:X}, DT", x),
            WaitKey { x } => write!(f, "LD V{:X}, K", x),
            SetDelay { x } => write!(f, "LD DT, V{:X}", x),
            SetSound { x } => write!(f, "LD ST, V{:X}", x),
            AddIndex { x } => write!(f, "ADD I, V{:X}", x),
            LoadFont { x } => write!(f, "LD F, V{:X}", x),
            Bcd { x } => write!(f, "LD B, V{:X}", x),
            StoreRegs { x } => write!(f, "LD [I], V{:X}", x),
            LoadRegs { x } => write!(f, "LD V{:X}, [I]", x),
        }
    }
}
