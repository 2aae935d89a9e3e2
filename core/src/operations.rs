use rand::{Rng, RngCore};

use crate::config::Quirks;
use crate::constants::{FONT_GLYPH_SIZE, KEY_COUNT, MAX_ADDRESS};
use crate::error::EngineFault;
use crate::keypad::Keypad;
use crate::state::State;

/// Everything an operation may need beyond the machine state.
///
/// By the time an operation runs the program counter already points past it; `pc` keeps the
/// address the instruction was fetched from so faults can name it.
pub struct Context<'a> {
    pub pc: u16,
    pub keypad: &'a Keypad,
    pub rng: &'a mut dyn RngCore,
    pub quirks: Quirks,
}

pub type OpResult = Result<(), EngineFault>;

fn skip_if(state: &mut State, condition: bool) {
    if condition {
        state.registers.pc = (state.registers.pc + 0x2) & MAX_ADDRESS;
    }
}

/// The key index held in Vx, or a fault when it names no key on the keypad
fn key_index(state: &State, ctx: &Context, x: u8) -> Result<usize, EngineFault> {
    let key = state.registers.v[x as usize];
    if usize::from(key) >= KEY_COUNT {
        return Err(EngineFault::KeyOutOfRange { key, pc: ctx.pc });
    }
    Ok(usize::from(key))
}

/// clear
pub fn clr(state: &mut State) -> OpResult {
    state.frame_buffer.clear();
    Ok(())
}

/// PC = STACK.pop()
pub fn rts(state: &mut State, ctx: &Context) -> OpResult {
    state.registers.pc = state.stack.pop(ctx.pc)?;
    Ok(())
}

/// PC = addr
pub fn jump(state: &mut State, addr: u16) -> OpResult {
    state.registers.pc = addr;
    Ok(())
}

/// STACK.push(PC); PC = addr
pub fn call(state: &mut State, ctx: &Context, addr: u16) -> OpResult {
    state.stack.push(state.registers.pc, ctx.pc)?;
    state.registers.pc = addr;
    Ok(())
}

/// if Vx == kk then pc += 2
pub fn ske(state: &mut State, x: u8, kk: u8) -> OpResult {
    let equal = state.registers.v[x as usize] == kk;
    skip_if(state, equal);
    Ok(())
}

/// if Vx != kk then pc += 2
pub fn skne(state: &mut State, x: u8, kk: u8) -> OpResult {
    let differ = state.registers.v[x as usize] != kk;
    skip_if(state, differ);
    Ok(())
}

/// if Vx == Vy then pc += 2
pub fn skre(state: &mut State, x: u8, y: u8) -> OpResult {
    let v = &state.registers.v;
    let equal = v[x as usize] == v[y as usize];
    skip_if(state, equal);
    Ok(())
}

/// Vx = kk
pub fn load(state: &mut State, x: u8, kk: u8) -> OpResult {
    state.registers.v[x as usize] = kk;
    Ok(())
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it. VF is left alone.
pub fn add(state: &mut State, x: u8, kk: u8) -> OpResult {
    let v = &mut state.registers.v;
    v[x as usize] = v[x as usize].wrapping_add(kk);
    Ok(())
}

/// Vx = Vy
pub fn mv(state: &mut State, x: u8, y: u8) -> OpResult {
    let v = &mut state.registers.v;
    v[x as usize] = v[y as usize];
    Ok(())
}

/// Vx |= Vy
pub fn or(state: &mut State, x: u8, y: u8) -> OpResult {
    let v = &mut state.registers.v;
    v[x as usize] |= v[y as usize];
    Ok(())
}

/// Vx &= Vy
pub fn and(state: &mut State, x: u8, y: u8) -> OpResult {
    let v = &mut state.registers.v;
    v[x as usize] &= v[y as usize];
    Ok(())
}

/// Vx ^= Vy
pub fn xor(state: &mut State, x: u8, y: u8) -> OpResult {
    let v = &mut state.registers.v;
    v[x as usize] ^= v[y as usize];
    Ok(())
}

// The flag-setting ALU ops below read both operands up front, write VF, then write Vx.
// With x == 0xF the result therefore overwrites the flag.

/// Vx += Vy; VF = overflow
pub fn addr(state: &mut State, x: u8, y: u8) -> OpResult {
    let (res, over) = state.registers.v[x as usize].overflowing_add(state.registers.v[y as usize]);
    state.registers.set_flag(over);
    state.registers.v[x as usize] = res;
    Ok(())
}

/// Vx -= Vy; VF = Vx > Vy
pub fn sub(state: &mut State, x: u8, y: u8) -> OpResult {
    let (vx, vy) = (state.registers.v[x as usize], state.registers.v[y as usize]);
    state.registers.set_flag(vx > vy);
    state.registers.v[x as usize] = vx.wrapping_sub(vy);
    Ok(())
}

/// Vx >>= 1; VF = lsb(Vx)
pub fn shr(state: &mut State, x: u8) -> OpResult {
    let vx = state.registers.v[x as usize];
    state.registers.v[0xF] = vx & 0x1;
    state.registers.v[x as usize] = vx >> 1;
    Ok(())
}

/// Vx = Vy - Vx; VF = Vy > Vx
pub fn subn(state: &mut State, x: u8, y: u8) -> OpResult {
    let (vx, vy) = (state.registers.v[x as usize], state.registers.v[y as usize]);
    state.registers.set_flag(vy > vx);
    state.registers.v[x as usize] = vy.wrapping_sub(vx);
    Ok(())
}

/// Vx <<= 1; VF = msb(Vx)
/// The flag keeps the msb in place (0x80), it is not shifted down to 0x1.
pub fn shl(state: &mut State, x: u8) -> OpResult {
    let vx = state.registers.v[x as usize];
    state.registers.v[0xF] = vx & 0x80;
    state.registers.v[x as usize] = vx << 1;
    Ok(())
}

/// if Vx != Vy then pc +=2
pub fn skrne(state: &mut State, x: u8, y: u8) -> OpResult {
    let v = &state.registers.v;
    let differ = v[x as usize] != v[y as usize];
    skip_if(state, differ);
    Ok(())
}

/// I = addr
pub fn loadi(state: &mut State, addr: u16) -> OpResult {
    state.registers.i = addr;
    Ok(())
}

/// PC = V0 + addr
pub fn jumpi(state: &mut State, addr: u16) -> OpResult {
    state.registers.pc = (u16::from(state.registers.v[0x0]) + addr) & MAX_ADDRESS;
    Ok(())
}

/// Vx = rand_byte & kk
pub fn rand(state: &mut State, ctx: &mut Context, x: u8, kk: u8) -> OpResult {
    let rand_byte: u8 = ctx.rng.gen();
    state.registers.v[x as usize] = rand_byte & kk;
    Ok(())
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory I..I+n at position Vx, Vy on the FrameBuffer.
/// Sets VF if any pixels were erased
pub fn draw(state: &mut State, ctx: &Context, x: u8, y: u8, n: u8) -> OpResult {
    let rows = state.memory.slice(state.registers.i, n as usize, ctx.pc)?;
    let collision = state.frame_buffer.draw_sprite(
        state.registers.v[x as usize],
        state.registers.v[y as usize],
        rows,
        ctx.quirks.sprite_edge,
    );
    state.registers.set_flag(collision);
    Ok(())
}

/// if Vx.pressed then pc += 2
pub fn skpr(state: &mut State, ctx: &Context, x: u8) -> OpResult {
    let key = key_index(state, ctx, x)?;
    let pressed = ctx.keypad.is_pressed(key);
    skip_if(state, pressed);
    Ok(())
}

/// if !Vx.pressed then pc += 2
pub fn skup(state: &mut State, ctx: &Context, x: u8) -> OpResult {
    let key = key_index(state, ctx, x)?;
    let released = !ctx.keypad.is_pressed(key);
    skip_if(state, released);
    Ok(())
}

/// Vx = DT
pub fn moved(state: &mut State, x: u8) -> OpResult {
    state.registers.v[x as usize] = state.registers.delay_timer;
    Ok(())
}

/// await keypress for Vx
/// Polls once: with no key held the pc is wound back so this instruction runs again next cycle.
pub fn keyd(state: &mut State, ctx: &Context, x: u8) -> OpResult {
    match ctx.keypad.last_pressed() {
        Some(key) => state.registers.v[x as usize] = key,
        None => state.registers.pc = state.registers.pc.wrapping_sub(0x2) & MAX_ADDRESS,
    }
    Ok(())
}

/// DT = Vx
pub fn loads(state: &mut State, x: u8) -> OpResult {
    state.registers.delay_timer = state.registers.v[x as usize];
    Ok(())
}

/// ST = Vx
pub fn ld(state: &mut State, x: u8) -> OpResult {
    state.registers.sound_timer = state.registers.v[x as usize];
    Ok(())
}

/// I += Vx; VF = I overflowed 12 bits
pub fn addi(state: &mut State, x: u8) -> OpResult {
    let sum = state.registers.i + u16::from(state.registers.v[x as usize]);
    state.registers.set_flag(sum > MAX_ADDRESS);
    state.registers.i = sum & MAX_ADDRESS;
    Ok(())
}

/// I = Vx * 5
/// Set I to the memory address of the sprite for Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(state: &mut State, x: u8) -> OpResult {
    state.registers.i = (u16::from(state.registers.v[x as usize]) * FONT_GLYPH_SIZE) & MAX_ADDRESS;
    Ok(())
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(state: &mut State, ctx: &Context, x: u8) -> OpResult {
    let vx = state.registers.v[x as usize];
    state
        .memory
        .slice_mut(state.registers.i, 3, ctx.pc)?
        .copy_from_slice(&[vx / 100, vx / 10 % 10, vx % 10]);
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx; I += x + 1
pub fn stor(state: &mut State, ctx: &Context, x: u8) -> OpResult {
    let count = x as usize + 1;
    state
        .memory
        .slice_mut(state.registers.i, count, ctx.pc)?
        .copy_from_slice(&state.registers.v[..count]);
    state.registers.i = (state.registers.i + count as u16) & MAX_ADDRESS;
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]; I += x + 1
pub fn read(state: &mut State, ctx: &Context, x: u8) -> OpResult {
    let count = x as usize + 1;
    let bytes = state.memory.slice(state.registers.i, count, ctx.pc)?;
    state.registers.v[..count].copy_from_slice(bytes);
    state.registers.i = (state.registers.i + count as u16) & MAX_ADDRESS;
    Ok(())
}
