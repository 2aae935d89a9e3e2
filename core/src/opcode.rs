/// # Opcodes
///
/// Chip-8 opcodes are 16 bits each, fetched big-endian from two consecutive bytes.
/// Their behavior is cased on some combination of:
/// - `(n, _, _, _)` broad categorization; applies to all opcodes
/// - `(n, _, _, n)` specific behavior within the 0x8 (ALU) category
/// - `(n, _, n, n)` specific behavior within the 0x0, 0xE and 0xF categories
///
/// Nibbles not used to determine the operation often (but not always) carry important data.
/// - `(_, n, n, n)` represent a 12-bit address
/// - `(_, _, n, n)` encodes some data that is assigned to and/or compared with Vx
/// - `(_, n, _, _)` refers either to the register Vx or a range of registers V0..Vx
/// - `(_, _, n, _)` refers to the the register Vy
/// - `(_, _, _, n)` the height of a sprite
pub trait Opcode {
    /// The Opcode's most significant nibble, still in place.
    /// `[o___]`
    fn category(&self) -> u16;

    /// Dispatch key for families told apart by their last nibble.
    /// `[o__n]`
    fn family_low_nibble(&self) -> u16;

    /// Dispatch key for families told apart by their last byte.
    /// `[o_kk]`
    fn family_low_byte(&self) -> u16;

    /// The Opcode's second nibble.
    /// `[_x__]`
    fn x(&self) -> u8;

    /// The Opcode's third nibble.
    /// `[__y_]`
    fn y(&self) -> u8;

    /// The Opcode's fourth nibble.
    /// `[___n]`
    fn n(&self) -> u8;

    /// The Opcode's least significant byte.
    /// `[__kk]`
    fn kk(&self) -> u8;

    /// The Opcode without its most significant nibble.
    /// `[_adr]`
    fn addr(&self) -> u16;
}

impl Opcode for u16 {
    fn category(&self) -> u16 {
        self & 0xF000
    }

    fn family_low_nibble(&self) -> u16 {
        self & 0xF00F
    }

    fn family_low_byte(&self) -> u16 {
        self & 0xF0FF
    }

    fn x(&self) -> u8 {
        ((self & 0x0F00) >> 8) as u8
    }

    fn y(&self) -> u8 {
        ((self & 0x00F0) >> 4) as u8
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn kk(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn addr(&self) -> u16 {
        self & 0x0FFF
    }
}

#[cfg(test)]
mod test_opcode {
    use super::*;

    #[test]
    fn test_category() {
        let op: u16 = 0xABCD;
        assert_eq!(op.category(), 0xA000);
    }

    #[test]
    fn test_family_keys() {
        let op: u16 = 0x8AB4;
        assert_eq!(op.family_low_nibble(), 0x8004);
        let op: u16 = 0xF265;
        assert_eq!(op.family_low_byte(), 0xF065);
    }

    #[test]
    fn test_x() {
        let op: u16 = 0xABCD;
        assert_eq!(op.x(), 0xB);
    }

    #[test]
    fn test_y() {
        let op: u16 = 0xABCD;
        assert_eq!(op.y(), 0xC);
    }

    #[test]
    fn test_n() {
        let op: u16 = 0xABCD;
        assert_eq!(op.n(), 0xD);
    }

    #[test]
    fn test_kk() {
        let op: u16 = 0xABCD;
        assert_eq!(op.kk(), 0x00CD);
    }

    #[test]
    fn test_addr() {
        let op: u16 = 0xABCD;
        assert_eq!(op.addr(), 0x0BCD);
    }
}
