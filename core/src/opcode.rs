use std::fmt;

/// # Opcodes
///
/// Chip-8 opcodes are 16 bits each, stored big-endian in memory. Their behavior is cased on
/// some combination of:
/// - `[n___]` the family; applies to all opcodes
/// - `[___n]` specific behavior within the 0x5, 0x8 and 0x9 families
/// - `[__nn]` specific behavior within the 0x0, 0xE and 0xF families
///
/// Nibbles not used to determine the operation carry its operands.
/// - `[_nnn]` a 12-bit address
/// - `[__kk]` a byte that is assigned to and/or compared with Vx
/// - `[_x__]` either the register Vx or a range of registers V0..=Vx
/// - `[__y_]` the register Vy
/// - `[___n]` a sprite height for draw
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Opcode(u16);

impl Opcode {
    pub const fn new(word: u16) -> Self {
        Opcode(word)
    }

    /// Combines two subsequent bytes of memory, the first being most significant.
    pub fn from_bytes(high: u8, low: u8) -> Self {
        Opcode(u16::from(high) << 8 | u16::from(low))
    }

    /// The raw 16-bit word.
    pub fn word(self) -> u16 {
        self.0
    }

    /// `[f___]`
    pub fn family(self) -> usize {
        ((self.0 & 0xF000) >> 12) as usize
    }

    /// `[_x__]` as a register index.
    pub fn x(self) -> usize {
        ((self.0 & 0x0F00) >> 8) as usize
    }

    /// `[__y_]` as a register index.
    pub fn y(self) -> usize {
        ((self.0 & 0x00F0) >> 4) as usize
    }

    /// `[__kk]`
    pub fn byte(self) -> u8 {
        (self.0 & 0x00FF) as u8
    }

    /// `[_adr]`
    pub fn addr(self) -> u16 {
        self.0 & 0x0FFF
    }

    /// `[___n]`
    pub fn nibble(self) -> u8 {
        (self.0 & 0x000F) as u8
    }
}

impl From<u16> for Opcode {
    fn from(word: u16) -> Self {
        Opcode(word)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}
