use std::fmt;

/// # Opcodes
///
/// CHIP-8 opcodes are 16 bits each, fetched big-endian from two consecutive
/// bytes of memory. The nibbles overlap into several views, and which view an
/// instruction uses depends on the instruction:
///
/// ```text
///  15  12 11   8 7    4 3    0
/// +------+------+------+------+
/// |  id  |  x   |  y   |  n   |
/// +------+------+------+------+
///               |     kk      |
///        |        nnn         |
/// ```
///
/// All views are computed on demand from the one word, so they can't drift.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Opcode(u16);

impl Opcode {
    pub const fn new(raw: u16) -> Self {
        Opcode(raw)
    }

    /// combine the two bytes found at the program counter
    pub fn from_bytes(high: u8, low: u8) -> Self {
        Opcode(u16::from_be_bytes([high, low]))
    }

    pub const fn raw(self) -> u16 {
        self.0
    }

    /// `[i___]` selects the instruction group
    pub const fn identifier(self) -> u8 {
        ((self.0 & 0xF000) >> 12) as u8
    }

    /// `[_x__]` a register index, or the top of a V0..Vx range
    pub const fn x(self) -> usize {
        ((self.0 & 0x0F00) >> 8) as usize
    }

    /// `[__y_]` a register index
    pub const fn y(self) -> usize {
        ((self.0 & 0x00F0) >> 4) as usize
    }

    /// `[___n]`
    pub const fn n(self) -> u8 {
        (self.0 & 0x000F) as u8
    }

    /// `[__kk]`
    pub const fn kk(self) -> u8 {
        (self.0 & 0x00FF) as u8
    }

    /// `[_nnn]` a 12-bit address
    pub const fn nnn(self) -> u16 {
        self.0 & 0x0FFF
    }
}

impl From<u16> for Opcode {
    fn from(raw: u16) -> Self {
        Opcode(raw)
    }
}

impl fmt::Debug for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opcode({:04X})", self.0)
    }
}

impl fmt::UpperHex for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}
