use crate::error::{Chip8Error, Result};
use crate::opcode::Opcode;

/// # Instructions
/// The 35 instructions of the baseline CHIP-8 set with their operands
/// already pulled out of the opcode. `x` and `y` are register indices,
/// `kk` an immediate byte, `n` a nibble and `addr` a 12-bit address.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// 0nnn, a machine-code routine on the original hardware; ignored
    Sys { addr: u16 },
    /// 00E0
    Cls,
    /// 00EE
    Ret,
    /// 1nnn
    Jp { addr: u16 },
    /// 2nnn
    Call { addr: u16 },
    /// 3xkk
    SeByte { x: usize, kk: u8 },
    /// 4xkk
    SneByte { x: usize, kk: u8 },
    /// 5xy0
    SeReg { x: usize, y: usize },
    /// 6xkk
    LdByte { x: usize, kk: u8 },
    /// 7xkk
    AddByte { x: usize, kk: u8 },
    /// 8xy0
    LdReg { x: usize, y: usize },
    /// 8xy1
    Or { x: usize, y: usize },
    /// 8xy2
    And { x: usize, y: usize },
    /// 8xy3
    Xor { x: usize, y: usize },
    /// 8xy4
    AddReg { x: usize, y: usize },
    /// 8xy5
    Sub { x: usize, y: usize },
    /// 8xy6
    Shr { x: usize },
    /// 8xy7
    Subn { x: usize, y: usize },
    /// 8xyE
    Shl { x: usize },
    /// 9xy0
    SneReg { x: usize, y: usize },
    /// Annn
    LdI { addr: u16 },
    /// Bnnn
    JpV0 { addr: u16 },
    /// Cxkk
    Rnd { x: usize, kk: u8 },
    /// Dxyn
    Drw { x: usize, y: usize, n: u8 },
    /// Ex9E
    Skp { x: usize },
    /// ExA1
    Sknp { x: usize },
    /// Fx07
    LdVxDt { x: usize },
    /// Fx0A
    LdVxKey { x: usize },
    /// Fx15
    LdDtVx { x: usize },
    /// Fx18
    LdStVx { x: usize },
    /// Fx1E
    AddI { x: usize },
    /// Fx29
    LdFont { x: usize },
    /// Fx33
    Bcd { x: usize },
    /// Fx55
    StoreRegs { x: usize },
    /// Fx65
    LoadRegs { x: usize },
}

impl Instruction {
    /// Selects the instruction for an opcode. The identifier nibble picks a
    /// group; groups 0, 8, E and F pick again on their low nibble or byte.
    pub fn decode(op: Opcode) -> Result<Self> {
        use Instruction::*;

        let (x, y, kk, addr) = (op.x(), op.y(), op.kk(), op.nnn());
        let instruction = match op.identifier() {
            0x0 => decode_system(op),
            0x1 => Some(Jp { addr }),
            0x2 => Some(Call { addr }),
            0x3 => Some(SeByte { x, kk }),
            0x4 => Some(SneByte { x, kk }),
            0x5 if op.n() == 0x0 => Some(SeReg { x, y }),
            0x6 => Some(LdByte { x, kk }),
            0x7 => Some(AddByte { x, kk }),
            0x8 => decode_alu(op),
            0x9 if op.n() == 0x0 => Some(SneReg { x, y }),
            0xA => Some(LdI { addr }),
            0xB => Some(JpV0 { addr }),
            0xC => Some(Rnd { x, kk }),
            0xD => Some(Drw { x, y, n: op.n() }),
            0xE => decode_key(op),
            0xF => decode_misc(op),
            _ => None,
        };
        instruction.ok_or(Chip8Error::UnknownInstruction(op.raw()))
    }
}

/// 00**
fn decode_system(op: Opcode) -> Option<Instruction> {
    match op.nnn() {
        0x0E0 => Some(Instruction::Cls),
        0x0EE => Some(Instruction::Ret),
        addr => Some(Instruction::Sys { addr }),
    }
}

/// 8xy*
fn decode_alu(op: Opcode) -> Option<Instruction> {
    use Instruction::*;

    let (x, y) = (op.x(), op.y());
    match op.n() {
        0x0 => Some(LdReg { x, y }),
        0x1 => Some(Or { x, y }),
        0x2 => Some(And { x, y }),
        0x3 => Some(Xor { x, y }),
        0x4 => Some(AddReg { x, y }),
        0x5 => Some(Sub { x, y }),
        0x6 => Some(Shr { x }),
        0x7 => Some(Subn { x, y }),
        0xE => Some(Shl { x }),
        _ => None,
    }
}

/// Ex**
fn decode_key(op: Opcode) -> Option<Instruction> {
    let x = op.x();
    match op.kk() {
        0x9E => Some(Instruction::Skp { x }),
        0xA1 => Some(Instruction::Sknp { x }),
        _ => None,
    }
}

/// Fx**
fn decode_misc(op: Opcode) -> Option<Instruction> {
    use Instruction::*;

    let x = op.x();
    match op.kk() {
        0x07 => Some(LdVxDt { x }),
        0x0A => Some(LdVxKey { x }),
        0x15 => Some(LdDtVx { x }),
        0x18 => Some(LdStVx { x }),
        0x1E => Some(AddI { x }),
        0x29 => Some(LdFont { x }),
        0x33 => Some(Bcd { x }),
        0x55 => Some(StoreRegs { x }),
        0x65 => Some(LoadRegs { x }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Instruction::*;

    fn decode(raw: u16) -> Instruction {
        Instruction::decode(Opcode::new(raw)).unwrap()
    }

    fn rejects(raw: u16) -> bool {
        matches!(
            Instruction::decode(Opcode::new(raw)),
            Err(Chip8Error::UnknownInstruction(op)) if op == raw
        )
    }

    #[test]
    fn test_decodes_every_instruction() {
        let table = [
            (0x0123, Sys { addr: 0x123 }),
            (0x00E0, Cls),
            (0x00EE, Ret),
            (0x1ABC, Jp { addr: 0xABC }),
            (0x2ABC, Call { addr: 0xABC }),
            (0x31FF, SeByte { x: 1, kk: 0xFF }),
            (0x41FF, SneByte { x: 1, kk: 0xFF }),
            (0x5120, SeReg { x: 1, y: 2 }),
            (0x6122, LdByte { x: 1, kk: 0x22 }),
            (0x7122, AddByte { x: 1, kk: 0x22 }),
            (0x8120, LdReg { x: 1, y: 2 }),
            (0x8121, Or { x: 1, y: 2 }),
            (0x8122, And { x: 1, y: 2 }),
            (0x8123, Xor { x: 1, y: 2 }),
            (0x8124, AddReg { x: 1, y: 2 }),
            (0x8125, Sub { x: 1, y: 2 }),
            (0x8126, Shr { x: 1 }),
            (0x8127, Subn { x: 1, y: 2 }),
            (0x812E, Shl { x: 1 }),
            (0x9120, SneReg { x: 1, y: 2 }),
            (0xAABC, LdI { addr: 0xABC }),
            (0xBABC, JpV0 { addr: 0xABC }),
            (0xC10F, Rnd { x: 1, kk: 0x0F }),
            (0xD125, Drw { x: 1, y: 2, n: 5 }),
            (0xE19E, Skp { x: 1 }),
            (0xE1A1, Sknp { x: 1 }),
            (0xF107, LdVxDt { x: 1 }),
            (0xF10A, LdVxKey { x: 1 }),
            (0xF115, LdDtVx { x: 1 }),
            (0xF118, LdStVx { x: 1 }),
            (0xF11E, AddI { x: 1 }),
            (0xF129, LdFont { x: 1 }),
            (0xF133, Bcd { x: 1 }),
            (0xF155, StoreRegs { x: 1 }),
            (0xF165, LoadRegs { x: 1 }),
        ];
        assert_eq!(table.len(), 35);
        for (raw, expected) in table {
            assert_eq!(decode(raw), expected, "decoding {:04X}", raw);
        }
    }

    #[test]
    fn test_system_calls_keep_their_address() {
        assert_eq!(decode(0x0000), Sys { addr: 0x000 });
        assert_eq!(decode(0x0FFF), Sys { addr: 0xFFF });
        // only the exact words are CLS and RET
        assert_eq!(decode(0x00E1), Sys { addr: 0x0E1 });
        assert_eq!(decode(0x01EE), Sys { addr: 0x1EE });
    }

    #[test]
    fn test_rejects_unknown_alu_op() {
        for n in [0x8, 0x9, 0xA, 0xB, 0xC, 0xD, 0xF] {
            assert!(rejects(0x8120 | n));
        }
    }

    #[test]
    fn test_rejects_register_compares_with_trailing_nibble() {
        assert!(rejects(0x5121));
        assert!(rejects(0x912F));
    }

    #[test]
    fn test_rejects_unknown_key_and_misc_ops() {
        assert!(rejects(0xE19F));
        assert!(rejects(0xF100));
        assert!(rejects(0xF175));
    }
}
