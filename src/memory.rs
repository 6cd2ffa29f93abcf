use crate::error::{Chip8Error, Result};
use std::io;

// NB. addresses are u16 as per the chip-8; lengths are usize to stop endless casting

/// how much RAM we have
pub const RAM_SIZE_BYTES: usize = 4096;

/// every address is truncated to 12 bits before touching RAM
pub const ADDRESS_MASK: u16 = 0x0FFF;

/// where the program is loaded
pub const PROGRAM_ADDR: u16 = 0x0200;

/// most program we can load: everything from 0x200 to the top of RAM
pub const PROGRAM_CAPACITY: usize = RAM_SIZE_BYTES - PROGRAM_ADDR as usize;

/// where the hex font lives, in the interpreter area
pub const FONT_ADDR: u16 = 0x0000;

/// each font glyph is 5 rows of 8 pixels
pub const FONT_GLYPH_BYTES: u16 = 5;

/// Represents byte-addressable memory. Implementors only supply the masked
/// single-byte accessors; the rest is built on those so that nothing can
/// index outside the 12-bit address space.
pub trait MemoryMap {
    /// read a byte; `addr` is masked to 12 bits
    fn read_byte(&self, addr: u16) -> u8;

    /// write a byte; `addr` is masked to 12 bits
    fn write_byte(&mut self, addr: u16, value: u8);

    /// write a chunk of bytes, wrapping at the top of RAM
    fn write(&mut self, data: &[u8], addr: u16) {
        for (offset, byte) in data.iter().enumerate() {
            self.write_byte(addr.wrapping_add(offset as u16), *byte);
        }
    }

    /// fill `buf` from consecutive addresses, wrapping at the top of RAM
    fn read_into(&self, addr: u16, buf: &mut [u8]) {
        for (offset, byte) in buf.iter_mut().enumerate() {
            *byte = self.read_byte(addr.wrapping_add(offset as u16));
        }
    }

    /// get a big-endian two-byte word (opcodes)
    fn get_word(&self, addr: u16) -> u16 {
        u16::from_be_bytes([self.read_byte(addr), self.read_byte(addr.wrapping_add(1))])
    }
}

/// Defines the CHIP-8 standard memory map, 4K configuration:
///   0x0000-0x004f  hex font (16 glyphs x 5 bytes)
///   0x0050-0x01ff  interpreter, unused
///   0x0200-0x0fff  program
///
/// stack, timers and display live outside RAM in this implementation
#[derive(Clone)]
pub struct Chip8MemoryMap {
    bytes: Box<[u8]>,
}

impl MemoryMap for Chip8MemoryMap {
    fn read_byte(&self, addr: u16) -> u8 {
        self.bytes[(addr & ADDRESS_MASK) as usize]
    }

    fn write_byte(&mut self, addr: u16, value: u8) {
        self.bytes[(addr & ADDRESS_MASK) as usize] = value;
    }
}

impl Chip8MemoryMap {
    /// initialises memory with the font baked into the interpreter area
    pub fn new() -> Self {
        let mut mm = Chip8MemoryMap {
            bytes: vec![0u8; RAM_SIZE_BYTES].into_boxed_slice(),
        };
        mm.write(&CHIP8_FONT, FONT_ADDR);
        mm
    }

    /// load a CHIP-8 program at 0x200, returning its length
    pub fn load_program(&mut self, reader: &mut impl io::Read) -> Result<usize> {
        let mut buf = Vec::new();
        let len = reader.read_to_end(&mut buf)?;
        if len > PROGRAM_CAPACITY {
            return Err(Chip8Error::ProgramTooLarge {
                size: len,
                capacity: PROGRAM_CAPACITY,
            });
        }
        self.write(&buf, PROGRAM_ADDR);
        Ok(len)
    }

    /// address of the glyph for the low nibble of `digit`
    pub fn font_glyph_addr(digit: u8) -> u16 {
        FONT_ADDR + u16::from(digit & 0x0F) * FONT_GLYPH_BYTES
    }
}

impl Default for Chip8MemoryMap {
    fn default() -> Self {
        Self::new()
    }
}

const CHIP8_FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
