use crate::error::{Chip8Error, Result};
use crate::framebuffer::FrameBuffer;
use crate::keypad::Keypad;
use crate::memory::{Chip8MemoryMap, MemoryMap, PROGRAM_ADDR};
use log::debug;

/// how many return addresses fit on the stack
pub const STACK_DEPTH: usize = 16;

/// register used as the carry/borrow/collision flag
pub const VF: usize = 0xF;

/// # Machine
/// Everything a CHIP-8 program can observe:
///
/// Registers
/// - (v) 16 8-bit registers V0..VF; VF doubles as the flag register
/// - (i) the index register, a 12-bit address held in 16 bits
/// - (pc) address of the next instruction, starts at 0x200
///
/// Stack
/// - 16 return addresses plus a pointer to the next free slot
///
/// Timers
/// - delay and sound, both counting down at 60Hz while non-zero
///
/// I/O
/// - 4K of memory with the font at the bottom
/// - a 64x32 frame buffer
/// - the keypad as last reported by the input source
///
/// It has no behaviour of its own beyond keeping those invariants; the
/// interpreter does the work.
#[derive(Clone)]
pub struct Machine {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    stack: [u16; STACK_DEPTH],
    sp: usize,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub memory: Chip8MemoryMap,
    pub frame_buffer: FrameBuffer,
    /// set whenever the frame buffer changes; cleared when it is published
    pub draw_flag: bool,
    pub keypad: Keypad,
    /// register waiting on Fx0A, if any
    pub awaiting_key: Option<usize>,
}

impl Machine {
    pub fn new() -> Self {
        Machine {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_ADDR,
            stack: [0; STACK_DEPTH],
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            memory: Chip8MemoryMap::new(),
            frame_buffer: FrameBuffer::new(),
            draw_flag: false,
            keypad: Keypad::new(),
            awaiting_key: None,
        }
    }

    pub fn read_memory(&self, addr: u16) -> u8 {
        self.memory.read_byte(addr)
    }

    pub fn write_memory(&mut self, addr: u16, value: u8) {
        self.memory.write_byte(addr, value)
    }

    /// the opcode word at the program counter
    pub fn fetch(&self) -> u16 {
        self.memory.get_word(self.pc)
    }

    pub fn push_return(&mut self, addr: u16) -> Result<()> {
        if self.sp == STACK_DEPTH {
            return Err(Chip8Error::StackOverflow(addr));
        }
        self.stack[self.sp] = addr;
        self.sp += 1;
        debug!("push 0x{:03X}, depth {}", addr, self.sp);
        Ok(())
    }

    pub fn pop_return(&mut self) -> Result<u16> {
        if self.sp == 0 {
            return Err(Chip8Error::StackUnderflow(self.pc));
        }
        self.sp -= 1;
        let addr = self.stack[self.sp];
        debug!("pop 0x{:03X}, depth {}", addr, self.sp);
        Ok(addr)
    }

    pub fn stack_pointer(&self) -> usize {
        self.sp
    }

    /// the occupied part of the stack, oldest first
    pub fn stack(&self) -> &[u16] {
        &self.stack[..self.sp]
    }

    /// one 60Hz tick: both timers move one step towards zero
    pub fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }

    pub fn sound_active(&self) -> bool {
        self.sound_timer > 0
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let m = Machine::new();
        assert_eq!(m.pc, 0x200);
        assert_eq!(m.v, [0; 16]);
        assert_eq!(m.i, 0);
        assert_eq!(m.stack_pointer(), 0);
        assert_eq!((m.delay_timer, m.sound_timer), (0, 0));
        assert!(m.frame_buffer.is_blank());
    }

    #[test]
    fn test_push_then_pop() -> Result<()> {
        let mut m = Machine::new();
        m.push_return(0x300)?;
        m.push_return(0x400)?;
        assert_eq!(m.stack(), &[0x300, 0x400]);
        assert_eq!(m.pop_return()?, 0x400);
        assert_eq!(m.pop_return()?, 0x300);
        assert_eq!(m.stack_pointer(), 0);
        Ok(())
    }

    #[test]
    fn test_stack_overflow() -> Result<()> {
        let mut m = Machine::new();
        for n in 0..STACK_DEPTH as u16 {
            m.push_return(0x200 + n * 2)?;
        }
        assert!(matches!(
            m.push_return(0xABC),
            Err(Chip8Error::StackOverflow(0xABC))
        ));
        assert_eq!(m.stack_pointer(), STACK_DEPTH);
        Ok(())
    }

    #[test]
    fn test_stack_underflow() {
        let mut m = Machine::new();
        m.pc = 0x246;
        assert!(matches!(
            m.pop_return(),
            Err(Chip8Error::StackUnderflow(0x246))
        ));
        assert_eq!(m.stack_pointer(), 0);
    }

    #[test]
    fn test_fetch() {
        let mut m = Machine::new();
        m.write_memory(0x200, 0xAA);
        m.write_memory(0x201, 0xBB);
        assert_eq!(m.fetch(), 0xAABB);
    }

    #[test]
    fn test_timers_stop_at_zero() {
        let mut m = Machine::new();
        m.delay_timer = 1;
        m.sound_timer = 2;
        m.tick_timers();
        assert_eq!((m.delay_timer, m.sound_timer), (0, 1));
        assert!(m.sound_active());
        m.tick_timers();
        m.tick_timers();
        assert_eq!((m.delay_timer, m.sound_timer), (0, 0));
        assert!(!m.sound_active());
    }
}
