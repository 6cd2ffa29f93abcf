use crate::error::Result;
use crate::instruction::Instruction;
use crate::machine::{Machine, VF};
use crate::memory::Chip8MemoryMap;
use log::debug;
use rand::Rng;

/// What the interpreter should do with the program counter once an
/// instruction has run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    /// step over this instruction
    Next,
    /// step over this instruction and the one after it
    Skip,
    /// the handler already set the program counter
    Jumped,
    /// stay on this instruction and run it again next cycle
    Wait,
}

impl Flow {
    fn skip_if(condition: bool) -> Self {
        if condition {
            Flow::Skip
        } else {
            Flow::Next
        }
    }

    /// program counter after an instruction at `pc` finished with this flow
    pub fn next_pc(self, pc: u16) -> u16 {
        match self {
            Flow::Next => pc.wrapping_add(2),
            Flow::Skip => pc.wrapping_add(4),
            Flow::Jumped | Flow::Wait => pc,
        }
    }
}

/// Run one decoded instruction against the machine. The program counter
/// still points at the instruction itself while this runs.
pub fn execute<R: Rng>(instruction: Instruction, m: &mut Machine, rng: &mut R) -> Result<Flow> {
    use Instruction::*;

    let flow = match instruction {
        // control flow
        Sys { addr } => {
            debug!("ignoring machine-code call to 0x{:03X}", addr);
            Flow::Next
        }
        Cls => {
            m.frame_buffer.clear();
            m.draw_flag = true;
            Flow::Next
        }
        Ret => {
            // back onto the CALL; the normal advance steps past it
            m.pc = m.pop_return()?;
            Flow::Next
        }
        Jp { addr } => {
            m.pc = addr;
            Flow::Jumped
        }
        Call { addr } => {
            m.push_return(m.pc)?;
            m.pc = addr;
            Flow::Jumped
        }
        JpV0 { addr } => {
            m.pc = addr + u16::from(m.v[0x0]);
            Flow::Jumped
        }

        // skips
        SeByte { x, kk } => Flow::skip_if(m.v[x] == kk),
        SneByte { x, kk } => Flow::skip_if(m.v[x] != kk),
        SeReg { x, y } => Flow::skip_if(m.v[x] == m.v[y]),
        SneReg { x, y } => Flow::skip_if(m.v[x] != m.v[y]),
        Skp { x } => Flow::skip_if(m.keypad.is_pressed(m.v[x])),
        Sknp { x } => Flow::skip_if(!m.keypad.is_pressed(m.v[x])),

        // arithmetic and logic
        LdByte { x, kk } => set(m, x, kk),
        AddByte { x, kk } => {
            let sum = m.v[x].wrapping_add(kk);
            set(m, x, sum)
        }
        LdReg { x, y } => {
            let vy = m.v[y];
            set(m, x, vy)
        }
        Or { x, y } => {
            let res = m.v[x] | m.v[y];
            set(m, x, res)
        }
        And { x, y } => {
            let res = m.v[x] & m.v[y];
            set(m, x, res)
        }
        Xor { x, y } => {
            let res = m.v[x] ^ m.v[y];
            set(m, x, res)
        }
        AddReg { x, y } => {
            let (res, carry) = m.v[x].overflowing_add(m.v[y]);
            set_with_flag(m, x, res, carry)
        }
        Sub { x, y } => {
            let (res, borrow) = m.v[x].overflowing_sub(m.v[y]);
            set_with_flag(m, x, res, !borrow)
        }
        Subn { x, y } => {
            let (res, borrow) = m.v[y].overflowing_sub(m.v[x]);
            set_with_flag(m, x, res, !borrow)
        }
        Shr { x } => {
            let lsb = m.v[x] & 0x01 == 0x01;
            let res = m.v[x] >> 1;
            set_with_flag(m, x, res, lsb)
        }
        Shl { x } => {
            let msb = m.v[x] & 0x80 == 0x80;
            let res = m.v[x] << 1;
            set_with_flag(m, x, res, msb)
        }
        Rnd { x, kk } => {
            let byte: u8 = rng.gen();
            set(m, x, byte & kk)
        }

        // memory and register transfer
        LdI { addr } => {
            m.i = addr;
            Flow::Next
        }
        AddI { x } => {
            m.i = (m.i + u16::from(m.v[x])) & 0x0FFF;
            Flow::Next
        }
        LdFont { x } => {
            m.i = Chip8MemoryMap::font_glyph_addr(m.v[x]);
            Flow::Next
        }
        Bcd { x } => {
            let value = m.v[x];
            let digits = [value / 100, value / 10 % 10, value % 10];
            for (offset, digit) in digits.iter().enumerate() {
                m.write_memory(m.i.wrapping_add(offset as u16), *digit);
            }
            Flow::Next
        }
        StoreRegs { x } => {
            for r in 0..=x {
                m.write_memory(m.i.wrapping_add(r as u16), m.v[r]);
            }
            Flow::Next
        }
        LoadRegs { x } => {
            for r in 0..=x {
                m.v[r] = m.read_memory(m.i.wrapping_add(r as u16));
            }
            Flow::Next
        }

        // timers
        LdVxDt { x } => {
            let dt = m.delay_timer;
            set(m, x, dt)
        }
        LdDtVx { x } => {
            m.delay_timer = m.v[x];
            Flow::Next
        }
        LdStVx { x } => {
            m.sound_timer = m.v[x];
            Flow::Next
        }

        // display and input
        Drw { x, y, n } => draw(m, x, y, n),
        LdVxKey { x } => await_key(m, x),
    };
    Ok(flow)
}

/// Vx = value
fn set(m: &mut Machine, x: usize, value: u8) -> Flow {
    m.v[x] = value;
    Flow::Next
}

/// Vx = value, then VF = flag; the flag wins when x is F
fn set_with_flag(m: &mut Machine, x: usize, value: u8, flag: bool) -> Flow {
    m.v[x] = value;
    m.v[VF] = u8::from(flag);
    Flow::Next
}

/// XOR an n-row sprite from memory[I..I+n] onto the screen at (Vx, Vy).
/// VF = 1 if any lit pixel was switched off.
fn draw(m: &mut Machine, x: usize, y: usize, n: u8) -> Flow {
    let (origin_x, origin_y) = (m.v[x] as usize, m.v[y] as usize);
    let mut collision = false;
    for row in 0..n {
        let sprite_row = m.read_memory(m.i.wrapping_add(u16::from(row)));
        collision |= m
            .frame_buffer
            .xor_row(origin_x, origin_y + row as usize, sprite_row);
    }
    m.v[VF] = u8::from(collision);
    m.draw_flag = true;
    Flow::Next
}

/// Fx0A: hold the program counter until a key goes down
fn await_key(m: &mut Machine, x: usize) -> Flow {
    match m.keypad.newly_pressed() {
        Some(key) => {
            debug!("V{:X} <- key {:X}", x, key);
            m.awaiting_key = None;
            set(m, x, key)
        }
        None => {
            if m.awaiting_key.is_none() {
                debug!("waiting on a key for V{:X}", x);
                m.awaiting_key = Some(x);
            }
            Flow::Wait
        }
    }
}
