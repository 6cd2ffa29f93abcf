//! # interpreter
//!
//! The fetch/decode/execute engine plus the loop that drives it against the
//! outside world. One cycle is:
//!
//!  1. fetch the two bytes at the program counter
//!  2. decode them into an `Instruction` (fatal if there's no such thing)
//!  3. execute it against the `Machine`
//!  4. move the program counter on by 2, by 4 for a taken skip, or not at
//!     all if the instruction jumped or is waiting on a key
//!
//! Timers are not part of the cycle. They follow the wall clock: the loop
//! measures how long each cycle really took and feeds that into a
//! `TimerClock`, so they tick at 60Hz whatever `cycle_hz` is set to.
use crate::clock::TimerClock;
use crate::config::Config;
use crate::display::Display;
use crate::error::{Chip8Error, Result};
use crate::input::Input;
use crate::instruction::Instruction;
use crate::machine::Machine;
use crate::opcode::Opcode;
use crate::operations::{execute, Flow};
use crate::sound::Sound;
use log::{error, info, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io;
use std::time::{Duration, Instant};

pub struct Chip8Interpreter<'a> {
    machine: Machine,
    clock: TimerClock,
    rng: StdRng,
    display: &'a mut dyn Display,
    input: &'a mut dyn Input,
    sound: &'a mut dyn Sound,
    cycles: u64,
}

impl<'a> Chip8Interpreter<'a> {
    pub fn new(
        display: &'a mut dyn Display,
        input: &'a mut dyn Input,
        sound: &'a mut dyn Sound,
    ) -> Chip8Interpreter<'a> {
        Chip8Interpreter {
            machine: Machine::new(),
            clock: TimerClock::new(),
            rng: StdRng::from_entropy(),
            display,
            input,
            sound,
            cycles: 0,
        }
    }

    /// make Cxkk repeatable
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// load a chip8 program at 0x200
    pub fn load_program(&mut self, reader: &mut impl io::Read) -> Result<usize> {
        let len = self.machine.memory.load_program(reader)?;
        info!("loaded {} byte program", len);
        Ok(len)
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    pub fn machine_mut(&mut self) -> &mut Machine {
        &mut self.machine
    }

    /// cycles executed so far
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Execute exactly one instruction.
    pub fn step(&mut self) -> Result<Flow> {
        let op = Opcode::new(self.machine.fetch());
        trace!("{:03X}: {:04X}", self.machine.pc, op);

        let instruction = Instruction::decode(op)?;
        let flow = execute(instruction, &mut self.machine, &mut self.rng)?;
        self.machine.pc = flow.next_pc(self.machine.pc);
        self.cycles += 1;
        Ok(flow)
    }

    /// Account for `elapsed` wall time: tick the timers as many times as
    /// are due and keep the sound in line with the sound timer.
    pub fn advance_clock(&mut self, elapsed: Duration) -> Result<u32> {
        let ticks = self.clock.advance(elapsed);
        for _ in 0..ticks {
            self.machine.tick_timers();
        }
        self.sound
            .set_tone(self.machine.sound_active())
            .map_err(|e| Chip8Error::Audio(e.to_string()))?;
        Ok(ticks)
    }

    /// hand the frame to the display if it changed since it was last shown
    pub fn publish_frame(&mut self) -> Result<bool> {
        if !self.machine.draw_flag {
            return Ok(false);
        }
        self.display.draw(&self.machine.frame_buffer)?;
        self.machine.draw_flag = false;
        Ok(true)
    }

    /// refresh the keypad; true if the user wants to stop
    pub fn poll_input(&mut self) -> Result<bool> {
        let keys = self.input.poll_keys()?;
        self.machine.keypad.update(keys);
        Ok(self.input.quit_requested())
    }

    /// Run until the input asks to quit, `max_cycles` is reached or the
    /// program does something fatal. Returns the number of cycles run.
    /// A `seed` in the config reseeds the random number generator first.
    pub fn run(&mut self, config: &Config) -> Result<u64> {
        if let Some(seed) = config.seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        let period = config.cycle_period();
        let first_cycle = self.cycles;
        let mut last = Instant::now();
        info!("running at {}Hz", config.cycle_hz);

        loop {
            let ran = self.cycles - first_cycle;
            if matches!(config.max_cycles, Some(max) if ran >= max) {
                info!("stopping after {} cycles", ran);
                break;
            }

            let cycle_start = Instant::now();
            if self.poll_input()? {
                info!("quit requested after {} cycles", ran);
                break;
            }

            if let Err(e) = self.step() {
                error!("halted at 0x{:03X}: {}", self.machine.pc, e);
                return Err(e);
            }

            let now = Instant::now();
            self.advance_clock(now - last)?;
            last = now;
            self.publish_frame()?;

            let busy = cycle_start.elapsed();
            if busy < period {
                spin_sleep::sleep(period - busy);
            }
        }
        Ok(self.cycles - first_cycle)
    }
}
