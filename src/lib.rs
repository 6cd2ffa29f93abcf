//! # chip8vm
//!
//! A CHIP-8 virtual machine: the baseline instruction set running against
//! 4K of memory, sixteen 8-bit registers, a 16-deep call stack, two 60Hz
//! timers, a 64x32 monochrome screen and a 16-key hex keypad.
//!
//! ## Design
//!
//! * all machine state lives in one owned `Machine`; nothing is global, so
//!   several runs (or test fixtures) can exist side by side
//! * opcodes are immutable words; `x`, `y`, `n`, `kk` and `nnn` are views
//!   computed from them
//! * decoding is a match on the identifier nibble, with a second match on
//!   the low nibble or byte for groups 0, 8, E and F, producing a tagged
//!   `Instruction`; anything that falls through is fatal
//! * handlers report what should happen to the program counter (`Flow`)
//!   rather than each one bumping it
//! * timers follow wall time through an accumulator, not the instruction
//!   count, so emulated timing doesn't depend on host speed
//! * display, input and audio sit behind traits so the interpreter doesn't
//!   need to know how they work; dummy versions exist for testing
//!
//! Model
//!
//! ```text
//! main
//!  |-- config (command line)
//!  |-- display, input, sound
//!  `-- interpreter(display, input, sound)
//!       |-- machine: memory, registers, stack, timers, frame buffer, keypad
//!       |-- timer clock
//!       `-- run loop
//!            |-- keypad <- input.poll_keys()
//!            |-- step(): fetch, decode, execute, advance pc
//!            |-- advance_clock(elapsed): tick timers, sound on/off
//!            |-- display.draw(frame) if it changed
//!            `-- sleep out the rest of the cycle
//! ```
pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod framebuffer;
pub mod input;
pub mod instruction;
pub mod interpreter;
pub mod keypad;
pub mod machine;
pub mod memory;
pub mod opcode;
pub mod operations;
pub mod sound;

pub use config::Config;
pub use error::{Chip8Error, Result};
pub use interpreter::Chip8Interpreter;
