use std::io;
use thiserror::Error;

/// Everything that can stop the interpreter. None of these are recoverable:
/// the run halts and the condition is handed back to the caller.
#[derive(Debug, Error)]
pub enum Chip8Error {
    /// no handler for this opcode
    #[error("unknown instruction 0x{0:04X}")]
    UnknownInstruction(u16),

    /// CALL with all 16 stack slots in use; carries the return address
    #[error("stack overflow pushing return address 0x{0:03X}")]
    StackOverflow(u16),

    /// RET with nothing on the stack; carries the address of the RET
    #[error("stack underflow returning from 0x{0:03X}")]
    StackUnderflow(u16),

    #[error("program is {size} bytes but only {capacity} fit in memory")]
    ProgramTooLarge { size: usize, capacity: usize },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("audio device failed: {0}")]
    Audio(String),
}

pub type Result<T> = std::result::Result<T, Chip8Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_instruction_reports_raw_opcode() {
        let e = Chip8Error::UnknownInstruction(0x5AB1);
        assert_eq!(e.to_string(), "unknown instruction 0x5AB1");
    }

    #[test]
    fn test_io_errors_convert() {
        let e: Chip8Error = io::Error::new(io::ErrorKind::Other, "boom").into();
        assert!(matches!(e, Chip8Error::Io(_)));
    }
}
