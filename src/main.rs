use std::error::Error;
use std::fs::File;
use std::path::PathBuf;

use chip8vm::config::{DEFAULT_CYCLE_HZ, DEFAULT_KEY_HOLD_MS};
use chip8vm::display::MonoTermDisplay;
use chip8vm::input::StdinInput;
use chip8vm::sound::{Mute, SimpleBeep, Sound};
use chip8vm::{Chip8Interpreter, Config};
use clap::Parser;
use log::warn;

/// Run a CHIP-8 program in the terminal. Keys 1234/QWER/ASDF/ZXCV are the
/// hex keypad; Esc quits.
#[derive(Parser, Debug)]
#[command(name = "chip8vm", version, about)]
struct Args {
    /// program image to load at 0x200
    rom: PathBuf,

    /// instructions per second
    #[arg(long, default_value_t = DEFAULT_CYCLE_HZ, value_parser = clap::value_parser!(u32).range(1..))]
    hz: u32,

    /// stop after this many instructions
    #[arg(long)]
    cycles: Option<u64>,

    /// seed for the random number instruction
    #[arg(long)]
    seed: Option<u64>,

    /// don't use the PC speaker
    #[arg(long)]
    mute: bool,

    /// how long a key press counts as held, in milliseconds
    #[arg(long, default_value_t = DEFAULT_KEY_HOLD_MS)]
    key_hold_ms: u64,
}

impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        Config {
            cycle_hz: args.hz,
            max_cycles: args.cycles,
            seed: args.seed,
            mute: args.mute,
            key_hold_ms: args.key_hold_ms,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    let config = Config::from(&args);

    // open the program before touching the terminal so a bad path is
    // reported plainly
    let mut f = File::open(&args.rom)?;

    let mut sound: Box<dyn Sound> = if config.mute {
        Box::new(Mute::new())
    } else {
        Box::new(SimpleBeep::new())
    };

    let outcome = {
        let mut display = MonoTermDisplay::new()?;
        let mut input = StdinInput::new(config.key_hold())?;
        let mut interpreter = Chip8Interpreter::new(&mut display, &mut input, sound.as_mut());
        interpreter
            .load_program(&mut f)
            .and_then(|_| interpreter.run(&config))
    };
    // display and input are dropped by now, so the terminal is back to normal
    let cycles = finish(outcome, sound.as_mut())?;
    println!("ran {} cycles", cycles);
    Ok(())
}

/// Silence the speaker and hand back the run's own result. A speaker that
/// won't stop is only worth a warning.
fn finish(outcome: chip8vm::Result<u64>, sound: &mut dyn Sound) -> chip8vm::Result<u64> {
    if let Err(e) = sound.set_tone(false) {
        warn!("couldn't stop the beeper: {}", e);
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use chip8vm::Chip8Error;

    /// starts fine, then refuses to stop
    struct StuckBeep {
        is_beeping: bool,
    }

    impl Sound for StuckBeep {
        fn beep(&mut self) -> Result<(), Box<dyn Error>> {
            self.is_beeping = true;
            Ok(())
        }

        fn stop(&mut self) -> Result<(), Box<dyn Error>> {
            Err("device busy".into())
        }

        fn is_beeping(&self) -> bool {
            self.is_beeping
        }
    }

    #[test]
    fn test_finish_keeps_run_error_when_beeper_fails() {
        let mut sound = StuckBeep { is_beeping: true };
        let outcome = finish(Err(Chip8Error::StackOverflow(0x200)), &mut sound);
        assert!(matches!(outcome, Err(Chip8Error::StackOverflow(0x200))));
    }

    #[test]
    fn test_finish_keeps_cycle_count_when_beeper_fails() {
        let mut sound = StuckBeep { is_beeping: true };
        assert!(matches!(finish(Ok(42), &mut sound), Ok(42)));
    }

    #[test]
    fn test_finish_stops_the_tone() {
        let mut sound = Mute::new();
        sound.set_tone(true).unwrap();
        assert!(matches!(finish(Ok(1), &mut sound), Ok(1)));
        assert!(!sound.is_beeping());
    }

    #[test]
    fn test_seed_flag_reaches_config() {
        let args = Args::parse_from(["chip8vm", "game.ch8", "--seed", "7", "--mute"]);
        let config = Config::from(&args);
        assert_eq!(config.seed, Some(7));
        assert!(config.mute);
        assert_eq!(config.cycle_hz, DEFAULT_CYCLE_HZ);
    }
}
