use std::time::Duration;

/// default instruction rate; most games are tuned for somewhere around here
pub const DEFAULT_CYCLE_HZ: u32 = 700;

/// default time a terminal key press counts as held
pub const DEFAULT_KEY_HOLD_MS: u64 = 150;

/// How a run should behave. Built from the command line by the binary, or
/// by hand when embedding the interpreter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// instructions per second
    pub cycle_hz: u32,
    /// stop after this many cycles
    pub max_cycles: Option<u64>,
    /// seed for Cxkk; fresh entropy when absent
    pub seed: Option<u64>,
    pub mute: bool,
    /// how long a key stays down after the terminal reports it
    pub key_hold_ms: u64,
}

impl Config {
    /// wall time one instruction should take; a zero rate runs unthrottled
    pub fn cycle_period(&self) -> Duration {
        match self.cycle_hz {
            0 => Duration::ZERO,
            hz => Duration::from_secs(1) / hz,
        }
    }

    pub fn key_hold(&self) -> Duration {
        Duration::from_millis(self.key_hold_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            cycle_hz: DEFAULT_CYCLE_HZ,
            max_cycles: None,
            seed: None,
            mute: false,
            key_hold_ms: DEFAULT_KEY_HOLD_MS,
        }
    }
}
