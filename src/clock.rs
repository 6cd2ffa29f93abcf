use std::time::Duration;

/// rate the delay and sound timers count down at
pub const TIMER_HZ: u32 = 60;

/// one timer tick, rounded down to the nanosecond
pub const TIMER_PERIOD: Duration = Duration::from_nanos(1_000_000_000 / TIMER_HZ as u64);

/// # TimerClock
/// Turns elapsed wall time into 60Hz timer ticks, however fast or slow the
/// instructions in between happen to run. Time that doesn't make up a whole
/// tick is carried over to the next call.
#[derive(Copy, Clone, Debug, Default)]
pub struct TimerClock {
    carry: Duration,
}

impl TimerClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// add `elapsed` and return how many whole ticks are now due
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.carry += elapsed;
        let mut ticks = 0;
        while self.carry >= TIMER_PERIOD {
            self.carry -= TIMER_PERIOD;
            ticks += 1;
        }
        ticks
    }

    /// time accumulated towards the next tick
    pub fn pending(&self) -> Duration {
        self.carry
    }
}
