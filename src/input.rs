use crate::keypad::{KeySnapshot, KEY_COUNT};
use crossterm::event::{poll, read, Event, KeyCode, KeyModifiers};
use crossterm::terminal;
use log::{debug, warn};
use std::collections::HashMap;
use std::io;
use std::time::{Duration, Instant};

/// map of keys on the left-hand side of a qwerty keyboard to the hex keypad
/// ```text
/// |1|2|3|4|      |1|2|3|C|
/// |Q|W|E|R|  ->  |4|5|6|D|
/// |A|S|D|F|  ->  |7|8|9|E|
/// |Z|X|C|V|      |A|0|B|F|
/// ```
const CHIP8_CONVENTIONAL_KEYMAP: [(char, u8); 16] = [
    ('x', 0x00),
    ('1', 0x01),
    ('2', 0x02),
    ('3', 0x03),
    ('q', 0x04),
    ('w', 0x05),
    ('e', 0x06),
    ('a', 0x07),
    ('s', 0x08),
    ('d', 0x09),
    ('z', 0x0a),
    ('c', 0x0b),
    ('4', 0x0c),
    ('r', 0x0d),
    ('f', 0x0e),
    ('v', 0x0f),
];

/// reads keypresses
pub trait Input {
    /// which of the 16 keys are down right now
    fn poll_keys(&mut self) -> Result<KeySnapshot, io::Error>;

    /// whether the user has asked to stop
    fn quit_requested(&self) -> bool;
}

/// Keys are held for a fixed time after each press, since a terminal
/// reports presses (and repeats) but never releases.
struct HeldKeys {
    until: [Option<Instant>; KEY_COUNT],
    hold: Duration,
}

impl HeldKeys {
    fn new(hold: Duration) -> Self {
        HeldKeys {
            until: [None; KEY_COUNT],
            hold,
        }
    }

    fn press(&mut self, key: u8, now: Instant) {
        self.until[key as usize] = Some(now + self.hold);
    }

    fn snapshot(&self, now: Instant) -> KeySnapshot {
        let mut keys = [false; KEY_COUNT];
        for (down, until) in keys.iter_mut().zip(self.until.iter()) {
            *down = matches!(until, Some(t) if *t > now);
        }
        keys
    }
}

/// terminal keyboard, read through crossterm in raw mode
pub struct StdinInput {
    keymap: HashMap<char, u8>,
    held: HeldKeys,
    quit: bool,
}

impl StdinInput {
    pub fn new(hold: Duration) -> Result<Self, io::Error> {
        terminal::enable_raw_mode()?;
        Ok(StdinInput {
            keymap: HashMap::from(CHIP8_CONVENTIONAL_KEYMAP),
            held: HeldKeys::new(hold),
            quit: false,
        })
    }

    fn read_stdin(&mut self) -> Result<(), io::Error> {
        while poll(Duration::from_millis(0))? {
            if let Event::Key(evt) = read()? {
                match evt.code {
                    KeyCode::Esc => self.quit = true,
                    KeyCode::Char('c') if evt.modifiers.contains(KeyModifiers::CONTROL) => {
                        self.quit = true
                    }
                    KeyCode::Char(key) => match self.keymap.get(&key.to_ascii_lowercase()) {
                        Some(mapped_key) => self.held.press(*mapped_key, Instant::now()),
                        None => debug!("can't map {:?} to a CHIP-8 key", key),
                    },
                    other => debug!("ignoring key {:?}", other),
                }
            }
        }
        Ok(())
    }
}

impl Drop for StdinInput {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            warn!("couldn't leave raw mode: {}", e);
        }
    }
}

impl Input for StdinInput {
    fn poll_keys(&mut self) -> Result<KeySnapshot, io::Error> {
        self.read_stdin()?;
        Ok(self.held.snapshot(Instant::now()))
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}

/// dummy Input implementation for testing; replays snapshots in order,
/// repeating the last one, then asks to quit once they run out if told to
pub struct DummyInput {
    script: Vec<KeySnapshot>,
    polls: usize,
    quit_after: Option<usize>,
}

impl DummyInput {
    /// always reports the given keys as held
    pub fn new(keys: &[u8]) -> Self {
        let mut snapshot = [false; KEY_COUNT];
        for k in keys {
            snapshot[(*k & 0x0F) as usize] = true;
        }
        DummyInput {
            script: vec![snapshot],
            polls: 0,
            quit_after: None,
        }
    }

    pub fn scripted(script: Vec<KeySnapshot>) -> Self {
        DummyInput {
            script,
            polls: 0,
            quit_after: None,
        }
    }

    /// request a quit once `polls` snapshots have been handed out
    pub fn quit_after(mut self, polls: usize) -> Self {
        self.quit_after = Some(polls);
        self
    }
}

impl Input for DummyInput {
    fn poll_keys(&mut self) -> Result<KeySnapshot, io::Error> {
        let snapshot = match self.script.get(self.polls) {
            Some(s) => *s,
            None => self.script.last().copied().unwrap_or([false; KEY_COUNT]),
        };
        self.polls += 1;
        Ok(snapshot)
    }

    fn quit_requested(&self) -> bool {
        matches!(self.quit_after, Some(n) if self.polls >= n)
    }
}
