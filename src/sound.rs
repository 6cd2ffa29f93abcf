use beep::beep;
use std::error::Error;

/// makes the CHIP-8 buzz while the sound timer is running
pub trait Sound {
    fn beep(&mut self) -> Result<(), Box<dyn Error>>;
    fn stop(&mut self) -> Result<(), Box<dyn Error>>;
    fn is_beeping(&self) -> bool;

    /// start or stop the tone, touching the device only on a change
    fn set_tone(&mut self, on: bool) -> Result<(), Box<dyn Error>> {
        match (on, self.is_beeping()) {
            (true, false) => self.beep(),
            (false, true) => self.stop(),
            _ => Ok(()),
        }
    }
}

const SIMPLEBEEP_PITCH: u16 = 2093; // C

/// PC speaker
pub struct SimpleBeep {
    is_beeping: bool,
}

impl SimpleBeep {
    pub fn new() -> Self {
        SimpleBeep { is_beeping: false }
    }
}

impl Default for SimpleBeep {
    fn default() -> Self {
        Self::new()
    }
}

impl Sound for SimpleBeep {
    fn beep(&mut self) -> Result<(), Box<dyn Error>> {
        beep(SIMPLEBEEP_PITCH)?;
        self.is_beeping = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Box<dyn Error>> {
        beep(0)?;
        self.is_beeping = false;
        Ok(())
    }

    fn is_beeping(&self) -> bool {
        self.is_beeping
    }
}

/// silent; still tracks whether it would be beeping so tests can look
#[derive(Default)]
pub struct Mute {
    is_beeping: bool,
    pub starts: usize,
}

impl Mute {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Sound for Mute {
    fn beep(&mut self) -> Result<(), Box<dyn Error>> {
        self.is_beeping = true;
        self.starts += 1;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Box<dyn Error>> {
        self.is_beeping = false;
        Ok(())
    }

    fn is_beeping(&self) -> bool {
        self.is_beeping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_tone_only_acts_on_change() -> Result<(), Box<dyn Error>> {
        let mut m = Mute::new();
        m.set_tone(true)?;
        m.set_tone(true)?;
        assert!(m.is_beeping());
        assert_eq!(m.starts, 1);
        m.set_tone(false)?;
        assert!(!m.is_beeping());
        m.set_tone(true)?;
        assert_eq!(m.starts, 2);
        Ok(())
    }
}
