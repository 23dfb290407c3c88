//! Keyboard button source for terminal environments.
//!
//! Terminals report presses (and auto-repeats), but most never report
//! releases. A key therefore counts as held from its last press or repeat
//! until a release event arrives or the hold timeout passes.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal;
use log::{debug, warn};

use crate::map::{map_key, should_quit};
use crate::source::ButtonSource;
use crate::types::{Button, ButtonState};

// Long enough to bridge the gap before key auto-repeat starts on most
// terminals, short enough that a tap does not read as a long press.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 150;

/// Held-state bookkeeping, independent of any terminal.
#[derive(Debug, Clone)]
pub struct KeyHold {
    last_press: [Option<Instant>; Button::ALL.len()],
    timeout: Duration,
}

impl KeyHold {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_millis(DEFAULT_KEY_RELEASE_TIMEOUT_MS))
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            last_press: [None; Button::ALL.len()],
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn press(&mut self, button: Button, now: Instant) {
        self.last_press[button as usize] = Some(now);
    }

    pub fn release(&mut self, button: Button) {
        self.last_press[button as usize] = None;
    }

    /// Buttons still held at `now`. Expired holds are dropped.
    pub fn snapshot(&mut self, now: Instant) -> ButtonState {
        let mut state = ButtonState::empty();
        for button in Button::ALL {
            let slot = &mut self.last_press[button as usize];
            match *slot {
                Some(at) if now.saturating_duration_since(at) <= self.timeout => {
                    state.set(button, true);
                }
                Some(_) => *slot = None,
                None => {}
            }
        }
        state
    }

    pub fn reset(&mut self) {
        self.last_press = [None; Button::ALL.len()];
    }
}

impl Default for KeyHold {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads the controlling terminal's keyboard. Puts the terminal in raw
/// mode while alive.
pub struct KeyboardSource {
    hold: KeyHold,
    quit: bool,
}

impl KeyboardSource {
    pub fn open() -> anyhow::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self {
            hold: KeyHold::new(),
            quit: false,
        })
    }

    /// Drain every pending terminal event without blocking.
    fn drain(&mut self) -> anyhow::Result<()> {
        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            let now = Instant::now();
            match key.kind {
                KeyEventKind::Press => {
                    if should_quit(key) {
                        debug!("quit key pressed");
                        self.quit = true;
                        continue;
                    }
                    if let Some(button) = map_key(key.code) {
                        self.hold.press(button, now);
                    }
                }
                KeyEventKind::Repeat => {
                    if let Some(button) = map_key(key.code) {
                        self.hold.press(button, now);
                    }
                }
                KeyEventKind::Release => {
                    if let Some(button) = map_key(key.code) {
                        self.hold.release(button);
                    }
                }
            }
        }
        Ok(())
    }
}

impl ButtonSource for KeyboardSource {
    fn name(&self) -> &str {
        "keyboard"
    }

    fn sample(&mut self) -> ButtonState {
        if let Err(e) = self.drain() {
            warn!("keyboard read failed: {}", e);
            self.hold.reset();
        }
        self.hold.snapshot(Instant::now())
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}

impl Drop for KeyboardSource {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            warn!("failed to leave raw mode: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_is_held_until_timeout() {
        let mut hold = KeyHold::with_timeout(Duration::from_millis(50));
        let t0 = Instant::now();
        hold.press(Button::Left, t0);

        let s = hold.snapshot(t0 + Duration::from_millis(10));
        assert!(s.pressed(Button::Left));
        let s = hold.snapshot(t0 + Duration::from_millis(50));
        assert!(s.pressed(Button::Left));

        let s = hold.snapshot(t0 + Duration::from_millis(51));
        assert!(s.is_empty());
        // Stays released once expired
        let s = hold.snapshot(t0 + Duration::from_millis(10));
        assert!(s.is_empty());
    }

    #[test]
    fn test_repeat_extends_hold() {
        let mut hold = KeyHold::with_timeout(Duration::from_millis(50));
        let t0 = Instant::now();
        hold.press(Button::Up, t0);
        hold.press(Button::Up, t0 + Duration::from_millis(40));

        let s = hold.snapshot(t0 + Duration::from_millis(80));
        assert!(s.pressed(Button::Up));
    }

    #[test]
    fn test_release_event_clears_immediately() {
        let mut hold = KeyHold::new();
        let t0 = Instant::now();
        hold.press(Button::Confirm, t0);
        hold.press(Button::Right, t0);
        hold.release(Button::Confirm);

        let s = hold.snapshot(t0);
        assert!(!s.pressed(Button::Confirm));
        assert!(s.pressed(Button::Right));
    }

    #[test]
    fn test_default_timeout() {
        assert_eq!(KeyHold::new().timeout(), Duration::from_millis(150));
    }
}
