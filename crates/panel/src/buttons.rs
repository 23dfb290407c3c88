//! Joystick and side buttons on GPIO input lines (active low).

use embedded_hal::digital::InputPin;
use log::warn;

use crate::input::ButtonSource;
use crate::types::{Button, ButtonState};

/// BCM line offsets of the seven buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonPins {
    pub up: u8,
    pub down: u8,
    pub left: u8,
    pub right: u8,
    pub confirm: u8,
    pub action1: u8,
    pub action2: u8,
}

impl ButtonPins {
    pub fn pin(&self, button: Button) -> u8 {
        match button {
            Button::Up => self.up,
            Button::Down => self.down,
            Button::Left => self.left,
            Button::Right => self.right,
            Button::Confirm => self.confirm,
            Button::Action1 => self.action1,
            Button::Action2 => self.action2,
        }
    }
}

impl Default for ButtonPins {
    fn default() -> Self {
        Self {
            up: 17,
            down: 22,
            left: 27,
            right: 23,
            confirm: 4,
            action1: 6,
            action2: 5,
        }
    }
}

/// Reads every button line on each sample. A line reading low is pressed.
///
/// Pull-ups are expected to be configured by the platform (device tree or
/// firmware config).
pub struct GpioButtons<P: InputPin> {
    lines: Vec<(Button, P)>,
    read_failed: bool,
}

impl<P: InputPin> GpioButtons<P> {
    pub fn new(lines: Vec<(Button, P)>) -> Self {
        Self {
            lines,
            read_failed: false,
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

impl<P: InputPin> ButtonSource for GpioButtons<P> {
    fn name(&self) -> &str {
        "gpio"
    }

    fn sample(&mut self) -> ButtonState {
        let mut state = ButtonState::empty();
        for (button, line) in self.lines.iter_mut() {
            match line.is_low() {
                Ok(low) => state.set(*button, low),
                Err(e) => {
                    // Log the first failure only; a dead line would flood the log.
                    if !self.read_failed {
                        warn!("button read failed, treating as released: {:?}", e);
                        self.read_failed = true;
                    }
                }
            }
        }
        state
    }
}
