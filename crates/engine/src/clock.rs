//! Time source for the loop's fixed holds.

use std::time::Duration;

/// Blocks the loop for fixed durations.
pub trait Clock {
    fn sleep(&mut self, duration: Duration);
}

/// Real time: `std::thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Returns immediately and records every requested hold.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    sleeps: Vec<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every hold requested so far, in order
    pub fn sleeps(&self) -> &[Duration] {
        &self.sleeps
    }

    /// Sum of all holds: the simulated elapsed time
    pub fn elapsed(&self) -> Duration {
        self.sleeps.iter().sum()
    }

    pub fn clear(&mut self) {
        self.sleeps.clear();
    }
}

impl Clock for ManualClock {
    fn sleep(&mut self, duration: Duration) {
        self.sleeps.push(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_records() {
        let mut clock = ManualClock::new();
        clock.sleep(Duration::from_millis(120));
        clock.sleep(Duration::from_millis(50));
        assert_eq!(
            clock.sleeps(),
            &[Duration::from_millis(120), Duration::from_millis(50)]
        );
        assert_eq!(clock.elapsed(), Duration::from_millis(170));
        clock.clear();
        assert!(clock.sleeps().is_empty());
    }
}
