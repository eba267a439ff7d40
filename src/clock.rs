/// Round countdown in whole seconds.
///
/// The clock has no time source of its own: whoever drives the game calls
/// `tick` once per elapsed second. Reaching zero is terminal until `reset`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundClock {
    duration: u32,
    remaining: u32,
}

/// Result of a single clock tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tick {
    pub remaining: u32,
    /// `true` once the clock has reached zero, on this tick or earlier.
    pub expired: bool,
    /// `true` only on the tick that took the clock to zero.
    pub just_expired: bool,
}

impl RoundClock {
    /// A full clock of `duration` seconds.
    pub fn new(duration: u32) -> Self {
        RoundClock {
            duration,
            remaining: duration,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// Removes one second. An expired clock stays at zero.
    ///
    /// # Examples
    /// ```
    /// use match3::clock::RoundClock;
    /// let mut clock = RoundClock::new(2);
    /// assert!(!clock.tick().expired);
    /// let last = clock.tick();
    /// assert!(last.expired && last.just_expired);
    /// let after = clock.tick();
    /// assert!(after.expired && !after.just_expired);
    /// ```
    pub fn tick(&mut self) -> Tick {
        let was_running = self.remaining > 0;
        self.remaining = self.remaining.saturating_sub(1);
        Tick {
            remaining: self.remaining,
            expired: self.remaining == 0,
            just_expired: was_running && self.remaining == 0,
        }
    }

    /// Restores the full duration.
    pub fn reset(&mut self) {
        self.remaining = self.duration;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sixty_ticks_expire_clock() {
        let mut clock = RoundClock::new(60);
        for i in 1..60 {
            let tick = clock.tick();
            assert_eq!(tick.remaining, 60 - i);
            assert!(!tick.expired);
        }
        let last = clock.tick();
        assert_eq!(last.remaining, 0);
        assert!(last.expired);
        assert!(last.just_expired);
        assert!(clock.is_expired());
    }

    #[test]
    fn test_expired_clock_stays_at_zero() {
        let mut clock = RoundClock::new(1);
        clock.tick();
        let again = clock.tick();
        assert_eq!(again.remaining, 0);
        assert!(again.expired);
        assert!(!again.just_expired);
    }

    #[test]
    fn test_reset_restores_duration() {
        let mut clock = RoundClock::new(5);
        for _ in 0..5 {
            clock.tick();
        }
        clock.reset();
        assert_eq!(clock.remaining(), 5);
        assert_eq!(clock.duration(), 5);
        assert!(!clock.is_expired());
    }
}
