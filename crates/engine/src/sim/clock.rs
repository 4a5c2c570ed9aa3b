use std::time::Duration;

/// Countdown driven by explicit time deltas. Only time fed while running
/// counts, so the accumulated active time is exactly the sum of the running
/// intervals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownClock {
    time_limit: Duration,
    active_elapsed: Duration,
    started: bool,
    running: bool,
}

impl CountdownClock {
    pub fn new(time_limit: Duration) -> Self {
        Self {
            time_limit,
            active_elapsed: Duration::ZERO,
            started: false,
            running: false,
        }
    }

    /// Starts the clock. Only the first call has any effect.
    pub fn start(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        self.running = true;
        true
    }

    pub fn pause(&mut self) -> bool {
        let was_running = self.running;
        self.running = false;
        was_running
    }

    pub fn resume(&mut self) -> bool {
        if !self.started || self.running {
            return false;
        }
        self.running = true;
        true
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn advance(&mut self, dt: Duration) {
        if self.running {
            self.active_elapsed = self.active_elapsed.saturating_add(dt);
        }
    }

    pub fn active_elapsed(&self) -> Duration {
        self.active_elapsed
    }

    /// Whole seconds left: the limit minus the whole seconds elapsed, floored
    /// at zero.
    pub fn remaining_seconds(&self) -> u64 {
        self.time_limit
            .as_secs()
            .saturating_sub(self.active_elapsed.as_secs())
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_seconds() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unstarted_clock_ignores_time() {
        let mut clock = CountdownClock::new(Duration::from_secs(300));
        clock.advance(Duration::from_secs(5));
        assert_eq!(clock.active_elapsed(), Duration::ZERO);
        assert_eq!(clock.remaining_seconds(), 300);
    }

    #[test]
    fn start_only_takes_effect_once() {
        let mut clock = CountdownClock::new(Duration::from_secs(300));
        assert!(clock.start());
        clock.advance(Duration::from_secs(2));
        clock.pause();
        assert!(!clock.start());
        assert!(!clock.is_running());
        assert_eq!(clock.active_elapsed(), Duration::from_secs(2));
    }

    #[test]
    fn paused_intervals_are_excluded() {
        let mut clock = CountdownClock::new(Duration::from_secs(300));
        clock.start();
        clock.advance(Duration::from_millis(1500));
        assert!(clock.pause());
        clock.advance(Duration::from_secs(40));
        assert!(clock.resume());
        clock.advance(Duration::from_millis(500));

        assert_eq!(clock.active_elapsed(), Duration::from_secs(2));
        assert_eq!(clock.remaining_seconds(), 298);
    }

    #[test]
    fn partial_seconds_do_not_reduce_remaining() {
        let mut clock = CountdownClock::new(Duration::from_secs(300));
        clock.start();
        clock.advance(Duration::from_millis(999));
        assert_eq!(clock.remaining_seconds(), 300);
        clock.advance(Duration::from_millis(1));
        assert_eq!(clock.remaining_seconds(), 299);
    }

    #[test]
    fn remaining_floors_at_zero() {
        let mut clock = CountdownClock::new(Duration::from_secs(3));
        clock.start();
        clock.advance(Duration::from_secs(10));
        assert_eq!(clock.remaining_seconds(), 0);
        assert!(clock.is_expired());
    }

    #[test]
    fn resume_without_pause_is_a_no_op() {
        let mut clock = CountdownClock::new(Duration::from_secs(3));
        assert!(!clock.resume());
        clock.start();
        assert!(!clock.resume());
    }
}
