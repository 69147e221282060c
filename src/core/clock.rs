use std::time::Instant;

/// Wall-clock source for the animation driver
///
/// Only measures time; deciding what a delta means is left to the timer.
#[derive(Debug, Clone)]
pub struct Clock {
    last_tick: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
        }
    }

    /// Seconds since the previous tick; advances the clock
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.saturating_duration_since(self.last_tick);
        self.last_tick = now;
        delta.as_secs_f32()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_clock_measures_delta() {
        let mut clock = Clock::new();

        thread::sleep(Duration::from_millis(10));
        let delta = clock.tick();

        assert!(delta >= 0.009, "delta {} shorter than the sleep", delta);
        assert!(delta < 0.5);
    }

    #[test]
    fn test_clock_tick_restarts_interval() {
        let mut clock = Clock::new();
        thread::sleep(Duration::from_millis(20));
        clock.tick();

        // second delta only covers the time since the first tick
        assert!(clock.tick() < 0.015);
    }
}
