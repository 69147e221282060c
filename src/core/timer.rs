use std::time::Duration;

use log::debug;

/// Periodic animation tick
///
/// Accumulates frame deltas and reports how many fixed-interval ticks are due.
/// The first tick after `start` waits for the initial delay, and a single
/// update never reports more than `max_ticks` so a stalled window does not
/// burst through a backlog.
#[derive(Debug, Clone)]
pub struct AnimationTimer {
    interval: f32,
    initial_delay: f32,
    max_ticks: u32,
    until_next: f32,
    running: bool,
}

impl AnimationTimer {
    /// Create a stopped timer
    pub fn new(interval: Duration, initial_delay: Duration, max_ticks: u32) -> Self {
        let interval = interval.as_secs_f32().max(f32::EPSILON);
        let initial_delay = initial_delay.as_secs_f32();
        Self {
            interval,
            initial_delay,
            max_ticks: max_ticks.max(1),
            until_next: initial_delay,
            running: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Begin ticking; the first tick is due after the initial delay
    pub fn start(&mut self) {
        self.until_next = self.initial_delay;
        self.running = true;
        debug!("Animation timer started");
    }

    /// Stop ticking immediately; pending time is discarded
    pub fn stop(&mut self) {
        self.running = false;
        debug!("Animation timer stopped");
    }

    /// Advance by `delta` seconds, returning the number of ticks that fell due
    pub fn tick(&mut self, delta: f32) -> u32 {
        if !self.running {
            return 0;
        }

        self.until_next -= delta.max(0.0);

        let mut due = 0;
        while self.until_next <= 0.0 && due < self.max_ticks {
            due += 1;
            self.until_next += self.interval;
        }

        // drop whatever backlog the cap left over
        if self.until_next <= 0.0 {
            self.until_next = self.interval;
        }

        due
    }

    /// Time left until the next tick, or `None` while stopped
    pub fn time_until_next(&self) -> Option<Duration> {
        self.running
            .then(|| Duration::from_secs_f32(self.until_next.max(0.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer() -> AnimationTimer {
        AnimationTimer::new(Duration::from_millis(250), Duration::from_millis(500), 4)
    }

    #[test]
    fn test_stopped_timer_never_fires() {
        let mut timer = timer();
        assert!(!timer.is_running());
        assert_eq!(timer.tick(10.0), 0);
        assert_eq!(timer.time_until_next(), None);
    }

    #[test]
    fn test_first_tick_waits_for_initial_delay() {
        let mut timer = timer();
        timer.start();

        assert_eq!(timer.tick(0.25), 0);
        assert_eq!(timer.tick(0.25), 1);
        assert_eq!(timer.tick(0.125), 0);
        assert_eq!(timer.tick(0.125), 1);
    }

    #[test]
    fn test_large_delta_is_capped() {
        let mut timer = timer();
        timer.start();

        assert_eq!(timer.tick(100.0), 4);
        // backlog dropped: next tick a full interval away
        assert_eq!(timer.tick(0.125), 0);
        assert_eq!(timer.tick(0.125), 1);
    }

    #[test]
    fn test_stop_is_immediate_and_restart_rearms_delay() {
        let mut timer = timer();
        timer.start();
        assert_eq!(timer.tick(0.5), 1);

        timer.stop();
        assert_eq!(timer.tick(1.0), 0);

        timer.start();
        assert_eq!(timer.time_until_next(), Some(Duration::from_millis(500)));
        assert_eq!(timer.tick(0.25), 0);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let mut timer = AnimationTimer::new(Duration::ZERO, Duration::ZERO, 2);
        timer.start();
        assert_eq!(timer.tick(1.0), 2);
    }
}
