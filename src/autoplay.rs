// Autoplay timer module
// Deadline-based periodic tick, polled by the event loop

use std::time::{Duration, Instant};

/// Shortest accepted autoplay interval in milliseconds
pub const MIN_INTERVAL_MS: u64 = 500;

/// Longest accepted autoplay interval in milliseconds
pub const MAX_INTERVAL_MS: u64 = 10_000;

/// Interval used until the host configures one
pub const DEFAULT_INTERVAL_MS: u64 = 2_000;

/// Whether `msec` is an acceptable autoplay interval
pub fn is_valid_interval(msec: u64) -> bool {
    (MIN_INTERVAL_MS..=MAX_INTERVAL_MS).contains(&msec)
}

/// Periodic autoplay schedule
///
/// `enabled` tracks whether the host asked for autoplay; `deadline` is only
/// set while ticks are actually pending, so hovering can pause the schedule
/// without forgetting that autoplay is on.
#[derive(Debug, Clone)]
pub struct Autoplay {
    interval: Duration,
    enabled: bool,
    deadline: Option<Instant>,
}

impl Default for Autoplay {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_INTERVAL_MS))
    }
}

impl Autoplay {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            enabled: false,
            deadline: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the period; a pending tick keeps its current deadline
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Enable autoplay and begin a fresh period
    pub fn start(&mut self, now: Instant) {
        self.enabled = true;
        self.deadline = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.enabled = false;
        self.deadline = None;
    }

    /// Suspend ticking without disabling autoplay
    pub fn pause(&mut self) {
        self.deadline = None;
    }

    /// Resume after `pause`; no-op unless autoplay is enabled
    pub fn resume(&mut self, now: Instant) {
        if self.enabled {
            self.deadline = Some(now + self.interval);
        }
    }

    /// Push a pending tick a full period away from `now`
    pub fn restart(&mut self, now: Instant) {
        if self.deadline.is_some() {
            self.deadline = Some(now + self.interval);
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// True while ticks are pending (enabled and not paused)
    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Consume a due tick and schedule the next one from `now`
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn interval_bounds_are_inclusive() {
        assert!(!is_valid_interval(499));
        assert!(is_valid_interval(500));
        assert!(is_valid_interval(10_000));
        assert!(!is_valid_interval(10_001));
    }

    #[test]
    fn fires_once_per_period() {
        let t0 = Instant::now();
        let mut autoplay = Autoplay::new(ms(1000));
        autoplay.start(t0);

        assert!(!autoplay.fire_if_due(t0 + ms(999)));
        assert!(autoplay.fire_if_due(t0 + ms(1000)));
        assert!(!autoplay.fire_if_due(t0 + ms(1500)));
        assert_eq!(autoplay.time_until_tick(t0 + ms(1500)), Some(ms(500)));
        assert!(autoplay.fire_if_due(t0 + ms(2000)));
    }

    #[test]
    fn stopped_timer_never_fires() {
        let t0 = Instant::now();
        let mut autoplay = Autoplay::default();
        assert!(!autoplay.fire_if_due(t0 + ms(60_000)));

        autoplay.start(t0);
        autoplay.stop();
        assert!(!autoplay.is_enabled());
        assert_eq!(autoplay.time_until_tick(t0), None);
        assert!(!autoplay.fire_if_due(t0 + ms(60_000)));
    }

    #[test]
    fn pause_and_resume_begin_a_fresh_period() {
        let t0 = Instant::now();
        let mut autoplay = Autoplay::new(ms(1000));
        autoplay.start(t0);

        autoplay.pause();
        assert!(autoplay.is_enabled());
        assert!(!autoplay.is_running());
        assert!(!autoplay.fire_if_due(t0 + ms(5000)));

        autoplay.resume(t0 + ms(5000));
        assert!(!autoplay.fire_if_due(t0 + ms(5900)));
        assert!(autoplay.fire_if_due(t0 + ms(6000)));
    }

    #[test]
    fn resume_does_not_enable_a_stopped_timer() {
        let t0 = Instant::now();
        let mut autoplay = Autoplay::default();
        autoplay.resume(t0);
        assert!(!autoplay.is_running());
    }

    #[test]
    fn restart_only_affects_pending_ticks() {
        let t0 = Instant::now();
        let mut autoplay = Autoplay::new(ms(1000));

        autoplay.restart(t0);
        assert!(!autoplay.is_running());

        autoplay.start(t0);
        autoplay.restart(t0 + ms(800));
        assert!(!autoplay.fire_if_due(t0 + ms(1000)));
        assert!(autoplay.fire_if_due(t0 + ms(1800)));
    }
}
