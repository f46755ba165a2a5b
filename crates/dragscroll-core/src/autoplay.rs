//! Repeating auto-advance timer
//!
//! The timer is a single deadline that is cleared before every re-arm, so two
//! intervals never overlap. Hovering pauses it; leaving resumes it.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Default)]
pub struct Autoplay {
    interval: Option<Duration>,
    deadline: Option<Instant>,
    paused: bool,
}

impl Autoplay {
    /// `seconds <= 0` disables autoplay
    pub fn new(seconds: f64) -> Self {
        let mut autoplay = Self::default();
        autoplay.set_interval(seconds);
        autoplay
    }

    pub fn set_interval(&mut self, seconds: f64) {
        self.interval = (seconds.is_finite() && seconds > 0.0).then(|| Duration::from_secs_f64(seconds));
        if self.interval.is_none() {
            self.deadline = None;
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.interval.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Clear and re-arm one interval from `now`
    pub fn restart(&mut self, now: Instant) {
        self.deadline = self.interval.map(|interval| now + interval);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Pause if a timer is running
    pub fn pause(&mut self) {
        if self.deadline.take().is_some() {
            self.paused = true;
        }
    }

    /// Resume a paused timer; returns whether it was paused
    pub fn resume(&mut self, now: Instant) -> bool {
        if !self.paused {
            return false;
        }
        self.paused = false;
        self.restart(now);
        true
    }

    /// Consume the deadline if it has passed, re-arming for the next interval
    pub fn fire_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(at) if now >= at => {
                self.restart(now);
                true
            }
            _ => false,
        }
    }
}

/// Slide the next tick should go to, wrapping to 0 at the end
pub fn next_autoplay_slide(current: usize, slides_per_view: usize, slide_count: usize) -> usize {
    if current + slides_per_view < slide_count {
        current + 1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_after_last_full_view() {
        let visited: Vec<usize> = std::iter::successors(Some(0), |&c| Some(next_autoplay_slide(c, 1, 5)))
            .take(7)
            .collect();
        assert_eq!(visited, vec![0, 1, 2, 3, 4, 0, 1]);

        // two per view over 5 slides stops at index 3
        assert_eq!(next_autoplay_slide(2, 2, 5), 3);
        assert_eq!(next_autoplay_slide(3, 2, 5), 0);
    }

    #[test]
    fn test_disabled_never_arms() {
        let mut autoplay = Autoplay::new(0.0);
        autoplay.restart(Instant::now());
        assert!(!autoplay.is_enabled());
        assert!(!autoplay.is_armed());
    }

    #[test]
    fn test_fire_due_rearms() {
        let t0 = Instant::now();
        let mut autoplay = Autoplay::new(2.0);
        autoplay.restart(t0);
        assert!(!autoplay.fire_due(t0 + Duration::from_millis(1999)));
        assert!(autoplay.fire_due(t0 + Duration::from_secs(2)));
        assert_eq!(autoplay.deadline(), Some(t0 + Duration::from_secs(4)));
    }

    #[test]
    fn test_pause_and_resume() {
        let t0 = Instant::now();
        let mut autoplay = Autoplay::new(1.0);

        // nothing running: pause is a no-op
        autoplay.pause();
        assert!(!autoplay.is_paused());

        autoplay.restart(t0);
        autoplay.pause();
        assert!(autoplay.is_paused());
        assert!(!autoplay.is_armed());
        assert!(!autoplay.fire_due(t0 + Duration::from_secs(5)));

        assert!(autoplay.resume(t0 + Duration::from_secs(5)));
        assert_eq!(autoplay.deadline(), Some(t0 + Duration::from_secs(6)));
        assert!(!autoplay.resume(t0 + Duration::from_secs(6)));
    }

    #[test]
    fn test_disabling_clears_deadline() {
        let mut autoplay = Autoplay::new(1.0);
        autoplay.restart(Instant::now());
        autoplay.set_interval(0.0);
        assert!(!autoplay.is_armed());
    }
}
