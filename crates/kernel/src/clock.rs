use std::time::{Duration, Instant};

/// Baseline for render-side animation interpolation.
#[derive(Debug, Clone, Copy)]
pub struct AnimationClock {
    start: Instant,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Move the baseline to now.
    pub fn reset_start_time(&mut self) {
        self.start = Instant::now();
    }

    pub fn start_time(&self) -> Instant {
        self.start
    }

    /// Time elapsed since the baseline.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_moves_baseline_forward() {
        let mut clock = AnimationClock::new();
        let before = clock.start_time();
        std::thread::sleep(Duration::from_millis(2));
        clock.reset_start_time();
        assert!(clock.start_time() > before);
    }

    #[test]
    fn elapsed_grows() {
        let clock = AnimationClock::new();
        std::thread::sleep(Duration::from_millis(5));
        assert!(clock.elapsed() >= Duration::from_millis(5));
        assert!(clock.elapsed_ms() >= 5);
    }
}
