//! Elapsed game time, shown on the HUD

use super::Periodic;

/// Pausable counter of whole seconds
#[derive(Debug, Clone)]
pub struct Timer {
    current_seconds: u64,
    /// Ticks per second
    tps: f64,
    driver: Periodic,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new(crate::consts::CLOCK_TPS)
    }
}

impl Timer {
    /// Create a stopped timer at zero
    pub fn new(tps: f64) -> Self {
        Self {
            current_seconds: 0,
            tps,
            driver: Periodic::new(tps),
        }
    }

    /// Start ticking up from `now_ms`
    pub fn start(&mut self, now_ms: f64) {
        self.driver.start(now_ms);
    }

    /// Stop ticking until started again
    pub fn pause(&mut self) {
        self.driver.stop();
    }

    /// Stop and zero the counter
    pub fn reset(&mut self) {
        self.driver.stop();
        self.current_seconds = 0;
    }

    pub fn tick(&mut self) {
        self.current_seconds += 1;
    }

    pub fn is_running(&self) -> bool {
        self.driver.is_running()
    }

    pub fn seconds(&self) -> u64 {
        self.current_seconds
    }

    pub fn tps(&self) -> f64 {
        self.tps
    }

    /// Deliver every tick due at or before `now_ms`
    pub fn advance_to(&mut self, now_ms: f64) {
        while let Some(at) = self.driver.next_due() {
            if at > now_ms {
                break;
            }
            self.driver.fire();
            self.tick();
        }
    }

    /// Skip ticks swallowed by a stall
    pub fn stall_to(&mut self, now_ms: f64) {
        self.driver.skip_to(now_ms);
    }

    /// Format as `M:SS`, or `H:MM:SS` once an hour has passed
    pub fn time(&self) -> String {
        let hours = self.current_seconds / 3600;
        let minutes = (self.current_seconds / 60) % 60;
        let seconds = self.current_seconds % 60;
        if hours > 0 {
            format!("{hours}:{minutes:02}:{seconds:02}")
        } else {
            format!("{minutes}:{seconds:02}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer_at(seconds: u64) -> Timer {
        let mut timer = Timer::default();
        for _ in 0..seconds {
            timer.tick();
        }
        timer
    }

    #[test]
    fn test_time_format() {
        assert_eq!(timer_at(0).time(), "0:00");
        assert_eq!(timer_at(9).time(), "0:09");
        assert_eq!(timer_at(75).time(), "1:15");
        assert_eq!(timer_at(600).time(), "10:00");
        assert_eq!(timer_at(3600).time(), "1:00:00");
        assert_eq!(timer_at(3725).time(), "1:02:05");
        assert_eq!(timer_at(36_000 + 59 * 60 + 59).time(), "10:59:59");
    }

    #[test]
    fn test_advance_ticks_once_per_second() {
        let mut timer = Timer::default();
        timer.start(0.0);
        timer.advance_to(999.0);
        assert_eq!(timer.seconds(), 0);
        timer.advance_to(3000.0);
        assert_eq!(timer.seconds(), 3);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut timer = Timer::default();
        timer.start(0.0);
        timer.advance_to(2500.0);
        timer.pause();
        timer.advance_to(10_000.0);
        assert_eq!(timer.seconds(), 2);

        timer.start(10_000.0);
        timer.advance_to(11_000.0);
        assert_eq!(timer.seconds(), 3);
    }

    #[test]
    fn test_reset() {
        let mut timer = Timer::default();
        timer.start(0.0);
        timer.advance_to(5000.0);
        timer.reset();
        assert_eq!(timer.seconds(), 0);
        assert!(!timer.is_running());
        timer.advance_to(9000.0);
        assert_eq!(timer.time(), "0:00");
    }

    #[test]
    fn test_faster_tps() {
        let mut timer = Timer::new(4.0);
        timer.start(0.0);
        timer.advance_to(1000.0);
        assert_eq!(timer.seconds(), 4);
    }
}
