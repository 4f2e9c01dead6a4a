//! Lightweight wall-clock timing.
//!
//! Generating one table issues millions of backend queries; the batch
//! pipeline reports how long each fluid took with these timers.

use std::time::Instant;

/// A simple timer that measures elapsed time.
pub struct Timer {
    label: &'static str,
    start: Instant,
}

impl Timer {
    /// Create and start a new timer with the given label.
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Elapsed time in seconds since `start`.
    pub fn elapsed_s(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Stop the timer and return elapsed time in seconds.
    pub fn stop(self) -> f64 {
        self.elapsed_s()
    }
}

/// Accumulates the total time and call count of a repeated stage.
#[derive(Debug, Default, Clone, Copy)]
pub struct StageTiming {
    total_s: f64,
    count: u64,
}

impl StageTiming {
    pub const fn new() -> Self {
        Self {
            total_s: 0.0,
            count: 0,
        }
    }

    /// Record a timing measurement.
    pub fn record(&mut self, duration_s: f64) {
        self.total_s += duration_s;
        self.count += 1;
    }

    pub fn total_seconds(&self) -> f64 {
        self.total_s
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Average time per call (in seconds).
    pub fn average_seconds(&self) -> f64 {
        if self.count > 0 {
            self.total_s / self.count as f64
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_is_non_negative() {
        let timer = Timer::start("test");
        assert_eq!(timer.label(), "test");
        assert!(timer.stop() >= 0.0);
    }

    #[test]
    fn stage_timing_average() {
        let mut stage = StageTiming::new();
        assert_eq!(stage.average_seconds(), 0.0);
        stage.record(1.0);
        stage.record(3.0);
        assert_eq!(stage.count(), 2);
        assert_eq!(stage.total_seconds(), 4.0);
        assert_eq!(stage.average_seconds(), 2.0);
    }
}
