use crate::replay::constants::MIN_LINES_PER_SECOND;
use std::time::Duration;

/// Target emission rate and the per-line period derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateState {
    lines_per_second: f64,
    period: Duration,
}

impl RateState {
    pub fn new(lines_per_second: f64) -> Self {
        let lines_per_second = clamp_rate(lines_per_second);
        Self {
            lines_per_second,
            period: period_for(lines_per_second),
        }
    }

    pub fn set(&mut self, lines_per_second: f64) {
        *self = Self::new(lines_per_second);
    }

    pub fn lines_per_second(&self) -> f64 {
        self.lines_per_second
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

/// Floor a requested rate at [`MIN_LINES_PER_SECOND`]. NaN lands on the floor too.
pub fn clamp_rate(lines_per_second: f64) -> f64 {
    if lines_per_second >= MIN_LINES_PER_SECOND {
        lines_per_second
    } else {
        MIN_LINES_PER_SECOND
    }
}

fn period_for(lines_per_second: f64) -> Duration {
    // Infinity gives a zero period, i.e. never sleep.
    Duration::try_from_secs_f64(1.0 / lines_per_second).unwrap_or(Duration::MAX)
}
