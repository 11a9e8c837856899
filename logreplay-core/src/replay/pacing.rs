use crate::replay::constants::MIN_SLEEP;
use crate::replay::quantum::SleepQuantum;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::thread;
use std::time::Duration;

/// Delays the replay loop so that, on average, one line takes `period`.
///
/// Periods longer than the sleep quantum are slept directly. Shorter ones
/// can't be, so instead we take a minimal sleep (which really costs about one
/// quantum) with probability `period / quantum` and skip it otherwise. Any
/// single line is off, but the expected delay per line is `period`, which
/// keeps rates well past the OS sleep resolution on target.
pub struct Pacer<R = StdRng> {
    quantum: SleepQuantum,
    rng: R,
}

impl Pacer<StdRng> {
    pub fn new(quantum: SleepQuantum) -> Self {
        Self::with_rng(quantum, StdRng::from_os_rng())
    }
}

impl<R: Rng> Pacer<R> {
    pub fn with_rng(quantum: SleepQuantum, rng: R) -> Self {
        Self { quantum, rng }
    }

    pub fn quantum(&self) -> SleepQuantum {
        self.quantum
    }

    /// How long to sleep for this line, if at all.
    pub fn plan(&mut self, period: Duration) -> Option<Duration> {
        let quantum = self.quantum.as_duration();
        if period > quantum {
            return Some(period);
        }
        if quantum.is_zero() {
            return None;
        }

        let chance = period.as_secs_f64() / quantum.as_secs_f64();
        (self.rng.random::<f64>() < chance).then_some(MIN_SLEEP)
    }

    pub fn pace(&mut self, period: Duration) {
        if let Some(d) = self.plan(period) {
            thread::sleep(d);
        }
    }
}
