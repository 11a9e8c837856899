use crate::replay::constants::MIN_SLEEP;
use std::thread;
use std::time::{Duration, Instant};

/// Smallest sleep the host reliably delivers, measured once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SleepQuantum(Duration);

impl SleepQuantum {
    /// Average wall time of `samples` minimal sleeps. Blocks the caller.
    pub fn measure(samples: u32) -> Self {
        let samples = samples.max(1);
        let mut total = Duration::ZERO;

        for _ in 0..samples {
            let before = Instant::now();
            thread::sleep(MIN_SLEEP);
            total += before.elapsed();
        }

        let quantum = Self(total / samples);
        tracing::debug!(samples, quantum = ?quantum.0, "sleep quantum measured");
        quantum
    }

    pub fn from_duration(d: Duration) -> Self {
        Self(d)
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }
}
