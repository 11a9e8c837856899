mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use crate::replay::DisplayMode;
use crate::replay::DisplayTiming;
use crate::replay::constants::{
    DEFAULT_LINES_PER_SECOND, FLUSH_INTERVAL, HISTORY_CAPACITY, MAX_READ_BYTES, QUANTUM_SAMPLES,
    STATS_TICK, STATS_WINDOW, WIDGET_TICK,
};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Replay tuning. Every key is optional in the TOML file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReplayConfig {
    /// Initial target rate; can be changed live from stdin.
    pub lines_per_second: f64,

    /// Initial status display.
    pub display: DisplayMode,

    /// Upper bound on a single source read.
    pub read_chunk_bytes: usize,

    /// Slots in the emitted-line history used for throughput stats.
    pub history_capacity: usize,

    /// Minimal sleeps averaged when measuring the sleep quantum.
    pub quantum_samples: u32,

    pub stats_window_ms: u64,
    pub stats_tick_ms: u64,
    pub widget_tick_ms: u64,

    /// How often the sink is synced so tailing readers see it grow.
    pub flush_interval_ms: u64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            lines_per_second: DEFAULT_LINES_PER_SECOND,
            display: DisplayMode::Stats,
            read_chunk_bytes: MAX_READ_BYTES,
            history_capacity: HISTORY_CAPACITY,
            quantum_samples: QUANTUM_SAMPLES,
            stats_window_ms: STATS_WINDOW.as_millis() as u64,
            stats_tick_ms: STATS_TICK.as_millis() as u64,
            widget_tick_ms: WIDGET_TICK.as_millis() as u64,
            flush_interval_ms: FLUSH_INTERVAL.as_millis() as u64,
        }
    }
}

impl ReplayConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let cfg: Self = toml::from_str(&contents).map_err(|e| ConfigError::parse(path, e))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Non-positive rates are accepted here; they get clamped like any live
    /// rate update.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.lines_per_second.is_finite() {
            return Err(ConfigError::invalid(
                "lines_per_second",
                format!("must be a finite number, got {}", self.lines_per_second),
            ));
        }

        let nonzero: [(&'static str, u64); 7] = [
            ("read_chunk_bytes", self.read_chunk_bytes as u64),
            ("history_capacity", self.history_capacity as u64),
            ("quantum_samples", u64::from(self.quantum_samples)),
            ("stats_window_ms", self.stats_window_ms),
            ("stats_tick_ms", self.stats_tick_ms),
            ("widget_tick_ms", self.widget_tick_ms),
            ("flush_interval_ms", self.flush_interval_ms),
        ];
        for (field, value) in nonzero {
            if value == 0 {
                return Err(ConfigError::invalid(field, "must be greater than zero"));
            }
        }

        Ok(())
    }

    pub fn flush_interval(&self) -> Duration {
        Duration::from_millis(self.flush_interval_ms)
    }

    pub fn display_timing(&self) -> DisplayTiming {
        DisplayTiming {
            stats_window: Duration::from_millis(self.stats_window_ms),
            stats_tick: Duration::from_millis(self.stats_tick_ms),
            widget_tick: Duration::from_millis(self.widget_tick_ms),
        }
    }
}

impl FromStr for ReplayConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(s).map_err(|e| ConfigError::parse("<inline>", e))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
