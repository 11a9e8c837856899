use std::time::Duration;

pub const DEFAULT_LINES_PER_SECOND: f64 = 10.0;
pub const MIN_LINES_PER_SECOND: f64 = 0.000_001;

pub const MAX_READ_BYTES: usize = 1024 * 1024;

// ~400k lines/s on a laptop at full throttle; one second of that fits.
pub const HISTORY_CAPACITY: usize = 1 << 20;

pub const QUANTUM_SAMPLES: u32 = 10;
pub const MIN_SLEEP: Duration = Duration::from_nanos(1);

pub const STATS_WINDOW: Duration = Duration::from_secs(1);
pub const STATS_TICK: Duration = Duration::from_millis(500);
pub const WIDGET_TICK: Duration = Duration::from_millis(30);
pub const FLUSH_INTERVAL: Duration = Duration::from_secs(1);
