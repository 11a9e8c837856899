use std::time::{Duration, Instant};

/// One emitted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputEvent {
    pub timestamp: Instant,
    pub bytes: usize,
}

/// Lines and bytes emitted inside a query window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowStats {
    pub lines: usize,
    pub bytes: usize,
}

impl WindowStats {
    pub fn kib(&self) -> f64 {
        self.bytes as f64 / 1024.0
    }
}

/// Fixed-capacity circular log of emitted lines.
///
/// The next event is stored at `write_idx`; the k-th most recent one lives at
/// `(write_idx - 1 - k) mod capacity`. Once full, the oldest slot is
/// overwritten, so windowed queries only reach back as far as the ring
/// remembers.
pub struct HistoryRing {
    entries: Vec<OutputEvent>,
    capacity: usize,
    write_idx: usize,
}

impl HistoryRing {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
            write_idx: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn record(&mut self, event: OutputEvent) {
        if self.entries.len() < self.capacity {
            self.entries.push(event);
        } else {
            self.entries[self.write_idx] = event;
        }
        self.write_idx = (self.write_idx + 1) % self.capacity;
    }

    /// The k-th most recently recorded event, `0` being the latest.
    pub fn kth_most_recent(&self, k: usize) -> Option<&OutputEvent> {
        if k >= self.entries.len() {
            return None;
        }
        let idx = (self.write_idx + self.capacity - 1 - k) % self.capacity;
        self.entries.get(idx)
    }

    pub fn stats_in_window(&self, window: Duration) -> WindowStats {
        let now = Instant::now();
        match now.checked_sub(window) {
            Some(cutoff) => self.stats_since(cutoff),
            // Window reaches past the clock's origin: everything we hold counts.
            None => self.stats_since_all(),
        }
    }

    /// Walk backwards from the newest event until one predates `cutoff`.
    pub fn stats_since(&self, cutoff: Instant) -> WindowStats {
        let mut stats = WindowStats::default();

        while let Some(event) = self.kth_most_recent(stats.lines) {
            if event.timestamp < cutoff {
                break;
            }
            stats.lines += 1;
            stats.bytes += event.bytes;
        }

        stats
    }

    fn stats_since_all(&self) -> WindowStats {
        WindowStats {
            lines: self.entries.len(),
            bytes: self.entries.iter().map(|e| e.bytes).sum(),
        }
    }
}
