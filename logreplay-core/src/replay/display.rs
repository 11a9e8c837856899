use crate::replay::history::{HistoryRing, WindowStats};
use crate::replay::widget::render_widget;
use serde::Deserialize;
use std::fmt;
use std::io::Write;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Stats,
    Widget,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Stats => DisplayMode::Widget,
            DisplayMode::Widget => DisplayMode::Stats,
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayMode::Stats => f.write_str("stats"),
            DisplayMode::Widget => f.write_str("widget"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DisplayTiming {
    pub stats_window: Duration,
    pub stats_tick: Duration,
    pub widget_tick: Duration,
}

/// The live status line: either an animated widget or windowed throughput.
pub struct Display<W> {
    out: W,
    mode: DisplayMode,
    timing: DisplayTiming,
    last_render: Option<Instant>,
}

impl<W: Write> Display<W> {
    pub fn new(out: W, mode: DisplayMode, timing: DisplayTiming) -> Self {
        Self {
            out,
            mode,
            timing,
            last_render: None,
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Flip the mode and make the next tick render immediately.
    pub fn toggle(&mut self) -> DisplayMode {
        self.mode = self.mode.toggled();
        self.last_render = None;
        self.mode
    }

    fn due(&self, now: Instant, interval: Duration) -> bool {
        self.last_render
            .is_none_or(|last| now.duration_since(last) >= interval)
    }

    /// Render if the current mode's interval has elapsed.
    pub fn tick(&mut self, line_no: u64, lines_per_second: f64, history: &HistoryRing) {
        let now = Instant::now();
        match self.mode {
            DisplayMode::Widget if self.due(now, self.timing.widget_tick) => {
                self.write(&render_widget(line_no, lines_per_second));
            }
            DisplayMode::Stats if self.due(now, self.timing.stats_tick) => {
                let stats = history.stats_in_window(self.timing.stats_window);
                self.write(&render_stats(&stats, self.timing.stats_window));
            }
            _ => return,
        }
        self.last_render = Some(now);
    }

    pub fn final_stats(&mut self, history: &HistoryRing) {
        let stats = history.stats_in_window(self.timing.stats_window);
        self.write(&render_stats(&stats, self.timing.stats_window));
        self.write("\nDone\n");
    }

    /// One-off status message on its own line.
    pub fn notice(&mut self, message: &str) {
        self.write(message);
        self.write("\n");
    }

    fn write(&mut self, s: &str) {
        // The status line is cosmetic; a closed stdout must not stop the replay.
        let _ = self.out.write_all(s.as_bytes());
        let _ = self.out.flush();
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Throughput over `window`, normalized to per-second figures.
pub fn render_stats(stats: &WindowStats, window: Duration) -> String {
    let secs = window.as_secs_f64();
    format!(
        "{:7.0} line/s;  {:10.1} KiB/s\r",
        stats.lines as f64 / secs,
        stats.kib() / secs
    )
}
