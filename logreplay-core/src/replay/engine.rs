use crate::config::ReplayConfig;
use crate::replay::command::{Command, CommandReceiver};
use crate::replay::display::Display;
use crate::replay::error::ReplayError;
use crate::replay::history::{HistoryRing, OutputEvent};
use crate::replay::pacing::Pacer;
use crate::replay::rate::RateState;
use crate::replay::segment::Lines;
use crate::replay::sink::Sink;
use rand::Rng;
use rand::rngs::StdRng;
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplaySummary {
    pub lines: u64,
    pub bytes: u64,
    /// Source offset reached; equals the source length after a full drain.
    pub offset: u64,
    pub elapsed: Duration,
    /// Target rate in effect when the source ran dry.
    pub lines_per_second: f64,
}

/// Everything the loop mutates between lines. Only the replay thread owns it;
/// the listener reaches it solely through the command channel.
struct ReplayState<W> {
    rate: RateState,
    display: Display<W>,
    history: HistoryRing,
    line_no: u64,
    offset: u64,
    bytes: u64,
    last_flush: Instant,
}

pub struct Replayer<S, K, W, R = StdRng> {
    source: S,
    sink: K,
    commands: CommandReceiver,
    pacer: Pacer<R>,
    state: ReplayState<W>,
    read_chunk_bytes: usize,
    flush_interval: Duration,
}

impl<S, K, W, R> Replayer<S, K, W, R>
where
    S: Read + Seek,
    K: Sink,
    W: Write,
    R: Rng,
{
    pub fn new(
        source: S,
        sink: K,
        commands: CommandReceiver,
        pacer: Pacer<R>,
        status_out: W,
        config: &ReplayConfig,
    ) -> Self {
        Self {
            source,
            sink,
            commands,
            pacer,
            state: ReplayState {
                rate: RateState::new(config.lines_per_second),
                display: Display::new(status_out, config.display, config.display_timing()),
                history: HistoryRing::new(config.history_capacity),
                line_no: 0,
                offset: 0,
                bytes: 0,
                last_flush: Instant::now(),
            },
            read_chunk_bytes: config.read_chunk_bytes.max(1),
            flush_interval: config.flush_interval(),
        }
    }

    /// Replay the whole source, then print the closing stats.
    pub fn run(mut self) -> Result<ReplaySummary, ReplayError> {
        let started = Instant::now();
        let mut buf = vec![0u8; self.read_chunk_bytes];

        let rate = self.state.rate;
        self.state.display.notice(&format!(
            "linesPerSecond: {:.6}; targetPrintPeriod: {:?}",
            rate.lines_per_second(),
            rate.period()
        ));
        self.state.display.notice(&format!(
            "sleepQuantum: {:?}",
            self.pacer.quantum().as_duration()
        ));
        tracing::info!(
            lines_per_second = rate.lines_per_second(),
            period = ?rate.period(),
            quantum = ?self.pacer.quantum().as_duration(),
            history_capacity = self.state.history.capacity(),
            "replay started"
        );

        loop {
            let n = self.read_chunk(&mut buf)?;
            if n == 0 {
                break;
            }
            tracing::trace!(offset = self.state.offset, bytes = n, "chunk read");

            for line in Lines::new(&buf[..n]) {
                self.emit(line)?;
            }
        }

        self.sync()?;
        self.state.display.final_stats(&self.state.history);

        let summary = ReplaySummary {
            lines: self.state.line_no,
            bytes: self.state.bytes,
            offset: self.state.offset,
            elapsed: started.elapsed(),
            lines_per_second: self.state.rate.lines_per_second(),
        };
        tracing::info!(
            lines = summary.lines,
            bytes = summary.bytes,
            elapsed = ?summary.elapsed,
            "replay finished"
        );
        Ok(summary)
    }

    fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize, ReplayError> {
        let offset = self.state.offset;
        self.source
            .seek(SeekFrom::Start(offset))
            .map_err(|source| ReplayError::Seek { offset, source })?;

        loop {
            match self.source.read(buf) {
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(source) => return Err(ReplayError::Read { offset, source }),
            }
        }
    }

    fn emit(&mut self, line: &[u8]) -> Result<(), ReplayError> {
        if let Some(command) = self.commands.poll() {
            self.apply(command);
        }

        let state = &mut self.state;
        self.sink
            .write_all(line)
            .map_err(|source| ReplayError::Write {
                line: state.line_no,
                source,
            })?;
        state.offset += line.len() as u64;
        state.bytes += line.len() as u64;
        state.history.record(OutputEvent {
            timestamp: Instant::now(),
            bytes: line.len(),
        });

        self.pacer.pace(state.rate.period());

        state
            .display
            .tick(state.line_no, state.rate.lines_per_second(), &state.history);

        if state.last_flush.elapsed() >= self.flush_interval {
            self.sync()?;
        }

        self.state.line_no += 1;
        Ok(())
    }

    fn apply(&mut self, command: Command) {
        let state = &mut self.state;
        match command {
            Command::SetRate(requested) => {
                state.rate.set(requested);
                let rate = state.rate;
                state.display.notice(&format!(
                    "linesPerSecond: {:.6}; printPeriod: {:?}",
                    rate.lines_per_second(),
                    rate.period()
                ));
                tracing::info!(
                    requested,
                    lines_per_second = rate.lines_per_second(),
                    period = ?rate.period(),
                    line = state.line_no,
                    "rate changed"
                );
            }
            Command::ToggleDisplay => {
                let mode = state.display.toggle();
                state.display.notice(&format!("display: {mode}"));
                tracing::info!(%mode, line = state.line_no, "display mode toggled");
            }
        }
    }

    fn sync(&mut self) -> Result<(), ReplayError> {
        let lines = self.state.line_no;
        self.sink
            .sync()
            .map_err(|source| ReplayError::Sync { lines, source })?;
        self.state.last_flush = Instant::now();
        tracing::debug!(lines, offset = self.state.offset, "sink synced");
        Ok(())
    }
}
