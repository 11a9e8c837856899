use crate::config::ReplayConfig;
use crate::replay::command::{CommandSender, command_channel, spawn_listener};
use crate::replay::engine::{ReplaySummary, Replayer};
use crate::replay::error::ReplayError;
use crate::replay::pacing::Pacer;
use crate::replay::quantum::SleepQuantum;
use crate::replay::sink::Sink;
use std::io::{BufRead, Read, Seek, Write};
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

/// A replay running on its own thread.
///
/// Completion is reported exactly once, through [`ReplaySession::wait`].
pub struct ReplaySession {
    done_rx: Receiver<Result<ReplaySummary, ReplayError>>,
    handle: JoinHandle<()>,
}

impl ReplaySession {
    /// Start replaying and feed commands from `input` (usually stdin).
    pub fn start<S, K, W, I>(
        source: S,
        sink: K,
        status_out: W,
        input: I,
        config: ReplayConfig,
    ) -> Self
    where
        S: Read + Seek + Send + 'static,
        K: Sink + Send + 'static,
        W: Write + Send + 'static,
        I: BufRead + Send + 'static,
    {
        let (session, commands) = Self::spawn(source, sink, status_out, config);
        // Detached: a listener blocked on stdin must not hold up shutdown.
        spawn_listener(input, commands);
        session
    }

    /// Start replaying and hand back the command side for the caller to drive.
    pub fn spawn<S, K, W>(
        source: S,
        sink: K,
        status_out: W,
        config: ReplayConfig,
    ) -> (Self, CommandSender)
    where
        S: Read + Seek + Send + 'static,
        K: Sink + Send + 'static,
        W: Write + Send + 'static,
    {
        let (commands_tx, commands_rx) = command_channel();
        let (done_tx, done_rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            let quantum = SleepQuantum::measure(config.quantum_samples);
            let replayer = Replayer::new(
                source,
                sink,
                commands_rx,
                Pacer::new(quantum),
                status_out,
                &config,
            );

            let result = replayer.run();
            if let Err(e) = &result {
                tracing::error!(error = %e, "replay failed");
            }
            // Nobody waiting is fine; the outcome was already logged.
            let _ = done_tx.send(result);
        });

        (Self { done_rx, handle }, commands_tx)
    }

    /// Block until the source is drained or the replay fails.
    pub fn wait(self) -> Result<ReplaySummary, ReplayError> {
        let result = self.done_rx.recv().unwrap_or(Err(ReplayError::Aborted));
        let _ = self.handle.join();
        result
    }
}
