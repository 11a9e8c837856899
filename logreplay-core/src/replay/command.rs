use std::io::{BufRead, ErrorKind};
use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError};
use std::thread::{self, JoinHandle};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    SetRate(f64),
    ToggleDisplay,
}

/// Interpret one line of interactive input: `t` toggles, a number sets the rate.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line == "t" {
        return Some(Command::ToggleDisplay);
    }
    line.parse::<f64>()
        .ok()
        .filter(|rate| !rate.is_nan())
        .map(Command::SetRate)
}

/// Listener side. Both channels are rendezvous channels, so a send blocks
/// until the replay loop polls it.
#[derive(Clone)]
pub struct CommandSender {
    rate_tx: SyncSender<f64>,
    toggle_tx: SyncSender<()>,
}

/// Replay-loop side.
pub struct CommandReceiver {
    rate_rx: Receiver<f64>,
    toggle_rx: Receiver<()>,
}

pub fn command_channel() -> (CommandSender, CommandReceiver) {
    let (rate_tx, rate_rx) = mpsc::sync_channel(0);
    let (toggle_tx, toggle_rx) = mpsc::sync_channel(0);
    (
        CommandSender { rate_tx, toggle_tx },
        CommandReceiver { rate_rx, toggle_rx },
    )
}

#[derive(Debug, thiserror::Error)]
#[error("replay loop is no longer receiving commands")]
pub struct Disconnected;

impl CommandSender {
    pub fn send(&self, command: Command) -> Result<(), Disconnected> {
        match command {
            Command::SetRate(rate) => self.rate_tx.send(rate).map_err(|_| Disconnected),
            Command::ToggleDisplay => self.toggle_tx.send(()).map_err(|_| Disconnected),
        }
    }
}

impl CommandReceiver {
    /// Take at most one pending command without blocking. Rate updates win
    /// over toggles; a pending toggle waits for the next poll.
    pub fn poll(&self) -> Option<Command> {
        match self.rate_rx.try_recv() {
            Ok(rate) => return Some(Command::SetRate(rate)),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => {}
        }
        match self.toggle_rx.try_recv() {
            Ok(()) => Some(Command::ToggleDisplay),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }
}

/// Read commands from `input` on a dedicated thread until it hits EOF or the
/// replay loop goes away.
pub fn spawn_listener<I>(input: I, commands: CommandSender) -> JoinHandle<()>
where
    I: BufRead + Send + 'static,
{
    thread::spawn(move || {
        for line in input.lines() {
            let line = match line {
                Ok(line) => line,
                // The bad line is consumed; the stream is still usable.
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    tracing::debug!(error = %e, "ignoring non-UTF-8 command input");
                    continue;
                }
                Err(e) => {
                    tracing::debug!(error = %e, "command input failed");
                    break;
                }
            };

            let Some(command) = parse_command(&line) else {
                tracing::debug!(input = %line, "ignoring unrecognized command");
                continue;
            };

            if commands.send(command).is_err() {
                break;
            }
        }
        tracing::debug!("command listener stopped");
    })
}
