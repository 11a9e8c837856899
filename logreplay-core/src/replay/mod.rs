//! Rate-controlled replay of a static log into a growing one.
//!
//! A chunk is read from the source at the tracked offset, split into lines,
//! and every line goes through the same steps:
//!
//! poll commands
//! write to sink
//! record in HistoryRing
//! Pacer::pace
//! Display::tick
//! periodic sink sync
//!
//! Commands come from a listener thread over two rendezvous channels, so
//! the loop never waits on input and the listener never gets ahead of it.

mod command;
pub mod constants;
mod display;
mod engine;
mod error;
mod history;
mod pacing;
mod quantum;
mod rate;
mod segment;
mod session;
mod sink;
mod widget;

#[cfg(test)]
mod tests;

pub use command::{
    Command, CommandReceiver, CommandSender, Disconnected, command_channel, parse_command,
    spawn_listener,
};
pub use display::{Display, DisplayMode, DisplayTiming, render_stats};
pub use engine::{ReplaySummary, Replayer};
pub use error::ReplayError;
pub use history::{HistoryRing, OutputEvent, WindowStats};
pub use pacing::Pacer;
pub use quantum::SleepQuantum;
pub use rate::{RateState, clamp_rate};
pub use segment::{Lines, next_line};
pub use session::ReplaySession;
pub use sink::Sink;
pub use widget::{WIDGET_FRAMES, render_widget};
