use clap::{Parser, ValueEnum};
use logreplay_core::config::{ConfigError, ReplayConfig};
use logreplay_core::logging::LogFormat;
use logreplay_core::replay::DisplayMode;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "logreplay",
    version,
    about = "Replay a log file into a live, slowly growing one",
    after_help = "While running, type a number and press enter to set lines per second,\n\
                  or type `t` to switch between the stats line and the widget."
)]
pub struct Cli {
    /// Log file to read from
    pub original: PathBuf,

    /// File to replay into (created or truncated)
    pub replayed: PathBuf,

    /// Path to a TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Initial lines per second
    #[arg(long)]
    pub rate: Option<f64>,

    /// Start with the animated widget instead of the stats line
    #[arg(long)]
    pub widget: bool,

    /// Maximum bytes per source read
    #[arg(long)]
    pub chunk_bytes: Option<usize>,

    /// Emitted-line history slots used for throughput stats
    #[arg(long)]
    pub history_capacity: Option<usize>,

    /// Log format on stderr (defaults to pretty on a terminal, json otherwise)
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormatArg>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum LogFormatArg {
    Json,
    Pretty,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Json => LogFormat::Json,
            LogFormatArg::Pretty => LogFormat::Pretty,
        }
    }
}

impl Cli {
    /// File config (or defaults) with command-line overrides applied.
    pub fn replay_config(&self) -> Result<ReplayConfig, ConfigError> {
        let mut cfg = match &self.config {
            Some(path) => ReplayConfig::from_file(path)?,
            None => ReplayConfig::default(),
        };

        if let Some(rate) = self.rate {
            cfg.lines_per_second = rate;
        }
        if self.widget {
            cfg.display = DisplayMode::Widget;
        }
        if let Some(bytes) = self.chunk_bytes {
            cfg.read_chunk_bytes = bytes;
        }
        if let Some(capacity) = self.history_capacity {
            cfg.history_capacity = capacity;
        }

        cfg.validate()?;
        Ok(cfg)
    }
}
