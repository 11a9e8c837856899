mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use logreplay_core::logging::{default_log_format, init_logging};
use logreplay_core::replay::ReplaySession;
use owo_colors::OwoColorize;
use std::fs::File;
use std::io;

fn main() {
    let cli = Cli::parse();

    init_logging(cli.log_format.map_or_else(default_log_format, Into::into));

    if let Err(e) = run(&cli) {
        eprintln!("{} {e:#}", "error:".red().bold());
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.replay_config().context("invalid configuration")?;

    let original = File::open(&cli.original)
        .with_context(|| format!("failed to open {}", cli.original.display()))?;
    let replayed = File::create(&cli.replayed)
        .with_context(|| format!("failed to create {}", cli.replayed.display()))?;

    tracing::debug!(
        original = %cli.original.display(),
        replayed = %cli.replayed.display(),
        ?config,
        "starting replay"
    );

    let session = ReplaySession::start(
        original,
        replayed,
        io::stdout(),
        io::BufReader::new(io::stdin()),
        config,
    );
    session.wait().context("replay aborted")?;

    Ok(())
}
