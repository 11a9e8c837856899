use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to seek source to offset {offset}: {source}")]
    Seek {
        offset: u64,
        #[source]
        source: io::Error,
    },

    #[error("failed to read source at offset {offset}: {source}")]
    Read {
        offset: u64,
        #[source]
        source: io::Error,
    },

    #[error("failed to write line {line} to sink: {source}")]
    Write {
        line: u64,
        #[source]
        source: io::Error,
    },

    #[error("failed to sync sink after {lines} lines: {source}")]
    Sync {
        lines: u64,
        #[source]
        source: io::Error,
    },

    #[error("replay thread exited without reporting completion")]
    Aborted,
}
