use logreplay_core::config::ReplayConfig;
use logreplay_core::replay::{CommandSender, ReplayError, ReplaySession, ReplaySummary};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// `Write` handle whose bytes stay readable from the test thread.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Source and sink files for one replay, in a private temp dir.
pub struct TestReplay {
    dir: TempDir,
    pub source: PathBuf,
    pub sink: PathBuf,
    pub config: ReplayConfig,
}

/// A started replay plus the handles a test needs to drive and inspect it.
pub struct ReplayRun {
    pub session: ReplaySession,
    pub commands: CommandSender,
    pub status: SharedBuffer,
    pub sink: PathBuf,
    _dir: TempDir,
}

impl TestReplay {
    pub fn with_source(contents: &[u8]) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let source = dir.path().join("original.log");
        let sink = dir.path().join("replayed.log");
        fs::write(&source, contents).expect("failed to write source fixture");

        Self {
            dir,
            source,
            sink,
            config: ReplayConfig {
                quantum_samples: 3,
                ..ReplayConfig::default()
            },
        }
    }

    pub fn rate(mut self, lines_per_second: f64) -> Self {
        self.config.lines_per_second = lines_per_second;
        self
    }

    pub fn read_chunk_bytes(mut self, bytes: usize) -> Self {
        self.config.read_chunk_bytes = bytes;
        self
    }

    pub fn start(self) -> ReplayRun {
        let source = File::open(&self.source).expect("failed to open source");
        let sink = File::create(&self.sink).expect("failed to create sink");
        let status = SharedBuffer::default();

        let (session, commands) = ReplaySession::spawn(source, sink, status.clone(), self.config);

        ReplayRun {
            session,
            commands,
            status,
            sink: self.sink,
            _dir: self.dir,
        }
    }
}

impl ReplayRun {
    /// Wait for completion and return the summary with the replayed bytes.
    pub fn finish(self) -> (Result<ReplaySummary, ReplayError>, Vec<u8>, String) {
        let result = self.session.wait();
        let replayed = fs::read(&self.sink).expect("failed to read sink");
        (result, replayed, self.status.contents())
    }
}
