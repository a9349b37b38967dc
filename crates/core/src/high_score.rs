//! High-score persistence port
//!
//! Engines load the record once at construction and write it back on a new
//! record, on game over and on termination. Stores never report failure to
//! the engine: a missing or corrupt record reads as 0 and a failed write is
//! logged and dropped.

use std::fs;
use std::io;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

/// Load/save capability injected into each engine
pub trait HighScoreStore {
    /// Stored record, 0 if there is none or it cannot be read
    fn load_high_score(&mut self) -> u32;

    /// Best-effort write of the record
    fn save_high_score(&mut self, score: u32);
}

#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("high score file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("high score file {path} does not hold an integer: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseIntError,
    },
}

/// One plain-text ASCII integer per file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHighScore {
    path: PathBuf,
}

impl FileHighScore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<u32, HighScoreError> {
        let text = fs::read_to_string(&self.path).map_err(|source| HighScoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        text.trim()
            .parse::<u32>()
            .map_err(|source| HighScoreError::Parse {
                path: self.path.clone(),
                source,
            })
    }

    pub fn write(&self, score: u32) -> Result<(), HighScoreError> {
        fs::write(&self.path, score.to_string()).map_err(|source| HighScoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl HighScoreStore for FileHighScore {
    fn load_high_score(&mut self) -> u32 {
        match self.read() {
            Ok(score) => score,
            Err(HighScoreError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no high score recorded yet");
                0
            }
            Err(error) => {
                warn!(%error, "ignoring unreadable high score");
                0
            }
        }
    }

    fn save_high_score(&mut self, score: u32) {
        if let Err(error) = self.write(score) {
            warn!(%error, score, "failed to save high score");
        }
    }
}

/// In-memory store; clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScore {
    value: Arc<AtomicU32>,
    saves: Arc<AtomicUsize>,
}

impl MemoryHighScore {
    pub fn new(initial: u32) -> Self {
        Self {
            value: Arc::new(AtomicU32::new(initial)),
            saves: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn value(&self) -> u32 {
        self.value.load(Ordering::SeqCst)
    }

    /// Number of `save_high_score` calls so far
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl HighScoreStore for MemoryHighScore {
    fn load_high_score(&mut self) -> u32 {
        self.value()
    }

    fn save_high_score(&mut self, score: u32) {
        self.value.store(score, Ordering::SeqCst);
        self.saves.fetch_add(1, Ordering::SeqCst);
    }
}

/// Store that remembers nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHighScore;

impl HighScoreStore for NoHighScore {
    fn load_high_score(&mut self) -> u32 {
        0
    }

    fn save_high_score(&mut self, _score: u32) {}
}
