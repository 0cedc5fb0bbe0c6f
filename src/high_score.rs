//! The persisted high score: a single integer in a text file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{GameError, GameResult};

#[derive(Clone, Debug)]
pub struct HighScoreFile {
    path: PathBuf,
}

impl HighScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        HighScoreFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored score, or 0 when the file is absent, unreadable or garbled.
    pub fn load(&self) -> u32 {
        match self.try_load() {
            Ok(score) => score.unwrap_or(0),
            Err(e) => {
                warn!(error = %e, "high score unavailable, starting from 0");
                0
            }
        }
    }

    /// `Ok(None)` when no file exists yet.  An empty file reads as 0.
    pub fn try_load(&self) -> GameResult<Option<u32>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&self.path).map_err(|source| GameError::Read {
            path: self.path.display().to_string(),
            source,
        })?;
        let text = text.trim();
        if text.is_empty() {
            return Ok(Some(0));
        }
        text.parse::<u32>()
            .map(Some)
            .map_err(|e| GameError::Parse {
                path: self.path.display().to_string(),
                details: e.to_string(),
            })
    }

    pub fn store(&self, score: u32) -> GameResult<()> {
        fs::write(&self.path, score.to_string()).map_err(|source| GameError::Write {
            path: self.path.display().to_string(),
            source,
        })
    }
}
