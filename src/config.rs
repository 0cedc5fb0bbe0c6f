//! Runtime configuration loaded from a TOML file.
//!
//! Every field defaults to the compile-time value in [`crate::constants`], so
//! a file only needs the keys it overrides:
//!
//! ```toml
//! arena_width = 1000.0
//! tick_ms = 25
//! seed = 7
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::constants::{
    DEFAULT_ARENA_HEIGHT, DEFAULT_ARENA_WIDTH, DEFAULT_SCORE_FILE, DEFAULT_STAR_COUNT,
    DEFAULT_TICK_MS, MARGIN,
};
use crate::entities::Arena;
use crate::error::{GameError, GameResult};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub arena_width: f32,
    pub arena_height: f32,
    /// Simulation tick period.
    pub tick_ms: u64,
    pub star_count: usize,
    pub score_file: PathBuf,
    /// Fixed RNG seed for a reproducible run.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            arena_width: DEFAULT_ARENA_WIDTH,
            arena_height: DEFAULT_ARENA_HEIGHT,
            tick_ms: DEFAULT_TICK_MS,
            star_count: DEFAULT_STAR_COUNT,
            score_file: PathBuf::from(DEFAULT_SCORE_FILE),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Read and validate `path`.  A missing file yields the defaults.
    pub fn load(path: &Path) -> GameResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|source| GameError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml(&text).map_err(|e| match e {
            GameError::Parse { details, .. } => GameError::Parse {
                path: path.display().to_string(),
                details,
            },
            other => other,
        })?;
        Ok(config)
    }

    pub fn from_toml(text: &str) -> GameResult<Self> {
        let config: GameConfig = toml::from_str(text).map_err(|e| GameError::Parse {
            path: "<inline>".to_string(),
            details: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GameResult<()> {
        if !(self.arena_width > 2.0 * MARGIN) {
            return Err(GameError::InvalidConfig {
                name: "arena_width",
                value: self.arena_width.to_string(),
                reason: "must exceed twice the arena margin",
            });
        }
        if !(self.arena_height > 2.0 * MARGIN) {
            return Err(GameError::InvalidConfig {
                name: "arena_height",
                value: self.arena_height.to_string(),
                reason: "must exceed twice the arena margin",
            });
        }
        if self.tick_ms == 0 {
            return Err(GameError::InvalidConfig {
                name: "tick_ms",
                value: self.tick_ms.to_string(),
                reason: "must be positive",
            });
        }
        Ok(())
    }

    pub fn arena(&self) -> Arena {
        Arena::new(self.arena_width, self.arena_height)
    }
}
