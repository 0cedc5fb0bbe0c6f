//! Error types for the pieces that touch the filesystem.  The simulation
//! itself has no failure modes.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error in '{path}': {details}")]
    Parse { path: String, details: String },

    #[error("config value '{name}' = {value} is invalid: {reason}")]
    InvalidConfig {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

pub type GameResult<T> = Result<T, GameError>;
