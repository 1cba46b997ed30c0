//! Error types for the fallible edges of the game.
//!
//! The simulation itself never fails; only loading settings and driving the
//! terminal can.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("failed to read settings file {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    ParseConfig(#[from] toml::de::Error),

    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

pub type GameResult<T> = Result<T, GameError>;
