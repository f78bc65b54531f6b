use thiserror::Error;

use crate::game::endings::Ending;

#[derive(Error, Debug)]
pub enum SmugglerError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Not enough fuel: need {needed}, have {available}")]
    NoFuel { needed: u32, available: u32 },

    #[error("Not enough credits: need {needed}, have {available}")]
    InsufficientCredits { needed: i64, available: i64 },

    #[error("Game is over: {0:?}")]
    GameOver(Ending),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SmugglerError>;
