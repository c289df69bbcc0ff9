//! Error types for the simulation.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown city: {0}")]
    UnknownCity(String),

    #[error("City has no aliens: {0}")]
    EmptyCity(String),

    #[error("Cannot deploy {requested} aliens on {available} cities")]
    InsufficientCities { requested: usize, available: usize },

    #[error("Too many aliens to number: {0}")]
    TooManyAliens(usize),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
