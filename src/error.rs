//! Error types for the kinrow crate

use thiserror::Error;

/// Main error type for the kinrow crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("illegal move: cell {position} is already occupied")]
    IllegalMove { position: usize },

    #[error("move {position} is out of bounds (board has {cells} cells)")]
    OutOfBounds { position: usize, cells: usize },

    #[error("game already over")]
    GameOver,

    #[error("no legal moves available")]
    NoLegalMoves,

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("invalid game variant '{input}'. Expected one of: {expected}")]
    ParseVariant { input: String, expected: String },

    #[error("invalid training mode '{input}'. Expected one of: {expected}")]
    ParseTrainingMode { input: String, expected: String },

    #[error("invalid reward policy '{input}'. Expected one of: {expected}")]
    ParseRewardPolicy { input: String, expected: String },

    #[error("invalid player '{input}' (expected 'x' or 'o')")]
    ParsePlayer { input: String },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
