use thiserror::Error;

#[derive(Error, Debug)]
pub enum PuzzleError {
    #[error("No puzzle loaded.")]
    NoPuzzleLoaded,

    #[error("Index {index} is out of range (length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Puzzle not found: {0}")]
    PuzzleNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, PuzzleError>;
