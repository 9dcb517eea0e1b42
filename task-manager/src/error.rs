use crate::task::TaskId;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or missing input. Never reaches the store.
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("task with ID {0} does not exist")]
    NotFound(TaskId),
    #[error("storage failure: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("failed to render output: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("terminal I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    /// Process exit code reported by the CLI for this kind of failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Validation(_) => 2,
            Error::NotFound(_) => 3,
            _ => 1,
        }
    }
}
