use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BazaarError {
    /// The storage medium could not be read or written.
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document exists but is not valid structured data.
    #[error("Corrupt document at {}: {source}", path.display())]
    Corruption {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Product already exists: {0}")]
    DuplicateKey(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl BazaarError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, BazaarError>;
