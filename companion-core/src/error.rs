use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors surfaced by the core operations. Each variant maps to one HTTP
/// status class at the route boundary.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Missing or malformed required input
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// The language-analysis collaborator failed or answered with garbage
    #[error("{0:#}")]
    AnalysisFailure(anyhow::Error),

    /// Any other collaborator call failed
    #[error("{0:#}")]
    Collaborator(anyhow::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("{0:#}")]
    Internal(anyhow::Error),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }
}

/// Persistence failures from the file-backed stores
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Corrupt record in {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}
