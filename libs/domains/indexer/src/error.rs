use core_config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    #[error("Collection already exists: {0}")]
    CollectionExists(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Conversion error: {0}")]
    Conversion(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Vector store error: {0}")]
    Transport(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type IndexResult<T> = Result<T, IndexError>;

/// Discriminant of [`IndexError`], for callers that branch on the failure class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    CollectionNotFound,
    CollectionExists,
    Validation,
    Conversion,
    Embedding,
    Transport,
    Config,
    Internal,
}

impl IndexError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            IndexError::CollectionNotFound(_) => ErrorKind::CollectionNotFound,
            IndexError::CollectionExists(_) => ErrorKind::CollectionExists,
            IndexError::Validation(_) => ErrorKind::Validation,
            IndexError::Conversion(_) => ErrorKind::Conversion,
            IndexError::Embedding(_) => ErrorKind::Embedding,
            IndexError::Transport(_) => ErrorKind::Transport,
            IndexError::Config(_) => ErrorKind::Config,
            IndexError::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn is_collection_not_found(&self) -> bool {
        self.kind() == ErrorKind::CollectionNotFound
    }
}

impl From<reqwest::Error> for IndexError {
    fn from(err: reqwest::Error) -> Self {
        IndexError::Embedding(err.to_string())
    }
}

impl From<serde_json::Error> for IndexError {
    fn from(err: serde_json::Error) -> Self {
        IndexError::Internal(format!("JSON error: {}", err))
    }
}

impl From<ConfigError> for IndexError {
    fn from(err: ConfigError) -> Self {
        IndexError::Config(err.to_string())
    }
}
