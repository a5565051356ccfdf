//! Store error types.

use pixelmaker_protocol::{BridgeError, EncodingError, ErrorKind};

/// Errors produced by the confined file store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("path escapes the asset root: {0}")]
    PathEscape(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error(transparent)]
    InvalidEncoding(#[from] EncodingError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// The bridge-level category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::PathEscape(_) => ErrorKind::PathEscape,
            StoreError::NotFound(_) => ErrorKind::NotFound,
            StoreError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            StoreError::InvalidEncoding(_) => ErrorKind::InvalidEncoding,
            StoreError::Io(_) => ErrorKind::Io,
        }
    }
}

impl From<StoreError> for BridgeError {
    fn from(err: StoreError) -> Self {
        BridgeError::new(err.kind(), err.to_string())
    }
}
