//! Module library error types.

use pixelmaker_protocol::{BridgeError, ErrorKind};

/// Errors produced by the module library.
#[derive(Debug, thiserror::Error)]
pub enum ModuleError {
    #[error("only .html/.htm modules are supported: {0}")]
    Unsupported(String),

    #[error("module not found: {0}")]
    NotFound(String),

    #[error("watch error: {0}")]
    Watch(#[from] notify::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ModuleError> for BridgeError {
    fn from(err: ModuleError) -> Self {
        let kind = match &err {
            ModuleError::Unsupported(_) => ErrorKind::InvalidEncoding,
            ModuleError::NotFound(_) => ErrorKind::NotFound,
            ModuleError::Watch(_) | ModuleError::Io(_) => ErrorKind::Io,
        };
        BridgeError::new(kind, err.to_string())
    }
}
