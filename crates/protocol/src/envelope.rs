use serde::{Deserialize, Serialize};

/// Machine-readable failure category carried across the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    /// A path argument resolved outside the confined root.
    PathEscape,
    /// The source entry does not exist.
    NotFound,
    /// The destination entry already exists.
    AlreadyExists,
    /// A data-URL payload was malformed.
    InvalidEncoding,
    /// Underlying filesystem failure, message passed through opaquely.
    Io,
}

/// Error details in a bridge reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeError {
    pub kind: ErrorKind,
    pub message: String,
}

impl BridgeError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for BridgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Envelope for every operation result crossing the bridge.
///
/// Cancellation is its own outcome: the renderer silently absorbs it
/// instead of surfacing an error message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Reply<T> {
    Ok {
        payload: T,
    },
    Cancelled,
    Error {
        #[serde(flatten)]
        error: BridgeError,
    },
}

impl<T> Reply<T> {
    pub fn ok(payload: T) -> Self {
        Reply::Ok { payload }
    }

    pub fn cancelled() -> Self {
        Reply::Cancelled
    }

    pub fn error(kind: ErrorKind, message: impl Into<String>) -> Self {
        Reply::Error {
            error: BridgeError::new(kind, message),
        }
    }

    /// Converts a domain result into a reply.
    pub fn from_result<E: Into<BridgeError>>(result: Result<T, E>) -> Self {
        match result {
            Ok(payload) => Reply::Ok { payload },
            Err(e) => Reply::Error { error: e.into() },
        }
    }

    /// The success payload, if any.
    pub fn into_payload(self) -> Option<T> {
        match self {
            Reply::Ok { payload } => Some(payload),
            _ => None,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Reply::Ok { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Reply::Cancelled)
    }
}

impl<T> From<BridgeError> for Reply<T> {
    fn from(error: BridgeError) -> Self {
        Reply::Error { error }
    }
}
