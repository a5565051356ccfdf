//! Portable data layout and the persisted settings document.
//!
//! Everything the application owns on disk lives under one base directory
//! next to the executable: an `assets/` tree, a `modules/` tree, an
//! `updates/` tree, and a small `state.json`. The settings document is
//! re-read from disk on every access and rewritten whole on every change;
//! the file is the source of truth.

mod layout;
mod store;

pub use layout::Layout;
pub use store::{Settings, SettingsStore};

/// Errors produced by the settings layer.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<SettingsError> for pixelmaker_protocol::BridgeError {
    fn from(err: SettingsError) -> Self {
        pixelmaker_protocol::BridgeError::new(pixelmaker_protocol::ErrorKind::Io, err.to_string())
    }
}
