//! Imported update archives.
//!
//! Updates are zip archives copied into the `updates/` tree as-is; one of
//! them can be marked active via the settings document. Nothing here
//! extracts an archive — applying an update is a concern of the editor
//! runtime, not of this store.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use pixelmaker_asset_store::{sanitize_file_name, unique_name};
use pixelmaker_protocol::{BridgeError, ErrorKind, UpdateRecord};

/// Errors produced by the update store.
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    #[error("only .zip archives are supported: {0}")]
    Unsupported(String),

    #[error("update not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<UpdateError> for BridgeError {
    fn from(err: UpdateError) -> Self {
        let kind = match &err {
            UpdateError::Unsupported(_) => ErrorKind::InvalidEncoding,
            UpdateError::NotFound(_) => ErrorKind::NotFound,
            UpdateError::Io(_) => ErrorKind::Io,
        };
        BridgeError::new(kind, err.to_string())
    }
}

fn is_archive(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref(),
        Some("zip")
    )
}

/// Copies an external zip archive into the updates directory.
///
/// The basename is sanitized and renamed to a free ` (n)` variant on
/// collision; the record id is the final file stem.
pub fn import(updates_dir: &Path, source: &Path) -> Result<UpdateRecord, UpdateError> {
    if !is_archive(source) {
        return Err(UpdateError::Unsupported(source.display().to_string()));
    }
    if !source.is_file() {
        return Err(UpdateError::NotFound(source.display().to_string()));
    }

    fs::create_dir_all(updates_dir)?;
    let base = sanitize_file_name(&match source.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => String::new(),
    });
    let final_name = unique_name(updates_dir, &base);
    let dest = updates_dir.join(&final_name);
    fs::copy(source, &dest)?;

    tracing::info!(source = %source.display(), dest = %dest.display(), "imported update");
    read_record(&dest)
}

/// Lists imported archives, non-recursively, in name order.
///
/// A missing directory yields an empty list.
pub fn list(updates_dir: &Path) -> Result<Vec<UpdateRecord>, UpdateError> {
    if !updates_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut records = Vec::new();
    for entry in fs::read_dir(updates_dir)? {
        let Ok(entry) = entry else { continue };
        let path = entry.path();
        if path.is_file() && is_archive(&path) {
            records.push(read_record(&path)?);
        }
    }
    records.sort_by(|a, b| a.file_name.to_lowercase().cmp(&b.file_name.to_lowercase()));
    Ok(records)
}

/// Finds one imported archive by id.
pub fn find(updates_dir: &Path, id: &str) -> Result<UpdateRecord, UpdateError> {
    list(updates_dir)?
        .into_iter()
        .find(|record| record.id == id)
        .ok_or_else(|| UpdateError::NotFound(id.to_string()))
}

fn read_record(path: &Path) -> Result<UpdateRecord, UpdateError> {
    let metadata = fs::metadata(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let id = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let imported_at: DateTime<Utc> = metadata
        .modified()
        .map(DateTime::from)
        .unwrap_or_else(|_| Utc::now());

    Ok(UpdateRecord {
        id,
        file_name,
        path: path.display().to_string(),
        size: metadata.len(),
        imported_at,
    })
}
