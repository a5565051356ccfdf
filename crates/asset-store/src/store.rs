//! The confined file store.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use pixelmaker_protocol::{DirEntry, DirListing, InlineData, mime_for_path};

use crate::paths::{clean_relative, rel_display, sanitize_file_name, to_file_url};
use crate::{StoreError, duplicate_name, unique_name};

/// A file store confined to one root directory.
///
/// Holds no open handles; every operation resolves its arguments, acts,
/// and returns. Instances are cheap to create per call.
#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    /// Opens a store over an existing root directory.
    ///
    /// Fails fast with [`StoreError::NotFound`] if the root is missing —
    /// the store never creates a root on its own; that choice belongs to
    /// the settings layer.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(StoreError::NotFound(root.display().to_string()));
        }
        let root = fs::canonicalize(&root)?;
        Ok(Self { root })
    }

    /// The confinement boundary.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a relative path against the root, rejecting escapes.
    pub fn resolve(&self, relative: &str) -> Result<PathBuf, StoreError> {
        crate::paths::resolve(&self.root, relative)
    }

    /// Lists the immediate children of a directory.
    ///
    /// A missing directory is created rather than treated as an error:
    /// the root may be freshly chosen and subdirectories may not exist
    /// yet. Entries come back in case-insensitive name order.
    pub fn list(&self, relative_dir: &str) -> Result<DirListing, StoreError> {
        let clean = clean_relative(relative_dir)?;
        let abs = self.root.join(&clean);
        fs::create_dir_all(&abs)?;

        let mut entries = Vec::new();
        for entry in fs::read_dir(&abs)? {
            let entry = entry?;
            let Ok(metadata) = entry.metadata() else {
                continue;
            };
            let name = entry.file_name().to_string_lossy().into_owned();
            entries.push(DirEntry {
                name,
                is_dir: metadata.is_dir(),
                size: if metadata.is_dir() { 0 } else { metadata.len() },
                modified_ms: modified_ms(&metadata),
            });
        }
        entries.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

        Ok(DirListing {
            path: rel_display(&clean),
            entries,
        })
    }

    /// Creates a directory (and any missing parents) under `relative_parent`.
    ///
    /// Succeeds if it already exists. Returns the new relative path.
    pub fn make_dir(&self, relative_parent: &str, name: &str) -> Result<String, StoreError> {
        let name = sanitize_file_name(name);
        let clean = clean_relative(relative_parent)?;
        let abs = self.root.join(&clean).join(&name);
        fs::create_dir_all(&abs)?;
        tracing::debug!(path = %abs.display(), "created directory");
        Ok(rel_display(&clean.join(&name)))
    }

    /// Copies an external file into a directory under the root.
    ///
    /// The source path is not confined (it comes from a picker dialog);
    /// its basename is sanitized and renamed to a free ` (n)` variant on
    /// collision. Returns the relative path of the new file.
    pub fn upload(&self, relative_dir: &str, source: &Path) -> Result<String, StoreError> {
        if !source.is_file() {
            return Err(StoreError::NotFound(source.display().to_string()));
        }
        let clean = clean_relative(relative_dir)?;
        let dir_abs = self.root.join(&clean);
        fs::create_dir_all(&dir_abs)?;

        let base = sanitize_file_name(&match source.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => String::new(),
        });
        let final_name = unique_name(&dir_abs, &base);
        fs::copy(source, dir_abs.join(&final_name))?;

        tracing::info!(
            source = %source.display(),
            dest = %dir_abs.join(&final_name).display(),
            "uploaded asset"
        );
        Ok(rel_display(&clean.join(&final_name)))
    }

    /// Renames an entry in place, keeping it under the same parent.
    ///
    /// An existing destination is never overwritten: a different entry at
    /// the target name, or a rename to the unchanged name, rejects with
    /// [`StoreError::AlreadyExists`]. A pure case-change of the same
    /// on-disk entry is allowed, since no bytes can be lost.
    pub fn rename(&self, relative_path: &str, new_name: &str) -> Result<String, StoreError> {
        let clean = clean_relative(relative_path)?;
        let Some(current_name) = clean.file_name().map(|n| n.to_string_lossy().into_owned())
        else {
            return Err(StoreError::PathEscape(relative_path.to_string()));
        };
        let src_abs = self.root.join(&clean);
        if !src_abs.exists() {
            return Err(StoreError::NotFound(relative_path.to_string()));
        }

        let new_name = sanitize_file_name(new_name);
        let dest_clean = clean.with_file_name(&new_name);
        let dest_abs = self.root.join(&dest_clean);

        if dest_abs.exists() {
            // On a case-insensitive filesystem the destination may be the
            // same on-disk entry under a different spelling.
            let same_entry = fs::canonicalize(&src_abs)? == fs::canonicalize(&dest_abs)?;
            if !same_entry || new_name == current_name {
                return Err(StoreError::AlreadyExists(rel_display(&dest_clean)));
            }
        }

        fs::rename(&src_abs, &dest_abs)?;
        tracing::info!(from = %src_abs.display(), to = %dest_abs.display(), "renamed entry");
        Ok(rel_display(&dest_clean))
    }

    /// Moves an entry anywhere under the root.
    ///
    /// Destination parents are created on demand; an existing destination
    /// rejects with [`StoreError::AlreadyExists`].
    pub fn move_entry(&self, source_rel: &str, dest_rel: &str) -> Result<String, StoreError> {
        let src_clean = clean_relative(source_rel)?;
        let src_abs = self.root.join(&src_clean);
        if !src_abs.exists() {
            return Err(StoreError::NotFound(source_rel.to_string()));
        }

        let dest_clean = clean_relative(dest_rel)?;
        let dest_abs = self.root.join(&dest_clean);
        if dest_abs.exists() {
            return Err(StoreError::AlreadyExists(rel_display(&dest_clean)));
        }
        if let Some(parent) = dest_abs.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::rename(&src_abs, &dest_abs)?;
        tracing::info!(from = %src_abs.display(), to = %dest_abs.display(), "moved entry");
        Ok(rel_display(&dest_clean))
    }

    /// Duplicates an entry next to itself using the ` copy` grammar.
    ///
    /// Files are copied; directories are copied recursively.
    pub fn duplicate(&self, relative_path: &str) -> Result<String, StoreError> {
        let clean = clean_relative(relative_path)?;
        let Some(name) = clean.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            return Err(StoreError::PathEscape(relative_path.to_string()));
        };
        let abs = self.root.join(&clean);
        if !abs.exists() {
            return Err(StoreError::NotFound(relative_path.to_string()));
        }

        let parent_clean = clean.parent().map(Path::to_path_buf).unwrap_or_default();
        let parent_abs = self.root.join(&parent_clean);
        let copy_name = duplicate_name(&parent_abs, &name);
        let dest_abs = parent_abs.join(&copy_name);

        if abs.is_dir() {
            copy_dir_recursive(&abs, &dest_abs)?;
        } else {
            fs::copy(&abs, &dest_abs)?;
        }

        tracing::info!(from = %abs.display(), to = %dest_abs.display(), "duplicated entry");
        Ok(rel_display(&parent_clean.join(&copy_name)))
    }

    /// Deletes an entry: recursive for directories, unlink for files.
    ///
    /// A missing target is reported as [`StoreError::NotFound`]; deleting
    /// the root itself is refused.
    pub fn delete(&self, relative_path: &str) -> Result<(), StoreError> {
        let clean = clean_relative(relative_path)?;
        if clean.as_os_str().is_empty() {
            // The root itself is never a deletable entry.
            return Err(StoreError::PathEscape(relative_path.to_string()));
        }
        let abs = self.root.join(&clean);
        if !abs.exists() {
            return Err(StoreError::NotFound(relative_path.to_string()));
        }

        if abs.is_dir() {
            fs::remove_dir_all(&abs)?;
        } else {
            fs::remove_file(&abs)?;
        }
        tracing::info!(path = %abs.display(), "deleted entry");
        Ok(())
    }

    /// Reads a file as UTF-8 text.
    pub fn read_text(&self, relative_path: &str) -> Result<String, StoreError> {
        let abs = self.resolve(relative_path)?;
        if !abs.is_file() {
            return Err(StoreError::NotFound(relative_path.to_string()));
        }
        Ok(fs::read_to_string(&abs)?)
    }

    /// Reads a file as an inline base64 payload with its mime type
    /// inferred from the extension table.
    pub fn read_inline(&self, relative_path: &str) -> Result<InlineData, StoreError> {
        let abs = self.resolve(relative_path)?;
        if !abs.is_file() {
            return Err(StoreError::NotFound(relative_path.to_string()));
        }
        let data = fs::read(&abs)?;
        Ok(InlineData::new(mime_for_path(&abs), data))
    }

    /// Decodes a `data:<mime>;base64,<payload>` string and writes the
    /// bytes to `relative_path`, creating parent directories.
    ///
    /// The payload is validated in full before anything is written.
    pub fn write_inline(&self, relative_path: &str, data_url: &str) -> Result<String, StoreError> {
        let payload = InlineData::parse_data_url(data_url)?;
        let clean = clean_relative(relative_path)?;
        if clean.as_os_str().is_empty() {
            return Err(StoreError::PathEscape(relative_path.to_string()));
        }
        let abs = self.root.join(&clean);
        if let Some(parent) = abs.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&abs, &payload.data)?;
        tracing::info!(path = %abs.display(), bytes = payload.data.len(), "wrote inline asset");
        Ok(rel_display(&clean))
    }

    /// Resolves an existing entry to a `file://` URL the display process
    /// can load.
    pub fn file_url(&self, relative_path: &str) -> Result<String, StoreError> {
        let abs = self.resolve(relative_path)?;
        if !abs.exists() {
            return Err(StoreError::NotFound(relative_path.to_string()));
        }
        Ok(to_file_url(&abs))
    }

    /// One directory level up from `relative_path`, clamped at the root.
    pub fn parent_of(&self, relative_path: &str) -> Result<String, StoreError> {
        let clean = clean_relative(relative_path)?;
        Ok(clean.parent().map(rel_display).unwrap_or_default())
    }
}

fn modified_ms(metadata: &fs::Metadata) -> i64 {
    metadata
        .modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

fn copy_dir_recursive(src: &Path, dest: &Path) -> Result<(), StoreError> {
    fs::create_dir_all(dest)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        if entry.metadata()?.is_dir() {
            copy_dir_recursive(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
