//! The portable on-disk layout.

use std::path::{Path, PathBuf};

use crate::SettingsError;

/// Base directory name, created next to the executable.
const BASE_DIR_NAME: &str = "portable_data";

/// Locations of the application's on-disk trees.
#[derive(Debug, Clone)]
pub struct Layout {
    base: PathBuf,
}

impl Layout {
    /// A layout rooted at an explicit base directory.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// The portable layout: `portable_data` next to the executable,
    /// falling back to the current working directory.
    pub fn portable() -> Self {
        let parent = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            base: parent.join(BASE_DIR_NAME),
        }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Default confinement root for the asset store.
    pub fn assets_dir(&self) -> PathBuf {
        self.base.join("assets")
    }

    /// HTML module library directory.
    pub fn modules_dir(&self) -> PathBuf {
        self.base.join("modules")
    }

    /// Imported update archives.
    pub fn updates_dir(&self) -> PathBuf {
        self.base.join("updates")
    }

    /// The persisted settings document.
    pub fn settings_file(&self) -> PathBuf {
        self.base.join("state.json")
    }

    /// Creates the base directory and every subtree. Idempotent.
    pub fn ensure(&self) -> Result<(), SettingsError> {
        for dir in [
            self.base.clone(),
            self.assets_dir(),
            self.modules_dir(),
            self.updates_dir(),
        ] {
            std::fs::create_dir_all(&dir)?;
        }
        tracing::debug!(base = %self.base.display(), "portable layout ready");
        Ok(())
    }
}
