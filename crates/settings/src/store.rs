//! The persisted settings document.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Layout, SettingsError};

/// On-disk settings format (`state.json`).
///
/// Unknown fields from older revisions are dropped on the next write; the
/// document is always replaced whole, never patched in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// User-chosen asset root; absent means the default under the layout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets_root: Option<PathBuf>,
    /// Currently selected update archive, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_update_id: Option<String>,
}

/// Accessor for the settings document.
///
/// Every read comes from disk and every write replaces the whole file, so
/// persistence timing has a single well-defined choke point and no
/// staleness to reason about.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn for_layout(layout: &Layout) -> Self {
        Self::new(layout.settings_file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the document, tolerating absence and corruption.
    ///
    /// A missing file yields defaults; an unparseable file logs a warning
    /// and yields defaults rather than failing the caller.
    pub fn load(&self) -> Settings {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return Settings::default(),
        };
        match serde_json::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "failed to parse settings, using defaults"
                );
                Settings::default()
            }
        }
    }

    /// Replaces the document on disk.
    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, &json)?;
        tracing::debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }

    /// Read-modify-replace in one step.
    pub fn update(
        &self,
        mutate: impl FnOnce(&mut Settings),
    ) -> Result<Settings, SettingsError> {
        let mut settings = self.load();
        mutate(&mut settings);
        self.save(&settings)?;
        Ok(settings)
    }

    /// Resolves the effective asset root.
    ///
    /// A persisted root that still exists wins; otherwise the layout's
    /// default `assets/` dir is used and auto-created. Whenever the
    /// effective root differs from what the document says, the document is
    /// rewritten so restarts agree.
    pub fn resolve_assets_root(&self, layout: &Layout) -> Result<PathBuf, SettingsError> {
        let settings = self.load();
        let chosen = settings
            .assets_root
            .as_ref()
            .filter(|root| root.is_dir())
            .cloned();

        let root = match chosen {
            Some(root) => root,
            None => {
                let default = layout.assets_dir();
                fs::create_dir_all(&default)?;
                default
            }
        };

        if settings.assets_root.as_deref() != Some(root.as_path()) {
            self.update(|s| s.assets_root = Some(root.clone()))?;
            tracing::info!(root = %root.display(), "asset root fell back to default");
        }

        Ok(root)
    }
}
