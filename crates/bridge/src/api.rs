//! The bridge entry point.

use pixelmaker_asset_store::{AssetStore, StoreError};
use pixelmaker_protocol::{BridgeError, ErrorKind, OpenDialogOptions, Reply};
use pixelmaker_settings::{Layout, SettingsStore};

use crate::DialogProvider;

/// Operation surface exposed to the display process.
///
/// Owns the portable layout, the settings accessor, and the dialog
/// capability. Stateless between calls: the asset root is re-resolved
/// from the settings document on every operation, so an externally
/// edited `state.json` takes effect immediately.
pub struct AppApi<D: DialogProvider> {
    layout: Layout,
    settings: SettingsStore,
    dialogs: D,
}

impl<D: DialogProvider> AppApi<D> {
    pub fn new(layout: Layout, dialogs: D) -> Self {
        let settings = SettingsStore::for_layout(&layout);
        Self {
            layout,
            settings,
            dialogs,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn dialogs(&self) -> &D {
        &self.dialogs
    }

    /// Opens a store over the currently effective asset root.
    pub(crate) fn open_store(&self) -> Result<AssetStore, BridgeError> {
        let root = self.settings.resolve_assets_root(&self.layout)?;
        Ok(AssetStore::open(root)?)
    }

    /// Runs one store operation, folding every failure into the envelope.
    pub(crate) fn with_store<T>(
        &self,
        operation: impl FnOnce(&AssetStore) -> Result<T, StoreError>,
    ) -> Reply<T> {
        match self.open_store() {
            Ok(store) => Reply::from_result(operation(&store)),
            Err(e) => e.into(),
        }
    }

    /// Absolute path of the effective asset root (for "open folder").
    pub fn assets_root(&self) -> Reply<String> {
        match self.open_store() {
            Ok(store) => Reply::ok(store.root().display().to_string()),
            Err(e) => e.into(),
        }
    }

    /// Lets the user choose a new asset root and persists the choice.
    pub fn choose_assets_root(&self) -> Reply<String> {
        let default_path = self
            .open_store()
            .ok()
            .map(|store| store.root().display().to_string());
        let options = OpenDialogOptions {
            title: "Choose Assets Folder".into(),
            default_path,
            ..Default::default()
        };

        let Some(chosen) = self.dialogs.pick_folder(&options) else {
            return Reply::cancelled();
        };
        if !chosen.is_dir() {
            return Reply::error(
                ErrorKind::NotFound,
                format!("not a directory: {}", chosen.display()),
            );
        }

        if let Err(e) = self
            .settings
            .update(|s| s.assets_root = Some(chosen.clone()))
        {
            return BridgeError::from(e).into();
        }
        tracing::info!(root = %chosen.display(), "asset root changed");
        Reply::ok(chosen.display().to_string())
    }
}
