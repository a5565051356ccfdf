//! Asset operations: the directory-scoped CRUD surface.

use pixelmaker_protocol::{
    DirListing, ErrorKind, FileFilter, InlineData, OpenDialogOptions, Reply, SaveDialogOptions,
};

use crate::{AppApi, DialogProvider};

/// Extensions offered by the upload picker.
const ASSET_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "wav", "mp3", "ogg"];

impl<D: DialogProvider> AppApi<D> {
    /// Lists a directory under the root, creating it if missing.
    pub fn list(&self, relative_dir: &str) -> Reply<DirListing> {
        self.with_store(|store| store.list(relative_dir))
    }

    /// Creates a directory under `relative_parent`.
    pub fn make_dir(&self, relative_parent: &str, name: &str) -> Reply<String> {
        self.with_store(|store| store.make_dir(relative_parent, name))
    }

    /// Prompts for external files and copies them into `relative_dir`.
    ///
    /// Collisions rename to a free ` (n)` variant; the originals are
    /// never overwritten.
    pub fn upload(&self, relative_dir: &str) -> Reply<Vec<String>> {
        let store = match self.open_store() {
            Ok(store) => store,
            Err(e) => return e.into(),
        };

        let options = OpenDialogOptions {
            title: "Upload Assets".into(),
            filters: vec![FileFilter::new("Images & Audio", ASSET_EXTENSIONS)],
            multiple: true,
            default_path: None,
        };
        let Some(sources) = self.dialogs().open_files(&options) else {
            return Reply::cancelled();
        };

        let mut uploaded = Vec::with_capacity(sources.len());
        for source in &sources {
            match store.upload(relative_dir, source) {
                Ok(rel) => uploaded.push(rel),
                Err(e) => return Reply::from(pixelmaker_protocol::BridgeError::from(e)),
            }
        }
        Reply::ok(uploaded)
    }

    /// Renames an entry within its parent directory.
    pub fn rename(&self, relative_path: &str, new_name: &str) -> Reply<String> {
        self.with_store(|store| store.rename(relative_path, new_name))
    }

    /// Moves an entry anywhere under the root.
    pub fn move_entry(&self, source_rel: &str, dest_rel: &str) -> Reply<String> {
        self.with_store(|store| store.move_entry(source_rel, dest_rel))
    }

    /// Duplicates an entry next to itself (` copy` grammar).
    pub fn duplicate(&self, relative_path: &str) -> Reply<String> {
        self.with_store(|store| store.duplicate(relative_path))
    }

    /// Deletes an entry (recursive for directories).
    pub fn delete(&self, relative_path: &str) -> Reply<()> {
        self.with_store(|store| store.delete(relative_path))
    }

    /// Reads a file as UTF-8 text.
    pub fn read_text(&self, relative_path: &str) -> Reply<String> {
        self.with_store(|store| store.read_text(relative_path))
    }

    /// Reads a file as an inline base64 payload.
    pub fn read_inline(&self, relative_path: &str) -> Reply<InlineData> {
        self.with_store(|store| store.read_inline(relative_path))
    }

    /// Writes a data-URL payload to `relative_path` directly.
    pub fn write_inline(&self, relative_path: &str, data_url: &str) -> Reply<String> {
        self.with_store(|store| store.write_inline(relative_path, data_url))
    }

    /// Saves a data-URL payload through a save dialog.
    ///
    /// The payload is validated before the prompt appears; the chosen
    /// target must stay inside the asset root.
    pub fn save_inline(&self, suggested_rel: &str, data_url: &str) -> Reply<String> {
        if let Err(e) = InlineData::parse_data_url(data_url) {
            return Reply::error(ErrorKind::InvalidEncoding, e.to_string());
        }

        let store = match self.open_store() {
            Ok(store) => store,
            Err(e) => return e.into(),
        };
        let default_abs = match store.resolve(suggested_rel) {
            Ok(abs) => abs,
            Err(e) => return Reply::from(pixelmaker_protocol::BridgeError::from(e)),
        };

        let options = SaveDialogOptions {
            title: "Save Sprite to Assets".into(),
            default_path: Some(default_abs.display().to_string()),
            filters: vec![FileFilter::new("PNG Image", &["png"])],
        };
        let Some(target) = self.dialogs().save_file(&options) else {
            return Reply::cancelled();
        };

        let rel = match target.strip_prefix(store.root()) {
            Ok(rel) => rel.to_string_lossy().replace('\\', "/"),
            Err(_) => {
                return Reply::error(
                    ErrorKind::PathEscape,
                    format!("save must stay inside the assets root: {}", target.display()),
                );
            }
        };
        self.with_store(|store| store.write_inline(&rel, data_url))
    }

    /// Prompts for files inside the root and returns their relative paths.
    ///
    /// Picks outside the root are silently dropped.
    pub fn pick_assets(
        &self,
        relative_subdir: &str,
        filters: Vec<FileFilter>,
        multiple: bool,
    ) -> Reply<Vec<String>> {
        let store = match self.open_store() {
            Ok(store) => store,
            Err(e) => return e.into(),
        };
        let default_abs = match store.resolve(relative_subdir) {
            Ok(abs) => abs,
            Err(e) => return Reply::from(pixelmaker_protocol::BridgeError::from(e)),
        };
        if let Err(e) = std::fs::create_dir_all(&default_abs) {
            return Reply::error(ErrorKind::Io, e.to_string());
        }

        let filters = if filters.is_empty() {
            vec![FileFilter::new("PNG", &["png"])]
        } else {
            filters
        };
        let options = OpenDialogOptions {
            title: "Pick from Assets".into(),
            default_path: Some(default_abs.display().to_string()),
            filters,
            multiple,
        };

        let Some(picked) = self.dialogs().open_files(&options) else {
            return Reply::cancelled();
        };
        let rels = picked
            .iter()
            .filter_map(|path| path.strip_prefix(store.root()).ok())
            .map(|rel| rel.to_string_lossy().replace('\\', "/"))
            .collect();
        Reply::ok(rels)
    }

    /// Resolves an existing entry to a `file://` URL.
    pub fn resolve_url(&self, relative_path: &str) -> Reply<String> {
        self.with_store(|store| store.file_url(relative_path))
    }

    /// One directory level up, clamped at the root.
    pub fn parent_of(&self, relative_path: &str) -> Reply<String> {
        self.with_store(|store| store.parent_of(relative_path))
    }
}
