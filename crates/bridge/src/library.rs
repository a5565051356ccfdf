//! Module and update operations.

use std::time::Duration;

use pixelmaker_module_library::{ChangeCallback, ModuleError, ModuleWatcher};
use pixelmaker_protocol::{
    BridgeError, FileFilter, ModuleRecord, OpenDialogOptions, Reply, UpdateRecord,
};

use crate::{AppApi, DialogProvider};

impl<D: DialogProvider> AppApi<D> {
    /// Prompts for an HTML file and imports it into the module library.
    pub fn add_module(&self) -> Reply<ModuleRecord> {
        let options = OpenDialogOptions {
            title: "Add Module (HTML)".into(),
            filters: vec![
                FileFilter::new("HTML", &["html", "htm"]),
                FileFilter::new("All Files", &["*"]),
            ],
            multiple: false,
            default_path: None,
        };
        let Some(paths) = self.dialogs().open_files(&options) else {
            return Reply::cancelled();
        };
        let Some(source) = paths.first() else {
            return Reply::cancelled();
        };

        Reply::from_result(pixelmaker_module_library::add(
            &self.layout().modules_dir(),
            source,
        ))
    }

    /// Scans the module library.
    pub fn list_modules(&self) -> Reply<Vec<ModuleRecord>> {
        Reply::from_result(pixelmaker_module_library::scan(&self.layout().modules_dir()))
    }

    /// Removes a module by id.
    pub fn remove_module(&self, id: &str) -> Reply<()> {
        Reply::from_result(pixelmaker_module_library::remove(
            &self.layout().modules_dir(),
            id,
        ))
    }

    /// Resolves a module id to a loadable `file://` URL.
    pub fn module_url(&self, id: &str) -> Reply<String> {
        Reply::from_result(
            pixelmaker_module_library::find(&self.layout().modules_dir(), id)
                .map(|record| record.url),
        )
    }

    /// Absolute path of the module directory (for "open folder").
    pub fn modules_dir(&self) -> Reply<String> {
        Reply::ok(self.layout().modules_dir().display().to_string())
    }

    /// Starts the debounced watch on the module directory.
    ///
    /// The returned handle belongs to the shell; the callback fires once
    /// per quiet period. Must be called within a tokio runtime.
    pub fn watch_modules(
        &self,
        window: Duration,
        on_change: ChangeCallback,
    ) -> Result<ModuleWatcher, ModuleError> {
        ModuleWatcher::start(&self.layout().modules_dir(), window, on_change)
    }

    /// Prompts for a zip archive, imports it, and marks it active.
    pub fn import_update(&self) -> Reply<UpdateRecord> {
        let options = OpenDialogOptions {
            title: "Import Update (ZIP)".into(),
            filters: vec![FileFilter::new("Zip Archive", &["zip"])],
            multiple: false,
            default_path: None,
        };
        let Some(paths) = self.dialogs().open_files(&options) else {
            return Reply::cancelled();
        };
        let Some(source) = paths.first() else {
            return Reply::cancelled();
        };

        let record = match pixelmaker_updates::import(&self.layout().updates_dir(), source) {
            Ok(record) => record,
            Err(e) => return Reply::from(BridgeError::from(e)),
        };
        if let Err(e) = self
            .settings()
            .update(|s| s.active_update_id = Some(record.id.clone()))
        {
            return Reply::from(BridgeError::from(e));
        }
        Reply::ok(record)
    }

    /// Lists imported update archives.
    pub fn list_updates(&self) -> Reply<Vec<UpdateRecord>> {
        Reply::from_result(pixelmaker_updates::list(&self.layout().updates_dir()))
    }

    /// Marks an imported archive as the active update.
    pub fn set_active_update(&self, id: &str) -> Reply<()> {
        if let Err(e) = pixelmaker_updates::find(&self.layout().updates_dir(), id) {
            return Reply::from(BridgeError::from(e));
        }
        match self
            .settings()
            .update(|s| s.active_update_id = Some(id.to_string()))
        {
            Ok(_) => Reply::ok(()),
            Err(e) => Reply::from(BridgeError::from(e)),
        }
    }

    /// The currently active update id, if any.
    pub fn active_update(&self) -> Reply<Option<String>> {
        Reply::ok(self.settings().load().active_update_id)
    }
}
