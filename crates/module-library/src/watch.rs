//! Filesystem watch on the module directory.

use std::path::Path;
use std::time::Duration;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::debounce::{ChangeCallback, Debouncer};
use crate::ModuleError;

/// Watches the module directory and pushes one coalesced notification per
/// quiet period to the presentation layer.
///
/// The watcher only signals "something changed"; consumers re-scan the
/// registry to get the fresh state. Dropping the handle stops both the
/// watch and the debounce task.
pub struct ModuleWatcher {
    debouncer: Debouncer,
    // Kept alive for the lifetime of the watch; dropping it unregisters
    // the OS-level notification.
    _watcher: RecommendedWatcher,
}

impl ModuleWatcher {
    /// Starts watching `modules_dir` (non-recursive).
    ///
    /// Must be called within a tokio runtime; `on_change` runs on a
    /// runtime worker.
    pub fn start(
        modules_dir: &Path,
        window: Duration,
        on_change: ChangeCallback,
    ) -> Result<Self, ModuleError> {
        let debouncer = Debouncer::new(window, on_change);
        let handle = debouncer.handle();

        let mut watcher =
            notify::recommended_watcher(move |result: Result<Event, notify::Error>| {
                match result {
                    Ok(event) => {
                        if matches!(
                            event.kind,
                            EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                        ) {
                            handle.feed();
                        }
                    }
                    Err(e) => tracing::warn!(error = %e, "module watch error"),
                }
            })?;
        watcher.watch(modules_dir, RecursiveMode::NonRecursive)?;

        tracing::info!(dir = %modules_dir.display(), "watching module directory");
        Ok(Self {
            debouncer,
            _watcher: watcher,
        })
    }

    /// Stops the watch; no further notifications fire.
    pub fn stop(&self) {
        self.debouncer.shutdown();
    }
}
