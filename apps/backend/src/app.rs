//! Headless host wiring: bridge surface, asset root, module watch.

use std::path::PathBuf;

use pixelmaker_bridge::{AppApi, DialogProvider};
use pixelmaker_module_library::DEFAULT_DEBOUNCE;
use pixelmaker_protocol::{OpenDialogOptions, Reply, SaveDialogOptions};
use pixelmaker_settings::Layout;

/// A headless host shows no prompts; every dialog reads as cancelled.
struct HeadlessDialogs;

impl DialogProvider for HeadlessDialogs {
    fn open_files(&self, _options: &OpenDialogOptions) -> Option<Vec<PathBuf>> {
        None
    }

    fn pick_folder(&self, _options: &OpenDialogOptions) -> Option<PathBuf> {
        None
    }

    fn save_file(&self, _options: &SaveDialogOptions) -> Option<PathBuf> {
        None
    }
}

pub async fn run(layout: Layout) -> anyhow::Result<()> {
    let modules_dir = layout.modules_dir();
    let api = AppApi::new(layout, HeadlessDialogs);

    match api.assets_root() {
        Reply::Ok { payload } => tracing::info!(root = %payload, "asset root resolved"),
        Reply::Error { error } => anyhow::bail!("failed to resolve asset root: {}", error.message),
        // assets_root never prompts.
        Reply::Cancelled => {}
    }

    if let Reply::Ok { payload } = api.list_modules() {
        tracing::info!(count = payload.len(), "module library scanned");
    }

    // Push one coalesced notification per quiet period on external edits.
    let rescan_dir = modules_dir.clone();
    let watcher = api.watch_modules(
        DEFAULT_DEBOUNCE,
        Box::new(move || match pixelmaker_module_library::scan(&rescan_dir) {
            Ok(records) => {
                tracing::info!(count = records.len(), "module directory changed");
            }
            Err(e) => tracing::warn!(error = %e, "module rescan failed"),
        }),
    )?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown requested");
    watcher.stop();
    Ok(())
}
