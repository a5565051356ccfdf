//! Native picker capability.

use std::path::PathBuf;

use pixelmaker_protocol::{OpenDialogOptions, SaveDialogOptions};

/// Native file/folder prompts, surfaced by the GUI shell.
///
/// The bridge only consumes results: a list of absolute host paths, a
/// single target path, or `None` when the user dismissed the prompt.
/// Cancellation is not an error; callers turn it into the cancelled reply
/// variant.
pub trait DialogProvider: Send + Sync {
    /// Open-file prompt. Honors `options.multiple`.
    fn open_files(&self, options: &OpenDialogOptions) -> Option<Vec<PathBuf>>;

    /// Open-directory prompt.
    fn pick_folder(&self, options: &OpenDialogOptions) -> Option<PathBuf>;

    /// Save-file prompt.
    fn save_file(&self, options: &SaveDialogOptions) -> Option<PathBuf>;
}
