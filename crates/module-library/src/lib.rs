//! HTML module library.
//!
//! Modules are standalone HTML snippets dropped into one directory. The
//! registry scan identifies each file from embedded metadata (or its
//! filename), imports copy new files in under collision-free names, and a
//! debounced watcher pushes one change notification per quiet period when
//! the directory is modified externally.

mod debounce;
mod error;
mod registry;
mod watch;

pub use debounce::{ChangeCallback, DEFAULT_DEBOUNCE, DebounceHandle, Debouncer};
pub use error::ModuleError;
pub use registry::{add, find, is_module_file, remove, scan};
pub use watch::ModuleWatcher;
