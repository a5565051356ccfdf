//! Shared fixtures for bridge tests: a scripted dialog provider and a
//! temp-dir harness.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use pixelmaker_protocol::{ErrorKind, OpenDialogOptions, Reply, SaveDialogOptions};
use pixelmaker_settings::Layout;

use crate::{AppApi, DialogProvider};

/// Dialog provider returning pre-scripted results in order.
///
/// An empty queue behaves like the user cancelling.
#[derive(Default)]
pub(crate) struct FakeDialogs {
    open_queue: Mutex<VecDeque<Option<Vec<PathBuf>>>>,
    folder_queue: Mutex<VecDeque<Option<PathBuf>>>,
    save_queue: Mutex<VecDeque<Option<PathBuf>>>,
    save_count: AtomicUsize,
}

impl FakeDialogs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_open(&self, result: Option<Vec<PathBuf>>) {
        self.open_queue.lock().unwrap().push_back(result);
    }

    pub fn push_folder(&self, result: Option<PathBuf>) {
        self.folder_queue.lock().unwrap().push_back(result);
    }

    pub fn push_save(&self, result: Option<PathBuf>) {
        self.save_queue.lock().unwrap().push_back(result);
    }

    /// How many save prompts were actually shown.
    pub fn save_prompts(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }
}

impl DialogProvider for FakeDialogs {
    fn open_files(&self, _options: &OpenDialogOptions) -> Option<Vec<PathBuf>> {
        self.open_queue.lock().unwrap().pop_front().flatten()
    }

    fn pick_folder(&self, _options: &OpenDialogOptions) -> Option<PathBuf> {
        self.folder_queue.lock().unwrap().pop_front().flatten()
    }

    fn save_file(&self, _options: &SaveDialogOptions) -> Option<PathBuf> {
        self.save_count.fetch_add(1, Ordering::SeqCst);
        self.save_queue.lock().unwrap().pop_front().flatten()
    }
}

pub(crate) struct Harness {
    pub api: AppApi<FakeDialogs>,
    base: PathBuf,
    _tmp: tempfile::TempDir,
}

impl Harness {
    /// The default asset root under the portable layout.
    pub fn assets_root(&self) -> PathBuf {
        self.api.layout().assets_dir()
    }

    /// A scratch directory guaranteed to be outside every confined root.
    pub fn outside_dir(&self) -> PathBuf {
        self.base.join("outside")
    }
}

pub(crate) fn harness() -> Harness {
    let tmp = tempfile::tempdir().unwrap();
    // Canonicalized so absolute paths handed to dialogs compare cleanly
    // against the store's canonical root.
    let base = tmp.path().canonicalize().unwrap();
    let layout = Layout::new(base.join("portable_data"));
    layout.ensure().unwrap();
    std::fs::create_dir_all(base.join("outside")).unwrap();

    Harness {
        api: AppApi::new(layout, FakeDialogs::new()),
        base,
        _tmp: tmp,
    }
}

/// Writes a file outside the confined root, as a picker would hand over.
pub(crate) fn external_file(h: &Harness, name: &str, bytes: &[u8]) -> PathBuf {
    let path = h.outside_dir().join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

/// Test-side unwrapping of the reply envelope.
pub(crate) trait ReplyExt<T> {
    fn unwrap_ok(self) -> T;
    fn unwrap_err_kind(self) -> ErrorKind;
}

impl<T: std::fmt::Debug> ReplyExt<T> for Reply<T> {
    fn unwrap_ok(self) -> T {
        match self {
            Reply::Ok { payload } => payload,
            other => panic!("expected ok reply, got {other:?}"),
        }
    }

    fn unwrap_err_kind(self) -> ErrorKind {
        match self {
            Reply::Error { error } => error.kind,
            other => panic!("expected error reply, got {other:?}"),
        }
    }
}
