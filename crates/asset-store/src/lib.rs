//! Root-confined filesystem store for the asset library.
//!
//! Every operation takes a slash-separated path relative to a designated
//! root directory and is rejected before any I/O if it would resolve
//! outside that root. The store holds no handles between calls; each
//! operation opens, acts, and returns.

mod error;
mod naming;
mod paths;
mod store;

pub use error::StoreError;
pub use naming::{duplicate_name, unique_name};
pub use paths::{clean_relative, resolve, sanitize_file_name, to_file_url};
pub use store::AssetStore;
