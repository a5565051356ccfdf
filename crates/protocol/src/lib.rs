//! Wire types for the PixelMaker bridge.
//!
//! Everything the display process sends or receives is defined here: the
//! reply envelope, directory listings, module and update records, inline
//! asset payloads, and dialog option types. All structs serialize with
//! camelCase field names to match the renderer's expectations.

mod envelope;
mod inline;
mod types;

pub use envelope::{BridgeError, ErrorKind, Reply};
pub use inline::{EncodingError, InlineData, mime_for_path};
pub use types::{
    DirEntry, DirListing, FileFilter, ModuleRecord, OpenDialogOptions, SaveDialogOptions,
    UpdateRecord,
};
