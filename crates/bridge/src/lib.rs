//! The narrow surface between the privileged process and the display
//! process.
//!
//! Every operation takes root-relative paths, re-resolves the asset root
//! from the settings document, and returns the [`pixelmaker_protocol::Reply`]
//! envelope. No error or panic crosses this boundary as a fault, and user
//! cancellation is a distinct outcome the renderer absorbs silently.

mod api;
mod assets;
mod dialogs;
mod library;

#[cfg(test)]
pub(crate) mod test_support;

pub use api::AppApi;
pub use dialogs::DialogProvider;
