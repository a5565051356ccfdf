use std::path::Path;

use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

/// Fallback mime type for extensions outside the asset table.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Detects the mime type of an asset from its file extension.
///
/// The table covers exactly the image and audio formats the editor loads;
/// anything else is served as a generic binary.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("wav") => "audio/wav",
        Some("mp3") => "audio/mpeg",
        Some("ogg") => "audio/ogg",
        _ => OCTET_STREAM,
    }
}

/// Errors produced while decoding an inline-data payload.
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error("expected data:<mime>;base64,<payload>")]
    MalformedDataUrl,

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// A binary asset payload moving across the bridge.
///
/// The `data` field is base64-encoded in JSON so the renderer can feed it
/// straight into a data URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime: String,
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}

impl InlineData {
    pub fn new(mime: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            data,
        }
    }

    /// Formats the payload as a `data:` URL.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.data))
    }

    /// Parses and validates a `data:<mime>;base64,<payload>` string.
    ///
    /// The full shape is checked before any bytes are decoded so a caller
    /// can reject malformed input without side effects.
    pub fn parse_data_url(input: &str) -> Result<Self, EncodingError> {
        let rest = input
            .strip_prefix("data:")
            .ok_or(EncodingError::MalformedDataUrl)?;
        let (mime, payload) = rest
            .split_once(";base64,")
            .ok_or(EncodingError::MalformedDataUrl)?;
        if mime.is_empty() || !mime.contains('/') {
            return Err(EncodingError::MalformedDataUrl);
        }
        let data = STANDARD.decode(payload)?;
        Ok(Self {
            mime: mime.to_string(),
            data,
        })
    }
}

/// Serde adapter encoding byte payloads as base64 strings in JSON.
mod base64_bytes {
    use base64::{Engine, engine::general_purpose::STANDARD};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        STANDARD.encode(data).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}
