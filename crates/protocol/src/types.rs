use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Directory listings
// ---------------------------------------------------------------------------

/// One child of a listed directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirEntry {
    /// Entry name (not full path).
    pub name: String,
    /// Whether this entry is a directory.
    pub is_dir: bool,
    /// File size in bytes; directories report 0.
    pub size: u64,
    /// Modification time in epoch milliseconds.
    pub modified_ms: i64,
}

/// A fresh, non-recursive directory listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirListing {
    /// Canonicalized root-relative path of the directory that was listed
    /// (`""` for the root itself), forward slashes.
    pub path: String,
    pub entries: Vec<DirEntry>,
}

// ---------------------------------------------------------------------------
// Modules and updates
// ---------------------------------------------------------------------------

/// An identified HTML module loadable by the display process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRecord {
    pub id: String,
    /// Human-readable display name.
    pub name: String,
    /// Absolute host path of the module file.
    pub path: String,
    /// `file://` URL the display process can load.
    pub url: String,
    pub size: u64,
    pub modified_ms: i64,
}

/// An imported update archive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecord {
    pub id: String,
    pub file_name: String,
    /// Absolute host path of the archive.
    pub path: String,
    pub size: u64,
    pub imported_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Dialog options
// ---------------------------------------------------------------------------

/// An extension allow-list entry for a file dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileFilter {
    pub name: String,
    /// Extensions without the leading dot, e.g. `["png", "gif"]`.
    pub extensions: Vec<String>,
}

impl FileFilter {
    pub fn new(name: impl Into<String>, extensions: &[&str]) -> Self {
        Self {
            name: name.into(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
        }
    }
}

/// Parameters for an open-file or open-directory prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenDialogOptions {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_path: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<FileFilter>,
    #[serde(default)]
    pub multiple: bool,
}

/// Parameters for a save-file prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDialogOptions {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_path: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<FileFilter>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dir_entry_serialization() {
        let entry = DirEntry {
            name: "hero.png".into(),
            is_dir: false,
            size: 2048,
            modified_ms: 1_700_000_000_000,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"name\":\"hero.png\""));
        assert!(json.contains("\"isDir\":false"));
        assert!(json.contains("\"modifiedMs\":1700000000000"));
    }

    #[test]
    fn module_record_roundtrip() {
        let record = ModuleRecord {
            id: "intro".into(),
            name: "Intro Screen".into(),
            path: "/data/modules/intro.html".into(),
            url: "file:///data/modules/intro.html".into(),
            size: 120,
            modified_ms: 0,
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: ModuleRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn open_dialog_options_defaults() {
        let opts: OpenDialogOptions = serde_json::from_str(r#"{"title":"Pick"}"#).unwrap();
        assert_eq!(opts.title, "Pick");
        assert!(opts.filters.is_empty());
        assert!(!opts.multiple);
        assert!(opts.default_path.is_none());
    }

    #[test]
    fn empty_filter_list_is_omitted() {
        let opts = OpenDialogOptions {
            title: "Pick".into(),
            ..Default::default()
        };
        let json = serde_json::to_string(&opts).unwrap();
        assert!(!json.contains("filters"));
        assert!(!json.contains("defaultPath"));
    }
}
