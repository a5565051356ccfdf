//! Module registry scan and import.

use std::fs;
use std::path::Path;
use std::time::UNIX_EPOCH;

use pixelmaker_asset_store::{sanitize_file_name, to_file_url, unique_name};
use pixelmaker_protocol::ModuleRecord;

use crate::ModuleError;

/// Whether a path names a module file (`.html`/`.htm`).
pub fn is_module_file(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref(),
        Some("html" | "htm")
    )
}

/// Scans the module directory, non-recursively.
///
/// Entries are visited in case-insensitive name order so identity
/// collisions resolve the same way on every platform: the first file
/// carrying an id claims it. Unreadable files are skipped with a warning.
/// A missing directory yields an empty registry.
pub fn scan(modules_dir: &Path) -> Result<Vec<ModuleRecord>, ModuleError> {
    if !modules_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut names: Vec<String> = fs::read_dir(modules_dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| is_module_file(Path::new(name)))
        .collect();
    names.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()));

    let mut seen = std::collections::HashSet::new();
    let mut records = Vec::new();
    for name in names {
        let path = modules_dir.join(&name);
        let record = match read_record(&path) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable module");
                continue;
            }
        };
        if seen.insert(record.id.clone()) {
            records.push(record);
        }
    }
    Ok(records)
}

/// Finds one module by id.
pub fn find(modules_dir: &Path, id: &str) -> Result<ModuleRecord, ModuleError> {
    scan(modules_dir)?
        .into_iter()
        .find(|record| record.id == id)
        .ok_or_else(|| ModuleError::NotFound(id.to_string()))
}

/// Copies an external HTML file into the module directory.
///
/// Anything that is not `.html`/`.htm` is rejected before touching the
/// filesystem. The basename is sanitized and renamed to a free ` (n)`
/// variant on collision.
pub fn add(modules_dir: &Path, source: &Path) -> Result<ModuleRecord, ModuleError> {
    if !is_module_file(source) {
        return Err(ModuleError::Unsupported(source.display().to_string()));
    }
    if !source.is_file() {
        return Err(ModuleError::NotFound(source.display().to_string()));
    }

    fs::create_dir_all(modules_dir)?;
    let base = sanitize_file_name(&match source.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => String::new(),
    });
    let final_name = unique_name(modules_dir, &base);
    let dest = modules_dir.join(&final_name);
    fs::copy(source, &dest)?;

    tracing::info!(source = %source.display(), dest = %dest.display(), "added module");
    read_record(&dest)
}

/// Removes the module with the given id.
pub fn remove(modules_dir: &Path, id: &str) -> Result<(), ModuleError> {
    let record = find(modules_dir, id)?;
    fs::remove_file(&record.path)?;
    tracing::info!(id, path = %record.path, "removed module");
    Ok(())
}

fn read_record(path: &Path) -> Result<ModuleRecord, ModuleError> {
    let metadata = fs::metadata(path)?;
    let html = fs::read_to_string(path)?;
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let (id, name) = extract_identity(&html, &stem);
    Ok(ModuleRecord {
        id,
        name,
        path: path.display().to_string(),
        url: to_file_url(path),
        size: metadata.len(),
        modified_ms: metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0),
    })
}

/// Extracts `(id, display name)` from module HTML.
///
/// Priority: `<!-- @module id="…" name="…" -->` comment marker, then
/// `<meta name="module-id" content="…">` (display name from the
/// `module-name` meta), then the filename with the page title as name.
fn extract_identity(html: &str, stem: &str) -> (String, String) {
    let title = page_title(html);

    if let Some((id, name)) = comment_marker(html) {
        let name = name.or_else(|| title.clone()).unwrap_or_else(|| stem.to_string());
        return (id, name);
    }

    if let Some(id) = meta_content(html, "module-id") {
        let name = meta_content(html, "module-name")
            .or(title)
            .unwrap_or_else(|| stem.to_string());
        return (id, name);
    }

    let name = title.unwrap_or_else(|| stem.to_string());
    (stem.to_string(), name)
}

/// Text content of the first `<title>…</title>` element, trimmed.
fn page_title(html: &str) -> Option<String> {
    let start = html.find("<title")?;
    let after_tag = &html[start..];
    let content_start = after_tag.find('>')? + 1;
    let rest = &after_tag[content_start..];
    let end = rest.find("</title>")?;
    let value = rest[..end].trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn comment_marker(html: &str) -> Option<(String, Option<String>)> {
    let mut rest = html;
    while let Some(start) = rest.find("<!--") {
        let after = &rest[start + 4..];
        let end = after.find("-->")?;
        let body = &after[..end];
        if body.contains("@module")
            && let Some(id) = attr_value(body, "id")
        {
            return Some((id, attr_value(body, "name")));
        }
        rest = &after[end + 3..];
    }
    None
}

fn meta_content(html: &str, meta_name: &str) -> Option<String> {
    let mut rest = html;
    while let Some(start) = rest.find("<meta") {
        let after = &rest[start..];
        let end = after.find('>')?;
        let tag = &after[..end];
        if attr_value(tag, "name").as_deref() == Some(meta_name)
            && let Some(content) = attr_value(tag, "content")
        {
            return Some(content);
        }
        rest = &after[end + 1..];
    }
    None
}

/// Value of a `key="value"` attribute inside a tag or marker body.
fn attr_value(source: &str, key: &str) -> Option<String> {
    let pattern = format!("{key}=\"");
    let start = source.find(&pattern)? + pattern.len();
    let rest = &source[start..];
    let end = rest.find('"')?;
    let value = rest[..end].trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_module(dir: &Path, name: &str, html: &str) {
        fs::write(dir.join(name), html).unwrap();
    }

    #[test]
    fn scan_missing_dir_is_empty() {
        let records = scan(Path::new("/definitely/not/real")).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn scan_filters_to_html_files() {
        let tmp = tempfile::tempdir().unwrap();
        write_module(tmp.path(), "intro.html", "<html></html>");
        write_module(tmp.path(), "menu.htm", "<html></html>");
        write_module(tmp.path(), "notes.txt", "not a module");
        fs::create_dir(tmp.path().join("nested.html")).unwrap();

        let records = scan(tmp.path()).unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["intro", "menu"]);
    }

    #[test]
    fn comment_marker_wins() {
        let tmp = tempfile::tempdir().unwrap();
        write_module(
            tmp.path(),
            "file.html",
            "<!-- @module id=\"intro\" name=\"Intro Screen\" -->\n<title>Ignored</title>",
        );

        let records = scan(tmp.path()).unwrap();
        assert_eq!(records[0].id, "intro");
        assert_eq!(records[0].name, "Intro Screen");
    }

    #[test]
    fn comment_marker_without_name_uses_title() {
        let tmp = tempfile::tempdir().unwrap();
        write_module(
            tmp.path(),
            "file.html",
            "<!-- @module id=\"intro\" -->\n<title>Intro Screen</title>",
        );

        let records = scan(tmp.path()).unwrap();
        assert_eq!(records[0].id, "intro");
        assert_eq!(records[0].name, "Intro Screen");
    }

    #[test]
    fn meta_tag_is_second_choice() {
        let tmp = tempfile::tempdir().unwrap();
        write_module(
            tmp.path(),
            "file.html",
            "<head><meta name=\"module-id\" content=\"hud\">\
             <meta name=\"module-name\" content=\"HUD Overlay\"></head>",
        );

        let records = scan(tmp.path()).unwrap();
        assert_eq!(records[0].id, "hud");
        assert_eq!(records[0].name, "HUD Overlay");
    }

    #[test]
    fn filename_fallback_uses_title_as_name() {
        let tmp = tempfile::tempdir().unwrap();
        write_module(
            tmp.path(),
            "pause-menu.html",
            "<html><title>Pause Menu</title></html>",
        );
        write_module(tmp.path(), "bare.html", "<html></html>");

        let records = scan(tmp.path()).unwrap();
        let bare = records.iter().find(|r| r.id == "bare").unwrap();
        assert_eq!(bare.name, "bare");
        let pause = records.iter().find(|r| r.id == "pause-menu").unwrap();
        assert_eq!(pause.name, "Pause Menu");
    }

    #[test]
    fn duplicate_ids_first_wins_in_scan_order() {
        let tmp = tempfile::tempdir().unwrap();
        write_module(
            tmp.path(),
            "alpha.html",
            "<!-- @module id=\"intro\" name=\"Alpha\" -->",
        );
        write_module(
            tmp.path(),
            "beta.html",
            "<!-- @module id=\"intro\" name=\"Beta\" -->",
        );

        let records = scan(tmp.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Alpha");
        assert!(records[0].path.ends_with("alpha.html"));
    }

    #[test]
    fn records_carry_url_and_stat() {
        let tmp = tempfile::tempdir().unwrap();
        write_module(tmp.path(), "intro.html", "<html></html>");

        let records = scan(tmp.path()).unwrap();
        assert!(records[0].url.starts_with("file:///"));
        assert!(records[0].url.ends_with("/intro.html"));
        assert_eq!(records[0].size, "<html></html>".len() as u64);
        assert!(records[0].modified_ms > 0);
    }

    #[test]
    fn add_copies_under_unique_name() {
        let tmp = tempfile::tempdir().unwrap();
        let modules = tmp.path().join("modules");
        let external = tmp.path().join("src");
        fs::create_dir_all(&external).unwrap();
        fs::write(external.join("intro.html"), "<html></html>").unwrap();

        let first = add(&modules, &external.join("intro.html")).unwrap();
        assert_eq!(first.id, "intro");

        let second = add(&modules, &external.join("intro.html")).unwrap();
        assert!(second.path.ends_with("intro (1).html"));
    }

    #[test]
    fn add_rejects_non_html() {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("payload.txt");
        fs::write(&source, "x").unwrap();

        let err = add(tmp.path(), &source).unwrap_err();
        assert!(matches!(err, ModuleError::Unsupported(_)));
    }

    #[test]
    fn add_missing_source_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let err = add(tmp.path(), Path::new("/external/ghost.html")).unwrap_err();
        assert!(matches!(err, ModuleError::NotFound(_)));
    }

    #[test]
    fn remove_unlinks_by_id() {
        let tmp = tempfile::tempdir().unwrap();
        write_module(tmp.path(), "intro.html", "<!-- @module id=\"intro\" -->");

        remove(tmp.path(), "intro").unwrap();
        assert!(scan(tmp.path()).unwrap().is_empty());

        let err = remove(tmp.path(), "intro").unwrap_err();
        assert!(matches!(err, ModuleError::NotFound(_)));
    }

    #[test]
    fn find_by_id() {
        let tmp = tempfile::tempdir().unwrap();
        write_module(tmp.path(), "intro.html", "<html></html>");

        assert_eq!(find(tmp.path(), "intro").unwrap().id, "intro");
        assert!(matches!(
            find(tmp.path(), "ghost"),
            Err(ModuleError::NotFound(_))
        ));
    }
}
