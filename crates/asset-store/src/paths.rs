//! Path confinement, sanitization, and display-URL helpers.

use std::path::{Component, Path, PathBuf};

use crate::StoreError;

/// Lexically normalizes a caller-supplied relative path.
///
/// Collapses `.` and `..` segments and accepts backslash separators.
/// Rejects with [`StoreError::PathEscape`] when a `..` would climb above
/// the (implied) root or when the path is absolute or carries a Windows
/// prefix. Normalization happens here, before any filesystem access.
pub fn clean_relative(relative: &str) -> Result<PathBuf, StoreError> {
    let normalized = relative.replace('\\', "/");
    let mut clean = PathBuf::new();
    let mut depth = 0usize;

    for component in Path::new(&normalized).components() {
        match component {
            Component::Normal(part) => {
                clean.push(part);
                depth += 1;
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    return Err(StoreError::PathEscape(relative.to_string()));
                }
                clean.pop();
                depth -= 1;
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(StoreError::PathEscape(relative.to_string()));
            }
        }
    }

    Ok(clean)
}

/// Resolves a relative path against a root, guaranteeing containment.
///
/// The returned absolute path is equal to or a descendant of `root`.
/// The check is component-wise, never a string-prefix comparison, so a
/// sibling directory sharing a name prefix cannot slip through.
pub fn resolve(root: &Path, relative: &str) -> Result<PathBuf, StoreError> {
    let clean = clean_relative(relative)?;
    let abs = root.join(&clean);
    if !abs.starts_with(root) {
        return Err(StoreError::PathEscape(relative.to_string()));
    }
    Ok(abs)
}

/// Renders a normalized relative path with forward slashes.
pub(crate) fn rel_display(rel: &Path) -> String {
    let parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    parts.join("/")
}

/// Replaces characters illegal in filesystem names with `_`.
///
/// Applied to every filename that originates outside the root (upload
/// basenames, rename targets, mkdir names), independent of the
/// containment check. An empty or dot-only result becomes `unnamed`.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if (c as u32) < 0x20 => '_',
            c => c,
        })
        .collect();

    let trimmed = cleaned.trim();
    if trimmed.is_empty() || trimmed.chars().all(|c| c == '.') {
        "unnamed".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Builds a percent-encoded `file://` URL for an absolute path.
pub fn to_file_url(abs: &Path) -> String {
    let mut p = abs.to_string_lossy().replace('\\', "/");
    if !p.starts_with('/') {
        p.insert(0, '/');
    }
    format!("file://{}", encode_uri(&p))
}

/// Percent-encodes a path for use in a URL, keeping separators and the
/// characters browsers accept unescaped.
fn encode_uri(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for &b in input.as_bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' => out.push(b as char),
            b'/' | b'-' | b'_' | b'.' | b'~' | b'!' | b'$' | b'&' | b'\'' | b'(' | b')'
            | b'*' | b'+' | b',' | b';' | b'=' | b':' | b'@' => out.push(b as char),
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_plain_subpath() {
        let root = Path::new("/data/assets");
        let abs = resolve(root, "sprites/hero.png").unwrap();
        assert_eq!(abs, PathBuf::from("/data/assets/sprites/hero.png"));
    }

    #[test]
    fn resolve_empty_is_root() {
        let root = Path::new("/data/assets");
        assert_eq!(resolve(root, "").unwrap(), root);
    }

    #[test]
    fn resolve_collapses_dot_segments() {
        let root = Path::new("/data/assets");
        let abs = resolve(root, "./sprites/../audio/theme.ogg").unwrap();
        assert_eq!(abs, PathBuf::from("/data/assets/audio/theme.ogg"));
    }

    #[test]
    fn resolve_rejects_parent_traversal() {
        let root = Path::new("/data/assets");
        let err = resolve(root, "../../etc/passwd").unwrap_err();
        assert!(matches!(err, StoreError::PathEscape(_)));
    }

    #[test]
    fn resolve_rejects_nested_traversal() {
        let root = Path::new("/data/assets");
        assert!(resolve(root, "sprites/../../escape").is_err());
        assert!(resolve(root, "a/b/../../../escape").is_err());
    }

    #[test]
    fn resolve_rejects_absolute_path() {
        let root = Path::new("/data/assets");
        assert!(resolve(root, "/etc/passwd").is_err());
    }

    #[test]
    fn resolve_accepts_backslash_separators() {
        let root = Path::new("/data/assets");
        let abs = resolve(root, "sprites\\hero.png").unwrap();
        assert_eq!(abs, PathBuf::from("/data/assets/sprites/hero.png"));
        assert!(resolve(root, "..\\..\\escape").is_err());
    }

    #[test]
    fn resolve_never_escapes_regardless_of_depth() {
        let root = Path::new("/data/assets");
        for rel in [
            "..",
            "../",
            "../..",
            "../../../../../../..",
            "a/../..",
            "./../x",
        ] {
            match resolve(root, rel) {
                Ok(abs) => assert!(abs.starts_with(root), "{rel} resolved to {abs:?}"),
                Err(StoreError::PathEscape(_)) => {}
                Err(other) => panic!("unexpected error for {rel}: {other}"),
            }
        }
    }

    #[test]
    fn literal_dot_dot_lookalikes_stay_inside() {
        // Percent-encoded traversal is not decoded; it names a literal
        // (if odd) entry under the root.
        let root = Path::new("/data/assets");
        let abs = resolve(root, "%2e%2e/file").unwrap();
        assert!(abs.starts_with(root));
    }

    #[test]
    fn rel_display_uses_forward_slashes() {
        let clean = clean_relative("sprites/./enemies").unwrap();
        assert_eq!(rel_display(&clean), "sprites/enemies");
        assert_eq!(rel_display(&clean_relative("").unwrap()), "");
    }

    #[test]
    fn sanitize_replaces_illegal_characters() {
        assert_eq!(sanitize_file_name("he:ro?.png"), "he_ro_.png");
        assert_eq!(sanitize_file_name("a/b\\c"), "a_b_c");
        assert_eq!(sanitize_file_name("tab\there"), "tab_here");
    }

    #[test]
    fn sanitize_keeps_ordinary_names() {
        assert_eq!(sanitize_file_name("hero (1).png"), "hero (1).png");
        assert_eq!(sanitize_file_name(".gitignore"), ".gitignore");
    }

    #[test]
    fn sanitize_rejects_empty_and_dot_names() {
        assert_eq!(sanitize_file_name(""), "unnamed");
        assert_eq!(sanitize_file_name("   "), "unnamed");
        assert_eq!(sanitize_file_name(".."), "unnamed");
    }

    #[test]
    fn file_url_encodes_spaces() {
        let url = to_file_url(Path::new("/data/my assets/hero.png"));
        assert_eq!(url, "file:///data/my%20assets/hero.png");
    }

    #[test]
    fn file_url_keeps_unreserved_characters() {
        let url = to_file_url(Path::new("/data/assets/hero-v2_final.png"));
        assert_eq!(url, "file:///data/assets/hero-v2_final.png");
    }
}
