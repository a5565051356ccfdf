//! Collision-free destination naming.
//!
//! Two distinct suffix grammars are in play: uploads and module imports
//! probe `name (1).ext`, `name (2).ext`, …; duplicates probe
//! `name copy.ext`, `name copy 2.ext`, …. Both are user-visible, so they
//! are kept separate rather than unified.

use std::path::Path;

/// Splits a filename into stem and extension.
///
/// `.gitignore`-style names count as all stem.
fn split_extension(name: &str) -> (&str, Option<&str>) {
    let path = Path::new(name);
    match (
        path.file_stem().and_then(|s| s.to_str()),
        path.extension().and_then(|e| e.to_str()),
    ) {
        (Some(stem), Some(ext)) => (stem, Some(ext)),
        _ => (name, None),
    }
}

fn with_extension(stem: &str, ext: Option<&str>) -> String {
    match ext {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem.to_string(),
    }
}

/// Returns `desired` if free in `dir`, else the first free ` (n)` variant.
///
/// Deterministic and bounded by the number of existing entries plus one.
pub fn unique_name(dir: &Path, desired: &str) -> String {
    if !dir.join(desired).exists() {
        return desired.to_string();
    }

    let (stem, ext) = split_extension(desired);
    let mut i = 1u32;
    loop {
        let candidate = with_extension(&format!("{stem} ({i})"), ext);
        if !dir.join(&candidate).exists() {
            return candidate;
        }
        i += 1;
    }
}

/// Returns the first free ` copy` variant of `desired` in `dir`.
///
/// Probes `name copy`, `name copy 2`, `name copy 3`, … with the extension
/// preserved.
pub fn duplicate_name(dir: &Path, desired: &str) -> String {
    let (stem, ext) = split_extension(desired);
    let mut i = 1u32;
    loop {
        let candidate_stem = if i == 1 {
            format!("{stem} copy")
        } else {
            format!("{stem} copy {i}")
        };
        let candidate = with_extension(&candidate_stem, ext);
        if !dir.join(&candidate).exists() {
            return candidate;
        }
        i += 1;
    }
}
