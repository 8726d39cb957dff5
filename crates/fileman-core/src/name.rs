//! Base-name and extension helpers.

use std::path::{Path, PathBuf};

/// The dotted extension of a base name: everything from the last `.` on.
///
/// Returns an empty string when the name has no dot. A leading-dot name
/// like `.bashrc` is all extension.
pub fn dotted_extension(name: &str) -> &str {
    name.rfind('.').map(|i| &name[i..]).unwrap_or("")
}

/// Base name of a path as a lossy string.
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Swap the dotted extension of `path`'s base name for `new_extension`.
///
/// `new_extension` is appended verbatim, so callers pass the leading dot
/// they want (`.md`, not `md`).
pub fn replace_extension(path: &Path, new_extension: &str) -> PathBuf {
    let name = base_name(path);
    let stem = &name[..name.len() - dotted_extension(&name).len()];
    let renamed = format!("{stem}{new_extension}");
    match path.parent() {
        Some(parent) => parent.join(renamed),
        None => PathBuf::from(renamed),
    }
}
