//! Common utility functions shared across the codebase.

use std::path::{Path, PathBuf};

/// Suffix of generated declaration files.
pub const QUERYMAP_SUFFIX: &str = "-querymap.d.ts";

/// Path of the file written next to `input`, e.g. `index.html` with
/// [`QUERYMAP_SUFFIX`] gives `index-querymap.d.ts`.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use html_typings::utils::{QUERYMAP_SUFFIX, querymap_path};
///
/// assert_eq!(
///     querymap_path(Path::new("views/index.html"), QUERYMAP_SUFFIX),
///     PathBuf::from("views/index-querymap.d.ts")
/// );
/// ```
pub fn querymap_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}{}", stem, suffix))
}
