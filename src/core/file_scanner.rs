//! Input discovery: files, folders and glob patterns to a sorted file list.

use std::{
    collections::BTreeSet,
    path::{Component, Path, PathBuf},
};

use colored::Colorize;
use glob::glob;
use walkdir::WalkDir;

use crate::{config::is_glob, core::file_type::is_supported_file};

/// Result of scanning inputs.
pub struct ScanResult {
    /// Sorted and deduplicated.
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
}

/// Resolve `inputs` relative to `base_dir`.
///
/// Explicit files are taken as is. Folders are walked recursively and keep
/// only supported extensions (`.js` only with `with_compiled_jsx`). Glob
/// matches are treated like explicit files or folders.
pub fn scan_inputs(
    base_dir: &Path,
    inputs: &[String],
    with_compiled_jsx: bool,
    verbose: bool,
) -> ScanResult {
    let mut files = BTreeSet::new();
    let mut skipped_count = 0;

    for input in inputs {
        let path = base_dir.join(input);
        if is_glob(input) {
            match glob(&path.to_string_lossy()) {
                Ok(entries) => {
                    for entry in entries {
                        match entry {
                            Ok(entry) => {
                                skipped_count += collect_path(
                                    &entry,
                                    with_compiled_jsx,
                                    verbose,
                                    &mut files,
                                );
                            }
                            Err(e) => {
                                skipped_count += 1;
                                if verbose {
                                    eprintln!(
                                        "{} Cannot access path: {}",
                                        "warning:".bold().yellow(),
                                        e
                                    );
                                }
                            }
                        }
                    }
                }
                Err(e) => {
                    if verbose {
                        eprintln!(
                            "{} Invalid glob pattern '{}': {}",
                            "warning:".bold().yellow(),
                            input,
                            e
                        );
                    }
                }
            }
        } else if path.exists() {
            skipped_count += collect_path(&path, with_compiled_jsx, verbose, &mut files);
        } else if verbose {
            eprintln!(
                "{} Input path does not exist: {}",
                "warning:".bold().yellow(),
                path.display()
            );
        }
    }

    ScanResult {
        files: files.into_iter().collect(),
        skipped_count,
    }
}

/// Add `path` (a file, or every supported file below a folder) to `files`.
/// Returns the number of unreadable entries.
fn collect_path(
    path: &Path,
    with_compiled_jsx: bool,
    verbose: bool,
    files: &mut BTreeSet<PathBuf>,
) -> usize {
    if path.is_file() {
        files.insert(path.to_path_buf());
        return 0;
    }

    let mut skipped = 0;
    for entry in WalkDir::new(path) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped += 1;
                if verbose {
                    eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                }
                continue;
            }
        };
        let path = entry.path();
        if path.is_file() && is_supported_file(path, with_compiled_jsx) {
            files.insert(path.to_path_buf());
        }
    }
    skipped
}

/// Directories to watch for `inputs`: folders themselves, the parent of a
/// file, and the non-wildcard prefix of a glob pattern.
pub fn watch_roots(base_dir: &Path, inputs: &[String]) -> Vec<PathBuf> {
    let mut roots = BTreeSet::new();
    for input in inputs {
        let path = base_dir.join(input);
        let root = if is_glob(input) {
            glob_prefix(&path)
        } else if path.is_dir() {
            path
        } else {
            path.parent().map(Path::to_path_buf).unwrap_or(path)
        };
        if root.exists() {
            roots.insert(root);
        }
    }

    // A root inside another root is already covered by the recursive watch.
    let roots: Vec<PathBuf> = roots.into_iter().collect();
    roots
        .iter()
        .filter(|root| {
            !roots
                .iter()
                .any(|other| other != *root && root.starts_with(other))
        })
        .cloned()
        .collect()
}

fn glob_prefix(pattern: &Path) -> PathBuf {
    pattern
        .components()
        .take_while(|c| !matches!(c, Component::Normal(s) if is_glob(&s.to_string_lossy())))
        .collect()
}
