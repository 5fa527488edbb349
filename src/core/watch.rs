//! Incremental recomputation for watch mode.
//!
//! The cache maps each known input file to its extracted [`ModuleMap`]. A file
//! change deletes that file's entry; the next recomputation extracts only the
//! files without an entry and reuses every other entry as is.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::core::{
    error::ExtractError,
    extract::ExtractOptions,
    merge::{FileTypings, merge_flat},
    model::{ModuleMap, OutputModel},
    pipeline::{extract_files, file_key},
    source::SourceReader,
};

/// Build the cache for `files`, reusing the entries of `previous`.
///
/// Files missing from `files` are dropped. The first extraction error (in path
/// order) aborts the recomputation.
pub fn recompute(
    files: &[PathBuf],
    previous: &FileTypings,
    reader: &Arc<dyn SourceReader>,
    options: &ExtractOptions,
) -> Result<FileTypings, ExtractError> {
    let mut outcome = extract_files(files, previous, reader, options);
    if let Some((_, err)) = outcome.errors.into_iter().next() {
        return Err(err);
    }

    let mut typings = FileTypings::new();
    for path in files {
        let key = file_key(path);
        let entry = previous
            .get(&key)
            .cloned()
            .or_else(|| outcome.typings.remove(&key));
        if let Some(entry) = entry {
            typings.insert(key, entry);
        }
    }
    Ok(typings)
}

/// State of one watch session.
pub struct WatchCache {
    entries: FileTypings,
    reader: Arc<dyn SourceReader>,
    options: ExtractOptions,
}

impl WatchCache {
    pub fn new(reader: Arc<dyn SourceReader>, options: ExtractOptions) -> Self {
        Self {
            entries: FileTypings::new(),
            reader,
            options,
        }
    }

    pub fn entries(&self) -> &FileTypings {
        &self.entries
    }

    pub fn get(&self, path: &Path) -> Option<&Arc<ModuleMap>> {
        self.entries.get(&file_key(path))
    }

    /// Extract every file not cached yet and return the merged model.
    pub fn refresh(&mut self, files: &[PathBuf]) -> Result<OutputModel, ExtractError> {
        self.entries = recompute(files, &self.entries, &self.reader, &self.options)?;
        Ok(merge_flat(&self.entries))
    }

    /// Handle a change of `changed` (created, modified or deleted); `files` is
    /// the current full input list.
    pub fn apply_change(
        &mut self,
        changed: &Path,
        files: &[PathBuf],
    ) -> Result<OutputModel, ExtractError> {
        self.entries.remove(&file_key(changed));
        self.refresh(files)
    }
}
