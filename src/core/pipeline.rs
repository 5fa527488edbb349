//! Parallel read + extract over a file list.

use std::{
    collections::{HashMap, hash_map::Entry},
    path::{Path, PathBuf},
    sync::Arc,
};

use rayon::prelude::*;

use crate::core::{
    error::ExtractError,
    extract::{Extract, ExtractOptions, Extractor, SourceFile},
    file_type::FileType,
    merge::FileTypings,
    model::ModuleMap,
    source::SourceReader,
};

/// Key of a file in [`FileTypings`].
pub fn file_key(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Result of one pipeline run.
#[derive(Debug, Default)]
pub struct ExtractionOutcome {
    pub typings: FileTypings,
    /// Failed files in path order.
    pub errors: Vec<(String, ExtractError)>,
}

/// Read and extract `files` in parallel, skipping every file already in `skip`.
///
/// Each rayon worker keeps its own extractors, so Pug include caches are never
/// shared between threads.
pub fn extract_files(
    files: &[PathBuf],
    skip: &FileTypings,
    reader: &Arc<dyn SourceReader>,
    options: &ExtractOptions,
) -> ExtractionOutcome {
    let results: Vec<(String, Result<ModuleMap, ExtractError>)> = files
        .par_iter()
        .filter(|path| !skip.contains_key(&file_key(path)))
        .map_init(
            || Extractors::new(options.clone(), Arc::clone(reader)),
            |extractors, path| (file_key(path), extractors.extract_path(path)),
        )
        .collect();

    let mut outcome = ExtractionOutcome::default();
    for (key, result) in results {
        match result {
            Ok(map) => {
                outcome.typings.insert(key, Arc::new(map));
            }
            Err(err) => outcome.errors.push((key, err)),
        }
    }
    outcome.errors.sort_by(|a, b| a.0.cmp(&b.0));
    outcome
}

/// Lazily built extractor per file type.
struct Extractors {
    options: ExtractOptions,
    reader: Arc<dyn SourceReader>,
    by_type: HashMap<FileType, Extractor>,
}

impl Extractors {
    fn new(options: ExtractOptions, reader: Arc<dyn SourceReader>) -> Self {
        Self {
            options,
            reader,
            by_type: HashMap::new(),
        }
    }

    fn extract_path(&mut self, path: &Path) -> Result<ModuleMap, ExtractError> {
        let content = self
            .reader
            .read_to_string(path)
            .map_err(|source| ExtractError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let file_type = FileType::from_path(path);
        let extractor = match self.by_type.entry(file_type) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(Extractor::new(
                file_type,
                &self.options,
                Arc::clone(&self.reader),
            )?),
        };
        extractor.extract(SourceFile::new(&content, Some(path)))
    }
}
