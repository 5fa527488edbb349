//! Programmatic entry points.
//!
//! Each function returns the merged [`OutputModel`]; call
//! [`OutputModel::to_declarations`] to get the declaration text.
//!
//! ```
//! use html_typings::api::{StringOptions, extract_string_types};
//!
//! let model = extract_string_types("<div id=\"app\"></div>", &StringOptions::default()).unwrap();
//! assert_eq!(model.ids["app"], "HTMLDivElement");
//! assert!(model.to_declarations(false).contains("\"app\": HTMLDivElement;"));
//! ```

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::core::{
    error::ExtractError,
    extract::{ExtractOptions, ScopeMode, extract_one},
    file_scanner::scan_inputs,
    file_type::FileType,
    merge::{merge_file, merge_flat},
    model::OutputModel,
    pipeline::extract_files,
    source::{FsReader, SourceReader},
};

/// Options for [`extract_string_types`].
#[derive(Debug, Clone)]
pub struct StringOptions {
    pub file_type: FileType,
    /// Path the content was read from; needed to resolve Pug includes.
    pub base_path: Option<PathBuf>,
    pub jsx_factory: Option<String>,
    pub scope_mode: ScopeMode,
}

impl Default for StringOptions {
    fn default() -> Self {
        Self {
            file_type: FileType::Html,
            base_path: None,
            jsx_factory: None,
            scope_mode: ScopeMode::Single,
        }
    }
}

/// Options for the file, glob and folder entry points.
#[derive(Debug, Clone, Default)]
pub struct ApiOptions {
    pub jsx_factory: Option<String>,
    pub scope_mode: ScopeMode,
}

impl ApiOptions {
    fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            jsx_factory: self.jsx_factory.clone(),
            scope_mode: self.scope_mode,
        }
    }
}

pub fn extract_string_types(
    content: &str,
    options: &StringOptions,
) -> Result<OutputModel, ExtractError> {
    let extract_options = ExtractOptions {
        jsx_factory: options.jsx_factory.clone(),
        scope_mode: options.scope_mode,
    };
    let map = extract_one(
        content,
        options.base_path.as_deref(),
        options.file_type,
        &extract_options,
    )?;
    Ok(merge_file(&map))
}

/// Extract and merge `files`; the type of each file follows its extension.
pub fn extract_file_types(
    files: &[PathBuf],
    options: &ApiOptions,
) -> Result<OutputModel, ExtractError> {
    let reader: Arc<dyn SourceReader> = Arc::new(FsReader);
    let outcome = extract_files(files, &Default::default(), &reader, &options.extract_options());
    if let Some((_, err)) = outcome.errors.into_iter().next() {
        return Err(err);
    }
    Ok(merge_flat(&outcome.typings))
}

/// Extract and merge every file matching `pattern`.
pub fn extract_glob_types(
    pattern: &str,
    options: &ApiOptions,
) -> Result<OutputModel, ExtractError> {
    let scan = scan_inputs(Path::new(""), &[pattern.to_string()], true, false);
    extract_file_types(&scan.files, options)
}

/// Extract and merge every supported file below `folder`.
///
/// `.js` files are only included when a factory is configured.
pub fn extract_folder_types(
    folder: &Path,
    options: &ApiOptions,
) -> Result<OutputModel, ExtractError> {
    let with_compiled_jsx = options.jsx_factory.is_some();
    let scan = scan_inputs(folder, &[String::new()], with_compiled_jsx, false);
    extract_file_types(&scan.files, options)
}
