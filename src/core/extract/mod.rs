//! Format specific extractors.
//!
//! Every extractor turns one source file into a [`ModuleMap`]. The HTML and Pug
//! extractors share the tag event recorder in [`markup`]; the JSX extractors
//! walk swc ASTs.

pub mod compiled_jsx;
pub mod html;
pub mod jsx;
pub mod markup;
pub mod pug;

use std::{path::Path, sync::Arc};

use clap::ValueEnum;
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

use crate::core::{
    error::ExtractError,
    file_type::FileType,
    model::ModuleMap,
    source::{FsReader, SourceReader},
};

pub use compiled_jsx::CompiledJsxExtractor;
pub use html::HtmlExtractor;
pub use jsx::JsxExtractor;
pub use pug::PugExtractor;

/// How `dom-module` definitions nest in HTML and Pug.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScopeMode {
    /// One current scope; closing any definition returns to the default scope.
    #[default]
    Single,
    /// A stack of scopes; closing a definition returns to the enclosing one.
    Nested,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Callee name of compiled JSX calls, e.g. `React.createElement`.
    pub jsx_factory: Option<String>,
    pub scope_mode: ScopeMode,
}

impl ExtractOptions {
    pub fn with_jsx_factory(mut self, factory: impl Into<String>) -> Self {
        self.jsx_factory = Some(factory.into());
        self
    }

    pub fn with_scope_mode(mut self, scope_mode: ScopeMode) -> Self {
        self.scope_mode = scope_mode;
        self
    }
}

/// File content plus the path it was read from, when there is one.
#[derive(Debug, Clone, Copy)]
pub struct SourceFile<'a> {
    pub content: &'a str,
    pub path: Option<&'a Path>,
}

impl<'a> SourceFile<'a> {
    pub fn new(content: &'a str, path: Option<&'a Path>) -> Self {
        Self { content, path }
    }

    /// Path for error messages.
    pub fn display_path(&self) -> String {
        self.path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<string>".to_string())
    }
}

#[enum_dispatch]
pub trait Extract {
    fn extract(&mut self, source: SourceFile<'_>) -> Result<ModuleMap, ExtractError>;
}

#[enum_dispatch(Extract)]
pub enum Extractor {
    Html(HtmlExtractor),
    Pug(PugExtractor),
    Jsx(JsxExtractor),
    CompiledJsx(CompiledJsxExtractor),
}

impl Extractor {
    /// Build the extractor for `file_type`.
    ///
    /// Fails with [`ExtractError::MissingFactory`] for compiled JSX without a
    /// factory name.
    pub fn new(
        file_type: FileType,
        options: &ExtractOptions,
        reader: Arc<dyn SourceReader>,
    ) -> Result<Self, ExtractError> {
        let extractor = match file_type {
            FileType::Html => HtmlExtractor::new(options.scope_mode).into(),
            FileType::Pug => PugExtractor::new(options.scope_mode, reader).into(),
            FileType::Jsx | FileType::Tsx => JsxExtractor::new().into(),
            FileType::CompiledJsx => {
                let factory = options
                    .jsx_factory
                    .as_deref()
                    .filter(|f| !f.is_empty())
                    .ok_or(ExtractError::MissingFactory)?;
                CompiledJsxExtractor::new(factory).into()
            }
        };
        Ok(extractor)
    }
}

/// Extract one file's typings, reading Pug includes from disk.
pub fn extract_one(
    content: &str,
    path: Option<&Path>,
    file_type: FileType,
    options: &ExtractOptions,
) -> Result<ModuleMap, ExtractError> {
    Extractor::new(file_type, options, Arc::new(FsReader))?.extract(SourceFile::new(content, path))
}
