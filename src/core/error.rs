use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while extracting typings from a single file.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A Pug `include` was found but no base path was given to resolve it.
    #[error(
        "Pug include '{include}' on line {line} cannot be resolved without a base path; pass the template's file path"
    )]
    MissingBasePath { include: String, line: usize },

    /// Compiled JSX was requested without a factory name.
    #[error("JSX factory needs to be defined when parsing compiled JSX")]
    MissingFactory,

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Include cycle detected at {}", path.display())]
    IncludeCycle { path: PathBuf },
}

impl ExtractError {
    /// True for errors caused by missing configuration rather than bad input.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ExtractError::MissingBasePath { .. } | ExtractError::MissingFactory
        )
    }
}
