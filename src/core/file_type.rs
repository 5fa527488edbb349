use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Source formats the extractors understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileType {
    Html,
    Pug,
    /// JavaScript where JSX was compiled to factory calls.
    CompiledJsx,
    Jsx,
    Tsx,
}

/// Extensions picked up when scanning a folder.
pub const MARKUP_EXTENSIONS: &[&str] = &["html", "htm", "pug", "jade", "jsx", "tsx"];

/// Extension of compiled JSX, only scanned when a factory is configured.
pub const COMPILED_JSX_EXTENSION: &str = "js";

impl FileType {
    /// Detect the format from a path's extension. Unknown extensions are HTML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("pug" | "jade") => FileType::Pug,
            Some("js") => FileType::CompiledJsx,
            Some("jsx") => FileType::Jsx,
            Some("tsx") => FileType::Tsx,
            _ => FileType::Html,
        }
    }
}

/// Whether a path should be considered as input at all.
pub fn is_supported_file(path: &Path, with_compiled_jsx: bool) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if MARKUP_EXTENSIONS.contains(&ext) => true,
        Some(COMPILED_JSX_EXTENSION) => with_compiled_jsx,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(FileType::from_path(Path::new("a/b.html")), FileType::Html);
        assert_eq!(FileType::from_path(Path::new("a/b.pug")), FileType::Pug);
        assert_eq!(FileType::from_path(Path::new("a/b.jade")), FileType::Pug);
        assert_eq!(FileType::from_path(Path::new("a/b.js")), FileType::CompiledJsx);
        assert_eq!(FileType::from_path(Path::new("a/b.jsx")), FileType::Jsx);
        assert_eq!(FileType::from_path(Path::new("a/b.tsx")), FileType::Tsx);
        assert_eq!(FileType::from_path(Path::new("a/b.txt")), FileType::Html);
        assert_eq!(FileType::from_path(Path::new("noext")), FileType::Html);
    }

    #[test]
    fn test_is_supported_file() {
        assert!(is_supported_file(Path::new("x.html"), false));
        assert!(is_supported_file(Path::new("x.tsx"), false));
        assert!(!is_supported_file(Path::new("x.js"), false));
        assert!(is_supported_file(Path::new("x.js"), true));
        assert!(!is_supported_file(Path::new("x.css"), true));
    }
}
