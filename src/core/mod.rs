//! Extraction, merge and rendering engine.
//!
//! Files flow through four stages:
//!
//! 1. **Extract**: each format's extractor turns one file into a [`ModuleMap`].
//! 2. **Merge**: per-file maps fold into an [`OutputModel`].
//! 3. **Render**: the model becomes declaration text.
//! 4. **Watch**: a [`WatchCache`] repeats 1-3 reusing unchanged files.

pub mod error;
pub mod extract;
pub mod file_scanner;
pub mod file_type;
pub mod merge;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod render;
pub mod source;
pub mod tag_type;
pub mod watch;

pub use error::ExtractError;
pub use extract::{ExtractOptions, ScopeMode, extract_one};
pub use file_type::FileType;
pub use merge::{FileTypings, merge_file, merge_flat, merge_modules};
pub use model::{ModuleMap, OutputModel, PartialScope, ScopeKey};
pub use render::render;
pub use source::{FsReader, MemoryReader, SourceReader};
pub use watch::{WatchCache, recompute};
