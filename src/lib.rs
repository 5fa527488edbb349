//! html-typings - TypeScript querymaps from HTML, Pug and JSX
//!
//! Scans markup and component sources for element ids, classes and custom
//! element definitions and writes a declaration file that types
//! `querySelector`, `getElementById` and friends.
//!
//! ## Module Structure
//!
//! - `api`: Programmatic entry points (string, files, glob, folder)
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction, merge, rendering and watch engine
//! - `utils`: Shared utility functions

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod utils;
