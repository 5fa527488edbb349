//! Report formatting and printing utilities.
//!
//! Kept apart from the core so html-typings can be used as a library.

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use colored::Colorize;

use crate::core::error::ExtractError;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

/// Print a success line for a written artifact.
pub fn print_written(path: &Path, file_count: usize) {
    print_written_to(path, file_count, &mut io::stdout().lock());
}

pub fn print_written_to<W: Write>(path: &Path, file_count: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Wrote {} from {}",
            path.display(),
            plural(file_count, "file")
        )
        .green()
    );
}

/// Print the files an artifact was generated from.
pub fn print_inputs(files: &[PathBuf], verbose: bool) {
    if !verbose {
        return;
    }
    let mut stderr = io::stderr().lock();
    for file in files {
        let _ = writeln!(stderr, "  {} {}", "-->".blue(), file.display());
    }
}

pub fn print_no_inputs() {
    print_no_inputs_to(&mut io::stderr().lock());
}

pub fn print_no_inputs_to<W: Write>(writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} no input files matched",
        "warning:".bold().yellow()
    );
}

pub fn print_skipped(count: usize, verbose: bool) {
    if count > 0 && !verbose {
        let _ = writeln!(
            io::stderr().lock(),
            "{} {} could not be accessed (use {} for details)",
            "warning:".bold().yellow(),
            plural(count, "path"),
            "-v".cyan()
        );
    }
}

/// Print per-file extraction errors in cargo style.
pub fn print_errors(errors: &[(String, ExtractError)]) {
    print_errors_to(errors, &mut io::stderr().lock());
}

pub fn print_errors_to<W: Write>(errors: &[(String, ExtractError)], writer: &mut W) {
    if errors.is_empty() {
        return;
    }
    for (path, err) in errors {
        let _ = writeln!(writer, "{}: {}", "error".bold().red(), err);
        let _ = writeln!(writer, "  {} {}", "-->".blue(), path);
    }
    let _ = writeln!(
        writer,
        "{} {}",
        FAILURE_MARK.red(),
        format!("{} failed, nothing written", plural(errors.len(), "file")).red()
    );
}

pub fn print_watching(roots: &[PathBuf]) {
    let mut stdout = io::stdout().lock();
    let _ = writeln!(
        stdout,
        "{} {}",
        "Watching".bold().cyan(),
        roots
            .iter()
            .map(|r| r.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
}

pub fn print_changed(path: &Path, verbose: bool) {
    if verbose {
        let _ = writeln!(
            io::stderr().lock(),
            "{} {}",
            "changed:".bold().cyan(),
            path.display()
        );
    }
}

pub fn print_watch_error(err: &dyn std::fmt::Display) {
    let _ = writeln!(io::stderr().lock(), "{}: {}", "error".bold().red(), err);
}
