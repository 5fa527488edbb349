//! Command-line interface layer.

use std::{env, process::ExitCode};

use anyhow::{Context, Result};

pub mod args;
mod commands;
pub mod exit_status;
mod report;
mod run;
mod watch;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitCode> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success.into());
    };

    let cwd = env::current_dir().context("Failed to read the working directory")?;
    let status = run::run(args, &cwd)?;
    Ok(status.into())
}
