use std::path::Path;

use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{generate::generate, init::init},
    exit_status::ExitStatus,
    watch::watch,
};

/// Dispatch to the handler of the parsed command.
pub fn run(Arguments { command }: Arguments, cwd: &Path) -> Result<ExitStatus> {
    match command {
        Some(Command::Generate(cmd)) => generate(cmd, cwd),
        Some(Command::Watch(cmd)) => watch(cmd, cwd),
        Some(Command::Init) => init(cwd),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
