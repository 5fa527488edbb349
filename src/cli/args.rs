//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `generate`: Extract typings from the inputs and write the querymap
//! - `watch`: Generate once, then regenerate whenever an input changes
//! - `init`: Initialize the html-typings configuration file

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

/// Common arguments shared by `generate` and `watch`.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Input file, folder or glob pattern (overrides config file).
    /// Can be specified multiple times: -i views -i "src/**/*.tsx"
    #[arg(short, long = "input", value_name = "PATH")]
    pub inputs: Vec<String>,

    /// Output file for the combined querymap (overrides config file)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Export every generated interface and add standalone type aliases
    #[arg(short, long)]
    pub export: bool,

    /// Write one <name>-querymap.d.ts next to each input file
    #[arg(short, long)]
    pub separate: bool,

    /// Factory function of compiled JSX, e.g. React.createElement; enables .js inputs
    #[arg(short, long)]
    pub jsx_factory: Option<String>,

    /// Track nested dom-module definitions in HTML and Pug with a scope stack
    #[arg(long)]
    pub nested_scopes: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// TypeScript declaration file
    #[default]
    #[value(name = "d-ts")]
    DTs,
    /// The merged maps as JSON
    Json,
}

impl OutputFormat {
    /// File name suffix of generated files in this format.
    pub fn suffix(self) -> &'static str {
        match self {
            OutputFormat::DTs => crate::utils::QUERYMAP_SUFFIX,
            OutputFormat::Json => "-querymap.json",
        }
    }
}

#[derive(Debug, Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Print the combined result instead of writing files
    #[arg(long)]
    pub stdout: bool,
}

#[derive(Debug, Args)]
pub struct WatchCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate querymap declarations from HTML, Pug and JSX sources
    Generate(GenerateCommand),
    /// Generate, then regenerate whenever an input file changes
    Watch(WatchCommand),
    /// Initialize a new .htmltypingsrc.json configuration file
    Init,
}
