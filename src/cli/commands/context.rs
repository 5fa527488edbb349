use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    core::{
        extract::ExtractOptions,
        file_scanner::{ScanResult, scan_inputs, watch_roots},
    },
};

/// Settings of one `generate`/`watch` run.
///
/// CLI arguments take priority over the config file, which takes priority
/// over defaults. Inputs and output given on the command line resolve against
/// the working directory; those from the config file against its directory.
#[derive(Debug)]
pub struct RunContext {
    pub config: Config,
    /// Directory `config.input` resolves against.
    pub input_base: PathBuf,
    pub output: Option<PathBuf>,
    pub options: ExtractOptions,
    pub verbose: bool,
}

impl RunContext {
    pub fn new(args: &CommonArgs, cwd: &Path) -> Result<Self> {
        let loaded = load_config(cwd)?;
        let config_root = loaded.root.clone().unwrap_or_else(|| cwd.to_path_buf());
        let file_config = loaded.config;

        let (input, input_base) = if args.inputs.is_empty() {
            (file_config.input.clone(), config_root.clone())
        } else {
            (args.inputs.clone(), cwd.to_path_buf())
        };

        let output = match (&args.output, &file_config.output) {
            (Some(output), _) => Some(cwd.join(output)),
            (None, Some(output)) => Some(config_root.join(output)),
            (None, None) => None,
        };

        let config = Config {
            input,
            output: args.output.clone().or(file_config.output),
            export: args.export || file_config.export,
            separate: args.separate || file_config.separate,
            jsx_factory: args.jsx_factory.clone().or(file_config.jsx_factory),
            nested_scopes: args.nested_scopes || file_config.nested_scopes,
        };
        config.validate()?;

        if config.input.is_empty() {
            bail!(
                "No inputs given. Pass -i/--input or set 'input' in {}",
                crate::config::CONFIG_FILE_NAME
            );
        }

        let options = ExtractOptions {
            jsx_factory: config.jsx_factory.clone(),
            scope_mode: config.scope_mode(),
        };

        Ok(Self {
            config,
            input_base,
            output,
            options,
            verbose: args.verbose,
        })
    }

    pub fn scan(&self) -> ScanResult {
        scan_inputs(
            &self.input_base,
            &self.config.input,
            self.options.jsx_factory.is_some(),
            self.verbose,
        )
    }

    pub fn watch_roots(&self) -> Vec<PathBuf> {
        watch_roots(&self.input_base, &self.config.input)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;
    use crate::{config::CONFIG_FILE_NAME, core::extract::ScopeMode};

    #[test]
    fn test_cli_overrides_config() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join(".git")).unwrap();
        fs::create_dir(root.join("app")).unwrap();
        fs::write(
            root.join(CONFIG_FILE_NAME),
            r#"{ "input": ["views"], "output": "types/q.d.ts", "jsxFactory": "h", "nestedScopes": true }"#,
        )
        .unwrap();

        let cwd = root.join("app");
        let ctx = RunContext::new(&CommonArgs::default(), &cwd).unwrap();
        assert_eq!(ctx.input_base, root);
        assert_eq!(ctx.output, Some(root.join("types/q.d.ts")));
        assert_eq!(ctx.options.jsx_factory.as_deref(), Some("h"));
        assert_eq!(ctx.options.scope_mode, ScopeMode::Nested);

        let args = CommonArgs {
            inputs: vec!["index.html".to_string()],
            output: Some("out.d.ts".to_string()),
            jsx_factory: Some("React.createElement".to_string()),
            export: true,
            ..Default::default()
        };
        let ctx = RunContext::new(&args, &cwd).unwrap();
        assert_eq!(ctx.input_base, cwd);
        assert_eq!(ctx.config.input, vec!["index.html"]);
        assert_eq!(ctx.output, Some(cwd.join("out.d.ts")));
        assert_eq!(ctx.options.jsx_factory.as_deref(), Some("React.createElement"));
        assert!(ctx.config.export);
    }

    #[test]
    fn test_missing_inputs_is_an_error() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let err = RunContext::new(&CommonArgs::default(), dir.path()).unwrap_err();
        assert!(err.to_string().contains("No inputs"));
    }

    #[test]
    fn test_invalid_cli_glob_is_an_error() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let args = CommonArgs {
            inputs: vec!["src/**/[bad".to_string()],
            ..Default::default()
        };
        assert!(RunContext::new(&args, dir.path()).is_err());
    }
}
