use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::extract::ScopeMode;

pub const CONFIG_FILE_NAME: &str = ".htmltypingsrc.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Files, folders or glob patterns to scan.
    #[serde(default)]
    pub input: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default)]
    pub export: bool,
    /// Write one querymap next to every input file.
    #[serde(default)]
    pub separate: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsx_factory: Option<String>,
    #[serde(default)]
    pub nested_scopes: bool,
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `input` is invalid.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.input {
            if is_glob(pattern) {
                Pattern::new(pattern)
                    .with_context(|| format!("Invalid glob pattern in 'input': \"{}\"", pattern))?;
            }
        }
        if let Some(factory) = &self.jsx_factory
            && factory.trim().is_empty()
        {
            anyhow::bail!("'jsxFactory' must not be empty");
        }
        Ok(())
    }

    pub fn scope_mode(&self) -> ScopeMode {
        if self.nested_scopes {
            ScopeMode::Nested
        } else {
            ScopeMode::Single
        }
    }
}

pub fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

pub fn default_config_json() -> Result<String> {
    let config = Config {
        input: vec!["src/**/*.html".to_string()],
        output: Some("src/querymap.d.ts".to_string()),
        ..Default::default()
    };
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory holding the config file; relative paths in it resolve here.
    pub root: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                root: path.parent().map(Path::to_path_buf),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            root: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::*;
    use pretty_assertions::assert_eq;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.input.is_empty());
        assert!(!config.export);
        assert_eq!(config.scope_mode(), ScopeMode::Single);
    }

    #[test]
    fn test_parse_config() {
        let json = r#"{
              "input": ["src/**/*.pug", "views"],
              "output": "types/querymap.d.ts",
              "export": true,
              "jsxFactory": "React.createElement",
              "nestedScopes": true
          }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.input, vec!["src/**/*.pug", "views"]);
        assert_eq!(config.output.as_deref(), Some("types/querymap.d.ts"));
        assert!(config.export);
        assert!(!config.separate);
        assert_eq!(config.jsx_factory.as_deref(), Some("React.createElement"));
        assert_eq!(config.scope_mode(), ScopeMode::Nested);
    }

    #[test]
    fn test_find_config_file() {
        let dir = tempdir().unwrap();
        let sub_dir = dir.path().join("src").join("views");
        fs::create_dir_all(&sub_dir).unwrap();

        let config_path = dir.path().join(CONFIG_FILE_NAME);
        File::create(&config_path).unwrap();

        let found = find_config_file(&sub_dir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_stops_at_git_root() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        assert!(find_config_file(dir.path()).is_none());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "input": ["index.html"], "separate": true }"#,
        )
        .unwrap();

        let result = load_config(dir.path()).unwrap();
        assert_eq!(result.root.as_deref(), Some(dir.path()));
        assert_eq!(result.config.input, vec!["index.html"]);
        assert!(result.config.separate);
    }

    #[test]
    fn test_load_config_default_when_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(result.root.is_none());
        assert_eq!(result.config, Config::default());
    }

    #[test]
    fn test_validate_invalid_input_pattern() {
        let config = Config {
            input: vec!["src/**/[invalid".to_string()],
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("input"));
    }

    #[test]
    fn test_validate_empty_factory() {
        let config = Config {
            jsx_factory: Some(" ".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_config_with_invalid_json_fails() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "{ \"input\": ").unwrap();

        assert!(load_config(dir.path()).is_err());
    }

    #[test]
    fn test_default_config_json_round_trips() {
        let json = default_config_json().unwrap();
        assert!(json.contains("\"input\""));
        assert!(!json.contains("jsxFactory"));
        let config: Config = serde_json::from_str(&json).unwrap();
        assert!(config.validate().is_ok());
    }
}
