use anyhow::{Context, Result};
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "\u{2713} Created .htmltypingsrc.json\n");

    let content = test.read_file(".htmltypingsrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert!(parsed.get("input").is_some(), "Config should have 'input' field");
    assert!(parsed.get("output").is_some(), "Config should have 'output' field");
    assert!(content.contains("  "), "Config should use 2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".htmltypingsrc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr(&output), "Error: .htmltypingsrc.json already exists\n");
    assert_eq!(test.read_file(".htmltypingsrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.command().arg("init").output()?;
    test.write_file("src/index.html", r#"<div id="app"></div>"#)?;

    let output = test.generate_command().output()?;
    assert!(
        output.status.success(),
        "generate should work with the initialized config. stderr: {}",
        stderr(&output)
    );
    assert!(test.read_file("src/querymap.d.ts")?.contains("\"app\": HTMLDivElement;"));

    Ok(())
}
