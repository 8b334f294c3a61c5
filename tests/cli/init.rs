use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["basePath"], "./src/assets/i18n");
    assert!(
        parsed["modules"]["core"]["languages"]
            .as_array()
            .is_some_and(|langs| langs.iter().any(|l| l == "en")),
        "Config should list en for core"
    );
    assert_eq!(parsed["translation"]["onSyncFailure"], "fallback");
    assert_eq!(parsed["translation"]["onAddFailure"], "abort");

    assert!(
        content.contains("\n  \"basePath\""),
        "Config should use 2-space indentation"
    );
    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["init"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert!(test.root().join(".i18nsyncrc.json").exists());
    let content = test.read_file(".i18nsyncrc.json")?;
    assert_config_content(&content)?;
    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".i18nsyncrc.json", "{}")?;

    let output = test.run(&["init"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains(".i18nsyncrc.json already exists"));
    assert_eq!(test.read_file(".i18nsyncrc.json")?, "{}");
    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.run(&["init"])?;

    test.write_file("src/assets/i18n/common/en.json", r#"{"OK": "OK"}"#)?;

    let output = test.run(&["sync", "common"])?;
    assert!(
        output.status.success(),
        "Sync should work with initialized config. stderr: {}",
        stderr(&output)
    );
    assert!(test.exists("src/assets/i18n/common/zh.json"));
    assert!(test.exists("src/assets/i18n/common/zh-tw.json"));
    Ok(())
}
