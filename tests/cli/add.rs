use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, keys, stderr, stdout};

fn with_add_fallback(test: &CliTest) -> Result<()> {
    test.write_file(
        ".i18nsyncrc.json",
        r#"{
  "basePath": "i18n",
  "modules": {
    "core": { "path": "core", "languages": ["en", "zh", "zh-tw"] }
  },
  "translation": {
    "endpoint": "http://127.0.0.1:9/language/translate/v2",
    "onAddFailure": "fallback"
  }
}"#,
    )
}

// By default a translation failure during `add` is fatal, unlike `sync`:
// the base language is already written, the remaining languages are not.
#[test]
fn test_add_aborts_on_translation_failure_by_default() -> Result<()> {
    let test = CliTest::with_config()?;
    test.write_file("i18n/core/en.json", r#"{"BYE": "Bye"}"#)?;

    let output = test.run(&["add", "core", "GREET", "Hi"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("translation to \"zh\" failed"));
    assert_eq!(
        test.read_json("i18n/core/en.json")?,
        json!({"BYE": "Bye", "GREET": "Hi"})
    );
    assert!(!test.exists("i18n/core/zh.json"));
    assert!(!test.exists("i18n/core/zh-tw.json"));
    Ok(())
}

#[test]
fn test_add_with_fallback_policy_writes_every_language() -> Result<()> {
    let test = CliTest::new()?;
    with_add_fallback(&test)?;
    test.write_file("i18n/core/en.json", r#"{"BYE": "Bye"}"#)?;
    test.write_file("i18n/core/zh.json", r#"{"BYE": "再見"}"#)?;

    let output = test.run(&["add", "core", "GREET", "Hi"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let en = test.read_json("i18n/core/en.json")?;
    assert_eq!(keys(&en), vec!["BYE", "GREET"]);
    assert_eq!(en["GREET"], json!("Hi"));
    assert_eq!(
        test.read_json("i18n/core/zh.json")?,
        json!({"BYE": "再見", "GREET": "Hi"})
    );
    assert_eq!(test.read_json("i18n/core/zh-tw.json")?, json!({"GREET": "Hi"}));

    let out = stdout(&output);
    assert!(out.contains("zh-tw.json created"), "stdout: {}", out);
    assert!(out.contains("Added \"GREET\" to 3 languages of module core"));
    Ok(())
}

#[test]
fn test_add_existing_key_fails_naming_language() -> Result<()> {
    let test = CliTest::new()?;
    with_add_fallback(&test)?;

    let first = test.run(&["add", "core", "GREET", "Hi"])?;
    assert!(first.status.success(), "stderr: {}", stderr(&first));

    let second = test.run(&["add", "core", "GREET", "Hi2"])?;
    assert_eq!(second.status.code(), Some(2));
    assert!(stderr(&second).contains("key \"GREET\" already exists in core/en.json"));
    assert_eq!(test.read_json("i18n/core/en.json")?, json!({"GREET": "Hi"}));
    Ok(())
}

#[test]
fn test_add_key_present_only_in_target_language() -> Result<()> {
    let test = CliTest::with_config()?;
    test.write_file("i18n/core/en.json", r#"{}"#)?;
    test.write_file("i18n/core/zh-tw.json", r#"{"GREET": "嗨"}"#)?;

    let output = test.run(&["add", "core", "GREET", "Hi"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("core/zh-tw.json"));
    assert_eq!(test.read_file("i18n/core/en.json")?, "{}");
    Ok(())
}

#[test]
fn test_add_empty_value() -> Result<()> {
    let test = CliTest::with_config()?;

    let output = test.run(&["add", "core", "GREET", ""])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("value must not be empty"));
    assert!(!test.exists("i18n/core/en.json"));
    Ok(())
}

#[test]
fn test_add_reserved_sentinel_key() -> Result<()> {
    let test = CliTest::with_config()?;

    let output = test.run(&["add", "core", "****", "x"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("is reserved for obsolete keys"));
    assert!(!test.exists("i18n/core/en.json"));
    Ok(())
}

#[test]
fn test_add_missing_arguments() -> Result<()> {
    let test = CliTest::with_config()?;

    let output = test.run(&["add", "core", "GREET"])?;

    assert!(!output.status.success());
    assert!(!test.exists("i18n/core/en.json"));
    Ok(())
}

#[test]
fn test_add_unknown_module() -> Result<()> {
    let test = CliTest::with_config()?;

    let output = test.run(&["add", "shop", "GREET", "Hi"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("available modules: core"));
    Ok(())
}
