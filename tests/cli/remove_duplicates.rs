use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_remove_duplicates_keeps_last_occurrence() -> Result<()> {
    let test = CliTest::with_config()?;
    test.write_file(
        "i18n/core/en.json",
        r#"{
  "X": "1",
  "Y": "2",
  "X": "3"
}
"#,
    )?;
    test.write_file(
        "i18n/core/zh.json",
        r#"{
  "X": "三"
}
"#,
    )?;

    let output = test.run(&["remove-duplicates", "core"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_eq!(
        test.read_file("i18n/core/en.json")?,
        "{\n  \"Y\": \"2\",\n  \"X\": \"3\"\n}\n"
    );
    assert_eq!(test.read_file("i18n/core/zh.json")?, "{\n  \"X\": \"三\"\n}\n");

    let out = stdout(&output);
    assert!(out.contains("removed 1 duplicate line"), "stdout: {}", out);
    assert!(out.contains("line 2: \"X\""), "stdout: {}", out);
    assert!(out.contains("has no duplicate keys"), "stdout: {}", out);
    assert!(out.contains("(file does not exist)"), "stdout: {}", out);
    Ok(())
}

#[test]
fn test_remove_duplicates_preserves_formatting() -> Result<()> {
    let test = CliTest::with_config()?;
    // Odd indentation and a missing trailing newline must survive.
    let content = "{\n    \"A\":\"a\",\n\t\"B\" : \"b\",\n    \"A\":\"a2\"\n}";
    test.write_file("i18n/core/en.json", content)?;

    let output = test.run(&["remove-duplicates", "core"])?;
    assert!(output.status.success());

    assert_eq!(
        test.read_file("i18n/core/en.json")?,
        "{\n\t\"B\" : \"b\",\n    \"A\":\"a2\"\n}"
    );
    Ok(())
}

#[test]
fn test_remove_duplicates_unknown_module() -> Result<()> {
    let test = CliTest::with_config()?;

    let output = test.run(&["remove-duplicates", "shop"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("unknown module \"shop\""));
    Ok(())
}
