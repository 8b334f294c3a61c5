use anyhow::Result;

use crate::{CliTest, stdout};

#[test]
fn test_unknown_command_prints_usage() -> Result<()> {
    let test = CliTest::with_config()?;

    let output = test.run(&["translate", "core"])?;

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Usage:"), "stdout: {}", out);
    assert!(out.contains("remove-duplicates"), "stdout: {}", out);
    assert!(out.contains("Available modules: core"), "stdout: {}", out);
    assert!(!out.contains("default configuration"), "stdout: {}", out);
    Ok(())
}

#[test]
fn test_no_command_prints_usage() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&[])?;

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Usage:"), "stdout: {}", out);
    // Default configuration.
    assert!(out.contains("Available modules: common, core"), "stdout: {}", out);
    assert!(
        out.contains("No .i18nsyncrc.json found; using the default configuration."),
        "stdout: {}",
        out
    );
    Ok(())
}
