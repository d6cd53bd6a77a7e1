use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::{CliTest, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("Created .rolescanrc.json"));

    let content = test.read_file(".rolescanrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["sentinel"], "ROLE_MBAA");
    assert_eq!(parsed["sourceRoot"], "src/app");
    assert_eq!(parsed["format"], "html");
    assert!(parsed.get("output").is_none(), "output follows the format by default");
    assert!(content.contains("\n  \"sentinel\""), "2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".rolescanrc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: .rolescanrc.json already exists
    ");

    assert_eq!(test.read_file(".rolescanrc.json")?, "{}");
    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.command().arg("init").output()?;
    test.write_file(
        "src/app/guard.ts",
        "const allowed = ['ROLE_MBAA.ADMIN'];\n",
    )?;

    let output = test.scan_command().output()?;
    assert!(
        output.status.success(),
        "scan should work with the generated config. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(test.root().join("target/rbac-report.html").exists());

    Ok(())
}
