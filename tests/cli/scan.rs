use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

const COMPONENT_HTML: &str = r#"<div class="toolbar">
  <button *access="ROLE_MBAA.ADMIN" (click)="remove()">Delete</button>
  <input [access]="ROLE_MBAA.EDITOR" />
  <span *access="OTHER_ROLE">Hidden</span>
</div>
"#;

const COMPONENT_TS: &str = r#"export class AdminComponent {
  readonly allowedRoles = ['ROLE_MBAA.ADMIN', 'ROLE_MBAA.SUPPORT'];

  constructor(private visibilityService: VisibilityService) {}

  get canEdit(): boolean {
    return this.visibilityService.hasRole(['ROLE_MBAA.EDITOR']);
  }
}
"#;

const ROUTES_TS: &str = r#"export const ROUTES = {
  admin: ['ROLE_MBAA.ADMIN'],
  reports: [
    'ROLE_MBAA.VIEWER',
    'ROLE_MBAA.AUDITOR',
  ],
};
"#;

fn sample_project() -> Result<CliTest> {
    let test = CliTest::new()?;
    test.write_file("src/app/admin/admin.component.html", COMPONENT_HTML)?;
    test.write_file("src/app/admin/admin.component.ts", COMPONENT_TS)?;
    test.write_file("src/app/admin/admin.component.spec.ts", COMPONENT_TS)?;
    test.write_file("src/app/routes.ts", ROUTES_TS)?;
    Ok(test)
}

fn json_rows(test: &CliTest) -> Result<Vec<Value>> {
    let output = test.scan_command().args(["-q", "-o", "report.json"]).output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let parsed: Value = serde_json::from_str(&test.read_file("report.json")?)?;
    Ok(parsed.as_array().cloned().unwrap_or_default())
}

#[test]
fn test_scan_writes_html_report() -> Result<()> {
    let test = sample_project()?;

    let output = test.scan_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("Scanned 3 files - found 7 role markers"));
    assert!(out.contains("Report written to target/rbac-report.html (html)"));

    let report = test.read_file("target/rbac-report.html")?;
    assert!(report.contains("<title>RBAC Access Report</title>"));
    assert!(report.contains("TS:this.visibilityService.hasRole"));
    assert!(report.contains("TS:ROUTES.reports"));
    assert!(report.contains(">Delete<"));
    Ok(())
}

#[test]
fn test_scan_is_the_default_command() -> Result<()> {
    let test = sample_project()?;

    let output = test.command().arg("-q").output()?;
    assert!(output.status.success());
    assert!(test.root().join("target/rbac-report.html").exists());
    Ok(())
}

#[test]
fn test_occurrence_order_and_content() -> Result<()> {
    let test = sample_project()?;
    let rows = json_rows(&test)?;

    let summary: Vec<(String, u64, String, String)> = rows
        .iter()
        .map(|row| {
            (
                row["source_file"].as_str().unwrap_or_default().to_string(),
                row["line"].as_u64().unwrap_or_default(),
                row["context_kind"].as_str().unwrap_or_default().to_string(),
                row["owner"].as_str().unwrap_or_default().to_string(),
            )
        })
        .collect();

    assert_eq!(
        summary,
        vec![
            (
                "src/app/admin/admin.component.html".to_string(),
                2,
                "markup-attribute".to_string(),
                "button".to_string()
            ),
            (
                "src/app/admin/admin.component.html".to_string(),
                3,
                "markup-attribute".to_string(),
                "input".to_string()
            ),
            (
                "src/app/admin/admin.component.html".to_string(),
                4,
                "markup-attribute".to_string(),
                "span".to_string()
            ),
            (
                "src/app/admin/admin.component.ts".to_string(),
                2,
                "assignment".to_string(),
                "readonly allowedRoles".to_string()
            ),
            (
                "src/app/admin/admin.component.ts".to_string(),
                7,
                "call-argument".to_string(),
                "this.visibilityService.hasRole".to_string()
            ),
            (
                "src/app/routes.ts".to_string(),
                2,
                "object-property".to_string(),
                "ROUTES".to_string()
            ),
            (
                "src/app/routes.ts".to_string(),
                3,
                "object-property".to_string(),
                "ROUTES".to_string()
            ),
        ]
    );

    assert_eq!(rows[0]["inner_text"], "Delete");
    assert_eq!(rows[1]["inner_text"], "");
    assert_eq!(rows[6]["property"], "reports");
    Ok(())
}

#[test]
fn test_markup_filter_sentinel() -> Result<()> {
    let test = sample_project()?;

    let output = test
        .scan_command()
        .args(["-q", "--markup-filter", "sentinel", "-o", "r.json"])
        .output()?;
    assert!(output.status.success());

    let report = test.read_file("r.json")?;
    assert!(!report.contains("OTHER_ROLE"));
    assert!(report.contains("ROLE_MBAA.EDITOR"));
    Ok(())
}

#[test]
fn test_tsv_report_and_file_names() -> Result<()> {
    let test = sample_project()?;

    let output = test
        .scan_command()
        .args(["-q", "--file-names", "--format", "tsv"])
        .output()?;
    assert!(output.status.success());

    assert!(!test.root().join("target/rbac-report.html").exists());
    let report = test.read_file("target/rbac-report.tsv")?;
    let mut lines = report.lines();
    assert_eq!(
        lines.next(),
        Some("file\tline\tkind\towner\troles\tinner_text")
    );
    assert_eq!(
        lines.next(),
        Some("admin.component.html\t2\tmarkup-attribute\tbutton\tROLE_MBAA.ADMIN\tDelete")
    );
    assert!(stdout(&output).contains("Report written to target/rbac-report.tsv (tsv)"));
    Ok(())
}

#[test]
fn test_nested_menu_entries_are_reported() -> Result<()> {
    let test = CliTest::with_file(
        "src/app/menu.ts",
        r#"export const MENU = {
  items: [
    { label: 'Admin', roles: ['ROLE_MBAA.ADMIN'] },
    { label: 'Audit', roles: ['ROLE_MBAA.AUDITOR'] },
  ],
  extra: ['ROLE_MBAA.EXTRA'],
};
"#,
    )?;

    let rows = json_rows(&test)?;
    let owners: Vec<String> = rows
        .iter()
        .map(|row| {
            format!(
                "{}.{}:{}",
                row["owner"].as_str().unwrap_or_default(),
                row["property"].as_str().unwrap_or_default(),
                row["line"]
            )
        })
        .collect();
    assert_eq!(owners, vec!["MENU.roles:3", "MENU.roles:4", "MENU.extra:6"]);
    Ok(())
}

#[test]
fn test_custom_sentinel_from_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".rolescanrc.json",
        r#"{ "sentinel": "PERM_", "sourceRoot": "web" }"#,
    )?;
    test.write_file("web/a.ts", "const perms = ['PERM_READ'];\nconst r = ['ROLE_MBAA.X'];\n")?;

    let output = test.scan_command().args(["--no-report"]).output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("web/a.ts:1"));
    assert!(out.contains("TS:const perms"));
    assert!(!out.contains("ROLE_MBAA"));
    assert!(!out.contains("Report written"));
    assert!(!test.root().join("target").exists());
    Ok(())
}

#[test]
fn test_cli_source_root_overrides_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".rolescanrc.json", r#"{ "sourceRoot": "missing" }"#)?;
    test.write_file("ui/a.ts", "const r = ['ROLE_MBAA.X'];\n")?;

    let output = test
        .scan_command()
        .args(["--no-report", "--source-root", "ui"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("found 1 role marker"));
    Ok(())
}

#[test]
fn test_missing_source_root_fails() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.scan_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Error: Source root is not a directory: src/app"));
    assert!(!test.root().join("target").exists());
    Ok(())
}

#[test]
fn test_invalid_config_fails() -> Result<()> {
    let test = CliTest::with_file(".rolescanrc.json", r#"{ "sentinel": "" }"#)?;

    let output = test.scan_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("sentinel"));
    Ok(())
}

#[test]
fn test_unreadable_file_is_reported_and_skipped() -> Result<()> {
    let test = CliTest::new()?;
    test.write_bytes("src/app/broken.ts", &[0xff, 0xfe, 0x00])?;
    test.write_file("src/app/ok.ts", "const r = ['ROLE_MBAA.X'];\n")?;

    let output = test.scan_command().arg("--no-report").output()?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("Scanned 2 files - found 1 role marker"));
    assert!(stderr(&output).contains("1 file(s) could not be read (use -v for details)"));

    let output = test.scan_command().args(["--no-report", "-v"]).output()?;
    assert!(stderr(&output).contains("broken.ts: Cannot read file"));
    Ok(())
}

#[test]
fn test_unclosed_tag_is_flagged() -> Result<()> {
    let test = CliTest::with_file(
        "src/app/a.component.html",
        "<section *access=\"ROLE_MBAA.ADMIN\">\n  <p>never closed\n",
    )?;

    let output = test.scan_command().output()?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("(unclosed tag)"));
    assert!(stderr(&output).contains("1 occurrence(s) are partial matches"));

    let report = test.read_file("target/rbac-report.html")?;
    assert!(report.contains("class=\"anomaly\""));
    Ok(())
}

#[test]
fn test_reports_are_byte_identical_across_runs() -> Result<()> {
    let test = sample_project()?;
    for i in 0..30 {
        test.write_file(
            &format!("src/app/generated/g{:02}.ts", i),
            &format!("export const g{} = ['ROLE_MBAA.G{}'];\n", i, i),
        )?;
    }

    test.scan_command().args(["-q", "-o", "first.html"]).output()?;
    test.scan_command().args(["-q", "-o", "second.html"]).output()?;

    assert_eq!(test.read_file("first.html")?, test.read_file("second.html")?);
    Ok(())
}
