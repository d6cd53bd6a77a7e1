use std::fmt::Write as _;

use crate::core::Occurrence;

const HEADER: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <title>RBAC Access Report</title>
  <style>
    body { font-family: Arial, sans-serif; margin: 20px; }
    table { border-collapse: collapse; width: 100%; }
    th, td { border: 1px solid #ddd; padding: 8px; vertical-align: top; }
    th { background: #f4f4f4; }
    td.roles, td.inner { white-space: pre-wrap; }
    tr.anomaly { background: #fff4e5; }
    code { font-family: monospace; }
  </style>
</head>
<body>
  <h1>RBAC Access Report</h1>
"#;

const FOOTER: &str = "  </table>
</body>
</html>
";

/// Escape the characters that are significant in HTML text and attributes.
///
/// ```
/// use rolescan::report::escape_html;
///
/// assert_eq!(escape_html(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render a standalone HTML document with one table row per occurrence.
pub fn render_html(occurrences: &[Occurrence]) -> String {
    let mut out = String::from(HEADER);
    let _ = writeln!(
        out,
        "  <p>{} occurrence{}</p>",
        occurrences.len(),
        if occurrences.len() == 1 { "" } else { "s" }
    );
    out.push_str("  <table>\n");
    out.push_str(
        "    <tr><th>File</th><th>Element / Variable</th><th>Roles</th><th>Inner Text</th></tr>\n",
    );

    for occurrence in occurrences {
        let row_attrs = match occurrence.diagnostic {
            Some(diagnostic) => format!(
                r#" class="anomaly" title="{}""#,
                escape_html(&diagnostic.to_string())
            ),
            None => String::new(),
        };
        let _ = writeln!(
            out,
            r#"    <tr{}><td><code>{}:{}</code></td><td>{}</td><td class="roles">{}</td><td class="inner">{}</td></tr>"#,
            row_attrs,
            escape_html(&occurrence.source_file),
            occurrence.line,
            escape_html(&occurrence.display_owner()),
            escape_html(&occurrence.roles_text),
            escape_html(&occurrence.inner_text),
        );
    }

    out.push_str(FOOTER);
    out
}
