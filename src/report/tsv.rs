use std::fmt::Write as _;

use crate::core::Occurrence;

const HEADER: &str = "file\tline\tkind\towner\troles\tinner_text";

/// Escape backslashes, tabs and line breaks so each occurrence stays on one row.
///
/// ```
/// use rolescan::report::escape_tsv;
///
/// assert_eq!(escape_tsv("[\n\t'A'\n]"), r"[\n\t'A'\n]");
/// ```
pub fn escape_tsv(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\t' => escaped.push_str("\\t"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render a tab-separated table with a header row.
pub fn render_tsv(occurrences: &[Occurrence]) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');

    for occurrence in occurrences {
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}",
            escape_tsv(&occurrence.source_file),
            occurrence.line,
            occurrence.context_kind,
            escape_tsv(&occurrence.display_owner()),
            escape_tsv(&occurrence.roles_text),
            escape_tsv(&occurrence.inner_text),
        );
    }

    out
}
