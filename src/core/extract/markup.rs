use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::Extract;
use crate::core::marker::RoleMarker;
use crate::core::occurrence::{ContextKind, Diagnostic, FileKind, LineIndex, Occurrence};

/// HTML elements that never have a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Which access attributes the markup extractor reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkupFilter {
    /// Every element gated by the access attribute.
    #[default]
    All,
    /// Only elements whose attribute value carries the sentinel.
    Sentinel,
}

/// Matches elements carrying `*access="..."` or `[access]="..."`.
///
/// Paired elements capture everything up to the matching closing tag of the
/// same name, counting nested elements of that name. Self-closing and void
/// elements report empty inner text.
#[derive(Debug)]
pub struct MarkupExtractor {
    marker: RoleMarker,
    filter: MarkupFilter,
    open_tag: Regex,
}

impl MarkupExtractor {
    pub fn new(marker: &RoleMarker, attribute: &str, filter: MarkupFilter) -> Result<Self> {
        if attribute.is_empty()
            || !attribute
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            bail!("Invalid access attribute name: \"{}\"", attribute);
        }
        let attribute = regex::escape(attribute);
        let open_tag = Regex::new(&format!(
            r#"(?i)<(?P<tag>[a-z][\w-]*)\s(?:[^>]*?\s)?(?:\*{attribute}|\[{attribute}\])\s*=\s*"(?P<value>[^"]+)"[^>]*>"#
        ))
        .context("Failed to compile markup pattern")?;
        Ok(Self {
            marker: marker.clone(),
            filter,
            open_tag,
        })
    }
}

impl Extract for MarkupExtractor {
    fn name(&self) -> &'static str {
        "markup"
    }

    fn applies_to(&self, kind: FileKind) -> bool {
        kind == FileKind::Markup
    }

    fn extract(&self, source_file: &str, content: &str) -> Vec<Occurrence> {
        // ASCII lowercasing keeps byte offsets aligned with `content`.
        let lower = content.to_ascii_lowercase();
        let lines = LineIndex::new(content);
        let mut found = Vec::new();

        for caps in self.open_tag.captures_iter(content) {
            let (Some(whole), Some(tag), Some(value)) =
                (caps.get(0), caps.name("tag"), caps.name("value"))
            else {
                continue;
            };
            let roles = value.as_str().trim();
            if self.filter == MarkupFilter::Sentinel && !self.marker.matches(roles) {
                continue;
            }

            let tag_name = tag.as_str();
            let occurrence = Occurrence::new(
                source_file,
                lines.line_of(whole.start()),
                ContextKind::MarkupAttribute,
                tag_name,
                roles,
            );

            let self_closing = whole.as_str().ends_with("/>")
                || VOID_ELEMENTS.contains(&tag_name.to_ascii_lowercase().as_str());
            let occurrence = if self_closing {
                occurrence
            } else {
                match find_closing_tag(&lower, &tag_name.to_ascii_lowercase(), whole.end()) {
                    Some(inner_end) => {
                        occurrence.with_inner_text(content[whole.end()..inner_end].trim())
                    }
                    None => occurrence.with_diagnostic(Diagnostic::UnclosedTag),
                }
            };
            found.push(occurrence);
        }

        found
    }
}

/// Find the start of the closing tag matching an element opened just before
/// `from`. `lower` must be ASCII-lowercased and `tag` lowercase.
fn find_closing_tag(lower: &str, tag: &str, from: usize) -> Option<usize> {
    let open = format!("<{}", tag);
    let close = format!("</{}", tag);
    let mut depth = 1usize;
    let mut pos = from;

    while let Some(found) = lower[pos..].find('<') {
        let start = pos + found;
        let rest = &lower[start..];

        if rest.starts_with(&close) && ends_name(&rest[close.len()..]) {
            depth -= 1;
            if depth == 0 {
                return Some(start);
            }
            pos = start + close.len();
        } else if rest.starts_with(&open) && ends_name(&rest[open.len()..]) {
            let end = start + rest.find('>')?;
            if !lower[..end].ends_with('/') {
                depth += 1;
            }
            pos = end + 1;
        } else {
            pos = start + 1;
        }
    }

    None
}

/// True if a tag name ends where `rest` begins.
fn ends_name(rest: &str) -> bool {
    rest.chars()
        .next()
        .is_none_or(|c| c.is_whitespace() || c == '>' || c == '/')
}
