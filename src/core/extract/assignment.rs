use anyhow::{Context, Result};
use regex::Regex;

use super::Extract;
use super::brackets::matching_close;
use crate::core::marker::RoleMarker;
use crate::core::occurrence::{ContextKind, FileKind, LineIndex, Occurrence};

/// Matches `<lhs> = [ ... ]` where the list carries the sentinel.
///
/// The left-hand side is anchored to the line holding the `=`, so unrelated
/// statements above it are never swallowed. The list ends at its matching
/// `]`, which must end the statement: a `;`, a line break, a `}` or a
/// trailing comment may follow it.
#[derive(Debug)]
pub struct AssignmentExtractor {
    marker: RoleMarker,
    pattern: Regex,
}

impl AssignmentExtractor {
    pub fn new(marker: &RoleMarker) -> Result<Self> {
        let pattern = Regex::new(r"(?P<lhs>[^\n=;{}]*[\w$\])>])[ \t]*=\s*\[")
            .context("Failed to compile assignment pattern")?;
        Ok(Self {
            marker: marker.clone(),
            pattern,
        })
    }
}

/// Whether the text after a list closes the statement.
fn ends_statement(after: &str) -> bool {
    let after = after.trim_start_matches([' ', '\t']);
    after.is_empty()
        || after.starts_with([';', '\n', '\r', '}'])
        || after.starts_with("//")
}

impl Extract for AssignmentExtractor {
    fn name(&self) -> &'static str {
        "assignment"
    }

    fn applies_to(&self, kind: FileKind) -> bool {
        kind == FileKind::Script
    }

    fn extract(&self, source_file: &str, content: &str) -> Vec<Occurrence> {
        let lines = LineIndex::new(content);
        let mut found = Vec::new();
        let mut pos = 0;

        while let Some(caps) = self.pattern.captures_at(content, pos) {
            let (Some(whole), Some(lhs)) = (caps.get(0), caps.name("lhs")) else {
                break;
            };
            let open = whole.end() - 1;
            let Some(close) = matching_close(&content[open..]).map(|c| open + c) else {
                pos = whole.end();
                continue;
            };
            pos = close + 1;

            let list = &content[open..=close];
            let owner = lhs.as_str().trim();
            if owner.is_empty() || !self.marker.matches(list) || !ends_statement(&content[pos..]) {
                continue;
            }
            // Report the line of the identifier, not of leading blank space.
            let offset = lhs.start() + (lhs.as_str().len() - lhs.as_str().trim_start().len());
            found.push(Occurrence::new(
                source_file,
                lines.line_of(offset),
                ContextKind::Assignment,
                owner,
                list,
            ));
        }

        found
    }
}
