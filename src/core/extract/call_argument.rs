use anyhow::{Context, Result};
use regex::Regex;

use super::Extract;
use crate::core::marker::RoleMarker;
use crate::core::occurrence::{ContextKind, FileKind, LineIndex, Occurrence};

/// Matches `callee.path([ ... ])` where the first argument is a role list, and
/// `callee.path('ROLE_X.ADMIN')` where it is a single quoted role.
///
/// The argument must open the argument list and be followed by `)` or `,`.
/// Brackets, parentheses and `;` are not allowed inside a list, and a quoted
/// role may not span lines, so a match never leaves the call it started in.
#[derive(Debug)]
pub struct CallArgumentExtractor {
    pattern: Regex,
}

impl CallArgumentExtractor {
    pub fn new(marker: &RoleMarker) -> Result<Self> {
        let sentinel = marker.pattern();
        let pattern = Regex::new(&format!(
            r#"(?P<callee>[\w$]+(?:\.[\w$]+)*)\s*\(\s*(?P<list>\[[^\[\]();]*?{sentinel}[^\[\]();]*?\]|'[^'\n]*?{sentinel}[^'\n]*'|"[^"\n]*?{sentinel}[^"\n]*")\s*[,)]"#
        ))
        .context("Failed to compile call argument pattern")?;
        Ok(Self { pattern })
    }
}

impl Extract for CallArgumentExtractor {
    fn name(&self) -> &'static str {
        "call-argument"
    }

    fn applies_to(&self, kind: FileKind) -> bool {
        kind == FileKind::Script
    }

    fn extract(&self, source_file: &str, content: &str) -> Vec<Occurrence> {
        let lines = LineIndex::new(content);
        self.pattern
            .captures_iter(content)
            .filter_map(|caps| {
                let callee = caps.name("callee")?;
                let list = caps.name("list")?;
                Some(Occurrence::new(
                    source_file,
                    lines.line_of(callee.start()),
                    ContextKind::CallArgument,
                    callee.as_str(),
                    list.as_str(),
                ))
            })
            .collect()
    }
}
