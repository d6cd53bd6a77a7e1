use anyhow::{Context, Result};
use regex::Regex;

use super::Extract;
use super::brackets::{BracketScan, matching_close};
use crate::core::marker::RoleMarker;
use crate::core::occurrence::{ContextKind, Diagnostic, FileKind, Occurrence};

/// Line-stream scanner for role lists inside object literals.
///
/// Walks the file line by line. A line of the form `name = {` opens an object
/// scope; brace depth is tracked from there so nested objects stay inside the
/// enclosing scope, and the scope ends when depth returns to zero. Inside a
/// scope every `key: [ ... ]` property whose list carries the sentinel yields
/// one occurrence owned by the object name.
///
/// Lists close on their matching `]` and may span lines. A list of objects
/// (`items: [{ roles: [...] }, ...]`) reports the role-bearing properties of
/// its entries; the enclosing list is reported only when none of them match.
#[derive(Debug)]
pub struct ObjectLiteralExtractor {
    marker: RoleMarker,
    header: Regex,
    property: Regex,
}

impl ObjectLiteralExtractor {
    pub fn new(marker: &RoleMarker) -> Result<Self> {
        let header = Regex::new(
            r"^\s*(?:(?:export|declare|const|let|var|public|private|protected|static|readonly)\s+)*(?P<name>[\w$]+(?:\.[\w$]+)*)\s*(?::[^=]*)?=\s*\{",
        )
        .context("Failed to compile object header pattern")?;
        let property = Regex::new(r#"(?P<key>[\w$]+|'[^']*'|"[^"]*")\s*[:=]\s*\["#)
            .context("Failed to compile object property pattern")?;
        Ok(Self {
            marker: marker.clone(),
            header,
            property,
        })
    }

    /// Next `key: [` at or after `from`, as the unquoted key and the offset of `[`.
    fn next_property<'t>(&self, text: &'t str, from: usize) -> Option<(&'t str, usize)> {
        let caps = self.property.captures_at(text, from)?;
        let key = caps.name("key")?;
        let open = caps.get(0)?.end() - 1;
        Some((unquote(key.as_str()), open))
    }
}

/// Object currently being walked.
struct Scope {
    name: String,
    depth: i64,
}

/// Role list that opened on an earlier line and has not closed yet.
struct PendingList {
    owner: String,
    key: String,
    text: String,
    line: usize,
    scan: BracketScan,
}

struct Walk<'a> {
    extractor: &'a ObjectLiteralExtractor,
    source_file: &'a str,
    scope: Option<Scope>,
    pending: Option<PendingList>,
    found: Vec<Occurrence>,
}

impl<'a> Walk<'a> {
    fn line(&mut self, line_no: usize, line: &str) {
        let mut rest = line;

        if let Some(mut pending) = self.pending.take() {
            pending.text.push('\n');
            match pending.scan.feed(rest) {
                Some(end) => {
                    let (consumed, after) = rest.split_at(end + 1);
                    pending.text.push_str(consumed);
                    self.track_braces(consumed);
                    self.emit_list(
                        &pending.owner,
                        &pending.key,
                        &pending.text,
                        pending.line,
                        None,
                    );
                    rest = after;
                }
                None => {
                    pending.text.push_str(rest);
                    self.track_braces(rest);
                    self.pending = Some(pending);
                    return;
                }
            }
        }

        if self.scope.is_none() {
            let Some(caps) = self.extractor.header.captures(rest) else {
                return;
            };
            let (Some(name), Some(whole)) = (caps.name("name"), caps.get(0)) else {
                return;
            };
            self.scope = Some(Scope {
                name: name.as_str().to_string(),
                depth: 0,
            });
            // Keep the opening brace so depth counting starts at one.
            rest = &rest[whole.end() - 1..];
        }

        self.properties(line_no, rest);
        self.track_braces(rest);
    }

    fn track_braces(&mut self, text: &str) {
        if let Some(scope) = self.scope.as_mut() {
            scope.depth += brace_delta(text);
            if scope.depth <= 0 {
                self.scope = None;
            }
        }
    }

    fn properties(&mut self, line_no: usize, segment: &str) {
        let Some(owner) = self.scope.as_ref().map(|s| s.name.clone()) else {
            return;
        };

        let extractor = self.extractor;
        let mut from = 0;
        while let Some((key, open)) = extractor.next_property(segment, from) {
            let mut scan = BracketScan::default();
            match scan.feed(&segment[open..]) {
                Some(end) => {
                    let close = open + end;
                    self.emit_list(&owner, key, &segment[open..=close], line_no, None);
                    from = close + 1;
                }
                None => {
                    self.pending = Some(PendingList {
                        owner,
                        key: key.to_string(),
                        text: segment[open..].to_string(),
                        line: line_no,
                        scan,
                    });
                    return;
                }
            }
        }
    }

    /// Report a closed (or unterminated) list starting on `line`.
    ///
    /// Role-bearing properties of objects inside the list are reported in its
    /// place; the list itself is reported only if none were found.
    fn emit_list(
        &mut self,
        owner: &str,
        key: &str,
        text: &str,
        line: usize,
        diagnostic: Option<Diagnostic>,
    ) {
        let extractor = self.extractor;
        if !extractor.marker.matches(text) {
            return;
        }

        let before = self.found.len();
        let inner = &text[1..];
        let mut from = 0;
        while let Some((nested_key, open)) = extractor.next_property(inner, from) {
            let Some(close) = matching_close(&inner[open..]).map(|c| open + c) else {
                break;
            };
            let nested_line = line + inner[..open].matches('\n').count();
            self.emit_list(owner, nested_key, &inner[open..=close], nested_line, None);
            from = close + 1;
        }

        if self.found.len() == before {
            let mut occurrence = Occurrence::new(
                self.source_file,
                line,
                ContextKind::ObjectProperty,
                owner,
                text,
            )
            .with_property(key);
            if let Some(diagnostic) = diagnostic {
                occurrence = occurrence.with_diagnostic(diagnostic);
            }
            self.found.push(occurrence);
        }
    }

    fn finish(mut self) -> Vec<Occurrence> {
        if let Some(pending) = self.pending.take() {
            self.emit_list(
                &pending.owner,
                &pending.key,
                &pending.text,
                pending.line,
                Some(Diagnostic::UnterminatedList),
            );
        }
        self.found
    }
}

impl Extract for ObjectLiteralExtractor {
    fn name(&self) -> &'static str {
        "object-literal"
    }

    fn applies_to(&self, kind: FileKind) -> bool {
        kind == FileKind::Script
    }

    fn extract(&self, source_file: &str, content: &str) -> Vec<Occurrence> {
        let mut walk = Walk {
            extractor: self,
            source_file,
            scope: None,
            pending: None,
            found: Vec::new(),
        };
        for (idx, line) in content.lines().enumerate() {
            walk.line(idx + 1, line);
        }
        walk.finish()
    }
}

fn brace_delta(text: &str) -> i64 {
    text.chars().fold(0, |depth, c| match c {
        '{' => depth + 1,
        '}' => depth - 1,
        _ => depth,
    })
}

fn unquote(key: &str) -> &str {
    key.trim_matches(|c| c == '\'' || c == '"')
}
