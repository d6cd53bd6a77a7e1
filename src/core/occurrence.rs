//! Occurrence data model.
//!
//! An [`Occurrence`] is one located role-marker usage: which file it came from,
//! which construct owns it, and the verbatim role text.

use std::path::Path;

use serde::Serialize;

/// Syntactic shape in which a role marker appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContextKind {
    /// `lhs = [ ... ];`
    Assignment,
    /// `name = { key: [ ... ] };`
    ObjectProperty,
    /// `callee.path([ ... ])`
    CallArgument,
    /// `<tag *access="...">`
    MarkupAttribute,
}

impl ContextKind {
    /// True for kinds found in script files.
    pub fn is_script(self) -> bool {
        !matches!(self, ContextKind::MarkupAttribute)
    }
}

impl std::fmt::Display for ContextKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContextKind::Assignment => write!(f, "assignment"),
            ContextKind::ObjectProperty => write!(f, "object-property"),
            ContextKind::CallArgument => write!(f, "call-argument"),
            ContextKind::MarkupAttribute => write!(f, "markup-attribute"),
        }
    }
}

/// Flags a partial match that is still reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Diagnostic {
    /// A role list opened inside an object literal never closed.
    UnterminatedList,
    /// A paired markup element has no matching closing tag.
    UnclosedTag,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::UnterminatedList => write!(f, "unterminated list"),
            Diagnostic::UnclosedTag => write!(f, "unclosed tag"),
        }
    }
}

/// One role-marker usage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occurrence {
    pub source_file: String,
    /// 1-based line where the matched construct starts.
    pub line: usize,
    pub context_kind: ContextKind,
    /// Variable, object name, callee path or tag name.
    pub owner: String,
    /// Key of the role-bearing property. Only set for object properties.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    /// Verbatim role list or attribute value.
    pub roles_text: String,
    /// Text between opening and closing tag. Empty outside markup.
    pub inner_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<Diagnostic>,
}

impl Occurrence {
    pub fn new(
        source_file: &str,
        line: usize,
        context_kind: ContextKind,
        owner: impl Into<String>,
        roles_text: impl Into<String>,
    ) -> Self {
        Self {
            source_file: source_file.to_string(),
            line,
            context_kind,
            owner: owner.into(),
            property: None,
            roles_text: roles_text.into(),
            inner_text: String::new(),
            diagnostic: None,
        }
    }

    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    pub fn with_inner_text(mut self, inner_text: impl Into<String>) -> Self {
        self.inner_text = inner_text.into();
        self
    }

    pub fn with_diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostic = Some(diagnostic);
        self
    }

    /// Identifier shown in reports: script rows carry a `TS:` prefix,
    /// object properties append the property key.
    ///
    /// ```
    /// use rolescan::core::{ContextKind, Occurrence};
    ///
    /// let occ = Occurrence::new("a.ts", 1, ContextKind::ObjectProperty, "config", "[]")
    ///     .with_property("roles");
    /// assert_eq!(occ.display_owner(), "TS:config.roles");
    /// ```
    pub fn display_owner(&self) -> String {
        let owner = match &self.property {
            Some(property) => format!("{}.{}", self.owner, property),
            None => self.owner.clone(),
        };
        if self.context_kind.is_script() {
            format!("TS:{}", owner)
        } else {
            owner
        }
    }

    /// Key used to drop repeated reports of the same physical occurrence.
    pub fn dedupe_key(&self) -> (&str, usize, ContextKind, &str, &str) {
        (
            &self.source_file,
            self.line,
            self.context_kind,
            &self.owner,
            &self.roles_text,
        )
    }
}

/// Kind of source file, inferred from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Markup,
    Script,
}

impl FileKind {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "html" | "htm" => Some(FileKind::Markup),
            "ts" | "tsx" | "js" | "jsx" | "mjs" | "cjs" => Some(FileKind::Script),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// Line start offsets of one file, for O(log n) line lookups.
///
/// Built once per file; extractors report many matches per file and must not
/// rescan the content for each one.
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(content: &str) -> Self {
        let mut starts = vec![0]; // Line 1 starts at offset 0
        starts.extend(
            content
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { starts }
    }

    /// 1-based line number of a byte offset. Offsets past the end map to the
    /// last line.
    pub fn line_of(&self, offset: usize) -> usize {
        self.starts.partition_point(|&start| start <= offset)
    }
}
