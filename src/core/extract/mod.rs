//! Context extractors.
//!
//! Each extractor scans the full text of one file and yields the role-marker
//! occurrences found in one syntactic context:
//!
//! - [`AssignmentExtractor`]: `const roles = ["ROLE_X.ADMIN"];`
//! - [`ObjectLiteralExtractor`]: `config = { roles: ["ROLE_X.ADMIN"] };`
//! - [`CallArgumentExtractor`]: `service.hasRole(["ROLE_X.ADMIN"])`
//! - [`MarkupExtractor`]: `<div *access="ROLE_X.ADMIN">...</div>`
//!
//! Patterns are compiled once per run into an [`ExtractorSet`] and shared
//! read-only across files.

mod assignment;
mod brackets;
mod call_argument;
mod markup;
mod object_literal;

pub use assignment::AssignmentExtractor;
pub use call_argument::CallArgumentExtractor;
pub use markup::{MarkupExtractor, MarkupFilter};
pub use object_literal::ObjectLiteralExtractor;

use anyhow::Result;
use enum_dispatch::enum_dispatch;

use super::marker::RoleMarker;
use super::occurrence::{FileKind, Occurrence};

/// Shared interface of all context extractors.
#[enum_dispatch]
pub trait Extract {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Whether this extractor runs on files of `kind`.
    fn applies_to(&self, kind: FileKind) -> bool;

    /// Scan `content` and return occurrences in match order.
    fn extract(&self, source_file: &str, content: &str) -> Vec<Occurrence>;
}

#[enum_dispatch(Extract)]
#[derive(Debug)]
pub enum Extractor {
    Assignment(AssignmentExtractor),
    ObjectLiteral(ObjectLiteralExtractor),
    CallArgument(CallArgumentExtractor),
    Markup(MarkupExtractor),
}

/// Inputs needed to compile the extractor patterns.
#[derive(Debug, Clone)]
pub struct ExtractorOptions {
    pub sentinel: String,
    pub access_attribute: String,
    pub markup_filter: MarkupFilter,
}

/// Compiled extractors in declaration order.
#[derive(Debug)]
pub struct ExtractorSet {
    extractors: Vec<Extractor>,
}

impl ExtractorSet {
    pub fn new(options: &ExtractorOptions) -> Result<Self> {
        let marker = RoleMarker::new(options.sentinel.clone());
        let extractors = vec![
            AssignmentExtractor::new(&marker)?.into(),
            ObjectLiteralExtractor::new(&marker)?.into(),
            CallArgumentExtractor::new(&marker)?.into(),
            MarkupExtractor::new(&marker, &options.access_attribute, options.markup_filter)?
                .into(),
        ];
        Ok(Self { extractors })
    }

    /// Extractors that apply to `kind`, in declaration order.
    pub fn for_kind(&self, kind: FileKind) -> impl Iterator<Item = &Extractor> {
        self.extractors
            .iter()
            .filter(move |extractor| extractor.applies_to(kind))
    }
}
