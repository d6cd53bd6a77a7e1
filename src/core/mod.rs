//! Core extraction engine.
//!
//! Pipeline for one run:
//!
//! 1. [`file_scanner`] walks the source root and lists candidate files.
//! 2. [`context::ScanContext`] reads each file and hands it to the aggregator.
//! 3. [`aggregate`] runs the [`extract`] extractors that apply to the file kind
//!    and concatenates their occurrences.
//!
//! Everything here is read-only over the source tree; rendering lives in
//! [`crate::report`].

pub mod aggregate;
pub mod context;
pub mod extract;
pub mod file_scanner;
pub mod marker;
pub mod occurrence;

pub use context::{ScanContext, ScanOutcome};
pub use extract::{Extract, Extractor, ExtractorOptions, ExtractorSet, MarkupFilter};
pub use marker::RoleMarker;
pub use occurrence::{ContextKind, Diagnostic, FileKind, LineIndex, Occurrence};
