//! Occurrence aggregation.
//!
//! Runs every extractor that applies to a file and concatenates their output
//! in extractor declaration order. A panic inside one extractor is contained:
//! it is recorded as an [`ExtractorFailureIssue`] and the other extractors
//! still run.

use std::collections::HashSet;
use std::panic::{AssertUnwindSafe, catch_unwind};

use super::extract::{Extract, ExtractorSet};
use super::occurrence::{FileKind, Occurrence};
use crate::issues::ExtractorFailureIssue;

/// Output of running the extractors on one file.
#[derive(Debug, Default)]
pub struct FileExtraction {
    pub occurrences: Vec<Occurrence>,
    pub failures: Vec<ExtractorFailureIssue>,
}

pub fn aggregate_file(
    extractors: &ExtractorSet,
    source_file: &str,
    kind: FileKind,
    content: &str,
) -> FileExtraction {
    run_extractors(extractors.for_kind(kind), source_file, content)
}

fn run_extractors<'e, E: Extract + 'e>(
    extractors: impl IntoIterator<Item = &'e E>,
    source_file: &str,
    content: &str,
) -> FileExtraction {
    let mut result = FileExtraction::default();

    for extractor in extractors {
        match catch_unwind(AssertUnwindSafe(|| extractor.extract(source_file, content))) {
            Ok(found) => result.occurrences.extend(found),
            Err(panic) => result.failures.push(ExtractorFailureIssue {
                file_path: source_file.to_string(),
                extractor: extractor.name(),
                error: panic_message(panic.as_ref()),
            }),
        }
    }

    result
}

/// Drop repeated occurrences, keeping the first of each.
///
/// Two occurrences are the same when file, line, kind, owner and role text
/// all match.
pub fn dedupe(occurrences: Vec<Occurrence>) -> Vec<Occurrence> {
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(occurrences.len());
    for occurrence in occurrences {
        let key = {
            let (file, line, kind, owner, roles) = occurrence.dedupe_key();
            (
                file.to_string(),
                line,
                kind,
                owner.to_string(),
                roles.to_string(),
            )
        };
        if seen.insert(key) {
            kept.push(occurrence);
        }
    }
    kept
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "extractor panicked".to_string()
    }
}
