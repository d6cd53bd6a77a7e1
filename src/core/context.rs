use std::path::{Path, PathBuf};

use anyhow::Result;
use rayon::prelude::*;

use super::{
    aggregate::{aggregate_file, dedupe},
    extract::{ExtractorOptions, ExtractorSet},
    file_scanner::scan_files,
    occurrence::{FileKind, Occurrence},
};
use crate::{
    config::Config,
    issues::{FileReadIssue, Issue},
};

/// Everything one scan run produced.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Occurrences in file order, then extractor order, then match order.
    pub occurrences: Vec<Occurrence>,
    /// Files skipped or partially scanned.
    pub issues: Vec<Issue>,
    /// Number of files handed to the extractors.
    pub files_scanned: usize,
    /// Entries the tree walk could not access.
    pub skipped_count: usize,
}

impl ScanOutcome {
    /// Occurrences flagged as partial matches.
    pub fn anomaly_count(&self) -> usize {
        self.occurrences
            .iter()
            .filter(|o| o.diagnostic.is_some())
            .count()
    }
}

/// A configured scan over one source root.
///
/// Built once per run: the tree is walked and the extractor patterns are
/// compiled in [`ScanContext::new`], so a missing source root fails before any
/// file is read.
pub struct ScanContext {
    pub config: Config,
    pub source_root: PathBuf,
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
    extractors: ExtractorSet,
}

impl ScanContext {
    pub fn new(config: Config, verbose: bool) -> Result<Self> {
        config.validate()?;

        let source_root = PathBuf::from(&config.source_root);
        let scan = scan_files(
            &source_root,
            &config.extensions,
            &config.ignores,
            config.ignore_test_files,
            verbose,
        )?;

        let extractors = ExtractorSet::new(&ExtractorOptions {
            sentinel: config.sentinel.clone(),
            access_attribute: config.access_attribute.clone(),
            markup_filter: config.markup_filter,
        })?;

        Ok(Self {
            config,
            source_root,
            files: scan.files,
            skipped_count: scan.skipped_count,
            extractors,
        })
    }

    /// Read and scan every discovered file.
    ///
    /// Files are processed in parallel, but results are merged in the sorted
    /// file order, so the outcome is identical across runs.
    pub fn run(&self) -> ScanOutcome {
        let per_file: Vec<_> = self
            .files
            .par_iter()
            .map(|path| self.scan_file(path))
            .collect();

        let mut outcome = ScanOutcome {
            files_scanned: self.files.len(),
            skipped_count: self.skipped_count,
            ..Default::default()
        };
        for (occurrences, issues) in per_file {
            outcome.occurrences.extend(occurrences);
            outcome.issues.extend(issues);
        }

        if self.config.dedupe {
            outcome.occurrences = dedupe(outcome.occurrences);
        }
        outcome
    }

    fn scan_file(&self, path: &Path) -> (Vec<Occurrence>, Vec<Issue>) {
        let source_file = self.config.path_style.display(path);
        let Some(kind) = FileKind::from_path(path) else {
            return (Vec::new(), Vec::new());
        };

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                let issue = Issue::FileRead(FileReadIssue {
                    file_path: path.to_string_lossy().into_owned(),
                    error: e.to_string(),
                });
                return (Vec::new(), vec![issue]);
            }
        };

        let extraction = aggregate_file(&self.extractors, &source_file, kind, &content);
        let issues = extraction
            .failures
            .into_iter()
            .map(Issue::ExtractorFailure)
            .collect();
        (extraction.occurrences, issues)
    }
}
