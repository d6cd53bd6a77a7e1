//! Non-fatal problems found during a scan.
//!
//! A scan never aborts because of a single file. Files that cannot be read and
//! extractors that fail on a file are collected here and reported after the
//! occurrences.

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A file could not be read or is not valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FileReadIssue {
    pub file_path: String,
    pub error: String,
}

/// An extractor failed on one file. Its output for that file is lost; the
/// other extractors still ran.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExtractorFailureIssue {
    pub file_path: String,
    pub extractor: &'static str,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Issue {
    FileRead(FileReadIssue),
    ExtractorFailure(ExtractorFailureIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::FileRead(_) => Severity::Warning,
            Issue::ExtractorFailure(_) => Severity::Error,
        }
    }

    pub fn file_path(&self) -> &str {
        match self {
            Issue::FileRead(issue) => &issue.file_path,
            Issue::ExtractorFailure(issue) => &issue.file_path,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Issue::FileRead(issue) => format!("Cannot read file: {}", issue.error),
            Issue::ExtractorFailure(issue) => {
                format!("Extractor '{}' failed: {}", issue.extractor, issue.error)
            }
        }
    }
}
