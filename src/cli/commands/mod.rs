pub mod init;
pub mod scan;

use std::path::PathBuf;

use crate::core::ScanOutcome;
use crate::report::ReportFormat;

#[derive(Debug)]
pub enum CommandSummary {
    Scan(ScanSummary),
    Init(InitSummary),
}

/// Report file written by a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifact {
    pub path: PathBuf,
    pub format: ReportFormat,
}

#[derive(Debug)]
pub struct ScanSummary {
    pub outcome: ScanOutcome,
    /// `None` when the report file was disabled.
    pub report: Option<ReportArtifact>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub path: PathBuf,
}

/// Result of running a rolescan command.
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
}
