use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): The scan completed, including runs where single files
///   could not be read.
/// - `Error` (2): The run could not complete (missing source root, invalid
///   config, report write failure).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command completed.
    Success,
    /// Command failed due to a fatal error.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
