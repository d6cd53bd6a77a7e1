use anyhow::Result;

pub mod args;
mod commands;
mod exit_status;
mod report;
mod run;

pub use args::{Arguments, Command, ScanArgs};
pub use commands::{CommandResult, CommandSummary, InitSummary, ReportArtifact, ScanSummary};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let verbose = args.verbose();
    let quiet = args.quiet();

    let result = run::run(args)?;
    report::print(&result, verbose, quiet);

    Ok(ExitStatus::Success)
}
