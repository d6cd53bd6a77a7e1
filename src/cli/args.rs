//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `scan`: Scan the source tree and write the access report (the default
//!   when no command is given)
//! - `init`: Initialize a rolescan configuration file

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::MarkupFilter;
use crate::report::ReportFormat;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None, args_conflicts_with_subcommands = true)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Arguments for the implicit `scan` command.
    #[command(flatten)]
    pub scan: ScanArgs,
}

impl Arguments {
    /// Arguments of the scan that will run, if any.
    fn scan_args(&self) -> Option<&ScanArgs> {
        match &self.command {
            Some(Command::Scan(cmd)) => Some(&cmd.args),
            Some(Command::Init) => None,
            None => Some(&self.scan),
        }
    }

    /// Get the verbose flag of the command that will run.
    pub fn verbose(&self) -> bool {
        self.scan_args().is_some_and(|args| args.verbose)
    }

    /// Get the quiet flag of the command that will run.
    pub fn quiet(&self) -> bool {
        self.scan_args().is_some_and(|args| args.quiet)
    }
}

/// Options of a scan run. Each one overrides the config file.
#[derive(Debug, Clone, Default, Args)]
pub struct ScanArgs {
    /// Directory to scan
    #[arg(long, env = "ROLESCAN_SOURCE_ROOT")]
    pub source_root: Option<PathBuf>,

    /// Report file to write
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Report format (default: inferred from --output, else html)
    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Role marker token that identifies role names
    #[arg(long)]
    pub sentinel: Option<String>,

    /// Which access-gated markup elements to report
    #[arg(long, value_enum)]
    pub markup_filter: Option<MarkupFilter>,

    /// Keep repeated occurrences instead of dropping them
    #[arg(long)]
    pub keep_duplicates: bool,

    /// Record bare file names instead of paths
    #[arg(long)]
    pub file_names: bool,

    /// Only print to the console, do not write the report file
    #[arg(long)]
    pub no_report: bool,

    /// Do not echo each occurrence to the console
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ScanCommand {
    #[command(flatten)]
    pub args: ScanArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan templates and sources for role markers and write the access report
    Scan(ScanCommand),
    /// Initialize a new .rolescanrc.json configuration file
    Init,
}
