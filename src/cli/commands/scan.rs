use anyhow::{Context, Result};
use colored::Colorize;

use super::{CommandResult, CommandSummary, ReportArtifact, ScanSummary};
use crate::{
    cli::args::ScanArgs,
    config::{Config, ConfigLoadResult, PathStyle, load_config},
    core::ScanContext,
    report::{ReportFormat, write_report},
};

pub fn scan(args: ScanArgs) -> Result<CommandResult> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let ConfigLoadResult { mut config, path } = load_config(&cwd)?;

    if args.verbose {
        if let Some(path) = &path {
            eprintln!("{} Using config {}", "info:".bold().cyan(), path.display());
        }
    }

    apply_overrides(&mut config, &args);

    let ctx = ScanContext::new(config, args.verbose)?;
    let outcome = ctx.run();

    let report = if args.no_report {
        None
    } else {
        let artifact = ReportArtifact {
            path: ctx.config.output_path(),
            format: ctx.config.format,
        };
        write_report(&outcome.occurrences, artifact.format, &artifact.path)?;
        Some(artifact)
    };

    Ok(CommandResult {
        summary: CommandSummary::Scan(ScanSummary { outcome, report }),
    })
}

/// Merge CLI arguments into the loaded config (CLI args > config file > defaults).
fn apply_overrides(config: &mut Config, args: &ScanArgs) {
    if let Some(source_root) = &args.source_root {
        config.source_root = source_root.to_string_lossy().into_owned();
    }
    if let Some(output) = &args.output {
        config.output = Some(output.to_string_lossy().into_owned());
        if args.format.is_none() {
            if let Some(format) = ReportFormat::from_path(output) {
                config.format = format;
            }
        }
    }
    if let Some(format) = args.format {
        config.format = format;
    }
    if let Some(sentinel) = &args.sentinel {
        config.sentinel = sentinel.clone();
    }
    if let Some(filter) = args.markup_filter {
        config.markup_filter = filter;
    }
    if args.keep_duplicates {
        config.dedupe = false;
    }
    if args.file_names {
        config.path_style = PathStyle::FileName;
    }
}
