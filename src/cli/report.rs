//! Console output for command results.
//!
//! Occurrences go to stdout, one aligned line each. Warnings go to stderr.
//! Kept apart from the scan logic so rolescan can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{CommandResult, CommandSummary, InitSummary, ScanSummary};
use crate::core::{Occurrence, ScanOutcome};
use crate::issues::{Issue, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Width of the context kind column.
const KIND_WIDTH: usize = 16;

/// Print occurrences to stdout.
pub fn print_occurrences(occurrences: &[Occurrence]) {
    print_occurrences_to(occurrences, &mut io::stdout().lock());
}

/// Print occurrences to a custom writer.
///
/// Locations are padded to the widest `file:line` so the columns line up,
/// including for paths with wide characters.
pub fn print_occurrences_to<W: Write>(occurrences: &[Occurrence], writer: &mut W) {
    let locations: Vec<String> = occurrences
        .iter()
        .map(|o| format!("{}:{}", o.source_file, o.line))
        .collect();
    let width = locations.iter().map(|l| l.width()).max().unwrap_or(0);

    for (occurrence, location) in occurrences.iter().zip(&locations) {
        let padding = " ".repeat(width - location.width());
        let kind = format!("{:<KIND_WIDTH$}", occurrence.context_kind.to_string());
        let _ = write!(
            writer,
            "{}{}  {} {}  {}",
            location.cyan(),
            padding,
            kind.dimmed(),
            occurrence.display_owner().bold(),
            one_line(&occurrence.roles_text)
        );
        if !occurrence.inner_text.is_empty() {
            let _ = write!(writer, "  \"{}\"", one_line(&occurrence.inner_text));
        }
        if let Some(diagnostic) = occurrence.diagnostic {
            let _ = write!(writer, "  {}", format!("({})", diagnostic).yellow());
        }
        let _ = writeln!(writer);
    }
}

/// Print the scan summary to a custom writer.
pub fn print_summary_to<W: Write>(summary: &ScanSummary, writer: &mut W) {
    let outcome = &summary.outcome;
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Scanned {} file{} - found {} role marker{}",
            outcome.files_scanned,
            plural(outcome.files_scanned),
            outcome.occurrences.len(),
            plural(outcome.occurrences.len())
        )
        .green()
    );
    if let Some(report) = &summary.report {
        let _ = writeln!(
            writer,
            "  Report written to {} ({})",
            report.path.display().to_string().bold(),
            report.format
        );
    }
}

/// Print warnings about partial matches and files that were not scanned.
pub fn print_warnings_to<W: Write>(outcome: &ScanOutcome, verbose: bool, writer: &mut W) {
    let anomalies = outcome.anomaly_count();
    if anomalies > 0 {
        let _ = writeln!(
            writer,
            "{} {} occurrence(s) are partial matches and are flagged in the report",
            "warning:".bold().yellow(),
            anomalies
        );
    }

    let read_failures = outcome
        .issues
        .iter()
        .filter(|issue| matches!(issue, Issue::FileRead(_)))
        .count();

    if verbose {
        for issue in &outcome.issues {
            let label = match issue.severity() {
                Severity::Error => "error:".bold().red(),
                Severity::Warning => "warning:".bold().yellow(),
            };
            let _ = writeln!(writer, "{} {}: {}", label, issue.file_path(), issue.message());
        }
    } else {
        if read_failures > 0 {
            let _ = writeln!(
                writer,
                "{} {} file(s) could not be read (use {} for details)",
                "warning:".bold().yellow(),
                read_failures,
                "-v".cyan()
            );
        }
        for issue in outcome
            .issues
            .iter()
            .filter(|issue| issue.severity() == Severity::Error)
        {
            let _ = writeln!(
                writer,
                "{} {}: {}",
                "error:".bold().red(),
                issue.file_path(),
                issue.message()
            );
        }
    }

    if outcome.skipped_count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} path(s) could not be accessed (use {} for details)",
            "warning:".bold().yellow(),
            outcome.skipped_count,
            "-v".cyan()
        );
    }
}

pub fn print(result: &CommandResult, verbose: bool, quiet: bool) {
    match &result.summary {
        CommandSummary::Scan(summary) => print_scan(summary, verbose, quiet),
        CommandSummary::Init(summary) => print_init(summary),
    }
}

fn print_scan(summary: &ScanSummary, verbose: bool, quiet: bool) {
    if !quiet {
        print_occurrences(&summary.outcome.occurrences);
    }
    print_summary_to(summary, &mut io::stdout().lock());
    print_warnings_to(&summary.outcome, verbose, &mut io::stderr().lock());
}

fn print_init(summary: &InitSummary) {
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", summary.path.display()).green()
    );
}

/// Collapse a multi-line span into one console line.
fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
