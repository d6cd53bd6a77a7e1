//! Report rendering.
//!
//! Turns the aggregated occurrences into a report artifact. Every format
//! escapes the characters that are structural in that format, so role lists
//! and inner text cannot break the report layout.

mod html;
mod json;
mod tsv;

use std::{
    fs,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::Occurrence;

pub use html::{escape_html, render_html};
pub use json::render_json;
pub use tsv::{escape_tsv, render_tsv};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReportFormat {
    /// Styled HTML table.
    #[default]
    Html,
    /// Tab-separated rows with a header line.
    Tsv,
    /// JSON array of occurrences.
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

impl ReportFormat {
    /// File extension of reports in this format.
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Html => "html",
            ReportFormat::Tsv => "tsv",
            ReportFormat::Json => "json",
        }
    }

    /// Format implied by a report file extension, if it names one.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "html" | "htm" => Some(ReportFormat::Html),
            "tsv" | "txt" => Some(ReportFormat::Tsv),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

/// Render occurrences in `format`.
pub fn render(occurrences: &[Occurrence], format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Html => Ok(render_html(occurrences)),
        ReportFormat::Tsv => Ok(render_tsv(occurrences)),
        ReportFormat::Json => render_json(occurrences),
    }
}

/// Render occurrences to a custom writer.
pub fn render_to<W: Write>(
    occurrences: &[Occurrence],
    format: ReportFormat,
    writer: &mut W,
) -> Result<()> {
    let rendered = render(occurrences, format)?;
    writer
        .write_all(rendered.as_bytes())
        .context("Failed to write report")
}

/// Render occurrences and write them to `path`, creating parent directories.
pub fn write_report(occurrences: &[Occurrence], format: ReportFormat, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let file = fs::File::create(path)
        .with_context(|| format!("Failed to create report: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    render_to(occurrences, format, &mut writer)?;
    writer
        .flush()
        .with_context(|| format!("Failed to write report: {}", path.display()))
}
