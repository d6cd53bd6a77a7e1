use anyhow::{Context, Result};

use crate::core::Occurrence;

/// Render occurrences as a pretty-printed JSON array.
pub fn render_json(occurrences: &[Occurrence]) -> Result<String> {
    let mut json =
        serde_json::to_string_pretty(occurrences).context("Failed to serialize occurrences")?;
    json.push('\n');
    Ok(json)
}
