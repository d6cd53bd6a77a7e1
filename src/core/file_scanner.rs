use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use colored::Colorize;
use glob::Pattern;
use walkdir::WalkDir;

use super::occurrence::FileKind;
use crate::config::TEST_FILE_PATTERNS;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of walking the source tree.
pub struct ScanResult {
    /// Candidate files in sorted order.
    pub files: Vec<PathBuf>,
    /// Entries that could not be accessed during the walk.
    pub skipped_count: usize,
}

/// Enumerate the files under `root` that should be scanned.
///
/// A file is kept when its extension is listed in `extensions` and maps to a
/// known [`FileKind`], and neither `ignore_patterns` nor (when enabled) the
/// test file patterns exclude it. Patterns are matched against the path
/// relative to `root`.
///
/// Fails only when `root` itself cannot be read. Unreadable entries below it
/// are counted in [`ScanResult::skipped_count`].
pub fn scan_files(
    root: &Path,
    extensions: &[String],
    ignore_patterns: &[String],
    ignore_test_files: bool,
    verbose: bool,
) -> Result<ScanResult> {
    if !root.is_dir() {
        bail!("Source root is not a directory: {}", root.display());
    }
    fs::read_dir(root)
        .with_context(|| format!("Cannot read source root: {}", root.display()))?;

    let mut files = Vec::new();
    let mut skipped_count = 0;

    // Separate ignore patterns into literal paths and glob patterns
    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in ignore_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => {
                    if verbose {
                        eprintln!(
                            "{} Invalid ignore pattern '{}': {}",
                            "warning:".bold().yellow(),
                            p,
                            e
                        );
                    }
                }
            }
        } else {
            literal_ignore_paths.push(PathBuf::from(p));
        }
    }

    if ignore_test_files {
        for p in TEST_FILE_PATTERNS {
            if let Ok(pattern) = Pattern::new(p) {
                glob_patterns.push(pattern);
            }
        }
    }

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                if verbose {
                    eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                }
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let relative_str = relative.to_string_lossy().replace('\\', "/");

        if literal_ignore_paths
            .iter()
            .any(|ignore_path| relative.starts_with(ignore_path))
        {
            continue;
        }

        if glob_patterns.iter().any(|p| p.matches(&relative_str)) {
            continue;
        }

        if is_scannable_file(path, extensions) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();

    Ok(ScanResult {
        files,
        skipped_count,
    })
}

fn is_scannable_file(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    FileKind::from_extension(ext).is_some()
        && extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext))
}
