use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use clap::ValueEnum;
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::MarkupFilter;
use crate::report::ReportFormat;

pub const CONFIG_FILE_NAME: &str = ".rolescanrc.json";

pub const TEST_FILE_PATTERNS: &[&str] = &[
    "**/*.spec.ts",
    "**/*.spec.tsx",
    "**/*.spec.js",
    "**/*.test.ts",
    "**/*.test.tsx",
    "**/*.test.js",
    "**/__tests__/**",
];

/// How the source file of an occurrence is recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PathStyle {
    /// Path as walked from the source root, e.g. `src/app/admin/admin.component.ts`.
    #[default]
    Relative,
    /// Bare file name, e.g. `admin.component.ts`.
    FileName,
}

impl PathStyle {
    pub fn display(self, path: &Path) -> String {
        match self {
            PathStyle::Relative => path.to_string_lossy().replace('\\', "/"),
            PathStyle::FileName => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.to_string_lossy().into_owned()),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_sentinel")]
    pub sentinel: String,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_ignore_test_files")]
    pub ignore_test_files: bool,
    #[serde(default = "default_access_attribute")]
    pub access_attribute: String,
    #[serde(default)]
    pub markup_filter: MarkupFilter,
    #[serde(default = "default_dedupe")]
    pub dedupe: bool,
    #[serde(default)]
    pub path_style: PathStyle,
    /// Report file. Defaults to `target/rbac-report.<format extension>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default)]
    pub format: ReportFormat,
}

fn default_sentinel() -> String {
    "ROLE_MBAA".to_string()
}

fn default_source_root() -> String {
    "src/app".to_string()
}

fn default_extensions() -> Vec<String> {
    ["ts", "html"].map(String::from).to_vec()
}

fn default_ignore_test_files() -> bool {
    true
}

fn default_access_attribute() -> String {
    "access".to_string()
}

fn default_dedupe() -> bool {
    true
}

const DEFAULT_REPORT_STEM: &str = "target/rbac-report";

impl Default for Config {
    fn default() -> Self {
        Self {
            sentinel: default_sentinel(),
            source_root: default_source_root(),
            extensions: default_extensions(),
            ignores: Vec::new(),
            ignore_test_files: default_ignore_test_files(),
            access_attribute: default_access_attribute(),
            markup_filter: MarkupFilter::default(),
            dedupe: default_dedupe(),
            path_style: PathStyle::default(),
            output: None,
            format: ReportFormat::default(),
        }
    }
}

impl Config {
    /// Path of the report file to write.
    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(output) => PathBuf::from(output),
            None => PathBuf::from(format!("{}.{}", DEFAULT_REPORT_STEM, self.format.extension())),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.sentinel.trim().is_empty() {
            bail!("Invalid 'sentinel': must not be empty");
        }

        if self.access_attribute.is_empty()
            || !self
                .access_attribute
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            bail!(
                "Invalid 'accessAttribute': \"{}\" (use letters, digits, '_' or '-')",
                self.access_attribute
            );
        }

        // Patterns without wildcards are literal paths and need no validation.
        for pattern in &self.ignores {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern)
                    .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
            }
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Config file that was loaded, if any.
    pub path: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
