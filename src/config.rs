//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.skilledge.toml` files.

use crate::cli::{Args, Command, OutputFormat};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = ".skilledge.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Analytics settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,

    /// Record scanner settings.
    #[serde(default)]
    pub scanner: ScannerConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,

    /// Default report format.
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            verbose: false,
            format: OutputFormat::Markdown,
        }
    }
}

fn default_output() -> String {
    "skilledge_report.md".to_string()
}

/// Analytics settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Filler words detected in addition to the standard list.
    #[serde(default)]
    pub extra_filler_words: Vec<String>,

    /// Latest interviews averaged for recent performance.
    #[serde(default = "default_recent_window")]
    pub recent_window: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            extra_filler_words: Vec::new(),
            recent_window: default_recent_window(),
        }
    }
}

fn default_recent_window() -> usize {
    5
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Include the aggregated audio section in session reports.
    #[serde(default = "default_true")]
    pub include_audio: bool,

    /// Include the correlation chart series.
    #[serde(default = "default_true")]
    pub include_chart_data: bool,

    /// Maximum filler terms listed.
    #[serde(default = "default_max_filler_terms")]
    pub max_filler_terms: usize,

    /// Include next steps in progress reports.
    #[serde(default = "default_true")]
    pub include_next_steps: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            include_audio: true,
            include_chart_data: true,
            max_filler_terms: default_max_filler_terms(),
            include_next_steps: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_filler_terms() -> usize {
    10
}

/// Record scanner settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// File extensions treated as interview records.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// File or directory names to skip.
    #[serde(default = "default_excludes")]
    pub excludes: Vec<String>,

    /// Maximum record files to load.
    #[serde(default = "default_max_files")]
    pub max_files: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            excludes: default_excludes(),
            max_files: default_max_files(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["json".to_string()]
}

fn default_excludes() -> Vec<String> {
    vec!["node_modules", "target", "archive"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_max_files() -> usize {
    500
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.skilledge.toml` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &Args) {
        if let Some(ref output) = args.output {
            self.general.output = output.display().to_string();
        }
        if let Some(format) = args.format {
            self.general.format = format;
        }
        if let Some(ref extra) = args.extra_fillers {
            self.analysis.extra_filler_words = extra.clone();
        }

        if let Some(Command::Progress(ref progress)) = args.command {
            if let Some(recent) = progress.recent {
                self.analysis.recent_window = recent;
            }
            if let Some(max_files) = progress.max_files {
                self.scanner.max_files = max_files;
            }
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
