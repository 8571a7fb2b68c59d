//! Record scanner for discovering stored interview records.
//!
//! This module walks a directory of per-interview JSON files, respecting
//! configuration for extensions, excludes and file count limits.

use crate::error::AnalyticsError;
use crate::loader::load_record;
use crate::models::InterviewRecord;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Configuration for record scanning.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// File extensions to include (e.g., ["json"])
    pub extensions: Vec<String>,
    /// Names to exclude (e.g., ["archive"])
    pub excludes: Vec<String>,
    /// Maximum number of files to load
    pub max_files: Option<usize>,
}

impl From<&crate::config::ScannerConfig> for ScanConfig {
    fn from(config: &crate::config::ScannerConfig) -> Self {
        Self {
            extensions: config.extensions.clone(),
            excludes: config.excludes.clone(),
            max_files: Some(config.max_files),
        }
    }
}

/// Outcome of loading a record directory.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub records: Vec<InterviewRecord>,
    /// Files that could not be loaded, with the reason.
    pub skipped: Vec<(PathBuf, AnalyticsError)>,
}

impl ScanOutcome {
    /// The loaded records.
    ///
    /// When files matched but none loaded, the first failure is returned
    /// instead, so a directory of corrupt records is not mistaken for an
    /// empty history.
    pub fn into_records(self) -> Result<Vec<InterviewRecord>, AnalyticsError> {
        if self.records.is_empty() {
            if let Some((_, error)) = self.skipped.into_iter().next() {
                return Err(error);
            }
        }
        Ok(self.records)
    }
}

/// Scanner for a directory of interview records.
pub struct RecordScanner {
    config: ScanConfig,
    root: PathBuf,
}

impl RecordScanner {
    /// Create a new record scanner.
    pub fn new(root: PathBuf, config: ScanConfig) -> Self {
        Self { config, root }
    }

    /// Matching record files, sorted by path and capped at `max_files`.
    pub fn scan(&self) -> Vec<PathBuf> {
        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !self.is_excluded(entry));

        let mut files: Vec<PathBuf> = walker
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    debug!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && self.matches(entry.path()))
            .map(DirEntry::into_path)
            .collect();

        files.sort();
        if let Some(max) = self.config.max_files {
            files.truncate(max);
        }
        files
    }

    /// Load every matching record.
    ///
    /// Corrupt files are skipped with a warning so one bad record does not
    /// hide the rest of the history. A file that vanished or cannot be read
    /// is skipped the same way.
    pub fn load_records(&self, show_progress: bool) -> ScanOutcome {
        let files = self.scan();
        debug!("Found {} record files under {}", files.len(), self.root.display());

        let progress_bar = if show_progress && !files.is_empty() {
            let pb = ProgressBar::new(files.len() as u64);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} records")
            {
                pb.set_style(style.progress_chars("#>-"));
            }
            Some(pb)
        } else {
            None
        };

        let mut outcome = ScanOutcome::default();
        for path in files {
            match load_record(&path) {
                Ok(record) => outcome.records.push(record),
                Err(e) => {
                    warn!("Skipping record {}: {}", path.display(), e);
                    outcome.skipped.push((path, e));
                }
            }
            if let Some(ref pb) = progress_bar {
                pb.inc(1);
            }
        }

        if let Some(pb) = progress_bar {
            pb.finish_and_clear();
        }
        outcome
    }

    /// Check if a file has a record extension.
    pub fn matches(&self, path: &Path) -> bool {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        self.config
            .extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ext))
    }

    /// Check if an entry is hidden or explicitly excluded.
    fn is_excluded(&self, entry: &DirEntry) -> bool {
        let name = entry.file_name().to_string_lossy();

        // Hidden files
        if name.starts_with('.') {
            return true;
        }

        // Explicit excludes
        self.config.excludes.iter().any(|pattern| name == pattern.as_str())
    }
}
