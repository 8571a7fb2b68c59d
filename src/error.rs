//! Error types for the analytics core.
//!
//! Arithmetic edge cases never produce an error; only missing or
//! unreadable inputs do.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// A prerequisite input does not exist yet (no answers, no interviews).
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    /// A stored record exists but cannot be parsed.
    #[error("Corrupt record at {path}: {source}")]
    CorruptData {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A file exists but could not be read.
    #[error("Cannot read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid filler term '{term}': {source}")]
    InvalidFillerTerm {
        term: String,
        #[source]
        source: regex::Error,
    },
}

impl AnalyticsError {
    /// Message shown to the user when analytics cannot be rendered.
    pub fn user_prompt(&self) -> &'static str {
        match self {
            AnalyticsError::DataUnavailable(_) => {
                "Complete an interview first, then run the analysis again."
            }
            AnalyticsError::CorruptData { .. } => {
                "A stored record could not be read. Re-export it and retry."
            }
            AnalyticsError::Unreadable { .. } => "Check the file permissions and retry.",
            AnalyticsError::InvalidFillerTerm { .. } => {
                "Check the extra_filler_words entries in your configuration."
            }
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            AnalyticsError::DataUnavailable(_) => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let missing = AnalyticsError::DataUnavailable("no answers".to_string());
        assert_eq!(missing.exit_code(), 2);

        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let corrupt = AnalyticsError::CorruptData {
            path: PathBuf::from("session.json"),
            source,
        };
        assert_eq!(corrupt.exit_code(), 1);
        assert!(corrupt.to_string().contains("session.json"));
    }

    #[test]
    fn test_user_prompt_differs_by_kind() {
        let missing = AnalyticsError::DataUnavailable("x".to_string());
        assert!(missing.user_prompt().contains("Complete an interview"));
    }
}
