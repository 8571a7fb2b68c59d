//! Reading stored records from disk.
//!
//! A missing file means the prerequisite step was never completed and is
//! reported as unavailable data. A file that exists but does not parse is
//! corrupt.

use crate::error::AnalyticsError;
use crate::models::{InterviewRecord, SessionRecord, VerbalAnalytics};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T, AnalyticsError> {
    let content = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => {
            AnalyticsError::DataUnavailable(format!("no {} at {}", what, path.display()))
        }
        _ => AnalyticsError::Unreadable {
            path: path.to_path_buf(),
            source,
        },
    })?;

    debug!("Read {} ({} bytes) from {}", what, content.len(), path.display());

    serde_json::from_str(&content).map_err(|source| AnalyticsError::CorruptData {
        path: path.to_path_buf(),
        source,
    })
}

/// Load one recorded interview session.
pub fn load_session(path: &Path) -> Result<SessionRecord, AnalyticsError> {
    read_json(path, "session record")
}

/// Load the verbal analysis of a session.
pub fn load_verbal(path: &Path) -> Result<VerbalAnalytics, AnalyticsError> {
    read_json(path, "verbal analysis")
}

/// Load a single interview record.
pub fn load_record(path: &Path) -> Result<InterviewRecord, AnalyticsError> {
    read_json(path, "interview record")
}

#[derive(Deserialize)]
#[serde(untagged)]
enum HistoryFile {
    List(Vec<InterviewRecord>),
    Wrapped { interviews: Vec<InterviewRecord> },
}

/// Load a user's interview history.
///
/// Accepts a JSON array of records or an object with an `interviews` array.
pub fn load_history(path: &Path) -> Result<Vec<InterviewRecord>, AnalyticsError> {
    let history: HistoryFile = read_json(path, "interview history")?;
    Ok(match history {
        HistoryFile::List(records) => records,
        HistoryFile::Wrapped { interviews } => interviews,
    })
}
