//! Error types for timeline extraction and export.

use std::fmt;
use std::path::PathBuf;

/// Failures raised while extracting or exporting a timeline.
#[derive(Debug)]
pub enum TimelineError {
    /// The source file is missing, unreadable, or not a SQLite database.
    DataSource {
        path: PathBuf,
        source: rusqlite::Error,
    },
    /// The source database lacks a required table or column.
    Query { source: rusqlite::Error },
    /// The destination could not be written.
    Io { path: PathBuf, source: csv::Error },
}

impl fmt::Display for TimelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimelineError::DataSource { path, .. } => {
                write!(f, "cannot open database {}", path.display())
            }
            TimelineError::Query { .. } => write!(f, "timeline query failed"),
            TimelineError::Io { path, .. } => write!(f, "cannot write {}", path.display()),
        }
    }
}

impl std::error::Error for TimelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TimelineError::DataSource { source, .. } => Some(source),
            TimelineError::Query { source } => Some(source),
            TimelineError::Io { source, .. } => Some(source),
        }
    }
}

/// Classify a SQLite error raised after the connection was opened.
///
/// SQLite opens files lazily, so a file that is not a database is only
/// detected on the first statement.
pub(crate) fn classify(path: &std::path::Path, err: rusqlite::Error) -> TimelineError {
    match err.sqlite_error_code() {
        Some(rusqlite::ErrorCode::NotADatabase)
        | Some(rusqlite::ErrorCode::CannotOpen)
        | Some(rusqlite::ErrorCode::DatabaseCorrupt) => TimelineError::DataSource {
            path: path.to_path_buf(),
            source: err,
        },
        _ => TimelineError::Query { source: err },
    }
}

pub type Result<T> = std::result::Result<T, TimelineError>;
