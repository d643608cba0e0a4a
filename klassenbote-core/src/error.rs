//! Error types for the klassenbote ecosystem.
//!
//! Two layers, kept deliberately separate: `DropReason` for per-row
//! normalization failures (the row is skipped, the run continues) and
//! `BoteError` for run-level failures that terminate the run.

use std::fmt;

use thiserror::Error;

/// Errors that abort the current run.
#[derive(Error, Debug)]
pub enum BoteError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("No schedule snapshot at {0} (run `klassenbote update` first)")]
    NoSnapshot(String),

    #[error("Messenger '{0}' not found in PATH")]
    MessengerNotInstalled(String),

    #[error("Messenger request timed out after {0}s")]
    MessengerTimeout(u64),

    #[error("Messenger error: {0}")]
    Messenger(String),

    #[error("Send failed: {0}")]
    Send(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for klassenbote operations.
pub type BoteResult<T> = Result<T, BoteError>;

/// Why a single raw row was excluded from the schedule.
///
/// Never fatal: the normalizer reports the reason, the caller logs it and
/// moves on to the next row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    /// The row's date field is not a parseable `DD.MM.YYYY` value.
    MalformedDate { raw: String },
    /// The row has no title to display.
    MissingTitle,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::MalformedDate { raw } => {
                write!(f, "date '{raw}' is not a valid DD.MM.YYYY date")
            }
            DropReason::MissingTitle => write!(f, "row has no title"),
        }
    }
}
