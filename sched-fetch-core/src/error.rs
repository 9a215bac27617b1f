//! Error types for sched-fetch.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while archiving schedule events.
///
/// Every variant is fatal to a run.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to derive absolute path for {path}")]
    ResolveDestination {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open {path} for reading")]
    OpenCalendar {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {reason}")]
    ParseCalendar { path: PathBuf, reason: String },

    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error("Failed to retrieve {url}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("No element matching {selector} in {url}")]
    FragmentNotFound { url: String, selector: String },

    #[error("Invalid fragment selector {selector}: {reason}")]
    Selector { selector: String, reason: String },

    #[error("Failed to open {path} for writing")]
    OpenOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write event data for {path}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to close {path} after writing")]
    FlushOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to retrieve event for {id} ({url})")]
    Event {
        id: String,
        url: String,
        #[source]
        source: Box<FetchError>,
    },
}

/// Result type alias for sched-fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;
