//! Error types.
//!
//! Library code returns these structured errors; the binary wraps them in
//! `anyhow` at the edge.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::store::Path;

/// A write through a binding could not be applied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// The projection no longer resolves (index past the end, key removed).
    #[error("binding at `{path}` is detached from the record")]
    Detached { path: Path },

    /// The projection is a read-only selector.
    #[error("binding at `{path}` is read-only")]
    ReadOnly { path: Path },
}

/// The seed record could not be loaded.
#[derive(Error, Debug)]
pub enum SeedError {
    #[error("failed to read seed file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("seed {origin} does not match the cat record shape: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A report sink failed to accept a record.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    #[error("failed to serialize record: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
}

/// Logging could not be set up.
#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("failed to open log file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to install tracing subscriber: {0}")]
    Init(String),
}
