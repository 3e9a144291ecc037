//! Error types for catalog loading and diary entry validation
//!
//! The filter engine itself is total and never produces these.

use std::path::PathBuf;

/// Errors raised by the fallible parts of the core library
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read catalog at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("game {id} is invalid: {reason}")]
    InvalidRecord { id: u32, reason: String },

    #[error("duplicate game id {0} in catalog")]
    DuplicateId(u32),

    #[error("duplicate genre descriptor for '{0}'")]
    DuplicateGenre(String),

    #[error("unknown genre '{0}'")]
    UnknownGenre(String),

    #[error("invalid log entry: {0}")]
    InvalidEntry(String),

    #[error("sign-in identifier must not be empty")]
    EmptyIdentifier,
}

pub type Result<T> = std::result::Result<T, Error>;
