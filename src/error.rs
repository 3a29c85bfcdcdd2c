//! Error taxonomy: per-attribute extraction failures (recovered) and run-fatal errors.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TetlError>;

/// Run-fatal errors. Anything of this type aborts the run.
#[derive(Error, Debug)]
pub enum TetlError {
    /// Credential file or run options are unusable.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Fetching from the post source failed (transport, HTTP status, body decode).
    #[error("source error: {0}")]
    Source(String),

    /// A tabular timestamp could not be re-parsed.
    #[error("format error in row {row}: timestamp {value:?} is not ISO-8601 ({reason})")]
    Format {
        row: usize,
        value: String,
        reason: String,
    },

    /// Pushing a local file to the object store failed.
    #[error("upload of {local} to s3://{bucket}/{key} failed: {reason}")]
    Upload {
        local: PathBuf,
        bucket: String,
        key: String,
        reason: String,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl TetlError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

/// Startup configuration problems. Never retried.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Invalid(String),
}

/// Why a single attribute could not be read off a raw post.
/// Callers substitute the field default; this never aborts a run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("attribute {0} is absent")]
    Missing(String),

    #[error("attribute {0} is null")]
    Null(String),

    #[error("cannot descend into {0}: not an object")]
    NotAnObject(String),

    #[error("attribute {path} holds unparseable datetime {raw:?}")]
    BadDatetime { path: String, raw: String },
}
