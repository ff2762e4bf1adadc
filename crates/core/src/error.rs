//! Errors for the fallible edges of the crate: loading records and config
//! files, and parsing criteria given as text.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{path} must contain a JSON array of records")]
    NotAnArray { path: PathBuf },
    #[error("invalid config {path}: {message}")]
    Config { path: PathBuf, message: String },
    #[error("invalid criterion '{0}': expected PATH=VALUE")]
    InvalidCriterion(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
