//! Typed error enum for the `onlineornot-docs` library API.
//!
//! Library consumers can match on specific variants. The CLI (`main.rs`)
//! converts these to `anyhow::Error` at the binary boundary for richer
//! context messages.
//!
//! Lookup misses (unknown path, missing verb, dangling `$ref`, a doc file
//! with no known resource name) are never errors; they produce empty enum
//! maps instead.

use std::path::PathBuf;

/// Errors produced by `onlineornot-docs` library operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The schema download failed at the transport level.
    #[error("failed to fetch OpenAPI schema from {url}")]
    Fetch {
        /// Requested URL.
        url: String,
        /// Underlying HTTP client error.
        #[source]
        source: reqwest::Error,
    },

    /// The schema server answered with a non-success status.
    #[error("unexpected status {status} fetching OpenAPI schema from {url}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code returned by the server.
        status: u16,
    },

    /// The schema document is not valid JSON (or not shaped like `OpenAPI`).
    #[error("failed to parse OpenAPI schema: {0}")]
    Parse(#[from] serde_json::Error),

    /// Reading or writing a file or directory failed.
    ///
    /// A missing documentation directory is not reported through this variant.
    #[error("I/O error on {}", path.display())]
    Io {
        /// File or directory being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The project config file is not valid YAML.
    #[error("invalid config file {}", path.display())]
    Config {
        /// Config file path.
        path: PathBuf,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml_ng::Error,
    },
}

impl Error {
    /// Attach a path to an I/O error.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias used throughout the library's public API.
pub type Result<T> = std::result::Result<T, Error>;
