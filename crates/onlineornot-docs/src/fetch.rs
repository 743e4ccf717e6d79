//! Retrieval of the `OpenAPI` document.
//!
//! One blocking GET, no retries: the tool is a one-shot docs build step and
//! the caller aborts the whole run on failure.

use std::path::{Path, PathBuf};
use std::time::Duration;

use onlineornot_docs_core::OpenApiSpec;
use reqwest::blocking::Client;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Published location of the OnlineOrNot `OpenAPI` schema.
pub const DEFAULT_OPENAPI_URL: &str =
    "https://raw.githubusercontent.com/OnlineOrNot/api-schemas/main/openapi.json";

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("onlineornot-enrich-docs/", env!("CARGO_PKG_VERSION"));

/// Where to read the `OpenAPI` document from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecSource {
    /// Download over HTTP(S).
    Url(String),
    /// Read a local copy.
    File(PathBuf),
}

impl Default for SpecSource {
    fn default() -> Self {
        Self::Url(DEFAULT_OPENAPI_URL.to_string())
    }
}

impl SpecSource {
    /// Load and parse the document.
    ///
    /// # Errors
    ///
    /// See [`fetch_spec`] and [`load_spec`].
    pub fn load(&self) -> Result<OpenApiSpec> {
        match self {
            Self::Url(url) => fetch_spec(url),
            Self::File(path) => load_spec(path),
        }
    }
}

/// Download and parse the document at `url`.
///
/// # Errors
///
/// Returns [`Error::Fetch`] on transport failure, [`Error::Status`] on a
/// non-success status code, or [`Error::Parse`] if the body is not a valid
/// document.
pub fn fetch_spec(url: &str) -> Result<OpenApiSpec> {
    info!(%url, "fetching OpenAPI schema");

    let fetch_err = |source| Error::Fetch {
        url: url.to_string(),
        source,
    };

    let client = Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .map_err(fetch_err)?;

    let response = client.get(url).send().map_err(fetch_err)?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().map_err(fetch_err)?;
    debug!(bytes = body.len(), "downloaded OpenAPI schema");
    parse_spec(&body)
}

/// Read and parse a local copy of the document.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, or [`Error::Parse`] if
/// it is not a valid document.
pub fn load_spec(path: &Path) -> Result<OpenApiSpec> {
    info!(path = %path.display(), "loading OpenAPI schema");
    let body = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_spec(&body)
}

/// Parse an `OpenAPI` JSON document.
///
/// # Errors
///
/// Returns [`Error::Parse`] on malformed JSON.
pub fn parse_spec(json: &str) -> Result<OpenApiSpec> {
    let spec: OpenApiSpec = serde_json::from_str(json)?;
    debug!(
        paths = spec.paths.len(),
        schemas = spec.components.schemas.len(),
        "parsed OpenAPI schema"
    );
    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_source_is_published_schema() {
        assert_eq!(
            SpecSource::default(),
            SpecSource::Url(DEFAULT_OPENAPI_URL.to_string())
        );
    }

    #[test]
    fn parse_rejects_malformed_json() {
        let err = parse_spec("{\"paths\": ").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn parse_accepts_empty_document() {
        let spec = parse_spec("{}").unwrap();
        assert!(spec.paths.is_empty());
        assert!(spec.components.schemas.is_empty());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = load_spec(Path::new("/nonexistent/openapi.json")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
