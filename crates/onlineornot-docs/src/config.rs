//! Project-level configuration loaded from YAML.
//!
//! Lets a provider checkout point the tool at a different schema URL or docs
//! root, and map extra resources to API paths, without touching Rust source.
//!
//! # File format
//!
//! ```yaml
//! # enrich-docs.yaml
//! openapi_url: https://raw.githubusercontent.com/OnlineOrNot/api-schemas/main/openapi.json
//! docs_dir: docs
//!
//! # Resource name → create path (POST request body). Merged over the built-ins.
//! resources:
//!   check: /v1/checks
//!
//! # Data source name → read path (GET 200 response). Merged over the built-ins.
//! data_sources:
//!   user: /v1/users/{user_id}
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::enrich::{EnrichOptions, DEFAULT_DOCS_DIR};
use crate::error::{Error, Result};
use crate::fetch::{SpecSource, DEFAULT_OPENAPI_URL};
use crate::resources::{ResourceKind, ResourcePaths};

/// Project configuration for an enrichment run.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Where to download the `OpenAPI` schema from.
    pub openapi_url: String,

    /// Docs root containing `resources/` and `data-sources/`.
    pub docs_dir: PathBuf,

    /// Extra or overriding resource name → create path entries.
    pub resources: BTreeMap<String, String>,

    /// Extra or overriding data source name → read path entries.
    pub data_sources: BTreeMap<String, String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            openapi_url: DEFAULT_OPENAPI_URL.to_string(),
            docs_dir: PathBuf::from(DEFAULT_DOCS_DIR),
            resources: BTreeMap::new(),
            data_sources: BTreeMap::new(),
        }
    }
}

impl ProjectConfig {
    /// Load config from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, or [`Error::Config`]
    /// if it is not valid YAML for this schema.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        serde_yaml_ng::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Built-in resolver table with this config's entries merged in.
    #[must_use]
    pub fn resource_paths(&self) -> ResourcePaths {
        ResourcePaths::builtin()
            .with_overrides(ResourceKind::Resource, &self.resources)
            .with_overrides(ResourceKind::DataSource, &self.data_sources)
    }

    /// Schema source described by this config.
    #[must_use]
    pub fn spec_source(&self) -> SpecSource {
        SpecSource::Url(self.openapi_url.clone())
    }

    /// Enrichment options described by this config (writes enabled).
    #[must_use]
    pub fn enrich_options(&self) -> EnrichOptions {
        EnrichOptions {
            docs_dir: self.docs_dir.clone(),
            check: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserialize_defaults() {
        let config: ProjectConfig = serde_yaml_ng::from_str("{}").unwrap();
        assert_eq!(config.openapi_url, DEFAULT_OPENAPI_URL);
        assert_eq!(config.docs_dir, PathBuf::from("docs"));
        assert!(config.resources.is_empty());
        assert_eq!(config.resource_paths(), ResourcePaths::builtin());
    }

    #[test]
    fn deserialize_full() {
        let yaml = r"
openapi_url: http://localhost:8080/openapi.json
docs_dir: website/docs
resources:
  check: /v2/checks
  alert_rule: /v1/alert-rules
data_sources:
  alert_rules: /v1/alert-rules
";
        let config: ProjectConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(
            config.spec_source(),
            SpecSource::Url("http://localhost:8080/openapi.json".to_string())
        );
        assert_eq!(config.enrich_options().docs_dir, PathBuf::from("website/docs"));

        let paths = config.resource_paths();
        let resources: BTreeMap<&str, &str> = paths.entries(ResourceKind::Resource).collect();
        let data_sources: BTreeMap<&str, &str> = paths.entries(ResourceKind::DataSource).collect();
        assert_eq!(resources["check"], "/v2/checks");
        assert_eq!(resources["alert_rule"], "/v1/alert-rules");
        assert_eq!(data_sources["alert_rules"], "/v1/alert-rules");
        // Built-ins not mentioned keep their defaults
        assert_eq!(resources["webhook"], "/v1/webhooks");
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("enrich-docs.yaml");
        std::fs::write(&path, "docs_dir: site/docs\n").unwrap();

        let config = ProjectConfig::load(&path).unwrap();
        assert_eq!(config.docs_dir, PathBuf::from("site/docs"));
        assert_eq!(config.openapi_url, DEFAULT_OPENAPI_URL);
    }

    #[test]
    fn load_nonexistent_file_returns_io_error() {
        let result = ProjectConfig::load(Path::new("/nonexistent/enrich-docs.yaml"));
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn load_invalid_yaml_returns_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "resources: [[[invalid").unwrap();

        let result = ProjectConfig::load(&path);
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
