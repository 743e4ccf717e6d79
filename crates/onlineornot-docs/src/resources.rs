//! Terraform resource / data source → `OpenAPI` path table.
//!
//! Resources take their enums from the create call (`POST` request body),
//! data sources from the read call (`GET` `200` response).

use std::collections::BTreeMap;

use onlineornot_docs_core::{HttpMethod, OpenApiSpec};
use tracing::{debug, info};

use crate::extract::{extract_enums, FieldEnums};

/// Built-in resource name → create path.
const RESOURCE_PATHS: &[(&str, &str)] = &[
    ("check", "/v1/checks"),
    ("heartbeat", "/v1/heartbeats"),
    ("maintenance_window", "/v1/maintenance-windows"),
    ("webhook", "/v1/webhooks"),
    ("status_page", "/v1/status_pages"),
    (
        "status_page_component",
        "/v1/status_pages/{status_page_id}/components",
    ),
    (
        "status_page_component_group",
        "/v1/status_pages/{status_page_id}/groups",
    ),
    (
        "status_page_incident",
        "/v1/status_pages/{status_page_id}/incidents",
    ),
    (
        "status_page_scheduled_maintenance",
        "/v1/status_pages/{status_page_id}/scheduled_maintenance",
    ),
];

/// Built-in data source name → read path.
const DATA_SOURCE_PATHS: &[(&str, &str)] = &[
    ("checks", "/v1/checks"),
    ("heartbeats", "/v1/heartbeats"),
    ("maintenance_windows", "/v1/maintenance-windows"),
    ("webhooks", "/v1/webhooks"),
    ("status_pages", "/v1/status_pages"),
    ("user", "/v1/users/{user_id}"),
    ("users", "/v1/users"),
];

/// Which half of the provider a doc page belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Managed resource (`docs/resources/*.md`).
    Resource,
    /// Read-only data source (`docs/data-sources/*.md`).
    DataSource,
}

impl ResourceKind {
    /// Both kinds, in processing order.
    pub const ALL: [Self; 2] = [Self::Resource, Self::DataSource];

    /// Operation whose schema carries the enums for this kind.
    #[must_use]
    pub const fn method(self) -> HttpMethod {
        match self {
            Self::Resource => HttpMethod::Post,
            Self::DataSource => HttpMethod::Get,
        }
    }

    /// Subdirectory of the docs root holding this kind's pages.
    #[must_use]
    pub const fn docs_subdir(self) -> &'static str {
        match self {
            Self::Resource => "resources",
            Self::DataSource => "data-sources",
        }
    }
}

/// Name → `OpenAPI` path lookups for both kinds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourcePaths {
    resources: BTreeMap<String, String>,
    data_sources: BTreeMap<String, String>,
}

impl ResourcePaths {
    /// The provider's built-in table.
    #[must_use]
    pub fn builtin() -> Self {
        let collect = |table: &[(&str, &str)]| -> BTreeMap<String, String> {
            table
                .iter()
                .map(|(name, path)| ((*name).to_string(), (*path).to_string()))
                .collect()
        };
        Self {
            resources: collect(RESOURCE_PATHS),
            data_sources: collect(DATA_SOURCE_PATHS),
        }
    }

    /// Add or replace one entry.
    #[must_use]
    pub fn with_entry(mut self, kind: ResourceKind, name: &str, path: &str) -> Self {
        self.table_mut(kind).insert(name.to_string(), path.to_string());
        self
    }

    /// Add or replace every entry of `overrides`.
    #[must_use]
    pub fn with_overrides(
        mut self,
        kind: ResourceKind,
        overrides: &BTreeMap<String, String>,
    ) -> Self {
        self.table_mut(kind)
            .extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    /// All `(name, path)` entries of one kind, sorted by name.
    pub fn entries(&self, kind: ResourceKind) -> impl Iterator<Item = (&str, &str)> {
        self.table(kind)
            .iter()
            .map(|(name, path)| (name.as_str(), path.as_str()))
    }

    fn table(&self, kind: ResourceKind) -> &BTreeMap<String, String> {
        match kind {
            ResourceKind::Resource => &self.resources,
            ResourceKind::DataSource => &self.data_sources,
        }
    }

    fn table_mut(&mut self, kind: ResourceKind) -> &mut BTreeMap<String, String> {
        match kind {
            ResourceKind::Resource => &mut self.resources,
            ResourceKind::DataSource => &mut self.data_sources,
        }
    }
}

/// Resource / data source name → its field enums.
///
/// Built once per run from one schema document; read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceEnumTable {
    by_name: BTreeMap<String, FieldEnums>,
}

impl ResourceEnumTable {
    /// Enums for a doc page named `name`, if any were found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldEnums> {
        self.by_name.get(name)
    }

    /// Record (or replace) the enums for `name`.
    pub fn insert(&mut self, name: impl Into<String>, enums: FieldEnums) {
        self.by_name.insert(name.into(), enums);
    }

    /// Names with at least one enum field, sorted.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldEnums)> {
        self.by_name.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of names with enum data.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Whether no name yielded enum data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Extract enums for every entry of `paths`.
///
/// Resources are processed before data sources; a data source sharing a
/// resource's name replaces it. Names whose operation yields no enums are
/// left out of the table.
#[must_use]
pub fn build_enum_table(spec: &OpenApiSpec, paths: &ResourcePaths) -> ResourceEnumTable {
    let mut table = ResourceEnumTable::default();

    for kind in ResourceKind::ALL {
        let method = kind.method();
        for (name, path) in paths.entries(kind) {
            let enums = extract_enums(spec, path, method);
            if enums.is_empty() {
                debug!(name, path, %method, "no enum fields");
                continue;
            }
            info!(name, fields = enums.len(), "extracted enum fields");
            for (field, info) in &enums {
                debug!(name, field, values = ?info.values(), "enum field");
            }
            table.insert(name, enums);
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_table_covers_provider() {
        let paths = ResourcePaths::builtin();
        let resources: BTreeMap<&str, &str> = paths.entries(ResourceKind::Resource).collect();
        let data_sources: BTreeMap<&str, &str> = paths.entries(ResourceKind::DataSource).collect();

        assert_eq!(resources.len(), 9);
        assert_eq!(data_sources.len(), 7);
        assert_eq!(
            resources["status_page_incident"],
            "/v1/status_pages/{status_page_id}/incidents"
        );
        assert_eq!(data_sources["user"], "/v1/users/{user_id}");
        assert!(!resources.contains_key("users"));
    }

    #[test]
    fn overrides_replace_and_extend() {
        let mut extra = BTreeMap::new();
        extra.insert("check".to_string(), "/v2/checks".to_string());
        extra.insert("alert".to_string(), "/v1/alerts".to_string());

        let paths = ResourcePaths::builtin().with_overrides(ResourceKind::Resource, &extra);
        let resources: BTreeMap<&str, &str> = paths.entries(ResourceKind::Resource).collect();
        let data_sources: BTreeMap<&str, &str> = paths.entries(ResourceKind::DataSource).collect();

        assert_eq!(resources["check"], "/v2/checks");
        assert_eq!(resources["alert"], "/v1/alerts");
        assert_eq!(data_sources["checks"], "/v1/checks");
    }

    #[test]
    fn kinds_map_to_methods_and_dirs() {
        assert_eq!(ResourceKind::Resource.method(), HttpMethod::Post);
        assert_eq!(ResourceKind::DataSource.method(), HttpMethod::Get);
        assert_eq!(ResourceKind::DataSource.docs_subdir(), "data-sources");
    }

    #[test]
    fn build_table_skips_names_without_enums() {
        let spec: OpenApiSpec = serde_json::from_str(
            r#"{"paths": {
                "/v1/checks": {
                    "post": {"requestBody": {"content": {"application/json": {"schema": {
                        "properties": {"status": {"enum": ["ACTIVE", "PAUSED"]}}
                    }}}}},
                    "get": {"responses": {"200": {"content": {"application/json": {"schema": {
                        "properties": {"name": {"type": "string"}}
                    }}}}}}
                }
            }}"#,
        )
        .unwrap();

        let table = build_enum_table(&spec, &ResourcePaths::builtin());
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("check").unwrap()["status"].values(), ["ACTIVE", "PAUSED"]);
        assert!(table.get("checks").is_none());
        assert!(table.get("heartbeat").is_none());
    }

    #[test]
    fn custom_entry_is_extracted() {
        let spec: OpenApiSpec = serde_json::from_str(
            r#"{"paths": {"/v1/alerts": {"get": {"responses": {"200": {"content": {"application/json": {"schema": {
                "properties": {"result": {"type": "object", "properties": {"level": {"enum": ["WARN"]}}}}
            }}}}}}}}}"#,
        )
        .unwrap();

        let paths =
            ResourcePaths::default().with_entry(ResourceKind::DataSource, "alerts", "/v1/alerts");
        let table = build_enum_table(&spec, &paths);
        let names: Vec<&str> = table.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["alerts"]);
        assert!(table.get("alerts").unwrap().contains_key("level"));
    }
}
