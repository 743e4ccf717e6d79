//! Enum extraction from `OpenAPI` operation schemas.
//!
//! Walks the request body (write verbs) or the `200` response (GET) of one
//! operation and flattens every enum-bearing property into a dotted field
//! name → [`EnumInfo`] map:
//!
//! - `$ref` targets contribute exactly as if they were inlined
//! - `allOf` / `oneOf` / `anyOf` members are all visited (union)
//! - a property nested in object or array property `p` is keyed `p.field`
//!   (one level of context, matching the docs' nested-schema headings)
//! - the response envelope prefixes `result.` and `result_info.` are stripped

use std::collections::{BTreeMap, HashSet};

use onlineornot_docs_core::{HttpMethod, MediaType, OpenApiSpec, Schema};
use tracing::warn;

/// Envelope wrappers that never appear in the documented resource shape.
///
/// `result` wraps every API payload, `result_info` carries list pagination.
const ENVELOPE_PREFIXES: &[&str] = &["result.", "result_info."];

/// Allowed values for one (possibly nested) field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumInfo {
    values: Vec<String>,
}

impl EnumInfo {
    /// Wrap the literal values in declaration order.
    #[must_use]
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }

    /// Values in the order the schema declares them.
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

impl<S: Into<String>> FromIterator<S> for EnumInfo {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// Dotted field name (e.g., `assertions.type`) → allowed values.
pub type FieldEnums = BTreeMap<String, EnumInfo>;

/// Extract the enum constraints of `method` on `path`.
///
/// Unknown paths and undeclared verbs yield an empty map. `DELETE` has no
/// schema to inspect and always yields an empty map.
#[must_use]
pub fn extract_enums(spec: &OpenApiSpec, path: &str, method: HttpMethod) -> FieldEnums {
    let Some(op) = spec.operation(path, method) else {
        return FieldEnums::new();
    };

    let media: Vec<&MediaType> = if method.is_write() {
        op.request_body
            .iter()
            .flat_map(|body| body.content.values())
            .collect()
    } else if method == HttpMethod::Get {
        op.response("200")
            .into_iter()
            .flat_map(|resp| resp.content.values())
            .collect()
    } else {
        Vec::new()
    };

    let mut walker = Walker::new(spec);
    for media_type in media {
        walker.walk(&media_type.schema, "");
    }

    strip_envelope_prefixes(walker.found)
}

/// Remove one leading envelope prefix from every key.
///
/// When `result.status` and `status` collide the unwrapped key wins.
fn strip_envelope_prefixes(raw: FieldEnums) -> FieldEnums {
    let mut cleaned = FieldEnums::new();
    let mut wrapped = Vec::new();

    for (key, info) in raw {
        match ENVELOPE_PREFIXES
            .iter()
            .find_map(|prefix| key.strip_prefix(prefix))
        {
            Some(stripped) => wrapped.push((stripped.to_string(), info)),
            None => {
                cleaned.insert(key, info);
            }
        }
    }
    for (key, info) in wrapped {
        cleaned.entry(key).or_insert(info);
    }

    cleaned
}

/// Recursive schema walker.
struct Walker<'a> {
    spec: &'a OpenApiSpec,
    /// Component names on the current descent path (cycle guard).
    active_refs: HashSet<&'a str>,
    found: FieldEnums,
}

impl<'a> Walker<'a> {
    fn new(spec: &'a OpenApiSpec) -> Self {
        Self {
            spec,
            active_refs: HashSet::new(),
            found: FieldEnums::new(),
        }
    }

    fn walk(&mut self, node: &'a Schema, prefix: &str) {
        if let Some(name) = node.ref_name() {
            self.walk_ref(name, prefix);
        }

        for member in node.composition() {
            self.walk(member, prefix);
        }

        for (name, child) in &node.properties {
            let qualified = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}.{name}")
            };

            if !child.enum_values.is_empty() {
                self.found.insert(qualified, EnumInfo::new(child.enum_values.clone()));
            }

            // Children are qualified by this property's bare name, not the
            // full path: docs only track one nested heading at a time.
            if child.is_object_like() {
                self.walk(child, name);
            }
            if let Some(items) = &child.items {
                self.walk(items, name);
            }
        }

        if let Some(items) = &node.items {
            self.walk(items, prefix);
        }
    }

    fn walk_ref(&mut self, name: &'a str, prefix: &str) {
        let Some(target) = self.spec.component(name) else {
            return;
        };
        if !self.active_refs.insert(name) {
            warn!(schema = name, "reference cycle detected; not descending further");
            return;
        }
        self.walk(target, prefix);
        self.active_refs.remove(name);
    }
}
