//! Minimal serde model of an `OpenAPI` document.
//!
//! Only the parts needed to walk request and response schemas are modeled.
//! All structs use `#[serde(default)]`, so missing keys become empty values
//! and unknown keys are skipped.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// Prefix of a `$ref` that points into `components.schemas`.
pub const COMPONENT_SCHEMA_PREFIX: &str = "#/components/schemas/";

/// Root of a parsed `OpenAPI` document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OpenApiSpec {
    /// URL path template (e.g., `/v1/checks/{id}`) → path item.
    pub paths: HashMap<String, PathItem>,
    /// Reusable components.
    pub components: Components,
}

impl OpenApiSpec {
    /// Look up a path item by its exact template.
    #[must_use]
    pub fn path(&self, path: &str) -> Option<&PathItem> {
        self.paths.get(path)
    }

    /// Look up the operation for `method` on `path`.
    ///
    /// Returns `None` when the path is unknown or declares no such verb.
    #[must_use]
    pub fn operation(&self, path: &str, method: HttpMethod) -> Option<&Operation> {
        self.path(path)?.operation(method)
    }

    /// Resolve a component schema by name.
    #[must_use]
    pub fn component(&self, name: &str) -> Option<&Schema> {
        self.components.schemas.get(name)
    }
}

/// The `components` section. Only `schemas` is modeled.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Components {
    /// Schema name → reusable schema.
    pub schemas: HashMap<String, Schema>,
}

/// Operations available on one path template.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PathItem {
    /// `GET` operation.
    pub get: Option<Operation>,
    /// `POST` operation.
    pub post: Option<Operation>,
    /// `PUT` operation.
    pub put: Option<Operation>,
    /// `PATCH` operation.
    pub patch: Option<Operation>,
    /// `DELETE` operation.
    pub delete: Option<Operation>,
}

impl PathItem {
    /// Select the operation declared for `method`, if any.
    #[must_use]
    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
        }
    }
}

/// A single API operation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Operation {
    /// Request body, when the operation accepts one.
    #[serde(rename = "requestBody")]
    pub request_body: Option<RequestBody>,
    /// HTTP status code string (e.g., `"200"`) → response.
    pub responses: HashMap<String, Response>,
}

impl Operation {
    /// Response declared for `status` (e.g., `"200"`).
    #[must_use]
    pub fn response(&self, status: &str) -> Option<&Response> {
        self.responses.get(status)
    }
}

/// An operation's request body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RequestBody {
    /// Media type (conventionally `application/json`) → body schema.
    pub content: BTreeMap<String, MediaType>,
}

/// One response entry of an operation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Response {
    /// Media type → response schema.
    pub content: BTreeMap<String, MediaType>,
}

/// Schema wrapper for a single media type.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MediaType {
    /// Body schema.
    pub schema: Schema,
}

/// The `type` keyword: `OpenAPI` 3.0 uses a string, 3.1 allows an array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaType {
    /// `type: object`
    Single(String),
    /// `type: [object, "null"]`
    Multiple(Vec<String>),
}

impl SchemaType {
    /// Whether `name` is one of the declared types.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        match self {
            Self::Single(s) => s == name,
            Self::Multiple(all) => all.iter().any(|s| s == name),
        }
    }
}

/// A recursive JSON Schema node.
///
/// `$ref`, the composition lists, `properties` and `items` are independent:
/// a node may carry any combination of them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Schema {
    /// Declared type(s). Values that are neither a string nor a string array are dropped.
    #[serde(rename = "type", deserialize_with = "deserialize_schema_type")]
    pub schema_type: Option<SchemaType>,
    /// Allowed string literals. Non-string literals (e.g., `null`) are dropped.
    #[serde(rename = "enum", deserialize_with = "deserialize_string_enum")]
    pub enum_values: Vec<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Object properties by name.
    pub properties: BTreeMap<String, Schema>,
    /// Element schema for arrays.
    pub items: Option<Box<Schema>>,
    /// Reference to a reusable schema.
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    /// Every member must validate.
    #[serde(rename = "allOf")]
    pub all_of: Vec<Schema>,
    /// Exactly one member must validate.
    #[serde(rename = "oneOf")]
    pub one_of: Vec<Schema>,
    /// At least one member must validate.
    #[serde(rename = "anyOf")]
    pub any_of: Vec<Schema>,
}

impl Schema {
    /// Whether this node describes an object.
    ///
    /// Type tags in real documents are inconsistent, so a non-empty
    /// `properties` map counts as much as an explicit `type: object`.
    #[must_use]
    pub fn is_object_like(&self) -> bool {
        self.schema_type
            .as_ref()
            .is_some_and(|t| t.contains("object"))
            || !self.properties.is_empty()
    }

    /// Component name targeted by `$ref`, when it points into `components.schemas`.
    #[must_use]
    pub fn ref_name(&self) -> Option<&str> {
        self.reference
            .as_deref()
            .and_then(|r| r.strip_prefix(COMPONENT_SCHEMA_PREFIX))
    }

    /// Composition members in `allOf`, `oneOf`, `anyOf` order.
    pub fn composition(&self) -> impl Iterator<Item = &Schema> {
        self.all_of
            .iter()
            .chain(self.one_of.iter())
            .chain(self.any_of.iter())
    }
}

/// HTTP verbs modeled on [`PathItem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl HttpMethod {
    /// Upper-case verb name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Whether the verb sends a request body describing the resource.
    #[must_use]
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accept `type` as a string or a string array; anything else becomes `None`.
fn deserialize_schema_type<'de, D>(deserializer: D) -> Result<Option<SchemaType>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawType {
        Single(String),
        Multiple(Vec<String>),
        Other(IgnoredAny),
    }

    Ok(match RawType::deserialize(deserializer)? {
        RawType::Single(s) => Some(SchemaType::Single(s)),
        RawType::Multiple(all) => Some(SchemaType::Multiple(all)),
        RawType::Other(_) => None,
    })
}

/// Keep only the string literals of an `enum` array.
fn deserialize_string_enum<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Literal {
        Str(String),
        Other(IgnoredAny),
    }

    let literals = Option::<Vec<Literal>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(literals
        .into_iter()
        .filter_map(|l| match l {
            Literal::Str(s) => Some(s),
            Literal::Other(_) => None,
        })
        .collect())
}
