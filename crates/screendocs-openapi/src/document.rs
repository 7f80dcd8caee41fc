//! Parsed OpenAPI document tree.
//!
//! Only the parts needed for documentation are modelled; everything else in
//! the document is ignored. Every field is optional and a field of the wrong
//! shape reads as absent, so loosely written specs still load. Only YAML
//! syntax errors fail a document.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

use crate::lenient::{flag, lenient, lenient_list, lenient_map, string_list, text, text_or_empty};

/// Maximum number of `$ref` hops followed before giving up.
const MAX_REF_DEPTH: usize = 8;

/// Top-level OpenAPI document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OpenApiDocument {
    /// Path items keyed by path template.
    #[serde(deserialize_with = "lenient_map")]
    pub paths: IndexMap<String, PathItem>,
    /// Reusable components.
    #[serde(deserialize_with = "lenient")]
    pub components: Components,
}

impl OpenApiDocument {
    /// Parse a YAML (or JSON) document. Empty input yields an empty document.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid YAML. A document that is
    /// not a mapping reads as empty.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let value: Value = serde_yaml::from_str(content)?;
        Ok(Self::deserialize(value).unwrap_or_default())
    }

    /// Look up an operation by path and case-insensitive method.
    pub fn operation(&self, path: &str, method: &str) -> Option<&Operation> {
        self.paths.get(path)?.operation(method)
    }
}

/// Reusable components referenced with `$ref`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Components {
    #[serde(deserialize_with = "lenient_map")]
    pub parameters: IndexMap<String, Parameter>,
    #[serde(rename = "requestBodies", deserialize_with = "lenient_map")]
    pub request_bodies: IndexMap<String, RequestBody>,
    #[serde(deserialize_with = "lenient_map")]
    pub responses: IndexMap<String, Response>,
    #[serde(deserialize_with = "lenient_map")]
    pub schemas: IndexMap<String, Schema>,
}

impl Components {
    /// Follow a parameter reference chain.
    pub fn parameter<'a>(&'a self, item: &'a Parameter) -> Option<&'a Parameter> {
        follow(item, &self.parameters, "parameters")
    }

    /// Follow a request body reference chain.
    pub fn request_body<'a>(&'a self, item: &'a RequestBody) -> Option<&'a RequestBody> {
        follow(item, &self.request_bodies, "requestBodies")
    }

    /// Follow a response reference chain.
    pub fn response<'a>(&'a self, item: &'a Response) -> Option<&'a Response> {
        follow(item, &self.responses, "responses")
    }

    /// Follow a schema reference chain.
    pub fn schema<'a>(&'a self, item: &'a Schema) -> Option<&'a Schema> {
        follow(item, &self.schemas, "schemas")
    }
}

/// Object that may be a `$ref` to a component.
trait Referable {
    fn reference(&self) -> Option<&str>;
}

/// Resolve `item` through `#/components/<section>/<name>` references.
///
/// Returns `None` for references to other documents, missing targets or
/// chains longer than [`MAX_REF_DEPTH`].
fn follow<'a, T: Referable>(
    item: &'a T,
    table: &'a IndexMap<String, T>,
    section: &str,
) -> Option<&'a T> {
    let mut current = item;
    for _ in 0..MAX_REF_DEPTH {
        let Some(reference) = current.reference() else {
            return Some(current);
        };
        let name = reference
            .strip_prefix("#/components/")?
            .strip_prefix(section)?
            .strip_prefix('/')?;
        current = table.get(name)?;
    }
    None
}

/// Operations of a single path.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PathItem {
    #[serde(deserialize_with = "lenient")]
    pub get: Option<Operation>,
    #[serde(deserialize_with = "lenient")]
    pub put: Option<Operation>,
    #[serde(deserialize_with = "lenient")]
    pub post: Option<Operation>,
    #[serde(deserialize_with = "lenient")]
    pub delete: Option<Operation>,
    #[serde(deserialize_with = "lenient")]
    pub options: Option<Operation>,
    #[serde(deserialize_with = "lenient")]
    pub head: Option<Operation>,
    #[serde(deserialize_with = "lenient")]
    pub patch: Option<Operation>,
    #[serde(deserialize_with = "lenient")]
    pub trace: Option<Operation>,
}

impl PathItem {
    /// Operation for a method in any case (`POST`, `post`, `Post`).
    pub fn operation(&self, method: &str) -> Option<&Operation> {
        match method.to_ascii_lowercase().as_str() {
            "get" => self.get.as_ref(),
            "put" => self.put.as_ref(),
            "post" => self.post.as_ref(),
            "delete" => self.delete.as_ref(),
            "options" => self.options.as_ref(),
            "head" => self.head.as_ref(),
            "patch" => self.patch.as_ref(),
            "trace" => self.trace.as_ref(),
            _ => None,
        }
    }
}

/// A single API operation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Operation {
    #[serde(deserialize_with = "text")]
    pub summary: Option<String>,
    #[serde(deserialize_with = "text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "string_list")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub parameters: Vec<Parameter>,
    #[serde(rename = "requestBody", deserialize_with = "lenient")]
    pub request_body: Option<RequestBody>,
    /// Responses keyed by status code (`200`, `4XX`, `default`).
    #[serde(deserialize_with = "lenient_map")]
    pub responses: IndexMap<String, Response>,
}

/// Operation parameter, inline or by reference.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Parameter {
    #[serde(rename = "$ref", deserialize_with = "text")]
    pub reference: Option<String>,
    #[serde(deserialize_with = "text_or_empty")]
    pub name: String,
    #[serde(deserialize_with = "text")]
    pub description: Option<String>,
    /// Only a literal `true` marks the parameter required.
    #[serde(deserialize_with = "flag")]
    pub required: bool,
    #[serde(deserialize_with = "optional_schema")]
    pub schema: Option<Schema>,
}

impl Referable for Parameter {
    fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }
}

/// Request body, inline or by reference.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RequestBody {
    #[serde(rename = "$ref", deserialize_with = "text")]
    pub reference: Option<String>,
    #[serde(deserialize_with = "lenient_map")]
    pub content: IndexMap<String, MediaType>,
}

impl Referable for RequestBody {
    fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }
}

/// Content of one media type.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MediaType {
    #[serde(deserialize_with = "optional_schema")]
    pub schema: Option<Schema>,
}

/// Response, inline or by reference.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Response {
    #[serde(rename = "$ref", deserialize_with = "text")]
    pub reference: Option<String>,
    #[serde(deserialize_with = "text")]
    pub description: Option<String>,
}

impl Referable for Response {
    fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }
}

/// Schema object, reduced to what is shown in documentation.
///
/// A boolean schema (`true` / `false`, OpenAPI 3.1) reads as an empty schema.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Schema {
    #[serde(rename = "$ref", deserialize_with = "text")]
    pub reference: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient")]
    pub schema_type: Option<TypeSet>,
    #[serde(deserialize_with = "text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_map")]
    pub properties: IndexMap<String, Schema>,
    #[serde(deserialize_with = "string_list")]
    pub required: Vec<String>,
}

impl Referable for Schema {
    fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }
}

/// Deserialize an optional schema; any non-null value yields one.
fn optional_schema<'de, D>(deserializer: D) -> Result<Option<Schema>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        value => Some(Schema::deserialize(value).unwrap_or_default()),
    })
}

/// The `type` keyword: a single name, or a list in OpenAPI 3.1.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
    Single(String),
    Multiple(Vec<String>),
}

impl std::fmt::Display for TypeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(name) => f.write_str(name),
            Self::Multiple(names) => f.write_str(&names.join(" | ")),
        }
    }
}
