//! Schema document model.
//!
//! Only the keywords the generator reasons about are typed; everything else is
//! collected into [`Schema::extra`] and written back untouched.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top level of a decoded spec document.
///
/// Keys other than `definitions` (paths, info, ...) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiDocument {
    #[serde(default)]
    pub definitions: Option<IndexMap<String, Schema>>,
}

/// The `type` keyword, either a single type or a list of types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    Single(String),
    Multiple(Vec<String>),
}

impl SchemaType {
    pub fn names(&self) -> Vec<&str> {
        match self {
            SchemaType::Single(name) => vec![name.as_str()],
            SchemaType::Multiple(names) => names.iter().map(String::as_str).collect(),
        }
    }

    pub fn is(&self, name: &str) -> bool {
        matches!(self, SchemaType::Single(single) if single == name)
    }
}

/// A JSON-Schema-like node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Reference to another definition (`#/definitions/Name`)
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub ref_path: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, Schema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    /// Swagger 2 vendor alias of `nullable`
    #[serde(rename = "x-nullable", skip_serializing_if = "Option::is_none")]
    pub x_nullable: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_of: Option<Vec<Schema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<Schema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub any_of: Option<Vec<Schema>>,

    /// Every keyword not listed above, in source order
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl Schema {
    /// `{type: "null"}`
    pub fn null() -> Self {
        Schema {
            schema_type: Some(SchemaType::Single("null".to_owned())),
            ..Default::default()
        }
    }

    /// `{oneOf: [{type: "null"}, inner]}`
    pub fn null_union(inner: Schema) -> Self {
        Schema {
            one_of: Some(vec![Schema::null(), inner]),
            ..Default::default()
        }
    }

    /// Whether the node carries `nullable: true` or `x-nullable: true`.
    pub fn declares_nullable(&self) -> bool {
        self.nullable == Some(true) || self.x_nullable == Some(true)
    }

    /// Whether the node is already a two-member `oneOf` with a `null` member.
    pub fn is_null_union(&self) -> bool {
        match &self.one_of {
            Some(members) if members.len() == 2 => members.iter().any(Schema::is_null_type),
            _ => false,
        }
    }

    /// Nullable either by flag or by shape.
    pub fn is_nullable(&self) -> bool {
        self.declares_nullable() || self.is_null_union()
    }

    fn is_null_type(&self) -> bool {
        self.schema_type.as_ref().is_some_and(|t| t.is("null"))
    }

    pub fn is_required(&self, property: &str) -> bool {
        self.required
            .as_ref()
            .is_some_and(|required| required.iter().any(|name| name == property))
    }
}
