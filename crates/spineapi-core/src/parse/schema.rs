use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A JSON Schema type keyword value.
///
/// Values outside the JSON Schema vocabulary (`file`, typos) read as
/// `Unknown` instead of failing the whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
    #[serde(other)]
    Unknown,
}

/// The `type` field can be a single type or an array of types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
    Single(SchemaType),
    Multiple(Vec<SchemaType>),
}

impl TypeSet {
    /// The type that drives implementation mapping: the single type, or the
    /// first non-null member of a 3.1 type array.
    pub fn primary(&self) -> Option<SchemaType> {
        match self {
            TypeSet::Single(t) => Some(*t),
            TypeSet::Multiple(types) => types.iter().copied().find(|t| *t != SchemaType::Null),
        }
    }
}

/// A reference, a 3.1 boolean schema, or an inline schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    /// `true` accepts any instance, `false` none.
    Bool(bool),
    Schema(Box<Schema>),
}

impl SchemaOrRef {
    pub fn as_schema(&self) -> Option<&Schema> {
        match self {
            SchemaOrRef::Schema(s) => Some(s),
            SchemaOrRef::Ref { .. } | SchemaOrRef::Bool(_) => None,
        }
    }
}

/// A JSON Schema object as it appears in `components.schemas` or inline.
///
/// Only the keywords the IR reads are typed. Everything else (`minimum`,
/// `pattern`, `discriminator`, vendor extensions) is kept verbatim in
/// `extra` and serialized back in place.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<TypeSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "default", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,

    /// Property name → schema, in declaration order.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaOrRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<Box<SchemaOrRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaOrRef>>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<SchemaOrRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<SchemaOrRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<SchemaOrRef>,
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}
