use std::fmt;

use serde::{Serialize, Serializer};

use crate::parse::schema::{SchemaOrRef, SchemaType};

/// Implementation-level type of a schema property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyType {
    DateTime,
    Date,
    String,
    Integer,
    Float,
    Boolean,
    List(Box<PropertyType>),
    /// Untyped: unknown or absent `type`, and references.
    Any,
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyType::DateTime => f.write_str("datetime"),
            PropertyType::Date => f.write_str("date"),
            PropertyType::String => f.write_str("string"),
            PropertyType::Integer => f.write_str("integer"),
            PropertyType::Float => f.write_str("float"),
            PropertyType::Boolean => f.write_str("boolean"),
            PropertyType::List(inner) => write!(f, "list[{inner}]"),
            PropertyType::Any => f.write_str("any"),
        }
    }
}

impl Serialize for PropertyType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Map a declared `type`/`format` pair to an implementation type.
///
/// | type    | format    | result           |
/// |---------|-----------|------------------|
/// | string  | date-time | datetime         |
/// | string  | date      | date             |
/// | string  | other     | string           |
/// | integer |           | integer          |
/// | number  |           | float            |
/// | boolean |           | boolean          |
/// | array   |           | list[item]       |
/// | other   |           | any              |
///
/// `items` is only consulted for arrays; a missing item schema maps to
/// `list[any]`.
pub fn map_type(
    schema_type: Option<SchemaType>,
    format: Option<&str>,
    items: Option<&SchemaOrRef>,
) -> PropertyType {
    match (schema_type, format) {
        (Some(SchemaType::String), Some("date-time")) => PropertyType::DateTime,
        (Some(SchemaType::String), Some("date")) => PropertyType::Date,
        (Some(SchemaType::String), _) => PropertyType::String,
        (Some(SchemaType::Integer), _) => PropertyType::Integer,
        (Some(SchemaType::Number), _) => PropertyType::Float,
        (Some(SchemaType::Boolean), _) => PropertyType::Boolean,
        (Some(SchemaType::Array), _) => {
            let item = items.map(map_schema).unwrap_or(PropertyType::Any);
            PropertyType::List(Box::new(item))
        }
        _ => PropertyType::Any,
    }
}

/// Map a property schema. References and boolean schemas carry no `type`
/// and map to `Any`.
pub fn map_schema(schema: &SchemaOrRef) -> PropertyType {
    match schema {
        SchemaOrRef::Schema(s) => map_type(
            s.schema_type.as_ref().and_then(|t| t.primary()),
            s.format.as_deref(),
            s.items.as_deref(),
        ),
        SchemaOrRef::Ref { .. } | SchemaOrRef::Bool(_) => PropertyType::Any,
    }
}
