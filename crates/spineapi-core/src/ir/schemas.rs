use serde::Serialize;

use crate::parse::schema::{Schema, SchemaType};
use crate::transform::name_normalizer::{table_name, type_name};
use crate::transform::type_mapper::{PropertyType, map_schema};

/// One named schema from `components.schemas`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaDescriptor {
    /// Raw key in `components.schemas`.
    pub name: String,
    pub schema: Schema,
    pub description: Option<String>,
}

/// A property of a schema with its mapped type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field<'a> {
    pub name: &'a str,
    pub field_type: PropertyType,
    pub required: bool,
    pub description: Option<&'a str>,
}

impl SchemaDescriptor {
    pub fn type_name(&self) -> String {
        type_name(&self.name)
    }

    pub fn table_name(&self) -> String {
        table_name(&self.name)
    }

    /// Declared `type`, `object` when absent.
    pub fn schema_type(&self) -> SchemaType {
        self.schema
            .schema_type
            .as_ref()
            .and_then(|t| t.primary())
            .unwrap_or(SchemaType::Object)
    }

    /// Mapped type of `property`. Undeclared properties are untyped.
    pub fn property_type(&self, property: &str) -> PropertyType {
        self.schema
            .properties
            .get(property)
            .map(map_schema)
            .unwrap_or(PropertyType::Any)
    }

    pub fn is_required(&self, property: &str) -> bool {
        self.schema.required.iter().any(|r| r == property)
    }

    /// All properties in declaration order.
    pub fn fields(&self) -> Vec<Field<'_>> {
        self.schema
            .properties
            .iter()
            .map(|(name, prop)| Field {
                name,
                field_type: map_schema(prop),
                required: self.is_required(name),
                description: prop.as_schema().and_then(|s| s.description.as_deref()),
            })
            .collect()
    }
}
