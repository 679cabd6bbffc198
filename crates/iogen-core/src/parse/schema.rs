use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Prefix of document-local references to type definitions.
pub const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// A reference or inline schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaObject {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Schema(Box<Schema>),
    /// An object schema that omits `type: object` but declares `properties`.
    Untyped(Box<UntypedObjectSchema>),
}

impl SchemaObject {
    pub fn reference(name: &str) -> Self {
        SchemaObject::Ref {
            ref_path: format!("{DEFINITIONS_PREFIX}{name}"),
        }
    }

    pub fn inline(schema: Schema) -> Self {
        SchemaObject::Schema(Box::new(schema))
    }
}

/// A Swagger 2.0 schema, tagged by its `type` keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Schema {
    String(StringSchema),
    Boolean {},
    Integer(NumericSchema),
    Number(NumericSchema),
    Array(ArraySchema),
    Object(ObjectSchema),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StringSchema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NumericSchema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArraySchema {
    pub items: SchemaObject,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ObjectSchema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, SchemaObject>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,

    #[serde(
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<AdditionalProperties>,
}

impl ObjectSchema {
    pub fn is_required(&self, name: &str) -> bool {
        self.required
            .as_ref()
            .is_some_and(|required| required.iter().any(|r| r == name))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UntypedObjectSchema {
    pub properties: IndexMap<String, SchemaObject>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl UntypedObjectSchema {
    pub fn to_object(&self) -> ObjectSchema {
        ObjectSchema {
            properties: Some(self.properties.clone()),
            required: self.required.clone(),
            additional_properties: None,
        }
    }
}

/// `additionalProperties` can be a boolean or a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Bool(bool),
    Schema(Box<SchemaObject>),
}

/// Strip the document-local prefix from a `$ref`, e.g. `#/definitions/Pet` → `Pet`.
///
/// References without the prefix are returned unchanged.
pub fn definition_name(ref_path: &str) -> &str {
    ref_path
        .strip_prefix(DEFINITIONS_PREFIX)
        .unwrap_or(ref_path)
}
