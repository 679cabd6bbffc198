use serde::{Deserialize, Serialize};

use super::schema::SchemaObject;

/// An operation parameter, tagged by its location (`in`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "in", rename_all = "camelCase")]
pub enum Parameter {
    Path(NonBodyParameter),
    Query(NonBodyParameter),
    Header(NonBodyParameter),
    FormData(NonBodyParameter),
    Body(BodyParameter),
}

impl Parameter {
    pub fn name(&self) -> &str {
        match self {
            Parameter::Path(p)
            | Parameter::Query(p)
            | Parameter::Header(p)
            | Parameter::FormData(p) => &p.name,
            Parameter::Body(p) => &p.name,
        }
    }
}

/// A parameter carried outside the request body; typed by `type` rather than a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonBodyParameter {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(flatten)]
    pub kind: ParameterType,
}

impl NonBodyParameter {
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParameterType {
    String {},
    Boolean {},
    Integer {},
    Number {},
    Array { items: NonArrayItems },
    File {},
}

/// Items of an array-typed non-body parameter; nested arrays are not allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NonArrayItems {
    String {},
    Boolean {},
    Integer {},
    Number {},
}

/// A parameter carried in the request body, typed by a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyParameter {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    pub schema: SchemaObject,
}

impl BodyParameter {
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }
}
