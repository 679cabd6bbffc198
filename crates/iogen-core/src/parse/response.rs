use serde::{Deserialize, Serialize};

use super::schema::SchemaObject;

/// A response definition. Responses without a schema carry no body.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaObject>,
}
