use indexmap::{IndexMap, IndexSet};
use iogen_core::parse::response::Response;

use crate::schema::serialize_schema_object;
use crate::serialized::{Combine, SerializedType};

/// Status codes whose schemas make up the success type of a method.
pub const SUCCESSFUL_CODES: [&str; 2] = ["200", "default"];

/// Resolve the success response type of an operation.
///
/// Schemas of the successful codes are compiled, structurally identical
/// results are merged, and the survivors are unioned. No schema at all
/// yields `void`.
pub fn serialize_operation_responses(
    responses: &IndexMap<String, Response>,
    relative: &str,
    root_name: &str,
) -> SerializedType {
    let mut serialized: Vec<SerializedType> = Vec::new();
    for code in SUCCESSFUL_CODES {
        let Some(schema) = responses.get(code).and_then(|r| r.schema.as_ref()) else {
            continue;
        };
        let candidate = serialize_schema_object(schema, relative, root_name);
        if !serialized.iter().any(|s| s.same_shape(&candidate)) {
            serialized.push(candidate);
        }
    }

    let count = serialized.len();
    if count == 0 {
        return SerializedType::plain("void", "t.void");
    }

    let combined = SerializedType::intercalate(SerializedType::plain(" | ", ", "), serialized);
    let io = if count > 1 {
        format!("t.union([{}])", combined.io)
    } else {
        combined.io
    };
    SerializedType::new(combined.type_, io, combined.dependencies, IndexSet::new())
}
