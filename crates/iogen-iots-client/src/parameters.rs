use iogen_core::parse::parameter::{BodyParameter, NonArrayItems, NonBodyParameter, ParameterType};

use crate::schema::{field_separator, serialize_field, serialize_schema_object, to_object_type};
use crate::serialized::{
    Combine, SerializedParameter, SerializedPathParameter, SerializedType,
};

/// Compile the `type` of a path or query parameter.
pub fn serialize_parameter_type(kind: &ParameterType) -> SerializedType {
    match kind {
        ParameterType::String {} => SerializedType::plain("string", "t.string"),
        ParameterType::Boolean {} => SerializedType::plain("boolean", "t.boolean"),
        ParameterType::Integer {} | ParameterType::Number {} => {
            SerializedType::plain("number", "t.number")
        }
        ParameterType::Array { items } => {
            let items = serialize_items(items);
            SerializedType::plain(
                format!("Array<{}>", items.type_),
                format!("t.array({})", items.io),
            )
        }
        ParameterType::File {} => SerializedType::plain("unknown", "t.unknown"),
    }
}

fn serialize_items(items: &NonArrayItems) -> SerializedType {
    match items {
        NonArrayItems::String {} => SerializedType::plain("string", "t.string"),
        NonArrayItems::Boolean {} => SerializedType::plain("boolean", "t.boolean"),
        NonArrayItems::Integer {} | NonArrayItems::Number {} => {
            SerializedType::plain("number", "t.number")
        }
    }
}

/// Compile a path parameter into a named argument (`id: string`) and the
/// expression that encodes it for URL substitution (`t.string.encode(id)`).
pub fn serialize_path_parameter(parameter: &NonBodyParameter) -> SerializedPathParameter {
    let serialized = serialize_parameter_type(&parameter.kind);
    let name = &parameter.name;
    SerializedPathParameter {
        name: name.clone(),
        parameter: SerializedParameter::new(
            SerializedType::new(
                format!("{name}: {}", serialized.type_),
                format!("{}.encode({name})", serialized.io),
                serialized.dependencies,
                serialized.refs,
            ),
            true,
        ),
    }
}

/// Doc comment line describing a path parameter.
pub fn serialize_path_parameter_description(parameter: &NonBodyParameter) -> String {
    let serialized = serialize_parameter_type(&parameter.kind);
    let line = format!("@param {{ {} }} {}", serialized.type_, parameter.name);
    match &parameter.description {
        Some(description) => format!("{line} - {description}"),
        None => line,
    }
}

fn serialize_query_parameter(parameter: &NonBodyParameter) -> SerializedParameter {
    let is_required = parameter.is_required();
    let serialized = serialize_parameter_type(&parameter.kind);
    SerializedParameter::new(
        serialize_field(&parameter.name, serialized, is_required),
        is_required,
    )
}

/// Fold all query parameters into one object type and codec.
pub fn serialize_query_parameters(parameters: &[&NonBodyParameter]) -> SerializedParameter {
    let fields = parameters.iter().map(|p| serialize_query_parameter(p));
    into_object(SerializedParameter::intercalate(parameter_separator(), fields))
}

fn serialize_body_parameter(
    parameter: &BodyParameter,
    relative: &str,
    root_name: &str,
) -> SerializedParameter {
    let is_required = parameter.is_required();
    let serialized = serialize_schema_object(&parameter.schema, relative, root_name);
    SerializedParameter::new(
        serialize_field(&parameter.name, serialized, is_required),
        is_required,
    )
}

/// Fold all body parameters into one object type and codec.
pub fn serialize_body_parameters(
    parameters: &[&BodyParameter],
    relative: &str,
    root_name: &str,
) -> SerializedParameter {
    let fields = parameters
        .iter()
        .map(|p| serialize_body_parameter(p, relative, root_name));
    into_object(SerializedParameter::intercalate(parameter_separator(), fields))
}

fn parameter_separator() -> SerializedParameter {
    SerializedParameter::new(field_separator(), false)
}

// Parameter bags are never self-referential.
fn into_object(intercalated: SerializedParameter) -> SerializedParameter {
    SerializedParameter::new(
        to_object_type(intercalated.serialized, None),
        intercalated.is_required,
    )
}

/// Whether any query or body parameter must be supplied.
pub fn has_required_parameters(query: &[&NonBodyParameter], body: &[&BodyParameter]) -> bool {
    query.iter().any(|p| p.is_required()) || body.iter().any(|p| p.is_required())
}

/// Doc comment line for the `parameters` argument, if the operation has one.
pub fn serialize_parameters_description(
    query: &[&NonBodyParameter],
    body: &[&BodyParameter],
) -> Option<String> {
    if query.is_empty() && body.is_empty() {
        return None;
    }
    Some(if has_required_parameters(query, body) {
        "@param { object } parameters".to_string()
    } else {
        "@param { object } [parameters]".to_string()
    })
}
