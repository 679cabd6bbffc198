use indexmap::{IndexMap, IndexSet};
use iogen_core::parse::schema::{
    AdditionalProperties, ObjectSchema, Schema, SchemaObject, StringSchema, definition_name,
};

use crate::serialized::{
    Combine, Dependency, SerializedType, io_name, option_dependencies,
};

/// Compile a schema node into a type/codec pair.
///
/// `relative` is the import path prefix of definition files as seen from the
/// file being emitted. `root_name` is the definition currently being compiled;
/// a reference back to it is treated as recursion instead of an import.
pub fn serialize_schema_object(
    schema: &SchemaObject,
    relative: &str,
    root_name: &str,
) -> SerializedType {
    match schema {
        SchemaObject::Ref { ref_path } => serialize_ref(ref_path, relative, root_name),
        SchemaObject::Schema(schema) => match schema.as_ref() {
            Schema::String(s) => serialize_string(s),
            Schema::Boolean {} => SerializedType::plain("boolean", "t.boolean"),
            Schema::Integer(_) | Schema::Number(_) => SerializedType::plain("number", "t.number"),
            Schema::Array(array) => {
                let result = serialize_schema_object(&array.items, relative, root_name);
                SerializedType::new(
                    format!("Array<{}>", result.type_),
                    format!("t.array({})", result.io),
                    result.dependencies,
                    result.refs,
                )
            }
            Schema::Object(object) => serialize_object(object, relative, root_name),
        },
        SchemaObject::Untyped(untyped) => {
            serialize_object(&untyped.to_object(), relative, root_name)
        }
    }
}

fn serialize_ref(ref_path: &str, relative: &str, root_name: &str) -> SerializedType {
    let type_ = definition_name(ref_path);
    let io = io_name(type_);
    let is_recursive = root_name == type_ || root_name == io;
    let dependencies = if is_recursive {
        Vec::new()
    } else {
        let path = format!("{relative}{type_}");
        vec![Dependency::new(type_, &path), Dependency::new(&io, &path)]
    };
    SerializedType::new(
        type_,
        io,
        dependencies,
        IndexSet::from([type_.to_string()]),
    )
}

fn serialize_string(schema: &StringSchema) -> SerializedType {
    if let Some(values) = schema.enum_values.as_deref().filter(|v| !v.is_empty()) {
        return serialize_enum(values);
    }
    match schema.format.as_deref() {
        Some("date-time") => SerializedType::new(
            "Date",
            "DateFromISOString",
            vec![Dependency::new("DateFromISOString", "io-ts-types")],
            IndexSet::new(),
        ),
        _ => SerializedType::plain("string", "t.string"),
    }
}

/// Compile enumerated values into a literal union and a matching literal codec.
pub fn serialize_enum(values: &[serde_json::Value]) -> SerializedType {
    let literals: Vec<String> = values.iter().map(enum_literal).collect();
    let io = match literals.as_slice() {
        [single] => format!("t.literal({single})"),
        _ => {
            let members: Vec<String> = literals.iter().map(|l| format!("t.literal({l})")).collect();
            format!("t.union([{}])", members.join(", "))
        }
    };
    SerializedType::plain(literals.join(" | "), io)
}

fn enum_literal(value: &serde_json::Value) -> String {
    let text = match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    quote(&text)
}

fn serialize_object(object: &ObjectSchema, relative: &str, root_name: &str) -> SerializedType {
    match &object.additional_properties {
        Some(AdditionalProperties::Schema(value)) => {
            serialize_additional_properties(value, relative, root_name)
        }
        Some(AdditionalProperties::Bool(true)) => {
            SerializedType::plain("{ [key: string]: unknown }", "t.dictionary(t.string, t.unknown)")
        }
        Some(AdditionalProperties::Bool(false)) | None => match &object.properties {
            Some(properties) => serialize_properties(object, properties, relative, root_name),
            None => to_object_type(SerializedType::empty(), None),
        },
    }
}

fn serialize_additional_properties(
    value: &SchemaObject,
    relative: &str,
    root_name: &str,
) -> SerializedType {
    let additional = serialize_schema_object(value, relative, root_name);
    SerializedType::new(
        format!("{{ [key: string]: {} }}", additional.type_),
        format!("t.dictionary(t.string, {})", additional.io),
        additional.dependencies,
        additional.refs,
    )
}

fn serialize_properties(
    object: &ObjectSchema,
    properties: &IndexMap<String, SchemaObject>,
    relative: &str,
    root_name: &str,
) -> SerializedType {
    let fields = properties.iter().map(|(name, value)| {
        let field = serialize_schema_object(value, relative, root_name);
        serialize_field(name, field, object.is_required(name))
    });
    let serialized = SerializedType::intercalate(field_separator(), fields);
    let recursion = serialized
        .refs
        .contains(root_name)
        .then_some(root_name);
    to_object_type(serialized, recursion)
}

/// Render one `name: Type` / `name: codec` field, wrapping optional fields in
/// `Option` / `createOptionFromNullable`.
pub fn serialize_field(name: &str, field: SerializedType, is_required: bool) -> SerializedType {
    let key = property_key(name);
    if is_required {
        SerializedType::new(
            format!("{key}: {}", field.type_),
            format!("{key}: {}", field.io),
            field.dependencies,
            field.refs,
        )
    } else {
        let mut dependencies = field.dependencies;
        dependencies.extend(option_dependencies());
        SerializedType::new(
            format!("{key}: Option<{}>", field.type_),
            format!("{key}: createOptionFromNullable({})", field.io),
            dependencies,
            field.refs,
        )
    }
}

/// Separator placed between the fields of an object type and its codec.
pub fn field_separator() -> SerializedType {
    SerializedType::plain("; ", ", ")
}

/// Wrap intercalated fields into an object type and a `t.type` codec.
///
/// With `recursion` set to the root name, the codec becomes a `t.recursion`
/// factory keyed by the root's codec name. References are consumed here.
pub fn to_object_type(serialized: SerializedType, recursion: Option<&str>) -> SerializedType {
    let (type_, io) = if serialized.type_.is_empty() {
        ("{}".to_string(), "t.type({})".to_string())
    } else {
        (
            format!("{{ {} }}", serialized.type_),
            format!("t.type({{ {} }})", serialized.io),
        )
    };
    let io = match recursion {
        Some(name) => {
            let recursion_io = io_name(name);
            format!("t.recursion<{name}>('{recursion_io}', {recursion_io} => {io})")
        }
        None => io,
    };
    SerializedType::new(type_, io, serialized.dependencies, IndexSet::new())
}

/// Property names that are not plain identifiers are emitted quoted.
fn property_key(name: &str) -> String {
    let mut chars = name.chars();
    let is_identifier = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if is_identifier {
        name.to_string()
    } else {
        quote(name)
    }
}

fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\\', "\\\\").replace('\'', "\\'"))
}
