use indexmap::IndexSet;
use iogen_core::parse::operation::{HttpMethod, Operation, PathItem};
use iogen_core::parse::parameter::Parameter;

use crate::parameters::{
    has_required_parameters, serialize_body_parameters, serialize_parameters_description,
    serialize_path_parameter, serialize_path_parameter_description, serialize_query_parameters,
};
use crate::responses::serialize_operation_responses;
use crate::serialized::{Combine, Dependency, SerializedPathParameter, SerializedType};

/// Import prefix of definition files as seen from a controller file.
pub const DEFINITIONS_RELATIVE: &str = "../definitions/";

/// Module path of the boilerplate client as seen from a controller file.
pub const CLIENT_MODULE: &str = "../client/client";

/// Compile every operation of a path item, in verb order, into one folded value.
///
/// A path item without operations yields the empty value.
pub fn serialize_path(url: &str, item: &PathItem, root_name: &str, no_jsdoc: bool) -> SerializedType {
    SerializedType::fold_all(
        item.operations()
            .into_iter()
            .map(|(method, operation)| serialize_operation(url, method, operation, root_name, no_jsdoc)),
    )
}

/// Compile one operation into a method signature (`type_`) and a method body (`io`).
pub fn serialize_operation(
    url: &str,
    method: HttpMethod,
    operation: &Operation,
    root_name: &str,
    no_jsdoc: bool,
) -> SerializedType {
    let path_parameters = operation.path_parameters();
    let query_parameters = operation.query_parameters();
    let body_parameters = operation.body_parameters();

    let skipped: Vec<&str> = operation
        .parameters
        .iter()
        .filter(|p| matches!(p, Parameter::Header(_) | Parameter::FormData(_)))
        .map(Parameter::name)
        .collect();
    if !skipped.is_empty() {
        log::debug!(
            "{} {url}: skipping header/formData parameters {}",
            method.as_str(),
            skipped.join(", ")
        );
    }

    let has_query_parameters = !query_parameters.is_empty();
    let has_body_parameters = !body_parameters.is_empty();
    let has_parameters = has_query_parameters || has_body_parameters;
    let parameters_optional =
        has_parameters && !has_required_parameters(&query_parameters, &body_parameters);

    let jsdoc = if no_jsdoc {
        String::new()
    } else {
        let mut lines = Vec::new();
        if operation.is_deprecated() {
            lines.push("@deprecated".to_string());
        }
        lines.extend(operation.summary.clone());
        lines.extend(
            path_parameters
                .iter()
                .map(|p| serialize_path_parameter_description(p)),
        );
        lines.extend(serialize_parameters_description(
            &query_parameters,
            &body_parameters,
        ));
        serialize_jsdoc(&lines)
    };

    let serialized_path_parameters: Vec<SerializedPathParameter> = path_parameters
        .iter()
        .map(|p| serialize_path_parameter(p))
        .collect();
    let serialized_responses =
        serialize_operation_responses(&operation.responses, DEFINITIONS_RELATIVE, root_name);
    let serialized_query_parameters = serialize_query_parameters(&query_parameters);
    let serialized_body_parameters =
        serialize_body_parameters(&body_parameters, DEFINITIONS_RELATIVE, root_name);

    let operation_name = get_operation_name(operation, method);
    let serialized_url = serialize_url(url, &serialized_path_parameters);

    let mut arg_names: Vec<String> = serialized_path_parameters
        .iter()
        .map(|p| p.name.clone())
        .collect();
    let mut arg_types: Vec<String> = serialized_path_parameters
        .iter()
        .map(|p| p.parameter.serialized.type_.clone())
        .collect();
    if has_parameters {
        let mut fields = Vec::new();
        if has_query_parameters {
            fields.push(format!("query: {}", serialized_query_parameters.serialized.type_));
        }
        if has_body_parameters {
            fields.push(format!("body: {}", serialized_body_parameters.serialized.type_));
        }
        let marker = if parameters_optional { "?" } else { "" };
        arg_names.push("parameters".to_string());
        arg_types.push(format!("parameters{marker}: {{ {} }}", fields.join("; ")));
    }

    let type_ = format!(
        "{jsdoc}\treadonly {operation_name}: ({}) => LiveData<TAPIError, {}>;\n",
        arg_types.join(", "),
        serialized_responses.type_
    );

    let mut body = String::new();
    if has_query_parameters {
        body.push_str(&encode_statement(
            "query",
            &serialized_query_parameters.serialized.io,
            parameters_optional,
        ));
    }
    if has_body_parameters {
        body.push_str(&encode_statement(
            "body",
            &serialized_body_parameters.serialized.io,
            parameters_optional,
        ));
    }
    let mut request_fields = format!(
        "\t\t\t\turl: {serialized_url},\n\t\t\t\tmethod: '{}',\n",
        method.as_str()
    );
    if has_query_parameters {
        request_fields.push_str("\t\t\t\tquery,\n");
    }
    if has_body_parameters {
        request_fields.push_str("\t\t\t\tbody,\n");
    }

    let io = format!(
        "\t{operation_name}: ({}) => {{\n\
         {body}\
         \t\treturn e.apiClient\n\
         \t\t\t.request({{\n\
         {request_fields}\
         \t\t\t}})\n\
         \t\t\t.pipe(map(data => data.chain(value => fromEither({}.decode(value).mapLeft(ResponseValidationError.create))))),\n\
         \t}},\n",
        arg_names.join(", "),
        serialized_responses.io
    );

    let mut dependencies = vec![
        Dependency::new("map", "rxjs/operators"),
        Dependency::new("fromEither", "@devexperts/remote-data-ts"),
        Dependency::new("ResponseValidationError", CLIENT_MODULE),
        Dependency::new("TAPIError", CLIENT_MODULE),
        Dependency::new("LiveData", "@devexperts/rx-utils/dist/rd/live-data.utils"),
    ];
    dependencies.extend(serialized_responses.dependencies);
    for p in serialized_path_parameters {
        dependencies.extend(p.parameter.serialized.dependencies);
    }
    if has_query_parameters {
        dependencies.extend(serialized_query_parameters.serialized.dependencies);
    }
    if has_body_parameters {
        dependencies.extend(serialized_body_parameters.serialized.dependencies);
    }

    SerializedType::new(type_, io, dependencies, IndexSet::new())
}

/// Method name: the declared operation id, else the HTTP verb.
///
/// The verb fallback is not checked against other methods of the same
/// controller; two unnamed GET operations in one group collide.
pub fn get_operation_name(operation: &Operation, method: HttpMethod) -> String {
    operation
        .operation_id
        .clone()
        .unwrap_or_else(|| method.as_str().to_string())
}

/// Build the request URL as a template literal with encoded path parameters substituted.
pub fn serialize_url(url: &str, path_parameters: &[SerializedPathParameter]) -> String {
    let template = path_parameters.iter().fold(url.to_string(), |acc, p| {
        acc.replace(
            &format!("{{{}}}", p.name),
            &format!(
                "${{encodeURIComponent({}.toString())}}",
                p.parameter.serialized.io
            ),
        )
    });
    format!("`{template}`")
}

fn encode_statement(name: &str, io: &str, guard_undefined: bool) -> String {
    if guard_undefined {
        format!(
            "\t\tconst {name} = parameters === undefined ? undefined : {io}.encode(parameters.{name});\n"
        )
    } else {
        format!("\t\tconst {name} = {io}.encode(parameters.{name});\n")
    }
}

fn serialize_jsdoc(lines: &[String]) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let mut doc = String::from("\t/**\n");
    for line in lines.iter().flat_map(|l| l.lines()) {
        doc.push_str(&format!("\t * {}\n", line.replace("*/", "*\\/")));
    }
    doc.push_str("\t */\n");
    doc
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;
    use iogen_core::parse::parameter::{BodyParameter, NonBodyParameter, ParameterType};
    use iogen_core::parse::response::Response;
    use iogen_core::parse::schema::SchemaObject;

    use super::*;

    fn path_param(name: &str) -> Parameter {
        Parameter::Path(NonBodyParameter {
            name: name.to_string(),
            description: None,
            required: Some(true),
            kind: ParameterType::String {},
        })
    }

    fn query_param(name: &str, required: Option<bool>) -> Parameter {
        Parameter::Query(NonBodyParameter {
            name: name.to_string(),
            description: None,
            required,
            kind: ParameterType::Number {},
        })
    }

    fn body_param(name: &str, required: Option<bool>) -> Parameter {
        Parameter::Body(BodyParameter {
            name: name.to_string(),
            description: None,
            required,
            schema: SchemaObject::reference("Pet"),
        })
    }

    fn ok(schema: SchemaObject) -> IndexMap<String, Response> {
        IndexMap::from([(
            "200".to_string(),
            Response {
                description: "ok".to_string(),
                schema: Some(schema),
            },
        )])
    }

    fn compile(url: &str, method: HttpMethod, operation: &Operation) -> SerializedType {
        serialize_operation(url, method, operation, "UsersController", false)
    }

    #[test]
    fn test_path_parameters_as_arguments() {
        let operation = Operation {
            operation_id: Some("getUser".to_string()),
            parameters: vec![path_param("id")],
            responses: ok(SchemaObject::reference("User")),
            ..Operation::default()
        };
        let s = compile("/users/{id}", HttpMethod::Get, &operation);
        assert!(s.type_.contains("readonly getUser: (id: string) => LiveData<TAPIError, User>;"));
        assert!(s.io.contains("getUser: (id) => {"));
        assert!(
            s.io.contains("url: `/users/${encodeURIComponent(t.string.encode(id).toString())}`,")
        );
        assert!(s.io.contains("method: 'GET',"));
        assert!(s.io.contains("fromEither(UserIO.decode(value).mapLeft(ResponseValidationError.create))"));
        assert!(!s.io.contains("t.union"));
        assert!(!s.io.contains("query"));
        assert!(s.type_.contains("@param { string } id"));
    }

    #[test]
    fn test_optional_parameters_object() {
        let operation = Operation {
            operation_id: Some("listUsers".to_string()),
            parameters: vec![query_param("limit", None)],
            responses: ok(SchemaObject::reference("User")),
            ..Operation::default()
        };
        let s = compile("/users", HttpMethod::Get, &operation);
        assert!(s.type_.contains(
            "readonly listUsers: (parameters?: { query: { limit: Option<number> } }) => LiveData<TAPIError, User>;"
        ));
        assert!(s.type_.contains("@param { object } [parameters]"));
        assert!(s.io.contains(
            "const query = parameters === undefined ? undefined : t.type({ limit: createOptionFromNullable(t.number) }).encode(parameters.query);"
        ));
        assert!(s.io.contains("\t\t\t\tquery,\n"));
        assert!(s.dependencies.iter().any(|d| d.name == "createOptionFromNullable"));
    }

    #[test]
    fn test_required_parameter_makes_object_required() {
        let operation = Operation {
            operation_id: Some("search".to_string()),
            parameters: vec![query_param("limit", None), body_param("pet", Some(true))],
            ..Operation::default()
        };
        let s = compile("/search", HttpMethod::Post, &operation);
        assert!(s.type_.contains(
            "(parameters: { query: { limit: Option<number> }; body: { pet: Pet } }) => LiveData<TAPIError, void>;"
        ));
        assert!(s.type_.contains("@param { object } parameters"));
        assert!(s.io.contains("const body = t.type({ pet: PetIO }).encode(parameters.body);"));
        assert!(s.io.contains("\t\t\t\tquery,\n\t\t\t\tbody,\n"));
        assert!(s.io.contains("t.void.decode(value)"));
        assert!(
            s.dependencies
                .iter()
                .any(|d| d.name == "PetIO" && d.path == "../definitions/Pet")
        );
    }

    #[test]
    fn test_path_and_query_parameters() {
        let operation = Operation {
            operation_id: Some("listOrders".to_string()),
            parameters: vec![path_param("userId"), query_param("page", Some(true))],
            ..Operation::default()
        };
        let s = compile("/users/{userId}/orders", HttpMethod::Get, &operation);
        assert!(s.type_.contains("(userId: string, parameters: { query: { page: number } })"));
        assert!(s.io.contains("listOrders: (userId, parameters) => {"));
    }

    #[test]
    fn test_method_name_falls_back_to_verb() {
        let s = compile("/health", HttpMethod::Get, &Operation::default());
        assert!(s.type_.contains("readonly GET: () => LiveData<TAPIError, void>;"));
        assert!(s.io.contains("\tGET: () => {"));
    }

    #[test]
    fn test_jsdoc() {
        let operation = Operation {
            summary: Some("Remove it".to_string()),
            deprecated: Some(true),
            ..Operation::default()
        };
        let s = compile("/x", HttpMethod::Delete, &operation);
        assert!(s.type_.starts_with("\t/**\n\t * @deprecated\n\t * Remove it\n\t */\n"));

        let not_deprecated = Operation {
            deprecated: Some(false),
            ..Operation::default()
        };
        let s = compile("/x", HttpMethod::Delete, &not_deprecated);
        assert!(!s.type_.contains("@deprecated"));
        assert!(s.type_.starts_with("\treadonly DELETE"));
    }

    #[test]
    fn test_jsdoc_multiline_summary() {
        let operation = Operation {
            summary: Some("line one\nline two */".to_string()),
            ..Operation::default()
        };
        let s = compile("/x", HttpMethod::Get, &operation);
        assert!(s.type_.starts_with("\t/**\n\t * line one\n\t * line two *\\/\n\t */\n"));
    }

    #[test]
    fn test_no_jsdoc() {
        let operation = Operation {
            summary: Some("Hidden".to_string()),
            ..Operation::default()
        };
        let s = serialize_operation("/x", HttpMethod::Get, &operation, "XController", true);
        assert!(!s.type_.contains("/**"));
    }

    #[test]
    fn test_fixed_dependencies() {
        let s = compile("/x", HttpMethod::Head, &Operation::default());
        let names: Vec<&str> = s.dependencies.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["map", "fromEither", "ResponseValidationError", "TAPIError", "LiveData"]
        );
        assert!(s.refs.is_empty());
    }

    #[test]
    fn test_serialize_path_folds_operations() {
        let item = PathItem {
            get: Some(Operation {
                operation_id: Some("a".to_string()),
                ..Operation::default()
            }),
            post: Some(Operation {
                operation_id: Some("b".to_string()),
                ..Operation::default()
            }),
            ..PathItem::default()
        };
        let s = serialize_path("/x", &item, "XController", false);
        let a = s.type_.find("readonly a:").unwrap();
        let b = s.type_.find("readonly b:").unwrap();
        assert!(a < b);
        assert_eq!(s.dependencies.len(), 10);
    }

    #[test]
    fn test_empty_path_item() {
        let s = serialize_path("/x", &PathItem::default(), "XController", false);
        assert_eq!(s, SerializedType::empty());
    }

    #[test]
    fn test_serialize_url_multiple_parameters() {
        let operation = Operation {
            parameters: vec![path_param("a"), path_param("b")],
            ..Operation::default()
        };
        let params: Vec<SerializedPathParameter> = operation
            .path_parameters()
            .into_iter()
            .map(serialize_path_parameter)
            .collect();
        assert_eq!(
            serialize_url("/x/{a}/y/{b}", &params),
            "`/x/${encodeURIComponent(t.string.encode(a).toString())}/y/${encodeURIComponent(t.string.encode(b).toString())}`"
        );
    }
}
