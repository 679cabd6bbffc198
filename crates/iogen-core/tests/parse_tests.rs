use iogen_core::grouping::group_paths_by_tag;
use iogen_core::parse;
use iogen_core::parse::operation::HttpMethod;
use iogen_core::parse::parameter::Parameter;
use iogen_core::parse::schema::{Schema, SchemaObject};

const PETSTORE: &str = include_str!("fixtures/petstore.yaml");

#[test]
fn parse_petstore_yaml() {
    let spec = parse::from_yaml(PETSTORE).expect("should parse petstore");
    assert_eq!(spec.swagger, "2.0");
    assert_eq!(spec.info.title, "Petstore");
    assert_eq!(spec.base_path.as_deref(), Some("/v1"));
    assert_eq!(spec.paths.len(), 3);

    let definitions = spec.definitions.as_ref().expect("should have definitions");
    assert_eq!(
        definitions.keys().collect::<Vec<_>>(),
        vec!["Pet", "Category", "Labels", "Error"]
    );

    match &definitions["Pet"] {
        SchemaObject::Schema(schema) => match schema.as_ref() {
            Schema::Object(obj) => {
                assert!(obj.is_required("id"));
                assert!(obj.is_required("name"));
                assert!(!obj.is_required("status"));
                assert_eq!(obj.properties.as_ref().map(|p| p.len()), Some(6));
            }
            other => panic!("Pet should be an object, got {other:?}"),
        },
        _ => panic!("Pet should be inline"),
    }
}

#[test]
fn parse_petstore_operations() {
    let spec = parse::from_yaml(PETSTORE).unwrap();

    let pets = &spec.paths["/pets"];
    let ops: Vec<_> = pets
        .operations()
        .into_iter()
        .map(|(method, op)| (method, op.operation_id.clone()))
        .collect();
    assert_eq!(
        ops,
        vec![
            (HttpMethod::Get, Some("listPets".to_string())),
            (HttpMethod::Post, Some("createPet".to_string())),
        ]
    );

    let list = pets.get.as_ref().unwrap();
    assert_eq!(list.query_parameters().len(), 2);
    assert!(list.responses.contains_key("default"));

    let delete = spec.paths["/pets/{petId}"].delete.as_ref().unwrap();
    assert!(delete.is_deprecated());
    assert!(
        delete
            .parameters
            .iter()
            .any(|p| matches!(p, Parameter::Header(_)))
    );
    assert!(delete.responses["204"].schema.is_none());
}

#[test]
fn group_petstore_by_tag() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let groups = group_paths_by_tag(&spec.paths);
    assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["Pets", "Store"]);
    assert_eq!(groups["Pets"].len(), 2);
}

#[test]
fn parse_json_document() {
    let json = r#"{
        "swagger": "2.0",
        "info": { "title": "Tiny", "version": "0.1" },
        "paths": {}
    }"#;
    let spec = parse::from_json(json).expect("should parse JSON");
    assert!(spec.definitions.is_none());
    assert!(spec.paths.is_empty());
}

#[test]
fn parse_invalid_version() {
    let yaml = r#"
swagger: "1.2"
info:
  title: Test
  version: "1.0"
paths: {}
"#;
    let result = parse::from_yaml(yaml);
    assert!(result.is_err());
    let err = result.unwrap_err();
    assert!(err.to_string().contains("unsupported Swagger version"));
}

#[test]
fn parse_openapi_3_rejected() {
    let yaml = r#"
swagger: "3.0.0"
info:
  title: Test
  version: "1.0"
"#;
    assert!(parse::from_yaml(yaml).is_err());
}
