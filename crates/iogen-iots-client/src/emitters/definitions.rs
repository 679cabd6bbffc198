use iogen_core::parse::schema::SchemaObject;
use minijinja::context;

use super::environment;
use crate::schema::serialize_schema_object;
use crate::serialized::{io_name, serialize_dependencies};

/// Import prefix of definition files as seen from another definition file.
pub const DEFINITIONS_SELF_RELATIVE: &str = "./";

/// Emit `definitions/<name>.ts` exporting the type and its codec.
pub fn emit_definition(name: &str, schema: &SchemaObject) -> Result<String, minijinja::Error> {
    let env = environment()?;
    let tmpl = env.get_template("definition.ts.j2")?;

    let serialized = serialize_schema_object(schema, DEFINITIONS_SELF_RELATIVE, name);
    let imports = serialize_dependencies(&serialized.dependencies);

    tmpl.render(context! {
        name => name,
        io_name => io_name(name),
        imports => imports,
        type_text => serialized.type_,
        io_text => serialized.io,
    })
}

#[cfg(test)]
mod tests {
    use iogen_core::parse::schema::{ArraySchema, ObjectSchema, Schema, StringSchema};

    use super::*;

    #[test]
    fn test_emit_plain_definition() {
        let schema = SchemaObject::inline(Schema::String(StringSchema::default()));
        let content = emit_definition("Name", &schema).unwrap();
        assert_eq!(
            content,
            "import * as t from 'io-ts';\n\nexport type Name = string;\nexport const NameIO = t.string;"
        );
    }

    #[test]
    fn test_emit_definition_with_imports() {
        let schema = SchemaObject::inline(Schema::Object(ObjectSchema {
            properties: Some(
                [("owner".to_string(), SchemaObject::reference("User"))]
                    .into_iter()
                    .collect(),
            ),
            required: None,
            additional_properties: None,
        }));
        let content = emit_definition("Pet", &schema).unwrap();
        assert!(content.contains("import { User, UserIO } from './User';\n"));
        assert!(content.contains("import { Option } from 'fp-ts/lib/Option';\n"));
        assert!(content.contains("import { createOptionFromNullable } from 'io-ts-types';\n"));
        assert!(content.contains("export type Pet = { owner: Option<User> };"));
        assert!(content.contains("export const PetIO = t.type({ owner: createOptionFromNullable(UserIO) });"));
    }

    #[test]
    fn test_emit_recursive_definition() {
        let schema = SchemaObject::inline(Schema::Object(ObjectSchema {
            properties: Some(
                [(
                    "children".to_string(),
                    SchemaObject::inline(Schema::Array(ArraySchema {
                        items: SchemaObject::reference("Tree"),
                    })),
                )]
                .into_iter()
                .collect(),
            ),
            required: Some(vec!["children".to_string()]),
            additional_properties: None,
        }));
        let content = emit_definition("Tree", &schema).unwrap();
        assert!(!content.contains("from './Tree'"));
        assert!(content.contains(
            "export const TreeIO = t.recursion<Tree>('TreeIO', TreeIO => t.type({ children: t.array(TreeIO) }));"
        ));
    }
}
