use heck::ToLowerCamelCase;
use indexmap::IndexMap;
use iogen_core::parse::operation::PathItem;
use minijinja::context;

use super::environment;
use crate::operation::{CLIENT_MODULE, serialize_path};
use crate::serialized::{Combine, Dependency, SerializedType, serialize_dependencies};

/// Type name of the controller for a tag group, e.g. `Pets` → `PetsController`.
pub fn controller_name(group: &str) -> String {
    format!("{group}Controller")
}

/// Emit `controllers/<Group>Controller.ts`: one object type with a method per
/// operation, and a `Reader` factory building it from an injected `TAPIClient`.
pub fn emit_controller(
    group: &str,
    paths: &IndexMap<String, PathItem>,
    no_jsdoc: bool,
) -> Result<String, minijinja::Error> {
    let env = environment()?;
    let tmpl = env.get_template("controller.ts.j2")?;

    let name = controller_name(group);
    let serialized = SerializedType::fold_all(
        paths
            .iter()
            .map(|(url, item)| serialize_path(url, item, &name, no_jsdoc)),
    );

    let mut dependencies = serialized.dependencies;
    dependencies.push(Dependency::new("asks", "fp-ts/lib/Reader"));
    dependencies.push(Dependency::new("TAPIClient", CLIENT_MODULE));
    let imports = serialize_dependencies(&dependencies);

    tmpl.render(context! {
        name => &name,
        value_name => name.to_lower_camel_case(),
        imports => imports,
        type_text => serialized.type_,
        io_text => serialized.io,
    })
}
