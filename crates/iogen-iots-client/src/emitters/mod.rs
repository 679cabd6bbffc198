pub mod client;
pub mod controllers;
pub mod definitions;

use minijinja::{AutoEscape, Environment};

/// Template environment holding every file template of the client.
pub(crate) fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.add_template(
        "definition.ts.j2",
        include_str!("../../templates/definition.ts.j2"),
    )?;
    env.add_template(
        "controller.ts.j2",
        include_str!("../../templates/controller.ts.j2"),
    )?;
    Ok(env)
}
