use iogen_core::grouping::group_paths_by_tag;
use iogen_core::parse::spec::SwaggerSpec;
use iogen_core::{CodeGenerator, GeneratedFile, GeneratorError};

use crate::emitters;
use crate::emitters::controllers::controller_name;

/// Options for the io-ts client generator.
#[derive(Debug, Clone, Default)]
pub struct IotsClientConfig {
    pub no_jsdoc: bool,
}

/// Generates an io-ts typed client: one boilerplate client module, one file per
/// definition and one controller per tag group.
pub struct IotsClientGenerator;

impl CodeGenerator for IotsClientGenerator {
    type Config = IotsClientConfig;
    type Error = GeneratorError;

    fn generate(
        &self,
        spec: &SwaggerSpec,
        config: &IotsClientConfig,
    ) -> Result<Vec<GeneratedFile>, GeneratorError> {
        let mut files = vec![GeneratedFile {
            path: "client/client.ts".to_string(),
            content: emitters::client::emit_client().to_string(),
        }];

        if let Some(definitions) = &spec.definitions {
            for (name, schema) in definitions {
                if !is_file_safe(name) {
                    return Err(GeneratorError::InvalidDefinitionName(name.clone()));
                }
                log::debug!("compiling definition {name}");
                let content = emitters::definitions::emit_definition(name, schema)
                    .map_err(|e| GeneratorError::Template(e.to_string()))?;
                files.push(GeneratedFile {
                    path: format!("definitions/{name}.ts"),
                    content,
                });
            }
        }

        for (group, paths) in group_paths_by_tag(&spec.paths) {
            let name = controller_name(&group);
            log::debug!("compiling {name} ({} paths)", paths.len());
            let content = emitters::controllers::emit_controller(&group, &paths, config.no_jsdoc)
                .map_err(|e| GeneratorError::Template(e.to_string()))?;
            files.push(GeneratedFile {
                path: format!("controllers/{name}.ts"),
                content,
            });
        }

        Ok(files)
    }
}

/// Definition names become file names, so they must stay a single path segment.
fn is_file_safe(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\']) && !name.contains("..")
}
