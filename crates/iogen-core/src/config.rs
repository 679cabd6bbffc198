use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Top-level project configuration loaded from `.iogen.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IogenConfig {
    pub input: String,
    pub output: String,
    pub output_options: OutputOptions,
    pub client: ClientConfig,
}

impl Default for IogenConfig {
    fn default() -> Self {
        Self {
            input: "swagger.yaml".to_string(),
            output: "src/generated".to_string(),
            output_options: OutputOptions::default(),
            client: ClientConfig::default(),
        }
    }
}

/// Output structure options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// Write a "do not edit" README next to the generated tree.
    pub readme: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self { readme: true }
    }
}

/// Client generation options.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub no_jsdoc: bool,
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".iogen.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<IogenConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let config: IogenConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# iogen configuration
input: swagger.yaml
output: src/generated

output_options:
  readme: true          # write a "do not edit" README into the output directory

client:
  no_jsdoc: false       # skip doc comments on generated controller methods
"#
}
