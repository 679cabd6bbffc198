pub mod config;
pub mod error;
pub mod grouping;
pub mod output;
pub mod parse;

pub use error::{ConfigError, GeneratorError, ParseError};

/// A generated file with path and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Trait for code generators that produce files from a parsed Swagger document.
pub trait CodeGenerator {
    type Config;
    type Error: std::error::Error;
    fn generate(
        &self,
        spec: &parse::spec::SwaggerSpec,
        config: &Self::Config,
    ) -> Result<Vec<GeneratedFile>, Self::Error>;
}
