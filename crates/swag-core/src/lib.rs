pub mod config;
pub mod error;
pub mod parse;
pub mod transform;

use parse::spec::SwaggerSpec;

/// A generated file with path and content.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Trait for code generators that produce files from a parsed Swagger document.
///
/// Generators treat the document as read-only; rewriting happens beforehand in
/// [`transform::extract`].
pub trait CodeGenerator {
    type Config;
    type Error: std::error::Error;
    fn generate(
        &self,
        spec: &SwaggerSpec,
        config: &Self::Config,
    ) -> Result<Vec<GeneratedFile>, Self::Error>;
}
