use swag_core::config::ClientConfig;
use swag_core::parse::spec::SwaggerSpec;
use swag_core::{CodeGenerator, GeneratedFile};

use crate::emitters::Emitter;
use crate::error::GenerateError;

/// Name of the single file the generator produces.
pub const CLIENT_FILE: &str = "client.go";

/// Go client generator.
pub struct GoClientGenerator;

impl CodeGenerator for GoClientGenerator {
    type Config = ClientConfig;
    type Error = GenerateError;

    fn generate(
        &self,
        spec: &SwaggerSpec,
        config: &ClientConfig,
    ) -> Result<Vec<GeneratedFile>, GenerateError> {
        Ok(vec![GeneratedFile {
            path: CLIENT_FILE.to_string(),
            content: emit_client(spec, config)?,
        }])
    }
}

/// Emit the whole client: the surface, one type per definition in
/// alphabetical order, then every operation by path and verb.
pub fn emit_client(spec: &SwaggerSpec, config: &ClientConfig) -> Result<String, GenerateError> {
    let mut emitter = Emitter::new(spec, config)?;
    emitter.emit_surface()?;

    for (name, schema) in spec.sorted_definitions() {
        emitter
            .emit_definition(name, schema)
            .map_err(|e| e.in_definition(name))?;
    }

    let mut operations = 0;
    for (path, item) in spec.sorted_paths() {
        for (method, operation) in item.operations() {
            emitter
                .emit_operation(path, method, item, operation)
                .map_err(|e| e.in_operation(method, path))?;
            operations += 1;
        }
    }
    log::info!(
        "generated {} definitions and {operations} operations",
        spec.definitions.len()
    );

    emitter.finish()
}
