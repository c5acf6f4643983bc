use thiserror::Error;

use swag_core::error::ResolveError;
use swag_core::parse::operation::HttpMethod;

/// Errors raised while emitting the Go client. Context variants wrap a cause
/// with the definition, operation, response, parameter or property it was
/// found in, outermost first.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("arrays of arrays are not supported")]
    UnsupportedArrayOfArray,

    #[error("malformed array: items must be a single schema")]
    MalformedArray,

    #[error("unhandled schema type")]
    UnhandledType,

    #[error("unhandled path parameter type {0}")]
    UnhandledPathType(String),

    #[error("unhandled query parameter type {0}")]
    UnhandledQueryType(String),

    #[error("unhandled parameter location {0}")]
    UnhandledParamLocation(String),

    #[error("body parameter is not an object")]
    BodyNotObject,

    #[error("more than one body parameter")]
    MultipleBodies,

    #[error("{0} is declared twice")]
    DuplicateDeclaration(String),

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("definition {name}")]
    InDefinition {
        name: String,
        #[source]
        source: Box<GenerateError>,
    },

    #[error("{method} {path}")]
    InOperation {
        method: HttpMethod,
        path: String,
        #[source]
        source: Box<GenerateError>,
    },

    #[error("response {code}")]
    InResponse {
        code: u16,
        #[source]
        source: Box<GenerateError>,
    },

    #[error("parameter {name}")]
    InParameter {
        name: String,
        #[source]
        source: Box<GenerateError>,
    },

    #[error("property {name}")]
    InProperty {
        name: String,
        #[source]
        source: Box<GenerateError>,
    },
}

impl GenerateError {
    pub fn in_definition(self, name: &str) -> Self {
        Self::InDefinition {
            name: name.to_string(),
            source: Box::new(self),
        }
    }

    pub fn in_operation(self, method: HttpMethod, path: &str) -> Self {
        Self::InOperation {
            method,
            path: path.to_string(),
            source: Box::new(self),
        }
    }

    pub fn in_response(self, code: u16) -> Self {
        Self::InResponse {
            code,
            source: Box::new(self),
        }
    }

    pub fn in_parameter(self, name: &str) -> Self {
        Self::InParameter {
            name: name.to_string(),
            source: Box::new(self),
        }
    }

    pub fn in_property(self, name: &str) -> Self {
        Self::InProperty {
            name: name.to_string(),
            source: Box::new(self),
        }
    }

    /// The innermost error, past every context wrapper.
    pub fn root_cause(&self) -> &GenerateError {
        match self {
            Self::InDefinition { source, .. }
            | Self::InOperation { source, .. }
            | Self::InResponse { source, .. }
            | Self::InParameter { source, .. }
            | Self::InProperty { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Every context layer and the cause, joined the way `anyhow` prints a chain.
    pub fn chain(&self) -> String {
        match self {
            Self::InDefinition { source, .. }
            | Self::InOperation { source, .. }
            | Self::InResponse { source, .. }
            | Self::InParameter { source, .. }
            | Self::InProperty { source, .. } => format!("{self}: {}", source.chain()),
            other => other.to_string(),
        }
    }
}
