use thiserror::Error;

use crate::parse::operation::HttpMethod;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid spec document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid spec document: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("unsupported Swagger version: {0}")]
    UnsupportedVersion(String),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no such property: {0}")]
    NoSuchProperty(String),

    #[error("malformed array under {0:?}: items must be a single schema")]
    MalformedArray(String),

    #[error("unknown definition: {0}")]
    UnknownDefinition(String),

    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("invalid reference format: {0}")]
    InvalidRefFormat(String),
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unknown path {path}")]
    UnknownPath { path: String },

    #[error("no {method} operation on {path}")]
    NoOperationForMethod { path: String, method: HttpMethod },

    #[error("{method} {path}: no response with status code {code}")]
    NoSuchResponseCode {
        path: String,
        method: HttpMethod,
        code: u16,
    },

    #[error("{method} {path}: response {code} has no schema")]
    ResponseHasNoSchema {
        path: String,
        method: HttpMethod,
        code: u16,
    },

    #[error("{method} {path}: response {code}: property {prop:?}")]
    Property {
        path: String,
        method: HttpMethod,
        code: u16,
        prop: String,
        #[source]
        source: ResolveError,
    },

    #[error("conflicting redefinition of {name}:\n{diff}")]
    ConflictingRedefinition { name: String, diff: String },

    #[error("failed to canonicalise schema: {0}")]
    Canonicalize(#[from] serde_json::Error),
}
