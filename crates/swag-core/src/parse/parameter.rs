use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::schema::{Schema, SchemaType};
use crate::error::ResolveError;

/// Prefix shared by every local parameter reference.
pub const PARAMETERS_PREFIX: &str = "#/parameters/";

/// Parameter location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Body,
    FormData,
}

impl ParameterLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Body => "body",
            ParameterLocation::FormData => "formData",
        }
    }
}

/// An API parameter. Non-body parameters carry a primitive `type`; body
/// parameters carry a `schema`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "in")]
    pub location: ParameterLocation,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub param_type: Option<SchemaType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,

    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl Parameter {
    /// Path parameters are required whatever the document says.
    pub fn is_required(&self) -> bool {
        self.required || self.location == ParameterLocation::Path
    }
}

/// A reference or inline parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Parameter(Box<Parameter>),
}

impl ParameterOrRef {
    /// Resolve against the document's top-level `parameters` map.
    pub fn resolve<'a>(
        &'a self,
        shared: &'a IndexMap<String, Parameter>,
    ) -> Result<&'a Parameter, ResolveError> {
        match self {
            ParameterOrRef::Parameter(p) => Ok(p),
            ParameterOrRef::Ref { ref_path } => {
                let name = ref_path
                    .strip_prefix(PARAMETERS_PREFIX)
                    .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.clone()))?;
                shared
                    .get(name)
                    .ok_or_else(|| ResolveError::UnknownParameter(name.to_string()))
            }
        }
    }
}
