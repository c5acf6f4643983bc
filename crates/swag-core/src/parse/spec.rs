use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::operation::{Operation, PathItem};
use super::parameter::Parameter;
use super::schema::{DEFINITIONS_PREFIX, Schema};
use crate::error::ResolveError;

/// Info object describing the API.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub version: String,

    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

/// Top-level Swagger 2.0 document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwaggerSpec {
    pub swagger: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<Info>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(rename = "basePath", skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub paths: IndexMap<String, PathItem>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub definitions: IndexMap<String, Schema>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, Parameter>,

    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl SwaggerSpec {
    /// Look up the definition a `$ref` points at. Accepts either the full
    /// `#/definitions/<Name>` fragment or the bare name.
    pub fn definition(&self, reference: &str) -> Result<(&str, &Schema), ResolveError> {
        let name = reference
            .strip_prefix(DEFINITIONS_PREFIX)
            .unwrap_or(reference);
        self.definitions
            .get_key_value(name)
            .map(|(k, v)| (k.as_str(), v))
            .ok_or_else(|| ResolveError::UnknownDefinition(name.to_string()))
    }

    /// Definition names, alphabetical.
    pub fn sorted_definitions(&self) -> Vec<(&str, &Schema)> {
        let mut defs: Vec<(&str, &Schema)> = self
            .definitions
            .iter()
            .map(|(k, v)| (k.as_str(), v))
            .collect();
        defs.sort_by(|a, b| a.0.cmp(b.0));
        defs
    }

    /// Path templates, alphabetical.
    pub fn sorted_paths(&self) -> Vec<(&str, &PathItem)> {
        let mut paths: Vec<(&str, &PathItem)> =
            self.paths.iter().map(|(k, v)| (k.as_str(), v)).collect();
        paths.sort_by(|a, b| a.0.cmp(b.0));
        paths
    }

    /// The `https://<host><basePath>` URL the document describes, if it names a host.
    pub fn default_base_url(&self) -> Option<String> {
        let host = self.host.as_deref().filter(|h| !h.is_empty())?;
        let base_path = self.base_path.as_deref().unwrap_or("");
        Some(format!("https://{host}{base_path}"))
    }

    /// Effective parameters of an operation: path-level parameters first, with
    /// operation-level parameters overriding those of the same name and location.
    pub fn operation_parameters<'a>(
        &'a self,
        item: &'a PathItem,
        op: &'a Operation,
    ) -> Result<Vec<&'a Parameter>, ResolveError> {
        let mut params: Vec<&Parameter> = Vec::new();
        for p in &item.parameters {
            params.push(p.resolve(&self.parameters)?);
        }
        for p in &op.parameters {
            let param = p.resolve(&self.parameters)?;
            match params
                .iter()
                .position(|q| q.name == param.name && q.location == param.location)
            {
                Some(i) => params[i] = param,
                None => params.push(param),
            }
        }
        Ok(params)
    }
}
