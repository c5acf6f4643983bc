//! Factors inline response schemas into named definitions.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::canonical::{canonical_json, unified_diff};
use super::schema_path::{resolve, split_steps};
use crate::error::{ExtractError, ParseError, ResolveError};
use crate::parse::operation::HttpMethod;
use crate::parse::schema::Schema;
use crate::parse::spec::SwaggerSpec;

/// The extractor's rules document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractConfig {
    #[serde(default)]
    pub extractions: Vec<ExtractRule>,
}

impl ExtractConfig {
    pub fn from_json(input: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(input)?)
    }
}

/// Move the schema at `(path, method, responses, prop)` into `definitions[become_ref]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractRule {
    pub path: String,
    pub method: HttpMethod,
    /// Response status code.
    pub responses: u16,
    /// Dotted property path below the response schema; empty for the schema itself.
    #[serde(default)]
    pub prop: String,
    pub become_ref: String,
}

/// What a rule did to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractOutcome {
    /// A new definition was added.
    Inserted,
    /// An identical definition already existed; only the `$ref` was written.
    Reused,
    /// The located schema already referenced the target definition.
    AlreadyReferenced,
}

/// Apply every rule in order, stopping at the first failure.
pub fn extract(spec: &mut SwaggerSpec, rules: &[ExtractRule]) -> Result<(), ExtractError> {
    for rule in rules {
        let outcome = apply_rule(spec, rule)?;
        log::debug!(
            "{} {} {} {:?} -> {}: {:?}",
            rule.method,
            rule.path,
            rule.responses,
            rule.prop,
            rule.become_ref,
            outcome
        );
    }
    log::info!(
        "applied {} extraction rules, {} definitions",
        rules.len(),
        spec.definitions.len()
    );
    Ok(())
}

/// Apply one rule.
///
/// A property path that runs into a `$ref` continues inside the referenced
/// definition, so a rule stays valid after an enclosing schema has itself
/// been extracted. The referenced definition is edited in place, so every
/// schema sharing it sees the new reference.
pub fn apply_rule(
    spec: &mut SwaggerSpec,
    rule: &ExtractRule,
) -> Result<ExtractOutcome, ExtractError> {
    let steps = split_steps(&rule.prop);
    let existing = spec
        .definitions
        .get(&rule.become_ref)
        .map(canonical_json)
        .transpose()?;

    // Find the schema the remaining steps start from.
    let mut origin: Option<String> = None;
    let mut offset = 0;
    let mut seen = HashSet::new();
    loop {
        let schema: &Schema = match &origin {
            None => response_schema(spec, rule)?,
            Some(name) => definition(spec, rule, name)?,
        };
        let Some((name, skipped)) = ref_hop(schema, &steps[offset..]) else {
            break;
        };
        if !seen.insert((name.clone(), offset + skipped)) {
            break;
        }
        log::debug!("{} {}: following $ref to {name}", rule.method, rule.path);
        origin = Some(name);
        offset += skipped;
    }

    let root = match &origin {
        None => response_schema(spec, rule)?,
        Some(name) => definition(spec, rule, name)?,
    };
    let target = resolve(root, &steps[offset..]).map_err(|source| property_error(rule, source))?;

    if target.schema().ref_name() == Some(rule.become_ref.as_str()) {
        return Ok(ExtractOutcome::AlreadyReferenced);
    }

    let outcome = match existing {
        Some(old) => {
            let new = canonical_json(target.schema())?;
            if old != new {
                return Err(ExtractError::ConflictingRedefinition {
                    name: rule.become_ref.clone(),
                    diff: unified_diff(&old, &new, "existing", "extracted"),
                });
            }
            ExtractOutcome::Reused
        }
        None => ExtractOutcome::Inserted,
    };

    let extracted = target.replace(Schema::reference(&rule.become_ref));
    if outcome == ExtractOutcome::Inserted {
        spec.definitions.insert(rule.become_ref.clone(), extracted);
    }
    Ok(outcome)
}

/// The response schema a rule addresses.
fn response_schema<'a>(
    spec: &'a mut SwaggerSpec,
    rule: &ExtractRule,
) -> Result<&'a mut Schema, ExtractError> {
    let item = spec
        .paths
        .get_mut(&rule.path)
        .ok_or_else(|| ExtractError::UnknownPath {
            path: rule.path.clone(),
        })?;
    let op = item
        .operation_mut(rule.method)
        .ok_or_else(|| ExtractError::NoOperationForMethod {
            path: rule.path.clone(),
            method: rule.method,
        })?;
    let response = op
        .response_mut(rule.responses)
        .ok_or_else(|| ExtractError::NoSuchResponseCode {
            path: rule.path.clone(),
            method: rule.method,
            code: rule.responses,
        })?;
    response
        .schema
        .as_mut()
        .ok_or_else(|| ExtractError::ResponseHasNoSchema {
            path: rule.path.clone(),
            method: rule.method,
            code: rule.responses,
        })
}

fn definition<'a>(
    spec: &'a mut SwaggerSpec,
    rule: &ExtractRule,
    name: &str,
) -> Result<&'a mut Schema, ExtractError> {
    spec.definitions
        .get_mut(name)
        .ok_or_else(|| property_error(rule, ResolveError::UnknownDefinition(name.to_string())))
}

fn property_error(rule: &ExtractRule, source: ResolveError) -> ExtractError {
    ExtractError::Property {
        path: rule.path.clone(),
        method: rule.method,
        code: rule.responses,
        prop: rule.prop.clone(),
        source,
    }
}

/// Walk `steps` without mutating; if a `$ref` is met while steps remain,
/// return the definition name and how many steps were consumed before it.
fn ref_hop(root: &Schema, steps: &[&str]) -> Option<(String, usize)> {
    let mut node = root;
    for (i, step) in steps.iter().enumerate() {
        while node.is_array() {
            node = node.single_items()?;
        }
        if let Some(name) = node.ref_name() {
            return Some((name.to_string(), i));
        }
        node = node.properties.get(*step)?;
    }
    None
}
