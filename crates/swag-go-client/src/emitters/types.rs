//! Named types: one per definition, synthetic types for nested objects and
//! array elements, and the request and response bodies of operations.

use minijinja::context;
use serde::Serialize;

use swag_core::parse::schema::{Schema, SchemaKind};
use swag_core::transform::name_normalizer::{array_item_type_name, nested_type_name, snake_to_camel};

use super::{Emitter, field_name};
use crate::error::GenerateError;
use crate::type_mapper::GoType;

#[derive(Debug, Serialize)]
struct FieldContext {
    name: String,
    go_type: String,
    json_tag: String,
    tfsdk_tag: String,
}

/// A struct field before column alignment.
struct Field<'s> {
    name: String,
    go_type: GoType,
    property: &'s str,
    required: bool,
}

impl<'a> Emitter<'a> {
    /// Emit the type for definition `name`.
    pub fn emit_definition(&mut self, name: &str, schema: &'a Schema) -> Result<(), GenerateError> {
        self.emit_named(&snake_to_camel(name), schema)
    }

    /// Emit a top-level type called `name` for `schema`: a struct for an
    /// object, an alias for a reference, a named slice for an array and a
    /// named primitive otherwise. An untyped schema without properties
    /// becomes an empty struct.
    pub(crate) fn emit_named(&mut self, name: &str, schema: &'a Schema) -> Result<(), GenerateError> {
        if self.file.contains(name) {
            return Err(GenerateError::DuplicateDeclaration(name.to_string()));
        }
        let description = schema.description.as_deref();
        match schema.kind() {
            SchemaKind::Object(object) => self.emit_struct(name, object, false),
            SchemaKind::Ref(reference) => {
                let target = GoType::named(self.definition_type(reference)?);
                self.push_named(name, description, &target, true)
            }
            SchemaKind::Array(items) => {
                let element = self.element_type(format!("{name}Item"), items)?;
                self.push_named(name, description, &element.slice(), false)
            }
            SchemaKind::Primitive(p) => self.push_named(name, description, &GoType::from(p), false),
            SchemaKind::Unhandled if schema.schema_type.is_none() => {
                self.push_struct(name, description, false, Vec::new())
            }
            SchemaKind::Unhandled => Err(GenerateError::UnhandledType),
        }
    }

    /// Emit a struct mirroring the properties of an object schema, in order.
    /// Types needed by the fields are declared before the struct itself.
    pub(crate) fn emit_struct(
        &mut self,
        name: &str,
        schema: &'a Schema,
        embeds_error: bool,
    ) -> Result<(), GenerateError> {
        if self.file.contains(name) {
            return Err(GenerateError::DuplicateDeclaration(name.to_string()));
        }
        let mut fields = Vec::with_capacity(schema.properties.len());
        for (property, property_schema) in &schema.properties {
            let required = schema.is_required(property);
            let go_type = self
                .field_type(name, property, property_schema, required)
                .map_err(|e| e.in_property(property))?;
            fields.push(Field {
                name: field_name(property),
                go_type,
                property,
                required,
            });
        }
        self.push_struct(name, schema.description.as_deref(), embeds_error, fields)
    }

    /// Emit the type of a failure response: a struct that embeds
    /// `*ErrorResponse`. A reference or a missing schema yields the bare
    /// embedding.
    pub(crate) fn emit_error_type(
        &mut self,
        name: &str,
        schema: Option<&'a Schema>,
    ) -> Result<(), GenerateError> {
        match schema.map(|s| s.kind()) {
            None | Some(SchemaKind::Ref(_)) => self.push_struct(name, None, true, Vec::new()),
            Some(SchemaKind::Object(object)) => self.emit_struct(name, object, true),
            Some(_) => Err(GenerateError::UnhandledType),
        }
    }

    /// Emit the type of a success response; no schema means an empty struct.
    pub(crate) fn emit_success_type(
        &mut self,
        name: &str,
        schema: Option<&'a Schema>,
    ) -> Result<(), GenerateError> {
        match schema {
            Some(schema) => self.emit_named(name, schema),
            None => self.push_struct(name, None, false, Vec::new()),
        }
    }

    /// Go type name of a referenced definition, which must exist.
    pub(crate) fn definition_type(&self, reference: &str) -> Result<String, GenerateError> {
        let (name, _) = self.spec.definition(reference)?;
        Ok(snake_to_camel(name))
    }

    fn field_type(
        &mut self,
        parent: &str,
        property: &str,
        schema: &'a Schema,
        required: bool,
    ) -> Result<GoType, GenerateError> {
        let optional = |t: GoType| if required { t } else { t.pointer() };
        match schema.kind() {
            SchemaKind::Ref(reference) => {
                Ok(optional(GoType::named(self.definition_type(reference)?)))
            }
            SchemaKind::Primitive(p) => Ok(optional(GoType::from(p))),
            SchemaKind::Object(object) => {
                let nested = nested_type_name(parent, property);
                self.emit_struct(&nested, object, false)?;
                Ok(optional(GoType::Named(nested)))
            }
            SchemaKind::Array(items) => {
                let element = self.element_type(array_item_type_name(parent, property), items)?;
                // A slice of structs is already nil-able.
                if element.is_primitive() {
                    Ok(optional(element.slice()))
                } else {
                    Ok(element.slice())
                }
            }
            SchemaKind::Unhandled => Err(GenerateError::UnhandledType),
        }
    }

    fn element_type(
        &mut self,
        item_name: String,
        items: Option<&'a Schema>,
    ) -> Result<GoType, GenerateError> {
        let items = items.ok_or(GenerateError::MalformedArray)?;
        match items.kind() {
            SchemaKind::Primitive(p) => Ok(GoType::from(p)),
            SchemaKind::Object(object) => {
                self.emit_struct(&item_name, object, false)?;
                Ok(GoType::Named(item_name))
            }
            SchemaKind::Ref(reference) => Ok(GoType::named(self.definition_type(reference)?)),
            SchemaKind::Array(_) => Err(GenerateError::UnsupportedArrayOfArray),
            SchemaKind::Unhandled => Err(GenerateError::UnhandledType),
        }
    }

    fn push_struct(
        &mut self,
        name: &str,
        description: Option<&str>,
        embeds_error: bool,
        fields: Vec<Field<'_>>,
    ) -> Result<(), GenerateError> {
        let name_width = fields.iter().map(|f| f.name.len()).max().unwrap_or(0);
        let rendered: Vec<(String, String)> = fields
            .iter()
            .map(|f| (f.name.clone(), f.go_type.to_string()))
            .collect();
        let type_width = rendered.iter().map(|(_, t)| t.len()).max().unwrap_or(0);
        let fields: Vec<FieldContext> = fields
            .iter()
            .zip(rendered)
            .map(|(f, (field, go_type))| FieldContext {
                name: format!("{field:<name_width$}"),
                go_type: format!("{go_type:<type_width$}"),
                json_tag: if f.required {
                    f.property.to_string()
                } else {
                    format!("{},omitempty", f.property)
                },
                tfsdk_tag: f.property.to_string(),
            })
            .collect();
        let code = self.render(
            "struct.go.j2",
            context! {
                name => name,
                description => description,
                embeds_error => embeds_error,
                fields => fields,
            },
        )?;
        self.file.push(name, code)
    }

    fn push_named(
        &mut self,
        name: &str,
        description: Option<&str>,
        target: &GoType,
        alias: bool,
    ) -> Result<(), GenerateError> {
        let code = self.render(
            "named.go.j2",
            context! {
                name => name,
                description => description,
                target => target.to_string(),
                alias => alias,
            },
        )?;
        self.file.push(name, code)
    }
}
