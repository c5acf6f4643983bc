//! One method on `Client` per (path, verb), preceded by the request and
//! response types it needs.

use minijinja::context;
use serde::Serialize;

use swag_core::parse::operation::{HttpMethod, Operation, PathItem};
use swag_core::parse::parameter::{Parameter, ParameterLocation};
use swag_core::parse::response::is_success;
use swag_core::parse::schema::{Primitive, SchemaType};
use swag_core::transform::name_normalizer::{lower_snake_to_camel, operation_name};
use swag_core::transform::path_template::{PathTemplate, Piece};

use super::{Emitter, go_ident, go_string_literal};
use crate::error::GenerateError;
use crate::type_mapper::{GoType, parameter_primitive, type_label};

#[derive(Debug, Serialize)]
struct QueryContext {
    key: String,
    ident: String,
    optional: bool,
    value: String,
}

#[derive(Debug, Serialize)]
struct ArmContext {
    code: u16,
    var: String,
    type_name: String,
    success: bool,
}

impl<'a> Emitter<'a> {
    pub fn emit_operation(
        &mut self,
        path: &str,
        method: HttpMethod,
        item: &'a PathItem,
        operation: &'a Operation,
    ) -> Result<(), GenerateError> {
        let spec = self.spec;
        let name = operation_name(operation.operation_id.as_deref(), method.as_str(), path);
        log::debug!("emitting {method} {path} as {name}");

        let mut path_params: Vec<&Parameter> = Vec::new();
        let mut query_params: Vec<&Parameter> = Vec::new();
        let mut body: Option<&'a Parameter> = None;
        for param in spec.operation_parameters(item, operation)? {
            match param.location {
                ParameterLocation::Path => path_params.push(param),
                ParameterLocation::Query => query_params.push(param),
                ParameterLocation::Body => {
                    if body.replace(param).is_some() {
                        return Err(GenerateError::MultipleBodies);
                    }
                }
                other => {
                    return Err(GenerateError::UnhandledParamLocation(other.as_str().to_string())
                        .in_parameter(&param.name));
                }
            }
        }

        for import in ["context", "encoding/json", "errors", "fmt", "io", "net/http"] {
            self.file.import(import);
        }

        let mut args = vec!["ctx context.Context".to_string()];

        let names: Vec<&str> = path_params.iter().map(|p| p.name.as_str()).collect();
        let template = PathTemplate::interpolate(path, &names);
        for unplaced in template.unplaced() {
            log::warn!("{method} {path}: path parameter {unplaced} is not in the path, dropping it");
        }
        let mut url_parts = Vec::new();
        for piece in template.pieces() {
            match piece {
                Piece::Literal(text) => url_parts.push(go_string_literal(text)),
                Piece::Variable(var) => {
                    let Some(param) = path_params.iter().find(|p| p.name == *var) else {
                        continue;
                    };
                    let ident = go_ident(&lower_snake_to_camel(&param.name));
                    let (go_type, expr) = self
                        .path_argument(param, &ident)
                        .map_err(|e| e.in_parameter(&param.name))?;
                    args.push(format!("{ident} {go_type}"));
                    url_parts.push(expr);
                }
            }
        }
        let url_expr = if url_parts.is_empty() {
            "\"\"".to_string()
        } else {
            url_parts.join(" + ")
        };

        if let Some(param) = body {
            let go_type = self
                .body_type(&name, param)
                .map_err(|e| e.in_parameter(&param.name))?;
            args.push(format!("req {go_type}"));
            self.file.import("bytes");
        }

        let mut query = Vec::with_capacity(query_params.len());
        for param in query_params {
            let ident = go_ident(&lower_snake_to_camel(&param.name));
            let optional = !param.is_required();
            let (go_type, value) = self
                .query_argument(param, &ident, optional)
                .map_err(|e| e.in_parameter(&param.name))?;
            let go_type = if optional { go_type.pointer() } else { go_type };
            args.push(format!("{ident} {go_type}"));
            query.push(QueryContext {
                key: go_string_literal(&param.name),
                ident,
                optional,
                value,
            });
        }

        let codes = operation.status_codes();
        let success_count = codes.iter().filter(|(code, _)| is_success(*code)).count();
        let mut arms = Vec::with_capacity(codes.len());
        let mut results = Vec::new();
        for (code, response) in codes {
            let success = is_success(code);
            let type_name = if success && success_count == 1 {
                format!("{name}Res")
            } else {
                format!("{name}Res{code}")
            };
            let schema = response.schema.as_ref();
            let emitted = if success {
                self.emit_success_type(&type_name, schema)
            } else {
                self.emit_error_type(&type_name, schema)
            };
            emitted.map_err(|e| e.in_response(code))?;

            let var = format!("res{code}");
            if success {
                results.push((var.clone(), type_name.clone()));
            }
            arms.push(ArmContext {
                code,
                var,
                type_name,
                success,
            });
        }

        let nils = "nil, ".repeat(results.len());
        let final_return: Vec<&str> = results
            .iter()
            .map(|(var, _)| var.as_str())
            .chain(["err"])
            .collect();
        let results: Vec<String> = results
            .iter()
            .map(|(var, type_name)| format!("{var} *{type_name}"))
            .chain(["err error".to_string()])
            .collect();

        let code = self.render(
            "method.go.j2",
            context! {
                name => &name,
                description => operation.summary.as_deref().or(operation.description.as_deref()),
                deprecated => operation.deprecated.unwrap_or(false),
                http_method => method.as_str(),
                params => args.join(", "),
                results => results.join(", "),
                url_expr => url_expr,
                query => query,
                body => body.is_some(),
                cases => arms,
                error_return => format!("{nils}err"),
                final_return => final_return.join(", "),
            },
        )?;
        self.file.push(&name, code)
    }

    fn path_argument(
        &mut self,
        param: &Parameter,
        ident: &str,
    ) -> Result<(GoType, String), GenerateError> {
        match parameter_primitive(param.param_type) {
            Some(Primitive::String) => Ok((GoType::String, ident.to_string())),
            Some(Primitive::Number) => {
                self.file.import("strconv");
                Ok((
                    GoType::Float64,
                    format!("strconv.FormatFloat({ident}, 'f', -1, 64)"),
                ))
            }
            Some(Primitive::Integer) => {
                self.file.import("strconv");
                Ok((GoType::Int64, format!("strconv.FormatInt({ident}, 10)")))
            }
            _ => Err(GenerateError::UnhandledPathType(type_label(param.param_type))),
        }
    }

    /// Argument type and the string expression `q.Set` receives. Numbers go
    /// through a base-10 integer conversion.
    fn query_argument(
        &mut self,
        param: &Parameter,
        ident: &str,
        optional: bool,
    ) -> Result<(GoType, String), GenerateError> {
        let operand = if optional {
            format!("*{ident}")
        } else {
            ident.to_string()
        };
        let primitive = parameter_primitive(param.param_type)
            .ok_or_else(|| GenerateError::UnhandledQueryType(type_label(param.param_type)))?;
        if primitive != Primitive::String {
            self.file.import("strconv");
        }
        Ok(match primitive {
            Primitive::String => (GoType::String, operand),
            Primitive::Number => (
                GoType::Float64,
                format!("strconv.FormatInt(int64({operand}), 10)"),
            ),
            Primitive::Integer => (GoType::Int64, format!("strconv.FormatInt({operand}, 10)")),
            Primitive::Boolean => (GoType::Bool, format!("strconv.FormatBool({operand})")),
        })
    }

    /// A referenced body is passed as a pointer to the definition's type; an
    /// inline object gets its own `<Op>Req` struct.
    fn body_type(&mut self, operation: &str, param: &'a Parameter) -> Result<GoType, GenerateError> {
        let schema = param.schema.as_ref().ok_or(GenerateError::BodyNotObject)?;
        if let Some(reference) = schema.ref_name() {
            return Ok(GoType::named(self.definition_type(reference)?).pointer());
        }
        if !schema.has_type(SchemaType::Object) && schema.properties.is_empty() {
            return Err(GenerateError::BodyNotObject);
        }
        let req = format!("{operation}Req");
        self.emit_struct(&req, schema, false)?;
        Ok(GoType::Named(req).pointer())
    }
}
