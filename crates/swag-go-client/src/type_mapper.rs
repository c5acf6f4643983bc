use std::fmt;

use swag_core::parse::schema::{Primitive, SchemaType};

/// A Go type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoType {
    String,
    Float64,
    Int64,
    Bool,
    Named(String),
    Slice(Box<GoType>),
    Pointer(Box<GoType>),
}

impl GoType {
    pub fn named(name: impl Into<String>) -> Self {
        GoType::Named(name.into())
    }

    pub fn slice(self) -> Self {
        GoType::Slice(Box::new(self))
    }

    pub fn pointer(self) -> Self {
        GoType::Pointer(Box::new(self))
    }

    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            GoType::String | GoType::Float64 | GoType::Int64 | GoType::Bool
        )
    }
}

impl From<Primitive> for GoType {
    fn from(p: Primitive) -> Self {
        match p {
            Primitive::String => GoType::String,
            Primitive::Number => GoType::Float64,
            Primitive::Integer => GoType::Int64,
            Primitive::Boolean => GoType::Bool,
        }
    }
}

impl fmt::Display for GoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoType::String => f.write_str("string"),
            GoType::Float64 => f.write_str("float64"),
            GoType::Int64 => f.write_str("int64"),
            GoType::Bool => f.write_str("bool"),
            GoType::Named(name) => f.write_str(name),
            GoType::Slice(inner) => write!(f, "[]{inner}"),
            GoType::Pointer(inner) => write!(f, "*{inner}"),
        }
    }
}

/// The primitive a non-body parameter's `type` names, if any.
pub fn parameter_primitive(ty: Option<SchemaType>) -> Option<Primitive> {
    match ty? {
        SchemaType::String => Some(Primitive::String),
        SchemaType::Number => Some(Primitive::Number),
        SchemaType::Integer => Some(Primitive::Integer),
        SchemaType::Boolean => Some(Primitive::Boolean),
        _ => None,
    }
}

/// Lower-case name of a parameter `type`, for error messages.
pub fn type_label(ty: Option<SchemaType>) -> String {
    match ty {
        Some(t) => format!("{t:?}").to_lowercase(),
        None => "none".to_string(),
    }
}
