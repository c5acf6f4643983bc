use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Prefix shared by every local definition reference.
pub const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// A JSON Schema type keyword value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
    File,
}

/// The `type` field can be a single type or an array of types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
    Single(SchemaType),
    Multiple(Vec<SchemaType>),
}

impl TypeSet {
    pub fn contains(&self, ty: SchemaType) -> bool {
        match self {
            TypeSet::Single(t) => *t == ty,
            TypeSet::Multiple(ts) => ts.contains(&ty),
        }
    }
}

/// `items` of an array schema. Only the single-schema form is supported by
/// the extractor and the generators; the tuple form is kept so it round-trips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Items {
    Multiple(Vec<Schema>),
    Single(Box<Schema>),
}

/// A Swagger 2.0 schema object.
///
/// Fields the tools do not interpret are kept in `extra` so a rewritten
/// document keeps the shape of its input.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub ref_path: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<TypeSet>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,

    // Object properties, in document order
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Schema>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    // Array items
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Items>>,

    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

/// A primitive scalar type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    String,
    Number,
    Integer,
    Boolean,
}

/// The capability a schema node offers, resolved from its type set.
#[derive(Debug, Clone, Copy)]
pub enum SchemaKind<'a> {
    /// A reference; the definition name has the `#/definitions/` prefix stripped.
    Ref(&'a str),
    /// An array; `None` when `items` is missing or in tuple form.
    Array(Option<&'a Schema>),
    /// An object; the schema itself carries properties and the required set.
    Object(&'a Schema),
    Primitive(Primitive),
    Unhandled,
}

impl Schema {
    /// A bare `{"$ref": "#/definitions/<name>"}` schema.
    pub fn reference(name: &str) -> Self {
        Self {
            ref_path: Some(format!("{DEFINITIONS_PREFIX}{name}")),
            ..Self::default()
        }
    }

    /// An `object` schema with no properties.
    pub fn object() -> Self {
        Self {
            schema_type: Some(TypeSet::Single(SchemaType::Object)),
            ..Self::default()
        }
    }

    /// Name of the referenced definition, if this is a `$ref` node.
    pub fn ref_name(&self) -> Option<&str> {
        let path = self.ref_path.as_deref().filter(|p| !p.is_empty())?;
        Some(path.strip_prefix(DEFINITIONS_PREFIX).unwrap_or(path))
    }

    pub fn has_type(&self, ty: SchemaType) -> bool {
        self.schema_type.as_ref().is_some_and(|t| t.contains(ty))
    }

    pub fn is_array(&self) -> bool {
        self.ref_name().is_none() && self.has_type(SchemaType::Array)
    }

    /// A schema is an object when it says so, or when it has properties and no type.
    pub fn is_object(&self) -> bool {
        self.ref_name().is_none()
            && (self.has_type(SchemaType::Object)
                || (self.schema_type.is_none() && !self.properties.is_empty()))
    }

    pub fn is_required(&self, property: &str) -> bool {
        self.required.iter().any(|r| r == property)
    }

    pub fn single_items(&self) -> Option<&Schema> {
        match self.items.as_deref() {
            Some(Items::Single(s)) => Some(s),
            _ => None,
        }
    }

    pub fn single_items_mut(&mut self) -> Option<&mut Schema> {
        match self.items.as_deref_mut() {
            Some(Items::Single(s)) => Some(s),
            _ => None,
        }
    }

    /// Classify this node. A reference wins over any local structure.
    pub fn kind(&self) -> SchemaKind<'_> {
        if let Some(name) = self.ref_name() {
            return SchemaKind::Ref(name);
        }
        if self.is_array() {
            return SchemaKind::Array(self.single_items());
        }
        if self.is_object() {
            return SchemaKind::Object(self);
        }
        let primitive = [
            (SchemaType::String, Primitive::String),
            (SchemaType::Number, Primitive::Number),
            (SchemaType::Integer, Primitive::Integer),
            (SchemaType::Boolean, Primitive::Boolean),
        ]
        .into_iter()
        .find(|(ty, _)| self.has_type(*ty));
        match primitive {
            Some((_, p)) => SchemaKind::Primitive(p),
            None => SchemaKind::Unhandled,
        }
    }
}
