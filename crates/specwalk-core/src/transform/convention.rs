use std::fmt;

use serde::Deserialize;

use super::naming::exported_name;
use crate::model::{PerConvention, TypeExpr};

/// Scalar kinds the type mapper asks a convention to spell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive<'a> {
    String,
    Timestamp,
    Password,
    /// An integer with its declared `format`, possibly empty.
    Integer(&'a str),
    Float,
    Double,
    Boolean,
    /// Free-form key/value map.
    Map,
    /// Pre-serialized content whose decoding is delayed.
    Raw,
    Any,
}

/// One target naming and typing convention.
///
/// The type mapper and the resolvers share all resolution logic; a convention only decides
/// how identifiers and type expressions are spelled.
pub trait Convention: fmt::Debug + Send + Sync {
    /// Key under which this convention's values are stored in the model.
    fn id(&self) -> &'static str;

    fn api_name(&self, title: &str) -> String;

    fn method_name(&self, operation_id: &str) -> String;

    /// Identifier for a field, parameter or discriminator property.
    fn field_name(&self, api_name: &str) -> String;

    fn schema_name(&self, name: &str) -> String {
        name.to_string()
    }

    /// Identifier for an enumeration value lacking an explicit one.
    fn const_value_name(&self, const_name: &str, value: &str) -> String;

    fn primitive(&self, primitive: Primitive<'_>) -> TypeExpr;

    fn nullable(&self, expr: &str) -> String;

    fn array(&self, item: &str) -> String;

    /// Qualify a type defined in another document.
    fn qualify(&self, _namespace: &str, name: &str) -> String {
        name.to_string()
    }
}

/// Statically-typed server convention (Go).
#[derive(Debug, Clone, Copy, Default)]
pub struct GoConvention;

impl Convention for GoConvention {
    fn id(&self) -> &'static str {
        "go"
    }

    fn api_name(&self, title: &str) -> String {
        title.replace(' ', "")
    }

    fn method_name(&self, operation_id: &str) -> String {
        exported_name(operation_id)
    }

    fn field_name(&self, api_name: &str) -> String {
        exported_name(api_name)
    }

    fn const_value_name(&self, const_name: &str, value: &str) -> String {
        format!("{const_name}{}", exported_name(value))
    }

    fn primitive(&self, primitive: Primitive<'_>) -> TypeExpr {
        match primitive {
            Primitive::String => TypeExpr::scalar("string"),
            Primitive::Timestamp => TypeExpr::scalar("time.Time"),
            Primitive::Password => TypeExpr::array("[]byte", "byte"),
            Primitive::Integer("") => TypeExpr::scalar("int64"),
            Primitive::Integer(format) => TypeExpr::scalar(format),
            Primitive::Float => TypeExpr::scalar("float32"),
            Primitive::Double => TypeExpr::scalar("float64"),
            Primitive::Boolean => TypeExpr::scalar("bool"),
            Primitive::Map => TypeExpr::scalar("map[string]interface{}"),
            Primitive::Raw => TypeExpr::scalar("json.RawMessage"),
            Primitive::Any => TypeExpr::scalar("interface{}"),
        }
    }

    fn nullable(&self, expr: &str) -> String {
        format!("*{expr}")
    }

    fn array(&self, item: &str) -> String {
        format!("[]{item}")
    }

    fn qualify(&self, namespace: &str, name: &str) -> String {
        format!("{namespace}.{name}")
    }
}

/// Weakly-typed client convention (JavaScript with Flow-style annotations).
#[derive(Debug, Clone, Copy, Default)]
pub struct JsConvention;

impl Convention for JsConvention {
    fn id(&self) -> &'static str {
        "js"
    }

    fn api_name(&self, title: &str) -> String {
        title.replace(' ', "").to_lowercase()
    }

    fn method_name(&self, operation_id: &str) -> String {
        operation_id.replace('-', "_")
    }

    fn field_name(&self, api_name: &str) -> String {
        api_name.to_string()
    }

    fn const_value_name(&self, _const_name: &str, value: &str) -> String {
        value.to_uppercase().replace(' ', "_").replace('-', "")
    }

    fn primitive(&self, primitive: Primitive<'_>) -> TypeExpr {
        match primitive {
            Primitive::String | Primitive::Password => TypeExpr::scalar("string"),
            Primitive::Timestamp => TypeExpr::scalar("Date"),
            Primitive::Integer(_) | Primitive::Float | Primitive::Double => {
                TypeExpr::scalar("number")
            }
            Primitive::Boolean => TypeExpr::scalar("boolean"),
            Primitive::Map | Primitive::Raw | Primitive::Any => TypeExpr::scalar("any"),
        }
    }

    fn nullable(&self, expr: &str) -> String {
        format!("?{expr}")
    }

    fn array(&self, item: &str) -> String {
        format!("Array<{item}>")
    }
}

/// Identifiers of the built-in conventions, as used in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConventionId {
    Go,
    Js,
}

impl ConventionId {
    pub fn convention(self) -> Box<dyn Convention> {
        match self {
            ConventionId::Go => Box::new(GoConvention),
            ConventionId::Js => Box::new(JsConvention),
        }
    }
}

/// The ordered table of conventions every name and type is computed for.
#[derive(Debug)]
pub struct Conventions {
    table: Vec<Box<dyn Convention>>,
}

impl Default for Conventions {
    fn default() -> Self {
        Self::from_ids(&[ConventionId::Go, ConventionId::Js])
    }
}

impl Conventions {
    pub fn empty() -> Self {
        Self { table: Vec::new() }
    }

    pub fn from_ids(ids: &[ConventionId]) -> Self {
        let mut conventions = Self::empty();
        for id in ids {
            conventions.register(id.convention());
        }
        conventions
    }

    /// Add a convention, replacing any registered under the same id.
    pub fn register(&mut self, convention: Box<dyn Convention>) {
        match self.table.iter().position(|c| c.id() == convention.id()) {
            Some(idx) => self.table[idx] = convention,
            None => self.table.push(convention),
        }
    }

    pub fn get(&self, id: &str) -> Option<&dyn Convention> {
        self.table.iter().find(|c| c.id() == id).map(|c| c.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Convention> {
        self.table.iter().map(|c| c.as_ref())
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.table.iter().map(|c| c.id()).collect()
    }

    /// Compute one value per convention.
    pub fn map<T>(&self, mut f: impl FnMut(&dyn Convention) -> T) -> PerConvention<T> {
        self.iter()
            .map(|c| (c.id().to_string(), f(c)))
            .collect()
    }

    /// Compute one value per convention, stopping at the first error.
    pub fn try_map<T, E>(
        &self,
        mut f: impl FnMut(&dyn Convention) -> Result<T, E>,
    ) -> Result<PerConvention<T>, E> {
        self.iter()
            .map(|c| f(c).map(|value| (c.id().to_string(), value)))
            .collect()
    }
}
