use indexmap::IndexMap;
use serde::Serialize;

use super::PerConvention;
use crate::parse::Node;

/// A named object-shaped type.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Schema {
    pub api_name: String,
    /// Type name used by methods and params to refer to this schema.
    pub name: String,
    pub names: PerConvention<String>,
    pub description: String,
    /// Error-type hint from `x-go-error`.
    pub error_format: String,
    pub params: Vec<Param>,
    pub one_of: Vec<String>,
    pub any_of: Vec<String>,
    pub all_of: Vec<String>,
    pub discriminator: Option<Discriminator>,
    pub source: String,
}

impl Schema {
    /// Look up a param by its API name.
    pub fn param(&self, api_name: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.api_name == api_name)
    }
}

/// Polymorphic dispatch info for composed schemas.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Discriminator {
    pub api_name: String,
    pub names: PerConvention<String>,
    pub mapping: IndexMap<String, String>,
}

/// A type expression in one naming convention.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TypeExpr {
    pub expr: String,
    /// Element type when `expr` is a sequence.
    pub item: Option<String>,
}

impl TypeExpr {
    pub fn scalar(expr: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            item: None,
        }
    }

    pub fn array(expr: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            item: Some(item.into()),
        }
    }
}

/// Where a param travels in a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    #[default]
    Body,
    Query,
    Path,
    Header,
    Cookie,
}

impl ParamLocation {
    /// Map an OpenAPI `in` value. Unknown or absent values are treated as body fields.
    pub fn from_in(value: &str) -> Self {
        match value {
            "query" => ParamLocation::Query,
            "path" => ParamLocation::Path,
            "header" => ParamLocation::Header,
            "cookie" => ParamLocation::Cookie,
            _ => ParamLocation::Body,
        }
    }
}

/// Conditional requirement from `x-required-if`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RequiredIf {
    pub needs: String,
    pub to_be: Node,
}

/// A schema property or operation parameter.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Param {
    pub api_name: String,
    /// `{name}` placeholder for operation parameters, empty for properties.
    pub spec_name: String,
    pub names: PerConvention<String>,
    pub types: PerConvention<TypeExpr>,
    pub is_array: bool,
    pub required: bool,
    pub allow_empty: bool,
    pub description: String,
    pub deprecated: bool,
    pub location: ParamLocation,
    pub default: Option<Node>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub minimum: Option<i64>,
    pub maximum: Option<i64>,
    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
    pub unique_items: bool,
    pub valid_url: bool,
    pub required_if: Option<RequiredIf>,
}
