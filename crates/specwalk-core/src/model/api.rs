use indexmap::IndexMap;
use serde::Serialize;

use super::{Const, ConstValue, Method, PerConvention, Schema};

/// A fully resolved API description, ready for rendering.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Api {
    pub title: String,
    pub description: String,
    pub names: PerConvention<String>,
    pub version: String,
    pub contact: Contact,
    pub servers: Vec<Server>,
    pub methods: Vec<Method>,
    pub schemas: Vec<Schema>,
    pub consts: Vec<Const>,
    /// Externally referenced documents, keyed by the reference's file path.
    pub ref_docs: IndexMap<String, Api>,
    /// One manifest entry per merged input document.
    pub specs: Vec<Spec>,
}

/// Contact information.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Contact {
    pub name: String,
    pub url: String,
}

/// A server URL.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Server {
    pub url: String,
    pub name: String,
    pub description: String,
}

/// Manifest entry for one merged input document.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Spec {
    pub doc: String,
    /// Name of the directory containing the document.
    pub dir: String,
    pub title: String,
    pub names: PerConvention<String>,
}

impl Api {
    /// Find a schema by its type name or any of its per-convention names.
    pub fn schema(&self, name: &str) -> Option<&Schema> {
        self.schemas
            .iter()
            .find(|s| s.name == name || s.names.values().any(|n| n == name))
    }

    /// Whether `type_name` names one of the enumeration constants.
    pub fn is_const(&self, type_name: &str) -> bool {
        self.consts.iter().any(|c| c.name == type_name)
    }

    /// Find the value `value` of the constant named `const_name`.
    pub fn find_const(&self, const_name: &str, value: &str) -> Option<&ConstValue> {
        self.consts
            .iter()
            .filter(|c| c.name == const_name)
            .find_map(|c| c.value(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> Api {
        let mut names = PerConvention::new();
        names.insert("go".to_string(), "Widget".to_string());
        names.insert("js".to_string(), "widget".to_string());
        Api {
            schemas: vec![Schema {
                api_name: "Widget".to_string(),
                name: "Widget".to_string(),
                names,
                ..Default::default()
            }],
            consts: vec![Const {
                name: "Color".to_string(),
                values: vec![ConstValue {
                    api_name: "red".to_string(),
                    ..Default::default()
                }],
                source: String::new(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_schema_lookup() {
        let api = api();
        assert!(api.schema("Widget").is_some());
        assert!(api.schema("widget").is_some());
        assert!(api.schema("Gadget").is_none());
    }

    #[test]
    fn test_const_lookup() {
        let api = api();
        assert!(api.is_const("Color"));
        assert!(!api.is_const("Widget"));
        assert_eq!(api.find_const("Color", "red").unwrap().api_name, "red");
        assert!(api.find_const("Color", "blue").is_none());
        assert!(api.find_const("Shade", "red").is_none());
    }
}
