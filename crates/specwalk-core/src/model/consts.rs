use serde::Serialize;

use super::PerConvention;

/// A named enumeration type.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Const {
    pub name: String,
    pub values: Vec<ConstValue>,
    pub source: String,
}

impl Const {
    pub fn value(&self, api_name: &str) -> Option<&ConstValue> {
        self.values.iter().find(|v| v.api_name == api_name)
    }
}

/// One allowed value of a [`Const`].
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ConstValue {
    pub api_name: String,
    pub names: PerConvention<String>,
    pub description: String,
}
