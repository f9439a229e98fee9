use std::collections::BTreeMap;

use crate::model::{Const, ConstValue, PerConvention};
use crate::parse::Node;

use super::convention::Conventions;
use super::naming::exported_name;

/// Collects enumerations met anywhere in a document, keyed by canonical name.
#[derive(Debug, Default)]
pub struct ConstRegistry {
    consts: BTreeMap<String, Const>,
}

impl ConstRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the enumeration declared by `schema`, if any, under the exported name of
    /// `field`. A later registration under the same name replaces the earlier one.
    ///
    /// Returns the constant's canonical name when one was registered.
    pub fn register(&mut self, field: &str, schema: &Node) -> Option<String> {
        let values = schema.slice(&["enum"]);
        if values.is_empty() {
            return None;
        }

        let values = match schema.get(&["custom-enum"]) {
            Some(custom) => custom_values(custom),
            None => values
                .iter()
                .map(|v| ConstValue {
                    api_name: v.scalar_string().unwrap_or_default(),
                    ..Default::default()
                })
                .collect(),
        };

        let name = exported_name(field);
        log::trace!("registered const {name} with {} values", values.len());
        self.consts.insert(
            name.clone(),
            Const {
                name: name.clone(),
                values,
                source: String::new(),
            },
        );
        Some(name)
    }

    pub fn len(&self) -> usize {
        self.consts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consts.is_empty()
    }

    /// Emit the constants in name order, synthesizing every missing per-convention value
    /// identifier from the constant name and the raw value.
    pub fn finish(self, conventions: &Conventions) -> Vec<Const> {
        self.consts
            .into_values()
            .map(|mut c| {
                for value in &mut c.values {
                    value.names = conventions.map(|conv| {
                        value
                            .names
                            .get(conv.id())
                            .filter(|n| !n.is_empty())
                            .cloned()
                            .unwrap_or_else(|| conv.const_value_name(&c.name, &value.api_name))
                    });
                }
                c
            })
            .collect()
    }
}

/// Values of a `custom-enum` override. Options are taken in key order; each may name its
/// identifier for a convention under `<id>_name`.
fn custom_values(custom: &Node) -> Vec<ConstValue> {
    custom
        .keys(&["options"])
        .into_iter()
        .map(|opt| {
            let names: PerConvention<String> = custom
                .entries(&["options", opt])
                .filter_map(|(key, value)| {
                    let id = key.strip_suffix("_name")?;
                    let name = value.scalar_string()?;
                    Some((id.to_string(), name))
                })
                .collect();
            ConstValue {
                api_name: opt.to_string(),
                names,
                description: custom.str(&["options", opt, "description"]).to_string(),
            }
        })
        .collect()
}
