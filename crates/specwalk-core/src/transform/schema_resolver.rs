use std::collections::HashSet;

use crate::error::ParseError;
use crate::model::{Discriminator, Param, ParamLocation, RequiredIf, Schema};
use crate::parse::Node;
use crate::parse::reference::schema_name;

use super::document::DocumentParser;

impl DocumentParser<'_, '_> {
    /// Walk `components.schemas` in name order. Objects become schemas, string enumerations
    /// become constants, and everything else is skipped.
    pub(super) fn resolve_schemas(&mut self) -> Result<(), ParseError> {
        let root = self.root;
        for name in root.keys(&["components", "schemas"]) {
            let Some(node) = root.get(&["components", "schemas", name]) else {
                continue;
            };
            match node.str(&["type"]) {
                "object" => {
                    let schema =
                        self.resolve_object(name, node)
                            .map_err(|e| ParseError::Schema {
                                name: name.to_string(),
                                source: Box::new(e),
                            })?;
                    self.api.schemas.push(schema);
                }
                "string" => {
                    if self.consts.register(name, node).is_none() {
                        log::trace!("skipping plain string schema {name}");
                    }
                }
                other => log::trace!("skipping schema {name} of type {other:?}"),
            }
        }
        Ok(())
    }

    fn resolve_object(&mut self, name: &str, node: &Node) -> Result<Schema, ParseError> {
        let required: HashSet<&str> = node
            .slice(&["required"])
            .iter()
            .filter_map(|n| match n {
                Node::String(s) => Some(s.as_str()),
                _ => None,
            })
            .collect();

        let mut params = Vec::new();
        for prop_name in node.keys(&["properties"]) {
            let Some(prop) = node.get(&["properties", prop_name]) else {
                continue;
            };
            self.consts.register(prop_name, prop);
            params.push(self.resolve_property(prop_name, prop, required.contains(prop_name))?);
        }

        let conventions = self.conventions;
        Ok(Schema {
            api_name: name.to_string(),
            name: name.to_string(),
            names: conventions.map(|c| c.schema_name(name)),
            description: node.str(&["description"]).to_string(),
            error_format: node.str(&["x-go-error"]).to_string(),
            params,
            one_of: composition(node, "oneOf"),
            any_of: composition(node, "anyOf"),
            all_of: composition(node, "allOf"),
            discriminator: node.get(&["discriminator"]).map(|d| {
                let property = d.str(&["propertyName"]);
                Discriminator {
                    api_name: property.to_string(),
                    names: conventions.map(|c| c.field_name(property)),
                    mapping: d
                        .entries(&["mapping"])
                        .map(|(value, target)| {
                            (value.to_string(), schema_name(target.str(&[])).to_string())
                        })
                        .collect(),
                }
            }),
            source: self.origin.clone(),
        })
    }

    fn resolve_property(
        &self,
        name: &str,
        prop: &Node,
        required: bool,
    ) -> Result<Param, ParseError> {
        let mut param = Param {
            api_name: name.to_string(),
            names: self.conventions.map(|c| c.field_name(name)),
            types: self.mapper.resolve_property(name, prop, required)?,
            is_array: prop.str(&["type"]) == "array",
            required,
            description: prop.str(&["description"]).to_string(),
            deprecated: prop.bool(&["deprecated"]),
            location: ParamLocation::Body,
            ..Default::default()
        };
        apply_validations(&mut param, prop);
        Ok(param)
    }
}

/// Names of the referenced members of a composition keyword. Inline members carry no name
/// and are left out.
fn composition(node: &Node, keyword: &str) -> Vec<String> {
    node.slice(&[keyword])
        .iter()
        .map(|member| member.str(&["$ref"]))
        .filter(|r| !r.is_empty())
        .map(|r| schema_name(r).to_string())
        .collect()
}

/// Copy validation keywords relevant to the declared type of `schema` onto `param`.
pub(super) fn apply_validations(param: &mut Param, schema: &Node) {
    let has_enum = !schema.slice(&["enum"]).is_empty();
    let marker = schema.bool(&["x-delay"]) || schema.bool(&["additionalProperties"]);
    match schema.str(&["type"]) {
        "string"
            if !has_enum
                && !marker
                && !matches!(schema.str(&["format"]), "date" | "date-time" | "password") =>
        {
            param.default = schema
                .get(&["default"])
                .filter(|d| matches!(d, Node::String(_)))
                .cloned();
            param.min_length = schema.get(&["minLength"]).map(|n| n.uint64(&[]));
            param.max_length = schema.get(&["maxLength"]).map(|n| n.uint64(&[]));
        }
        "integer" => {
            param.default = schema
                .get(&["default"])
                .filter(|d| matches!(d, Node::Integer(_)))
                .cloned();
            param.minimum = schema.get(&["minimum"]).map(|n| n.int64(&[]));
            param.maximum = schema.get(&["maximum"]).map(|n| n.int64(&[]));
        }
        "array" => {
            param.min_items = schema.get(&["minItems"]).map(|n| n.uint64(&[]));
            param.max_items = schema.get(&["maxItems"]).map(|n| n.uint64(&[]));
            param.unique_items = schema.bool(&["uniqueItems"]);
        }
        _ => {}
    }

    param.required_if = schema.get(&["x-required-if"]).map(|rule| RequiredIf {
        needs: rule.str(&["needs"]).to_string(),
        to_be: rule.get(&["to_be"]).cloned().unwrap_or_default(),
    });
    param.valid_url = schema.bool(&["x-valid-url"]);
}
