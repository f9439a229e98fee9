use crate::error::ResolveError;
use crate::model::{PerConvention, TypeExpr};
use crate::parse::Node;
use crate::parse::reference::{Reference, SCHEMA_PREFIX};

use super::convention::{Convention, Conventions, Primitive};
use super::naming::exported_name;

/// Maps schema nodes to type expressions in every registered convention.
#[derive(Debug, Clone, Copy)]
pub struct TypeMapper<'a> {
    root: &'a Node,
    conventions: &'a Conventions,
}

impl<'a> TypeMapper<'a> {
    /// `root` is the document same-document references are looked up in.
    pub fn new(root: &'a Node, conventions: &'a Conventions) -> Self {
        Self { root, conventions }
    }

    /// Resolve the type of a parameter or array item named `field`.
    pub fn resolve(
        &self,
        field: &str,
        schema: &Node,
        required: bool,
    ) -> Result<PerConvention<TypeExpr>, ResolveError> {
        self.conventions
            .try_map(|c| self.resolve_with(c, field, schema, required))
    }

    /// Resolve the type of an object property. Properties additionally honor the
    /// `x-delay` and `additionalProperties` markers.
    pub fn resolve_property(
        &self,
        field: &str,
        schema: &Node,
        required: bool,
    ) -> Result<PerConvention<TypeExpr>, ResolveError> {
        if schema.bool(&["x-delay"]) {
            return Ok(self.conventions.map(|c| c.primitive(Primitive::Raw)));
        }
        if schema.bool(&["additionalProperties"]) {
            return Ok(self.conventions.map(|c| c.primitive(Primitive::Map)));
        }
        self.resolve(field, schema, required)
    }

    fn resolve_with(
        &self,
        convention: &dyn Convention,
        field: &str,
        schema: &Node,
        required: bool,
    ) -> Result<TypeExpr, ResolveError> {
        let ref_path = schema.str(&["$ref"]);
        if !ref_path.is_empty() {
            return self.resolve_ref(convention, field, schema, ref_path, required);
        }

        let format = schema.str(&["format"]);
        let resolved = match schema.str(&["type"]) {
            "string" => match format {
                "date" | "date-time" => {
                    optional(convention, convention.primitive(Primitive::Timestamp), required)
                }
                "password" => convention.primitive(Primitive::Password),
                _ if !schema.slice(&["enum"]).is_empty() => {
                    TypeExpr::scalar(enum_type_name(field, schema))
                }
                _ => convention.primitive(Primitive::String),
            },
            "integer" => convention.primitive(Primitive::Integer(format)),
            "number" => match format {
                "float" => convention.primitive(Primitive::Float),
                _ => convention.primitive(Primitive::Double),
            },
            "boolean" => optional(convention, convention.primitive(Primitive::Boolean), required),
            "object" => convention.primitive(Primitive::Map),
            "array" => {
                let item = match schema.get(&["items"]) {
                    Some(items) => self.resolve_with(convention, field, items, true)?.expr,
                    None => convention.primitive(Primitive::Any).expr,
                };
                TypeExpr::array(convention.array(&item), item)
            }
            _ => convention.primitive(Primitive::Any),
        };
        Ok(resolved)
    }

    fn resolve_ref(
        &self,
        convention: &dyn Convention,
        field: &str,
        schema: &Node,
        ref_path: &str,
        required: bool,
    ) -> Result<TypeExpr, ResolveError> {
        let reference = Reference::parse(ref_path).ok_or_else(|| {
            ResolveError::InvalidRefFormat(format!("{ref_path:?} for {field}"))
        })?;

        let local = reference.local_name();
        let name = match reference.namespace() {
            Some(namespace) => convention.qualify(namespace, local),
            None => local.to_string(),
        };

        let target = self.local_target(&reference)?;
        let plain_string = is_unformatted_string(schema)
            || target.is_some_and(|t| is_unformatted_string(t) && !t.slice(&["enum"]).is_empty());

        if required || plain_string {
            Ok(TypeExpr::scalar(name))
        } else {
            Ok(TypeExpr::scalar(convention.nullable(&name)))
        }
    }

    /// The same-document schema a reference points at. External references and fragments
    /// outside `components.schemas` are not looked up.
    fn local_target(&self, reference: &Reference<'_>) -> Result<Option<&'a Node>, ResolveError> {
        if reference.is_external() || !reference.fragment.starts_with(SCHEMA_PREFIX) {
            return Ok(None);
        }
        self.root
            .get(&["components", "schemas", reference.local_name()])
            .map(Some)
            .ok_or_else(|| ResolveError::RefTargetNotFound(reference.fragment.to_string()))
    }
}

fn is_unformatted_string(schema: &Node) -> bool {
    schema.str(&["type"]) == "string" && schema.str(&["format"]).is_empty()
}

fn optional(convention: &dyn Convention, resolved: TypeExpr, required: bool) -> TypeExpr {
    if required {
        resolved
    } else {
        TypeExpr {
            expr: convention.nullable(&resolved.expr),
            item: resolved.item,
        }
    }
}

/// Type name of an inline string enum: the `x-enum-name` override, else the exported
/// field name.
pub fn enum_type_name(field: &str, schema: &Node) -> String {
    match schema.str(&["x-enum-name"]) {
        "" => exported_name(field),
        explicit => explicit.to_string(),
    }
}
