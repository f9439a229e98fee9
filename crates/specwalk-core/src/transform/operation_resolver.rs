use crate::error::{ParseError, ResolveError};
use crate::model::{HttpMethod, Method, Param, ParamLocation, Schema};
use crate::parse::Node;
use crate::parse::reference::{PARAMETER_PREFIX, Reference, schema_name};

use super::document::{DocumentParser, PendingMerge};
use super::naming::{exported_name, router_path};
use super::schema_resolver::apply_validations;

const JSON: &str = "application/json";

static NULL: Node = Node::Null;

impl<'a> DocumentParser<'a, '_> {
    /// Walk `paths` in path order, building one method per operation with an `operationId`.
    pub(super) fn resolve_paths(&mut self) -> Result<(), ParseError> {
        let root = self.root;
        for path in root.keys(&["paths"]) {
            let Some(item) = root.get(&["paths", path]) else {
                continue;
            };
            self.resolve_path(path, item)
                .map_err(|e| ParseError::Path {
                    path: path.to_string(),
                    source: Box::new(e),
                })?;
        }
        Ok(())
    }

    fn resolve_path(&mut self, path: &str, item: &'a Node) -> Result<(), ParseError> {
        let ref_path = item.str(&["$ref"]);
        if !ref_path.is_empty() {
            return self.resolve_path_ref(path, ref_path);
        }

        let shared = item.slice(&["parameters"]);
        for (key, op) in item.entries(&[]) {
            let Some(http_method) = HttpMethod::from_key(key) else {
                continue;
            };
            let operation_id = op.str(&["operationId"]);
            if operation_id.is_empty() {
                log::trace!("skipping {key} {path} without operationId");
                continue;
            }

            let method = self.build_method(path, http_method, op);
            if method.input_in_body {
                // shared params land on the body schema once every schema is known
                if !shared.is_empty() {
                    let params = self.build_parameters(shared)?;
                    self.pending.push(PendingMerge {
                        schema: method.input_type.clone(),
                        params,
                    });
                }
            } else {
                let mut params = self.build_parameters(shared)?;
                params.extend(self.build_parameters(op.slice(&["parameters"]))?);
                let input_type = method.input_type.clone();
                self.api.schemas.push(Schema {
                    api_name: operation_id.to_string(),
                    names: self.conventions.map(|c| c.schema_name(&input_type)),
                    name: input_type,
                    params,
                    source: self.origin.clone(),
                    ..Default::default()
                });
            }
            self.api.methods.push(method);
        }
        Ok(())
    }

    fn build_method(&self, path: &str, http_method: HttpMethod, op: &Node) -> Method {
        let operation_id = op.str(&["operationId"]);
        let exported = exported_name(operation_id);
        let success = success_status(op);

        let input_ref = op.str(&["requestBody", "content", JSON, "schema", "$ref"]);
        let input_type = match input_ref {
            "" => format!("{exported}Input"),
            r => schema_name(r).to_string(),
        };
        let output_ref = success
            .map(|status| op.str(&["responses", status, "content", JSON, "schema", "$ref"]))
            .unwrap_or_default();
        let output_type = match output_ref {
            "" => format!("{exported}Output"),
            r => schema_name(r).to_string(),
        };

        Method {
            api_name: operation_id.to_string(),
            names: self.conventions.map(|c| c.method_name(operation_id)),
            path: path.to_string(),
            router_path: router_path(path),
            http_method,
            summary: op.str(&["summary"]).to_string(),
            description: op.str(&["description"]).to_string(),
            input_type,
            output_type,
            input_in_body: op.has(&["requestBody"]),
            success_status: success.and_then(|s| s.parse().ok()).unwrap_or(0),
            source: self.origin.clone(),
        }
    }

    fn build_parameters(&self, nodes: &'a [Node]) -> Result<Vec<Param>, ParseError> {
        nodes.iter().map(|n| self.build_parameter(n)).collect()
    }

    fn build_parameter(&self, node: &'a Node) -> Result<Param, ParseError> {
        let node = self.dereference_parameter(node)?;
        let name = node.str(&["name"]);
        let required = node.bool(&["required"]);
        let schema = node.get(&["schema"]).unwrap_or(&NULL);

        let mut param = Param {
            api_name: name.to_string(),
            spec_name: format!("{{{name}}}"),
            names: self.conventions.map(|c| c.field_name(name)),
            types: self.mapper.resolve(name, schema, required)?,
            is_array: schema.str(&["type"]) == "array",
            required,
            allow_empty: node.bool(&["allowEmptyValue"]),
            description: node.str(&["description"]).to_string(),
            deprecated: node.bool(&["deprecated"]),
            location: ParamLocation::from_in(node.str(&["in"])),
            ..Default::default()
        };
        apply_validations(&mut param, schema);
        Ok(param)
    }

    /// Follow a `#/components/parameters/<name>` reference.
    fn dereference_parameter(&self, node: &'a Node) -> Result<&'a Node, ResolveError> {
        let ref_path = node.str(&["$ref"]);
        if ref_path.is_empty() {
            return Ok(node);
        }
        let name = Reference::parse(ref_path)
            .filter(|r| !r.is_external())
            .and_then(|r| r.fragment.strip_prefix(PARAMETER_PREFIX))
            .ok_or_else(|| ResolveError::InvalidRefFormat(format!("{ref_path:?} for parameter")))?;
        self.root
            .get(&["components", "parameters", name])
            .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.to_string()))
    }
}

/// The first 2xx response code in code order.
fn success_status(op: &Node) -> Option<&str> {
    op.keys(&["responses"])
        .into_iter()
        .find(|code| code.starts_with('2'))
}

#[cfg(test)]
mod tests {
    use crate::error::{ParseError, ResolveError};
    use crate::model::{Api, HttpMethod, ParamLocation};
    use crate::parse;
    use crate::transform::{Conventions, parse_document};

    fn parse(yaml: &str) -> Result<Api, ParseError> {
        let root = parse::from_yaml(yaml).unwrap();
        parse_document(&root, &Conventions::default())
    }

    const DOC: &str = r#"
paths:
  /widgets/{widget_id}:
    parameters:
      - name: widget_id
        in: path
        required: true
        schema: {type: string}
    get:
      operationId: getWidget
      summary: Fetch a widget
      parameters:
        - name: expand
          in: query
          schema: {type: boolean}
      responses:
        '404': {description: missing}
        '200':
          content:
            application/json:
              schema: {$ref: '#/components/schemas/Widget'}
    put:
      operationId: update-widget
      requestBody:
        content:
          application/json:
            schema: {$ref: '#/components/schemas/WidgetUpdate'}
      responses:
        '204': {description: done}
    x-internal: true
    delete:
      summary: no operation id
  /widgets:
    post:
      operationId: createWidget
      requestBody:
        content:
          application/json:
            schema: {$ref: '#/components/schemas/Widget'}
      responses:
        '201':
          content:
            application/json:
              schema: {$ref: '#/components/schemas/Widget'}
        '200': {description: also fine}
components:
  schemas:
    Widget:
      type: object
      properties:
        name: {type: string}
    WidgetUpdate:
      type: object
      properties:
        label: {type: string}
"#;

    #[test]
    fn test_methods_in_path_then_document_order() {
        let api = parse(DOC).unwrap();
        let ids: Vec<&str> = api.methods.iter().map(|m| m.api_name.as_str()).collect();
        assert_eq!(ids, vec!["createWidget", "getWidget", "update-widget"]);
    }

    #[test]
    fn test_method_fields() {
        let api = parse(DOC).unwrap();
        let get = &api.methods[1];
        assert_eq!(get.http_method, HttpMethod::Get);
        assert_eq!(get.path, "/widgets/{widget_id}");
        assert_eq!(get.router_path, "/widgets/:widget_id");
        assert_eq!(get.summary, "Fetch a widget");
        assert_eq!(get.names["go"], "GetWidget");
        assert_eq!(get.names["js"], "getWidget");
        assert_eq!(get.input_type, "GetWidgetInput");
        assert_eq!(get.output_type, "Widget");
        assert!(!get.input_in_body);
        assert_eq!(get.success_status, 200);

        let update = &api.methods[2];
        assert_eq!(update.names["go"], "UpdateWidget");
        assert_eq!(update.names["js"], "update_widget");
        assert_eq!(update.input_type, "WidgetUpdate");
        assert_eq!(update.output_type, "UpdateWidgetOutput");
        assert!(update.input_in_body);
        assert_eq!(update.success_status, 204);
    }

    #[test]
    fn test_first_success_code_wins() {
        let api = parse(DOC).unwrap();
        let create = &api.methods[0];
        assert_eq!(create.success_status, 200);
        assert_eq!(create.output_type, "CreateWidgetOutput");
    }

    #[test]
    fn test_synthesized_input_schema() {
        let api = parse(DOC).unwrap();
        let input = api.schema("GetWidgetInput").unwrap();
        assert_eq!(input.api_name, "getWidget");
        let names: Vec<&str> = input.params.iter().map(|p| p.api_name.as_str()).collect();
        assert_eq!(names, vec!["widget_id", "expand"]);

        let id = input.param("widget_id").unwrap();
        assert_eq!(id.spec_name, "{widget_id}");
        assert_eq!(id.location, ParamLocation::Path);
        assert_eq!(id.names["go"], "WidgetID");
        assert_eq!(id.types["go"].expr, "string");

        let expand = input.param("expand").unwrap();
        assert_eq!(expand.location, ParamLocation::Query);
        assert_eq!(expand.types["go"].expr, "*bool");
        assert_eq!(expand.types["js"].expr, "?boolean");
    }

    #[test]
    fn test_shared_params_merged_into_body_schema() {
        let api = parse(DOC).unwrap();
        let update = api.schema("WidgetUpdate").unwrap();
        let names: Vec<&str> = update.params.iter().map(|p| p.api_name.as_str()).collect();
        assert_eq!(names, vec!["label", "widget_id"]);
        assert_eq!(update.params[1].location, ParamLocation::Path);
        // no shared params on /widgets
        assert_eq!(api.schema("Widget").unwrap().params.len(), 1);
    }

    #[test]
    fn test_shared_params_merged_once_per_body_method() {
        let api = parse(
            r#"
paths:
  /w/{id}:
    parameters:
      - name: id
        in: path
        required: true
        schema: {type: string}
    put:
      operationId: replaceW
      requestBody:
        content:
          application/json:
            schema: {$ref: '#/components/schemas/B'}
      responses:
        '200': {description: ok}
    patch:
      operationId: patchW
      requestBody:
        content:
          application/json:
            schema: {$ref: '#/components/schemas/B'}
      responses:
        '200': {description: ok}
components:
  schemas:
    B:
      type: object
      properties:
        x: {type: string}
"#,
        )
        .unwrap();
        let b = api.schema("B").unwrap();
        let names: Vec<&str> = b.params.iter().map(|p| p.api_name.as_str()).collect();
        assert_eq!(names, vec!["x", "id", "id"]);
    }

    #[test]
    fn test_parameter_refs() {
        let api = parse(
            r#"
paths:
  /items:
    get:
      operationId: listItems
      parameters:
        - $ref: '#/components/parameters/Limit'
components:
  parameters:
    Limit:
      name: limit
      in: query
      schema: {type: integer, maximum: 100}
"#,
        )
        .unwrap();
        let limit = api.schema("ListItemsInput").unwrap().param("limit").unwrap();
        assert_eq!(limit.location, ParamLocation::Query);
        assert_eq!(limit.types["go"].expr, "int64");
        assert_eq!(limit.maximum, Some(100));
    }

    #[test]
    fn test_missing_parameter_ref() {
        let err = parse(
            r#"
paths:
  /items:
    get:
      operationId: listItems
      parameters:
        - $ref: '#/components/parameters/Nope'
"#,
        )
        .unwrap_err();
        assert!(matches!(&err, ParseError::Path { path, .. } if path == "/items"));
        assert!(matches!(
            err.root_cause(),
            ParseError::Resolve(ResolveError::RefTargetNotFound(_))
        ));
    }

    #[test]
    fn test_parameter_without_schema_is_any() {
        let api = parse(
            r#"
paths:
  /items:
    get:
      operationId: listItems
      parameters:
        - {name: q, in: query, allowEmptyValue: true}
"#,
        )
        .unwrap();
        let q = api.schema("ListItemsInput").unwrap().param("q").unwrap();
        assert!(q.allow_empty);
        assert_eq!(q.types["go"].expr, "interface{}");
        assert_eq!(q.types["js"].expr, "any");
    }

    #[test]
    fn test_local_path_ref_rejected() {
        let err = parse(
            r#"
paths:
  /a:
    $ref: '#/paths/~1b'
"#,
        )
        .unwrap_err();
        assert!(matches!(
            err.root_cause(),
            ParseError::Resolve(ResolveError::InvalidRefFormat(_))
        ));
    }
}
