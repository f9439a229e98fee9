use std::sync::Arc;

use minijinja::value::{Rest, Value};
use minijinja::{AutoEscape, Environment, context};

use specwalk_core::model::Api;
use specwalk_core::text;

/// Build the template environment for `api`.
///
/// Templates see the model as `api` and can call `comment`, `wrapped_comment`, `schema`,
/// `is_const` and `find_const`.
pub fn environment<'source>(api: Arc<Api>) -> Environment<'source> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.set_keep_trailing_newline(true);

    env.add_function("comment", |value: String| text::comment(&value));
    env.add_function(
        "wrapped_comment",
        |line_length: usize, indent: String, parts: Rest<String>| {
            text::wrapped_comment(line_length, &indent, &parts.concat())
        },
    );

    let lookup = Arc::clone(&api);
    env.add_function("schema", move |name: String| {
        lookup
            .schema(&name)
            .map(Value::from_serialize)
            .unwrap_or_else(|| Value::from(()))
    });

    let lookup = Arc::clone(&api);
    env.add_function("is_const", move |type_name: String| lookup.is_const(&type_name));

    let lookup = api;
    env.add_function("find_const", move |const_name: String, value: String| {
        lookup
            .find_const(&const_name, &value)
            .map(Value::from_serialize)
            .unwrap_or_else(|| Value::from(()))
    });

    env
}

/// Render `source` (registered as `name`) against `api`.
pub fn render(name: &str, source: &str, api: Arc<Api>) -> Result<String, minijinja::Error> {
    let env = environment(Arc::clone(&api));
    let tmpl = env.template_from_named_str(name, source)?;
    tmpl.render(context! {
        api => Value::from_serialize(&*api),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use specwalk_core::parse;
    use specwalk_core::transform::{Conventions, parse_document};

    fn api() -> Arc<Api> {
        let root = parse::from_yaml(
            r#"
info:
  title: Widget Store
paths:
  /widgets:
    post:
      operationId: createWidget
      description: "Creates a <widget>\nand stores it"
      requestBody:
        content:
          application/json:
            schema: {$ref: '#/components/schemas/Widget'}
      responses:
        '201': {description: created}
components:
  schemas:
    Widget:
      type: object
      required: [name]
      properties:
        name: {type: string}
        color: {type: string, enum: [red, dark-blue]}
"#,
        )
        .unwrap();
        Arc::new(parse_document(&root, &Conventions::default()).unwrap())
    }

    #[test]
    fn test_render_model() {
        let out = render(
            "t.j2",
            "{% for m in api.methods %}{{ m.names.go }} {{ m.http_method }} {{ m.success_status }}{% endfor %}",
            api(),
        )
        .unwrap();
        assert_eq!(out, "CreateWidget POST 201");
    }

    #[test]
    fn test_no_autoescape() {
        let out = render(
            "t.html",
            "{{ comment(api.methods[0].description) }}",
            api(),
        )
        .unwrap();
        assert_eq!(out, "Creates a <widget> and stores it");
    }

    #[test]
    fn test_wrapped_comment_joins_parts() {
        let out = render(
            "t.j2",
            r#"{{ wrapped_comment(20, "", "abc ", "def") }}"#,
            api(),
        )
        .unwrap();
        assert_eq!(out, "// abc def");
    }

    #[test]
    fn test_lookups() {
        let out = render(
            "t.j2",
            concat!(
                "{{ schema('Widget').params | length }} ",
                "{{ is_const('Color') }} {{ is_const('Widget') }} ",
                "{{ find_const('Color', 'dark-blue').names.go }} ",
                "{{ schema('Nope') is none }}",
            ),
            api(),
        )
        .unwrap();
        assert_eq!(out, "2 true false ColorDarkBlue true");
    }

    #[test]
    fn test_keeps_trailing_newline() {
        let out = render("t.j2", "{{ api.title }}\n", api()).unwrap();
        assert_eq!(out, "Widget Store\n");
    }
}
