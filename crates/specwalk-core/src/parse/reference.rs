use std::path::Path;

/// Fragment prefix of a reference to a component schema.
pub const SCHEMA_PREFIX: &str = "#/components/schemas/";
/// Fragment prefix of a reference to a component parameter.
pub const PARAMETER_PREFIX: &str = "#/components/parameters/";

/// A parsed `$ref` value of the form `[<file>]#<fragment>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference<'a> {
    /// The referenced file, `None` for same-document references.
    pub file: Option<&'a str>,
    /// The fragment, including its leading `#`.
    pub fragment: &'a str,
}

impl<'a> Reference<'a> {
    /// Split a reference at its first `#`. Returns `None` when there is no `#` or nothing
    /// follows it.
    pub fn parse(raw: &'a str) -> Option<Self> {
        let idx = raw.find('#')?;
        let (file, fragment) = raw.split_at(idx);
        if fragment.len() < 2 {
            return None;
        }
        Some(Self {
            file: (!file.is_empty()).then_some(file),
            fragment,
        })
    }

    pub fn is_external(&self) -> bool {
        self.file.is_some()
    }

    /// The name the fragment points at, with the component-schema prefix removed.
    pub fn local_name(&self) -> &'a str {
        self.fragment
            .strip_prefix(SCHEMA_PREFIX)
            .unwrap_or(self.fragment)
    }

    /// Namespace for types defined in the referenced file: the name of the directory that
    /// contains it. Same-document references and bare file names have none.
    pub fn namespace(&self) -> Option<&'a str> {
        let file = self.file?;
        Path::new(file)
            .parent()
            .and_then(|dir| dir.file_name())
            .and_then(|name| name.to_str())
    }
}

/// Reduce a schema reference to a bare schema name.
///
/// Well-formed references yield their local name; anything else has the component-schema
/// prefix trimmed if present and is otherwise returned unchanged.
pub fn schema_name(raw: &str) -> &str {
    match Reference::parse(raw) {
        Some(reference) => reference.local_name(),
        None => raw.strip_prefix(SCHEMA_PREFIX).unwrap_or(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_local() {
        let r = Reference::parse("#/components/schemas/Widget").unwrap();
        assert_eq!(r.file, None);
        assert!(!r.is_external());
        assert_eq!(r.local_name(), "Widget");
        assert_eq!(r.namespace(), None);
    }

    #[test]
    fn test_parse_external() {
        let r = Reference::parse("../shared/gadgets/api.yaml#/components/schemas/Gadget").unwrap();
        assert_eq!(r.file, Some("../shared/gadgets/api.yaml"));
        assert_eq!(r.fragment, "#/components/schemas/Gadget");
        assert_eq!(r.local_name(), "Gadget");
        assert_eq!(r.namespace(), Some("gadgets"));
    }

    #[test]
    fn test_parse_bare_file_has_no_namespace() {
        let r = Reference::parse("api.yaml#/paths/~1widgets").unwrap();
        assert_eq!(r.namespace(), None);
        assert_eq!(r.local_name(), "#/paths/~1widgets");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(Reference::parse("Widget").is_none());
        assert!(Reference::parse("api.yaml#").is_none());
        assert!(Reference::parse("#").is_none());
        assert!(Reference::parse("").is_none());
    }

    #[test]
    fn test_schema_name() {
        assert_eq!(schema_name("#/components/schemas/Cat"), "Cat");
        assert_eq!(schema_name("pets/api.yaml#/components/schemas/Dog"), "Dog");
        assert_eq!(schema_name("Plain"), "Plain");
        assert_eq!(schema_name(""), "");
    }
}
