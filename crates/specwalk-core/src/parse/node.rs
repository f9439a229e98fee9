use indexmap::IndexMap;
use serde::Serialize;

/// A decoded document node.
///
/// Every document, whatever its surface encoding, is decoded into this tree before any
/// resolution happens. Mapping keys are always strings and keep their document order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum Node {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Vec<Node>),
    Mapping(IndexMap<String, Node>),
}

/// Parse a `[<digits>]` path segment into a sequence index.
fn sequence_index(segment: &str) -> Option<usize> {
    let digits = segment.strip_prefix('[')?.strip_suffix(']')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

impl Node {
    /// Walk `path` from this node. An empty path yields the node itself.
    ///
    /// A segment of the form `[<digits>]` indexes into a sequence; any other segment is a
    /// mapping key. Absent keys, out-of-range indices and wrong-shaped nodes all yield `None`.
    pub fn get(&self, path: &[&str]) -> Option<&Node> {
        let mut current = self;
        for segment in path {
            current = match sequence_index(segment) {
                Some(idx) => match current {
                    Node::Sequence(items) => items.get(idx)?,
                    _ => return None,
                },
                None => match current {
                    Node::Mapping(map) => map.get(*segment)?,
                    _ => return None,
                },
            };
        }
        Some(current)
    }

    /// Whether `path` resolves to any node at all (including `null`).
    pub fn has(&self, path: &[&str]) -> bool {
        self.get(path).is_some()
    }

    /// String at `path`, or `""`.
    pub fn str(&self, path: &[&str]) -> &str {
        match self.get(path) {
            Some(Node::String(s)) => s,
            _ => "",
        }
    }

    /// Boolean at `path`, or `false`.
    pub fn bool(&self, path: &[&str]) -> bool {
        matches!(self.get(path), Some(Node::Bool(true)))
    }

    /// Integer at `path`, or `0`.
    pub fn int64(&self, path: &[&str]) -> i64 {
        match self.get(path) {
            Some(Node::Integer(n)) => *n,
            _ => 0,
        }
    }

    /// Non-negative integer at `path`, or `0`.
    pub fn uint64(&self, path: &[&str]) -> u64 {
        match self.get(path) {
            Some(Node::Integer(n)) => u64::try_from(*n).unwrap_or(0),
            _ => 0,
        }
    }

    /// Sequence items at `path`, or an empty slice.
    pub fn slice(&self, path: &[&str]) -> &[Node] {
        match self.get(path) {
            Some(Node::Sequence(items)) => items,
            _ => &[],
        }
    }

    /// Mapping keys at `path` in lexicographic order, or nothing.
    pub fn keys(&self, path: &[&str]) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries(path).map(|(k, _)| k).collect();
        keys.sort_unstable();
        keys
    }

    /// Mapping entries at `path` in document order.
    pub fn entries<'a>(
        &'a self,
        path: &[&str],
    ) -> impl Iterator<Item = (&'a str, &'a Node)> + use<'a> {
        let map = match self.get(path) {
            Some(Node::Mapping(map)) => Some(map),
            _ => None,
        };
        map.into_iter()
            .flat_map(|m| m.iter().map(|(k, v)| (k.as_str(), v)))
    }

    /// Render a scalar as text. Sequences, mappings and `null` yield `None`.
    pub fn scalar_string(&self) -> Option<String> {
        match self {
            Node::String(s) => Some(s.clone()),
            Node::Integer(n) => Some(n.to_string()),
            Node::Float(f) => Some(f.to_string()),
            Node::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Node::Null,
            serde_json::Value::Bool(b) => Node::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Node::Integer(i),
                None => Node::Float(n.as_f64().unwrap_or_default()),
            },
            serde_json::Value::String(s) => Node::String(s),
            serde_json::Value::Array(items) => {
                Node::Sequence(items.into_iter().map(Node::from).collect())
            }
            serde_json::Value::Object(map) => {
                Node::Mapping(map.into_iter().map(|(k, v)| (k, Node::from(v))).collect())
            }
        }
    }
}

impl From<serde_yaml_ng::Value> for Node {
    fn from(value: serde_yaml_ng::Value) -> Self {
        use serde_yaml_ng::Value;

        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Node::Integer(i),
                None => Node::Float(n.as_f64().unwrap_or_default()),
            },
            Value::String(s) => Node::String(s),
            Value::Sequence(items) => Node::Sequence(items.into_iter().map(Node::from).collect()),
            Value::Mapping(map) => Node::Mapping(
                map.into_iter()
                    .filter_map(|(k, v)| yaml_key(k).map(|key| (key, Node::from(v))))
                    .collect(),
            ),
            Value::Tagged(tagged) => Node::from(tagged.value),
        }
    }
}

/// Stringify a YAML mapping key. Status codes such as `200:` decode as numbers.
fn yaml_key(key: serde_yaml_ng::Value) -> Option<String> {
    use serde_yaml_ng::Value;

    match key {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some("null".to_string()),
        Value::Tagged(tagged) => yaml_key(tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Node {
        Node::from(serde_json::json!({
            "info": { "title": "Widgets", "version": "1.0" },
            "servers": [
                { "url": "https://a.example.com" },
                { "url": "https://b.example.com" }
            ],
            "zeta": 1,
            "alpha": -4,
            "flag": true,
            "ratio": 0.5
        }))
    }

    #[test]
    fn test_get_mapping_path() {
        let doc = doc();
        assert_eq!(doc.str(&["info", "title"]), "Widgets");
        assert!(doc.get(&["info", "missing"]).is_none());
        assert_eq!(doc.get(&[]), Some(&doc));
    }

    #[test]
    fn test_get_sequence_index() {
        let doc = doc();
        assert_eq!(doc.str(&["servers", "[1]", "url"]), "https://b.example.com");
        assert!(doc.get(&["servers", "[2]"]).is_none());
        // index segment against a mapping is a miss, not a key lookup
        assert!(doc.get(&["info", "[0]"]).is_none());
    }

    #[test]
    fn test_key_into_scalar_is_miss() {
        let doc = doc();
        assert!(doc.get(&["info", "title", "deeper"]).is_none());
        assert_eq!(doc.str(&["zeta", "x"]), "");
    }

    #[test]
    fn test_zero_values_on_type_mismatch() {
        let doc = doc();
        assert_eq!(doc.str(&["zeta"]), "");
        assert!(!doc.bool(&["info"]));
        assert_eq!(doc.int64(&["info", "title"]), 0);
        assert_eq!(doc.uint64(&["alpha"]), 0);
        assert!(doc.slice(&["info"]).is_empty());
        assert!(doc.keys(&["servers"]).is_empty());
    }

    #[test]
    fn test_typed_helpers() {
        let doc = doc();
        assert!(doc.bool(&["flag"]));
        assert_eq!(doc.int64(&["alpha"]), -4);
        assert_eq!(doc.uint64(&["zeta"]), 1);
        assert_eq!(doc.slice(&["servers"]).len(), 2);
    }

    #[test]
    fn test_keys_sorted() {
        let doc = doc();
        assert_eq!(
            doc.keys(&[]),
            vec!["alpha", "flag", "info", "ratio", "servers", "zeta"]
        );
    }

    #[test]
    fn test_entries_keep_document_order() {
        let doc = doc();
        let keys: Vec<&str> = doc.entries(&[]).map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["info", "servers", "zeta", "alpha", "flag", "ratio"]);
    }

    #[test]
    fn test_malformed_index_is_key() {
        let node = Node::from(serde_json::json!({ "[x]": "literal" }));
        assert_eq!(node.str(&["[x]"]), "literal");
    }

    #[test]
    fn test_yaml_numeric_keys_stringified() {
        let value: serde_yaml_ng::Value =
            serde_yaml_ng::from_str("responses:\n  201:\n    description: ok\n").unwrap();
        let node = Node::from(value);
        assert_eq!(node.keys(&["responses"]), vec!["201"]);
        assert_eq!(node.str(&["responses", "201", "description"]), "ok");
    }

    #[test]
    fn test_scalar_string() {
        assert_eq!(Node::Integer(3).scalar_string().as_deref(), Some("3"));
        assert_eq!(Node::Bool(false).scalar_string().as_deref(), Some("false"));
        assert_eq!(Node::Null.scalar_string(), None);
    }
}
