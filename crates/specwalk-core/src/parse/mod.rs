pub mod node;
pub mod reference;

use std::fs;
use std::path::Path;

use crate::error::LoadError;
pub use node::Node;

/// Decode a YAML document into a [`Node`] tree.
pub fn from_yaml(input: &str) -> Result<Node, serde_yaml_ng::Error> {
    let value: serde_yaml_ng::Value = serde_yaml_ng::from_str(input)?;
    Ok(Node::from(value))
}

/// Decode a JSON document into a [`Node`] tree.
pub fn from_json(input: &str) -> Result<Node, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(input)?;
    Ok(Node::from(value))
}

/// Read and decode a document, picking the decoder from the file suffix.
/// `.json` files use the JSON decoder; everything else is read as YAML.
pub fn load_file(path: &Path) -> Result<Node, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        from_json(&content).map_err(|source| LoadError::Json {
            path: path.display().to_string(),
            source,
        })
    } else {
        from_yaml(&content).map_err(|source| LoadError::Yaml {
            path: path.display().to_string(),
            source,
        })
    }
}
