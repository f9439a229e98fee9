use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::transform::{ConventionId, Conventions};

/// Top-level project configuration loaded from `.specwalk.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpecwalkConfig {
    /// Documents parsed when none are given on the command line.
    pub docs: Vec<String>,
    /// Template rendered by `generate` when none is given on the command line.
    pub template: Option<String>,
    /// File `generate` writes to instead of stdout.
    pub output: Option<String>,
    /// Pretty-print the JSON model.
    pub pretty: bool,
    /// Conventions every name and type is computed for, in output order.
    pub conventions: Vec<ConventionId>,
}

impl Default for SpecwalkConfig {
    fn default() -> Self {
        Self {
            docs: Vec::new(),
            template: None,
            output: None,
            pretty: false,
            conventions: vec![ConventionId::Go, ConventionId::Js],
        }
    }
}

impl SpecwalkConfig {
    pub fn conventions(&self) -> Conventions {
        Conventions::from_ids(&self.conventions)
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".specwalk.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<SpecwalkConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: SpecwalkConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# specwalk configuration
docs:
  - openapi.yaml
  # - services/billing/openapi.yaml

# template: templates/server.go.j2
# output: generated/server.go

pretty: false
conventions: [go, js]   # go | js
"#
}
