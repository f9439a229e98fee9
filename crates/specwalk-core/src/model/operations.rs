use serde::{Serialize, Serializer};

use super::PerConvention;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
    Trace,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Trace => "TRACE",
        }
    }

    /// Recognize a path-item key as an HTTP method, case-insensitively.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "get" => Some(HttpMethod::Get),
            "post" => Some(HttpMethod::Post),
            "put" => Some(HttpMethod::Put),
            "delete" => Some(HttpMethod::Delete),
            "patch" => Some(HttpMethod::Patch),
            "options" => Some(HttpMethod::Options),
            "head" => Some(HttpMethod::Head),
            "trace" => Some(HttpMethod::Trace),
            _ => None,
        }
    }
}

impl Serialize for HttpMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A resolved API operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Method {
    /// The operationId.
    pub api_name: String,
    pub names: PerConvention<String>,
    /// Templated path, e.g. `/widgets/{id}`.
    pub path: String,
    /// Router form of the path, e.g. `/widgets/:id`.
    pub router_path: String,
    pub http_method: HttpMethod,
    pub summary: String,
    pub description: String,
    pub input_type: String,
    pub output_type: String,
    pub input_in_body: bool,
    /// First 2xx status, `0` when the operation declares none.
    pub success_status: u16,
    pub source: String,
}
