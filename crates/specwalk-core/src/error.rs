use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed opening {path:?}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed parsing {path:?}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("failed parsing {path:?}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid reference format {0}")]
    InvalidRefFormat(String),

    #[error("reference target not found: {0}")]
    RefTargetNotFound(String),

    #[error("circular reference detected: {0}")]
    CircularRef(String),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("failed parsing schema {name}: {source}")]
    Schema {
        name: String,
        #[source]
        source: Box<ParseError>,
    },

    #[error("failed parsing path {path}: {source}")]
    Path {
        path: String,
        #[source]
        source: Box<ParseError>,
    },

    #[error("failed parsing referenced file {file}: {source}")]
    Reference {
        file: String,
        #[source]
        source: Box<ParseError>,
    },

    #[error("failed parsing {doc}: {source}")]
    Document {
        doc: String,
        #[source]
        source: Box<ParseError>,
    },
}

impl ParseError {
    /// The innermost error, skipping the context wrappers.
    pub fn root_cause(&self) -> &ParseError {
        match self {
            ParseError::Schema { source, .. }
            | ParseError::Path { source, .. }
            | ParseError::Reference { source, .. }
            | ParseError::Document { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
