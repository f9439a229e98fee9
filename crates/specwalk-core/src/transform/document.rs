use std::path::{Path, PathBuf};

use crate::error::ParseError;
use crate::model::{Api, Contact, Param, Server};
use crate::parse::{self, Node};

use super::consts::ConstRegistry;
use super::convention::Conventions;
use super::naming::capitalize_words;
use super::ref_resolver::ResolveContext;
use super::type_mapper::TypeMapper;

/// Shared path parameters waiting to be folded into a request-body schema.
#[derive(Debug)]
pub(super) struct PendingMerge {
    pub schema: String,
    pub params: Vec<Param>,
}

/// Builds the API model of a single document.
///
/// Schemas and methods are collected first; shared path parameters destined for request-body
/// schemas are recorded as [`PendingMerge`]s and only applied in [`DocumentParser::finish`],
/// so no already-built entity is touched mid-walk.
pub(super) struct DocumentParser<'a, 'c> {
    pub root: &'a Node,
    /// Path of the document, empty for in-memory documents.
    pub origin: String,
    /// Directory relative file references are resolved against.
    pub base_dir: Option<PathBuf>,
    pub conventions: &'a Conventions,
    pub mapper: TypeMapper<'a>,
    pub ctx: &'c mut ResolveContext,
    pub api: Api,
    pub consts: ConstRegistry,
    pub pending: Vec<PendingMerge>,
}

impl<'a, 'c> DocumentParser<'a, 'c> {
    fn new(
        root: &'a Node,
        location: Option<&Path>,
        conventions: &'a Conventions,
        ctx: &'c mut ResolveContext,
    ) -> Self {
        Self {
            root,
            origin: location
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            base_dir: location.and_then(|p| p.parent()).map(Path::to_path_buf),
            conventions,
            mapper: TypeMapper::new(root, conventions),
            ctx,
            api: Api::default(),
            consts: ConstRegistry::new(),
            pending: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Api, ParseError> {
        self.parse_info();
        self.parse_servers();
        self.resolve_schemas()?;
        self.resolve_paths()?;
        Ok(self.finish())
    }

    fn parse_info(&mut self) {
        let root = self.root;
        let api = &mut self.api;
        api.title = root.str(&["info", "title"]).to_string();
        api.description = root.str(&["info", "description"]).to_string();
        api.names = self.conventions.map(|c| c.api_name(&api.title));
        api.version = root.str(&["info", "version"]).to_string();
        api.contact = Contact {
            name: root.str(&["info", "contact", "name"]).to_string(),
            url: root.str(&["info", "contact", "url"]).to_string(),
        };
    }

    fn parse_servers(&mut self) {
        self.api.servers = self
            .root
            .slice(&["servers"])
            .iter()
            .map(|server| Server {
                url: server.str(&["url"]).to_string(),
                name: capitalize_words(server.str(&["x-name"])),
                description: server.str(&["description"]).to_string(),
            })
            .collect();
    }

    /// Apply pending parameter merges and emit the collected constants.
    fn finish(mut self) -> Api {
        for merge in self.pending.drain(..) {
            for schema in self
                .api
                .schemas
                .iter_mut()
                .filter(|s| s.name == merge.schema)
            {
                schema.params.extend(merge.params.iter().cloned());
            }
        }

        let origin = self.origin;
        let consts = self.consts.finish(self.conventions);
        self.api
            .consts
            .extend(consts.into_iter().map(|mut c| {
                c.source = origin.clone();
                c
            }));

        log::debug!(
            "parsed {}: {} schemas, {} methods, {} consts",
            if origin.is_empty() { "<memory>" } else { origin.as_str() },
            self.api.schemas.len(),
            self.api.methods.len(),
            self.api.consts.len()
        );
        self.api
    }
}

/// Parse an in-memory document. Relative external references resolve against the
/// current directory.
pub fn parse_document(root: &Node, conventions: &Conventions) -> Result<Api, ParseError> {
    let mut ctx = ResolveContext::new();
    parse_document_with(root, None, conventions, &mut ctx)
}

/// Parse a document located at `location` (if known), sharing `ctx` with any other parse
/// of the same run.
pub fn parse_document_with(
    root: &Node,
    location: Option<&Path>,
    conventions: &Conventions,
    ctx: &mut ResolveContext,
) -> Result<Api, ParseError> {
    DocumentParser::new(root, location, conventions, ctx).run()
}

/// Load and parse the document at `path`.
///
/// The document stays on the context's in-flight stack while it is parsed; meeting it again
/// through an external reference is reported as a circular reference.
pub fn parse_file(
    path: &Path,
    conventions: &Conventions,
    ctx: &mut ResolveContext,
) -> Result<Api, ParseError> {
    let key = ctx.enter(path)?;
    let result = parse::load_file(path)
        .map_err(ParseError::from)
        .and_then(|root| parse_document_with(&root, Some(path), conventions, ctx));
    ctx.leave(&key);
    result
}
