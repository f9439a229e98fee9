use std::path::Path;

use crate::error::ParseError;
use crate::model::{Api, Spec};
use crate::transform::{Conventions, ResolveContext, parse_file};

/// Parse every document in `paths` and combine them into one API.
///
/// The first document supplies the title, description, names, version and contact. Servers,
/// methods, schemas and constants of all documents are concatenated in input order. The
/// manifest holds one entry per document, ordered by directory name.
pub fn merge_documents<P: AsRef<Path>>(
    paths: &[P],
    conventions: &Conventions,
) -> Result<Api, ParseError> {
    let mut ctx = ResolveContext::new();
    let mut merged: Option<Api> = None;
    let mut specs = Vec::with_capacity(paths.len());

    for path in paths {
        let path = path.as_ref();
        let doc = path.display().to_string();
        let mut api =
            parse_file(path, conventions, &mut ctx).map_err(|e| ParseError::Document {
                doc: doc.clone(),
                source: Box::new(e),
            })?;
        tag_sources(&mut api, &doc);

        specs.push(Spec {
            doc,
            dir: dir_name(path),
            title: api.title.clone(),
            names: api.names.clone(),
        });

        merged = Some(match merged.take() {
            None => api,
            Some(mut acc) => {
                acc.servers.extend(api.servers);
                acc.methods.extend(api.methods);
                acc.schemas.extend(api.schemas);
                acc.consts.extend(api.consts);
                acc.ref_docs.extend(api.ref_docs);
                acc
            }
        });
    }

    let mut api = merged.unwrap_or_default();
    specs.sort_by(|a, b| a.dir.cmp(&b.dir));
    api.specs = specs;
    log::debug!(
        "merged {} documents: {} schemas, {} methods, {} consts",
        api.specs.len(),
        api.schemas.len(),
        api.methods.len(),
        api.consts.len()
    );
    Ok(api)
}

/// Give every entity without an origin the document path `doc`.
pub fn tag_sources(api: &mut Api, doc: &str) {
    for schema in api.schemas.iter_mut().filter(|s| s.source.is_empty()) {
        schema.source = doc.to_string();
    }
    for method in api.methods.iter_mut().filter(|m| m.source.is_empty()) {
        method.source = doc.to_string();
    }
    for c in api.consts.iter_mut().filter(|c| c.source.is_empty()) {
        c.source = doc.to_string();
    }
}

/// Name of the directory holding `path`, `.` for bare file names.
fn dir_name(path: &Path) -> String {
    path.parent()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .unwrap_or(".")
        .to_string()
}
