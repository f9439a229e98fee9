use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{ParseError, ResolveError};
use crate::model::Api;
use crate::parse::reference::Reference;

use super::document::{DocumentParser, parse_file};

/// State shared by every document parsed in one run.
///
/// Parsed external documents are cached by their resolved path, so a file referenced from
/// several places is parsed once. Documents currently being parsed sit on an in-flight stack;
/// re-entering one of them is a circular reference.
#[derive(Debug, Default)]
pub struct ResolveContext {
    cache: HashMap<PathBuf, Api>,
    in_flight: Vec<PathBuf>,
}

impl ResolveContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached external documents.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    pub fn cached(&self, path: &Path) -> Option<&Api> {
        self.cache.get(&cache_key(path))
    }

    pub(super) fn store(&mut self, path: &Path, api: Api) {
        self.cache.insert(cache_key(path), api);
    }

    /// Push `path` onto the in-flight stack, failing if it is already there.
    pub(super) fn enter(&mut self, path: &Path) -> Result<PathBuf, ResolveError> {
        let key = cache_key(path);
        if let Some(pos) = self.in_flight.iter().position(|p| *p == key) {
            let chain: Vec<String> = self.in_flight[pos..]
                .iter()
                .chain(std::iter::once(&key))
                .map(|p| p.display().to_string())
                .collect();
            return Err(ResolveError::CircularRef(chain.join(" -> ")));
        }
        self.in_flight.push(key.clone());
        Ok(key)
    }

    pub(super) fn leave(&mut self, key: &Path) {
        if let Some(pos) = self.in_flight.iter().rposition(|p| p == key) {
            self.in_flight.remove(pos);
        }
    }
}

fn cache_key(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

impl DocumentParser<'_, '_> {
    /// Pull in the path item at `ref_path`, which names another document. Its methods,
    /// schemas and constants are appended to this document's, and the parsed document is
    /// recorded under the reference's file path. A file already merged into this document
    /// is not merged again.
    pub(super) fn resolve_path_ref(&mut self, path: &str, ref_path: &str) -> Result<(), ParseError> {
        let reference = Reference::parse(ref_path).ok_or_else(|| {
            ResolveError::InvalidRefFormat(format!("{ref_path:?} for path {path}"))
        })?;
        let Some(file) = reference.file else {
            return Err(ResolveError::InvalidRefFormat(format!(
                "{ref_path:?} for path {path}: path item references must name a file"
            ))
            .into());
        };

        if self.api.ref_docs.contains_key(file) {
            log::trace!("{file} already merged, skipping");
            return Ok(());
        }

        let full = match &self.base_dir {
            Some(dir) => dir.join(file),
            None => PathBuf::from(file),
        };
        let cached = self.ctx.cached(&full).cloned();
        let nested = match cached {
            Some(api) => {
                log::trace!("using cached {}", full.display());
                api
            }
            None => {
                log::debug!("resolving {} for path {path}", full.display());
                let api = parse_file(&full, self.conventions, self.ctx).map_err(|e| {
                    ParseError::Reference {
                        file: file.to_string(),
                        source: Box::new(e),
                    }
                })?;
                self.ctx.store(&full, api.clone());
                api
            }
        };

        self.api.methods.extend(nested.methods.iter().cloned());
        self.api.schemas.extend(nested.schemas.iter().cloned());
        self.api.consts.extend(nested.consts.iter().cloned());
        self.api.ref_docs.insert(file.to_string(), nested);
        Ok(())
    }
}
