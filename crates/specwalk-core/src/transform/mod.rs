pub mod consts;
pub mod convention;
pub mod document;
pub mod naming;
mod operation_resolver;
pub mod ref_resolver;
mod schema_resolver;
pub mod type_mapper;

pub use convention::{Convention, ConventionId, Conventions, GoConvention, JsConvention};
pub use document::{parse_document, parse_document_with, parse_file};
pub use ref_resolver::ResolveContext;
pub use type_mapper::TypeMapper;
