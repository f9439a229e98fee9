pub mod config;
pub mod error;
pub mod merge;
pub mod model;
pub mod parse;
pub mod text;
pub mod transform;

pub use merge::merge_documents;
pub use transform::{Conventions, parse_document, parse_file};
