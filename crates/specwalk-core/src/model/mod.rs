pub mod api;
pub mod consts;
pub mod operations;
pub mod schemas;

pub use api::{Api, Contact, Server, Spec};
pub use consts::{Const, ConstValue};
pub use operations::{HttpMethod, Method};
pub use schemas::{Discriminator, Param, ParamLocation, RequiredIf, Schema, TypeExpr};

use indexmap::IndexMap;

/// Values computed once per registered naming convention, keyed by convention id.
pub type PerConvention<T> = IndexMap<String, T>;
