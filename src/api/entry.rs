//! Entry points: root stages for each entity kind and discovery mode.
//!
//! Every function returns a fresh root that accepts all entities visible
//! under its discovery configuration. Nothing is discovered until a stage
//! built from it is evaluated.

use std::sync::Arc;

use crate::core::pipeline::{FieldFilter, Filter, MethodFilter, TypeFilter};
use crate::discovery::{Discovery, LoadContext};

/// All types visible to the process.
pub fn types() -> TypeFilter {
    Filter::root(Discovery::Ambient)
}

/// All methods of types visible to the process.
pub fn methods() -> MethodFilter {
    Filter::root(Discovery::Ambient)
}

/// All fields of types visible to the process.
pub fn fields() -> FieldFilter {
    Filter::root(Discovery::Ambient)
}

/// Types visible to `context` and its ancestors.
pub fn types_in(context: &Arc<LoadContext>) -> TypeFilter {
    Filter::root(Discovery::context(Arc::clone(context)))
}

/// Methods of types visible to `context` and its ancestors.
pub fn methods_in(context: &Arc<LoadContext>) -> MethodFilter {
    Filter::root(Discovery::context(Arc::clone(context)))
}

/// Fields of types visible to `context` and its ancestors.
pub fn fields_in(context: &Arc<LoadContext>) -> FieldFilter {
    Filter::root(Discovery::context(Arc::clone(context)))
}

/// Types declared directly in one of `scopes`.
///
/// Types in nested scopes are not included: `app` does not cover
/// `app::net::Socket`. Ambient exclusions do not apply, so `std` may be
/// named explicitly.
pub fn types_within<I, S>(scopes: I) -> TypeFilter
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Filter::root(Discovery::scopes(scopes))
}

/// Methods of types declared directly in one of `scopes`.
pub fn methods_within<I, S>(scopes: I) -> MethodFilter
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Filter::root(Discovery::scopes(scopes))
}

/// Fields of types declared directly in one of `scopes`.
pub fn fields_within<I, S>(scopes: I) -> FieldFilter
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Filter::root(Discovery::scopes(scopes))
}
