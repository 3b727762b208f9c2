//! Entity discovery: where filters find their candidates.
//!
//! A [`Discovery`] value names one of three search configurations. Resolving
//! it yields locations, locations yield entries, and entries materialize into
//! types. Every step is best effort: a location that cannot be read and an
//! entry that cannot be resolved are logged and skipped, never reported to
//! the filter that triggered discovery.

pub mod ambient;
pub mod context;
pub mod location;
pub mod manifest;

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::core::model::TypeHandle;

pub use ambient::{AmbientModule, AMBIENT_MODULES};
pub use context::LoadContext;
pub use location::{Entry, Location, Module};
pub use manifest::ManifestFile;

/// Where a filter chain searches for entities. Owned by the chain's root.
#[derive(Debug, Clone)]
pub enum Discovery {
    /// Everything visible to the process (see [`ambient`]).
    Ambient,
    /// A load context and all of its ancestors.
    Context(Arc<LoadContext>),
    /// Ambient locations restricted to types declared directly in one of
    /// the named scopes. Nested scopes are not included.
    Scopes(Vec<String>),
}

impl Discovery {
    /// Search `context` and its ancestors.
    pub fn context(context: Arc<LoadContext>) -> Self {
        Self::Context(context)
    }

    /// Search the named scopes only. Names are trimmed.
    pub fn scopes<I, S>(scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::Scopes(
            scopes
                .into_iter()
                .map(|scope| scope.as_ref().trim().to_string())
                .collect(),
        )
    }

    /// Resolve to the deduplicated locations this configuration searches.
    pub fn locations(&self) -> Vec<Arc<dyn Location>> {
        match self {
            Self::Ambient | Self::Scopes(_) => ambient::locations(),
            Self::Context(context) => context.locations(),
        }
    }

    /// Scan every location and keep the entries this configuration admits.
    pub fn entries(&self) -> Vec<Entry> {
        let config = ambient::config();
        let mut admitted = Vec::new();

        for location in self.locations() {
            let entries = match location.entries() {
                Ok(entries) => entries,
                Err(err) => {
                    warn!(location = location.id(), error = %err, "Skipping unreadable location");
                    continue;
                }
            };

            admitted.extend(entries.into_iter().filter(|entry| {
                let scope = entry.name().scope();
                match self {
                    Self::Scopes(scopes) => scopes.iter().any(|wanted| wanted == scope),
                    Self::Ambient | Self::Context(_) => !config.is_excluded_scope(scope),
                }
            }));
        }

        admitted
    }

    /// Materialize every admitted entry, skipping those that fail.
    pub fn types(&self) -> HashSet<TypeHandle> {
        let mut types = HashSet::new();
        let mut skipped = 0usize;

        for entry in self.entries() {
            match entry.materialize() {
                Ok(handle) => {
                    types.insert(handle);
                }
                Err(err) => {
                    skipped += 1;
                    debug!(entity = %entry.name(), error = %err, "Skipping unresolvable entry");
                }
            }
        }

        debug!(discovery = %self, resolved = types.len(), skipped, "Materialized types");
        types
    }
}

impl fmt::Display for Discovery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ambient => f.write_str("ambient"),
            Self::Context(context) => write!(f, "context '{}'", context.name()),
            Self::Scopes(scopes) => write!(f, "scopes [{}]", scopes.join(", ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::descriptor::TypeDescriptor;
    use crate::core::errors::SiftError;
    use crate::core::model::{Member, TypeName};

    fn context_with(module: Module) -> Discovery {
        Discovery::context(LoadContext::new("test").with_location(module).into_shared())
    }

    #[test]
    fn types_skip_unresolvable_entries() {
        let discovery = context_with(
            Module::new("app")
                .declare(TypeDescriptor::class("app::Good"))
                .declare_with("app::Bad", || {
                    Err(SiftError::resolution("app::Bad", "initializer failed"))
                }),
        );

        let names: Vec<_> = discovery.types().iter().map(|t| t.name().to_string()).collect();
        assert_eq!(names, vec!["app::Good"]);
    }

    #[test]
    fn context_discovery_applies_default_exclusions() {
        let discovery = context_with(
            Module::new("mixed")
                .declare(TypeDescriptor::class("std::string::String"))
                .declare(TypeDescriptor::class("app::Kept")),
        );

        let types = discovery.types();
        assert_eq!(types.len(), 1);
        assert!(types
            .iter()
            .all(|t| t.qualified_name() == &TypeName::new("app::Kept")));
    }

    #[test]
    fn same_type_from_two_locations_is_deduplicated() {
        let discovery = Discovery::context(
            LoadContext::new("dup")
                .with_location(Module::new("a").declare(TypeDescriptor::class("app::Twice")))
                .with_location(Module::new("b").declare(TypeDescriptor::class("app::Twice")))
                .into_shared(),
        );

        assert_eq!(discovery.entries().len(), 2);
        assert_eq!(discovery.types().len(), 1);
    }

    #[test]
    fn display_names_the_mode() {
        assert_eq!(Discovery::Ambient.to_string(), "ambient");
        assert_eq!(
            Discovery::scopes(["pkg1", " pkg2 "]).to_string(),
            "scopes [pkg1, pkg2]"
        );
    }
}
