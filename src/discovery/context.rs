//! Load contexts: named location sets chained to their parents.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use super::location::Location;

/// A set of locations with an optional parent context.
///
/// Discovery scoped to a context sees the context's own locations followed
/// by every ancestor's, each location at most once.
pub struct LoadContext {
    name: String,
    locations: Vec<Arc<dyn Location>>,
    parent: Option<Arc<LoadContext>>,
}

impl LoadContext {
    /// An empty, parentless context.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locations: Vec::new(),
            parent: None,
        }
    }

    /// Attach a location owned by this context.
    pub fn with_location(self, location: impl Location + 'static) -> Self {
        self.with_shared_location(Arc::new(location))
    }

    /// Attach a location that may also be attached elsewhere.
    pub fn with_shared_location(mut self, location: Arc<dyn Location>) -> Self {
        self.locations.push(location);
        self
    }

    /// Chain this context to `parent`.
    pub fn with_parent(mut self, parent: Arc<LoadContext>) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Wrap for use as a parent or an entry-point argument.
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Name used in logs and `Debug` output.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parent context, if any.
    pub fn parent(&self) -> Option<&Arc<LoadContext>> {
        self.parent.as_ref()
    }

    /// Locations attached directly to this context.
    pub fn own_locations(&self) -> &[Arc<dyn Location>] {
        &self.locations
    }

    /// This context followed by its parent, grandparent, and so on.
    pub fn ancestors(&self) -> impl Iterator<Item = &LoadContext> {
        std::iter::successors(Some(self), |context| context.parent.as_deref())
    }

    /// Every location visible from this context, deduplicated by id.
    pub fn locations(&self) -> Vec<Arc<dyn Location>> {
        dedupe_locations(
            self.ancestors()
                .flat_map(|context| context.locations.iter().cloned()),
        )
    }
}

impl fmt::Debug for LoadContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadContext")
            .field("name", &self.name)
            .field(
                "locations",
                &self.locations.iter().map(|l| l.id()).collect::<Vec<_>>(),
            )
            .field("parent", &self.parent.as_ref().map(|p| p.name()))
            .finish()
    }
}

/// Keep the first location seen for each id.
pub(crate) fn dedupe_locations<I>(locations: I) -> Vec<Arc<dyn Location>>
where
    I: IntoIterator<Item = Arc<dyn Location>>,
{
    let mut seen = HashSet::new();
    locations
        .into_iter()
        .filter(|location| seen.insert(location.id().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::location::Module;

    #[test]
    fn locations_walk_ancestors_child_first() {
        let root = LoadContext::new("root")
            .with_location(Module::new("core"))
            .into_shared();
        let middle = LoadContext::new("middle")
            .with_location(Module::new("lib"))
            .with_parent(root)
            .into_shared();
        let leaf = LoadContext::new("leaf")
            .with_location(Module::new("app"))
            .with_parent(middle);

        let ids: Vec<_> = leaf.locations().iter().map(|l| l.id().to_string()).collect();
        assert_eq!(ids, vec!["app", "lib", "core"]);
        assert_eq!(
            leaf.ancestors().map(LoadContext::name).collect::<Vec<_>>(),
            vec!["leaf", "middle", "root"]
        );
    }

    #[test]
    fn shared_locations_appear_once() {
        let shared = Module::new("shared").into_shared();
        let parent = LoadContext::new("parent")
            .with_shared_location(shared.clone())
            .into_shared();
        let child = LoadContext::new("child")
            .with_shared_location(shared)
            .with_location(Module::new("shared"))
            .with_parent(parent);

        assert_eq!(child.locations().len(), 1);
    }
}
