//! The generic filter stage.
//!
//! A [`Filter`] is a handle to one node of an immutable chain. The root node
//! owns the [`Discovery`] configuration and accepts everything; every builder
//! call allocates a child node holding one predicate and a shared reference
//! to its parent. Parents can therefore be reused as the base of several
//! independent chains.
//!
//! Terminal evaluation ([`Filter::find`], [`Filter::is_match`]) runs discovery
//! once per node and memoizes the result on that node. Sibling nodes built
//! from the same parent evaluate independently.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::core::model::{Member, TypeName};
use crate::core::modifiers::{fold_flags, has_flags};
use crate::discovery::Discovery;

/// An entity kind a filter can range over.
pub trait EntityKind: Send + Sync + 'static {
    /// The entity handle collected into result sets.
    type Entity: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static;

    /// Short label used in logs.
    const LABEL: &'static str;

    /// Produce the deduplicated raw candidates visible under `discovery`.
    ///
    /// Must not fail: unresolvable candidates are left out.
    fn accumulate(discovery: &Discovery) -> HashSet<Self::Entity>;
}

type Predicate<E> = Box<dyn Fn(&E) -> bool + Send + Sync>;

enum Link<K: EntityKind> {
    Root(Discovery),
    Parent(Arc<Node<K>>),
}

struct Node<K: EntityKind> {
    link: Link<K>,
    predicate: Predicate<K::Entity>,
    results: OnceCell<HashSet<K::Entity>>,
}

impl<K: EntityKind> Node<K> {
    fn parent(&self) -> Option<&Node<K>> {
        match &self.link {
            Link::Parent(parent) => Some(&**parent),
            Link::Root(_) => None,
        }
    }
}

/// A stage of a filter pipeline over entities of kind `K`.
///
/// Cloning a `Filter` clones the handle, not the stage: clones share the
/// same memoized result.
pub struct Filter<K: EntityKind> {
    node: Arc<Node<K>>,
}

impl<K: EntityKind> Clone for Filter<K> {
    fn clone(&self) -> Self {
        Self {
            node: Arc::clone(&self.node),
        }
    }
}

impl<K: EntityKind> Filter<K> {
    /// A root stage searching `discovery` and accepting every entity.
    pub fn root(discovery: Discovery) -> Self {
        Self {
            node: Arc::new(Node {
                link: Link::Root(discovery),
                predicate: Box::new(|_: &K::Entity| true),
                results: OnceCell::new(),
            }),
        }
    }

    pub(crate) fn derive<F>(&self, predicate: F) -> Self
    where
        F: Fn(&K::Entity) -> bool + Send + Sync + 'static,
    {
        Self {
            node: Arc::new(Node {
                link: Link::Parent(Arc::clone(&self.node)),
                predicate: Box::new(predicate),
                results: OnceCell::new(),
            }),
        }
    }

    /// Add a caller-defined predicate to the chain.
    pub fn matching<F>(&self, predicate: F) -> Self
    where
        F: Fn(&K::Entity) -> bool + Send + Sync + 'static,
    {
        self.derive(predicate)
    }

    /// All entities passing every predicate in the chain.
    ///
    /// The first call runs discovery; later calls (from any thread) return
    /// the same set. Concurrent first calls block on a single evaluation.
    pub fn find(&self) -> &HashSet<K::Entity> {
        self.node.results.get_or_init(|| self.evaluate())
    }

    /// Whether at least one entity passes the chain. Shares `find`'s memo.
    pub fn is_match(&self) -> bool {
        !self.find().is_empty()
    }

    /// The conjunction of this stage's predicate and all of its ancestors'.
    pub fn test(&self, entity: &K::Entity) -> bool {
        self.nodes().all(|node| (node.predicate)(entity))
    }

    /// The discovery configuration owned by the chain's root.
    pub fn discovery(&self) -> &Discovery {
        let mut node = &*self.node;
        loop {
            match &node.link {
                Link::Root(discovery) => return discovery,
                Link::Parent(parent) => node = &**parent,
            }
        }
    }

    /// Whether this stage has been evaluated.
    pub fn is_evaluated(&self) -> bool {
        self.node.results.get().is_some()
    }

    /// Number of predicates added on top of the root.
    pub fn depth(&self) -> usize {
        self.nodes().count() - 1
    }

    fn nodes(&self) -> impl Iterator<Item = &Node<K>> {
        std::iter::successors(Some(&*self.node), |node| node.parent())
    }

    fn evaluate(&self) -> HashSet<K::Entity> {
        let discovery = self.discovery();
        let candidates = K::accumulate(discovery);
        let total = candidates.len();

        let matched: HashSet<_> = candidates
            .into_iter()
            .filter(|entity| self.test(entity))
            .collect();

        debug!(
            kind = K::LABEL,
            discovery = %discovery,
            depth = self.depth(),
            candidates = total,
            matched = matched.len(),
            "Evaluated filter stage"
        );
        matched
    }
}

/// Predicates shared by every entity kind.
impl<K> Filter<K>
where
    K: EntityKind,
    K::Entity: Member,
{
    /// Keep entities whose name equals `name` exactly.
    pub fn name(&self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.derive(move |entity| entity.name() == name)
    }

    /// Keep entities carrying every bit of `bits`. A zero mask keeps everything.
    pub fn mask(&self, bits: u32) -> Self {
        self.derive(move |entity| has_flags(entity.modifiers(), bits))
    }

    /// Keep entities carrying every listed modifier flag.
    pub fn mods(&self, flags: &[u32]) -> Self {
        self.mask(fold_flags(flags))
    }

    /// Keep entities annotated with every listed annotation type.
    pub fn tagged<I, T>(&self, annotation_types: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TypeName>,
    {
        let wanted: Vec<TypeName> = annotation_types.into_iter().map(Into::into).collect();
        self.derive(move |entity| wanted.iter().all(|ty| entity.is_annotated_with(ty)))
    }
}

impl<K: EntityKind> fmt::Debug for Filter<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("kind", &K::LABEL)
            .field("discovery", self.discovery())
            .field("depth", &self.depth())
            .field("evaluated", &self.is_evaluated())
            .finish()
    }
}

#[cfg(test)]
#[path = "stage_tests.rs"]
mod tests;
