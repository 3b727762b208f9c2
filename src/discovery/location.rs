//! The location port: named sources of type entries.

use std::fmt;
use std::sync::Arc;

use crate::core::descriptor::TypeDescriptor;
use crate::core::errors::{Result, SiftError};
use crate::core::model::{TypeHandle, TypeInfo, TypeName};

/// A source of entries that discovery enumerates.
///
/// Implementations report an unreadable or malformed location through
/// [`entries`](Location::entries); discovery logs the error and treats the
/// location as empty.
pub trait Location: Send + Sync + fmt::Debug {
    /// Stable identity. Two locations with the same id are the same location.
    fn id(&self) -> &str;

    /// Enumerate the named entries this location exposes.
    fn entries(&self) -> Result<Vec<Entry>>;
}

type Resolver = Arc<dyn Fn() -> Result<TypeInfo> + Send + Sync>;

/// A named entry that can be materialized into a type.
///
/// Materialization is deferred so that a location can be listed cheaply and
/// filtered by scope before any entry is resolved.
#[derive(Clone)]
pub struct Entry {
    name: TypeName,
    resolver: Resolver,
}

impl Entry {
    /// An entry named `name`, resolved by calling `resolve`.
    pub fn new<F>(name: impl Into<TypeName>, resolve: F) -> Self
    where
        F: Fn() -> Result<TypeInfo> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            resolver: Arc::new(resolve),
        }
    }

    /// An entry materializing `descriptor`.
    pub fn from_descriptor(descriptor: TypeDescriptor) -> Self {
        let name = TypeName::new(&descriptor.name);
        Self::new(name, move || descriptor.materialize())
    }

    /// Qualified name of the type this entry resolves to.
    pub fn name(&self) -> &TypeName {
        &self.name
    }

    /// Resolve the entry. The resolved type must carry the entry's name.
    pub fn materialize(&self) -> Result<TypeHandle> {
        let info = (self.resolver)()?;
        if info.qualified_name() != &self.name {
            return Err(SiftError::resolution(
                self.name.as_str(),
                format!("entry resolved to a different type '{}'", info.qualified_name()),
            ));
        }
        Ok(Arc::new(info))
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry").field("name", &self.name).finish_non_exhaustive()
    }
}

/// An in-memory location built in code.
#[derive(Debug, Clone)]
pub struct Module {
    id: String,
    entries: Vec<Entry>,
}

impl Module {
    /// An empty module with the given location id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            entries: Vec::new(),
        }
    }

    /// Declare a type from its descriptor. Validation happens at discovery.
    pub fn declare(mut self, descriptor: TypeDescriptor) -> Self {
        self.entries.push(Entry::from_descriptor(descriptor));
        self
    }

    /// Declare a type whose resolution may fail (e.g. a missing dependency).
    pub fn declare_with<F>(mut self, name: impl Into<TypeName>, resolve: F) -> Self
    where
        F: Fn() -> Result<TypeInfo> + Send + Sync + 'static,
    {
        self.entries.push(Entry::new(name, resolve));
        self
    }

    /// Add a prebuilt entry.
    pub fn with_entry(mut self, entry: Entry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Number of declared entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Wrap for use with `LoadContext::with_shared_location` or `ambient::install`.
    pub fn into_shared(self) -> Arc<dyn Location> {
        Arc::new(self)
    }
}

impl Location for Module {
    fn id(&self) -> &str {
        &self.id
    }

    fn entries(&self) -> Result<Vec<Entry>> {
        Ok(self.entries.clone())
    }
}
