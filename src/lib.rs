//! # typesift: Composable Queries over Declared Types
//!
//! A query library for locating types, methods and fields by structural
//! criteria (modifiers, annotations, names, signatures, super/subtype
//! relations) without knowing in advance where they are declared.
//!
//! - **Filter pipelines**: immutable, branchable chains of predicates
//! - **Lazy, memoized evaluation**: discovery runs on the first `find`
//! - **Three discovery modes**: ambient, load context, explicit scopes
//! - **Pluggable catalog**: link-time modules, runtime installs, manifests
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                 Entry points (api::entry)                     │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Pipeline          │  Discovery           │  Model           │
//! │                    │                      │                  │
//! │ • Filter<K>        │ • Ambient registry   │ • TypeInfo       │
//! │ • Type/Method/     │ • LoadContext chain  │ • MethodInfo     │
//! │   Field stages     │ • Manifest files     │ • FieldInfo      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use typesift::modifiers::{PUBLIC, STATIC};
//!
//! let services = typesift::types()
//!     .classes()
//!     .non_abstract()
//!     .extending("app::Service");
//!
//! for ty in services.find() {
//!     println!("service: {}", ty.qualified_name());
//! }
//!
//! let has_entry = typesift::methods_within(["app"])
//!     .mods(&[PUBLIC, STATIC])
//!     .name("main")
//!     .is_match();
//! println!("entry point present: {has_entry}");
//! ```

#![warn(missing_docs)]
#![warn(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Core model and pipeline modules
pub mod core {
    //! Entity model, filter pipeline and supporting infrastructure.

    pub mod config;
    pub mod descriptor;
    pub mod errors;
    pub mod model;
    pub mod modifiers;
    pub mod pipeline;
}

// Where candidates come from
pub mod discovery;

// Public entry points
pub mod api {
    //! High-level entry points.

    pub mod entry;
}

// Re-export primary types for convenience
pub use api::entry::{
    fields, fields_in, fields_within, methods, methods_in, methods_within, types, types_in,
    types_within,
};
pub use core::config::{DiscoveryConfig, SiftConfig};
pub use core::descriptor::{FieldDescriptor, MethodDescriptor, TypeDescriptor};
pub use core::errors::{Result, SiftError};
pub use core::model::{
    Annotation, FieldHandle, FieldInfo, Member, MethodHandle, MethodInfo, TypeHandle, TypeInfo,
    TypeKind, TypeName,
};
pub use core::modifiers;
pub use core::pipeline::{EntityKind, FieldFilter, Filter, MethodFilter, TypeFilter};
pub use discovery::{AmbientModule, Discovery, LoadContext, Location, ManifestFile, Module, AMBIENT_MODULES};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
