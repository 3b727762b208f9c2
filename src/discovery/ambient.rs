//! The ambient environment: everything visible to the process by default.
//!
//! Three sources make up the ambient location set, in this order:
//!
//! 1. modules registered at link time through [`AMBIENT_MODULES`];
//! 2. locations installed at runtime with [`install`];
//! 3. manifest files found on the configured search path.
//!
//! The set is recomputed on every resolution so that installs and search
//! path changes are seen by filters evaluated afterwards.
//!
//! ```rust,ignore
//! use typesift::discovery::{AmbientModule, Module, AMBIENT_MODULES};
//!
//! #[linkme::distributed_slice(AMBIENT_MODULES)]
//! static APP_TYPES: AmbientModule = AmbientModule {
//!     name: "app",
//!     build: || Module::new("app").declare(TypeDescriptor::class("app::Service")),
//! };
//! ```

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use tracing::{debug, info};

use crate::core::config::DiscoveryConfig;
use crate::core::errors::Result;

use super::context::{dedupe_locations, LoadContext};
use super::location::{Location, Module};
use super::manifest::locations_on_search_path;

/// Name of the snapshot context returned by [`context`].
pub const AMBIENT_CONTEXT_NAME: &str = "ambient";

/// Link-time registration of an ambient module.
pub struct AmbientModule {
    /// Human-readable name used in logs
    pub name: &'static str,
    /// Builds the module; called once per process
    pub build: fn() -> Module,
}

#[linkme::distributed_slice]
pub static AMBIENT_MODULES: [AmbientModule] = [..];

static REGISTERED: Lazy<Vec<Arc<dyn Location>>> = Lazy::new(|| {
    AMBIENT_MODULES
        .iter()
        .map(|registration| {
            let module = (registration.build)();
            debug!(
                name = registration.name,
                id = module.id(),
                entries = module.len(),
                "Built ambient module"
            );
            module.into_shared()
        })
        .collect()
});

static INSTALLED: Lazy<RwLock<Vec<Arc<dyn Location>>>> = Lazy::new(|| RwLock::new(Vec::new()));

static CONFIG: Lazy<RwLock<DiscoveryConfig>> =
    Lazy::new(|| RwLock::new(DiscoveryConfig::default()));

/// Install a location into the ambient environment, replacing any
/// installed location with the same id.
pub fn install(location: Arc<dyn Location>) {
    let mut installed = INSTALLED.write();
    installed.retain(|existing| existing.id() != location.id());
    info!(id = location.id(), "Installed ambient location");
    installed.push(location);
}

/// Remove an installed location. Link-time modules cannot be removed.
pub fn uninstall(id: &str) -> bool {
    let mut installed = INSTALLED.write();
    let before = installed.len();
    installed.retain(|existing| existing.id() != id);
    before != installed.len()
}

/// Remove every runtime-installed location.
pub fn clear_installed() {
    INSTALLED.write().clear();
}

/// Replace the process-wide discovery configuration.
pub fn configure(config: DiscoveryConfig) -> Result<()> {
    config.validate()?;
    *CONFIG.write() = config;
    Ok(())
}

/// Snapshot of the process-wide discovery configuration.
pub fn config() -> DiscoveryConfig {
    CONFIG.read().clone()
}

/// Names of the link-time registrations.
pub fn registered_modules() -> Vec<&'static str> {
    AMBIENT_MODULES.iter().map(|registration| registration.name).collect()
}

/// Every location currently visible to the process, deduplicated by id.
pub fn locations() -> Vec<Arc<dyn Location>> {
    let config = config();
    let installed = INSTALLED.read().clone();

    dedupe_locations(
        REGISTERED
            .iter()
            .cloned()
            .chain(installed)
            .chain(locations_on_search_path(&config)),
    )
}

/// A context holding a snapshot of the ambient locations, usable as the
/// parent of caller-defined contexts.
pub fn context() -> LoadContext {
    locations()
        .into_iter()
        .fold(LoadContext::new(AMBIENT_CONTEXT_NAME), |context, location| {
            context.with_shared_location(location)
        })
}
