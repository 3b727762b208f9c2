//! Configuration types for typesift discovery.
//!
//! Configuration is plain serde data persisted as YAML. Only ambient
//! discovery reads it; context and scope discovery take their locations from
//! the caller.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, SiftError};
use crate::core::model::scope_is_under;

/// Environment variable consulted for extra manifest paths by default.
pub const DEFAULT_PATH_ENV_VAR: &str = "TYPESIFT_PATH";

/// Top-level typesift configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiftConfig {
    /// Ambient discovery settings
    #[serde(default)]
    pub discovery: DiscoveryConfig,
}

impl SiftConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            SiftError::io(format!("Failed to read config file: {}", path.display()), e)
        })?;

        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn to_yaml_file(&self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let content = serde_yaml::to_string(self)?;
        std::fs::write(&path, content).map_err(|e| {
            SiftError::io(
                format!("Failed to write config file: {}", path.display()),
                e,
            )
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.discovery.validate()
    }
}

/// Settings for ambient discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Manifest files or directories searched by ambient discovery
    pub search_path: Vec<PathBuf>,

    /// Environment variable holding additional search path entries, split
    /// with the platform path separator. `None` disables the lookup.
    pub path_env_var: Option<String>,

    /// Scopes (and everything nested below them) skipped by ambient and
    /// context discovery. Explicit scope discovery ignores this list.
    pub excluded_scope_prefixes: Vec<String>,

    /// File extensions treated as manifests when walking a directory
    pub manifest_extensions: Vec<String>,

    /// Follow symbolic links while walking search path directories
    pub follow_links: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            search_path: Vec::new(),
            path_env_var: Some(DEFAULT_PATH_ENV_VAR.to_string()),
            excluded_scope_prefixes: vec!["std".into(), "core".into(), "alloc".into()],
            manifest_extensions: vec!["yaml".into(), "yml".into(), "json".into()],
            follow_links: false,
        }
    }
}

impl DiscoveryConfig {
    /// Reject empty or dotted extensions, blank env var names and blank exclusions.
    pub fn validate(&self) -> Result<()> {
        if self.manifest_extensions.is_empty() {
            return Err(SiftError::config_field(
                "at least one manifest extension is required",
                "discovery.manifest_extensions",
            ));
        }

        if let Some(bad) = self
            .manifest_extensions
            .iter()
            .find(|ext| ext.trim().is_empty() || ext.starts_with('.'))
        {
            return Err(SiftError::config_field(
                format!("manifest extension '{bad}' must be non-empty and have no leading dot"),
                "discovery.manifest_extensions",
            ));
        }

        if let Some(var) = &self.path_env_var {
            if var.trim().is_empty() {
                return Err(SiftError::config_field(
                    "environment variable name cannot be empty",
                    "discovery.path_env_var",
                ));
            }
        }

        if self
            .excluded_scope_prefixes
            .iter()
            .any(|prefix| prefix.trim().is_empty())
        {
            return Err(SiftError::config_field(
                "excluded scope prefixes cannot be empty (that would exclude everything)",
                "discovery.excluded_scope_prefixes",
            ));
        }

        Ok(())
    }

    /// Configured search path followed by entries from the environment
    /// variable, deduplicated in order of first appearance.
    pub fn resolved_search_path(&self) -> Vec<PathBuf> {
        let from_env = self
            .path_env_var
            .as_deref()
            .and_then(std::env::var_os)
            .map(|raw| std::env::split_paths(&raw).collect::<Vec<_>>())
            .unwrap_or_default();

        let mut seen = HashSet::new();
        self.search_path
            .iter()
            .cloned()
            .chain(from_env)
            .filter(|path| !path.as_os_str().is_empty())
            .filter(|path| seen.insert(path.clone()))
            .collect()
    }

    /// True if `path` has one of the manifest extensions.
    pub fn is_manifest(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.manifest_extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
    }

    /// True if a name in `scope` is hidden from ambient/context discovery.
    pub fn is_excluded_scope(&self, scope: &str) -> bool {
        self.excluded_scope_prefixes
            .iter()
            .any(|prefix| scope_is_under(scope, prefix))
    }
}
