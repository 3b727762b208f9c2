//! Manifest files: on-disk YAML or JSON catalogs of type descriptors.
//!
//! A manifest looks like:
//!
//! ```yaml
//! types:
//!   - name: app::model::User
//!     modifiers: [public]
//!     supertypes: [app::model::Entity]
//!     fields:
//!       - { name: id, type: u64, modifiers: [public, final] }
//! ```
//!
//! The document is parsed when the location is scanned; each element of
//! `types` is only deserialized into a [`TypeDescriptor`] when its entry is
//! materialized, so one bad element does not poison its neighbours.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use serde_yaml::Value;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::core::config::DiscoveryConfig;
use crate::core::descriptor::TypeDescriptor;
use crate::core::errors::{Result, SiftError};
use crate::core::model::TypeName;

use super::location::{Entry, Location};

#[derive(Debug, Default, Deserialize)]
struct ManifestDocument {
    #[serde(default)]
    types: Vec<Value>,
}

/// A manifest file on disk. Its id is its path.
#[derive(Debug, Clone)]
pub struct ManifestFile {
    path: PathBuf,
    id: String,
}

impl ManifestFile {
    /// A manifest location for `path`. Nothing is read until it is scanned.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let id = path.display().to_string();
        Self { path, id }
    }

    /// Path of the manifest on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_json(&self) -> bool {
        self.path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    }

    /// `.json` files are held to strict JSON; everything else is read as YAML.
    fn parse(&self, content: &str) -> Result<ManifestDocument> {
        let parsed = if self.is_json() {
            serde_json::from_str(content).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str(content).map_err(|e| e.to_string())
        };
        parsed.map_err(|message| SiftError::manifest(&self.id, message))
    }
}

impl Location for ManifestFile {
    fn id(&self) -> &str {
        &self.id
    }

    fn entries(&self) -> Result<Vec<Entry>> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            SiftError::io(format!("Failed to read manifest: {}", self.path.display()), e)
        })?;

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let document = self.parse(&content)?;

        Ok(document
            .types
            .into_iter()
            .enumerate()
            .filter_map(|(index, raw)| entry_from_value(&self.id, index, raw))
            .collect())
    }
}

fn entry_from_value(location: &str, index: usize, raw: Value) -> Option<Entry> {
    let Some(name) = raw.get("name").and_then(Value::as_str).map(TypeName::new) else {
        debug!(location, index, "Skipping manifest element without a name");
        return None;
    };

    let location = location.to_string();
    let entity = name.clone();
    Some(Entry::new(name, move || {
        let descriptor: TypeDescriptor = serde_yaml::from_value(raw.clone())
            .map_err(|e| SiftError::resolution(entity.as_str(), format!("{location}: {e}")))?;
        descriptor.materialize()
    }))
}

/// Expand the configured search path into manifest locations.
///
/// Directories contribute every manifest file beneath them. Any other path
/// with a manifest extension is taken as a manifest file and fails
/// (harmlessly) at scan time if it cannot be read; other paths are skipped.
pub fn locations_on_search_path(config: &DiscoveryConfig) -> Vec<Arc<dyn Location>> {
    let mut locations: Vec<Arc<dyn Location>> = Vec::new();

    for path in config.resolved_search_path() {
        if !path.is_dir() {
            if config.is_manifest(&path) {
                locations.push(Arc::new(ManifestFile::new(path)));
            } else {
                debug!(path = %path.display(), "Skipping search path entry without a manifest extension");
            }
            continue;
        }

        let walker = WalkDir::new(&path)
            .follow_links(config.follow_links)
            .sort_by_file_name();

        for entry in walker {
            match entry {
                Ok(entry) if entry.file_type().is_file() && config.is_manifest(entry.path()) => {
                    locations.push(Arc::new(ManifestFile::new(entry.into_path())));
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(root = %path.display(), error = %err, "Failed to walk search path entry");
                }
            }
        }
    }

    locations
}
