pub mod audit;

use crate::types::catalog::{ClusterMapping, ItemCatalog};
use crate::types::config::CareerConfig;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// Catalog and cluster mapping as loaded for one run.
///
/// Unreadable or malformed sources are replaced by empty fallbacks and
/// reported in `warnings`, so scoring always has something to work with.
#[derive(Debug, Clone, Default)]
pub struct Assessment {
    pub catalog: ItemCatalog,
    pub mapping: ClusterMapping,
    pub digest: String,
    pub warnings: Vec<String>,
}

impl Assessment {
    pub fn used_fallback(&self) -> bool {
        !self.warnings.is_empty()
    }
}

pub fn load_assessment(root: &Path, config: &CareerConfig) -> Assessment {
    let items_path = root.join(config.items_path());
    let mapping_path = root.join(config.mapping_path());
    let mut warnings = Vec::new();
    let mut hasher = Sha256::new();

    let items_source = read_source(&items_path, &mut warnings);
    let catalog = items_source
        .as_deref()
        .map(|content| match ItemCatalog::from_json(content) {
            Ok((catalog, skipped)) => {
                for pool in skipped {
                    tracing::warn!(pool = %pool, "skipping unknown item pool");
                }
                catalog
            }
            Err(e) => {
                fallback_warning(&items_path, &e.to_string(), &mut warnings);
                ItemCatalog::default()
            }
        })
        .unwrap_or_default();

    let mapping_source = read_source(&mapping_path, &mut warnings);
    let mapping = mapping_source
        .as_deref()
        .map(|content| {
            ClusterMapping::from_json(content).unwrap_or_else(|e| {
                fallback_warning(&mapping_path, &e.to_string(), &mut warnings);
                ClusterMapping::default()
            })
        })
        .unwrap_or_default();

    hasher.update(items_source.as_deref().unwrap_or_default());
    hasher.update(mapping_source.as_deref().unwrap_or_default());
    let digest = hasher.finalize();

    tracing::debug!(
        items = catalog.item_count(),
        clusters = mapping.clusters.len(),
        "assessment loaded"
    );

    Assessment {
        catalog,
        mapping,
        digest: format!("{digest:x}"),
        warnings,
    }
}

fn read_source(path: &Path, warnings: &mut Vec<String>) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) => {
            fallback_warning(path, &e.to_string(), warnings);
            None
        }
    }
}

fn fallback_warning(path: &Path, reason: &str, warnings: &mut Vec<String>) {
    tracing::warn!(path = %path.display(), %reason, "using empty fallback");
    warnings.push(format!("could not read {}: {}", path.display(), reason));
}
