//! Enemy catalog loader.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use spire_core::{EnemyDef, EnemyTable};
use tracing::debug;

use crate::loaders::{LoadResult, read_file};

/// Enemy catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyCatalog {
    pub enemies: Vec<EnemyDef>,
}

/// Loader for enemy catalogs from RON files.
pub struct EnemyLoader;

impl EnemyLoader {
    /// Load an enemy catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<EnemyTable> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))
    }

    /// Parse catalog text. Each enemy's AI must only reference its own moves.
    pub fn parse(content: &str) -> LoadResult<EnemyTable> {
        let catalog: EnemyCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse enemy catalog RON: {}", e))?;

        let mut seen = HashSet::new();
        for enemy in &catalog.enemies {
            if !seen.insert(enemy.id.as_str()) {
                anyhow::bail!("Duplicate enemy id '{}'", enemy.id);
            }
            if enemy.hp.min <= 0 || enemy.hp.max < enemy.hp.min {
                anyhow::bail!(
                    "Enemy '{}' has an invalid hp range {}..={}",
                    enemy.id,
                    enemy.hp.min,
                    enemy.hp.max
                );
            }
            enemy.validate()?;
        }

        debug!(enemies = catalog.enemies.len(), "loaded enemy catalog");
        Ok(catalog.enemies.into_iter().collect())
    }
}
