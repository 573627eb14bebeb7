//! Content factory for building a registry from data files.

use std::path::{Path, PathBuf};

use spire_core::{CardTable, CombatConfig, EnemyTable};
use tracing::info;

use crate::loaders::{CardLoader, ConfigLoader, EnemyLoader, LoadResult};
use crate::registry::ContentRegistry;

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── cards.ron
/// └── enemies.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat rules from `config.toml`, or defaults when the file is absent.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(CombatConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the card catalog from `cards.ron`.
    pub fn load_cards(&self) -> LoadResult<CardTable> {
        CardLoader::load(&self.data_dir.join("cards.ron"))
    }

    /// Load the enemy catalog from `enemies.ron`.
    pub fn load_enemies(&self) -> LoadResult<EnemyTable> {
        EnemyLoader::load(&self.data_dir.join("enemies.ron"))
    }

    /// Load everything and check cross-references.
    pub fn load_registry(&self) -> LoadResult<ContentRegistry> {
        let registry = ContentRegistry::new(
            self.load_cards()?,
            self.load_enemies()?,
            self.load_config()?,
        );
        registry.validate()?;
        info!(
            dir = %self.data_dir.display(),
            cards = registry.cards.len(),
            enemies = registry.enemies.len(),
            "content loaded"
        );
        Ok(registry)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
