//! Card catalog loader.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use spire_core::{CardDef, CardTable};
use tracing::debug;

use crate::loaders::{LoadResult, read_file};

/// Card catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardCatalog {
    pub cards: Vec<CardDef>,
}

/// Loader for card catalogs from RON files.
pub struct CardLoader;

impl CardLoader {
    /// Load a card catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<CardTable> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))
    }

    /// Parse catalog text. Duplicate ids are rejected.
    pub fn parse(content: &str) -> LoadResult<CardTable> {
        let catalog: CardCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse card catalog RON: {}", e))?;

        let mut seen = HashSet::new();
        for card in &catalog.cards {
            if !seen.insert(card.id.as_str()) {
                anyhow::bail!("Duplicate card id '{}'", card.id);
            }
        }

        debug!(cards = catalog.cards.len(), "loaded card catalog");
        Ok(catalog.cards.into_iter().collect())
    }
}
