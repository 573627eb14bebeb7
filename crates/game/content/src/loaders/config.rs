//! Combat configuration loader.

use std::path::Path;

use spire_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat rules from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Missing keys take their defaults.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.mantra_threshold == 0 {
            anyhow::bail!("mantra_threshold must be positive");
        }
        if config.draw_per_turn as usize > CombatConfig::MAX_HAND_SIZE {
            anyhow::bail!(
                "draw_per_turn {} exceeds the hand size {}",
                config.draw_per_turn,
                CombatConfig::MAX_HAND_SIZE
            );
        }

        Ok(config)
    }
}
