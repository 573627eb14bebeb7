//! Scenario files: a deck, an encounter and seeds, stored as RON.

use std::path::Path;

use serde::{Deserialize, Serialize};
use spire_content::ContentRegistry;
use spire_core::rng::seed_from_str;
use spire_core::{Combat, CombatSetup, Relic, StreamSeeds};

use crate::error::{Result, RuntimeError};

/// How a scenario seeds the four combat streams.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioSeeds {
    /// Every stream gets the same seed.
    Uniform(i64),
    /// Explicit per-stream seeds.
    Streams(StreamSeeds),
    /// A run seed string (as shown in game) plus the floor number.
    Run { seed: String, floor: i32 },
}

impl ScenarioSeeds {
    pub fn resolve(&self) -> Result<StreamSeeds> {
        Ok(match self {
            Self::Uniform(seed) => StreamSeeds::uniform(*seed),
            Self::Streams(seeds) => *seeds,
            Self::Run { seed, floor } => StreamSeeds::for_floor(seed_from_str(seed)?, *floor),
        })
    }
}

fn default_hp() -> i32 {
    CombatSetup::DEFAULT_PLAYER_HP
}

fn default_energy() -> i32 {
    CombatSetup::DEFAULT_ENERGY
}

/// Scenario configuration for one combat.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    /// Card ids; a trailing `+` marks an upgraded copy.
    pub deck: Vec<String>,
    pub enemies: Vec<String>,
    #[serde(default = "default_hp")]
    pub player_hp: i32,
    /// Defaults to `player_hp`.
    #[serde(default)]
    pub player_max_hp: Option<i32>,
    #[serde(default = "default_energy")]
    pub energy: i32,
    #[serde(default)]
    pub relics: Vec<Relic>,
    pub seeds: ScenarioSeeds,
}

impl Scenario {
    pub fn combat_setup(&self) -> Result<CombatSetup> {
        if self.deck.is_empty() {
            return Err(RuntimeError::InvalidScenario(format!(
                "scenario '{}' has an empty deck",
                self.name
            )));
        }
        Ok(CombatSetup::new(
            self.deck.clone(),
            self.enemies.clone(),
            self.seeds.resolve()?,
        )
        .with_hp(self.player_hp, self.player_max_hp.unwrap_or(self.player_hp))
        .with_energy(self.energy)
        .with_relics(self.relics.clone()))
    }

    /// Sets the combat up against `registry`.
    pub fn setup(&self, registry: &ContentRegistry) -> Result<Combat> {
        tracing::info!(
            scenario = %self.name,
            deck = self.deck.len(),
            enemies = ?self.enemies,
            "setting up scenario"
        );
        Ok(registry.engine().setup(&self.combat_setup()?)?)
    }

    pub fn from_ron(text: &str) -> Result<Self> {
        ron::from_str(text).map_err(|e| {
            RuntimeError::InvalidScenario(format!("Failed to parse scenario RON: {}", e))
        })
    }

    /// Load scenario from a RON file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RuntimeError::InvalidScenario(format!("Failed to read scenario file: {}", e))
        })?;
        Self::from_ron(&content)
    }
}

#[cfg(test)]
mod tests {
    use spire_core::rng::seed_to_string;

    use super::*;

    #[test]
    fn defaults_fill_in_the_player() {
        let scenario = Scenario::from_ron(
            r#"(
                name: "dummy",
                deck: ["Strike_P", "Defend_P+"],
                enemies: ["TrainingDummy"],
                seeds: Uniform(3),
            )"#,
        )
        .unwrap();
        let setup = scenario.combat_setup().unwrap();
        assert_eq!(setup.player_hp, 72);
        assert_eq!(setup.player_max_hp, 72);
        assert_eq!(setup.energy, 3);
        assert_eq!(setup.seeds, StreamSeeds::uniform(3));
    }

    #[test]
    fn run_seeds_are_offset_by_floor() {
        let seed = ScenarioSeeds::Run {
            seed: seed_to_string(1234),
            floor: 5,
        };
        assert_eq!(seed.resolve().unwrap(), StreamSeeds::uniform(1239));
    }

    #[test]
    fn bad_seed_strings_are_rejected() {
        let seed = ScenarioSeeds::Run {
            seed: "ABC!".into(),
            floor: 1,
        };
        assert!(matches!(seed.resolve(), Err(RuntimeError::Seed(_))));
    }

    #[test]
    fn unknown_cards_surface_from_setup() {
        let registry = ContentRegistry::builtin().unwrap();
        let scenario = Scenario {
            name: "typo".into(),
            deck: vec!["Strik_P".into()],
            enemies: vec!["JawWorm".into()],
            player_hp: 50,
            player_max_hp: None,
            energy: 3,
            relics: Vec::new(),
            seeds: ScenarioSeeds::Uniform(1),
        };
        assert!(matches!(
            scenario.setup(&registry),
            Err(RuntimeError::Sim(spire_core::SimError::UnknownIdentifier { .. }))
        ));
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.ron");
        std::fs::write(
            &path,
            r#"(name: "s", deck: ["Strike_P"], enemies: ["Cultist"], seeds: Streams((shuffle: 1, card: 2, ai: 3, monster_hp: 4)))"#,
        )
        .unwrap();
        let scenario = Scenario::load_from_file(&path).unwrap();
        assert_eq!(scenario.seeds.resolve().unwrap().monster_hp, 4);
    }
}
