//! The content bundle a combat engine borrows.

use spire_core::{
    CardEffect, CardOracle, CardTable, CombatConfig, CombatEngine, EnemyTable, Env, GameEnv,
    IdentifierKind, MoveEffect, PowerId, PowerRegistry, SimError,
};

/// The Watcher's starting deck.
pub const STARTER_DECK: [&str; 10] = [
    "Strike_P", "Strike_P", "Strike_P", "Strike_P", "Defend_P", "Defend_P", "Defend_P",
    "Defend_P", "Eruption", "Vigilance",
];

/// Cards, enemies, power behaviors and rules for one simulation setup.
///
/// Engines borrow from the registry, so it usually lives for the whole
/// program while combats come and go.
#[derive(Debug)]
pub struct ContentRegistry {
    pub cards: CardTable,
    pub enemies: EnemyTable,
    pub powers: PowerRegistry,
    pub config: CombatConfig,
}

impl ContentRegistry {
    /// Bundles catalogs with the standard power behaviors.
    pub fn new(cards: CardTable, enemies: EnemyTable, config: CombatConfig) -> Self {
        Self {
            cards,
            enemies,
            powers: PowerRegistry::standard(),
            config,
        }
    }

    /// The catalogs shipped with the crate.
    #[cfg(feature = "loaders")]
    pub fn builtin() -> crate::loaders::LoadResult<Self> {
        use crate::loaders::{CardLoader, ConfigLoader, EnemyLoader};

        let registry = Self::new(
            CardLoader::parse(include_str!("../data/cards.ron"))?,
            EnemyLoader::parse(include_str!("../data/enemies.ron"))?,
            ConfigLoader::parse(include_str!("../data/config.toml"))?,
        );
        registry.validate()?;
        Ok(registry)
    }

    pub fn with_config(mut self, config: CombatConfig) -> Self {
        self.config = config;
        self
    }

    /// Checks every cross-reference: cards created by cards or enemy moves
    /// exist, and every power applied anywhere has a registered behavior.
    pub fn validate(&self) -> Result<(), SimError> {
        for card in self.cards.iter() {
            for effect in &card.effects {
                for created in effect.created_cards() {
                    self.require_card(created)?;
                }
                self.require_powers(effect)?;
            }
        }

        for enemy in self.enemies.iter() {
            enemy.validate()?;
            for effect in enemy.moves.iter().flat_map(|m| &m.effects) {
                match effect {
                    MoveEffect::SelfPower { power, .. } | MoveEffect::PlayerPower { power, .. } => {
                        self.require_power(*power)?;
                    }
                    MoveEffect::AddCard { card, .. } => self.require_card(card)?,
                }
            }
        }
        Ok(())
    }

    fn require_card(&self, id: &str) -> Result<(), SimError> {
        match self.cards.card(id) {
            Some(_) => Ok(()),
            None => Err(SimError::unknown(IdentifierKind::Card, id)),
        }
    }

    fn require_power(&self, id: PowerId) -> Result<(), SimError> {
        self.powers.require(id).map(|_| ())
    }

    fn require_powers(&self, effect: &CardEffect) -> Result<(), SimError> {
        effect
            .powers()
            .into_iter()
            .try_for_each(|power| self.require_power(power))
    }

    pub fn env(&self) -> GameEnv<'_> {
        Env::new(&self.cards, &self.enemies, &self.powers, &self.config).into_game_env()
    }

    pub fn engine(&self) -> CombatEngine<'_> {
        CombatEngine::new(self.env())
    }
}
