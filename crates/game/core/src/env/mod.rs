//! Read-only content the engine consults.
//!
//! Oracles expose card and enemy templates. The [`Env`] aggregate bundles
//! them with the power registry and combat rules so the engine reaches
//! everything through one borrowed value, without coupling to the concrete
//! content store. Forks of a combat share an `Env` by reference.
mod oracle;

pub use oracle::{CardOracle, CardTable, EnemyOracle, EnemyTable};

use std::sync::Arc;

use crate::card::CardDef;
use crate::config::CombatConfig;
use crate::enemy::EnemyDef;
use crate::error::{IdentifierKind, SimError};
use crate::power::PowerRegistry;

/// Aggregates the read-only tables required by the engine.
#[derive(Debug)]
pub struct Env<'a, C, E>
where
    C: CardOracle + ?Sized,
    E: EnemyOracle + ?Sized,
{
    cards: &'a C,
    enemies: &'a E,
    powers: &'a PowerRegistry,
    config: &'a CombatConfig,
}

pub type GameEnv<'a> = Env<'a, dyn CardOracle + 'a, dyn EnemyOracle + 'a>;

// Manual impls: derives would demand `C: Copy`, which trait objects never are.
impl<C, E> Clone for Env<'_, C, E>
where
    C: CardOracle + ?Sized,
    E: EnemyOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, E> Copy for Env<'_, C, E>
where
    C: CardOracle + ?Sized,
    E: EnemyOracle + ?Sized,
{
}

impl<'a, C, E> Env<'a, C, E>
where
    C: CardOracle + ?Sized,
    E: EnemyOracle + ?Sized,
{
    pub fn new(
        cards: &'a C,
        enemies: &'a E,
        powers: &'a PowerRegistry,
        config: &'a CombatConfig,
    ) -> Self {
        Self {
            cards,
            enemies,
            powers,
            config,
        }
    }

    pub fn cards(&self) -> &'a C {
        self.cards
    }

    pub fn enemies(&self) -> &'a E {
        self.enemies
    }

    pub fn powers(&self) -> &'a PowerRegistry {
        self.powers
    }

    pub fn config(&self) -> &'a CombatConfig {
        self.config
    }

    /// Looks up a card template.
    ///
    /// # Errors
    ///
    /// Returns `SimError::UnknownIdentifier` naming `id` if the table has no entry.
    pub fn card(&self, id: &str) -> Result<Arc<CardDef>, SimError> {
        self.cards
            .card(id)
            .ok_or_else(|| SimError::unknown(IdentifierKind::Card, id))
    }

    /// Looks up an enemy template.
    ///
    /// # Errors
    ///
    /// Returns `SimError::UnknownIdentifier` naming `id` if the table has no entry.
    pub fn enemy(&self, id: &str) -> Result<Arc<EnemyDef>, SimError> {
        self.enemies
            .enemy(id)
            .ok_or_else(|| SimError::unknown(IdentifierKind::Enemy, id))
    }
}

impl<'a, C, E> Env<'a, C, E>
where
    C: CardOracle + 'a,
    E: EnemyOracle + 'a,
{
    /// Converts this environment into the trait-object based [`GameEnv`].
    pub fn into_game_env(self) -> GameEnv<'a> {
        let cards: &'a dyn CardOracle = self.cards;
        let enemies: &'a dyn EnemyOracle = self.enemies;
        Env::new(cards, enemies, self.powers, self.config)
    }
}
