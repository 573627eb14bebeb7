//! Deterministic Watcher combat simulation.
//!
//! `spire-core` defines the canonical combat rules (stances, mantra, powers,
//! the damage pipeline, enemy AI) over seeded RNG streams that reproduce the
//! reference game's draws. All state mutation flows through
//! [`engine::CombatEngine`]; a [`Combat`] is a plain value, so forking for
//! search is a `clone()`. Content and tooling crates depend on the types
//! re-exported here.
pub mod action;
pub mod card;
pub mod combat;
pub mod config;
pub mod enemy;
pub mod engine;
pub mod env;
pub mod error;
pub mod power;
pub mod relic;
pub mod rng;
pub mod snapshot;
pub mod stance;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use action::{Action, IllegalAction, can_play, legal_actions};
pub use card::{
    Amount, CardDef, CardEffect, CardFlags, CardInstance, CardTags, CardType, Condition,
    DamageTarget, Hits, PileKind, Piles, PlayCondition, PowerTarget, Rarity, TargetMode,
};
pub use combat::{
    DamageClass, HitResult, Modifiers, apply_hit, calculate_block, calculate_damage,
    calculate_incoming_damage, calculate_monster_damage,
};
pub use config::{CombatConfig, EnemyBlockDecay, MantraOverflow};
pub use enemy::{AiPattern, EnemyDef, Fallback, HpRange, IntentKind, MoveDef, MoveEffect, WeightedMove};
pub use engine::{CombatEngine, CombatSetup, Outcome, Policy, RunResult, parse_deck_entry};
pub use env::{CardOracle, CardTable, EnemyOracle, EnemyTable, Env, GameEnv};
pub use error::{ErrorSeverity, GameError, IdentifierKind, SimError};
pub use power::{Power, PowerBehavior, PowerDecay, PowerId, PowerKind, PowerRegistry, PowerTrigger, Powers};
pub use relic::Relic;
pub use rng::{GameRng, RngStreams, StreamKind, StreamSeeds};
pub use snapshot::{EnemySnapshot, IntentSnapshot, PlayerSnapshot, PowerSnapshot, StateSnapshot};
pub use stance::{Mantra, Stance, StanceChange, StanceMultipliers, StanceRules, change_stance};
pub use state::{Combat, CombatEvent, Creature, EnemyState, PendingChoice, Phase, PlayerState};
