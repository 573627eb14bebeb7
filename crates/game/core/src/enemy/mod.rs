//! Enemy templates: HP ranges, moves and intent AI.

mod ai;

pub use ai::{AiPattern, Fallback, WeightedMove};

use crate::card::PileKind;
use crate::error::{IdentifierKind, SimError};
use crate::power::PowerId;
use crate::rng::GameRng;

/// Inclusive HP range rolled at setup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HpRange {
    pub min: i32,
    pub max: i32,
}

impl HpRange {
    pub const fn fixed(hp: i32) -> Self {
        Self { min: hp, max: hp }
    }

    /// Rolls from the monster-HP stream. Degenerate ranges consume nothing.
    pub fn roll(self, rng: &mut GameRng) -> i32 {
        if self.max > self.min {
            rng.random_range(self.min, self.max)
        } else {
            self.min
        }
    }
}

/// Intent category shown to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum IntentKind {
    Attack,
    AttackDefend,
    AttackBuff,
    AttackDebuff,
    Defend,
    Buff,
    Debuff,
    Unknown,
}

impl IntentKind {
    pub const fn is_attack(self) -> bool {
        matches!(
            self,
            Self::Attack | Self::AttackDefend | Self::AttackBuff | Self::AttackDebuff
        )
    }
}

/// Non-damage consequences of an enemy move.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveEffect {
    /// Stack a power on the acting enemy.
    SelfPower { power: PowerId, amount: i32 },
    /// Stack a power on the player.
    PlayerPower { power: PowerId, amount: i32 },
    /// Shuffle status cards into one of the player's piles.
    AddCard {
        card: String,
        pile: PileKind,
        count: u32,
    },
}

/// One enemy move.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveDef {
    pub id: String,
    pub intent: IntentKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage: i32,
    #[cfg_attr(feature = "serde", serde(default = "default_hits"))]
    pub hits: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub block: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<MoveEffect>,
}

#[cfg(feature = "serde")]
const fn default_hits() -> u32 {
    1
}

impl MoveDef {
    pub fn attack(id: impl Into<String>, damage: i32, hits: u32) -> Self {
        Self {
            id: id.into(),
            intent: IntentKind::Attack,
            damage,
            hits,
            block: 0,
            effects: Vec::new(),
        }
    }

    pub fn with_intent(mut self, intent: IntentKind) -> Self {
        self.intent = intent;
        self
    }

    pub fn with_block(mut self, block: i32) -> Self {
        self.block = block;
        self
    }

    pub fn with_effect(mut self, effect: MoveEffect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn is_attack(&self) -> bool {
        self.intent.is_attack() && self.hits > 0
    }
}

/// Immutable enemy template.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyDef {
    pub id: String,
    pub name: String,
    pub hp: HpRange,
    pub moves: Vec<MoveDef>,
    pub ai: AiPattern,
}

impl EnemyDef {
    pub fn move_index(&self, id: &str) -> Result<usize, SimError> {
        self.moves
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| SimError::unknown(IdentifierKind::Move, format!("{}.{id}", self.id)))
    }

    pub fn move_def(&self, index: usize) -> Option<&MoveDef> {
        self.moves.get(index)
    }

    /// Checks that every move the AI can pick exists.
    pub fn validate(&self) -> Result<(), SimError> {
        for id in self.ai.referenced_moves() {
            self.move_index(id)?;
        }
        if self.moves.is_empty() {
            return Err(SimError::unknown(
                IdentifierKind::Move,
                format!("{}.<none>", self.id),
            ));
        }
        Ok(())
    }

    /// Picks the next move, consuming one `random(99)` from `ai` plus one
    /// fallback coin when a repeat limit is hit.
    pub fn roll_move(&self, history: &[usize], ai: &mut GameRng) -> Result<usize, SimError> {
        self.ai.roll(self, history, ai)
    }
}
