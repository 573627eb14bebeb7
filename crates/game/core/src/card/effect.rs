//! Typed card effect descriptors.
//!
//! Each card carries a list of [`CardEffect`]s. The engine sorts them by
//! [`EffectPhase`] (stable, so authoring order breaks ties) and dispatches on
//! the variant; there is no string-keyed effect lookup anywhere.

use crate::power::PowerId;
use crate::stance::Stance;

use super::{CardInstance, CardType, PileKind};

/// A number taken from the card's upgrade-aware stats or fixed in data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Amount {
    Damage,
    Block,
    Magic,
    Fixed(i32),
}

impl Amount {
    pub fn resolve(self, card: &CardInstance) -> i32 {
        match self {
            Self::Damage => card.damage(),
            Self::Block => card.block(),
            Self::Magic => card.magic(),
            Self::Fixed(value) => value,
        }
    }

    /// Non-negative count form of [`resolve`](Self::resolve).
    pub fn count(self, card: &CardInstance) -> u32 {
        self.resolve(card).max(0).unsigned_abs()
    }
}

/// Number of hits in a damage effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Hits {
    #[default]
    Once,
    Fixed(u32),
    /// The card's magic number.
    Magic,
    /// One hit per living enemy.
    PerEnemy,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageTarget {
    /// The enemy chosen when the card was played.
    #[default]
    Chosen,
    AllEnemies,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PowerTarget {
    #[default]
    Player,
    Chosen,
    AllEnemies,
}

/// Condition evaluated when a [`CardEffect::Conditional`] resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Condition {
    InStance(Stance),
    /// Type of the card played immediately before this one this turn.
    LastCardWas(CardType),
    TargetIntendsAttack,
}

/// Resolution phase. Effects of one card resolve in this order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EffectPhase {
    Damage,
    Block,
    Stance,
    Generation,
    Power,
    /// Turn-ending effects run after everything else on the card.
    Finish,
}

/// One effect of a card.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardEffect {
    /// Deal the card's damage.
    Damage {
        #[cfg_attr(feature = "serde", serde(default))]
        target: DamageTarget,
        #[cfg_attr(feature = "serde", serde(default))]
        hits: Hits,
    },
    /// Gain block through the block pipeline.
    Block(Amount),
    EnterStance(Stance),
    /// Return to Neutral.
    ExitStance,
    Mantra(Amount),
    Draw(Amount),
    Scry(Amount),
    GainEnergy(Amount),
    ApplyPower {
        power: PowerId,
        amount: Amount,
        #[cfg_attr(feature = "serde", serde(default))]
        target: PowerTarget,
    },
    /// Create copies of a card (logged as created).
    AddCard {
        card: String,
        pile: PileKind,
        count: Amount,
        #[cfg_attr(feature = "serde", serde(default))]
        upgraded: bool,
    },
    /// Every card in hand costs this much until end of turn (only lowers).
    SetHandCostForTurn(i32),
    EndTurn,
    Conditional {
        condition: Condition,
        then: Vec<CardEffect>,
        #[cfg_attr(feature = "serde", serde(default))]
        otherwise: Vec<CardEffect>,
    },
}

impl CardEffect {
    pub fn phase(&self) -> EffectPhase {
        match self {
            Self::Damage { .. } => EffectPhase::Damage,
            Self::Block(_) => EffectPhase::Block,
            Self::EnterStance(_) | Self::ExitStance | Self::Mantra(_) => EffectPhase::Stance,
            Self::Draw(_)
            | Self::Scry(_)
            | Self::GainEnergy(_)
            | Self::AddCard { .. }
            | Self::SetHandCostForTurn(_) => EffectPhase::Generation,
            Self::ApplyPower { .. } => EffectPhase::Power,
            Self::EndTurn => EffectPhase::Finish,
            Self::Conditional {
                then, otherwise, ..
            } => then
                .first()
                .or_else(|| otherwise.first())
                .map_or(EffectPhase::Generation, Self::phase),
        }
    }

    /// Effects in resolution order.
    pub fn ordered(effects: &[CardEffect]) -> Vec<CardEffect> {
        let mut ordered = effects.to_vec();
        ordered.sort_by_key(Self::phase);
        ordered
    }

    /// Power ids this effect (or its branches) applies.
    pub fn powers(&self) -> Vec<PowerId> {
        match self {
            Self::ApplyPower { power, .. } => vec![*power],
            Self::Conditional {
                then, otherwise, ..
            } => then.iter().chain(otherwise).flat_map(Self::powers).collect(),
            _ => Vec::new(),
        }
    }

    /// Card ids this effect (or its branches) creates.
    pub fn created_cards(&self) -> Vec<&str> {
        match self {
            Self::AddCard { card, .. } => vec![card.as_str()],
            Self::Conditional {
                then, otherwise, ..
            } => then
                .iter()
                .chain(otherwise)
                .flat_map(Self::created_cards)
                .collect(),
            _ => Vec::new(),
        }
    }
}
