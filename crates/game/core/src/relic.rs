//! Combat-relevant relics held by the player.

use crate::card::{CardInstance, CardTags, CardType};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Relic {
    /// +3 damage on cards tagged Strike.
    StrikeDummy,
    /// +4 damage on zero-cost attacks.
    WristBlade,
    /// +1 energy when leaving Calm.
    VioletLotus,
}

impl Relic {
    /// Flat bonus added at the first step of the damage pipeline.
    pub fn flat_damage_bonus(self, card: &CardInstance) -> i32 {
        match self {
            Self::StrikeDummy if card.has_tag(CardTags::STRIKE) => 3,
            Self::WristBlade if card.card_type() == CardType::Attack && card.cost() == 0 => 4,
            _ => 0,
        }
    }

    pub fn calm_exit_bonus(self) -> i32 {
        match self {
            Self::VioletLotus => 1,
            _ => 0,
        }
    }
}

/// Total flat damage bonus of `relics` for `card`.
pub fn flat_damage_bonus(relics: &[Relic], card: &CardInstance) -> i32 {
    relics.iter().map(|relic| relic.flat_damage_bonus(card)).sum()
}
