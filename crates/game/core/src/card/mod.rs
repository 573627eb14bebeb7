//! Card templates and per-combat card copies.
//!
//! [`CardDef`] is the immutable template from the content tables, shared by
//! `Arc` between every copy and every fork. [`CardInstance`] is one copy in
//! one pile: it owns the upgrade bit and the per-turn cost override, and moves
//! between piles by value.

mod effect;
mod pile;

pub use effect::{Amount, CardEffect, Condition, DamageTarget, EffectPhase, Hits, PowerTarget};
pub use pile::{PileKind, Piles};

use std::sync::Arc;

use bitflags::bitflags;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardType {
    Attack,
    Skill,
    Power,
    Status,
    Curse,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rarity {
    Basic,
    #[default]
    Common,
    Uncommon,
    Rare,
    /// Generated mid-combat, never offered as a reward.
    Special,
}

/// What a card must be aimed at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetMode {
    /// A single living enemy chosen by the caller.
    Enemy,
    AllEnemies,
    #[default]
    SelfTarget,
    None,
}

impl TargetMode {
    pub const fn needs_target(self) -> bool {
        matches!(self, Self::Enemy)
    }
}

bitflags! {
    /// Destination and lifetime flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct CardFlags: u8 {
        /// Played copies go to the exhaust pile.
        const EXHAUST = 1 << 0;
        /// Exhausted if still in hand at end of turn.
        const ETHEREAL = 1 << 1;
        /// Stays in hand at end of turn.
        const RETAIN = 1 << 2;
        /// Starts on top of the draw pile.
        const INNATE = 1 << 3;
        /// Played copies are shuffled into the draw pile at a random position.
        const SHUFFLE_BACK = 1 << 4;
        const UNPLAYABLE = 1 << 5;
    }
}

bitflags! {
    /// Named tags other cards, powers and relics look for.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct CardTags: u8 {
        const STRIKE = 1 << 0;
        /// Returns from discard to hand on every real stance change.
        const RETURN_ON_STANCE_CHANGE = 1 << 1;
    }
}

#[cfg(feature = "serde")]
mod flag_serde {
    //! Flags are written as `"EXHAUST | RETAIN"` strings in content files.
    use super::{CardFlags, CardTags};

    macro_rules! text_flags {
        ($ty:ty) => {
            impl serde::Serialize for $ty {
                fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    bitflags::serde::serialize(self, serializer)
                }
            }

            impl<'de> serde::Deserialize<'de> for $ty {
                fn deserialize<D: serde::Deserializer<'de>>(
                    deserializer: D,
                ) -> Result<Self, D::Error> {
                    bitflags::serde::deserialize(deserializer)
                }
            }
        };
    }

    text_flags!(CardFlags);
    text_flags!(CardTags);
}

/// Hand-composition requirement checked by `can_play`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayCondition {
    /// No other attack may be in hand.
    OnlyAttackInHand,
}

/// Immutable card template.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardDef {
    pub id: String,
    pub card_type: CardType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rarity: Rarity,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: TargetMode,
    pub cost: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub upgraded_cost: Option<i32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_upgrade: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub block: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub block_upgrade: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub magic: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub magic_upgrade: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: CardFlags,
    /// Flags gained on upgrade.
    #[cfg_attr(feature = "serde", serde(default))]
    pub upgrade_adds: CardFlags,
    /// Flags lost on upgrade.
    #[cfg_attr(feature = "serde", serde(default))]
    pub upgrade_removes: CardFlags,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: CardTags,
    #[cfg_attr(feature = "serde", serde(default))]
    pub condition: Option<PlayCondition>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<CardEffect>,
}

impl CardDef {
    /// Bare template with no stats or effects.
    pub fn new(id: impl Into<String>, card_type: CardType, cost: i32) -> Self {
        Self {
            id: id.into(),
            card_type,
            rarity: Rarity::default(),
            target: TargetMode::default(),
            cost,
            upgraded_cost: None,
            damage: 0,
            damage_upgrade: 0,
            block: 0,
            block_upgrade: 0,
            magic: 0,
            magic_upgrade: 0,
            flags: CardFlags::empty(),
            upgrade_adds: CardFlags::empty(),
            upgrade_removes: CardFlags::empty(),
            tags: CardTags::empty(),
            condition: None,
            effects: Vec::new(),
        }
    }

    pub fn with_target(mut self, target: TargetMode) -> Self {
        self.target = target;
        self
    }

    pub fn with_damage(mut self, damage: i32, upgrade: i32) -> Self {
        self.damage = damage;
        self.damage_upgrade = upgrade;
        self
    }

    pub fn with_block(mut self, block: i32, upgrade: i32) -> Self {
        self.block = block;
        self.block_upgrade = upgrade;
        self
    }

    pub fn with_magic(mut self, magic: i32, upgrade: i32) -> Self {
        self.magic = magic;
        self.magic_upgrade = upgrade;
        self
    }

    pub fn with_flags(mut self, flags: CardFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_tags(mut self, tags: CardTags) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_condition(mut self, condition: PlayCondition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn with_effects(mut self, effects: Vec<CardEffect>) -> Self {
        self.effects = effects;
        self
    }

    pub fn cost(&self, upgraded: bool) -> i32 {
        match (upgraded, self.upgraded_cost) {
            (true, Some(cost)) => cost,
            _ => self.cost,
        }
    }

    pub fn damage(&self, upgraded: bool) -> i32 {
        self.damage + if upgraded { self.damage_upgrade } else { 0 }
    }

    pub fn block(&self, upgraded: bool) -> i32 {
        self.block + if upgraded { self.block_upgrade } else { 0 }
    }

    pub fn magic(&self, upgraded: bool) -> i32 {
        self.magic + if upgraded { self.magic_upgrade } else { 0 }
    }

    pub fn flags(&self, upgraded: bool) -> CardFlags {
        if upgraded {
            (self.flags | self.upgrade_adds) - self.upgrade_removes
        } else {
            self.flags
        }
    }

    pub fn is_attack(&self) -> bool {
        self.card_type == CardType::Attack
    }
}

/// One copy of a card inside a combat.
#[derive(Clone, Debug, PartialEq)]
pub struct CardInstance {
    pub def: Arc<CardDef>,
    pub upgraded: bool,
    /// Cost override until the end of the current turn.
    pub cost_for_turn: Option<i32>,
    /// Unique within one combat; stable across pile moves.
    pub uuid: u32,
}

impl CardInstance {
    pub fn new(def: Arc<CardDef>, upgraded: bool, uuid: u32) -> Self {
        Self {
            def,
            upgraded,
            cost_for_turn: None,
            uuid,
        }
    }

    pub fn id(&self) -> &str {
        &self.def.id
    }

    /// `id`, suffixed with `+` when upgraded.
    pub fn label(&self) -> String {
        if self.upgraded {
            format!("{}+", self.def.id)
        } else {
            self.def.id.clone()
        }
    }

    pub fn card_type(&self) -> CardType {
        self.def.card_type
    }

    pub fn base_cost(&self) -> i32 {
        self.def.cost(self.upgraded)
    }

    /// Energy paid to play this copy now.
    pub fn cost(&self) -> i32 {
        self.cost_for_turn.unwrap_or_else(|| self.base_cost()).max(0)
    }

    pub fn flags(&self) -> CardFlags {
        self.def.flags(self.upgraded)
    }

    pub fn has_flag(&self, flag: CardFlags) -> bool {
        self.flags().contains(flag)
    }

    pub fn has_tag(&self, tag: CardTags) -> bool {
        self.def.tags.contains(tag)
    }

    pub fn damage(&self) -> i32 {
        self.def.damage(self.upgraded)
    }

    pub fn block(&self) -> i32 {
        self.def.block(self.upgraded)
    }

    pub fn magic(&self) -> i32 {
        self.def.magic(self.upgraded)
    }

    /// Where this copy goes after being played. Decided by flags, never by
    /// type; exhaust wins over shuffle-back.
    pub fn play_destination(&self) -> PileKind {
        let flags = self.flags();
        if flags.contains(CardFlags::EXHAUST) {
            PileKind::Exhaust
        } else if flags.contains(CardFlags::SHUFFLE_BACK) {
            PileKind::DrawRandom
        } else {
            PileKind::Discard
        }
    }
}
