//! Small content set shared by unit tests.

use crate::card::{
    Amount, CardDef, CardEffect, CardFlags, CardTags, CardType, DamageTarget, Hits, PileKind,
    PlayCondition, PowerTarget, TargetMode,
};
use crate::config::CombatConfig;
use crate::enemy::{AiPattern, EnemyDef, HpRange, IntentKind, MoveDef, MoveEffect};
use crate::engine::{CombatEngine, CombatSetup};
use crate::env::{CardTable, EnemyTable, Env};
use crate::power::{PowerId, PowerRegistry};
use crate::rng::StreamSeeds;
use crate::stance::Stance;
use crate::state::Combat;

fn hit() -> CardEffect {
    CardEffect::Damage {
        target: DamageTarget::Chosen,
        hits: Hits::Once,
    }
}

pub(crate) fn cards() -> CardTable {
    [
        CardDef::new("Strike_P", CardType::Attack, 1)
            .with_target(TargetMode::Enemy)
            .with_damage(6, 3)
            .with_tags(CardTags::STRIKE)
            .with_effects(vec![hit()]),
        CardDef::new("Defend_P", CardType::Skill, 1)
            .with_block(5, 3)
            .with_effects(vec![CardEffect::Block(Amount::Block)]),
        CardDef {
            upgraded_cost: Some(1),
            ..CardDef::new("Eruption", CardType::Attack, 2)
                .with_target(TargetMode::Enemy)
                .with_damage(9, 0)
                .with_effects(vec![CardEffect::EnterStance(Stance::Wrath), hit()])
        },
        CardDef::new("Vigilance", CardType::Skill, 2)
            .with_block(8, 4)
            .with_effects(vec![
                CardEffect::EnterStance(Stance::Calm),
                CardEffect::Block(Amount::Block),
            ]),
        CardDef::new("Prostrate", CardType::Skill, 0)
            .with_block(4, 0)
            .with_magic(2, 1)
            .with_effects(vec![
                CardEffect::Mantra(Amount::Magic),
                CardEffect::Block(Amount::Block),
            ]),
        CardDef {
            upgrade_adds: CardFlags::RETAIN,
            ..CardDef::new("Worship", CardType::Skill, 2)
                .with_magic(5, 0)
                .with_effects(vec![CardEffect::Mantra(Amount::Magic)])
        },
        CardDef::new("ThirdEye", CardType::Skill, 1)
            .with_block(7, 2)
            .with_magic(3, 2)
            .with_effects(vec![
                CardEffect::Block(Amount::Block),
                CardEffect::Scry(Amount::Magic),
            ]),
        CardDef::new("CutThroughFate", CardType::Attack, 1)
            .with_target(TargetMode::Enemy)
            .with_damage(7, 2)
            .with_magic(2, 1)
            .with_effects(vec![
                hit(),
                CardEffect::Scry(Amount::Magic),
                CardEffect::Draw(Amount::Fixed(1)),
            ]),
        CardDef::new("FlurryOfBlows", CardType::Attack, 0)
            .with_target(TargetMode::Enemy)
            .with_damage(4, 2)
            .with_tags(CardTags::RETURN_ON_STANCE_CHANGE)
            .with_effects(vec![hit()]),
        CardDef::new("EmptyMind", CardType::Skill, 1)
            .with_magic(2, 1)
            .with_effects(vec![
                CardEffect::ExitStance,
                CardEffect::Draw(Amount::Magic),
            ]),
        CardDef::new("Crescendo", CardType::Skill, 1)
            .with_flags(CardFlags::RETAIN | CardFlags::EXHAUST)
            .with_effects(vec![CardEffect::EnterStance(Stance::Wrath)]),
        CardDef::new("MentalFortress", CardType::Power, 1)
            .with_magic(4, 2)
            .with_flags(CardFlags::EXHAUST)
            .with_effects(vec![CardEffect::ApplyPower {
                power: PowerId::MentalFortress,
                amount: Amount::Magic,
                target: PowerTarget::Player,
            }]),
        CardDef::new("Insight", CardType::Skill, 0)
            .with_magic(2, 1)
            .with_flags(CardFlags::RETAIN | CardFlags::EXHAUST)
            .with_effects(vec![CardEffect::Draw(Amount::Magic)]),
        CardDef::new("Pray", CardType::Skill, 1)
            .with_magic(3, 1)
            .with_effects(vec![
                CardEffect::Mantra(Amount::Magic),
                CardEffect::AddCard {
                    card: "Insight".into(),
                    pile: PileKind::DrawRandom,
                    count: Amount::Fixed(1),
                    upgraded: false,
                },
            ]),
        CardDef::new("SignatureMove", CardType::Attack, 2)
            .with_target(TargetMode::Enemy)
            .with_damage(30, 10)
            .with_condition(PlayCondition::OnlyAttackInHand)
            .with_effects(vec![hit()]),
        CardDef::new("Slimed", CardType::Status, 1)
            .with_flags(CardFlags::EXHAUST)
            .with_target(TargetMode::None),
    ]
    .into_iter()
    .collect()
}

pub(crate) fn enemies() -> EnemyTable {
    [
        EnemyDef {
            id: "TrainingDummy".into(),
            name: "Training Dummy".into(),
            hp: HpRange::fixed(40),
            moves: vec![MoveDef::attack("Hit", 10, 1)],
            ai: AiPattern::Cycle {
                moves: vec!["Hit".into()],
            },
        },
        EnemyDef {
            id: "Pillow".into(),
            name: "Pillow".into(),
            hp: HpRange::fixed(500),
            moves: vec![MoveDef::attack("Nap", 0, 0).with_intent(IntentKind::Buff)],
            ai: AiPattern::Cycle {
                moves: vec!["Nap".into()],
            },
        },
        EnemyDef {
            id: "Urchin".into(),
            name: "Urchin".into(),
            hp: HpRange::fixed(30),
            moves: vec![
                MoveDef::attack("Bristle", 0, 0)
                    .with_intent(IntentKind::Buff)
                    .with_effect(MoveEffect::SelfPower {
                        power: PowerId::Thorns,
                        amount: 3,
                    }),
                MoveDef::attack("Poke", 4, 2),
            ],
            ai: AiPattern::Cycle {
                moves: vec!["Bristle".into(), "Poke".into()],
            },
        },
        EnemyDef {
            id: "Chanter".into(),
            name: "Chanter".into(),
            hp: HpRange { min: 48, max: 54 },
            moves: vec![
                MoveDef::attack("Incantation", 0, 0)
                    .with_intent(IntentKind::Buff)
                    .with_effect(MoveEffect::SelfPower {
                        power: PowerId::Ritual,
                        amount: 3,
                    }),
                MoveDef::attack("DarkStrike", 6, 1),
            ],
            ai: AiPattern::Cycle {
                moves: vec!["Incantation".into(), "DarkStrike".into()],
            },
        },
    ]
    .into_iter()
    .collect()
}

/// Owns content so tests can borrow an engine from it.
pub(crate) struct Fixture {
    pub cards: CardTable,
    pub enemies: EnemyTable,
    pub powers: PowerRegistry,
    pub config: CombatConfig,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_config(CombatConfig::default())
    }

    pub fn with_config(config: CombatConfig) -> Self {
        Self {
            cards: cards(),
            enemies: enemies(),
            powers: PowerRegistry::standard(),
            config,
        }
    }

    pub fn engine(&self) -> CombatEngine<'_> {
        CombatEngine::new(
            Env::new(&self.cards, &self.enemies, &self.powers, &self.config).into_game_env(),
        )
    }

    /// Sets up `deck` against `enemies` with 80/80 hp and seed 42.
    pub fn start(&self, deck: &[&str], enemies: &[&str]) -> Combat {
        let setup = setup(deck, enemies);
        match self.engine().setup(&setup) {
            Ok(combat) => combat,
            Err(error) => panic!("fixture setup failed: {error}"),
        }
    }
}

pub(crate) fn setup(deck: &[&str], enemies: &[&str]) -> CombatSetup {
    CombatSetup::new(
        deck.iter().map(|id| (*id).to_owned()).collect(),
        enemies.iter().map(|id| (*id).to_owned()).collect(),
        StreamSeeds::uniform(42),
    )
    .with_hp(80, 80)
}

/// Index of the first card in hand with `id`.
pub(crate) fn find(combat: &Combat, id: &str) -> usize {
    combat
        .player
        .piles
        .hand
        .iter()
        .position(|card| card.id() == id)
        .unwrap_or_else(|| panic!("{id} not in hand"))
}

/// Swaps the first draw-pile copy of `id` into the hand unless one is
/// already there. Card accounting is unaffected.
pub(crate) fn ensure_in_hand(combat: &mut Combat, id: &str) {
    let piles = &mut combat.player.piles;
    if piles.hand.iter().any(|card| card.id() == id) {
        return;
    }
    let index = piles
        .draw
        .iter()
        .position(|card| card.id() == id)
        .unwrap_or_else(|| panic!("{id} not in draw pile"));
    core::mem::swap(&mut piles.draw[index], &mut piles.hand[0]);
}
