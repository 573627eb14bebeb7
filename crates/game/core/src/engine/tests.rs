use proptest::prelude::*;

use super::*;
use crate::action::Action;
use crate::config::MantraOverflow;
use crate::error::IdentifierKind;
use crate::power::PowerId;
use crate::stance::Stance;
use crate::state::Creature;
use crate::testing::{Fixture, ensure_in_hand, find, setup};

fn start_with_energy(fixture: &Fixture, deck: &[&str], enemies: &[&str], energy: i32) -> Combat {
    fixture
        .engine()
        .setup(&setup(deck, enemies).with_energy(energy))
        .expect("setup")
}

fn play(engine: &CombatEngine<'_>, combat: &mut Combat, id: &str, target: Option<usize>) {
    let index = find(combat, id);
    engine
        .apply_in_place(combat, Action::play(index, target))
        .unwrap_or_else(|error| panic!("playing {id}: {error}"));
}

fn attack_first(combat: &Combat, legal: &[Action]) -> Action {
    legal
        .iter()
        .find(|action| match action {
            Action::PlayCard { hand_index, .. } => combat.player.piles.hand[*hand_index].def.is_attack(),
            _ => false,
        })
        .or_else(|| legal.iter().find(|action| action.is_end_turn()))
        .or_else(|| legal.first())
        .cloned()
        .expect("legal actions are never empty")
}

#[test]
fn setup_draws_a_hand_and_rolls_intents() {
    let fixture = Fixture::new();
    let deck = [
        "Strike_P", "Strike_P", "Strike_P", "Strike_P", "Defend_P", "Defend_P", "Defend_P",
        "Defend_P", "Eruption", "Vigilance",
    ];
    let combat = fixture.start(&deck, &["TrainingDummy"]);

    assert_eq!(combat.turn, 1);
    assert_eq!(combat.phase, Phase::PlayerTurn);
    assert_eq!(combat.player.energy, 3);
    assert_eq!(combat.player.piles.hand.len(), 5);
    assert_eq!(combat.player.piles.draw.len(), 5);
    assert_eq!(combat.enemies[0].hp, 40);
    assert_eq!(combat.enemies[0].intent().map(|m| m.id.as_str()), Some("Hit"));
    assert!(matches!(
        combat.events().first(),
        Some(CombatEvent::CombatStarted { .. })
    ));
    // One intent roll on the AI stream, nothing on card effects.
    assert_eq!(combat.rng.ai.counter(), 1);
    assert_eq!(combat.rng.card.counter(), 0);
    assert_eq!(combat.rng.shuffle.counter(), 1);
}

#[test]
fn same_seed_gives_the_same_combat() {
    let fixture = Fixture::new();
    let deck = ["Strike_P", "Defend_P", "Eruption", "Vigilance", "Pray", "ThirdEye", "Worship"];
    let a = fixture.start(&deck, &["Chanter"]);
    let b = fixture.start(&deck, &["Chanter"]);
    assert_eq!(a, b);
    assert!((48..=54).contains(&a.enemies[0].hp));
}

#[test]
fn unknown_identifiers_are_reported() {
    let fixture = Fixture::new();
    let error = fixture
        .engine()
        .setup(&setup(&["Strike_P", "Ragnarok"], &["TrainingDummy"]))
        .unwrap_err();
    assert_eq!(error, SimError::unknown(IdentifierKind::Card, "Ragnarok"));

    let error = fixture
        .engine()
        .setup(&setup(&["Strike_P"], &["Hexaghost"]))
        .unwrap_err();
    assert_eq!(error, SimError::unknown(IdentifierKind::Enemy, "Hexaghost"));
}

#[test]
fn setup_requires_enemies() {
    let fixture = Fixture::new();
    let error = fixture.engine().setup(&setup(&["Strike_P"], &[])).unwrap_err();
    assert!(matches!(error, SimError::InvalidSetup { .. }));
}

#[test]
fn setup_rejects_hp_above_max() {
    let fixture = Fixture::new();
    let error = fixture
        .engine()
        .setup(&setup(&["Strike_P"], &["TrainingDummy"]).with_hp(90, 80))
        .unwrap_err();
    assert!(matches!(error, SimError::InvalidSetup { .. }), "{error}");
}

#[test]
fn illegal_actions_leave_state_untouched() {
    let fixture = Fixture::new();
    let engine = fixture.engine();
    let combat = start_with_energy(&fixture, &["Eruption", "Strike_P"], &["TrainingDummy"], 1);

    let eruption = find(&combat, "Eruption");
    let strike = find(&combat, "Strike_P");
    let cases = [
        (
            Action::play(eruption, Some(0)),
            IllegalAction::InsufficientEnergy { cost: 2, energy: 1 },
        ),
        (
            Action::play(9, Some(0)),
            IllegalAction::InvalidHandIndex {
                index: 9,
                hand_size: 2,
            },
        ),
        (
            Action::play(strike, None),
            IllegalAction::InvalidTarget { target: None },
        ),
        (
            Action::play(strike, Some(3)),
            IllegalAction::InvalidTarget { target: Some(3) },
        ),
        (
            Action::Scry { discard: vec![] },
            IllegalAction::NoChoicePending,
        ),
    ];
    for (action, expected) in cases {
        let mut copy = combat.clone();
        let error = engine.apply_in_place(&mut copy, action).unwrap_err();
        assert_eq!(error, SimError::IllegalAction(expected));
        assert_eq!(copy, combat);
    }
}

#[test]
fn hand_composition_condition_blocks_play() {
    let fixture = Fixture::new();
    let combat = fixture.start(&["SignatureMove", "Strike_P"], &["TrainingDummy"]);
    let signature = find(&combat, "SignatureMove");
    assert!(!fixture.engine().can_play(&combat, signature));
    assert!(
        !fixture
            .engine()
            .legal_actions(&combat)
            .contains(&Action::play(signature, Some(0)))
    );
    let error = fixture
        .engine()
        .apply(&combat, Action::play(signature, Some(0)))
        .unwrap_err();
    assert!(matches!(
        error,
        SimError::IllegalAction(IllegalAction::ConditionNotMet { .. })
    ));
}

#[test]
fn eruption_hits_before_entering_wrath() {
    let fixture = Fixture::new();
    let engine = fixture.engine();
    let mut combat = fixture.start(&["Eruption", "Strike_P"], &["Pillow"]);

    play(&engine, &mut combat, "Eruption", Some(0));
    assert_eq!(combat.enemies[0].hp, 491);
    assert_eq!(combat.player.stance, Stance::Wrath);

    play(&engine, &mut combat, "Strike_P", Some(0));
    assert_eq!(combat.enemies[0].hp, 479);
    assert_eq!(combat.player.energy, 0);
}

#[test]
fn leaving_calm_refunds_energy() {
    let fixture = Fixture::new();
    let engine = fixture.engine();
    let mut combat = start_with_energy(&fixture, &["Vigilance", "Eruption"], &["Pillow"], 4);

    play(&engine, &mut combat, "Vigilance", None);
    assert_eq!(combat.player.stance, Stance::Calm);
    assert_eq!(combat.player.block, 8);
    assert_eq!(combat.player.energy, 2);

    play(&engine, &mut combat, "Eruption", Some(0));
    assert_eq!(combat.player.stance, Stance::Wrath);
    assert_eq!(combat.player.energy, 2);
}

#[test]
fn mantra_enters_divinity_once_and_divinity_ends_with_the_turn() {
    let fixture = Fixture::new();
    let engine = fixture.engine();
    let mut combat = start_with_energy(
        &fixture,
        &["Worship", "Worship", "Prostrate", "Strike_P"],
        &["Pillow"],
        5,
    );

    play(&engine, &mut combat, "Worship", None);
    assert_eq!(combat.player.mantra.value(), 5);
    play(&engine, &mut combat, "Worship", None);
    assert_eq!(combat.player.stance, Stance::Divinity);
    assert_eq!(combat.player.mantra.value(), 0);
    // 5 - 2 - 2 + 3 on entering Divinity.
    assert_eq!(combat.player.energy, 4);

    play(&engine, &mut combat, "Prostrate", None);
    assert_eq!(combat.player.mantra.value(), 2);

    play(&engine, &mut combat, "Strike_P", Some(0));
    assert_eq!(combat.enemies[0].hp, 500 - 18);

    let entries = combat
        .events()
        .iter()
        .filter(|event| {
            matches!(
                event,
                CombatEvent::StanceChanged {
                    to: Stance::Divinity,
                    ..
                }
            )
        })
        .count();
    assert_eq!(entries, 1);

    engine.apply_in_place(&mut combat, Action::EndTurn).unwrap();
    assert_eq!(combat.turn, 2);
    assert_eq!(combat.player.stance, Stance::Neutral);
    assert_eq!(combat.player.mantra.value(), 2);
}

#[test]
fn carried_mantra_survives_the_divinity_transition() {
    let config = CombatConfig::default().with_mantra_overflow(MantraOverflow::Carry);
    let fixture = Fixture::with_config(config);
    let engine = fixture.engine();
    let mut combat = start_with_energy(
        &fixture,
        &["Worship", "Prostrate", "Prostrate", "Prostrate"],
        &["Pillow"],
        5,
    );

    play(&engine, &mut combat, "Prostrate", None);
    play(&engine, &mut combat, "Prostrate", None);
    play(&engine, &mut combat, "Prostrate", None);
    assert_eq!(combat.player.mantra.value(), 6);
    play(&engine, &mut combat, "Worship", None);
    assert_eq!(combat.player.stance, Stance::Divinity);
    assert_eq!(combat.player.mantra.value(), 1);
}

#[test]
fn flurry_returns_to_hand_on_stance_change() {
    let fixture = Fixture::new();
    let engine = fixture.engine();
    let mut combat = fixture.start(&["FlurryOfBlows", "Crescendo", "Defend_P"], &["Pillow"]);

    play(&engine, &mut combat, "FlurryOfBlows", Some(0));
    assert!(combat.player.piles.discard.iter().any(|c| c.id() == "FlurryOfBlows"));

    play(&engine, &mut combat, "Crescendo", None);
    assert_eq!(combat.player.stance, Stance::Wrath);
    assert!(combat.player.piles.hand.iter().any(|c| c.id() == "FlurryOfBlows"));
    assert!(combat.player.piles.exhaust.iter().any(|c| c.id() == "Crescendo"));
    assert!(combat.player.piles.discard.is_empty());
}

#[test]
fn mental_fortress_blocks_on_every_real_change() {
    let fixture = Fixture::new();
    let engine = fixture.engine();
    let mut combat = start_with_energy(
        &fixture,
        &["MentalFortress", "Vigilance", "Eruption"],
        &["Pillow"],
        5,
    );

    play(&engine, &mut combat, "MentalFortress", None);
    assert_eq!(combat.player.powers.amount(PowerId::MentalFortress), 4);
    assert!(combat.player.piles.exhaust.iter().any(|c| c.id() == "MentalFortress"));

    play(&engine, &mut combat, "Vigilance", None);
    assert_eq!(combat.player.block, 8 + 4);

    play(&engine, &mut combat, "Eruption", Some(0));
    assert_eq!(combat.player.block, 8 + 4 + 4);
    assert_eq!(combat.player.energy, 2);
}

#[test]
fn scry_suspends_the_card_until_the_choice_is_made() {
    let fixture = Fixture::new();
    let engine = fixture.engine();
    let deck = [
        "CutThroughFate", "Defend_P", "Defend_P", "Defend_P", "Defend_P", "Defend_P",
        "Defend_P", "Defend_P",
    ];
    let mut combat = fixture.start(&deck, &["TrainingDummy"]);
    ensure_in_hand(&mut combat, "CutThroughFate");

    play(&engine, &mut combat, "CutThroughFate", Some(0));
    assert_eq!(combat.enemies[0].hp, 33);
    assert_eq!(combat.player.piles.hand.len(), 4);
    assert!(combat.player.piles.limbo.is_some());
    assert_eq!(combat.pending.as_ref().map(|p| p.revealed()), Some(2));

    let legal = engine.legal_actions(&combat);
    assert_eq!(legal.len(), 4);
    assert!(legal.iter().all(|action| matches!(action, Action::Scry { .. })));
    assert_eq!(
        engine.observe(&combat).pending_scry,
        Some(vec!["Defend_P".to_owned(), "Defend_P".to_owned()])
    );

    let blocked = engine.apply(&combat, Action::EndTurn).unwrap_err();
    assert_eq!(blocked, SimError::IllegalAction(IllegalAction::ChoicePending));
    let duplicate = engine
        .apply(&combat, Action::Scry { discard: vec![1, 1] })
        .unwrap_err();
    assert_eq!(
        duplicate,
        SimError::IllegalAction(IllegalAction::InvalidScrySelection {
            index: 1,
            revealed: 2
        })
    );

    engine
        .apply_in_place(&mut combat, Action::Scry { discard: vec![0] })
        .unwrap();
    assert!(combat.pending.is_none());
    assert!(combat.player.piles.limbo.is_none());
    assert_eq!(combat.player.piles.hand.len(), 5);
    assert_eq!(combat.player.piles.draw.len(), 1);
    assert_eq!(combat.player.piles.discard.len(), 2);
    assert!(combat.accounting_holds());
}

#[test]
fn created_cards_are_counted_and_logged() {
    let fixture = Fixture::new();
    let engine = fixture.engine();
    let deck = ["Pray", "Defend_P", "Defend_P", "Defend_P", "Defend_P", "Defend_P", "Defend_P"];
    let mut combat = fixture.start(&deck, &["Pillow"]);
    ensure_in_hand(&mut combat, "Pray");

    play(&engine, &mut combat, "Pray", None);
    assert_eq!(combat.introduced(), deck.len() + 1);
    assert_eq!(combat.player.piles.draw.len(), 3);
    assert!(combat.player.piles.draw.iter().any(|c| c.id() == "Insight"));
    assert_eq!(combat.rng.card.counter(), 1);
    assert!(combat.events().iter().any(|event| matches!(
        event,
        CombatEvent::CardCreated { card, .. } if card == "Insight"
    )));
}

#[test]
fn retained_cards_stay_and_discard_reshuffles() {
    let fixture = Fixture::new();
    let engine = fixture.engine();
    let mut combat = fixture.start(&["Crescendo", "Defend_P"], &["Pillow"]);

    engine.apply_in_place(&mut combat, Action::EndTurn).unwrap();
    let hand: Vec<_> = combat.player.piles.hand.iter().map(|c| c.id()).collect();
    assert_eq!(hand.len(), 2);
    assert!(hand.contains(&"Crescendo"));
    assert!(combat
        .events()
        .iter()
        .any(|event| matches!(event, CombatEvent::Shuffled { cards: 1 })));
    assert_eq!(combat.rng.shuffle.counter(), 2);
}

#[test]
fn thorns_hurt_the_attacker() {
    let fixture = Fixture::new();
    let engine = fixture.engine();
    let mut combat = fixture.start(&["Strike_P"; 5], &["Urchin"]);

    engine.apply_in_place(&mut combat, Action::EndTurn).unwrap();
    assert_eq!(combat.enemies[0].powers.amount(PowerId::Thorns), 3);
    assert_eq!(combat.player.hp, 80);

    play(&engine, &mut combat, "Strike_P", Some(0));
    assert_eq!(combat.enemies[0].hp, 24);
    assert_eq!(combat.player.hp, 77);
    assert!(combat.events().iter().any(|event| matches!(
        event,
        CombatEvent::Damage {
            source: Creature::Enemy(0),
            target: Creature::Player,
            amount: 3,
            ..
        }
    )));
}

#[test]
fn ritual_skips_the_round_it_was_gained() {
    let fixture = Fixture::new();
    let engine = fixture.engine();
    let mut combat = fixture.start(&["Defend_P"; 5], &["Chanter"]);

    engine.apply_in_place(&mut combat, Action::EndTurn).unwrap();
    assert_eq!(combat.enemies[0].powers.amount(PowerId::Ritual), 3);
    assert_eq!(combat.enemies[0].powers.amount(PowerId::Strength), 0);

    engine.apply_in_place(&mut combat, Action::EndTurn).unwrap();
    assert_eq!(combat.enemies[0].powers.amount(PowerId::Strength), 3);
    assert_eq!(combat.player.hp, 74);
}

#[test]
fn turn_start_powers_expire_on_both_sides() {
    let fixture = Fixture::new();
    let engine = fixture.engine();
    let mut combat = fixture.start(&["Defend_P"; 5], &["Pillow"]);
    combat.player.powers.apply(PowerId::Intangible, 1, false);
    combat.enemies[0].powers.apply(PowerId::Intangible, 1, false);

    engine.apply_in_place(&mut combat, Action::EndTurn).unwrap();
    assert_eq!(combat.enemies[0].powers.amount(PowerId::Intangible), 0);
    assert_eq!(combat.player.powers.amount(PowerId::Intangible), 0);
    assert!(combat.events().iter().any(|event| matches!(
        event,
        CombatEvent::PowerExpired {
            target: Creature::Enemy(0),
            power: PowerId::Intangible,
        }
    )));

    engine.apply_in_place(&mut combat, Action::EndTurn).unwrap();
    engine.apply_in_place(&mut combat, Action::EndTurn).unwrap();
    assert!(!combat.enemies[0].powers.has(PowerId::Intangible));
}

#[test]
fn player_death_ends_the_combat() {
    let fixture = Fixture::new();
    let engine = fixture.engine();
    let mut combat = engine
        .setup(&setup(&["Defend_P"], &["TrainingDummy"]).with_hp(5, 80))
        .unwrap();

    engine.apply_in_place(&mut combat, Action::EndTurn).unwrap();
    assert_eq!(combat.outcome(), Some(false));
    assert_eq!(combat.player.hp, 0);
    assert!(engine.legal_actions(&combat).is_empty());
    assert!(matches!(
        engine.apply(&combat, Action::EndTurn),
        Err(SimError::IllegalAction(IllegalAction::WrongPhase { .. }))
    ));
}

#[test]
fn observe_is_idempotent() {
    let fixture = Fixture::new();
    let engine = fixture.engine();
    let combat = fixture.start(&["Strike_P", "Defend_P", "Eruption"], &["TrainingDummy"]);
    let before = combat.clone();

    let first = engine.observe(&combat);
    let second = engine.observe(&combat);
    assert_eq!(first, second);
    assert_eq!(combat, before);
    assert_eq!(first.player.hand.len(), 3);
    let intent = first.enemies[0].intent.as_ref().unwrap();
    assert_eq!((intent.move_id.as_str(), intent.damage), ("Hit", 10));
}

#[test]
fn forks_do_not_affect_the_original() {
    let fixture = Fixture::new();
    let engine = fixture.engine();
    let combat = fixture.start(&["Strike_P"; 6], &["TrainingDummy"]);
    let counters = combat.rng.counters();

    let mut fork = combat.fork();
    engine.apply_in_place(&mut fork, Action::EndTurn).unwrap();
    assert_ne!(fork.rng.counters(), counters);
    assert_eq!(combat.rng.counters(), counters);
    assert_eq!(combat.turn, 1);
    assert_eq!(combat.player.hp, 80);

    let reseeded = combat.fork_reseeded(crate::rng::StreamSeeds::uniform(7));
    assert_eq!(reseeded.player, combat.player);
    assert_ne!(reseeded.rng, combat.rng);
}

#[test]
fn training_dummy_is_defeated_by_attacking() {
    let fixture = Fixture::new();
    let engine = fixture.engine();
    let deck = [
        "Strike_P", "Strike_P", "Strike_P", "Strike_P", "Defend_P", "Defend_P", "Defend_P",
        "Defend_P", "Eruption", "Vigilance",
    ];
    let combat = engine
        .setup(&setup(&deck, &["TrainingDummy"]).with_hp(250, 250))
        .unwrap();

    let mut final_state = combat.clone();
    let mut policy = attack_first;
    let result = engine.run_in_place(&mut final_state, &mut policy, 20).unwrap();
    let outcome = result.outcome().expect("combat finishes");
    assert!(outcome.victory);
    assert!(outcome.turns <= 10);

    let taken: i32 = final_state
        .events()
        .iter()
        .filter_map(|event| match event {
            CombatEvent::Damage {
                target: Creature::Player,
                hp_lost,
                ..
            } => Some(*hp_lost),
            _ => None,
        })
        .sum();
    assert_eq!(outcome.final_hp, 250 - taken);
    assert_eq!(
        engine.run_to_completion(&combat, &mut policy, 20).unwrap(),
        result
    );
}

#[test]
fn passive_policy_stalls_at_the_turn_cap() {
    let fixture = Fixture::new();
    let engine = fixture.engine();
    let combat = fixture.start(&["Defend_P"; 5], &["Pillow"]);
    let mut end_turn = |_: &Combat, _: &[Action]| Action::EndTurn;
    let result = engine.run_to_completion(&combat, &mut end_turn, 3).unwrap();
    assert_eq!(
        result,
        RunResult::Stalemate {
            turns: 4,
            final_hp: 80
        }
    );
}

const MIXED_DECK: [&str; 12] = [
    "Strike_P",
    "Defend_P",
    "Eruption",
    "Vigilance",
    "Pray",
    "ThirdEye",
    "CutThroughFate",
    "FlurryOfBlows",
    "EmptyMind",
    "Crescendo",
    "Worship",
    "MentalFortress",
];

proptest! {
    #[test]
    fn every_card_stays_in_exactly_one_pile(
        seed in any::<i64>(),
        choices in proptest::collection::vec(any::<usize>(), 1..150),
    ) {
        let fixture = Fixture::new();
        let engine = fixture.engine();
        let setup = setup(&MIXED_DECK, &["Chanter", "Urchin"]).with_hp(200, 200);
        let setup = CombatSetup { seeds: crate::rng::StreamSeeds::uniform(seed), ..setup };
        let mut combat = engine.setup(&setup).unwrap();

        for choice in choices {
            if combat.is_over() {
                break;
            }
            let legal = engine.legal_actions(&combat);
            prop_assert!(!legal.is_empty());
            let action = legal[choice % legal.len()].clone();
            prop_assert!(engine.apply_in_place(&mut combat, action).is_ok());
            prop_assert!(combat.accounting_holds());
            prop_assert!(combat.player.piles.hand.len() <= CombatConfig::MAX_HAND_SIZE);
        }
    }
}
