//! Legality checks and legal-action enumeration.

use crate::card::{CardFlags, CardInstance, PlayCondition};
use crate::state::{Combat, Phase};

use super::{Action, IllegalAction};

/// Validates playing the card at `hand_index` and returns it.
///
/// Checks, in order: phase, pending choice, index, unplayable flag, energy,
/// hand-composition condition. Targets are checked by [`check_target`].
pub fn check_play(combat: &Combat, hand_index: usize) -> Result<&CardInstance, IllegalAction> {
    if combat.phase != Phase::PlayerTurn {
        return Err(IllegalAction::WrongPhase {
            phase: combat.phase,
        });
    }
    if combat.pending.is_some() {
        return Err(IllegalAction::ChoicePending);
    }

    let hand = &combat.player.piles.hand;
    let card = hand.get(hand_index).ok_or(IllegalAction::InvalidHandIndex {
        index: hand_index,
        hand_size: hand.len(),
    })?;

    if card.has_flag(CardFlags::UNPLAYABLE) {
        return Err(IllegalAction::Unplayable {
            card: card.label(),
        });
    }

    let cost = card.cost();
    if cost > combat.player.energy {
        return Err(IllegalAction::InsufficientEnergy {
            cost,
            energy: combat.player.energy,
        });
    }

    if let Some(condition) = card.def.condition {
        check_condition(combat, hand_index, card, condition)?;
    }

    Ok(card)
}

fn check_condition(
    combat: &Combat,
    hand_index: usize,
    card: &CardInstance,
    condition: PlayCondition,
) -> Result<(), IllegalAction> {
    match condition {
        PlayCondition::OnlyAttackInHand => {
            let other_attack = combat
                .player
                .piles
                .hand
                .iter()
                .enumerate()
                .any(|(index, other)| index != hand_index && other.def.is_attack());
            if other_attack {
                return Err(IllegalAction::ConditionNotMet {
                    card: card.label(),
                    reason: "another attack is in hand".into(),
                });
            }
        }
    }
    Ok(())
}

/// Validates the target of `card`.
///
/// Single-target cards need a living enemy; every other card must be sent
/// without a target.
pub fn check_target(
    combat: &Combat,
    card: &CardInstance,
    target: Option<usize>,
) -> Result<(), IllegalAction> {
    let valid = if card.def.target.needs_target() {
        target
            .and_then(|index| combat.enemy(index))
            .is_some_and(|enemy| enemy.is_alive())
    } else {
        target.is_none()
    };
    if valid {
        Ok(())
    } else {
        Err(IllegalAction::InvalidTarget { target })
    }
}

/// `true` when the card at `hand_index` passes every legality check except
/// targeting.
pub fn can_play(combat: &Combat, hand_index: usize) -> bool {
    check_play(combat, hand_index).is_ok()
}

/// Every action [`CombatEngine::apply`](crate::engine::CombatEngine::apply)
/// would accept right now.
///
/// Plays come first in hand order (one per living target for single-target
/// cards), then `EndTurn`. While a scry is pending only `Scry` selections are
/// legal, enumerated as every subset of the revealed cards.
pub fn legal_actions(combat: &Combat) -> Vec<Action> {
    if combat.is_over() || combat.phase != Phase::PlayerTurn {
        return Vec::new();
    }

    if let Some(pending) = &combat.pending {
        let revealed = pending.revealed();
        return (0u32..1 << revealed)
            .map(|mask| Action::Scry {
                discard: (0..revealed).filter(|i| mask & (1 << i) != 0).collect(),
            })
            .collect();
    }

    let mut actions = Vec::new();
    for (index, card) in combat.player.piles.hand.iter().enumerate() {
        if !can_play(combat, index) {
            continue;
        }
        if card.def.target.needs_target() {
            for (target, _) in combat.living_enemies() {
                actions.push(Action::play(index, Some(target)));
            }
        } else {
            actions.push(Action::play(index, None));
        }
    }
    actions.push(Action::EndTurn);
    actions
}
