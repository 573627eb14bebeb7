//! Read-only views of a combat for logging and agents.
//!
//! Field names are part of the wire contract of cross-process adapters and
//! stay stable.

use crate::combat::{DamageClass, Modifiers, calculate_incoming_damage};
use crate::enemy::IntentKind;
use crate::env::GameEnv;
use crate::power::{PowerId, Powers};
use crate::stance::Stance;
use crate::state::{Combat, Phase};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerSnapshot {
    pub id: PowerId,
    pub amount: i32,
}

fn powers(powers: &Powers) -> Vec<PowerSnapshot> {
    powers
        .iter()
        .map(|power| PowerSnapshot {
            id: power.id,
            amount: power.amount,
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerSnapshot {
    pub hp: i32,
    pub max_hp: i32,
    pub energy: i32,
    pub max_energy: i32,
    pub block: i32,
    pub stance: Stance,
    pub mantra: u32,
    /// Card labels in hand order (`+` marks upgrades).
    pub hand: Vec<String>,
    pub draw_pile: usize,
    pub discard_pile: usize,
    pub exhaust_pile: usize,
    pub powers: Vec<PowerSnapshot>,
}

/// An enemy's next move as the player would see it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntentSnapshot {
    pub move_id: String,
    pub kind: IntentKind,
    /// Per-hit damage after both sides' modifiers and the player's stance.
    pub damage: i32,
    pub hits: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemySnapshot {
    pub id: String,
    pub hp: i32,
    pub max_hp: i32,
    pub block: i32,
    pub alive: bool,
    pub powers: Vec<PowerSnapshot>,
    pub intent: Option<IntentSnapshot>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateSnapshot {
    pub turn: u32,
    pub phase: Phase,
    pub player: PlayerSnapshot,
    pub enemies: Vec<EnemySnapshot>,
    /// Labels of the revealed cards, top first, while a scry is pending.
    pub pending_scry: Option<Vec<String>>,
}

impl StateSnapshot {
    pub fn capture(combat: &Combat, env: GameEnv<'_>) -> Self {
        let registry = env.powers();
        let player = &combat.player;
        let piles = &player.piles;

        let enemies = combat
            .enemies
            .iter()
            .map(|enemy| {
                let intent = enemy.intent().filter(|_| enemy.is_alive()).map(|intent| {
                    let damage = if intent.is_attack() {
                        calculate_incoming_damage(
                            intent.damage,
                            &Modifiers::new(&enemy.powers, registry),
                            player.stance.multipliers(),
                            &Modifiers::new(&player.powers, registry),
                            DamageClass::Normal,
                        )
                    } else {
                        0
                    };
                    IntentSnapshot {
                        move_id: intent.id.clone(),
                        kind: intent.intent,
                        damage,
                        hits: intent.hits,
                    }
                });
                EnemySnapshot {
                    id: enemy.id().to_owned(),
                    hp: enemy.hp,
                    max_hp: enemy.max_hp,
                    block: enemy.block,
                    alive: enemy.is_alive(),
                    powers: powers(&enemy.powers),
                    intent,
                }
            })
            .collect();

        let pending_scry = combat.pending.as_ref().map(|pending| {
            piles
                .top_of_draw(pending.revealed())
                .map(|card| card.label())
                .collect()
        });

        Self {
            turn: combat.turn,
            phase: combat.phase,
            player: PlayerSnapshot {
                hp: player.hp,
                max_hp: player.max_hp,
                energy: player.energy,
                max_energy: player.max_energy,
                block: player.block,
                stance: player.stance,
                mantra: player.mantra.value(),
                hand: piles.hand.iter().map(|card| card.label()).collect(),
                draw_pile: piles.draw.len(),
                discard_pile: piles.discard.len(),
                exhaust_pile: piles.exhaust.len(),
                powers: powers(&player.powers),
            },
            enemies,
            pending_scry,
        }
    }
}
