//! Driving a combat to completion with a policy.

use tracing::{debug, warn};

use crate::action::Action;
use crate::config::CombatConfig;
use crate::error::SimError;
use crate::state::Combat;

use super::CombatEngine;

/// Chooses the next action from the legal set.
///
/// `legal` is never empty while the combat is running: a turn always offers
/// `EndTurn` and a pending scry always offers the empty selection.
pub trait Policy {
    fn choose(&mut self, combat: &Combat, legal: &[Action]) -> Action;
}

impl<F> Policy for F
where
    F: FnMut(&Combat, &[Action]) -> Action,
{
    fn choose(&mut self, combat: &Combat, legal: &[Action]) -> Action {
        self(combat, legal)
    }
}

/// Final result of a finished combat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Outcome {
    pub victory: bool,
    /// Player turns started.
    pub turns: u32,
    pub final_hp: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "result", rename_all = "snake_case"))]
pub enum RunResult {
    Completed(Outcome),
    /// The turn cap or the per-turn action cap was exceeded.
    Stalemate { turns: u32, final_hp: i32 },
}

impl RunResult {
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Self::Completed(outcome) => Some(*outcome),
            Self::Stalemate { .. } => None,
        }
    }

    pub fn is_victory(&self) -> bool {
        self.outcome().is_some_and(|outcome| outcome.victory)
    }
}

impl CombatEngine<'_> {
    /// Runs a copy of `combat` until it ends or a cap is hit.
    pub fn run_to_completion(
        &self,
        combat: &Combat,
        policy: &mut dyn Policy,
        turn_cap: u32,
    ) -> Result<RunResult, SimError> {
        let mut combat = combat.clone();
        self.run_in_place(&mut combat, policy, turn_cap)
    }

    /// Like [`run_to_completion`](Self::run_to_completion) but leaves the
    /// final state (and its event log) in `combat`.
    pub fn run_in_place(
        &self,
        combat: &mut Combat,
        policy: &mut dyn Policy,
        turn_cap: u32,
    ) -> Result<RunResult, SimError> {
        loop {
            if let Some(victory) = combat.outcome() {
                let outcome = Outcome {
                    victory,
                    turns: combat.turn,
                    final_hp: combat.player.hp,
                };
                debug!(?outcome, "run completed");
                return Ok(RunResult::Completed(outcome));
            }
            if combat.turn > turn_cap
                || combat.actions_this_turn() >= CombatConfig::MAX_ACTIONS_PER_TURN
            {
                warn!(
                    turn = combat.turn,
                    actions = combat.actions_this_turn(),
                    "run stalled"
                );
                return Ok(RunResult::Stalemate {
                    turns: combat.turn,
                    final_hp: combat.player.hp,
                });
            }

            let legal = self.legal_actions(combat);
            let action = policy.choose(combat, &legal);
            self.apply_in_place(combat, action)?;
        }
    }
}
