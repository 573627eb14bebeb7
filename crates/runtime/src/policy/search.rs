//! One-ply lookahead over forked combats.

use std::collections::HashSet;

use spire_core::{
    Action, Combat, CombatEngine, GameRng, Policy, StateSnapshot, Stance, StreamSeeds,
};
use tracing::{debug, trace};

use crate::utils::fingerprint;

/// Counters for one policy's lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub decisions: u64,
    /// Candidates applied to a fork.
    pub evaluated: u64,
    /// Candidates whose resulting snapshot fingerprint was already scored
    /// this decision. The fingerprint ignores pile order, so forks that differ
    /// only in draw order count as duplicates.
    pub duplicates: u64,
    /// Candidates the engine rejected.
    pub rejected: u64,
}

/// Heuristic value of a combat state. Higher is better for the player.
///
/// Incoming damage is read from the snapshot's intents, which already apply
/// the player's stance, so entering Wrath in front of an attack costs points.
pub fn score(combat: &Combat, snapshot: &StateSnapshot) -> i64 {
    match combat.outcome() {
        Some(true) => return i64::MAX / 2 + i64::from(snapshot.player.hp),
        Some(false) => return i64::MIN / 2,
        None => {}
    }

    let player = &snapshot.player;
    let incoming: i64 = snapshot
        .enemies
        .iter()
        .filter_map(|enemy| enemy.intent.as_ref())
        .map(|intent| i64::from(intent.damage) * i64::from(intent.hits))
        .sum();
    let unblocked = (incoming - i64::from(player.block)).max(0);
    let enemy_total: i64 = snapshot
        .enemies
        .iter()
        .filter(|enemy| enemy.alive)
        .map(|enemy| i64::from(enemy.hp) + i64::from(enemy.block))
        .sum();
    let stance_bonus = match player.stance {
        Stance::Calm | Stance::Divinity => 4,
        Stance::Neutral | Stance::Wrath => 0,
    };

    3 * (i64::from(player.hp) - unblocked) - 2 * enemy_total
        + i64::from(player.mantra)
        + stance_bonus
}

/// Tries every legal action on a reseeded fork and takes the best score.
///
/// All candidates of one decision share the same fork seeds, so they are
/// compared under the same draws. Seeds come from the policy's own stream;
/// the canonical streams of the combat are never advanced.
///
/// Forks are deduplicated by snapshot fingerprint, which is a heuristic:
/// snapshots carry pile sizes, not pile order, so two forks that differ only
/// in draw order are scored once.
#[derive(Clone, Debug)]
pub struct GreedySearchPolicy<'a> {
    engine: CombatEngine<'a>,
    rng: GameRng,
    stats: SearchStats,
}

impl<'a> GreedySearchPolicy<'a> {
    pub fn new(engine: CombatEngine<'a>, seed: i64) -> Self {
        Self {
            engine,
            rng: GameRng::new(seed),
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    fn fork_seeds(&mut self) -> StreamSeeds {
        StreamSeeds {
            shuffle: self.rng.random_long(),
            card: self.rng.random_long(),
            ai: self.rng.random_long(),
            monster_hp: self.rng.random_long(),
        }
    }
}

impl Policy for GreedySearchPolicy<'_> {
    fn choose(&mut self, combat: &Combat, legal: &[Action]) -> Action {
        self.stats.decisions += 1;
        let seeds = self.fork_seeds();
        let mut seen = HashSet::new();
        let mut best: Option<(i64, &Action)> = None;

        for action in legal {
            let mut fork = combat.fork_reseeded(seeds);
            if let Err(error) = self.engine.apply_in_place(&mut fork, action.clone()) {
                self.stats.rejected += 1;
                debug!(%action, %error, "candidate rejected");
                continue;
            }
            self.stats.evaluated += 1;

            let snapshot = self.engine.observe(&fork);
            if let Ok(print) = fingerprint(&snapshot)
                && !seen.insert(print)
            {
                self.stats.duplicates += 1;
                continue;
            }

            let value = score(&fork, &snapshot);
            trace!(%action, value, "candidate scored");
            if best.is_none_or(|(top, _)| value > top) {
                best = Some((value, action));
            }
        }

        best.map(|(_, action)| action.clone())
            .unwrap_or(Action::EndTurn)
    }
}
