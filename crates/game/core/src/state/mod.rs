//! Authoritative combat state.
//!
//! [`Combat`] is a plain value: every field is owned, card and enemy templates
//! are shared through `Arc`, and the RNG streams live inside it. Forking for
//! search is `clone()`; nothing in a fork aliases mutable state of another.
//! Runtime layers clone or query this state but mutate it exclusively through
//! the engine.
mod enemy;
mod event;
mod phase;
mod player;

pub use enemy::EnemyState;
pub use event::{CombatEvent, Creature};
pub use phase::{PendingChoice, Phase, Resume};
pub use player::{PlayerState, TurnCounters};

use crate::rng::{RngStreams, StreamSeeds};

/// One combat session.
#[derive(Clone, Debug, PartialEq)]
pub struct Combat {
    /// Player turns started so far (1 during the first turn).
    pub turn: u32,
    pub phase: Phase,
    pub player: PlayerState,
    pub enemies: Vec<EnemyState>,
    /// Canonical game-progress streams.
    pub rng: RngStreams,
    /// Choice the caller must resolve before anything else.
    pub pending: Option<PendingChoice>,

    /// Append-only log.
    events: Vec<CombatEvent>,
    /// Next card uuid (monotonically increasing, never reused).
    next_uuid: u32,
    /// Cards ever introduced: starting deck plus created cards.
    introduced: usize,
    /// Actions applied since the current player turn started.
    actions_this_turn: u32,
}

impl Combat {
    pub(crate) fn new(player: PlayerState, enemies: Vec<EnemyState>, rng: RngStreams) -> Self {
        let introduced = player.piles.total();
        let next_uuid = u32::try_from(introduced).unwrap_or(u32::MAX);
        Self {
            turn: 0,
            phase: Phase::PlayerTurn,
            player,
            enemies,
            rng,
            pending: None,
            events: Vec::new(),
            next_uuid,
            introduced,
            actions_this_turn: 0,
        }
    }

    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_ended()
    }

    /// `Some(victory)` once combat has ended.
    pub fn outcome(&self) -> Option<bool> {
        match self.phase {
            Phase::Ended { victory } => Some(victory),
            _ => None,
        }
    }

    pub fn enemy(&self, index: usize) -> Option<&EnemyState> {
        self.enemies.get(index)
    }

    pub fn living_enemies(&self) -> impl Iterator<Item = (usize, &EnemyState)> {
        self.enemies
            .iter()
            .enumerate()
            .filter(|(_, enemy)| enemy.is_alive())
    }

    pub fn all_enemies_dead(&self) -> bool {
        self.enemies.iter().all(|enemy| !enemy.is_alive())
    }

    /// Independent copy for what-if exploration.
    pub fn fork(&self) -> Self {
        self.clone()
    }

    /// Independent copy whose streams are replaced, so a search fork neither
    /// advances nor peeks at the canonical streams.
    pub fn fork_reseeded(&self, seeds: StreamSeeds) -> Self {
        let mut fork = self.clone();
        fork.rng = RngStreams::new(seeds);
        fork
    }

    /// Cards ever introduced into combat.
    pub fn introduced(&self) -> usize {
        self.introduced
    }

    pub fn actions_this_turn(&self) -> u32 {
        self.actions_this_turn
    }

    /// `true` when every introduced card is in exactly one pile.
    pub fn accounting_holds(&self) -> bool {
        self.player.piles.total() == self.introduced
    }

    pub(crate) fn push_event(&mut self, event: CombatEvent) {
        self.events.push(event);
    }

    /// Allocates a uuid for a card created mid-combat and counts it.
    pub(crate) fn introduce_card(&mut self) -> u32 {
        let uuid = self.next_uuid;
        self.next_uuid = self.next_uuid.saturating_add(1);
        self.introduced += 1;
        uuid
    }

    pub(crate) fn count_action(&mut self) {
        self.actions_this_turn = self.actions_this_turn.saturating_add(1);
    }

    pub(crate) fn reset_action_count(&mut self) {
        self.actions_this_turn = 0;
    }
}
