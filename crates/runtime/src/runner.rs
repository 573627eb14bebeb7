//! Full-combat runs with per-combat spans and turn logging.

use spire_core::{
    Action, Combat, CombatConfig, CombatEngine, CombatEvent, CombatSetup, Creature, Policy,
    RunResult,
};
use tracing::{debug, info, info_span, trace};

use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Player turns after which a run is reported as a stalemate.
    pub turn_cap: u32,
    /// Log a snapshot summary at the start of every player turn.
    pub log_turn_snapshots: bool,
}

impl RunnerConfig {
    pub fn from_combat_config(config: &CombatConfig) -> Self {
        Self {
            turn_cap: config.turn_cap,
            ..Self::default()
        }
    }

    pub fn with_turn_cap(mut self, turn_cap: u32) -> Self {
        self.turn_cap = turn_cap;
        self
    }

    pub fn with_turn_snapshots(mut self, enabled: bool) -> Self {
        self.log_turn_snapshots = enabled;
        self
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            turn_cap: CombatConfig::DEFAULT_TURN_CAP,
            log_turn_snapshots: false,
        }
    }
}

/// Result of one automated combat, with the final state and its event log.
#[derive(Clone, Debug)]
pub struct RunReport {
    pub result: RunResult,
    pub combat: Combat,
    /// HP the player lost over the whole combat.
    pub damage_taken: i32,
    /// Actions the policy chose.
    pub actions: usize,
}

/// Drives combats to completion.
#[derive(Clone, Copy, Debug)]
pub struct Runner<'a> {
    engine: CombatEngine<'a>,
    turn_cap: u32,
    log_turn_snapshots: bool,
}

impl<'a> Runner<'a> {
    pub fn new(engine: CombatEngine<'a>, config: &RunnerConfig) -> Self {
        Self {
            engine,
            turn_cap: config.turn_cap,
            log_turn_snapshots: config.log_turn_snapshots,
        }
    }

    pub fn engine(&self) -> CombatEngine<'a> {
        self.engine
    }

    /// Sets up `setup` and plays it out with `policy`.
    pub fn run(&self, setup: &CombatSetup, policy: &mut dyn Policy) -> Result<RunReport> {
        let span = info_span!("combat", enemies = ?setup.enemies, deck = setup.deck.len());
        let _guard = span.enter();

        let combat = self.engine.setup(setup)?;
        self.run_from(combat, policy)
    }

    /// Plays out an already set-up (or partly played) combat.
    pub fn run_from(&self, mut combat: Combat, policy: &mut dyn Policy) -> Result<RunReport> {
        let mut observed = Observed {
            engine: self.engine,
            inner: policy,
            last_turn: None,
            log_snapshots: self.log_turn_snapshots,
            actions: 0,
        };
        let result = self
            .engine
            .run_in_place(&mut combat, &mut observed, self.turn_cap)?;
        let actions = observed.actions;

        let damage_taken = damage_taken(&combat);
        info!(?result, damage_taken, actions, "combat finished");
        Ok(RunReport {
            result,
            combat,
            damage_taken,
            actions,
        })
    }
}

/// HP lost by the player according to the combat's event log.
pub fn damage_taken(combat: &Combat) -> i32 {
    combat
        .events()
        .iter()
        .map(|event| match event {
            CombatEvent::Damage {
                target: Creature::Player,
                hp_lost,
                ..
            } => *hp_lost,
            _ => 0,
        })
        .sum()
}

/// Wraps a policy to log turn boundaries and count decisions.
struct Observed<'p, 'e> {
    engine: CombatEngine<'e>,
    inner: &'p mut dyn Policy,
    last_turn: Option<u32>,
    log_snapshots: bool,
    actions: usize,
}

impl Policy for Observed<'_, '_> {
    fn choose(&mut self, combat: &Combat, legal: &[Action]) -> Action {
        if self.last_turn != Some(combat.turn) {
            self.last_turn = Some(combat.turn);
            if self.log_snapshots {
                let snapshot = self.engine.observe(combat);
                debug!(
                    turn = snapshot.turn,
                    hp = snapshot.player.hp,
                    energy = snapshot.player.energy,
                    stance = %snapshot.player.stance,
                    hand = ?snapshot.player.hand,
                    "turn started"
                );
            }
        }

        self.actions += 1;
        let action = self.inner.choose(combat, legal);
        trace!(%action, legal = legal.len(), "action chosen");
        action
    }
}
