//! Combat setup and action execution.
//!
//! The [`CombatEngine`] is the only thing that mutates a [`Combat`]. It holds
//! nothing but the borrowed content, so one engine serves any number of
//! combats and forks. Every action is validated before the state is touched:
//! an illegal action leaves the combat exactly as it was.

mod play;
mod resolver;
mod runner;
mod turn;

pub use runner::{Outcome, Policy, RunResult};

use tracing::{debug, error, info_span};

use crate::action::{self, Action, IllegalAction};
use crate::card::{CardFlags, CardInstance, Piles};
use crate::config::CombatConfig;
use crate::env::GameEnv;
use crate::error::SimError;
use crate::relic::Relic;
use crate::rng::{RngStreams, StreamSeeds};
use crate::snapshot::StateSnapshot;
use crate::state::{Combat, CombatEvent, EnemyState, Phase, PlayerState};

use resolver::Resolver;

/// Everything needed to start a combat.
///
/// Deck entries are card ids; a trailing `+` marks an upgraded copy.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatSetup {
    pub deck: Vec<String>,
    pub enemies: Vec<String>,
    pub player_hp: i32,
    pub player_max_hp: i32,
    pub energy: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub relics: Vec<Relic>,
    pub seeds: StreamSeeds,
}

impl CombatSetup {
    pub const DEFAULT_ENERGY: i32 = 3;
    /// The Watcher's starting hp.
    pub const DEFAULT_PLAYER_HP: i32 = 72;

    pub fn new(deck: Vec<String>, enemies: Vec<String>, seeds: StreamSeeds) -> Self {
        Self {
            deck,
            enemies,
            player_hp: Self::DEFAULT_PLAYER_HP,
            player_max_hp: Self::DEFAULT_PLAYER_HP,
            energy: Self::DEFAULT_ENERGY,
            relics: Vec::new(),
            seeds,
        }
    }

    pub fn with_hp(mut self, hp: i32, max_hp: i32) -> Self {
        self.player_hp = hp;
        self.player_max_hp = max_hp;
        self
    }

    pub fn with_energy(mut self, energy: i32) -> Self {
        self.energy = energy;
        self
    }

    pub fn with_relics(mut self, relics: Vec<Relic>) -> Self {
        self.relics = relics;
        self
    }
}

/// Splits `"Eruption+"` into `("Eruption", true)`.
pub fn parse_deck_entry(entry: &str) -> (&str, bool) {
    match entry.strip_suffix('+') {
        Some(id) => (id, true),
        None => (entry, false),
    }
}

/// Stateless combat reducer over borrowed content.
#[derive(Clone, Copy, Debug)]
pub struct CombatEngine<'a> {
    env: GameEnv<'a>,
}

impl<'a> CombatEngine<'a> {
    pub fn new(env: GameEnv<'a>) -> Self {
        Self { env }
    }

    pub fn env(&self) -> GameEnv<'a> {
        self.env
    }

    pub fn config(&self) -> &'a CombatConfig {
        self.env.config()
    }

    /// Builds the initial combat and starts player turn 1.
    ///
    /// Enemy HP comes from the monster-HP stream and first intents from the
    /// AI stream, one roll per enemy in order. The opening shuffle is one
    /// shuffle-stream call; innate cards are then lifted to the top.
    pub fn setup(&self, setup: &CombatSetup) -> Result<Combat, SimError> {
        let _span = info_span!("setup", enemies = setup.enemies.len()).entered();

        if setup.enemies.is_empty() {
            return Err(SimError::invalid_setup("no enemies"));
        }
        if setup.enemies.len() > CombatConfig::MAX_ENEMIES {
            return Err(SimError::invalid_setup(format!(
                "{} enemies exceeds the limit of {}",
                setup.enemies.len(),
                CombatConfig::MAX_ENEMIES
            )));
        }
        if setup.player_max_hp <= 0 || setup.player_hp <= 0 {
            return Err(SimError::invalid_setup("player hp must be positive"));
        }
        if setup.player_hp > setup.player_max_hp {
            return Err(SimError::invalid_setup(format!(
                "player hp {} exceeds max hp {}",
                setup.player_hp, setup.player_max_hp
            )));
        }

        let mut rng = RngStreams::new(setup.seeds);

        let mut enemies = Vec::with_capacity(setup.enemies.len());
        for id in &setup.enemies {
            let def = self.env.enemy(id)?;
            def.validate()?;
            let hp = def.hp.roll(&mut rng.monster_hp);
            enemies.push(EnemyState::new(def, hp));
        }

        let mut deck = Vec::with_capacity(setup.deck.len());
        for (uuid, entry) in (0u32..).zip(&setup.deck) {
            let (id, upgraded) = parse_deck_entry(entry);
            deck.push(CardInstance::new(self.env.card(id)?, upgraded, uuid));
        }
        rng.shuffle.shuffle(&mut deck);
        let mut piles = Piles::new(deck);
        piles.lift_to_top(|card| card.has_flag(CardFlags::INNATE));

        let mut player = PlayerState::new(
            setup.player_hp,
            setup.player_max_hp,
            setup.energy,
            piles,
        );
        player.relics = setup.relics.clone();

        let mut combat = Combat::new(player, enemies, rng);
        combat.push_event(CombatEvent::CombatStarted {
            enemies: setup.enemies.clone(),
        });

        for index in 0..combat.enemies.len() {
            let enemy = &mut combat.enemies[index];
            let first = enemy.def.roll_move(&enemy.history, &mut combat.rng.ai)?;
            enemy.set_intent(first);
            let move_id = enemy
                .intent()
                .map(|intent| intent.id.clone())
                .unwrap_or_default();
            combat.push_event(CombatEvent::IntentRolled {
                enemy: index,
                move_id,
            });
        }

        Resolver::new(self.env, &mut combat).start_player_turn()?;
        self.check_accounting(&combat);
        debug!(
            hand = combat.player.piles.hand.len(),
            draw = combat.player.piles.draw.len(),
            "combat set up"
        );
        Ok(combat)
    }

    /// Applies `action` to a copy of `combat` and returns the successor.
    /// The input is never modified.
    pub fn apply(&self, combat: &Combat, action: Action) -> Result<Combat, SimError> {
        let mut next = combat.clone();
        self.apply_in_place(&mut next, action)?;
        Ok(next)
    }

    /// Applies `action` to `combat` directly.
    ///
    /// Illegal actions are rejected before any mutation. A content lookup
    /// failing mid-resolution can leave `combat` partially updated; use
    /// [`apply`](Self::apply) when that matters.
    pub fn apply_in_place(&self, combat: &mut Combat, action: Action) -> Result<(), SimError> {
        let _span = info_span!("apply", turn = combat.turn, %action).entered();

        if combat.is_over() {
            return Err(IllegalAction::WrongPhase {
                phase: combat.phase,
            }
            .into());
        }

        let mut resolver = Resolver::new(self.env, combat);
        match &action {
            Action::PlayCard { hand_index, target } => {
                resolver.play_card(*hand_index, *target)?;
            }
            Action::EndTurn => {
                if resolver.combat.phase != Phase::PlayerTurn {
                    return Err(IllegalAction::WrongPhase {
                        phase: resolver.combat.phase,
                    }
                    .into());
                }
                if resolver.combat.pending.is_some() {
                    return Err(IllegalAction::ChoicePending.into());
                }
                resolver.end_turn()?;
            }
            Action::Scry { discard } => resolver.resolve_scry(discard)?,
        }

        combat.count_action();
        self.check_accounting(combat);
        Ok(())
    }

    fn check_accounting(&self, combat: &Combat) {
        if !combat.accounting_holds() {
            error!(
                in_piles = combat.player.piles.total(),
                introduced = combat.introduced(),
                "card accounting broken"
            );
            debug_assert!(combat.accounting_holds(), "card accounting broken");
        }
    }

    pub fn legal_actions(&self, combat: &Combat) -> Vec<Action> {
        action::legal_actions(combat)
    }

    pub fn can_play(&self, combat: &Combat, hand_index: usize) -> bool {
        action::can_play(combat, hand_index)
    }

    /// Read-only view of `combat`; calling it never changes anything.
    pub fn observe(&self, combat: &Combat) -> StateSnapshot {
        StateSnapshot::capture(combat, self.env)
    }
}

#[cfg(test)]
mod tests;
