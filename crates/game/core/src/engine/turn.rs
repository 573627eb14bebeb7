//! Turn sequencing: player turn start and end, the monster turn and the
//! end-of-round phase.

use tracing::{debug, trace};

use crate::card::{CardFlags, PileKind};
use crate::combat::DamageClass;
use crate::config::EnemyBlockDecay;
use crate::enemy::MoveEffect;
use crate::error::SimError;
use crate::power::{PowerDecay, PowerId, PowerRegistry, PowerTrigger, TurnEndContext};
use crate::stance::Stance;
use crate::state::{CombatEvent, Creature, Phase};

use super::resolver::Resolver;

fn decays(registry: &PowerRegistry, decay: PowerDecay) -> impl Fn(PowerId) -> bool + '_ {
    move |id| registry.get(id).is_some_and(|b| b.decay() == decay)
}

impl Resolver<'_, '_> {
    /// Ends the player turn and runs the enemy side until the next player
    /// turn starts or the combat ends.
    pub(crate) fn end_turn(&mut self) -> Result<(), SimError> {
        self.end_player_turn()?;
        if self.combat.is_over() {
            return Ok(());
        }
        self.monster_turn()?;
        if self.combat.is_over() {
            return Ok(());
        }
        self.end_of_round()?;
        if self.combat.is_over() {
            return Ok(());
        }
        self.start_player_turn()
    }

    /// Starts the next player turn.
    ///
    /// Order: energy reset, block reset, turn-start decay, draw, then
    /// turn-start hooks (energy, mantra, scry, the rest).
    pub(crate) fn start_player_turn(&mut self) -> Result<(), SimError> {
        self.combat.turn += 1;
        self.combat.phase = Phase::PlayerTurn;
        self.combat.reset_action_count();
        let turn = self.combat.turn;
        self.combat.push_event(CombatEvent::TurnStarted { turn });
        debug!(turn, hp = self.combat.player.hp, "player turn started");

        let player = &mut self.combat.player;
        player.energy = player.max_energy;
        player.counters = Default::default();
        if !self.retains_block(Creature::Player) {
            self.combat.player.block = 0;
        }
        let registry = self.registry();
        let expired = self
            .combat
            .player
            .powers
            .tick_down(false, decays(registry, PowerDecay::TurnStart));
        self.log_expired(Creature::Player, expired);

        let mut draw = self.config().draw_per_turn;
        if turn == 1 {
            let innate = self
                .combat
                .player
                .piles
                .draw
                .iter()
                .filter(|card| card.has_flag(CardFlags::INNATE))
                .count();
            draw = draw.max(u32::try_from(innate).unwrap_or(u32::MAX));
        }
        self.draw(draw);

        let mut triggers = Vec::new();
        for (power, behavior) in registry.ordered(&self.combat.player.powers) {
            behavior.at_turn_start(power.amount, &mut triggers);
        }
        triggers.sort_by_key(PowerTrigger::start_order);
        for trigger in triggers {
            self.apply_trigger(Creature::Player, trigger, None)?;
        }
        Ok(())
    }

    fn end_player_turn(&mut self) -> Result<(), SimError> {
        let turn = self.combat.turn;
        trace!(turn, "player turn ending");

        let piles = &mut self.combat.player.piles;
        let hand = core::mem::take(&mut piles.hand);
        let mut moved = Vec::new();
        for mut card in hand {
            card.cost_for_turn = None;
            if card.has_flag(CardFlags::ETHEREAL) {
                moved.push((card.label(), PileKind::Exhaust));
                piles.exhaust.push(card);
            } else if card.has_flag(CardFlags::RETAIN) {
                piles.push_to_hand(card);
            } else {
                piles.discard.push(card);
            }
        }
        for (card, to) in moved {
            self.combat.push_event(CombatEvent::CardMoved { card, to });
        }

        let context = TurnEndContext {
            stance: self.combat.player.stance,
        };
        let registry = self.registry();
        let mut triggers = Vec::new();
        for (power, behavior) in registry.ordered(&self.combat.player.powers) {
            behavior.at_turn_end(power.amount, context, &mut triggers);
        }
        for trigger in triggers {
            self.apply_trigger(Creature::Player, trigger, None)?;
        }

        if self.combat.player.stance == Stance::Divinity {
            self.change_stance(Stance::Neutral)?;
        }

        let expired = self
            .combat
            .player
            .powers
            .tick_down(false, decays(registry, PowerDecay::EndOfTurn));
        self.log_expired(Creature::Player, expired);

        self.combat.push_event(CombatEvent::TurnEnded { turn });
        Ok(())
    }

    fn monster_turn(&mut self) -> Result<(), SimError> {
        self.combat.phase = Phase::MonsterTurn;
        let decay = self.config().enemy_block_decay;

        for index in 0..self.combat.enemies.len() {
            let source = Creature::Enemy(index);
            if !self.is_alive(source) {
                continue;
            }
            if decay == EnemyBlockDecay::TurnStart && !self.retains_block(source) {
                self.combat.enemies[index].block = 0;
            }
            let registry = self.registry();
            let expired = self.combat.enemies[index]
                .powers
                .tick_down(false, decays(registry, PowerDecay::TurnStart));
            self.log_expired(source, expired);

            let enemy = &self.combat.enemies[index];
            let Some(intent) = enemy.intent().cloned() else {
                continue;
            };
            self.combat.push_event(CombatEvent::EnemyMove {
                enemy: index,
                move_id: intent.id.clone(),
            });
            debug!(enemy = index, move_id = %intent.id, "enemy acts");

            if intent.is_attack() {
                for _ in 0..intent.hits {
                    self.damage(
                        source,
                        Creature::Player,
                        intent.damage,
                        0,
                        DamageClass::Normal,
                    )?;
                    if self.combat.is_over() {
                        return Ok(());
                    }
                    if !self.is_alive(source) {
                        break;
                    }
                }
            }
            if !self.is_alive(source) {
                continue;
            }

            self.gain_block(source, intent.block);
            for effect in &intent.effects {
                match effect {
                    MoveEffect::SelfPower { power, amount } => {
                        self.apply_power(source, *power, *amount)?;
                    }
                    MoveEffect::PlayerPower { power, amount } => {
                        self.apply_power(Creature::Player, *power, *amount)?;
                    }
                    MoveEffect::AddCard { card, pile, count } => {
                        for _ in 0..*count {
                            self.create_card(card, *pile, false)?;
                        }
                    }
                }
            }

            let enemy = &mut self.combat.enemies[index];
            let next = enemy.def.roll_move(&enemy.history, &mut self.combat.rng.ai)?;
            enemy.set_intent(next);
            let move_id = enemy
                .intent()
                .map(|intent| intent.id.clone())
                .unwrap_or_default();
            self.combat.push_event(CombatEvent::IntentRolled {
                enemy: index,
                move_id,
            });
        }
        Ok(())
    }

    fn end_of_round(&mut self) -> Result<(), SimError> {
        self.combat.phase = Phase::EndOfRound;
        let registry = self.registry();

        for index in 0..self.combat.enemies.len() {
            let owner = Creature::Enemy(index);
            if !self.is_alive(owner) {
                continue;
            }
            let mut triggers = Vec::new();
            for (power, behavior) in registry.ordered(self.powers_of(owner)) {
                behavior.at_end_of_round(power.amount, power.just_applied, &mut triggers);
            }
            for trigger in triggers {
                self.apply_trigger(owner, trigger, None)?;
            }

            let enemy = &mut self.combat.enemies[index];
            let expired = enemy
                .powers
                .tick_down(true, decays(registry, PowerDecay::EndOfTurn));
            enemy.powers.settle();
            self.log_expired(owner, expired);

            if self.config().enemy_block_decay == EnemyBlockDecay::EndOfRound
                && !self.retains_block(owner)
            {
                self.combat.enemies[index].block = 0;
            }
        }

        self.combat.player.powers.settle();
        Ok(())
    }
}
