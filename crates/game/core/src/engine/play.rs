//! Card play and effect resolution.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::action::{IllegalAction, check_play, check_target};
use crate::card::{
    Amount, CardEffect, CardType, Condition, DamageTarget, Hits, PileKind, PowerTarget,
};
use crate::combat::DamageClass;
use crate::error::SimError;
use crate::relic::flat_damage_bonus;
use crate::stance::Stance;
use crate::state::{CombatEvent, Creature, PendingChoice, Resume};

use super::resolver::Resolver;

/// What the resolution loop does after one effect.
enum Flow {
    Continue,
    /// Splice these effects in front of the queue.
    Expand(Vec<CardEffect>),
    /// A scry revealed this many cards; stop until the caller chooses.
    Suspend(usize),
    /// End the turn once the card has been routed.
    EndTurn,
}

impl Resolver<'_, '_> {
    /// Pays for the card, resolves its effects and routes it.
    pub(crate) fn play_card(
        &mut self,
        hand_index: usize,
        target: Option<usize>,
    ) -> Result<(), SimError> {
        let card = check_play(self.combat, hand_index)?;
        check_target(self.combat, card, target)?;

        let piles = &mut self.combat.player.piles;
        let card = piles.hand.remove(hand_index);
        let cost = card.cost();
        let label = card.label();
        let effects = CardEffect::ordered(&card.def.effects);
        piles.limbo = Some(card);
        self.combat.player.energy -= cost;

        self.combat.push_event(CombatEvent::CardPlayed {
            card: label,
            target,
            cost,
        });
        debug!(hand_index, ?target, cost, "card played");

        self.run_effects(effects.into(), target)
    }

    /// Applies the caller's scry selection and resumes any suspended card.
    pub(crate) fn resolve_scry(&mut self, discard: &[usize]) -> Result<(), SimError> {
        let Some(PendingChoice::Scry { revealed, .. }) = &self.combat.pending else {
            return Err(IllegalAction::NoChoicePending.into());
        };
        let revealed = *revealed;
        validate_selection(discard, revealed)?;

        let Some(PendingChoice::Scry { resume, .. }) = self.combat.pending.take() else {
            return Err(IllegalAction::NoChoicePending.into());
        };

        // Index 0 is the top card, the end of the draw vector.
        let piles = &mut self.combat.player.piles;
        let top = piles.draw.len();
        let mut positions: Vec<usize> = discard.iter().map(|index| top - 1 - index).collect();
        positions.sort_unstable_by(|a, b| b.cmp(a));
        let mut discarded = Vec::with_capacity(positions.len());
        for position in positions {
            let card = piles.draw.remove(position);
            discarded.push(card.label());
            piles.discard.push(card);
        }
        debug!(revealed, discarded = discarded.len(), "scry resolved");
        self.combat
            .push_event(CombatEvent::Scried { revealed, discarded });

        match resume {
            Some(Resume { target, effects }) => self.run_effects(effects.into(), target),
            None => Ok(()),
        }
    }

    /// Resolves `queue` in order, then routes the card in limbo.
    fn run_effects(
        &mut self,
        mut queue: VecDeque<CardEffect>,
        target: Option<usize>,
    ) -> Result<(), SimError> {
        let mut end_turn = false;
        while let Some(effect) = queue.pop_front() {
            if self.combat.is_over() {
                break;
            }
            match self.resolve_effect(&effect, target)? {
                Flow::Continue => {}
                Flow::Expand(effects) => {
                    for effect in effects.into_iter().rev() {
                        queue.push_front(effect);
                    }
                }
                Flow::Suspend(revealed) => {
                    if end_turn {
                        queue.push_back(CardEffect::EndTurn);
                    }
                    self.combat.pending = Some(PendingChoice::Scry {
                        revealed,
                        resume: Some(Resume {
                            target,
                            effects: queue.into(),
                        }),
                    });
                    trace!(revealed, "card suspended for scry");
                    return Ok(());
                }
                Flow::EndTurn => end_turn = true,
            }
        }

        self.finish_card();
        if end_turn && !self.combat.is_over() {
            self.end_turn()?;
        }
        Ok(())
    }

    fn resolve_effect(
        &mut self,
        effect: &CardEffect,
        target: Option<usize>,
    ) -> Result<Flow, SimError> {
        let Some(card) = self.combat.player.piles.limbo.clone() else {
            return Ok(Flow::Continue);
        };

        match effect {
            CardEffect::Damage {
                target: damage_target,
                hits,
            } => {
                let base = card.damage();
                let flat = flat_damage_bonus(&self.combat.player.relics, &card);
                let hits = match hits {
                    Hits::Once => 1,
                    Hits::Fixed(count) => *count,
                    Hits::Magic => Amount::Magic.count(&card),
                    Hits::PerEnemy => {
                        u32::try_from(self.combat.living_enemies().count()).unwrap_or(u32::MAX)
                    }
                };
                for _ in 0..hits {
                    match damage_target {
                        DamageTarget::Chosen => {
                            let Some(index) = target else { break };
                            self.damage(
                                Creature::Player,
                                Creature::Enemy(index),
                                base,
                                flat,
                                DamageClass::Normal,
                            )?;
                        }
                        DamageTarget::AllEnemies => {
                            for index in 0..self.combat.enemies.len() {
                                self.damage(
                                    Creature::Player,
                                    Creature::Enemy(index),
                                    base,
                                    flat,
                                    DamageClass::Normal,
                                )?;
                            }
                        }
                    }
                    if self.combat.is_over() {
                        break;
                    }
                }
            }
            CardEffect::Block(amount) => self.card_block(amount.resolve(&card)),
            CardEffect::EnterStance(stance) => self.change_stance(*stance)?,
            CardEffect::ExitStance => self.change_stance(Stance::Neutral)?,
            CardEffect::Mantra(amount) => self.add_mantra(amount.count(&card))?,
            CardEffect::Draw(amount) => self.draw(amount.count(&card)),
            CardEffect::Scry(amount) => {
                if let Some(revealed) = self.begin_scry(amount.count(&card))? {
                    return Ok(Flow::Suspend(revealed));
                }
            }
            CardEffect::GainEnergy(amount) => self.gain_energy(amount.resolve(&card)),
            CardEffect::ApplyPower {
                power,
                amount,
                target: power_target,
            } => {
                let amount = amount.resolve(&card);
                match power_target {
                    PowerTarget::Player => self.apply_power(Creature::Player, *power, amount)?,
                    PowerTarget::Chosen => {
                        if let Some(index) = target {
                            self.apply_power(Creature::Enemy(index), *power, amount)?;
                        }
                    }
                    PowerTarget::AllEnemies => {
                        for index in 0..self.combat.enemies.len() {
                            self.apply_power(Creature::Enemy(index), *power, amount)?;
                        }
                    }
                }
            }
            CardEffect::AddCard {
                card: id,
                pile,
                count,
                upgraded,
            } => {
                for _ in 0..count.count(&card) {
                    self.create_card(id, *pile, *upgraded)?;
                }
            }
            CardEffect::SetHandCostForTurn(cost) => {
                for held in &mut self.combat.player.piles.hand {
                    if *cost < held.cost() {
                        held.cost_for_turn = Some(*cost);
                    }
                }
            }
            CardEffect::EndTurn => return Ok(Flow::EndTurn),
            CardEffect::Conditional {
                condition,
                then,
                otherwise,
            } => {
                let branch = if self.holds(*condition, target) {
                    then
                } else {
                    otherwise
                };
                return Ok(Flow::Expand(branch.clone()));
            }
        }
        Ok(Flow::Continue)
    }

    fn holds(&self, condition: Condition, target: Option<usize>) -> bool {
        match condition {
            Condition::InStance(stance) => self.combat.player.stance == stance,
            Condition::LastCardWas(card_type) => {
                self.combat.player.counters.last_card_type == Some(card_type)
            }
            Condition::TargetIntendsAttack => target
                .and_then(|index| self.combat.enemy(index))
                .is_some_and(|enemy| enemy.intends_attack()),
        }
    }

    /// Moves the card in limbo to its destination and updates counters.
    fn finish_card(&mut self) {
        let Some(card) = self.combat.player.piles.limbo.take() else {
            return;
        };
        let card_type = card.card_type();
        let destination = card.play_destination();
        let label = card.label();
        let landed = self.place_card(card, destination);
        if landed != PileKind::Discard {
            self.combat.push_event(CombatEvent::CardMoved {
                card: label,
                to: landed,
            });
        }

        let counters = &mut self.combat.player.counters;
        counters.cards_played += 1;
        if card_type == CardType::Attack {
            counters.attacks_played += 1;
        }
        counters.last_card_type = Some(card_type);
    }
}

fn validate_selection(discard: &[usize], revealed: usize) -> Result<(), IllegalAction> {
    for (position, &index) in discard.iter().enumerate() {
        if index >= revealed || discard[..position].contains(&index) {
            return Err(IllegalAction::InvalidScrySelection { index, revealed });
        }
    }
    Ok(())
}
