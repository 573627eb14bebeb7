//! Primitive state operations shared by card play and the turn loop.
//!
//! Every mutation of a [`Combat`] during an action goes through a
//! [`Resolver`]: it pairs the borrowed content with the combat being mutated
//! and keeps the event log, combat-end detection and power triggers in one
//! place.

use tracing::{debug, info, trace};

use crate::card::{CardInstance, CardTags, PileKind};
use crate::combat::{
    DamageClass, Modifiers, apply_hit, calculate_block, calculate_damage,
    calculate_incoming_damage, calculate_monster_damage,
};
use crate::config::CombatConfig;
use crate::env::GameEnv;
use crate::error::SimError;
use crate::power::{NO_POWERS, PowerId, PowerRegistry, PowerTrigger, Powers};
use crate::stance::{self, Stance, StanceRules};
use crate::state::{Combat, CombatEvent, Creature, PendingChoice, Phase};

pub(crate) struct Resolver<'c, 'e> {
    pub(crate) env: GameEnv<'e>,
    pub(crate) combat: &'c mut Combat,
}

impl<'c, 'e> Resolver<'c, 'e> {
    pub(crate) fn new(env: GameEnv<'e>, combat: &'c mut Combat) -> Self {
        Self { env, combat }
    }

    pub(crate) fn registry(&self) -> &'e PowerRegistry {
        self.env.powers()
    }

    pub(crate) fn config(&self) -> &'e CombatConfig {
        self.env.config()
    }

    // ========================================================================
    // Creature access
    // ========================================================================

    pub(crate) fn powers_of(&self, who: Creature) -> &Powers {
        match who {
            Creature::Player => &self.combat.player.powers,
            Creature::Enemy(index) => self
                .combat
                .enemies
                .get(index)
                .map_or(&NO_POWERS, |enemy| &enemy.powers),
        }
    }

    fn powers_mut(&mut self, who: Creature) -> Option<&mut Powers> {
        match who {
            Creature::Player => Some(&mut self.combat.player.powers),
            Creature::Enemy(index) => self
                .combat
                .enemies
                .get_mut(index)
                .map(|enemy| &mut enemy.powers),
        }
    }

    pub(crate) fn is_alive(&self, who: Creature) -> bool {
        match who {
            Creature::Player => self.combat.player.is_alive(),
            Creature::Enemy(index) => self.combat.enemy(index).is_some_and(|e| e.is_alive()),
        }
    }

    fn vitals(&self, who: Creature) -> (i32, i32) {
        match who {
            Creature::Player => (self.combat.player.hp, self.combat.player.block),
            Creature::Enemy(index) => self
                .combat
                .enemy(index)
                .map_or((0, 0), |enemy| (enemy.hp, enemy.block)),
        }
    }

    fn set_vitals(&mut self, who: Creature, hp: i32, block: i32) {
        match who {
            Creature::Player => {
                self.combat.player.hp = hp;
                self.combat.player.block = block;
            }
            Creature::Enemy(index) => {
                if let Some(enemy) = self.combat.enemies.get_mut(index) {
                    enemy.hp = hp;
                    enemy.block = block;
                }
            }
        }
    }

    /// Any power on `who` keeps its block through turn start.
    pub(crate) fn retains_block(&self, who: Creature) -> bool {
        let registry = self.registry();
        self.powers_of(who)
            .iter()
            .any(|power| registry.get(power.id).is_some_and(|b| b.retains_block()))
    }

    // ========================================================================
    // Combat end
    // ========================================================================

    /// Ends the combat if either side is dead. Returns `true` once ended.
    pub(crate) fn check_end(&mut self) -> bool {
        if self.combat.is_over() {
            return true;
        }
        let victory = if !self.combat.player.is_alive() {
            false
        } else if self.combat.all_enemies_dead() {
            true
        } else {
            return false;
        };

        self.combat.phase = Phase::Ended { victory };
        self.combat.pending = None;
        let turn = self.combat.turn;
        self.combat
            .push_event(CombatEvent::CombatEnded { victory, turn });
        info!(victory, turn, hp = self.combat.player.hp, "combat ended");
        true
    }

    // ========================================================================
    // Energy and block
    // ========================================================================

    pub(crate) fn gain_energy(&mut self, amount: i32) {
        if amount == 0 {
            return;
        }
        let player = &mut self.combat.player;
        player.energy = (player.energy + amount).max(0);
        let energy = player.energy;
        self.combat
            .push_event(CombatEvent::EnergyGained { amount, energy });
    }

    /// Raw block, not modified by dexterity or frail.
    pub(crate) fn gain_block(&mut self, who: Creature, amount: i32) {
        if amount <= 0 || !self.is_alive(who) {
            return;
        }
        let (hp, block) = self.vitals(who);
        self.set_vitals(who, hp, block.saturating_add(amount));
        self.combat
            .push_event(CombatEvent::BlockGained { target: who, amount });
    }

    /// Block from a card, through the block pipeline.
    pub(crate) fn card_block(&mut self, base: i32) {
        let modifiers = Modifiers::new(&self.combat.player.powers, self.registry());
        let amount = calculate_block(base, &modifiers);
        self.gain_block(Creature::Player, amount);
    }

    // ========================================================================
    // Damage
    // ========================================================================

    /// Computes and applies one hit from `source` to `target`.
    ///
    /// Player attacks use the player's outgoing stance multiplier, enemy
    /// attacks the player's incoming one; anything else uses no stance.
    /// `flat` is the relic bonus of a card attack.
    pub(crate) fn damage(
        &mut self,
        source: Creature,
        target: Creature,
        base: i32,
        flat: i32,
        class: DamageClass,
    ) -> Result<(), SimError> {
        if self.combat.is_over() || !self.is_alive(target) {
            return Ok(());
        }

        let registry = self.registry();
        let attacker = Modifiers::new(self.powers_of(source), registry).with_flat(flat);
        let defender = Modifiers::new(self.powers_of(target), registry);
        let stance = self.combat.player.stance.multipliers();
        let amount = match (source, target) {
            (Creature::Player, Creature::Enemy(_)) => {
                calculate_damage(base, &attacker, stance, &defender, class)
            }
            (Creature::Enemy(_), Creature::Player) => {
                calculate_incoming_damage(base, &attacker, stance, &defender, class)
            }
            _ => calculate_monster_damage(base, &attacker, &defender, class),
        };

        self.hit(source, target, amount, class)
    }

    fn hit(
        &mut self,
        source: Creature,
        target: Creature,
        amount: i32,
        class: DamageClass,
    ) -> Result<(), SimError> {
        let (hp, block) = self.vitals(target);
        let result = apply_hit(hp, block, amount, class);
        self.set_vitals(target, result.hp_after, result.block_after);
        self.combat.push_event(CombatEvent::Damage {
            source,
            target,
            amount,
            blocked: result.blocked,
            hp_lost: result.hp_lost,
        });
        trace!(?source, ?target, amount, blocked = result.blocked, "hit");

        if result.killed {
            self.combat
                .push_event(CombatEvent::CreatureDied { target });
            debug!(?target, "creature died");
        }

        if class.is_normal() && source != target && self.is_alive(source) {
            let mut triggers = Vec::new();
            for (power, behavior) in self.registry().ordered(self.powers_of(target)) {
                behavior.on_attacked(power.amount, &mut triggers);
            }
            for trigger in triggers {
                self.apply_trigger(target, trigger, Some(source))?;
            }
        }

        self.check_end();
        Ok(())
    }

    // ========================================================================
    // Stance and mantra
    // ========================================================================

    /// Moves the player to `to`, firing stance-change hooks on real changes.
    pub(crate) fn change_stance(&mut self, to: Stance) -> Result<(), SimError> {
        let config = self.config();
        let player = &self.combat.player;
        let rules = StanceRules {
            calm_exit_energy: player.calm_exit_energy(config.calm_exit_energy),
            divinity_entry_energy: config.divinity_entry_energy,
        };
        let change = stance::change_stance(player.stance, to, rules);
        if !change.is_real_change {
            return Ok(());
        }

        self.combat.player.stance = to;
        if change.resets_mantra() {
            self.combat.player.mantra.reset();
        }
        self.combat.push_event(CombatEvent::StanceChanged {
            from: change.from,
            to: change.to,
        });
        debug!(from = %change.from, to = %change.to, "stance changed");
        self.gain_energy(change.energy_delta);

        let mut triggers = Vec::new();
        for (power, behavior) in self.registry().ordered(&self.combat.player.powers) {
            behavior.on_stance_change(power.amount, &change, &mut triggers);
        }
        for trigger in triggers {
            self.apply_trigger(Creature::Player, trigger, None)?;
        }

        self.return_stance_cards();
        Ok(())
    }

    /// Moves every discard-pile card tagged to return on stance change back
    /// to hand while there is room.
    fn return_stance_cards(&mut self) {
        let piles = &mut self.combat.player.piles;
        let mut returned = Vec::new();
        let mut index = 0;
        while index < piles.discard.len() {
            if piles.discard[index].has_tag(CardTags::RETURN_ON_STANCE_CHANGE)
                && !piles.hand_is_full()
            {
                let card = piles.discard.remove(index);
                returned.push(card.label());
                piles.push_to_hand(card);
            } else {
                index += 1;
            }
        }
        for card in returned {
            self.combat.push_event(CombatEvent::CardMoved {
                card,
                to: PileKind::Hand,
            });
        }
    }

    pub(crate) fn add_mantra(&mut self, amount: u32) -> Result<(), SimError> {
        if amount == 0 {
            return Ok(());
        }
        let config = self.config();
        let gain = self.combat.player.mantra.add(
            amount,
            config.mantra_threshold,
            config.mantra_overflow,
        );
        let total = self.combat.player.mantra.value();
        self.combat
            .push_event(CombatEvent::MantraGained { amount, total });

        if gain.triggered {
            let carried = self.combat.player.mantra;
            self.change_stance(Stance::Divinity)?;
            self.combat.player.mantra = carried;
        }
        Ok(())
    }

    // ========================================================================
    // Powers
    // ========================================================================

    pub(crate) fn apply_power(
        &mut self,
        target: Creature,
        power: PowerId,
        amount: i32,
    ) -> Result<(), SimError> {
        self.registry().require(power)?;
        if amount == 0 || !self.is_alive(target) {
            return Ok(());
        }
        let just_applied = self.combat.phase == Phase::MonsterTurn;
        let Some(powers) = self.powers_mut(target) else {
            return Ok(());
        };
        let total = powers.apply(power, amount, just_applied);
        self.combat.push_event(CombatEvent::PowerApplied {
            target,
            power,
            amount,
            total,
        });
        Ok(())
    }

    pub(crate) fn log_expired(&mut self, target: Creature, expired: Vec<PowerId>) {
        for power in expired {
            self.combat
                .push_event(CombatEvent::PowerExpired { target, power });
        }
    }

    /// Applies a hook result on behalf of `owner`.
    pub(crate) fn apply_trigger(
        &mut self,
        owner: Creature,
        trigger: PowerTrigger,
        attacker: Option<Creature>,
    ) -> Result<(), SimError> {
        if self.combat.is_over() {
            return Ok(());
        }
        let is_player = owner == Creature::Player;
        match trigger {
            PowerTrigger::GainBlock(amount) => self.gain_block(owner, amount),
            PowerTrigger::GainEnergy(amount) if is_player => self.gain_energy(amount),
            PowerTrigger::GainMantra(amount) if is_player => self.add_mantra(amount)?,
            PowerTrigger::Draw(count) if is_player => self.draw(count),
            PowerTrigger::Scry(count) if is_player && self.combat.pending.is_none() => {
                if let Some(revealed) = self.begin_scry(count)? {
                    self.combat.pending = Some(PendingChoice::Scry {
                        revealed,
                        resume: None,
                    });
                }
            }
            PowerTrigger::GainPower(power, amount) => self.apply_power(owner, power, amount)?,
            PowerTrigger::DamageAttacker { amount, class } => {
                if let Some(attacker) = attacker {
                    self.damage(owner, attacker, amount, 0, class)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    // ========================================================================
    // Piles
    // ========================================================================

    fn draw_blocked(&self) -> bool {
        let registry = self.registry();
        self.combat
            .player
            .powers
            .iter()
            .any(|power| registry.get(power.id).is_some_and(|b| b.blocks_draw()))
    }

    /// Draws up to `count` cards, reshuffling the discard pile when the draw
    /// pile runs out. Stops at a full hand.
    pub(crate) fn draw(&mut self, count: u32) {
        if self.draw_blocked() {
            trace!(count, "draw suppressed");
            return;
        }
        for _ in 0..count {
            let piles = &self.combat.player.piles;
            if piles.hand_is_full() {
                break;
            }
            if piles.draw.is_empty() {
                if piles.discard.is_empty() {
                    break;
                }
                self.reshuffle();
            }
            let Some(card) = self.combat.player.piles.draw.pop() else {
                break;
            };
            let label = card.label();
            self.combat.player.piles.push_to_hand(card);
            self.combat
                .push_event(CombatEvent::CardDrawn { card: label });
        }
    }

    /// Shuffles the discard pile (one shuffle-stream call) and places it
    /// under the current draw pile, moving it card by card so its order is
    /// reversed.
    pub(crate) fn reshuffle(&mut self) {
        let piles = &mut self.combat.player.piles;
        let mut cards = core::mem::take(&mut piles.discard);
        self.combat.rng.shuffle.shuffle(&mut cards);
        cards.reverse();
        let count = cards.len();
        cards.append(&mut piles.draw);
        piles.draw = cards;
        self.combat.push_event(CombatEvent::Shuffled { cards: count });
        debug!(cards = count, "reshuffled discard into draw pile");
    }

    /// Inserts at `card.random(len - 1)`, never on the very top.
    fn insert_at_random_spot(&mut self, card: CardInstance) {
        let len = self.combat.player.piles.draw.len();
        let index = if len == 0 {
            0
        } else {
            let bound = i32::try_from(len - 1).unwrap_or(i32::MAX);
            usize::try_from(self.combat.rng.card.random(bound)).unwrap_or(0)
        };
        self.combat
            .player
            .piles
            .draw
            .insert(index.min(len), card);
    }

    /// Puts `card` into `pile` and returns where it actually landed (a full
    /// hand spills into discard).
    pub(crate) fn place_card(&mut self, card: CardInstance, pile: PileKind) -> PileKind {
        let piles = &mut self.combat.player.piles;
        match pile {
            PileKind::Hand => piles.push_to_hand(card),
            PileKind::Draw => {
                piles.draw.push(card);
                PileKind::Draw
            }
            PileKind::DrawRandom => {
                self.insert_at_random_spot(card);
                PileKind::DrawRandom
            }
            PileKind::Discard => {
                piles.discard.push(card);
                PileKind::Discard
            }
            PileKind::Exhaust => {
                piles.exhaust.push(card);
                PileKind::Exhaust
            }
        }
    }

    /// Creates a new copy of `id` in `pile`; logged and counted as introduced.
    pub(crate) fn create_card(
        &mut self,
        id: &str,
        pile: PileKind,
        upgraded: bool,
    ) -> Result<(), SimError> {
        let def = self.env.card(id)?;
        let uuid = self.combat.introduce_card();
        let card = CardInstance::new(def, upgraded, uuid);
        let label = card.label();
        let landed = self.place_card(card, pile);
        self.combat.push_event(CombatEvent::CardCreated {
            card: label,
            pile: landed,
        });
        Ok(())
    }

    /// Fires scry hooks and returns how many cards the caller must choose
    /// from, if any.
    pub(crate) fn begin_scry(&mut self, count: u32) -> Result<Option<usize>, SimError> {
        let mut triggers = Vec::new();
        for (power, behavior) in self.registry().ordered(&self.combat.player.powers) {
            behavior.on_scry(power.amount, &mut triggers);
        }
        for trigger in triggers {
            self.apply_trigger(Creature::Player, trigger, None)?;
        }

        let requested = usize::try_from(count).unwrap_or(usize::MAX);
        let revealed = requested
            .min(self.combat.player.piles.draw.len())
            .min(CombatConfig::MAX_SCRY);
        if revealed == 0 || self.combat.is_over() {
            return Ok(None);
        }
        Ok(Some(revealed))
    }
}
