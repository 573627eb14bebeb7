use crate::combat::DamageClass;
use crate::stance::{Stance, StanceChange};

use super::PowerId;

/// Buff or debuff, used for display and for artifact-style checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PowerKind {
    Buff,
    Debuff,
}

/// When a duration power loses one stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PowerDecay {
    /// Amount is a magnitude, never ticks down.
    Permanent,
    /// At the end of the owner's turn (players: end of player turn,
    /// enemies: end of round).
    EndOfTurn,
    /// Right after the owner's block would have been reset.
    TurnStart,
}

/// Side effect requested by a power hook; the engine applies it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PowerTrigger {
    GainBlock(i32),
    GainEnergy(i32),
    GainMantra(u32),
    Scry(u32),
    Draw(u32),
    /// Stack a power on the owner.
    GainPower(PowerId, i32),
    /// Damage the creature that just attacked the owner.
    DamageAttacker { amount: i32, class: DamageClass },
}

impl PowerTrigger {
    /// Turn-start ordering: energy, then mantra, then scry, then the rest.
    pub(crate) const fn start_order(&self) -> u8 {
        match self {
            Self::GainEnergy(_) => 0,
            Self::GainMantra(_) => 1,
            Self::Scry(_) => 2,
            _ => 3,
        }
    }
}

/// Owner state visible to end-of-turn hooks.
#[derive(Clone, Copy, Debug)]
pub struct TurnEndContext {
    pub stance: Stance,
}

/// Hook capabilities of one power.
///
/// Every hook receives the stacked amount and has a neutral default, so a
/// behaviour only overrides the hooks it participates in. Damage hooks take
/// and return the running `f64` value of the pipeline; no flooring happens
/// inside a hook.
pub trait PowerBehavior: Send + Sync + core::fmt::Debug {
    fn id(&self) -> PowerId;

    fn kind(&self) -> PowerKind {
        PowerKind::Buff
    }

    /// Ordering inside a pipeline step. Lower runs first; additive powers sit
    /// below multiplicative ones.
    fn priority(&self) -> i32 {
        0
    }

    fn decay(&self) -> PowerDecay {
        PowerDecay::Permanent
    }

    /// Outgoing damage while the owner attacks.
    fn at_damage_give(&self, _amount: i32, damage: f64, _class: DamageClass) -> f64 {
        damage
    }

    /// Incoming damage while the owner is attacked.
    fn at_damage_receive(&self, _amount: i32, damage: f64, _class: DamageClass) -> f64 {
        damage
    }

    fn at_damage_final_give(&self, _amount: i32, damage: f64, _class: DamageClass) -> f64 {
        damage
    }

    fn at_damage_final_receive(&self, _amount: i32, damage: f64, _class: DamageClass) -> f64 {
        damage
    }

    fn modify_block(&self, _amount: i32, block: f64) -> f64 {
        block
    }

    /// After the owner's turn-start draw.
    fn at_turn_start(&self, _amount: i32, _out: &mut Vec<PowerTrigger>) {}

    fn at_turn_end(&self, _amount: i32, _ctx: TurnEndContext, _out: &mut Vec<PowerTrigger>) {}

    /// After every enemy has acted.
    fn at_end_of_round(&self, _amount: i32, _just_applied: bool, _out: &mut Vec<PowerTrigger>) {}

    /// Only called for real changes (`from != to`).
    fn on_stance_change(&self, _amount: i32, _change: &StanceChange, _out: &mut Vec<PowerTrigger>) {
    }

    fn on_scry(&self, _amount: i32, _out: &mut Vec<PowerTrigger>) {}

    /// The owner was hit by a normal-class attack.
    fn on_attacked(&self, _amount: i32, _out: &mut Vec<PowerTrigger>) {}

    /// Keeps the owner's block through its turn start.
    fn retains_block(&self) -> bool {
        false
    }

    /// Suppresses card draw while held.
    fn blocks_draw(&self) -> bool {
        false
    }
}
