//! Built-in power behaviours.

use crate::combat::DamageClass;
use crate::stance::{Stance, StanceChange};

use super::behavior::{PowerBehavior, PowerDecay, PowerKind, PowerTrigger, TurnEndContext};
use super::PowerId;

const ADDITIVE: i32 = 0;
const MULTIPLICATIVE: i32 = 10;

#[derive(Debug)]
pub struct Strength;

impl PowerBehavior for Strength {
    fn id(&self) -> PowerId {
        PowerId::Strength
    }

    fn priority(&self) -> i32 {
        ADDITIVE
    }

    fn at_damage_give(&self, amount: i32, damage: f64, class: DamageClass) -> f64 {
        if class.is_normal() {
            damage + f64::from(amount)
        } else {
            damage
        }
    }
}

#[derive(Debug)]
pub struct Dexterity;

impl PowerBehavior for Dexterity {
    fn id(&self) -> PowerId {
        PowerId::Dexterity
    }

    fn priority(&self) -> i32 {
        ADDITIVE
    }

    fn modify_block(&self, amount: i32, block: f64) -> f64 {
        block + f64::from(amount)
    }
}

#[derive(Debug)]
pub struct Weak;

impl PowerBehavior for Weak {
    fn id(&self) -> PowerId {
        PowerId::Weak
    }

    fn kind(&self) -> PowerKind {
        PowerKind::Debuff
    }

    fn priority(&self) -> i32 {
        MULTIPLICATIVE
    }

    fn decay(&self) -> PowerDecay {
        PowerDecay::EndOfTurn
    }

    fn at_damage_give(&self, _amount: i32, damage: f64, class: DamageClass) -> f64 {
        if class.is_normal() {
            damage * 0.75
        } else {
            damage
        }
    }
}

#[derive(Debug)]
pub struct Vulnerable;

impl PowerBehavior for Vulnerable {
    fn id(&self) -> PowerId {
        PowerId::Vulnerable
    }

    fn kind(&self) -> PowerKind {
        PowerKind::Debuff
    }

    fn priority(&self) -> i32 {
        MULTIPLICATIVE
    }

    fn decay(&self) -> PowerDecay {
        PowerDecay::EndOfTurn
    }

    fn at_damage_receive(&self, _amount: i32, damage: f64, class: DamageClass) -> f64 {
        if class.is_normal() {
            damage * 1.5
        } else {
            damage
        }
    }
}

#[derive(Debug)]
pub struct Frail;

impl PowerBehavior for Frail {
    fn id(&self) -> PowerId {
        PowerId::Frail
    }

    fn kind(&self) -> PowerKind {
        PowerKind::Debuff
    }

    fn priority(&self) -> i32 {
        MULTIPLICATIVE
    }

    fn decay(&self) -> PowerDecay {
        PowerDecay::EndOfTurn
    }

    fn modify_block(&self, _amount: i32, block: f64) -> f64 {
        block * 0.75
    }
}

/// Caps every incoming hit at 1, whatever its class.
#[derive(Debug)]
pub struct Intangible;

impl PowerBehavior for Intangible {
    fn id(&self) -> PowerId {
        PowerId::Intangible
    }

    fn decay(&self) -> PowerDecay {
        PowerDecay::TurnStart
    }

    fn at_damage_final_receive(&self, _amount: i32, damage: f64, _class: DamageClass) -> f64 {
        damage.min(1.0)
    }
}

#[derive(Debug)]
pub struct Thorns;

impl PowerBehavior for Thorns {
    fn id(&self) -> PowerId {
        PowerId::Thorns
    }

    fn on_attacked(&self, amount: i32, out: &mut Vec<PowerTrigger>) {
        out.push(PowerTrigger::DamageAttacker {
            amount,
            class: DamageClass::Thorns,
        });
    }
}

#[derive(Debug)]
pub struct Metallicize;

impl PowerBehavior for Metallicize {
    fn id(&self) -> PowerId {
        PowerId::Metallicize
    }

    fn at_turn_end(&self, amount: i32, _ctx: TurnEndContext, out: &mut Vec<PowerTrigger>) {
        out.push(PowerTrigger::GainBlock(amount));
    }
}

/// Grants strength every round after the one it was gained in.
#[derive(Debug)]
pub struct Ritual;

impl PowerBehavior for Ritual {
    fn id(&self) -> PowerId {
        PowerId::Ritual
    }

    fn at_end_of_round(&self, amount: i32, just_applied: bool, out: &mut Vec<PowerTrigger>) {
        if !just_applied {
            out.push(PowerTrigger::GainPower(PowerId::Strength, amount));
        }
    }
}

#[derive(Debug)]
pub struct MentalFortress;

impl PowerBehavior for MentalFortress {
    fn id(&self) -> PowerId {
        PowerId::MentalFortress
    }

    fn on_stance_change(&self, amount: i32, _change: &StanceChange, out: &mut Vec<PowerTrigger>) {
        out.push(PowerTrigger::GainBlock(amount));
    }
}

#[derive(Debug)]
pub struct Rushdown;

impl PowerBehavior for Rushdown {
    fn id(&self) -> PowerId {
        PowerId::Rushdown
    }

    fn on_stance_change(&self, amount: i32, change: &StanceChange, out: &mut Vec<PowerTrigger>) {
        if change.to == Stance::Wrath && amount > 0 {
            out.push(PowerTrigger::Draw(amount.unsigned_abs()));
        }
    }
}

#[derive(Debug)]
pub struct LikeWater;

impl PowerBehavior for LikeWater {
    fn id(&self) -> PowerId {
        PowerId::LikeWater
    }

    fn at_turn_end(&self, amount: i32, ctx: TurnEndContext, out: &mut Vec<PowerTrigger>) {
        if ctx.stance == Stance::Calm {
            out.push(PowerTrigger::GainBlock(amount));
        }
    }
}

#[derive(Debug)]
pub struct Devotion;

impl PowerBehavior for Devotion {
    fn id(&self) -> PowerId {
        PowerId::Devotion
    }

    fn at_turn_start(&self, amount: i32, out: &mut Vec<PowerTrigger>) {
        if amount > 0 {
            out.push(PowerTrigger::GainMantra(amount.unsigned_abs()));
        }
    }
}

#[derive(Debug)]
pub struct Foresight;

impl PowerBehavior for Foresight {
    fn id(&self) -> PowerId {
        PowerId::Foresight
    }

    fn at_turn_start(&self, amount: i32, out: &mut Vec<PowerTrigger>) {
        if amount > 0 {
            out.push(PowerTrigger::Scry(amount.unsigned_abs()));
        }
    }
}

/// Energy each turn, growing by one per turn held.
#[derive(Debug)]
pub struct DevaForm;

impl PowerBehavior for DevaForm {
    fn id(&self) -> PowerId {
        PowerId::DevaForm
    }

    fn at_turn_start(&self, amount: i32, out: &mut Vec<PowerTrigger>) {
        out.push(PowerTrigger::GainEnergy(amount));
        out.push(PowerTrigger::GainPower(PowerId::DevaForm, 1));
    }
}

#[derive(Debug)]
pub struct Nirvana;

impl PowerBehavior for Nirvana {
    fn id(&self) -> PowerId {
        PowerId::Nirvana
    }

    fn on_scry(&self, amount: i32, out: &mut Vec<PowerTrigger>) {
        out.push(PowerTrigger::GainBlock(amount));
    }
}

#[derive(Debug)]
pub struct Blur;

impl PowerBehavior for Blur {
    fn id(&self) -> PowerId {
        PowerId::Blur
    }

    fn decay(&self) -> PowerDecay {
        PowerDecay::TurnStart
    }

    fn retains_block(&self) -> bool {
        true
    }
}

#[derive(Debug)]
pub struct Barricade;

impl PowerBehavior for Barricade {
    fn id(&self) -> PowerId {
        PowerId::Barricade
    }

    fn retains_block(&self) -> bool {
        true
    }
}

#[derive(Debug)]
pub struct NoDraw;

impl PowerBehavior for NoDraw {
    fn id(&self) -> PowerId {
        PowerId::NoDraw
    }

    fn kind(&self) -> PowerKind {
        PowerKind::Debuff
    }

    fn decay(&self) -> PowerDecay {
        PowerDecay::EndOfTurn
    }

    fn blocks_draw(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strength_ignores_non_normal_damage() {
        assert_eq!(Strength.at_damage_give(3, 6.0, DamageClass::Normal), 9.0);
        assert_eq!(Strength.at_damage_give(3, 6.0, DamageClass::Thorns), 6.0);
    }

    #[test]
    fn intangible_caps_every_class() {
        assert_eq!(Intangible.at_damage_final_receive(1, 30.0, DamageClass::HpLoss), 1.0);
        assert_eq!(Intangible.at_damage_final_receive(1, 0.0, DamageClass::Normal), 0.0);
    }

    #[test]
    fn ritual_skips_the_round_it_was_gained() {
        let mut out = Vec::new();
        Ritual.at_end_of_round(3, true, &mut out);
        assert!(out.is_empty());
        Ritual.at_end_of_round(3, false, &mut out);
        assert_eq!(out, vec![PowerTrigger::GainPower(PowerId::Strength, 3)]);
    }

    #[test]
    fn like_water_only_in_calm() {
        let mut out = Vec::new();
        LikeWater.at_turn_end(5, TurnEndContext { stance: Stance::Wrath }, &mut out);
        assert!(out.is_empty());
        LikeWater.at_turn_end(5, TurnEndContext { stance: Stance::Calm }, &mut out);
        assert_eq!(out, vec![PowerTrigger::GainBlock(5)]);
    }
}
