//! Damage and block calculation.

use crate::power::{NO_POWERS, PowerRegistry, Powers};
use crate::stance::StanceMultipliers;

// ============================================================================
// Damage Class
// ============================================================================

/// Damage class, deciding which pipeline steps apply.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageClass {
    /// Attacks. Every step applies.
    #[default]
    Normal,
    /// Retaliation damage. Only final-receive hooks (intangible) apply.
    Thorns,
    /// Direct HP loss. Only final-receive hooks apply, and block is ignored.
    HpLoss,
}

impl DamageClass {
    pub const fn is_normal(self) -> bool {
        matches!(self, Self::Normal)
    }

    pub const fn bypasses_block(self) -> bool {
        matches!(self, Self::HpLoss)
    }
}

// ============================================================================
// Modifiers
// ============================================================================

/// One side of a damage or block calculation: a creature's powers plus a flat
/// bonus from relics.
#[derive(Clone, Copy, Debug)]
pub struct Modifiers<'a> {
    pub powers: &'a Powers,
    pub registry: &'a PowerRegistry,
    /// Relic-style flat bonus added to the base before any power.
    pub flat: i32,
}

impl<'a> Modifiers<'a> {
    pub fn new(powers: &'a Powers, registry: &'a PowerRegistry) -> Self {
        Self {
            powers,
            registry,
            flat: 0,
        }
    }

    /// No powers, no flat bonus.
    pub fn none(registry: &'a PowerRegistry) -> Self {
        Self::new(&NO_POWERS, registry)
    }

    pub fn with_flat(mut self, flat: i32) -> Self {
        self.flat = flat;
        self
    }
}

// ============================================================================
// Damage Calculation
// ============================================================================

/// Outgoing damage of a player attack.
///
/// # Pipeline
///
/// ```text
/// damage = base + flat                          (normal only)
/// damage = attacker.at_damage_give(damage)      (priority order)
/// damage = damage * stance.outgoing             (normal only)
/// damage = defender.at_damage_receive(damage)   (priority order)
/// damage = attacker.at_damage_final_give(damage)
/// damage = defender.at_damage_final_receive(damage)
/// result = max(floor(damage), 0)
/// ```
///
/// `stance` is the player's; only its outgoing half is consulted here.
/// Thorns and HP-loss damage skip everything but the final-receive hooks.
pub fn calculate_damage(
    base: i32,
    attacker: &Modifiers<'_>,
    stance: StanceMultipliers,
    defender: &Modifiers<'_>,
    class: DamageClass,
) -> i32 {
    pipeline(base, attacker, stance.outgoing, defender, 1.0, class)
}

/// Damage aimed at the player.
///
/// Same order as [`calculate_damage`], except the player's stance incoming
/// multiplier is applied after the defender's receive hooks and no outgoing
/// multiplier is applied. Divinity's tripled outgoing damage therefore never
/// reaches this function.
pub fn calculate_incoming_damage(
    base: i32,
    attacker: &Modifiers<'_>,
    stance: StanceMultipliers,
    defender: &Modifiers<'_>,
    class: DamageClass,
) -> i32 {
    pipeline(base, attacker, 1.0, defender, stance.incoming, class)
}

/// Damage between two creatures without stances (enemy intents shown to a
/// stance-neutral observer, thorns aimed at an enemy).
pub fn calculate_monster_damage(
    base: i32,
    attacker: &Modifiers<'_>,
    defender: &Modifiers<'_>,
    class: DamageClass,
) -> i32 {
    pipeline(base, attacker, 1.0, defender, 1.0, class)
}

fn pipeline(
    base: i32,
    attacker: &Modifiers<'_>,
    outgoing: f64,
    defender: &Modifiers<'_>,
    incoming: f64,
    class: DamageClass,
) -> i32 {
    let normal = class.is_normal();
    let mut damage = f64::from(base);

    if normal {
        damage += f64::from(attacker.flat);
        for (power, behavior) in attacker.registry.ordered(attacker.powers) {
            damage = behavior.at_damage_give(power.amount, damage, class);
        }
        damage *= outgoing;
        for (power, behavior) in defender.registry.ordered(defender.powers) {
            damage = behavior.at_damage_receive(power.amount, damage, class);
        }
        damage *= incoming;
        for (power, behavior) in attacker.registry.ordered(attacker.powers) {
            damage = behavior.at_damage_final_give(power.amount, damage, class);
        }
    }

    for (power, behavior) in defender.registry.ordered(defender.powers) {
        damage = behavior.at_damage_final_receive(power.amount, damage, class);
    }

    clamp_floor(damage)
}

// ============================================================================
// Block Calculation
// ============================================================================

/// Block gained from a card.
///
/// ```text
/// block = base + flat
/// block = modify_block(block)   (dexterity adds, frail multiplies by 0.75)
/// result = max(floor(block), 0)
/// ```
pub fn calculate_block(base: i32, modifiers: &Modifiers<'_>) -> i32 {
    let mut block = f64::from(base) + f64::from(modifiers.flat);
    for (power, behavior) in modifiers.registry.ordered(modifiers.powers) {
        block = behavior.modify_block(power.amount, block);
    }
    clamp_floor(block)
}

fn clamp_floor(value: f64) -> i32 {
    let floored = value.floor();
    if floored <= 0.0 {
        0
    } else if floored >= f64::from(i32::MAX) {
        i32::MAX
    } else {
        floored as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::power::PowerId;
    use crate::stance::Stance;

    fn powers(list: &[(PowerId, i32)]) -> Powers {
        let mut powers = Powers::new();
        for &(id, amount) in list {
            powers.apply(id, amount, false);
        }
        powers
    }

    #[test]
    fn strength_wrath_vulnerable_is_27() {
        let registry = PowerRegistry::standard();
        let attacker = powers(&[(PowerId::Strength, 3)]);
        let defender = powers(&[(PowerId::Vulnerable, 1)]);
        let stance = StanceMultipliers {
            outgoing: 2.0,
            incoming: 2.0,
        };
        let damage = calculate_damage(
            6,
            &Modifiers::new(&attacker, &registry),
            stance,
            &Modifiers::new(&defender, &registry),
            DamageClass::Normal,
        );
        assert_eq!(damage, 27);
    }

    #[test]
    fn divinity_does_not_change_incoming_damage() {
        let registry = PowerRegistry::standard();
        let none = Modifiers::none(&registry);
        let neutral = calculate_incoming_damage(
            10,
            &none,
            Stance::Neutral.multipliers(),
            &none,
            DamageClass::Normal,
        );
        let divinity = calculate_incoming_damage(
            10,
            &none,
            Stance::Divinity.multipliers(),
            &none,
            DamageClass::Normal,
        );
        assert_eq!(neutral, 10);
        assert_eq!(divinity, neutral);

        let wrath = calculate_incoming_damage(
            10,
            &none,
            Stance::Wrath.multipliers(),
            &none,
            DamageClass::Normal,
        );
        assert_eq!(wrath, 20);
    }

    #[test]
    fn weak_floors_at_the_end() {
        // 7 * 0.75 * 1.5 = 7.875 -> 7
        let registry = PowerRegistry::standard();
        let attacker = powers(&[(PowerId::Weak, 1)]);
        let defender = powers(&[(PowerId::Vulnerable, 2)]);
        let damage = calculate_monster_damage(
            7,
            &Modifiers::new(&attacker, &registry),
            &Modifiers::new(&defender, &registry),
            DamageClass::Normal,
        );
        assert_eq!(damage, 7);

        // 9 * 0.75 = 6.75, * 1.5 = 10.125 -> 10; an intermediate floor gives 9.
        let damage = calculate_monster_damage(
            9,
            &Modifiers::new(&attacker, &registry),
            &Modifiers::new(&defender, &registry),
            DamageClass::Normal,
        );
        assert_eq!(damage, 10);
    }

    #[test]
    fn relic_flat_bonus_precedes_stance() {
        let registry = PowerRegistry::standard();
        let attacker = Modifiers::none(&registry).with_flat(3);
        let damage = calculate_damage(
            6,
            &attacker,
            Stance::Wrath.multipliers(),
            &Modifiers::none(&registry),
            DamageClass::Normal,
        );
        assert_eq!(damage, 18);
    }

    #[test]
    fn negative_strength_clamps_to_zero() {
        let registry = PowerRegistry::standard();
        let attacker = powers(&[(PowerId::Strength, -10)]);
        let damage = calculate_monster_damage(
            4,
            &Modifiers::new(&attacker, &registry),
            &Modifiers::none(&registry),
            DamageClass::Normal,
        );
        assert_eq!(damage, 0);
    }

    #[test]
    fn thorns_skip_power_and_stance_steps() {
        let registry = PowerRegistry::standard();
        let attacker = powers(&[(PowerId::Strength, 5)]);
        let defender = powers(&[(PowerId::Vulnerable, 1)]);
        let damage = calculate_damage(
            3,
            &Modifiers::new(&attacker, &registry).with_flat(4),
            Stance::Wrath.multipliers(),
            &Modifiers::new(&defender, &registry),
            DamageClass::Thorns,
        );
        assert_eq!(damage, 3);
    }

    #[test]
    fn intangible_applies_to_hp_loss() {
        let registry = PowerRegistry::standard();
        let defender = powers(&[(PowerId::Intangible, 1)]);
        let damage = calculate_monster_damage(
            12,
            &Modifiers::none(&registry),
            &Modifiers::new(&defender, &registry),
            DamageClass::HpLoss,
        );
        assert_eq!(damage, 1);
    }

    #[test]
    fn block_adds_dexterity_then_applies_frail() {
        let registry = PowerRegistry::standard();
        let owner = powers(&[(PowerId::Frail, 1), (PowerId::Dexterity, 2)]);
        // (5 + 2) * 0.75 = 5.25
        assert_eq!(calculate_block(5, &Modifiers::new(&owner, &registry)), 5);

        let negative = powers(&[(PowerId::Dexterity, -9)]);
        assert_eq!(calculate_block(5, &Modifiers::new(&negative, &registry)), 0);
    }
}
