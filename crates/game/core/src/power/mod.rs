//! Buffs and debuffs held by creatures.
//!
//! A creature owns a [`Powers`] collection of `(PowerId, amount)` pairs in
//! insertion order. Behaviour lives in the [`PowerRegistry`], keyed by the
//! closed [`PowerId`] enum, so adding a power means registering one more
//! [`PowerBehavior`] rather than editing the damage pipeline.

mod behavior;
mod builtin;
mod registry;

pub use behavior::{PowerBehavior, PowerDecay, PowerKind, PowerTrigger, TurnEndContext};
pub use registry::PowerRegistry;

/// Every power the simulator knows about.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PowerId {
    Strength,
    Dexterity,
    Weak,
    Vulnerable,
    Frail,
    Intangible,
    Thorns,
    Metallicize,
    Ritual,
    MentalFortress,
    Rushdown,
    LikeWater,
    Devotion,
    Foresight,
    DevaForm,
    Nirvana,
    Blur,
    Barricade,
    NoDraw,
}

impl PowerId {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// A power instance on a creature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Power {
    pub id: PowerId,
    pub amount: i32,
    /// Applied during the monster turn; skips its first end-of-round tick.
    pub just_applied: bool,
}

/// Keyed power collection preserving insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Powers(Vec<Power>);

/// Shared empty collection for callers without a creature at hand.
pub static NO_POWERS: Powers = Powers::new();

impl Powers {
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn amount(&self, id: PowerId) -> i32 {
        self.get(id).map_or(0, |power| power.amount)
    }

    pub fn has(&self, id: PowerId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: PowerId) -> Option<&Power> {
        self.0.iter().find(|power| power.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Power> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Stacks `amount` onto `id`, creating it if absent. Returns the new total;
    /// a total of zero removes the power.
    pub fn apply(&mut self, id: PowerId, amount: i32, just_applied: bool) -> i32 {
        match self.0.iter().position(|power| power.id == id) {
            Some(index) => {
                let total = self.0[index].amount.saturating_add(amount);
                if total == 0 {
                    self.0.remove(index);
                } else {
                    self.0[index].amount = total;
                    self.0[index].just_applied |= just_applied;
                }
                total
            }
            None if amount == 0 => 0,
            None => {
                self.0.push(Power {
                    id,
                    amount,
                    just_applied,
                });
                amount
            }
        }
    }

    pub fn remove(&mut self, id: PowerId) -> Option<Power> {
        let index = self.0.iter().position(|power| power.id == id)?;
        Some(self.0.remove(index))
    }

    /// Decrements every power matching `filter` by one, removing those that
    /// reach zero. Powers flagged `just_applied` only lose the flag when
    /// `honour_just_applied` is set. Returns the removed ids.
    pub fn tick_down(
        &mut self,
        honour_just_applied: bool,
        mut filter: impl FnMut(PowerId) -> bool,
    ) -> Vec<PowerId> {
        let mut expired = Vec::new();
        self.0.retain_mut(|power| {
            if !filter(power.id) {
                return true;
            }
            if honour_just_applied && power.just_applied {
                power.just_applied = false;
                return true;
            }
            power.amount -= 1;
            if power.amount <= 0 {
                expired.push(power.id);
                false
            } else {
                true
            }
        });
        expired
    }

    /// Clears `just_applied` on every power.
    pub fn settle(&mut self) {
        for power in &mut self.0 {
            power.just_applied = false;
        }
    }
}

impl<'a> IntoIterator for &'a Powers {
    type Item = &'a Power;
    type IntoIter = core::slice::Iter<'a, Power>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
