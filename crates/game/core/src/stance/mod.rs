//! Stance and mantra state machine.
//!
//! Exactly one stance is active at a time. Stances only affect the player's
//! damage pipeline through [`StanceMultipliers`]; their other side effects
//! (energy on exit/entry, block and card returns from powers) are reported as
//! values for the engine to apply.
//!
//! ```text
//!            change_stance             add_mantra (>= threshold)
//! Neutral ◄──────────────────► Wrath / Calm ───────────────────► Divinity
//!    ▲                                                               │
//!    └──────────────── end of player turn ───────────────────────────┘
//! ```

mod mantra;

pub use mantra::{Mantra, MantraGain};

/// Combat stance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stance {
    #[default]
    Neutral,
    /// Aggressive: doubles outgoing and incoming normal damage.
    Wrath,
    /// Defensive: grants energy when left.
    Calm,
    /// Ultimate: triples outgoing damage, leaves incoming untouched.
    Divinity,
}

/// Outgoing and incoming damage multipliers of a stance.
///
/// The two directions are independent: Wrath doubles both, Divinity only
/// triples outgoing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StanceMultipliers {
    pub outgoing: f64,
    pub incoming: f64,
}

impl StanceMultipliers {
    pub const NEUTRAL: Self = Self {
        outgoing: 1.0,
        incoming: 1.0,
    };
}

impl Stance {
    pub const fn multipliers(self) -> StanceMultipliers {
        match self {
            Self::Neutral | Self::Calm => StanceMultipliers::NEUTRAL,
            Self::Wrath => StanceMultipliers {
                outgoing: 2.0,
                incoming: 2.0,
            },
            Self::Divinity => StanceMultipliers {
                outgoing: 3.0,
                incoming: 1.0,
            },
        }
    }

    pub const fn outgoing_multiplier(self) -> f64 {
        self.multipliers().outgoing
    }

    pub const fn incoming_multiplier(self) -> f64 {
        self.multipliers().incoming
    }
}

/// Energy parameters for stance transitions, resolved from config and relics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StanceRules {
    pub calm_exit_energy: i32,
    pub divinity_entry_energy: i32,
}

impl Default for StanceRules {
    fn default() -> Self {
        Self {
            calm_exit_energy: 2,
            divinity_entry_energy: 3,
        }
    }
}

/// Result of a stance change request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StanceChange {
    pub from: Stance,
    pub to: Stance,
    /// Energy gained by leaving `from` and entering `to`.
    pub energy_delta: i32,
    /// `false` when `from == to`; nothing else happens in that case.
    pub is_real_change: bool,
}

impl StanceChange {
    /// Entering Divinity resets mantra.
    pub fn resets_mantra(&self) -> bool {
        self.is_real_change && self.to == Stance::Divinity
    }
}

/// Computes the side effects of moving from `from` to `to`.
pub fn change_stance(from: Stance, to: Stance, rules: StanceRules) -> StanceChange {
    if from == to {
        return StanceChange {
            from,
            to,
            energy_delta: 0,
            is_real_change: false,
        };
    }

    let mut energy_delta = 0;
    if from == Stance::Calm {
        energy_delta += rules.calm_exit_energy;
    }
    if to == Stance::Divinity {
        energy_delta += rules.divinity_entry_energy;
    }

    StanceChange {
        from,
        to,
        energy_delta,
        is_real_change: true,
    }
}
