use crate::card::{CardType, Piles};
use crate::power::Powers;
use crate::relic::Relic;
use crate::stance::{Mantra, Stance};

/// Counters reset at every player turn start.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnCounters {
    pub cards_played: u32,
    pub attacks_played: u32,
    pub last_card_type: Option<CardType>,
}

/// Player side of a combat.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerState {
    pub hp: i32,
    pub max_hp: i32,
    pub energy: i32,
    pub max_energy: i32,
    pub block: i32,
    pub piles: Piles,
    pub stance: Stance,
    pub mantra: Mantra,
    pub powers: Powers,
    pub relics: Vec<Relic>,
    pub counters: TurnCounters,
}

impl PlayerState {
    pub fn new(hp: i32, max_hp: i32, max_energy: i32, piles: Piles) -> Self {
        Self {
            hp: hp.clamp(0, max_hp.max(0)),
            max_hp,
            energy: 0,
            max_energy,
            block: 0,
            piles,
            stance: Stance::Neutral,
            mantra: Mantra::new(),
            powers: Powers::new(),
            relics: Vec::new(),
            counters: TurnCounters::default(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn has_relic(&self, relic: Relic) -> bool {
        self.relics.contains(&relic)
    }

    /// Calm exit energy after relic bonuses.
    pub fn calm_exit_energy(&self, base: i32) -> i32 {
        base + self.relics.iter().map(|r| r.calm_exit_bonus()).sum::<i32>()
    }
}
