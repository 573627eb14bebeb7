//! The four independent streams a combat consumes.

use super::GameRng;

/// Logical stream identifiers, used for diagnostics and parity reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StreamKind {
    /// Draw pile shuffles.
    Shuffle,
    /// Card effects (random insert positions, random targets).
    Card,
    /// Enemy intent rolls.
    Ai,
    /// Enemy HP rolls at setup.
    MonsterHp,
}

/// Per-stream seeds supplied by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreamSeeds {
    pub shuffle: i64,
    pub card: i64,
    pub ai: i64,
    pub monster_hp: i64,
}

impl StreamSeeds {
    /// Every stream seeded with the same value.
    pub const fn uniform(seed: i64) -> Self {
        Self {
            shuffle: seed,
            card: seed,
            ai: seed,
            monster_hp: seed,
        }
    }

    /// Seeds the reference game uses when entering a floor: `seed + floor`
    /// for every combat stream.
    pub const fn for_floor(run_seed: i64, floor: i32) -> Self {
        Self::uniform(run_seed.wrapping_add(floor as i64))
    }
}

/// Owned, independent combat streams.
///
/// Each field is a distinct [`GameRng`]; no stream can observe draws made on
/// another, and cloning the struct forks all four at once.
#[derive(Clone, Debug, PartialEq)]
pub struct RngStreams {
    pub shuffle: GameRng,
    pub card: GameRng,
    pub ai: GameRng,
    pub monster_hp: GameRng,
}

impl RngStreams {
    pub fn new(seeds: StreamSeeds) -> Self {
        Self {
            shuffle: GameRng::new(seeds.shuffle),
            card: GameRng::new(seeds.card),
            ai: GameRng::new(seeds.ai),
            monster_hp: GameRng::new(seeds.monster_hp),
        }
    }

    pub fn stream(&self, kind: StreamKind) -> &GameRng {
        match kind {
            StreamKind::Shuffle => &self.shuffle,
            StreamKind::Card => &self.card,
            StreamKind::Ai => &self.ai,
            StreamKind::MonsterHp => &self.monster_hp,
        }
    }

    pub fn stream_mut(&mut self, kind: StreamKind) -> &mut GameRng {
        match kind {
            StreamKind::Shuffle => &mut self.shuffle,
            StreamKind::Card => &mut self.card,
            StreamKind::Ai => &mut self.ai,
            StreamKind::MonsterHp => &mut self.monster_hp,
        }
    }

    /// Call counters in [`StreamKind`] order.
    pub fn counters(&self) -> [u64; 4] {
        [
            self.shuffle.counter(),
            self.card.counter(),
            self.ai.counter(),
            self.monster_hp.counter(),
        ]
    }
}
