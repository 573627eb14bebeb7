/// What happens to mantra gained past the Divinity threshold in a single gain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MantraOverflow {
    /// Crossing the threshold resets mantra to 0.
    #[default]
    Discard,
    /// Crossing the threshold keeps `total - threshold` (still one transition).
    Carry,
}

/// When an enemy's block falls off.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EnemyBlockDecay {
    /// At the start of the enemy's own turn, before its move resolves.
    #[default]
    TurnStart,
    /// In the end-of-round phase, after every enemy has acted.
    EndOfRound,
}

/// Combat rules and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Cards drawn at the start of each player turn.
    pub draw_per_turn: u32,
    /// Mantra needed to enter Divinity.
    pub mantra_threshold: u32,
    /// Energy granted when leaving Calm (before relic bonuses).
    pub calm_exit_energy: i32,
    /// Energy granted when entering Divinity.
    pub divinity_entry_energy: i32,
    /// Turn cap for automated full-combat runs.
    pub turn_cap: u32,
    pub mantra_overflow: MantraOverflow,
    pub enemy_block_decay: EnemyBlockDecay,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_HAND_SIZE: usize = 10;
    pub const MAX_ENEMIES: usize = 5;
    pub const MAX_SCRY: usize = 10;
    /// Actions within one player turn before an automated run gives up.
    pub const MAX_ACTIONS_PER_TURN: u32 = 256;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_DRAW_PER_TURN: u32 = 5;
    pub const DEFAULT_MANTRA_THRESHOLD: u32 = 10;
    pub const DEFAULT_CALM_EXIT_ENERGY: i32 = 2;
    pub const DEFAULT_DIVINITY_ENTRY_ENERGY: i32 = 3;
    pub const DEFAULT_TURN_CAP: u32 = 100;

    pub fn new() -> Self {
        Self {
            draw_per_turn: Self::DEFAULT_DRAW_PER_TURN,
            mantra_threshold: Self::DEFAULT_MANTRA_THRESHOLD,
            calm_exit_energy: Self::DEFAULT_CALM_EXIT_ENERGY,
            divinity_entry_energy: Self::DEFAULT_DIVINITY_ENTRY_ENERGY,
            turn_cap: Self::DEFAULT_TURN_CAP,
            mantra_overflow: MantraOverflow::default(),
            enemy_block_decay: EnemyBlockDecay::default(),
        }
    }

    pub fn with_turn_cap(mut self, turn_cap: u32) -> Self {
        self.turn_cap = turn_cap;
        self
    }

    pub fn with_mantra_overflow(mut self, policy: MantraOverflow) -> Self {
        self.mantra_overflow = policy;
        self
    }

    pub fn with_enemy_block_decay(mut self, policy: EnemyBlockDecay) -> Self {
        self.enemy_block_decay = policy;
        self
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
