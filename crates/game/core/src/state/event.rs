use crate::card::PileKind;
use crate::power::PowerId;
use crate::stance::Stance;

/// A combatant, referenced by position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Creature {
    Player,
    Enemy(usize),
}

/// Entry in the append-only combat log.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "event", rename_all = "snake_case"))]
pub enum CombatEvent {
    CombatStarted {
        enemies: Vec<String>,
    },
    TurnStarted {
        turn: u32,
    },
    /// Discard pile shuffled into the draw pile.
    Shuffled {
        cards: usize,
    },
    CardDrawn {
        card: String,
    },
    CardPlayed {
        card: String,
        target: Option<usize>,
        cost: i32,
    },
    /// A card reached `to` outside of a draw.
    CardMoved {
        card: String,
        to: PileKind,
    },
    CardCreated {
        card: String,
        pile: PileKind,
    },
    Damage {
        source: Creature,
        target: Creature,
        amount: i32,
        blocked: i32,
        hp_lost: i32,
    },
    BlockGained {
        target: Creature,
        amount: i32,
    },
    EnergyGained {
        amount: i32,
        energy: i32,
    },
    StanceChanged {
        from: Stance,
        to: Stance,
    },
    MantraGained {
        amount: u32,
        total: u32,
    },
    PowerApplied {
        target: Creature,
        power: PowerId,
        amount: i32,
        total: i32,
    },
    PowerExpired {
        target: Creature,
        power: PowerId,
    },
    Scried {
        revealed: usize,
        discarded: Vec<String>,
    },
    EnemyMove {
        enemy: usize,
        move_id: String,
    },
    IntentRolled {
        enemy: usize,
        move_id: String,
    },
    CreatureDied {
        target: Creature,
    },
    TurnEnded {
        turn: u32,
    },
    CombatEnded {
        victory: bool,
        turn: u32,
    },
}
