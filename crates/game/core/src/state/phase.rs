use crate::card::CardEffect;

/// Where the combat is in its round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Phase {
    #[default]
    PlayerTurn,
    MonsterTurn,
    EndOfRound,
    Ended { victory: bool },
}

impl Phase {
    pub const fn is_ended(self) -> bool {
        matches!(self, Self::Ended { .. })
    }
}

/// Remaining effects of a card whose resolution stopped for a choice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resume {
    pub target: Option<usize>,
    /// Already in resolution order.
    pub effects: Vec<CardEffect>,
}

/// Choice the caller must make before the combat can continue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PendingChoice {
    /// The top `revealed` cards of the draw pile are shown; the caller picks
    /// which to discard.
    Scry {
        revealed: usize,
        /// Card resolution to continue afterwards; `None` for turn-start scry.
        resume: Option<Resume>,
    },
}

impl PendingChoice {
    pub fn revealed(&self) -> usize {
        match self {
            Self::Scry { revealed, .. } => *revealed,
        }
    }
}
