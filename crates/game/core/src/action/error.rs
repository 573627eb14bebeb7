//! Action legality errors.
//!
//! Every rejected request is reported with one of these variants; the engine
//! never converts an illegal request into a skipped action.

use crate::error::{ErrorSeverity, GameError};
use crate::state::Phase;

/// Reasons an [`Action`](super::Action) cannot be applied to a combat.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IllegalAction {
    /// Hand index does not name a card in hand.
    #[error("hand index {index} out of range (hand size {hand_size})")]
    InvalidHandIndex { index: usize, hand_size: usize },

    /// Card costs more energy than the player has.
    #[error("card costs {cost} energy but only {energy} available")]
    InsufficientEnergy { cost: i32, energy: i32 },

    /// Card can never be played (status cards, curses).
    #[error("card '{card}' is unplayable")]
    Unplayable { card: String },

    /// Card-specific hand-composition requirement failed.
    #[error("card '{card}' cannot be played: {reason}")]
    ConditionNotMet { card: String, reason: String },

    /// Target missing, out of range, or already dead.
    #[error("invalid target {target:?}")]
    InvalidTarget { target: Option<usize> },

    /// Action requested in a phase that does not accept it.
    #[error("action not allowed during {phase:?}")]
    WrongPhase { phase: Phase },

    /// A choice (scry) must be resolved before anything else.
    #[error("a pending choice must be resolved first")]
    ChoicePending,

    /// Scry selection sent while no choice is pending.
    #[error("no choice is pending")]
    NoChoicePending,

    /// Scry selection names a card that was not revealed, or names one twice.
    #[error("scry selection index {index} invalid ({revealed} cards revealed)")]
    InvalidScrySelection { index: usize, revealed: usize },
}

impl GameError for IllegalAction {
    fn severity(&self) -> ErrorSeverity {
        use IllegalAction::*;
        match self {
            InsufficientEnergy { .. } | Unplayable { .. } | ConditionNotMet { .. } => {
                ErrorSeverity::Recoverable
            }
            ChoicePending => ErrorSeverity::Recoverable,
            InvalidHandIndex { .. } | InvalidTarget { .. } | InvalidScrySelection { .. } => {
                ErrorSeverity::Validation
            }
            WrongPhase { .. } | NoChoicePending => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use IllegalAction::*;
        match self {
            InvalidHandIndex { .. } => "ACTION_INVALID_HAND_INDEX",
            InsufficientEnergy { .. } => "ACTION_INSUFFICIENT_ENERGY",
            Unplayable { .. } => "ACTION_UNPLAYABLE",
            ConditionNotMet { .. } => "ACTION_CONDITION_NOT_MET",
            InvalidTarget { .. } => "ACTION_INVALID_TARGET",
            WrongPhase { .. } => "ACTION_WRONG_PHASE",
            ChoicePending => "ACTION_CHOICE_PENDING",
            NoChoicePending => "ACTION_NO_CHOICE_PENDING",
            InvalidScrySelection { .. } => "ACTION_INVALID_SCRY_SELECTION",
        }
    }
}
