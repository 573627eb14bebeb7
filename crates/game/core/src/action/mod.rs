//! Player actions and their legality rules.
//!
//! - `error`: [`IllegalAction`] taxonomy
//! - `available`: legality checks and legal-action enumeration

mod available;
pub mod error;

pub use available::{can_play, check_play, check_target, legal_actions};
pub use error::IllegalAction;

/// A request from the caller to advance the combat.
///
/// Serialized with stable snake_case names so a cross-process adapter can
/// exchange it as an action descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Action {
    /// Play the card at `hand_index`, aimed at the enemy at `target`.
    PlayCard {
        hand_index: usize,
        target: Option<usize>,
    },
    /// End the player turn; the monster turn and end of round resolve before
    /// control returns.
    EndTurn,
    /// Resolve a pending scry by discarding the revealed cards at these
    /// indices (0 is the top of the draw pile).
    Scry { discard: Vec<usize> },
}

impl Action {
    pub const fn play(hand_index: usize, target: Option<usize>) -> Self {
        Self::PlayCard { hand_index, target }
    }

    pub const fn is_end_turn(&self) -> bool {
        matches!(self, Self::EndTurn)
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::PlayCard {
                hand_index,
                target: Some(target),
            } => write!(f, "play #{hand_index} -> enemy {target}"),
            Self::PlayCard {
                hand_index,
                target: None,
            } => write!(f, "play #{hand_index}"),
            Self::EndTurn => f.write_str("end turn"),
            Self::Scry { discard } => write!(f, "scry discard {discard:?}"),
        }
    }
}
