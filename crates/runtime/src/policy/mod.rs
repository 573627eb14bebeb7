//! Action policies for automated combats.
//!
//! Every policy implements [`spire_core::Policy`]. Policies that need
//! randomness own their own [`spire_core::GameRng`]; none of them ever
//! draws from a combat's canonical streams.

mod random;
mod scripted;
mod search;

pub use random::RandomPolicy;
pub use scripted::{AttackFirstPolicy, FirstLegalPolicy};
pub use search::{GreedySearchPolicy, SearchStats, score};

use clap::ValueEnum;

/// Policy names accepted on the command line and in scenario runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    AttackFirst,
    FirstLegal,
    Random,
    Greedy,
}
