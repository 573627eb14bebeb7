//! Damage, block and hit resolution.
//!
//! This module provides pure functions for the numeric pipeline. Nothing here
//! touches combat state; the engine gathers modifiers, calls these, and applies
//! the results.
//!
//! # Core Functions
//!
//! - `calculate_damage`: outgoing damage from the player (stance outgoing multiplier)
//! - `calculate_incoming_damage`: damage aimed at the player (stance incoming multiplier)
//! - `calculate_block`: block gained from a card
//! - `apply_hit`: block absorption and HP loss

pub mod damage;
pub mod result;

pub use damage::{
    DamageClass, Modifiers, calculate_block, calculate_damage, calculate_incoming_damage,
    calculate_monster_damage,
};
pub use result::{HitResult, apply_hit};
