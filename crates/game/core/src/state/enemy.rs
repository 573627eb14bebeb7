use std::sync::Arc;

use crate::enemy::{EnemyDef, MoveDef};
use crate::power::Powers;

/// One enemy in combat.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemyState {
    pub def: Arc<EnemyDef>,
    pub hp: i32,
    pub max_hp: i32,
    pub block: i32,
    pub powers: Powers,
    /// Index into `def.moves` of the rolled intent.
    pub next_move: usize,
    /// Moves picked so far, oldest first (including the current intent).
    pub history: Vec<usize>,
}

impl EnemyState {
    pub fn new(def: Arc<EnemyDef>, hp: i32) -> Self {
        Self {
            def,
            hp,
            max_hp: hp,
            block: 0,
            powers: Powers::new(),
            next_move: 0,
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.def.id
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// The move the enemy will perform on its next turn.
    pub fn intent(&self) -> Option<&MoveDef> {
        self.def.move_def(self.next_move)
    }

    pub fn intends_attack(&self) -> bool {
        self.intent().is_some_and(MoveDef::is_attack)
    }

    pub(crate) fn set_intent(&mut self, index: usize) {
        self.next_move = index;
        self.history.push(index);
    }
}
