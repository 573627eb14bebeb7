use std::collections::BTreeMap;
use std::sync::Arc;

use crate::card::CardDef;
use crate::enemy::EnemyDef;

/// Card templates by id.
pub trait CardOracle: Send + Sync + core::fmt::Debug {
    fn card(&self, id: &str) -> Option<Arc<CardDef>>;

    /// Every id this oracle can resolve, sorted.
    fn card_ids(&self) -> Vec<String>;
}

/// Enemy templates by id.
pub trait EnemyOracle: Send + Sync + core::fmt::Debug {
    fn enemy(&self, id: &str) -> Option<Arc<EnemyDef>>;

    fn enemy_ids(&self) -> Vec<String>;
}

/// In-memory card oracle.
#[derive(Clone, Debug, Default)]
pub struct CardTable {
    cards: BTreeMap<String, Arc<CardDef>>,
}

impl CardTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `def`, replacing any template with the same id.
    pub fn insert(&mut self, def: CardDef) -> &mut Self {
        self.cards.insert(def.id.clone(), Arc::new(def));
        self
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<CardDef>> {
        self.cards.values()
    }
}

impl FromIterator<CardDef> for CardTable {
    fn from_iter<I: IntoIterator<Item = CardDef>>(iter: I) -> Self {
        let mut table = Self::new();
        for def in iter {
            table.insert(def);
        }
        table
    }
}

impl CardOracle for CardTable {
    fn card(&self, id: &str) -> Option<Arc<CardDef>> {
        self.cards.get(id).cloned()
    }

    fn card_ids(&self) -> Vec<String> {
        self.cards.keys().cloned().collect()
    }
}

/// In-memory enemy oracle.
#[derive(Clone, Debug, Default)]
pub struct EnemyTable {
    enemies: BTreeMap<String, Arc<EnemyDef>>,
}

impl EnemyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, def: EnemyDef) -> &mut Self {
        self.enemies.insert(def.id.clone(), Arc::new(def));
        self
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<EnemyDef>> {
        self.enemies.values()
    }
}

impl FromIterator<EnemyDef> for EnemyTable {
    fn from_iter<I: IntoIterator<Item = EnemyDef>>(iter: I) -> Self {
        let mut table = Self::new();
        for def in iter {
            table.insert(def);
        }
        table
    }
}

impl EnemyOracle for EnemyTable {
    fn enemy(&self, id: &str) -> Option<Arc<EnemyDef>> {
        self.enemies.get(id).cloned()
    }

    fn enemy_ids(&self) -> Vec<String> {
        self.enemies.keys().cloned().collect()
    }
}
