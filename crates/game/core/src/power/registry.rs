use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{IdentifierKind, SimError};

use super::behavior::PowerBehavior;
use super::builtin;
use super::{Power, PowerId, Powers};

/// Lookup table from [`PowerId`] to its hook implementation.
///
/// Read-only after construction; forks of a combat share it by reference.
#[derive(Clone, Debug, Default)]
pub struct PowerRegistry {
    behaviors: HashMap<PowerId, Arc<dyn PowerBehavior>>,
}

impl PowerRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with every built-in behaviour.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry
            .register(Arc::new(builtin::Strength))
            .register(Arc::new(builtin::Dexterity))
            .register(Arc::new(builtin::Weak))
            .register(Arc::new(builtin::Vulnerable))
            .register(Arc::new(builtin::Frail))
            .register(Arc::new(builtin::Intangible))
            .register(Arc::new(builtin::Thorns))
            .register(Arc::new(builtin::Metallicize))
            .register(Arc::new(builtin::Ritual))
            .register(Arc::new(builtin::MentalFortress))
            .register(Arc::new(builtin::Rushdown))
            .register(Arc::new(builtin::LikeWater))
            .register(Arc::new(builtin::Devotion))
            .register(Arc::new(builtin::Foresight))
            .register(Arc::new(builtin::DevaForm))
            .register(Arc::new(builtin::Nirvana))
            .register(Arc::new(builtin::Blur))
            .register(Arc::new(builtin::Barricade))
            .register(Arc::new(builtin::NoDraw));
        registry
    }

    /// Registers (or replaces) the behaviour for `behavior.id()`.
    pub fn register(&mut self, behavior: Arc<dyn PowerBehavior>) -> &mut Self {
        self.behaviors.insert(behavior.id(), behavior);
        self
    }

    pub fn get(&self, id: PowerId) -> Option<&Arc<dyn PowerBehavior>> {
        self.behaviors.get(&id)
    }

    /// Like [`get`](Self::get) but reports a missing entry as
    /// [`SimError::UnknownIdentifier`].
    pub fn require(&self, id: PowerId) -> Result<&Arc<dyn PowerBehavior>, SimError> {
        self.get(id)
            .ok_or_else(|| SimError::unknown(IdentifierKind::Power, id.as_str()))
    }

    /// Resolves a power name from content data.
    pub fn resolve(&self, name: &str) -> Result<PowerId, SimError> {
        let id: PowerId = name
            .parse()
            .map_err(|_| SimError::unknown(IdentifierKind::Power, name))?;
        self.require(id)?;
        Ok(id)
    }

    /// Powers with their behaviours, sorted by hook priority then insertion
    /// order. Unregistered entries cannot exist on a creature (application
    /// goes through [`require`](Self::require)), so they are skipped.
    pub fn ordered<'a>(
        &'a self,
        powers: &'a Powers,
    ) -> Vec<(&'a Power, &'a dyn PowerBehavior)> {
        let mut ordered: Vec<_> = powers
            .iter()
            .filter_map(|power| {
                self.get(power.id)
                    .map(|behavior| (power, behavior.as_ref()))
            })
            .collect();
        ordered.sort_by_key(|(_, behavior)| behavior.priority());
        ordered
    }

    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }
}
