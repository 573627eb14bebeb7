use spire_core::{Action, Combat, GameRng, Policy};

/// Uniformly random legal action from a private stream.
#[derive(Clone, Debug)]
pub struct RandomPolicy {
    rng: GameRng,
}

impl RandomPolicy {
    pub fn new(seed: i64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }

    pub fn rng(&self) -> &GameRng {
        &self.rng
    }
}

impl Policy for RandomPolicy {
    fn choose(&mut self, _combat: &Combat, legal: &[Action]) -> Action {
        let Some(last) = legal.len().checked_sub(1) else {
            return Action::EndTurn;
        };
        let pick = self.rng.random(i32::try_from(last).unwrap_or(i32::MAX));
        let index = usize::try_from(pick).unwrap_or(0).min(last);
        legal[index].clone()
    }
}

#[cfg(test)]
mod tests {
    use spire_content::ContentRegistry;
    use spire_core::{CombatSetup, StreamKind, StreamSeeds};

    use super::*;

    #[test]
    fn draws_only_from_its_own_stream() {
        let registry = ContentRegistry::builtin().unwrap();
        let engine = registry.engine();
        let combat = engine
            .setup(&CombatSetup::new(
                vec!["Strike_P".into(); 8],
                vec!["Cultist".into()],
                StreamSeeds::uniform(9),
            ))
            .unwrap();
        let before = combat.rng.counters();

        let mut policy = RandomPolicy::new(1);
        let legal = engine.legal_actions(&combat);
        for _ in 0..5 {
            let action = policy.choose(&combat, &legal);
            assert!(legal.contains(&action));
        }
        assert_eq!(policy.rng().counter(), 5);
        assert_eq!(combat.rng.counters(), before);
        assert_eq!(combat.rng.stream(StreamKind::Card).counter(), 0);
    }
}
