use crate::error::SimError;
use crate::rng::GameRng;

use super::EnemyDef;

/// Coin flipped when a move hits its repeat limit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fallback {
    /// Probability of `primary`, drawn with `random_bool_chance`.
    pub chance: f32,
    pub primary: String,
    pub secondary: String,
}

/// One bucket of a weighted table: taken when the roll is below `below`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightedMove {
    #[cfg_attr(feature = "serde", serde(rename = "move"))]
    pub move_id: String,
    pub below: i32,
    /// The move may not be picked more than this many times in a row.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_consecutive: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub fallback: Option<Fallback>,
}

/// Intent selection rule.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AiPattern {
    /// Roll `random(99)` against cumulative thresholds.
    Weighted {
        /// Fixed opening move (the roll is still consumed).
        #[cfg_attr(feature = "serde", serde(default))]
        first: Option<String>,
        table: Vec<WeightedMove>,
    },
    /// Repeat a fixed sequence; still consumes one roll per turn.
    Cycle { moves: Vec<String> },
}

impl AiPattern {
    pub fn referenced_moves(&self) -> Vec<&str> {
        match self {
            Self::Weighted { first, table } => first
                .iter()
                .map(String::as_str)
                .chain(table.iter().flat_map(|entry| {
                    let mut ids = vec![entry.move_id.as_str()];
                    if let Some(fallback) = &entry.fallback {
                        ids.push(fallback.primary.as_str());
                        ids.push(fallback.secondary.as_str());
                    }
                    ids
                }))
                .collect(),
            Self::Cycle { moves } => moves.iter().map(String::as_str).collect(),
        }
    }

    pub(super) fn roll(
        &self,
        def: &EnemyDef,
        history: &[usize],
        rng: &mut GameRng,
    ) -> Result<usize, SimError> {
        let roll = rng.random(99);

        match self {
            Self::Weighted { first, table } => {
                if history.is_empty()
                    && let Some(first) = first
                {
                    return def.move_index(first);
                }

                let Some(entry) = table
                    .iter()
                    .find(|entry| roll < entry.below)
                    .or_else(|| table.last())
                else {
                    return Ok(0);
                };
                let picked = def.move_index(&entry.move_id)?;

                let limit_hit = entry
                    .max_consecutive
                    .is_some_and(|max| trailing_repeats(history, picked) >= max);
                match (&entry.fallback, limit_hit) {
                    (Some(fallback), true) => {
                        let id = if rng.random_bool_chance(fallback.chance) {
                            &fallback.primary
                        } else {
                            &fallback.secondary
                        };
                        def.move_index(id)
                    }
                    _ => Ok(picked),
                }
            }
            Self::Cycle { moves } => {
                if moves.is_empty() {
                    return Ok(0);
                }
                def.move_index(&moves[history.len() % moves.len()])
            }
        }
    }
}

fn trailing_repeats(history: &[usize], index: usize) -> u32 {
    let count = history.iter().rev().take_while(|&&m| m == index).count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemy::{HpRange, IntentKind, MoveDef, MoveEffect};
    use crate::power::PowerId;

    fn jaw_worm() -> EnemyDef {
        let fallback = |chance: f32, primary: &str, secondary: &str| Fallback {
            chance,
            primary: primary.into(),
            secondary: secondary.into(),
        };
        EnemyDef {
            id: "JawWorm".into(),
            name: "Jaw Worm".into(),
            hp: HpRange { min: 40, max: 44 },
            moves: vec![
                MoveDef::attack("Chomp", 11, 1),
                MoveDef::attack("Thrash", 7, 1)
                    .with_intent(IntentKind::AttackDefend)
                    .with_block(5),
                MoveDef::attack("Bellow", 0, 0)
                    .with_intent(IntentKind::Buff)
                    .with_block(6)
                    .with_effect(MoveEffect::SelfPower {
                        power: PowerId::Strength,
                        amount: 3,
                    }),
            ],
            ai: AiPattern::Weighted {
                first: Some("Chomp".into()),
                table: vec![
                    WeightedMove {
                        move_id: "Chomp".into(),
                        below: 25,
                        max_consecutive: Some(1),
                        fallback: Some(fallback(0.5625, "Bellow", "Thrash")),
                    },
                    WeightedMove {
                        move_id: "Thrash".into(),
                        below: 55,
                        max_consecutive: Some(2),
                        fallback: Some(fallback(0.357, "Chomp", "Bellow")),
                    },
                    WeightedMove {
                        move_id: "Bellow".into(),
                        below: 100,
                        max_consecutive: Some(1),
                        fallback: Some(fallback(0.416, "Chomp", "Thrash")),
                    },
                ],
            },
        }
    }

    #[test]
    fn first_move_is_fixed_but_still_rolls() {
        let def = jaw_worm();
        let mut rng = GameRng::new(5);
        assert_eq!(def.roll_move(&[], &mut rng), Ok(0));
        assert_eq!(rng.counter(), 1);
    }

    #[test]
    fn repeat_limit_never_exceeded() {
        let def = jaw_worm();
        let mut rng = GameRng::new(123);
        let mut history = Vec::new();
        for _ in 0..200 {
            let next = def.roll_move(&history, &mut rng).unwrap();
            history.push(next);
        }
        for window in history.windows(2) {
            assert!(!(window[0] == 0 && window[1] == 0), "Chomp twice");
            assert!(!(window[0] == 2 && window[1] == 2), "Bellow twice");
        }
        for window in history.windows(3) {
            assert!(window.iter().any(|&m| m != 1), "Thrash three times");
        }
    }

    #[test]
    fn rolls_are_reproducible() {
        let def = jaw_worm();
        let run = |seed| {
            let mut rng = GameRng::new(seed);
            let mut history = Vec::new();
            for _ in 0..20 {
                let next = def.roll_move(&history, &mut rng).unwrap();
                history.push(next);
            }
            (history, rng.counter())
        };
        assert_eq!(run(99), run(99));
    }

    #[test]
    fn cycle_consumes_one_roll_per_turn() {
        let def = EnemyDef {
            id: "Sentry".into(),
            name: "Sentry".into(),
            hp: HpRange { min: 38, max: 42 },
            moves: vec![MoveDef::attack("Beam", 9, 1), MoveDef::attack("Bolt", 0, 0)],
            ai: AiPattern::Cycle {
                moves: vec!["Bolt".into(), "Beam".into()],
            },
        };
        let mut rng = GameRng::new(1);
        let mut history = Vec::new();
        for _ in 0..4 {
            let next = def.roll_move(&history, &mut rng).unwrap();
            history.push(next);
        }
        assert_eq!(history, vec![1, 0, 1, 0]);
        assert_eq!(rng.counter(), 4);
    }
}
