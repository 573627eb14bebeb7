use arrayvec::ArrayVec;

use crate::config::CombatConfig;

use super::CardInstance;

/// Destination for a moved or created card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum PileKind {
    /// Top of the draw pile.
    Draw,
    /// Random position in the draw pile (card-effect stream).
    DrawRandom,
    Hand,
    Discard,
    Exhaust,
}

pub type Hand = ArrayVec<CardInstance, { CombatConfig::MAX_HAND_SIZE }>;

/// The player's four piles, plus the card currently being resolved.
///
/// The top of the draw pile is the end of `draw`. Every card introduced into
/// combat lives in exactly one of these places.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Piles {
    pub draw: Vec<CardInstance>,
    pub hand: Hand,
    pub discard: Vec<CardInstance>,
    pub exhaust: Vec<CardInstance>,
    /// Card between being paid for and reaching its destination.
    pub limbo: Option<CardInstance>,
}

impl Piles {
    pub fn new(draw: Vec<CardInstance>) -> Self {
        Self {
            draw,
            ..Self::default()
        }
    }

    /// Cards across all piles and limbo.
    pub fn total(&self) -> usize {
        self.draw.len()
            + self.hand.len()
            + self.discard.len()
            + self.exhaust.len()
            + usize::from(self.limbo.is_some())
    }

    pub fn hand_is_full(&self) -> bool {
        self.hand.is_full()
    }

    pub fn top_of_draw(&self, count: usize) -> impl Iterator<Item = &CardInstance> {
        self.draw.iter().rev().take(count)
    }

    /// Adds to hand, spilling into discard when the hand is full. Returns the
    /// pile the card landed in.
    pub fn push_to_hand(&mut self, card: CardInstance) -> PileKind {
        match self.hand.try_push(card) {
            Ok(()) => PileKind::Hand,
            Err(overflow) => {
                self.discard.push(overflow.element());
                PileKind::Discard
            }
        }
    }

    /// Moves every card matching `predicate` to the top of the draw pile,
    /// keeping their relative order.
    pub fn lift_to_top(&mut self, mut predicate: impl FnMut(&CardInstance) -> bool) {
        let (lifted, rest): (Vec<_>, Vec<_>) = self.draw.drain(..).partition(|c| predicate(c));
        self.draw = rest;
        self.draw.extend(lifted);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::card::{CardDef, CardType};

    fn card(id: &str, uuid: u32) -> CardInstance {
        CardInstance::new(Arc::new(CardDef::new(id, CardType::Skill, 1)), false, uuid)
    }

    #[test]
    fn full_hand_overflows_to_discard() {
        let mut piles = Piles::default();
        for uuid in 0..10 {
            assert_eq!(piles.push_to_hand(card("Defend_P", uuid)), PileKind::Hand);
        }
        assert_eq!(piles.push_to_hand(card("Defend_P", 10)), PileKind::Discard);
        assert_eq!(piles.hand.len(), 10);
        assert_eq!(piles.discard.len(), 1);
        assert_eq!(piles.total(), 11);
    }

    #[test]
    fn lifted_cards_end_on_top_in_order() {
        let mut piles = Piles::new(vec![card("A", 0), card("I", 1), card("B", 2), card("J", 3)]);
        piles.lift_to_top(|c| c.id().len() == 1 && "IJ".contains(c.id()));
        let order: Vec<_> = piles.draw.iter().map(|c| c.id().to_string()).collect();
        assert_eq!(order, vec!["A", "B", "I", "J"]);
        let top: Vec<_> = piles.top_of_draw(2).map(|c| c.uuid).collect();
        assert_eq!(top, vec![3, 1]);
    }
}
