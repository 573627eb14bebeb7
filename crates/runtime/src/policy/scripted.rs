use spire_core::{Action, CardType, Combat, Policy};

/// Plays every playable attack, keeps all scried cards, then ends the turn.
#[derive(Clone, Copy, Debug, Default)]
pub struct AttackFirstPolicy;

impl Policy for AttackFirstPolicy {
    fn choose(&mut self, combat: &Combat, legal: &[Action]) -> Action {
        let hand = &combat.player.piles.hand;
        legal
            .iter()
            .find(|action| match action {
                Action::PlayCard { hand_index, .. } => hand
                    .get(*hand_index)
                    .is_some_and(|card| card.card_type() == CardType::Attack),
                Action::Scry { discard } => discard.is_empty(),
                Action::EndTurn => false,
            })
            .cloned()
            .unwrap_or(Action::EndTurn)
    }
}

/// Always takes the first legal action: the leftmost playable card at the
/// first living enemy, or the empty scry selection.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstLegalPolicy;

impl Policy for FirstLegalPolicy {
    fn choose(&mut self, _combat: &Combat, legal: &[Action]) -> Action {
        legal.first().cloned().unwrap_or(Action::EndTurn)
    }
}
