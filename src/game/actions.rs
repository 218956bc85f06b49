use crate::error::RoundError;

use super::{Action, Phase, Round};

impl Round {
    /// Player action: Hit (draw a card).
    ///
    /// A bust ends the round immediately; the dealer does not play.
    ///
    /// # Errors
    ///
    /// Returns an error if the round is not in the player turn or the deck is
    /// empty.
    pub fn apply_hit(&self) -> Result<Self, RoundError> {
        self.ensure_phase(Phase::PlayerTurn)?;

        let mut next = self.clone();
        let card = next.draw()?;
        next.player.add_card(card);

        tracing::debug!(card = %card, player = next.player.value(), "player hit");

        if next.player.is_busted() {
            next.finish();
        }

        Ok(next)
    }

    /// Player action: Stand (keep current hand).
    ///
    /// # Errors
    ///
    /// Returns an error if the round is not in the player turn.
    pub fn apply_stand(&self) -> Result<Self, RoundError> {
        self.ensure_phase(Phase::PlayerTurn)?;

        let mut next = self.clone();
        next.phase = Phase::DealerTurn;

        tracing::debug!(player = next.player.value(), "player stands");

        Ok(next)
    }

    /// Applies a player action.
    ///
    /// # Errors
    ///
    /// Same as [`Round::apply_hit`] and [`Round::apply_stand`].
    pub fn apply(&self, action: Action) -> Result<Self, RoundError> {
        match action {
            Action::Hit => self.apply_hit(),
            Action::Stand => self.apply_stand(),
        }
    }
}
