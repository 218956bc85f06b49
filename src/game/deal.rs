use rand::Rng;

use crate::card::{Deck, build_deck};
use crate::error::{RoundError, WagerError};
use crate::hand::Hand;
use crate::options::GameOptions;

use super::dealer::payout_fits;
use super::{Phase, Round};

impl Round {
    /// Starts a round with a freshly shuffled deck.
    ///
    /// # Errors
    ///
    /// Returns [`WagerError::Zero`] if the wager is zero and
    /// [`WagerError::PayoutOverflow`] if its payouts would not fit in
    /// `usize`. Table limits and balance checks belong to the caller.
    pub fn initialize<R>(options: GameOptions, wager: usize, rng: &mut R) -> Result<Self, WagerError>
    where
        R: Rng + ?Sized,
    {
        Self::with_deck(options, wager, build_deck(rng))
    }

    /// Starts a round that deals from `deck` in order.
    ///
    /// # Errors
    ///
    /// Same as [`Round::initialize`].
    pub fn with_deck(options: GameOptions, wager: usize, deck: Deck) -> Result<Self, WagerError> {
        if wager == 0 {
            return Err(WagerError::Zero);
        }
        if !payout_fits(wager, &options) {
            return Err(WagerError::PayoutOverflow);
        }

        Ok(Self {
            phase: Phase::Dealing,
            player: Hand::new(),
            dealer: Hand::new(),
            wager,
            deck,
            outcome: None,
            options,
        })
    }

    /// Deals two cards to the player and two to the dealer, in the order
    /// player, player, dealer up card, dealer hole card.
    ///
    /// A player natural skips the player turn and goes straight to the
    /// dealer turn.
    ///
    /// # Errors
    ///
    /// Returns an error if the round is not in the dealing phase or the deck
    /// runs out.
    pub fn deal_initial_cards(&self) -> Result<Self, RoundError> {
        self.ensure_phase(Phase::Dealing)?;

        let mut next = self.clone();
        for _ in 0..2 {
            let card = next.draw()?;
            next.player.add_card(card);
        }

        let up_card = next.draw()?;
        next.dealer.add_card(up_card);
        let hole_card = next.draw()?;
        next.dealer.add_card(hole_card.concealed());

        next.phase = if next.player.is_blackjack() {
            Phase::DealerTurn
        } else {
            Phase::PlayerTurn
        };

        tracing::debug!(
            player = next.player.value(),
            dealer_up = next.dealer.value(),
            phase = %next.phase,
            "initial cards dealt"
        );

        Ok(next)
    }
}
