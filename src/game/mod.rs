//! Round engine and state machine.
//!
//! A [`Round`] is an immutable snapshot. Every transition borrows the current
//! snapshot and returns the next one, so a rejected call leaves the caller's
//! value untouched.

use alloc::vec::Vec;

use crate::card::{Card, DECK_SIZE, Deck};
use crate::error::RoundError;
use crate::hand::Hand;
use crate::options::GameOptions;
use crate::result::Outcome;

mod actions;
mod deal;
mod dealer;
pub mod state;

pub use dealer::determine_outcome;
pub use state::{Action, Phase};

const PLAYER_ACTIONS: [Action; 2] = [Action::Hit, Action::Stand];

/// One round of single-hand blackjack.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Round {
    phase: Phase,
    player: Hand,
    dealer: Hand,
    wager: usize,
    deck: Deck,
    outcome: Option<Outcome>,
    options: GameOptions,
}

impl Round {
    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the player's hand.
    #[must_use]
    pub const fn player_hand(&self) -> &Hand {
        &self.player
    }

    /// Returns the dealer's hand. The hole card stays concealed until the
    /// dealer turn.
    #[must_use]
    pub const fn dealer_hand(&self) -> &Hand {
        &self.dealer
    }

    /// Returns the wager.
    #[must_use]
    pub const fn wager(&self) -> usize {
        self.wager
    }

    /// Returns the undealt cards.
    #[must_use]
    pub const fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Returns the outcome once the round is over.
    #[must_use]
    pub const fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Returns the options the round is played under.
    #[must_use]
    pub const fn options(&self) -> &GameOptions {
        &self.options
    }

    /// Returns the actions the player may take right now.
    #[must_use]
    pub fn legal_actions(&self) -> &'static [Action] {
        if self.phase == Phase::PlayerTurn {
            &PLAYER_ACTIONS
        } else {
            &[]
        }
    }

    /// Returns how many cards have left the deck this round.
    #[must_use]
    pub fn cards_dealt(&self) -> usize {
        self.player.len() + self.dealer.len()
    }

    /// Returns whether the round has reached its terminal phase.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::RoundOver
    }

    /// Checks that dealt and undealt cards still form one complete deck
    /// without duplicates.
    #[must_use]
    pub fn is_deck_consistent(&self) -> bool {
        if self.deck.len() + self.cards_dealt() != DECK_SIZE {
            return false;
        }

        let all: Vec<&Card> = self
            .player
            .cards()
            .iter()
            .chain(self.dealer.cards())
            .chain(self.deck.iter())
            .collect();

        all.iter().enumerate().all(|(index, card)| {
            all[index + 1..]
                .iter()
                .all(|other| !card.same_card(other))
        })
    }

    fn ensure_phase(&self, expected: Phase) -> Result<(), RoundError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(RoundError::IllegalPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    /// Draws the front card of the deck.
    fn draw(&mut self) -> Result<Card, RoundError> {
        self.deck.draw().ok_or(RoundError::DeckExhausted)
    }

    /// Enters the terminal phase and computes the outcome.
    fn finish(&mut self) {
        let outcome = determine_outcome(&self.player, &self.dealer, self.wager, &self.options);
        tracing::debug!(
            kind = outcome.kind().as_str(),
            payout = outcome.payout,
            reason = %outcome.reason,
            "round over"
        );
        self.outcome = Some(outcome);
        self.phase = Phase::RoundOver;
    }
}
