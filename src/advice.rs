//! Play recommendations.
//!
//! An [`Advisor`] is any source of hit/stand suggestions, typically a remote
//! service. [`FallbackAdvisor`] wraps one and answers with [`basic_strategy`]
//! whenever it fails, so callers always get a recommendation. Advice never
//! touches the round it was computed from.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::card::Card;
use crate::error::AdvisoryError;
use crate::game::{Action, Round};

/// Up card value assumed when the dealer shows nothing.
const UNKNOWN_UPCARD_VALUE: u8 = 10;

/// A hit/stand recommendation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Advice {
    /// Recommended action.
    pub action: Action,
    /// Confidence in `[0, 1]`.
    pub confidence: f32,
    /// Short explanation.
    pub reasoning: String,
}

impl Advice {
    /// Validates an untyped recommendation received from an external service.
    ///
    /// The action must be `"hit"` or `"stand"` (case-insensitive) and the
    /// reasoning must not be blank. Confidence is clamped into `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisoryError::Malformed`] if the response is unusable.
    pub fn from_raw(action: &str, reasoning: &str, confidence: f32) -> Result<Self, AdvisoryError> {
        let action = match action.trim() {
            a if a.eq_ignore_ascii_case("hit") => Action::Hit,
            a if a.eq_ignore_ascii_case("stand") => Action::Stand,
            _ => return Err(AdvisoryError::Malformed),
        };

        let reasoning = reasoning.trim();
        if reasoning.is_empty() || confidence.is_nan() {
            return Err(AdvisoryError::Malformed);
        }

        Ok(Self {
            action,
            confidence: confidence.clamp(0.0, 1.0),
            reasoning: reasoning.to_string(),
        })
    }
}

/// What an advisor gets to see: the player's cards and the dealer's visible
/// cards only.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdviceRequest {
    /// Player cards.
    pub player_cards: Vec<Card>,
    /// Player total.
    pub player_value: u8,
    /// Whether the player total is soft.
    pub player_soft: bool,
    /// Dealer's face-up card, if any.
    pub dealer_upcard: Option<Card>,
    /// Number of dealer cards still face down.
    pub dealer_hidden: usize,
}

impl AdviceRequest {
    /// Builds the request from a round snapshot.
    #[must_use]
    pub fn from_round(round: &Round) -> Self {
        let player = round.player_hand();
        let dealer = round.dealer_hand();
        Self {
            player_cards: player.cards().to_vec(),
            player_value: player.value(),
            player_soft: player.is_soft(),
            dealer_upcard: dealer.up_card().copied(),
            dealer_hidden: dealer.concealed_count(),
        }
    }

    /// Dealer up card value, 10 when the dealer shows nothing.
    #[must_use]
    pub fn dealer_upcard_value(&self) -> u8 {
        self.dealer_upcard
            .map_or(UNKNOWN_UPCARD_VALUE, |card| card.value())
    }
}

/// Basic-strategy hit/stand recommendation.
///
/// `dealer_upcard_value` uses the stored card value, so an ace is 11.
#[must_use]
pub fn basic_strategy(player_value: u8, dealer_upcard_value: u8, is_soft: bool) -> Advice {
    let (mut action, mut confidence, mut reasoning) = if player_value >= 17 {
        (
            Action::Stand,
            0.95,
            String::from("17 or higher: stand"),
        )
    } else if player_value <= 11 {
        (
            Action::Hit,
            1.0,
            String::from("11 or lower cannot bust: always hit"),
        )
    } else if (2..=6).contains(&dealer_upcard_value) {
        (
            Action::Stand,
            0.85,
            format!("Dealer shows a weak {dealer_upcard_value} and is likely to bust: stand on {player_value}"),
        )
    } else {
        (
            Action::Hit,
            0.8,
            format!("Dealer shows a strong {dealer_upcard_value}: improve {player_value}"),
        )
    };

    if is_soft && (13..=18).contains(&player_value) {
        action = Action::Hit;
        confidence = 0.9;
        reasoning = format!("Soft {player_value} cannot bust on one more card: hit");
    }

    Advice {
        action,
        confidence,
        reasoning,
    }
}

/// A source of recommendations.
///
/// Implementations backed by a remote service are expected to enforce their
/// own deadline and report it as [`AdvisoryError::Timeout`].
pub trait Advisor {
    /// Requests a recommendation for the given position.
    ///
    /// # Errors
    ///
    /// Returns an error if no usable recommendation could be produced.
    fn request_advice(&self, request: &AdviceRequest) -> Result<Advice, AdvisoryError>;
}

/// The local basic-strategy table. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicStrategy;

impl Advisor for BasicStrategy {
    fn request_advice(&self, request: &AdviceRequest) -> Result<Advice, AdvisoryError> {
        Ok(basic_strategy(
            request.player_value,
            request.dealer_upcard_value(),
            request.player_soft,
        ))
    }
}

impl<A: Advisor + ?Sized> Advisor for &A {
    fn request_advice(&self, request: &AdviceRequest) -> Result<Advice, AdvisoryError> {
        (**self).request_advice(request)
    }
}

impl<A: Advisor + ?Sized> Advisor for alloc::boxed::Box<A> {
    fn request_advice(&self, request: &AdviceRequest) -> Result<Advice, AdvisoryError> {
        (**self).request_advice(request)
    }
}

/// Uses `primary` when it answers and [`basic_strategy`] otherwise.
#[derive(Debug, Clone, Default)]
pub struct FallbackAdvisor<A> {
    primary: A,
}

impl<A: Advisor> FallbackAdvisor<A> {
    /// Wraps an advisor.
    pub const fn new(primary: A) -> Self {
        Self { primary }
    }

    /// Returns the wrapped advisor.
    pub const fn primary(&self) -> &A {
        &self.primary
    }

    /// Returns a recommendation, falling back to basic strategy on any error.
    pub fn advise(&self, request: &AdviceRequest) -> Advice {
        match self.primary.request_advice(request) {
            Ok(advice) => advice,
            Err(err) => {
                tracing::warn!(error = %err, "advisory service failed, using basic strategy");
                basic_strategy(
                    request.player_value,
                    request.dealer_upcard_value(),
                    request.player_soft,
                )
            }
        }
    }
}
