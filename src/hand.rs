//! Hand representation and evaluation.

use alloc::vec::Vec;

use crate::card::Card;

/// Highest non-busted total.
pub const BLACKJACK_VALUE: u8 = 21;

/// Result of evaluating a sequence of cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandValue {
    /// Best total, aces counted as 11 where that does not bust.
    pub value: u8,
    /// Whether an ace is currently counted as 11.
    pub is_soft: bool,
    /// Whether the total exceeds 21.
    pub is_busted: bool,
    /// Whether the cards are a natural (two visible cards totalling 21).
    pub is_blackjack: bool,
}

/// Evaluates `cards`, skipping any that are still concealed.
#[must_use]
pub fn evaluate(cards: &[Card]) -> HandValue {
    let mut value: u8 = 0;
    let mut soft_aces: u8 = 0;

    for card in cards.iter().filter(|card| !card.is_concealed()) {
        if card.is_ace() {
            soft_aces = soft_aces.saturating_add(1);
        }
        value = value.saturating_add(card.value());
    }

    // aces start at 11; demote one at a time while busted
    while value > BLACKJACK_VALUE && soft_aces > 0 {
        value -= 10;
        soft_aces -= 1;
    }
    let is_soft = soft_aces > 0;

    let is_blackjack = cards.len() == 2
        && value == BLACKJACK_VALUE
        && !cards.iter().any(Card::is_concealed);

    HandValue {
        value,
        is_soft,
        is_busted: value > BLACKJACK_VALUE,
        is_blackjack,
    }
}

/// A hand of cards together with its cached evaluation.
///
/// The evaluation is recomputed on every mutation, so it always matches
/// [`evaluate`] over [`Hand::cards`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hand {
    cards: Vec<Card>,
    evaluation: HandValue,
}

impl Hand {
    /// Creates a new empty hand.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cards: Vec::new(),
            evaluation: HandValue {
                value: 0,
                is_soft: false,
                is_busted: false,
                is_blackjack: false,
            },
        }
    }

    /// Creates a hand from the given cards.
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        let evaluation = evaluate(&cards);
        Self { cards, evaluation }
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
        self.evaluation = evaluate(&self.cards);
    }

    /// Turns every concealed card face up.
    pub fn reveal(&mut self) {
        for card in &mut self.cards {
            *card = card.revealed();
        }
        self.evaluation = evaluate(&self.cards);
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the cached evaluation.
    #[must_use]
    pub const fn evaluation(&self) -> HandValue {
        self.evaluation
    }

    /// Returns the visible total.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.evaluation.value
    }

    /// Returns whether the hand is soft (contains an ace counted as 11).
    #[must_use]
    pub const fn is_soft(&self) -> bool {
        self.evaluation.is_soft
    }

    /// Returns whether the hand is bust.
    #[must_use]
    pub const fn is_busted(&self) -> bool {
        self.evaluation.is_busted
    }

    /// Returns whether the hand is a natural blackjack.
    #[must_use]
    pub const fn is_blackjack(&self) -> bool {
        self.evaluation.is_blackjack
    }

    /// Returns the first visible card (the dealer's up card).
    #[must_use]
    pub fn up_card(&self) -> Option<&Card> {
        self.cards.iter().find(|card| !card.is_concealed())
    }

    /// Returns how many cards are still face down.
    #[must_use]
    pub fn concealed_count(&self) -> usize {
        self.cards.iter().filter(|card| card.is_concealed()).count()
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
