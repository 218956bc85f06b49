//! Advice tests.

#![allow(clippy::float_cmp)]

use bjcasino::{
    Action, Advice, AdviceRequest, AdvisoryError, Advisor, BasicStrategy, Card, Deck,
    FallbackAdvisor, GameOptions, Rank, Round, Suit, basic_strategy,
};

struct Offline;

impl Advisor for Offline {
    fn request_advice(&self, _request: &AdviceRequest) -> Result<Advice, AdvisoryError> {
        Err(AdvisoryError::Unavailable)
    }
}

struct Garbled;

impl Advisor for Garbled {
    fn request_advice(&self, _request: &AdviceRequest) -> Result<Advice, AdvisoryError> {
        Advice::from_raw("double down", "more money", 0.99)
    }
}

fn dealt_round() -> Round {
    let draws = [
        Card::new(Suit::Hearts, Rank::Ace),
        Card::new(Suit::Spades, Rank::Six),
        Card::new(Suit::Clubs, Rank::Nine),
        Card::new(Suit::Diamonds, Rank::Seven),
    ];
    Round::with_deck(GameOptions::default(), 10, Deck::from_draws(draws))
        .unwrap()
        .deal_initial_cards()
        .unwrap()
}

#[test]
fn low_totals_always_hit() {
    for dealer in 2..=11 {
        let advice = basic_strategy(11, dealer, false);
        assert_eq!(advice.action, Action::Hit);
        assert_eq!(advice.confidence, 1.0);
    }
    assert_eq!(basic_strategy(5, 6, false).action, Action::Hit);
}

#[test]
fn high_totals_stand() {
    for value in 17..=21 {
        let advice = basic_strategy(value, 10, false);
        assert_eq!(advice.action, Action::Stand);
        assert_eq!(advice.confidence, 0.95);
    }
}

#[test]
fn stiff_totals_depend_on_dealer_upcard() {
    for dealer in 2..=6 {
        let advice = basic_strategy(14, dealer, false);
        assert_eq!(advice.action, Action::Stand);
        assert_eq!(advice.confidence, 0.85);
    }
    for dealer in [7, 8, 9, 10, 11] {
        let advice = basic_strategy(16, dealer, false);
        assert_eq!(advice.action, Action::Hit);
        assert_eq!(advice.confidence, 0.8);
    }
}

#[test]
fn soft_totals_hit_through_eighteen() {
    let soft_17 = basic_strategy(17, 9, true);
    assert_eq!(soft_17.action, Action::Hit);
    assert_eq!(soft_17.confidence, 0.9);

    assert_eq!(basic_strategy(18, 10, true).action, Action::Hit);
    assert_eq!(basic_strategy(13, 5, true).action, Action::Hit);
    assert_eq!(basic_strategy(19, 10, true).action, Action::Stand);
}

#[test]
fn every_recommendation_has_reasoning() {
    for value in 4..=21 {
        for dealer in 2..=11 {
            for soft in [false, true] {
                let advice = basic_strategy(value, dealer, soft);
                assert!(!advice.reasoning.is_empty());
                assert!((0.0..=1.0).contains(&advice.confidence));
            }
        }
    }
}

#[test]
fn raw_responses_are_validated() {
    let advice = Advice::from_raw(" HIT ", "dealer is strong", 0.6).unwrap();
    assert_eq!(advice.action, Action::Hit);
    assert_eq!(advice.reasoning, "dealer is strong");
    assert_eq!(advice.confidence, 0.6);

    assert_eq!(Advice::from_raw("Stand", "ok", 1.7).unwrap().confidence, 1.0);
    assert_eq!(Advice::from_raw("stand", "ok", -0.2).unwrap().confidence, 0.0);

    assert_eq!(
        Advice::from_raw("split", "pair of eights", 0.5),
        Err(AdvisoryError::Malformed)
    );
    assert_eq!(
        Advice::from_raw("hit", "   ", 0.5),
        Err(AdvisoryError::Malformed)
    );
    assert_eq!(
        Advice::from_raw("hit", "why not", f32::NAN),
        Err(AdvisoryError::Malformed)
    );
}

#[test]
fn request_sees_only_visible_cards() {
    let round = dealt_round();
    let request = AdviceRequest::from_round(&round);

    assert_eq!(request.player_value, 17);
    assert!(request.player_soft);
    assert_eq!(request.player_cards.len(), 2);
    assert_eq!(
        request.dealer_upcard,
        Some(Card::new(Suit::Clubs, Rank::Nine))
    );
    assert_eq!(request.dealer_upcard_value(), 9);
    assert_eq!(request.dealer_hidden, 1);

    let advice = BasicStrategy.request_advice(&request).unwrap();
    assert_eq!(advice.action, Action::Hit);
}

#[test]
fn missing_upcard_counts_as_ten() {
    let request = AdviceRequest {
        player_cards: Vec::new(),
        player_value: 15,
        player_soft: false,
        dealer_upcard: None,
        dealer_hidden: 0,
    };
    assert_eq!(request.dealer_upcard_value(), 10);
    assert_eq!(
        BasicStrategy.request_advice(&request).unwrap().action,
        Action::Hit
    );
}

#[test]
fn fallback_covers_unavailable_and_malformed_services() {
    let request = AdviceRequest::from_round(&dealt_round());
    let expected = basic_strategy(17, 9, true);

    assert_eq!(FallbackAdvisor::new(Offline).advise(&request), expected);
    assert_eq!(FallbackAdvisor::new(Garbled).advise(&request), expected);
    assert_eq!(FallbackAdvisor::new(BasicStrategy).advise(&request), expected);

    let boxed: Box<dyn Advisor> = Box::new(Offline);
    assert_eq!(FallbackAdvisor::new(boxed).advise(&request), expected);
}
