use bjcasino::{
    Card, GameOptions, Hand, InMemoryHistory, InMemoryWallet, Outcome, Settlement, Suit, Table,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

const USER: &str = "player";

type SeatTable = Table<InMemoryWallet, InMemoryHistory>;

#[wasm_bindgen]
pub struct WasmTable {
    table: SeatTable,
}

#[wasm_bindgen]
impl WasmTable {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32, credits: u32) -> Self {
        Self {
            table: new_table(seed, credits),
        }
    }

    pub fn reset(&mut self, seed: u32, credits: u32) {
        self.table = new_table(seed, credits);
    }

    pub fn balance(&self) -> Result<u32, JsValue> {
        self.table
            .balance()
            .map(|value| value as u32)
            .map_err(js_err)
    }

    /// Returns the settlement when a natural ends the round at once, else `null`.
    pub fn place_bet(&mut self, amount: u32) -> Result<JsValue, JsValue> {
        let settlement = self.table.place_bet(amount as usize).map_err(js_err)?;
        to_js_value(&settlement.map(JsSettlement::from))
    }

    /// Returns the settlement when the hit busts, else `null`.
    pub fn hit(&mut self) -> Result<JsValue, JsValue> {
        let settlement = self.table.hit().map_err(js_err)?;
        to_js_value(&settlement.map(JsSettlement::from))
    }

    pub fn stand(&mut self) -> Result<JsValue, JsValue> {
        let settlement = self.table.stand().map_err(js_err)?;
        to_js_value(&JsSettlement::from(settlement))
    }

    pub fn advice(&self) -> Result<JsValue, JsValue> {
        let advice = self.table.advice().map_err(js_err)?;
        to_js_value(&advice)
    }

    pub fn retry_payout(&self) -> Result<(), JsValue> {
        self.table.retry_payout().map_err(js_err)
    }

    pub fn clear_round(&mut self) -> Result<(), JsValue> {
        self.table.clear_round().map_err(js_err)
    }

    pub fn statistics(&self) -> Result<JsValue, JsValue> {
        to_js_value(&self.table.history().statistics())
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        let round = self.table.round();
        let snapshot = Snapshot {
            phase: self.table.phase().as_str(),
            round: self.table.round_id() as u32,
            money: self.table.balance().ok().map(|value| value as u32),
            bet: round.map(|round| round.wager() as u32),
            player: round.map(|round| JsHand::from(round.player_hand())),
            dealer: round.map(|round| JsHand::from(round.dealer_hand())),
            legal_actions: round
                .map(|round| round.legal_actions().iter().map(|a| a.as_str()).collect())
                .unwrap_or_default(),
            outcome: round.and_then(|round| round.outcome().copied().map(JsOutcome::from)),
            cards_remaining: round.map_or(bjcasino::DECK_SIZE, |round| round.deck().len()) as u32,
        };

        to_js_value(&snapshot)
    }
}

fn new_table(seed: u32, credits: u32) -> SeatTable {
    Table::new(
        GameOptions::default(),
        seed as u64,
        USER,
        InMemoryWallet::with_balance(USER, credits as usize),
        InMemoryHistory::new(),
    )
}

#[derive(Serialize)]
struct Snapshot {
    phase: &'static str,
    round: u32,
    money: Option<u32>,
    bet: Option<u32>,
    player: Option<JsHand>,
    dealer: Option<JsHand>,
    legal_actions: Vec<&'static str>,
    outcome: Option<JsOutcome>,
    cards_remaining: u32,
}

#[derive(Serialize)]
struct JsCard {
    suit: &'static str,
    rank: &'static str,
    value: u8,
}

#[derive(Serialize)]
struct JsHand {
    /// `None` entries are face-down cards.
    cards: Vec<Option<JsCard>>,
    value: u8,
    is_soft: bool,
    is_blackjack: bool,
    is_bust: bool,
}

impl From<&Hand> for JsHand {
    fn from(hand: &Hand) -> Self {
        Self {
            cards: hand.cards().iter().copied().map(card_to_js).collect(),
            value: hand.value(),
            is_soft: hand.is_soft(),
            is_blackjack: hand.is_blackjack(),
            is_bust: hand.is_busted(),
        }
    }
}

#[derive(Serialize)]
struct JsOutcome {
    result: &'static str,
    reason: String,
    payout: u32,
}

impl From<Outcome> for JsOutcome {
    fn from(outcome: Outcome) -> Self {
        Self {
            result: outcome.kind().as_str(),
            reason: outcome.reason.to_string(),
            payout: outcome.payout as u32,
        }
    }
}

#[derive(Serialize)]
struct JsSettlement {
    round: u32,
    outcome: JsOutcome,
    credit_warning: Option<String>,
    history_recorded: bool,
}

impl From<Settlement> for JsSettlement {
    fn from(settlement: Settlement) -> Self {
        Self {
            round: settlement.round as u32,
            outcome: JsOutcome::from(settlement.outcome),
            credit_warning: settlement.credit_warning.map(|err| err.to_string()),
            history_recorded: settlement.history_recorded,
        }
    }
}

fn card_to_js(card: Card) -> Option<JsCard> {
    if card.is_concealed() {
        return None;
    }
    Some(JsCard {
        suit: suit_to_str(card.suit()),
        rank: card.rank().label(),
        value: card.value(),
    })
}

fn suit_to_str(suit: Suit) -> &'static str {
    match suit {
        Suit::Hearts => "Hearts",
        Suit::Diamonds => "Diamonds",
        Suit::Clubs => "Clubs",
        Suit::Spades => "Spades",
    }
}

fn js_err<E: core::fmt::Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_js_value<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsValue::from_str(&err.to_string()))
}
