//! Table, wallet, and history integration tests.

#![allow(clippy::float_cmp)]

use std::cell::Cell;

use bjcasino::{
    Advice, AdviceRequest, AdvisoryError, Advisor, GameOptions, HistoryError, HistorySink,
    InMemoryHistory, InMemoryWallet, NoHistory, OutcomeKind, OutcomeReason, Phase, RoundError,
    RoundId, RoundRecord, Statistics, Table, TableError, WagerError, Wallet, WalletError,
    basic_strategy,
};

const USER: &str = "alice";

fn table(seed: u64) -> Table<InMemoryWallet, InMemoryHistory> {
    Table::new(
        GameOptions::default(),
        seed,
        USER,
        InMemoryWallet::with_balance(USER, 500),
        InMemoryHistory::new(),
    )
}

/// First seed whose opening deal leaves the player to act.
fn player_turn_seed() -> u64 {
    (0..)
        .find(|&seed| table(seed).place_bet(100).unwrap().is_none())
        .unwrap()
}

/// First seed where standing on the opening hand wins.
fn winning_seed() -> u64 {
    (0..)
        .find(|&seed| {
            let mut table = table(seed);
            let settlement = match table.place_bet(100).unwrap() {
                Some(settlement) => settlement,
                None => table.stand().unwrap(),
            };
            settlement.outcome.payout > 0 && !settlement.outcome.is_push
        })
        .unwrap()
}

/// Wallet whose credits can be switched off.
struct FlakyWallet {
    inner: InMemoryWallet,
    fail_credit: Cell<bool>,
}

impl Wallet for FlakyWallet {
    fn balance(&self, user: &str) -> Result<usize, WalletError> {
        self.inner.balance(user)
    }

    fn debit(&self, user: &str, round: RoundId, amount: usize) -> Result<(), WalletError> {
        self.inner.debit(user, round, amount)
    }

    fn credit(&self, user: &str, round: RoundId, amount: usize) -> Result<(), WalletError> {
        if self.fail_credit.get() {
            return Err(WalletError::Unavailable);
        }
        self.inner.credit(user, round, amount)
    }
}

struct BrokenHistory;

impl HistorySink for BrokenHistory {
    fn record_round(&self, _record: &RoundRecord) -> Result<(), HistoryError> {
        Err(HistoryError::Unavailable)
    }
}

struct SlowAdvisor;

impl Advisor for SlowAdvisor {
    fn request_advice(&self, _request: &AdviceRequest) -> Result<Advice, AdvisoryError> {
        Err(AdvisoryError::Timeout)
    }
}

struct AlwaysStand;

impl Advisor for AlwaysStand {
    fn request_advice(&self, _request: &AdviceRequest) -> Result<Advice, AdvisoryError> {
        Advice::from_raw("stand", "house model", 0.7)
    }
}

#[test]
fn new_table_awaits_wager() {
    let table = table(1);
    assert_eq!(table.phase(), Phase::AwaitingWager);
    assert_eq!(table.round_id(), 0);
    assert!(table.round().is_none());
    assert_eq!(table.user(), USER);
    assert_eq!(table.balance(), Ok(500));
}

#[test]
fn wager_limits_are_enforced() {
    let mut table = table(1);

    assert_eq!(table.place_bet(0), Err(TableError::Wager(WagerError::Zero)));
    assert_eq!(
        table.place_bet(4),
        Err(TableError::Wager(WagerError::BelowMinimum { min: 5 }))
    );
    assert_eq!(
        table.place_bet(1001),
        Err(TableError::Wager(WagerError::AboveMaximum { max: 1000 }))
    );

    assert_eq!(table.phase(), Phase::AwaitingWager);
    assert_eq!(table.round_id(), 0);
    assert_eq!(table.balance(), Ok(500));
}

#[test]
fn insufficient_funds_deals_nothing() {
    let mut table = Table::new(
        GameOptions::default(),
        1,
        USER,
        InMemoryWallet::with_balance(USER, 50),
        NoHistory,
    );

    assert_eq!(
        table.place_bet(100),
        Err(TableError::Wager(WagerError::InsufficientFunds {
            balance: 50,
            wager: 100,
        }))
    );
    assert!(table.round().is_none());
    assert_eq!(table.balance(), Ok(50));
}

#[test]
fn unknown_user_is_rejected() {
    let mut table = Table::new(
        GameOptions::default(),
        1,
        "bob",
        InMemoryWallet::with_balance(USER, 500),
        NoHistory,
    );
    assert_eq!(
        table.place_bet(10),
        Err(TableError::Wallet(WalletError::UnknownUser))
    );
}

#[test]
fn custom_limits_apply() {
    let options = GameOptions::default().with_bet_limits(10, 20);
    let mut table = Table::new(
        options,
        1,
        USER,
        InMemoryWallet::with_balance(USER, 500),
        NoHistory,
    );
    assert_eq!(
        table.validate_wager(25),
        Err(TableError::Wager(WagerError::AboveMaximum { max: 20 }))
    );
    assert_eq!(table.validate_wager(20), Ok(()));
    assert!(table.place_bet(15).is_ok());
}

#[test]
fn balance_reflects_debit_and_payout() {
    for seed in 0..50 {
        let mut table = table(seed);
        let settlement = match table.place_bet(100).unwrap() {
            Some(settlement) => settlement,
            None => {
                assert_eq!(table.balance(), Ok(400), "seed {seed}");
                table.stand().unwrap()
            }
        };

        let payout = settlement.outcome.payout;
        assert!([0, 100, 200, 250].contains(&payout), "seed {seed}");
        assert_eq!(table.balance(), Ok(400 + payout), "seed {seed}");
        assert_eq!(settlement.round, 1);
        assert_eq!(settlement.credit_warning, None);
        assert!(settlement.history_recorded);
        assert_eq!(table.phase(), Phase::RoundOver);

        let records = table.history().records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].round, 1);
        assert_eq!(records[0].wager, 100);
        assert_eq!(records[0].payout, payout);
        assert_eq!(records[0].result, settlement.outcome.kind());
    }
}

#[test]
fn natural_settles_on_the_bet() {
    let seed = (0..)
        .find(|&seed| {
            let mut table = table(seed);
            table.place_bet(100).unwrap().is_some()
                && table.round().unwrap().player_hand().is_blackjack()
        })
        .unwrap();

    let mut table = table(seed);
    let settlement = table.place_bet(100).unwrap().unwrap();
    assert_eq!(table.phase(), Phase::RoundOver);
    assert!(matches!(
        settlement.outcome.reason,
        OutcomeReason::PlayerBlackjack | OutcomeReason::BothBlackjack | OutcomeReason::DealerBusted
    ));
    assert!(table.history().records()[0].player_blackjack);
    assert_eq!(table.history().statistics().blackjack_count, 1);
}

#[test]
fn round_in_progress_blocks_new_bet() {
    let mut table = table(player_turn_seed());
    assert!(table.place_bet(100).unwrap().is_none());
    assert_eq!(table.phase(), Phase::PlayerTurn);

    assert_eq!(table.place_bet(100), Err(TableError::RoundInProgress));
    assert_eq!(table.clear_round(), Err(TableError::RoundInProgress));
    assert_eq!(table.balance(), Ok(400));
    assert_eq!(table.round_id(), 1);
}

#[test]
fn hitting_to_bust_settles_without_payout() {
    let mut table = table(player_turn_seed());
    table.place_bet(100).unwrap();

    let settlement = loop {
        if let Some(settlement) = table.hit().unwrap() {
            break settlement;
        }
    };

    assert_eq!(settlement.outcome.reason, OutcomeReason::PlayerBusted);
    assert_eq!(settlement.outcome.payout, 0);
    assert_eq!(table.balance(), Ok(400));
    assert_eq!(table.round().unwrap().dealer_hand().concealed_count(), 1);
    assert_eq!(
        table.hit(),
        Err(TableError::Round(RoundError::IllegalPhase {
            expected: Phase::PlayerTurn,
            actual: Phase::RoundOver,
        }))
    );

    let stats = table.history().statistics();
    assert_eq!(stats.losses, 1);
    assert_eq!(stats.net_winnings, -100);
}

#[test]
fn actions_without_a_round_fail() {
    let mut table = table(1);
    assert_eq!(table.hit(), Err(TableError::NoRound));
    assert_eq!(table.stand(), Err(TableError::NoRound));
    assert_eq!(table.advice(), Err(TableError::NoRound));
    assert_eq!(table.retry_payout(), Err(TableError::NoRound));
    assert_eq!(table.clear_round(), Ok(()));
}

#[test]
fn consecutive_rounds_get_new_ids() {
    let mut table = table(9);
    for expected in 1..=3 {
        let settlement = match table.place_bet(10).unwrap() {
            Some(settlement) => settlement,
            None => table.stand().unwrap(),
        };
        assert_eq!(settlement.round, expected);
        assert_eq!(table.round_id(), expected);
    }

    table.clear_round().unwrap();
    assert_eq!(table.phase(), Phase::AwaitingWager);
    assert!(table.round().is_none());

    let records = table.history().records();
    let ids: Vec<RoundId> = records.iter().map(|r| r.round).collect();
    assert_eq!(ids, [1, 2, 3]);
    assert_eq!(table.history().statistics().total_games, 3);
}

#[test]
fn failed_credit_is_reported_and_retryable() {
    let wallet = FlakyWallet {
        inner: InMemoryWallet::with_balance(USER, 500),
        fail_credit: Cell::new(true),
    };
    let mut table = Table::new(
        GameOptions::default(),
        winning_seed(),
        USER,
        wallet,
        InMemoryHistory::new(),
    );

    let settlement = match table.place_bet(100).unwrap() {
        Some(settlement) => settlement,
        None => table.stand().unwrap(),
    };
    let payout = settlement.outcome.payout;
    assert!(payout > 100);
    assert_eq!(settlement.credit_warning, Some(WalletError::Unavailable));
    assert!(settlement.history_recorded);

    // cards and outcome stand
    assert_eq!(table.phase(), Phase::RoundOver);
    assert_eq!(table.round().unwrap().outcome(), Some(&settlement.outcome));
    assert_eq!(table.balance(), Ok(400));

    assert_eq!(
        table.retry_payout(),
        Err(TableError::Wallet(WalletError::Unavailable))
    );

    table.wallet().fail_credit.set(false);
    table.retry_payout().unwrap();
    table.retry_payout().unwrap();
    assert_eq!(table.balance(), Ok(400 + payout));
}

#[test]
fn history_failure_does_not_block_play() {
    let mut table = Table::new(
        GameOptions::default(),
        3,
        USER,
        InMemoryWallet::with_balance(USER, 500),
        BrokenHistory,
    );

    for _ in 0..2 {
        let settlement = match table.place_bet(10).unwrap() {
            Some(settlement) => settlement,
            None => table.stand().unwrap(),
        };
        assert!(!settlement.history_recorded);
        assert_eq!(settlement.credit_warning, None);
    }
    assert_eq!(table.round_id(), 2);
}

#[test]
fn advice_uses_basic_strategy_by_default() {
    let mut table = table(player_turn_seed());
    table.place_bet(100).unwrap();

    let request = AdviceRequest::from_round(table.round().unwrap());
    assert_eq!(request.dealer_hidden, 1);
    assert_eq!(request.player_cards.len(), 2);

    let advice = table.advice().unwrap();
    assert_eq!(
        advice,
        basic_strategy(
            request.player_value,
            request.dealer_upcard_value(),
            request.player_soft,
        )
    );
    // asking leaves the round alone
    assert_eq!(table.phase(), Phase::PlayerTurn);
    assert_eq!(table.round().unwrap().player_hand().len(), 2);
}

#[test]
fn failing_advisor_falls_back() {
    let seed = player_turn_seed();
    let mut plain = table(seed);
    let mut slow = table(seed).with_advisor(SlowAdvisor);
    plain.place_bet(100).unwrap();
    slow.place_bet(100).unwrap();

    assert_eq!(slow.advice().unwrap(), plain.advice().unwrap());
}

#[test]
fn custom_advisor_is_used_until_round_ends() {
    let mut table = table(player_turn_seed()).with_advisor(AlwaysStand);
    table.place_bet(100).unwrap();

    let advice = table.advice().unwrap();
    assert_eq!(advice.action, bjcasino::Action::Stand);
    assert_eq!(advice.reasoning, "house model");

    table.stand().unwrap();
    assert_eq!(
        table.advice(),
        Err(TableError::Round(RoundError::IllegalPhase {
            expected: Phase::PlayerTurn,
            actual: Phase::RoundOver,
        }))
    );
}

#[test]
fn in_memory_wallet_is_idempotent_per_round() {
    let wallet = InMemoryWallet::with_balance(USER, 500);

    wallet.debit(USER, 1, 100).unwrap();
    wallet.debit(USER, 1, 100).unwrap();
    assert_eq!(wallet.balance(USER), Ok(400));

    wallet.credit(USER, 1, 250).unwrap();
    wallet.credit(USER, 1, 250).unwrap();
    assert_eq!(wallet.balance(USER), Ok(650));

    wallet.debit(USER, 2, 100).unwrap();
    assert_eq!(wallet.balance(USER), Ok(550));
}

#[test]
fn in_memory_wallet_failed_debit_can_be_retried() {
    let wallet = InMemoryWallet::with_balance(USER, 50);

    assert_eq!(wallet.debit(USER, 1, 100), Err(WalletError::InsufficientFunds));
    assert_eq!(wallet.balance(USER), Ok(50));

    wallet.open_account(USER, 200);
    wallet.debit(USER, 1, 100).unwrap();
    assert_eq!(wallet.balance(USER), Ok(100));

    assert_eq!(wallet.balance("bob"), Err(WalletError::UnknownUser));
    assert_eq!(wallet.credit("bob", 1, 10), Err(WalletError::UnknownUser));
}

#[test]
fn statistics_aggregate_records() {
    let records = [
        RoundRecord {
            round: 1,
            wager: 100,
            payout: 250,
            result: OutcomeKind::Win,
            player_blackjack: true,
        },
        RoundRecord {
            round: 2,
            wager: 100,
            payout: 200,
            result: OutcomeKind::Win,
            player_blackjack: false,
        },
        RoundRecord {
            round: 3,
            wager: 50,
            payout: 0,
            result: OutcomeKind::Lose,
            player_blackjack: false,
        },
        RoundRecord {
            round: 4,
            wager: 50,
            payout: 50,
            result: OutcomeKind::Push,
            player_blackjack: false,
        },
    ];

    let stats = Statistics::from_records(&records);
    assert_eq!(stats.total_games, 4);
    assert_eq!(stats.wins, 2);
    assert_eq!(stats.losses, 1);
    assert_eq!(stats.pushes, 1);
    assert_eq!(stats.win_rate, 50.0);
    assert_eq!(stats.net_winnings, 200);
    assert_eq!(stats.average_bet, 75.0);
    assert_eq!(stats.blackjack_count, 1);

    assert_eq!(Statistics::from_records(&[]), Statistics::default());
}
