//! A single-hand, single-deck blackjack engine with optional `no_std` support.
//!
//! The engine is a pure state machine over [`Round`] snapshots: each
//! transition borrows a round and returns the next one. [`Table`] wraps it
//! with the side effects of a real table: wallet transfers, round history,
//! and hit/stand advice with a basic-strategy fallback.
//!
//! # Example
//!
//! ```
//! use bjcasino::{GameOptions, Phase, Round};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//! let round = Round::initialize(GameOptions::default(), 100, &mut rng).unwrap();
//! let mut round = round.deal_initial_cards().unwrap();
//! if round.phase() == Phase::PlayerTurn {
//!     round = round.apply_stand().unwrap();
//! }
//! let round = round.play_dealer_turn().unwrap().resolve_outcome().unwrap();
//! assert!(round.outcome().is_some());
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod advice;
pub mod card;
pub mod error;
pub mod game;
pub mod hand;
pub mod history;
pub mod options;
pub mod result;
mod sync;
pub mod table;
pub mod wallet;

// Re-export main types
pub use advice::{Advice, AdviceRequest, Advisor, BasicStrategy, FallbackAdvisor, basic_strategy};
pub use card::{Card, DECK_SIZE, Deck, Rank, Suit, build_deck};
pub use error::{AdvisoryError, HistoryError, RoundError, TableError, WagerError, WalletError};
pub use game::{Action, Phase, Round, determine_outcome};
pub use hand::{BLACKJACK_VALUE, Hand, HandValue, evaluate};
pub use history::{HistorySink, InMemoryHistory, NoHistory, RoundRecord, Statistics};
pub use options::{GameOptions, RoundingMode};
pub use result::{Outcome, OutcomeKind, OutcomeReason};
pub use table::{Settlement, Table};
pub use wallet::{DEFAULT_STARTING_CREDITS, InMemoryWallet, RoundId, Wallet};
