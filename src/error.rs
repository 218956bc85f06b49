//! Error types for engine and table operations.

use thiserror::Error;

use crate::game::Phase;

/// Errors that can occur when a wager is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WagerError {
    /// Wager amount is zero.
    #[error("wager amount is zero")]
    Zero,
    /// Wager is below the table minimum.
    #[error("wager is below the table minimum of {min}")]
    BelowMinimum {
        /// Table minimum.
        min: usize,
    },
    /// Wager is above the table maximum.
    #[error("wager is above the table maximum of {max}")]
    AboveMaximum {
        /// Table maximum.
        max: usize,
    },
    /// Wager is so large that its winnings cannot be represented.
    #[error("wager is too large to be paid out")]
    PayoutOverflow,
    /// Balance does not cover the wager.
    #[error("insufficient funds: balance {balance}, wager {wager}")]
    InsufficientFunds {
        /// Current balance.
        balance: usize,
        /// Requested wager.
        wager: usize,
    },
}

/// Errors raised by the round state machine.
///
/// Both variants indicate an integration defect rather than a game condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RoundError {
    /// Operation invoked outside the phase it belongs to.
    #[error("illegal phase: expected {expected}, found {actual}")]
    IllegalPhase {
        /// Phase the operation requires.
        expected: Phase,
        /// Phase the round was in.
        actual: Phase,
    },
    /// No cards left in the deck.
    #[error("no cards left in the deck")]
    DeckExhausted,
}

/// Errors reported by a wallet backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WalletError {
    /// Balance does not cover the debit.
    #[error("insufficient funds")]
    InsufficientFunds,
    /// No balance exists for the user.
    #[error("unknown user")]
    UnknownUser,
    /// Backend could not be reached.
    #[error("wallet backend unavailable")]
    Unavailable,
}

/// Errors reported by a history sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// Backend could not be reached.
    #[error("history backend unavailable")]
    Unavailable,
}

/// Errors reported by an external advisory service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AdvisoryError {
    /// Service could not be reached or is not configured.
    #[error("advisory service unavailable")]
    Unavailable,
    /// Service did not answer in time.
    #[error("advisory service timed out")]
    Timeout,
    /// Service answered with something that is not a usable recommendation.
    #[error("malformed advisory response")]
    Malformed,
}

/// Errors returned by [`Table`](crate::Table) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableError {
    /// Wager rejected.
    #[error(transparent)]
    Wager(#[from] WagerError),
    /// Engine rejected the transition.
    #[error(transparent)]
    Round(#[from] RoundError),
    /// Wallet rejected the debit.
    #[error(transparent)]
    Wallet(#[from] WalletError),
    /// A round is still being played.
    #[error("a round is already in progress")]
    RoundInProgress,
    /// No round has been started.
    #[error("no round has been started")]
    NoRound,
}
