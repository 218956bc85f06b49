//! Credits wallet interface.
//!
//! The engine never touches balances. A [`Table`](crate::Table) debits the
//! wager before dealing and credits the payout after the outcome, keying both
//! transfers by round id so a retried call is applied once.

use alloc::string::String;
#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::{HashMap, HashSet};
#[cfg(feature = "std")]
use std::collections::{HashMap, HashSet};

use crate::error::WalletError;
use crate::sync::Mutex;

/// Credits granted to a newly created profile.
pub const DEFAULT_STARTING_CREDITS: usize = 500;

/// Identifies a round across wallet and history calls.
pub type RoundId = u64;

/// A credits store.
pub trait Wallet {
    /// Returns the user's balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the user is unknown or the backend is unavailable.
    fn balance(&self, user: &str) -> Result<usize, WalletError>;

    /// Removes `amount` from the user's balance for `round`.
    ///
    /// Repeating the call for the same round must not debit twice.
    ///
    /// # Errors
    ///
    /// Returns an error if the balance is too low, the user is unknown, or
    /// the backend is unavailable.
    fn debit(&self, user: &str, round: RoundId, amount: usize) -> Result<(), WalletError>;

    /// Adds `amount` to the user's balance for `round`.
    ///
    /// Repeating the call for the same round must not credit twice.
    ///
    /// # Errors
    ///
    /// Returns an error if the user is unknown or the backend is unavailable.
    fn credit(&self, user: &str, round: RoundId, amount: usize) -> Result<(), WalletError>;
}

impl<W: Wallet + ?Sized> Wallet for &W {
    fn balance(&self, user: &str) -> Result<usize, WalletError> {
        (**self).balance(user)
    }

    fn debit(&self, user: &str, round: RoundId, amount: usize) -> Result<(), WalletError> {
        (**self).debit(user, round, amount)
    }

    fn credit(&self, user: &str, round: RoundId, amount: usize) -> Result<(), WalletError> {
        (**self).credit(user, round, amount)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Direction {
    Debit,
    Credit,
}

/// Process-local wallet, handy for tests and offline play.
#[derive(Debug, Default)]
pub struct InMemoryWallet {
    balances: Mutex<HashMap<String, usize>>,
    applied: Mutex<HashSet<(String, RoundId, Direction)>>,
}

impl InMemoryWallet {
    /// Creates an empty wallet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a wallet holding `balance` credits for `user`.
    #[must_use]
    pub fn with_balance(user: &str, balance: usize) -> Self {
        let wallet = Self::new();
        wallet.open_account(user, balance);
        wallet
    }

    /// Creates or resets an account.
    pub fn open_account(&self, user: &str, balance: usize) {
        self.balances.lock().insert(String::from(user), balance);
    }

    /// Records the transfer; returns `false` if it was already applied.
    fn mark_applied(&self, user: &str, round: RoundId, direction: Direction) -> bool {
        self.applied
            .lock()
            .insert((String::from(user), round, direction))
    }

    fn forget(&self, user: &str, round: RoundId, direction: Direction) {
        self.applied
            .lock()
            .remove(&(String::from(user), round, direction));
    }
}

impl Wallet for InMemoryWallet {
    fn balance(&self, user: &str) -> Result<usize, WalletError> {
        self.balances
            .lock()
            .get(user)
            .copied()
            .ok_or(WalletError::UnknownUser)
    }

    fn debit(&self, user: &str, round: RoundId, amount: usize) -> Result<(), WalletError> {
        if !self.mark_applied(user, round, Direction::Debit) {
            return Ok(());
        }

        let mut balances = self.balances.lock();
        let result = match balances.get_mut(user) {
            None => Err(WalletError::UnknownUser),
            Some(balance) if *balance < amount => Err(WalletError::InsufficientFunds),
            Some(balance) => {
                *balance -= amount;
                Ok(())
            }
        };
        drop(balances);

        if result.is_err() {
            self.forget(user, round, Direction::Debit);
        }
        result
    }

    fn credit(&self, user: &str, round: RoundId, amount: usize) -> Result<(), WalletError> {
        if !self.mark_applied(user, round, Direction::Credit) {
            return Ok(());
        }

        let mut balances = self.balances.lock();
        let result = balances.get_mut(user).map_or(Err(WalletError::UnknownUser), |balance| {
            *balance += amount;
            Ok(())
        });
        drop(balances);

        if result.is_err() {
            self.forget(user, round, Direction::Credit);
        }
        result
    }
}
