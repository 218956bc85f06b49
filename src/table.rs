//! Table orchestration around the round engine.
//!
//! [`Table`] owns the RNG and the current [`Round`], and performs the side
//! effects the engine deliberately does not: wallet debit before the deal,
//! payout credit and history write after the outcome, and advice lookups.

use alloc::string::String;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::advice::{Advice, AdviceRequest, Advisor, BasicStrategy, FallbackAdvisor};
use crate::error::{RoundError, TableError, WagerError, WalletError};
use crate::game::{Phase, Round};
use crate::history::{HistorySink, RoundRecord};
use crate::options::GameOptions;
use crate::result::Outcome;
use crate::wallet::{RoundId, Wallet};

/// Side effects applied when a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    /// Round identifier used for the wallet transfers.
    pub round: RoundId,
    /// The round's outcome.
    pub outcome: Outcome,
    /// Set when crediting the payout failed. The dealt cards stand; the
    /// payout must be reconciled, e.g. with [`Table::retry_payout`].
    pub credit_warning: Option<WalletError>,
    /// Whether the history sink accepted the record.
    pub history_recorded: bool,
}

/// A single-seat blackjack table.
///
/// # Example
///
/// ```
/// use bjcasino::{GameOptions, InMemoryHistory, InMemoryWallet, Phase, Table};
///
/// let wallet = InMemoryWallet::with_balance("alice", 500);
/// let mut table = Table::new(GameOptions::default(), 42, "alice", wallet, InMemoryHistory::new());
///
/// let settled = table.place_bet(100).unwrap();
/// let settlement = match settled {
///     Some(settlement) => settlement,
///     None => table.stand().unwrap(),
/// };
/// assert!([0, 100, 200, 250].contains(&settlement.outcome.payout));
/// assert_eq!(table.phase(), Phase::RoundOver);
/// ```
#[derive(Debug)]
pub struct Table<W, H, A = BasicStrategy> {
    options: GameOptions,
    user: String,
    wallet: W,
    history: H,
    advisor: FallbackAdvisor<A>,
    rng: ChaCha8Rng,
    round: Option<Round>,
    round_id: RoundId,
}

impl<W: Wallet, H: HistorySink> Table<W, H> {
    /// Creates a table for `user`, shuffling with a RNG seeded from `seed`.
    ///
    /// Advice comes from the local basic-strategy table until
    /// [`Table::with_advisor`] installs another source.
    pub fn new(options: GameOptions, seed: u64, user: &str, wallet: W, history: H) -> Self {
        Self {
            options,
            user: String::from(user),
            wallet,
            history,
            advisor: FallbackAdvisor::new(BasicStrategy),
            rng: ChaCha8Rng::seed_from_u64(seed),
            round: None,
            round_id: 0,
        }
    }
}

impl<W: Wallet, H: HistorySink, A: Advisor> Table<W, H, A> {
    /// Replaces the advice source. Failures of `advisor` fall back to basic
    /// strategy.
    pub fn with_advisor<B: Advisor>(self, advisor: B) -> Table<W, H, B> {
        Table {
            options: self.options,
            user: self.user,
            wallet: self.wallet,
            history: self.history,
            advisor: FallbackAdvisor::new(advisor),
            rng: self.rng,
            round: self.round,
            round_id: self.round_id,
        }
    }

    /// Returns the table options.
    pub const fn options(&self) -> &GameOptions {
        &self.options
    }

    /// Returns the seated user.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Returns the wallet.
    pub const fn wallet(&self) -> &W {
        &self.wallet
    }

    /// Returns the history sink.
    pub const fn history(&self) -> &H {
        &self.history
    }

    /// Returns the current or last finished round.
    pub const fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// Returns the id of the current or last round (0 before the first bet).
    pub const fn round_id(&self) -> RoundId {
        self.round_id
    }

    /// Returns the current phase; [`Phase::AwaitingWager`] when no round is
    /// on the table.
    pub fn phase(&self) -> Phase {
        self.round.as_ref().map_or(Phase::AwaitingWager, Round::phase)
    }

    /// Returns the user's balance.
    ///
    /// # Errors
    ///
    /// Propagates wallet errors.
    pub fn balance(&self) -> Result<usize, WalletError> {
        self.wallet.balance(&self.user)
    }

    /// Checks table limits and funds for `wager`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Wager`] if the wager is rejected, or a wallet
    /// error if the balance cannot be read.
    pub fn validate_wager(&self, wager: usize) -> Result<(), TableError> {
        if wager == 0 {
            return Err(WagerError::Zero.into());
        }
        if wager < self.options.min_bet {
            return Err(WagerError::BelowMinimum {
                min: self.options.min_bet,
            }
            .into());
        }
        if wager > self.options.max_bet {
            return Err(WagerError::AboveMaximum {
                max: self.options.max_bet,
            }
            .into());
        }

        let balance = self.balance()?;
        if balance < wager {
            return Err(WagerError::InsufficientFunds { balance, wager }.into());
        }
        Ok(())
    }

    /// Accepts a wager, debits it, and deals the initial cards.
    ///
    /// A player natural is played out immediately, in which case the
    /// settlement is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if a round is still in progress, the wager is
    /// rejected, or the debit fails. No cards are dealt in those cases.
    pub fn place_bet(&mut self, wager: usize) -> Result<Option<Settlement>, TableError> {
        if self.round.as_ref().is_some_and(|round| !round.is_over()) {
            return Err(TableError::RoundInProgress);
        }
        self.validate_wager(wager)?;

        let round = Round::initialize(self.options, wager, &mut self.rng)?;
        let round_id = self.round_id + 1;
        self.wallet.debit(&self.user, round_id, wager)?;
        self.round_id = round_id;

        tracing::debug!(round = round_id, wager, "wager accepted");

        let mut round = round.deal_initial_cards()?;
        if round.phase() == Phase::DealerTurn {
            round = round.play_dealer_turn()?;
        }
        Ok(self.advance(round))
    }

    /// Player hits. Returns the settlement if the hit busted the hand.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no round or it is not the player's turn.
    pub fn hit(&mut self) -> Result<Option<Settlement>, TableError> {
        let next = self.current()?.apply_hit()?;
        Ok(self.advance(next))
    }

    /// Player stands; the dealer plays out and the round settles.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no round or it is not the player's turn.
    pub fn stand(&mut self) -> Result<Settlement, TableError> {
        let next = self.current()?.apply_stand()?.play_dealer_turn()?;
        let actual = next.phase();
        self.advance(next).ok_or_else(|| {
            RoundError::IllegalPhase {
                expected: Phase::RoundOver,
                actual,
            }
            .into()
        })
    }

    /// Returns a recommendation for the current player turn.
    ///
    /// External advisor failures are absorbed; this only fails when there is
    /// nothing to advise on.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no round or it is not the player's turn.
    pub fn advice(&self) -> Result<Advice, TableError> {
        let round = self.current()?;
        if round.phase() != Phase::PlayerTurn {
            return Err(RoundError::IllegalPhase {
                expected: Phase::PlayerTurn,
                actual: round.phase(),
            }
            .into());
        }
        Ok(self.advisor.advise(&AdviceRequest::from_round(round)))
    }

    /// Re-issues the payout credit of the last finished round.
    ///
    /// Safe to call repeatedly: the wallet applies a round's credit once.
    ///
    /// # Errors
    ///
    /// Returns an error if no finished round exists or the wallet still
    /// refuses the credit.
    pub fn retry_payout(&self) -> Result<(), TableError> {
        let round = self.current()?;
        let outcome = round.outcome().ok_or(RoundError::IllegalPhase {
            expected: Phase::RoundOver,
            actual: round.phase(),
        })?;
        if outcome.payout > 0 {
            self.wallet
                .credit(&self.user, self.round_id, outcome.payout)?;
        }
        Ok(())
    }

    /// Removes a finished round so the table awaits the next wager.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::RoundInProgress`] while a round is being played.
    pub fn clear_round(&mut self) -> Result<(), TableError> {
        if self.round.as_ref().is_some_and(|round| !round.is_over()) {
            return Err(TableError::RoundInProgress);
        }
        self.round = None;
        Ok(())
    }

    fn current(&self) -> Result<&Round, TableError> {
        self.round.as_ref().ok_or(TableError::NoRound)
    }

    /// Stores `next` and settles it if it just finished.
    fn advance(&mut self, next: Round) -> Option<Settlement> {
        let settlement = next
            .outcome()
            .copied()
            .map(|outcome| self.settle(&next, outcome));
        self.round = Some(next);
        settlement
    }

    fn settle(&self, round: &Round, outcome: Outcome) -> Settlement {
        let round_id = self.round_id;

        let credit_warning = if outcome.payout > 0 {
            self.wallet
                .credit(&self.user, round_id, outcome.payout)
                .err()
        } else {
            None
        };
        if let Some(err) = credit_warning {
            tracing::warn!(
                round = round_id,
                payout = outcome.payout,
                error = %err,
                "payout credit failed, manual reconciliation required"
            );
        }

        let record = RoundRecord {
            round: round_id,
            wager: round.wager(),
            payout: outcome.payout,
            result: outcome.kind(),
            player_blackjack: round.player_hand().is_blackjack(),
        };
        let history_recorded = match self.history.record_round(&record) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(round = round_id, error = %err, "failed to record round");
                false
            }
        };

        tracing::info!(
            round = round_id,
            result = outcome.kind().as_str(),
            payout = outcome.payout,
            "round settled"
        );

        Settlement {
            round: round_id,
            outcome,
            credit_warning,
            history_recorded,
        }
    }
}
