//! Round history and statistics.

use alloc::vec::Vec;

use crate::error::HistoryError;
use crate::result::OutcomeKind;
use crate::sync::Mutex;
use crate::wallet::RoundId;

/// One settled round as stored by a history backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundRecord {
    /// Round identifier.
    pub round: RoundId,
    /// Amount wagered.
    pub wager: usize,
    /// Amount returned to the player, stake included.
    pub payout: usize,
    /// Win, lose or push.
    pub result: OutcomeKind,
    /// Whether the player was dealt a natural.
    pub player_blackjack: bool,
}

/// Destination for settled rounds.
///
/// Writes are fire-and-forget from the table's point of view: a failure is
/// logged and play continues.
pub trait HistorySink {
    /// Stores a settled round.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejected the write.
    fn record_round(&self, record: &RoundRecord) -> Result<(), HistoryError>;
}

impl<H: HistorySink + ?Sized> HistorySink for &H {
    fn record_round(&self, record: &RoundRecord) -> Result<(), HistoryError> {
        (**self).record_round(record)
    }
}

/// Discards every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHistory;

impl HistorySink for NoHistory {
    fn record_round(&self, _record: &RoundRecord) -> Result<(), HistoryError> {
        Ok(())
    }
}

/// Keeps records in memory.
#[derive(Debug, Default)]
pub struct InMemoryHistory {
    records: Mutex<Vec<RoundRecord>>,
}

impl InMemoryHistory {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all records, oldest first.
    #[must_use]
    pub fn records(&self) -> Vec<RoundRecord> {
        self.records.lock().clone()
    }

    /// Aggregates the stored records.
    #[must_use]
    pub fn statistics(&self) -> Statistics {
        Statistics::from_records(&self.records.lock())
    }
}

impl HistorySink for InMemoryHistory {
    fn record_round(&self, record: &RoundRecord) -> Result<(), HistoryError> {
        self.records.lock().push(*record);
        Ok(())
    }
}

/// Aggregate figures over a set of rounds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Statistics {
    /// Rounds counted.
    pub total_games: usize,
    /// Rounds won.
    pub wins: usize,
    /// Rounds lost.
    pub losses: usize,
    /// Rounds pushed.
    pub pushes: usize,
    /// Wins as a percentage of all rounds.
    pub win_rate: f64,
    /// Sum of payouts minus sum of wagers.
    pub net_winnings: i64,
    /// Mean wager.
    pub average_bet: f64,
    /// Naturals dealt to the player.
    pub blackjack_count: usize,
}

impl Statistics {
    /// Aggregates `records`. An empty slice yields all zeros.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "f64 has sufficient precision for round counts and wagers"
    )]
    #[expect(clippy::cast_possible_wrap, reason = "wagers and payouts fit in i64")]
    pub fn from_records(records: &[RoundRecord]) -> Self {
        let mut stats = Self::default();
        if records.is_empty() {
            return stats;
        }

        let mut total_bets: usize = 0;
        for record in records {
            match record.result {
                OutcomeKind::Win => stats.wins += 1,
                OutcomeKind::Lose => stats.losses += 1,
                OutcomeKind::Push => stats.pushes += 1,
            }
            if record.player_blackjack {
                stats.blackjack_count += 1;
            }
            stats.net_winnings += record.payout as i64 - record.wager as i64;
            total_bets += record.wager;
        }

        stats.total_games = records.len();
        stats.win_rate = stats.wins as f64 / stats.total_games as f64 * 100.0;
        stats.average_bet = total_bets as f64 / stats.total_games as f64;
        stats
    }
}
