//! Round outcome types.

use core::fmt;

/// Coarse result of a round from the player's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutcomeKind {
    /// Player wins.
    Win,
    /// Player loses.
    Lose,
    /// Push (tie).
    Push,
}

impl OutcomeKind {
    /// Lowercase label as stored by history backends.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Win => "win",
            Self::Lose => "lose",
            Self::Push => "push",
        }
    }
}

/// Which branch of the resolution table decided the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutcomeReason {
    /// Player went over 21.
    PlayerBusted,
    /// Dealer went over 21.
    DealerBusted,
    /// Both sides hold a natural.
    BothBlackjack,
    /// Only the player holds a natural.
    PlayerBlackjack,
    /// Only the dealer holds a natural.
    DealerBlackjack,
    /// Player total is higher.
    PlayerHigher {
        /// Player total.
        player: u8,
        /// Dealer total.
        dealer: u8,
    },
    /// Dealer total is higher.
    DealerHigher {
        /// Player total.
        player: u8,
        /// Dealer total.
        dealer: u8,
    },
    /// Totals are equal.
    EqualTotals {
        /// Shared total.
        value: u8,
    },
}

impl fmt::Display for OutcomeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlayerBusted => f.write_str("Player busted"),
            Self::DealerBusted => f.write_str("Dealer busted"),
            Self::BothBlackjack => f.write_str("Both have blackjack"),
            Self::PlayerBlackjack => f.write_str("Player blackjack"),
            Self::DealerBlackjack => f.write_str("Dealer blackjack"),
            Self::PlayerHigher { player, dealer } => {
                write!(f, "Player wins {player} vs {dealer}")
            }
            Self::DealerHigher { player, dealer } => {
                write!(f, "Dealer wins {dealer} vs {player}")
            }
            Self::EqualTotals { value } => write!(f, "Push at {value}"),
        }
    }
}

/// Final result of a round.
///
/// `payout` is the total returned to the player, stake included: a push
/// returns the wager, a regular win twice the wager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Outcome {
    /// Whether the player won.
    pub player_wins: bool,
    /// Whether the round was a push.
    pub is_push: bool,
    /// Amount returned to the player.
    pub payout: usize,
    /// Why the round ended this way. Its `Display` is the text shown to the player.
    pub reason: OutcomeReason,
}

impl Outcome {
    /// Returns the coarse win/lose/push classification.
    #[must_use]
    pub const fn kind(&self) -> OutcomeKind {
        if self.player_wins {
            OutcomeKind::Win
        } else if self.is_push {
            OutcomeKind::Push
        } else {
            OutcomeKind::Lose
        }
    }

    /// Returns the payout minus the wager.
    #[expect(clippy::cast_possible_wrap, reason = "payout values fit in isize")]
    #[must_use]
    pub const fn net(&self, wager: usize) -> isize {
        self.payout as isize - wager as isize
    }
}
