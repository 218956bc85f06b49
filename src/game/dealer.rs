use crate::error::RoundError;
use crate::hand::Hand;
use crate::options::{GameOptions, RoundingMode};
use crate::result::{Outcome, OutcomeReason};

use super::{Phase, Round};

const DEALER_STAND_VALUE: u8 = 17;
const THREE_TO_TWO: f64 = 1.5;

#[cfg(feature = "std")]
fn round_amount(amount: f64, mode: RoundingMode) -> usize {
    match mode {
        RoundingMode::Up => amount.ceil() as usize,
        RoundingMode::Down => amount.floor() as usize,
        RoundingMode::Nearest => amount.round() as usize,
    }
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
fn round_amount(amount: f64, mode: RoundingMode) -> usize {
    match mode {
        RoundingMode::Up => libm::ceil(amount) as usize,
        RoundingMode::Down => libm::floor(amount) as usize,
        RoundingMode::Nearest => libm::round(amount) as usize,
    }
}

/// Total returned for a winning natural: the stake plus the rounded bonus.
///
/// Returns `None` if the amount does not fit in `usize`. The common 3:2 ratio
/// is computed in integers so large wagers stay exact.
#[expect(
    clippy::cast_precision_loss,
    reason = "ratios other than 3:2 are approximate by nature"
)]
fn checked_blackjack_payout(wager: usize, options: &GameOptions) -> Option<usize> {
    let bonus = if options.blackjack_pays == THREE_TO_TWO {
        let tripled = wager.checked_mul(3)?;
        let (half, remainder) = (tripled / 2, tripled % 2);
        match options.rounding_blackjack {
            RoundingMode::Down => half,
            RoundingMode::Up | RoundingMode::Nearest => half + remainder,
        }
    } else {
        let bonus = (wager as f64) * options.blackjack_pays;
        if !bonus.is_finite() || bonus < 0.0 || bonus >= usize::MAX as f64 {
            return None;
        }
        round_amount(bonus, options.rounding_blackjack)
    };
    wager.checked_add(bonus)
}

/// Whether every payout `wager` can win is representable.
pub(super) fn payout_fits(wager: usize, options: &GameOptions) -> bool {
    wager.checked_mul(2).is_some() && checked_blackjack_payout(wager, options).is_some()
}

/// Resolves a finished round.
///
/// Checked in order: player bust, dealer bust, both naturals, player natural,
/// dealer natural, then plain totals. `payout` includes the returned stake
/// and saturates at `usize::MAX`; rounds only accept wagers whose payouts fit.
#[must_use]
pub fn determine_outcome(
    player: &Hand,
    dealer: &Hand,
    wager: usize,
    options: &GameOptions,
) -> Outcome {
    let win = |payout, reason| Outcome {
        player_wins: true,
        is_push: false,
        payout,
        reason,
    };
    let lose = |reason| Outcome {
        player_wins: false,
        is_push: false,
        payout: 0,
        reason,
    };
    let natural = || checked_blackjack_payout(wager, options).unwrap_or(usize::MAX);
    let push = |reason| Outcome {
        player_wins: false,
        is_push: true,
        payout: wager,
        reason,
    };

    if player.is_busted() {
        return lose(OutcomeReason::PlayerBusted);
    }

    if dealer.is_busted() {
        let payout = if player.is_blackjack() {
            natural()
        } else {
            wager.saturating_mul(2)
        };
        return win(payout, OutcomeReason::DealerBusted);
    }

    match (player.is_blackjack(), dealer.is_blackjack()) {
        (true, true) => return push(OutcomeReason::BothBlackjack),
        (true, false) => return win(natural(), OutcomeReason::PlayerBlackjack),
        (false, true) => return lose(OutcomeReason::DealerBlackjack),
        (false, false) => {}
    }

    let (player_value, dealer_value) = (player.value(), dealer.value());
    match player_value.cmp(&dealer_value) {
        core::cmp::Ordering::Greater => win(
            wager.saturating_mul(2),
            OutcomeReason::PlayerHigher {
                player: player_value,
                dealer: dealer_value,
            },
        ),
        core::cmp::Ordering::Less => lose(OutcomeReason::DealerHigher {
            player: player_value,
            dealer: dealer_value,
        }),
        core::cmp::Ordering::Equal => push(OutcomeReason::EqualTotals {
            value: player_value,
        }),
    }
}

impl Round {
    /// Whether the dealer must draw another card.
    fn dealer_must_draw(&self) -> bool {
        let value = self.dealer.value();
        value < DEALER_STAND_VALUE
            || (value == DEALER_STAND_VALUE
                && self.dealer.is_soft()
                && self.options.dealer_hits_soft_17)
    }

    /// Dealer plays their hand according to the rules.
    ///
    /// The dealer reveals the hole card and draws until reaching 17 or more,
    /// drawing on soft 17 when [`GameOptions::dealer_hits_soft_17`] is set.
    /// The returned round is over and carries its outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if the round is not in the dealer turn or the deck
    /// runs out while the dealer must draw.
    pub fn play_dealer_turn(&self) -> Result<Self, RoundError> {
        self.ensure_phase(Phase::DealerTurn)?;

        let mut next = self.clone();
        next.dealer.reveal();
        tracing::debug!(dealer = next.dealer.value(), "hole card revealed");

        while next.dealer_must_draw() {
            let card = next.draw()?;
            next.dealer.add_card(card);
            tracing::debug!(card = %card, dealer = next.dealer.value(), "dealer draws");
        }

        next.finish();
        Ok(next)
    }

    /// Returns the round with its outcome computed.
    ///
    /// Rounds that already carry an outcome are returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the round has not reached the round-over phase.
    pub fn resolve_outcome(&self) -> Result<Self, RoundError> {
        if self.outcome.is_some() {
            return Ok(self.clone());
        }
        self.ensure_phase(Phase::RoundOver)?;

        let mut next = self.clone();
        next.finish();
        Ok(next)
    }
}
