//! Table configuration options.

/// Rounding mode for payouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundingMode {
    /// Round up.
    Up,
    /// Round down.
    Down,
    /// Round to nearest.
    Nearest,
}

/// Default minimum wager.
pub const DEFAULT_MIN_BET: usize = 5;

/// Default maximum wager.
pub const DEFAULT_MAX_BET: usize = 1000;

/// Configuration options for a blackjack table.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use bjcasino::GameOptions;
///
/// let options = GameOptions::default()
///     .with_blackjack_pays(1.5)
///     .with_dealer_hits_soft_17(true)
///     .with_bet_limits(10, 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameOptions {
    /// Natural payout ratio paid on top of the returned stake (typically 1.5).
    pub blackjack_pays: f64,
    /// Whether the dealer draws on soft 17.
    pub dealer_hits_soft_17: bool,
    /// Rounding mode for fractional natural payouts.
    pub rounding_blackjack: RoundingMode,
    /// Smallest wager the table accepts.
    pub min_bet: usize,
    /// Largest wager the table accepts.
    pub max_bet: usize,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            blackjack_pays: 1.5,
            dealer_hits_soft_17: true,
            rounding_blackjack: RoundingMode::Down,
            min_bet: DEFAULT_MIN_BET,
            max_bet: DEFAULT_MAX_BET,
        }
    }
}

impl GameOptions {
    /// Sets the natural payout ratio.
    ///
    /// # Example
    ///
    /// ```
    /// use bjcasino::GameOptions;
    ///
    /// let options = GameOptions::default().with_blackjack_pays(1.2);
    /// assert_eq!(options.blackjack_pays, 1.2);
    /// ```
    #[must_use]
    pub const fn with_blackjack_pays(mut self, ratio: f64) -> Self {
        self.blackjack_pays = ratio;
        self
    }

    /// Sets whether the dealer hits soft 17.
    ///
    /// # Example
    ///
    /// ```
    /// use bjcasino::GameOptions;
    ///
    /// let options = GameOptions::default().with_dealer_hits_soft_17(false);
    /// assert_eq!(options.dealer_hits_soft_17, false);
    /// ```
    #[must_use]
    pub const fn with_dealer_hits_soft_17(mut self, hits: bool) -> Self {
        self.dealer_hits_soft_17 = hits;
        self
    }

    /// Sets the rounding mode for natural payouts.
    ///
    /// # Example
    ///
    /// ```
    /// use bjcasino::{GameOptions, RoundingMode};
    ///
    /// let options = GameOptions::default().with_rounding_blackjack(RoundingMode::Up);
    /// assert_eq!(options.rounding_blackjack, RoundingMode::Up);
    /// ```
    #[must_use]
    pub const fn with_rounding_blackjack(mut self, mode: RoundingMode) -> Self {
        self.rounding_blackjack = mode;
        self
    }

    /// Sets the table limits.
    ///
    /// # Example
    ///
    /// ```
    /// use bjcasino::GameOptions;
    ///
    /// let options = GameOptions::default().with_bet_limits(1, 50);
    /// assert_eq!((options.min_bet, options.max_bet), (1, 50));
    /// ```
    #[must_use]
    pub const fn with_bet_limits(mut self, min: usize, max: usize) -> Self {
        self.min_bet = min;
        self.max_bet = max;
        self
    }
}
