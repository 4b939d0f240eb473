//! Configuration options for leaderboard building.
//!
//! [`LeaderboardOptions`] controls global behavior such as diacritics handling
//! and the minimum number of restaurants a same-named pizza comparison needs.

/// Smallest group size that still makes a cross-restaurant comparison.
pub const MIN_PARTICIPANTS: usize = 2;

/// Global options that control leaderboard building.
///
/// # Defaults
///
/// - `min_participants`: `2`
/// - `keep_diacritics`: `false` (diacritics are stripped from comparison keys)
///
/// # Examples
///
/// ```
/// use pizzaboard::LeaderboardOptions;
///
/// let opts = LeaderboardOptions::default();
/// assert_eq!(opts.min_participants, 2);
/// assert!(!opts.keep_diacritics);
///
/// let opts = LeaderboardOptions { min_participants: 3, ..Default::default() };
/// assert_eq!(opts.effective_min_participants(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardOptions {
    /// Minimum number of distinct restaurants a same-named pizza group must
    /// reach to produce a leaderboard. Values below [`MIN_PARTICIPANTS`] are
    /// treated as [`MIN_PARTICIPANTS`].
    pub min_participants: usize,

    /// When `true`, diacritics are preserved in pizza comparison keys. When
    /// `false` (default), they are stripped so that e.g. "jalapeno" matches
    /// "jalape\u{00f1}o". Display names are never altered.
    pub keep_diacritics: bool,
}

impl Default for LeaderboardOptions {
    fn default() -> Self {
        Self {
            min_participants: MIN_PARTICIPANTS,
            keep_diacritics: false,
        }
    }
}

impl LeaderboardOptions {
    /// The participant floor actually applied, never below [`MIN_PARTICIPANTS`].
    pub fn effective_min_participants(&self) -> usize {
        self.min_participants.max(MIN_PARTICIPANTS)
    }
}
