//! Player identification.
//!
//! ## PlayerId
//!
//! Players are numbered from 1. Index 0 is reserved for the neutral
//! owner: pieces nobody owns, empty sites, and the "no player" result of
//! ownership queries.

use serde::{Deserialize, Serialize};

/// Player identifier supporting 1-255 players plus the neutral owner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// The neutral owner (no player).
    pub const NEUTRAL: PlayerId = PlayerId(0);

    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (1-based, 0 = neutral).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check whether this is the neutral owner.
    #[must_use]
    pub const fn is_neutral(self) -> bool {
        self.0 == 0
    }

    /// The player moving after this one in a game with `player_count` players.
    ///
    /// The neutral owner is followed by player 1.
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        if player_count == 0 || self.index() >= player_count {
            return PlayerId(1);
        }
        PlayerId(self.0 + 1)
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use rust_ludeme::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(players, vec![PlayerId::new(1), PlayerId::new(2), PlayerId::new(3)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (1..=player_count as u8).map(PlayerId)
    }
}

impl From<PlayerId> for i32 {
    fn from(player: PlayerId) -> Self {
        i32::from(player.0)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_neutral() {
            write!(f, "Neutral")
        } else {
            write!(f, "Player {}", self.0)
        }
    }
}
