//! Consequences attached to moves.

use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::game::Game;

use super::{BoxMoves, MovesFunction};

/// A moves subtree evaluated after a move is applied, with From and To set
/// to the move's sites.
///
/// The node carrying a `Then` owns it outright, so `preprocess` can fold
/// the subtree. Generated moves hold `Consequence` handles instead.
pub struct Then {
    moves: Arc<dyn MovesFunction>,
}

impl Then {
    #[must_use]
    pub fn new(moves: impl MovesFunction + 'static) -> Self {
        Self {
            moves: Arc::new(moves),
        }
    }

    #[must_use]
    pub fn from_boxed(moves: BoxMoves) -> Self {
        Self {
            moves: Arc::from(moves),
        }
    }

    /// The consequence subtree.
    #[must_use]
    pub fn moves(&self) -> &dyn MovesFunction {
        self.moves.as_ref()
    }

    /// A handle for a generated move.
    #[must_use]
    pub fn consequence(&self) -> Consequence {
        Consequence {
            moves: Arc::clone(&self.moves),
        }
    }

    /// Preprocess the subtree.
    ///
    /// Moves generated before compilation keep their handles alive; the
    /// subtree is then left unfolded.
    pub(crate) fn preprocess(&mut self, game: &Game) {
        match Arc::get_mut(&mut self.moves) {
            Some(moves) => moves.preprocess(game),
            None => warn!(
                ludeme = self.moves.name(),
                handles = Arc::strong_count(&self.moves) - 1,
                "consequence held by generated moves, skipping preprocess"
            ),
        }
    }
}

impl fmt::Debug for Then {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Then").field(&self.moves.name()).finish()
    }
}

/// A consequence carried by a generated move.
///
/// Two handles are equal when they come from the same `Then`.
#[derive(Clone)]
pub struct Consequence {
    moves: Arc<dyn MovesFunction>,
}

impl Consequence {
    /// The consequence subtree.
    #[must_use]
    pub fn moves(&self) -> &dyn MovesFunction {
        self.moves.as_ref()
    }
}

impl PartialEq for Consequence {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.moves, &other.moves)
    }
}

impl fmt::Debug for Consequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Consequence").field(&self.moves.name()).finish()
    }
}
