//! Move-at-a-time iteration over a moves subtree.

use crate::context::Context;

use super::{Move, Moves, Then};

/// Produces the moves of a subtree one at a time.
///
/// The context is passed to every step; a cursor must not rely on
/// registers it did not set itself.
pub trait MovesCursor {
    fn next_move(&mut self, context: &mut Context<'_>) -> Option<Move>;
}

/// Hands out an already computed list.
#[derive(Debug)]
pub struct MaterializedCursor {
    moves: std::vec::IntoIter<Move>,
}

impl MaterializedCursor {
    #[must_use]
    pub fn new(moves: Moves) -> Self {
        Self {
            moves: moves.into_vec().into_iter(),
        }
    }
}

impl MovesCursor for MaterializedCursor {
    fn next_move(&mut self, _context: &mut Context<'_>) -> Option<Move> {
        self.moves.next()
    }
}

/// Produces nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyCursor;

impl MovesCursor for EmptyCursor {
    fn next_move(&mut self, _context: &mut Context<'_>) -> Option<Move> {
        None
    }
}

/// Attaches a consequence to every move of an inner cursor.
pub struct ThenCursor<'a> {
    inner: Box<dyn MovesCursor + 'a>,
    then: Option<&'a Then>,
}

impl<'a> ThenCursor<'a> {
    #[must_use]
    pub fn new(inner: Box<dyn MovesCursor + 'a>, then: Option<&'a Then>) -> Self {
        Self { inner, then }
    }

    /// Skip the wrapper when there is nothing to attach.
    #[must_use]
    pub fn wrap(inner: Box<dyn MovesCursor + 'a>, then: Option<&'a Then>) -> Box<dyn MovesCursor + 'a> {
        match then {
            Some(_) => Box::new(Self::new(inner, then)),
            None => inner,
        }
    }
}

impl MovesCursor for ThenCursor<'_> {
    fn next_move(&mut self, context: &mut Context<'_>) -> Option<Move> {
        let mut mv = self.inner.next_move(context)?;
        if let Some(then) = self.then {
            mv.push_then(then.consequence());
        }
        Some(mv)
    }
}

/// Drain a cursor into a list.
pub fn collect_moves(cursor: &mut dyn MovesCursor, context: &mut Context<'_>) -> Moves {
    let mut moves = Moves::new();
    while let Some(mv) = cursor.next_move(context) {
        moves.push(mv);
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BoardConfig, GameConfig, GameRng, PlayerId};
    use crate::game::Game;
    use crate::moves::Pass;

    #[test]
    fn test_materialized_and_then_cursors() {
        let game = Game::from_config(GameConfig::new("t", 1, BoardConfig::square(1, 1))).unwrap();
        let mut context = Context::new(&game, GameRng::new(1));
        let moves: Moves = (0..3).map(|_| Move::pass(PlayerId::new(1))).collect();
        let then = Then::new(Pass::new());

        let mut cursor = ThenCursor::wrap(Box::new(MaterializedCursor::new(moves)), Some(&then));
        let drained = collect_moves(cursor.as_mut(), &mut context);

        assert_eq!(drained.len(), 3);
        assert!(drained.iter().all(|m| m.then() == [then.consequence()]));
        assert!(EmptyCursor.next_move(&mut context).is_none());
    }
}
