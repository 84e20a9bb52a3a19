//! Move generation.
//!
//! `MovesFunction` is the fifth node family: its `eval` produces the list
//! of legal moves for the current context. Generators (`Add`, `FromTo`,
//! `ForEach`, ...) build moves from regions and registers; combinators
//! (`And`, `If`, `Seq`, `Append`, `AllCombinations`) compose other moves
//! subtrees.
//!
//! ## Cursors
//!
//! `cursor` walks the same moves one at a time. Most nodes materialize
//! their list and hand it out; `And`, `If` and `Add` produce moves on
//! demand so that `can_move` stops at the first legal move.
//!
//! ## Consequences
//!
//! Any moves node can carry a `Then`, which it owns. Generated moves keep
//! a `Consequence` handle to it in their chain and `apply` evaluates the
//! chain after the move's own actions.

mod action;
mod apply;
mod combinators;
mod cursor;
mod game_move;
mod generators;
mod then;

use crate::context::Context;
use crate::ludeme::{AsLudeme, Concept, ConceptSet, Ludeme};

pub use action::{Action, ActionKind};
pub use apply::apply;
pub use combinators::{AllCombinations, And, Append, If, Seq};
pub use cursor::{collect_moves, EmptyCursor, MaterializedCursor, MovesCursor, ThenCursor};
pub use game_move::{Move, MoveSource, Moves};
pub use generators::{Add, ForEach, FromTo, Pass, Remove, Roll, SetValue};
pub use then::{Consequence, Then};

/// A node evaluating to a list of moves.
pub trait MovesFunction: Ludeme + AsLudeme {
    /// All legal moves, in generation order.
    fn eval(&self, context: &mut Context<'_>) -> Moves;

    /// Walk the legal moves one at a time.
    ///
    /// The default materializes `eval`.
    fn cursor<'a>(&'a self, context: &mut Context<'_>) -> Box<dyn MovesCursor + 'a> {
        Box::new(MaterializedCursor::new(self.eval(context)))
    }

    /// True if at least one move is legal.
    fn can_move(&self, context: &mut Context<'_>) -> bool {
        let mut cursor = self.cursor(context);
        cursor.next_move(context).is_some()
    }

    /// Consequence attached to every generated move.
    fn then(&self) -> Option<&Then> {
        None
    }
}

pub type BoxMoves = Box<dyn MovesFunction>;

/// The consequence subtree as a child, if any.
pub(crate) fn then_child(then: Option<&Then>) -> Option<&dyn Ludeme> {
    then.map(|t| t.moves().as_ludeme())
}

/// `ThenConsequence` if a consequence is attached.
pub(crate) fn then_concepts(then: Option<&Then>) -> ConceptSet {
    if then.is_some() {
        ConceptSet::of(Concept::ThenConsequence)
    } else {
        ConceptSet::EMPTY
    }
}
