//! Collapsing a move list into one decision.

use crate::context::Context;
use crate::game::Game;
use crate::ludeme::{Concept, ConceptSet, Ludeme};

use super::super::{then_child, then_concepts, BoxMoves, Move, MoveSource, Moves, MovesFunction, Then};

/// One move holding the actions of every move of the operand, all marked
/// as decisions. The consequences of the operand's moves are kept in
/// order. No move if the operand has none.
#[derive(Debug)]
pub struct Append {
    operand: BoxMoves,
    then: Option<Then>,
}

impl Append {
    #[must_use]
    pub fn new(operand: BoxMoves) -> Self {
        Self {
            operand,
            then: None,
        }
    }

    #[must_use]
    pub fn with_then(mut self, then: Then) -> Self {
        self.then = Some(then);
        self
    }
}

impl Ludeme for Append {
    fn name(&self) -> &'static str {
        "Append"
    }

    fn children(&self) -> Vec<&dyn Ludeme> {
        let mut children = vec![self.operand.as_ludeme()];
        children.extend(then_child(self.then.as_ref()));
        children
    }

    fn is_static(&self) -> bool {
        false
    }

    fn preprocess(&mut self, game: &Game) {
        self.operand.preprocess(game);
        if let Some(then) = &mut self.then {
            then.preprocess(game);
        }
    }

    fn concepts_flat(&self, _game: &Game) -> ConceptSet {
        ConceptSet::of(Concept::AppendMoves) | then_concepts(self.then.as_ref())
    }
}

impl MovesFunction for Append {
    fn eval(&self, context: &mut Context<'_>) -> Moves {
        let moves = self.operand.eval(context);
        let (Some(first), Some(last)) = (moves.iter().next(), moves.iter().last()) else {
            return Moves::new();
        };

        let mut combined = Move::new(context.mover())
            .between(first.from(), last.to())
            .from_source(MoveSource::Append);
        for mut mv in moves {
            combined.extend_actions(mv.actions().iter().cloned());
            combined.extend_then(mv.take_then());
        }
        combined.mark_decisions();
        if let Some(then) = &self.then {
            combined.push_then(then.consequence());
        }
        Moves::from(vec![combined])
    }

    fn then(&self) -> Option<&Then> {
        self.then.as_ref()
    }
}
