//! Cross product of two move lists.

use crate::context::Context;
use crate::game::Game;
use crate::ludeme::{Concept, ConceptSet, Ludeme};

use super::super::{then_child, then_concepts, BoxMoves, Move, MoveSource, Moves, MovesFunction, Then};

/// One move per pair `(a, b)`: the actions of `a` followed by those of
/// `b`, from `a`'s origin to `b`'s destination.
///
/// Both operands are evaluated against the same context; `b` does not see
/// the effect of `a`.
#[derive(Debug)]
pub struct AllCombinations {
    a: BoxMoves,
    b: BoxMoves,
    then: Option<Then>,
}

impl AllCombinations {
    #[must_use]
    pub fn new(a: BoxMoves, b: BoxMoves) -> Self {
        Self { a, b, then: None }
    }

    #[must_use]
    pub fn with_then(mut self, then: Then) -> Self {
        self.then = Some(then);
        self
    }
}

impl Ludeme for AllCombinations {
    fn name(&self) -> &'static str {
        "AllCombinations"
    }

    fn children(&self) -> Vec<&dyn Ludeme> {
        let mut children = vec![self.a.as_ludeme(), self.b.as_ludeme()];
        children.extend(then_child(self.then.as_ref()));
        children
    }

    fn is_static(&self) -> bool {
        false
    }

    fn preprocess(&mut self, game: &Game) {
        self.a.preprocess(game);
        self.b.preprocess(game);
        if let Some(then) = &mut self.then {
            then.preprocess(game);
        }
    }

    fn concepts_flat(&self, _game: &Game) -> ConceptSet {
        ConceptSet::of(Concept::CombinationMoves) | then_concepts(self.then.as_ref())
    }
}

impl MovesFunction for AllCombinations {
    fn eval(&self, context: &mut Context<'_>) -> Moves {
        let first = self.a.eval(context);
        let second = self.b.eval(context);
        let mover = context.mover();

        let mut moves = Moves::with_capacity(first.len() * second.len());
        for a in &first {
            for b in &second {
                let mut combined = Move::new(mover)
                    .between(a.from(), b.to())
                    .from_source(MoveSource::Combination);
                combined.extend_actions(a.actions().iter().chain(b.actions()).cloned());
                combined.extend_then(a.then().iter().chain(b.then()).cloned());
                moves.push(combined);
            }
        }
        moves.attach_then(self.then.as_ref());
        moves
    }

    fn then(&self) -> Option<&Then> {
        self.then.as_ref()
    }
}
