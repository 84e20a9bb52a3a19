//! Concatenation of moves subtrees.

use tracing::trace;

use crate::context::Context;
use crate::core::{BuildError, BuildResult};
use crate::game::Game;
use crate::ludeme::{Concept, ConceptSet, Ludeme};

use super::super::{then_child, then_concepts, BoxMoves, Move, Moves, MovesCursor, MovesFunction, Then};

/// Every move of every operand, operand by operand. Duplicates are kept.
#[derive(Debug)]
pub struct And {
    operands: Vec<BoxMoves>,
    then: Option<Then>,
}

impl And {
    #[must_use]
    pub fn new(a: BoxMoves, b: BoxMoves) -> Self {
        Self {
            operands: vec![a, b],
            then: None,
        }
    }

    pub fn all(operands: Vec<BoxMoves>) -> BuildResult<Self> {
        if operands.is_empty() {
            return Err(BuildError::TooFewOperands {
                ludeme: "And",
                min: 1,
                got: 0,
            });
        }
        Ok(Self {
            operands,
            then: None,
        })
    }

    #[must_use]
    pub fn with_then(mut self, then: Then) -> Self {
        self.then = Some(then);
        self
    }
}

impl Ludeme for And {
    fn name(&self) -> &'static str {
        "And"
    }

    fn children(&self) -> Vec<&dyn Ludeme> {
        let mut children: Vec<&dyn Ludeme> = self.operands.iter().map(|o| o.as_ludeme()).collect();
        children.extend(then_child(self.then.as_ref()));
        children
    }

    fn is_static(&self) -> bool {
        false
    }

    fn preprocess(&mut self, game: &Game) {
        for operand in &mut self.operands {
            operand.preprocess(game);
        }
        if let Some(then) = &mut self.then {
            then.preprocess(game);
        }
    }

    fn concepts_flat(&self, _game: &Game) -> ConceptSet {
        ConceptSet::of(Concept::Conjunction) | then_concepts(self.then.as_ref())
    }
}

impl MovesFunction for And {
    fn eval(&self, context: &mut Context<'_>) -> Moves {
        let mut moves = Moves::new();
        for operand in &self.operands {
            let produced = operand.eval(context);
            trace!(ludeme = operand.name(), count = produced.len(), "and operand");
            moves.append(produced);
        }
        moves.attach_then(self.then.as_ref());
        moves
    }

    fn cursor<'a>(&'a self, _context: &mut Context<'_>) -> Box<dyn MovesCursor + 'a> {
        Box::new(AndCursor {
            and: self,
            next_operand: 0,
            current: None,
        })
    }

    fn then(&self) -> Option<&Then> {
        self.then.as_ref()
    }
}

/// Opens one operand cursor at a time and moves on when it runs dry.
struct AndCursor<'a> {
    and: &'a And,
    next_operand: usize,
    current: Option<Box<dyn MovesCursor + 'a>>,
}

impl MovesCursor for AndCursor<'_> {
    fn next_move(&mut self, context: &mut Context<'_>) -> Option<Move> {
        loop {
            if let Some(cursor) = &mut self.current {
                if let Some(mut mv) = cursor.next_move(context) {
                    if let Some(then) = &self.and.then {
                        mv.push_then(then.consequence());
                    }
                    return Some(mv);
                }
                self.current = None;
            }
            let operand = self.and.operands.get(self.next_operand)?;
            self.next_operand += 1;
            self.current = Some(operand.cursor(context));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BoardConfig, GameConfig, GameRng};
    use crate::functions::ints::IntConstant;
    use crate::functions::regions::Sites;
    use crate::moves::{collect_moves, Add, Pass};

    fn test_game() -> Game {
        Game::from_config(GameConfig::new("t", 1, BoardConfig::square(2, 2)).with_player_pieces("Disc")).unwrap()
    }

    fn add(sites: &[usize]) -> BoxMoves {
        Box::new(Add::new(IntConstant::boxed(1), Box::new(Sites::constant(sites))))
    }

    #[test]
    fn test_and_concatenates_in_order() {
        let game = test_game();
        let mut context = Context::new(&game, GameRng::new(1));
        let and = And::all(vec![add(&[2, 0]), add(&[]), add(&[0, 3])]).unwrap();

        let moves = and.eval(&mut context);
        assert_eq!(moves.iter().map(Move::to).collect::<Vec<_>>(), vec![2, 0, 0, 3]);
        assert!(And::all(Vec::new()).is_err());
    }

    #[test]
    fn test_and_cursor_matches_eval() {
        let game = test_game();
        let mut context = Context::new(&game, GameRng::new(1));
        let then = Then::new(Pass::new());
        let handle = then.consequence();
        let and = And::all(vec![add(&[]), add(&[1]), add(&[]), add(&[3, 2])])
            .unwrap()
            .with_then(then);

        let mut cursor = and.cursor(&mut context);
        let lazy = collect_moves(cursor.as_mut(), &mut context);
        assert_eq!(lazy, and.eval(&mut context));
        assert_eq!(lazy.len(), 3);
        assert!(lazy.iter().all(|m| m.then() == [handle.clone()]));
    }
}
