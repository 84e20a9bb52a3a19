//! Conditional move generation.

use crate::context::Context;
use crate::functions::BoxBool;
use crate::game::Game;
use crate::ludeme::{Concept, ConceptSet, Ludeme};

use super::super::{
    then_child, then_concepts, BoxMoves, EmptyCursor, Moves, MovesCursor, MovesFunction, Then, ThenCursor,
};

/// The moves of `then_moves` if the condition holds, otherwise those of
/// `else_moves` (none when absent). The condition is evaluated once.
#[derive(Debug)]
pub struct If {
    condition: BoxBool,
    then_moves: BoxMoves,
    else_moves: Option<BoxMoves>,
    then: Option<Then>,
}

impl If {
    #[must_use]
    pub fn new(condition: BoxBool, then_moves: BoxMoves, else_moves: Option<BoxMoves>) -> Self {
        Self {
            condition,
            then_moves,
            else_moves,
            then: None,
        }
    }

    #[must_use]
    pub fn with_then(mut self, then: Then) -> Self {
        self.then = Some(then);
        self
    }

    fn branch(&self, context: &mut Context<'_>) -> Option<&BoxMoves> {
        if self.condition.eval(context) {
            Some(&self.then_moves)
        } else {
            self.else_moves.as_ref()
        }
    }
}

impl Ludeme for If {
    fn name(&self) -> &'static str {
        "If"
    }

    fn children(&self) -> Vec<&dyn Ludeme> {
        let mut children = vec![self.condition.as_ludeme(), self.then_moves.as_ludeme()];
        children.extend(self.else_moves.iter().map(|m| m.as_ludeme()));
        children.extend(then_child(self.then.as_ref()));
        children
    }

    fn is_static(&self) -> bool {
        false
    }

    fn preprocess(&mut self, game: &Game) {
        self.condition.preprocess(game);
        self.then_moves.preprocess(game);
        if let Some(else_moves) = &mut self.else_moves {
            else_moves.preprocess(game);
        }
        if let Some(then) = &mut self.then {
            then.preprocess(game);
        }
    }

    fn concepts_flat(&self, _game: &Game) -> ConceptSet {
        ConceptSet::of(Concept::ConditionalMoves) | then_concepts(self.then.as_ref())
    }
}

impl MovesFunction for If {
    fn eval(&self, context: &mut Context<'_>) -> Moves {
        let mut moves = match self.branch(context) {
            Some(branch) => branch.eval(context),
            None => Moves::new(),
        };
        moves.attach_then(self.then.as_ref());
        moves
    }

    fn cursor<'a>(&'a self, context: &mut Context<'_>) -> Box<dyn MovesCursor + 'a> {
        match self.branch(context) {
            Some(branch) => ThenCursor::wrap(branch.cursor(context), self.then.as_ref()),
            None => Box::new(EmptyCursor),
        }
    }

    fn then(&self) -> Option<&Then> {
        self.then.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BoardConfig, GameConfig, GameRng};
    use crate::functions::booleans::BooleanConstant;
    use crate::functions::ints::IntConstant;
    use crate::functions::regions::Sites;
    use crate::moves::{collect_moves, Add, Pass};

    fn test_game() -> Game {
        Game::from_config(GameConfig::new("t", 1, BoardConfig::square(2, 2)).with_player_pieces("Disc")).unwrap()
    }

    fn add(site: usize) -> BoxMoves {
        Box::new(Add::new(IntConstant::boxed(1), Box::new(Sites::constant(&[site]))))
    }

    #[test]
    fn test_if_dispatch() {
        let game = test_game();
        let mut context = Context::new(&game, GameRng::new(1));

        let yes = If::new(BooleanConstant::boxed(true), add(1), Some(add(2)));
        assert_eq!(yes.eval(&mut context), add(1).eval(&mut context));
        let no = If::new(BooleanConstant::boxed(false), add(1), Some(add(2)));
        assert_eq!(no.eval(&mut context), add(2).eval(&mut context));
        let none = If::new(BooleanConstant::boxed(false), add(1), None);
        assert!(none.eval(&mut context).is_empty());
        assert!(!none.can_move(&mut context));
    }

    #[test]
    fn test_if_cursor_attaches_then() {
        let game = test_game();
        let mut context = Context::new(&game, GameRng::new(1));
        let then = Then::new(Pass::new());
        let handle = then.consequence();
        let cond = If::new(BooleanConstant::boxed(true), add(3), None).with_then(then);

        let mut cursor = cond.cursor(&mut context);
        let moves = collect_moves(cursor.as_mut(), &mut context);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves.as_slice()[0].then(), [handle]);
    }
}
