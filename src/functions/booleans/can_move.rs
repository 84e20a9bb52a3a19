//! Legality check over a moves subtree.

use crate::context::Context;
use crate::game::Game;
use crate::ludeme::{Concept, ConceptSet, Ludeme};
use crate::moves::BoxMoves;

use super::super::BooleanFunction;

/// True when the wrapped generator produces at least one move.
///
/// Pulls moves through the lazy cursor and stops at the first one, so a
/// large `And` is not materialized to answer a yes/no question.
#[derive(Debug)]
pub struct CanMove {
    moves: BoxMoves,
}

impl CanMove {
    #[must_use]
    pub fn new(moves: BoxMoves) -> Self {
        Self { moves }
    }
}

impl Ludeme for CanMove {
    fn name(&self) -> &'static str {
        "CanMove"
    }

    fn children(&self) -> Vec<&dyn Ludeme> {
        vec![self.moves.as_ludeme()]
    }

    fn is_static(&self) -> bool {
        false
    }

    fn preprocess(&mut self, game: &Game) {
        self.moves.preprocess(game);
    }

    fn concepts_flat(&self, _game: &Game) -> ConceptSet {
        ConceptSet::of(Concept::CanMove)
    }
}

impl BooleanFunction for CanMove {
    fn eval(&self, context: &mut Context<'_>) -> bool {
        self.moves.can_move(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BoardConfig, GameConfig, GameRng, PlayerId};
    use crate::functions::ints::IntConstant;
    use crate::functions::regions::{Sites, SitesEmpty};
    use crate::game::Piece;
    use crate::moves::{Add, And};

    fn test_game() -> Game {
        Game::from_config(GameConfig::new("t", 2, BoardConfig::square(1, 2)).with_player_pieces("Disc")).unwrap()
    }

    #[test]
    fn test_can_move_tracks_board() {
        let game = test_game();
        let mut context = Context::new(&game, GameRng::new(1));
        let can_place = CanMove::new(Box::new(Add::new(IntConstant::boxed(1), Box::new(SitesEmpty::board()))));

        assert!(can_place.eval(&mut context));
        let board = context.state_mut().board_mut();
        board.push(crate::board::SiteType::Cell, 0, Piece::new(1, PlayerId::new(1)));
        board.push(crate::board::SiteType::Cell, 1, Piece::new(1, PlayerId::new(1)));
        assert!(!can_place.eval(&mut context));
    }

    #[test]
    fn test_can_move_through_and() {
        let game = test_game();
        let mut context = Context::new(&game, GameRng::new(1));
        let nowhere = || Box::new(Add::new(IntConstant::boxed(1), Box::new(Sites::constant(&[])))) as BoxMoves;
        let somewhere = Box::new(Add::new(IntConstant::boxed(1), Box::new(Sites::constant(&[1]))));

        assert!(!CanMove::new(Box::new(And::new(nowhere(), nowhere()))).eval(&mut context));
        assert!(CanMove::new(Box::new(And::new(nowhere(), somewhere))).eval(&mut context));
    }
}
