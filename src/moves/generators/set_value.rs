//! Changing the value of a piece in place.

use crate::board::SiteType;
use crate::context::Context;
use crate::functions::{site_index, site_type_or_default, BoxInt};
use crate::game::Game;
use crate::ludeme::{Concept, ConceptSet, GameFlags, Ludeme};

use super::super::{then_child, then_concepts, Action, ActionKind, Move, Moves, MovesFunction, Then};

/// Set the value of the top piece on a site. No move if the site is off
/// the board or empty.
#[derive(Debug)]
pub struct SetValue {
    site: BoxInt,
    value: BoxInt,
    site_type: Option<SiteType>,
    then: Option<Then>,
}

impl SetValue {
    #[must_use]
    pub fn new(site: BoxInt, value: BoxInt) -> Self {
        Self {
            site,
            value,
            site_type: None,
            then: None,
        }
    }

    #[must_use]
    pub fn on(mut self, site_type: SiteType) -> Self {
        self.site_type = Some(site_type);
        self
    }

    #[must_use]
    pub fn with_then(mut self, then: Then) -> Self {
        self.then = Some(then);
        self
    }
}

impl Ludeme for SetValue {
    fn name(&self) -> &'static str {
        "SetValue"
    }

    fn children(&self) -> Vec<&dyn Ludeme> {
        let mut children = vec![self.site.as_ludeme(), self.value.as_ludeme()];
        children.extend(then_child(self.then.as_ref()));
        children
    }

    fn is_static(&self) -> bool {
        false
    }

    fn preprocess(&mut self, game: &Game) {
        self.site.preprocess(game);
        self.value.preprocess(game);
        if let Some(then) = &mut self.then {
            then.preprocess(game);
        }
    }

    fn game_flags_flat(&self, _game: &Game) -> GameFlags {
        GameFlags::PIECE_VALUE
    }

    fn concepts_flat(&self, _game: &Game) -> ConceptSet {
        ConceptSet::of(Concept::SetValue) | then_concepts(self.then.as_ref())
    }
}

impl MovesFunction for SetValue {
    fn eval(&self, context: &mut Context<'_>) -> Moves {
        let site_type = site_type_or_default(self.site_type, context);
        let at = self.site.eval(context);
        let value = self.value.eval(context);
        let mut moves = Moves::new();
        if let Some(site) = site_index(context, site_type, at).filter(|&s| !context.board().is_empty(site_type, s)) {
            let action = Action::decision(ActionKind::SetValue { site_type, site, value });
            moves.push(Move::with_action(context.mover(), action).between(at, at));
        }
        moves.attach_then(self.then.as_ref());
        moves
    }

    fn then(&self) -> Option<&Then> {
        self.then.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BoardConfig, GameConfig, GameRng, PlayerId};
    use crate::functions::ints::IntConstant;
    use crate::game::Piece;

    #[test]
    fn test_set_value_needs_a_piece() {
        let game = Game::from_config(GameConfig::new("t", 1, BoardConfig::square(1, 2)).with_player_pieces("Disc")).unwrap();
        let mut context = Context::new(&game, GameRng::new(1));
        context.state_mut().board_mut().push(SiteType::Cell, 1, Piece::new(1, PlayerId::new(1)));

        let set = |site| SetValue::new(IntConstant::boxed(site), IntConstant::boxed(4));
        assert!(set(0).eval(&mut context).is_empty());
        assert!(set(5).eval(&mut context).is_empty());

        let moves = set(1).eval(&mut context);
        assert_eq!(moves.len(), 1);
        assert_eq!(
            moves.as_slice()[0].actions()[0].kind,
            ActionKind::SetValue {
                site_type: SiteType::Cell,
                site: 1,
                value: 4,
            }
        );
    }
}
