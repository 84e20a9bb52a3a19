//! Moving a piece from one site to another.

use tracing::trace;

use crate::board::SiteType;
use crate::context::{Context, ContextRegister, RegisterSet};
use crate::functions::{site_type_or_default, BoxBool, BoxRegion};
use crate::game::Game;
use crate::ludeme::{Concept, ConceptSet, GameFlags, Ludeme};

use super::super::{then_child, then_concepts, Action, ActionKind, Move, Moves, MovesFunction, Then};

const WRITES: RegisterSet = RegisterSet::of(ContextRegister::From).with(ContextRegister::To);

/// Move the top piece of an occupied `from` site to each `to` site.
///
/// For each origin the From register is set before `to` is evaluated, so
/// the destination region can depend on it; To is set before the
/// condition is checked. Both registers are restored afterwards.
#[derive(Debug)]
pub struct FromTo {
    from: BoxRegion,
    to: BoxRegion,
    condition: Option<BoxBool>,
    site_type: Option<SiteType>,
    then: Option<Then>,
}

impl FromTo {
    #[must_use]
    pub fn new(from: BoxRegion, to: BoxRegion) -> Self {
        Self {
            from,
            to,
            condition: None,
            site_type: None,
            then: None,
        }
    }

    /// Only keep moves for which `condition` holds.
    #[must_use]
    pub fn when(mut self, condition: BoxBool) -> Self {
        self.condition = Some(condition);
        self
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

    fn generate(&self, context: &mut Context<'_>, site_type: SiteType, moves: &mut Moves) {
        let origins = self.from.eval(context);
        for from in origins.iter() {
            if context.board().is_empty(site_type, from) {
                continue;
            }
            let Ok(from_value) = i32::try_from(from) else {
                continue;
            };
            context.set_from(from_value);
            let targets = self.to.eval(context);
            trace!(from, targets = targets.len(), "from-to origin");

            for to in targets.iter().filter(|&to| to != from) {
                let Ok(to_value) = i32::try_from(to) else {
                    continue;
                };
                context.set_to(to_value);
                if self.condition.as_ref().map_or(true, |c| c.eval(context)) {
                    let action = Action::decision(ActionKind::Move { site_type, from, to });
                    moves.push(Move::with_action(context.mover(), action).between(from_value, to_value));
                }
            }
        }
    }
}

impl Ludeme for FromTo {
    fn name(&self) -> &'static str {
        "FromTo"
    }

    fn children(&self) -> Vec<&dyn Ludeme> {
        let mut children = vec![self.from.as_ludeme(), self.to.as_ludeme()];
        children.extend(self.condition.iter().map(|c| c.as_ludeme()));
        children.extend(then_child(self.then.as_ref()));
        children
    }

    fn is_static(&self) -> bool {
        false
    }

    fn preprocess(&mut self, game: &Game) {
        self.from.preprocess(game);
        self.to.preprocess(game);
        if let Some(condition) = &mut self.condition {
            condition.preprocess(game);
        }
        if let Some(then) = &mut self.then {
            then.preprocess(game);
        }
    }

    fn game_flags_flat(&self, game: &Game) -> GameFlags {
        GameFlags::for_site_type(self.site_type.unwrap_or_else(|| game.default_site_type()))
            | GameFlags::USES_FROM_POSITIONS
    }

    fn concepts_flat(&self, _game: &Game) -> ConceptSet {
        ConceptSet::of(Concept::FromToDecision) | then_concepts(self.then.as_ref())
    }

    fn writes_context_flat(&self) -> RegisterSet {
        WRITES
    }
}

impl MovesFunction for FromTo {
    fn eval(&self, context: &mut Context<'_>) -> Moves {
        let site_type = site_type_or_default(self.site_type, context);
        let mut moves = Moves::new();
        context.with_saved_registers(WRITES, |context| self.generate(context, site_type, &mut moves));
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
    use crate::functions::booleans::IsEmpty;
    use crate::functions::ints::{IntConstant, To};
    use crate::functions::regions::{SitesBoard, SitesOccupied};
    use crate::game::Piece;

    // 2 3
    // 0 1

    #[test]
    fn test_from_to_cross_product() {
        let game = Game::from_config(GameConfig::new("t", 2, BoardConfig::square(2, 2)).with_player_pieces("Disc")).unwrap();
        let mut context = Context::new(&game, GameRng::new(1));
        let board = context.state_mut().board_mut();
        board.push(SiteType::Cell, 0, Piece::new(1, PlayerId::new(1)));
        board.push(SiteType::Cell, 3, Piece::new(2, PlayerId::new(2)));
        context.set_to(11);

        let slide = FromTo::new(Box::new(SitesOccupied::by(IntConstant::boxed(1))), Box::new(SitesBoard::new()));
        let moves = slide.eval(&mut context);
        let pairs: Vec<(i32, i32)> = moves.iter().map(|m| (m.from(), m.to())).collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (0, 3)]);
        assert_eq!(context.to(), 11);

        let quiet = FromTo::new(Box::new(SitesOccupied::by(IntConstant::boxed(1))), Box::new(SitesBoard::new()))
            .when(Box::new(IsEmpty::new(Box::new(To))));
        assert_eq!(quiet.eval(&mut context).len(), 2);
    }

    #[test]
    fn test_from_to_declares_writes() {
        let slide = FromTo::new(Box::new(SitesBoard::new()), Box::new(SitesBoard::new()));
        assert_eq!(slide.writes_context(), WRITES);
        assert!(slide.reads_context().is_empty());
    }
}
