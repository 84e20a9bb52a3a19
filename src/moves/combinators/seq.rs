//! Sequential composition in a scratch copy of the context.

use tracing::trace;

use crate::context::Context;
use crate::core::{BuildError, BuildResult, UNDEFINED};
use crate::game::Game;
use crate::ludeme::{Concept, ConceptSet, GameFlags, Ludeme};

use super::super::{apply, then_child, then_concepts, BoxMoves, Move, MoveSource, Moves, MovesFunction, Then};

/// Run the operands one after the other as if each generated move were
/// played, and return everything that happened as one compound move.
///
/// Work happens in a temporary copy of the context: each operand sees the
/// state left by the moves before it, and the caller's context is not
/// touched. The compound move runs from the first generated move's origin
/// to the last one's destination. No moves at all gives an empty list.
#[derive(Debug)]
pub struct Seq {
    operands: Vec<BoxMoves>,
    then: Option<Then>,
}

impl Seq {
    pub fn new(operands: Vec<BoxMoves>) -> BuildResult<Self> {
        if operands.is_empty() {
            return Err(BuildError::TooFewOperands {
                ludeme: "Seq",
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
    pub fn pair(first: BoxMoves, second: BoxMoves) -> Self {
        Self {
            operands: vec![first, second],
            then: None,
        }
    }

    #[must_use]
    pub fn with_then(mut self, then: Then) -> Self {
        self.then = Some(then);
        self
    }
}

impl Ludeme for Seq {
    fn name(&self) -> &'static str {
        "Seq"
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

    fn game_flags_flat(&self, _game: &Game) -> GameFlags {
        GameFlags::SEQUENCE
    }

    fn concepts_flat(&self, _game: &Game) -> ConceptSet {
        ConceptSet::of(Concept::MoveSequence) | then_concepts(self.then.as_ref())
    }
}

impl MovesFunction for Seq {
    fn eval(&self, context: &mut Context<'_>) -> Moves {
        let mut temp = context.temp();
        let mut compound = Move::new(context.mover()).from_source(MoveSource::Sequence);
        let mut from = None;
        let mut to = UNDEFINED;

        for operand in &self.operands {
            let generated = operand.eval(&mut temp);
            trace!(ludeme = operand.name(), count = generated.len(), "sequence step");
            for mv in &generated {
                let applied = apply(&mut temp, mv);
                compound.extend_actions(applied.actions().iter().cloned());
                from.get_or_insert(mv.from());
                to = mv.to();
            }
        }
        context.merge_read_trace(&temp);

        if compound.actions().is_empty() {
            return Moves::new();
        }
        compound.set_sites(from.unwrap_or(UNDEFINED), to);
        if let Some(then) = &self.then {
            compound.push_then(then.consequence());
        }
        Moves::from(vec![compound])
    }

    fn then(&self) -> Option<&Then> {
        self.then.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::SiteType;
    use crate::core::{BoardConfig, GameConfig, GameRng};
    use crate::context::{ContextRegister, RegisterSet};
    use crate::functions::booleans::{Equals, IsEmpty, Not};
    use crate::functions::ints::{IntConstant, Site};
    use crate::functions::regions::Sites;
    use crate::moves::{ActionKind, Add, If};

    fn test_game() -> Game {
        Game::from_config(GameConfig::new("t", 1, BoardConfig::square(1, 2)).with_player_pieces("Disc")).unwrap()
    }

    fn add(site: usize) -> BoxMoves {
        Box::new(Add::new(IntConstant::boxed(1), Box::new(Sites::constant(&[site]))))
    }

    #[test]
    fn test_seq_sees_earlier_moves() {
        let game = test_game();
        let mut context = Context::new(&game, GameRng::new(1));
        // The second step is only legal once site 0 is filled.
        let second = Box::new(If::new(
            Box::new(Not::new(Box::new(IsEmpty::new(IntConstant::boxed(0))))),
            add(1),
            None,
        ));
        let seq = Seq::pair(add(0), second);

        let moves = seq.eval(&mut context);
        assert_eq!(moves.len(), 1);
        let compound = &moves.as_slice()[0];
        assert_eq!(compound.actions().len(), 2);
        assert_eq!(compound.source(), Some(MoveSource::Sequence));
        assert_eq!((compound.from(), compound.to()), (0, 1));
        assert!(matches!(compound.actions()[1].kind, ActionKind::Add { site: 1, .. }));

        // The caller's state is untouched.
        assert!(context.board().is_empty(SiteType::Cell, 0));
        assert_eq!(context.state().last_to(), UNDEFINED);
    }

    #[test]
    fn test_seq_without_moves() {
        let game = test_game();
        let mut context = Context::new(&game, GameRng::new(1));
        context.state_mut().board_mut().push(SiteType::Cell, 0, crate::game::Piece::new(1, crate::core::PlayerId::new(1)));

        assert!(Seq::new(vec![add(0)]).unwrap().eval(&mut context).is_empty());
        assert!(Seq::new(Vec::new()).is_err());
        assert!(!Seq::pair(add(0), add(0)).is_static());
    }

    #[test]
    fn test_seq_reports_operand_reads() {
        let game = test_game();
        let mut context = Context::new(&game, GameRng::new(1));
        let guarded = Box::new(If::new(
            Box::new(Equals::new(Box::new(Site), IntConstant::boxed(UNDEFINED))),
            add(0),
            None,
        ));
        let seq = Seq::new(vec![guarded]).unwrap();

        assert_eq!(seq.eval(&mut context).len(), 1);
        let trace = context.take_read_trace();
        assert!(trace.contains(ContextRegister::Site));
        assert!(trace.is_subset(seq.reads_context()));
        assert_eq!(trace, RegisterSet::of(ContextRegister::Site));
    }
}
