//! Moves that touch no site.

use crate::context::Context;
use crate::game::Game;
use crate::ludeme::{Concept, ConceptSet, GameFlags, Ludeme, Report};

use super::super::{then_child, then_concepts, Action, ActionKind, Move, Moves, MovesFunction, Then};

/// The pass move.
#[derive(Debug, Default)]
pub struct Pass {
    then: Option<Then>,
}

impl Pass {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_then(mut self, then: Then) -> Self {
        self.then = Some(then);
        self
    }
}

impl Ludeme for Pass {
    fn name(&self) -> &'static str {
        "Pass"
    }

    fn children(&self) -> Vec<&dyn Ludeme> {
        then_child(self.then.as_ref()).into_iter().collect()
    }

    fn is_static(&self) -> bool {
        false
    }

    fn preprocess(&mut self, game: &Game) {
        if let Some(then) = &mut self.then {
            then.preprocess(game);
        }
    }

    fn concepts_flat(&self, _game: &Game) -> ConceptSet {
        ConceptSet::of(Concept::PassDecision) | then_concepts(self.then.as_ref())
    }
}

impl MovesFunction for Pass {
    fn eval(&self, context: &mut Context<'_>) -> Moves {
        let mut moves = Moves::from(vec![Move::pass(context.mover())]);
        moves.attach_then(self.then.as_ref());
        moves
    }

    fn then(&self) -> Option<&Then> {
        self.then.as_ref()
    }
}

/// Roll every die.
#[derive(Debug, Default)]
pub struct Roll {
    then: Option<Then>,
}

impl Roll {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_then(mut self, then: Then) -> Self {
        self.then = Some(then);
        self
    }
}

impl Ludeme for Roll {
    fn name(&self) -> &'static str {
        "Roll"
    }

    fn children(&self) -> Vec<&dyn Ludeme> {
        then_child(self.then.as_ref()).into_iter().collect()
    }

    fn is_static(&self) -> bool {
        false
    }

    fn preprocess(&mut self, game: &Game) {
        if let Some(then) = &mut self.then {
            then.preprocess(game);
        }
    }

    fn game_flags_flat(&self, _game: &Game) -> GameFlags {
        GameFlags::STOCHASTIC
    }

    fn concepts_flat(&self, _game: &Game) -> ConceptSet {
        ConceptSet::of(Concept::Dice) | then_concepts(self.then.as_ref())
    }

    fn check_requirements(&self, game: &Game, report: &mut Report) -> bool {
        if !game.has_dice() {
            report.add_error(self.name(), "game has no dice");
            return true;
        }
        false
    }
}

impl MovesFunction for Roll {
    fn eval(&self, context: &mut Context<'_>) -> Moves {
        let mut moves = Moves::from(vec![Move::with_action(
            context.mover(),
            Action::decision(ActionKind::Roll),
        )]);
        moves.attach_then(self.then.as_ref());
        moves
    }

    fn then(&self) -> Option<&Then> {
        self.then.as_ref()
    }
}
