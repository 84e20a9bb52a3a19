//! Predicates on a single value or site.

use crate::board::SiteType;
use crate::context::Context;
use crate::game::Game;
use crate::ludeme::{Concept, ConceptSet, GameFlags, Ludeme, Report};

use super::super::{ints::To, precompute, site_index, site_type_or_default, BoxInt, BooleanFunction};

/// True for odd values.
#[derive(Debug)]
pub struct IsOdd {
    value: BoxInt,
    precomputed: Option<bool>,
}

impl IsOdd {
    #[must_use]
    pub fn new(value: BoxInt) -> Self {
        Self {
            value,
            precomputed: None,
        }
    }

    fn compute(&self, context: &mut Context<'_>) -> bool {
        self.value.eval(context) % 2 != 0
    }
}

impl Ludeme for IsOdd {
    fn name(&self) -> &'static str {
        "IsOdd"
    }

    fn children(&self) -> Vec<&dyn Ludeme> {
        vec![self.value.as_ludeme()]
    }

    fn preprocess(&mut self, game: &Game) {
        self.value.preprocess(game);
        let value = precompute(self.is_static(), game, |context| self.compute(context));
        self.precomputed = value;
    }

    fn concepts_flat(&self, _game: &Game) -> ConceptSet {
        ConceptSet::of(Concept::Parity)
    }
}

impl BooleanFunction for IsOdd {
    fn eval(&self, context: &mut Context<'_>) -> bool {
        self.precomputed.unwrap_or_else(|| self.compute(context))
    }
}

/// True when a site holds no piece. Off-board sites are not empty.
#[derive(Debug)]
pub struct IsEmpty {
    site: BoxInt,
    site_type: Option<SiteType>,
}

impl IsEmpty {
    #[must_use]
    pub fn new(site: BoxInt) -> Self {
        Self {
            site,
            site_type: None,
        }
    }

    #[must_use]
    pub fn on(mut self, site_type: SiteType) -> Self {
        self.site_type = Some(site_type);
        self
    }
}

impl Ludeme for IsEmpty {
    fn name(&self) -> &'static str {
        "IsEmpty"
    }

    fn children(&self) -> Vec<&dyn Ludeme> {
        vec![self.site.as_ludeme()]
    }

    fn is_static(&self) -> bool {
        false
    }

    fn preprocess(&mut self, game: &Game) {
        self.site.preprocess(game);
    }
}

impl BooleanFunction for IsEmpty {
    fn eval(&self, context: &mut Context<'_>) -> bool {
        let site_type = site_type_or_default(self.site_type, context);
        let site = self.site.eval(context);
        site_index(context, site_type, site).is_some_and(|site| context.board().is_empty(site_type, site))
    }
}

/// True when a site was already visited during this turn.
#[derive(Debug)]
pub struct IsVisited {
    site: BoxInt,
}

impl IsVisited {
    #[must_use]
    pub fn new(site: BoxInt) -> Self {
        Self { site }
    }
}

impl Ludeme for IsVisited {
    fn name(&self) -> &'static str {
        "IsVisited"
    }

    fn children(&self) -> Vec<&dyn Ludeme> {
        vec![self.site.as_ludeme()]
    }

    fn is_static(&self) -> bool {
        false
    }

    fn preprocess(&mut self, game: &Game) {
        self.site.preprocess(game);
    }

    fn game_flags_flat(&self, _game: &Game) -> GameFlags {
        GameFlags::VISITED
    }

    fn concepts_flat(&self, _game: &Game) -> ConceptSet {
        ConceptSet::of(Concept::Visited)
    }
}

impl BooleanFunction for IsVisited {
    fn eval(&self, context: &mut Context<'_>) -> bool {
        let site = self.site.eval(context);
        usize::try_from(site).is_ok_and(|site| context.state().is_visited(site))
    }
}

/// True when the stack on a site is at most one piece high.
///
/// Defaults to the To site.
#[derive(Debug)]
pub struct IsFlat {
    site: BoxInt,
    site_type: Option<SiteType>,
}

impl IsFlat {
    /// Check the To site.
    #[must_use]
    pub fn new() -> Self {
        Self::at(Box::new(To))
    }

    #[must_use]
    pub fn at(site: BoxInt) -> Self {
        Self {
            site,
            site_type: None,
        }
    }

    #[must_use]
    pub fn on(mut self, site_type: SiteType) -> Self {
        self.site_type = Some(site_type);
        self
    }
}

impl Default for IsFlat {
    fn default() -> Self {
        Self::new()
    }
}

impl Ludeme for IsFlat {
    fn name(&self) -> &'static str {
        "IsFlat"
    }

    fn children(&self) -> Vec<&dyn Ludeme> {
        vec![self.site.as_ludeme()]
    }

    fn is_static(&self) -> bool {
        false
    }

    fn preprocess(&mut self, game: &Game) {
        self.site.preprocess(game);
    }

    fn game_flags_flat(&self, _game: &Game) -> GameFlags {
        GameFlags::STACKING
    }

    fn concepts_flat(&self, _game: &Game) -> ConceptSet {
        ConceptSet::of(Concept::Flat)
    }

    fn check_requirements(&self, game: &Game, report: &mut Report) -> bool {
        if !game.is_stacking() {
            report.add_warning(self.name(), "always true in a game without stacking");
        }
        false
    }
}

impl BooleanFunction for IsFlat {
    fn eval(&self, context: &mut Context<'_>) -> bool {
        let site_type = site_type_or_default(self.site_type, context);
        let site = self.site.eval(context);
        site_index(context, site_type, site).is_some_and(|site| context.board().size_stack(site_type, site) <= 1)
    }
}

/// True when some die currently shows a value.
#[derive(Debug)]
pub struct IsAnyDie {
    value: BoxInt,
}

impl IsAnyDie {
    #[must_use]
    pub fn new(value: BoxInt) -> Self {
        Self { value }
    }
}

impl Ludeme for IsAnyDie {
    fn name(&self) -> &'static str {
        "IsAnyDie"
    }

    fn children(&self) -> Vec<&dyn Ludeme> {
        vec![self.value.as_ludeme()]
    }

    fn is_static(&self) -> bool {
        false
    }

    fn preprocess(&mut self, game: &Game) {
        self.value.preprocess(game);
    }

    fn game_flags_flat(&self, _game: &Game) -> GameFlags {
        GameFlags::STOCHASTIC
    }

    fn concepts_flat(&self, _game: &Game) -> ConceptSet {
        ConceptSet::of(Concept::Dice)
    }

    fn check_requirements(&self, game: &Game, report: &mut Report) -> bool {
        if !game.has_dice() {
            report.add_error(self.name(), "game has no dice");
            return true;
        }
        false
    }
}

impl BooleanFunction for IsAnyDie {
    fn eval(&self, context: &mut Context<'_>) -> bool {
        let value = self.value.eval(context);
        context.state().dice().iter().any(|&die| die == value)
    }
}
