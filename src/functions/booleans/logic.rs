//! Boolean constants, connectives and comparisons.

use crate::context::Context;
use crate::core::{BuildError, BuildResult};
use crate::game::Game;
use crate::ludeme::{Concept, ConceptSet, Ludeme};

use super::super::{precompute, BoxBool, BoxInt, BoxRegion, BooleanFunction};

/// A constant boolean.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BooleanConstant {
    value: bool,
}

impl BooleanConstant {
    #[must_use]
    pub fn new(value: bool) -> Self {
        Self { value }
    }

    #[must_use]
    pub fn boxed(value: bool) -> BoxBool {
        Box::new(Self::new(value))
    }
}

impl Ludeme for BooleanConstant {
    fn name(&self) -> &'static str {
        "BooleanConstant"
    }
}

impl BooleanFunction for BooleanConstant {
    fn eval(&self, _context: &mut Context<'_>) -> bool {
        self.value
    }
}

/// Negation.
#[derive(Debug)]
pub struct Not {
    operand: BoxBool,
    precomputed: Option<bool>,
}

impl Not {
    #[must_use]
    pub fn new(operand: BoxBool) -> Self {
        Self {
            operand,
            precomputed: None,
        }
    }
}

impl Ludeme for Not {
    fn name(&self) -> &'static str {
        "Not"
    }

    fn children(&self) -> Vec<&dyn Ludeme> {
        vec![self.operand.as_ludeme()]
    }

    fn preprocess(&mut self, game: &Game) {
        self.operand.preprocess(game);
        let value = precompute(self.is_static(), game, |context| !self.operand.eval(context));
        self.precomputed = value;
    }

    fn concepts_flat(&self, _game: &Game) -> ConceptSet {
        ConceptSet::of(Concept::Negation)
    }
}

impl BooleanFunction for Not {
    fn eval(&self, context: &mut Context<'_>) -> bool {
        self.precomputed.unwrap_or_else(|| !self.operand.eval(context))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Connective {
    All,
    Any,
}

/// Conjunction or disjunction of a list of conditions.
///
/// Evaluates left to right and stops at the first deciding operand.
#[derive(Debug)]
pub struct BooleanFold {
    connective: Connective,
    operands: Vec<BoxBool>,
    precomputed: Option<bool>,
}

impl BooleanFold {
    fn new(connective: Connective, operands: Vec<BoxBool>) -> BuildResult<Self> {
        if operands.is_empty() {
            return Err(BuildError::TooFewOperands {
                ludeme: match connective {
                    Connective::All => "All",
                    Connective::Any => "Any",
                },
                min: 1,
                got: 0,
            });
        }
        Ok(Self {
            connective,
            operands,
            precomputed: None,
        })
    }

    fn compute(&self, context: &mut Context<'_>) -> bool {
        match self.connective {
            Connective::All => self.operands.iter().all(|o| o.eval(context)),
            Connective::Any => self.operands.iter().any(|o| o.eval(context)),
        }
    }
}

impl Ludeme for BooleanFold {
    fn name(&self) -> &'static str {
        match self.connective {
            Connective::All => "All",
            Connective::Any => "Any",
        }
    }

    fn children(&self) -> Vec<&dyn Ludeme> {
        self.operands.iter().map(|o| o.as_ludeme()).collect()
    }

    fn preprocess(&mut self, game: &Game) {
        for operand in &mut self.operands {
            operand.preprocess(game);
        }
        let value = precompute(self.is_static(), game, |context| self.compute(context));
        self.precomputed = value;
    }

    fn concepts_flat(&self, _game: &Game) -> ConceptSet {
        ConceptSet::of(match self.connective {
            Connective::All => Concept::Conjunct,
            Connective::Any => Concept::Disjunct,
        })
    }
}

impl BooleanFunction for BooleanFold {
    fn eval(&self, context: &mut Context<'_>) -> bool {
        self.precomputed.unwrap_or_else(|| self.compute(context))
    }
}

/// True when every operand holds.
pub struct All;

/// True when some operand holds.
pub struct Any;

impl All {
    #[allow(clippy::new_ret_no_self)]
    pub fn new(operands: Vec<BoxBool>) -> BuildResult<BooleanFold> {
        BooleanFold::new(Connective::All, operands)
    }

    #[must_use]
    pub fn both(a: BoxBool, b: BoxBool) -> BooleanFold {
        BooleanFold {
            connective: Connective::All,
            operands: vec![a, b],
            precomputed: None,
        }
    }
}

impl Any {
    #[allow(clippy::new_ret_no_self)]
    pub fn new(operands: Vec<BoxBool>) -> BuildResult<BooleanFold> {
        BooleanFold::new(Connective::Any, operands)
    }

    #[must_use]
    pub fn either(a: BoxBool, b: BoxBool) -> BooleanFold {
        BooleanFold {
            connective: Connective::Any,
            operands: vec![a, b],
            precomputed: None,
        }
    }
}

/// Integer equality.
#[derive(Debug)]
pub struct Equals {
    a: BoxInt,
    b: BoxInt,
    precomputed: Option<bool>,
}

impl Equals {
    #[must_use]
    pub fn new(a: BoxInt, b: BoxInt) -> Self {
        Self {
            a,
            b,
            precomputed: None,
        }
    }

    fn compute(&self, context: &mut Context<'_>) -> bool {
        self.a.eval(context) == self.b.eval(context)
    }
}

impl Ludeme for Equals {
    fn name(&self) -> &'static str {
        "Equals"
    }

    fn children(&self) -> Vec<&dyn Ludeme> {
        vec![self.a.as_ludeme(), self.b.as_ludeme()]
    }

    fn preprocess(&mut self, game: &Game) {
        self.a.preprocess(game);
        self.b.preprocess(game);
        let value = precompute(self.is_static(), game, |context| self.compute(context));
        self.precomputed = value;
    }

    fn concepts_flat(&self, _game: &Game) -> ConceptSet {
        ConceptSet::of(Concept::Equality)
    }
}

impl BooleanFunction for Equals {
    fn eval(&self, context: &mut Context<'_>) -> bool {
        self.precomputed.unwrap_or_else(|| self.compute(context))
    }
}

/// Site membership in a region.
#[derive(Debug)]
pub struct IsIn {
    site: BoxInt,
    region: BoxRegion,
    precomputed: Option<bool>,
}

impl IsIn {
    #[must_use]
    pub fn new(site: BoxInt, region: BoxRegion) -> Self {
        Self {
            site,
            region,
            precomputed: None,
        }
    }

    fn compute(&self, context: &mut Context<'_>) -> bool {
        let site = self.site.eval(context);
        let region = self.region.eval(context);
        usize::try_from(site).is_ok_and(|site| region.contains(site))
    }
}

impl Ludeme for IsIn {
    fn name(&self) -> &'static str {
        "IsIn"
    }

    fn children(&self) -> Vec<&dyn Ludeme> {
        vec![self.site.as_ludeme(), self.region.as_ludeme()]
    }

    fn preprocess(&mut self, game: &Game) {
        self.site.preprocess(game);
        self.region.preprocess(game);
        let value = precompute(self.is_static(), game, |context| self.compute(context));
        self.precomputed = value;
    }

    fn concepts_flat(&self, _game: &Game) -> ConceptSet {
        ConceptSet::of(Concept::Membership)
    }
}

impl BooleanFunction for IsIn {
    fn eval(&self, context: &mut Context<'_>) -> bool {
        self.precomputed.unwrap_or_else(|| self.compute(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BoardConfig, GameConfig, GameRng};
    use crate::functions::ints::{IntConstant, Site};
    use crate::functions::regions::Sites;

    fn test_game() -> Game {
        Game::from_config(GameConfig::new("t", 1, BoardConfig::square(2, 2))).unwrap()
    }

    #[test]
    fn test_connectives() {
        let game = test_game();
        let mut context = Context::new(&game, GameRng::new(1));
        let t = || BooleanConstant::boxed(true);
        let f = || BooleanConstant::boxed(false);

        assert!(All::both(t(), t()).eval(&mut context));
        assert!(!All::new(vec![t(), f(), t()]).unwrap().eval(&mut context));
        assert!(Any::either(f(), t()).eval(&mut context));
        assert!(!Any::new(vec![f()]).unwrap().eval(&mut context));
        assert!(Not::new(f()).eval(&mut context));
        assert!(All::new(Vec::new()).is_err());
    }

    #[test]
    fn test_equals_and_is_in() {
        let game = test_game();
        let mut context = Context::new(&game, GameRng::new(1));
        context.set_register(crate::context::ContextRegister::Site, 2);

        assert!(Equals::new(Box::new(Site), IntConstant::boxed(2)).eval(&mut context));
        assert!(IsIn::new(Box::new(Site), Box::new(Sites::constant(&[0, 2]))).eval(&mut context));
        assert!(!IsIn::new(IntConstant::boxed(-1), Box::new(Sites::constant(&[0]))).eval(&mut context));
    }

    #[test]
    fn test_static_folding() {
        let game = test_game();
        let mut equals = Equals::new(IntConstant::boxed(1), IntConstant::boxed(1));
        equals.preprocess(&game);
        assert_eq!(equals.precomputed, Some(true));

        let mut dynamic = Not::new(Box::new(Equals::new(Box::new(Site), IntConstant::boxed(1))));
        dynamic.preprocess(&game);
        assert!(dynamic.precomputed.is_none());
    }
}
