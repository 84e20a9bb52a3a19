//! Constants and arithmetic.

use crate::context::Context;
use crate::core::{BuildError, BuildResult};
use crate::game::Game;
use crate::ludeme::{Concept, ConceptSet, Ludeme};

use super::super::{precompute, BoxInt, IntFunction};

/// A constant integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntConstant {
    value: i32,
}

impl IntConstant {
    #[must_use]
    pub fn new(value: i32) -> Self {
        Self { value }
    }

    /// Boxed constant, for building trees.
    #[must_use]
    pub fn boxed(value: i32) -> BoxInt {
        Box::new(Self::new(value))
    }
}

impl Ludeme for IntConstant {
    fn name(&self) -> &'static str {
        "IntConstant"
    }
}

impl IntFunction for IntConstant {
    fn eval(&self, _context: &mut Context<'_>) -> i32 {
        self.value
    }
}

/// Sum of its operands.
#[derive(Debug)]
pub struct Add {
    operands: Vec<BoxInt>,
    precomputed: Option<i32>,
}

impl Add {
    /// `a + b`.
    #[must_use]
    pub fn new(a: BoxInt, b: BoxInt) -> Self {
        Self {
            operands: vec![a, b],
            precomputed: None,
        }
    }

    /// Sum of a list of operands.
    pub fn all(operands: Vec<BoxInt>) -> BuildResult<Self> {
        if operands.is_empty() {
            return Err(BuildError::TooFewOperands {
                ludeme: "Add",
                min: 1,
                got: 0,
            });
        }
        Ok(Self {
            operands,
            precomputed: None,
        })
    }

    fn compute(&self, context: &mut Context<'_>) -> i32 {
        self.operands
            .iter()
            .fold(0i32, |sum, operand| sum.wrapping_add(operand.eval(context)))
    }
}

impl Ludeme for Add {
    fn name(&self) -> &'static str {
        "Add"
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
        ConceptSet::of(Concept::Addition)
    }
}

impl IntFunction for Add {
    fn eval(&self, context: &mut Context<'_>) -> i32 {
        self.precomputed.unwrap_or_else(|| self.compute(context))
    }
}
