//! Set algebra over integer arrays.
//!
//! Results keep first-seen order. `Union` and `Intersection` drop repeated
//! values; `Difference` only removes, so repeats in its source survive.

use crate::context::Context;
use crate::core::{BuildError, BuildResult};
use crate::game::{dedup_ordered, ordered_difference, ordered_intersection, ordered_union, Game};
use crate::ludeme::{Concept, ConceptSet, Ludeme};

use super::super::{precompute, BoxIntArray, IntArrayFunction};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SetOp {
    Union,
    Intersection,
    Difference,
}

/// A set operation folded left over its operands.
///
/// Built through `Union`, `Intersection` and `Difference`.
#[derive(Debug)]
pub struct ArraySetOp {
    op: SetOp,
    operands: Vec<BoxIntArray>,
    precomputed: Option<Vec<i32>>,
}

impl ArraySetOp {
    fn binary(op: SetOp, a: BoxIntArray, b: BoxIntArray) -> Self {
        Self {
            op,
            operands: vec![a, b],
            precomputed: None,
        }
    }

    fn nary(op: SetOp, ludeme: &'static str, operands: Vec<BoxIntArray>) -> BuildResult<Self> {
        if operands.is_empty() {
            return Err(BuildError::TooFewOperands {
                ludeme,
                min: 1,
                got: 0,
            });
        }
        Ok(Self {
            op,
            operands,
            precomputed: None,
        })
    }

    fn compute(&self, context: &mut Context<'_>) -> Vec<i32> {
        let mut operands = self.operands.iter();
        let Some(first) = operands.next() else {
            return Vec::new();
        };
        let first = first.eval(context);
        let mut result = match self.op {
            SetOp::Difference => first,
            SetOp::Union | SetOp::Intersection => dedup_ordered(&first),
        };
        for operand in operands {
            let next = operand.eval(context);
            result = match self.op {
                SetOp::Union => ordered_union(&result, &next),
                SetOp::Intersection => ordered_intersection(&result, &next),
                SetOp::Difference => ordered_difference(&result, &next),
            };
        }
        result
    }
}

impl Ludeme for ArraySetOp {
    fn name(&self) -> &'static str {
        match self.op {
            SetOp::Union => "Union",
            SetOp::Intersection => "Intersection",
            SetOp::Difference => "Difference",
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
        ConceptSet::of(match self.op {
            SetOp::Union => Concept::SetUnion,
            SetOp::Intersection => Concept::SetIntersection,
            SetOp::Difference => Concept::SetDifference,
        })
    }
}

impl IntArrayFunction for ArraySetOp {
    fn eval(&self, context: &mut Context<'_>) -> Vec<i32> {
        match &self.precomputed {
            Some(values) => values.clone(),
            None => self.compute(context),
        }
    }
}

/// Values of the first array, then unseen values of the next ones.
pub struct Union;

/// Values present in every array, in the first array's order.
pub struct Intersection;

/// Values of a source array absent from every removed array.
pub struct Difference;

impl Union {
    #[must_use]
    #[allow(clippy::new_ret_no_self)]
    pub fn new(a: BoxIntArray, b: BoxIntArray) -> ArraySetOp {
        ArraySetOp::binary(SetOp::Union, a, b)
    }

    pub fn all(operands: Vec<BoxIntArray>) -> BuildResult<ArraySetOp> {
        ArraySetOp::nary(SetOp::Union, "Union", operands)
    }
}

impl Intersection {
    #[must_use]
    #[allow(clippy::new_ret_no_self)]
    pub fn new(a: BoxIntArray, b: BoxIntArray) -> ArraySetOp {
        ArraySetOp::binary(SetOp::Intersection, a, b)
    }

    pub fn all(operands: Vec<BoxIntArray>) -> BuildResult<ArraySetOp> {
        ArraySetOp::nary(SetOp::Intersection, "Intersection", operands)
    }
}

impl Difference {
    #[must_use]
    #[allow(clippy::new_ret_no_self)]
    pub fn new(source: BoxIntArray, sub: BoxIntArray) -> ArraySetOp {
        ArraySetOp::binary(SetOp::Difference, source, sub)
    }

    /// `source` minus every array of `subs`.
    pub fn all(source: BoxIntArray, subs: Vec<BoxIntArray>) -> BuildResult<ArraySetOp> {
        if subs.is_empty() {
            return Err(BuildError::TooFewOperands {
                ludeme: "Difference",
                min: 1,
                got: 0,
            });
        }
        let mut operands = Vec::with_capacity(subs.len() + 1);
        operands.push(source);
        operands.extend(subs);
        ArraySetOp::nary(SetOp::Difference, "Difference", operands)
    }
}
