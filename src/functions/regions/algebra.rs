//! Set operations on regions.

use crate::context::Context;
use crate::core::{BuildError, BuildResult};
use crate::game::{Game, Region};
use crate::ludeme::{Concept, ConceptSet, Ludeme};

use super::super::{precompute, BoxRegion, RegionFunction};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Op {
    Union,
    Intersection,
}

impl Op {
    fn name(self) -> &'static str {
        match self {
            Op::Union => "RegionUnion",
            Op::Intersection => "RegionIntersection",
        }
    }
}

/// Fold of a union or intersection over a list of regions.
#[derive(Debug)]
pub struct RegionFold {
    op: Op,
    operands: Vec<BoxRegion>,
    precomputed: Option<Region>,
}

impl RegionFold {
    fn new(op: Op, operands: Vec<BoxRegion>) -> BuildResult<Self> {
        if operands.is_empty() {
            return Err(BuildError::TooFewOperands {
                ludeme: op.name(),
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

    fn compute(&self, context: &mut Context<'_>) -> Region {
        let mut operands = self.operands.iter();
        let mut result = match operands.next() {
            Some(first) => first.eval(context),
            None => return Region::new(),
        };
        for operand in operands {
            let next = operand.eval(context);
            result = match self.op {
                Op::Union => result.union(&next),
                Op::Intersection => result.intersection(&next),
            };
        }
        result
    }
}

impl Ludeme for RegionFold {
    fn name(&self) -> &'static str {
        self.op.name()
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
        match self.op {
            Op::Union => ConceptSet::of(Concept::SetUnion),
            Op::Intersection => ConceptSet::of(Concept::SetIntersection),
        }
    }
}

impl RegionFunction for RegionFold {
    fn eval(&self, context: &mut Context<'_>) -> Region {
        match &self.precomputed {
            Some(region) => region.clone(),
            None => self.compute(context),
        }
    }
}

/// Union of regions: sites of the first operand, then unseen sites of the
/// next ones.
pub struct RegionUnion;

/// Intersection of regions, in the first operand's order.
pub struct RegionIntersection;

impl RegionUnion {
    #[must_use]
    #[allow(clippy::new_ret_no_self)]
    pub fn new(a: BoxRegion, b: BoxRegion) -> RegionFold {
        RegionFold {
            op: Op::Union,
            operands: vec![a, b],
            precomputed: None,
        }
    }

    pub fn all(operands: Vec<BoxRegion>) -> BuildResult<RegionFold> {
        RegionFold::new(Op::Union, operands)
    }
}

impl RegionIntersection {
    #[must_use]
    #[allow(clippy::new_ret_no_self)]
    pub fn new(a: BoxRegion, b: BoxRegion) -> RegionFold {
        RegionFold {
            op: Op::Intersection,
            operands: vec![a, b],
            precomputed: None,
        }
    }

    pub fn all(operands: Vec<BoxRegion>) -> BuildResult<RegionFold> {
        RegionFold::new(Op::Intersection, operands)
    }
}

/// Sites of `source` that are in none of the removed regions.
#[derive(Debug)]
pub struct RegionDifference {
    source: BoxRegion,
    remove: Vec<BoxRegion>,
    precomputed: Option<Region>,
}

impl RegionDifference {
    #[must_use]
    pub fn new(source: BoxRegion, remove: BoxRegion) -> Self {
        Self {
            source,
            remove: vec![remove],
            precomputed: None,
        }
    }

    pub fn all(source: BoxRegion, remove: Vec<BoxRegion>) -> BuildResult<Self> {
        if remove.is_empty() {
            return Err(BuildError::TooFewOperands {
                ludeme: "RegionDifference",
                min: 1,
                got: 0,
            });
        }
        Ok(Self {
            source,
            remove,
            precomputed: None,
        })
    }

    fn compute(&self, context: &mut Context<'_>) -> Region {
        let mut result = self.source.eval(context);
        for remove in &self.remove {
            let remove = remove.eval(context);
            result = result.difference(&remove);
        }
        result
    }
}

impl Ludeme for RegionDifference {
    fn name(&self) -> &'static str {
        "RegionDifference"
    }

    fn children(&self) -> Vec<&dyn Ludeme> {
        std::iter::once(self.source.as_ludeme())
            .chain(self.remove.iter().map(|r| r.as_ludeme()))
            .collect()
    }

    fn preprocess(&mut self, game: &Game) {
        self.source.preprocess(game);
        for remove in &mut self.remove {
            remove.preprocess(game);
        }
        let value = precompute(self.is_static(), game, |context| self.compute(context));
        self.precomputed = value;
    }

    fn concepts_flat(&self, _game: &Game) -> ConceptSet {
        ConceptSet::of(Concept::SetDifference)
    }
}

impl RegionFunction for RegionDifference {
    fn eval(&self, context: &mut Context<'_>) -> Region {
        match &self.precomputed {
            Some(region) => region.clone(),
            None => self.compute(context),
        }
    }
}
