//! Array sources.

use crate::context::Context;
use crate::game::Game;
use crate::ludeme::Ludeme;

use super::super::{ints::IntConstant, precompute, BoxInt, BoxRegion, IntArrayFunction};

/// An explicit list of integers, duplicates kept.
#[derive(Debug)]
pub struct Values {
    values: Vec<BoxInt>,
    precomputed: Option<Vec<i32>>,
}

impl Values {
    #[must_use]
    pub fn new(values: Vec<BoxInt>) -> Self {
        Self {
            values,
            precomputed: None,
        }
    }

    #[must_use]
    pub fn constant(values: &[i32]) -> Self {
        Self::new(values.iter().map(|&v| IntConstant::boxed(v)).collect())
    }

    fn compute(&self, context: &mut Context<'_>) -> Vec<i32> {
        self.values.iter().map(|v| v.eval(context)).collect()
    }
}

impl Ludeme for Values {
    fn name(&self) -> &'static str {
        "Values"
    }

    fn children(&self) -> Vec<&dyn Ludeme> {
        self.values.iter().map(|v| v.as_ludeme()).collect()
    }

    fn preprocess(&mut self, game: &Game) {
        for value in &mut self.values {
            value.preprocess(game);
        }
        let value = precompute(self.is_static(), game, |context| self.compute(context));
        self.precomputed = value;
    }
}

impl IntArrayFunction for Values {
    fn eval(&self, context: &mut Context<'_>) -> Vec<i32> {
        match &self.precomputed {
            Some(values) => values.clone(),
            None => self.compute(context),
        }
    }
}

/// The sites of a region as integers.
#[derive(Debug)]
pub struct RegionValues {
    region: BoxRegion,
    precomputed: Option<Vec<i32>>,
}

impl RegionValues {
    #[must_use]
    pub fn new(region: BoxRegion) -> Self {
        Self {
            region,
            precomputed: None,
        }
    }

    fn compute(&self, context: &mut Context<'_>) -> Vec<i32> {
        self.region.eval(context).to_values()
    }
}

impl Ludeme for RegionValues {
    fn name(&self) -> &'static str {
        "RegionValues"
    }

    fn children(&self) -> Vec<&dyn Ludeme> {
        vec![self.region.as_ludeme()]
    }

    fn preprocess(&mut self, game: &Game) {
        self.region.preprocess(game);
        let value = precompute(self.is_static(), game, |context| self.compute(context));
        self.precomputed = value;
    }
}

impl IntArrayFunction for RegionValues {
    fn eval(&self, context: &mut Context<'_>) -> Vec<i32> {
        match &self.precomputed {
            Some(values) => values.clone(),
            None => self.compute(context),
        }
    }
}
