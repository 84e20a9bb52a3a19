//! `Results`: values of a function over a from/to cross-product.

use crate::context::{Context, ContextRegister, RegisterSet};
use crate::game::Game;
use crate::ludeme::{Concept, ConceptSet, Ludeme};

use super::super::{BoxInt, BoxRegion, IntArrayFunction};

const WRITES: RegisterSet = RegisterSet::of(ContextRegister::From).with(ContextRegister::To);

/// Evaluate `function` for every (from, to) pair, in iteration order.
///
/// The From and To registers are written for each pair and restored on
/// exit. The `to` region is evaluated once per origin, so it may depend on
/// From. Duplicated values are kept. Never static.
#[derive(Debug)]
pub struct Results {
    from: BoxRegion,
    to: BoxRegion,
    function: BoxInt,
}

impl Results {
    #[must_use]
    pub fn new(from: BoxRegion, to: BoxRegion, function: BoxInt) -> Self {
        Self { from, to, function }
    }
}

impl Ludeme for Results {
    fn name(&self) -> &'static str {
        "Results"
    }

    fn children(&self) -> Vec<&dyn Ludeme> {
        vec![self.from.as_ludeme(), self.to.as_ludeme(), self.function.as_ludeme()]
    }

    fn is_static(&self) -> bool {
        false
    }

    fn preprocess(&mut self, game: &Game) {
        self.from.preprocess(game);
        self.to.preprocess(game);
        self.function.preprocess(game);
    }

    fn concepts_flat(&self, _game: &Game) -> ConceptSet {
        ConceptSet::of(Concept::Results)
    }

    fn writes_context_flat(&self) -> RegisterSet {
        WRITES
    }
}

impl IntArrayFunction for Results {
    fn eval(&self, context: &mut Context<'_>) -> Vec<i32> {
        context.with_saved_registers(WRITES, |context| {
            let origins = self.from.eval(context);
            let mut results = Vec::new();
            for from in &origins {
                context.set_from(from as i32);
                let targets = self.to.eval(context);
                for to in &targets {
                    context.set_to(to as i32);
                    results.push(self.function.eval(context));
                }
            }
            results
        })
    }
}
