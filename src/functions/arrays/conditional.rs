//! Conditional arrays.

use crate::context::Context;
use crate::game::Game;
use crate::ludeme::{Concept, ConceptSet, Ludeme};

use super::super::{precompute, BoxBool, BoxIntArray, IntArrayFunction};

/// `then` if the condition holds, otherwise `otherwise` (or nothing).
#[derive(Debug)]
pub struct If {
    condition: BoxBool,
    then: BoxIntArray,
    otherwise: Option<BoxIntArray>,
    precomputed: Option<Vec<i32>>,
}

impl If {
    #[must_use]
    pub fn new(condition: BoxBool, then: BoxIntArray, otherwise: Option<BoxIntArray>) -> Self {
        Self {
            condition,
            then,
            otherwise,
            precomputed: None,
        }
    }

    fn compute(&self, context: &mut Context<'_>) -> Vec<i32> {
        if self.condition.eval(context) {
            self.then.eval(context)
        } else {
            self.otherwise
                .as_ref()
                .map_or_else(Vec::new, |otherwise| otherwise.eval(context))
        }
    }
}

impl Ludeme for If {
    fn name(&self) -> &'static str {
        "If"
    }

    fn children(&self) -> Vec<&dyn Ludeme> {
        let mut children = vec![self.condition.as_ludeme(), self.then.as_ludeme()];
        children.extend(self.otherwise.iter().map(|o| o.as_ludeme()));
        children
    }

    fn preprocess(&mut self, game: &Game) {
        self.condition.preprocess(game);
        self.then.preprocess(game);
        if let Some(otherwise) = &mut self.otherwise {
            otherwise.preprocess(game);
        }
        let value = precompute(self.is_static(), game, |context| self.compute(context));
        self.precomputed = value;
    }

    fn concepts_flat(&self, _game: &Game) -> ConceptSet {
        ConceptSet::of(Concept::Conditional)
    }
}

impl IntArrayFunction for If {
    fn eval(&self, context: &mut Context<'_>) -> Vec<i32> {
        match &self.precomputed {
            Some(values) => values.clone(),
            None => self.compute(context),
        }
    }
}
