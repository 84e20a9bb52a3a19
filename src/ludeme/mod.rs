//! The node contract shared by every expression family.
//!
//! ## Ludeme
//!
//! Every node, whatever it evaluates to, implements `Ludeme`:
//!
//! - structure: `name`, `children`
//! - folding: `is_static`, `preprocess`
//! - tagging: `game_flags`, `concepts`
//! - register tracking: `reads_context`, `writes_context`
//! - validation: `missing_requirement`, `will_crash`
//!
//! Each query comes in a flat form (the node alone) and a recursive form
//! (the node plus its subtree). Nodes override the flat forms; the recursive
//! forms are provided and fold over `children()` with the helpers in
//! `aggregate`.
//!
//! The family traits (`IntFunction`, `BooleanFunction`, ...) extend
//! `Ludeme` with an `eval` returning the family's value type.

pub mod aggregate;
mod concepts;
mod flags;
mod report;
mod summary;

use std::fmt::Debug;

use crate::context::RegisterSet;
use crate::game::Game;

pub use concepts::{Concept, ConceptSet};
pub use flags::GameFlags;
pub use report::{Diagnostic, Report, Severity};
pub use summary::LudemeSummary;

/// Capabilities shared by every node.
pub trait Ludeme: Debug + Send + Sync {
    /// Node name used in diagnostics and traces.
    fn name(&self) -> &'static str;

    /// Direct children, in evaluation order.
    fn children(&self) -> Vec<&dyn Ludeme> {
        Vec::new()
    }

    /// True iff evaluation does not depend on per-turn state or registers.
    ///
    /// Defaults to "every child is static", which is right for leaves
    /// holding only constants.
    fn is_static(&self) -> bool {
        aggregate::all_static(&self.children())
    }

    /// One-time compile pass: preprocess children, then fold to a constant
    /// if static. Must be idempotent.
    fn preprocess(&mut self, _game: &Game) {}

    /// Game flags of this node alone.
    fn game_flags_flat(&self, _game: &Game) -> GameFlags {
        GameFlags::EMPTY
    }

    /// Game flags of the subtree.
    fn game_flags(&self, game: &Game) -> GameFlags {
        self.game_flags_flat(game) | aggregate::game_flags(&self.children(), game)
    }

    /// Concepts of this node alone.
    fn concepts_flat(&self, _game: &Game) -> ConceptSet {
        ConceptSet::EMPTY
    }

    /// Concepts of the subtree.
    fn concepts(&self, game: &Game) -> ConceptSet {
        self.concepts_flat(game) | aggregate::concepts(&self.children(), game)
    }

    /// Registers this node reads itself.
    fn reads_context_flat(&self) -> RegisterSet {
        RegisterSet::EMPTY
    }

    /// Registers read anywhere in the subtree.
    fn reads_context(&self) -> RegisterSet {
        self.reads_context_flat() | aggregate::reads_context(&self.children())
    }

    /// Registers this node writes itself.
    fn writes_context_flat(&self) -> RegisterSet {
        RegisterSet::EMPTY
    }

    /// Registers written anywhere in the subtree.
    fn writes_context(&self) -> RegisterSet {
        self.writes_context_flat() | aggregate::writes_context(&self.children())
    }

    /// Requirement check of this node alone.
    fn check_requirements(&self, _game: &Game, _report: &mut Report) -> bool {
        false
    }

    /// Report equipment the subtree needs but the game lacks.
    ///
    /// Returns true if anything was reported. Every child is visited.
    fn missing_requirement(&self, game: &Game, report: &mut Report) -> bool {
        let own = self.check_requirements(game, report);
        aggregate::missing_requirement(&self.children(), game, report) | own
    }

    /// Crash check of this node alone.
    fn check_crash(&self, _game: &Game, _report: &mut Report) -> bool {
        false
    }

    /// Report constructs that would fail at play time.
    fn will_crash(&self, game: &Game, report: &mut Report) -> bool {
        let own = self.check_crash(game, report);
        aggregate::will_crash(&self.children(), game, report) | own
    }
}

/// View any node as a plain `&dyn Ludeme`.
///
/// Family trait objects use this to hand their children to the generic
/// folds.
pub trait AsLudeme {
    fn as_ludeme(&self) -> &dyn Ludeme;
}

impl<T: Ludeme> AsLudeme for T {
    fn as_ludeme(&self) -> &dyn Ludeme {
        self
    }
}
