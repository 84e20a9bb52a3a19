//! Whole-tree summary computed once at compile time.

use crate::context::RegisterSet;
use crate::game::Game;

use super::{aggregate, ConceptSet, GameFlags, Ludeme};

/// Folded capabilities of a rules tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LudemeSummary {
    pub game_flags: GameFlags,
    pub concepts: ConceptSet,
    pub reads: RegisterSet,
    pub writes: RegisterSet,
    pub is_static: bool,
    pub nodes: usize,
}

impl LudemeSummary {
    /// Fold a tree rooted at `root`.
    #[must_use]
    pub fn of(root: &dyn Ludeme, game: &Game) -> Self {
        Self {
            game_flags: root.game_flags(game) | equipment_flags(game),
            concepts: root.concepts(game),
            reads: root.reads_context(),
            writes: root.writes_context(),
            is_static: root.is_static(),
            nodes: aggregate::count_nodes(root),
        }
    }
}

/// Flags implied by the equipment rather than by rules.
fn equipment_flags(game: &Game) -> GameFlags {
    let mut flags = GameFlags::for_site_type(game.default_site_type());
    if game.is_stacking() {
        flags |= GameFlags::STACKING;
    }
    if game.has_dice() {
        flags |= GameFlags::STOCHASTIC;
    }
    if !game.tracks().is_empty() {
        flags |= GameFlags::TRACK;
    }
    if game.has_hints() {
        flags |= GameFlags::HINTS;
    }
    if game.uses_tiles() {
        flags |= GameFlags::TILES | GameFlags::ROTATION;
    }
    if game.uses_dominoes() {
        flags |= GameFlags::LARGE_PIECE;
    }
    if game.containers().len() > 1 {
        flags |= GameFlags::HANDS;
    }
    flags
}
