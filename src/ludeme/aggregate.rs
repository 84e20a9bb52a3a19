//! Bottom-up folds over child node lists.
//!
//! Nodes do not share state through inheritance; the recursive forms of the
//! `Ludeme` queries are defined as "flat tag of the node unioned with these
//! folds over its children".

use crate::context::RegisterSet;
use crate::game::Game;

use super::{ConceptSet, GameFlags, Ludeme, Report};

/// Union of the children's recursive game flags.
#[must_use]
pub fn game_flags(children: &[&dyn Ludeme], game: &Game) -> GameFlags {
    children
        .iter()
        .fold(GameFlags::EMPTY, |flags, child| flags | child.game_flags(game))
}

/// Union of the children's recursive concepts.
#[must_use]
pub fn concepts(children: &[&dyn Ludeme], game: &Game) -> ConceptSet {
    children
        .iter()
        .fold(ConceptSet::EMPTY, |set, child| set | child.concepts(game))
}

/// Union of the children's recursive read sets.
#[must_use]
pub fn reads_context(children: &[&dyn Ludeme]) -> RegisterSet {
    children
        .iter()
        .fold(RegisterSet::EMPTY, |set, child| set | child.reads_context())
}

/// Union of the children's recursive write sets.
#[must_use]
pub fn writes_context(children: &[&dyn Ludeme]) -> RegisterSet {
    children
        .iter()
        .fold(RegisterSet::EMPTY, |set, child| set | child.writes_context())
}

/// True when every child is static (vacuously true for leaves).
#[must_use]
pub fn all_static(children: &[&dyn Ludeme]) -> bool {
    children.iter().all(|child| child.is_static())
}

/// Run `missing_requirement` on every child; true if any reported.
///
/// Never short-circuits, so one pass surfaces every problem.
pub fn missing_requirement(children: &[&dyn Ludeme], game: &Game, report: &mut Report) -> bool {
    children
        .iter()
        .fold(false, |missing, child| child.missing_requirement(game, report) | missing)
}

/// Run `will_crash` on every child; true if any reported.
pub fn will_crash(children: &[&dyn Ludeme], game: &Game, report: &mut Report) -> bool {
    children
        .iter()
        .fold(false, |crash, child| child.will_crash(game, report) | crash)
}

/// Visit a tree depth-first, parents before children.
pub fn walk<'a>(root: &'a dyn Ludeme, visit: &mut impl FnMut(&'a dyn Ludeme, usize)) {
    fn go<'a>(node: &'a dyn Ludeme, depth: usize, visit: &mut impl FnMut(&'a dyn Ludeme, usize)) {
        visit(node, depth);
        for child in node.children() {
            go(child, depth + 1, visit);
        }
    }
    go(root, 0, visit);
}

/// Number of nodes in a tree.
#[must_use]
pub fn count_nodes(root: &dyn Ludeme) -> usize {
    let mut count = 0;
    walk(root, &mut |_, _| count += 1);
    count
}
