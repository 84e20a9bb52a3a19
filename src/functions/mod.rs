//! Expression families.
//!
//! Each family is a trait extending `Ludeme` with an `eval` that produces
//! the family's value:
//!
//! | Trait | Value | Nodes |
//! |---|---|---|
//! | `IntFunction` | `i32` | `ints` |
//! | `BooleanFunction` | `bool` | `booleans` |
//! | `RegionFunction` | `Region` | `regions` |
//! | `IntArrayFunction` | `Vec<i32>` | `arrays` |
//!
//! Moves are the fifth family and live in `crate::moves`.
//!
//! Nodes own their children as boxed trait objects. Static nodes fold to a
//! constant in `preprocess` (see `precompute`).

pub mod arrays;
pub mod booleans;
pub mod ints;
pub mod regions;

use crate::board::SiteType;
use crate::context::Context;
use crate::game::{Game, Region};
use crate::ludeme::{AsLudeme, Ludeme};

/// A node evaluating to an integer.
pub trait IntFunction: Ludeme + AsLudeme {
    fn eval(&self, context: &mut Context<'_>) -> i32;
}

/// A node evaluating to a boolean.
pub trait BooleanFunction: Ludeme + AsLudeme {
    fn eval(&self, context: &mut Context<'_>) -> bool;
}

/// A node evaluating to a set of sites.
pub trait RegionFunction: Ludeme + AsLudeme {
    fn eval(&self, context: &mut Context<'_>) -> Region;
}

/// A node evaluating to an integer array.
pub trait IntArrayFunction: Ludeme + AsLudeme {
    fn eval(&self, context: &mut Context<'_>) -> Vec<i32>;
}

pub type BoxInt = Box<dyn IntFunction>;
pub type BoxBool = Box<dyn BooleanFunction>;
pub type BoxRegion = Box<dyn RegionFunction>;
pub type BoxIntArray = Box<dyn IntArrayFunction>;

/// Evaluate a static node once on a scratch context.
///
/// Returns `None` when the node is not static or folding is switched off,
/// in which case the node keeps evaluating normally.
pub(crate) fn precompute<T>(
    is_static: bool,
    game: &Game,
    eval: impl FnOnce(&mut Context<'_>) -> T,
) -> Option<T> {
    if !is_static || !game.options().memoize_static {
        return None;
    }
    let mut context = Context::scratch(game);
    Some(eval(&mut context))
}

/// The site type a node works on: its own, or the game default.
pub(crate) fn site_type_or_default(site_type: Option<SiteType>, context: &Context<'_>) -> SiteType {
    site_type.unwrap_or_else(|| context.game().default_site_type())
}

/// Convert an evaluated site to an index, if it is on the board.
pub(crate) fn site_index(context: &Context<'_>, site_type: SiteType, site: i32) -> Option<usize> {
    if context.topology().contains(site_type, site) {
        usize::try_from(site).ok()
    } else {
        None
    }
}
