//! Game descriptor and persistent state.
//!
//! - `Game`: immutable description of one game's equipment
//! - `GameState` / `ContainerState`: what moves change
//! - `Region`: ordered site sets produced by region functions

mod component;
#[allow(clippy::module_inception)]
mod game;
mod region;
mod state;

pub use component::{Component, Track};
pub use game::{Container, Game};
pub use region::{dedup_ordered, ordered_difference, ordered_intersection, ordered_union, Region};
pub use state::{ContainerState, GameState, Piece, Stack};
