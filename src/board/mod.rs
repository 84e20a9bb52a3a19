//! Board geometry.
//!
//! - `SiteType`: cells, vertices or edges
//! - `Direction` / `DirectionSet`: neighbour steps and the sets used to walk them
//! - `Topology`: element adjacency, rows, boundary sites, edge lookup
//!
//! Topologies are immutable once built; evaluation only queries them.

mod direction;
mod topology;

pub use direction::{Direction, DirectionSet, SiteType};
pub use topology::{EdgeAxis, Element, Step, Topology};
