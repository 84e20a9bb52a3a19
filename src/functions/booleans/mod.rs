//! Boolean nodes: connectives, site predicates, loop and edge matching.

mod can_move;
mod is_loop;
mod logic;
mod matching;
mod site;

pub use can_move::CanMove;
pub use is_loop::IsLoop;
pub use logic::{All, Any, BooleanConstant, BooleanFold, Equals, IsIn, Not};
pub use matching::{IsPipsMatch, IsSidesMatch};
pub use site::{IsAnyDie, IsEmpty, IsFlat, IsOdd, IsVisited};
