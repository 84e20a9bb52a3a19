//! Leaf move generators.

mod basic;
mod for_each;
mod from_to;
mod place;
mod set_value;

pub use basic::{Pass, Roll};
pub use for_each::ForEach;
pub use from_to::FromTo;
pub use place::{Add, Remove};
pub use set_value::SetValue;
