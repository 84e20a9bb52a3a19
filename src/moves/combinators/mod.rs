//! Moves combinators.

mod all_combinations;
mod and;
mod append;
mod conditional;
mod seq;

pub use all_combinations::AllCombinations;
pub use and::And;
pub use append::Append;
pub use conditional::If;
pub use seq::Seq;
