//! Integer array nodes: sources, set algebra, `Results` and `If`.

mod algebra;
mod conditional;
mod results;
mod values;

pub use algebra::{ArraySetOp, Difference, Intersection, Union};
pub use conditional::If;
pub use results::Results;
pub use values::{RegionValues, Values};
