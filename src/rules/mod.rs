//! Compiled rules and the legal-move entry points.

mod engine;

pub use engine::Rules;
