//! Evaluation context: the register machine nodes run against.

#[allow(clippy::module_inception)]
mod context;
mod registers;

pub use context::Context;
pub use registers::{ContextRegister, RegisterSet, RegisterSnapshot, Registers};
