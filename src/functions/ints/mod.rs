//! Integer nodes.
//!
//! - register readers: `From`, `To`, `Between`, `Site`, `Level`, `Value`,
//!   `Player`, `Track`, `Pips`, plus `Edge` and `Hint` with their lookup forms
//! - state queries: `Mover`, `LastFrom`, `LastTo`, `WhoAt`, `StateAt`...
//! - arithmetic: `IntConstant`, `Add`, `CountSites`

mod board;
mod lookup;
mod math;
mod registers;

pub use board::{CountSites, LastFrom, LastTo, Mover, PieceAt, RotationAt, StateAt, ValueAt, WhatAt, WhoAt};
pub use lookup::{Edge, Hint};
pub use math::{Add, IntConstant};
pub use registers::{Between, From, Level, Pips, Player, Site, To, Track, Value};
