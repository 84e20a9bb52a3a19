//! # rust-ludeme
//!
//! Expression evaluation and move generation for a general game-rules
//! platform. A game's rules are a tree of nodes ("ludemes"); evaluating the
//! tree against a context yields integers, booleans, regions, integer
//! arrays or lists of legal moves.
//!
//! ## Design Principles
//!
//! 1. **Trees are immutable**: after `Rules::compile`, nodes never change.
//!    All per-evaluation state lives in `Context`.
//!
//! 2. **Registers, not closures**: iteration nodes (`ForEach`, `FromTo`,
//!    `Results`) publish the current item in a context register and
//!    restore it afterwards. Every node declares what it reads and writes.
//!
//! 3. **Fold once**: static subtrees are evaluated during preprocessing;
//!    flags, concepts and register sets are folded bottom-up at compile
//!    time.
//!
//! ## Architecture
//!
//! - **Persistent state**: container stores use `im` vectors, so the
//!   temporary contexts `Seq` plays moves in are O(1) to create.
//!
//! - **Injected randomness**: every context owns a seeded `GameRng`.
//!
//! - **Lazy legality**: `can_move` walks a cursor and stops at the first
//!   legal move.
//!
//! ## Modules
//!
//! - `core`: players, RNG, configuration, errors
//! - `board`: site types, directions, topology
//! - `game`: game descriptor, state, regions
//! - `context`: registers and the evaluation context
//! - `ludeme`: the node contract, flags, concepts, diagnostics
//! - `functions`: int, boolean, region and int-array nodes
//! - `moves`: actions, moves, generators and combinators
//! - `rules`: compilation and legal-move entry points

pub mod board;
pub mod context;
pub mod core;
pub mod functions;
pub mod game;
pub mod ludeme;
pub mod moves;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    BoardConfig, BuildError, BuildResult, CompileError, ComponentConfig, EngineOptions, GameConfig,
    GameError, GameRng, GameRngState, PlayerId, OFF, UNDEFINED,
};

pub use crate::board::{Direction, DirectionSet, SiteType, Topology};

pub use crate::game::{Game, GameState, Piece, Region};

pub use crate::context::{Context, ContextRegister, RegisterSet};

pub use crate::ludeme::{Concept, ConceptSet, GameFlags, Ludeme, LudemeSummary, Report};

pub use crate::functions::{
    BooleanFunction, BoxBool, BoxInt, BoxIntArray, BoxRegion, IntArrayFunction, IntFunction,
    RegionFunction,
};

pub use crate::moves::{
    Action, ActionKind, BoxMoves, Consequence, Move, Moves, MovesCursor, MovesFunction, Then,
};

pub use crate::rules::Rules;
