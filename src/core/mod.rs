//! Core engine types: players, RNG, configuration, errors.
//!
//! This module contains the fundamental building blocks that are
//! game-agnostic. Games describe their equipment via `GameConfig`.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;

pub use player::PlayerId;
pub use rng::{GameRng, GameRngState};
pub use config::{
    BoardConfig, ComponentConfig, ComponentKind, ContainerConfig, DiceConfig, EngineOptions,
    GameConfig, HintConfig, TilePathConfig, TrackConfig,
};
pub use error::{BuildError, BuildResult, CompileError, GameError, GameResult};

/// Value of an unset register and of failed lookups.
pub const UNDEFINED: i32 = -1;

/// Index of an off-board site.
pub const OFF: i32 = -1;
