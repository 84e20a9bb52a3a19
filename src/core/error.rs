//! Engine errors.
//!
//! Three kinds of failure surface as `Result`s:
//! - `GameError`: a game description that cannot be turned into a `Game`
//! - `BuildError`: a node constructor rejecting its operands
//! - `CompileError`: authoring problems found by the static validators
//!
//! Problems inside a well-formed game are not errors: evaluation is total.

use thiserror::Error;

use crate::board::SiteType;
use crate::ludeme::Report;

/// Game description errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("a game needs between 1 and 255 players, got {0}")]
    PlayerCount(usize),

    #[error("board has no sites")]
    EmptyBoard,

    #[error("graph edge ({0}, {1}) references a vertex out of range")]
    EdgeOutOfRange(usize, usize),

    #[error("graph edge ({0}, {1}) is declared twice")]
    DuplicateEdge(usize, usize),

    #[error("graph edge ({0}, {0}) is a self loop")]
    SelfLoop(usize),

    #[error("track {track} references {site_type:?} site {site} out of range")]
    TrackSiteOutOfRange {
        track: String,
        site_type: SiteType,
        site: usize,
    },

    #[error("hint on {site_type:?} site {site} is out of range")]
    HintSiteOutOfRange { site_type: SiteType, site: usize },

    #[error("component {name} is owned by player {owner} but the game has {players} players")]
    ComponentOwner {
        name: String,
        owner: u8,
        players: usize,
    },

    #[error("tile {name} declares path side {side} but has {sides} sides")]
    TileSide {
        name: String,
        side: usize,
        sides: usize,
    },
}

/// Node construction errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("{ludeme} needs at least {min} operand(s), got {got}")]
    TooFewOperands {
        ludeme: &'static str,
        min: usize,
        got: usize,
    },

    #[error("{ludeme}: {message}")]
    InvalidArgument {
        ludeme: &'static str,
        message: String,
    },
}

/// Rules compilation errors.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("{} authoring problem(s) found:\n{0}", .0.error_count())]
    Authoring(Report),
}

/// Game description result type.
pub type GameResult<T> = std::result::Result<T, GameError>;

/// Node construction result type.
pub type BuildResult<T> = std::result::Result<T, BuildError>;
