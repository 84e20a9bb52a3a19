//! Game and engine configuration types.
//!
//! Hosts describe the equipment of a game declaratively:
//! - `BoardConfig`: the board topology (square grid or explicit graph)
//! - `ContainerConfig`: extra containers (hands) beyond the board
//! - `ComponentConfig`: pieces, tiles and dominoes
//! - `DiceConfig`, `TrackConfig`, `HintConfig`: optional equipment
//! - `EngineOptions`: evaluation switches
//!
//! `Game::from_config` validates a `GameConfig` and builds the immutable
//! descriptor that evaluation runs against. Rules themselves are not part
//! of the configuration: they are built as node graphs in Rust.

use serde::{Deserialize, Serialize};

use crate::board::SiteType;

/// Board topology description.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardConfig {
    /// A rectangular grid of square cells, with its vertices and edges.
    Square { rows: usize, cols: usize },
    /// An explicit graph: sites are vertices joined by edges.
    ///
    /// `outer` lists the boundary vertices. When it is empty every vertex
    /// is treated as a boundary vertex.
    Graph {
        vertices: usize,
        edges: Vec<(usize, usize)>,
        outer: Vec<usize>,
    },
}

impl BoardConfig {
    /// Create a square board description.
    #[must_use]
    pub fn square(rows: usize, cols: usize) -> Self {
        Self::Square { rows, cols }
    }

    /// Create a graph board description with every vertex on the boundary.
    #[must_use]
    pub fn graph(vertices: usize, edges: Vec<(usize, usize)>) -> Self {
        Self::Graph {
            vertices,
            edges,
            outer: Vec::new(),
        }
    }
}

/// A side-to-side coloured path drawn on a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilePathConfig {
    pub side1: usize,
    pub side2: usize,
    pub colour: i32,
}

/// What kind of component a piece type is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComponentKind {
    /// A plain piece.
    Piece,
    /// A tile with one terminus colour per side and coloured paths
    /// joining pairs of sides. Side 0 faces north at rotation 0; sides
    /// are numbered clockwise.
    Tile {
        sides: Vec<i32>,
        paths: Vec<TilePathConfig>,
    },
    /// A domino with the pip counts of its two halves.
    Domino { pips: (i32, i32) },
}

/// A component (piece type) description.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentConfig {
    pub name: String,
    /// Owning player, 0 for shared components.
    pub owner: u8,
    pub kind: ComponentKind,
}

impl ComponentConfig {
    /// Create a plain piece owned by `owner`.
    pub fn piece(name: impl Into<String>, owner: u8) -> Self {
        Self {
            name: name.into(),
            owner,
            kind: ComponentKind::Piece,
        }
    }

    /// Create a shared tile.
    pub fn tile(name: impl Into<String>, sides: Vec<i32>, paths: Vec<TilePathConfig>) -> Self {
        Self {
            name: name.into(),
            owner: 0,
            kind: ComponentKind::Tile { sides, paths },
        }
    }

    /// Create a shared domino.
    pub fn domino(name: impl Into<String>, pips: (i32, i32)) -> Self {
        Self {
            name: name.into(),
            owner: 0,
            kind: ComponentKind::Domino { pips },
        }
    }
}

/// Extra container (a hand or a reserve) beyond the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerConfig {
    pub name: String,
    pub owner: u8,
    pub sites: usize,
}

/// Dice equipment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceConfig {
    pub count: usize,
    pub faces: u32,
}

/// A named track: an ordered list of board sites.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackConfig {
    pub name: String,
    pub owner: u8,
    pub site_type: SiteType,
    pub sites: Vec<usize>,
}

/// A puzzle hint attached to a board site.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintConfig {
    pub site_type: SiteType,
    pub site: usize,
    pub value: i32,
}

/// Evaluation switches.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOptions {
    /// Cache the value of static nodes during preprocessing.
    pub memoize_static: bool,

    /// Minimum number of sites in a closed walk for `IsLoop` to accept it
    /// when no site is enclosed.
    pub min_loop_length: usize,

    /// Check that nested evaluations restore every register they write.
    /// Only checked in debug builds.
    pub check_register_leaks: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            memoize_static: true,
            min_loop_length: 4,
            check_register_leaks: true,
        }
    }
}

impl EngineOptions {
    /// Enable or disable static memoization.
    #[must_use]
    pub fn with_memoize_static(mut self, memoize: bool) -> Self {
        self.memoize_static = memoize;
        self
    }

    /// Set the minimum closed-walk length for `IsLoop`.
    #[must_use]
    pub fn with_min_loop_length(mut self, length: usize) -> Self {
        self.min_loop_length = length;
        self
    }

    /// Enable or disable register leak checks.
    #[must_use]
    pub fn with_register_leak_checks(mut self, check: bool) -> Self {
        self.check_register_leaks = check;
        self
    }
}

/// Full game description.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Human-readable name (for diagnostics).
    pub name: String,

    /// Number of players.
    pub players: usize,

    /// Board topology (container 0).
    pub board: BoardConfig,

    /// Additional containers, numbered from 1.
    pub containers: Vec<ContainerConfig>,

    /// Components, numbered from 1 (0 means "no piece").
    pub components: Vec<ComponentConfig>,

    /// Dice, if the game uses any.
    pub dice: Option<DiceConfig>,

    /// Tracks, numbered from 0.
    pub tracks: Vec<TrackConfig>,

    /// Puzzle hints.
    pub hints: Vec<HintConfig>,

    /// Whether pieces may be stacked on the same site.
    pub stacking: bool,

    /// Evaluation switches.
    pub options: EngineOptions,
}

impl GameConfig {
    /// Create a configuration with a board and no other equipment.
    pub fn new(name: impl Into<String>, players: usize, board: BoardConfig) -> Self {
        Self {
            name: name.into(),
            players,
            board,
            containers: Vec::new(),
            components: Vec::new(),
            dice: None,
            tracks: Vec::new(),
            hints: Vec::new(),
            stacking: false,
            options: EngineOptions::default(),
        }
    }

    /// Add a component (builder pattern).
    #[must_use]
    pub fn with_component(mut self, component: ComponentConfig) -> Self {
        self.components.push(component);
        self
    }

    /// Add one plain piece per player, named `"<name><player>"`.
    #[must_use]
    pub fn with_player_pieces(mut self, name: &str) -> Self {
        for player in 1..=self.players {
            self.components
                .push(ComponentConfig::piece(format!("{name}{player}"), player as u8));
        }
        self
    }

    /// Add a container (builder pattern).
    #[must_use]
    pub fn with_container(mut self, container: ContainerConfig) -> Self {
        self.containers.push(container);
        self
    }

    /// Add dice (builder pattern).
    #[must_use]
    pub fn with_dice(mut self, count: usize, faces: u32) -> Self {
        self.dice = Some(DiceConfig { count, faces });
        self
    }

    /// Add a track (builder pattern).
    #[must_use]
    pub fn with_track(mut self, track: TrackConfig) -> Self {
        self.tracks.push(track);
        self
    }

    /// Add a hint (builder pattern).
    #[must_use]
    pub fn with_hint(mut self, site_type: SiteType, site: usize, value: i32) -> Self {
        self.hints.push(HintConfig {
            site_type,
            site,
            value,
        });
        self
    }

    /// Allow stacking (builder pattern).
    #[must_use]
    pub fn stacking(mut self) -> Self {
        self.stacking = true;
        self
    }

    /// Replace the engine options (builder pattern).
    #[must_use]
    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }
}
