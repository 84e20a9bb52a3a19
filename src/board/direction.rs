//! Site types and directions.

use serde::{Deserialize, Serialize};

/// The kind of graph element a site index refers to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SiteType {
    #[default]
    Cell,
    Vertex,
    Edge,
}

impl SiteType {
    /// All site types, in storage order.
    pub const ALL: [SiteType; 3] = [SiteType::Cell, SiteType::Vertex, SiteType::Edge];

    /// Storage slot of this site type.
    #[must_use]
    pub const fn slot(self) -> usize {
        match self {
            SiteType::Cell => 0,
            SiteType::Vertex => 1,
            SiteType::Edge => 2,
        }
    }
}

/// An absolute direction between two neighbouring sites.
///
/// Grid boards label steps with compass directions. Graph boards and
/// edge-to-edge steps have no geometry and use `Adjacent`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
    Adjacent,
}

impl Direction {
    /// Compass directions in clockwise order, starting north.
    pub const COMPASS: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    /// Orthogonal directions in clockwise order, starting north.
    pub const ORTHOGONAL: [Direction; 4] = [Direction::N, Direction::E, Direction::S, Direction::W];

    /// Is this one of N, E, S, W?
    #[must_use]
    pub const fn is_orthogonal(self) -> bool {
        matches!(self, Direction::N | Direction::E | Direction::S | Direction::W)
    }

    /// Is this one of NE, SE, SW, NW?
    #[must_use]
    pub const fn is_diagonal(self) -> bool {
        matches!(self, Direction::NE | Direction::SE | Direction::SW | Direction::NW)
    }

    /// Index among the orthogonal directions (N=0, E=1, S=2, W=3).
    #[must_use]
    pub fn orthogonal_index(self) -> Option<usize> {
        Self::ORTHOGONAL.iter().position(|&d| d == self)
    }

    /// The direction pointing back.
    #[must_use]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::N => Direction::S,
            Direction::NE => Direction::SW,
            Direction::E => Direction::W,
            Direction::SE => Direction::NW,
            Direction::S => Direction::N,
            Direction::SW => Direction::NE,
            Direction::W => Direction::E,
            Direction::NW => Direction::SE,
            Direction::Adjacent => Direction::Adjacent,
        }
    }

    /// Row and column offset of a compass step.
    #[must_use]
    pub(crate) const fn offset(self) -> (isize, isize) {
        match self {
            Direction::N => (1, 0),
            Direction::NE => (1, 1),
            Direction::E => (0, 1),
            Direction::SE => (-1, 1),
            Direction::S => (-1, 0),
            Direction::SW => (-1, -1),
            Direction::W => (0, -1),
            Direction::NW => (1, -1),
            Direction::Adjacent => (0, 0),
        }
    }
}

/// A set of directions used to walk the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DirectionSet {
    /// N, E, S, W and graph adjacency.
    #[default]
    Orthogonal,
    /// NE, SE, SW, NW.
    Diagonal,
    /// Every direction.
    All,
}

impl DirectionSet {
    /// Check if a step direction belongs to this set.
    #[must_use]
    pub const fn contains(self, direction: Direction) -> bool {
        match self {
            DirectionSet::Orthogonal => {
                direction.is_orthogonal() || matches!(direction, Direction::Adjacent)
            }
            DirectionSet::Diagonal => direction.is_diagonal(),
            DirectionSet::All => true,
        }
    }

    /// The set whose connectivity can cross a barrier built with this one.
    ///
    /// Orthogonally connected stones only seal a region against orthogonal
    /// leaks when diagonal steps are blocked too, and the other way round.
    #[must_use]
    pub const fn dual(self) -> DirectionSet {
        match self {
            DirectionSet::Orthogonal => DirectionSet::All,
            DirectionSet::Diagonal | DirectionSet::All => DirectionSet::Orthogonal,
        }
    }
}
