//! Components (piece types) and tracks.

use crate::board::SiteType;
use crate::core::{ComponentKind, PlayerId, TilePathConfig};

/// A piece type. Components are numbered from 1; 0 means "no piece".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Component {
    pub index: usize,
    pub name: String,
    pub owner: PlayerId,
    pub kind: ComponentKind,
}

impl Component {
    /// Is this a tile?
    #[must_use]
    pub fn is_tile(&self) -> bool {
        matches!(self.kind, ComponentKind::Tile { .. })
    }

    /// Is this a domino?
    #[must_use]
    pub fn is_domino(&self) -> bool {
        matches!(self.kind, ComponentKind::Domino { .. })
    }

    /// Number of sides of a tile (0 for other components).
    #[must_use]
    pub fn num_sides(&self) -> usize {
        match &self.kind {
            ComponentKind::Tile { sides, .. } => sides.len(),
            _ => 0,
        }
    }

    /// Terminus colour showing on board side `board_side` when the tile is
    /// turned by `rotation` steps clockwise.
    #[must_use]
    pub fn side_colour(&self, board_side: usize, rotation: i32) -> Option<i32> {
        match &self.kind {
            ComponentKind::Tile { sides, .. } if !sides.is_empty() => {
                let own = tile_side(board_side, rotation, sides.len());
                sides.get(own).copied()
            }
            _ => None,
        }
    }

    /// Follow a path of `colour` entering through board side `board_side`.
    ///
    /// Returns the board side the path leaves through.
    #[must_use]
    pub fn path_exit(&self, board_side: usize, rotation: i32, colour: i32) -> Option<usize> {
        let ComponentKind::Tile { sides, paths } = &self.kind else {
            return None;
        };
        let n = sides.len();
        if n == 0 {
            return None;
        }
        let own = tile_side(board_side, rotation, n);
        paths
            .iter()
            .filter(|p| p.colour == colour)
            .find_map(|p: &TilePathConfig| {
                if p.side1 == own {
                    Some(p.side2)
                } else if p.side2 == own {
                    Some(p.side1)
                } else {
                    None
                }
            })
            .map(|exit| board_side_of(exit, rotation, n))
    }

    /// Pip counts of a domino's two halves.
    #[must_use]
    pub fn pips(&self) -> Option<(i32, i32)> {
        match self.kind {
            ComponentKind::Domino { pips } => Some(pips),
            _ => None,
        }
    }
}

/// Tile side facing board side `board_side` at `rotation`.
fn tile_side(board_side: usize, rotation: i32, n: usize) -> usize {
    let n = n as i32;
    (board_side as i32 - rotation).rem_euclid(n) as usize
}

/// Board side faced by tile side `own` at `rotation`.
fn board_side_of(own: usize, rotation: i32, n: usize) -> usize {
    let n = n as i32;
    (own as i32 + rotation).rem_euclid(n) as usize
}

/// A named track of board sites.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub index: usize,
    pub name: String,
    pub owner: PlayerId,
    pub site_type: SiteType,
    pub sites: Vec<usize>,
}
