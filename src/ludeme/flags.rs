//! Game flags: structural features a game exhibits.
//!
//! Flags are collected bottom-up over a rules tree and summarise what the
//! game needs from the platform (dice, stacking, tiles...). Evaluation never
//! reads them.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

/// A bitset of structural game features.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameFlags(u64);

impl GameFlags {
    pub const EMPTY: GameFlags = GameFlags(0);

    /// Moves read the origin site of the move being built.
    pub const USES_FROM_POSITIONS: GameFlags = GameFlags(1 << 0);
    /// Uses dice or any other random source.
    pub const STOCHASTIC: GameFlags = GameFlags(1 << 1);
    /// Pieces may stack.
    pub const STACKING: GameFlags = GameFlags(1 << 2);
    /// Tracks which sites were visited during the turn.
    pub const VISITED: GameFlags = GameFlags(1 << 3);
    /// Plays on cells.
    pub const CELL: GameFlags = GameFlags(1 << 4);
    /// Plays on vertices.
    pub const VERTEX: GameFlags = GameFlags(1 << 5);
    /// Plays on edges.
    pub const EDGE: GameFlags = GameFlags(1 << 6);
    /// Uses tracks.
    pub const TRACK: GameFlags = GameFlags(1 << 7);
    /// Uses per-site hints (puzzles).
    pub const HINTS: GameFlags = GameFlags(1 << 8);
    /// Pieces covering more than one site.
    pub const LARGE_PIECE: GameFlags = GameFlags(1 << 9);
    /// Pieces carry a rotation.
    pub const ROTATION: GameFlags = GameFlags(1 << 10);
    /// Pieces carry a local state.
    pub const SITE_STATE: GameFlags = GameFlags(1 << 11);
    /// Pieces carry a value.
    pub const PIECE_VALUE: GameFlags = GameFlags(1 << 12);
    /// Tiles with coloured paths.
    pub const TILES: GameFlags = GameFlags(1 << 13);
    /// Move sequences applied within one decision.
    pub const SEQUENCE: GameFlags = GameFlags(1 << 14);
    /// Moves that need a loop check.
    pub const LOOPS: GameFlags = GameFlags(1 << 15);
    /// Uses hand containers.
    pub const HANDS: GameFlags = GameFlags(1 << 16);

    const NAMES: [(GameFlags, &'static str); 17] = [
        (Self::USES_FROM_POSITIONS, "UsesFromPositions"),
        (Self::STOCHASTIC, "Stochastic"),
        (Self::STACKING, "Stacking"),
        (Self::VISITED, "Visited"),
        (Self::CELL, "Cell"),
        (Self::VERTEX, "Vertex"),
        (Self::EDGE, "Edge"),
        (Self::TRACK, "Track"),
        (Self::HINTS, "Hints"),
        (Self::LARGE_PIECE, "LargePiece"),
        (Self::ROTATION, "Rotation"),
        (Self::SITE_STATE, "SiteState"),
        (Self::PIECE_VALUE, "PieceValue"),
        (Self::TILES, "Tiles"),
        (Self::SEQUENCE, "Sequence"),
        (Self::LOOPS, "Loops"),
        (Self::HANDS, "Hands"),
    ];

    /// Raw bits.
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Check that every flag of `other` is set.
    #[must_use]
    pub const fn contains(self, other: GameFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Check whether any flag of `other` is set.
    #[must_use]
    pub const fn intersects(self, other: GameFlags) -> bool {
        self.0 & other.0 != 0
    }

    #[must_use]
    pub const fn union(self, other: GameFlags) -> GameFlags {
        GameFlags(self.0 | other.0)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Flag matching a site type.
    #[must_use]
    pub const fn for_site_type(site_type: crate::board::SiteType) -> GameFlags {
        match site_type {
            crate::board::SiteType::Cell => Self::CELL,
            crate::board::SiteType::Vertex => Self::VERTEX,
            crate::board::SiteType::Edge => Self::EDGE,
        }
    }
}

impl BitOr for GameFlags {
    type Output = GameFlags;

    fn bitor(self, rhs: GameFlags) -> GameFlags {
        self.union(rhs)
    }
}

impl BitOrAssign for GameFlags {
    fn bitor_assign(&mut self, rhs: GameFlags) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for GameFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(
                Self::NAMES
                    .iter()
                    .filter(|(flag, _)| self.contains(*flag))
                    .map(|(_, name)| name),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::SiteType;

    #[test]
    fn test_flag_algebra() {
        let flags = GameFlags::STACKING | GameFlags::STOCHASTIC;
        assert!(flags.contains(GameFlags::STACKING));
        assert!(!flags.contains(GameFlags::STACKING | GameFlags::TILES));
        assert!(flags.intersects(GameFlags::STACKING | GameFlags::TILES));
        assert!(GameFlags::EMPTY.is_empty());
    }

    #[test]
    fn test_flag_debug_lists_names() {
        let flags = GameFlags::VISITED | GameFlags::for_site_type(SiteType::Vertex);
        assert_eq!(format!("{flags:?}"), "{\"Visited\", \"Vertex\"}");
    }
}
