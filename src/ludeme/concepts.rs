//! Concepts: semantic tags used by game analytics.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

/// A semantic tag attached to a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Concept {
    // Moves
    PassDecision,
    AddDecision,
    RemoveEffect,
    FromToDecision,
    SetValue,
    ForEachIteration,
    Conjunction,
    ConditionalMoves,
    MoveSequence,
    AppendMoves,
    CombinationMoves,
    ThenConsequence,
    // Board queries
    Loop,
    Visited,
    Flat,
    PipsMatch,
    SidesMatch,
    Dice,
    Parity,
    Hint,
    Track,
    Edge,
    Stacking,
    SiteState,
    PieceValue,
    Support,
    RowRegion,
    EmptyRegion,
    OccupiedRegion,
    CellRegion,
    EdgeRegion,
    // Arithmetic and logic
    Addition,
    Conjunct,
    Disjunct,
    Negation,
    Equality,
    Membership,
    SetUnion,
    SetIntersection,
    SetDifference,
    Results,
    Conditional,
    CanMove,
    Count,
}

impl Concept {
    /// Number of concepts.
    pub const COUNT: usize = Concept::Count as usize + 1;

    const fn bit(self) -> u128 {
        1 << (self as u8)
    }
}

/// A bitset of concepts.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConceptSet(u128);

impl ConceptSet {
    pub const EMPTY: ConceptSet = ConceptSet(0);

    #[must_use]
    pub const fn of(concept: Concept) -> Self {
        Self(concept.bit())
    }

    #[must_use]
    pub fn from_concepts(concepts: &[Concept]) -> Self {
        concepts.iter().fold(Self::EMPTY, |set, &c| set.with(c))
    }

    #[must_use]
    pub const fn with(self, concept: Concept) -> Self {
        Self(self.0 | concept.bit())
    }

    #[must_use]
    pub const fn contains(self, concept: Concept) -> bool {
        self.0 & concept.bit() != 0
    }

    #[must_use]
    pub const fn union(self, other: ConceptSet) -> Self {
        Self(self.0 | other.0)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Bit index of every concept in the set.
    pub fn indices(self) -> impl Iterator<Item = usize> {
        (0..Concept::COUNT).filter(move |i| self.0 & (1 << i) != 0)
    }
}

impl From<Concept> for ConceptSet {
    fn from(concept: Concept) -> Self {
        Self::of(concept)
    }
}

impl BitOr for ConceptSet {
    type Output = ConceptSet;

    fn bitor(self, rhs: ConceptSet) -> ConceptSet {
        self.union(rhs)
    }
}

impl BitOrAssign for ConceptSet {
    fn bitor_assign(&mut self, rhs: ConceptSet) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for ConceptSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConceptSet({:#x})", self.0)
    }
}
