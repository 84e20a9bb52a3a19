//! Atomic state changes.
//!
//! A move is a list of actions applied in order. Actions name the sites
//! they touch explicitly so an applied move can be replayed on another
//! context without re-evaluating anything.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::SiteType;
use crate::game::Piece;

/// What an action does.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Do nothing.
    Pass,

    /// Put a piece on top of a site.
    Add {
        site_type: SiteType,
        site: usize,
        piece: Piece,
    },

    /// Take the top piece off a site.
    Remove { site_type: SiteType, site: usize },

    /// Move the top piece of `from` to `to`. Without stacking, a piece
    /// already on `to` is captured.
    Move {
        site_type: SiteType,
        from: usize,
        to: usize,
    },

    /// Set the value of the top piece of a site.
    SetValue {
        site_type: SiteType,
        site: usize,
        value: i32,
    },

    /// Set the local state of the top piece of a site.
    SetState {
        site_type: SiteType,
        site: usize,
        state: i32,
    },

    /// Roll every die with the context's random source.
    Roll,

    /// Set the dice to known values. Applied rolls are recorded this way.
    SetDice { values: SmallVec<[i32; 4]> },
}

/// One atomic step of a move.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    /// What to do.
    pub kind: ActionKind,

    /// True if the action is the choice a player makes, as opposed to a
    /// side effect of that choice.
    pub decision: bool,
}

impl Action {
    /// Create an effect (non-decision) action.
    #[must_use]
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            decision: false,
        }
    }

    /// Create a decision action.
    #[must_use]
    pub fn decision(kind: ActionKind) -> Self {
        Self {
            kind,
            decision: true,
        }
    }

    /// Mark the action as a decision (builder pattern).
    #[must_use]
    pub fn as_decision(mut self) -> Self {
        self.decision = true;
        self
    }

    /// Check if this action is a pass.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self.kind, ActionKind::Pass)
    }
}
