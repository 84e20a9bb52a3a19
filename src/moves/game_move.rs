//! Moves and move lists.

use smallvec::SmallVec;

use crate::core::{PlayerId, UNDEFINED};

use super::{Action, ActionKind, Consequence, Then};

/// The combinator that collapsed several moves into this one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveSource {
    /// Built by `Append`.
    Append,
    /// Built by `Seq`.
    Sequence,
    /// Built by `AllCombinations`.
    Combination,
}

/// A legal move: actions to apply, then consequences to evaluate.
#[derive(Clone, Debug, PartialEq)]
pub struct Move {
    actions: SmallVec<[Action; 2]>,
    from: i32,
    to: i32,
    mover: PlayerId,
    then: Vec<Consequence>,
    source: Option<MoveSource>,
}

impl Move {
    /// Create a move with no actions and no sites.
    #[must_use]
    pub fn new(mover: PlayerId) -> Self {
        Self {
            actions: SmallVec::new(),
            from: UNDEFINED,
            to: UNDEFINED,
            mover,
            then: Vec::new(),
            source: None,
        }
    }

    /// A single-action move.
    #[must_use]
    pub fn with_action(mover: PlayerId, action: Action) -> Self {
        let mut mv = Self::new(mover);
        mv.actions.push(action);
        mv
    }

    /// A decision pass.
    #[must_use]
    pub fn pass(mover: PlayerId) -> Self {
        Self::with_action(mover, Action::decision(ActionKind::Pass))
    }

    /// Set the from and to sites (builder pattern).
    #[must_use]
    pub fn between(mut self, from: i32, to: i32) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    /// Set the provenance tag (builder pattern).
    #[must_use]
    pub fn from_source(mut self, source: MoveSource) -> Self {
        self.source = Some(source);
        self
    }

    // === Accessors ===

    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    #[must_use]
    pub fn from(&self) -> i32 {
        self.from
    }

    #[must_use]
    pub fn to(&self) -> i32 {
        self.to
    }

    #[must_use]
    pub fn mover(&self) -> PlayerId {
        self.mover
    }

    /// Pending consequences, in application order.
    #[must_use]
    pub fn then(&self) -> &[Consequence] {
        &self.then
    }

    #[must_use]
    pub fn source(&self) -> Option<MoveSource> {
        self.source
    }

    /// Check if the move is a single pass.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        self.actions.len() == 1 && self.actions[0].is_pass()
    }

    /// Check if any action is a decision.
    #[must_use]
    pub fn is_decision(&self) -> bool {
        self.actions.iter().any(|a| a.decision)
    }

    // === Mutation ===

    pub fn push_action(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub fn extend_actions(&mut self, actions: impl IntoIterator<Item = Action>) {
        self.actions.extend(actions);
    }

    /// Mark every action as a decision.
    pub fn mark_decisions(&mut self) {
        for action in &mut self.actions {
            action.decision = true;
        }
    }

    /// Append a consequence to the chain.
    pub fn push_then(&mut self, then: Consequence) {
        self.then.push(then);
    }

    pub fn extend_then(&mut self, then: impl IntoIterator<Item = Consequence>) {
        self.then.extend(then);
    }

    pub(crate) fn set_sites(&mut self, from: i32, to: i32) {
        self.from = from;
        self.to = to;
    }

    pub(crate) fn take_then(&mut self) -> Vec<Consequence> {
        std::mem::take(&mut self.then)
    }
}

/// An ordered list of moves.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Moves {
    moves: Vec<Move>,
}

impl Moves {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            moves: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    pub fn append(&mut self, other: Moves) {
        self.moves.extend(other.moves);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Move> {
        self.moves.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Move> {
        self.moves
    }

    /// Attach a consequence to every move.
    pub fn attach_then(&mut self, then: Option<&Then>) {
        if let Some(then) = then {
            for mv in &mut self.moves {
                mv.push_then(then.consequence());
            }
        }
    }
}

impl FromIterator<Move> for Moves {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        Self {
            moves: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Moves {
    type Item = Move;
    type IntoIter = std::vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter()
    }
}

impl<'a> IntoIterator for &'a Moves {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl From<Vec<Move>> for Moves {
    fn from(moves: Vec<Move>) -> Self {
        Self { moves }
    }
}
