//! Compiled rules: a validated, preprocessed moves tree.
//!
//! `Rules::compile` is the one place a tree goes through the static passes:
//!
//! 1. `missing_requirement` and `will_crash` over the whole tree, into one
//!    `Report`. Any error aborts with `CompileError::Authoring`; warnings
//!    are kept on the compiled rules.
//! 2. `preprocess`: static subtrees fold to constants.
//! 3. `LudemeSummary`: flags, concepts and register sets, folded once.
//!
//! After that the tree is immutable and shared by every context playing
//! the game.

use tracing::{debug, trace};

use crate::context::Context;
use crate::core::CompileError;
use crate::game::Game;
use crate::ludeme::{Ludeme, LudemeSummary, Report};
use crate::moves::{apply, BoxMoves, Move, Moves, MovesFunction};

/// A compiled moves tree.
#[derive(Debug)]
pub struct Rules {
    moves: BoxMoves,
    summary: LudemeSummary,
    warnings: Report,
}

impl Rules {
    /// Validate, preprocess and summarize a moves tree for `game`.
    pub fn compile(game: &Game, mut moves: BoxMoves) -> Result<Self, CompileError> {
        let mut report = Report::new();
        let missing = moves.missing_requirement(game, &mut report);
        let crash = moves.will_crash(game, &mut report);
        if report.is_error() {
            debug!(game = game.name(), missing, crash, errors = report.error_count(), "rules rejected");
            return Err(CompileError::Authoring(report));
        }

        moves.preprocess(game);
        let summary = LudemeSummary::of(moves.as_ludeme(), game);
        debug!(
            game = game.name(),
            nodes = summary.nodes,
            flags = ?summary.game_flags,
            warnings = report.len(),
            "rules compiled"
        );

        Ok(Self {
            moves,
            summary,
            warnings: report,
        })
    }

    /// The compiled tree.
    #[must_use]
    pub fn moves(&self) -> &dyn MovesFunction {
        self.moves.as_ref()
    }

    /// Folded capabilities of the tree.
    #[must_use]
    pub fn summary(&self) -> &LudemeSummary {
        &self.summary
    }

    /// Warnings found at compile time.
    #[must_use]
    pub fn warnings(&self) -> &Report {
        &self.warnings
    }

    /// Legal moves for the player to move.
    pub fn legal_moves(&self, context: &mut Context<'_>) -> Moves {
        let moves = context.check_register_leaks(self.moves.name(), |context| self.moves.eval(context));
        trace!(mover = ?context.mover(), count = moves.len(), "legal moves");
        moves
    }

    /// True if the player to move has a legal move.
    ///
    /// Stops at the first move found.
    pub fn can_move(&self, context: &mut Context<'_>) -> bool {
        context.check_register_leaks(self.moves.name(), |context| self.moves.can_move(context))
    }

    /// Apply a move without ending the turn. Returns the applied form.
    pub fn apply(&self, context: &mut Context<'_>, mv: &Move) -> Move {
        apply(context, mv)
    }

    /// Apply a move and pass the turn to the next player.
    pub fn play(&self, context: &mut Context<'_>, mv: &Move) -> Move {
        let applied = apply(context, mv);
        let players = context.game().players();
        context.state_mut().advance_turn(players);
        applied
    }
}
