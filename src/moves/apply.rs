//! Move application.

use smallvec::SmallVec;
use tracing::{trace, warn};

use crate::context::{Context, ContextRegister, RegisterSet};

use super::{Action, ActionKind, Move};

const THEN_REGISTERS: RegisterSet = RegisterSet::of(ContextRegister::From).with(ContextRegister::To);

/// Apply a move to the context's state and return its applied form.
///
/// Actions run in order, then the move becomes the last move and its
/// destination is marked visited. Each consequence in the chain is then
/// evaluated with From and To set to the move's sites, and every
/// consequence move is applied in turn.
///
/// The applied form lists every action that ran, consequences included,
/// with dice rolls replaced by the values rolled. It has no pending
/// consequences, so applying it elsewhere replays the same changes.
pub fn apply(context: &mut Context<'_>, mv: &Move) -> Move {
    let mut applied = Move::new(mv.mover()).between(mv.from(), mv.to());
    if let Some(source) = mv.source() {
        applied = applied.from_source(source);
    }
    for action in mv.actions() {
        applied.push_action(apply_action(context, action));
    }

    context.state_mut().set_last_move(mv.from(), mv.to());
    if let Ok(to) = usize::try_from(mv.to()) {
        context.state_mut().visit(to);
    }

    for then in mv.then() {
        let consequences = context.with_saved_registers(THEN_REGISTERS, |context| {
            context.set_from(mv.from());
            context.set_to(mv.to());
            then.moves().eval(context)
        });
        trace!(ludeme = then.moves().name(), count = consequences.len(), "applying consequences");
        for consequence in &consequences {
            let applied_consequence = apply(context, consequence);
            applied.extend_actions(applied_consequence.actions().iter().cloned());
        }
    }

    // Consequences do not replace the move that caused them.
    context.state_mut().set_last_move(mv.from(), mv.to());
    applied
}

fn apply_action(context: &mut Context<'_>, action: &Action) -> Action {
    let game = context.game();
    let board = context.state_mut().board_mut();
    let done = match &action.kind {
        ActionKind::Pass | ActionKind::SetDice { .. } | ActionKind::Roll => true,
        ActionKind::Add { site_type, site, piece } => board.push(*site_type, *site, *piece),
        ActionKind::Remove { site_type, site } => board.pop(*site_type, *site).is_some(),
        ActionKind::Move { site_type, from, to } => match board.pop(*site_type, *from) {
            Some(piece) => {
                if !game.is_stacking() {
                    board.pop(*site_type, *to);
                }
                board.push(*site_type, *to, piece)
            }
            None => false,
        },
        ActionKind::SetValue { site_type, site, value } => board.update_top(*site_type, *site, |p| p.value = *value),
        ActionKind::SetState { site_type, site, state } => board.update_top(*site_type, *site, |p| p.state = *state),
    };
    if !done {
        warn!(?action, "action does not fit the current state, skipped");
    }

    match &action.kind {
        ActionKind::Roll => {
            let values: SmallVec<[i32; 4]> = match game.dice() {
                Some(dice) => (0..dice.count).map(|_| context.rng_mut().roll(dice.faces)).collect(),
                None => SmallVec::new(),
            };
            context.state_mut().set_dice(values.iter().copied());
            Action {
                kind: ActionKind::SetDice { values },
                decision: action.decision,
            }
        }
        ActionKind::SetDice { values } => {
            context.state_mut().set_dice(values.iter().copied());
            action.clone()
        }
        _ => action.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::SiteType;
    use crate::core::{BoardConfig, GameConfig, GameRng, PlayerId};
    use crate::functions::ints::{IntConstant, To};
    use crate::functions::regions::Sites;
    use crate::game::{Game, Piece};
    use crate::moves::{MovesFunction, Remove, SetValue, Then};

    fn test_game() -> Game {
        Game::from_config(
            GameConfig::new("t", 2, BoardConfig::square(1, 3))
                .with_player_pieces("Disc")
                .with_dice(2, 6),
        )
        .unwrap()
    }

    fn disc(who: u8) -> Piece {
        Piece::new(usize::from(who), PlayerId::new(who))
    }

    #[test]
    fn test_apply_move_with_capture() {
        let game = test_game();
        let mut context = Context::new(&game, GameRng::new(1));
        let board = context.state_mut().board_mut();
        board.push(SiteType::Cell, 0, disc(1));
        board.push(SiteType::Cell, 1, disc(2));

        let mv = Move::with_action(
            PlayerId::new(1),
            Action::decision(ActionKind::Move {
                site_type: SiteType::Cell,
                from: 0,
                to: 1,
            }),
        )
        .between(0, 1);
        let applied = apply(&mut context, &mv);

        assert_eq!(applied, mv);
        assert!(context.board().is_empty(SiteType::Cell, 0));
        assert_eq!(context.board().size_stack(SiteType::Cell, 1), 1);
        assert_eq!(context.board().who(SiteType::Cell, 1), PlayerId::new(1));
        assert_eq!(context.state().last_to(), 1);
        assert!(context.state().is_visited(1));
    }

    #[test]
    fn test_apply_runs_consequences_with_move_sites() {
        let game = test_game();
        let mut context = Context::new(&game, GameRng::new(1));
        context.state_mut().board_mut().push(SiteType::Cell, 2, disc(1));
        context.set_to(-1);

        // Consequence: set the value of the piece on the move's destination.
        let then = Then::new(SetValue::new(Box::new(To), IntConstant::boxed(7)));
        let mut mv = Move::pass(PlayerId::new(1)).between(2, 2);
        mv.push_then(then.consequence());

        let applied = apply(&mut context, &mv);

        assert_eq!(context.board().value(SiteType::Cell, 2), 7);
        assert_eq!(applied.actions().len(), 2);
        assert!(applied.then().is_empty());
        assert_eq!(context.to(), -1);
    }

    #[test]
    fn test_consequence_keeps_last_move() {
        let game = test_game();
        let mut context = Context::new(&game, GameRng::new(1));
        let board = context.state_mut().board_mut();
        board.push(SiteType::Cell, 0, disc(1));
        board.push(SiteType::Cell, 2, disc(2));

        let mut mv = Move::with_action(
            PlayerId::new(1),
            Action::decision(ActionKind::Move {
                site_type: SiteType::Cell,
                from: 0,
                to: 1,
            }),
        )
        .between(0, 1);
        mv.push_then(Then::new(Remove::new(Box::new(Sites::constant(&[2])))).consequence());
        apply(&mut context, &mv);

        assert!(context.board().is_empty(SiteType::Cell, 2));
        assert_eq!(context.state().last_from(), 0);
        assert_eq!(context.state().last_to(), 1);
    }

    #[test]
    fn test_roll_is_recorded_and_replayable() {
        let game = test_game();
        let mut context = Context::new(&game, GameRng::new(42));
        let roll = Move::with_action(PlayerId::new(1), Action::decision(ActionKind::Roll));

        let applied = apply(&mut context, &roll);
        let rolled: Vec<i32> = context.state().dice().iter().copied().collect();
        assert_eq!(rolled.len(), 2);
        assert!(rolled.iter().all(|v| (1..=6).contains(v)));

        let mut replay = Context::new(&game, GameRng::new(7));
        apply(&mut replay, &applied);
        assert_eq!(replay.state().dice(), context.state().dice());
    }

    #[test]
    fn test_unfit_action_is_skipped() {
        let game = test_game();
        let mut context = Context::new(&game, GameRng::new(1));
        let remove = Move::with_action(
            PlayerId::new(1),
            Action::decision(ActionKind::Remove {
                site_type: SiteType::Cell,
                site: 1,
            }),
        );

        let before = context.state().board().clone();
        apply(&mut context, &remove);
        assert_eq!(context.state().board(), &before);
    }

    #[test]
    fn test_generated_moves_apply() {
        let game = test_game();
        let mut context = Context::new(&game, GameRng::new(1));
        context.state_mut().board_mut().push(SiteType::Cell, 1, disc(2));

        let moves = Remove::new(Box::new(Sites::constant(&[0, 1]))).eval(&mut context);
        assert_eq!(moves.len(), 1);
        apply(&mut context, &moves.as_slice()[0]);
        assert!(context.board().is_empty(SiteType::Cell, 1));
    }
}
