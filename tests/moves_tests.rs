//! Move generation, combinators and play through compiled rules.

use rust_ludeme::board::SiteType;
use rust_ludeme::core::{BoardConfig, GameConfig, GameRng, PlayerId, UNDEFINED};
use rust_ludeme::functions::booleans::{BooleanConstant, IsEmpty, Not};
use rust_ludeme::functions::ints::{IntConstant, Mover, Pips, Player};
use rust_ludeme::functions::regions::{Sites, SitesEmpty, SitesOccupied};
use rust_ludeme::game::{Game, Piece};
use rust_ludeme::moves::{
    apply, collect_moves, ActionKind, Add, AllCombinations, And, Append, ForEach, FromTo, If, MoveSource, Pass,
    Remove, Roll, Seq, Then,
};
use rust_ludeme::{BoxMoves, Context, MovesFunction, RegionFunction, Rules};

fn game(rows: usize, cols: usize, players: usize) -> Game {
    Game::from_config(GameConfig::new("grid", players, BoardConfig::square(rows, cols)).with_player_pieces("Disc"))
        .unwrap()
}

fn add_mover(sites: &[usize]) -> BoxMoves {
    Box::new(Add::new(Box::new(Mover), Box::new(Sites::constant(sites))))
}

// =============================================================================
// Combinator Tests
// =============================================================================

/// And yields the sum of its operands' moves, duplicates included.
#[test]
fn test_and_count_is_sum() {
    let game = game(3, 3, 2);
    let mut context = Context::new(&game, GameRng::new(1));
    let operands = [vec![0, 1, 2], vec![], vec![2, 5]];

    let and = And::all(operands.iter().map(|s| add_mover(s)).collect()).unwrap();
    let total: usize = operands.iter().map(|s| add_mover(s).eval(&mut context).len()).sum();

    assert_eq!(and.eval(&mut context).len(), total);
    assert_eq!(total, 5);
}

/// If dispatches on its condition; no else branch means no moves.
#[test]
fn test_if_dispatch() {
    let game = game(2, 2, 2);
    let mut context = Context::new(&game, GameRng::new(1));

    let m1 = || add_mover(&[0]);
    let m2 = || add_mover(&[3]);
    assert_eq!(
        If::new(BooleanConstant::boxed(true), m1(), Some(m2())).eval(&mut context),
        m1().eval(&mut context)
    );
    assert_eq!(
        If::new(BooleanConstant::boxed(false), m1(), Some(m2())).eval(&mut context),
        m2().eval(&mut context)
    );
    assert!(If::new(BooleanConstant::boxed(false), m1(), None).eval(&mut context).is_empty());
}

/// Seq on a 2-site board: the second step only exists after the first.
#[test]
fn test_seq_observes_first_operand() {
    let game = game(1, 2, 1);
    let mut context = Context::new(&game, GameRng::new(1));
    let after_first = Box::new(If::new(
        Box::new(Not::new(Box::new(IsEmpty::new(IntConstant::boxed(0))))),
        add_mover(&[1]),
        None,
    ));

    // Alone, the second step has nothing to do.
    assert!(after_first.eval(&mut context).is_empty());

    let seq = Seq::pair(add_mover(&[0]), after_first);
    let moves = seq.eval(&mut context);
    assert_eq!(moves.len(), 1);
    assert_eq!(moves.as_slice()[0].actions().len(), 2);
    assert_eq!(moves.as_slice()[0].source(), Some(MoveSource::Sequence));
    assert!(context.board().is_empty(SiteType::Cell, 0));

    // Playing the compound move fills both sites.
    apply(&mut context, &moves.as_slice()[0]);
    assert!(!context.board().is_empty(SiteType::Cell, 0));
    assert!(!context.board().is_empty(SiteType::Cell, 1));
}

/// Append builds one decision from a whole list; AllCombinations pairs two.
#[test]
fn test_append_and_combinations() {
    let game = game(2, 2, 2);
    let mut context = Context::new(&game, GameRng::new(1));

    let append = Append::new(Box::new(Add::new(Box::new(Mover), Box::new(SitesEmpty::board())))).eval(&mut context);
    assert_eq!(append.len(), 1);
    assert_eq!(append.as_slice()[0].source(), Some(MoveSource::Append));
    apply(&mut context, &append.as_slice()[0]);
    assert_eq!(SitesOccupied::any().eval(&mut context).len(), 4);

    let mut fresh = Context::new(&game, GameRng::new(1));
    let pairs = AllCombinations::new(add_mover(&[0, 1]), add_mover(&[2, 3])).eval(&mut fresh);
    assert_eq!(pairs.len(), 4);
    assert!(pairs.iter().all(|m| m.source() == Some(MoveSource::Combination)));
}

/// The lazy cursor yields exactly what eval yields.
#[test]
fn test_cursor_agrees_with_eval() {
    let game = game(3, 3, 2);
    let mut context = Context::new(&game, GameRng::new(1));
    context.state_mut().board_mut().push(SiteType::Cell, 4, Piece::new(1, PlayerId::new(1)));

    let tree = And::new(
        Box::new(If::new(
            Box::new(IsEmpty::new(IntConstant::boxed(4))),
            add_mover(&[4]),
            Some(Box::new(Add::new(Box::new(Mover), Box::new(SitesEmpty::board())))),
        )),
        Box::new(Pass::new()),
    );

    let eager = tree.eval(&mut context);
    let mut cursor = tree.cursor(&mut context);
    let lazy = collect_moves(cursor.as_mut(), &mut context);
    assert_eq!(lazy, eager);
    assert_eq!(eager.len(), 9);
    assert!(tree.can_move(&mut context));
}

// =============================================================================
// Consequence Tests
// =============================================================================

/// A placement whose consequence clears the opponent's pieces.
#[test]
fn test_then_applies_after_move() {
    let game = game(2, 2, 2);
    let mut context = Context::new(&game, GameRng::new(1));
    context.state_mut().board_mut().push(SiteType::Cell, 3, Piece::new(2, PlayerId::new(2)));

    let capture = Then::new(Remove::new(Box::new(SitesOccupied::by(IntConstant::boxed(2)))));
    let handle = capture.consequence();
    let place = Add::new(Box::new(Mover), Box::new(Sites::constant(&[0]))).with_then(capture);

    let moves = place.eval(&mut context);
    assert_eq!(moves.as_slice()[0].then(), [handle]);

    let applied = apply(&mut context, &moves.as_slice()[0]);
    assert!(context.board().is_empty(SiteType::Cell, 3));
    assert_eq!(context.board().who(SiteType::Cell, 0), PlayerId::new(1));
    assert_eq!(applied.actions().len(), 2);
    assert!(applied.actions()[0].decision);
    assert!(matches!(applied.actions()[1].kind, ActionKind::Remove { site: 3, .. }));
    assert_eq!(context.state().last_to(), 0);
}

// =============================================================================
// Rules Tests
// =============================================================================

/// Random playout of a placement game fills the board, deterministically.
#[test]
fn test_playout_is_deterministic() {
    let game = game(3, 3, 2);
    let rules = Rules::compile(&game, Box::new(Add::new(Box::new(Mover), Box::new(SitesEmpty::board())))).unwrap();

    let playout = |seed| {
        let mut context = Context::new(&game, GameRng::new(seed));
        let mut picker = GameRng::new(seed);
        let mut sites = Vec::new();
        while rules.can_move(&mut context) {
            let moves = rules.legal_moves(&mut context);
            let Some(mv) = picker.choose(moves.as_slice()).cloned() else {
                break;
            };
            sites.push(mv.to());
            rules.play(&mut context, &mv);
        }
        (sites, context.into_state())
    };

    let (sites, state) = playout(7);
    assert_eq!(sites.len(), 9);
    assert_eq!(state.turn(), 10);
    assert_eq!(playout(7).0, sites);
}

/// Rolling dice, then moving by a die value.
#[test]
fn test_roll_then_for_each_die() {
    let game = Game::from_config(
        GameConfig::new("race", 1, BoardConfig::square(1, 7))
            .with_player_pieces("Runner")
            .with_dice(1, 6),
    )
    .unwrap();
    let mut context = Context::new(&game, GameRng::new(3));
    context.state_mut().board_mut().push(SiteType::Cell, 0, Piece::new(1, PlayerId::new(1)));

    let roll = Rules::compile(&game, Box::new(Roll::new())).unwrap();
    let rolled = roll.legal_moves(&mut context);
    roll.apply(&mut context, &rolled.as_slice()[0]);
    let die = context.state().dice()[0];
    assert!((1..=6).contains(&die));

    // Move the runner from 0 to the site numbered by the die.
    let step = ForEach::die(Box::new(FromTo::new(
        Box::new(Sites::constant(&[0])),
        Box::new(Sites::new(vec![Box::new(Pips)])),
    )));
    let moves = Rules::compile(&game, Box::new(step)).unwrap().legal_moves(&mut context);
    assert_eq!(moves.len(), 1);
    assert_eq!(moves.as_slice()[0].to(), die);
    assert_eq!(context.pips(), UNDEFINED);
}

/// One placement per player, player numbers read from the Player register.
#[test]
fn test_for_each_player_placements() {
    let game = game(2, 2, 3);
    let mut context = Context::new(&game, GameRng::new(1));

    let each = ForEach::player(Box::new(Add::new(Box::new(Player), Box::new(Sites::constant(&[1])))));
    let owners: Vec<PlayerId> = each
        .eval(&mut context)
        .iter()
        .filter_map(|m| match &m.actions()[0].kind {
            ActionKind::Add { piece, .. } => Some(piece.who),
            _ => None,
        })
        .collect();
    assert_eq!(owners, vec![PlayerId::new(1), PlayerId::new(2), PlayerId::new(3)]);
}
