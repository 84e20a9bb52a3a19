//! Property tests for the algebra laws and the evaluation contracts.

use proptest::prelude::*;

use rust_ludeme::board::SiteType;
use rust_ludeme::context::ContextRegister;
use rust_ludeme::core::{BoardConfig, GameConfig, GameRng, PlayerId};
use rust_ludeme::functions::arrays::{Difference, Results, Union, Values};
use rust_ludeme::functions::booleans::{BooleanConstant, Equals, IsIn};
use rust_ludeme::functions::ints::{self, IntConstant, Level, Mover, Site, To, Value};
use rust_ludeme::functions::regions::Sites;
use rust_ludeme::game::{dedup_ordered, Game, Piece};
use rust_ludeme::moves::{Add, And, ForEach, FromTo, If, Seq};
use rust_ludeme::{
    BooleanFunction, BoxInt, BoxMoves, Context, IntArrayFunction, Ludeme, MovesFunction, RegisterSet,
};

fn game(rows: usize, cols: usize) -> Game {
    Game::from_config(GameConfig::new("props", 2, BoardConfig::square(rows, cols)).with_player_pieces("Disc"))
        .unwrap()
}

fn values(values: &[i32]) -> Box<Values> {
    Box::new(Values::constant(values))
}

fn add_mover(sites: &[usize]) -> BoxMoves {
    Box::new(Add::new(Box::new(Mover), Box::new(Sites::constant(sites))))
}

fn sorted(mut values: Vec<i32>) -> Vec<i32> {
    values.sort_unstable();
    values
}

/// A sum of constants and register readers, chosen by `picks`.
fn int_tree(picks: &[u8]) -> BoxInt {
    let leaf = |pick: u8| -> BoxInt {
        match pick % 5 {
            0 => Box::new(Site),
            1 => Box::new(To),
            2 => Box::new(Value),
            3 => Box::new(Level),
            _ => IntConstant::boxed(i32::from(pick)),
        }
    };
    picks.iter().skip(1).fold(leaf(picks[0]), |acc, &pick| Box::new(ints::Add::new(acc, leaf(pick))))
}

/// A one-site region at `register + tree`.
fn offset_site(register: BoxInt, picks: &[u8]) -> Box<Sites> {
    Box::new(Sites::new(vec![Box::new(ints::Add::new(register, int_tree(picks)))]))
}

/// A moves node that writes registers and reads them again below, chosen
/// by `kind`.
fn register_writer(kind: u8, picks: &[u8], sites: &[usize]) -> BoxMoves {
    let guarded = || -> BoxMoves {
        Box::new(If::new(
            Box::new(Equals::new(Box::new(Site), int_tree(picks))),
            Box::new(Add::new(Box::new(Mover), offset_site(Box::new(Site), picks))),
            Some(add_mover(sites)),
        ))
    };
    let for_each = || -> BoxMoves {
        Box::new(ForEach::site(
            Box::new(Sites::constant(sites)),
            Box::new(Add::new(Box::new(Mover), offset_site(Box::new(Site), picks))),
        ))
    };
    match kind % 4 {
        0 => Box::new(
            FromTo::new(Box::new(Sites::constant(sites)), offset_site(Box::new(ints::From), picks))
                .when(Box::new(Equals::new(Box::new(To), int_tree(picks)))),
        ),
        1 => for_each(),
        2 => guarded(),
        _ => Box::new(Seq::new(vec![guarded(), for_each()]).unwrap()),
    }
}

/// Evaluate with a fresh trace and return the registers read.
fn traced(context: &mut Context<'_>, eval: impl FnOnce(&mut Context<'_>)) -> RegisterSet {
    context.take_read_trace();
    eval(context);
    context.take_read_trace()
}

// =============================================================================
// Array Algebra Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Union is commutative as a set and idempotent up to dedup.
    #[test]
    fn prop_union_laws(
        a in prop::collection::vec(-5i32..5, 0..12),
        b in prop::collection::vec(-5i32..5, 0..12),
    ) {
        let game = game(1, 1);
        let mut context = Context::new(&game, GameRng::new(1));

        let ab = Union::new(values(&a), values(&b)).eval(&mut context);
        let ba = Union::new(values(&b), values(&a)).eval(&mut context);
        prop_assert_eq!(sorted(ab.clone()), sorted(ba));
        prop_assert_eq!(dedup_ordered(&ab), ab);

        let aa = Union::new(values(&a), values(&a)).eval(&mut context);
        prop_assert_eq!(aa, dedup_ordered(&a));
    }

    /// Difference removes exactly the values of the subtrahend.
    #[test]
    fn prop_difference_laws(
        a in prop::collection::vec(-5i32..5, 0..12),
        b in prop::collection::vec(-5i32..5, 0..12),
    ) {
        let game = game(1, 1);
        let mut context = Context::new(&game, GameRng::new(1));

        prop_assert!(Difference::new(values(&a), values(&a)).eval(&mut context).is_empty());

        let diff = Difference::new(values(&a), values(&b)).eval(&mut context);
        let expected: Vec<i32> = a.iter().copied().filter(|v| !b.contains(v)).collect();
        prop_assert_eq!(diff, expected);
    }
}

// =============================================================================
// Evaluation Contract Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// A static subtree evaluates the same before and after preprocessing,
    /// whatever the context holds.
    #[test]
    fn prop_static_invariance(
        a in -20i32..20,
        b in -20i32..20,
        sites in prop::collection::vec(0usize..9, 0..6),
        seed in any::<u64>(),
        occupied in prop::collection::vec(0usize..9, 0..9),
    ) {
        let game = game(3, 3);
        let make = || {
            IsIn::new(
                Box::new(ints::Add::new(IntConstant::boxed(a), IntConstant::boxed(b))),
                Box::new(Sites::constant(&sites)),
            )
        };
        let mut context = Context::new(&game, GameRng::new(seed));
        for site in occupied {
            context.state_mut().board_mut().push(SiteType::Cell, site, Piece::new(1, PlayerId::new(1)));
        }
        context.set_register(ContextRegister::Site, a);

        let raw = make();
        prop_assert!(raw.is_static());
        let mut folded = make();
        folded.preprocess(&game);

        let expected = raw.eval(&mut context);
        prop_assert_eq!(folded.eval(&mut context), expected);
        prop_assert_eq!(folded.eval(&mut Context::scratch(&game)), expected);
    }

    /// Registers read during evaluation are among those declared.
    #[test]
    fn prop_read_trace_within_declared(
        picks in prop::collection::vec(any::<u8>(), 1..8),
        registers in prop::array::uniform4(-3i32..10),
    ) {
        let game = game(3, 3);
        let mut context = Context::new(&game, GameRng::new(1));
        context.set_register(ContextRegister::Site, registers[0]);
        context.set_register(ContextRegister::To, registers[1]);
        context.set_register(ContextRegister::Value, registers[2]);
        context.set_register(ContextRegister::Level, registers[3]);

        let node = Equals::new(int_tree(&picks), IntConstant::boxed(0));
        context.take_read_trace();
        node.eval(&mut context);
        let trace = context.take_read_trace();

        prop_assert!(trace.is_subset(node.reads_context()));
    }

    /// Nodes that write registers and read them back below stay within
    /// their declared reads, and restore what they wrote.
    #[test]
    fn prop_read_trace_through_writers(
        kind in any::<u8>(),
        picks in prop::collection::vec(any::<u8>(), 1..6),
        sites in prop::collection::vec(0usize..9, 1..5),
        occupied in prop::collection::vec(0usize..9, 0..5),
        registers in prop::array::uniform4(-3i32..10),
    ) {
        let game = game(3, 3);
        let mut context = Context::new(&game, GameRng::new(1));
        for &site in &occupied {
            context.state_mut().board_mut().push(SiteType::Cell, site, Piece::new(1, PlayerId::new(1)));
        }
        context.set_register(ContextRegister::Site, registers[0]);
        context.set_register(ContextRegister::To, registers[1]);
        context.set_register(ContextRegister::Value, registers[2]);
        context.set_register(ContextRegister::Level, registers[3]);
        let before = *context.registers();

        let node = register_writer(kind, &picks, &sites);
        let trace = traced(&mut context, |context| {
            let _ = node.eval(context);
        });
        prop_assert!(trace.is_subset(node.reads_context()), "{} read {:?}", node.name(), trace);

        let results = Results::new(
            Box::new(Sites::constant(&sites)),
            offset_site(Box::new(ints::From), &picks),
            Box::new(ints::Add::new(Box::new(ints::From), Box::new(ints::Add::new(Box::new(To), int_tree(&picks))))),
        );
        let trace = traced(&mut context, |context| {
            let _ = results.eval(context);
        });
        prop_assert!(trace.contains(ContextRegister::From));
        prop_assert!(trace.is_subset(results.reads_context()), "Results read {:?}", trace);

        prop_assert_eq!(*context.registers(), before);
    }
}

// =============================================================================
// Move Combinator Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// And yields exactly the sum of its operands' move counts.
    #[test]
    fn prop_and_count_is_sum(
        operands in prop::collection::vec(prop::collection::vec(0usize..9, 0..5), 1..5),
        occupied in prop::collection::vec(0usize..9, 0..4),
    ) {
        let game = game(3, 3);
        let mut context = Context::new(&game, GameRng::new(1));
        for site in occupied {
            context.state_mut().board_mut().push(SiteType::Cell, site, Piece::new(2, PlayerId::new(2)));
        }

        let total: usize = operands.iter().map(|s| add_mover(s).eval(&mut context).len()).sum();
        let and = And::all(operands.iter().map(|s| add_mover(s)).collect()).unwrap();
        prop_assert_eq!(and.eval(&mut context).len(), total);
        prop_assert_eq!(and.can_move(&mut context), total > 0);
    }

    /// If yields the chosen branch's moves.
    #[test]
    fn prop_if_dispatch(
        condition in any::<bool>(),
        then_sites in prop::collection::vec(0usize..9, 0..5),
        else_sites in prop::collection::vec(0usize..9, 0..5),
    ) {
        let game = game(3, 3);
        let mut context = Context::new(&game, GameRng::new(1));

        let moves = If::new(
            BooleanConstant::boxed(condition),
            add_mover(&then_sites),
            Some(add_mover(&else_sites)),
        )
        .eval(&mut context);
        let chosen = if condition { &then_sites } else { &else_sites };
        prop_assert_eq!(moves, add_mover(chosen).eval(&mut context));
    }

    /// Seq of two placements on a 2-site board fills both sites in one move
    /// only when the two steps pick different sites.
    #[test]
    fn prop_seq_two_sites(first in 0usize..2, second in 0usize..2) {
        let game = game(1, 2);
        let mut context = Context::new(&game, GameRng::new(1));

        let moves = Seq::pair(add_mover(&[first]), add_mover(&[second])).eval(&mut context);
        prop_assert_eq!(moves.len(), 1);
        let actions = moves.as_slice()[0].actions().len();
        prop_assert_eq!(actions, if first == second { 1 } else { 2 });
        // The real context is untouched.
        prop_assert!(context.board().is_empty(SiteType::Cell, 0));
        prop_assert!(context.board().is_empty(SiteType::Cell, 1));
    }
}
