//! Register readers: zero-ary nodes returning one context register.
//!
//! Iterating nodes (`ForEach`, `FromTo`, `Results`...) write the registers;
//! these nodes read them back inside the iterated expression. They are
//! stateless unit structs and never static.

use crate::context::{Context, ContextRegister, RegisterSet};
use crate::game::Game;
use crate::ludeme::{Concept, ConceptSet, GameFlags, Ludeme, Report};

use super::super::IntFunction;

macro_rules! register_reader {
    (
        $(#[$doc:meta])*
        $name:ident => $register:ident,
        flags: $flags:expr,
        concepts: $concepts:expr,
        requires: $requires:expr $(,)?
    ) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
        pub struct $name;

        impl Ludeme for $name {
            fn name(&self) -> &'static str {
                stringify!($name)
            }

            fn is_static(&self) -> bool {
                false
            }

            fn game_flags_flat(&self, _game: &Game) -> GameFlags {
                $flags
            }

            fn concepts_flat(&self, _game: &Game) -> ConceptSet {
                $concepts
            }

            fn reads_context_flat(&self) -> RegisterSet {
                RegisterSet::of(ContextRegister::$register)
            }

            fn check_requirements(&self, game: &Game, report: &mut Report) -> bool {
                let requires: fn(&Game) -> Option<&'static str> = $requires;
                match requires(game) {
                    Some(message) => {
                        report.add_error(self.name(), message);
                        true
                    }
                    None => false,
                }
            }
        }

        impl IntFunction for $name {
            fn eval(&self, context: &mut Context<'_>) -> i32 {
                context.register(ContextRegister::$register)
            }
        }
    };
}

register_reader! {
    /// Origin site of the move being built.
    From => From,
    flags: GameFlags::USES_FROM_POSITIONS,
    concepts: ConceptSet::EMPTY,
    requires: |_| None,
}

register_reader! {
    /// Destination site of the move being built.
    To => To,
    flags: GameFlags::EMPTY,
    concepts: ConceptSet::EMPTY,
    requires: |_| None,
}

register_reader! {
    /// Site between origin and destination (hops, captures).
    Between => Between,
    flags: GameFlags::EMPTY,
    concepts: ConceptSet::EMPTY,
    requires: |_| None,
}

register_reader! {
    /// Site being iterated.
    Site => Site,
    flags: GameFlags::EMPTY,
    concepts: ConceptSet::EMPTY,
    requires: |_| None,
}

register_reader! {
    /// Stack level being iterated.
    Level => Level,
    flags: GameFlags::STACKING,
    concepts: ConceptSet::of(Concept::Stacking),
    requires: |_| None,
}

register_reader! {
    /// Value being iterated.
    Value => Value,
    flags: GameFlags::EMPTY,
    concepts: ConceptSet::EMPTY,
    requires: |_| None,
}

register_reader! {
    /// Player being iterated.
    Player => Player,
    flags: GameFlags::EMPTY,
    concepts: ConceptSet::EMPTY,
    requires: |_| None,
}

register_reader! {
    /// Track being iterated.
    Track => Track,
    flags: GameFlags::TRACK,
    concepts: ConceptSet::of(Concept::Track),
    requires: |game| game.tracks().is_empty().then_some("game has no tracks"),
}

register_reader! {
    /// Pip count of the die being iterated.
    Pips => Pips,
    flags: GameFlags::STOCHASTIC,
    concepts: ConceptSet::of(Concept::Dice),
    requires: |game| (!game.has_dice()).then_some("game has no dice"),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BoardConfig, GameConfig, GameRng, UNDEFINED};

    fn test_game() -> Game {
        Game::from_config(GameConfig::new("test", 2, BoardConfig::square(2, 2))).unwrap()
    }

    #[test]
    fn test_readers_return_registers() {
        let game = test_game();
        let mut context = Context::new(&game, GameRng::new(1));
        context.set_from(1);
        context.set_to(3);
        context.set_register(ContextRegister::Pips, 6);

        assert_eq!(From.eval(&mut context), 1);
        assert_eq!(To.eval(&mut context), 3);
        assert_eq!(Pips.eval(&mut context), 6);
        assert_eq!(Between.eval(&mut context), UNDEFINED);
    }

    #[test]
    fn test_readers_declare_reads() {
        assert_eq!(From.reads_context(), RegisterSet::of(ContextRegister::From));
        assert_eq!(Level.reads_context(), RegisterSet::of(ContextRegister::Level));
        assert!(To.writes_context().is_empty());
        assert!(!Site.is_static());
    }

    #[test]
    fn test_pips_requires_dice() {
        let game = test_game();
        let mut report = Report::new();

        assert!(Pips.missing_requirement(&game, &mut report));
        assert!(Track.missing_requirement(&game, &mut report));
        assert!(!Value.missing_requirement(&game, &mut report));
        assert_eq!(report.error_count(), 2);

        let dice_game =
            Game::from_config(GameConfig::new("dice", 2, BoardConfig::square(2, 2)).with_dice(2, 6)).unwrap();
        assert!(!Pips.missing_requirement(&dice_game, &mut Report::new()));
    }

    #[test]
    fn test_reader_flags() {
        let game = test_game();
        assert!(From.game_flags(&game).contains(GameFlags::USES_FROM_POSITIONS));
        assert!(Pips.concepts(&game).contains(Concept::Dice));
    }
}
