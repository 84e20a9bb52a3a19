//! The evaluation context.
//!
//! A `Context` is the register machine nodes evaluate against: a borrowed
//! game descriptor, an owned game state, the register file and the
//! injected random source.
//!
//! ## Lifecycle
//!
//! - `Context::new` once per play-through
//! - `Context::temp` for nested single-threaded evaluation that may apply
//!   moves (`Seq`): the copy shares state structure through `im`, so it
//!   is cheap, and it is dropped afterwards once its reads are merged
//!   back with `merge_read_trace`
//! - `Context::fork` for an independent copy with its own random stream,
//!   for use on another thread
//!
//! ## Register discipline
//!
//! Nodes that write registers save them first and restore them before
//! returning (`with_saved_registers`), so callers never observe values
//! leaked from a sub-evaluation. Reads are recorded in a trace so tests can
//! check them against the nodes' declared read sets.

use std::cell::Cell;

use tracing::error;

use crate::board::Topology;
use crate::core::{GameRng, PlayerId};
use crate::game::{ContainerState, Game, GameState};

use super::registers::{ContextRegister, RegisterSet, RegisterSnapshot, Registers};

/// Per-evaluation register machine.
#[derive(Debug)]
pub struct Context<'g> {
    game: &'g Game,
    state: GameState,
    registers: Registers,
    rng: GameRng,
    temporary: bool,
    read_trace: Cell<RegisterSet>,
}

impl<'g> Context<'g> {
    /// Create a context at the initial state of `game`.
    #[must_use]
    pub fn new(game: &'g Game, rng: GameRng) -> Self {
        Self::with_state(game, game.initial_state(), rng)
    }

    /// Create a context over an existing state.
    #[must_use]
    pub fn with_state(game: &'g Game, state: GameState, rng: GameRng) -> Self {
        Self {
            game,
            state,
            registers: Registers::default(),
            rng,
            temporary: false,
            read_trace: Cell::new(RegisterSet::EMPTY),
        }
    }

    /// A throwaway context at the initial state, used to fold static nodes.
    #[must_use]
    pub fn scratch(game: &'g Game) -> Self {
        let mut context = Self::new(game, GameRng::new(0));
        context.temporary = true;
        context
    }

    /// A cheap copy for nested evaluation that may mutate state.
    ///
    /// The copy carries the same registers and a copy of the random
    /// stream; nothing done to it reaches `self`.
    #[must_use]
    pub fn temp(&self) -> Context<'g> {
        Context {
            game: self.game,
            state: self.state.clone(),
            registers: self.registers,
            rng: self.rng.clone(),
            temporary: true,
            read_trace: Cell::new(RegisterSet::EMPTY),
        }
    }

    /// An independent copy with its own random stream.
    #[must_use]
    pub fn fork(&mut self) -> Context<'g> {
        Context {
            game: self.game,
            state: self.state.clone(),
            registers: self.registers,
            rng: self.rng.fork(),
            temporary: false,
            read_trace: Cell::new(RegisterSet::EMPTY),
        }
    }

    /// Check whether this is a temporary or scratch context.
    #[must_use]
    pub fn is_temporary(&self) -> bool {
        self.temporary
    }

    // === Game and state ===

    /// The game descriptor.
    #[must_use]
    pub fn game(&self) -> &'g Game {
        self.game
    }

    /// Board topology.
    #[must_use]
    pub fn topology(&self) -> &'g Topology {
        self.game.topology()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Current state, mutably. Only move application should use this.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Give up the state (to keep the result of a play-out).
    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }

    /// The board container.
    #[must_use]
    pub fn board(&self) -> &ContainerState {
        self.state.board()
    }

    /// The player to move.
    #[must_use]
    pub fn mover(&self) -> PlayerId {
        self.state.mover()
    }

    /// The injected random source.
    pub fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    // === Registers ===

    /// Read a register, recording the read.
    #[must_use]
    pub fn register(&self, register: ContextRegister) -> i32 {
        self.read_trace.set(self.read_trace.get().with(register));
        self.registers.get(register)
    }

    /// Write a register.
    pub fn set_register(&mut self, register: ContextRegister, value: i32) {
        self.registers.set(register, value);
    }

    /// The raw register file (reads through it are not traced).
    #[must_use]
    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    #[must_use]
    pub fn from(&self) -> i32 {
        self.register(ContextRegister::From)
    }

    #[must_use]
    pub fn to(&self) -> i32 {
        self.register(ContextRegister::To)
    }

    #[must_use]
    pub fn between(&self) -> i32 {
        self.register(ContextRegister::Between)
    }

    #[must_use]
    pub fn site(&self) -> i32 {
        self.register(ContextRegister::Site)
    }

    #[must_use]
    pub fn level(&self) -> i32 {
        self.register(ContextRegister::Level)
    }

    #[must_use]
    pub fn value(&self) -> i32 {
        self.register(ContextRegister::Value)
    }

    #[must_use]
    pub fn player(&self) -> i32 {
        self.register(ContextRegister::Player)
    }

    #[must_use]
    pub fn edge(&self) -> i32 {
        self.register(ContextRegister::Edge)
    }

    #[must_use]
    pub fn hint(&self) -> i32 {
        self.register(ContextRegister::Hint)
    }

    #[must_use]
    pub fn track(&self) -> i32 {
        self.register(ContextRegister::Track)
    }

    #[must_use]
    pub fn pips(&self) -> i32 {
        self.register(ContextRegister::Pips)
    }

    pub fn set_from(&mut self, value: i32) {
        self.set_register(ContextRegister::From, value);
    }

    pub fn set_to(&mut self, value: i32) {
        self.set_register(ContextRegister::To, value);
    }

    pub fn set_between(&mut self, value: i32) {
        self.set_register(ContextRegister::Between, value);
    }

    /// Save the registers named by `set`.
    #[must_use]
    pub fn save_registers(&self, set: RegisterSet) -> RegisterSnapshot {
        self.registers.snapshot(set)
    }

    /// Restore previously saved registers.
    pub fn restore_registers(&mut self, snapshot: &RegisterSnapshot) {
        self.registers.restore(snapshot);
    }

    /// Run `f` and restore the registers named by `set` afterwards.
    ///
    /// Nodes pass their flat writes set here.
    pub fn with_saved_registers<R>(&mut self, set: RegisterSet, f: impl FnOnce(&mut Self) -> R) -> R {
        let snapshot = self.registers.snapshot(set);
        let result = f(self);
        self.registers.restore(&snapshot);
        result
    }

    /// Run `f` and report any register it leaves changed.
    ///
    /// Only active in debug builds with `check_register_leaks` enabled.
    pub fn check_register_leaks<R>(&mut self, ludeme: &str, f: impl FnOnce(&mut Self) -> R) -> R {
        if !cfg!(debug_assertions) || !self.game.options().check_register_leaks {
            return f(self);
        }
        let snapshot = self.registers.snapshot(RegisterSet::ALL);
        let result = f(self);
        let leaked = self.registers.changed_since(&snapshot);
        if !leaked.is_empty() {
            error!(ludeme, ?leaked, "evaluation leaked context registers");
            debug_assert!(leaked.is_empty(), "{ludeme} leaked registers {leaked:?}");
        }
        result
    }

    /// Registers read since the last call, clearing the trace.
    pub fn take_read_trace(&self) -> RegisterSet {
        self.read_trace.replace(RegisterSet::EMPTY)
    }

    /// Move the reads recorded in a nested context into this trace.
    pub fn merge_read_trace(&self, nested: &Context<'_>) {
        self.read_trace.set(self.read_trace.get() | nested.take_read_trace());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::SiteType;
    use crate::core::{BoardConfig, GameConfig, UNDEFINED};
    use crate::game::Piece;

    fn test_game() -> Game {
        Game::from_config(GameConfig::new("test", 2, BoardConfig::square(2, 2)).with_player_pieces("Disc"))
            .unwrap()
    }

    #[test]
    fn test_new_context() {
        let game = test_game();
        let context = Context::new(&game, GameRng::new(1));

        assert_eq!(context.mover(), PlayerId::new(1));
        assert_eq!(context.from(), UNDEFINED);
        assert!(!context.is_temporary());
        assert_eq!(context.topology().num_sites(SiteType::Cell), 4);
    }

    #[test]
    fn test_temp_does_not_leak() {
        let game = test_game();
        let mut context = Context::new(&game, GameRng::new(1));
        context.set_from(2);

        let mut temp = context.temp();
        assert!(temp.is_temporary());
        assert_eq!(temp.from(), 2);
        temp.set_from(3);
        temp.state_mut()
            .board_mut()
            .push(SiteType::Cell, 0, Piece::new(1, PlayerId::new(1)));

        assert_eq!(context.from(), 2);
        assert!(context.board().is_empty(SiteType::Cell, 0));
    }

    #[test]
    fn test_with_saved_registers_restores() {
        let game = test_game();
        let mut context = Context::new(&game, GameRng::new(1));
        context.set_from(1);
        context.set_to(2);

        let seen = context.with_saved_registers(RegisterSet::of(ContextRegister::From), |ctx| {
            ctx.set_from(7);
            ctx.from()
        });

        assert_eq!(seen, 7);
        assert_eq!(context.from(), 1);
        assert_eq!(context.to(), 2);
    }

    #[test]
    fn test_read_trace() {
        let game = test_game();
        let context = Context::new(&game, GameRng::new(1));

        let _ = context.from();
        let _ = context.pips();
        let _ = context.registers().get(ContextRegister::Site);

        assert_eq!(
            context.take_read_trace(),
            RegisterSet::from_registers(&[ContextRegister::From, ContextRegister::Pips])
        );
        assert!(context.take_read_trace().is_empty());
    }

    #[test]
    fn test_temp_trace_merges_back() {
        let game = test_game();
        let context = Context::new(&game, GameRng::new(1));
        let _ = context.from();

        let temp = context.temp();
        let _ = temp.to();
        assert_eq!(context.take_read_trace(), RegisterSet::of(ContextRegister::From));

        let _ = context.from();
        context.merge_read_trace(&temp);
        assert_eq!(
            context.take_read_trace(),
            RegisterSet::from_registers(&[ContextRegister::From, ContextRegister::To])
        );
        assert!(temp.take_read_trace().is_empty());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "leaked registers")]
    fn test_leak_check_panics_in_debug() {
        let game = test_game();
        let mut context = Context::new(&game, GameRng::new(1));
        context.check_register_leaks("Leaky", |ctx| ctx.set_to(4));
    }

    #[test]
    fn test_fork_has_independent_rng() {
        let game = test_game();
        let mut context = Context::new(&game, GameRng::new(1));
        let mut forked = context.fork();

        let a: Vec<_> = (0..10).map(|_| context.rng_mut().roll(100)).collect();
        let b: Vec<_> = (0..10).map(|_| forked.rng_mut().roll(100)).collect();
        assert_ne!(a, b);
    }
}
