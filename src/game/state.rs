//! Persistent game state: container contents, mover, dice, visited sites.
//!
//! ## ContainerState
//!
//! Per-site stacks of pieces for each site type. Container 0 is the board
//! and has cell, vertex and edge sites; other containers (hands) only have
//! cells. Stacks are stored in `im` vectors so cloning a state is O(1),
//! which keeps temporary contexts cheap.
//!
//! ## GameState
//!
//! Everything a move can change. Evaluation reads it through `Context`;
//! only move application writes it.

use im::{OrdSet, Vector};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::SiteType;
use crate::core::{PlayerId, UNDEFINED};

use super::Game;

/// One piece on a site.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    /// Component index (1-based).
    pub what: usize,
    /// Owner.
    pub who: PlayerId,
    /// Local state.
    pub state: i32,
    /// Rotation in sides, clockwise.
    pub rotation: i32,
    /// Piece value (pip count for domino halves).
    pub value: i32,
}

impl Piece {
    /// Create a piece with no local state.
    #[must_use]
    pub fn new(what: usize, who: PlayerId) -> Self {
        Self {
            what,
            who,
            ..Self::default()
        }
    }

    /// Set the local state (builder pattern).
    #[must_use]
    pub fn with_state(mut self, state: i32) -> Self {
        self.state = state;
        self
    }

    /// Set the rotation (builder pattern).
    #[must_use]
    pub fn with_rotation(mut self, rotation: i32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the value (builder pattern).
    #[must_use]
    pub fn with_value(mut self, value: i32) -> Self {
        self.value = value;
        self
    }
}

/// Pieces on one site, bottom first.
pub type Stack = SmallVec<[Piece; 1]>;

/// Contents of one container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainerState {
    sites: [Vector<Stack>; 3],
}

impl ContainerState {
    /// Create an empty container with the given number of sites per type.
    #[must_use]
    pub fn new(cells: usize, vertices: usize, edges: usize) -> Self {
        let empty = |n: usize| (0..n).map(|_| Stack::new()).collect::<Vector<_>>();
        Self {
            sites: [empty(cells), empty(vertices), empty(edges)],
        }
    }

    /// Number of sites of a type.
    #[must_use]
    pub fn num_sites(&self, site_type: SiteType) -> usize {
        self.sites[site_type.slot()].len()
    }

    /// The stack on a site, bottom first. Empty for out-of-range sites.
    #[must_use]
    pub fn stack(&self, site_type: SiteType, site: usize) -> &[Piece] {
        self.sites[site_type.slot()]
            .get(site)
            .map_or(&[][..], |stack| stack.as_slice())
    }

    /// Top piece on a site.
    #[must_use]
    pub fn top(&self, site_type: SiteType, site: usize) -> Option<&Piece> {
        self.stack(site_type, site).last()
    }

    /// Piece at a level of a stack (0 = bottom).
    #[must_use]
    pub fn at_level(&self, site_type: SiteType, site: usize, level: usize) -> Option<&Piece> {
        self.stack(site_type, site).get(level)
    }

    /// Component of the top piece, 0 if empty.
    #[must_use]
    pub fn what(&self, site_type: SiteType, site: usize) -> usize {
        self.top(site_type, site).map_or(0, |p| p.what)
    }

    /// Owner of the top piece, neutral if empty.
    #[must_use]
    pub fn who(&self, site_type: SiteType, site: usize) -> PlayerId {
        self.top(site_type, site).map_or(PlayerId::NEUTRAL, |p| p.who)
    }

    /// Local state of the top piece, `UNDEFINED` if empty.
    #[must_use]
    pub fn state(&self, site_type: SiteType, site: usize) -> i32 {
        self.top(site_type, site).map_or(UNDEFINED, |p| p.state)
    }

    /// Rotation of the top piece, 0 if empty.
    #[must_use]
    pub fn rotation(&self, site_type: SiteType, site: usize) -> i32 {
        self.top(site_type, site).map_or(0, |p| p.rotation)
    }

    /// Value of the top piece, `UNDEFINED` if empty.
    #[must_use]
    pub fn value(&self, site_type: SiteType, site: usize) -> i32 {
        self.top(site_type, site).map_or(UNDEFINED, |p| p.value)
    }

    /// Number of pieces on a site.
    #[must_use]
    pub fn size_stack(&self, site_type: SiteType, site: usize) -> usize {
        self.stack(site_type, site).len()
    }

    /// Check if a site holds no piece.
    #[must_use]
    pub fn is_empty(&self, site_type: SiteType, site: usize) -> bool {
        self.stack(site_type, site).is_empty()
    }

    /// Sites of a type holding at least one piece, in index order.
    pub fn occupied_sites(&self, site_type: SiteType) -> impl Iterator<Item = usize> + '_ {
        self.sites[site_type.slot()]
            .iter()
            .enumerate()
            .filter(|(_, stack)| !stack.is_empty())
            .map(|(site, _)| site)
    }

    /// Sites of a type holding no piece, in index order.
    pub fn empty_sites(&self, site_type: SiteType) -> impl Iterator<Item = usize> + '_ {
        self.sites[site_type.slot()]
            .iter()
            .enumerate()
            .filter(|(_, stack)| stack.is_empty())
            .map(|(site, _)| site)
    }

    /// Put a piece on top of a site.
    ///
    /// Returns false if the site is out of range.
    pub fn push(&mut self, site_type: SiteType, site: usize, piece: Piece) -> bool {
        match self.sites[site_type.slot()].get_mut(site) {
            Some(stack) => {
                stack.push(piece);
                true
            }
            None => false,
        }
    }

    /// Take the top piece off a site.
    pub fn pop(&mut self, site_type: SiteType, site: usize) -> Option<Piece> {
        self.sites[site_type.slot()].get_mut(site)?.pop()
    }

    /// Remove the piece at a level of a stack.
    pub fn remove_level(&mut self, site_type: SiteType, site: usize, level: usize) -> Option<Piece> {
        let stack = self.sites[site_type.slot()].get_mut(site)?;
        (level < stack.len()).then(|| stack.remove(level))
    }

    /// Modify the top piece on a site.
    ///
    /// Returns false if the site is empty or out of range.
    pub fn update_top(&mut self, site_type: SiteType, site: usize, f: impl FnOnce(&mut Piece)) -> bool {
        match self.sites[site_type.slot()].get_mut(site).and_then(|s| s.last_mut()) {
            Some(piece) => {
                f(piece);
                true
            }
            None => false,
        }
    }
}

/// Full mutable game state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    containers: Vec<ContainerState>,
    mover: PlayerId,
    dice: Vector<i32>,
    visited: OrdSet<usize>,
    last_from: i32,
    last_to: i32,
    turn: u32,
}

impl GameState {
    /// Create the initial state of a game: empty containers, player 1 to move.
    #[must_use]
    pub fn new(game: &Game) -> Self {
        let topology = game.topology();
        let mut containers = Vec::with_capacity(game.containers().len());
        containers.push(ContainerState::new(
            topology.num_sites(SiteType::Cell),
            topology.num_sites(SiteType::Vertex),
            topology.num_sites(SiteType::Edge),
        ));
        for container in game.containers().iter().skip(1) {
            containers.push(ContainerState::new(container.sites, 0, 0));
        }

        Self {
            containers,
            mover: PlayerId::new(1),
            dice: Vector::new(),
            visited: OrdSet::new(),
            last_from: UNDEFINED,
            last_to: UNDEFINED,
            turn: 1,
        }
    }

    // === Containers ===

    /// The board container.
    #[must_use]
    pub fn board(&self) -> &ContainerState {
        &self.containers[0]
    }

    /// The board container, mutably.
    pub fn board_mut(&mut self) -> &mut ContainerState {
        &mut self.containers[0]
    }

    /// A container by index.
    #[must_use]
    pub fn container(&self, index: usize) -> Option<&ContainerState> {
        self.containers.get(index)
    }

    /// A container by index, mutably.
    pub fn container_mut(&mut self, index: usize) -> Option<&mut ContainerState> {
        self.containers.get_mut(index)
    }

    /// Number of containers (board included).
    #[must_use]
    pub fn num_containers(&self) -> usize {
        self.containers.len()
    }

    // === Turn ===

    /// The player to move.
    #[must_use]
    pub fn mover(&self) -> PlayerId {
        self.mover
    }

    /// Set the player to move.
    pub fn set_mover(&mut self, player: PlayerId) {
        self.mover = player;
    }

    /// Turn number (starts at 1).
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Pass the turn to the next player and forget visited sites.
    pub fn advance_turn(&mut self, player_count: usize) {
        self.mover = self.mover.next(player_count);
        self.visited = OrdSet::new();
        self.turn += 1;
    }

    // === Dice ===

    /// Current die values.
    #[must_use]
    pub fn dice(&self) -> &Vector<i32> {
        &self.dice
    }

    /// Set the die values.
    pub fn set_dice(&mut self, values: impl IntoIterator<Item = i32>) {
        self.dice = values.into_iter().collect();
    }

    // === Visited sites ===

    /// Check if a site was visited this turn.
    #[must_use]
    pub fn is_visited(&self, site: usize) -> bool {
        self.visited.contains(&site)
    }

    /// Mark a site as visited this turn.
    pub fn visit(&mut self, site: usize) {
        self.visited.insert(site);
    }

    // === Last move ===

    /// Origin site of the last applied move.
    #[must_use]
    pub fn last_from(&self) -> i32 {
        self.last_from
    }

    /// Destination site of the last applied move.
    #[must_use]
    pub fn last_to(&self) -> i32 {
        self.last_to
    }

    /// Record the sites of the last applied move.
    pub fn set_last_move(&mut self, from: i32, to: i32) {
        self.last_from = from;
        self.last_to = to;
    }
}
