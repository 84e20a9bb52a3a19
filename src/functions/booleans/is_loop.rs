//! `IsLoop`: does the last placement close a loop?
//!
//! ## Piece loops
//!
//! The seed needs at least two of the owner's pieces among its neighbours,
//! otherwise no loop can pass through it. Then two phases run:
//!
//! 1. Enclosure: each neighbour of the seed not owned by the loop owner
//!    starts a flood fill over non-owner sites, stepping in the dual of the
//!    configured direction set (orthogonal loops leak diagonally and the
//!    other way round). A fill reaching an outer site is rejected. A fill
//!    that completes is a pocket; the owner's pieces around it are its
//!    boundary, and the pocket counts only if a closed walk through the
//!    seed exists over those boundary sites in the configured directions.
//! 2. Walk: a depth-first walk over the owner's pieces looks for a closed
//!    walk through the seed of at least `min_loop_length` sites. A site
//!    whose neighbours are exhausted is dead for the rest of the search, so
//!    each site is entered at most once.
//!
//! Neighbours are always tried in topology insertion order, so the same
//! position gives the same search.
//!
//! ## Tile paths
//!
//! `IsLoop::tile_path` follows the path of one colour through rotated
//! square tiles, leaving each tile through the side its path exits and
//! entering the neighbour through the opposite side, until it comes back
//! to the seed tile.

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::board::{Direction, DirectionSet, SiteType, Topology};
use crate::context::Context;
use crate::core::PlayerId;
use crate::game::{ContainerState, Game};
use crate::ludeme::{Concept, ConceptSet, GameFlags, Ludeme, Report};

use super::super::{ints::LastTo, site_index, site_type_or_default, BoxInt, BooleanFunction};

/// Loop detection from a seed site.
#[derive(Debug)]
pub struct IsLoop {
    seed: BoxInt,
    owner: Option<BoxInt>,
    directions: DirectionSet,
    site_type: Option<SiteType>,
    path_colour: Option<BoxInt>,
}

impl IsLoop {
    /// Loop through the destination of the last move, owned by the piece
    /// standing there.
    #[must_use]
    pub fn new() -> Self {
        Self {
            seed: Box::new(LastTo),
            owner: None,
            directions: DirectionSet::Orthogonal,
            site_type: None,
            path_colour: None,
        }
    }

    /// Loop of tile paths of one colour through the last placed tile.
    #[must_use]
    pub fn tile_path(colour: BoxInt) -> Self {
        Self {
            path_colour: Some(colour),
            ..Self::new()
        }
    }

    /// Start from an explicit site.
    #[must_use]
    pub fn at(mut self, seed: BoxInt) -> Self {
        self.seed = seed;
        self
    }

    /// Look for a loop of this player's pieces.
    #[must_use]
    pub fn owner(mut self, owner: BoxInt) -> Self {
        self.owner = Some(owner);
        self
    }

    #[must_use]
    pub fn directions(mut self, directions: DirectionSet) -> Self {
        self.directions = directions;
        self
    }

    #[must_use]
    pub fn on(mut self, site_type: SiteType) -> Self {
        self.site_type = Some(site_type);
        self
    }
}

impl Default for IsLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl Ludeme for IsLoop {
    fn name(&self) -> &'static str {
        "IsLoop"
    }

    fn children(&self) -> Vec<&dyn Ludeme> {
        let mut children = vec![self.seed.as_ludeme()];
        children.extend(self.owner.iter().map(|o| o.as_ludeme()));
        children.extend(self.path_colour.iter().map(|c| c.as_ludeme()));
        children
    }

    fn is_static(&self) -> bool {
        false
    }

    fn preprocess(&mut self, game: &Game) {
        self.seed.preprocess(game);
        if let Some(owner) = &mut self.owner {
            owner.preprocess(game);
        }
        if let Some(colour) = &mut self.path_colour {
            colour.preprocess(game);
        }
    }

    fn game_flags_flat(&self, _game: &Game) -> GameFlags {
        if self.path_colour.is_some() {
            GameFlags::LOOPS | GameFlags::TILES | GameFlags::ROTATION
        } else {
            GameFlags::LOOPS
        }
    }

    fn concepts_flat(&self, _game: &Game) -> ConceptSet {
        ConceptSet::of(Concept::Loop)
    }

    fn check_requirements(&self, game: &Game, report: &mut Report) -> bool {
        if self.path_colour.is_some() && !game.uses_tiles() {
            report.add_error(self.name(), "tile path loops need tiles");
            return true;
        }
        false
    }

    fn check_crash(&self, game: &Game, report: &mut Report) -> bool {
        let odd_tile = game
            .components()
            .iter()
            .find(|c| c.is_tile() && c.num_sides() != Direction::ORTHOGONAL.len());
        match (self.path_colour.is_some(), odd_tile) {
            (true, Some(tile)) => {
                report.add_error(
                    self.name(),
                    format!("tile path loops need square tiles, {} has {} sides", tile.name, tile.num_sides()),
                );
                true
            }
            _ => false,
        }
    }
}

impl BooleanFunction for IsLoop {
    fn eval(&self, context: &mut Context<'_>) -> bool {
        let site_type = site_type_or_default(self.site_type, context);
        let seed = self.seed.eval(context);
        let Some(seed) = site_index(context, site_type, seed) else {
            return false;
        };

        if let Some(colour) = &self.path_colour {
            let colour = colour.eval(context);
            return tile_path_loop(context, site_type, seed, colour);
        }

        let owner = match &self.owner {
            Some(owner) => owner.eval(context),
            None => i32::from(context.board().who(site_type, seed)),
        };
        let owner = match u8::try_from(owner) {
            Ok(owner) if owner > 0 => PlayerId::new(owner),
            _ => return false,
        };
        if context.board().who(site_type, seed) != owner {
            return false;
        }

        let search = LoopSearch {
            topology: context.topology(),
            board: context.board(),
            site_type,
            directions: self.directions,
            owner,
        };
        if search.neighbours(seed).filter(|&site| search.owned(site)).nth(1).is_none() {
            return false;
        }
        let min_length = context.game().options().min_loop_length;
        if search.encloses(seed, min_length) {
            trace!(seed, "loop found by enclosure");
            return true;
        }
        let found = search.closed_walk(seed, min_length, |_| true);
        trace!(seed, found, "loop walk finished");
        found
    }
}

/// Shared inputs of the two search phases.
struct LoopSearch<'a> {
    topology: &'a Topology,
    board: &'a ContainerState,
    site_type: SiteType,
    directions: DirectionSet,
    owner: PlayerId,
}

impl LoopSearch<'_> {
    fn owned(&self, site: usize) -> bool {
        self.board.who(self.site_type, site) == self.owner
    }

    fn neighbours(&self, site: usize) -> impl Iterator<Item = usize> + '_ {
        self.topology.neighbours(self.site_type, site, self.directions)
    }

    /// Enclosure phase.
    fn encloses(&self, seed: usize, min_length: usize) -> bool {
        let fill = self.directions.dual();
        // Non-owner sites already assigned to a pocket or an escaping fill.
        let mut seen: FxHashSet<usize> = FxHashSet::default();

        let starts: Vec<usize> = self.topology.neighbours(self.site_type, seed, fill).collect();
        for start in starts {
            if self.owned(start) || seen.contains(&start) {
                continue;
            }
            match self.pocket(start, fill) {
                Err(escaped) => seen.extend(escaped),
                Ok(pocket) => {
                    let boundary: FxHashSet<usize> = pocket
                        .iter()
                        .flat_map(|&site| self.topology.neighbours(self.site_type, site, fill))
                        .filter(|&site| self.owned(site))
                        .collect();
                    seen.extend(pocket);
                    if boundary.contains(&seed)
                        && self.closed_walk(seed, min_length, |site| boundary.contains(&site))
                    {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Flood the non-owner region around `start`. `Err` when it reaches an
    /// outer site.
    fn pocket(&self, start: usize, fill: DirectionSet) -> Result<FxHashSet<usize>, FxHashSet<usize>> {
        let mut region = FxHashSet::default();
        region.insert(start);
        let mut frontier = vec![start];

        while let Some(site) = frontier.pop() {
            if self.topology.is_outer(self.site_type, site) {
                return Err(region);
            }
            for next in self.topology.neighbours(self.site_type, site, fill) {
                if !self.owned(next) && region.insert(next) {
                    frontier.push(next);
                }
            }
        }
        Ok(region)
    }

    /// Walk phase, restricted to owned sites accepted by `allowed`.
    fn closed_walk(&self, seed: usize, min_length: usize, allowed: impl Fn(usize) -> bool) -> bool {
        // Each frame is a site on the current walk and the index of the
        // next neighbour to try from it.
        let mut walk: Vec<(usize, usize)> = vec![(seed, 0)];
        // Sites entered so far. Popped sites stay here, so a dead end is
        // never entered again.
        let mut visited: FxHashSet<usize> = FxHashSet::default();
        visited.insert(seed);

        while let Some(frame) = walk.last_mut() {
            let site = frame.0;
            let candidate = self.neighbours(site).nth(frame.1);
            frame.1 += 1;

            let Some(candidate) = candidate else {
                walk.pop();
                continue;
            };
            if !self.owned(candidate) || !allowed(candidate) {
                continue;
            }
            if candidate == seed {
                if walk.len() >= min_length.max(3) {
                    return true;
                }
                continue;
            }
            if visited.insert(candidate) {
                walk.push((candidate, 0));
            }
        }
        false
    }
}

/// Follow the coloured path through tiles from the seed tile.
fn tile_path_loop(context: &Context<'_>, site_type: SiteType, seed: usize, colour: i32) -> bool {
    let game = context.game();
    let board = context.board();
    let topology = context.topology();
    let sides = Direction::ORTHOGONAL.len();

    let tile_at = |site: usize| {
        board
            .top(site_type, site)
            .and_then(|piece| game.component(piece.what).map(|c| (c, piece.rotation)))
            .filter(|(c, _)| c.is_tile() && c.num_sides() == sides)
    };

    let Some((seed_tile, seed_rotation)) = tile_at(seed) else {
        return false;
    };
    let Some(entry) = (0..sides).find(|&side| seed_tile.path_exit(side, seed_rotation, colour).is_some()) else {
        return false;
    };
    let Some(mut exit) = seed_tile.path_exit(entry, seed_rotation, colour) else {
        return false;
    };

    let mut site = seed;
    // Every side of every tile can be crossed at most once on a simple path.
    for _ in 0..topology.num_sites(site_type) * sides {
        let Some(next) = topology.step(site_type, site, Direction::ORTHOGONAL[exit]) else {
            return false;
        };
        let entering = (exit + sides / 2) % sides;
        if next == seed {
            return entering == entry;
        }
        let Some((tile, rotation)) = tile_at(next) else {
            return false;
        };
        let Some(out) = tile.path_exit(entering, rotation, colour) else {
            return false;
        };
        site = next;
        exit = out;
    }
    false
}
