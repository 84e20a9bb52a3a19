//! Edge-matching predicates for tiles and dominoes on square cells.
//!
//! Board sides are numbered in orthogonal direction order: 0 = N, 1 = E,
//! 2 = S, 3 = W. A tile turned `r` steps clockwise shows its own side
//! `(k - r) mod 4` on board side `k`; the side facing it from the
//! neighbour across board side `k` is board side `(k + 2) mod 4` of that
//! neighbour.
//!
//! A domino occupies two cells. Each half is a piece whose value is the
//! half's pip count and whose rotation is the orthogonal direction index
//! (0..4) of its partner half.

use crate::board::{Direction, SiteType};
use crate::context::Context;
use crate::game::{Game, Piece};
use crate::ludeme::{Concept, ConceptSet, GameFlags, Ludeme, Report};

use super::super::{ints::LastTo, site_index, BoxInt, BooleanFunction};

const SIDES: usize = Direction::ORTHOGONAL.len();

fn opposite_side(side: usize) -> usize {
    (side + SIDES / 2) % SIDES
}

/// True when every tile next to the placed tile shows the same colour on
/// the shared side. Empty neighbours do not constrain.
#[derive(Debug)]
pub struct IsSidesMatch {
    site: BoxInt,
}

impl IsSidesMatch {
    /// Check the tile placed by the last move.
    #[must_use]
    pub fn new() -> Self {
        Self::at(Box::new(LastTo))
    }

    #[must_use]
    pub fn at(site: BoxInt) -> Self {
        Self { site }
    }
}

impl Default for IsSidesMatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Ludeme for IsSidesMatch {
    fn name(&self) -> &'static str {
        "IsSidesMatch"
    }

    fn children(&self) -> Vec<&dyn Ludeme> {
        vec![self.site.as_ludeme()]
    }

    fn is_static(&self) -> bool {
        false
    }

    fn preprocess(&mut self, game: &Game) {
        self.site.preprocess(game);
    }

    fn game_flags_flat(&self, _game: &Game) -> GameFlags {
        GameFlags::TILES | GameFlags::ROTATION
    }

    fn concepts_flat(&self, _game: &Game) -> ConceptSet {
        ConceptSet::of(Concept::SidesMatch)
    }

    fn check_requirements(&self, game: &Game, report: &mut Report) -> bool {
        if !game.uses_tiles() {
            report.add_error(self.name(), "game has no tiles");
            return true;
        }
        false
    }

    fn check_crash(&self, game: &Game, report: &mut Report) -> bool {
        let mut crash = false;
        for tile in game.components().iter().filter(|c| c.is_tile() && c.num_sides() != SIDES) {
            report.add_error(
                self.name(),
                format!("side matching needs square tiles, {} has {} sides", tile.name, tile.num_sides()),
            );
            crash = true;
        }
        crash
    }
}

impl BooleanFunction for IsSidesMatch {
    fn eval(&self, context: &mut Context<'_>) -> bool {
        let site = self.site.eval(context);
        let Some(site) = site_index(context, SiteType::Cell, site) else {
            return false;
        };
        let game = context.game();
        let board = context.board();
        let tile_at = |site: usize| {
            board
                .top(SiteType::Cell, site)
                .and_then(|piece| game.component(piece.what).map(|c| (c, piece.rotation)))
                .filter(|(c, _)| c.is_tile())
        };

        let Some((tile, rotation)) = tile_at(site) else {
            return false;
        };
        Direction::ORTHOGONAL.iter().enumerate().all(|(side, &direction)| {
            let Some(neighbour) = context.topology().step(SiteType::Cell, site, direction) else {
                return true;
            };
            let Some((other, other_rotation)) = tile_at(neighbour) else {
                return true;
            };
            tile.side_colour(side, rotation) == other.side_colour(opposite_side(side), other_rotation)
        })
    }
}

/// True when the pips of both halves of the placed domino equal the pips
/// of every occupied cell touching them (the partner half excepted).
#[derive(Debug)]
pub struct IsPipsMatch {
    site: BoxInt,
}

impl IsPipsMatch {
    /// Check the domino placed by the last move.
    #[must_use]
    pub fn new() -> Self {
        Self::at(Box::new(LastTo))
    }

    #[must_use]
    pub fn at(site: BoxInt) -> Self {
        Self { site }
    }
}

impl Default for IsPipsMatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Ludeme for IsPipsMatch {
    fn name(&self) -> &'static str {
        "IsPipsMatch"
    }

    fn children(&self) -> Vec<&dyn Ludeme> {
        vec![self.site.as_ludeme()]
    }

    fn is_static(&self) -> bool {
        false
    }

    fn preprocess(&mut self, game: &Game) {
        self.site.preprocess(game);
    }

    fn game_flags_flat(&self, _game: &Game) -> GameFlags {
        GameFlags::LARGE_PIECE | GameFlags::PIECE_VALUE
    }

    fn concepts_flat(&self, _game: &Game) -> ConceptSet {
        ConceptSet::of(Concept::PipsMatch)
    }

    fn check_requirements(&self, game: &Game, report: &mut Report) -> bool {
        if !game.uses_dominoes() {
            report.add_error(self.name(), "game has no dominoes");
            return true;
        }
        false
    }
}

impl BooleanFunction for IsPipsMatch {
    fn eval(&self, context: &mut Context<'_>) -> bool {
        let site = self.site.eval(context);
        let Some(site) = site_index(context, SiteType::Cell, site) else {
            return false;
        };
        let topology = context.topology();
        let board = context.board();
        let Some(half) = board.top(SiteType::Cell, site) else {
            return false;
        };
        let Some(partner) = partner_site(context, site, half) else {
            return false;
        };

        [site, partner].into_iter().all(|half_site| {
            let Some(half) = board.top(SiteType::Cell, half_site) else {
                return false;
            };
            Direction::ORTHOGONAL.iter().all(|&direction| {
                match topology.step(SiteType::Cell, half_site, direction) {
                    Some(neighbour) if neighbour != site && neighbour != partner => board
                        .top(SiteType::Cell, neighbour)
                        .map_or(true, |other| other.value == half.value),
                    _ => true,
                }
            })
        })
    }
}

/// Site of the other half of the domino whose half is `half` at `site`.
fn partner_site(context: &Context<'_>, site: usize, half: &Piece) -> Option<usize> {
    let component = context.game().component(half.what)?;
    if !component.is_domino() {
        return None;
    }
    let direction = *Direction::ORTHOGONAL.get(usize::try_from(half.rotation).ok()?)?;
    context.topology().step(SiteType::Cell, site, direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BoardConfig, ComponentConfig, GameConfig, GameRng, PlayerId, TilePathConfig};
    use crate::functions::ints::IntConstant;

    // 6 7 8
    // 3 4 5
    // 0 1 2

    fn tile_game() -> Game {
        // N red, E blue, S red, W blue.
        Game::from_config(GameConfig::new("tiles", 1, BoardConfig::square(3, 3)).with_component(
            ComponentConfig::tile("Cross", vec![1, 2, 1, 2], vec![TilePathConfig { side1: 0, side2: 2, colour: 1 }]),
        ))
        .unwrap()
    }

    fn put_tile(context: &mut Context<'_>, site: usize, rotation: i32) {
        context
            .state_mut()
            .board_mut()
            .push(SiteType::Cell, site, Piece::new(1, PlayerId::NEUTRAL).with_rotation(rotation));
    }

    #[test]
    fn test_sides_match_same_rotation() {
        let game = tile_game();
        let mut context = Context::new(&game, GameRng::new(1));
        put_tile(&mut context, 4, 0);
        put_tile(&mut context, 7, 0);
        put_tile(&mut context, 5, 0);

        // 4 shows red north against 7's red south, blue east against 5's blue west.
        assert!(IsSidesMatch::at(IntConstant::boxed(4)).eval(&mut context));
    }

    #[test]
    fn test_sides_mismatch_after_rotation() {
        let game = tile_game();
        let mut context = Context::new(&game, GameRng::new(1));
        put_tile(&mut context, 4, 0);
        // Turned once, 7 shows its own W (blue) on board S.
        put_tile(&mut context, 7, 1);
        context.state_mut().set_last_move(-1, 4);

        assert!(!IsSidesMatch::new().eval(&mut context));
    }

    #[test]
    fn test_sides_match_lone_tile_and_empty_site() {
        let game = tile_game();
        let mut context = Context::new(&game, GameRng::new(1));
        put_tile(&mut context, 0, 3);

        assert!(IsSidesMatch::at(IntConstant::boxed(0)).eval(&mut context));
        assert!(!IsSidesMatch::at(IntConstant::boxed(1)).eval(&mut context));
    }

    fn domino_game() -> Game {
        Game::from_config(
            GameConfig::new("dominoes", 1, BoardConfig::square(3, 3))
                .with_component(ComponentConfig::domino("D34", (3, 4)))
                .with_component(ComponentConfig::domino("D44", (4, 4))),
        )
        .unwrap()
    }

    fn put_domino(context: &mut Context<'_>, what: usize, (a, a_pips, a_rot): (usize, i32, i32), (b, b_pips, b_rot): (usize, i32, i32)) {
        let board = context.state_mut().board_mut();
        board.push(SiteType::Cell, a, Piece::new(what, PlayerId::NEUTRAL).with_value(a_pips).with_rotation(a_rot));
        board.push(SiteType::Cell, b, Piece::new(what, PlayerId::NEUTRAL).with_value(b_pips).with_rotation(b_rot));
    }

    #[test]
    fn test_pips_match() {
        let game = domino_game();
        let mut context = Context::new(&game, GameRng::new(1));
        // Horizontal 3|4 on cells 0 (partner east) and 1 (partner west).
        put_domino(&mut context, 1, (0, 3, 1), (1, 4, 3));
        // Vertical 4|4 on cells 4 (partner north) and 7 (partner south): 4 touches 1.
        put_domino(&mut context, 2, (4, 4, 0), (7, 4, 2));

        assert!(IsPipsMatch::at(IntConstant::boxed(4)).eval(&mut context));
        assert!(IsPipsMatch::at(IntConstant::boxed(0)).eval(&mut context));
    }

    #[test]
    fn test_pips_mismatch() {
        let game = domino_game();
        let mut context = Context::new(&game, GameRng::new(1));
        put_domino(&mut context, 1, (0, 3, 1), (1, 4, 3));
        // 4|4 vertical on 3 (partner north) and 6: 3 touches 0, which shows 3.
        put_domino(&mut context, 2, (3, 4, 0), (6, 4, 2));
        context.state_mut().set_last_move(-1, 3);

        assert!(!IsPipsMatch::new().eval(&mut context));
    }

    #[test]
    fn test_pips_requires_dominoes() {
        let game = tile_game();
        let mut report = Report::new();
        assert!(IsPipsMatch::new().missing_requirement(&game, &mut report));
        assert!(!IsSidesMatch::new().missing_requirement(&game, &mut report));
        assert_eq!(report.error_count(), 1);
    }
}
