//! `SitesSupport`: empty sites resting on enough occupied neighbours.

use crate::board::{DirectionSet, SiteType};
use crate::context::Context;
use crate::game::{Game, Region};
use crate::ludeme::{Concept, ConceptSet, Ludeme};

use super::super::{site_type_or_default, RegionFunction};

/// Empty sites with at least `min` occupied neighbours in `directions`.
///
/// Used by placement games where a piece needs support to be played
/// (stacking on a pyramid, growing from existing groups).
#[derive(Clone, Debug)]
pub struct SitesSupport {
    directions: DirectionSet,
    min: usize,
    site_type: Option<SiteType>,
}

impl SitesSupport {
    #[must_use]
    pub fn new(min: usize) -> Self {
        Self {
            directions: DirectionSet::Orthogonal,
            min,
            site_type: None,
        }
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

impl Ludeme for SitesSupport {
    fn name(&self) -> &'static str {
        "SitesSupport"
    }

    fn is_static(&self) -> bool {
        false
    }

    fn concepts_flat(&self, _game: &Game) -> ConceptSet {
        ConceptSet::of(Concept::Support)
    }
}

impl RegionFunction for SitesSupport {
    fn eval(&self, context: &mut Context<'_>) -> Region {
        let site_type = site_type_or_default(self.site_type, context);
        let topology = context.topology();
        let board = context.board();
        board
            .empty_sites(site_type)
            .filter(|&site| {
                topology
                    .neighbours(site_type, site, self.directions)
                    .filter(|&n| !board.is_empty(site_type, n))
                    .count()
                    >= self.min
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BoardConfig, GameConfig, GameRng, PlayerId};
    use crate::game::Piece;

    #[test]
    fn test_support_counts_occupied_neighbours() {
        let game = Game::from_config(GameConfig::new("t", 1, BoardConfig::square(3, 3)).with_player_pieces("Disc"))
            .unwrap();
        let mut context = Context::new(&game, GameRng::new(1));
        let board = context.state_mut().board_mut();
        // 6 7 8
        // 3 4 5
        // 0 1 2
        board.push(SiteType::Cell, 1, Piece::new(1, PlayerId::new(1)));
        board.push(SiteType::Cell, 3, Piece::new(1, PlayerId::new(1)));

        let one = SitesSupport::new(1).eval(&mut context);
        assert_eq!(one.sites(), &[0, 2, 4, 6]);

        let two = SitesSupport::new(2).eval(&mut context);
        assert_eq!(two.sites(), &[0, 4]);

        let diagonal = SitesSupport::new(1).directions(DirectionSet::Diagonal).eval(&mut context);
        assert_eq!(diagonal.sites(), &[5, 7]);
    }
}
