//! Regions derived from cell and edge geometry.

use crate::board::{EdgeAxis, SiteType};
use crate::context::Context;
use crate::game::{Game, Region};
use crate::ludeme::{Concept, ConceptSet, GameFlags, Ludeme, Report};

use super::super::{precompute, BoxInt, RegionFunction};
use super::out_of_range;

/// The vertices or edges of one cell.
///
/// Vertices come in corner order (SW, SE, NE, NW), edges in side order
/// (N, E, S, W).
#[derive(Debug)]
pub struct SitesCell {
    cell: BoxInt,
    of: SiteType,
    precomputed: Option<Region>,
}

impl SitesCell {
    /// Corners of a cell.
    #[must_use]
    pub fn vertices(cell: BoxInt) -> Self {
        Self {
            cell,
            of: SiteType::Vertex,
            precomputed: None,
        }
    }

    /// Sides of a cell.
    #[must_use]
    pub fn edges(cell: BoxInt) -> Self {
        Self {
            cell,
            of: SiteType::Edge,
            precomputed: None,
        }
    }

    fn compute(&self, context: &mut Context<'_>) -> Region {
        let cell = self.cell.eval(context);
        let element = usize::try_from(cell)
            .ok()
            .and_then(|cell| context.topology().element(SiteType::Cell, cell));
        match element {
            Some(element) => match self.of {
                SiteType::Edge => Region::from_sites(element.edges().iter().copied()),
                _ => Region::from_sites(element.vertices().iter().copied()),
            },
            None => out_of_range("SitesCell", SiteType::Cell, cell),
        }
    }
}

impl Ludeme for SitesCell {
    fn name(&self) -> &'static str {
        "SitesCell"
    }

    fn children(&self) -> Vec<&dyn Ludeme> {
        vec![self.cell.as_ludeme()]
    }

    fn preprocess(&mut self, game: &Game) {
        self.cell.preprocess(game);
        let value = precompute(self.is_static(), game, |context| self.compute(context));
        self.precomputed = value;
    }

    fn game_flags_flat(&self, _game: &Game) -> GameFlags {
        GameFlags::CELL | GameFlags::for_site_type(self.of)
    }

    fn concepts_flat(&self, _game: &Game) -> ConceptSet {
        ConceptSet::of(Concept::CellRegion)
    }

    fn check_requirements(&self, game: &Game, report: &mut Report) -> bool {
        if game.topology().num_sites(SiteType::Cell) == 0 {
            report.add_error(self.name(), "board has no cells");
            return true;
        }
        false
    }
}

impl RegionFunction for SitesCell {
    fn eval(&self, context: &mut Context<'_>) -> Region {
        match &self.precomputed {
            Some(region) => region.clone(),
            None => self.compute(context),
        }
    }
}

/// Board edges, optionally only those along one axis.
#[derive(Debug, Default)]
pub struct SitesEdge {
    axis: Option<EdgeAxis>,
    precomputed: Option<Region>,
}

impl SitesEdge {
    /// Every edge.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Edges along `axis`.
    #[must_use]
    pub fn axis(axis: EdgeAxis) -> Self {
        Self {
            axis: Some(axis),
            precomputed: None,
        }
    }

    fn compute(&self, context: &Context<'_>) -> Region {
        let topology = context.topology();
        (0..topology.num_sites(SiteType::Edge))
            .filter(|&edge| match self.axis {
                Some(axis) => topology.edge_axis(edge) == Some(axis),
                None => true,
            })
            .collect()
    }
}

impl Ludeme for SitesEdge {
    fn name(&self) -> &'static str {
        "SitesEdge"
    }

    fn preprocess(&mut self, game: &Game) {
        let value = precompute(true, game, |context| self.compute(context));
        self.precomputed = value;
    }

    fn game_flags_flat(&self, _game: &Game) -> GameFlags {
        GameFlags::EDGE
    }

    fn concepts_flat(&self, _game: &Game) -> ConceptSet {
        ConceptSet::of(Concept::EdgeRegion)
    }

    fn check_requirements(&self, game: &Game, report: &mut Report) -> bool {
        if game.topology().num_sites(SiteType::Edge) == 0 {
            report.add_error(self.name(), "board has no edges");
            return true;
        }
        false
    }
}

impl RegionFunction for SitesEdge {
    fn eval(&self, context: &mut Context<'_>) -> Region {
        match &self.precomputed {
            Some(region) => region.clone(),
            None => self.compute(context),
        }
    }
}
