//! Explicit, whole-board and per-row regions, and occupancy filters.

use crate::board::SiteType;
use crate::context::Context;
use crate::game::{Game, Region};
use crate::ludeme::{Concept, ConceptSet, GameFlags, Ludeme, Report};

use super::super::{precompute, site_type_or_default, BoxInt, RegionFunction};
use super::out_of_range;

/// An explicit list of sites.
#[derive(Debug)]
pub struct Sites {
    sites: Vec<BoxInt>,
    site_type: Option<SiteType>,
    precomputed: Option<Region>,
}

impl Sites {
    #[must_use]
    pub fn new(sites: Vec<BoxInt>) -> Self {
        Self {
            sites,
            site_type: None,
            precomputed: None,
        }
    }

    /// A constant list of sites.
    #[must_use]
    pub fn constant(sites: &[usize]) -> Self {
        Self::new(
            sites
                .iter()
                .map(|&site| super::super::ints::IntConstant::boxed(site as i32))
                .collect(),
        )
    }

    #[must_use]
    pub fn on(mut self, site_type: SiteType) -> Self {
        self.site_type = Some(site_type);
        self
    }

    fn compute(&self, context: &mut Context<'_>) -> Region {
        let site_type = site_type_or_default(self.site_type, context);
        let mut sites = Vec::with_capacity(self.sites.len());
        for site in &self.sites {
            let value = site.eval(context);
            if !context.topology().contains(site_type, value) {
                return out_of_range("Sites", site_type, value);
            }
            sites.push(value as usize);
        }
        Region::from_sites(sites)
    }
}

impl Ludeme for Sites {
    fn name(&self) -> &'static str {
        "Sites"
    }

    fn children(&self) -> Vec<&dyn Ludeme> {
        self.sites.iter().map(|s| s.as_ludeme()).collect()
    }

    fn preprocess(&mut self, game: &Game) {
        for site in &mut self.sites {
            site.preprocess(game);
        }
        let value = precompute(self.is_static(), game, |context| self.compute(context));
        self.precomputed = value;
    }

    fn game_flags_flat(&self, game: &Game) -> GameFlags {
        GameFlags::for_site_type(self.site_type.unwrap_or(game.default_site_type()))
    }
}

impl RegionFunction for Sites {
    fn eval(&self, context: &mut Context<'_>) -> Region {
        match &self.precomputed {
            Some(region) => region.clone(),
            None => self.compute(context),
        }
    }
}

/// Every site of the board.
#[derive(Debug, Default)]
pub struct SitesBoard {
    site_type: Option<SiteType>,
    precomputed: Option<Region>,
}

impl SitesBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on(mut self, site_type: SiteType) -> Self {
        self.site_type = Some(site_type);
        self
    }

    fn compute(&self, context: &Context<'_>) -> Region {
        let site_type = site_type_or_default(self.site_type, context);
        Region::from_sites(0..context.topology().num_sites(site_type))
    }
}

impl Ludeme for SitesBoard {
    fn name(&self) -> &'static str {
        "SitesBoard"
    }

    fn preprocess(&mut self, game: &Game) {
        let value = precompute(true, game, |context| self.compute(context));
        self.precomputed = value;
    }

    fn game_flags_flat(&self, game: &Game) -> GameFlags {
        GameFlags::for_site_type(self.site_type.unwrap_or(game.default_site_type()))
    }
}

impl RegionFunction for SitesBoard {
    fn eval(&self, context: &mut Context<'_>) -> Region {
        match &self.precomputed {
            Some(region) => region.clone(),
            None => self.compute(context),
        }
    }
}

/// Occupied board sites, optionally only those whose top piece belongs to
/// a given player.
#[derive(Debug, Default)]
pub struct SitesOccupied {
    who: Option<BoxInt>,
    site_type: Option<SiteType>,
}

impl SitesOccupied {
    /// Sites occupied by anyone.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Sites whose top piece belongs to `who`.
    #[must_use]
    pub fn by(who: BoxInt) -> Self {
        Self {
            who: Some(who),
            site_type: None,
        }
    }

    #[must_use]
    pub fn on(mut self, site_type: SiteType) -> Self {
        self.site_type = Some(site_type);
        self
    }
}

impl Ludeme for SitesOccupied {
    fn name(&self) -> &'static str {
        "SitesOccupied"
    }

    fn children(&self) -> Vec<&dyn Ludeme> {
        self.who.iter().map(|w| w.as_ludeme()).collect()
    }

    fn is_static(&self) -> bool {
        false
    }

    fn preprocess(&mut self, game: &Game) {
        if let Some(who) = &mut self.who {
            who.preprocess(game);
        }
    }

    fn concepts_flat(&self, _game: &Game) -> ConceptSet {
        ConceptSet::of(Concept::OccupiedRegion)
    }
}

impl RegionFunction for SitesOccupied {
    fn eval(&self, context: &mut Context<'_>) -> Region {
        let site_type = site_type_or_default(self.site_type, context);
        let who = self.who.as_ref().map(|who| who.eval(context));
        let board = context.board();
        board
            .occupied_sites(site_type)
            .filter(|&site| match who {
                Some(who) => board.top(site_type, site).is_some_and(|p| i32::from(p.who) == who),
                None => true,
            })
            .collect()
    }
}

/// Sites of one board row (row 0 is the bottom row).
#[derive(Debug)]
pub struct SitesRow {
    row: BoxInt,
    site_type: Option<SiteType>,
    precomputed: Option<Region>,
}

impl SitesRow {
    #[must_use]
    pub fn new(row: BoxInt) -> Self {
        Self {
            row,
            site_type: None,
            precomputed: None,
        }
    }

    #[must_use]
    pub fn on(mut self, site_type: SiteType) -> Self {
        self.site_type = Some(site_type);
        self
    }

    fn compute(&self, context: &mut Context<'_>) -> Region {
        let site_type = site_type_or_default(self.site_type, context);
        let row = self.row.eval(context);
        let rows = context.topology().row_count(site_type);
        match usize::try_from(row) {
            Ok(row) if row < rows => context.topology().sites_in_row(site_type, row).collect(),
            _ => out_of_range("SitesRow", site_type, row),
        }
    }
}

impl Ludeme for SitesRow {
    fn name(&self) -> &'static str {
        "SitesRow"
    }

    fn children(&self) -> Vec<&dyn Ludeme> {
        vec![self.row.as_ludeme()]
    }

    fn preprocess(&mut self, game: &Game) {
        self.row.preprocess(game);
        let value = precompute(self.is_static(), game, |context| self.compute(context));
        self.precomputed = value;
    }

    fn concepts_flat(&self, _game: &Game) -> ConceptSet {
        ConceptSet::of(Concept::RowRegion)
    }

    fn check_crash(&self, game: &Game, report: &mut Report) -> bool {
        if !self.row.is_static() {
            return false;
        }
        let mut context = Context::scratch(game);
        let row = self.row.eval(&mut context);
        let site_type = self.site_type.unwrap_or(game.default_site_type());
        let rows = game.topology().row_count(site_type);
        if usize::try_from(row).map_or(true, |row| row >= rows) {
            report.add_error(
                self.name(),
                format!("row {row} does not exist, the board has {rows} {site_type:?} row(s)"),
            );
            return true;
        }
        false
    }
}

impl RegionFunction for SitesRow {
    fn eval(&self, context: &mut Context<'_>) -> Region {
        match &self.precomputed {
            Some(region) => region.clone(),
            None => self.compute(context),
        }
    }
}

/// Board sites whose top piece has a given local state.
#[derive(Debug)]
pub struct SitesState {
    state: BoxInt,
    site_type: Option<SiteType>,
}

impl SitesState {
    #[must_use]
    pub fn new(state: BoxInt) -> Self {
        Self {
            state,
            site_type: None,
        }
    }

    #[must_use]
    pub fn on(mut self, site_type: SiteType) -> Self {
        self.site_type = Some(site_type);
        self
    }
}

impl Ludeme for SitesState {
    fn name(&self) -> &'static str {
        "SitesState"
    }

    fn children(&self) -> Vec<&dyn Ludeme> {
        vec![self.state.as_ludeme()]
    }

    fn is_static(&self) -> bool {
        false
    }

    fn preprocess(&mut self, game: &Game) {
        self.state.preprocess(game);
    }

    fn game_flags_flat(&self, _game: &Game) -> GameFlags {
        GameFlags::SITE_STATE
    }

    fn concepts_flat(&self, _game: &Game) -> ConceptSet {
        ConceptSet::of(Concept::SiteState)
    }
}

impl RegionFunction for SitesState {
    fn eval(&self, context: &mut Context<'_>) -> Region {
        let site_type = site_type_or_default(self.site_type, context);
        let state = self.state.eval(context);
        let board = context.board();
        board
            .occupied_sites(site_type)
            .filter(|&site| board.state(site_type, site) == state)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BoardConfig, GameConfig, GameRng, PlayerId};
    use crate::functions::ints::{IntConstant, Mover, Site};
    use crate::game::Piece;

    fn test_game() -> Game {
        Game::from_config(GameConfig::new("t", 2, BoardConfig::square(3, 3)).with_player_pieces("Disc")).unwrap()
    }

    #[test]
    fn test_sites_constant() {
        let game = test_game();
        let mut context = Context::new(&game, GameRng::new(1));
        let mut sites = Sites::constant(&[4, 0, 4]);
        sites.preprocess(&game);

        assert!(sites.is_static());
        assert_eq!(sites.eval(&mut context).sites(), &[4, 0]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of range")]
    fn test_sites_out_of_range_is_a_defect() {
        let game = test_game();
        let mut context = Context::new(&game, GameRng::new(1));
        let _ = Sites::constant(&[9]).eval(&mut context);
    }

    #[test]
    fn test_sites_board() {
        let game = test_game();
        let mut context = Context::new(&game, GameRng::new(1));
        assert_eq!(SitesBoard::new().eval(&mut context).len(), 9);
        assert_eq!(SitesBoard::new().on(SiteType::Vertex).eval(&mut context).len(), 16);
        assert_eq!(SitesBoard::new().on(SiteType::Edge).eval(&mut context).len(), 24);
    }

    #[test]
    fn test_sites_occupied_by_player() {
        let game = test_game();
        let mut context = Context::new(&game, GameRng::new(1));
        let board = context.state_mut().board_mut();
        board.push(SiteType::Cell, 5, Piece::new(1, PlayerId::new(1)));
        board.push(SiteType::Cell, 1, Piece::new(2, PlayerId::new(2)));
        board.push(SiteType::Cell, 7, Piece::new(1, PlayerId::new(1)));

        assert_eq!(SitesOccupied::any().eval(&mut context).sites(), &[1, 5, 7]);
        assert_eq!(SitesOccupied::by(Box::new(Mover)).eval(&mut context).sites(), &[5, 7]);
    }

    #[test]
    fn test_sites_row() {
        let game = test_game();
        let mut context = Context::new(&game, GameRng::new(1));
        let mut row = SitesRow::new(IntConstant::boxed(1));
        row.preprocess(&game);
        assert_eq!(row.eval(&mut context).sites(), &[3, 4, 5]);
        assert!(!SitesRow::new(Box::new(Site)).is_static());
    }

    #[test]
    fn test_sites_row_will_crash() {
        let game = test_game();
        let mut report = Report::new();
        assert!(SitesRow::new(IntConstant::boxed(3)).will_crash(&game, &mut report));
        assert!(!SitesRow::new(IntConstant::boxed(2)).will_crash(&game, &mut report));
        assert!(!SitesRow::new(Box::new(Site)).will_crash(&game, &mut report));
        assert_eq!(report.error_count(), 1);
    }

    #[test]
    fn test_sites_state() {
        let game = test_game();
        let mut context = Context::new(&game, GameRng::new(1));
        let board = context.state_mut().board_mut();
        board.push(SiteType::Cell, 2, Piece::new(1, PlayerId::new(1)).with_state(1));
        board.push(SiteType::Cell, 3, Piece::new(1, PlayerId::new(1)).with_state(2));
        board.push(SiteType::Cell, 8, Piece::new(2, PlayerId::new(2)).with_state(1));

        assert_eq!(SitesState::new(IntConstant::boxed(1)).eval(&mut context).sites(), &[2, 8]);
    }
}
