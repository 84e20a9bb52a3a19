//! Integer queries on the current state.

use crate::board::SiteType;
use crate::context::Context;
use crate::core::UNDEFINED;
use crate::game::{Game, Piece};
use crate::ludeme::{Concept, ConceptSet, GameFlags, Ludeme};

use super::super::{precompute, site_index, site_type_or_default, BoxInt, BoxRegion, IntFunction};

/// The player to move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Mover;

impl Ludeme for Mover {
    fn name(&self) -> &'static str {
        "Mover"
    }

    fn is_static(&self) -> bool {
        false
    }
}

impl IntFunction for Mover {
    fn eval(&self, context: &mut Context<'_>) -> i32 {
        i32::from(context.mover())
    }
}

/// Origin site of the last applied move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LastFrom;

impl Ludeme for LastFrom {
    fn name(&self) -> &'static str {
        "LastFrom"
    }

    fn is_static(&self) -> bool {
        false
    }
}

impl IntFunction for LastFrom {
    fn eval(&self, context: &mut Context<'_>) -> i32 {
        context.state().last_from()
    }
}

/// Destination site of the last applied move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LastTo;

impl Ludeme for LastTo {
    fn name(&self) -> &'static str {
        "LastTo"
    }

    fn is_static(&self) -> bool {
        false
    }
}

impl IntFunction for LastTo {
    fn eval(&self, context: &mut Context<'_>) -> i32 {
        context.state().last_to()
    }
}

/// Which field of the top piece a `PieceAt` query reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PieceField {
    Who,
    What,
    State,
    Value,
    Rotation,
}

impl PieceField {
    fn read(self, piece: Option<&Piece>) -> i32 {
        match (self, piece) {
            (PieceField::Who, Some(piece)) => i32::from(piece.who),
            (PieceField::What, Some(piece)) => piece.what as i32,
            (PieceField::State, Some(piece)) => piece.state,
            (PieceField::Value, Some(piece)) => piece.value,
            (PieceField::Rotation, Some(piece)) => piece.rotation,
            (PieceField::Who | PieceField::What, None) => 0,
            (_, None) => UNDEFINED,
        }
    }
}

/// One field of the top piece on a site.
///
/// Empty sites give 0 for owner and component, `UNDEFINED` for the
/// others; off-board sites give `UNDEFINED`.
#[derive(Debug)]
pub struct PieceAt {
    field: PieceField,
    site: BoxInt,
    site_type: Option<SiteType>,
}

impl PieceAt {
    fn new(field: PieceField, site: BoxInt) -> Self {
        Self {
            field,
            site,
            site_type: None,
        }
    }

    #[must_use]
    pub fn on(mut self, site_type: SiteType) -> Self {
        self.site_type = Some(site_type);
        self
    }
}

/// Owner of the top piece on a site.
pub struct WhoAt;
/// Component of the top piece on a site.
pub struct WhatAt;
/// Local state of the top piece on a site.
pub struct StateAt;
/// Value of the top piece on a site.
pub struct ValueAt;
/// Rotation of the top piece on a site.
pub struct RotationAt;

impl WhoAt {
    #[must_use]
    #[allow(clippy::new_ret_no_self)]
    pub fn new(site: BoxInt) -> PieceAt {
        PieceAt::new(PieceField::Who, site)
    }
}

impl WhatAt {
    #[must_use]
    #[allow(clippy::new_ret_no_self)]
    pub fn new(site: BoxInt) -> PieceAt {
        PieceAt::new(PieceField::What, site)
    }
}

impl StateAt {
    #[must_use]
    #[allow(clippy::new_ret_no_self)]
    pub fn new(site: BoxInt) -> PieceAt {
        PieceAt::new(PieceField::State, site)
    }
}

impl ValueAt {
    #[must_use]
    #[allow(clippy::new_ret_no_self)]
    pub fn new(site: BoxInt) -> PieceAt {
        PieceAt::new(PieceField::Value, site)
    }
}

impl RotationAt {
    #[must_use]
    #[allow(clippy::new_ret_no_self)]
    pub fn new(site: BoxInt) -> PieceAt {
        PieceAt::new(PieceField::Rotation, site)
    }
}

impl Ludeme for PieceAt {
    fn name(&self) -> &'static str {
        match self.field {
            PieceField::Who => "WhoAt",
            PieceField::What => "WhatAt",
            PieceField::State => "StateAt",
            PieceField::Value => "ValueAt",
            PieceField::Rotation => "RotationAt",
        }
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
        match self.field {
            PieceField::State => GameFlags::SITE_STATE,
            PieceField::Value => GameFlags::PIECE_VALUE,
            PieceField::Rotation => GameFlags::ROTATION,
            PieceField::Who | PieceField::What => GameFlags::EMPTY,
        }
    }

    fn concepts_flat(&self, _game: &Game) -> ConceptSet {
        match self.field {
            PieceField::State => ConceptSet::of(Concept::SiteState),
            PieceField::Value => ConceptSet::of(Concept::PieceValue),
            _ => ConceptSet::EMPTY,
        }
    }
}

impl IntFunction for PieceAt {
    fn eval(&self, context: &mut Context<'_>) -> i32 {
        let site_type = site_type_or_default(self.site_type, context);
        let site = self.site.eval(context);
        match site_index(context, site_type, site) {
            Some(site) => self.field.read(context.board().top(site_type, site)),
            None => UNDEFINED,
        }
    }
}

/// Number of sites in a region.
#[derive(Debug)]
pub struct CountSites {
    region: BoxRegion,
    precomputed: Option<i32>,
}

impl CountSites {
    #[must_use]
    pub fn new(region: BoxRegion) -> Self {
        Self {
            region,
            precomputed: None,
        }
    }

    fn compute(&self, context: &mut Context<'_>) -> i32 {
        self.region.eval(context).len() as i32
    }
}

impl Ludeme for CountSites {
    fn name(&self) -> &'static str {
        "CountSites"
    }

    fn children(&self) -> Vec<&dyn Ludeme> {
        vec![self.region.as_ludeme()]
    }

    fn preprocess(&mut self, game: &Game) {
        self.region.preprocess(game);
        let value = precompute(self.is_static(), game, |context| self.compute(context));
        self.precomputed = value;
    }

    fn concepts_flat(&self, _game: &Game) -> ConceptSet {
        ConceptSet::of(Concept::Count)
    }
}

impl IntFunction for CountSites {
    fn eval(&self, context: &mut Context<'_>) -> i32 {
        self.precomputed.unwrap_or_else(|| self.compute(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BoardConfig, GameConfig, GameRng, PlayerId};
    use crate::functions::ints::IntConstant;
    use crate::functions::regions::{SitesBoard, SitesOccupied};

    fn test_game() -> Game {
        Game::from_config(GameConfig::new("t", 2, BoardConfig::square(2, 2)).with_player_pieces("Disc")).unwrap()
    }

    #[test]
    fn test_piece_queries() {
        let game = test_game();
        let mut context = Context::new(&game, GameRng::new(1));
        context.state_mut().board_mut().push(
            SiteType::Cell,
            2,
            Piece::new(2, PlayerId::new(2)).with_state(5).with_value(9),
        );

        assert_eq!(WhoAt::new(IntConstant::boxed(2)).eval(&mut context), 2);
        assert_eq!(WhatAt::new(IntConstant::boxed(2)).eval(&mut context), 2);
        assert_eq!(StateAt::new(IntConstant::boxed(2)).eval(&mut context), 5);
        assert_eq!(ValueAt::new(IntConstant::boxed(2)).eval(&mut context), 9);

        assert_eq!(WhoAt::new(IntConstant::boxed(0)).eval(&mut context), 0);
        assert_eq!(StateAt::new(IntConstant::boxed(0)).eval(&mut context), UNDEFINED);
        assert_eq!(WhoAt::new(IntConstant::boxed(42)).eval(&mut context), UNDEFINED);
    }

    #[test]
    fn test_mover_and_last_move() {
        let game = test_game();
        let mut context = Context::new(&game, GameRng::new(1));
        context.state_mut().set_last_move(1, 3);

        assert_eq!(Mover.eval(&mut context), 1);
        assert_eq!(LastFrom.eval(&mut context), 1);
        assert_eq!(LastTo.eval(&mut context), 3);
    }

    #[test]
    fn test_count_sites() {
        let game = test_game();
        let mut context = Context::new(&game, GameRng::new(1));
        context
            .state_mut()
            .board_mut()
            .push(SiteType::Cell, 0, Piece::new(1, PlayerId::new(1)));

        let mut board = CountSites::new(Box::new(SitesBoard::new()));
        board.preprocess(&game);
        assert_eq!(board.precomputed, Some(4));

        let occupied = CountSites::new(Box::new(SitesOccupied::any()));
        assert!(!occupied.is_static());
        assert_eq!(occupied.eval(&mut context), 1);
    }
}
