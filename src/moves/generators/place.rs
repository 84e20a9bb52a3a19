//! Placing and removing pieces.

use crate::board::SiteType;
use crate::context::Context;
use crate::core::PlayerId;
use crate::functions::{site_type_or_default, BoxInt, BoxRegion};
use crate::game::{Game, Piece};
use crate::ludeme::{Concept, ConceptSet, GameFlags, Ludeme, Report};

use super::super::{
    collect_moves, then_child, then_concepts, Action, ActionKind, Move, Moves, MovesCursor, MovesFunction, Then,
};

/// Place a component on each site of a region.
///
/// Only empty sites are offered unless the game stacks pieces. The piece
/// belongs to the component's owner.
#[derive(Debug)]
pub struct Add {
    what: BoxInt,
    region: BoxRegion,
    site_type: Option<SiteType>,
    state: Option<BoxInt>,
    rotation: Option<BoxInt>,
    value: Option<BoxInt>,
    then: Option<Then>,
}

impl Add {
    /// Place component `what` (1-based index) on the sites of `region`.
    #[must_use]
    pub fn new(what: BoxInt, region: BoxRegion) -> Self {
        Self {
            what,
            region,
            site_type: None,
            state: None,
            rotation: None,
            value: None,
            then: None,
        }
    }

    #[must_use]
    pub fn on(mut self, site_type: SiteType) -> Self {
        self.site_type = Some(site_type);
        self
    }

    #[must_use]
    pub fn with_state(mut self, state: BoxInt) -> Self {
        self.state = Some(state);
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation: BoxInt) -> Self {
        self.rotation = Some(rotation);
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: BoxInt) -> Self {
        self.value = Some(value);
        self
    }

    #[must_use]
    pub fn with_then(mut self, then: Then) -> Self {
        self.then = Some(then);
        self
    }

    fn piece(&self, context: &mut Context<'_>) -> Option<Piece> {
        let what = usize::try_from(self.what.eval(context)).ok()?;
        let owner = context.game().component(what)?.owner;
        let mut piece = Piece::new(what, owner);
        if let Some(state) = &self.state {
            piece.state = state.eval(context);
        }
        if let Some(rotation) = &self.rotation {
            piece.rotation = rotation.eval(context);
        }
        if let Some(value) = &self.value {
            piece.value = value.eval(context);
        }
        Some(piece)
    }
}

impl Ludeme for Add {
    fn name(&self) -> &'static str {
        "Add"
    }

    fn children(&self) -> Vec<&dyn Ludeme> {
        let mut children = vec![self.what.as_ludeme(), self.region.as_ludeme()];
        children.extend([&self.state, &self.rotation, &self.value].into_iter().flatten().map(|c| c.as_ludeme()));
        children.extend(then_child(self.then.as_ref()));
        children
    }

    fn is_static(&self) -> bool {
        false
    }

    fn preprocess(&mut self, game: &Game) {
        self.what.preprocess(game);
        self.region.preprocess(game);
        for child in [&mut self.state, &mut self.rotation, &mut self.value].into_iter().flatten() {
            child.preprocess(game);
        }
        if let Some(then) = &mut self.then {
            then.preprocess(game);
        }
    }

    fn game_flags_flat(&self, game: &Game) -> GameFlags {
        let mut flags = GameFlags::for_site_type(self.site_type.unwrap_or_else(|| game.default_site_type()));
        if self.state.is_some() {
            flags |= GameFlags::SITE_STATE;
        }
        if self.rotation.is_some() {
            flags |= GameFlags::ROTATION;
        }
        if self.value.is_some() {
            flags |= GameFlags::PIECE_VALUE;
        }
        flags
    }

    fn concepts_flat(&self, _game: &Game) -> ConceptSet {
        ConceptSet::of(Concept::AddDecision) | then_concepts(self.then.as_ref())
    }

    fn check_crash(&self, game: &Game, report: &mut Report) -> bool {
        if !self.what.is_static() {
            return false;
        }
        let what = self.what.eval(&mut Context::scratch(game));
        if usize::try_from(what).ok().and_then(|w| game.component(w)).is_none() {
            report.add_error(self.name(), format!("no component with index {what}"));
            return true;
        }
        false
    }
}

impl MovesFunction for Add {
    fn eval(&self, context: &mut Context<'_>) -> Moves {
        let mut cursor = self.cursor(context);
        collect_moves(cursor.as_mut(), context)
    }

    fn cursor<'a>(&'a self, context: &mut Context<'_>) -> Box<dyn MovesCursor + 'a> {
        let site_type = site_type_or_default(self.site_type, context);
        let piece = self.piece(context);
        let sites = match piece {
            Some(_) => self.region.eval(context).sites().to_vec(),
            None => Vec::new(),
        };
        Box::new(AddCursor {
            piece: piece.unwrap_or_default(),
            site_type,
            sites: sites.into_iter(),
            then: self.then.as_ref(),
        })
    }

    fn then(&self) -> Option<&Then> {
        self.then.as_ref()
    }
}

/// Checks one site per step, so `can_move` stops at the first free site.
struct AddCursor<'a> {
    piece: Piece,
    site_type: SiteType,
    sites: std::vec::IntoIter<usize>,
    then: Option<&'a Then>,
}

impl MovesCursor for AddCursor<'_> {
    fn next_move(&mut self, context: &mut Context<'_>) -> Option<Move> {
        let stacking = context.game().is_stacking();
        let board = context.board();
        let site = self.sites.by_ref().find(|&site| {
            site < board.num_sites(self.site_type) && (stacking || board.is_empty(self.site_type, site))
        })?;

        let to = i32::try_from(site).ok()?;
        let mut mv = Move::with_action(
            context.mover(),
            Action::decision(ActionKind::Add {
                site_type: self.site_type,
                site,
                piece: self.piece,
            }),
        )
        .between(to, to);
        if let Some(then) = self.then {
            mv.push_then(then.consequence());
        }
        Some(mv)
    }
}

/// Remove the top piece of each occupied site of a region.
#[derive(Debug)]
pub struct Remove {
    region: BoxRegion,
    site_type: Option<SiteType>,
    owner: Option<PlayerId>,
    then: Option<Then>,
}

impl Remove {
    #[must_use]
    pub fn new(region: BoxRegion) -> Self {
        Self {
            region,
            site_type: None,
            owner: None,
            then: None,
        }
    }

    #[must_use]
    pub fn on(mut self, site_type: SiteType) -> Self {
        self.site_type = Some(site_type);
        self
    }

    /// Only remove pieces of one player.
    #[must_use]
    pub fn owned_by(mut self, owner: PlayerId) -> Self {
        self.owner = Some(owner);
        self
    }

    #[must_use]
    pub fn with_then(mut self, then: Then) -> Self {
        self.then = Some(then);
        self
    }
}

impl Ludeme for Remove {
    fn name(&self) -> &'static str {
        "Remove"
    }

    fn children(&self) -> Vec<&dyn Ludeme> {
        let mut children = vec![self.region.as_ludeme()];
        children.extend(then_child(self.then.as_ref()));
        children
    }

    fn is_static(&self) -> bool {
        false
    }

    fn preprocess(&mut self, game: &Game) {
        self.region.preprocess(game);
        if let Some(then) = &mut self.then {
            then.preprocess(game);
        }
    }

    fn game_flags_flat(&self, game: &Game) -> GameFlags {
        GameFlags::for_site_type(self.site_type.unwrap_or_else(|| game.default_site_type()))
    }

    fn concepts_flat(&self, _game: &Game) -> ConceptSet {
        ConceptSet::of(Concept::RemoveEffect) | then_concepts(self.then.as_ref())
    }
}

impl MovesFunction for Remove {
    fn eval(&self, context: &mut Context<'_>) -> Moves {
        let site_type = site_type_or_default(self.site_type, context);
        let region = self.region.eval(context);
        let mover = context.mover();
        let board = context.board();

        let mut moves: Moves = region
            .iter()
            .filter(|&site| {
                board
                    .top(site_type, site)
                    .is_some_and(|piece| self.owner.map_or(true, |owner| piece.who == owner))
            })
            .filter_map(|site| {
                let at = i32::try_from(site).ok()?;
                let action = Action::decision(ActionKind::Remove { site_type, site });
                Some(Move::with_action(mover, action).between(at, at))
            })
            .collect();
        moves.attach_then(self.then.as_ref());
        moves
    }

    fn then(&self) -> Option<&Then> {
        self.then.as_ref()
    }
}
