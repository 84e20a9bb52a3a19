//! Iteration over sites, values, players, dice, levels, tracks and edges.

use crate::board::SiteType;
use crate::context::{Context, ContextRegister, RegisterSet};
use crate::core::PlayerId;
use crate::functions::{site_index, site_type_or_default, BoxInt, BoxIntArray, BoxRegion};
use crate::game::{dedup_ordered, Game};
use crate::ludeme::{Concept, ConceptSet, GameFlags, Ludeme, Report};

use super::super::{then_child, then_concepts, BoxMoves, Moves, MovesFunction, Then};

#[derive(Debug)]
enum Iteration {
    Site(BoxRegion),
    Value(BoxIntArray),
    Player,
    Die,
    Level(BoxInt, Option<SiteType>),
    Track,
    Edge(Option<BoxRegion>),
}

impl Iteration {
    fn register(&self) -> ContextRegister {
        match self {
            Iteration::Site(_) => ContextRegister::Site,
            Iteration::Value(_) => ContextRegister::Value,
            Iteration::Player => ContextRegister::Player,
            Iteration::Die => ContextRegister::Pips,
            Iteration::Level(..) => ContextRegister::Level,
            Iteration::Track => ContextRegister::Track,
            Iteration::Edge(_) => ContextRegister::Edge,
        }
    }
}

/// Evaluate a moves subtree once per item, with the item in a register.
///
/// | Form | Items | Register |
/// |---|---|---|
/// | `site` | sites of a region | Site |
/// | `value` | entries of an array | Value |
/// | `player` | 1..=players | Player |
/// | `die` | distinct die values | Pips |
/// | `level` | levels of the stack on a site, bottom first | Level |
/// | `track` | track indices | Track |
/// | `edge` | board edges, or the edges of a region | Edge |
///
/// The register is restored after the last item.
#[derive(Debug)]
pub struct ForEach {
    over: Iteration,
    moves: BoxMoves,
    then: Option<Then>,
}

impl ForEach {
    fn new(over: Iteration, moves: BoxMoves) -> Self {
        Self {
            over,
            moves,
            then: None,
        }
    }

    #[must_use]
    pub fn site(region: BoxRegion, moves: BoxMoves) -> Self {
        Self::new(Iteration::Site(region), moves)
    }

    #[must_use]
    pub fn value(values: BoxIntArray, moves: BoxMoves) -> Self {
        Self::new(Iteration::Value(values), moves)
    }

    #[must_use]
    pub fn player(moves: BoxMoves) -> Self {
        Self::new(Iteration::Player, moves)
    }

    #[must_use]
    pub fn die(moves: BoxMoves) -> Self {
        Self::new(Iteration::Die, moves)
    }

    #[must_use]
    pub fn level(site: BoxInt, site_type: Option<SiteType>, moves: BoxMoves) -> Self {
        Self::new(Iteration::Level(site, site_type), moves)
    }

    #[must_use]
    pub fn track(moves: BoxMoves) -> Self {
        Self::new(Iteration::Track, moves)
    }

    #[must_use]
    pub fn edge(moves: BoxMoves) -> Self {
        Self::new(Iteration::Edge(None), moves)
    }

    #[must_use]
    pub fn edge_in(edges: BoxRegion, moves: BoxMoves) -> Self {
        Self::new(Iteration::Edge(Some(edges)), moves)
    }

    #[must_use]
    pub fn with_then(mut self, then: Then) -> Self {
        self.then = Some(then);
        self
    }

    fn items(&self, context: &mut Context<'_>) -> Vec<i32> {
        match &self.over {
            Iteration::Site(region) => region.eval(context).to_values(),
            Iteration::Value(values) => values.eval(context),
            Iteration::Player => PlayerId::all(context.game().players()).map(i32::from).collect(),
            Iteration::Die => dedup_ordered(&context.state().dice().iter().copied().collect::<Vec<_>>()),
            Iteration::Level(site, site_type) => {
                let site_type = site_type_or_default(*site_type, context);
                let at = site.eval(context);
                let height = site_index(context, site_type, at).map_or(0, |s| context.board().size_stack(site_type, s));
                (0..height).filter_map(|level| i32::try_from(level).ok()).collect()
            }
            Iteration::Track => (0..context.game().tracks().len()).filter_map(|t| i32::try_from(t).ok()).collect(),
            Iteration::Edge(Some(edges)) => edges.eval(context).to_values(),
            Iteration::Edge(None) => (0..context.topology().num_sites(SiteType::Edge))
                .filter_map(|e| i32::try_from(e).ok())
                .collect(),
        }
    }
}

impl Ludeme for ForEach {
    fn name(&self) -> &'static str {
        "ForEach"
    }

    fn children(&self) -> Vec<&dyn Ludeme> {
        let mut children: Vec<&dyn Ludeme> = match &self.over {
            Iteration::Site(region) | Iteration::Edge(Some(region)) => vec![region.as_ludeme()],
            Iteration::Value(values) => vec![values.as_ludeme()],
            Iteration::Level(site, _) => vec![site.as_ludeme()],
            Iteration::Player | Iteration::Die | Iteration::Track | Iteration::Edge(None) => Vec::new(),
        };
        children.push(self.moves.as_ludeme());
        children.extend(then_child(self.then.as_ref()));
        children
    }

    fn is_static(&self) -> bool {
        false
    }

    fn preprocess(&mut self, game: &Game) {
        match &mut self.over {
            Iteration::Site(region) | Iteration::Edge(Some(region)) => region.preprocess(game),
            Iteration::Value(values) => values.preprocess(game),
            Iteration::Level(site, _) => site.preprocess(game),
            Iteration::Player | Iteration::Die | Iteration::Track | Iteration::Edge(None) => {}
        }
        self.moves.preprocess(game);
        if let Some(then) = &mut self.then {
            then.preprocess(game);
        }
    }

    fn game_flags_flat(&self, _game: &Game) -> GameFlags {
        match self.over {
            Iteration::Die => GameFlags::STOCHASTIC,
            Iteration::Level(..) => GameFlags::STACKING,
            Iteration::Track => GameFlags::TRACK,
            Iteration::Edge(_) => GameFlags::EDGE,
            _ => GameFlags::EMPTY,
        }
    }

    fn concepts_flat(&self, _game: &Game) -> ConceptSet {
        ConceptSet::of(Concept::ForEachIteration) | then_concepts(self.then.as_ref())
    }

    fn writes_context_flat(&self) -> RegisterSet {
        RegisterSet::of(self.over.register())
    }

    fn check_requirements(&self, game: &Game, report: &mut Report) -> bool {
        let missing = match self.over {
            Iteration::Die if !game.has_dice() => Some("game has no dice"),
            Iteration::Track if game.tracks().is_empty() => Some("game has no tracks"),
            Iteration::Edge(_) if game.topology().num_sites(SiteType::Edge) == 0 => Some("board has no edges"),
            _ => None,
        };
        if let Some(message) = missing {
            report.add_error(self.name(), message);
            return true;
        }
        if matches!(self.over, Iteration::Level(..)) && !game.is_stacking() {
            report.add_warning(self.name(), "stacks have at most one level in a game without stacking");
        }
        false
    }
}

impl MovesFunction for ForEach {
    fn eval(&self, context: &mut Context<'_>) -> Moves {
        let items = self.items(context);
        let register = self.over.register();
        let mut moves = context.with_saved_registers(RegisterSet::of(register), |context| {
            let mut moves = Moves::new();
            for item in items {
                context.set_register(register, item);
                moves.append(self.moves.eval(context));
            }
            moves
        });
        moves.attach_then(self.then.as_ref());
        moves
    }

    fn then(&self) -> Option<&Then> {
        self.then.as_ref()
    }
}
