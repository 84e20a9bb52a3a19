//! `Edge` and `Hint`: register readers with an explicit-lookup form.
//!
//! Without arguments they read their register like the other readers. With
//! explicit site arguments they look the value up in the topology or the
//! hint table instead, and declare no register dependency of their own.

use crate::board::SiteType;
use crate::context::{Context, ContextRegister, RegisterSet};
use crate::core::{BuildError, BuildResult, UNDEFINED};
use crate::game::Game;
use crate::ludeme::{Concept, ConceptSet, GameFlags, Ludeme, Report};

use super::super::{precompute, site_index, site_type_or_default, BoxInt, IntFunction};

/// Edge index: the Edge register, or the edge joining two vertices.
#[derive(Debug)]
pub struct Edge {
    endpoints: Option<(BoxInt, BoxInt)>,
    precomputed: Option<i32>,
}

impl Edge {
    /// Read the Edge register.
    #[must_use]
    pub fn register() -> Self {
        Self {
            endpoints: None,
            precomputed: None,
        }
    }

    /// The edge joining vertices `v1` and `v2` (`UNDEFINED` if none).
    #[must_use]
    pub fn between(v1: BoxInt, v2: BoxInt) -> Self {
        Self {
            endpoints: Some((v1, v2)),
            precomputed: None,
        }
    }

    /// Build from optional endpoints; both or neither must be given.
    pub fn new(v1: Option<BoxInt>, v2: Option<BoxInt>) -> BuildResult<Self> {
        match (v1, v2) {
            (Some(v1), Some(v2)) => Ok(Self::between(v1, v2)),
            (None, None) => Ok(Self::register()),
            _ => Err(BuildError::InvalidArgument {
                ludeme: "Edge",
                message: "needs both endpoints or none".to_string(),
            }),
        }
    }

    fn compute(&self, context: &mut Context<'_>) -> i32 {
        let Some((v1, v2)) = &self.endpoints else {
            return context.edge();
        };
        let a = v1.eval(context);
        let b = v2.eval(context);
        match (
            site_index(context, SiteType::Vertex, a),
            site_index(context, SiteType::Vertex, b),
        ) {
            (Some(a), Some(b)) => context
                .topology()
                .edge_between(a, b)
                .map_or(UNDEFINED, |edge| edge as i32),
            _ => UNDEFINED,
        }
    }
}

impl Ludeme for Edge {
    fn name(&self) -> &'static str {
        "Edge"
    }

    fn children(&self) -> Vec<&dyn Ludeme> {
        match &self.endpoints {
            Some((v1, v2)) => vec![v1.as_ludeme(), v2.as_ludeme()],
            None => Vec::new(),
        }
    }

    fn is_static(&self) -> bool {
        match &self.endpoints {
            Some((v1, v2)) => v1.is_static() && v2.is_static(),
            None => false,
        }
    }

    fn preprocess(&mut self, game: &Game) {
        if let Some((v1, v2)) = &mut self.endpoints {
            v1.preprocess(game);
            v2.preprocess(game);
        }
        let value = precompute(self.is_static(), game, |context| self.compute(context));
        self.precomputed = value;
    }

    fn game_flags_flat(&self, _game: &Game) -> GameFlags {
        GameFlags::EDGE
    }

    fn concepts_flat(&self, _game: &Game) -> ConceptSet {
        ConceptSet::of(Concept::Edge)
    }

    fn reads_context_flat(&self) -> RegisterSet {
        match self.endpoints {
            Some(_) => RegisterSet::EMPTY,
            None => RegisterSet::of(ContextRegister::Edge),
        }
    }

    fn check_requirements(&self, game: &Game, report: &mut Report) -> bool {
        if self.endpoints.is_some() && game.topology().num_sites(SiteType::Edge) == 0 {
            report.add_error(self.name(), "board has no edges");
            return true;
        }
        false
    }
}

impl IntFunction for Edge {
    fn eval(&self, context: &mut Context<'_>) -> i32 {
        match self.precomputed {
            Some(value) => value,
            None => self.compute(context),
        }
    }
}

/// Puzzle hint: the Hint register, or the hint attached to a site.
#[derive(Debug)]
pub struct Hint {
    site: Option<BoxInt>,
    site_type: Option<SiteType>,
    precomputed: Option<i32>,
}

impl Hint {
    /// Read the Hint register.
    #[must_use]
    pub fn register() -> Self {
        Self {
            site: None,
            site_type: None,
            precomputed: None,
        }
    }

    /// The hint on `site` (`UNDEFINED` if none).
    #[must_use]
    pub fn at(site: BoxInt) -> Self {
        Self {
            site: Some(site),
            site_type: None,
            precomputed: None,
        }
    }

    /// Look the site up among sites of `site_type`.
    #[must_use]
    pub fn on(mut self, site_type: SiteType) -> Self {
        self.site_type = Some(site_type);
        self
    }

    fn compute(&self, context: &mut Context<'_>) -> i32 {
        let Some(site) = &self.site else {
            return context.hint();
        };
        let site_type = site_type_or_default(self.site_type, context);
        let site = site.eval(context);
        site_index(context, site_type, site)
            .and_then(|site| context.game().hint(site_type, site))
            .unwrap_or(UNDEFINED)
    }
}

impl Ludeme for Hint {
    fn name(&self) -> &'static str {
        "Hint"
    }

    fn children(&self) -> Vec<&dyn Ludeme> {
        self.site.iter().map(|site| site.as_ludeme()).collect()
    }

    fn is_static(&self) -> bool {
        self.site.as_ref().is_some_and(|site| site.is_static())
    }

    fn preprocess(&mut self, game: &Game) {
        if let Some(site) = &mut self.site {
            site.preprocess(game);
        }
        let value = precompute(self.is_static(), game, |context| self.compute(context));
        self.precomputed = value;
    }

    fn game_flags_flat(&self, _game: &Game) -> GameFlags {
        GameFlags::HINTS
    }

    fn concepts_flat(&self, _game: &Game) -> ConceptSet {
        ConceptSet::of(Concept::Hint)
    }

    fn reads_context_flat(&self) -> RegisterSet {
        match self.site {
            Some(_) => RegisterSet::EMPTY,
            None => RegisterSet::of(ContextRegister::Hint),
        }
    }

    fn check_requirements(&self, game: &Game, report: &mut Report) -> bool {
        if game.has_hints() {
            return false;
        }
        if self.site.is_some() {
            report.add_error(self.name(), "game has no hints");
            true
        } else {
            report.add_warning(self.name(), "hint register used in a game without hints");
            false
        }
    }
}

impl IntFunction for Hint {
    fn eval(&self, context: &mut Context<'_>) -> i32 {
        match self.precomputed {
            Some(value) => value,
            None => self.compute(context),
        }
    }
}
