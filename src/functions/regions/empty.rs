//! `SitesEmpty`: empty sites of a container.

use crate::board::SiteType;
use crate::context::Context;
use crate::game::{Game, Region};
use crate::ludeme::{Concept, ConceptSet, GameFlags, Ludeme, Report};

use super::super::{site_type_or_default, BoxInt, RegionFunction};
use super::out_of_range;

/// Empty sites of a container.
///
/// `SitesEmpty::board` is the common case: it skips the container lookup
/// and reads the board directly. Occupancy changes every turn, so neither
/// form is ever static.
#[derive(Debug, Default)]
pub struct SitesEmpty {
    container: Option<BoxInt>,
    site_type: Option<SiteType>,
}

impl SitesEmpty {
    /// Empty board sites.
    #[must_use]
    pub fn board() -> Self {
        Self::default()
    }

    /// Empty sites of the container with index `container` (0 is the board).
    #[must_use]
    pub fn container(container: BoxInt) -> Self {
        Self {
            container: Some(container),
            site_type: None,
        }
    }

    /// Board sites of a given type.
    #[must_use]
    pub fn on(mut self, site_type: SiteType) -> Self {
        self.site_type = Some(site_type);
        self
    }
}

impl Ludeme for SitesEmpty {
    fn name(&self) -> &'static str {
        "SitesEmpty"
    }

    fn children(&self) -> Vec<&dyn Ludeme> {
        self.container.iter().map(|c| c.as_ludeme()).collect()
    }

    fn is_static(&self) -> bool {
        false
    }

    fn preprocess(&mut self, game: &Game) {
        if let Some(container) = &mut self.container {
            container.preprocess(game);
        }
    }

    fn game_flags_flat(&self, game: &Game) -> GameFlags {
        match self.container {
            Some(_) if game.containers().len() > 1 => GameFlags::HANDS,
            _ => GameFlags::EMPTY,
        }
    }

    fn concepts_flat(&self, _game: &Game) -> ConceptSet {
        ConceptSet::of(Concept::EmptyRegion)
    }

    fn check_crash(&self, game: &Game, report: &mut Report) -> bool {
        let Some(container) = &self.container else {
            return false;
        };
        if !container.is_static() {
            return false;
        }
        let index = container.eval(&mut Context::scratch(game));
        if usize::try_from(index).map_or(true, |i| i >= game.containers().len()) {
            report.add_error(self.name(), format!("container {index} does not exist"));
            return true;
        }
        false
    }
}

impl RegionFunction for SitesEmpty {
    fn eval(&self, context: &mut Context<'_>) -> Region {
        let site_type = site_type_or_default(self.site_type, context);
        let Some(container) = &self.container else {
            return context.board().empty_sites(site_type).collect();
        };

        let index = container.eval(context);
        let state = usize::try_from(index)
            .ok()
            .and_then(|i| context.state().container(i));
        match state {
            // Hands only have cell sites.
            Some(state) if index > 0 => state.empty_sites(SiteType::Cell).collect(),
            Some(state) => state.empty_sites(site_type).collect(),
            None => out_of_range("SitesEmpty", SiteType::Cell, index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BoardConfig, ContainerConfig, GameConfig, GameRng, PlayerId};
    use crate::functions::ints::IntConstant;
    use crate::game::Piece;

    fn test_game() -> Game {
        Game::from_config(
            GameConfig::new("t", 2, BoardConfig::square(2, 2))
                .with_player_pieces("Disc")
                .with_container(ContainerConfig {
                    name: "Hand1".to_string(),
                    owner: 1,
                    sites: 3,
                }),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_board_sites() {
        let game = test_game();
        let mut context = Context::new(&game, GameRng::new(1));
        context
            .state_mut()
            .board_mut()
            .push(SiteType::Cell, 1, Piece::new(1, PlayerId::new(1)));

        let empty = SitesEmpty::board();
        assert!(!empty.is_static());
        assert_eq!(empty.eval(&mut context).sites(), &[0, 2, 3]);
        assert_eq!(
            SitesEmpty::container(IntConstant::boxed(0)).eval(&mut context).sites(),
            &[0, 2, 3]
        );
    }

    #[test]
    fn test_empty_hand_sites() {
        let game = test_game();
        let mut context = Context::new(&game, GameRng::new(1));
        context
            .state_mut()
            .container_mut(1)
            .unwrap()
            .push(SiteType::Cell, 0, Piece::new(1, PlayerId::new(1)));

        let hand = SitesEmpty::container(IntConstant::boxed(1));
        assert!(!hand.is_static());
        assert_eq!(hand.eval(&mut context).sites(), &[1, 2]);
    }

    #[test]
    fn test_missing_container_will_crash() {
        let game = test_game();
        let mut report = Report::new();
        assert!(SitesEmpty::container(IntConstant::boxed(5)).will_crash(&game, &mut report));
        assert!(!SitesEmpty::board().will_crash(&game, &mut report));
        assert_eq!(report.error_count(), 1);
    }
}
