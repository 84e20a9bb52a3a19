//! The immutable game descriptor.
//!
//! A `Game` bundles the topology, containers, components and optional
//! equipment (dice, tracks, hints) of one game. It is built once from a
//! `GameConfig`, validated, and then only read: node validators consult it
//! at compile time, evaluation consults it through `Context`.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::board::{SiteType, Topology};
use crate::core::{
    ComponentKind, DiceConfig, EngineOptions, GameConfig, GameError, GameResult, PlayerId,
};

use super::component::{Component, Track};
use super::state::GameState;

/// A container: the board (index 0) or a hand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Container {
    pub index: usize,
    pub name: String,
    pub owner: PlayerId,
    /// Number of cell sites (the board also has vertices and edges).
    pub sites: usize,
}

/// Immutable game descriptor.
#[derive(Clone, Debug)]
pub struct Game {
    name: String,
    players: usize,
    topology: Topology,
    containers: Vec<Container>,
    components: Vec<Component>,
    dice: Option<DiceConfig>,
    tracks: Vec<Track>,
    hints: FxHashMap<(SiteType, usize), i32>,
    stacking: bool,
    options: EngineOptions,
}

impl Game {
    /// Validate a configuration and build the game.
    pub fn from_config(config: GameConfig) -> GameResult<Self> {
        if config.players == 0 || config.players > 255 {
            return Err(GameError::PlayerCount(config.players));
        }

        let topology = Topology::from_config(&config.board)?;

        let mut containers = Vec::with_capacity(config.containers.len() + 1);
        containers.push(Container {
            index: 0,
            name: "Board".to_string(),
            owner: PlayerId::NEUTRAL,
            sites: topology.num_sites(SiteType::Cell),
        });
        for (i, container) in config.containers.into_iter().enumerate() {
            containers.push(Container {
                index: i + 1,
                name: container.name,
                owner: PlayerId::new(container.owner),
                sites: container.sites,
            });
        }

        let mut components = Vec::with_capacity(config.components.len());
        for (i, component) in config.components.into_iter().enumerate() {
            if usize::from(component.owner) > config.players {
                return Err(GameError::ComponentOwner {
                    name: component.name,
                    owner: component.owner,
                    players: config.players,
                });
            }
            if let ComponentKind::Tile { sides, paths } = &component.kind {
                if let Some(bad) = paths
                    .iter()
                    .flat_map(|p| [p.side1, p.side2])
                    .find(|&side| side >= sides.len())
                {
                    return Err(GameError::TileSide {
                        name: component.name,
                        side: bad,
                        sides: sides.len(),
                    });
                }
            }
            components.push(Component {
                index: i + 1,
                name: component.name,
                owner: PlayerId::new(component.owner),
                kind: component.kind,
            });
        }

        let mut tracks = Vec::with_capacity(config.tracks.len());
        for (i, track) in config.tracks.into_iter().enumerate() {
            let limit = topology.num_sites(track.site_type);
            if let Some(&site) = track.sites.iter().find(|&&s| s >= limit) {
                return Err(GameError::TrackSiteOutOfRange {
                    track: track.name,
                    site_type: track.site_type,
                    site,
                });
            }
            tracks.push(Track {
                index: i,
                name: track.name,
                owner: PlayerId::new(track.owner),
                site_type: track.site_type,
                sites: track.sites,
            });
        }

        let mut hints = FxHashMap::default();
        for hint in config.hints {
            if hint.site >= topology.num_sites(hint.site_type) {
                return Err(GameError::HintSiteOutOfRange {
                    site_type: hint.site_type,
                    site: hint.site,
                });
            }
            hints.insert((hint.site_type, hint.site), hint.value);
        }

        debug!(
            game = %config.name,
            players = config.players,
            cells = topology.num_sites(SiteType::Cell),
            vertices = topology.num_sites(SiteType::Vertex),
            edges = topology.num_sites(SiteType::Edge),
            components = components.len(),
            "game built"
        );

        Ok(Self {
            name: config.name,
            players: config.players,
            topology,
            containers,
            components,
            dice: config.dice,
            tracks,
            hints,
            stacking: config.stacking,
            options: config.options,
        })
    }

    /// Game name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of players.
    #[must_use]
    pub fn players(&self) -> usize {
        self.players
    }

    /// Board topology.
    #[must_use]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Site type used when a rule does not name one.
    #[must_use]
    pub fn default_site_type(&self) -> SiteType {
        self.topology.default_site_type()
    }

    /// All containers; index 0 is the board.
    #[must_use]
    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    /// All components; `components()[i]` has index `i + 1`.
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Look up a component by its 1-based index.
    #[must_use]
    pub fn component(&self, what: usize) -> Option<&Component> {
        what.checked_sub(1).and_then(|i| self.components.get(i))
    }

    /// Dice equipment.
    #[must_use]
    pub fn dice(&self) -> Option<DiceConfig> {
        self.dice
    }

    /// Check whether the game uses dice.
    #[must_use]
    pub fn has_dice(&self) -> bool {
        self.dice.is_some_and(|d| d.count > 0)
    }

    /// All tracks.
    #[must_use]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Look up a hint.
    #[must_use]
    pub fn hint(&self, site_type: SiteType, site: usize) -> Option<i32> {
        self.hints.get(&(site_type, site)).copied()
    }

    /// Check whether the game has hints.
    #[must_use]
    pub fn has_hints(&self) -> bool {
        !self.hints.is_empty()
    }

    /// Check whether pieces may stack.
    #[must_use]
    pub fn is_stacking(&self) -> bool {
        self.stacking
    }

    /// Check whether any component is a tile.
    #[must_use]
    pub fn uses_tiles(&self) -> bool {
        self.components.iter().any(Component::is_tile)
    }

    /// Check whether any component is a domino.
    #[must_use]
    pub fn uses_dominoes(&self) -> bool {
        self.components.iter().any(Component::is_domino)
    }

    /// Evaluation switches.
    #[must_use]
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Build the initial state of a play-through.
    #[must_use]
    pub fn initial_state(&self) -> GameState {
        GameState::new(self)
    }
}
