//! Board topology: cells, vertices and edges with their adjacency.
//!
//! A `Topology` is built once from a `BoardConfig` and is read-only
//! afterwards. Every element keeps its neighbour steps in a fixed
//! insertion order (clockwise from north on grids, declaration order on
//! graphs); searches that must be reproducible iterate in that order.
//!
//! ## Square grids
//!
//! Row 0 is the bottom row and north increases the row. Cell `(r, c)` has
//! index `r * cols + c`; vertex `(r, c)` has index `r * (cols + 1) + c`.
//! Horizontal edges are numbered first, row by row, then vertical edges.

use rustc_hash::FxHashMap;

use crate::core::{BoardConfig, GameError, GameResult};

use super::direction::{Direction, DirectionSet, SiteType};

/// One neighbour step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub direction: Direction,
    pub to: usize,
}

/// Orientation of an edge element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum EdgeAxis {
    Horizontal,
    Vertical,
    /// Graph edges with no geometry.
    Other,
}

/// A cell, vertex or edge of the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub index: usize,
    pub row: usize,
    pub col: usize,
    /// On the boundary of the board.
    pub outer: bool,
    steps: Vec<Step>,
    /// Corner vertices (cells) or endpoints (edges).
    vertices: Vec<usize>,
    /// Side edges, north first and clockwise (cells) or incident edges (vertices).
    edges: Vec<usize>,
}

impl Element {
    fn new(index: usize, row: usize, col: usize, outer: bool) -> Self {
        Self {
            index,
            row,
            col,
            outer,
            steps: Vec::new(),
            vertices: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Neighbour steps in insertion order.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Corner vertices of a cell, endpoints of an edge.
    #[must_use]
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    /// Side edges of a cell, incident edges of a vertex.
    #[must_use]
    pub fn edges(&self) -> &[usize] {
        &self.edges
    }
}

/// Board topology.
#[derive(Clone, Debug)]
pub struct Topology {
    elements: [Vec<Element>; 3],
    edge_axes: Vec<EdgeAxis>,
    edge_lookup: FxHashMap<(usize, usize), usize>,
    default_site_type: SiteType,
}

impl Topology {
    /// Build a topology from a board description.
    pub fn from_config(config: &BoardConfig) -> GameResult<Self> {
        match config {
            BoardConfig::Square { rows, cols } => Self::square(*rows, *cols),
            BoardConfig::Graph {
                vertices,
                edges,
                outer,
            } => Self::graph(*vertices, edges, outer),
        }
    }

    /// Build a square grid of `rows` x `cols` cells.
    pub fn square(rows: usize, cols: usize) -> GameResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::EmptyBoard);
        }

        let cell_id = |r: usize, c: usize| r * cols + c;
        let vertex_id = |r: usize, c: usize| r * (cols + 1) + c;
        let horizontal_count = (rows + 1) * cols;
        let h_edge = |r: usize, c: usize| r * cols + c;
        let v_edge = |r: usize, c: usize| horizontal_count + r * (cols + 1) + c;

        // Cells
        let mut cells = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                let outer = r == 0 || c == 0 || r + 1 == rows || c + 1 == cols;
                let mut cell = Element::new(cell_id(r, c), r, c, outer);
                for direction in Direction::COMPASS {
                    if let Some((nr, nc)) = offset_within(r, c, direction, rows, cols) {
                        cell.steps.push(Step {
                            direction,
                            to: cell_id(nr, nc),
                        });
                    }
                }
                cell.vertices = vec![
                    vertex_id(r, c),
                    vertex_id(r, c + 1),
                    vertex_id(r + 1, c + 1),
                    vertex_id(r + 1, c),
                ];
                cell.edges = vec![h_edge(r + 1, c), v_edge(r, c + 1), h_edge(r, c), v_edge(r, c)];
                cells.push(cell);
            }
        }

        // Vertices
        let mut vertices = Vec::with_capacity((rows + 1) * (cols + 1));
        for r in 0..=rows {
            for c in 0..=cols {
                let outer = r == 0 || c == 0 || r == rows || c == cols;
                let mut vertex = Element::new(vertex_id(r, c), r, c, outer);
                for direction in Direction::COMPASS {
                    if let Some((nr, nc)) = offset_within(r, c, direction, rows + 1, cols + 1) {
                        vertex.steps.push(Step {
                            direction,
                            to: vertex_id(nr, nc),
                        });
                    }
                }
                vertices.push(vertex);
            }
        }

        // Edges
        let mut edges = Vec::with_capacity(horizontal_count + rows * (cols + 1));
        let mut edge_axes = Vec::with_capacity(edges.capacity());
        for r in 0..=rows {
            for c in 0..cols {
                let mut edge = Element::new(h_edge(r, c), r, c, r == 0 || r == rows);
                edge.vertices = vec![vertex_id(r, c), vertex_id(r, c + 1)];
                edges.push(edge);
                edge_axes.push(EdgeAxis::Horizontal);
            }
        }
        for r in 0..rows {
            for c in 0..=cols {
                let mut edge = Element::new(v_edge(r, c), r, c, c == 0 || c == cols);
                edge.vertices = vec![vertex_id(r, c), vertex_id(r + 1, c)];
                edges.push(edge);
                edge_axes.push(EdgeAxis::Vertical);
            }
        }

        Ok(Self::finish(cells, vertices, edges, edge_axes, SiteType::Cell))
    }

    /// Build a graph board: vertices joined by explicit edges.
    pub fn graph(vertex_count: usize, edge_list: &[(usize, usize)], outer: &[usize]) -> GameResult<Self> {
        if vertex_count == 0 {
            return Err(GameError::EmptyBoard);
        }

        let mut vertices: Vec<Element> = (0..vertex_count)
            .map(|v| Element::new(v, 0, v, outer.is_empty() || outer.contains(&v)))
            .collect();
        let mut edges = Vec::with_capacity(edge_list.len());
        let mut seen = FxHashMap::default();

        for (index, &(a, b)) in edge_list.iter().enumerate() {
            if a >= vertex_count || b >= vertex_count {
                return Err(GameError::EdgeOutOfRange(a, b));
            }
            if a == b {
                return Err(GameError::SelfLoop(a));
            }
            if seen.insert(ordered(a, b), index).is_some() {
                return Err(GameError::DuplicateEdge(a, b));
            }
            vertices[a].steps.push(Step {
                direction: Direction::Adjacent,
                to: b,
            });
            vertices[b].steps.push(Step {
                direction: Direction::Adjacent,
                to: a,
            });
            let mut edge = Element::new(index, 0, index, vertices[a].outer && vertices[b].outer);
            edge.vertices = vec![a, b];
            edges.push(edge);
        }

        let edge_axes = vec![EdgeAxis::Other; edges.len()];
        Ok(Self::finish(Vec::new(), vertices, edges, edge_axes, SiteType::Vertex))
    }

    /// Wire vertex/edge incidence, edge adjacency and the endpoint lookup.
    fn finish(
        cells: Vec<Element>,
        mut vertices: Vec<Element>,
        mut edges: Vec<Element>,
        edge_axes: Vec<EdgeAxis>,
        default_site_type: SiteType,
    ) -> Self {
        let mut edge_lookup = FxHashMap::default();
        for edge in &edges {
            let (a, b) = (edge.vertices[0], edge.vertices[1]);
            edge_lookup.insert(ordered(a, b), edge.index);
            vertices[a].edges.push(edge.index);
            vertices[b].edges.push(edge.index);
        }

        // Edges sharing an endpoint are adjacent.
        let incident: Vec<Vec<usize>> = vertices.iter().map(|v| v.edges.clone()).collect();
        for edge in &mut edges {
            let index = edge.index;
            for &vertex in &edge.vertices {
                for &other in &incident[vertex] {
                    if other != index && !edge.steps.iter().any(|s| s.to == other) {
                        edge.steps.push(Step {
                            direction: Direction::Adjacent,
                            to: other,
                        });
                    }
                }
            }
        }

        Self {
            elements: [cells, vertices, edges],
            edge_axes,
            edge_lookup,
            default_site_type,
        }
    }

    /// The site type rules refer to when they do not name one.
    #[must_use]
    pub fn default_site_type(&self) -> SiteType {
        self.default_site_type
    }

    /// All elements of a site type.
    #[must_use]
    pub fn elements(&self, site_type: SiteType) -> &[Element] {
        &self.elements[site_type.slot()]
    }

    /// Get one element, if the index is in range.
    #[must_use]
    pub fn element(&self, site_type: SiteType, site: usize) -> Option<&Element> {
        self.elements(site_type).get(site)
    }

    /// Number of sites of a type.
    #[must_use]
    pub fn num_sites(&self, site_type: SiteType) -> usize {
        self.elements(site_type).len()
    }

    /// Check whether a signed site index is on the board.
    #[must_use]
    pub fn contains(&self, site_type: SiteType, site: i32) -> bool {
        usize::try_from(site).is_ok_and(|s| s < self.num_sites(site_type))
    }

    /// Is this site on the boundary?
    #[must_use]
    pub fn is_outer(&self, site_type: SiteType, site: usize) -> bool {
        self.element(site_type, site).is_some_and(|e| e.outer)
    }

    /// Neighbours of a site reachable in `directions`, in insertion order.
    pub fn neighbours(
        &self,
        site_type: SiteType,
        site: usize,
        directions: DirectionSet,
    ) -> impl Iterator<Item = usize> + '_ {
        self.element(site_type, site)
            .map(|e| e.steps.as_slice())
            .unwrap_or_default()
            .iter()
            .filter(move |step| directions.contains(step.direction))
            .map(|step| step.to)
    }

    /// The neighbour in one direction, if any.
    #[must_use]
    pub fn step(&self, site_type: SiteType, site: usize, direction: Direction) -> Option<usize> {
        self.element(site_type, site)?
            .steps
            .iter()
            .find(|s| s.direction == direction)
            .map(|s| s.to)
    }

    /// Index of the edge joining two vertices, in either order.
    #[must_use]
    pub fn edge_between(&self, v1: usize, v2: usize) -> Option<usize> {
        self.edge_lookup.get(&ordered(v1, v2)).copied()
    }

    /// Orientation of an edge.
    #[must_use]
    pub fn edge_axis(&self, edge: usize) -> Option<EdgeAxis> {
        self.edge_axes.get(edge).copied()
    }

    /// Number of rows for a site type.
    #[must_use]
    pub fn row_count(&self, site_type: SiteType) -> usize {
        self.elements(site_type)
            .iter()
            .map(|e| e.row + 1)
            .max()
            .unwrap_or(0)
    }

    /// Sites of a type lying in `row`, in index order.
    pub fn sites_in_row(&self, site_type: SiteType, row: usize) -> impl Iterator<Item = usize> + '_ {
        self.elements(site_type)
            .iter()
            .filter(move |e| e.row == row)
            .map(|e| e.index)
    }
}

fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn offset_within(r: usize, c: usize, direction: Direction, rows: usize, cols: usize) -> Option<(usize, usize)> {
    let (dr, dc) = direction.offset();
    let nr = r.checked_add_signed(dr)?;
    let nc = c.checked_add_signed(dc)?;
    (nr < rows && nc < cols).then_some((nr, nc))
}
