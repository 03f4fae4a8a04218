use core::fmt;
use std::ops::RangeInclusive;

use grid_util::point::Point;
use log::debug;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::{DEFAULT_COST_RANGE, N_SMALLVEC_SIZE};

/// Offsets of the 4-neighbourhood, followed by the diagonal offsets used when
/// diagonal moves are allowed.
const CARDINAL_OFFSETS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];
const DIAGONAL_OFFSETS: [(i32, i32); 4] = [(1, -1), (1, 1), (-1, 1), (-1, -1)];

/// The cost of entering a vertex together with the range it may take.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VertexCost {
    current: i32,
    range: RangeInclusive<i32>,
}

impl VertexCost {
    /// Creates a cost, clamping `current` into `range`.
    pub fn new(current: i32, range: RangeInclusive<i32>) -> VertexCost {
        let current = current.clamp(*range.start(), *range.end());
        VertexCost { current, range }
    }
    pub fn current(&self) -> i32 {
        self.current
    }
    pub fn range(&self) -> &RangeInclusive<i32> {
        &self.range
    }
    /// Updates the current value, clamped into the range.
    pub fn set(&mut self, value: i32) {
        self.current = value.clamp(*self.range.start(), *self.range.end());
    }
}

impl Default for VertexCost {
    fn default() -> VertexCost {
        VertexCost::new(*DEFAULT_COST_RANGE.start(), DEFAULT_COST_RANGE)
    }
}

/// A single cell of the [Graph]. Neighbours are coordinate keys into the graph rather than
/// references, so the graph owns every vertex exactly once.
#[derive(Clone, Debug)]
pub struct Vertex {
    position: Point,
    obstacle: bool,
    cost: VertexCost,
    neighbours: SmallVec<[Point; N_SMALLVEC_SIZE]>,
}

impl Vertex {
    pub fn position(&self) -> Point {
        self.position
    }
    pub fn is_obstacle(&self) -> bool {
        self.obstacle
    }
    pub fn cost(&self) -> &VertexCost {
        &self.cost
    }
    /// In-bounds neighbour coordinates, obstacles included.
    pub fn neighbours(&self) -> &[Point] {
        &self.neighbours
    }
}

/// [Graph] is an arena of [Vertex] values addressed by their [Point]. Like a pathing grid it
/// maintains connected components in a [UnionFind] so reachability can be checked without a
/// search. Searches only ever borrow it immutably.
#[derive(Clone, Debug)]
pub struct Graph {
    width: usize,
    height: usize,
    allow_diagonal_move: bool,
    vertices: Vec<Vertex>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Default for Graph {
    fn default() -> Graph {
        Graph::new(0, 0)
    }
}

impl Graph {
    /// Creates an obstacle-free graph with unit costs and a 4-neighbourhood.
    pub fn new(width: usize, height: usize) -> Graph {
        Graph::new_with_neighbourhood(width, height, false)
    }

    /// Creates an obstacle-free graph with unit costs; `allow_diagonal_move` selects the
    /// 8-neighbourhood instead of the 4-neighbourhood.
    pub fn new_with_neighbourhood(width: usize, height: usize, allow_diagonal_move: bool) -> Graph {
        let mut vertices = Vec::with_capacity(width * height);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                vertices.push(Vertex {
                    position: Point::new(x, y),
                    obstacle: false,
                    cost: VertexCost::default(),
                    neighbours: SmallVec::new(),
                });
            }
        }
        let mut graph = Graph {
            width,
            height,
            allow_diagonal_move,
            vertices,
            components: UnionFind::new(width * height),
            components_dirty: false,
        };
        graph.link_neighbours();
        graph.generate_components();
        graph
    }

    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn len(&self) -> usize {
        self.vertices.len()
    }
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
    pub fn allow_diagonal_move(&self) -> bool {
        self.allow_diagonal_move
    }

    /// Switches between the 4- and 8-neighbourhood, relinking every vertex.
    pub fn set_allow_diagonal_move(&mut self, allow_diagonal_move: bool) {
        if self.allow_diagonal_move != allow_diagonal_move {
            self.allow_diagonal_move = allow_diagonal_move;
            self.link_neighbours();
            self.generate_components();
        }
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    fn get_ix_point(&self, point: &Point) -> Option<usize> {
        if self.in_bounds(point.x, point.y) {
            Some(point.y as usize * self.width + point.x as usize)
        } else {
            None
        }
    }

    fn neighbourhood_points(&self, point: &Point) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
        let diagonal: &[(i32, i32)] = if self.allow_diagonal_move {
            &DIAGONAL_OFFSETS
        } else {
            &[]
        };
        CARDINAL_OFFSETS
            .iter()
            .chain(diagonal)
            .map(|(dx, dy)| Point::new(point.x + dx, point.y + dy))
            .filter(|p| self.in_bounds(p.x, p.y))
            .collect()
    }

    fn link_neighbours(&mut self) {
        for ix in 0..self.vertices.len() {
            let position = self.vertices[ix].position;
            self.vertices[ix].neighbours = self.neighbourhood_points(&position);
        }
    }

    pub fn contains(&self, point: &Point) -> bool {
        self.get_ix_point(point).is_some()
    }

    pub fn get(&self, point: &Point) -> Option<&Vertex> {
        self.get_ix_point(point).map(|ix| &self.vertices[ix])
    }

    /// Out-of-bounds points count as obstacles.
    pub fn is_obstacle(&self, point: &Point) -> bool {
        self.get(point).map_or(true, Vertex::is_obstacle)
    }

    pub fn neighbours(&self, point: &Point) -> &[Point] {
        self.get(point).map(Vertex::neighbours).unwrap_or(&[])
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }

    /// Sum of the current cost of every vertex.
    pub fn total_cost(&self) -> i64 {
        self.vertices.iter().map(|v| v.cost.current() as i64).sum()
    }

    /// Sets the cost of a vertex, clamped into its range. Out-of-bounds points are ignored.
    pub fn set_cost(&mut self, point: &Point, cost: i32) {
        if let Some(ix) = self.get_ix_point(point) {
            self.vertices[ix].cost.set(cost);
        }
    }

    /// Marks a vertex as blocked or free. Joins newly connected components and flags the
    /// components as dirty if they are (potentially) broken apart.
    pub fn set_obstacle(&mut self, point: &Point, obstacle: bool) {
        let Some(ix) = self.get_ix_point(point) else {
            return;
        };
        let was_obstacle = self.vertices[ix].obstacle;
        self.vertices[ix].obstacle = obstacle;
        match (was_obstacle, obstacle) {
            (false, true) => self.components_dirty = true,
            (_, false) => {
                for n in self.vertices[ix].neighbours.clone() {
                    if let Some(n_ix) = self.get_ix_point(&n) {
                        if !self.vertices[n_ix].obstacle {
                            self.components.union(ix, n_ix);
                        }
                    }
                }
            }
            (true, true) => {}
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up free neighbours to the same components.
    pub fn generate_components(&mut self) {
        debug!("Generating components for {}x{} graph", self.width, self.height);
        self.components = UnionFind::new(self.vertices.len());
        self.components_dirty = false;
        for (ix, vertex) in self.vertices.iter().enumerate() {
            if vertex.obstacle {
                continue;
            }
            for n in &vertex.neighbours {
                if let Some(n_ix) = self.get_ix_point(n) {
                    if !self.vertices[n_ix].obstacle {
                        self.components.union(ix, n_ix);
                    }
                }
            }
        }
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> Option<usize> {
        self.get_ix_point(point).map(|ix| self.components.find(ix))
    }

    /// Checks if start and goal are free and on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        match (self.get_ix_point(start), self.get_ix_point(goal)) {
            (Some(start_ix), Some(goal_ix)) => {
                !self.vertices[start_ix].obstacle
                    && !self.vertices[goal_ix].obstacle
                    && self.components.equiv(start_ix, goal_ix)
            }
            _ => false,
        }
    }

    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        !self.reachable(start, goal)
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.vertices.chunks(self.width.max(1)) {
            let line = row
                .iter()
                .map(|v| match (v.obstacle, v.cost.current()) {
                    (true, _) => '#',
                    (false, c @ 0..=9) => char::from(b'0' + c as u8),
                    (false, _) => '+',
                })
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
