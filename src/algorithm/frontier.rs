//! Bookkeeping shared by the strategies: the visited set and trace map of one search
//! direction, a cost-ordered frontier and a per-sub-range heuristic cache.
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use fxhash::{FxHashMap, FxHashSet};
use grid_util::point::Point;
use smallvec::SmallVec;

use crate::algorithm::SubRange;
use crate::error::{PathfindingError, Result};
use crate::graph::Graph;
use crate::heuristic::Heuristic;
use crate::path::Path;
use crate::step_rule::StepRule;
use crate::{Traces, N_SMALLVEC_SIZE};

pub(crate) type Neighbours = SmallVec<[Point; N_SMALLVEC_SIZE]>;

/// Step cost of moving from `current` onto `next`. Points outside the graph are unreachable.
pub(crate) fn step_cost<R: StepRule>(
    graph: &Graph,
    step_rule: &R,
    next: &Point,
    current: &Point,
) -> f64 {
    match (graph.get(next), graph.get(current)) {
        (Some(n), Some(c)) => step_rule.calculate_step_cost(n, c),
        _ => f64::INFINITY,
    }
}

pub(crate) fn estimate<H: Heuristic>(
    graph: &Graph,
    heuristic: &H,
    from: &Point,
    to: &Point,
) -> f64 {
    match (graph.get(from), graph.get(to)) {
        (Some(f), Some(t)) => heuristic.calculate(f, t),
        _ => f64::INFINITY,
    }
}

/// Current vertex, visited set and trace map of one search direction.
#[derive(Clone, Debug)]
pub(crate) struct SearchState {
    pub range: SubRange,
    pub current: Point,
    pub visited: FxHashSet<Point>,
    pub traces: Traces,
}

impl Default for SearchState {
    fn default() -> SearchState {
        let origin = Point::new(0, 0);
        SearchState {
            range: SubRange::new(origin, origin),
            current: origin,
            visited: FxHashSet::default(),
            traces: Traces::default(),
        }
    }
}

impl SearchState {
    /// Starts a fresh search at the source of `range`, which counts as visited.
    pub fn reset(&mut self, range: SubRange) {
        self.clear();
        self.range = range;
        self.current = range.source;
        self.visited.insert(range.source);
    }

    pub fn clear(&mut self) {
        self.visited.clear();
        self.traces.clear();
    }

    /// Free neighbours of `point` this direction has not visited yet.
    pub fn unvisited_neighbours(&self, graph: &Graph, point: &Point) -> Neighbours {
        graph
            .neighbours(point)
            .iter()
            .filter(|n| !graph.is_obstacle(n) && !self.visited.contains(*n))
            .copied()
            .collect()
    }

    pub fn visit_current(&mut self) {
        self.visited.insert(self.current);
    }

    /// Whether this direction has already been at `point`, including a current vertex that
    /// has not been marked visited yet.
    pub fn has_reached(&self, point: &Point) -> bool {
        self.current == *point || self.visited.contains(point)
    }

    pub fn is_destination(&self) -> bool {
        self.current == self.range.target
    }

    pub fn dead_end(&self) -> PathfindingError {
        PathfindingError::DeadEnd {
            start: self.range.source,
            goal: self.range.target,
        }
    }

    /// Fails with a dead end if the trace map does not lead back from the target.
    pub fn sub_path<R: StepRule>(&self, graph: &Graph, step_rule: &R) -> Result<Path> {
        let SubRange { source, target } = self.range;
        Path::from_traces(graph, step_rule, &self.traces, source, target)
            .ok_or_else(|| self.dead_end())
    }
}

/// Heap entry ordered by priority, smallest first.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CostHolder {
    pub priority: f64,
    pub cost: f64,
    pub point: Point,
}

impl Eq for CostHolder {}

impl PartialEq for CostHolder {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd for CostHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CostHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        // First orders per priority, then prefers the entry with the larger accumulated cost,
        // which is the one closer to the goal when priorities tie.
        match other.priority.total_cmp(&self.priority) {
            Ordering::Equal => self.cost.total_cmp(&other.cost),
            s => s,
        }
    }
}

/// Priority queue plus accumulated-cost map used by the Dijkstra family. Improved vertices are
/// pushed again; outdated entries are skipped once their vertex is visited.
#[derive(Clone, Debug, Default)]
pub(crate) struct CostFrontier {
    heap: BinaryHeap<CostHolder>,
    costs: FxHashMap<Point, f64>,
}

impl CostFrontier {
    pub fn reset(&mut self, source: Point) {
        self.clear();
        self.costs.insert(source, 0.0);
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.costs.clear();
    }

    /// Accumulated cost of `point`, infinite if it was never reached.
    pub fn cost(&self, point: &Point) -> f64 {
        self.costs.get(point).copied().unwrap_or(f64::INFINITY)
    }

    /// Records `cost` for `point` if it beats the known cost. Returns whether it did.
    pub fn relax(&mut self, point: Point, cost: f64, priority: f64) -> bool {
        if cost < self.cost(&point) {
            self.costs.insert(point, cost);
            self.heap.push(CostHolder {
                priority,
                cost,
                point,
            });
            true
        } else {
            false
        }
    }

    /// Smallest entry whose vertex is not visited, discarding outdated entries on the way.
    pub fn peek_unvisited(&mut self, visited: &FxHashSet<Point>) -> Option<&CostHolder> {
        while self.heap.peek().is_some_and(|top| visited.contains(&top.point)) {
            self.heap.pop();
        }
        self.heap.peek()
    }

    pub fn pop_unvisited(&mut self, visited: &FxHashSet<Point>) -> Option<Point> {
        self.peek_unvisited(visited)?;
        self.heap.pop().map(|holder| holder.point)
    }
}

/// Heuristic values of the current sub-range, keyed by vertex.
#[derive(Clone, Debug, Default)]
pub(crate) struct HeuristicCache {
    values: FxHashMap<Point, f64>,
}

impl HeuristicCache {
    pub fn get<H: Heuristic>(
        &mut self,
        graph: &Graph,
        heuristic: &H,
        point: &Point,
        target: &Point,
    ) -> f64 {
        *self
            .values
            .entry(*point)
            .or_insert_with(|| estimate(graph, heuristic, point, target))
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heap_pops_smallest_priority_first() {
        let mut heap = BinaryHeap::new();
        for (priority, cost, x) in [(3.0, 0.0, 0), (1.0, 0.0, 1), (2.0, 0.0, 2), (1.0, 5.0, 3)] {
            heap.push(CostHolder {
                priority,
                cost,
                point: Point::new(x, 0),
            });
        }
        let order = std::iter::from_fn(|| heap.pop().map(|h| h.point.x)).collect::<Vec<_>>();
        assert_eq!(order, vec![3, 1, 2, 0]);
    }

    #[test]
    fn frontier_skips_visited_entries() {
        let mut frontier = CostFrontier::default();
        let a = Point::new(1, 0);
        let b = Point::new(2, 0);
        frontier.reset(Point::new(0, 0));
        assert!(frontier.relax(a, 4.0, 4.0));
        assert!(frontier.relax(b, 3.0, 3.0));
        assert!(frontier.relax(a, 2.0, 2.0));
        assert!(!frontier.relax(a, 2.5, 2.5));
        let mut visited = FxHashSet::default();
        assert_eq!(frontier.pop_unvisited(&visited), Some(a));
        visited.insert(a);
        assert_eq!(frontier.pop_unvisited(&visited), Some(b));
        visited.insert(b);
        assert_eq!(frontier.pop_unvisited(&visited), None);
        assert_eq!(frontier.cost(&a), 2.0);
    }

    #[test]
    fn unvisited_neighbours_skip_obstacles() {
        let mut graph = Graph::new(3, 3);
        graph.set_obstacle(&Point::new(1, 0), true);
        let mut state = SearchState::default();
        state.reset(SubRange::new(Point::new(1, 1), Point::new(2, 2)));
        state.visited.insert(Point::new(0, 1));
        let neighbours = state.unvisited_neighbours(&graph, &Point::new(1, 1));
        assert_eq!(neighbours.as_slice(), &[Point::new(2, 1), Point::new(1, 2)]);
    }
}
