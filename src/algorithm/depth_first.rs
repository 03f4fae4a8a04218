//! Depth-first search with pluggable neighbour selection. The plain, random and greedy
//! variants differ only in the [NeighbourSelector] choosing where to go next.
use grid_util::point::Point;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::algorithm::frontier::{estimate, step_cost, Neighbours, SearchState};
use crate::algorithm::{SearchObserver, SearchStep, SubRange};
use crate::error::Result;
use crate::graph::Graph;
use crate::heuristic::Heuristic;
use crate::path::Path;
use crate::step_rule::{DefaultStepRule, StepRule};

/// Picks the neighbour a depth-first search moves to.
pub trait NeighbourSelector {
    /// Called at the start of every sub-range.
    fn prepare(&mut self, _graph: &Graph, _range: SubRange) {}

    /// Chooses among the free, unvisited `neighbours` of `current`. Returns [None] only for
    /// an empty slice.
    fn select(
        &mut self,
        graph: &Graph,
        range: &SubRange,
        current: Point,
        neighbours: &[Point],
    ) -> Option<Point>;
}

/// The neighbour with the smallest score; the first one wins ties.
fn least_greedy<F>(neighbours: &[Point], mut greed: F) -> Option<Point>
where
    F: FnMut(&Point) -> f64,
{
    neighbours
        .iter()
        .map(|n| (*n, greed(n)))
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(n, _)| n)
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FirstNeighbour;

impl NeighbourSelector for FirstNeighbour {
    fn select(&mut self, _: &Graph, _: &SubRange, _: Point, neighbours: &[Point]) -> Option<Point> {
        neighbours.first().copied()
    }
}

/// Uniformly random choice. Unless a seed is given, the generator is seeded from the graph
/// size and total cost at the start of every sub-range so runs are reproducible.
#[derive(Clone, Debug)]
pub struct RandomNeighbour {
    seed: Option<u64>,
    rng: StdRng,
}

impl RandomNeighbour {
    pub fn new() -> RandomNeighbour {
        RandomNeighbour {
            seed: None,
            rng: StdRng::seed_from_u64(0),
        }
    }
    pub fn with_seed(seed: u64) -> RandomNeighbour {
        RandomNeighbour {
            seed: Some(seed),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomNeighbour {
    fn default() -> RandomNeighbour {
        RandomNeighbour::new()
    }
}

impl NeighbourSelector for RandomNeighbour {
    fn prepare(&mut self, graph: &Graph, _range: SubRange) {
        let seed = self
            .seed
            .unwrap_or_else(|| (graph.len() as u64).wrapping_add(graph.total_cost() as u64));
        self.rng = StdRng::seed_from_u64(seed);
    }

    fn select(&mut self, _: &Graph, _: &SubRange, _: Point, neighbours: &[Point]) -> Option<Point> {
        neighbours.choose(&mut self.rng).copied()
    }
}

/// Heads for the neighbour closest to the sub-target.
#[derive(Clone, Copy, Debug, Default)]
pub struct DistanceFirst<H> {
    heuristic: H,
}

impl<H: Heuristic> DistanceFirst<H> {
    pub fn new(heuristic: H) -> DistanceFirst<H> {
        DistanceFirst { heuristic }
    }
}

impl<H: Heuristic> NeighbourSelector for DistanceFirst<H> {
    fn select(
        &mut self,
        graph: &Graph,
        range: &SubRange,
        _: Point,
        neighbours: &[Point],
    ) -> Option<Point> {
        least_greedy(neighbours, |n| estimate(graph, &self.heuristic, n, &range.target))
    }
}

/// Scores a neighbour by its estimated distance to the sub-target plus the step onto it.
#[derive(Clone, Copy, Debug, Default)]
pub struct AStarGreedy<R, H> {
    step_rule: R,
    heuristic: H,
}

impl<R: StepRule, H: Heuristic> AStarGreedy<R, H> {
    pub fn new(step_rule: R, heuristic: H) -> AStarGreedy<R, H> {
        AStarGreedy { step_rule, heuristic }
    }
}

impl<R: StepRule, H: Heuristic> NeighbourSelector for AStarGreedy<R, H> {
    fn select(
        &mut self,
        graph: &Graph,
        range: &SubRange,
        current: Point,
        neighbours: &[Point],
    ) -> Option<Point> {
        least_greedy(neighbours, |n| {
            estimate(graph, &self.heuristic, n, &range.target)
                + step_cost(graph, &self.step_rule, n, &current)
        })
    }
}

/// Takes the cheapest step, ignoring where the sub-target is.
#[derive(Clone, Copy, Debug, Default)]
pub struct CostGreedy<R> {
    step_rule: R,
}

impl<R: StepRule> CostGreedy<R> {
    pub fn new(step_rule: R) -> CostGreedy<R> {
        CostGreedy { step_rule }
    }
}

impl<R: StepRule> NeighbourSelector for CostGreedy<R> {
    fn select(
        &mut self,
        graph: &Graph,
        _: &SubRange,
        current: Point,
        neighbours: &[Point],
    ) -> Option<Point> {
        least_greedy(neighbours, |n| step_cost(graph, &self.step_rule, n, &current))
    }
}

/// Prefers the neighbour closest to the sub-source, so the search coils around its origin
/// before it drifts outwards.
#[derive(Clone, Copy, Debug, Default)]
pub struct Snake<H> {
    heuristic: H,
}

impl<H: Heuristic> Snake<H> {
    pub fn new(heuristic: H) -> Snake<H> {
        Snake { heuristic }
    }
}

impl<H: Heuristic> NeighbourSelector for Snake<H> {
    fn select(
        &mut self,
        graph: &Graph,
        range: &SubRange,
        _: Point,
        neighbours: &[Point],
    ) -> Option<Point> {
        least_greedy(neighbours, |n| estimate(graph, &self.heuristic, n, &range.source))
    }
}

/// Depth-first search: moves to a selected unvisited neighbour, backtracking along its stack
/// when the current vertex has none left.
#[derive(Clone, Debug)]
pub struct DepthFirst<S> {
    selector: S,
    state: SearchState,
    stack: Vec<Point>,
    candidates: Neighbours,
}

pub type DepthFirstSearch = DepthFirst<FirstNeighbour>;
pub type RandomSearch = DepthFirst<RandomNeighbour>;

impl<S: NeighbourSelector> DepthFirst<S> {
    pub fn new(selector: S) -> DepthFirst<S> {
        DepthFirst {
            selector,
            state: SearchState::default(),
            stack: Vec::new(),
            candidates: Neighbours::new(),
        }
    }
}

impl DepthFirst<FirstNeighbour> {
    pub fn first() -> DepthFirstSearch {
        DepthFirst::new(FirstNeighbour)
    }
}

impl DepthFirst<RandomNeighbour> {
    pub fn random() -> RandomSearch {
        DepthFirst::new(RandomNeighbour::new())
    }
}

impl<S: NeighbourSelector> SearchStep for DepthFirst<S> {
    fn prepare(&mut self, graph: &Graph, range: SubRange) {
        self.state.reset(range);
        self.selector.prepare(graph, range);
    }

    fn inspect(&mut self, graph: &Graph, observer: &mut dyn SearchObserver) {
        let current = self.state.current;
        self.candidates = self.state.unvisited_neighbours(graph, &current);
        observer.vertex_processed(current, &self.candidates);
    }

    fn move_next(&mut self, graph: &Graph) -> Result<()> {
        let current = self.state.current;
        match self
            .selector
            .select(graph, &self.state.range, current, &self.candidates)
        {
            Some(next) => {
                self.stack.push(current);
                self.state.traces.insert(next, current);
                self.state.current = next;
            }
            None => {
                self.state.current = self.stack.pop().ok_or_else(|| self.state.dead_end())?;
            }
        }
        Ok(())
    }

    fn visit(&mut self, _graph: &Graph) {
        self.state.visit_current();
    }

    fn is_destination(&self) -> bool {
        self.state.is_destination()
    }

    fn sub_path(&self, graph: &Graph) -> Result<Path> {
        self.state.sub_path(graph, &DefaultStepRule)
    }

    fn drop_state(&mut self) {
        self.state.clear();
        self.stack.clear();
        self.candidates.clear();
    }
}
