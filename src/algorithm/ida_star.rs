//! Iterative deepening A*: repeated depth-first searches bounded by the estimated total cost
//! `f = g + h`. Each exhausted iteration raises the bound to the smallest `f` it had to prune
//! and restarts from the sub-source.
use fxhash::FxHashMap;
use grid_util::point::Point;
use log::debug;

use crate::algorithm::frontier::{step_cost, HeuristicCache, Neighbours, SearchState};
use crate::algorithm::{SearchObserver, SearchStep, SubRange};
use crate::error::Result;
use crate::graph::Graph;
use crate::heuristic::Heuristic;
use crate::path::Path;
use crate::step_rule::StepRule;

/// Slack allowed when comparing `f` against the bound, so float noise from different
/// summation orders does not prune the vertex that set the bound.
const BOUND_TOLERANCE: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Exploring,
    /// The stack ran dry under the current bound; the next visit starts a new iteration.
    Rebounding,
}

#[derive(Clone, Debug)]
pub struct IdaStar<R, H> {
    step_rule: R,
    heuristic: H,
    state: SearchState,
    phase: Phase,
    bound: f64,
    next_bound: f64,
    costs: FxHashMap<Point, f64>,
    stack: Vec<Point>,
    /// Unvisited neighbours of the current vertex within the bound, with their `g` and `f`.
    candidates: Vec<(Point, f64, f64)>,
    heuristics: HeuristicCache,
}

impl<R: StepRule, H: Heuristic> IdaStar<R, H> {
    pub fn new(step_rule: R, heuristic: H) -> IdaStar<R, H> {
        IdaStar {
            step_rule,
            heuristic,
            state: SearchState::default(),
            phase: Phase::Exploring,
            bound: 0.0,
            next_bound: f64::INFINITY,
            costs: FxHashMap::default(),
            stack: Vec::new(),
            candidates: Vec::new(),
            heuristics: HeuristicCache::default(),
        }
    }

    /// The `f` bound of the running iteration.
    pub fn bound(&self) -> f64 {
        self.bound
    }

    fn restart(&mut self) {
        let range = self.state.range;
        self.state.reset(range);
        self.costs.clear();
        self.costs.insert(range.source, 0.0);
        self.stack.clear();
        self.candidates.clear();
    }

    fn rebound(&mut self) -> Result<()> {
        if self.next_bound.is_infinite() {
            return Err(self.state.dead_end());
        }
        debug!("Raising bound from {} to {}", self.bound, self.next_bound);
        self.bound = self.next_bound;
        self.next_bound = f64::INFINITY;
        self.phase = Phase::Rebounding;
        self.state.current = self.state.range.source;
        Ok(())
    }
}

impl<R: StepRule, H: Heuristic> SearchStep for IdaStar<R, H> {
    fn prepare(&mut self, graph: &Graph, range: SubRange) {
        self.state.range = range;
        self.restart();
        self.phase = Phase::Exploring;
        self.bound = self
            .heuristics
            .get(graph, &self.heuristic, &range.source, &range.target);
        self.next_bound = f64::INFINITY;
    }

    fn inspect(&mut self, graph: &Graph, observer: &mut dyn SearchObserver) {
        let current = self.state.current;
        let target = self.state.range.target;
        let neighbours: Neighbours = self.state.unvisited_neighbours(graph, &current);
        observer.vertex_processed(current, &neighbours);
        let current_cost = self.costs.get(&current).copied().unwrap_or(f64::INFINITY);
        self.candidates.clear();
        for n in neighbours {
            let g = current_cost + step_cost(graph, &self.step_rule, &n, &current);
            let f = g + self.heuristics.get(graph, &self.heuristic, &n, &target);
            if f <= self.bound + BOUND_TOLERANCE {
                self.candidates.push((n, g, f));
            } else {
                self.next_bound = self.next_bound.min(f);
            }
        }
    }

    fn move_next(&mut self, _graph: &Graph) -> Result<()> {
        let current = self.state.current;
        let best = self
            .candidates
            .iter()
            .copied()
            .min_by(|(_, _, a), (_, _, b)| a.total_cmp(b));
        match best {
            Some((next, g, _)) => {
                self.stack.push(current);
                self.costs.insert(next, g);
                self.state.traces.insert(next, current);
                self.state.current = next;
            }
            None => match self.stack.pop() {
                Some(parent) => self.state.current = parent,
                None => self.rebound()?,
            },
        }
        Ok(())
    }

    fn visit(&mut self, _graph: &Graph) {
        if self.phase == Phase::Rebounding {
            self.restart();
            self.phase = Phase::Exploring;
        } else {
            self.state.visit_current();
        }
    }

    fn is_destination(&self) -> bool {
        self.state.is_destination()
    }

    fn sub_path(&self, graph: &Graph) -> Result<Path> {
        self.state.sub_path(graph, &self.step_rule)
    }

    fn drop_state(&mut self) {
        self.state.clear();
        self.costs.clear();
        self.stack.clear();
        self.candidates.clear();
        self.heuristics.clear();
        self.phase = Phase::Exploring;
    }
}
