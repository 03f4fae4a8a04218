//! Bidirectional Dijkstra and A*. Both sides keep a cost frontier; every relaxation of a
//! vertex the opposite side has a cost for proposes a meeting. The search stops once the two
//! frontier tops together cannot beat the best proposal.
//!
//! A* orders both frontiers with the averaged potential `p(v) = (h(v, t) - h(v, s)) / 2`,
//! added on the forward side and subtracted on the backward side. This keeps the reduced step
//! costs of the two sides equal, so the Dijkstra stopping rule carries over unchanged.
use grid_util::point::Point;

use crate::algorithm::bidirectional::Meeting;
use crate::algorithm::frontier::{step_cost, CostFrontier, HeuristicCache};
use crate::algorithm::{SearchObserver, SearchStep, SubRange};
use crate::error::Result;
use crate::graph::{Graph, Vertex};
use crate::heuristic::Heuristic;
use crate::path::Path;
use crate::step_rule::StepRule;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

#[derive(Clone, Debug)]
pub struct BidirectionalAStar<R, H> {
    step_rule: R,
    heuristic: H,
    meeting: Meeting,
    forward_frontier: CostFrontier,
    backward_frontier: CostFrontier,
    to_target: HeuristicCache,
    to_source: HeuristicCache,
    /// Best meeting vertex so far and the cost of the path through it.
    best: Option<(Point, f64)>,
}

impl<R: StepRule, H: Heuristic> BidirectionalAStar<R, H> {
    pub fn new(step_rule: R, heuristic: H) -> BidirectionalAStar<R, H> {
        BidirectionalAStar {
            step_rule,
            heuristic,
            meeting: Meeting::default(),
            forward_frontier: CostFrontier::default(),
            backward_frontier: CostFrontier::default(),
            to_target: HeuristicCache::default(),
            to_source: HeuristicCache::default(),
            best: None,
        }
    }

    fn expand(&mut self, graph: &Graph, observer: &mut dyn SearchObserver, direction: Direction) {
        let range = self.meeting.range();
        let (side, frontier, opposite) = match direction {
            Direction::Forward => (
                &mut self.meeting.forward,
                &mut self.forward_frontier,
                &self.backward_frontier,
            ),
            Direction::Backward => (
                &mut self.meeting.backward,
                &mut self.backward_frontier,
                &self.forward_frontier,
            ),
        };
        let current = side.current;
        let neighbours = side.unvisited_neighbours(graph, &current);
        observer.vertex_processed(current, &neighbours);
        let current_cost = frontier.cost(&current);
        for n in neighbours {
            // The backward side walks moves in reverse: the real step goes from n onto current.
            let (step, potential_sign) = match direction {
                Direction::Forward => (step_cost(graph, &self.step_rule, &n, &current), 1.0),
                Direction::Backward => (step_cost(graph, &self.step_rule, &current, &n), -1.0),
            };
            let relaxed = current_cost + step;
            let potential = (self.to_target.get(graph, &self.heuristic, &n, &range.target)
                - self.to_source.get(graph, &self.heuristic, &n, &range.source))
                / 2.0;
            if frontier.relax(n, relaxed, relaxed + potential_sign * potential) {
                side.traces.insert(n, current);
                // Only a vertex both sides have reached can join the two halves.
                let opposite_cost = opposite.cost(&n);
                if !opposite_cost.is_finite() {
                    continue;
                }
                let through = relaxed + opposite_cost;
                if self.best.map_or(true, |(_, best)| through < best) {
                    self.best = Some((n, through));
                }
            }
        }
    }
}

impl<R: StepRule, H: Heuristic> SearchStep for BidirectionalAStar<R, H> {
    fn prepare(&mut self, _graph: &Graph, range: SubRange) {
        self.meeting.reset(range);
        self.forward_frontier.reset(range.source);
        self.backward_frontier.reset(range.target);
        self.best = None;
    }

    fn inspect(&mut self, graph: &Graph, observer: &mut dyn SearchObserver) {
        self.expand(graph, observer, Direction::Forward);
        self.expand(graph, observer, Direction::Backward);
    }

    fn move_next(&mut self, _graph: &Graph) -> Result<()> {
        if self.meeting.is_destination() {
            return Ok(());
        }
        let forward_top = self
            .forward_frontier
            .peek_unvisited(&self.meeting.forward.visited)
            .map(|top| top.priority);
        let backward_top = self
            .backward_frontier
            .peek_unvisited(&self.meeting.backward.visited)
            .map(|top| top.priority);
        let settled = match (forward_top, backward_top) {
            (Some(forward), Some(backward)) => self
                .best
                .is_some_and(|(_, best)| forward + backward >= best),
            _ => true,
        };
        if settled {
            let (intersection, _) = self.best.ok_or_else(|| self.meeting.dead_end())?;
            self.meeting.intersection = Some(intersection);
            return Ok(());
        }
        let forward = self.forward_frontier.pop_unvisited(&self.meeting.forward.visited);
        let backward = self.backward_frontier.pop_unvisited(&self.meeting.backward.visited);
        match (forward, backward) {
            (Some(forward), Some(backward)) => {
                self.meeting.forward.current = forward;
                self.meeting.backward.current = backward;
                Ok(())
            }
            _ => Err(self.meeting.dead_end()),
        }
    }

    fn visit(&mut self, _graph: &Graph) {
        self.meeting.visit_current();
    }

    fn is_destination(&self) -> bool {
        self.meeting.is_destination()
    }

    fn sub_path(&self, graph: &Graph) -> Result<Path> {
        self.meeting.sub_path(graph, &self.step_rule)
    }

    fn drop_state(&mut self) {
        self.meeting.clear();
        self.forward_frontier.clear();
        self.backward_frontier.clear();
        self.to_target.clear();
        self.to_source.clear();
        self.best = None;
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct NoEstimate;

impl Heuristic for NoEstimate {
    fn calculate(&self, _vertex: &Vertex, _target: &Vertex) -> f64 {
        0.0
    }
}

/// Bidirectional Dijkstra: [BidirectionalAStar] without a heuristic.
#[derive(Clone, Debug)]
pub struct BidirectionalDijkstra<R>(BidirectionalAStar<R, NoEstimate>);

impl<R: StepRule> BidirectionalDijkstra<R> {
    pub fn new(step_rule: R) -> BidirectionalDijkstra<R> {
        BidirectionalDijkstra(BidirectionalAStar::new(step_rule, NoEstimate))
    }
}

impl<R: StepRule> SearchStep for BidirectionalDijkstra<R> {
    fn prepare(&mut self, graph: &Graph, range: SubRange) {
        self.0.prepare(graph, range)
    }
    fn inspect(&mut self, graph: &Graph, observer: &mut dyn SearchObserver) {
        self.0.inspect(graph, observer)
    }
    fn move_next(&mut self, graph: &Graph) -> Result<()> {
        self.0.move_next(graph)
    }
    fn visit(&mut self, graph: &Graph) {
        self.0.visit(graph)
    }
    fn is_destination(&self) -> bool {
        self.0.is_destination()
    }
    fn sub_path(&self, graph: &Graph) -> Result<Path> {
        self.0.sub_path(graph)
    }
    fn drop_state(&mut self) {
        self.0.drop_state()
    }
}
