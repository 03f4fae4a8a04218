use crate::algorithm::frontier::{step_cost, CostFrontier, HeuristicCache, SearchState};
use crate::algorithm::{SearchObserver, SearchStep, SubRange};
use crate::error::Result;
use crate::graph::Graph;
use crate::heuristic::Heuristic;
use crate::path::Path;
use crate::step_rule::StepRule;

/// A*: Dijkstra's algorithm with the frontier ordered by accumulated cost plus the heuristic
/// estimate to the sub-target. The cost map keeps the pure accumulated cost. Optimal when the
/// heuristic is admissible and consistent.
#[derive(Clone, Debug)]
pub struct AStar<R, H> {
    step_rule: R,
    heuristic: H,
    state: SearchState,
    frontier: CostFrontier,
    heuristics: HeuristicCache,
}

impl<R: StepRule, H: Heuristic> AStar<R, H> {
    pub fn new(step_rule: R, heuristic: H) -> AStar<R, H> {
        AStar {
            step_rule,
            heuristic,
            state: SearchState::default(),
            frontier: CostFrontier::default(),
            heuristics: HeuristicCache::default(),
        }
    }
}

impl<R: StepRule, H: Heuristic> SearchStep for AStar<R, H> {
    fn prepare(&mut self, _graph: &Graph, range: SubRange) {
        self.state.reset(range);
        self.frontier.reset(range.source);
    }

    fn inspect(&mut self, graph: &Graph, observer: &mut dyn SearchObserver) {
        let current = self.state.current;
        let target = self.state.range.target;
        let neighbours = self.state.unvisited_neighbours(graph, &current);
        observer.vertex_processed(current, &neighbours);
        let current_cost = self.frontier.cost(&current);
        for n in neighbours {
            let relaxed = current_cost + step_cost(graph, &self.step_rule, &n, &current);
            let estimate = self.heuristics.get(graph, &self.heuristic, &n, &target);
            if self.frontier.relax(n, relaxed, relaxed + estimate) {
                self.state.traces.insert(n, current);
            }
        }
    }

    fn move_next(&mut self, _graph: &Graph) -> Result<()> {
        self.state.current = self
            .frontier
            .pop_unvisited(&self.state.visited)
            .ok_or_else(|| self.state.dead_end())?;
        Ok(())
    }

    fn visit(&mut self, _graph: &Graph) {
        self.state.visit_current();
    }

    fn is_destination(&self) -> bool {
        self.state.is_destination()
    }

    fn sub_path(&self, graph: &Graph) -> Result<Path> {
        self.state.sub_path(graph, &self.step_rule)
    }

    fn drop_state(&mut self) {
        self.state.clear();
        self.frontier.clear();
        self.heuristics.clear();
    }
}
