use crate::algorithm::frontier::{step_cost, CostFrontier, SearchState};
use crate::algorithm::{SearchObserver, SearchStep, SubRange};
use crate::error::Result;
use crate::graph::Graph;
use crate::path::Path;
use crate::step_rule::StepRule;

/// Dijkstra's algorithm: expands vertices in order of accumulated cost. Finds a minimum-cost
/// path for non-negative step costs.
#[derive(Clone, Debug)]
pub struct Dijkstra<R> {
    step_rule: R,
    state: SearchState,
    frontier: CostFrontier,
}

impl<R: StepRule> Dijkstra<R> {
    pub fn new(step_rule: R) -> Dijkstra<R> {
        Dijkstra {
            step_rule,
            state: SearchState::default(),
            frontier: CostFrontier::default(),
        }
    }
}

impl<R: StepRule> SearchStep for Dijkstra<R> {
    fn prepare(&mut self, _graph: &Graph, range: SubRange) {
        self.state.reset(range);
        self.frontier.reset(range.source);
    }

    fn inspect(&mut self, graph: &Graph, observer: &mut dyn SearchObserver) {
        let current = self.state.current;
        let neighbours = self.state.unvisited_neighbours(graph, &current);
        observer.vertex_processed(current, &neighbours);
        let current_cost = self.frontier.cost(&current);
        for n in neighbours {
            let relaxed = current_cost + step_cost(graph, &self.step_rule, &n, &current);
            if self.frontier.relax(n, relaxed, relaxed) {
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
    }
}
