//! Breadth-first wave propagation ([Lee]) and its heuristic-ordered variant ([AStarLee]).
use std::collections::{BinaryHeap, VecDeque};

use crate::algorithm::frontier::{CostHolder, HeuristicCache, SearchState};
use crate::algorithm::{SearchObserver, SearchStep, SubRange};
use crate::error::Result;
use crate::graph::Graph;
use crate::heuristic::Heuristic;
use crate::path::Path;
use crate::step_rule::DefaultStepRule;

/// Lee's algorithm: plain breadth-first search. Finds the path with the fewest steps.
#[derive(Clone, Debug, Default)]
pub struct Lee {
    state: SearchState,
    queue: VecDeque<grid_util::point::Point>,
}

impl Lee {
    pub fn new() -> Lee {
        Lee::default()
    }
}

impl SearchStep for Lee {
    fn prepare(&mut self, _graph: &Graph, range: SubRange) {
        self.state.reset(range);
    }

    fn inspect(&mut self, graph: &Graph, observer: &mut dyn SearchObserver) {
        let current = self.state.current;
        let neighbours = self.state.unvisited_neighbours(graph, &current);
        observer.vertex_processed(current, &neighbours);
        for n in neighbours {
            self.state.visited.insert(n);
            self.state.traces.insert(n, current);
            self.queue.push_back(n);
        }
    }

    fn move_next(&mut self, _graph: &Graph) -> Result<()> {
        self.state.current = self.queue.pop_front().ok_or_else(|| self.state.dead_end())?;
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
        self.queue.clear();
    }
}

/// Breadth-first propagation whose queue is ordered by the estimated distance to the
/// sub-target instead of insertion order. Not optimal, but usually reaches the target with
/// far fewer expansions than [Lee].
#[derive(Clone, Debug)]
pub struct AStarLee<H> {
    heuristic: H,
    state: SearchState,
    queue: BinaryHeap<CostHolder>,
    heuristics: HeuristicCache,
}

impl<H: Heuristic> AStarLee<H> {
    pub fn new(heuristic: H) -> AStarLee<H> {
        AStarLee {
            heuristic,
            state: SearchState::default(),
            queue: BinaryHeap::new(),
            heuristics: HeuristicCache::default(),
        }
    }
}

impl<H: Heuristic> SearchStep for AStarLee<H> {
    fn prepare(&mut self, _graph: &Graph, range: SubRange) {
        self.state.reset(range);
    }

    fn inspect(&mut self, graph: &Graph, observer: &mut dyn SearchObserver) {
        let current = self.state.current;
        let target = self.state.range.target;
        let neighbours = self.state.unvisited_neighbours(graph, &current);
        observer.vertex_processed(current, &neighbours);
        for n in neighbours {
            self.state.visited.insert(n);
            self.state.traces.insert(n, current);
            let priority = self.heuristics.get(graph, &self.heuristic, &n, &target);
            self.queue.push(CostHolder {
                priority,
                cost: 0.0,
                point: n,
            });
        }
    }

    fn move_next(&mut self, _graph: &Graph) -> Result<()> {
        let next = self.queue.pop().ok_or_else(|| self.state.dead_end())?;
        self.state.current = next.point;
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
        self.queue.clear();
        self.heuristics.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::tests::Recorder;
    use crate::algorithm::Pathfinder;
    use crate::heuristic::ManhattanDistance;
    use fxhash::FxHashSet;
    use grid_util::point::Point;

    /// Asserts that the shortest 4 step solution is found around a central obstacle.
    #[test]
    fn solve_simple_problem() {
        // |S  |
        // | # |
        // |  E|
        let mut graph = Graph::new(3, 3);
        graph.set_obstacle(&Point::new(1, 1), true);
        let range = vec![Point::new(0, 0), Point::new(2, 2)];
        let mut pathfinder = Pathfinder::new(range, Lee::new());
        let path = pathfinder.find_path(&graph).unwrap();
        assert_eq!(path.count(), 4);
        assert_eq!(path.cost(), 4.0);
    }

    #[test]
    fn fewest_steps_ignores_costs() {
        let mut graph = Graph::new(3, 2);
        graph.set_cost(&Point::new(1, 0), 9);
        let range = vec![Point::new(0, 0), Point::new(2, 0)];
        let mut pathfinder = Pathfinder::new(range, Lee::new());
        let path = pathfinder.find_path(&graph).unwrap();
        assert_eq!(path.count(), 2);
        assert_eq!(path.cost(), 10.0);
    }

    #[test]
    fn every_vertex_expanded_once() {
        let graph = Graph::new(6, 6);
        let range = vec![Point::new(0, 0), Point::new(5, 5)];
        for mut pathfinder in [
            Pathfinder::new(range.clone(), Box::new(Lee::new()) as Box<dyn SearchStep>),
            Pathfinder::new(
                range.clone(),
                Box::new(AStarLee::new(ManhattanDistance)) as Box<dyn SearchStep>,
            ),
        ] {
            let mut recorder = Recorder::default();
            pathfinder.find_path_observed(&graph, &mut recorder).unwrap();
            let unique = recorder.processed.iter().map(|(p, _)| *p).collect::<FxHashSet<_>>();
            assert_eq!(unique.len(), recorder.processed.len());
        }
    }

    #[test]
    fn heuristic_order_expands_less() {
        let graph = Graph::new(10, 10);
        let range = vec![Point::new(0, 0), Point::new(9, 0)];
        let mut lee_recorder = Recorder::default();
        let mut astar_lee_recorder = Recorder::default();
        Pathfinder::new(range.clone(), Lee::new())
            .find_path_observed(&graph, &mut lee_recorder)
            .unwrap();
        let path = Pathfinder::new(range, AStarLee::new(ManhattanDistance))
            .find_path_observed(&graph, &mut astar_lee_recorder)
            .unwrap();
        assert_eq!(path.count(), 9);
        assert!(astar_lee_recorder.processed.len() < lee_recorder.processed.len());
    }
}
