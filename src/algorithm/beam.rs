use grid_util::point::Point;

use crate::algorithm::frontier::{HeuristicCache, SearchState};
use crate::algorithm::{SearchObserver, SearchStep, SubRange};
use crate::error::{PathfindingError, Result};
use crate::graph::Graph;
use crate::heuristic::Heuristic;
use crate::path::Path;
use crate::step_rule::DefaultStepRule;
use crate::DEFAULT_BEAM_WIDTH;

/// Beam search: a best-first search whose frontier keeps only the `width` entries closest to
/// the sub-target. Vertices pushed out of the beam lose their trace, so a narrow beam may
/// dead-end on graphs where a path exists.
#[derive(Clone, Debug)]
pub struct BeamSearch<H> {
    heuristic: H,
    width: usize,
    state: SearchState,
    beam: Vec<(Point, f64)>,
    heuristics: HeuristicCache,
}

impl<H: Heuristic> BeamSearch<H> {
    pub fn new(heuristic: H, width: usize) -> Result<BeamSearch<H>> {
        if width == 0 {
            return Err(PathfindingError::InvalidBeamWidth(width));
        }
        Ok(BeamSearch::with_width(heuristic, width))
    }

    pub fn with_default_width(heuristic: H) -> BeamSearch<H> {
        BeamSearch::with_width(heuristic, DEFAULT_BEAM_WIDTH)
    }

    fn with_width(heuristic: H, width: usize) -> BeamSearch<H> {
        BeamSearch {
            heuristic,
            width,
            state: SearchState::default(),
            beam: Vec::new(),
            heuristics: HeuristicCache::default(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of vertices currently waiting in the beam.
    pub fn frontier_len(&self) -> usize {
        self.beam.len()
    }

    fn relax(&mut self, vertex: Point, priority: f64) {
        if self
            .beam
            .iter()
            .any(|(p, known)| *p == vertex && *known <= priority)
        {
            return;
        }
        self.beam.retain(|(p, _)| *p != vertex);
        self.beam.push((vertex, priority));
        self.state.traces.insert(vertex, self.state.current);
        self.beam.sort_by(|(_, a), (_, b)| a.total_cmp(b));
        if self.beam.len() > self.width {
            for (trimmed, _) in self.beam.drain(self.width..) {
                self.state.traces.swap_remove(&trimmed);
            }
        }
    }
}

impl<H: Heuristic> SearchStep for BeamSearch<H> {
    fn prepare(&mut self, _graph: &Graph, range: SubRange) {
        self.state.reset(range);
    }

    fn inspect(&mut self, graph: &Graph, observer: &mut dyn SearchObserver) {
        let current = self.state.current;
        let target = self.state.range.target;
        let neighbours = self.state.unvisited_neighbours(graph, &current);
        observer.vertex_processed(current, &neighbours);
        for n in neighbours {
            let priority = self.heuristics.get(graph, &self.heuristic, &n, &target);
            self.relax(n, priority);
        }
    }

    fn move_next(&mut self, _graph: &Graph) -> Result<()> {
        if self.beam.is_empty() {
            return Err(self.state.dead_end());
        }
        self.state.current = self.beam.remove(0).0;
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
        self.beam.clear();
        self.heuristics.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::tests::Recorder;
    use crate::algorithm::Pathfinder;
    use crate::heuristic::{EuclideanDistance, ManhattanDistance};
    use fxhash::FxHashSet;

    #[test]
    fn zero_width_is_rejected() {
        assert_eq!(
            BeamSearch::new(ManhattanDistance, 0).unwrap_err(),
            PathfindingError::InvalidBeamWidth(0)
        );
        assert_eq!(BeamSearch::with_default_width(ManhattanDistance).width(), 10);
    }

    #[test]
    fn beam_never_exceeds_width() {
        let graph = Graph::new_with_neighbourhood(12, 12, true);
        let range = SubRange::new(Point::new(0, 0), Point::new(11, 7));
        for width in [1, 2, 3, 5] {
            let mut beam = BeamSearch::new(EuclideanDistance, width).unwrap();
            beam.prepare(&graph, range);
            while !beam.is_destination() {
                beam.inspect(&graph, &mut ());
                assert!(beam.frontier_len() <= width);
                beam.move_next(&graph).unwrap();
                beam.visit(&graph);
            }
            let path = beam.sub_path(&graph).unwrap();
            assert_eq!(path.source(), Some(range.source));
            assert_eq!(path.target(), Some(range.target));
            beam.drop_state();
            assert_eq!(beam.frontier_len(), 0);
        }
    }

    #[test]
    fn every_vertex_expanded_once() {
        let mut graph = Graph::new(10, 10);
        for y in 0..8 {
            graph.set_obstacle(&Point::new(5, y), true);
        }
        let range = vec![Point::new(0, 0), Point::new(9, 0)];
        for width in [1, 3, 10] {
            let mut recorder = Recorder::default();
            let beam = BeamSearch::new(ManhattanDistance, width).unwrap();
            let _ = Pathfinder::new(range.clone(), beam).find_path_observed(&graph, &mut recorder);
            let expanded = recorder.processed.iter().map(|(p, _)| *p);
            assert_eq!(
                expanded.collect::<FxHashSet<_>>().len(),
                recorder.processed.len()
            );
        }
    }

    #[test]
    fn trimmed_vertices_lose_their_trace() {
        let graph = Graph::new(3, 3);
        let mut beam = BeamSearch::new(ManhattanDistance, 1).unwrap();
        beam.prepare(&graph, SubRange::new(Point::new(1, 1), Point::new(2, 1)));
        beam.inspect(&graph, &mut ());
        assert_eq!(beam.frontier_len(), 1);
        assert_eq!(beam.beam[0].0, Point::new(2, 1));
        assert_eq!(beam.state.traces.len(), 1);
        assert!(beam.state.traces.contains_key(&Point::new(2, 1)));
    }

    #[test]
    fn narrow_beam_can_dead_end() {
        //  ___
        // |S #|
        // | # |
        // |  E|
        //  ___
        // With width one the beam keeps (1, 0), which ties with (0, 1) but was found first,
        // and the pocket behind it has no way out.
        let mut graph = Graph::new(3, 3);
        graph.set_obstacle(&Point::new(2, 0), true);
        graph.set_obstacle(&Point::new(1, 1), true);
        graph.update();
        let range = vec![Point::new(0, 0), Point::new(2, 2)];
        assert!(graph.reachable(&range[0], &range[1]));
        let narrow = BeamSearch::new(ManhattanDistance, 1).unwrap();
        let narrow = Pathfinder::new(range.clone(), narrow).find_path(&graph);
        assert!(narrow.unwrap_err().is_dead_end());
        let wide = Pathfinder::new(range, BeamSearch::with_default_width(ManhattanDistance))
            .find_path(&graph)
            .unwrap();
        assert_eq!(wide.count(), 4);
    }
}
