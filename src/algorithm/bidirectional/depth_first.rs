use grid_util::point::Point;

use crate::algorithm::bidirectional::Meeting;
use crate::algorithm::depth_first::{FirstNeighbour, NeighbourSelector, RandomNeighbour};
use crate::algorithm::frontier::{Neighbours, SearchState};
use crate::algorithm::{SearchObserver, SearchStep, SubRange};
use crate::error::Result;
use crate::graph::Graph;
use crate::path::Path;
use crate::step_rule::DefaultStepRule;

enum Advance {
    Moved(Point),
    Backtracked,
    Exhausted,
}

/// The stack and selector of one search direction.
#[derive(Clone, Debug)]
struct Side<S> {
    selector: S,
    stack: Vec<Point>,
    candidates: Neighbours,
}

impl<S: NeighbourSelector> Side<S> {
    fn new(selector: S) -> Side<S> {
        Side {
            selector,
            stack: Vec::new(),
            candidates: Neighbours::new(),
        }
    }

    fn inspect(&mut self, state: &SearchState, graph: &Graph, observer: &mut dyn SearchObserver) {
        self.candidates = state.unvisited_neighbours(graph, &state.current);
        observer.vertex_processed(state.current, &self.candidates);
    }

    fn advance(&mut self, state: &mut SearchState, graph: &Graph) -> Advance {
        let current = state.current;
        match self
            .selector
            .select(graph, &state.range, current, &self.candidates)
        {
            Some(next) => {
                self.stack.push(current);
                state.traces.insert(next, current);
                state.current = next;
                Advance::Moved(next)
            }
            None => match self.stack.pop() {
                Some(parent) => {
                    state.current = parent;
                    Advance::Backtracked
                }
                None => Advance::Exhausted,
            },
        }
    }

    fn clear(&mut self) {
        self.stack.clear();
        self.candidates.clear();
    }
}

/// Depth-first search from both ends. The backward side runs a clone of the forward
/// selector on the reversed sub-range. Stops as soon as one side moves onto a vertex the
/// other has reached.
#[derive(Clone, Debug)]
pub struct BidirectionalDepthFirst<S> {
    meeting: Meeting,
    forward: Side<S>,
    backward: Side<S>,
}

pub type BidirectionalRandom = BidirectionalDepthFirst<RandomNeighbour>;

impl<S: NeighbourSelector + Clone> BidirectionalDepthFirst<S> {
    pub fn new(selector: S) -> BidirectionalDepthFirst<S> {
        BidirectionalDepthFirst {
            meeting: Meeting::default(),
            forward: Side::new(selector.clone()),
            backward: Side::new(selector),
        }
    }
}

impl BidirectionalDepthFirst<FirstNeighbour> {
    pub fn first() -> BidirectionalDepthFirst<FirstNeighbour> {
        BidirectionalDepthFirst::new(FirstNeighbour)
    }
}

impl BidirectionalDepthFirst<RandomNeighbour> {
    pub fn random() -> BidirectionalRandom {
        BidirectionalDepthFirst::new(RandomNeighbour::new())
    }
}

impl<S: NeighbourSelector> SearchStep for BidirectionalDepthFirst<S> {
    fn prepare(&mut self, graph: &Graph, range: SubRange) {
        self.meeting.reset(range);
        self.forward.selector.prepare(graph, range);
        self.backward.selector.prepare(graph, range.reversed());
    }

    fn inspect(&mut self, graph: &Graph, observer: &mut dyn SearchObserver) {
        self.forward.inspect(&self.meeting.forward, graph, observer);
        self.backward.inspect(&self.meeting.backward, graph, observer);
    }

    fn move_next(&mut self, graph: &Graph) -> Result<()> {
        if self.meeting.is_destination() {
            return Ok(());
        }
        match self.forward.advance(&mut self.meeting.forward, graph) {
            Advance::Exhausted => return Err(self.meeting.dead_end()),
            Advance::Moved(next) if self.meeting.backward.has_reached(&next) => {
                self.meeting.intersection = Some(next);
                return Ok(());
            }
            Advance::Moved(_) | Advance::Backtracked => {}
        }
        match self.backward.advance(&mut self.meeting.backward, graph) {
            Advance::Exhausted => return Err(self.meeting.dead_end()),
            Advance::Moved(next) if self.meeting.forward.has_reached(&next) => {
                self.meeting.intersection = Some(next);
            }
            Advance::Moved(_) | Advance::Backtracked => {}
        }
        Ok(())
    }

    fn visit(&mut self, _graph: &Graph) {
        self.meeting.visit_current();
    }

    fn is_destination(&self) -> bool {
        self.meeting.is_destination()
    }

    fn sub_path(&self, graph: &Graph) -> Result<Path> {
        self.meeting.sub_path(graph, &DefaultStepRule)
    }

    fn drop_state(&mut self) {
        self.meeting.clear();
        self.forward.clear();
        self.backward.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::depth_first::DistanceFirst;
    use crate::algorithm::Pathfinder;
    use crate::heuristic::ManhattanDistance;
    use fxhash::FxHashSet;

    #[test]
    fn sides_meet_in_a_corridor() {
        let graph = Graph::new(7, 1);
        let range = vec![Point::new(0, 0), Point::new(6, 0)];
        let path = Pathfinder::new(range, BidirectionalDepthFirst::first())
            .find_path(&graph)
            .unwrap();
        // Both sides step onto the middle vertex in the same round.
        assert_eq!(path.intersection(), Some(Point::new(3, 0)));
        assert_eq!(path.count(), 6);
    }

    #[test]
    fn selectors_aim_at_their_own_target() {
        let graph = Graph::new(6, 6);
        let range = vec![Point::new(0, 0), Point::new(5, 5)];
        let path = Pathfinder::new(
            range,
            BidirectionalDepthFirst::new(DistanceFirst::new(ManhattanDistance)),
        )
        .find_path(&graph)
        .unwrap();
        assert_eq!(path.count(), 10);
    }

    #[test]
    fn random_runs_are_reproducible() {
        let graph = Graph::new(9, 9);
        let range = vec![Point::new(0, 0), Point::new(8, 8)];
        let first = Pathfinder::new(range.clone(), BidirectionalDepthFirst::random())
            .find_path(&graph)
            .unwrap();
        let second = Pathfinder::new(range, BidirectionalDepthFirst::random())
            .find_path(&graph)
            .unwrap();
        assert_eq!(first, second);
    }

    /// Runs the search to its meeting and asserts neither side moves onto a vertex twice.
    fn assert_entered_once<S: NeighbourSelector + Clone>(
        mut search: BidirectionalDepthFirst<S>,
        graph: &Graph,
    ) {
        let range = SubRange::new(Point::new(0, 0), Point::new(6, 6));
        search.prepare(graph, range);
        let mut forward_entered = FxHashSet::from_iter([range.source]);
        let mut backward_entered = FxHashSet::from_iter([range.target]);
        while !search.is_destination() {
            let depths = (search.forward.stack.len(), search.backward.stack.len());
            search.inspect(graph, &mut ());
            search.move_next(graph).unwrap();
            search.visit(graph);
            if search.forward.stack.len() > depths.0 {
                let current = search.meeting.forward.current;
                assert!(forward_entered.insert(current), "{current} entered twice");
            }
            if search.backward.stack.len() > depths.1 {
                let current = search.meeting.backward.current;
                assert!(backward_entered.insert(current), "{current} entered twice");
            }
        }
        assert!(search.sub_path(graph).is_ok());
    }

    #[test]
    fn each_side_enters_a_vertex_once() {
        //  _______
        // |S   #  |
        // | ## #  |
        // |  # ## |
        // |  #    |
        // |  #### |
        // |       |
        // |      E|
        //  _______
        let mut graph = Graph::new(7, 7);
        for (x, y) in [
            (4, 0),
            (1, 1),
            (2, 1),
            (4, 1),
            (2, 2),
            (4, 2),
            (5, 2),
            (2, 3),
            (2, 4),
            (3, 4),
            (4, 4),
            (5, 4),
        ] {
            graph.set_obstacle(&Point::new(x, y), true);
        }
        assert_entered_once(BidirectionalDepthFirst::first(), &graph);
        assert_entered_once(BidirectionalDepthFirst::random(), &graph);
        assert_entered_once(
            BidirectionalDepthFirst::new(DistanceFirst::new(ManhattanDistance)),
            &graph,
        );
    }
}
