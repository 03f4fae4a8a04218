use std::collections::VecDeque;

use grid_util::point::Point;

use crate::algorithm::bidirectional::Meeting;
use crate::algorithm::frontier::SearchState;
use crate::algorithm::{SearchObserver, SearchStep, SubRange};
use crate::error::Result;
use crate::graph::Graph;
use crate::path::Path;
use crate::step_rule::DefaultStepRule;

/// Breadth-first search from both ends. Stops at the first vertex discovered by both sides.
#[derive(Clone, Debug, Default)]
pub struct BidirectionalLee {
    meeting: Meeting,
    forward_queue: VecDeque<Point>,
    backward_queue: VecDeque<Point>,
}

impl BidirectionalLee {
    pub fn new() -> BidirectionalLee {
        BidirectionalLee::default()
    }
}

/// Enqueues the unvisited neighbours of `side`'s current vertex. Returns the first of them
/// the `opposite` side has reached already.
fn expand(
    side: &mut SearchState,
    opposite: &SearchState,
    queue: &mut VecDeque<Point>,
    graph: &Graph,
    observer: &mut dyn SearchObserver,
) -> Option<Point> {
    let current = side.current;
    let neighbours = side.unvisited_neighbours(graph, &current);
    observer.vertex_processed(current, &neighbours);
    for n in neighbours {
        side.visited.insert(n);
        side.traces.insert(n, current);
        queue.push_back(n);
        if opposite.has_reached(&n) {
            return Some(n);
        }
    }
    None
}

impl SearchStep for BidirectionalLee {
    fn prepare(&mut self, _graph: &Graph, range: SubRange) {
        self.meeting.reset(range);
    }

    fn inspect(&mut self, graph: &Graph, observer: &mut dyn SearchObserver) {
        let Meeting {
            forward,
            backward,
            intersection,
        } = &mut self.meeting;
        *intersection = expand(forward, backward, &mut self.forward_queue, graph, observer);
        if intersection.is_none() {
            *intersection = expand(backward, forward, &mut self.backward_queue, graph, observer);
        }
    }

    fn move_next(&mut self, _graph: &Graph) -> Result<()> {
        if self.meeting.is_destination() {
            return Ok(());
        }
        let next = (
            self.forward_queue.pop_front(),
            self.backward_queue.pop_front(),
        );
        let (forward, backward) = match next {
            (Some(forward), Some(backward)) => (forward, backward),
            _ => return Err(self.meeting.dead_end()),
        };
        self.meeting.forward.current = forward;
        self.meeting.backward.current = backward;
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
        self.forward_queue.clear();
        self.backward_queue.clear();
    }
}
