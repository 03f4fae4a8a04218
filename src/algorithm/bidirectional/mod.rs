//! Strategies that search from both ends of a sub-range at once. Every step expands one
//! vertex on the forward side (from the sub-source) and one on the backward side (from the
//! sub-target); the sub-path is joined where the two sides meet.
//!
//! The wave strategies ([BidirectionalDijkstra], [BidirectionalAStar]) keep expanding until
//! the best meeting point found so far is provably optimal. The others stop at the first
//! vertex both sides have reached. If either side runs out of vertices before a meeting, the
//! sub-range is a dead end.
use grid_util::point::Point;

use crate::algorithm::frontier::SearchState;
use crate::algorithm::SubRange;
use crate::error::{PathfindingError, Result};
use crate::graph::Graph;
use crate::path::Path;
use crate::step_rule::StepRule;

pub mod depth_first;
pub mod lee;
pub mod wave;

pub use depth_first::{BidirectionalDepthFirst, BidirectionalRandom};
pub use lee::BidirectionalLee;
pub use wave::{BidirectionalAStar, BidirectionalDijkstra};

/// Forward and backward search state plus the vertex they met at, once known.
#[derive(Clone, Debug, Default)]
pub(crate) struct Meeting {
    pub forward: SearchState,
    /// Searches the reversed sub-range; its traces point towards the sub-target.
    pub backward: SearchState,
    pub intersection: Option<Point>,
}

impl Meeting {
    pub fn reset(&mut self, range: SubRange) {
        self.forward.reset(range);
        self.backward.reset(range.reversed());
        self.intersection = (range.source == range.target).then_some(range.source);
    }

    pub fn clear(&mut self) {
        self.forward.clear();
        self.backward.clear();
        self.intersection = None;
    }

    pub fn range(&self) -> SubRange {
        self.forward.range
    }

    pub fn visit_current(&mut self) {
        self.forward.visit_current();
        self.backward.visit_current();
    }

    pub fn is_destination(&self) -> bool {
        self.intersection.is_some()
    }

    /// Dead end reported for the sub-range as the caller asked for it, whichever side ran dry.
    pub fn dead_end(&self) -> PathfindingError {
        self.forward.dead_end()
    }

    /// Joins both walks at the intersection. A search that never met, or whose walks do not
    /// lead back to the endpoints, is a dead end.
    pub fn sub_path<R: StepRule>(&self, graph: &Graph, step_rule: &R) -> Result<Path> {
        let range = self.range();
        self.intersection
            .and_then(|intersection| {
                Path::from_meeting(
                    graph,
                    step_rule,
                    &self.forward.traces,
                    &self.backward.traces,
                    intersection,
                    range.source,
                    range.target,
                )
            })
            .ok_or_else(|| self.dead_end())
    }
}
