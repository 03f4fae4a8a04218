use grid_util::point::Point;
use itertools::Itertools;
use log::{debug, info, warn};

use crate::error::{PathfindingError, Result};
use crate::graph::Graph;
use crate::path::Path;

pub mod astar;
pub mod beam;
pub mod bidirectional;
pub mod depth_first;
pub mod dijkstra;
pub(crate) mod frontier;
pub mod ida_star;
pub mod lee;

/// One consecutive (source, target) pair of a waypoint sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubRange {
    pub source: Point,
    pub target: Point,
}

impl SubRange {
    pub fn new(source: Point, target: Point) -> SubRange {
        SubRange { source, target }
    }
    /// The same pair seen from the target, as a backward search sees it.
    pub fn reversed(&self) -> SubRange {
        SubRange::new(self.target, self.source)
    }
}

/// Receives progress notifications, synchronously and in expansion order. Both methods do
/// nothing by default.
pub trait SearchObserver {
    /// A vertex is being expanded; `neighbours` are its free, unvisited neighbours.
    fn vertex_processed(&mut self, _vertex: Point, _neighbours: &[Point]) {}
    /// One sub-range of the waypoint sequence has been completed.
    fn sub_path_found(&mut self, _path: &Path) {}
}

impl SearchObserver for () {}

/// The lifecycle a strategy implements. [Pathfinder] calls [prepare](Self::prepare) for every
/// sub-range, then repeats [inspect](Self::inspect), [move_next](Self::move_next) and
/// [visit](Self::visit) until [is_destination](Self::is_destination) holds, collects the
/// [sub_path](Self::sub_path) and finally calls [drop_state](Self::drop_state).
pub trait SearchStep {
    fn prepare(&mut self, graph: &Graph, range: SubRange);
    /// Expands the current vertex: reports it to the observer and relaxes its neighbours.
    fn inspect(&mut self, graph: &Graph, observer: &mut dyn SearchObserver);
    /// Picks the next current vertex. Fails with [PathfindingError::DeadEnd] once the frontier
    /// is exhausted.
    fn move_next(&mut self, graph: &Graph) -> Result<()>;
    fn visit(&mut self, graph: &Graph);
    fn is_destination(&self) -> bool;
    fn sub_path(&self, graph: &Graph) -> Result<Path>;
    /// Clears all per-sub-range state so nothing leaks into the next sub-range.
    fn drop_state(&mut self);
}

impl<S: SearchStep + ?Sized> SearchStep for Box<S> {
    fn prepare(&mut self, graph: &Graph, range: SubRange) {
        (**self).prepare(graph, range)
    }
    fn inspect(&mut self, graph: &Graph, observer: &mut dyn SearchObserver) {
        (**self).inspect(graph, observer)
    }
    fn move_next(&mut self, graph: &Graph) -> Result<()> {
        (**self).move_next(graph)
    }
    fn visit(&mut self, graph: &Graph) {
        (**self).visit(graph)
    }
    fn is_destination(&self) -> bool {
        (**self).is_destination()
    }
    fn sub_path(&self, graph: &Graph) -> Result<Path> {
        (**self).sub_path(graph)
    }
    fn drop_state(&mut self) {
        (**self).drop_state()
    }
}

/// Drives a [SearchStep] strategy over a waypoint sequence. One instance serves one run at a
/// time; concurrent runs need separate instances.
#[derive(Clone, Debug)]
pub struct Pathfinder<S> {
    range: Vec<Point>,
    strategy: S,
}

impl<S: SearchStep> Pathfinder<S> {
    pub fn new(range: Vec<Point>, strategy: S) -> Pathfinder<S> {
        Pathfinder { range, strategy }
    }

    pub fn range(&self) -> &[Point] {
        &self.range
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Adjacent waypoint pairs in order.
    pub fn sub_ranges(&self) -> impl Iterator<Item = SubRange> + '_ {
        self.range
            .iter()
            .copied()
            .tuple_windows()
            .map(|(source, target)| SubRange::new(source, target))
    }

    pub fn find_path(&mut self, graph: &Graph) -> Result<Path> {
        self.find_path_observed(graph, &mut ())
    }

    /// Searches every sub-range in turn and joins the sub-paths. Waypoints outside the graph or
    /// on an obstacle are rejected before any search starts. The first dead end aborts the
    /// whole run; sub-paths reported before it have already reached the observer.
    pub fn find_path_observed(
        &mut self,
        graph: &Graph,
        observer: &mut dyn SearchObserver,
    ) -> Result<Path> {
        if let Some(p) = self.range.iter().find(|p| !graph.contains(p)) {
            return Err(PathfindingError::VertexOutOfBounds(*p));
        }
        if let Some(p) = self.range.iter().find(|p| graph.is_obstacle(p)) {
            warn!("Waypoint {} is an obstacle", p);
            return Err(PathfindingError::BlockedWaypoint(*p));
        }
        let sub_ranges = self.sub_ranges().collect::<Vec<_>>();
        let mut sub_paths = Vec::with_capacity(sub_ranges.len());
        for range in sub_ranges {
            info!("Searching sub-path from {} to {}", range.source, range.target);
            let result = self.find_sub_path(graph, range, observer);
            self.strategy.drop_state();
            let sub_path = match result {
                Ok(sub_path) => sub_path,
                Err(e) => {
                    warn!("{}", e);
                    return Err(e);
                }
            };
            debug!(
                "Found sub-path with {} steps and cost {}",
                sub_path.count(),
                sub_path.cost()
            );
            observer.sub_path_found(&sub_path);
            sub_paths.push(sub_path);
        }
        Ok(if sub_paths.len() > 1 {
            Path::composite(sub_paths)
        } else {
            sub_paths.pop().unwrap_or_default()
        })
    }

    fn find_sub_path(
        &mut self,
        graph: &Graph,
        range: SubRange,
        observer: &mut dyn SearchObserver,
    ) -> Result<Path> {
        self.strategy.prepare(graph, range);
        while !self.strategy.is_destination() {
            self.strategy.inspect(graph, observer);
            self.strategy.move_next(graph)?;
            self.strategy.visit(graph);
        }
        self.strategy.sub_path(graph)
    }
}
