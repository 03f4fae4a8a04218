//! Path values produced by a search and their reconstruction from trace maps.
use grid_util::point::Point;
use itertools::Itertools;

use crate::graph::Graph;
use crate::step_rule::StepRule;
use crate::Traces;

/// How a [Path] was put together.
#[derive(Clone, Debug, PartialEq)]
pub enum PathKind {
    /// No path: the waypoint sequence did not form a single sub-range.
    Null,
    /// One walk over a single trace map.
    Simple,
    /// Two walks joined at the vertex where the forward and backward searches met.
    Bidirectional { intersection: Point },
    /// Consecutive sub-paths of a multi-waypoint route.
    Composite(Vec<Path>),
}

/// An ordered sequence of vertices together with its total cost and step count.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    vertices: Vec<Point>,
    cost: f64,
    count: usize,
    kind: PathKind,
}

impl Default for Path {
    fn default() -> Path {
        Path::null()
    }
}

impl Path {
    pub fn null() -> Path {
        Path {
            vertices: Vec::new(),
            cost: 0.0,
            count: 0,
            kind: PathKind::Null,
        }
    }

    /// Walks `traces` backward from `target` to `source`. `None` if the walk breaks off
    /// before reaching `source`.
    pub(crate) fn from_traces<R: StepRule>(
        graph: &Graph,
        step_rule: &R,
        traces: &Traces,
        source: Point,
        target: Point,
    ) -> Option<Path> {
        let mut vertices = walk(traces, target, source)?;
        vertices.reverse();
        Some(Path::from_vertices(graph, step_rule, vertices, PathKind::Simple))
    }

    /// Joins the forward walk (intersection back to source) and the backward walk
    /// (intersection on to target), counting the intersection once. `None` unless both walks
    /// reach their endpoint.
    pub(crate) fn from_meeting<R: StepRule>(
        graph: &Graph,
        step_rule: &R,
        forward: &Traces,
        backward: &Traces,
        intersection: Point,
        source: Point,
        target: Point,
    ) -> Option<Path> {
        let mut vertices = walk(forward, intersection, source)?;
        vertices.reverse();
        vertices.extend(walk(backward, intersection, target)?.into_iter().skip(1));
        Some(Path::from_vertices(
            graph,
            step_rule,
            vertices,
            PathKind::Bidirectional { intersection },
        ))
    }

    /// Concatenates sub-paths, dropping the boundary vertex every sub-path shares with the
    /// previous one.
    pub fn composite(sub_paths: Vec<Path>) -> Path {
        let mut vertices: Vec<Point> = Vec::new();
        for sub_path in &sub_paths {
            let skip = usize::from(!vertices.is_empty());
            vertices.extend(sub_path.vertices.iter().skip(skip));
        }
        Path {
            vertices,
            cost: sub_paths.iter().map(Path::cost).sum(),
            count: sub_paths.iter().map(Path::count).sum(),
            kind: PathKind::Composite(sub_paths),
        }
    }

    fn from_vertices<R: StepRule>(
        graph: &Graph,
        step_rule: &R,
        vertices: Vec<Point>,
        kind: PathKind,
    ) -> Path {
        Path {
            cost: path_cost(graph, step_rule, &vertices),
            count: vertices.len().saturating_sub(1),
            vertices,
            kind,
        }
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }
    /// Number of steps, one less than the number of vertices.
    pub fn count(&self) -> usize {
        self.count
    }
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.vertices.iter()
    }
    pub fn kind(&self) -> &PathKind {
        &self.kind
    }
    pub fn is_null(&self) -> bool {
        self.kind == PathKind::Null
    }
    pub fn source(&self) -> Option<Point> {
        self.vertices.first().copied()
    }
    pub fn target(&self) -> Option<Point> {
        self.vertices.last().copied()
    }
    pub fn intersection(&self) -> Option<Point> {
        match self.kind {
            PathKind::Bidirectional { intersection } => Some(intersection),
            _ => None,
        }
    }
    /// The sub-paths of a composite path; a single-range path is its own only sub-path.
    pub fn sub_paths(&self) -> &[Path] {
        match &self.kind {
            PathKind::Composite(sub_paths) => sub_paths,
            PathKind::Null => &[],
            _ => std::slice::from_ref(self),
        }
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.vertices.iter()
    }
}

/// Follows predecessors from `from` until `to` is reached. The result starts at `from` and
/// ends at `to`; `None` if the trace runs out or loops first.
fn walk(traces: &Traces, from: Point, to: Point) -> Option<Vec<Point>> {
    let vertices = std::iter::successors(Some(from), |p| {
        if *p == to {
            None
        } else {
            traces.get(p).copied()
        }
    })
    .take(traces.len() + 1)
    .collect::<Vec<_>>();
    (vertices.last() == Some(&to)).then_some(vertices)
}

/// Sums the step cost of every move along `vertices`.
pub fn path_cost<R: StepRule>(graph: &Graph, step_rule: &R, vertices: &[Point]) -> f64 {
    vertices
        .iter()
        .tuple_windows()
        .map(|(current, next)| match (graph.get(next), graph.get(current)) {
            (Some(n), Some(c)) => step_rule.calculate_step_cost(n, c),
            _ => f64::INFINITY,
        })
        .sum()
}
