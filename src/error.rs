use grid_util::point::Point;
use thiserror::Error;

/// Errors raised while configuring a strategy or running a search.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathfindingError {
    /// The frontier ran out of candidates before the sub-target was reached.
    #[error("dead end: no path from {start} to {goal}")]
    DeadEnd { start: Point, goal: Point },

    #[error("beam width must be a positive integer, got {0}")]
    InvalidBeamWidth(usize),

    #[error("heuristic factor must be finite and non-negative, got {0}")]
    InvalidHeuristicFactor(f64),

    /// A waypoint does not name a vertex of the graph.
    #[error("waypoint {0} is not a vertex of the graph")]
    VertexOutOfBounds(Point),

    /// A waypoint lies on an obstacle, so no path can start or end there.
    #[error("waypoint {0} is an obstacle")]
    BlockedWaypoint(Point),
}

impl PathfindingError {
    pub fn is_dead_end(&self) -> bool {
        matches!(self, PathfindingError::DeadEnd { .. })
    }
}

pub type Result<T> = std::result::Result<T, PathfindingError>;
