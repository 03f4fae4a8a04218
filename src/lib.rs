//! # grid_search
//!
//! A family of grid search strategies behind one execution contract. Every strategy
//! ([Lee](algorithm::lee::Lee) breadth-first search, [Dijkstra](algorithm::dijkstra::Dijkstra),
//! [A*](algorithm::astar::AStar), depth-first and greedy variants, beam search, IDA* and the
//! bidirectional counterparts) implements [SearchStep](algorithm::SearchStep) and is driven by a
//! [Pathfinder](algorithm::Pathfinder), which splits a waypoint sequence into consecutive
//! sub-ranges, runs one search per sub-range and joins the sub-paths into a single [Path].
//!
//! Numeric behaviour is fully determined by the collaborators a strategy is built with: a
//! [Heuristic](heuristic::Heuristic) estimating the remaining distance and a
//! [StepRule](step_rule::StepRule) pricing every move.
//!
//! ```
//! use grid_search::algorithm::{astar::AStar, Pathfinder};
//! use grid_search::heuristic::ManhattanDistance;
//! use grid_search::step_rule::DefaultStepRule;
//! use grid_search::Graph;
//! use grid_util::point::Point;
//!
//! let mut graph = Graph::new(3, 3);
//! graph.set_obstacle(&Point::new(1, 1), true);
//! let range = vec![Point::new(0, 0), Point::new(2, 2)];
//! let mut pathfinder = Pathfinder::new(range, AStar::new(DefaultStepRule, ManhattanDistance));
//! let path = pathfinder.find_path(&graph).unwrap();
//! assert_eq!(path.count(), 4);
//! assert_eq!(path.cost(), 4.0);
//! ```
use std::ops::RangeInclusive;

use fxhash::FxBuildHasher;
use indexmap::IndexMap;

pub mod algorithm;
pub mod error;
pub mod graph;
pub mod heuristic;
pub mod path;
pub mod step_rule;

pub use error::{PathfindingError, Result};
pub use graph::{Graph, Vertex, VertexCost};
pub use path::{Path, PathKind};

/// Beam width used when none is given.
pub const DEFAULT_BEAM_WIDTH: usize = 10;
/// Inline capacity of neighbour buffers, enough for a full 8-neighbourhood.
pub const N_SMALLVEC_SIZE: usize = 8;
/// Range a vertex cost may take unless the graph is configured otherwise.
pub const DEFAULT_COST_RANGE: RangeInclusive<i32> = 1..=9;

pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Predecessor of every reached vertex, keyed by position.
pub(crate) type Traces = FxIndexMap<grid_util::point::Point, grid_util::point::Point>;
