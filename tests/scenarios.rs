/// End-to-end scenarios run against every strategy through the public API.
use grid_search::algorithm::astar::AStar;
use grid_search::algorithm::beam::BeamSearch;
use grid_search::algorithm::bidirectional::{
    BidirectionalAStar, BidirectionalDepthFirst, BidirectionalDijkstra, BidirectionalLee,
};
use grid_search::algorithm::depth_first::{CostGreedy, DepthFirst};
use grid_search::algorithm::dijkstra::Dijkstra;
use grid_search::algorithm::ida_star::IdaStar;
use grid_search::algorithm::lee::{AStarLee, Lee};
use grid_search::algorithm::{Pathfinder, SearchObserver, SearchStep};
use grid_search::heuristic::ManhattanDistance;
use grid_search::step_rule::DefaultStepRule;
use grid_search::{Graph, Path, PathKind, PathfindingError};
use grid_util::point::Point;

fn all_strategies() -> Vec<Box<dyn SearchStep>> {
    vec![
        Box::new(Lee::new()),
        Box::new(AStarLee::new(ManhattanDistance)),
        Box::new(Dijkstra::new(DefaultStepRule)),
        Box::new(AStar::new(DefaultStepRule, ManhattanDistance)),
        Box::new(DepthFirst::first()),
        Box::new(DepthFirst::random()),
        Box::new(DepthFirst::new(CostGreedy::new(DefaultStepRule))),
        Box::new(BeamSearch::with_default_width(ManhattanDistance)),
        Box::new(IdaStar::new(DefaultStepRule, ManhattanDistance)),
        Box::new(BidirectionalLee::new()),
        Box::new(BidirectionalDepthFirst::first()),
        Box::new(BidirectionalDepthFirst::random()),
        Box::new(BidirectionalDijkstra::new(DefaultStepRule)),
        Box::new(BidirectionalAStar::new(DefaultStepRule, ManhattanDistance)),
    ]
}

fn shortest_strategies() -> Vec<Box<dyn SearchStep>> {
    vec![
        Box::new(Lee::new()),
        Box::new(Dijkstra::new(DefaultStepRule)),
        Box::new(AStar::new(DefaultStepRule, ManhattanDistance)),
        Box::new(IdaStar::new(DefaultStepRule, ManhattanDistance)),
        Box::new(BidirectionalDijkstra::new(DefaultStepRule)),
        Box::new(BidirectionalAStar::new(DefaultStepRule, ManhattanDistance)),
    ]
}

#[derive(Default)]
struct Counter {
    processed: usize,
    sub_paths: usize,
}

impl SearchObserver for Counter {
    fn vertex_processed(&mut self, _vertex: Point, _neighbours: &[Point]) {
        self.processed += 1;
    }
    fn sub_path_found(&mut self, _path: &Path) {
        self.sub_paths += 1;
    }
}

#[test]
fn open_corner_to_corner() {
    let graph = Graph::new(3, 3);
    let range = vec![Point::new(0, 0), Point::new(2, 2)];
    for strategy in shortest_strategies() {
        let path = Pathfinder::new(range.clone(), strategy).find_path(&graph).unwrap();
        assert_eq!(path.count(), 4);
        assert_eq!(path.cost(), 4.0);
        assert_eq!(path.vertices().len(), 5);
    }
}

#[test]
fn around_a_central_obstacle() {
    // |S  |
    // | # |
    // |  E|
    let mut graph = Graph::new(3, 3);
    graph.set_obstacle(&Point::new(1, 1), true);
    let range = vec![Point::new(0, 0), Point::new(2, 2)];
    for strategy in shortest_strategies() {
        let path = Pathfinder::new(range.clone(), strategy).find_path(&graph).unwrap();
        assert_eq!(path.count(), 4);
        assert_eq!(path.cost(), 4.0);
        assert!(!path.vertices().contains(&Point::new(1, 1)));
    }
}

#[test]
fn blocked_corridor_is_a_dead_end() {
    // |S #  E|
    let mut graph = Graph::new(5, 1);
    graph.set_obstacle(&Point::new(2, 0), true);
    let start = Point::new(0, 0);
    let end = Point::new(4, 0);
    for strategy in all_strategies() {
        let mut counter = Counter::default();
        let result =
            Pathfinder::new(vec![start, end], strategy).find_path_observed(&graph, &mut counter);
        assert_eq!(result, Err(PathfindingError::DeadEnd { start, goal: end }));
        assert_eq!(counter.sub_paths, 0);
        assert!(counter.processed > 0);
    }
}

#[test]
fn enclosed_target_is_a_dead_end() {
    let mut graph = Graph::new(6, 6);
    for p in [
        Point::new(3, 2),
        Point::new(2, 3),
        Point::new(4, 3),
        Point::new(3, 4),
    ] {
        graph.set_obstacle(&p, true);
    }
    let start = Point::new(0, 0);
    let end = Point::new(3, 3);
    for strategy in all_strategies() {
        let error = Pathfinder::new(vec![start, end], strategy)
            .find_path(&graph)
            .unwrap_err();
        assert!(error.is_dead_end());
    }
}

#[test]
fn waypoints_join_into_one_path() {
    let graph = Graph::new(5, 5);
    let a = Point::new(0, 0);
    let b = Point::new(4, 0);
    let c = Point::new(4, 4);
    for strategy in shortest_strategies() {
        let mut counter = Counter::default();
        let path = Pathfinder::new(vec![a, b, c], strategy)
            .find_path_observed(&graph, &mut counter)
            .unwrap();
        assert_eq!(counter.sub_paths, 2);
        let PathKind::Composite(sub_paths) = path.kind() else {
            panic!("expected a composite path");
        };
        assert_eq!(sub_paths.len(), 2);
        assert_eq!(path.cost(), sub_paths[0].cost() + sub_paths[1].cost());
        assert_eq!(path.count(), 8);
        assert_eq!(path.vertices().len(), 9);
        assert_eq!(path.iter().filter(|p| **p == b).count(), 1);
        assert_eq!(path.source(), Some(a));
        assert_eq!(path.target(), Some(c));
    }
}

#[test]
fn repeated_runs_do_not_leak_state() {
    let mut graph = Graph::new(6, 6);
    graph.set_obstacle(&Point::new(2, 2), true);
    let range = vec![Point::new(0, 0), Point::new(5, 5), Point::new(0, 5)];
    for strategy in all_strategies() {
        let mut pathfinder = Pathfinder::new(range.clone(), strategy);
        let first = pathfinder.find_path(&graph).unwrap();
        let second = pathfinder.find_path(&graph).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn waypoint_outside_the_graph() {
    let graph = Graph::new(4, 4);
    let range = vec![Point::new(0, 0), Point::new(2, 2), Point::new(-1, 2)];
    for strategy in all_strategies() {
        let result = Pathfinder::new(range.clone(), strategy).find_path(&graph);
        assert_eq!(result, Err(PathfindingError::VertexOutOfBounds(Point::new(-1, 2))));
    }
}

#[test]
fn obstacle_waypoints_are_rejected() {
    // |S  #|
    let mut graph = Graph::new(4, 1);
    let blocked = Point::new(3, 0);
    graph.set_obstacle(&blocked, true);
    let ranges = [
        vec![Point::new(0, 0), blocked],
        vec![blocked, Point::new(0, 0)],
        vec![blocked, blocked],
    ];
    for range in ranges {
        for strategy in all_strategies() {
            let mut counter = Counter::default();
            let result = Pathfinder::new(range.clone(), strategy)
                .find_path_observed(&graph, &mut counter);
            assert_eq!(result, Err(PathfindingError::BlockedWaypoint(blocked)));
            assert_eq!(counter.processed, 0);
            assert_eq!(counter.sub_paths, 0);
        }
    }
}
