use grid_search::algorithm::astar::AStar;
use grid_search::algorithm::beam::BeamSearch;
use grid_search::algorithm::bidirectional::{
    BidirectionalAStar, BidirectionalDepthFirst, BidirectionalDijkstra, BidirectionalLee,
};
use grid_search::algorithm::depth_first::{
    AStarGreedy, CostGreedy, DepthFirst, DistanceFirst, Snake,
};
use grid_search::algorithm::dijkstra::Dijkstra;
use grid_search::algorithm::ida_star::IdaStar;
use grid_search::algorithm::lee::{AStarLee, Lee};
use grid_search::algorithm::{Pathfinder, SearchObserver, SearchStep};
use grid_search::heuristic::{DiagonalDistance, Weighted};
use grid_search::step_rule::DefaultStepRule;
use grid_search::Graph;
use grid_util::point::Point;

#[derive(Default)]
struct ExpansionCounter(usize);

impl SearchObserver for ExpansionCounter {
    fn vertex_processed(&mut self, _vertex: Point, _neighbours: &[Point]) {
        self.0 += 1;
    }
}

// Runs every strategy on the same 8-connected graph and compares path cost, length and the
// number of expanded vertices.
fn main() {
    const N: i32 = 24;
    let mut graph = Graph::new_with_neighbourhood(N as usize, N as usize, true);
    for y in 0..N - 4 {
        graph.set_obstacle(&Point::new(N / 3, y), true);
    }
    for y in 4..N {
        graph.set_obstacle(&Point::new(2 * N / 3, y), true);
    }
    for x in 0..N {
        graph.set_cost(&Point::new(x, N / 2), 5);
    }
    graph.generate_components();
    println!("{}", graph);
    let range = vec![Point::new(0, 0), Point::new(N - 1, N - 1)];

    let heuristic = DiagonalDistance;
    let strategies: Vec<(&str, Box<dyn SearchStep>)> = vec![
        ("Lee", Box::new(Lee::new())),
        ("A* Lee", Box::new(AStarLee::new(heuristic))),
        ("Dijkstra", Box::new(Dijkstra::new(DefaultStepRule))),
        ("A*", Box::new(AStar::new(DefaultStepRule, heuristic))),
        (
            "weighted A*",
            Box::new(AStar::new(DefaultStepRule, Weighted::new(heuristic, 1.5).unwrap())),
        ),
        ("DFS", Box::new(DepthFirst::first())),
        ("random", Box::new(DepthFirst::random())),
        ("distance first", Box::new(DepthFirst::new(DistanceFirst::new(heuristic)))),
        ("A* greedy", Box::new(DepthFirst::new(AStarGreedy::new(DefaultStepRule, heuristic)))),
        ("cost greedy", Box::new(DepthFirst::new(CostGreedy::new(DefaultStepRule)))),
        ("snake", Box::new(DepthFirst::new(Snake::new(heuristic)))),
        ("beam", Box::new(BeamSearch::with_default_width(heuristic))),
        ("IDA*", Box::new(IdaStar::new(DefaultStepRule, heuristic))),
        ("bidirectional Lee", Box::new(BidirectionalLee::new())),
        ("bidirectional DFS", Box::new(BidirectionalDepthFirst::first())),
        ("bidirectional Dijkstra", Box::new(BidirectionalDijkstra::new(DefaultStepRule))),
        ("bidirectional A*", Box::new(BidirectionalAStar::new(DefaultStepRule, heuristic))),
    ];
    for (name, strategy) in strategies {
        let mut counter = ExpansionCounter::default();
        let mut pathfinder = Pathfinder::new(range.clone(), strategy);
        match pathfinder.find_path_observed(&graph, &mut counter) {
            Ok(path) => println!(
                "{:<24} cost {:>6.1}, {:>3} steps, {:>4} expansions",
                name,
                path.cost(),
                path.count(),
                counter.0
            ),
            Err(e) => println!("{:<24} {} after {} expansions", name, e, counter.0),
        }
    }
}
