use grid_search::algorithm::{astar::AStar, Pathfinder};
use grid_search::heuristic::ManhattanDistance;
use grid_search::step_rule::DefaultStepRule;
use grid_search::Graph;
use grid_util::point::Point;

// In this example a path is found on a graph with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// S marks the start
// E marks the end
fn main() {
    let mut graph = Graph::new(3, 3);
    graph.set_obstacle(&Point::new(1, 1), true);
    println!("{}", graph);
    let start = Point::new(0, 0);
    let end = Point::new(2, 2);
    let strategy = AStar::new(DefaultStepRule, ManhattanDistance);
    let mut pathfinder = Pathfinder::new(vec![start, end], strategy);
    match pathfinder.find_path(&graph) {
        Ok(path) => {
            println!("A path with cost {} has been found:", path.cost());
            for p in &path {
                println!("{:?}", p);
            }
        }
        Err(e) => println!("{}", e),
    }
}
