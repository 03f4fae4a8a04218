use grid_search::algorithm::{dijkstra::Dijkstra, Pathfinder, SearchObserver};
use grid_search::step_rule::LandscapeStepRule;
use grid_search::{Graph, Path};
use grid_util::point::Point;

/// Prints every finished leg of the route as soon as it is known.
struct LegPrinter;

impl SearchObserver for LegPrinter {
    fn sub_path_found(&mut self, path: &Path) {
        println!(
            "Leg from {:?} to {:?}: {} steps, cost {}",
            path.source(),
            path.target(),
            path.count(),
            path.cost()
        );
    }
}

// A route through three waypoints over a small landscape. Climbing between heights costs
// extra under the landscape step rule, so the legs bend around the hill in the middle.
fn main() {
    const N: i32 = 9;
    let mut graph = Graph::new(N as usize, N as usize);
    for x in 0..N {
        for y in 0..N {
            let height = 9 - 2 * ((x - N / 2).abs().max((y - N / 2).abs()));
            graph.set_cost(&Point::new(x, y), height);
        }
    }
    println!("{}", graph);
    let waypoints = vec![Point::new(0, 0), Point::new(N - 1, 0), Point::new(N - 1, N - 1)];
    let mut pathfinder = Pathfinder::new(waypoints, Dijkstra::new(LandscapeStepRule));
    match pathfinder.find_path_observed(&graph, &mut LegPrinter) {
        Ok(path) => {
            println!("Route with {} legs, cost {}:", path.sub_paths().len(), path.cost());
            for p in &path {
                println!("{:?}", p);
            }
        }
        Err(e) => println!("{}", e),
    }
}
