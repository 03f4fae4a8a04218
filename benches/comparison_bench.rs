use criterion::{criterion_group, criterion_main, Criterion};
use grid_search::algorithm::astar::AStar;
use grid_search::algorithm::beam::BeamSearch;
use grid_search::algorithm::bidirectional::{
    BidirectionalAStar, BidirectionalDijkstra, BidirectionalLee,
};
use grid_search::algorithm::depth_first::DepthFirst;
use grid_search::algorithm::dijkstra::Dijkstra;
use grid_search::algorithm::ida_star::IdaStar;
use grid_search::algorithm::lee::{AStarLee, Lee};
use grid_search::algorithm::{Pathfinder, SearchStep};
use grid_search::heuristic::{ChebyshevDistance, ManhattanDistance};
use grid_search::step_rule::{DefaultStepRule, UnitStepRule};
use grid_search::Graph;
use grid_util::point::Point;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

const N: usize = 64;
const N_SCENARIOS: usize = 32;

fn random_graph(rng: &mut StdRng, allow_diagonal: bool) -> Graph {
    let mut graph = Graph::new_with_neighbourhood(N, N, allow_diagonal);
    for x in 0..N as i32 {
        for y in 0..N as i32 {
            let p = Point::new(x, y);
            graph.set_obstacle(&p, rng.gen_bool(0.25));
            graph.set_cost(&p, rng.gen_range(1..=9));
        }
    }
    graph.generate_components();
    graph
}

/// Reachable start and goal pairs drawn from the same generator.
fn scenarios(graph: &Graph, rng: &mut StdRng) -> Vec<(Point, Point)> {
    let random_point =
        |rng: &mut StdRng| Point::new(rng.gen_range(0..N as i32), rng.gen_range(0..N as i32));
    let mut scenarios = Vec::with_capacity(N_SCENARIOS);
    while scenarios.len() < N_SCENARIOS {
        let (start, end) = (random_point(rng), random_point(rng));
        if start != end && graph.reachable(&start, &end) {
            scenarios.push((start, end));
        }
    }
    scenarios
}

fn bench_strategy<S, FS>(c: &mut Criterion, name: &str, allow_diagonal: bool, create_strategy: FS)
where
    S: SearchStep,
    FS: Fn() -> S,
{
    let mut rng = StdRng::seed_from_u64(0);
    let graph = random_graph(&mut rng, allow_diagonal);
    let scenarios = scenarios(&graph, &mut rng);
    let diag_str = if allow_diagonal { "8-grid" } else { "4-grid" };

    c.bench_function(format!("random {N}x{N}, {name} {diag_str}").as_str(), |b| {
        b.iter(|| {
            for (start, end) in &scenarios {
                let mut pathfinder = Pathfinder::new(vec![*start, *end], create_strategy());
                let _ = black_box(pathfinder.find_path(&graph));
            }
        })
    });
}

fn bench_uninformed(c: &mut Criterion) {
    bench_strategy(c, "Lee", false, Lee::new);
    bench_strategy(c, "Dijkstra", false, || Dijkstra::new(DefaultStepRule));
    bench_strategy(c, "DFS", false, DepthFirst::first);
    bench_strategy(c, "bidirectional Lee", false, BidirectionalLee::new);
    bench_strategy(c, "bidirectional Dijkstra", false, || {
        BidirectionalDijkstra::new(DefaultStepRule)
    });
}

fn bench_informed(c: &mut Criterion) {
    for allow_diagonal in [false, true] {
        bench_strategy(c, "A* Lee", allow_diagonal, || AStarLee::new(ChebyshevDistance));
        bench_strategy(c, "A*", allow_diagonal, || AStar::new(DefaultStepRule, ChebyshevDistance));
        bench_strategy(c, "beam", allow_diagonal, || {
            BeamSearch::with_default_width(ChebyshevDistance)
        });
        bench_strategy(c, "bidirectional A*", allow_diagonal, || {
            BidirectionalAStar::new(DefaultStepRule, ChebyshevDistance)
        });
    }
    // Unit steps keep the number of bound increases small.
    bench_strategy(c, "IDA*", false, || IdaStar::new(UnitStepRule, ManhattanDistance));
}

criterion_group!(benches, bench_uninformed, bench_informed);
criterion_main!(benches);
