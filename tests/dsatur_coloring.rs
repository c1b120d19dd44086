use proptest::prelude::*;

use satcolor::color::dsatur::{Dsatur, dsatur, dsatur_with_stats};
use satcolor::color::{Color, Coloring, ColoringOracle, colors_used, is_proper, three_palette};
use satcolor::error::Error;
use satcolor::graph::Graph;

fn graph_of(edges: &[(u32, u32)]) -> Graph<u32> {
    let mut g = Graph::new();
    g.add_edges(edges.iter().copied()).expect("edges");
    g
}

fn cycle(n: u32) -> Graph<u32> {
    let edges = (0..n).map(|i| (i, (i + 1) % n)).collect::<Vec<_>>();
    graph_of(&edges)
}

#[test]
fn empty_graph_gives_empty_coloring() {
    let g = Graph::<u32>::new();
    let c = dsatur(&g, &Coloring::new(), &three_palette()).expect("color");
    assert!(c.is_empty());
}

#[test]
fn no_seed_starts_at_max_degree_node() {
    let g = graph_of(&[(1, 2), (5, 1), (5, 2), (5, 3), (5, 4)]);
    let c = dsatur(&g, &Coloring::new(), &three_palette()).expect("color");
    assert_eq!(c.get_index(0), Some((&5, &Color::GREEN)));
    assert!(is_proper(&g, &c));
}

#[test]
fn ties_fall_back_to_degree_then_node_order() {
    let g = graph_of(&[(1, 2), (2, 3), (3, 4)]);
    let c = dsatur(&g, &Coloring::new(), &three_palette()).expect("color");
    let order = c.iter().map(|(n, col)| (*n, *col)).collect::<Vec<_>>();
    assert_eq!(
        order,
        vec![
            (2, Color::GREEN),
            (3, Color::RED),
            (1, Color::RED),
            (4, Color::GREEN),
        ]
    );
}

#[test]
fn even_cycle_needs_two_colors_odd_needs_three() {
    let even = cycle(6);
    let c = dsatur(&even, &Coloring::new(), &three_palette()).expect("color");
    assert!(is_proper(&even, &c));
    assert_eq!(colors_used(&c).len(), 2);

    let odd = cycle(5);
    let c = dsatur(&odd, &Coloring::new(), &three_palette()).expect("color");
    assert!(is_proper(&odd, &c));
    assert_eq!(colors_used(&c).len(), 3);
}

#[test]
fn clique_overflows_past_palette() {
    let k4 = graph_of(&[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
    let c = dsatur(&k4, &Coloring::new(), &three_palette()).expect("color");
    assert!(is_proper(&k4, &c));
    let used = colors_used(&c);
    assert_eq!(used.len(), 4);
    assert!(used.contains(&Color::GREY));
}

#[test]
fn seeded_colors_are_kept() {
    let g = cycle(4);
    let mut seed = Coloring::new();
    seed.insert(0, Color::BLUE);
    seed.insert(2, Color::BLUE);
    let c = dsatur(&g, &seed, &three_palette()).expect("color");
    assert_eq!(c.get(&0), Some(&Color::BLUE));
    assert_eq!(c.get(&2), Some(&Color::BLUE));
    assert_eq!(c.get(&1), Some(&Color::GREEN));
    assert_eq!(c.get(&3), Some(&Color::GREEN));
}

#[test]
fn conflicting_seed_is_rejected_up_front() {
    let g = graph_of(&[(1, 2), (2, 3)]);
    let mut seed = Coloring::new();
    seed.insert(1, Color::RED);
    seed.insert(2, Color::RED);
    let err = dsatur(&g, &seed, &three_palette()).expect_err("invalid seed");
    assert!(matches!(err, Error::InvalidSeed { .. }));
}

#[test]
fn seed_on_unknown_node_is_rejected() {
    let g = graph_of(&[(1, 2)]);
    let mut seed = Coloring::new();
    seed.insert(9, Color::RED);
    let err = dsatur(&g, &seed, &three_palette()).expect_err("unknown node");
    assert!(matches!(err, Error::InvalidSeed { .. }));
}

#[test]
fn stats_count_selections_after_seed() {
    let g = cycle(5);
    let mut seed = Coloring::new();
    seed.insert(0, Color::RED);
    let (c, stats) = dsatur_with_stats(&g, &seed, &three_palette()).expect("color");
    assert_eq!(stats.seeded, 1);
    assert_eq!(stats.selections, 4);
    assert_eq!(stats.colors_used, colors_used(&c).len());
}

#[test]
fn oracle_wrapper_always_answers() {
    let g = cycle(7);
    let mut oracle = Dsatur::new();
    let c = oracle
        .color(&g, &Coloring::new(), &three_palette())
        .expect("color")
        .expect("dsatur always colors");
    assert!(is_proper(&g, &c));
    assert_eq!(oracle.stats().selections, 7);
    assert_eq!(ColoringOracle::<u32>::oracle_name(&oracle), "dsatur");
}

fn arb_edges() -> impl Strategy<Value = Vec<(u32, u32)>> {
    proptest::collection::vec((0u32..12, 0u32..12), 0..40)
        .prop_map(|v| v.into_iter().filter(|(a, b)| a != b).collect())
}

proptest! {
    #[test]
    fn coloring_is_proper_and_bounded(edges in arb_edges()) {
        let g = graph_of(&edges);
        let c = dsatur(&g, &Coloring::new(), &three_palette()).expect("color");
        prop_assert!(is_proper(&g, &c));
        let max_degree = g.nodes().map(|n| g.degree(n)).max().unwrap_or(0);
        prop_assert!(colors_used(&c).len() <= max_degree + 1);
    }

    #[test]
    fn coloring_is_deterministic(edges in arb_edges()) {
        let g = graph_of(&edges);
        let a = dsatur(&g, &Coloring::new(), &three_palette()).expect("color");
        let b = dsatur(&g, &Coloring::new(), &three_palette()).expect("color");
        prop_assert_eq!(a, b);
    }
}
