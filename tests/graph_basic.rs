use satcolor::error::Error;
use satcolor::graph::Graph;

#[test]
fn add_edge_inserts_endpoints_in_order() {
    let mut g = Graph::<&str>::new();
    g.add_edge("b", "a").expect("edge");
    g.add_edge("c", "b").expect("edge");
    let nodes = g.nodes().copied().collect::<Vec<_>>();
    assert_eq!(nodes, vec!["b", "a", "c"]);
    assert_eq!(g.node_count(), 3);
    assert_eq!(g.edge_count(), 2);
}

#[test]
fn repeated_edges_are_idempotent() {
    let mut g = Graph::<u32>::new();
    for _ in 0..3 {
        g.add_edge(1, 2).expect("edge");
        g.add_edge(2, 1).expect("edge");
    }
    assert_eq!(g.edge_count(), 1);
    assert_eq!(g.degree(&1), 1);
    assert_eq!(g.degree(&2), 1);
    assert!(g.has_edge(&2, &1));
}

#[test]
fn self_loop_is_rejected() {
    let mut g = Graph::<u32>::new();
    let err = g.add_edge(4, 4).expect_err("self loop");
    assert_eq!(
        err,
        Error::InvalidEdge {
            node: "4".to_string()
        }
    );
    assert_eq!(g.node_count(), 0);
}

#[test]
fn batch_with_self_loop_leaves_graph_untouched() {
    let mut g = Graph::<u32>::new();
    g.add_edge(1, 2).expect("edge");
    let res = g.add_edges([(2, 3), (3, 4), (5, 5)]);
    assert!(matches!(res, Err(Error::InvalidEdge { .. })));
    assert_eq!(g.node_count(), 2);
    assert_eq!(g.edge_count(), 1);
    assert!(!g.contains(&3));
}

#[test]
fn neighbors_and_degree_of_star() {
    let mut g = Graph::<u32>::new();
    g.add_edges([(0, 3), (0, 1), (0, 2)]).expect("star");
    let nbrs = g.neighbors(&0).copied().collect::<Vec<_>>();
    assert_eq!(nbrs, vec![3, 1, 2]);
    assert_eq!(g.degree(&0), 3);
    assert_eq!(g.neighbors(&1).copied().collect::<Vec<_>>(), vec![0]);
}

#[test]
fn unknown_node_has_no_neighbors() {
    let g = Graph::<u32>::new();
    assert_eq!(g.neighbors(&9).count(), 0);
    assert_eq!(g.degree(&9), 0);
    assert!(!g.has_edge(&1, &9));
}

#[test]
fn add_node_is_stable() {
    let mut g = Graph::<u32>::new();
    assert_eq!(g.add_node(7), 0);
    assert_eq!(g.add_node(8), 1);
    assert_eq!(g.add_node(7), 0);
    assert_eq!(g.index_of(&8), Some(1));
    assert_eq!(g.node_at(0), Some(&7));
    assert_eq!(g.edge_count(), 0);
}
