//! Behavioural properties of the layout engine on larger inputs.

use std::collections::HashSet;

use fdlayout::simulation::DEFAULT_MIN_DISTANCE;
use fdlayout::{Edge, LayoutConfig, LayoutEngine, LayoutError, Node, layout};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// `count` nodes scattered in `[lo, hi]²` joined by a chain of edges
fn clustered_chain(count: usize, lo: f64, hi: f64, seed: u64) -> (Vec<Node>, Vec<Edge>) {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let nodes: Vec<Node> = (0..count)
        .map(|i| {
            let x = rng.gen_range(lo..hi);
            let y = rng.gen_range(lo..hi);
            Node::new(format!("n{i}"), x, y)
        })
        .collect();
    let edges = (1..count)
        .map(|i| Edge::new(format!("n{}", i - 1), format!("n{i}")))
        .collect();
    (nodes, edges)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

#[test]
fn dense_cluster_spreads_and_keeps_neighbours_close() {
    for seed in 0..10 {
        let (nodes, edges) = clustered_chain(28, 0.45, 0.55, seed);
        let result = layout(&nodes, &edges).expect("Cluster should lay out");

        let mut min_pair = f64::INFINITY;
        let mut connected = Vec::new();
        let mut unconnected = Vec::new();
        for i in 0..result.len() {
            for j in (i + 1)..result.len() {
                let d = result[i].distance_to(&result[j]);
                min_pair = min_pair.min(d);
                if j == i + 1 {
                    connected.push(d);
                } else {
                    unconnected.push(d);
                }
            }
        }

        assert!(
            min_pair > 0.8 * DEFAULT_MIN_DISTANCE,
            "seed {seed}: nodes still overlap, closest pair at {min_pair}"
        );
        assert!(
            mean(&connected) < mean(&unconnected),
            "seed {seed}: connected mean {} should be below unconnected mean {}",
            mean(&connected),
            mean(&unconnected)
        );
    }
}

#[test]
fn clustered_nodes_without_edges_spread_out() {
    let (nodes, _) = clustered_chain(12, 0.4, 0.6, 42);
    let result = layout(&nodes, &[]).unwrap();

    let mean_distance = |nodes: &[Node]| {
        let mut distances = Vec::new();
        for i in 0..nodes.len() {
            for j in (i + 1)..nodes.len() {
                distances.push(nodes[i].distance_to(&nodes[j]));
            }
        }
        mean(&distances)
    };

    assert!(mean_distance(&result) > mean_distance(&nodes));
}

#[test]
fn every_node_stays_in_bounds() {
    let (nodes, edges) = clustered_chain(40, 0.0, 1.0, 3);
    let result = layout(&nodes, &edges).unwrap();

    for node in &result {
        assert!((0.0..=1.0).contains(&node.x), "{node:?}");
        assert!((0.0..=1.0).contains(&node.y), "{node:?}");
        assert!(node.x.is_finite() && node.y.is_finite());
    }
}

#[test]
fn ids_are_preserved_exactly() {
    let (nodes, edges) = clustered_chain(20, 0.2, 0.8, 11);
    let result = layout(&nodes, &edges).unwrap();

    assert_eq!(result.len(), nodes.len());
    let before: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    let after: HashSet<&str> = result.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(before, after);
}

#[test]
fn repeated_runs_are_bit_identical() {
    let (nodes, edges) = clustered_chain(15, 0.3, 0.7, 99);
    let engine = LayoutEngine::default();

    let first = engine.layout(&nodes, &edges).unwrap();
    let second = engine.layout(&nodes, &edges).unwrap();

    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.x.to_bits(), b.x.to_bits());
        assert_eq!(a.y.to_bits(), b.y.to_bits());
    }
}

#[test]
fn duplicate_edges_are_accepted() {
    let (nodes, mut edges) = clustered_chain(5, 0.2, 0.8, 5);
    edges.push(edges[0].clone());
    edges.push(Edge::new("n2", "n2"));

    let result = layout(&nodes, &edges).unwrap();
    assert_eq!(result.len(), 5);
}

#[test]
fn legacy_calibration_matches_default_at_28_nodes() {
    let (nodes, edges) = clustered_chain(28, 0.1, 0.9, 21);

    let legacy = LayoutEngine::new(LayoutConfig::legacy())
        .layout(&nodes, &edges)
        .unwrap();
    let derived = layout(&nodes, &edges).unwrap();

    assert_eq!(legacy, derived);
}

#[test]
fn duplicate_ids_rejected() {
    let nodes = vec![Node::new("a", 0.1, 0.1), Node::new("a", 0.9, 0.9)];
    let err = layout(&nodes, &[]).unwrap_err();

    assert!(err.is_invalid_input());
    assert_eq!(
        err,
        LayoutError::DuplicateNodeId {
            id: "a".to_string()
        }
    );
}

#[test]
fn dangling_reference_rejected() {
    let (nodes, mut edges) = clustered_chain(4, 0.2, 0.8, 1);
    edges.push(Edge::new("ghost", "n0"));

    assert_eq!(
        layout(&nodes, &edges),
        Err(LayoutError::DanglingEdgeReference {
            edge: 3,
            id: "ghost".to_string()
        })
    );
}
