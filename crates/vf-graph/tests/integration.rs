//! Integration tests for vf-graph.

use proptest::prelude::*;
use vf_graph::{ComponentKind, ComponentValue, Graph, GraphBuilder, Point};

#[test]
fn deserialize_editor_payload() {
    let json = r#"{
        "nodes": [{"x": 0, "y": 0}, {"x": 0, "y": 10}, {"x": 20.5, "y": 10}],
        "edges": [
            {"from": {"x": 0, "y": 0}, "to": {"x": 0, "y": 10}, "component": "resistor", "value": 100},
            {"from": {"x": 0, "y": 10}, "to": {"x": 20.5, "y": 10}, "component": "wire"},
            {"from": {"x": 0, "y": 0}, "to": {"x": 20.5, "y": 10}, "component": "voltage_source", "value": "SIN(0 5 50)"},
            {"from": {"x": 0, "y": 0}, "to": {"x": 0, "y": 10}, "component": "transistor", "value": null}
        ]
    }"#;

    let graph: Graph = serde_json::from_str(json).unwrap();

    assert_eq!(graph.nodes().len(), 3);
    assert_eq!(graph.nodes()[2], Point::new(20.5, 10.0));

    let edges = graph.edges();
    assert_eq!(edges.len(), 4);
    assert_eq!(edges[0].kind(), Some(ComponentKind::Resistor));
    assert_eq!(edges[0].value, Some(ComponentValue::Number(100.0)));
    assert_eq!(edges[1].kind(), Some(ComponentKind::Wire));
    assert_eq!(edges[1].value, None);
    assert_eq!(
        edges[2].value,
        Some(ComponentValue::Expr("SIN(0 5 50)".to_string()))
    );
    assert_eq!(edges[3].kind(), None);
    assert_eq!(edges[3].value, None);
}

#[test]
fn missing_collections_default_to_empty() {
    let graph: Graph = serde_json::from_str("{}").unwrap();
    assert!(graph.is_empty());
    assert!(graph.nodes().is_empty());
    assert!(graph.edges().is_empty());
}

#[test]
fn distinct_count_ignores_repeated_coordinates() {
    let mut builder = GraphBuilder::new();
    let a = builder.add_node(1.0, 1.0);
    builder.add_node(2.0, 1.0);
    builder.add_node(1.0, 1.0);
    builder.add_node(-0.0, 0.0);
    builder.add_node(0.0, 0.0);
    builder.add_wire(a, a);
    let graph = builder.build().unwrap();

    assert_eq!(graph.nodes().len(), 5);
    assert_eq!(graph.distinct_node_count(), 3);
    assert!(graph.contains(Point::new(0.0, -0.0)));
    assert!(!graph.contains(Point::new(3.0, 3.0)));
}

#[test]
fn serialized_graph_round_trips() {
    let mut builder = GraphBuilder::new();
    let a = builder.add_node(0.0, 0.0);
    let b = builder.add_node(10.0, 0.0);
    builder
        .add_edge(ComponentKind::Inductor, a, b, 0.01)
        .add_raw_edge("mystery", b, a, None);
    let graph = builder.build().unwrap();

    let text = serde_json::to_string(&graph).unwrap();
    let back: Graph = serde_json::from_str(&text).unwrap();
    assert_eq!(back, graph);
}

fn arb_coord() -> impl Strategy<Value = f64> {
    // small pool so equal coordinates come up often, plus signed zeros
    prop_oneof![
        prop::sample::select(vec![0.0, -0.0, 1.0, -1.0, 2.5, 1e-300]),
        -1e6f64..1e6,
    ]
}

proptest! {
    #[test]
    fn coord_key_matches_coordinate_equality(
        (x1, y1) in (arb_coord(), arb_coord()),
        (x2, y2) in (arb_coord(), arb_coord()),
    ) {
        let a = Point::new(x1, y1);
        let b = Point::new(x2, y2);
        prop_assert_eq!(a.key() == b.key(), x1 == x2 && y1 == y2);
    }

    #[test]
    fn contains_agrees_with_declared_nodes(
        nodes in prop::collection::vec((arb_coord(), arb_coord()), 1..8),
        (qx, qy) in (arb_coord(), arb_coord()),
    ) {
        let mut builder = GraphBuilder::new();
        for (x, y) in &nodes {
            builder.add_node(*x, *y);
        }
        let graph = builder.build().unwrap();
        let expected = nodes.iter().any(|(x, y)| *x == qx && *y == qy);
        prop_assert_eq!(graph.contains(Point::new(qx, qy)), expected);
    }
}
