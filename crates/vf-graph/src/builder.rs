//! Incremental graph builder.

use vf_core::Real;

use crate::error::GraphResult;
use crate::graph::{ComponentKind, ComponentValue, Edge, Graph, Node, Point};
use crate::validate;

/// Builder for constructing a graph incrementally.
///
/// Use `add_node` and `add_edge` to build up the graph, then call `build()`
/// to validate coordinates and freeze it into a `Graph`. Insertion order is
/// preserved; it determines node labels and component numbering downstream.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl GraphBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node at `(x, y)` and return its point.
    pub fn add_node(&mut self, x: Real, y: Real) -> Point {
        let p = Point::new(x, y);
        self.nodes.push(p);
        p
    }

    /// Place a component between two points.
    pub fn add_edge(
        &mut self,
        kind: ComponentKind,
        from: Point,
        to: Point,
        value: impl Into<ComponentValue>,
    ) -> &mut Self {
        self.edges.push(Edge::new(kind, from, to, value));
        self
    }

    /// Place an ideal wire. Wires carry no meaningful value.
    pub fn add_wire(&mut self, from: Point, to: Point) -> &mut Self {
        self.edges.push(Edge {
            from,
            to,
            component: ComponentKind::Wire.as_str().to_string(),
            value: None,
        });
        self
    }

    /// Place an edge with an arbitrary component string, as the editor may
    /// send kinds this crate does not know.
    pub fn add_raw_edge(
        &mut self,
        component: impl Into<String>,
        from: Point,
        to: Point,
        value: Option<ComponentValue>,
    ) -> &mut Self {
        self.edges.push(Edge {
            from,
            to,
            component: component.into(),
            value,
        });
        self
    }

    /// Validate and return the graph.
    pub fn build(self) -> GraphResult<Graph> {
        validate::validate_finite(&self.nodes, &self.edges)?;
        Ok(Graph::new(self.nodes, self.edges))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GraphError;

    #[test]
    fn preserves_insertion_order() {
        let mut b = GraphBuilder::new();
        let a = b.add_node(3.0, 1.0);
        let c = b.add_node(1.0, 3.0);
        b.add_edge(ComponentKind::Capacitor, a, c, 1e-6)
            .add_wire(c, a);
        let g = b.build().unwrap();
        assert_eq!(g.nodes(), &[a, c]);
        assert_eq!(g.edges()[0].kind(), Some(ComponentKind::Capacitor));
        assert_eq!(g.edges()[1].kind(), Some(ComponentKind::Wire));
        assert_eq!(g.edges()[1].value, None);
    }

    #[test]
    fn rejects_nan_node() {
        let mut b = GraphBuilder::new();
        b.add_node(0.0, 0.0);
        b.add_node(Real::NAN, 1.0);
        let err = b.build().unwrap_err();
        assert!(matches!(err, GraphError::NonFiniteNode { node: 1, .. }));
    }

    #[test]
    fn rejects_infinite_edge_value() {
        let mut b = GraphBuilder::new();
        let a = b.add_node(0.0, 0.0);
        let c = b.add_node(0.0, 1.0);
        b.add_edge(ComponentKind::Resistor, a, c, Real::INFINITY);
        let err = b.build().unwrap_err();
        assert!(matches!(err, GraphError::NonFiniteValue { edge: 0, .. }));
    }
}
