//! Graph validation and inspection.
//!
//! Orphan edges and unknown kinds are not errors: the compiler drops them
//! silently. `Graph::inspect` reports them so front ends and logs can say
//! why a component never showed up in the netlist.

use std::collections::HashSet;

use vf_core::ensure_finite;

use crate::error::{GraphError, GraphResult};
use crate::graph::{ComponentValue, Edge, Graph, Node, Point};

/// An edge with at least one endpoint missing from the node set.
#[derive(Debug, Clone, PartialEq)]
pub struct OrphanEdge {
    pub edge: usize,
    pub missing: Vec<Point>,
}

/// An edge whose component string is not a known kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownComponent {
    pub edge: usize,
    pub component: String,
}

/// Result of a structural inspection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphReport {
    pub node_count: usize,
    pub distinct_nodes: usize,
    /// Indices of nodes whose coordinates repeat an earlier node.
    pub duplicate_nodes: Vec<usize>,
    pub orphan_edges: Vec<OrphanEdge>,
    pub unknown_components: Vec<UnknownComponent>,
}

impl GraphReport {
    /// True when every edge will make it into the netlist.
    pub fn is_clean(&self) -> bool {
        self.duplicate_nodes.is_empty()
            && self.orphan_edges.is_empty()
            && self.unknown_components.is_empty()
    }
}

impl Graph {
    /// Inspect the graph without failing.
    pub fn inspect(&self) -> GraphReport {
        let mut seen = HashSet::new();
        let mut duplicate_nodes = Vec::new();
        for (i, node) in self.nodes.iter().enumerate() {
            if !seen.insert(node.key()) {
                duplicate_nodes.push(i);
            }
        }

        let mut orphan_edges = Vec::new();
        let mut unknown_components = Vec::new();
        for (i, edge) in self.edges.iter().enumerate() {
            if edge.kind().is_none() {
                unknown_components.push(UnknownComponent {
                    edge: i,
                    component: edge.component.clone(),
                });
            }

            let missing: Vec<Point> = [edge.from, edge.to]
                .into_iter()
                .filter(|p| !seen.contains(&p.key()))
                .collect();
            if !missing.is_empty() {
                orphan_edges.push(OrphanEdge { edge: i, missing });
            }
        }

        GraphReport {
            node_count: self.nodes.len(),
            distinct_nodes: seen.len(),
            duplicate_nodes,
            orphan_edges,
            unknown_components,
        }
    }
}

/// Check that every coordinate and numeric value is finite.
pub(crate) fn validate_finite(nodes: &[Node], edges: &[Edge]) -> GraphResult<()> {
    for (i, node) in nodes.iter().enumerate() {
        for v in [node.x, node.y] {
            ensure_finite(v, "node coordinate")
                .map_err(|_| GraphError::NonFiniteNode { node: i, value: v })?;
        }
    }

    for (i, edge) in edges.iter().enumerate() {
        for v in [edge.from.x, edge.from.y, edge.to.x, edge.to.y] {
            ensure_finite(v, "edge endpoint")
                .map_err(|_| GraphError::NonFiniteEndpoint { edge: i, value: v })?;
        }
        if let Some(ComponentValue::Number(v)) = edge.value {
            ensure_finite(v, "edge value")
                .map_err(|_| GraphError::NonFiniteValue { edge: i, value: v })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ComponentKind, GraphBuilder};

    #[test]
    fn clean_graph_has_empty_report() {
        let mut b = GraphBuilder::new();
        let a = b.add_node(0.0, 0.0);
        let c = b.add_node(0.0, 10.0);
        b.add_edge(ComponentKind::Resistor, a, c, 100.0);
        let report = b.build().unwrap().inspect();
        assert!(report.is_clean());
        assert_eq!(report.distinct_nodes, 2);
    }

    #[test]
    fn reports_orphans_unknowns_and_duplicates() {
        let mut b = GraphBuilder::new();
        let a = b.add_node(0.0, 0.0);
        let c = b.add_node(0.0, 10.0);
        b.add_node(0.0, 0.0);
        let stray = Point::new(50.0, 50.0);
        b.add_wire(a, stray);
        b.add_raw_edge("diode", a, c, Some(1.0.into()));
        let report = b.build().unwrap().inspect();

        assert_eq!(report.node_count, 3);
        assert_eq!(report.distinct_nodes, 2);
        assert_eq!(report.duplicate_nodes, vec![2]);
        assert_eq!(
            report.orphan_edges,
            vec![OrphanEdge {
                edge: 0,
                missing: vec![stray]
            }]
        );
        assert_eq!(report.unknown_components[0].component, "diode");
        assert!(!report.is_clean());
    }
}
