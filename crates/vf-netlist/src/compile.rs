//! Graph -> netlist compilation.

use vf_graph::{ComponentKind, Edge, Graph};

use crate::naming::{ComponentCounters, NodeLabels, select_ground};
use crate::netlist::{Netlist, NetlistLine, WIRE_VALUE};

/// Compile a graph into a netlist.
///
/// Returns `None` when the graph has no nodes or no edges. Edges with an
/// unknown component kind are skipped without touching any counter. Edges
/// with an endpoint outside the node set are skipped *after* their kind's
/// counter has advanced, so later components of that kind keep the numbers
/// they would have had with the orphan edge present.
pub fn compile(graph: &Graph) -> Option<Netlist> {
    if graph.is_empty() {
        return None;
    }

    let ground = select_ground(graph.nodes())?;
    let labels = NodeLabels::assign(graph.nodes(), ground);
    let mut counters = ComponentCounters::default();
    let mut lines = Vec::with_capacity(graph.edges().len());

    for (index, edge) in graph.edges().iter().enumerate() {
        let Some(kind) = edge.kind() else {
            tracing::debug!(edge = index, component = %edge.component, "skipping unknown component");
            continue;
        };

        let number = counters.next(kind);
        let name = format!("{}{}", kind.prefix(), number);

        let (Some(node_a), Some(node_b)) = (labels.get(edge.from), labels.get(edge.to)) else {
            tracing::debug!(edge = index, name = %name, "skipping edge with undeclared endpoint");
            continue;
        };

        lines.push(NetlistLine {
            name,
            kind,
            node_a: node_a.to_string(),
            node_b: node_b.to_string(),
            value: emitted_value(kind, edge),
        });
    }

    Some(Netlist {
        ground,
        labels,
        lines,
        counters,
    })
}

/// Compile straight to netlist file text.
pub fn compile_to_string(graph: &Graph) -> Option<String> {
    compile(graph).map(|n| n.to_text())
}

fn emitted_value(kind: ComponentKind, edge: &Edge) -> String {
    if kind == ComponentKind::Wire {
        return WIRE_VALUE.to_string();
    }
    match &edge.value {
        Some(v) => v.to_string(),
        None => "0".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vf_graph::{GraphBuilder, Point};

    #[test]
    fn single_resistor_round_trip() {
        let mut b = GraphBuilder::new();
        let top = b.add_node(0.0, 0.0);
        let bottom = b.add_node(0.0, 10.0);
        b.add_edge(ComponentKind::Resistor, top, bottom, 100.0);
        let netlist = compile(&b.build().unwrap()).unwrap();

        assert_eq!(netlist.ground(), Point::new(0.0, 10.0));
        assert_eq!(netlist.to_text(), "* Auto-generated netlist\nR1 n1 0 100\n");
    }

    #[test]
    fn missing_value_emits_zero() {
        let mut b = GraphBuilder::new();
        let top = b.add_node(0.0, 0.0);
        let bottom = b.add_node(0.0, 10.0);
        b.add_raw_edge("capacitor", top, bottom, None);
        let netlist = compile(&b.build().unwrap()).unwrap();
        assert_eq!(netlist.lines()[0].to_string(), "C1 n1 0 0");
    }

    #[test]
    fn header_only_when_every_edge_skipped() {
        let mut b = GraphBuilder::new();
        let a = b.add_node(0.0, 0.0);
        b.add_raw_edge("diode", a, a, None);
        let netlist = compile(&b.build().unwrap()).unwrap();
        assert!(netlist.lines().is_empty());
        assert_eq!(netlist.to_text(), "* Auto-generated netlist\n");
    }
}
