//! Netlist representation and text rendering.

use std::fmt;

use vf_graph::{ComponentKind, Point};

use crate::naming::{ComponentCounters, NodeLabels};

/// Comment line that opens every generated netlist.
pub const HEADER: &str = "* Auto-generated netlist";

/// Value emitted for every wire: an ideal wire is a negligible resistor.
pub const WIRE_VALUE: &str = "1e-6";

/// One `<name> <a> <b> <value>` element line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetlistLine {
    pub name: String,
    pub kind: ComponentKind,
    pub node_a: String,
    pub node_b: String,
    pub value: String,
}

impl fmt::Display for NetlistLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.name, self.node_a, self.node_b, self.value
        )
    }
}

/// A compiled circuit.
#[derive(Debug, Clone, PartialEq)]
pub struct Netlist {
    pub(crate) ground: Point,
    pub(crate) labels: NodeLabels,
    pub(crate) lines: Vec<NetlistLine>,
    pub(crate) counters: ComponentCounters,
}

impl Netlist {
    /// The coordinate chosen as ground (`"0"`).
    pub fn ground(&self) -> Point {
        self.ground
    }

    pub fn node_labels(&self) -> &NodeLabels {
        &self.labels
    }

    /// Element lines in emission order. May be empty when every edge was
    /// skipped; the text then contains only the header.
    pub fn lines(&self) -> &[NetlistLine] {
        &self.lines
    }

    /// Final per-kind counter values, including numbers consumed by skipped
    /// orphan edges.
    pub fn counters(&self) -> &ComponentCounters {
        &self.counters
    }

    pub fn component_names(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|l| l.name.as_str())
    }

    /// Render the netlist file contents.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Netlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", HEADER)?;
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
