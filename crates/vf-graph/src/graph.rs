//! Core graph data structures.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use vf_core::{Real, format_real};

/// A position on the editor canvas.
///
/// Identity is purely positional: two points with equal coordinates are the
/// same circuit node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: Real,
    pub y: Real,
}

impl Point {
    pub fn new(x: Real, y: Real) -> Self {
        Self { x, y }
    }

    /// Composite key used to look this point up in label maps.
    pub fn key(&self) -> CoordKey {
        CoordKey::from_point(*self)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", format_real(self.x), format_real(self.y))
    }
}

/// Nodes carry nothing but their coordinates.
pub type Node = Point;

/// Hashable `(x, y)` key.
///
/// Built from the IEEE bit patterns so it can live in hash maps; `-0.0` is
/// folded onto `0.0` so both spell the same node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoordKey {
    x: u64,
    y: u64,
}

impl CoordKey {
    pub fn from_point(p: Point) -> Self {
        Self {
            x: canonical_bits(p.x),
            y: canonical_bits(p.y),
        }
    }
}

fn canonical_bits(v: Real) -> u64 {
    if v == 0.0 { 0.0_f64.to_bits() } else { v.to_bits() }
}

/// The component kinds the netlist format understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    Resistor,
    Capacitor,
    Inductor,
    VoltageSource,
    CurrentSource,
    /// An ideal wire, emitted as a negligible resistor.
    Wire,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 6] = [
        ComponentKind::Resistor,
        ComponentKind::Capacitor,
        ComponentKind::Inductor,
        ComponentKind::VoltageSource,
        ComponentKind::CurrentSource,
        ComponentKind::Wire,
    ];

    /// Parse the editor's component string. Unknown strings yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "resistor" => Some(ComponentKind::Resistor),
            "capacitor" => Some(ComponentKind::Capacitor),
            "inductor" => Some(ComponentKind::Inductor),
            "voltage_source" => Some(ComponentKind::VoltageSource),
            "current_source" => Some(ComponentKind::CurrentSource),
            "wire" => Some(ComponentKind::Wire),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Resistor => "resistor",
            ComponentKind::Capacitor => "capacitor",
            ComponentKind::Inductor => "inductor",
            ComponentKind::VoltageSource => "voltage_source",
            ComponentKind::CurrentSource => "current_source",
            ComponentKind::Wire => "wire",
        }
    }

    /// Leading letter of the netlist component name.
    pub fn prefix(&self) -> char {
        match self {
            ComponentKind::Resistor => 'R',
            ComponentKind::Capacitor => 'C',
            ComponentKind::Inductor => 'L',
            ComponentKind::VoltageSource => 'V',
            ComponentKind::CurrentSource => 'I',
            ComponentKind::Wire => 'W',
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value attached to a component placement.
///
/// Most values are plain numbers (ohms, farads, henries, volts, amps).
/// Sources may instead carry an expression such as `SIN(0 5 50)`, which the
/// solver evaluates itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComponentValue {
    Number(Real),
    Expr(String),
}

impl From<Real> for ComponentValue {
    fn from(v: Real) -> Self {
        ComponentValue::Number(v)
    }
}

impl From<&str> for ComponentValue {
    fn from(s: &str) -> Self {
        ComponentValue::Expr(s.to_string())
    }
}

impl From<String> for ComponentValue {
    fn from(s: String) -> Self {
        ComponentValue::Expr(s)
    }
}

impl fmt::Display for ComponentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentValue::Number(v) => f.write_str(&format_real(*v)),
            ComponentValue::Expr(s) => f.write_str(s),
        }
    }
}

/// A component placed between two canvas points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: Point,
    pub to: Point,
    /// Raw component string from the editor; see [`Edge::kind`].
    pub component: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ComponentValue>,
}

impl Edge {
    pub fn new(
        kind: ComponentKind,
        from: Point,
        to: Point,
        value: impl Into<ComponentValue>,
    ) -> Self {
        Self {
            from,
            to,
            component: kind.as_str().to_string(),
            value: Some(value.into()),
        }
    }

    /// Parsed component kind, `None` for strings the netlist doesn't know.
    pub fn kind(&self) -> Option<ComponentKind> {
        ComponentKind::parse(&self.component)
    }
}

/// The circuit as drawn: nodes in insertion order plus an ordered edge list.
///
/// Edge order matters: it fixes component numbering in the netlist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub(crate) nodes: Vec<Node>,
    #[serde(default)]
    pub(crate) edges: Vec<Edge>,
}

impl Graph {
    /// Assemble a graph without validation.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Return all nodes in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Return all edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// True when there is nothing to simulate (no nodes or no edges).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() || self.edges.is_empty()
    }

    /// Whether `p` is one of the declared nodes.
    pub fn contains(&self, p: Point) -> bool {
        let key = p.key();
        self.nodes.iter().any(|n| n.key() == key)
    }

    /// Number of distinct node coordinates.
    pub fn distinct_node_count(&self) -> usize {
        self.nodes.iter().map(Point::key).collect::<HashSet<_>>().len()
    }
}
