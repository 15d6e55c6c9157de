//! vf-netlist: compile a drawn circuit graph into solver netlist text.
//!
//! The output is deterministic: ground choice, node labels, component names
//! and line order depend only on the graph's contents and ordering.
//!
//! ```
//! use vf_graph::{ComponentKind, GraphBuilder};
//!
//! let mut builder = GraphBuilder::new();
//! let top = builder.add_node(0.0, 0.0);
//! let bottom = builder.add_node(0.0, 10.0);
//! builder.add_edge(ComponentKind::Resistor, top, bottom, 100.0);
//! let graph = builder.build().unwrap();
//!
//! let text = vf_netlist::compile_to_string(&graph).unwrap();
//! assert_eq!(text, "* Auto-generated netlist\nR1 n1 0 100\n");
//! ```

pub mod compile;
pub mod naming;
pub mod netlist;

pub use compile::{compile, compile_to_string};
pub use naming::{ComponentCounters, NodeLabels, select_ground};
pub use netlist::{HEADER, Netlist, NetlistLine, WIRE_VALUE};
