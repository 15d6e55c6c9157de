//! vf-graph: circuit graph model for voltflow.
//!
//! Provides:
//! - Spatial nodes (`Point`) with positional identity (`CoordKey`)
//! - Typed component edges (`Edge`, `ComponentKind`, `ComponentValue`)
//! - Incremental graph builder with coordinate validation
//! - Non-failing structural inspection (`GraphReport`)
//!
//! # Example
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
//! assert_eq!(graph.nodes().len(), 2);
//! assert_eq!(graph.edges().len(), 1);
//! ```

pub mod builder;
pub mod error;
pub mod graph;
pub mod validate;

// Re-exports for ergonomics
pub use builder::GraphBuilder;
pub use error::{GraphError, GraphResult};
pub use graph::{ComponentKind, ComponentValue, CoordKey, Edge, Graph, Node, Point};
pub use validate::{GraphReport, OrphanEdge, UnknownComponent};
