//! hf-graph: node/equipment connection graph for hvacflow.
//!
//! Provides:
//! - Core graph data structures (Node, Component, Port, Graph)
//! - Splicing operations used while threading segments and branches
//! - Path walking and structural validation
//!
//! Nodes are the unit of connection: every node has at most one upstream
//! (outlet) port and one downstream (inlet) port. Splitters and mixers are
//! components with several ports, never nodes.
//!
//! # Example
//!
//! ```
//! use hf_graph::{Graph, Shape, Side};
//!
//! let mut graph = Graph::new();
//! let n1 = graph.add_node("Supply Inlet");
//! let n2 = graph.add_node("Supply Outlet");
//! let fan = graph.add_component("Fan", Shape::StraightThrough, false);
//! graph.connect_straight(fan, Side::Primary, n1, n2).unwrap();
//!
//! assert_eq!(graph.walk(n1, n2).unwrap(), vec![fan]);
//! ```

pub mod builder;
pub mod error;
pub mod graph;
pub mod path;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use error::{GraphError, GraphResult};
pub use graph::{Component, Graph, Node, Port, PortKind, Shape, Side};
