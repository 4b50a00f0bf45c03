//! Graph-specific error types.

use hf_core::{EquipId, HfError, NodeId, PortId};
use thiserror::Error;

pub type GraphResult<T> = Result<T, GraphError>;

/// Graph construction, splicing and validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("Node {node} does not exist")]
    InvalidNodeRef { node: NodeId },

    #[error("Component {comp} does not exist")]
    InvalidCompRef { comp: EquipId },

    #[error("Port {port} does not exist")]
    InvalidPortRef { port: PortId },

    /// The node already has an equipment port on that face.
    #[error("Node {node} already has an {} connection", face(.upstream))]
    NodeOccupied { node: NodeId, upstream: bool },

    #[error("Port {port} is already connected to node {node}")]
    PortAlreadyConnected { port: PortId, node: NodeId },

    /// The component has no port of the requested kind/side.
    #[error("Component {comp} has no {what} port")]
    MissingPort { comp: EquipId, what: &'static str },

    #[error("Port {port} is not connected")]
    PortNotConnected { port: PortId },

    /// A walk left the straight path before reaching its end node.
    #[error("Path is broken at node {node}")]
    BrokenPath { node: NodeId },

    /// Node adjacency table disagrees with the port table.
    #[error("Port {port} and node {node} disagree about their connection")]
    InconsistentAdjacency { port: PortId, node: NodeId },

    /// A straight-through component has only one of inlet/outlet connected on a side.
    #[error("Component {comp} has a dangling inlet or outlet")]
    HalfConnected { comp: EquipId },
}

fn face(upstream: &bool) -> &'static str {
    if *upstream { "upstream" } else { "downstream" }
}

impl From<GraphError> for HfError {
    fn from(err: GraphError) -> Self {
        HfError::Invariant {
            what: err.to_string(),
        }
    }
}
