//! Error types for control overlay operations.

use hf_core::{NodeId, OverlayId};
use thiserror::Error;

use crate::placement::PlacementState;

/// Result type for control overlay operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur while attaching control overlays.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Invalid argument provided to a control function.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// The node already carries a setpoint manager.
    #[error("Node {node} already carries setpoint manager {existing}")]
    NodeOccupied { node: NodeId, existing: OverlayId },

    /// Placement transition not allowed from the current state.
    #[error("Cannot {what} in placement state {from:?}")]
    InvalidTransition {
        from: PlacementState,
        what: &'static str,
    },
}
