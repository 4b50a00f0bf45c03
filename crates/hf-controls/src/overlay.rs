//! Setpoint managers and the node-to-manager registry.

use std::collections::BTreeMap;

use hf_core::{NodeId, OverlayId};
use serde::Serialize;

use crate::error::{ControlError, ControlResult};
use crate::strategy::SetpointStrategy;

/// A control overlay attached to exactly one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetpointManager {
    pub id: OverlayId,
    pub name: String,
    pub node: NodeId,
    pub strategy: SetpointStrategy,
}

/// All setpoint managers of a model, at most one per node.
#[derive(Debug, Clone, Default)]
pub struct OverlayTable {
    managers: Vec<SetpointManager>,
    by_node: BTreeMap<NodeId, OverlayId>,
}

impl OverlayTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a manager to `node`.
    ///
    /// # Errors
    /// `NodeOccupied` when the node already carries a manager; `InvalidArg`
    /// when a relative strategy references its own node.
    pub fn attach(
        &mut self,
        name: impl Into<String>,
        node: NodeId,
        strategy: SetpointStrategy,
    ) -> ControlResult<OverlayId> {
        if let Some(&existing) = self.by_node.get(&node) {
            return Err(ControlError::NodeOccupied { node, existing });
        }
        if let SetpointStrategy::Relative { reference } = strategy
            && reference == node
        {
            return Err(ControlError::InvalidArg {
                what: "relative setpoint cannot reference its own node",
            });
        }
        let id = OverlayId::from_len(self.managers.len());
        self.managers.push(SetpointManager {
            id,
            name: name.into(),
            node,
            strategy,
        });
        self.by_node.insert(node, id);
        Ok(id)
    }

    pub fn get(&self, id: OverlayId) -> Option<&SetpointManager> {
        self.managers.get(id.slot())
    }

    /// Manager governing `node`, if any.
    pub fn at(&self, node: NodeId) -> Option<&SetpointManager> {
        self.by_node.get(&node).and_then(|&id| self.get(id))
    }

    pub fn is_occupied(&self, node: NodeId) -> bool {
        self.by_node.contains_key(&node)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SetpointManager> {
        self.managers.iter()
    }

    pub fn len(&self) -> usize {
        self.managers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.managers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hf_core::ScheduleId;
    use proptest::prelude::*;

    fn scheduled() -> SetpointStrategy {
        SetpointStrategy::Scheduled {
            schedule: ScheduleId::from_index(0),
        }
    }

    #[test]
    fn second_overlay_on_node_refused() {
        let mut table = OverlayTable::new();
        let node = NodeId::from_index(2);
        let first = table.attach("A", node, scheduled()).unwrap();
        let err = table.attach("B", node, scheduled()).unwrap_err();
        assert_eq!(
            err,
            ControlError::NodeOccupied {
                node,
                existing: first
            }
        );
        assert_eq!(table.len(), 1);
        assert_eq!(table.at(node).unwrap().name, "A");
    }

    #[test]
    fn relative_to_self_refused() {
        let mut table = OverlayTable::new();
        let node = NodeId::from_index(0);
        let rel = SetpointStrategy::Relative { reference: node };
        assert!(table.attach("R", node, rel).is_err());
        assert!(table.is_empty());
    }

    proptest! {
        #[test]
        fn table_never_holds_two_overlays_per_node(nodes in prop::collection::vec(0u32..8, 0..40)) {
            let mut table = OverlayTable::new();
            for n in &nodes {
                let _ = table.attach("SPM", NodeId::from_index(*n), scheduled());
            }
            let mut seen = std::collections::BTreeSet::new();
            for m in table.iter() {
                prop_assert!(seen.insert(m.node));
            }
            let distinct: std::collections::BTreeSet<_> = nodes.iter().collect();
            prop_assert_eq!(table.len(), distinct.len());
        }
    }
}
