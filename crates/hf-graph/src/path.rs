//! Walking straight node chains.

use hf_core::{EquipId, NodeId};

use crate::error::{GraphError, GraphResult};
use crate::graph::{Graph, Shape};

impl Graph {
    /// Walk downstream from `start` to `end` through straight-through
    /// components, returning them in flow order.
    ///
    /// Each hop follows the side of the inlet port drawing from the current
    /// node, so a water coil sitting in an air chain is crossed on its air side.
    pub fn walk(&self, start: NodeId, end: NodeId) -> GraphResult<Vec<EquipId>> {
        let mut visited = Vec::new();
        let mut node = start;
        while node != end {
            if visited.len() > self.components.len() {
                return Err(GraphError::BrokenPath { node });
            }
            let port = self
                .downstream_port(node)
                .and_then(|p| self.port(p))
                .ok_or(GraphError::BrokenPath { node })?;
            let comp = port.comp;
            if self.component(comp).map(|c| c.shape) != Some(Shape::StraightThrough) {
                return Err(GraphError::BrokenPath { node });
            }
            node = self
                .outlet_node(comp, port.side)
                .ok_or(GraphError::BrokenPath { node })?;
            visited.push(comp);
        }
        Ok(visited)
    }

    /// Walk upstream from `node` while the feeding component is straight-through.
    ///
    /// Returns components nearest-first; stops at splitters, mixers or an
    /// unfed node.
    pub fn upstream_chain(&self, node: NodeId) -> Vec<EquipId> {
        let mut chain = Vec::new();
        let mut current = node;
        while let Some(port) = self.upstream_port(current).and_then(|p| self.port(p)) {
            let comp = port.comp;
            if self.component(comp).map(|c| c.shape) != Some(Shape::StraightThrough)
                || chain.contains(&comp)
            {
                break;
            }
            chain.push(comp);
            match self.inlet_node(comp, port.side) {
                Some(inlet) => current = inlet,
                None => break,
            }
        }
        chain
    }
}
