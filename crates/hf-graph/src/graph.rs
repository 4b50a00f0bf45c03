//! Core graph data structures.

use hf_core::{EquipId, NodeId, PortId};

/// Direction/kind of a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PortKind {
    /// Inlet port (upstream connection).
    Inlet,
    /// Outlet port (downstream connection).
    Outlet,
}

/// Which fluid stream of a component a port belongs to.
///
/// Single-stream equipment (fans, ducts, pumps) only uses `Primary`. Water
/// coils put air on `Primary` and water on `Secondary`; chillers put chilled
/// water on `Primary` and condenser water on `Secondary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    Primary,
    Secondary,
}

/// Connection capability of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// One inlet and one outlet per side.
    StraightThrough,
    /// One inlet, any number of outlets (splitters).
    Branching,
    /// Any number of inlets, one outlet (mixers, return plenums).
    Mixing,
}

/// A connection point between two components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
}

/// A port attaches a component to (at most) one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
    pub id: PortId,
    pub comp: EquipId,
    pub node: Option<NodeId>,
    pub kind: PortKind,
    pub side: Side,
}

/// A piece of equipment as seen by the topology: a name, a shape and ports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub id: EquipId,
    pub name: String,
    pub shape: Shape,
    pub ports: Vec<PortId>,
}

/// The connection graph.
///
/// Nodes, components and ports live in dense vectors indexed by their ids.
/// `upstream[n]` / `downstream[n]` hold the single outlet / inlet port
/// attached to node `n`.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub(crate) nodes: Vec<Node>,
    pub(crate) components: Vec<Component>,
    pub(crate) ports: Vec<Port>,
    pub(crate) upstream: Vec<Option<PortId>>,
    pub(crate) downstream: Vec<Option<PortId>>,
}

impl Graph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return all nodes.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Return all components.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Return all ports.
    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    /// Get a node by ID (returns None if ID out of bounds).
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.slot())
    }

    /// Get a component by ID (returns None if ID out of bounds).
    pub fn component(&self, id: EquipId) -> Option<&Component> {
        self.components.get(id.slot())
    }

    /// Get a port by ID (returns None if ID out of bounds).
    pub fn port(&self, id: PortId) -> Option<&Port> {
        self.ports.get(id.slot())
    }

    /// First port of a component matching kind and side.
    pub fn find_port(&self, comp: EquipId, kind: PortKind, side: Side) -> Option<PortId> {
        let component = self.component(comp)?;
        component.ports.iter().copied().find(|&p| {
            self.port(p)
                .is_some_and(|port| port.kind == kind && port.side == side)
        })
    }

    /// All ports of a component matching kind and side, in creation order.
    pub fn ports_of(&self, comp: EquipId, kind: PortKind, side: Side) -> Vec<PortId> {
        let Some(component) = self.component(comp) else {
            return Vec::new();
        };
        component
            .ports
            .iter()
            .copied()
            .filter(|&p| {
                self.port(p)
                    .is_some_and(|port| port.kind == kind && port.side == side)
            })
            .collect()
    }

    /// Node attached to the first inlet of `comp` on `side`.
    pub fn inlet_node(&self, comp: EquipId, side: Side) -> Option<NodeId> {
        let port = self.find_port(comp, PortKind::Inlet, side)?;
        self.port(port)?.node
    }

    /// Node attached to the first outlet of `comp` on `side`.
    pub fn outlet_node(&self, comp: EquipId, side: Side) -> Option<NodeId> {
        let port = self.find_port(comp, PortKind::Outlet, side)?;
        self.port(port)?.node
    }

    /// Outlet port feeding `node`, if any.
    pub fn upstream_port(&self, node: NodeId) -> Option<PortId> {
        self.upstream.get(node.slot()).copied().flatten()
    }

    /// Inlet port drawing from `node`, if any.
    pub fn downstream_port(&self, node: NodeId) -> Option<PortId> {
        self.downstream.get(node.slot()).copied().flatten()
    }

    /// Component whose outlet feeds `node`.
    pub fn upstream_of(&self, node: NodeId) -> Option<EquipId> {
        self.upstream_port(node)
            .and_then(|p| self.port(p))
            .map(|p| p.comp)
    }

    /// Component whose inlet draws from `node`.
    pub fn downstream_of(&self, node: NodeId) -> Option<EquipId> {
        self.downstream_port(node)
            .and_then(|p| self.port(p))
            .map(|p| p.comp)
    }

    /// Side of the port that connects `comp` to `node`, if they touch.
    pub fn side_at(&self, comp: EquipId, node: NodeId) -> Option<Side> {
        let component = self.component(comp)?;
        component
            .ports
            .iter()
            .filter_map(|&p| self.port(p))
            .find(|p| p.node == Some(node))
            .map(|p| p.side)
    }

    /// True when `comp` has any port on `side`.
    pub fn has_side(&self, comp: EquipId, side: Side) -> bool {
        self.component(comp).is_some_and(|c| {
            c.ports
                .iter()
                .filter_map(|&p| self.port(p))
                .any(|p| p.side == side)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_kind_equality() {
        assert_eq!(PortKind::Inlet, PortKind::Inlet);
        assert_ne!(PortKind::Inlet, PortKind::Outlet);
    }

    #[test]
    fn straight_component_has_primary_ports() {
        let mut graph = Graph::new();
        let c = graph.add_component("Coil", Shape::StraightThrough, true);
        assert!(graph.find_port(c, PortKind::Inlet, Side::Primary).is_some());
        assert!(graph.find_port(c, PortKind::Outlet, Side::Primary).is_some());
        assert!(graph.has_side(c, Side::Secondary));
        assert_eq!(graph.inlet_node(c, Side::Primary), None);
    }

    #[test]
    fn single_stream_component_has_no_secondary() {
        let mut graph = Graph::new();
        let c = graph.add_component("Fan", Shape::StraightThrough, false);
        assert!(!graph.has_side(c, Side::Secondary));
        assert_eq!(graph.component(c).unwrap().ports.len(), 2);
    }
}
