//! Incremental construction and splicing.
//!
//! Translation never freezes the graph: segments, branches and control
//! splits keep inserting components into existing node chains, so every
//! mutation here checks the one-upstream/one-downstream node rule up front.

use hf_core::{EquipId, NodeId, PortId};

use crate::error::{GraphError, GraphResult};
use crate::graph::{Component, Graph, Node, Port, PortKind, Shape, Side};

impl Graph {
    /// Add a node to the graph and return its ID.
    pub fn add_node(&mut self, name: impl Into<String>) -> NodeId {
        let id = NodeId::from_len(self.nodes.len());
        self.nodes.push(Node {
            id,
            name: name.into(),
        });
        self.upstream.push(None);
        self.downstream.push(None);
        id
    }

    /// Add an unconnected component.
    ///
    /// Straight-through components get an inlet and outlet on the primary
    /// side (and on the secondary side when `two_stream` is set). Branching
    /// components get their single inlet, mixing components their single
    /// outlet; the fan-out side is grown with [`Graph::add_port`].
    pub fn add_component(
        &mut self,
        name: impl Into<String>,
        shape: Shape,
        two_stream: bool,
    ) -> EquipId {
        let comp_id = EquipId::from_len(self.components.len());
        self.components.push(Component {
            id: comp_id,
            name: name.into(),
            shape,
            ports: Vec::new(),
        });

        match shape {
            Shape::StraightThrough => {
                self.push_port(comp_id, PortKind::Inlet, Side::Primary);
                self.push_port(comp_id, PortKind::Outlet, Side::Primary);
                if two_stream {
                    self.push_port(comp_id, PortKind::Inlet, Side::Secondary);
                    self.push_port(comp_id, PortKind::Outlet, Side::Secondary);
                }
            }
            Shape::Branching => {
                self.push_port(comp_id, PortKind::Inlet, Side::Primary);
            }
            Shape::Mixing => {
                self.push_port(comp_id, PortKind::Outlet, Side::Primary);
            }
        }

        comp_id
    }

    /// Grow the fan-out side of a splitter (outlets) or mixer (inlets).
    pub fn add_port(&mut self, comp: EquipId, kind: PortKind) -> GraphResult<PortId> {
        let component = self
            .component(comp)
            .ok_or(GraphError::InvalidCompRef { comp })?;
        let allowed = matches!(
            (component.shape, kind),
            (Shape::Branching, PortKind::Outlet) | (Shape::Mixing, PortKind::Inlet)
        );
        if !allowed {
            return Err(GraphError::MissingPort {
                comp,
                what: "extensible",
            });
        }
        Ok(self.push_port(comp, kind, Side::Primary))
    }

    fn push_port(&mut self, comp: EquipId, kind: PortKind, side: Side) -> PortId {
        let id = PortId::from_len(self.ports.len());
        self.ports.push(Port {
            id,
            comp,
            node: None,
            kind,
            side,
        });
        self.components[comp.slot()].ports.push(id);
        id
    }

    /// Rename a node.
    pub fn rename_node(&mut self, node_id: NodeId, new_name: impl Into<String>) {
        if let Some(node) = self.nodes.get_mut(node_id.slot()) {
            node.name = new_name.into();
        }
    }

    /// Rename a component.
    pub fn rename_component(&mut self, comp_id: EquipId, new_name: impl Into<String>) {
        if let Some(comp) = self.components.get_mut(comp_id.slot()) {
            comp.name = new_name.into();
        }
    }

    /// Attach a port to a node.
    pub fn connect(&mut self, port_id: PortId, node_id: NodeId) -> GraphResult<()> {
        let port = self
            .port(port_id)
            .ok_or(GraphError::InvalidPortRef { port: port_id })?;
        if node_id.slot() >= self.nodes.len() {
            return Err(GraphError::InvalidNodeRef { node: node_id });
        }
        if let Some(existing) = port.node {
            return Err(GraphError::PortAlreadyConnected {
                port: port_id,
                node: existing,
            });
        }

        let slot = node_id.slot();
        match port.kind {
            PortKind::Outlet => {
                if self.upstream[slot].is_some() {
                    return Err(GraphError::NodeOccupied {
                        node: node_id,
                        upstream: true,
                    });
                }
                self.upstream[slot] = Some(port_id);
            }
            PortKind::Inlet => {
                if self.downstream[slot].is_some() {
                    return Err(GraphError::NodeOccupied {
                        node: node_id,
                        upstream: false,
                    });
                }
                self.downstream[slot] = Some(port_id);
            }
        }
        self.ports[port_id.slot()].node = Some(node_id);
        Ok(())
    }

    /// Detach a port, returning the node it was attached to.
    pub fn disconnect(&mut self, port_id: PortId) -> GraphResult<Option<NodeId>> {
        let port = self
            .port(port_id)
            .ok_or(GraphError::InvalidPortRef { port: port_id })?;
        let Some(node) = port.node else {
            return Ok(None);
        };
        match port.kind {
            PortKind::Outlet => self.upstream[node.slot()] = None,
            PortKind::Inlet => self.downstream[node.slot()] = None,
        }
        self.ports[port_id.slot()].node = None;
        Ok(Some(node))
    }

    /// Connect the inlet/outlet pair of a straight-through component on `side`.
    pub fn connect_straight(
        &mut self,
        comp: EquipId,
        side: Side,
        inlet: NodeId,
        outlet: NodeId,
    ) -> GraphResult<()> {
        let (inlet_port, outlet_port) = self.free_straight_ports(comp, side)?;
        if inlet.slot() >= self.nodes.len() {
            return Err(GraphError::InvalidNodeRef { node: inlet });
        }
        if outlet.slot() >= self.nodes.len() {
            return Err(GraphError::InvalidNodeRef { node: outlet });
        }
        // Both faces are checked before either is touched.
        if self.downstream_port(inlet).is_some() {
            return Err(GraphError::NodeOccupied {
                node: inlet,
                upstream: false,
            });
        }
        if self.upstream_port(outlet).is_some() {
            return Err(GraphError::NodeOccupied {
                node: outlet,
                upstream: true,
            });
        }
        self.connect(inlet_port, inlet)?;
        self.connect(outlet_port, outlet)
    }

    /// Insert `new_comp` directly downstream of `comp` on `side`.
    ///
    /// `comp -> X` becomes `comp -> N -> new_comp -> X`; returns `N`.
    pub fn insert_after(
        &mut self,
        comp: EquipId,
        side: Side,
        new_comp: EquipId,
        node_name: impl Into<String>,
    ) -> GraphResult<NodeId> {
        let outlet_port = self.require_port(comp, PortKind::Outlet, side)?;
        let old = self
            .port(outlet_port)
            .and_then(|p| p.node)
            .ok_or(GraphError::PortNotConnected { port: outlet_port })?;
        self.free_straight_ports(new_comp, Side::Primary)?;

        self.disconnect(outlet_port)?;
        let fresh = self.add_node(node_name);
        self.connect(outlet_port, fresh)?;
        self.connect_straight(new_comp, Side::Primary, fresh, old)?;
        Ok(fresh)
    }

    /// Insert `new_comp` directly upstream of `comp` on `side`.
    ///
    /// `W -> comp` becomes `W -> new_comp -> N -> comp`; returns `N`.
    pub fn insert_before(
        &mut self,
        comp: EquipId,
        side: Side,
        new_comp: EquipId,
        node_name: impl Into<String>,
    ) -> GraphResult<NodeId> {
        let inlet_port = self.require_port(comp, PortKind::Inlet, side)?;
        let old = self
            .port(inlet_port)
            .and_then(|p| p.node)
            .ok_or(GraphError::PortNotConnected { port: inlet_port })?;
        self.free_straight_ports(new_comp, Side::Primary)?;

        self.disconnect(inlet_port)?;
        let fresh = self.add_node(node_name);
        self.connect(inlet_port, fresh)?;
        self.connect_straight(new_comp, Side::Primary, old, fresh)?;
        Ok(fresh)
    }

    /// Insert a straight-through component immediately downstream of `node`,
    /// pushing whatever drew from `node` one step further down.
    ///
    /// `node -> D` becomes `node -> new_comp -> N -> D`; returns `N`.
    pub fn insert_at(
        &mut self,
        node: NodeId,
        new_comp: EquipId,
        node_name: impl Into<String>,
    ) -> GraphResult<NodeId> {
        if node.slot() >= self.nodes.len() {
            return Err(GraphError::InvalidNodeRef { node });
        }
        self.free_straight_ports(new_comp, Side::Primary)?;
        let fresh = self.add_node(node_name);
        if let Some(down) = self.downstream_port(node) {
            self.disconnect(down)?;
            self.connect(down, fresh)?;
        }
        self.connect_straight(new_comp, Side::Primary, node, fresh)?;
        Ok(fresh)
    }

    /// Inlet and outlet of a straight-through component on `side`, both
    /// still detached.
    fn free_straight_ports(&self, comp: EquipId, side: Side) -> GraphResult<(PortId, PortId)> {
        let inlet = self.require_port(comp, PortKind::Inlet, side)?;
        let outlet = self.require_port(comp, PortKind::Outlet, side)?;
        for port in [inlet, outlet] {
            if let Some(node) = self.port(port).and_then(|p| p.node) {
                return Err(GraphError::PortAlreadyConnected { port, node });
            }
        }
        Ok((inlet, outlet))
    }

    pub(crate) fn require_port(
        &self,
        comp: EquipId,
        kind: PortKind,
        side: Side,
    ) -> GraphResult<PortId> {
        if self.component(comp).is_none() {
            return Err(GraphError::InvalidCompRef { comp });
        }
        self.find_port(comp, kind, side).ok_or(GraphError::MissingPort {
            comp,
            what: match kind {
                PortKind::Inlet => "inlet",
                PortKind::Outlet => "outlet",
            },
        })
    }
}
