//! Graph validation logic.

use crate::error::{GraphError, GraphResult};
use crate::graph::{Graph, PortKind, Shape, Side};

impl Graph {
    /// Validate the graph structure: references exist, node adjacency agrees
    /// with the port table, and no straight-through component is left with
    /// only one of inlet/outlet connected on a side.
    pub fn validate(&self) -> GraphResult<()> {
        validate_references(self)?;
        validate_adjacency(self)?;
        validate_straight_sides(self)
    }
}

pub(crate) fn validate_references(graph: &Graph) -> GraphResult<()> {
    for (i, port) in graph.ports.iter().enumerate() {
        if port.id.slot() != i {
            return Err(GraphError::InvalidPortRef { port: port.id });
        }
        if port.comp.slot() >= graph.components.len() {
            return Err(GraphError::InvalidCompRef { comp: port.comp });
        }
        if let Some(node) = port.node {
            if node.slot() >= graph.nodes.len() {
                return Err(GraphError::InvalidNodeRef { node });
            }
        }
    }

    for comp in &graph.components {
        for &port_id in &comp.ports {
            let port = graph
                .port(port_id)
                .ok_or(GraphError::InvalidPortRef { port: port_id })?;
            if port.comp != comp.id {
                return Err(GraphError::InvalidCompRef { comp: comp.id });
            }
        }
    }

    Ok(())
}

pub(crate) fn validate_adjacency(graph: &Graph) -> GraphResult<()> {
    for node in &graph.nodes {
        let slot = node.id.slot();
        for (entry, kind) in [
            (graph.upstream[slot], PortKind::Outlet),
            (graph.downstream[slot], PortKind::Inlet),
        ] {
            if let Some(port_id) = entry {
                let port = graph
                    .port(port_id)
                    .ok_or(GraphError::InvalidPortRef { port: port_id })?;
                if port.node != Some(node.id) || port.kind != kind {
                    return Err(GraphError::InconsistentAdjacency {
                        port: port_id,
                        node: node.id,
                    });
                }
            }
        }
    }

    // Every connected port must be the one its node remembers.
    for port in &graph.ports {
        if let Some(node) = port.node {
            let recorded = match port.kind {
                PortKind::Outlet => graph.upstream[node.slot()],
                PortKind::Inlet => graph.downstream[node.slot()],
            };
            if recorded != Some(port.id) {
                return Err(GraphError::InconsistentAdjacency {
                    port: port.id,
                    node,
                });
            }
        }
    }

    Ok(())
}

pub(crate) fn validate_straight_sides(graph: &Graph) -> GraphResult<()> {
    for comp in &graph.components {
        if comp.shape != Shape::StraightThrough {
            continue;
        }
        for side in [Side::Primary, Side::Secondary] {
            let inlet = graph.inlet_node(comp.id, side).is_some();
            let outlet = graph.outlet_node(comp.id, side).is_some();
            if inlet != outlet {
                return Err(GraphError::HalfConnected { comp: comp.id });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_empty_graph() {
        assert!(Graph::new().validate().is_ok());
    }

    #[test]
    fn validate_detects_half_connected() {
        let mut graph = Graph::new();
        let a = graph.add_node("A");
        let coil = graph.add_component("Coil", Shape::StraightThrough, false);
        let inlet = graph.find_port(coil, PortKind::Inlet, Side::Primary).unwrap();
        graph.connect(inlet, a).unwrap();

        assert_eq!(
            graph.validate().unwrap_err(),
            GraphError::HalfConnected { comp: coil }
        );
    }

    #[test]
    fn validate_detects_corrupt_adjacency() {
        let mut graph = Graph::new();
        let a = graph.add_node("A");
        let b = graph.add_node("B");
        let c = graph.add_component("C", Shape::StraightThrough, false);
        graph.connect_straight(c, Side::Primary, a, b).unwrap();
        assert!(graph.validate().is_ok());

        // Forget the node side of the inlet connection.
        graph.downstream[a.slot()] = None;
        assert!(matches!(
            graph.validate().unwrap_err(),
            GraphError::InconsistentAdjacency { .. }
        ));
    }

    #[test]
    fn unconnected_component_is_valid() {
        let mut graph = Graph::new();
        graph.add_component("Embedded Coil", Shape::StraightThrough, true);
        assert!(graph.validate().is_ok());
    }
}
