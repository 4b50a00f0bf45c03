//! The translated model: graph, equipment, loops, zones, overlays and
//! zone bindings.

use std::collections::BTreeMap;

use hf_components::{Curve, Equipment, HvacComponent, Schedule};
use hf_controls::{OverlayTable, Placement};
use hf_core::{AirLoopId, CurveId, EquipId, LoopId, NodeId, ScheduleId, ZoneId};
use hf_graph::{Graph, Side};
use serde::Serialize;

use crate::registry::Registry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AirSystemKind {
    Szac,
    Szhp,
    SzvavAc,
    SzvavHp,
    Pvav,
    Vav,
    Doas,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FluidSystemKind {
    ChilledWater,
    HotWater,
    CondenserWater,
    ServiceHotWater,
}

/// What a supply outlet is controlled for; picks default temperatures and
/// schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupplyRole {
    Cooling,
    Heating,
    Condenser,
}

impl FluidSystemKind {
    pub fn supply_role(self) -> SupplyRole {
        match self {
            FluidSystemKind::ChilledWater => SupplyRole::Cooling,
            FluidSystemKind::HotWater | FluidSystemKind::ServiceHotWater => SupplyRole::Heating,
            FluidSystemKind::CondenserWater => SupplyRole::Condenser,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FluidSegmentKind {
    PrimarySupply,
    PrimaryReturn,
    SecondarySupply,
    SecondaryReturn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AirSegmentKind {
    Supply,
    Return,
    Relief,
}

/// Supply temperature control method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    Fixed,
    Scheduled,
    OutsideAirReset,
    WarmestReset,
    WarmestResetFlowFirst,
    SingleZoneReheat,
    FixedDualSetpoint,
    ScheduledDualSetpoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ZoneKind {
    Conditioned,
    Plenum,
    Unconditioned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum CommonPipeSimulation {
    #[default]
    None,
    CommonPipe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LoopSide {
    Supply,
    Demand,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    pub kind: ZoneKind,
    pub return_plenum: Option<ZoneId>,
    /// Name of the zone system serving this zone, if any.
    pub zone_system: Option<String>,
    pub inlet_nodes: Vec<NodeId>,
    pub return_nodes: Vec<NodeId>,
    /// Fan-powered terminals drawing induced air from this zone.
    pub exhaust_consumers: Vec<EquipId>,
}

/// One splitter-to-mixer path, equipment in flow order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub equipment: Vec<(EquipId, Side)>,
    pub inlet: NodeId,
    pub outlet: NodeId,
}

#[derive(Debug, Clone)]
pub struct PlantLoop {
    pub id: LoopId,
    pub name: String,
    pub kind: FluidSystemKind,
    pub supply_inlet: NodeId,
    pub supply_outlet: NodeId,
    pub demand_inlet: NodeId,
    pub demand_outlet: NodeId,
    pub supply_splitter: EquipId,
    pub supply_mixer: EquipId,
    pub demand_splitter: EquipId,
    pub demand_mixer: EquipId,
    pub loop_pump: Option<EquipId>,
    /// Secondary pump at the demand inlet (service hot water only).
    pub demand_pump: Option<EquipId>,
    pub supply_branches: Vec<Branch>,
    pub demand_branches: Vec<Branch>,
    pub supply_bypass: Branch,
    pub demand_bypass: Branch,
    pub common_pipe: CommonPipeSimulation,
    pub placement: Placement,
}

#[derive(Debug, Clone)]
pub struct AirLoop {
    pub id: AirLoopId,
    pub name: String,
    pub kind: AirSystemKind,
    pub supply_inlet: NodeId,
    pub supply_outlet: NodeId,
    pub demand_inlet: NodeId,
    pub demand_outlet: NodeId,
    /// Supply inlet to supply outlet, in flow order.
    pub supply_chain: Vec<EquipId>,
    pub oa_system: Option<EquipId>,
    pub zone_splitter: EquipId,
    pub zone_mixer: EquipId,
    pub terminals: Vec<EquipId>,
    /// Return plenum per plenum zone.
    pub plenums: BTreeMap<ZoneId, EquipId>,
    pub placement: Placement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ZoneEquipmentBinding {
    pub zone: ZoneId,
    pub equipment: EquipId,
    pub cooling_priority: u32,
    pub heating_priority: u32,
}

/// Everything a translation run produces.
///
/// Equipment and graph components share ids: the equipment table is only
/// grown through [`Model::add_equipment`], which creates the matching graph
/// component.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub graph: Graph,
    equipment: Vec<Equipment>,
    pub curves: Vec<Curve>,
    pub curve_names: Registry,
    pub schedules: Vec<Schedule>,
    pub schedule_names: Registry,
    pub zones: Vec<Zone>,
    pub zone_names: Registry,
    pub plant_loops: Vec<PlantLoop>,
    pub loop_names: Registry,
    pub air_loops: Vec<AirLoop>,
    pub air_loop_names: Registry,
    pub overlays: OverlayTable,
    pub bindings: Vec<ZoneEquipmentBinding>,
    membership: BTreeMap<(EquipId, Side), (LoopId, LoopSide)>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_equipment(&mut self, equipment: Equipment) -> EquipId {
        let id = self.graph.add_component(
            equipment.name(),
            equipment.shape(),
            equipment.two_stream(),
        );
        debug_assert_eq!(id.slot(), self.equipment.len());
        self.equipment.push(equipment);
        id
    }

    pub fn equipment(&self, id: EquipId) -> Option<&Equipment> {
        self.equipment.get(id.slot())
    }

    pub fn equipment_mut(&mut self, id: EquipId) -> Option<&mut Equipment> {
        self.equipment.get_mut(id.slot())
    }

    pub fn equipment_iter(&self) -> impl Iterator<Item = (EquipId, &Equipment)> {
        self.equipment
            .iter()
            .enumerate()
            .map(|(i, e)| (EquipId::from_len(i), e))
    }

    /// First equipment with `name`, in creation order.
    pub fn find_equipment(&self, name: &str) -> Option<EquipId> {
        self.equipment_iter()
            .find(|(_, e)| e.name() == name)
            .map(|(id, _)| id)
    }

    pub fn equipment_name(&self, id: EquipId) -> &str {
        self.equipment(id).map_or("<unknown>", |e| e.name())
    }

    pub fn node_name(&self, id: NodeId) -> &str {
        self.graph.node(id).map_or("<unknown>", |n| n.name.as_str())
    }

    /// Register a curve; a curve already registered under the same name wins.
    pub fn add_curve(&mut self, curve: Curve) -> CurveId {
        if let Some(existing) = self.curve_names.get(&curve.name) {
            return existing;
        }
        let id = CurveId::from_len(self.curves.len());
        let name = curve.name.clone();
        self.curves.push(curve);
        self.curve_names.insert_if_absent(name, id)
    }

    pub fn curve(&self, id: CurveId) -> Option<&Curve> {
        self.curves.get(id.slot())
    }

    pub fn add_schedule(&mut self, schedule: Schedule) -> ScheduleId {
        if let Some(existing) = self.schedule_names.get(&schedule.name) {
            return existing;
        }
        let id = ScheduleId::from_len(self.schedules.len());
        let name = schedule.name.clone();
        self.schedules.push(schedule);
        self.schedule_names.insert_if_absent(name, id)
    }

    pub fn schedule(&self, id: ScheduleId) -> Option<&Schedule> {
        self.schedules.get(id.slot())
    }

    pub fn zone(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.get(id.slot())
    }

    pub fn zone_mut(&mut self, id: ZoneId) -> Option<&mut Zone> {
        self.zones.get_mut(id.slot())
    }

    pub fn zone_by_name(&self, name: &str) -> Option<ZoneId> {
        self.zone_names.get(name)
    }

    pub fn plant_loop(&self, id: LoopId) -> Option<&PlantLoop> {
        self.plant_loops.get(id.slot())
    }

    pub fn plant_loop_mut(&mut self, id: LoopId) -> Option<&mut PlantLoop> {
        self.plant_loops.get_mut(id.slot())
    }

    pub fn loop_by_name(&self, name: &str) -> Option<LoopId> {
        self.loop_names.get(name)
    }

    pub fn air_loop(&self, id: AirLoopId) -> Option<&AirLoop> {
        self.air_loops.get(id.slot())
    }

    pub fn air_loop_mut(&mut self, id: AirLoopId) -> Option<&mut AirLoop> {
        self.air_loops.get_mut(id.slot())
    }

    /// Record that `(equipment, side)` belongs to one side of a plant loop.
    ///
    /// # Errors
    /// Returns the existing membership when the pair already belongs to a loop.
    pub fn assign_to_loop(
        &mut self,
        equipment: EquipId,
        side: Side,
        loop_id: LoopId,
        loop_side: LoopSide,
    ) -> Result<(), (LoopId, LoopSide)> {
        if let Some(&existing) = self.membership.get(&(equipment, side)) {
            return Err(existing);
        }
        self.membership.insert((equipment, side), (loop_id, loop_side));
        Ok(())
    }

    pub fn loop_membership(&self, equipment: EquipId, side: Side) -> Option<(LoopId, LoopSide)> {
        self.membership.get(&(equipment, side)).copied()
    }

    pub fn bindings_for(&self, zone: ZoneId) -> impl Iterator<Item = &ZoneEquipmentBinding> {
        self.bindings.iter().filter(move |b| b.zone == zone)
    }
}
