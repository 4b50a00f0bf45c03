//! Serializable digest of a translated model.

use std::collections::BTreeMap;

use hf_components::HvacComponent;
use hf_controls::SetpointStrategy;
use hf_core::EquipId;
use serde::Serialize;

use crate::model::{AirSystemKind, Branch, CommonPipeSimulation, FluidSystemKind, Model, ZoneKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelSummary {
    pub nodes: usize,
    /// Equipment count per engine class name.
    pub equipment: BTreeMap<&'static str, usize>,
    pub curves: usize,
    pub schedules: usize,
    pub plant_loops: Vec<PlantLoopSummary>,
    pub air_loops: Vec<AirLoopSummary>,
    pub setpoint_managers: Vec<OverlaySummary>,
    pub zones: Vec<ZoneSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlantLoopSummary {
    pub name: String,
    pub kind: FluidSystemKind,
    pub loop_pump: Option<String>,
    pub demand_pump: Option<String>,
    pub common_pipe: CommonPipeSimulation,
    pub supply_branches: Vec<Vec<String>>,
    pub demand_branches: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirLoopSummary {
    pub name: String,
    pub kind: AirSystemKind,
    pub supply_chain: Vec<String>,
    pub terminals: Vec<String>,
    pub return_plenums: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlaySummary {
    pub name: String,
    pub node: String,
    pub strategy: SetpointStrategy,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneSummary {
    pub name: String,
    pub kind: ZoneKind,
    pub equipment: Vec<BindingSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BindingSummary {
    pub equipment: String,
    pub cooling_priority: u32,
    pub heating_priority: u32,
}

impl Model {
    pub fn summary(&self) -> ModelSummary {
        let names = |ids: &[EquipId]| -> Vec<String> {
            ids.iter().map(|&id| self.equipment_name(id).to_string()).collect()
        };
        let branches = |branches: &[Branch]| -> Vec<Vec<String>> {
            branches
                .iter()
                .map(|b| {
                    b.equipment
                        .iter()
                        .map(|&(id, _)| self.equipment_name(id).to_string())
                        .collect()
                })
                .collect()
        };
        let name_of = |id: Option<EquipId>| id.map(|id| self.equipment_name(id).to_string());

        let mut equipment = BTreeMap::new();
        for (_, e) in self.equipment_iter() {
            *equipment.entry(e.class_name()).or_insert(0) += 1;
        }

        ModelSummary {
            nodes: self.graph.nodes().len(),
            equipment,
            curves: self.curves.len(),
            schedules: self.schedules.len(),
            plant_loops: self
                .plant_loops
                .iter()
                .map(|l| PlantLoopSummary {
                    name: l.name.clone(),
                    kind: l.kind,
                    loop_pump: name_of(l.loop_pump),
                    demand_pump: name_of(l.demand_pump),
                    common_pipe: l.common_pipe,
                    supply_branches: branches(&l.supply_branches),
                    demand_branches: branches(&l.demand_branches),
                })
                .collect(),
            air_loops: self
                .air_loops
                .iter()
                .map(|a| AirLoopSummary {
                    name: a.name.clone(),
                    kind: a.kind,
                    supply_chain: names(&a.supply_chain),
                    terminals: names(&a.terminals),
                    return_plenums: a
                        .plenums
                        .values()
                        .map(|&id| self.equipment_name(id).to_string())
                        .collect(),
                })
                .collect(),
            setpoint_managers: self
                .overlays
                .iter()
                .map(|m| OverlaySummary {
                    name: m.name.clone(),
                    node: self.node_name(m.node).to_string(),
                    strategy: m.strategy.clone(),
                })
                .collect(),
            zones: self
                .zones
                .iter()
                .map(|z| ZoneSummary {
                    name: z.name.clone(),
                    kind: z.kind,
                    equipment: self
                        .bindings_for(z.id)
                        .map(|b| BindingSummary {
                            equipment: self.equipment_name(b.equipment).to_string(),
                            cooling_priority: b.cooling_priority,
                            heating_priority: b.heating_priority,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hf_components::{Duct, Equipment, Fan, FanKind};

    #[test]
    fn counts_equipment_by_class() {
        let mut model = Model::new();
        model.add_equipment(Equipment::Duct(Duct::new("A")));
        model.add_equipment(Equipment::Duct(Duct::new("B")));
        model.add_equipment(Equipment::Fan(Fan::new("F", FanKind::OnOff)));
        let summary = model.summary();
        assert_eq!(summary.equipment.len(), 2);
        assert_eq!(summary.equipment.values().sum::<usize>(), 3);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["nodes"], 0);
    }
}
