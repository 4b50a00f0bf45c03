//! Outdoor-air systems (`OACtrl`).

use hf_components::{EconomizerKind, Equipment, OutdoorAirSystem};
use hf_core::{EquipId, UnitSystem};
use hf_project::Record;

use crate::context::Context;

pub fn translate_outdoor_air(ctx: &mut Context<'_>, rec: &Record, relief_fan: Option<EquipId>) -> EquipId {
    let economizer: EconomizerKind = ctx.choice(rec, "EconoCtrlMthd");
    let mut oa = OutdoorAirSystem::new(rec.label(), economizer);
    oa.min_outdoor_flow = ctx.sized(rec, "OAFlowMin", UnitSystem::air_flow);
    oa.max_outdoor_flow = ctx.sized(rec, "OAFlowMax", UnitSystem::air_flow);
    oa.relief_fan = relief_fan;
    ctx.model.add_equipment(Equipment::OutdoorAirSystem(oa))
}
