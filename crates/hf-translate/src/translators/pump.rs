//! Pump records.

use hf_components::{Equipment, Pump, PumpKind};
use hf_core::{EquipId, UnitSystem};
use hf_project::Record;

use crate::context::Context;

/// Translate a pump record. `name` overrides the record name when one
/// record stamps out several pumps (secondary-segment branch pumps).
pub fn translate_pump(ctx: &mut Context<'_>, rec: &Record, name: Option<String>) -> EquipId {
    let name = name.unwrap_or_else(|| rec.label().to_string());
    let kind: PumpKind = ctx.choice(rec, "SpdCtrl");
    let mut pump = Pump::new(name, kind).with_design_flow(ctx.sized(rec, "FlowCap", UnitSystem::liquid_flow));
    if let Some(head) = ctx.quantity(rec, "HdDsgn", UnitSystem::head) {
        match pump.clone().with_head(head) {
            Ok(p) => pump = p,
            Err(e) => ctx.diags.warn(rec.label(), format!("ignoring HdDsgn: {e}")),
        }
    }
    if let Some(eff) = ctx.fraction(rec, "MotorEff") {
        pump.motor_efficiency = eff;
    }
    ctx.model.add_equipment(Equipment::Pump(pump))
}
