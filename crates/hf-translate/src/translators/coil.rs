//! Heating and cooling coil records.
//!
//! Water coils resolve their fluid loop through `FluidSegInRef` before the
//! coil exists; a coil whose loop cannot be resolved is not created and the
//! caller threads around it.

use hf_components::{
    Autosizable, CoolingCoil, CoolingCoilKind, DxCurves, Equipment, HeatingCoil, HeatingCoilKind,
};
use hf_core::constants::W_PER_BTUH;
use hf_core::{EquipId, UnitSystem};
use hf_project::Record;

use crate::assembler::{self, LoopTarget};
use crate::context::Context;
use crate::defaults::{CurveRole, resolve_curve};
use crate::vocab::CoolingCoilType;

pub fn translate_cooling_coil(ctx: &mut Context<'_>, rec: &Record) -> Option<EquipId> {
    let name = rec.label().to_string();
    let coil_type: CoolingCoilType = ctx.discriminator(rec, "Type");
    let capacity = ctx.sized(rec, "CapTotGrossRtd", UnitSystem::capacity);
    let air_flow = ctx.sized(rec, "FlowCapRtd", UnitSystem::air_flow);

    match coil_type {
        CoolingCoilType::ChilledWater => {
            let target = water_loop(ctx, rec, &name)?;
            let coil = CoolingCoil::new(name.clone(), CoolingCoilKind::Water)
                .with_capacity(capacity)
                .with_air_flow(air_flow);
            let id = ctx.model.add_equipment(Equipment::CoolingCoil(coil));
            assembler::attach_demand(ctx, target, id, &name);
            Some(id)
        }
        CoolingCoilType::DirectExpansion => {
            let stages = rec.get_double("NumClgStages").unwrap_or(1.0);
            let kind = if stages >= 2.0 {
                CoolingCoilKind::DxTwoSpeed
            } else {
                CoolingCoilKind::DxSingleSpeed
            };
            let mut coil = CoolingCoil::new(name.clone(), kind)
                .with_capacity(capacity)
                .with_air_flow(air_flow);
            if let Some(shr) = ctx.fraction(rec, "SHRRtd") {
                coil.rated_shr = Autosizable::Value(shr);
            }
            if let Some(cop) = rated_cop(ctx, rec) {
                coil.rated_cop = cop;
            }
            coil.curves = Some(dx_curves(ctx, rec, &name));

            if kind == CoolingCoilKind::DxTwoSpeed
                && let Some(frac) = low_stage_fraction(ctx, rec)
            {
                coil.low_speed_total_capacity = capacity.value().map(|c| c * frac);
                coil.low_speed_air_flow = air_flow.value().map(|f| f * frac);
            }

            tracing::debug!(coil = %name, ?kind, "translated DX coil");
            Some(ctx.model.add_equipment(Equipment::CoolingCoil(coil)))
        }
    }
}

pub fn translate_heating_coil(ctx: &mut Context<'_>, rec: &Record) -> Option<EquipId> {
    let name = rec.label().to_string();
    let kind: HeatingCoilKind = ctx.discriminator(rec, "Type");
    let target = match kind {
        HeatingCoilKind::Water => Some(water_loop(ctx, rec, &name)?),
        _ => None,
    };

    let mut coil = HeatingCoil::new(name.clone(), kind)
        .with_capacity(ctx.sized(rec, "CapTotGrossRtd", UnitSystem::capacity));
    match kind {
        HeatingCoilKind::Gas => {
            if let Some(eff) = ctx.fraction(rec, "FurnThrmlEff") {
                coil.efficiency = eff;
            }
        }
        HeatingCoilKind::HeatPump => {
            if let Some(cop) = ctx.positive(rec, "HtPumpCOP") {
                coil.cop = Some(cop);
            }
        }
        HeatingCoilKind::Electric | HeatingCoilKind::Water => {}
    }

    let id = ctx.model.add_equipment(Equipment::HeatingCoil(coil));
    if let Some(target) = target {
        assembler::attach_demand(ctx, target, id, &name);
    }
    Some(id)
}

fn water_loop<'a>(ctx: &mut Context<'a>, rec: &Record, owner: &str) -> Option<LoopTarget<'a>> {
    let seg_ref = rec.get_string("FluidSegInRef");
    let target = assembler::resolve_segment(ctx, seg_ref);
    if target.is_none() {
        ctx.diags.warn(
            owner,
            match seg_ref {
                Some(s) => format!("fluid segment '{s}' not found; coil skipped"),
                None => "missing FluidSegInRef; coil skipped".to_string(),
            },
        );
    }
    target
}

/// Rated COP, from `COP` or converted from `DXEER` (Btu/Wh).
fn rated_cop(ctx: &mut Context<'_>, rec: &Record) -> Option<f64> {
    if rec.get_double("COP").is_some() {
        return ctx.positive(rec, "COP");
    }
    ctx.positive(rec, "DXEER").map(|eer| eer * W_PER_BTUH)
}

fn dx_curves(ctx: &mut Context<'_>, rec: &Record, owner: &str) -> DxCurves {
    let mut curve = |field: &str, role: CurveRole| resolve_curve(ctx, rec.get_string(field), role, owner);
    DxCurves {
        cap_ft: curve("CapFTempCrvRef", CurveRole::DxCoolingCapFT),
        cap_fflow: curve("CapFFlowCrvRef", CurveRole::DxCoolingCapFFlow),
        eir_ft: curve("EIRFTempCrvRef", CurveRole::DxCoolingEirFT),
        eir_fflow: curve("EIRFFlowCrvRef", CurveRole::DxCoolingEirFFlow),
        part_load: curve("PLFCrvRef", CurveRole::DxPartLoad),
    }
}

/// Capacity fraction of the first (low) stage.
fn low_stage_fraction(ctx: &mut Context<'_>, rec: &Record) -> Option<f64> {
    let stage = rec
        .get_children("ClgStage")
        .find(|s| s.get_double("Idx").is_some_and(|i| i == 0.0))?;
    ctx.fraction(stage, "CapFrac")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::TranslateOptions;
    use hf_components::HvacComponent;
    use hf_core::{Tolerances, nearly_equal};
    use uom::si::power::watt;

    fn dx(stages: f64) -> Record {
        Record::new("CoilClg")
            .with_field("Name", "DX")
            .with_field("Type", "DirectExpansion")
            .with_field("NumClgStages", stages)
            .with_field("CapTotGrossRtd", 36000.0)
            .with_field("DXEER", 11.0)
    }

    #[test]
    fn single_stage_dx_converts_capacity() {
        let root = Record::new("Proj");
        let mut ctx = Context::new(&root, TranslateOptions::default());
        let id = translate_cooling_coil(&mut ctx, &dx(1.0)).unwrap();
        let coil = ctx.model.equipment(id).unwrap().as_cooling_coil().unwrap();
        assert_eq!(coil.class_name(), "CoilCoolingDXSingleSpeed");
        let w = coil.rated_total_capacity.value().unwrap().get::<watt>();
        assert!(nearly_equal(w, 10_550.558, Tolerances::converted()));
        assert!(nearly_equal(coil.rated_cop, 11.0 * W_PER_BTUH, Tolerances::converted()));
        assert!(coil.curves.is_some());
    }

    #[test]
    fn two_stage_low_speed_uses_stage_fraction() {
        let root = Record::new("Proj");
        let mut ctx = Context::new(&root, TranslateOptions::default());
        let rec = dx(2.0).with_child(
            Record::new("ClgStage")
                .with_field("Idx", 0.0)
                .with_field("CapFrac", 0.5),
        );
        let id = translate_cooling_coil(&mut ctx, &rec).unwrap();
        let coil = ctx.model.equipment(id).unwrap().as_cooling_coil().unwrap();
        assert_eq!(coil.kind, CoolingCoilKind::DxTwoSpeed);
        let low = coil.low_speed_total_capacity.unwrap().get::<watt>();
        assert!(nearly_equal(low, 5_275.279, Tolerances::converted()));
        assert!(coil.low_speed_air_flow.is_none());
    }

    #[test]
    fn two_stage_without_fraction_leaves_low_speed_unset() {
        let root = Record::new("Proj");
        let mut ctx = Context::new(&root, TranslateOptions::default());
        let id = translate_cooling_coil(&mut ctx, &dx(2.0)).unwrap();
        let coil = ctx.model.equipment(id).unwrap().as_cooling_coil().unwrap();
        assert!(coil.low_speed_total_capacity.is_none());
    }

    #[test]
    fn water_coil_without_loop_is_skipped() {
        let root = Record::new("Proj");
        let mut ctx = Context::new(&root, TranslateOptions::default());
        let rec = Record::new("CoilHtg")
            .with_field("Name", "HW Coil")
            .with_field("Type", "HotWater")
            .with_field("FluidSegInRef", "Nowhere");
        assert!(translate_heating_coil(&mut ctx, &rec).is_none());
        assert_eq!(ctx.diags.len(), 1);
    }

    #[test]
    fn furnace_reads_efficiency() {
        let root = Record::new("Proj");
        let mut ctx = Context::new(&root, TranslateOptions::default());
        let rec = Record::new("CoilHtg")
            .with_field("Name", "Furnace")
            .with_field("Type", "Furnace")
            .with_field("FurnThrmlEff", 0.92);
        let id = translate_heating_coil(&mut ctx, &rec).unwrap();
        let coil = ctx.model.equipment(id).unwrap().as_heating_coil().unwrap();
        assert_eq!(coil.efficiency, 0.92);
        assert!(ctx.diags.is_empty());
    }
}
