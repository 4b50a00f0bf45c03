//! Zone HVAC units (`ZnSys`).
//!
//! One `ZnSys` record may serve many zones; each serving zone gets its own
//! copy of the unit and its sub-equipment, named after the zone.

use hf_components::{Equipment, ZoneHvacKind, ZoneHvacUnit};
use hf_core::EquipId;
use hf_project::Record;

use crate::assembler;
use crate::context::{Context, PendingBinding};
use crate::defaults::{default_cooling_coil, default_fan, default_heating_coil};
use crate::translators::{coil, fan};

pub fn translate_zone_unit(ctx: &mut Context<'_>, rec: &Record, zone: &str) -> EquipId {
    let base = rec.label();
    let name = format!("{base} {zone}");
    let kind: ZoneHvacKind = ctx.discriminator(rec, "Type");
    let mut unit = ZoneHvacUnit::new(name.clone(), kind);

    let local = |tag: &str| {
        rec.get_child(tag)
            .map(|c| c.clone().with_field("Name", format!("{} {zone}", c.label())))
    };
    if kind.has_fan() {
        let fan = local("Fan").map(|f| fan::translate_fan(ctx, &f));
        unit.fan = Some(fan.unwrap_or_else(|| default_fan(ctx, &name)));
    }
    if kind.has_cooling_coil() {
        let coil = local("CoilClg").and_then(|c| coil::translate_cooling_coil(ctx, &c));
        unit.cooling_coil = Some(coil.unwrap_or_else(|| default_cooling_coil(ctx, &name)));
    }
    if kind.has_heating_coil() {
        let coil = local("CoilHtg").and_then(|c| coil::translate_heating_coil(ctx, &c));
        unit.heating_coil = Some(coil.unwrap_or_else(|| default_heating_coil(ctx, &name)));
    }

    let id = ctx.model.add_equipment(Equipment::ZoneHvacUnit(unit));
    if kind == ZoneHvacKind::BaseboardWater {
        match assembler::resolve_segment(ctx, rec.get_string("FluidSegInRef")) {
            Some(target) => assembler::attach_demand(ctx, target, id, &name),
            None => ctx.diags.warn(
                &name,
                "FluidSegInRef does not name a fluid segment; water side left unconnected",
            ),
        }
    }

    ctx.pending.push(PendingBinding {
        zone_name: Some(zone.to_string()),
        equipment: id,
        aliases: vec![name, base.to_string()],
        induced_air_zone: None,
    });
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;
    use crate::options::TranslateOptions;
    use hf_components::HvacComponent;

    fn ptac() -> Record {
        Record::new("ZnSys")
            .with_field("Name", "PTAC")
            .with_field("Type", "PTAC")
            .with_child(
                Record::new("Fan")
                    .with_field("Name", "PTAC Fan")
                    .with_field("CtrlMthd", "OnOff"),
            )
            .with_child(
                Record::new("CoilClg")
                    .with_field("Name", "PTAC DX")
                    .with_field("Type", "DirectExpansion"),
            )
    }

    #[test]
    fn clones_are_named_per_zone() {
        let root = Record::new("Proj");
        let mut ctx = Context::new(&root, TranslateOptions::default());
        let a = translate_zone_unit(&mut ctx, &ptac(), "Zone A");
        let b = translate_zone_unit(&mut ctx, &ptac(), "Zone B");
        assert_eq!(ctx.model.equipment_name(a), "PTAC Zone A");
        assert_eq!(ctx.model.equipment_name(b), "PTAC Zone B");
        let unit = ctx.model.equipment(a).unwrap().as_zone_unit().unwrap();
        assert_eq!(ctx.model.equipment_name(unit.fan.unwrap()), "PTAC Fan Zone A");
        assert_eq!(ctx.pending[1].aliases, vec!["PTAC Zone B".to_string(), "PTAC".to_string()]);
    }

    #[test]
    fn missing_heating_coil_warns_once_per_unit() {
        let root = Record::new("Proj");
        let mut ctx = Context::new(&root, TranslateOptions::default());
        let id = translate_zone_unit(&mut ctx, &ptac(), "Zone A");
        let unit = ctx.model.equipment(id).unwrap().as_zone_unit().unwrap();
        let coil = ctx.model.equipment(unit.heating_coil.unwrap()).unwrap();
        assert_eq!(coil.class_name(), "CoilHeatingElectric");
        assert_eq!(ctx.diags.about(Severity::Warning, "PTAC Zone A").count(), 1);
    }
}
