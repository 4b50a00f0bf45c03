//! Plant supply equipment records.
//!
//! Two-stream equipment reaches a second loop by fluid segment reference:
//! a water-cooled chiller's condenser (`CndsrFluidSegInRef`), a heat
//! exchanger's demand side (`DmdFluidSegInRef`) and a storage tank's
//! charging side (`SrcFluidSegInRef`) all land on that loop's demand side.

use hf_components::{
    Autosizable, Boiler, Chiller, CondenserKind, CoolingTower, CoolingTowerKind, Equipment,
    FuelKind, HeatExchanger, StorageTankKind, ThermalStorageTank, WaterHeater,
};
use hf_core::{EquipId, UnitSystem};
use hf_project::Record;

use crate::assembler;
use crate::context::Context;
use crate::defaults::{CurveRole, resolve_curve};

/// Record tags that translate to supply-side plant equipment.
pub const SUPPLY_TAGS: [&str; 6] = ["Chlr", "Blr", "HtRej", "HX", "WtrHtr", "ThrmlEngyStorTank"];

pub fn translate_supply_equipment(ctx: &mut Context<'_>, rec: &Record) -> Option<EquipId> {
    let id = match rec.tag.as_str() {
        "Chlr" => translate_chiller(ctx, rec),
        "Blr" => translate_boiler(ctx, rec),
        "HtRej" => translate_cooling_tower(ctx, rec),
        "HX" => translate_heat_exchanger(ctx, rec),
        "WtrHtr" => translate_water_heater(ctx, rec),
        "ThrmlEngyStorTank" => translate_storage_tank(ctx, rec),
        _ => return None,
    };
    Some(id)
}

fn translate_chiller(ctx: &mut Context<'_>, rec: &Record) -> EquipId {
    let name = rec.label().to_string();
    let condenser: CondenserKind = ctx.choice(rec, "CndsrType");
    let mut chiller = Chiller::new(name.clone(), condenser);
    chiller.capacity = ctx.sized(rec, "CapRtd", UnitSystem::capacity);
    if let Some(cop) = ctx.positive(rec, "COP") {
        chiller.cop = cop;
    }
    chiller.cap_ft = Some(resolve_curve(
        ctx,
        rec.get_string("CapFTempCrvRef"),
        CurveRole::ChillerCapFT,
        &name,
    ));
    chiller.eir_ft = Some(resolve_curve(
        ctx,
        rec.get_string("EIRFTempCrvRef"),
        CurveRole::ChillerEirFT,
        &name,
    ));
    chiller.eir_fplr = Some(resolve_curve(
        ctx,
        rec.get_string("EIRFPLRCrvRef"),
        CurveRole::ChillerEirFPlr,
        &name,
    ));

    let id = ctx.model.add_equipment(Equipment::Chiller(chiller));
    if condenser == CondenserKind::WaterCooled {
        attach_secondary(ctx, rec, "CndsrFluidSegInRef", id, &name);
    }
    id
}

fn translate_boiler(ctx: &mut Context<'_>, rec: &Record) -> EquipId {
    let name = rec.label().to_string();
    let mut boiler = Boiler::new(name.clone());
    boiler.capacity = ctx.sized(rec, "CapRtd", UnitSystem::capacity);
    if let Some(eff) = ctx.fraction(rec, "ThrmlEff") {
        boiler.thermal_efficiency = eff;
    }
    boiler.fuel = ctx.choice::<FuelKind>(rec, "FuelSrc");
    boiler.efficiency_curve = Some(resolve_curve(
        ctx,
        rec.get_string("EffFPLRCrvRef"),
        CurveRole::BoilerEffFPlr,
        &name,
    ));
    ctx.model.add_equipment(Equipment::Boiler(boiler))
}

fn translate_cooling_tower(ctx: &mut Context<'_>, rec: &Record) -> EquipId {
    let kind: CoolingTowerKind = ctx.discriminator(rec, "Type");
    let mut tower = CoolingTower::new(rec.label(), kind);
    tower.capacity = ctx.sized(rec, "CapRtd", UnitSystem::capacity);
    tower.fan_power = ctx.sized(rec, "FanPwr", UnitSystem::electric_power);
    ctx.model.add_equipment(Equipment::CoolingTower(tower))
}

fn translate_heat_exchanger(ctx: &mut Context<'_>, rec: &Record) -> EquipId {
    let name = rec.label().to_string();
    let mut hx = HeatExchanger::new(name.clone());
    if !ctx.options.autosize
        && let Some(ua) = ctx.positive(rec, "UA")
    {
        hx.ua = Autosizable::Value(ua);
    }
    let id = ctx.model.add_equipment(Equipment::HeatExchanger(hx));
    attach_secondary(ctx, rec, "DmdFluidSegInRef", id, &name);
    id
}

fn translate_water_heater(ctx: &mut Context<'_>, rec: &Record) -> EquipId {
    let mut heater = WaterHeater::new(rec.label());
    heater.capacity = ctx.sized(rec, "CapRtd", UnitSystem::capacity);
    heater.tank_volume = ctx.sized(rec, "StorVol", UnitSystem::storage_volume);
    heater.fuel = ctx.choice::<FuelKind>(rec, "FuelSrc");
    ctx.model.add_equipment(Equipment::WaterHeater(heater))
}

fn translate_storage_tank(ctx: &mut Context<'_>, rec: &Record) -> EquipId {
    let name = rec.label().to_string();
    let kind: StorageTankKind = ctx.choice(rec, "Type");
    let mut tank = ThermalStorageTank::new(name.clone(), kind);
    tank.volume = ctx.sized(rec, "StorVol", UnitSystem::storage_volume);
    let id = ctx.model.add_equipment(Equipment::ThermalStorageTank(tank));
    attach_secondary(ctx, rec, "SrcFluidSegInRef", id, &name);
    id
}

/// Put the secondary side of `equipment` on the loop named by `field`. An
/// unresolved reference leaves that side unconnected.
fn attach_secondary(ctx: &mut Context<'_>, rec: &Record, field: &str, equipment: EquipId, owner: &str) {
    match assembler::resolve_segment(ctx, rec.get_string(field)) {
        Some(target) => assembler::attach_demand(ctx, target, equipment, owner),
        None => ctx.diags.warn(
            owner,
            format!("{field} does not name a fluid segment; secondary side left unconnected"),
        ),
    }
}
