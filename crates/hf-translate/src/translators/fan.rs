//! Fan records.

use hf_components::{Equipment, Fan, FanKind, FanPosition};
use hf_core::{CurveId, EquipId, UnitSystem};
use hf_project::Record;

use crate::context::Context;
use crate::defaults::{CurveRole, ScheduleRole, resolve_curve, resolve_schedule};
use crate::vocab::{MotorPosition, Vocabulary};

/// Position declared on a fan record, read without diagnostics; the fan
/// translator reports unknown values.
pub fn declared_position(rec: &Record) -> FanPosition {
    rec.get_string("Pos")
        .and_then(FanPosition::parse)
        .unwrap_or_else(FanPosition::fallback)
}

pub fn translate_fan(ctx: &mut Context<'_>, rec: &Record) -> EquipId {
    let name = rec.label().to_string();
    let kind: FanKind = ctx.discriminator(rec, "CtrlMthd");
    let position: FanPosition = ctx.choice(rec, "Pos");
    let motor: MotorPosition = ctx.choice(rec, "MotorPos");

    let mut fan = Fan::new(name.clone(), kind)
        .with_position(position)
        .with_max_flow(ctx.sized(rec, "FlowCap", UnitSystem::air_flow));
    if let Some(rise) = ctx.quantity(rec, "TotStaticPress", UnitSystem::static_pressure) {
        fan = fan.with_pressure_rise(rise);
    }
    if let Some(eff) = ctx.fraction(rec, "FlowEff") {
        fan.total_efficiency = eff;
    }
    if let Some(eff) = ctx.fraction(rec, "MotorEff") {
        fan.motor_efficiency = eff;
    }
    fan.motor_in_airstream_fraction = motor.airstream_fraction();

    if kind == FanKind::VariableVolume {
        let curve = rec.get_string("PwrCrvRef");
        let base = resolve_curve(ctx, curve, CurveRole::FanVariablePower, &name);
        fan.power_curve = Some(override_power_curve(ctx, rec, base, &name));
    }
    if let Some(sched) = rec.get_string("AvailSchRef") {
        fan.availability = Some(resolve_schedule(ctx, Some(sched), ScheduleRole::AlwaysOn, &name));
    }

    tracing::debug!(fan = %name, ?kind, ?position, "translated fan");
    ctx.model.add_equipment(Equipment::Fan(fan))
}

/// `PwrCoef` replaces the coefficients of the resolved power curve. The
/// result is registered as a new curve; the base curve stays shared.
fn override_power_curve(ctx: &mut Context<'_>, rec: &Record, base: CurveId, name: &str) -> CurveId {
    let coefs = rec.get_doubles("PwrCoef");
    if coefs.is_empty() {
        return base;
    }
    let Some(curve) = ctx.model.curve(base) else {
        return base;
    };
    match curve.overridden(format!("{name} Power Curve"), &coefs) {
        Ok(tuned) => ctx.model.add_curve(tuned),
        Err(e) => {
            ctx.diags.warn(name, format!("ignoring PwrCoef: {e}"));
            base
        }
    }
}
