//! Supply temperature control fields.
//!
//! Air systems read `ClgCtrl`, fluid systems `TempCtrl`. The result is a
//! plan: either one strategy for the supply outlet, or the pair of
//! schedules a dual-setpoint split distributes over the supply equipment.

use hf_controls::{SetpointStrategy, WarmestFlavor};
use hf_core::units::{Temperature, celsius};
use hf_core::{ScheduleId, UnitSystem};
use hf_project::Record;

use crate::context::Context;
use crate::defaults::{ScheduleRole, constant_schedule, resolve_schedule};
use crate::model::{ControlKind, SupplyRole};
use crate::vocab::Vocabulary;

#[derive(Debug, Clone, PartialEq)]
pub enum ControlPlan {
    Single(SetpointStrategy),
    Dual {
        heating: ScheduleId,
        cooling: ScheduleId,
    },
}

/// Outlet temperature used when a fixed setpoint is not given (°C).
pub fn default_supply_temperature(role: SupplyRole) -> f64 {
    match role {
        SupplyRole::Cooling => 12.78,
        SupplyRole::Heating => 35.0,
        SupplyRole::Condenser => 29.4,
    }
}

fn schedule_role(role: SupplyRole) -> ScheduleRole {
    match role {
        SupplyRole::Heating => ScheduleRole::HeatingSupplyTemperature,
        SupplyRole::Cooling | SupplyRole::Condenser => ScheduleRole::SupplyTemperature,
    }
}

/// Read the control method in `field` and its parameters.
///
/// `None` when the field is absent, or when the strategy cannot be built
/// (single-zone reheat without a resolvable control zone).
pub fn translate_control(
    ctx: &mut Context<'_>,
    rec: &Record,
    field: &str,
    role: SupplyRole,
) -> Option<ControlPlan> {
    let text = rec.get_string(field)?;
    let owner = rec.label();
    let kind = ControlKind::parse(text).unwrap_or_else(|| {
        ctx.diags.warn(
            owner,
            format!("unknown {} '{text}' in {field}; using Fixed", ControlKind::FAMILY),
        );
        ControlKind::fallback()
    });

    let plan = match kind {
        ControlKind::Fixed => {
            let given = ctx
                .quantity(rec, "FixedSupTemp", UnitSystem::temperature)
                .or_else(|| ctx.quantity(rec, "ClgFixedSupTemp", UnitSystem::temperature));
            let temperature = given.unwrap_or_else(|| {
                let t = default_supply_temperature(role);
                ctx.diags
                    .warn(owner, format!("missing FixedSupTemp; using {t} °C"));
                celsius(t)
            });
            ControlPlan::Single(SetpointStrategy::Fixed { temperature })
        }
        ControlKind::Scheduled => {
            let name = rec.get_string("SupTempSchRef");
            let schedule = resolve_schedule(ctx, name, schedule_role(role), owner);
            ControlPlan::Single(SetpointStrategy::Scheduled { schedule })
        }
        ControlKind::OutsideAirReset => {
            let (sup_lo, out_lo, sup_hi, out_hi) = match role {
                SupplyRole::Heating => (82.2, -6.7, 65.6, 10.0),
                SupplyRole::Cooling | SupplyRole::Condenser => (15.6, 15.6, 12.8, 26.7),
            };
            ControlPlan::Single(SetpointStrategy::OutdoorReset {
                setpoint_at_outdoor_low: temperature_or(ctx, rec, "RstSupHi", sup_lo),
                setpoint_at_outdoor_high: temperature_or(ctx, rec, "RstSupLo", sup_hi),
                outdoor_low: temperature_or(ctx, rec, "RstOutdrLo", out_lo),
                outdoor_high: temperature_or(ctx, rec, "RstOutdrHi", out_hi),
            })
        }
        ControlKind::WarmestReset | ControlKind::WarmestResetFlowFirst => {
            let flavor = if kind == ControlKind::WarmestReset {
                WarmestFlavor::TemperatureFirst
            } else {
                WarmestFlavor::FlowFirst
            };
            ControlPlan::Single(SetpointStrategy::Warmest {
                flavor,
                minimum: temperature_or(ctx, rec, "SupTempMin", 12.78),
                maximum: temperature_or(ctx, rec, "SupTempMax", 18.3),
            })
        }
        ControlKind::SingleZoneReheat => {
            let zone_name = rec.get_string("CtrlZnRef");
            let Some(control_zone) = zone_name.and_then(|z| ctx.model.zone_by_name(z)) else {
                ctx.diags.error(
                    owner,
                    match zone_name {
                        Some(z) => format!("control zone '{z}' not found; no setpoint manager"),
                        None => "missing CtrlZnRef; no setpoint manager".to_string(),
                    },
                );
                return None;
            };
            ControlPlan::Single(SetpointStrategy::SingleZoneReheat {
                control_zone,
                minimum: temperature_or(ctx, rec, "SupTempMin", 10.0),
                maximum: temperature_or(ctx, rec, "SupTempMax", 50.0),
            })
        }
        ControlKind::FixedDualSetpoint => {
            let cooling = temperature_or(ctx, rec, "ClgFixedSupTemp", 12.78);
            let heating = temperature_or(ctx, rec, "HtgFixedSupTemp", 35.0);
            ControlPlan::Dual {
                heating: constant_schedule(
                    ctx,
                    owner,
                    format!("{owner} Heating Supply Temperature"),
                    hf_core::to_celsius(heating),
                ),
                cooling: constant_schedule(
                    ctx,
                    owner,
                    format!("{owner} Cooling Supply Temperature"),
                    hf_core::to_celsius(cooling),
                ),
            }
        }
        ControlKind::ScheduledDualSetpoint => {
            let cooling = resolve_schedule(
                ctx,
                rec.get_string("ClgSetPtSchRef"),
                ScheduleRole::SupplyTemperature,
                owner,
            );
            let heating = resolve_schedule(
                ctx,
                rec.get_string("HtgSetPtSchRef"),
                ScheduleRole::HeatingSupplyTemperature,
                owner,
            );
            ControlPlan::Dual { heating, cooling }
        }
    };
    Some(plan)
}

/// Temperature field, or `default_c` (°C) with a Warning.
fn temperature_or(ctx: &mut Context<'_>, rec: &Record, field: &str, default_c: f64) -> Temperature {
    ctx.quantity(rec, field, UnitSystem::temperature)
        .unwrap_or_else(|| {
            ctx.diags
                .warn(rec.label(), format!("missing {field}; using {default_c} °C"));
            celsius(default_c)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::TranslateOptions;
    use hf_core::{Tolerances, nearly_equal, to_celsius};

    #[test]
    fn fixed_reads_fahrenheit() {
        let root = Record::new("Proj");
        let mut ctx = Context::new(&root, TranslateOptions::default());
        let rec = Record::new("AirSys")
            .with_field("Name", "AHU")
            .with_field("ClgCtrl", "Fixed")
            .with_field("FixedSupTemp", 55.0);
        let plan = translate_control(&mut ctx, &rec, "ClgCtrl", SupplyRole::Cooling).unwrap();
        let ControlPlan::Single(SetpointStrategy::Fixed { temperature }) = plan else {
            panic!("expected fixed strategy, got {plan:?}");
        };
        assert!(nearly_equal(to_celsius(temperature), 12.777_78, Tolerances::converted()));
        assert!(ctx.diags.is_empty());
    }

    #[test]
    fn missing_field_means_no_plan() {
        let root = Record::new("Proj");
        let mut ctx = Context::new(&root, TranslateOptions::default());
        let rec = Record::new("FluidSys").with_field("Name", "CHW");
        assert!(translate_control(&mut ctx, &rec, "TempCtrl", SupplyRole::Cooling).is_none());
        assert!(ctx.diags.is_empty());
    }

    #[test]
    fn unknown_method_falls_back_to_fixed_default() {
        let root = Record::new("Proj");
        let mut ctx = Context::new(&root, TranslateOptions::default());
        let rec = Record::new("FluidSys")
            .with_field("Name", "CW")
            .with_field("TempCtrl", "Wetbulb");
        let plan = translate_control(&mut ctx, &rec, "TempCtrl", SupplyRole::Condenser).unwrap();
        let ControlPlan::Single(SetpointStrategy::Fixed { temperature }) = plan else {
            panic!("expected fixed strategy");
        };
        assert!(nearly_equal(to_celsius(temperature), 29.4, Tolerances::converted()));
        assert_eq!(ctx.diags.len(), 2);
    }

    #[test]
    fn single_zone_reheat_needs_zone() {
        let root = Record::new("Proj");
        let mut ctx = Context::new(&root, TranslateOptions::default());
        let rec = Record::new("AirSys")
            .with_field("Name", "RTU")
            .with_field("ClgCtrl", "SingleZoneReheat")
            .with_field("CtrlZnRef", "Nowhere");
        assert!(translate_control(&mut ctx, &rec, "ClgCtrl", SupplyRole::Cooling).is_none());
        assert!(ctx.diags.has_errors());
    }

    #[test]
    fn fixed_dual_builds_constant_schedules() {
        let root = Record::new("Proj");
        let mut ctx = Context::new(&root, TranslateOptions::default());
        let rec = Record::new("FluidSys")
            .with_field("Name", "Loop")
            .with_field("TempCtrl", "FixedDualSetpoint")
            .with_field("ClgFixedSupTemp", 55.0)
            .with_field("HtgFixedSupTemp", 95.0);
        let Some(ControlPlan::Dual { heating, cooling }) =
            translate_control(&mut ctx, &rec, "TempCtrl", SupplyRole::Heating)
        else {
            panic!("expected dual plan");
        };
        let h = ctx.model.schedule(heating).unwrap().constant_value().unwrap();
        let c = ctx.model.schedule(cooling).unwrap().constant_value().unwrap();
        assert!(nearly_equal(h, 35.0, Tolerances::converted()));
        assert!(nearly_equal(c, 12.777_78, Tolerances::converted()));
    }
}
