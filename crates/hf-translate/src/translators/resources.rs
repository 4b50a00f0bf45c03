//! Named resources and zones, loaded before any system.

use hf_components::{Curve, CurveForm, Schedule};
use hf_core::ZoneId;

use crate::context::Context;
use crate::model::{Zone, ZoneKind};

/// Register every `Sch`. Temperature schedules (`Units: Temperature`) are
/// converted to °C.
pub fn load_schedules(ctx: &mut Context<'_>) {
    let root = ctx.root;
    for rec in root.get_children("Sch") {
        let Some(name) = rec.name() else { continue };
        let table = rec
            .get_string("Type")
            .is_some_and(|t| t.eq_ignore_ascii_case("table"));
        let schedule = if table {
            Schedule::table(name)
        } else {
            let Some(raw) = rec.get_double("Val") else {
                ctx.diags
                    .warn(name, "constant schedule without Val; not registered");
                continue;
            };
            let temperature = rec
                .get_string("Units")
                .is_some_and(|u| u.eq_ignore_ascii_case("temperature"));
            let value = if temperature {
                match ctx.units().temperature(raw) {
                    Ok(t) => hf_core::to_celsius(t),
                    Err(e) => {
                        ctx.diags.warn(name, format!("unusable Val: {e}"));
                        continue;
                    }
                }
            } else {
                raw
            };
            Schedule::constant(name, value)
        };
        ctx.model.add_schedule(schedule);
    }
}

/// Register every well-formed `Crv`. A curve whose type or coefficient
/// count is wrong is reported and left out, so references to it fall back
/// to the role default.
pub fn load_curves(ctx: &mut Context<'_>) {
    let root = ctx.root;
    for rec in root.get_children("Crv") {
        let Some(name) = rec.name() else { continue };
        let kind = rec.get_string("Type").unwrap_or_default();
        let coefs = rec.get_doubles("Coef");
        let form = match CurveForm::from_coefficients(name, kind, &coefs) {
            Ok(form) => form,
            Err(e) => {
                ctx.diags.warn(name, format!("malformed curve not registered: {e}"));
                continue;
            }
        };
        let bound = |field: &str, fallback: f64| rec.get_double(field).unwrap_or(fallback);
        let two_variable = form.is_two_variable();
        let mut curve = Curve::new(
            name,
            form,
            (bound("MinVar1", f64::NEG_INFINITY), bound("MaxVar1", f64::INFINITY)),
        );
        if two_variable {
            curve = curve.with_y_range((
                bound("MinVar2", f64::NEG_INFINITY),
                bound("MaxVar2", f64::INFINITY),
            ));
        }
        ctx.model.add_curve(curve);
    }
}

/// Register every `ThrmlZn`, then resolve return plenum references.
pub fn load_zones(ctx: &mut Context<'_>) {
    let root = ctx.root;
    for rec in root.get_children("ThrmlZn") {
        let Some(name) = rec.name() else { continue };
        if ctx.model.zone_names.contains(name) {
            continue;
        }
        let id = ZoneId::from_len(ctx.model.zones.len());
        let kind: ZoneKind = ctx.choice(rec, "Type");
        ctx.model.zones.push(Zone {
            id,
            name: name.to_string(),
            kind,
            return_plenum: None,
            zone_system: rec.get_string("ZnSysRef").map(str::to_string),
            inlet_nodes: Vec::new(),
            return_nodes: Vec::new(),
            exhaust_consumers: Vec::new(),
        });
        ctx.model.zone_names.insert_if_absent(name, id);
    }

    for rec in root.get_children("ThrmlZn") {
        let (Some(name), Some(plenum)) = (rec.name(), rec.get_string("RetPlenumZnRef")) else {
            continue;
        };
        let Some(zone) = ctx.model.zone_by_name(name) else { continue };
        match ctx.model.zone_by_name(plenum) {
            Some(p) if ctx.model.zone(p).is_some_and(|z| z.kind == ZoneKind::Plenum) => {
                if let Some(z) = ctx.model.zone_mut(zone) {
                    z.return_plenum = Some(p);
                }
            }
            Some(_) => ctx.diags.warn(
                name,
                format!("return plenum '{plenum}' is not a plenum zone; returning directly"),
            ),
            None => ctx.diags.error(
                name,
                format!("return plenum zone '{plenum}' not found; returning directly"),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;
    use crate::options::TranslateOptions;
    use hf_project::Record;

    #[test]
    fn temperature_schedule_converted() {
        let root = Record::new("Proj").with_child(
            Record::new("Sch")
                .with_field("Name", "SAT")
                .with_field("Type", "Constant")
                .with_field("Val", 212.0)
                .with_field("Units", "Temperature"),
        );
        let mut ctx = Context::new(&root, TranslateOptions::default());
        load_schedules(&mut ctx);
        let id = ctx.model.schedule_names.get("SAT").unwrap();
        let v = ctx.model.schedule(id).unwrap().constant_value().unwrap();
        assert!((v - 100.0).abs() < 1e-9);
    }

    #[test]
    fn malformed_curve_is_skipped() {
        let root = Record::new("Proj")
            .with_child(
                Record::new("Crv")
                    .with_field("Name", "Bad")
                    .with_field("Type", "Quadratic")
                    .with_field("Coef", vec![1.0, 2.0]),
            )
            .with_child(
                Record::new("Crv")
                    .with_field("Name", "PLF")
                    .with_field("Type", "Quadratic")
                    .with_field("Coef", vec![0.85, 0.15, 0.0])
                    .with_field("MinVar1", 0.0)
                    .with_field("MaxVar1", 1.0),
            );
        let mut ctx = Context::new(&root, TranslateOptions::default());
        load_curves(&mut ctx);
        assert!(!ctx.model.curve_names.contains("Bad"));
        let plf = ctx.model.curve(ctx.model.curve_names.get("PLF").unwrap()).unwrap();
        assert_eq!(plf.x_range, (0.0, 1.0));
        assert_eq!(ctx.diags.about(Severity::Warning, "Bad").count(), 1);
    }

    #[test]
    fn zones_resolve_return_plenum() {
        let root = Record::new("Proj")
            .with_child(
                Record::new("ThrmlZn")
                    .with_field("Name", "Office")
                    .with_field("RetPlenumZnRef", "Ceiling"),
            )
            .with_child(
                Record::new("ThrmlZn")
                    .with_field("Name", "Ceiling")
                    .with_field("Type", "Plenum"),
            )
            .with_child(
                Record::new("ThrmlZn")
                    .with_field("Name", "Lobby")
                    .with_field("RetPlenumZnRef", "Attic"),
            );
        let mut ctx = Context::new(&root, TranslateOptions::default());
        load_zones(&mut ctx);
        let office = ctx.model.zone_by_name("Office").unwrap();
        let ceiling = ctx.model.zone_by_name("Ceiling").unwrap();
        assert_eq!(ctx.model.zone(office).unwrap().return_plenum, Some(ceiling));
        assert_eq!(ctx.diags.about(Severity::Error, "Lobby").count(), 1);
    }
}
