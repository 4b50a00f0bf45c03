//! Zone-equipment binding.
//!
//! Runs once every system exists. Each queued attachment is resolved to its
//! zone, induced-air references are wired, and every zone's equipment gets
//! unique cooling and heating priorities.

use std::collections::{BTreeMap, BTreeSet};

use hf_components::{Equipment, InducedAirSource};
use hf_core::{EquipId, ZoneId};
use hf_project::Record;

use crate::context::{Context, PendingBinding};
use crate::model::{ZoneEquipmentBinding, ZoneKind};

/// Assign unique positive priorities.
///
/// Explicit values are taken first, in encounter order. A repeated or zero
/// explicit value degrades to implicit; implicit items then take the
/// smallest unused value in encounter order. Returns the assigned values and
/// the indices of degraded items.
pub fn assign_priorities(explicit: &[Option<u32>]) -> (Vec<u32>, Vec<usize>) {
    let mut used = BTreeSet::new();
    let mut assigned = vec![0; explicit.len()];
    let mut degraded = Vec::new();
    let mut implicit = Vec::new();

    for (i, priority) in explicit.iter().enumerate() {
        match *priority {
            Some(v) if v > 0 && used.insert(v) => assigned[i] = v,
            Some(_) => {
                degraded.push(i);
                implicit.push(i);
            }
            None => implicit.push(i),
        }
    }

    let mut next = 1;
    for i in implicit {
        while used.contains(&next) {
            next += 1;
        }
        used.insert(next);
        assigned[i] = next;
    }
    (assigned, degraded)
}

/// Resolve every queued attachment and write the zone bindings.
pub fn bind_zone_equipment(ctx: &mut Context<'_>) {
    let root = ctx.root;
    let pending = std::mem::take(&mut ctx.pending);
    let mut per_zone: BTreeMap<ZoneId, Vec<&PendingBinding>> = BTreeMap::new();

    for item in &pending {
        let subject = ctx.model.equipment_name(item.equipment).to_string();
        let Some(zone_name) = item.zone_name.as_deref() else {
            ctx.diags
                .error(subject, "missing ZnServedRef; not attached to a zone");
            continue;
        };
        let Some(zone) = ctx.model.zone_by_name(zone_name) else {
            ctx.diags.error(
                subject,
                format!("zone '{zone_name}' not found; not attached"),
            );
            continue;
        };
        if let Some(induced) = item.induced_air_zone.as_deref() {
            bind_induced_air(ctx, item.equipment, &subject, induced);
        }
        per_zone.entry(zone).or_default().push(item);
    }

    for (zone, items) in per_zone {
        let zone_name = ctx.model.zone(zone).map_or("", |z| z.name.as_str()).to_string();
        let zone_rec = root.find_child("ThrmlZn", &zone_name);
        let explicit: Vec<(Option<u32>, Option<u32>)> = items
            .iter()
            .map(|item| explicit_priorities(zone_rec, &item.aliases))
            .collect();

        let cooling: Vec<Option<u32>> = explicit.iter().map(|p| p.0).collect();
        let heating: Vec<Option<u32>> = explicit.iter().map(|p| p.1).collect();
        let (clg, clg_degraded) = assign_priorities(&cooling);
        let (htg, htg_degraded) = assign_priorities(&heating);

        for (category, degraded, requested, assigned) in [
            ("cooling", &clg_degraded, &cooling, &clg),
            ("heating", &htg_degraded, &heating, &htg),
        ] {
            for &i in degraded {
                let subject = ctx.model.equipment_name(items[i].equipment).to_string();
                let wanted = requested[i].unwrap_or_default();
                ctx.diags.warn(
                    subject,
                    format!(
                        "{category} priority {wanted} unusable in zone '{zone_name}'; using {}",
                        assigned[i]
                    ),
                );
            }
        }

        for (i, item) in items.iter().enumerate() {
            ctx.model.bindings.push(ZoneEquipmentBinding {
                zone,
                equipment: item.equipment,
                cooling_priority: clg[i],
                heating_priority: htg[i],
            });
        }
        tracing::debug!(zone = %zone_name, equipment = items.len(), "bound zone equipment");
    }
}

/// `ZnEqpPriority` values for the first alias the zone record names.
fn explicit_priorities(zone: Option<&Record>, aliases: &[String]) -> (Option<u32>, Option<u32>) {
    let Some(zone) = zone else {
        return (None, None);
    };
    let entry = aliases.iter().find_map(|alias| {
        zone.get_children("ZnEqpPriority")
            .find(|p| p.get_string("EqpRef") == Some(alias.as_str()))
    });
    let Some(entry) = entry else {
        return (None, None);
    };
    let read = |field: &str| {
        entry
            .get_double(field)
            .map(|v| if v >= 1.0 { v.round() as u32 } else { 0 })
    };
    (read("ClgPriority"), read("HtgPriority"))
}

/// A plenum zone becomes the terminal's induced-air source; any other zone
/// gains the terminal as an exhaust consumer.
fn bind_induced_air(ctx: &mut Context<'_>, terminal: EquipId, subject: &str, zone_name: &str) {
    let Some(source_zone) = ctx.model.zone_by_name(zone_name) else {
        ctx.diags.error(
            subject,
            format!("induced-air zone '{zone_name}' not found; induced air left unset"),
        );
        return;
    };
    let is_plenum = ctx
        .model
        .zone(source_zone)
        .is_some_and(|z| z.kind == ZoneKind::Plenum);
    let source = if is_plenum {
        InducedAirSource::Plenum(source_zone)
    } else {
        if let Some(z) = ctx.model.zone_mut(source_zone) {
            z.exhaust_consumers.push(terminal);
        }
        InducedAirSource::Zone(source_zone)
    };
    if let Some(Equipment::AirTerminal(t)) = ctx.model.equipment_mut(terminal) {
        t.induced_air = Some(source);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;
    use crate::options::TranslateOptions;
    use crate::translators::{resources, terminal};
    use proptest::prelude::*;

    #[test]
    fn explicit_first_then_next_unused() {
        let (assigned, degraded) = assign_priorities(&[None, Some(1), Some(1), None, Some(3)]);
        assert_eq!(assigned, vec![2, 1, 4, 5, 3]);
        assert_eq!(degraded, vec![2]);
    }

    #[test]
    fn zero_is_not_a_priority() {
        let (assigned, degraded) = assign_priorities(&[Some(0)]);
        assert_eq!(assigned, vec![1]);
        assert_eq!(degraded, vec![0]);
    }

    proptest! {
        #[test]
        fn priorities_are_unique_and_positive(
            explicit in prop::collection::vec(prop::option::of(0u32..6), 0..12)
        ) {
            let (assigned, degraded) = assign_priorities(&explicit);
            prop_assert_eq!(assigned.len(), explicit.len());
            let unique: BTreeSet<u32> = assigned.iter().copied().collect();
            prop_assert_eq!(unique.len(), assigned.len());
            prop_assert!(assigned.iter().all(|&p| p > 0));
            for (i, p) in explicit.iter().enumerate() {
                if let Some(v) = p && !degraded.contains(&i) {
                    prop_assert_eq!(assigned[i], *v);
                }
            }
        }
    }

    fn terminal_rec(name: &str, zone: &str) -> Record {
        Record::new("TrmlUnit")
            .with_field("Name", name)
            .with_field("Type", "Uncontrolled")
            .with_field("ZnServedRef", zone)
    }

    #[test]
    fn zone_priorities_follow_the_zone_record() {
        let root = Record::new("Proj").with_child(
            Record::new("ThrmlZn")
                .with_field("Name", "Office")
                .with_child(
                    Record::new("ZnEqpPriority")
                        .with_field("EqpRef", "B")
                        .with_field("ClgPriority", 1.0)
                        .with_field("HtgPriority", 2.0),
                ),
        );
        let mut ctx = Context::new(&root, TranslateOptions::default());
        resources::load_zones(&mut ctx);
        let a = terminal::translate_terminal(&mut ctx, &terminal_rec("A", "Office"));
        let b = terminal::translate_terminal(&mut ctx, &terminal_rec("B", "Office"));
        bind_zone_equipment(&mut ctx);

        let office = ctx.model.zone_by_name("Office").unwrap();
        let bindings: Vec<_> = ctx.model.bindings_for(office).collect();
        assert_eq!(bindings.len(), 2);
        assert_eq!((bindings[0].equipment, bindings[0].cooling_priority), (a, 2));
        assert_eq!((bindings[0].heating_priority, bindings[1].heating_priority), (1, 2));
        assert_eq!((bindings[1].equipment, bindings[1].cooling_priority), (b, 1));
        assert!(ctx.diags.is_empty());
    }

    #[test]
    fn unknown_zone_skips_attachment() {
        let root = Record::new("Proj");
        let mut ctx = Context::new(&root, TranslateOptions::default());
        terminal::translate_terminal(&mut ctx, &terminal_rec("Lost", "Nowhere"));
        bind_zone_equipment(&mut ctx);
        assert!(ctx.model.bindings.is_empty());
        assert_eq!(ctx.diags.about(Severity::Error, "Lost").count(), 1);
    }

    #[test]
    fn induced_air_from_plenum_and_zone() {
        let root = Record::new("Proj")
            .with_child(Record::new("ThrmlZn").with_field("Name", "Office"))
            .with_child(Record::new("ThrmlZn").with_field("Name", "Lab"))
            .with_child(
                Record::new("ThrmlZn")
                    .with_field("Name", "Ceiling")
                    .with_field("Type", "Plenum"),
            );
        let piu = |name: &str, induced: &str| {
            Record::new("TrmlUnit")
                .with_field("Name", name)
                .with_field("Type", "ParallelFanBox")
                .with_field("ZnServedRef", "Office")
                .with_field("InducedAirZnRef", induced)
        };
        let mut ctx = Context::new(&root, TranslateOptions::default());
        resources::load_zones(&mut ctx);
        let from_plenum = terminal::translate_terminal(&mut ctx, &piu("P1", "Ceiling"));
        let from_zone = terminal::translate_terminal(&mut ctx, &piu("P2", "Lab"));
        bind_zone_equipment(&mut ctx);

        let ceiling = ctx.model.zone_by_name("Ceiling").unwrap();
        let lab = ctx.model.zone_by_name("Lab").unwrap();
        let induced = |id| {
            ctx.model
                .equipment(id)
                .and_then(Equipment::as_terminal)
                .and_then(|t| t.induced_air)
        };
        assert_eq!(induced(from_plenum), Some(InducedAirSource::Plenum(ceiling)));
        assert_eq!(induced(from_zone), Some(InducedAirSource::Zone(lab)));
        assert_eq!(ctx.model.zone(lab).unwrap().exhaust_consumers, vec![from_zone]);
    }
}
