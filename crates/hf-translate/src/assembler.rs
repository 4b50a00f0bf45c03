//! Plant loop assembly.
//!
//! A loop is built as a fixed skeleton (supply and demand splitter/mixer
//! pairs, each with a bypass pipe branch) that supply equipment, loop pumps
//! and demand equipment are spliced into. Loops are resolved by fluid
//! segment name: the first reference translates the whole fluid system,
//! later references return the same loop.

use hf_components::{ConnectorFlavor, Equipment, Mixer, Pipe, Splitter};
use hf_controls::Placement;
use hf_core::{EquipId, LoopId, NodeId};
use hf_graph::{GraphError, GraphResult, PortKind, Side};
use hf_project::Record;

use crate::context::Context;
use crate::model::{
    Branch, CommonPipeSimulation, FluidSegmentKind, FluidSystemKind, LoopSide, Model, PlantLoop,
};
use crate::placer;
use crate::translators::{plant, pump};

/// Where equipment referencing a fluid segment attaches.
#[derive(Debug, Clone, Copy)]
pub struct LoopTarget<'a> {
    pub loop_id: LoopId,
    /// Pump stamped onto every demand branch attached through the segment.
    pub branch_pump: Option<&'a Record>,
}

/// Resolve a fluid segment name to its loop, translating the owning fluid
/// system on first use. `None` when the name is absent or unknown.
pub fn resolve_segment<'a>(ctx: &mut Context<'a>, seg_ref: Option<&str>) -> Option<LoopTarget<'a>> {
    let entry = *ctx.segments.get(seg_ref?)?;
    let loop_id = resolve_loop(ctx, entry.system)?;
    let kind = ctx.model.plant_loop(loop_id)?.kind;
    let branch_pump = match entry.kind {
        FluidSegmentKind::SecondarySupply if kind != FluidSystemKind::ServiceHotWater => {
            entry.segment.get_child("Pump")
        }
        _ => None,
    };
    Some(LoopTarget {
        loop_id,
        branch_pump,
    })
}

/// Look up a fluid system's loop by name, translating it if needed.
///
/// A loop that is still being translated (a reference cycle) is returned
/// as is, with a Warning.
pub fn resolve_loop<'a>(ctx: &mut Context<'a>, system: &'a Record) -> Option<LoopId> {
    let name = system.label();
    if let Some(id) = ctx.model.loop_by_name(name) {
        if ctx.systems_in_progress.contains(name) {
            ctx.diags.warn(
                name,
                "loop referenced while still being translated; using the partial loop",
            );
        }
        return Some(id);
    }
    translate_fluid_system(ctx, system)
}

/// Build a plant loop from a `FluidSys` record.
pub fn translate_fluid_system<'a>(ctx: &mut Context<'a>, system: &'a Record) -> Option<LoopId> {
    let name = system.label().to_string();
    let kind: FluidSystemKind = ctx.discriminator(system, "Type");
    let _span = tracing::info_span!("fluid_system", name = %name).entered();

    let loop_id = match create_loop(&mut ctx.model, &name, kind) {
        Ok(id) => id,
        Err(e) => {
            ctx.diags.error(&name, format!("cannot build loop skeleton: {e}"));
            return None;
        }
    };
    ctx.systems_in_progress.insert(name.clone());

    for segment in system.get_children("FluidSeg") {
        let seg_kind: FluidSegmentKind = ctx.discriminator(segment, "Type");
        match seg_kind {
            FluidSegmentKind::PrimarySupply => translate_primary_supply(ctx, loop_id, segment),
            FluidSegmentKind::SecondarySupply => {
                if kind == FluidSystemKind::ServiceHotWater
                    && let Some(rec) = segment.get_child("Pump")
                {
                    set_demand_pump(ctx, loop_id, rec);
                }
            }
            FluidSegmentKind::PrimaryReturn | FluidSegmentKind::SecondaryReturn => {}
        }
    }

    placer::place_plant_overlay(ctx, loop_id, system);
    ctx.systems_in_progress.remove(&name);
    tracing::info!(fluid_system = %name, ?kind, "translated fluid system");
    Some(loop_id)
}

fn translate_primary_supply(ctx: &mut Context<'_>, loop_id: LoopId, segment: &Record) {
    for child in &segment.children {
        match child.tag.as_str() {
            "Pump" => set_loop_pump(ctx, loop_id, child),
            tag if plant::SUPPLY_TAGS.contains(&tag) => {
                let Some(equipment) = plant::translate_supply_equipment(ctx, child) else {
                    continue;
                };
                let branch_pump = child
                    .get_child("Pump")
                    .map(|rec| pump::translate_pump(ctx, rec, None));
                add_supply_branch(ctx, loop_id, equipment, branch_pump);
            }
            other => ctx.diags.warn(
                segment.label(),
                format!("ignoring unsupported '{other}' record in supply segment"),
            ),
        }
    }
}

fn create_loop(model: &mut Model, name: &str, kind: FluidSystemKind) -> GraphResult<LoopId> {
    let id = LoopId::from_len(model.plant_loops.len());
    let supply_inlet = model.graph.add_node(format!("{name} Supply Inlet Node"));
    let supply_outlet = model.graph.add_node(format!("{name} Supply Outlet Node"));
    let demand_inlet = model.graph.add_node(format!("{name} Demand Inlet Node"));
    let demand_outlet = model.graph.add_node(format!("{name} Demand Outlet Node"));

    let connector = |model: &mut Model, label: &str| {
        let splitter = model.add_equipment(Equipment::Splitter(Splitter::new(
            format!("{name} {label} Splitter"),
            ConnectorFlavor::Plant,
        )));
        let mixer = model.add_equipment(Equipment::Mixer(Mixer::new(
            format!("{name} {label} Mixer"),
            ConnectorFlavor::Plant,
        )));
        (splitter, mixer)
    };
    let (supply_splitter, supply_mixer) = connector(model, "Supply");
    let (demand_splitter, demand_mixer) = connector(model, "Demand");
    frame(model, supply_splitter, supply_mixer, supply_inlet, supply_outlet)?;
    frame(model, demand_splitter, demand_mixer, demand_inlet, demand_outlet)?;

    let bypass = |model: &mut Model, label: &str, splitter, mixer, side| {
        let pipe = model.add_equipment(Equipment::Pipe(Pipe::new(format!("{name} {label} Bypass"))));
        let _ = model.assign_to_loop(pipe, Side::Primary, id, side);
        thread_branch(model, splitter, mixer, &format!("{name} {label} Bypass"), &[(pipe, Side::Primary)])
    };
    let supply_bypass = bypass(model, "Supply", supply_splitter, supply_mixer, LoopSide::Supply)?;
    let demand_bypass = bypass(model, "Demand", demand_splitter, demand_mixer, LoopSide::Demand)?;

    model.plant_loops.push(PlantLoop {
        id,
        name: name.to_string(),
        kind,
        supply_inlet,
        supply_outlet,
        demand_inlet,
        demand_outlet,
        supply_splitter,
        supply_mixer,
        demand_splitter,
        demand_mixer,
        loop_pump: None,
        demand_pump: None,
        supply_branches: Vec::new(),
        demand_branches: Vec::new(),
        supply_bypass,
        demand_bypass,
        common_pipe: CommonPipeSimulation::None,
        placement: Placement::new(),
    });
    model.loop_names.insert_if_absent(name, id);
    Ok(id)
}

/// Attach a splitter inlet and mixer outlet to a side's boundary nodes.
fn frame(
    model: &mut Model,
    splitter: EquipId,
    mixer: EquipId,
    inlet: NodeId,
    outlet: NodeId,
) -> GraphResult<()> {
    let graph = &mut model.graph;
    let port = graph
        .find_port(splitter, PortKind::Inlet, Side::Primary)
        .ok_or(GraphError::MissingPort {
            comp: splitter,
            what: "inlet",
        })?;
    graph.connect(port, inlet)?;
    let port = graph
        .find_port(mixer, PortKind::Outlet, Side::Primary)
        .ok_or(GraphError::MissingPort {
            comp: mixer,
            what: "outlet",
        })?;
    graph.connect(port, outlet)
}

/// Open a new splitter outlet and mixer inlet and thread `chain` between them.
fn thread_branch(
    model: &mut Model,
    splitter: EquipId,
    mixer: EquipId,
    label: &str,
    chain: &[(EquipId, Side)],
) -> GraphResult<Branch> {
    let graph = &mut model.graph;
    let split_port = graph.add_port(splitter, PortKind::Outlet)?;
    let mix_port = graph.add_port(mixer, PortKind::Inlet)?;
    let inlet = graph.add_node(format!("{label} Inlet Node"));
    let outlet = graph.add_node(format!("{label} Outlet Node"));
    graph.connect(split_port, inlet)?;
    graph.connect(mix_port, outlet)?;

    let mut node = inlet;
    for (i, &(comp, side)) in chain.iter().enumerate() {
        let next = if i + 1 == chain.len() {
            outlet
        } else {
            let name = graph.component(comp).map_or("", |c| c.name.as_str());
            let name = format!("{name} Outlet Node");
            graph.add_node(name)
        };
        graph.connect_straight(comp, side, node, next)?;
        node = next;
    }
    Ok(Branch {
        equipment: chain.to_vec(),
        inlet,
        outlet,
    })
}

/// Add supply equipment on its own branch, optionally behind a branch pump.
///
/// Refused with an Error once the loop's dual-setpoint split is placed.
pub fn add_supply_branch(
    ctx: &mut Context<'_>,
    loop_id: LoopId,
    equipment: EquipId,
    branch_pump: Option<EquipId>,
) -> bool {
    let Some(lp) = ctx.model.plant_loop(loop_id) else {
        return false;
    };
    if let Err(e) = lp.placement.check_supply_insert() {
        let message = format!(
            "cannot add '{}' to loop '{}': {e}",
            ctx.model.equipment_name(equipment),
            lp.name
        );
        ctx.diags.error(lp.name.clone(), message);
        return false;
    }
    add_branch(ctx, loop_id, LoopSide::Supply, equipment, Side::Primary, branch_pump)
}

/// Add demand equipment (on `side`) on its own branch.
pub fn add_demand_branch(
    ctx: &mut Context<'_>,
    loop_id: LoopId,
    equipment: EquipId,
    side: Side,
    branch_pump: Option<EquipId>,
) -> bool {
    add_branch(ctx, loop_id, LoopSide::Demand, equipment, side, branch_pump)
}

/// Put the secondary side of `equipment` on the demand side of a resolved
/// loop, stamping out the segment's branch pump if it has one.
pub fn attach_demand(ctx: &mut Context<'_>, target: LoopTarget<'_>, equipment: EquipId, owner: &str) {
    let branch_pump = target.branch_pump.map(|rec| {
        let name = format!("{} {owner}", rec.label());
        pump::translate_pump(ctx, rec, Some(name))
    });
    add_demand_branch(ctx, target.loop_id, equipment, Side::Secondary, branch_pump);
}

fn add_branch(
    ctx: &mut Context<'_>,
    loop_id: LoopId,
    loop_side: LoopSide,
    equipment: EquipId,
    side: Side,
    branch_pump: Option<EquipId>,
) -> bool {
    let Some(lp) = ctx.model.plant_loop(loop_id) else {
        return false;
    };
    let loop_name = lp.name.clone();
    let (splitter, mixer) = match loop_side {
        LoopSide::Supply => (lp.supply_splitter, lp.supply_mixer),
        LoopSide::Demand => (lp.demand_splitter, lp.demand_mixer),
    };

    let mut chain = Vec::with_capacity(2);
    chain.extend(branch_pump.map(|p| (p, Side::Primary)));
    chain.push((equipment, side));

    for &(comp, comp_side) in &chain {
        if let Some((other, other_side)) = ctx.model.loop_membership(comp, comp_side) {
            let other_name = ctx
                .model
                .plant_loop(other)
                .map_or("<unknown>", |l| l.name.as_str());
            let message = format!(
                "already on the {other_side:?} side of loop '{other_name}'; not added to '{loop_name}'"
            );
            ctx.diags.error(ctx.model.equipment_name(comp).to_string(), message);
            return false;
        }
    }
    for &(comp, comp_side) in &chain {
        let _ = ctx.model.assign_to_loop(comp, comp_side, loop_id, loop_side);
    }

    let label = format!("{loop_name} {}", ctx.model.equipment_name(equipment));
    match thread_branch(&mut ctx.model, splitter, mixer, &label, &chain) {
        Ok(branch) => {
            if let Some(lp) = ctx.model.plant_loop_mut(loop_id) {
                match loop_side {
                    LoopSide::Supply => lp.supply_branches.push(branch),
                    LoopSide::Demand => lp.demand_branches.push(branch),
                }
            }
            true
        }
        Err(e) => {
            ctx.diags.error(label, format!("cannot thread branch: {e}"));
            false
        }
    }
}

/// Loop pump at the supply inlet, ahead of the supply splitter.
fn set_loop_pump(ctx: &mut Context<'_>, loop_id: LoopId, rec: &Record) {
    let Some(lp) = ctx.model.plant_loop(loop_id) else {
        return;
    };
    if lp.loop_pump.is_some() {
        ctx.diags
            .warn(rec.label(), format!("loop '{}' already has a pump; ignored", lp.name));
        return;
    }
    let inlet = lp.supply_inlet;
    let pump = pump::translate_pump(ctx, rec, None);
    if splice_pump(ctx, loop_id, LoopSide::Supply, inlet, pump)
        && let Some(lp) = ctx.model.plant_loop_mut(loop_id)
    {
        lp.loop_pump = Some(pump);
    }
}

/// Service hot water: the secondary pump sits at the demand inlet and the
/// loop is simulated with a common pipe.
fn set_demand_pump(ctx: &mut Context<'_>, loop_id: LoopId, rec: &Record) {
    let Some(lp) = ctx.model.plant_loop(loop_id) else {
        return;
    };
    if lp.demand_pump.is_some() {
        ctx.diags.warn(
            rec.label(),
            format!("loop '{}' already has a demand pump; ignored", lp.name),
        );
        return;
    }
    let inlet = lp.demand_inlet;
    let pump = pump::translate_pump(ctx, rec, None);
    if splice_pump(ctx, loop_id, LoopSide::Demand, inlet, pump)
        && let Some(lp) = ctx.model.plant_loop_mut(loop_id)
    {
        lp.demand_pump = Some(pump);
        lp.common_pipe = CommonPipeSimulation::CommonPipe;
    }
}

fn splice_pump(
    ctx: &mut Context<'_>,
    loop_id: LoopId,
    loop_side: LoopSide,
    node: NodeId,
    pump: EquipId,
) -> bool {
    let name = ctx.model.equipment_name(pump).to_string();
    match ctx
        .model
        .graph
        .insert_at(node, pump, format!("{name} Outlet Node"))
    {
        Ok(_) => {
            let _ = ctx.model.assign_to_loop(pump, Side::Primary, loop_id, loop_side);
            true
        }
        Err(e) => {
            ctx.diags.error(name, format!("cannot place pump: {e}"));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;
    use crate::options::TranslateOptions;
    use hf_components::Boiler;

    fn hot_water() -> Record {
        Record::new("FluidSys")
            .with_field("Name", "HW")
            .with_field("Type", "HotWater")
            .with_field("TempCtrl", "Fixed")
            .with_field("FixedSupTemp", 180.0)
            .with_child(
                Record::new("FluidSeg")
                    .with_field("Name", "HW Supply")
                    .with_field("Type", "PrimarySupply")
                    .with_child(Record::new("Pump").with_field("Name", "HW Pump"))
                    .with_child(Record::new("Blr").with_field("Name", "Boiler")),
            )
            .with_child(
                Record::new("FluidSeg")
                    .with_field("Name", "HW Return")
                    .with_field("Type", "PrimaryReturn"),
            )
    }

    #[test]
    fn skeleton_has_bypasses_and_walkable_supply() {
        let root = Record::new("Proj").with_child(hot_water());
        let mut ctx = Context::new(&root, TranslateOptions::default());
        let system = root.get_child("FluidSys").unwrap();
        let id = resolve_loop(&mut ctx, system).unwrap();
        let lp = ctx.model.plant_loop(id).unwrap();

        assert_eq!(lp.supply_branches.len(), 1);
        assert_eq!(lp.supply_bypass.equipment.len(), 1);
        assert_eq!(lp.demand_bypass.equipment.len(), 1);
        let pump = lp.loop_pump.unwrap();
        assert_eq!(ctx.model.graph.downstream_of(lp.supply_inlet), Some(pump));
        let boiler = lp.supply_branches[0].equipment[0].0;
        assert_eq!(
            ctx.model.loop_membership(boiler, Side::Primary),
            Some((id, LoopSide::Supply))
        );
        assert!(ctx.model.graph.validate().is_ok());
    }

    #[test]
    fn loop_lookup_is_idempotent() {
        let root = Record::new("Proj").with_child(hot_water());
        let mut ctx = Context::new(&root, TranslateOptions::default());
        let a = resolve_segment(&mut ctx, Some("HW Return")).unwrap();
        let equipment = ctx.model.graph.components().len();
        let b = resolve_segment(&mut ctx, Some("HW Supply")).unwrap();
        assert_eq!(a.loop_id, b.loop_id);
        assert_eq!(ctx.model.plant_loops.len(), 1);
        assert_eq!(ctx.model.graph.components().len(), equipment);
        assert!(resolve_segment(&mut ctx, Some("Missing")).is_none());
    }

    #[test]
    fn equipment_joins_one_loop_only() {
        let root = Record::new("Proj").with_child(hot_water());
        let mut ctx = Context::new(&root, TranslateOptions::default());
        let id = resolve_loop(&mut ctx, root.get_child("FluidSys").unwrap()).unwrap();
        let boiler = ctx
            .model
            .add_equipment(Equipment::Boiler(Boiler::new("Loose Boiler")));
        assert!(add_demand_branch(&mut ctx, id, boiler, Side::Primary, None));
        assert!(!add_demand_branch(&mut ctx, id, boiler, Side::Primary, None));
        assert_eq!(ctx.diags.about(Severity::Error, "Loose Boiler").count(), 1);
    }
}
