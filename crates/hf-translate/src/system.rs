//! System records: dispatch, air systems and zone systems.
//!
//! An air system's supply side is a straight chain from the supply inlet:
//! return-segment components, the outdoor-air system, then the supply
//! segments in declaration order. The demand side fans out through a zone
//! splitter to one terminal per zone and gathers the zone returns (directly
//! or through a return plenum) in a zone mixer.

use std::collections::{BTreeMap, BTreeSet};

use hf_components::{ConnectorFlavor, Duct, Equipment, Mixer, Plenum, Splitter};
use hf_controls::Placement;
use hf_core::{AirLoopId, EquipId, NodeId, ZoneId};
use hf_graph::{GraphError, GraphResult, PortKind, Side};
use hf_project::Record;

use crate::assembler;
use crate::context::Context;
use crate::model::{AirLoop, AirSegmentKind, AirSystemKind, Model};
use crate::placer;
use crate::sequencer;
use crate::translators::{fan, oa, terminal, zone_hvac};

/// Translate one system record of any family.
pub fn translate_system<'a>(ctx: &mut Context<'a>, rec: &'a Record) {
    match rec.tag.as_str() {
        "FluidSys" => {
            assembler::resolve_loop(ctx, rec);
        }
        "AirSys" => {
            translate_air_system(ctx, rec);
        }
        "ZnSys" => translate_zone_system(ctx, rec),
        other => ctx
            .diags
            .warn(rec.label(), format!("ignoring unsupported system record '{other}'")),
    }
}

/// One straight piece of an air supply chain.
#[derive(Debug, Clone, Copy)]
enum Stage<'r> {
    Segment(&'r Record),
    OutdoorAir(&'r Record),
}

impl Stage<'_> {
    fn label(&self) -> &str {
        match self {
            Stage::Segment(rec) | Stage::OutdoorAir(rec) => rec.label(),
        }
    }
}

/// Supply stages in flow order, plus the relief segment if any.
fn collect_stages<'r>(
    ctx: &mut Context<'_>,
    system: &'r Record,
) -> (Vec<Stage<'r>>, Option<&'r Record>) {
    let owner = system.label();
    let mut returns = Vec::new();
    let mut supplies = Vec::new();
    let mut outdoor_air: Option<&Record> = None;
    let mut relief: Option<&Record> = None;

    for child in &system.children {
        match child.tag.as_str() {
            "AirSeg" => match ctx.discriminator::<AirSegmentKind>(child, "Type") {
                AirSegmentKind::Supply => supplies.push(Stage::Segment(child)),
                AirSegmentKind::Return => returns.push(Stage::Segment(child)),
                AirSegmentKind::Relief if relief.is_some() => ctx.diags.warn(
                    owner,
                    format!("second relief segment '{}' ignored", child.label()),
                ),
                AirSegmentKind::Relief => relief = Some(child),
            },
            "OACtrl" if outdoor_air.is_some() => ctx.diags.warn(
                owner,
                format!("second outdoor-air system '{}' ignored", child.label()),
            ),
            "OACtrl" => outdoor_air = Some(child),
            "TrmlUnit" => {}
            other => ctx
                .diags
                .warn(owner, format!("ignoring unsupported '{other}' record in air system")),
        }
    }

    let mut stages = returns;
    stages.extend(outdoor_air.map(Stage::OutdoorAir));
    stages.extend(supplies);
    (stages, relief)
}

/// The relief segment's fan, contained in the outdoor-air system.
fn translate_relief_fan(ctx: &mut Context<'_>, segment: &Record) -> Option<EquipId> {
    let mut fans = segment.children.iter().filter(|c| c.tag == "Fan");
    let first = fans.next();
    if fans.next().is_some() {
        ctx.diags
            .error(segment.label(), "second fan in relief segment; skipped");
    }
    first.map(|rec| fan::translate_fan(ctx, rec))
}

/// Build an air loop from an `AirSys` record.
pub fn translate_air_system(ctx: &mut Context<'_>, system: &Record) -> Option<AirLoopId> {
    let name = system.label().to_string();
    if ctx.model.air_loop_names.contains(&name) {
        ctx.diags.error(&name, "duplicate air system name; skipped");
        return None;
    }
    let kind: AirSystemKind = ctx.discriminator(system, "Type");
    let _span = tracing::info_span!("air_system", name = %name).entered();

    let graph = &mut ctx.model.graph;
    let supply_inlet = graph.add_node(format!("{name} Supply Inlet Node"));
    let supply_outlet = graph.add_node(format!("{name} Supply Outlet Node"));
    let demand_inlet = graph.add_node(format!("{name} Demand Inlet Node"));
    let demand_outlet = graph.add_node(format!("{name} Demand Outlet Node"));

    let (stages, relief) = collect_stages(ctx, system);
    let has_outdoor_air = stages.iter().any(|s| matches!(s, Stage::OutdoorAir(_)));
    let mut relief_fan = match relief {
        Some(seg) if has_outdoor_air => translate_relief_fan(ctx, seg),
        Some(seg) => {
            ctx.diags.warn(
                &name,
                format!("relief segment '{}' without an outdoor-air system; ignored", seg.label()),
            );
            None
        }
        None => None,
    };

    let mut oa_system = None;
    let mut start = supply_inlet;
    for (i, stage) in stages.iter().enumerate() {
        let end = if i + 1 == stages.len() {
            supply_outlet
        } else {
            ctx.model
                .graph
                .add_node(format!("{} Outlet Node", stage.label()))
        };
        match *stage {
            Stage::Segment(segment) => {
                sequencer::sequence(ctx, segment, start, end);
            }
            Stage::OutdoorAir(rec) => {
                let id = oa::translate_outdoor_air(ctx, rec, relief_fan.take());
                if let Err(e) = ctx.model.graph.connect_straight(id, Side::Primary, start, end) {
                    ctx.diags
                        .error(rec.label(), format!("cannot place outdoor-air system: {e}"));
                }
                oa_system = Some(id);
            }
        }
        start = end;
    }
    if stages.is_empty() {
        ctx.diags
            .warn(&name, "no supply segment; supply side bridged by a duct");
        let duct = ctx
            .model
            .add_equipment(Equipment::Duct(Duct::new(format!("{name} Supply Duct"))));
        if let Err(e) = ctx
            .model
            .graph
            .connect_straight(duct, Side::Primary, supply_inlet, supply_outlet)
        {
            ctx.diags.error(&name, format!("cannot bridge supply side: {e}"));
        }
    }

    let demand = build_demand_side(ctx, system, &name, demand_inlet, demand_outlet);

    // A broken chain is reported once placement refreshes it.
    let supply_chain = ctx
        .model
        .graph
        .walk(supply_inlet, supply_outlet)
        .unwrap_or_default();
    let air_id = AirLoopId::from_len(ctx.model.air_loops.len());
    ctx.model.air_loops.push(AirLoop {
        id: air_id,
        name: name.clone(),
        kind,
        supply_inlet,
        supply_outlet,
        demand_inlet,
        demand_outlet,
        supply_chain,
        oa_system,
        zone_splitter: demand.zone_splitter,
        zone_mixer: demand.zone_mixer,
        terminals: demand.terminals,
        plenums: demand.plenums,
        placement: Placement::new(),
    });
    ctx.model.air_loop_names.insert_if_absent(name.as_str(), air_id);

    placer::place_air_overlay(ctx, air_id, system);
    tracing::info!(air_system = %name, ?kind, "translated air system");
    Some(air_id)
}

struct DemandSide {
    zone_splitter: EquipId,
    zone_mixer: EquipId,
    terminals: Vec<EquipId>,
    plenums: BTreeMap<ZoneId, EquipId>,
}

fn build_demand_side(
    ctx: &mut Context<'_>,
    system: &Record,
    name: &str,
    inlet: NodeId,
    outlet: NodeId,
) -> DemandSide {
    let zone_splitter = ctx.model.add_equipment(Equipment::Splitter(Splitter::new(
        format!("{name} Zone Splitter"),
        ConnectorFlavor::Air,
    )));
    let zone_mixer = ctx.model.add_equipment(Equipment::Mixer(Mixer::new(
        format!("{name} Zone Mixer"),
        ConnectorFlavor::Air,
    )));
    if let Err(e) = frame(&mut ctx.model, zone_splitter, zone_mixer, inlet, outlet) {
        ctx.diags.error(name, format!("cannot frame demand side: {e}"));
    }

    let mut side = DemandSide {
        zone_splitter,
        zone_mixer,
        terminals: Vec::new(),
        plenums: BTreeMap::new(),
    };
    let mut returned: Vec<ZoneId> = Vec::new();
    for rec in system.get_children("TrmlUnit") {
        let terminal = terminal::translate_terminal(ctx, rec);
        side.terminals.push(terminal);
        // Unresolved zones are reported by the binder.
        let Some(zone) = rec
            .get_string("ZnServedRef")
            .and_then(|z| ctx.model.zone_by_name(z))
        else {
            continue;
        };
        if let Err(e) = wire_terminal(&mut ctx.model, zone_splitter, terminal, zone) {
            ctx.diags
                .error(rec.label(), format!("cannot wire terminal: {e}"));
            continue;
        }
        if !returned.contains(&zone) {
            returned.push(zone);
            if let Err(e) = wire_return(&mut ctx.model, name, zone_mixer, zone, &mut side.plenums) {
                let zone_name = ctx.model.zone(zone).map_or("", |z| z.name.as_str()).to_string();
                ctx.diags
                    .error(zone_name, format!("cannot wire return to '{name}': {e}"));
            }
        }
    }
    side
}

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

/// Splitter outlet → terminal → zone inlet node.
fn wire_terminal(
    model: &mut Model,
    splitter: EquipId,
    terminal: EquipId,
    zone: ZoneId,
) -> GraphResult<()> {
    let name = model.equipment_name(terminal).to_string();
    let graph = &mut model.graph;
    let port = graph.add_port(splitter, PortKind::Outlet)?;
    let inlet = graph.add_node(format!("{name} Inlet Node"));
    graph.connect(port, inlet)?;
    let outlet = graph.add_node(format!("{name} Outlet Node"));
    graph.connect_straight(terminal, Side::Primary, inlet, outlet)?;
    if let Some(z) = model.zone_mut(zone) {
        z.inlet_nodes.push(outlet);
    }
    Ok(())
}

/// Zone return node → (return plenum →) zone mixer. One return node per
/// zone per air loop, one plenum per plenum zone per air loop.
fn wire_return(
    model: &mut Model,
    air_name: &str,
    mixer: EquipId,
    zone: ZoneId,
    plenums: &mut BTreeMap<ZoneId, EquipId>,
) -> GraphResult<()> {
    let Some(z) = model.zone(zone) else {
        return Ok(());
    };
    let node_name = format!("{} {air_name} Return Node", z.name);
    let plenum_zone = z.return_plenum;

    let port = match plenum_zone {
        Some(p) => {
            let plenum = match plenums.get(&p) {
                Some(&id) => id,
                None => {
                    let id = add_plenum(model, air_name, mixer, p)?;
                    plenums.insert(p, id);
                    id
                }
            };
            model.graph.add_port(plenum, PortKind::Inlet)?
        }
        None => model.graph.add_port(mixer, PortKind::Inlet)?,
    };
    let node = model.graph.add_node(node_name);
    model.graph.connect(port, node)?;
    if let Some(z) = model.zone_mut(zone) {
        z.return_nodes.push(node);
    }
    Ok(())
}

fn add_plenum(model: &mut Model, air_name: &str, mixer: EquipId, zone: ZoneId) -> GraphResult<EquipId> {
    let zone_name = model.zone(zone).map_or("", |z| z.name.as_str());
    let name = format!("{air_name} {zone_name} Return Plenum");
    let plenum = model.add_equipment(Equipment::Plenum(Plenum::new(name.clone(), zone)));
    let graph = &mut model.graph;
    let outlet = graph
        .find_port(plenum, PortKind::Outlet, Side::Primary)
        .ok_or(GraphError::MissingPort {
            comp: plenum,
            what: "outlet",
        })?;
    let node = graph.add_node(format!("{name} Outlet Node"));
    graph.connect(outlet, node)?;
    let port = graph.add_port(mixer, PortKind::Inlet)?;
    graph.connect(port, node)?;
    Ok(plenum)
}

/// Clone a `ZnSys` once for every zone that names it in `ZnSysRef`.
pub fn translate_zone_system(ctx: &mut Context<'_>, rec: &Record) {
    let name = rec.label();
    let served: Vec<String> = ctx
        .model
        .zones
        .iter()
        .filter(|z| z.zone_system.as_deref() == Some(name))
        .map(|z| z.name.clone())
        .collect();
    if served.is_empty() {
        ctx.diags
            .warn(name, "zone system not referenced by any zone; not translated");
        return;
    }
    for zone in &served {
        zone_hvac::translate_zone_unit(ctx, rec, zone);
    }
}

/// Report zones whose `ZnSysRef` names no zone system.
pub fn check_zone_system_refs(ctx: &mut Context<'_>) {
    let root = ctx.root;
    let known: BTreeSet<&str> = root.get_children("ZnSys").filter_map(Record::name).collect();
    let dangling: Vec<(String, String)> = ctx
        .model
        .zones
        .iter()
        .filter_map(|z| {
            let wanted = z.zone_system.as_deref()?;
            (!known.contains(wanted)).then(|| (z.name.clone(), wanted.to_string()))
        })
        .collect();
    for (zone, wanted) in dangling {
        ctx.diags
            .error(zone, format!("zone system '{wanted}' not found; zone left unserved"));
    }
}
