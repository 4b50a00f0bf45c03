//! Control overlay placement.
//!
//! Single strategies go on the container's supply outlet. A dual-setpoint
//! strategy leaves a split marker on the supply outlet and gives every
//! heating or cooling supply component its own controlled outlet node,
//! splicing in a pass-through duct or pipe to get one.

use hf_components::{Duct, Equipment, HvacComponent, Pipe};
use hf_controls::{Placement, SetpointStrategy, SplitSide, split_side};
use hf_core::{AirLoopId, EquipId, LoopId, NodeId, ScheduleId};
use hf_graph::{GraphResult, Side};
use hf_project::Record;

use crate::context::Context;
use crate::model::{LoopSide, Model, SupplyRole};
use crate::translators::setpoint::{self, ControlPlan};

/// The loop or air system an overlay belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Plant(LoopId),
    Air(AirLoopId),
}

impl Container {
    /// Name and supply outlet node.
    fn outlet(self, model: &Model) -> Option<(String, NodeId)> {
        match self {
            Container::Plant(id) => model
                .plant_loop(id)
                .map(|l| (l.name.clone(), l.supply_outlet)),
            Container::Air(id) => model
                .air_loop(id)
                .map(|l| (l.name.clone(), l.supply_outlet)),
        }
    }

    fn placement_mut(self, model: &mut Model) -> Option<&mut Placement> {
        match self {
            Container::Plant(id) => model.plant_loop_mut(id).map(|l| &mut l.placement),
            Container::Air(id) => model.air_loop_mut(id).map(|l| &mut l.placement),
        }
    }
}

/// Place the `TempCtrl` strategy of a fluid system. A loop left without an
/// overlay is reported by the end-of-run audit.
pub fn place_plant_overlay(ctx: &mut Context<'_>, loop_id: LoopId, system: &Record) {
    let Some(lp) = ctx.model.plant_loop(loop_id) else {
        return;
    };
    let role = lp.kind.supply_role();
    let pivot = lp.loop_pump;
    let items: Vec<(EquipId, SplitSide)> = lp
        .supply_branches
        .iter()
        .flat_map(|b| b.equipment.iter())
        .filter(|(comp, _)| Some(*comp) != pivot)
        .map(|&(comp, _)| (comp, SplitSide::Downstream))
        .collect();

    match setpoint::translate_control(ctx, system, "TempCtrl", role) {
        Some(ControlPlan::Single(strategy)) => place_single(ctx, Container::Plant(loop_id), strategy),
        Some(ControlPlan::Dual { heating, cooling }) => {
            place_dual(ctx, Container::Plant(loop_id), heating, cooling, &items)
        }
        None => {}
    }
}

/// Place the `ClgCtrl` strategy of an air system and refresh its supply
/// chain.
pub fn place_air_overlay(ctx: &mut Context<'_>, air_id: AirLoopId, system: &Record) {
    let Some(air) = ctx.model.air_loop(air_id) else {
        return;
    };
    let chain = air.supply_chain.clone();
    let pivot = chain.iter().rposition(|&comp| {
        ctx.model
            .equipment(comp)
            .is_some_and(|e| e.is_mover())
    });
    let items: Vec<(EquipId, SplitSide)> = chain
        .iter()
        .enumerate()
        .filter(|&(i, _)| Some(i) != pivot)
        .map(|(i, &comp)| (comp, split_side(i, pivot)))
        .collect();

    match setpoint::translate_control(ctx, system, "ClgCtrl", SupplyRole::Cooling) {
        Some(ControlPlan::Single(strategy)) => place_single(ctx, Container::Air(air_id), strategy),
        Some(ControlPlan::Dual { heating, cooling }) => {
            place_dual(ctx, Container::Air(air_id), heating, cooling, &items)
        }
        None if system.get_string("ClgCtrl").is_none() => ctx.diags.warn(
            system.label(),
            "missing ClgCtrl; supply outlet left without a setpoint manager",
        ),
        None => {}
    }

    let Some(air) = ctx.model.air_loop(air_id) else {
        return;
    };
    match ctx.model.graph.walk(air.supply_inlet, air.supply_outlet) {
        Ok(chain) => {
            if let Some(air) = ctx.model.air_loop_mut(air_id) {
                air.supply_chain = chain;
            }
        }
        Err(e) => {
            let name = air.name.clone();
            ctx.diags
                .error(name, format!("supply chain broken after placement: {e}"));
        }
    }
}

fn place_single(ctx: &mut Context<'_>, container: Container, strategy: SetpointStrategy) {
    let Some((name, outlet)) = container.outlet(&ctx.model) else {
        return;
    };
    if let Some(placement) = container.placement_mut(&mut ctx.model)
        && let Err(e) = placement.place_single()
    {
        ctx.diags.error(name, e.to_string());
        return;
    }
    if let Err(e) = ctx
        .model
        .overlays
        .attach(format!("{name} Setpoint Manager"), outlet, strategy)
    {
        ctx.diags.error(name, e.to_string());
    }
}

fn place_dual(
    ctx: &mut Context<'_>,
    container: Container,
    heating: ScheduleId,
    cooling: ScheduleId,
    items: &[(EquipId, SplitSide)],
) {
    let Some((name, outlet)) = container.outlet(&ctx.model) else {
        return;
    };
    if let Some(placement) = container.placement_mut(&mut ctx.model)
        && let Err(e) = placement.begin_dual()
    {
        ctx.diags.error(name, e.to_string());
        return;
    }
    let marker = SetpointStrategy::DualSetpoint { heating, cooling };
    if let Err(e) = ctx
        .model
        .overlays
        .attach(format!("{name} Dual Setpoint Manager"), outlet, marker)
    {
        ctx.diags.error(name.clone(), e.to_string());
    }

    for &(comp, side) in items {
        let Some(service) = ctx.model.equipment(comp).map(|e| e.service()) else {
            continue;
        };
        if !service.heats() && !service.cools() {
            continue;
        }
        let schedule = if service.heats() && !service.cools() {
            heating
        } else {
            cooling
        };
        if let Err(e) = split_component(ctx, container, comp, side, schedule) {
            let comp_name = ctx.model.equipment_name(comp).to_string();
            ctx.diags
                .error(comp_name, format!("cannot split for dual setpoint: {e}"));
        }
    }

    if let Some(placement) = container.placement_mut(&mut ctx.model)
        && let Err(e) = placement.finish_split()
    {
        ctx.diags.error(name, e.to_string());
    }
}

/// Give `comp` a dedicated controlled outlet.
///
/// Downstream of the mover: `comp -> own -> pass -> old`, Scheduled on
/// `own`, Relative on `old` when it is free. Upstream: `prev -> pass ->
/// fresh -> comp -> out`, Scheduled on `out`, Relative on `fresh`.
fn split_component(
    ctx: &mut Context<'_>,
    container: Container,
    comp: EquipId,
    side: SplitSide,
    schedule: ScheduleId,
) -> GraphResult<()> {
    let comp_name = ctx.model.equipment_name(comp).to_string();
    let pass = match container {
        Container::Plant(_) => Equipment::Pipe(Pipe::new(format!("{comp_name} Setpoint Pipe"))),
        Container::Air(_) => Equipment::Duct(Duct::new(format!("{comp_name} Setpoint Duct"))),
    };
    let pass = ctx.model.add_equipment(pass);

    let (scheduled_node, follower_node) = match side {
        SplitSide::Downstream => {
            let own = ctx.model.graph.insert_after(
                comp,
                Side::Primary,
                pass,
                format!("{comp_name} Outlet Node"),
            )?;
            (own, ctx.model.graph.outlet_node(pass, Side::Primary))
        }
        SplitSide::Upstream => {
            let fresh = ctx.model.graph.insert_before(
                comp,
                Side::Primary,
                pass,
                format!("{comp_name} Inlet Node"),
            )?;
            let Some(out) = ctx.model.graph.outlet_node(comp, Side::Primary) else {
                return Ok(());
            };
            (out, Some(fresh))
        }
    };
    if let Container::Plant(loop_id) = container {
        record_plant_split(ctx, loop_id, comp, pass);
    }

    let overlays = &mut ctx.model.overlays;
    if let Err(e) = overlays.attach(
        format!("{comp_name} Setpoint Manager"),
        scheduled_node,
        SetpointStrategy::Scheduled { schedule },
    ) {
        ctx.diags.error(comp_name, e.to_string());
        return Ok(());
    }
    if let Some(node) = follower_node
        && !overlays.is_occupied(node)
        && let Err(e) = overlays.attach(
            format!("{comp_name} Follower Setpoint Manager"),
            node,
            SetpointStrategy::Relative {
                reference: scheduled_node,
            },
        )
    {
        ctx.diags.error(comp_name, e.to_string());
    }
    Ok(())
}

/// Keep the branch record and loop membership in step with a spliced pipe.
fn record_plant_split(ctx: &mut Context<'_>, loop_id: LoopId, comp: EquipId, pipe: EquipId) {
    let _ = ctx
        .model
        .assign_to_loop(pipe, Side::Primary, loop_id, LoopSide::Supply);
    let Some(lp) = ctx.model.plant_loop_mut(loop_id) else {
        return;
    };
    for branch in &mut lp.supply_branches {
        if let Some(pos) = branch.equipment.iter().position(|&(c, _)| c == comp) {
            branch.equipment.insert(pos + 1, (pipe, Side::Primary));
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler;
    use crate::diagnostics::Severity;
    use crate::options::TranslateOptions;
    use hf_components::Boiler;
    use hf_controls::PlacementState;
    use hf_core::{Tolerances, nearly_equal};

    fn dual_loop() -> Record {
        Record::new("FluidSys")
            .with_field("Name", "Plant")
            .with_field("Type", "HotWater")
            .with_field("TempCtrl", "FixedDualSetpoint")
            .with_field("ClgFixedSupTemp", 55.0)
            .with_field("HtgFixedSupTemp", 95.0)
            .with_child(
                Record::new("FluidSeg")
                    .with_field("Name", "Plant Supply")
                    .with_field("Type", "PrimarySupply")
                    .with_child(Record::new("Pump").with_field("Name", "Plant Pump"))
                    .with_child(Record::new("Chlr").with_field("Name", "Chiller"))
                    .with_child(Record::new("Blr").with_field("Name", "Boiler")),
            )
    }

    fn scheduled_value(ctx: &Context<'_>, node: NodeId) -> Option<f64> {
        match ctx.model.overlays.at(node)?.strategy {
            SetpointStrategy::Scheduled { schedule } => ctx.model.schedule(schedule)?.constant_value(),
            _ => None,
        }
    }

    #[test]
    fn dual_split_controls_each_component_outlet() {
        let root = Record::new("Proj").with_child(dual_loop());
        let mut ctx = Context::new(&root, TranslateOptions::default());
        let id = assembler::resolve_loop(&mut ctx, root.get_child("FluidSys").unwrap()).unwrap();
        let lp = ctx.model.plant_loop(id).unwrap();
        assert_eq!(lp.placement.state(), PlacementState::DualOverlayPlaced);

        let marker = ctx.model.overlays.at(lp.supply_outlet).unwrap();
        assert!(marker.strategy.is_dual());

        let graph = &ctx.model.graph;
        let chiller = ctx.model.find_equipment("Chiller").unwrap();
        let boiler = ctx.model.find_equipment("Boiler").unwrap();
        let chw = scheduled_value(&ctx, graph.outlet_node(chiller, Side::Primary).unwrap()).unwrap();
        let hw = scheduled_value(&ctx, graph.outlet_node(boiler, Side::Primary).unwrap()).unwrap();
        assert!(nearly_equal(chw, 12.78, Tolerances::converted()));
        assert!(nearly_equal(hw, 35.0, Tolerances::converted()));

        let branch = &lp.supply_branches[0];
        assert_eq!(branch.equipment.len(), 2);
        let follower = ctx.model.overlays.at(branch.outlet).unwrap();
        assert!(matches!(follower.strategy, SetpointStrategy::Relative { .. }));
        assert!(ctx.model.graph.validate().is_ok());
    }

    #[test]
    fn supply_insert_after_split_is_refused() {
        let root = Record::new("Proj").with_child(dual_loop());
        let mut ctx = Context::new(&root, TranslateOptions::default());
        let id = assembler::resolve_loop(&mut ctx, root.get_child("FluidSys").unwrap()).unwrap();
        let late = ctx
            .model
            .add_equipment(Equipment::Boiler(Boiler::new("Late Boiler")));
        assert!(!assembler::add_supply_branch(&mut ctx, id, late, None));
        assert_eq!(ctx.diags.about(Severity::Error, "Plant").count(), 1);
        assert_eq!(ctx.model.plant_loop(id).unwrap().supply_branches.len(), 2);
    }
}
