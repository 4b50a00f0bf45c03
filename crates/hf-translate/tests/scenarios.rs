//! Whole-document translation scenarios.

use hf_components::{Equipment, HvacComponent};
use hf_controls::SetpointStrategy;
use hf_core::{Tolerances, nearly_equal};
use hf_graph::Side;
use hf_project::Record;
use hf_translate::model::CommonPipeSimulation;
use hf_translate::{Severity, TranslateOptions, Translation, translate_project};

fn office() -> Record {
    Record::new("ThrmlZn").with_field("Name", "Office")
}

fn packaged_unit() -> Record {
    Record::new("AirSys")
        .with_field("Name", "RTU")
        .with_field("Type", "SZAC")
        .with_field("ClgCtrl", "Fixed")
        .with_field("FixedSupTemp", 55.0)
        .with_child(
            Record::new("AirSeg")
                .with_field("Name", "RTU Supply")
                .with_field("Type", "Supply")
                .with_child(
                    Record::new("Fan")
                        .with_field("Name", "Supply Fan")
                        .with_field("CtrlMthd", "ConstantVolume")
                        .with_field("FlowCap", 1000.0),
                )
                .with_child(
                    Record::new("CoilClg")
                        .with_field("Name", "DX Coil")
                        .with_field("Type", "DirectExpansion")
                        .with_field("CapTotGrossRtd", 36000.0)
                        .with_field("NumClgStages", 1.0),
                ),
        )
        .with_child(
            Record::new("TrmlUnit")
                .with_field("Name", "Office Diffuser")
                .with_field("Type", "Uncontrolled")
                .with_field("ZnServedRef", "Office"),
        )
}

fn translate(root: &Record) -> Translation {
    translate_project(root, TranslateOptions::default())
}

#[test]
fn draw_through_fan_follows_the_coil() {
    let root = Record::new("Proj").with_child(office()).with_child(packaged_unit());
    let t = translate(&root);
    assert!(!t.has_errors(), "{:?}", t.diagnostics.entries());

    let model = &t.model;
    let coil = model.find_equipment("DX Coil").unwrap();
    let fan = model.find_equipment("Supply Fan").unwrap();
    let air = &model.air_loops[0];
    assert_eq!(air.supply_chain, vec![coil, fan]);
    assert_eq!(
        model.graph.outlet_node(coil, Side::Primary),
        model.graph.inlet_node(fan, Side::Primary)
    );
    assert_eq!(model.graph.outlet_node(fan, Side::Primary), Some(air.supply_outlet));

    let tol = Tolerances::converted();
    let flow = model.equipment(fan).and_then(Equipment::as_fan).unwrap();
    let flow = flow.max_flow.value().unwrap().value;
    assert!(nearly_equal(flow, 0.471_947, tol), "{flow}");
    let dx = model.equipment(coil).and_then(Equipment::as_cooling_coil).unwrap();
    assert_eq!(dx.class_name(), "CoilCoolingDXSingleSpeed");
    let capacity = dx.rated_total_capacity.value().unwrap().value;
    assert!((capacity - 10_550.6).abs() < 1.0, "{capacity}");
}

#[test]
fn autosize_replaces_every_sizing_field() {
    let root = Record::new("Proj").with_child(office()).with_child(packaged_unit());
    let t = translate_project(&root, TranslateOptions::default().with_autosize(true));
    let fan = t.model.find_equipment("Supply Fan").unwrap();
    let coil = t.model.find_equipment("DX Coil").unwrap();
    let fan = t.model.equipment(fan).and_then(Equipment::as_fan).unwrap();
    let coil = t.model.equipment(coil).and_then(Equipment::as_cooling_coil).unwrap();
    assert!(fan.max_flow.is_autosized());
    assert!(coil.rated_total_capacity.is_autosized());
}

#[test]
fn reheat_box_without_coil_gets_a_default() {
    let air = Record::new("AirSys")
        .with_field("Name", "VAV")
        .with_field("Type", "VAV")
        .with_field("ClgCtrl", "Fixed")
        .with_child(
            Record::new("TrmlUnit")
                .with_field("Name", "Box 1")
                .with_field("Type", "VAVReheatBox")
                .with_field("ZnServedRef", "Office"),
        );
    let root = Record::new("Proj").with_child(office()).with_child(air);
    let t = translate(&root);

    assert_eq!(t.diagnostics.about(Severity::Warning, "Box 1").count(), 1);
    let id = t.model.find_equipment("Box 1").unwrap();
    let terminal = t.model.equipment(id).and_then(Equipment::as_terminal).unwrap();
    let reheat = terminal.reheat_coil.unwrap();
    assert_eq!(t.model.equipment(reheat).unwrap().class_name(), "CoilHeatingElectric");

    let office = t.model.zone_by_name("Office").unwrap();
    assert_eq!(t.model.bindings_for(office).count(), 1);
}

#[test]
fn service_hot_water_pump_sits_at_the_demand_inlet() {
    let shw = Record::new("FluidSys")
        .with_field("Name", "SHW")
        .with_field("Type", "ServiceHotWater")
        .with_field("TempCtrl", "Fixed")
        .with_field("FixedSupTemp", 140.0)
        .with_child(
            Record::new("FluidSeg")
                .with_field("Name", "SHW Supply")
                .with_field("Type", "PrimarySupply")
                .with_child(Record::new("WtrHtr").with_field("Name", "Heater")),
        )
        .with_child(
            Record::new("FluidSeg")
                .with_field("Name", "SHW Recirc")
                .with_field("Type", "SecondarySupply")
                .with_child(Record::new("Pump").with_field("Name", "Recirc Pump")),
        );
    let t = translate(&Record::new("Proj").with_child(shw));
    assert!(!t.has_errors(), "{:?}", t.diagnostics.entries());

    let lp = &t.model.plant_loops[0];
    let pump = t.model.find_equipment("Recirc Pump").unwrap();
    assert_eq!(lp.demand_pump, Some(pump));
    assert_eq!(lp.common_pipe, CommonPipeSimulation::CommonPipe);
    assert_eq!(t.model.graph.downstream_of(lp.demand_inlet), Some(pump));
}

#[test]
fn forward_reference_builds_the_loop_once() {
    let coil = Record::new("CoilClg")
        .with_field("Name", "CHW Coil")
        .with_field("Type", "ChilledWater")
        .with_field("FluidSegInRef", "CHW Supply");
    let air = Record::new("AirSys")
        .with_field("Name", "AHU")
        .with_field("Type", "VAV")
        .with_field("ClgCtrl", "Fixed")
        .with_child(
            Record::new("AirSeg")
                .with_field("Name", "AHU Supply")
                .with_field("Type", "Supply")
                .with_child(coil)
                .with_child(
                    Record::new("Fan")
                        .with_field("Name", "AHU Fan")
                        .with_field("CtrlMthd", "VariableVolume"),
                ),
        );
    let chw = Record::new("FluidSys")
        .with_field("Name", "CHW")
        .with_field("Type", "ChilledWater")
        .with_field("TempCtrl", "Fixed")
        .with_child(
            Record::new("FluidSeg")
                .with_field("Name", "CHW Supply")
                .with_field("Type", "PrimarySupply")
                .with_child(Record::new("Chlr").with_field("Name", "Chiller")),
        );
    let root = Record::new("Proj").with_child(air).with_child(chw);
    let t = translate(&root);

    assert_eq!(t.model.plant_loops.len(), 1);
    let lp = &t.model.plant_loops[0];
    assert_eq!(lp.supply_branches.len(), 1);
    assert_eq!(lp.demand_branches.len(), 1);
    let coil = t.model.find_equipment("CHW Coil").unwrap();
    assert_eq!(lp.demand_branches[0].equipment, vec![(coil, Side::Secondary)]);
    assert!(t.model.equipment(coil).unwrap().two_stream());
    assert!(t.model.graph.validate().is_ok());
}

#[test]
fn loop_referencing_itself_warns_and_completes() {
    let chw = Record::new("FluidSys")
        .with_field("Name", "CHW")
        .with_field("Type", "ChilledWater")
        .with_field("TempCtrl", "Fixed")
        .with_child(
            Record::new("FluidSeg")
                .with_field("Name", "CHW Supply")
                .with_field("Type", "PrimarySupply")
                .with_child(
                    Record::new("Chlr")
                        .with_field("Name", "Chiller")
                        .with_field("CndsrType", "Water")
                        .with_field("CndsrFluidSegInRef", "CHW Return"),
                ),
        )
        .with_child(
            Record::new("FluidSeg")
                .with_field("Name", "CHW Return")
                .with_field("Type", "PrimaryReturn"),
        );
    let t = translate(&Record::new("Proj").with_child(chw));

    assert_eq!(t.model.plant_loops.len(), 1);
    assert!(t.diagnostics.about(Severity::Warning, "CHW").count() >= 1);
    assert!(t.model.overlays.is_occupied(t.model.plant_loops[0].supply_outlet));
}

#[test]
fn dual_setpoint_plant_controls_each_producer() {
    let plant = Record::new("FluidSys")
        .with_field("Name", "Plant")
        .with_field("Type", "HotWater")
        .with_field("TempCtrl", "FixedDualSetpoint")
        .with_field("ClgFixedSupTemp", 55.0)
        .with_field("HtgFixedSupTemp", 95.0)
        .with_child(
            Record::new("FluidSeg")
                .with_field("Name", "Plant Supply")
                .with_field("Type", "PrimarySupply")
                .with_child(Record::new("Chlr").with_field("Name", "Chiller"))
                .with_child(Record::new("Blr").with_field("Name", "Boiler")),
        );
    let t = translate(&Record::new("Proj").with_child(plant));
    let model = &t.model;
    let lp = &model.plant_loops[0];

    let marker = model.overlays.at(lp.supply_outlet).unwrap();
    assert!(matches!(marker.strategy, SetpointStrategy::DualSetpoint { .. }));

    let scheduled = |name: &str| {
        let id = model.find_equipment(name).unwrap();
        let node = model.graph.outlet_node(id, Side::Primary).unwrap();
        match model.overlays.at(node).unwrap().strategy {
            SetpointStrategy::Scheduled { schedule } => {
                model.schedule(schedule).unwrap().constant_value().unwrap()
            }
            ref other => panic!("unexpected {other:?}"),
        }
    };
    assert!(nearly_equal(scheduled("Chiller"), 12.78, Tolerances::converted()));
    assert!(nearly_equal(scheduled("Boiler"), 35.0, Tolerances::converted()));
}

#[test]
fn unknown_zone_is_an_error_but_the_terminal_survives() {
    let air = Record::new("AirSys")
        .with_field("Name", "AHU")
        .with_field("Type", "VAV")
        .with_field("ClgCtrl", "Fixed")
        .with_child(
            Record::new("TrmlUnit")
                .with_field("Name", "Lost Box")
                .with_field("Type", "Uncontrolled")
                .with_field("ZnServedRef", "Nowhere"),
        );
    let t = translate(&Record::new("Proj").with_child(air));

    assert!(t.has_errors());
    assert_eq!(t.diagnostics.about(Severity::Error, "Lost Box").count(), 1);
    assert!(t.model.find_equipment("Lost Box").is_some());
    assert!(t.model.bindings.is_empty());
}

#[test]
fn zone_unit_and_terminal_share_priorities() {
    let zone = office().with_child(
        Record::new("ZnEqpPriority")
            .with_field("EqpRef", "PTAC")
            .with_field("ClgPriority", 1.0)
            .with_field("HtgPriority", 1.0),
    );
    let zone = zone.with_field("ZnSysRef", "PTAC");
    let ptac = Record::new("ZnSys")
        .with_field("Name", "PTAC")
        .with_field("Type", "PTAC");
    let root = Record::new("Proj")
        .with_child(zone)
        .with_child(packaged_unit())
        .with_child(ptac);
    let t = translate(&root);

    let office = t.model.zone_by_name("Office").unwrap();
    let priorities: Vec<(String, u32)> = t
        .model
        .bindings_for(office)
        .map(|b| (t.model.equipment_name(b.equipment).to_string(), b.cooling_priority))
        .collect();
    assert_eq!(
        priorities,
        vec![
            ("Office Diffuser".to_string(), 2),
            ("PTAC Office".to_string(), 1),
        ]
    );
}

#[test]
fn translation_is_deterministic() {
    let root = Record::new("Proj")
        .with_child(office())
        .with_child(packaged_unit())
        .with_child(
            Record::new("FluidSys")
                .with_field("Name", "HW")
                .with_field("Type", "HotWater"),
        );
    let first = translate(&root);
    let second = translate(&root);
    assert_eq!(first.summary(), second.summary());
    assert_eq!(first.diagnostics.entries(), second.diagnostics.entries());
}

fn dual_setpoint_air(position: &str) -> Record {
    Record::new("AirSys")
        .with_field("Name", "AHU")
        .with_field("Type", "VAV")
        .with_field("ClgCtrl", "FixedDualSetpoint")
        .with_field("ClgFixedSupTemp", 55.0)
        .with_field("HtgFixedSupTemp", 95.0)
        .with_child(
            Record::new("AirSeg")
                .with_field("Name", "AHU Supply")
                .with_field("Type", "Supply")
                .with_child(
                    Record::new("CoilClg")
                        .with_field("Name", "Clg")
                        .with_field("Type", "DirectExpansion"),
                )
                .with_child(
                    Record::new("CoilHtg")
                        .with_field("Name", "Htg")
                        .with_field("Type", "Electric"),
                )
                .with_child(
                    Record::new("Fan")
                        .with_field("Name", "Fan")
                        .with_field("CtrlMthd", "ConstantVolume")
                        .with_field("Pos", position),
                ),
        )
}

fn chain_names(t: &Translation) -> Vec<String> {
    t.model.air_loops[0]
        .supply_chain
        .iter()
        .map(|&id| t.model.equipment_name(id).to_string())
        .collect()
}

fn scheduled_outlet_value(t: &Translation, name: &str) -> f64 {
    let model = &t.model;
    let id = model.find_equipment(name).unwrap();
    let node = model.graph.outlet_node(id, Side::Primary).unwrap();
    match model.overlays.at(node).unwrap().strategy {
        SetpointStrategy::Scheduled { schedule } => {
            model.schedule(schedule).unwrap().constant_value().unwrap()
        }
        ref other => panic!("{name}: unexpected {other:?}"),
    }
}

fn assert_dual_air_split(t: &Translation) {
    assert!(!t.has_errors(), "{:?}", t.diagnostics.entries());
    let model = &t.model;
    let air = &model.air_loops[0];
    let marker = model.overlays.at(air.supply_outlet).unwrap();
    assert!(matches!(marker.strategy, SetpointStrategy::DualSetpoint { .. }));

    let tol = Tolerances::converted();
    assert!(nearly_equal(scheduled_outlet_value(t, "Clg"), 12.777_78, tol));
    assert!(nearly_equal(scheduled_outlet_value(t, "Htg"), 35.0, tol));
    assert!(model.graph.validate().is_ok());
}

#[test]
fn dual_setpoint_air_draw_through_splits_upstream() {
    let root = Record::new("Proj").with_child(dual_setpoint_air("DrawThrough"));
    let t = translate(&root);
    assert_dual_air_split(&t);
    assert_eq!(
        chain_names(&t),
        ["Clg Setpoint Duct", "Clg", "Htg Setpoint Duct", "Htg", "Fan"]
    );
}

#[test]
fn dual_setpoint_air_blow_through_splits_downstream() {
    let root = Record::new("Proj").with_child(dual_setpoint_air("BlowThrough"));
    let t = translate(&root);
    assert_dual_air_split(&t);
    assert_eq!(
        chain_names(&t),
        ["Fan", "Clg", "Clg Setpoint Duct", "Htg", "Htg Setpoint Duct"]
    );
}
