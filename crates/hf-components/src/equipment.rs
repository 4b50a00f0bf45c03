//! Closed set of equipment kinds stored in a translated model.

use crate::coil::{CoolingCoil, HeatingCoil};
use crate::fan::Fan;
use crate::passive::{Duct, Mixer, OutdoorAirSystem, Pipe, Plenum, Splitter};
use crate::plant::{
    Boiler, Chiller, CoolingTower, HeatExchanger, ThermalStorageTank, WaterHeater,
};
use crate::pump::Pump;
use crate::terminal::{AirTerminal, ZoneHvacUnit};
use crate::traits::{HvacComponent, Service};
use hf_graph::Shape;

#[derive(Debug, Clone, PartialEq)]
pub enum Equipment {
    Fan(Fan),
    HeatingCoil(HeatingCoil),
    CoolingCoil(CoolingCoil),
    Pump(Pump),
    Boiler(Boiler),
    Chiller(Chiller),
    CoolingTower(CoolingTower),
    HeatExchanger(HeatExchanger),
    WaterHeater(WaterHeater),
    ThermalStorageTank(ThermalStorageTank),
    AirTerminal(AirTerminal),
    ZoneHvacUnit(ZoneHvacUnit),
    OutdoorAirSystem(OutdoorAirSystem),
    Plenum(Plenum),
    Duct(Duct),
    Pipe(Pipe),
    Splitter(Splitter),
    Mixer(Mixer),
}

impl Equipment {
    fn inner(&self) -> &dyn HvacComponent {
        match self {
            Equipment::Fan(e) => e,
            Equipment::HeatingCoil(e) => e,
            Equipment::CoolingCoil(e) => e,
            Equipment::Pump(e) => e,
            Equipment::Boiler(e) => e,
            Equipment::Chiller(e) => e,
            Equipment::CoolingTower(e) => e,
            Equipment::HeatExchanger(e) => e,
            Equipment::WaterHeater(e) => e,
            Equipment::ThermalStorageTank(e) => e,
            Equipment::AirTerminal(e) => e,
            Equipment::ZoneHvacUnit(e) => e,
            Equipment::OutdoorAirSystem(e) => e,
            Equipment::Plenum(e) => e,
            Equipment::Duct(e) => e,
            Equipment::Pipe(e) => e,
            Equipment::Splitter(e) => e,
            Equipment::Mixer(e) => e,
        }
    }

    pub fn as_fan(&self) -> Option<&Fan> {
        match self {
            Equipment::Fan(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_cooling_coil(&self) -> Option<&CoolingCoil> {
        match self {
            Equipment::CoolingCoil(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_heating_coil(&self) -> Option<&HeatingCoil> {
        match self {
            Equipment::HeatingCoil(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_terminal(&self) -> Option<&AirTerminal> {
        match self {
            Equipment::AirTerminal(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_terminal_mut(&mut self) -> Option<&mut AirTerminal> {
        match self {
            Equipment::AirTerminal(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_zone_unit(&self) -> Option<&ZoneHvacUnit> {
        match self {
            Equipment::ZoneHvacUnit(u) => Some(u),
            _ => None,
        }
    }

    /// True for pass-through connectors inserted by the translator itself.
    pub fn is_pass_through(&self) -> bool {
        matches!(self, Equipment::Duct(_) | Equipment::Pipe(_))
    }
}

impl HvacComponent for Equipment {
    fn name(&self) -> &str {
        self.inner().name()
    }

    fn class_name(&self) -> &'static str {
        self.inner().class_name()
    }

    fn shape(&self) -> Shape {
        self.inner().shape()
    }

    fn two_stream(&self) -> bool {
        self.inner().two_stream()
    }

    fn service(&self) -> Service {
        self.inner().service()
    }

    fn is_mover(&self) -> bool {
        self.inner().is_mover()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coil::CoolingCoilKind;
    use crate::fan::FanKind;
    use crate::passive::ConnectorFlavor;

    #[test]
    fn dispatch_reaches_inner_kind() {
        let fan = Equipment::Fan(Fan::new("F", FanKind::VariableVolume));
        assert_eq!(fan.name(), "F");
        assert_eq!(fan.class_name(), "FanVariableVolume");
        assert!(fan.is_mover());
        assert!(fan.as_fan().is_some());
        assert!(fan.as_cooling_coil().is_none());
    }

    #[test]
    fn dispatch_shape_and_streams() {
        let chw = Equipment::CoolingCoil(CoolingCoil::new("C", CoolingCoilKind::Water));
        assert!(chw.two_stream());
        assert!(chw.service().cools());
        let split = Equipment::Splitter(Splitter::new("S", ConnectorFlavor::Air));
        assert_eq!(split.shape(), Shape::Branching);
        assert!(Equipment::Duct(Duct::new("D")).is_pass_through());
    }
}
