//! Plant supply equipment: boilers, chillers, heat rejection, heat
//! exchangers, water heaters and thermal storage.
//!
//! Two-stream equipment keeps its loop-facing stream on [`Side::Primary`]
//! and its second stream (condenser water, demand-side water, source
//! water) on [`Side::Secondary`].
//!
//! [`Side::Primary`]: hf_graph::Side::Primary
//! [`Side::Secondary`]: hf_graph::Side::Secondary

use crate::common::{Autosizable, check_finite, check_fraction};
use crate::error::{ComponentError, ComponentResult};
use crate::traits::{HvacComponent, Service};
use hf_core::CurveId;
use hf_core::units::{Power, Volume};

/// Fuel burned by combustion equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FuelKind {
    Electricity,
    #[default]
    NaturalGas,
    Propane,
    FuelOil,
}

impl FuelKind {
    pub fn engine_name(self) -> &'static str {
        match self {
            FuelKind::Electricity => "Electricity",
            FuelKind::NaturalGas => "NaturalGas",
            FuelKind::Propane => "Propane",
            FuelKind::FuelOil => "FuelOilNo2",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Boiler {
    pub name: String,
    pub capacity: Autosizable<Power>,
    pub thermal_efficiency: f64,
    pub fuel: FuelKind,
    pub efficiency_curve: Option<CurveId>,
}

impl Boiler {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capacity: Autosizable::Autosize,
            thermal_efficiency: 0.8,
            fuel: FuelKind::default(),
            efficiency_curve: None,
        }
    }

    pub fn with_efficiency(mut self, eff: f64) -> ComponentResult<Self> {
        self.thermal_efficiency = check_fraction(eff, "boiler thermal efficiency")?;
        Ok(self)
    }
}

impl HvacComponent for Boiler {
    fn name(&self) -> &str {
        &self.name
    }

    fn class_name(&self) -> &'static str {
        "BoilerHotWater"
    }

    fn service(&self) -> Service {
        Service::Heating
    }
}

/// Chiller heat-rejection path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CondenserKind {
    #[default]
    AirCooled,
    WaterCooled,
}

/// Electric chiller. Water-cooled chillers get a condenser (secondary) side.
#[derive(Debug, Clone, PartialEq)]
pub struct Chiller {
    pub name: String,
    pub capacity: Autosizable<Power>,
    pub cop: f64,
    pub condenser: CondenserKind,
    pub cap_ft: Option<CurveId>,
    pub eir_ft: Option<CurveId>,
    pub eir_fplr: Option<CurveId>,
}

impl Chiller {
    pub fn new(name: impl Into<String>, condenser: CondenserKind) -> Self {
        Self {
            name: name.into(),
            capacity: Autosizable::Autosize,
            cop: 5.5,
            condenser,
            cap_ft: None,
            eir_ft: None,
            eir_fplr: None,
        }
    }

    pub fn with_cop(mut self, cop: f64) -> ComponentResult<Self> {
        check_finite(cop, "chiller COP")?;
        if cop <= 0.0 {
            return Err(ComponentError::NonPhysical { what: "chiller COP" });
        }
        self.cop = cop;
        Ok(self)
    }
}

impl HvacComponent for Chiller {
    fn name(&self) -> &str {
        &self.name
    }

    fn class_name(&self) -> &'static str {
        "ChillerElectricEIR"
    }

    fn two_stream(&self) -> bool {
        self.condenser == CondenserKind::WaterCooled
    }

    fn service(&self) -> Service {
        Service::Cooling
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CoolingTowerKind {
    #[default]
    SingleSpeed,
    TwoSpeed,
    VariableSpeed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoolingTower {
    pub name: String,
    pub kind: CoolingTowerKind,
    pub capacity: Autosizable<Power>,
    pub fan_power: Autosizable<Power>,
}

impl CoolingTower {
    pub fn new(name: impl Into<String>, kind: CoolingTowerKind) -> Self {
        Self {
            name: name.into(),
            kind,
            capacity: Autosizable::Autosize,
            fan_power: Autosizable::Autosize,
        }
    }
}

impl HvacComponent for CoolingTower {
    fn name(&self) -> &str {
        &self.name
    }

    fn class_name(&self) -> &'static str {
        match self.kind {
            CoolingTowerKind::SingleSpeed => "CoolingTowerSingleSpeed",
            CoolingTowerKind::TwoSpeed => "CoolingTowerTwoSpeed",
            CoolingTowerKind::VariableSpeed => "CoolingTowerVariableSpeed",
        }
    }

    fn service(&self) -> Service {
        Service::Cooling
    }
}

/// Fluid-to-fluid heat exchanger. The demand-side loop attaches to the
/// secondary side.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatExchanger {
    pub name: String,
    /// Overall UA in W/K.
    pub ua: Autosizable<f64>,
}

impl HeatExchanger {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ua: Autosizable::Autosize,
        }
    }
}

impl HvacComponent for HeatExchanger {
    fn name(&self) -> &str {
        &self.name
    }

    fn class_name(&self) -> &'static str {
        "HeatExchangerFluidToFluid"
    }

    fn two_stream(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WaterHeater {
    pub name: String,
    pub capacity: Autosizable<Power>,
    pub tank_volume: Autosizable<Volume>,
    pub fuel: FuelKind,
}

impl WaterHeater {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capacity: Autosizable::Autosize,
            tank_volume: Autosizable::Autosize,
            fuel: FuelKind::default(),
        }
    }
}

impl HvacComponent for WaterHeater {
    fn name(&self) -> &str {
        &self.name
    }

    fn class_name(&self) -> &'static str {
        "WaterHeaterMixed"
    }

    fn service(&self) -> Service {
        Service::Heating
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StorageTankKind {
    #[default]
    Mixed,
    Stratified,
}

/// Chilled-water storage tank; the charging (source) loop attaches to the
/// secondary side.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermalStorageTank {
    pub name: String,
    pub kind: StorageTankKind,
    pub volume: Autosizable<Volume>,
}

impl ThermalStorageTank {
    pub fn new(name: impl Into<String>, kind: StorageTankKind) -> Self {
        Self {
            name: name.into(),
            kind,
            volume: Autosizable::Autosize,
        }
    }
}

impl HvacComponent for ThermalStorageTank {
    fn name(&self) -> &str {
        &self.name
    }

    fn class_name(&self) -> &'static str {
        match self.kind {
            StorageTankKind::Mixed => "ThermalStorageChilledWaterMixed",
            StorageTankKind::Stratified => "ThermalStorageChilledWaterStratified",
        }
    }

    fn two_stream(&self) -> bool {
        true
    }
}
