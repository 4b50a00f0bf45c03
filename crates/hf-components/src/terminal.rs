//! Zone-facing equipment: air terminals and zone HVAC units.
//!
//! Terminals and units own their fans and coils by id. The contained
//! equipment lives in the model's equipment table like every other item,
//! but its air side is internal to the owner and never wired into a loop.

use crate::common::{Autosizable, check_fraction};
use crate::error::ComponentResult;
use crate::traits::{HvacComponent, Service};
use hf_core::units::VolumeRate;
use hf_core::{EquipId, ZoneId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TerminalKind {
    #[default]
    Uncontrolled,
    VavNoReheat,
    VavReheat,
    SeriesPiu,
    ParallelPiu,
    ConstantVolumeReheat,
}

impl TerminalKind {
    pub fn has_reheat(self) -> bool {
        matches!(
            self,
            TerminalKind::VavReheat
                | TerminalKind::SeriesPiu
                | TerminalKind::ParallelPiu
                | TerminalKind::ConstantVolumeReheat
        )
    }

    /// Fan-powered boxes carry their own fan and draw secondary air.
    pub fn has_fan(self) -> bool {
        matches!(self, TerminalKind::SeriesPiu | TerminalKind::ParallelPiu)
    }
}

/// Where a fan-powered terminal draws its secondary air from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InducedAirSource {
    /// A return plenum zone.
    Plenum(ZoneId),
    /// The exhaust of an ordinary zone.
    Zone(ZoneId),
}

impl InducedAirSource {
    pub fn zone(self) -> ZoneId {
        match self {
            InducedAirSource::Plenum(z) | InducedAirSource::Zone(z) => z,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AirTerminal {
    pub name: String,
    pub kind: TerminalKind,
    pub max_primary_flow: Autosizable<VolumeRate>,
    pub min_flow_fraction: Option<f64>,
    pub reheat_coil: Option<EquipId>,
    pub fan: Option<EquipId>,
    pub induced_air: Option<InducedAirSource>,
}

impl AirTerminal {
    pub fn new(name: impl Into<String>, kind: TerminalKind) -> Self {
        Self {
            name: name.into(),
            kind,
            max_primary_flow: Autosizable::Autosize,
            min_flow_fraction: None,
            reheat_coil: None,
            fan: None,
            induced_air: None,
        }
    }

    pub fn with_min_flow_fraction(mut self, frac: f64) -> ComponentResult<Self> {
        self.min_flow_fraction = Some(check_fraction(frac, "terminal minimum flow fraction")?);
        Ok(self)
    }
}

impl HvacComponent for AirTerminal {
    fn name(&self) -> &str {
        &self.name
    }

    fn class_name(&self) -> &'static str {
        match self.kind {
            TerminalKind::Uncontrolled => "AirTerminalSingleDuctUncontrolled",
            TerminalKind::VavNoReheat => "AirTerminalSingleDuctVAVNoReheat",
            TerminalKind::VavReheat => "AirTerminalSingleDuctVAVReheat",
            TerminalKind::SeriesPiu => "AirTerminalSingleDuctSeriesPIUReheat",
            TerminalKind::ParallelPiu => "AirTerminalSingleDuctParallelPIUReheat",
            TerminalKind::ConstantVolumeReheat => "AirTerminalSingleDuctConstantVolumeReheat",
        }
    }

    fn service(&self) -> Service {
        if self.kind.has_reheat() {
            Service::Heating
        } else {
            Service::None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ZoneHvacKind {
    #[default]
    PackagedTerminalAirConditioner,
    PackagedTerminalHeatPump,
    FourPipeFanCoil,
    BaseboardElectric,
    BaseboardWater,
    UnitHeater,
}

impl ZoneHvacKind {
    pub fn has_fan(self) -> bool {
        !matches!(
            self,
            ZoneHvacKind::BaseboardElectric | ZoneHvacKind::BaseboardWater
        )
    }

    pub fn has_cooling_coil(self) -> bool {
        matches!(
            self,
            ZoneHvacKind::PackagedTerminalAirConditioner
                | ZoneHvacKind::PackagedTerminalHeatPump
                | ZoneHvacKind::FourPipeFanCoil
        )
    }

    pub fn has_heating_coil(self) -> bool {
        self.has_fan()
    }
}

/// Zone equipment that conditions a zone directly (not through an air loop).
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneHvacUnit {
    pub name: String,
    pub kind: ZoneHvacKind,
    pub fan: Option<EquipId>,
    pub cooling_coil: Option<EquipId>,
    pub heating_coil: Option<EquipId>,
}

impl ZoneHvacUnit {
    pub fn new(name: impl Into<String>, kind: ZoneHvacKind) -> Self {
        Self {
            name: name.into(),
            kind,
            fan: None,
            cooling_coil: None,
            heating_coil: None,
        }
    }
}

impl HvacComponent for ZoneHvacUnit {
    fn name(&self) -> &str {
        &self.name
    }

    fn class_name(&self) -> &'static str {
        match self.kind {
            ZoneHvacKind::PackagedTerminalAirConditioner => {
                "ZoneHVACPackagedTerminalAirConditioner"
            }
            ZoneHvacKind::PackagedTerminalHeatPump => "ZoneHVACPackagedTerminalHeatPump",
            ZoneHvacKind::FourPipeFanCoil => "ZoneHVACFourPipeFanCoil",
            ZoneHvacKind::BaseboardElectric => "ZoneHVACBaseboardConvectiveElectric",
            ZoneHvacKind::BaseboardWater => "ZoneHVACBaseboardConvectiveWater",
            ZoneHvacKind::UnitHeater => "ZoneHVACUnitHeater",
        }
    }

    /// Water baseboards take hot water directly on their secondary side.
    fn two_stream(&self) -> bool {
        self.kind == ZoneHvacKind::BaseboardWater
    }

    fn service(&self) -> Service {
        if self.kind.has_cooling_coil() {
            Service::HeatingAndCooling
        } else {
            Service::Heating
        }
    }
}
