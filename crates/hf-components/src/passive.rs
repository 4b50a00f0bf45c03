//! Connectors and pass-through equipment.

use crate::common::Autosizable;
use crate::traits::HvacComponent;
use hf_core::{EquipId, ZoneId};
use hf_core::units::VolumeRate;
use hf_graph::Shape;

/// Which kind of loop a splitter or mixer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectorFlavor {
    Air,
    Plant,
}

/// Adiabatic air pass-through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duct {
    pub name: String,
}

impl Duct {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl HvacComponent for Duct {
    fn name(&self) -> &str {
        &self.name
    }

    fn class_name(&self) -> &'static str {
        "Duct"
    }
}

/// Adiabatic water pass-through; also used as the bypass branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipe {
    pub name: String,
}

impl Pipe {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl HvacComponent for Pipe {
    fn name(&self) -> &str {
        &self.name
    }

    fn class_name(&self) -> &'static str {
        "PipeAdiabatic"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splitter {
    pub name: String,
    pub flavor: ConnectorFlavor,
}

impl Splitter {
    pub fn new(name: impl Into<String>, flavor: ConnectorFlavor) -> Self {
        Self {
            name: name.into(),
            flavor,
        }
    }
}

impl HvacComponent for Splitter {
    fn name(&self) -> &str {
        &self.name
    }

    fn class_name(&self) -> &'static str {
        match self.flavor {
            ConnectorFlavor::Air => "AirLoopHVACZoneSplitter",
            ConnectorFlavor::Plant => "ConnectorSplitter",
        }
    }

    fn shape(&self) -> Shape {
        Shape::Branching
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mixer {
    pub name: String,
    pub flavor: ConnectorFlavor,
}

impl Mixer {
    pub fn new(name: impl Into<String>, flavor: ConnectorFlavor) -> Self {
        Self {
            name: name.into(),
            flavor,
        }
    }
}

impl HvacComponent for Mixer {
    fn name(&self) -> &str {
        &self.name
    }

    fn class_name(&self) -> &'static str {
        match self.flavor {
            ConnectorFlavor::Air => "AirLoopHVACZoneMixer",
            ConnectorFlavor::Plant => "ConnectorMixer",
        }
    }

    fn shape(&self) -> Shape {
        Shape::Mixing
    }
}

/// Return plenum collecting the returns of the zones that name `zone` as
/// their plenum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plenum {
    pub name: String,
    pub zone: ZoneId,
}

impl Plenum {
    pub fn new(name: impl Into<String>, zone: ZoneId) -> Self {
        Self {
            name: name.into(),
            zone,
        }
    }
}

impl HvacComponent for Plenum {
    fn name(&self) -> &str {
        &self.name
    }

    fn class_name(&self) -> &'static str {
        "AirLoopHVACReturnPlenum"
    }

    fn shape(&self) -> Shape {
        Shape::Mixing
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EconomizerKind {
    #[default]
    NoEconomizer,
    FixedDryBulb,
    DifferentialDryBulb,
    FixedEnthalpy,
    DifferentialEnthalpy,
}

impl EconomizerKind {
    pub fn engine_name(self) -> &'static str {
        match self {
            EconomizerKind::NoEconomizer => "NoEconomizer",
            EconomizerKind::FixedDryBulb => "FixedDryBulb",
            EconomizerKind::DifferentialDryBulb => "DifferentialDryBulb",
            EconomizerKind::FixedEnthalpy => "FixedEnthalpy",
            EconomizerKind::DifferentialEnthalpy => "DifferentialEnthalpy",
        }
    }
}

/// Outdoor-air mixing box with its controller, at the head of the supply chain.
#[derive(Debug, Clone, PartialEq)]
pub struct OutdoorAirSystem {
    pub name: String,
    pub economizer: EconomizerKind,
    pub min_outdoor_flow: Autosizable<VolumeRate>,
    pub max_outdoor_flow: Autosizable<VolumeRate>,
    /// Relief (exhaust) fan contained in the mixing box.
    pub relief_fan: Option<EquipId>,
}

impl OutdoorAirSystem {
    pub fn new(name: impl Into<String>, economizer: EconomizerKind) -> Self {
        Self {
            name: name.into(),
            economizer,
            min_outdoor_flow: Autosizable::Autosize,
            max_outdoor_flow: Autosizable::Autosize,
            relief_fan: None,
        }
    }
}

impl HvacComponent for OutdoorAirSystem {
    fn name(&self) -> &str {
        &self.name
    }

    fn class_name(&self) -> &'static str {
        "AirLoopHVACOutdoorAirSystem"
    }
}
