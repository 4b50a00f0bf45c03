//! Discriminator vocabularies.
//!
//! Each family maps case-insensitive free text onto a closed enum through an
//! explicit lowercase table. Whitespace, `_` and `-` are ignored when
//! matching, so `Variable Speed Drive` and `VariableSpeedDrive` agree.

use hf_components::{
    CondenserKind, CoolingTowerKind, EconomizerKind, FanKind, FanPosition, FuelKind,
    HeatingCoilKind, PumpKind, StorageTankKind, TerminalKind, ZoneHvacKind,
};

use crate::model::{
    AirSegmentKind, AirSystemKind, ControlKind, FluidSegmentKind, FluidSystemKind, ZoneKind,
};

/// A closed set of values selected by a text field.
pub trait Vocabulary: Copy + Sized + 'static {
    /// Family name used in diagnostics.
    const FAMILY: &'static str;

    fn table() -> &'static [(&'static str, Self)];

    /// Variant used when the field is missing or unrecognized.
    fn fallback() -> Self;

    fn parse(text: &str) -> Option<Self> {
        let key = normalize(text);
        Self::table()
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }
}

fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Cooling coil technology as written in input; the stage count decides
/// between single- and two-speed DX.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoolingCoilType {
    DirectExpansion,
    ChilledWater,
}

/// Fan motor location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorPosition {
    InAirStream,
    OutOfAirStream,
}

impl MotorPosition {
    pub fn airstream_fraction(self) -> f64 {
        match self {
            MotorPosition::InAirStream => 1.0,
            MotorPosition::OutOfAirStream => 0.0,
        }
    }
}

macro_rules! vocabulary {
    ($ty:ty, $family:literal, $fallback:expr, [$($key:literal => $val:expr),+ $(,)?]) => {
        impl Vocabulary for $ty {
            const FAMILY: &'static str = $family;

            fn table() -> &'static [(&'static str, Self)] {
                &[$(($key, $val)),+]
            }

            fn fallback() -> Self {
                $fallback
            }
        }
    };
}

vocabulary!(FanKind, "fan control method", FanKind::ConstantVolume, [
    "constantvolume" => FanKind::ConstantVolume,
    "twospeed" => FanKind::TwoSpeed,
    "variablespeeddrive" => FanKind::VariableVolume,
    "variablevolume" => FanKind::VariableVolume,
    "onoff" => FanKind::OnOff,
    "cycling" => FanKind::OnOff,
]);

vocabulary!(FanPosition, "fan position", FanPosition::DrawThrough, [
    "blowthrough" => FanPosition::BlowThrough,
    "drawthrough" => FanPosition::DrawThrough,
]);

vocabulary!(MotorPosition, "fan motor position", MotorPosition::InAirStream, [
    "inairstream" => MotorPosition::InAirStream,
    "outofairstream" => MotorPosition::OutOfAirStream,
]);

vocabulary!(CoolingCoilType, "cooling coil type", CoolingCoilType::DirectExpansion, [
    "directexpansion" => CoolingCoilType::DirectExpansion,
    "dx" => CoolingCoilType::DirectExpansion,
    "chilledwater" => CoolingCoilType::ChilledWater,
]);

vocabulary!(HeatingCoilKind, "heating coil type", HeatingCoilKind::Electric, [
    "resistance" => HeatingCoilKind::Electric,
    "electric" => HeatingCoilKind::Electric,
    "furnace" => HeatingCoilKind::Gas,
    "hotwater" => HeatingCoilKind::Water,
    "heatpump" => HeatingCoilKind::HeatPump,
]);

vocabulary!(TerminalKind, "terminal unit type", TerminalKind::Uncontrolled, [
    "uncontrolled" => TerminalKind::Uncontrolled,
    "vavnoreheatbox" => TerminalKind::VavNoReheat,
    "vavreheatbox" => TerminalKind::VavReheat,
    "seriesfanbox" => TerminalKind::SeriesPiu,
    "parallelfanbox" => TerminalKind::ParallelPiu,
    "constantvolumereheat" => TerminalKind::ConstantVolumeReheat,
]);

vocabulary!(ZoneHvacKind, "zone system type", ZoneHvacKind::PackagedTerminalAirConditioner, [
    "ptac" => ZoneHvacKind::PackagedTerminalAirConditioner,
    "pthp" => ZoneHvacKind::PackagedTerminalHeatPump,
    "fpfc" => ZoneHvacKind::FourPipeFanCoil,
    "baseboard" => ZoneHvacKind::BaseboardElectric,
    "baseboardhotwater" => ZoneHvacKind::BaseboardWater,
    "unitheater" => ZoneHvacKind::UnitHeater,
]);

vocabulary!(AirSystemKind, "air system type", AirSystemKind::Szac, [
    "szac" => AirSystemKind::Szac,
    "szhp" => AirSystemKind::Szhp,
    "szvavac" => AirSystemKind::SzvavAc,
    "szvavhp" => AirSystemKind::SzvavHp,
    "pvav" => AirSystemKind::Pvav,
    "vav" => AirSystemKind::Vav,
    "doas" => AirSystemKind::Doas,
]);

vocabulary!(FluidSystemKind, "fluid system type", FluidSystemKind::HotWater, [
    "chilledwater" => FluidSystemKind::ChilledWater,
    "hotwater" => FluidSystemKind::HotWater,
    "condenserwater" => FluidSystemKind::CondenserWater,
    "servicehotwater" => FluidSystemKind::ServiceHotWater,
]);

vocabulary!(FluidSegmentKind, "fluid segment type", FluidSegmentKind::PrimarySupply, [
    "primarysupply" => FluidSegmentKind::PrimarySupply,
    "primaryreturn" => FluidSegmentKind::PrimaryReturn,
    "secondarysupply" => FluidSegmentKind::SecondarySupply,
    "secondaryreturn" => FluidSegmentKind::SecondaryReturn,
]);

vocabulary!(AirSegmentKind, "air segment type", AirSegmentKind::Supply, [
    "supply" => AirSegmentKind::Supply,
    "return" => AirSegmentKind::Return,
    "relief" => AirSegmentKind::Relief,
]);

vocabulary!(ControlKind, "supply temperature control", ControlKind::Fixed, [
    "fixed" => ControlKind::Fixed,
    "scheduled" => ControlKind::Scheduled,
    "outsideairreset" => ControlKind::OutsideAirReset,
    "warmestreset" => ControlKind::WarmestReset,
    "warmestresetflowfirst" => ControlKind::WarmestResetFlowFirst,
    "singlezonereheat" => ControlKind::SingleZoneReheat,
    "fixeddualsetpoint" => ControlKind::FixedDualSetpoint,
    "scheduleddualsetpoint" => ControlKind::ScheduledDualSetpoint,
]);

vocabulary!(PumpKind, "pump speed control", PumpKind::ConstantSpeed, [
    "constantspeed" => PumpKind::ConstantSpeed,
    "variablespeed" => PumpKind::VariableSpeed,
]);

vocabulary!(CondenserKind, "condenser type", CondenserKind::AirCooled, [
    "air" => CondenserKind::AirCooled,
    "water" => CondenserKind::WaterCooled,
]);

vocabulary!(CoolingTowerKind, "heat rejection type", CoolingTowerKind::SingleSpeed, [
    "opentower" => CoolingTowerKind::SingleSpeed,
    "opentowertwospeed" => CoolingTowerKind::TwoSpeed,
    "opentowervariablespeed" => CoolingTowerKind::VariableSpeed,
]);

vocabulary!(StorageTankKind, "storage tank type", StorageTankKind::Mixed, [
    "mixed" => StorageTankKind::Mixed,
    "stratified" => StorageTankKind::Stratified,
]);

vocabulary!(EconomizerKind, "economizer control", EconomizerKind::NoEconomizer, [
    "noeconomizer" => EconomizerKind::NoEconomizer,
    "fixeddrybulb" => EconomizerKind::FixedDryBulb,
    "differentialdrybulb" => EconomizerKind::DifferentialDryBulb,
    "fixedenthalpy" => EconomizerKind::FixedEnthalpy,
    "differentialenthalpy" => EconomizerKind::DifferentialEnthalpy,
]);

vocabulary!(ZoneKind, "zone type", ZoneKind::Conditioned, [
    "conditioned" => ZoneKind::Conditioned,
    "plenum" => ZoneKind::Plenum,
    "unconditioned" => ZoneKind::Unconditioned,
]);

vocabulary!(FuelKind, "fuel source", FuelKind::NaturalGas, [
    "electricity" => FuelKind::Electricity,
    "electric" => FuelKind::Electricity,
    "naturalgas" => FuelKind::NaturalGas,
    "gas" => FuelKind::NaturalGas,
    "propane" => FuelKind::Propane,
    "oil" => FuelKind::FuelOil,
    "fueloil" => FuelKind::FuelOil,
]);
