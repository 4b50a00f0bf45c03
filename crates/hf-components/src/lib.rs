//! hf-components: equipment library for translated HVAC models.
//!
//! Provides typed parameter sets for:
//! - Air-side equipment (fans, heating/cooling coils, terminals, zone units)
//! - Plant equipment (pumps, boilers, chillers, towers, heat exchangers,
//!   water heaters, thermal storage)
//! - Passive connectors (ducts, pipes, splitters, mixers, plenums)
//! - Named resources shared between equipment (curves, schedules)
//!
//! Every equipment kind implements [`HvacComponent`], which is how the
//! translator learns its topology shape, whether it has a second fluid
//! stream, and whether it can heat or cool.
//!
//! # Example
//!
//! ```
//! use hf_components::{Autosizable, Equipment, Fan, FanKind, HvacComponent};
//! use hf_core::units::m3ps;
//!
//! let fan = Fan::new("Supply Fan", FanKind::ConstantVolume)
//!     .with_max_flow(Autosizable::Value(m3ps(0.47)));
//! let eq = Equipment::Fan(fan);
//! assert_eq!(eq.class_name(), "FanConstantVolume");
//! ```

pub mod coil;
pub mod common;
pub mod curve;
pub mod equipment;
pub mod error;
pub mod fan;
pub mod passive;
pub mod plant;
pub mod pump;
pub mod schedule;
pub mod terminal;
pub mod traits;

// Re-exports
pub use coil::{CoolingCoil, CoolingCoilKind, DxCurves, HeatingCoil, HeatingCoilKind};
pub use common::Autosizable;
pub use curve::{Curve, CurveForm};
pub use equipment::Equipment;
pub use error::{ComponentError, ComponentResult};
pub use fan::{Fan, FanKind, FanPosition};
pub use passive::{
    ConnectorFlavor, Duct, EconomizerKind, Mixer, OutdoorAirSystem, Pipe, Plenum, Splitter,
};
pub use plant::{
    Boiler, Chiller, CondenserKind, CoolingTower, CoolingTowerKind, FuelKind, HeatExchanger,
    StorageTankKind, ThermalStorageTank, WaterHeater,
};
pub use pump::{Pump, PumpKind};
pub use schedule::{Schedule, ScheduleKind};
pub use terminal::{AirTerminal, InducedAirSource, TerminalKind, ZoneHvacKind, ZoneHvacUnit};
pub use traits::{HvacComponent, Service};
