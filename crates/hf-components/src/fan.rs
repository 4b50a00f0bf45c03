//! Supply, return and terminal fans.

use crate::common::{Autosizable, check_fraction};
use crate::error::ComponentResult;
use crate::traits::HvacComponent;
use hf_core::units::{Pressure, VolumeRate, pa};
use hf_core::{CurveId, ScheduleId};

/// Fan control method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FanKind {
    ConstantVolume,
    OnOff,
    TwoSpeed,
    VariableVolume,
}

/// Fan placement relative to the coils of its segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FanPosition {
    BlowThrough,
    #[default]
    DrawThrough,
}

/// An air mover.
///
/// `power_curve` is only meaningful for variable-volume fans, where it
/// describes part-load power as a function of flow fraction.
#[derive(Debug, Clone, PartialEq)]
pub struct Fan {
    pub name: String,
    pub kind: FanKind,
    pub position: FanPosition,
    pub max_flow: Autosizable<VolumeRate>,
    pub pressure_rise: Pressure,
    pub total_efficiency: f64,
    pub motor_efficiency: f64,
    pub motor_in_airstream_fraction: f64,
    pub power_curve: Option<CurveId>,
    pub availability: Option<ScheduleId>,
}

impl Fan {
    /// Fan with autosized flow and generic efficiencies.
    pub fn new(name: impl Into<String>, kind: FanKind) -> Self {
        Self {
            name: name.into(),
            kind,
            position: FanPosition::default(),
            max_flow: Autosizable::Autosize,
            pressure_rise: pa(500.0),
            total_efficiency: 0.6,
            motor_efficiency: 0.9,
            motor_in_airstream_fraction: 1.0,
            power_curve: None,
            availability: None,
        }
    }

    pub fn with_max_flow(mut self, flow: Autosizable<VolumeRate>) -> Self {
        self.max_flow = flow;
        self
    }

    pub fn with_position(mut self, position: FanPosition) -> Self {
        self.position = position;
        self
    }

    pub fn with_pressure_rise(mut self, rise: Pressure) -> Self {
        self.pressure_rise = rise;
        self
    }

    /// Set total and motor efficiency, both in (0, 1].
    pub fn with_efficiencies(mut self, total: f64, motor: f64) -> ComponentResult<Self> {
        self.total_efficiency = check_fraction(total, "fan total efficiency")?;
        self.motor_efficiency = check_fraction(motor, "fan motor efficiency")?;
        Ok(self)
    }
}

impl HvacComponent for Fan {
    fn name(&self) -> &str {
        &self.name
    }

    fn class_name(&self) -> &'static str {
        match self.kind {
            FanKind::ConstantVolume => "FanConstantVolume",
            FanKind::OnOff => "FanOnOff",
            FanKind::TwoSpeed => "FanSystemModel",
            FanKind::VariableVolume => "FanVariableVolume",
        }
    }

    fn is_mover(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hf_core::units::m3ps;

    #[test]
    fn defaults_are_autosized_draw_through() {
        let fan = Fan::new("F", FanKind::VariableVolume);
        assert!(fan.max_flow.is_autosized());
        assert_eq!(fan.position, FanPosition::DrawThrough);
        assert_eq!(fan.class_name(), "FanVariableVolume");
        assert!(fan.is_mover());
    }

    #[test]
    fn explicit_flow_disables_autosize() {
        let fan = Fan::new("F", FanKind::ConstantVolume)
            .with_max_flow(Autosizable::Value(m3ps(1.2)));
        assert!(!fan.max_flow.is_autosized());
    }

    #[test]
    fn efficiencies_are_validated() {
        assert!(Fan::new("F", FanKind::OnOff).with_efficiencies(0.5, 0.8).is_ok());
        assert!(Fan::new("F", FanKind::OnOff).with_efficiencies(1.5, 0.8).is_err());
    }
}
