//! Setpoint strategies.

use hf_core::units::Temperature;
use hf_core::{NodeId, ScheduleId, ZoneId};
use serde::{Deserialize, Serialize};

/// Which warmest-zone reset variant to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WarmestFlavor {
    #[default]
    TemperatureFirst,
    FlowFirst,
}

/// How a setpoint manager computes the temperature at its node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SetpointStrategy {
    /// Constant supply temperature.
    Fixed { temperature: Temperature },

    /// Supply temperature follows a named schedule.
    Scheduled { schedule: ScheduleId },

    /// Linear reset between two outdoor temperatures.
    OutdoorReset {
        setpoint_at_outdoor_low: Temperature,
        setpoint_at_outdoor_high: Temperature,
        outdoor_low: Temperature,
        outdoor_high: Temperature,
    },

    /// Split marker at the supply outlet; the actual control lives on the
    /// per-component overlays it implies.
    DualSetpoint {
        heating: ScheduleId,
        cooling: ScheduleId,
    },

    /// Reset to satisfy the warmest zone.
    Warmest {
        flavor: WarmestFlavor,
        minimum: Temperature,
        maximum: Temperature,
    },

    /// Supply temperature set by the load of one control zone.
    SingleZoneReheat {
        control_zone: ZoneId,
        minimum: Temperature,
        maximum: Temperature,
    },

    /// Track the temperature of another node.
    Relative { reference: NodeId },
}

impl SetpointStrategy {
    /// Simulation-engine class name of the manager implementing this strategy.
    pub fn class_name(&self) -> &'static str {
        match self {
            SetpointStrategy::Fixed { .. } | SetpointStrategy::Scheduled { .. } => {
                "SetpointManagerScheduled"
            }
            SetpointStrategy::OutdoorReset { .. } => "SetpointManagerOutdoorAirReset",
            SetpointStrategy::DualSetpoint { .. } => "SetpointManagerScheduledDualSetpoint",
            SetpointStrategy::Warmest {
                flavor: WarmestFlavor::TemperatureFirst,
                ..
            } => "SetpointManagerWarmest",
            SetpointStrategy::Warmest {
                flavor: WarmestFlavor::FlowFirst,
                ..
            } => "SetpointManagerWarmestTemperatureFlow",
            SetpointStrategy::SingleZoneReheat { .. } => "SetpointManagerSingleZoneReheat",
            SetpointStrategy::Relative { .. } => "SetpointManagerFollowSystemNodeTemperature",
        }
    }

    pub fn is_dual(&self) -> bool {
        matches!(self, SetpointStrategy::DualSetpoint { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hf_core::units::celsius;

    #[test]
    fn class_names_follow_variant() {
        let w = SetpointStrategy::Warmest {
            flavor: WarmestFlavor::FlowFirst,
            minimum: celsius(12.0),
            maximum: celsius(18.0),
        };
        assert_eq!(w.class_name(), "SetpointManagerWarmestTemperatureFlow");
        let fixed = SetpointStrategy::Fixed {
            temperature: celsius(12.78),
        };
        assert_eq!(fixed.class_name(), "SetpointManagerScheduled");
        assert!(!fixed.is_dual());
    }

    #[test]
    fn strategy_serializes_with_type_tag() {
        let s = SetpointStrategy::Relative {
            reference: NodeId::from_index(7),
        };
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, r#"{"type":"Relative","reference":7}"#);
    }
}
