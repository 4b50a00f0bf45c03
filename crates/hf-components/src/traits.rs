//! Core traits for equipment kinds.

use hf_graph::Shape;

/// Thermal service an equipment item can provide to the stream passing through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    None,
    Heating,
    Cooling,
    HeatingAndCooling,
}

impl Service {
    pub fn heats(self) -> bool {
        matches!(self, Service::Heating | Service::HeatingAndCooling)
    }

    pub fn cools(self) -> bool {
        matches!(self, Service::Cooling | Service::HeatingAndCooling)
    }
}

/// Common view of every equipment kind in the model.
///
/// Implementations are pure descriptions: they never touch the graph. The
/// translator uses them to decide how many ports to create and which
/// components a dual-setpoint split must isolate.
pub trait HvacComponent {
    /// Equipment name for diagnostics and identification.
    fn name(&self) -> &str;

    /// Simulation-engine class name of the concrete kind (e.g. `FanConstantVolume`).
    fn class_name(&self) -> &'static str;

    /// Topology shape of the primary stream.
    fn shape(&self) -> Shape {
        Shape::StraightThrough
    }

    /// True when the component carries a secondary (water/condenser/source) stream.
    fn two_stream(&self) -> bool {
        false
    }

    /// What the component does to the primary stream's temperature.
    fn service(&self) -> Service {
        Service::None
    }

    /// True for air movers and pumps: the pivot a deck-temperature split is
    /// positioned against.
    fn is_mover(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_flags() {
        assert!(Service::Heating.heats());
        assert!(!Service::Heating.cools());
        assert!(Service::HeatingAndCooling.heats() && Service::HeatingAndCooling.cools());
        assert!(!Service::None.heats() && !Service::None.cools());
    }
}
