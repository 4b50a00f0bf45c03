//! Plant pump parameter set.

use crate::common::{Autosizable, check_fraction};
use crate::error::{ComponentError, ComponentResult};
use crate::traits::HvacComponent;
use hf_core::units::{Pressure, VolumeRate, pa};

/// Speed control of a pump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PumpKind {
    #[default]
    ConstantSpeed,
    VariableSpeed,
}

/// Loop or branch pump.
///
/// Pumps are the pivot of a plant supply chain when a deck-temperature
/// split is placed: equipment before the loop pump is upstream of it.
#[derive(Clone, Debug, PartialEq)]
pub struct Pump {
    pub name: String,
    pub kind: PumpKind,
    /// Design flow; autosized unless an explicit value was read.
    pub design_flow: Autosizable<VolumeRate>,
    /// Design head.
    pub design_head: Pressure,
    /// Motor efficiency in (0, 1].
    pub motor_efficiency: f64,
}

impl Pump {
    /// Create a new pump with 179 kPa (60 ftH2O) of head.
    pub fn new(name: impl Into<String>, kind: PumpKind) -> Self {
        Self {
            name: name.into(),
            kind,
            design_flow: Autosizable::Autosize,
            design_head: pa(179_352.0),
            motor_efficiency: 0.9,
        }
    }

    pub fn with_design_flow(mut self, flow: Autosizable<VolumeRate>) -> Self {
        self.design_flow = flow;
        self
    }

    /// # Errors
    /// Returns error if the head is not positive.
    pub fn with_head(mut self, head: Pressure) -> ComponentResult<Self> {
        if !head.value.is_finite() || head.value <= 0.0 {
            return Err(ComponentError::InvalidArg {
                what: "pump head must be positive",
            });
        }
        self.design_head = head;
        Ok(self)
    }

    pub fn with_motor_efficiency(mut self, eta: f64) -> ComponentResult<Self> {
        self.motor_efficiency = check_fraction(eta, "pump motor efficiency")?;
        Ok(self)
    }
}

impl HvacComponent for Pump {
    fn name(&self) -> &str {
        &self.name
    }

    fn class_name(&self) -> &'static str {
        match self.kind {
            PumpKind::ConstantSpeed => "PumpConstantSpeed",
            PumpKind::VariableSpeed => "PumpVariableSpeed",
        }
    }

    fn is_mover(&self) -> bool {
        true
    }
}
