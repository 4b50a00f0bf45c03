//! Heating and cooling coils.

use crate::common::{Autosizable, check_finite, check_fraction};
use crate::error::{ComponentError, ComponentResult};
use crate::traits::{HvacComponent, Service};
use hf_core::units::{Power, VolumeRate};
use hf_core::{CurveId, ScheduleId};

/// Heating coil technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeatingCoilKind {
    Electric,
    Gas,
    Water,
    HeatPump,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatingCoil {
    pub name: String,
    pub kind: HeatingCoilKind,
    pub capacity: Autosizable<Power>,
    /// Burner or resistance efficiency; 1.0 for water and heat-pump coils.
    pub efficiency: f64,
    /// Rated COP of a DX heat-pump coil.
    pub cop: Option<f64>,
    pub availability: Option<ScheduleId>,
}

impl HeatingCoil {
    pub fn new(name: impl Into<String>, kind: HeatingCoilKind) -> Self {
        Self {
            name: name.into(),
            kind,
            capacity: Autosizable::Autosize,
            efficiency: match kind {
                HeatingCoilKind::Gas => 0.8,
                _ => 1.0,
            },
            cop: match kind {
                HeatingCoilKind::HeatPump => Some(3.0),
                _ => None,
            },
            availability: None,
        }
    }

    pub fn with_capacity(mut self, capacity: Autosizable<Power>) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_efficiency(mut self, efficiency: f64) -> ComponentResult<Self> {
        self.efficiency = check_fraction(efficiency, "heating coil efficiency")?;
        Ok(self)
    }

    pub fn with_cop(mut self, cop: f64) -> ComponentResult<Self> {
        check_finite(cop, "heating coil COP")?;
        if cop <= 0.0 {
            return Err(ComponentError::NonPhysical {
                what: "heating coil COP",
            });
        }
        self.cop = Some(cop);
        Ok(self)
    }
}

impl HvacComponent for HeatingCoil {
    fn name(&self) -> &str {
        &self.name
    }

    fn class_name(&self) -> &'static str {
        match self.kind {
            HeatingCoilKind::Electric => "CoilHeatingElectric",
            HeatingCoilKind::Gas => "CoilHeatingGas",
            HeatingCoilKind::Water => "CoilHeatingWater",
            HeatingCoilKind::HeatPump => "CoilHeatingDXSingleSpeed",
        }
    }

    fn two_stream(&self) -> bool {
        self.kind == HeatingCoilKind::Water
    }

    fn service(&self) -> Service {
        Service::Heating
    }
}

/// Cooling coil technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoolingCoilKind {
    Water,
    DxSingleSpeed,
    DxTwoSpeed,
}

/// Performance curves of a DX cooling coil.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DxCurves {
    pub cap_ft: CurveId,
    pub cap_fflow: CurveId,
    pub eir_ft: CurveId,
    pub eir_fflow: CurveId,
    pub part_load: CurveId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoolingCoil {
    pub name: String,
    pub kind: CoolingCoilKind,
    pub rated_total_capacity: Autosizable<Power>,
    pub rated_shr: Autosizable<f64>,
    pub rated_cop: f64,
    pub rated_air_flow: Autosizable<VolumeRate>,
    /// Two-speed coils only; left unset when no stage fraction is known.
    pub low_speed_total_capacity: Option<Power>,
    pub low_speed_air_flow: Option<VolumeRate>,
    pub curves: Option<DxCurves>,
    pub availability: Option<ScheduleId>,
}

impl CoolingCoil {
    pub fn new(name: impl Into<String>, kind: CoolingCoilKind) -> Self {
        Self {
            name: name.into(),
            kind,
            rated_total_capacity: Autosizable::Autosize,
            rated_shr: Autosizable::Autosize,
            rated_cop: 3.0,
            rated_air_flow: Autosizable::Autosize,
            low_speed_total_capacity: None,
            low_speed_air_flow: None,
            curves: None,
            availability: None,
        }
    }

    pub fn with_capacity(mut self, capacity: Autosizable<Power>) -> Self {
        self.rated_total_capacity = capacity;
        self
    }

    pub fn with_air_flow(mut self, flow: Autosizable<VolumeRate>) -> Self {
        self.rated_air_flow = flow;
        self
    }

    pub fn with_shr(mut self, shr: f64) -> ComponentResult<Self> {
        self.rated_shr = Autosizable::Value(check_fraction(shr, "rated SHR")?);
        Ok(self)
    }

    pub fn with_cop(mut self, cop: f64) -> ComponentResult<Self> {
        check_finite(cop, "cooling coil COP")?;
        if cop <= 0.0 {
            return Err(ComponentError::NonPhysical {
                what: "cooling coil COP",
            });
        }
        self.rated_cop = cop;
        Ok(self)
    }

    pub fn with_curves(mut self, curves: DxCurves) -> Self {
        self.curves = Some(curves);
        self
    }

    pub fn is_dx(&self) -> bool {
        !matches!(self.kind, CoolingCoilKind::Water)
    }
}

impl HvacComponent for CoolingCoil {
    fn name(&self) -> &str {
        &self.name
    }

    fn class_name(&self) -> &'static str {
        match self.kind {
            CoolingCoilKind::Water => "CoilCoolingWater",
            CoolingCoilKind::DxSingleSpeed => "CoilCoolingDXSingleSpeed",
            CoolingCoilKind::DxTwoSpeed => "CoilCoolingDXTwoSpeed",
        }
    }

    fn two_stream(&self) -> bool {
        self.kind == CoolingCoilKind::Water
    }

    fn service(&self) -> Service {
        Service::Cooling
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heating_coil_defaults_per_kind() {
        let gas = HeatingCoil::new("Furnace", HeatingCoilKind::Gas);
        assert_eq!(gas.efficiency, 0.8);
        assert_eq!(gas.class_name(), "CoilHeatingGas");
        let hp = HeatingCoil::new("HP", HeatingCoilKind::HeatPump);
        assert_eq!(hp.cop, Some(3.0));
        assert!(HeatingCoil::new("HW", HeatingCoilKind::Water).two_stream());
    }

    #[test]
    fn cooling_coil_kind_drives_class_and_streams() {
        let dx = CoolingCoil::new("DX", CoolingCoilKind::DxSingleSpeed);
        assert!(dx.is_dx());
        assert!(!dx.two_stream());
        assert_eq!(dx.service(), Service::Cooling);
        let chw = CoolingCoil::new("CHW", CoolingCoilKind::Water);
        assert!(chw.two_stream());
        assert_eq!(chw.class_name(), "CoilCoolingWater");
    }

    #[test]
    fn invalid_parameters_rejected() {
        assert!(CoolingCoil::new("DX", CoolingCoilKind::DxTwoSpeed).with_shr(1.4).is_err());
        assert!(CoolingCoil::new("DX", CoolingCoilKind::DxTwoSpeed).with_cop(-1.0).is_err());
        assert!(HeatingCoil::new("E", HeatingCoilKind::Electric).with_efficiency(0.0).is_err());
    }
}
