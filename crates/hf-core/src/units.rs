// hf-core/src/units.rs

use uom::si::f64::{
    Power as UomPower, Pressure as UomPressure, Ratio as UomRatio,
    TemperatureInterval as UomTemperatureInterval,
    ThermodynamicTemperature as UomThermodynamicTemperature, Volume as UomVolume,
    VolumeRate as UomVolumeRate,
};

use crate::numeric::{Real, ensure_finite};
use crate::HfResult;

// Public canonical unit types (SI, f64)
pub type Power = UomPower;
pub type Pressure = UomPressure;
pub type Ratio = UomRatio;
pub type TempInterval = UomTemperatureInterval;
pub type Temperature = UomThermodynamicTemperature;
pub type Volume = UomVolume;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn m3ps(v: f64) -> VolumeRate {
    use uom::si::volume_rate::cubic_meter_per_second;
    VolumeRate::new::<cubic_meter_per_second>(v)
}

#[inline]
pub fn watts(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

#[inline]
pub fn celsius(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

#[inline]
pub fn delta_c(v: f64) -> TempInterval {
    use uom::si::temperature_interval::kelvin;
    TempInterval::new::<kelvin>(v)
}

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn m3(v: f64) -> Volume {
    use uom::si::volume::cubic_meter;
    Volume::new::<cubic_meter>(v)
}

#[inline]
pub fn unitless(v: f64) -> Ratio {
    use uom::si::ratio::ratio;
    Ratio::new::<ratio>(v)
}

/// Read a temperature back as degrees Celsius.
#[inline]
pub fn to_celsius(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::degree_celsius;
    t.get::<degree_celsius>()
}

/// Unit system of the numbers found in an input record tree.
///
/// The in-model representation is always SI; conversion happens exactly once
/// when a translator reads a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitSystem {
    #[default]
    Ip,
    Si,
}

impl UnitSystem {
    /// Case-insensitive parse of "IP"/"SI".
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "ip" | "imperial" => Some(Self::Ip),
            "si" | "metric" => Some(Self::Si),
            _ => None,
        }
    }

    /// Air flow: cfm or m3/s.
    pub fn air_flow(self, v: Real) -> HfResult<VolumeRate> {
        let v = ensure_finite(v, "air flow")?;
        Ok(match self {
            Self::Ip => m3ps(v * constants::M3PS_PER_CFM),
            Self::Si => m3ps(v),
        })
    }

    /// Liquid flow: gpm or m3/s.
    pub fn liquid_flow(self, v: Real) -> HfResult<VolumeRate> {
        let v = ensure_finite(v, "liquid flow")?;
        Ok(match self {
            Self::Ip => m3ps(v * constants::M3PS_PER_GPM),
            Self::Si => m3ps(v),
        })
    }

    /// Capacity: Btu/h or W.
    pub fn capacity(self, v: Real) -> HfResult<Power> {
        let v = ensure_finite(v, "capacity")?;
        Ok(match self {
            Self::Ip => watts(v * constants::W_PER_BTUH),
            Self::Si => watts(v),
        })
    }

    /// Motor/fan power: W in both systems.
    pub fn electric_power(self, v: Real) -> HfResult<Power> {
        Ok(watts(ensure_finite(v, "electric power")?))
    }

    /// Absolute temperature: °F or °C.
    pub fn temperature(self, v: Real) -> HfResult<Temperature> {
        let v = ensure_finite(v, "temperature")?;
        Ok(match self {
            Self::Ip => celsius((v - 32.0) / 1.8),
            Self::Si => celsius(v),
        })
    }

    /// Temperature difference: ΔF or ΔC.
    pub fn temperature_difference(self, v: Real) -> HfResult<TempInterval> {
        let v = ensure_finite(v, "temperature difference")?;
        Ok(match self {
            Self::Ip => delta_c(v / 1.8),
            Self::Si => delta_c(v),
        })
    }

    /// Air-side static pressure: inH2O or Pa.
    pub fn static_pressure(self, v: Real) -> HfResult<Pressure> {
        let v = ensure_finite(v, "static pressure")?;
        Ok(match self {
            Self::Ip => pa(v * constants::PA_PER_INH2O),
            Self::Si => pa(v),
        })
    }

    /// Pump head: ftH2O or Pa.
    pub fn head(self, v: Real) -> HfResult<Pressure> {
        let v = ensure_finite(v, "pump head")?;
        Ok(match self {
            Self::Ip => pa(v * constants::PA_PER_FTH2O),
            Self::Si => pa(v),
        })
    }

    /// Storage volume: gallons or m3.
    pub fn storage_volume(self, v: Real) -> HfResult<Volume> {
        let v = ensure_finite(v, "storage volume")?;
        Ok(match self {
            Self::Ip => m3(v * constants::M3_PER_GALLON),
            Self::Si => m3(v),
        })
    }
}

pub mod constants {
    pub const M3PS_PER_CFM: f64 = 0.000_471_947_443;
    pub const M3PS_PER_GPM: f64 = 0.000_063_090_196_4;
    pub const W_PER_BTUH: f64 = 0.293_071_070_172;
    pub const PA_PER_INH2O: f64 = 249.088_91;
    pub const PA_PER_FTH2O: f64 = 2_989.066_9;
    pub const M3_PER_GALLON: f64 = 0.003_785_411_784;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::{Tolerances, nearly_equal};
    use uom::si::power::watt;
    use uom::si::volume_rate::cubic_meter_per_second;

    #[test]
    fn constructors_smoke() {
        let _q = m3ps(0.5);
        let _p = watts(1_000.0);
        let _t = celsius(12.8);
        let _dt = delta_c(5.0);
        let _dp = pa(500.0);
        let _v = m3(1.0);
        let _r = unitless(0.5);
    }

    #[test]
    fn ip_air_flow_and_capacity() {
        let flow = UnitSystem::Ip.air_flow(1_000.0).unwrap();
        assert!(nearly_equal(
            flow.get::<cubic_meter_per_second>(),
            0.4719,
            Tolerances::converted()
        ));
        let cap = UnitSystem::Ip.capacity(36_000.0).unwrap();
        assert!((cap.get::<watt>() - 10_550.56).abs() < 0.1);
    }

    #[test]
    fn ip_temperatures() {
        let t = UnitSystem::Ip.temperature(55.0).unwrap();
        assert!((to_celsius(t) - 12.777_777).abs() < 1e-5);
        let t = UnitSystem::Ip.temperature(95.0).unwrap();
        assert!((to_celsius(t) - 35.0).abs() < 1e-9);
    }

    #[test]
    fn si_is_identity() {
        let flow = UnitSystem::Si.air_flow(0.25).unwrap();
        assert_eq!(flow.get::<cubic_meter_per_second>(), 0.25);
        let t = UnitSystem::Si.temperature(12.8).unwrap();
        assert!((to_celsius(t) - 12.8).abs() < 1e-9);
    }

    #[test]
    fn conversion_rejects_nan() {
        assert!(UnitSystem::Ip.air_flow(f64::NAN).is_err());
    }

    #[test]
    fn parse_unit_system() {
        assert_eq!(UnitSystem::parse("IP"), Some(UnitSystem::Ip));
        assert_eq!(UnitSystem::parse(" si "), Some(UnitSystem::Si));
        assert_eq!(UnitSystem::parse("furlongs"), None);
    }
}
