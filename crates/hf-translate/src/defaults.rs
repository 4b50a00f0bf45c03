//! Built-in fallback resources.
//!
//! Defaults are deterministic: each (missing name, role) pair maps to one
//! registry key, so asking twice returns the same object and two runs over
//! the same input produce the same curves in the same order.

use std::fmt;

use hf_components::{
    CoolingCoil, CoolingCoilKind, Curve, CurveForm, DxCurves, Equipment, Fan, FanKind,
    HeatingCoil, HeatingCoilKind, Schedule,
};
use hf_core::{CurveId, EquipId, ScheduleId};

use crate::context::Context;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveRole {
    DxCoolingCapFT,
    DxCoolingCapFFlow,
    DxCoolingEirFT,
    DxCoolingEirFFlow,
    DxPartLoad,
    ChillerCapFT,
    ChillerEirFT,
    ChillerEirFPlr,
    BoilerEffFPlr,
    FanVariablePower,
}

impl CurveRole {
    pub fn name(self) -> &'static str {
        match self {
            CurveRole::DxCoolingCapFT => "DxCoolingCapFT",
            CurveRole::DxCoolingCapFFlow => "DxCoolingCapFFlow",
            CurveRole::DxCoolingEirFT => "DxCoolingEirFT",
            CurveRole::DxCoolingEirFFlow => "DxCoolingEirFFlow",
            CurveRole::DxPartLoad => "DxPartLoad",
            CurveRole::ChillerCapFT => "ChillerCapFT",
            CurveRole::ChillerEirFT => "ChillerEirFT",
            CurveRole::ChillerEirFPlr => "ChillerEirFPlr",
            CurveRole::BoilerEffFPlr => "BoilerEffFPlr",
            CurveRole::FanVariablePower => "FanVariablePower",
        }
    }

    /// Temperature curves take two variables; flow and part-load curves one.
    pub fn is_two_variable(self) -> bool {
        matches!(
            self,
            CurveRole::DxCoolingCapFT
                | CurveRole::DxCoolingEirFT
                | CurveRole::ChillerCapFT
                | CurveRole::ChillerEirFT
        )
    }

    pub fn default_curve(self, name: impl Into<String>) -> Curve {
        let dx_domain = ((17.0, 22.0), (13.0, 46.0));
        let chiller_domain = ((5.0, 10.0), (24.0, 35.0));
        match self {
            CurveRole::DxCoolingCapFT => Curve::new(
                name,
                CurveForm::Biquadratic([
                    0.942_587_793,
                    0.009_543_347,
                    0.000_683_770,
                    -0.011_042_676,
                    0.000_005_249,
                    -0.000_009_720,
                ]),
                dx_domain.0,
            )
            .with_y_range(dx_domain.1),
            CurveRole::DxCoolingCapFFlow => {
                Curve::new(name, CurveForm::Quadratic([0.8, 0.2, 0.0]), (0.5, 1.5))
            }
            CurveRole::DxCoolingEirFT => Curve::new(
                name,
                CurveForm::Biquadratic([
                    0.342_414_409,
                    0.034_885_008,
                    -0.000_623_700,
                    0.004_977_216,
                    0.000_437_951,
                    -0.000_728_028,
                ]),
                dx_domain.0,
            )
            .with_y_range(dx_domain.1),
            CurveRole::DxCoolingEirFFlow => Curve::new(
                name,
                CurveForm::Quadratic([1.1552, -0.1808, 0.0256]),
                (0.5, 1.5),
            ),
            CurveRole::DxPartLoad => {
                Curve::new(name, CurveForm::Quadratic([0.85, 0.15, 0.0]), (0.0, 1.0))
            }
            CurveRole::ChillerCapFT => Curve::new(
                name,
                CurveForm::Biquadratic([
                    1.021_515_8,
                    0.037_035_864,
                    0.000_233_247_6,
                    -0.003_894_048,
                    -0.000_065_253_6,
                    -0.000_268_045_2,
                ]),
                chiller_domain.0,
            )
            .with_y_range(chiller_domain.1),
            CurveRole::ChillerEirFT => Curve::new(
                name,
                CurveForm::Biquadratic([
                    0.701_768_57,
                    -0.004_520_16,
                    0.000_533_109_6,
                    -0.005_498_208,
                    0.000_544_579_2,
                    -0.000_729_032_4,
                ]),
                chiller_domain.0,
            )
            .with_y_range(chiller_domain.1),
            CurveRole::ChillerEirFPlr => Curve::new(
                name,
                CurveForm::Quadratic([0.063_691_19, 0.584_888_32, 0.352_802_74]),
                (0.0, 1.0),
            ),
            CurveRole::BoilerEffFPlr => Curve::new(
                name,
                CurveForm::Quadratic([0.97, 0.0633, -0.0333]),
                (0.0, 1.0),
            ),
            CurveRole::FanVariablePower => Curve::new(
                name,
                CurveForm::Cubic([0.040_759_894, 0.088_044_97, -0.072_926_12, 0.943_739_823]),
                (0.0, 1.0),
            ),
        }
    }
}

impl fmt::Display for CurveRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleRole {
    AlwaysOn,
    SupplyTemperature,
    HeatingSupplyTemperature,
}

impl ScheduleRole {
    pub fn name(self) -> &'static str {
        match self {
            ScheduleRole::AlwaysOn => "AlwaysOn",
            ScheduleRole::SupplyTemperature => "SupplyTemperature",
            ScheduleRole::HeatingSupplyTemperature => "HeatingSupplyTemperature",
        }
    }

    /// Constant value in SI (°C for temperatures).
    pub fn default_value(self) -> f64 {
        match self {
            ScheduleRole::AlwaysOn => 1.0,
            ScheduleRole::SupplyTemperature => 12.78,
            ScheduleRole::HeatingSupplyTemperature => 35.0,
        }
    }
}

impl fmt::Display for ScheduleRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn default_key(role: &str, missing: Option<&str>) -> String {
    match missing {
        Some(name) => format!("{role} Default ({name})"),
        None => format!("{role} Default"),
    }
}

/// Resolve a curve reference, synthesizing the role's default when the name
/// is absent, unknown, or names a curve of the wrong form. Never fails.
pub fn resolve_curve(
    ctx: &mut Context<'_>,
    name: Option<&str>,
    role: CurveRole,
    owner: &str,
) -> CurveId {
    match name {
        Some(n) => match ctx.model.curve_names.get(n) {
            Some(id)
                if ctx
                    .model
                    .curve(id)
                    .is_some_and(|c| c.form.is_two_variable() == role.is_two_variable()) =>
            {
                return id;
            }
            Some(_) => ctx.diags.warn(
                owner,
                format!("curve '{n}' has the wrong form for {role}; using default"),
            ),
            None => ctx
                .diags
                .warn(owner, format!("curve '{n}' not found for {role}; using default")),
        },
        None => ctx
            .diags
            .warn(owner, format!("missing {role} curve; using default")),
    }

    let key = default_key(role.name(), name);
    match ctx.model.curve_names.get(&key) {
        Some(id) => id,
        None => ctx.model.add_curve(role.default_curve(key)),
    }
}

/// Resolve a schedule reference, synthesizing the role's constant default
/// when the name is absent or unknown. Never fails.
pub fn resolve_schedule(
    ctx: &mut Context<'_>,
    name: Option<&str>,
    role: ScheduleRole,
    owner: &str,
) -> ScheduleId {
    match name {
        Some(n) => {
            if let Some(id) = ctx.model.schedule_names.get(n) {
                return id;
            }
            ctx.diags
                .warn(owner, format!("schedule '{n}' not found for {role}; using default"));
        }
        None => ctx
            .diags
            .warn(owner, format!("missing {role} schedule; using default")),
    }

    let key = default_key(role.name(), name);
    match ctx.model.schedule_names.get(&key) {
        Some(id) => id,
        None => ctx
            .model
            .add_schedule(Schedule::constant(key, role.default_value())),
    }
}

/// A constant schedule created by a control strategy (e.g. a fixed dual
/// setpoint). A taken `name` gets a numeric suffix; the existing schedule
/// is never reused.
pub fn constant_schedule(
    ctx: &mut Context<'_>,
    owner: &str,
    name: String,
    value: f64,
) -> ScheduleId {
    if !ctx.model.schedule_names.contains(&name) {
        return ctx.model.add_schedule(Schedule::constant(name, value));
    }
    let unique = (2..)
        .map(|n| format!("{name} {n}"))
        .find(|candidate| !ctx.model.schedule_names.contains(candidate))
        .unwrap_or_default();
    ctx.diags.warn(
        owner,
        format!("schedule '{name}' already exists; generated setpoint schedule named '{unique}'"),
    );
    ctx.model.add_schedule(Schedule::constant(unique, value))
}

/// Electric resistance heating coil standing in for a missing one.
pub fn default_heating_coil(ctx: &mut Context<'_>, owner: &str) -> EquipId {
    ctx.diags.warn(
        owner,
        "missing or unusable heating coil; using electric resistance default",
    );
    let coil = HeatingCoil::new(format!("{owner} Heating Coil"), HeatingCoilKind::Electric);
    ctx.model.add_equipment(Equipment::HeatingCoil(coil))
}

/// Constant-volume fan standing in for a missing one.
pub fn default_fan(ctx: &mut Context<'_>, owner: &str) -> EquipId {
    ctx.diags
        .warn(owner, "missing or unusable fan; using constant-volume default");
    let fan = Fan::new(format!("{owner} Fan"), FanKind::ConstantVolume);
    ctx.model.add_equipment(Equipment::Fan(fan))
}

/// Single-speed DX cooling coil with default curves standing in for a
/// missing one.
pub fn default_cooling_coil(ctx: &mut Context<'_>, owner: &str) -> EquipId {
    ctx.diags.warn(
        owner,
        "missing or unusable cooling coil; using single-speed DX default",
    );
    let name = format!("{owner} Cooling Coil");
    let curves = default_dx_curves(ctx);
    let coil = CoolingCoil::new(name, CoolingCoilKind::DxSingleSpeed).with_curves(curves);
    ctx.model.add_equipment(Equipment::CoolingCoil(coil))
}

/// The full default DX curve set, without per-curve warnings.
fn default_dx_curves(ctx: &mut Context<'_>) -> DxCurves {
    let mut curve = |role: CurveRole| {
        let key = default_key(role.name(), None);
        match ctx.model.curve_names.get(&key) {
            Some(id) => id,
            None => ctx.model.add_curve(role.default_curve(key)),
        }
    };
    DxCurves {
        cap_ft: curve(CurveRole::DxCoolingCapFT),
        cap_fflow: curve(CurveRole::DxCoolingCapFFlow),
        eir_ft: curve(CurveRole::DxCoolingEirFT),
        eir_fflow: curve(CurveRole::DxCoolingEirFFlow),
        part_load: curve(CurveRole::DxPartLoad),
    }
}
