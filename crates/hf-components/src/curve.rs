//! Performance curves.
//!
//! Curves are plain values. They are shared between equipment by id through
//! the model's name table and never mutated in place; an override builds a
//! new curve (see [`Curve::overridden`]) that gets its own registry entry.

use crate::error::{ComponentError, ComponentResult};

/// Polynomial form and coefficients of a curve.
///
/// Single-variable forms evaluate `c0 + c1 x + c2 x² + ...`; the biquadratic
/// evaluates `c0 + c1 x + c2 x² + c3 y + c4 y² + c5 x y`.
#[derive(Debug, Clone, PartialEq)]
pub enum CurveForm {
    Linear([f64; 2]),
    Quadratic([f64; 3]),
    Cubic([f64; 4]),
    Biquadratic([f64; 6]),
}

impl CurveForm {
    /// Build a form from its case-insensitive type name and coefficients.
    pub fn from_coefficients(name: &str, kind: &str, coefs: &[f64]) -> ComponentResult<Self> {
        let expected = match kind.trim().to_ascii_lowercase().as_str() {
            "linear" => 2,
            "quadratic" => 3,
            "cubic" => 4,
            "biquadratic" => 6,
            _ => {
                return Err(ComponentError::InvalidArg {
                    what: "unknown curve type",
                });
            }
        };
        if coefs.len() != expected {
            return Err(ComponentError::CurveCoefficients {
                name: name.to_string(),
                expected,
                got: coefs.len(),
            });
        }
        let mut c = [0.0; 6];
        c[..expected].copy_from_slice(coefs);
        Ok(match expected {
            2 => CurveForm::Linear([c[0], c[1]]),
            3 => CurveForm::Quadratic([c[0], c[1], c[2]]),
            4 => CurveForm::Cubic([c[0], c[1], c[2], c[3]]),
            _ => CurveForm::Biquadratic(c),
        })
    }

    pub fn coefficients(&self) -> &[f64] {
        match self {
            CurveForm::Linear(c) => c,
            CurveForm::Quadratic(c) => c,
            CurveForm::Cubic(c) => c,
            CurveForm::Biquadratic(c) => c,
        }
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            CurveForm::Linear(_) => "CurveLinear",
            CurveForm::Quadratic(_) => "CurveQuadratic",
            CurveForm::Cubic(_) => "CurveCubic",
            CurveForm::Biquadratic(_) => "CurveBiquadratic",
        }
    }

    pub fn is_two_variable(&self) -> bool {
        matches!(self, CurveForm::Biquadratic(_))
    }
}

/// A named performance curve with its valid input domain.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub name: String,
    pub form: CurveForm,
    /// Domain of the first independent variable.
    pub x_range: (f64, f64),
    /// Domain of the second independent variable (biquadratic only).
    pub y_range: Option<(f64, f64)>,
}

impl Curve {
    pub fn new(name: impl Into<String>, form: CurveForm, x_range: (f64, f64)) -> Self {
        Self {
            name: name.into(),
            form,
            x_range,
            y_range: None,
        }
    }

    pub fn with_y_range(mut self, y_range: (f64, f64)) -> Self {
        self.y_range = Some(y_range);
        self
    }

    /// Evaluate with inputs clamped to the curve's domain.
    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        let x = x.clamp(self.x_range.0, self.x_range.1);
        let y = match self.y_range {
            Some((lo, hi)) => y.clamp(lo, hi),
            None => y,
        };
        match &self.form {
            CurveForm::Linear(c) => c[0] + c[1] * x,
            CurveForm::Quadratic(c) => c[0] + c[1] * x + c[2] * x * x,
            CurveForm::Cubic(c) => c[0] + c[1] * x + c[2] * x * x + c[3] * x * x * x,
            CurveForm::Biquadratic(c) => {
                c[0] + c[1] * x + c[2] * x * x + c[3] * y + c[4] * y * y + c[5] * x * y
            }
        }
    }

    /// A copy under a new name with replaced coefficients.
    pub fn overridden(&self, name: impl Into<String>, coefs: &[f64]) -> ComponentResult<Self> {
        let name = name.into();
        let kind = match self.form {
            CurveForm::Linear(_) => "linear",
            CurveForm::Quadratic(_) => "quadratic",
            CurveForm::Cubic(_) => "cubic",
            CurveForm::Biquadratic(_) => "biquadratic",
        };
        let form = CurveForm::from_coefficients(&name, kind, coefs)?;
        Ok(Self {
            name,
            form,
            x_range: self.x_range,
            y_range: self.y_range,
        })
    }
}
