//! Error types for equipment parameter construction.

use hf_core::error::HfError;
use thiserror::Error;

/// Errors raised when an equipment parameter set is built with unusable values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Curve '{name}' expects {expected} coefficients, got {got}")]
    CurveCoefficients {
        name: String,
        expected: usize,
        got: usize,
    },
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl From<HfError> for ComponentError {
    fn from(e: HfError) -> Self {
        match e {
            HfError::NonFinite { what, .. } => ComponentError::NonPhysical { what },
            HfError::InvalidArg { what } => ComponentError::InvalidArg { what },
            HfError::IndexOob { what, .. } => ComponentError::InvalidArg { what },
            HfError::Invariant { .. } => ComponentError::InvalidArg {
                what: "invariant violated",
            },
        }
    }
}
