//! Common helpers shared by equipment parameter sets.

use crate::error::{ComponentError, ComponentResult};
use hf_core::numeric::ensure_finite;

/// A sizing field that is either left for the simulation engine to autosize
/// or carries an explicit value.
///
/// Explicit values always mean "not autosized" for that field; there is no
/// state carrying both.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Autosizable<T> {
    #[default]
    Autosize,
    Value(T),
}

impl<T: Copy> Autosizable<T> {
    pub fn is_autosized(&self) -> bool {
        matches!(self, Autosizable::Autosize)
    }

    pub fn value(&self) -> Option<T> {
        match self {
            Autosizable::Autosize => None,
            Autosizable::Value(v) => Some(*v),
        }
    }

    /// Map the explicit value, keeping the autosize state.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Autosizable<U> {
        match self {
            Autosizable::Autosize => Autosizable::Autosize,
            Autosizable::Value(v) => Autosizable::Value(f(v)),
        }
    }
}

impl<T> From<Option<T>> for Autosizable<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Autosizable::Value(v),
            None => Autosizable::Autosize,
        }
    }
}

/// Ensure a value is finite, returning ComponentError if not.
pub fn check_finite(value: f64, what: &'static str) -> ComponentResult<()> {
    ensure_finite(value, what).map_err(|_| ComponentError::NonPhysical { what })?;
    Ok(())
}

/// Efficiencies, fractions and sensible heat ratios live in (0, 1].
pub fn check_fraction(value: f64, what: &'static str) -> ComponentResult<f64> {
    check_finite(value, what)?;
    if value <= 0.0 || value > 1.0 {
        return Err(ComponentError::InvalidArg { what });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autosizable_default_is_autosize() {
        let a: Autosizable<f64> = Autosizable::default();
        assert!(a.is_autosized());
        assert_eq!(a.value(), None);
    }

    #[test]
    fn autosizable_from_option() {
        assert_eq!(Autosizable::from(Some(2.0)), Autosizable::Value(2.0));
        assert_eq!(Autosizable::<f64>::from(None), Autosizable::Autosize);
        assert_eq!(Autosizable::Value(2.0).map(|v| v * 2.0).value(), Some(4.0));
    }

    #[test]
    fn fraction_checks() {
        assert!(check_fraction(0.6, "eff").is_ok());
        assert!(check_fraction(0.0, "eff").is_err());
        assert!(check_fraction(f64::INFINITY, "eff").is_err());
    }
}
