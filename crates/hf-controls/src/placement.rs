//! Per-container placement state machine.
//!
//! ```text
//! NoOverlay ──place_single──▶ SingleOverlay
//!     │
//!     └──begin_dual──▶ DualOverlayPendingSplit ──finish_split──▶ DualOverlayPlaced
//! ```
//!
//! `DualOverlayPlaced` is terminal and freezes the supply side.

use serde::Serialize;

use crate::error::{ControlError, ControlResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum PlacementState {
    #[default]
    NoOverlay,
    SingleOverlay,
    DualOverlayPendingSplit,
    DualOverlayPlaced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Placement {
    state: PlacementState,
}

impl Placement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PlacementState {
        self.state
    }

    pub fn place_single(&mut self) -> ControlResult<()> {
        self.transition(
            PlacementState::NoOverlay,
            PlacementState::SingleOverlay,
            "place a single overlay",
        )
    }

    pub fn begin_dual(&mut self) -> ControlResult<()> {
        self.transition(
            PlacementState::NoOverlay,
            PlacementState::DualOverlayPendingSplit,
            "begin a dual-setpoint split",
        )
    }

    pub fn finish_split(&mut self) -> ControlResult<()> {
        self.transition(
            PlacementState::DualOverlayPendingSplit,
            PlacementState::DualOverlayPlaced,
            "finish a dual-setpoint split",
        )
    }

    /// Supply-side equipment may only be added before a split is placed.
    pub fn check_supply_insert(&self) -> ControlResult<()> {
        if self.state == PlacementState::DualOverlayPlaced {
            return Err(ControlError::InvalidTransition {
                from: self.state,
                what: "add supply equipment",
            });
        }
        Ok(())
    }

    pub fn has_overlay(&self) -> bool {
        self.state != PlacementState::NoOverlay
    }

    fn transition(
        &mut self,
        from: PlacementState,
        to: PlacementState,
        what: &'static str,
    ) -> ControlResult<()> {
        if self.state != from {
            return Err(ControlError::InvalidTransition {
                from: self.state,
                what,
            });
        }
        self.state = to;
        Ok(())
    }
}

/// Position of a heating/cooling component relative to the chain's mover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SplitSide {
    /// Between the mover and the supply outlet (or no mover at all).
    Downstream,
    /// Between the supply inlet and the mover.
    Upstream,
}

/// Classify the component at `index` of a supply chain whose mover sits at
/// `pivot`. Without a pivot everything counts as downstream.
pub fn split_side(index: usize, pivot: Option<usize>) -> SplitSide {
    match pivot {
        Some(p) if index < p => SplitSide::Upstream,
        _ => SplitSide::Downstream,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_path() {
        let mut p = Placement::new();
        assert!(!p.has_overlay());
        p.place_single().unwrap();
        assert_eq!(p.state(), PlacementState::SingleOverlay);
        assert!(p.place_single().is_err());
        assert!(p.begin_dual().is_err());
        assert!(p.check_supply_insert().is_ok());
    }

    #[test]
    fn dual_path_freezes_supply() {
        let mut p = Placement::new();
        assert!(p.finish_split().is_err());
        p.begin_dual().unwrap();
        assert!(p.check_supply_insert().is_ok());
        p.finish_split().unwrap();
        assert_eq!(p.state(), PlacementState::DualOverlayPlaced);
        assert_eq!(
            p.check_supply_insert().unwrap_err(),
            ControlError::InvalidTransition {
                from: PlacementState::DualOverlayPlaced,
                what: "add supply equipment",
            }
        );
    }

    #[test]
    fn split_side_relative_to_pivot() {
        assert_eq!(split_side(0, Some(2)), SplitSide::Upstream);
        assert_eq!(split_side(3, Some(2)), SplitSide::Downstream);
        assert_eq!(split_side(0, None), SplitSide::Downstream);
    }
}
