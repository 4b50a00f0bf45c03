//! Control overlays for translated HVAC models.
//!
//! Controls here are descriptions, not signal processing: a setpoint manager
//! names a strategy and the single node whose temperature it governs. The
//! crate provides:
//! - [`SetpointStrategy`]: the closed set of deck-temperature strategies
//! - [`OverlayTable`]: node-to-manager registry refusing a second overlay per node
//! - [`Placement`]: per-container state machine for single and dual placements
//!
//! # Example
//!
//! ```
//! use hf_controls::{OverlayTable, SetpointStrategy};
//! use hf_core::{NodeId, ScheduleId};
//!
//! let mut table = OverlayTable::new();
//! let outlet = NodeId::from_index(4);
//! let sched = SetpointStrategy::Scheduled { schedule: ScheduleId::from_index(0) };
//! table.attach("Deck SPM", outlet, sched.clone()).unwrap();
//! assert!(table.attach("Second SPM", outlet, sched).is_err());
//! ```

pub mod error;
pub mod overlay;
pub mod placement;
pub mod strategy;

pub use error::{ControlError, ControlResult};
pub use overlay::{OverlayTable, SetpointManager};
pub use placement::{Placement, PlacementState, SplitSide, split_side};
pub use strategy::{SetpointStrategy, WarmestFlavor};
