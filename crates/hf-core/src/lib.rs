//! hf-core: stable foundation for hvacflow.
//!
//! Contains:
//! - units (uom SI types, IP conversions applied at the translator boundary)
//! - numeric (Real + tolerances + float helpers)
//! - ids (compact IDs for nodes, equipment, loops, zones and named resources)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{HfError, HfResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
