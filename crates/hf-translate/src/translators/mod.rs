//! Component translators, one per record family.
//!
//! Translators read a record, convert its fields to SI, create the
//! equipment in the model and return its id. They never thread the
//! primary side: the sequencer, assembler or system builder that called
//! them decides where the equipment sits.

pub mod coil;
pub mod fan;
pub mod oa;
pub mod plant;
pub mod pump;
pub mod resources;
pub mod setpoint;
pub mod terminal;
pub mod zone_hvac;
