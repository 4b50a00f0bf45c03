//! HVAC topology translation.
//!
//! Turns a record document (zones, curves, schedules, fluid, air and zone
//! systems) into a wired equipment graph with plant loops, air loops,
//! setpoint managers and zone equipment bindings.
//!
//! Translation never aborts. Anything missing or malformed is replaced by a
//! default or skipped, and reported in the run's [`Diagnostics`].
//!
//! # Example
//!
//! ```
//! use hf_project::Record;
//! use hf_translate::{TranslateOptions, translate_project};
//!
//! let root = Record::new("Proj").with_child(Record::new("ThrmlZn").with_field("Name", "Office"));
//! let translation = translate_project(&root, TranslateOptions::default());
//! assert!(!translation.has_errors());
//! assert_eq!(translation.model.zones.len(), 1);
//! ```

pub mod assembler;
pub mod binder;
pub mod context;
pub mod defaults;
pub mod diagnostics;
pub mod error;
pub mod model;
pub mod options;
pub mod placer;
pub mod project;
pub mod registry;
pub mod sequencer;
pub mod summary;
pub mod system;
pub mod translators;
pub mod vocab;

pub use context::Context;
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{AppError, AppResult};
pub use model::Model;
pub use options::TranslateOptions;
pub use project::{Translation, load_project, resolve_options, translate_project, validate_project};
pub use summary::ModelSummary;
