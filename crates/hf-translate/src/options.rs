//! Translation mode flags.

use hf_core::UnitSystem;
use hf_project::Record;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslateOptions {
    /// Leave every capacity and flow field autosized instead of reading it.
    pub autosize: bool,
    /// Units of the numbers in the input records.
    pub unit_system: UnitSystem,
}

impl TranslateOptions {
    /// Options declared on the document root (`UnitSystem`, `Autosize`),
    /// falling back to the defaults.
    pub fn from_document(root: &Record) -> Self {
        let mut options = Self::default();
        if let Some(units) = root.get_string("UnitSystem").and_then(UnitSystem::parse) {
            options.unit_system = units;
        }
        if let Some(autosize) = root.get_bool("Autosize") {
            options.autosize = autosize;
        }
        options
    }

    pub fn with_autosize(mut self, autosize: bool) -> Self {
        self.autosize = autosize;
        self
    }

    pub fn with_unit_system(mut self, unit_system: UnitSystem) -> Self {
        self.unit_system = unit_system;
        self
    }
}
