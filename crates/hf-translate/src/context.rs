//! Translation context: the model under construction plus everything a
//! translator needs to read records.

use std::collections::{BTreeMap, BTreeSet};

use hf_components::Autosizable;
use hf_core::{EquipId, HfResult, UnitSystem};
use hf_project::Record;

use crate::diagnostics::Diagnostics;
use crate::model::{FluidSegmentKind, Model};
use crate::options::TranslateOptions;
use crate::vocab::Vocabulary;

/// Where a fluid segment name points.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SegmentEntry<'a> {
    pub system: &'a Record,
    pub segment: &'a Record,
    pub kind: FluidSegmentKind,
}

/// A zone attachment queued during system translation and resolved once
/// every system exists.
#[derive(Debug, Clone)]
pub(crate) struct PendingBinding {
    pub zone_name: Option<String>,
    pub equipment: EquipId,
    /// Names a `ZnEqpPriority` record may use for this equipment.
    pub aliases: Vec<String>,
    pub induced_air_zone: Option<String>,
}

pub struct Context<'a> {
    pub(crate) root: &'a Record,
    pub options: TranslateOptions,
    pub model: Model,
    pub diags: Diagnostics,
    pub(crate) segments: BTreeMap<String, SegmentEntry<'a>>,
    pub(crate) systems_in_progress: BTreeSet<String>,
    pub(crate) pending: Vec<PendingBinding>,
}

impl<'a> Context<'a> {
    pub fn new(root: &'a Record, options: TranslateOptions) -> Self {
        let mut segments = BTreeMap::new();
        for system in root.get_children("FluidSys") {
            for segment in system.get_children("FluidSeg") {
                let Some(name) = segment.name() else { continue };
                let kind = segment
                    .get_string("Type")
                    .and_then(FluidSegmentKind::parse)
                    .unwrap_or_else(FluidSegmentKind::fallback);
                segments.entry(name.to_string()).or_insert(SegmentEntry {
                    system,
                    segment,
                    kind,
                });
            }
        }
        Self {
            root,
            options,
            model: Model::new(),
            diags: Diagnostics::new(),
            segments,
            systems_in_progress: BTreeSet::new(),
            pending: Vec::new(),
        }
    }

    pub fn units(&self) -> UnitSystem {
        self.options.unit_system
    }

    /// Routing discriminator: missing means the record cannot be routed
    /// (Error), unrecognized means a guess (Warning). Both fall back to the
    /// family default.
    pub fn discriminator<T: Vocabulary>(&mut self, rec: &Record, field: &str) -> T {
        match rec.get_string(field) {
            None => {
                self.diags.error(
                    rec.label(),
                    format!("missing {field}; using default {}", T::FAMILY),
                );
                T::fallback()
            }
            Some(text) => self.parse_or_warn(rec, field, text),
        }
    }

    /// Optional choice field: missing silently takes the default.
    pub fn choice<T: Vocabulary>(&mut self, rec: &Record, field: &str) -> T {
        match rec.get_string(field) {
            None => T::fallback(),
            Some(text) => self.parse_or_warn(rec, field, text),
        }
    }

    fn parse_or_warn<T: Vocabulary>(&mut self, rec: &Record, field: &str, text: &str) -> T {
        T::parse(text).unwrap_or_else(|| {
            self.diags.warn(
                rec.label(),
                format!("unknown {} '{text}' in {field}; using default", T::FAMILY),
            );
            T::fallback()
        })
    }

    /// Capacity or flow field. Autosize mode never reads it; a missing or
    /// unconvertible value stays autosized.
    pub fn sized<Q>(
        &mut self,
        rec: &Record,
        field: &str,
        convert: fn(UnitSystem, f64) -> HfResult<Q>,
    ) -> Autosizable<Q> {
        if self.options.autosize {
            return Autosizable::Autosize;
        }
        self.quantity(rec, field, convert).into()
    }

    /// Non-sizing physical field converted to SI.
    pub fn quantity<Q>(
        &mut self,
        rec: &Record,
        field: &str,
        convert: fn(UnitSystem, f64) -> HfResult<Q>,
    ) -> Option<Q> {
        let raw = rec.get_double(field)?;
        match convert(self.units(), raw) {
            Ok(q) => Some(q),
            Err(e) => {
                self.diags.warn(rec.label(), format!("ignoring {field}: {e}"));
                None
            }
        }
    }

    /// Dimensionless field in (0, 1].
    pub fn fraction(&mut self, rec: &Record, field: &str) -> Option<f64> {
        let raw = rec.get_double(field)?;
        match hf_core::ensure_fraction(raw, "fraction") {
            Ok(v) => Some(v),
            Err(_) => {
                self.diags
                    .warn(rec.label(), format!("ignoring {field} = {raw}: not in (0, 1]"));
                None
            }
        }
    }

    /// Positive dimensionless field (COP, UA).
    pub fn positive(&mut self, rec: &Record, field: &str) -> Option<f64> {
        let raw = rec.get_double(field)?;
        if raw > 0.0 {
            Some(raw)
        } else {
            self.diags
                .warn(rec.label(), format!("ignoring {field} = {raw}: must be positive"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;
    use hf_components::FanKind;

    #[test]
    fn discriminator_missing_is_error() {
        let root = Record::new("Proj");
        let mut ctx = Context::new(&root, TranslateOptions::default());
        let fan = Record::new("Fan").with_field("Name", "SF");
        let kind: FanKind = ctx.discriminator(&fan, "CtrlMthd");
        assert_eq!(kind, FanKind::ConstantVolume);
        assert_eq!(ctx.diags.about(Severity::Error, "SF").count(), 1);
    }

    #[test]
    fn discriminator_unknown_is_warning() {
        let root = Record::new("Proj");
        let mut ctx = Context::new(&root, TranslateOptions::default());
        let fan = Record::new("Fan")
            .with_field("Name", "SF")
            .with_field("CtrlMthd", "Magnetic");
        let _: FanKind = ctx.discriminator(&fan, "CtrlMthd");
        assert!(!ctx.diags.has_errors());
        assert_eq!(ctx.diags.about(Severity::Warning, "SF").count(), 1);
    }

    #[test]
    fn autosize_mode_skips_explicit_values() {
        let root = Record::new("Proj");
        let rec = Record::new("Fan").with_field("FlowCap", 1000.0);
        let mut ctx = Context::new(&root, TranslateOptions::default().with_autosize(true));
        assert!(ctx.sized(&rec, "FlowCap", UnitSystem::air_flow).is_autosized());
        let mut ctx = Context::new(&root, TranslateOptions::default());
        assert!(!ctx.sized(&rec, "FlowCap", UnitSystem::air_flow).is_autosized());
    }

    #[test]
    fn segments_indexed_by_name() {
        let root = Record::new("Proj").with_child(
            Record::new("FluidSys")
                .with_field("Name", "CHW")
                .with_child(
                    Record::new("FluidSeg")
                        .with_field("Name", "CHW Supply")
                        .with_field("Type", "SecondarySupply"),
                ),
        );
        let ctx = Context::new(&root, TranslateOptions::default());
        let entry = ctx.segments.get("CHW Supply").unwrap();
        assert_eq!(entry.kind, FluidSegmentKind::SecondarySupply);
        assert_eq!(entry.system.name(), Some("CHW"));
    }
}
