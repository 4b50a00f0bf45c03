//! Whole-document translation.

use std::path::Path;

use hf_project::{ProjectError, Record, ValidationError};

use crate::binder;
use crate::context::Context;
use crate::diagnostics::{Diagnostics, Severity};
use crate::error::{AppError, AppResult};
use crate::model::Model;
use crate::options::TranslateOptions;
use crate::summary::ModelSummary;
use crate::system;
use crate::translators::resources;

/// System families, translated in document order.
const SYSTEM_TAGS: [&str; 3] = ["FluidSys", "AirSys", "ZnSys"];

/// The result of a run: the model, however partial, and what went wrong.
#[derive(Debug, Clone)]
pub struct Translation {
    pub model: Model,
    pub diagnostics: Diagnostics,
}

impl Translation {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    pub fn summary(&self) -> ModelSummary {
        self.model.summary()
    }

    /// `Err` when the run logged any Error.
    pub fn into_result(self) -> AppResult<Model> {
        match self.diagnostics.count(Severity::Error) {
            0 => Ok(self.model),
            count => Err(AppError::TranslationFailed { count }),
        }
    }
}

/// Translate a record document. Never fails: every problem is a diagnostic.
pub fn translate_project(root: &Record, options: TranslateOptions) -> Translation {
    let _span = tracing::info_span!("translate_project", project = %root.label()).entered();
    let mut ctx = Context::new(root, options);

    resources::load_schedules(&mut ctx);
    resources::load_curves(&mut ctx);
    resources::load_zones(&mut ctx);
    system::check_zone_system_refs(&mut ctx);

    for rec in &root.children {
        if SYSTEM_TAGS.contains(&rec.tag.as_str()) {
            system::translate_system(&mut ctx, rec);
        }
    }

    binder::bind_zone_equipment(&mut ctx);
    audit_loop_setpoints(&mut ctx);
    if let Err(e) = ctx.model.graph.validate() {
        ctx.diags
            .error(root.label(), format!("graph validation failed: {e}"));
    }

    tracing::info!(
        warnings = ctx.diags.count(Severity::Warning),
        errors = ctx.diags.count(Severity::Error),
        "translation finished"
    );
    Translation {
        model: ctx.model,
        diagnostics: ctx.diags,
    }
}

/// Every plant loop must end with a setpoint manager on its supply outlet.
fn audit_loop_setpoints(ctx: &mut Context<'_>) {
    let missing: Vec<String> = ctx
        .model
        .plant_loops
        .iter()
        .filter(|l| !ctx.model.overlays.is_occupied(l.supply_outlet))
        .map(|l| l.name.clone())
        .collect();
    for name in missing {
        ctx.diags
            .error(name, "no setpoint manager on the supply outlet");
    }
}

/// Load a document from YAML or JSON (by extension), rejecting structurally
/// invalid ones.
pub fn load_project(path: &Path) -> AppResult<Record> {
    match hf_project::load(path) {
        Ok(root) => Ok(root),
        Err(ProjectError::Io(source)) => Err(AppError::ProjectFileRead {
            path: path.to_path_buf(),
            source,
        }),
        Err(e) => Err(e.into()),
    }
}

/// Load and lint a document: `Err` for fatal problems, the recoverable
/// findings otherwise.
pub fn validate_project(path: &Path) -> AppResult<Vec<ValidationError>> {
    let root = load_project(path)?;
    Ok(hf_project::lint_document(&root))
}

/// Options declared by the document, with explicit overrides applied.
pub fn resolve_options(
    root: &Record,
    autosize: Option<bool>,
    unit_system: Option<hf_core::UnitSystem>,
) -> TranslateOptions {
    let mut options = TranslateOptions::from_document(root);
    if let Some(autosize) = autosize {
        options = options.with_autosize(autosize);
    }
    if let Some(units) = unit_system {
        options = options.with_unit_system(units);
    }
    options
}
