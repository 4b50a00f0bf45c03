//! Structural validation of record documents.

use crate::record::Record;
use std::collections::HashSet;

/// Root tag of a project document.
pub const ROOT_TAG: &str = "Proj";

/// Named top-level families whose names must be unique.
const NAMED_FAMILIES: [&str; 6] = ["ThrmlZn", "Sch", "Crv", "FluidSys", "AirSys", "ZnSys"];

/// Records that route on a `Type` discriminator.
const DISCRIMINATED: [&str; 4] = ["FluidSys", "AirSys", "ZnSys", "TrmlUnit"];

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Unexpected root record '{tag}', expected 'Proj'")]
    UnexpectedRoot { tag: String },

    #[error("Duplicate name: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing field: {field} in {context}")]
    MissingField { field: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Checks that make a document untranslatable: wrong root, unnamed or
/// duplicate top-level records, unknown unit system.
pub fn validate_document(root: &Record) -> Result<(), ValidationError> {
    if root.tag != ROOT_TAG {
        return Err(ValidationError::UnexpectedRoot {
            tag: root.tag.clone(),
        });
    }

    if let Some(units) = root.get_string("UnitSystem")
        && hf_core::UnitSystem::parse(units).is_none()
    {
        return Err(ValidationError::InvalidValue {
            field: "UnitSystem".to_string(),
            value: units.to_string(),
            reason: "expected IP or SI".to_string(),
        });
    }

    for family in NAMED_FAMILIES {
        let mut names = HashSet::new();
        for (i, record) in root.get_children(family).enumerate() {
            let Some(name) = record.name() else {
                return Err(ValidationError::MissingField {
                    field: "Name".to_string(),
                    context: format!("{family} #{i}"),
                });
            };
            if !names.insert(name) {
                return Err(ValidationError::DuplicateId {
                    id: name.to_string(),
                    context: family.to_string(),
                });
            }
        }
    }

    validate_segments(root)
}

fn validate_segments(root: &Record) -> Result<(), ValidationError> {
    for fluid in root.get_children("FluidSys") {
        let mut names = HashSet::new();
        for seg in fluid.get_children("FluidSeg") {
            if let Some(name) = seg.name()
                && !names.insert(name)
            {
                return Err(ValidationError::DuplicateId {
                    id: name.to_string(),
                    context: format!("FluidSys '{}' segments", fluid.label()),
                });
            }
        }
    }
    Ok(())
}

/// Recoverable findings: records that will be translated with a default
/// variant because their discriminator is missing.
pub fn lint_document(root: &Record) -> Vec<ValidationError> {
    let mut findings = Vec::new();
    lint_record(root, &mut findings);
    findings
}

fn lint_record(record: &Record, findings: &mut Vec<ValidationError>) {
    if DISCRIMINATED.contains(&record.tag.as_str()) && record.get_string("Type").is_none() {
        findings.push(ValidationError::MissingField {
            field: "Type".to_string(),
            context: format!("{} '{}'", record.tag, record.label()),
        });
    }
    for child in &record.children {
        lint_record(child, findings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> Record {
        Record::new(ROOT_TAG)
            .with_child(Record::new("ThrmlZn").with_field("Name", "Z1"))
            .with_child(
                Record::new("AirSys")
                    .with_field("Name", "AHU")
                    .with_child(Record::new("TrmlUnit").with_field("Name", "Box")),
            )
    }

    #[test]
    fn valid_document_passes() {
        assert!(validate_document(&project()).is_ok());
    }

    #[test]
    fn wrong_root_rejected() {
        let err = validate_document(&Record::new("AirSys")).unwrap_err();
        assert!(matches!(err, ValidationError::UnexpectedRoot { .. }));
    }

    #[test]
    fn duplicate_zone_rejected() {
        let doc = project().with_child(Record::new("ThrmlZn").with_field("Name", "Z1"));
        assert_eq!(
            validate_document(&doc).unwrap_err(),
            ValidationError::DuplicateId {
                id: "Z1".to_string(),
                context: "ThrmlZn".to_string()
            }
        );
    }

    #[test]
    fn bad_unit_system_rejected() {
        let doc = project().with_field("UnitSystem", "furlongs");
        assert!(matches!(
            validate_document(&doc),
            Err(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn lint_reports_missing_discriminators() {
        let findings = lint_document(&project());
        assert_eq!(findings.len(), 2);
    }
}
