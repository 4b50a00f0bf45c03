//! hf-project: record-tree input documents, loading and validation.

pub mod record;
pub mod validate;

pub use record::{FieldValue, Record};
pub use validate::{ROOT_TAG, ValidationError, lint_document, validate_document};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn parse_yaml(content: &str) -> ProjectResult<Record> {
    let root: Record = serde_yaml::from_str(content)?;
    validate_document(&root)?;
    Ok(root)
}

pub fn parse_json(content: &str) -> ProjectResult<Record> {
    let root: Record = serde_json::from_str(content)?;
    validate_document(&root)?;
    Ok(root)
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<Record> {
    let content = std::fs::read_to_string(path)?;
    parse_yaml(&content)
}

pub fn save_yaml(path: &std::path::Path, root: &Record) -> ProjectResult<()> {
    validate_document(root)?;
    let content = serde_yaml::to_string(root)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<Record> {
    let content = std::fs::read_to_string(path)?;
    parse_json(&content)
}

pub fn save_json(path: &std::path::Path, root: &Record) -> ProjectResult<()> {
    validate_document(root)?;
    let content = serde_json::to_string_pretty(root)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load by extension: `.json` as JSON, anything else as YAML.
pub fn load(path: &std::path::Path) -> ProjectResult<Record> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => load_json(path),
        _ => load_yaml(path),
    }
}
