//! Hierarchical input records.
//!
//! A record is a tag, a flat map of named fields and an ordered list of
//! child records. In YAML a record reads naturally:
//!
//! ```yaml
//! tag: AirSys
//! Name: AHU 1
//! Type: VAV
//! children:
//!   - tag: AirSeg
//!     Name: Supply
//!     Type: Supply
//! ```
//!
//! Every accessor is optional-returning; a field of the wrong type reads as
//! absent.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A scalar or list field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<FieldValue>),
}

impl FieldValue {
    fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(v) => Some(*v),
            FieldValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Number(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<Vec<f64>> for FieldValue {
    fn from(v: Vec<f64>) -> Self {
        FieldValue::List(v.into_iter().map(FieldValue::Number).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub tag: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Record>,
}

impl Record {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            fields: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: Record) -> Self {
        self.children.push(child);
        self
    }

    /// Non-empty, trimmed text field.
    pub fn get_string(&self, field: &str) -> Option<&str> {
        match self.fields.get(field)? {
            FieldValue::Text(s) => {
                let s = s.trim();
                (!s.is_empty()).then_some(s)
            }
            _ => None,
        }
    }

    /// Numeric field; numeric text is accepted.
    pub fn get_double(&self, field: &str) -> Option<f64> {
        self.fields.get(field)?.as_f64().filter(|v| v.is_finite())
    }

    pub fn get_bool(&self, field: &str) -> Option<bool> {
        match self.fields.get(field)? {
            FieldValue::Bool(b) => Some(*b),
            FieldValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Some(true),
                "false" | "no" | "0" => Some(false),
                _ => None,
            },
            FieldValue::Number(v) => Some(*v != 0.0),
            FieldValue::List(_) => None,
        }
    }

    /// Element `index` of a list field. A scalar field answers index 0.
    pub fn get_indexed_double(&self, field: &str, index: usize) -> Option<f64> {
        let value = match self.fields.get(field)? {
            FieldValue::List(items) => items.get(index)?.as_f64(),
            scalar if index == 0 => scalar.as_f64(),
            _ => None,
        };
        value.filter(|v| v.is_finite())
    }

    /// All numeric elements of a list field, stopping at the first gap.
    pub fn get_doubles(&self, field: &str) -> Vec<f64> {
        (0..)
            .map_while(|i| self.get_indexed_double(field, i))
            .collect()
    }

    pub fn name(&self) -> Option<&str> {
        self.get_string("Name")
    }

    /// First child with `tag`.
    pub fn get_child(&self, tag: &str) -> Option<&Record> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// Children with `tag`, in declaration order.
    pub fn get_children<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Record> + 'a {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// First child with `tag` whose `Name` matches.
    pub fn find_child(&self, tag: &str, name: &str) -> Option<&Record> {
        self.children
            .iter()
            .find(|c| c.tag == tag && c.name() == Some(name))
    }

    /// Label used in diagnostics: `Name` when present, the tag otherwise.
    pub fn label(&self) -> &str {
        self.name().unwrap_or(&self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coil() -> Record {
        Record::new("CoilClg")
            .with_field("Name", "DX Coil")
            .with_field("CapTotGrossRtd", 36_000.0)
            .with_field("SHRRtd", "0.75")
            .with_field("Empty", "  ")
            .with_child(
                Record::new("ClgStage")
                    .with_field("Idx", 0.0)
                    .with_field("CapFrac", 0.5),
            )
    }

    #[test]
    fn scalar_accessors() {
        let r = coil();
        assert_eq!(r.name(), Some("DX Coil"));
        assert_eq!(r.get_double("CapTotGrossRtd"), Some(36_000.0));
        assert_eq!(r.get_double("SHRRtd"), Some(0.75));
        assert_eq!(r.get_string("Empty"), None);
        assert_eq!(r.get_string("CapTotGrossRtd"), None);
        assert_eq!(r.get_double("Missing"), None);
    }

    #[test]
    fn indexed_lists() {
        let r = Record::new("Crv").with_field("Coef", vec![1.0, 2.0, 3.0]);
        assert_eq!(r.get_indexed_double("Coef", 1), Some(2.0));
        assert_eq!(r.get_indexed_double("Coef", 3), None);
        assert_eq!(r.get_doubles("Coef"), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn child_lookup() {
        let r = coil();
        let stage = r.get_child("ClgStage").unwrap();
        assert_eq!(stage.get_double("CapFrac"), Some(0.5));
        assert_eq!(r.get_children("Fan").count(), 0);
        assert_eq!(r.label(), "DX Coil");
        assert_eq!(stage.label(), "ClgStage");
    }

    #[test]
    fn find_child_outlives_the_tag() {
        let root = Record::new("Proj")
            .with_child(Record::new("ThrmlZn").with_field("Name", "Office"))
            .with_child(Record::new("ThrmlZn").with_field("Name", "Lab"));
        let found = {
            let tag = String::from("ThrmlZn");
            root.find_child(&tag, "Lab")
        };
        assert_eq!(found.and_then(Record::name), Some("Lab"));
        assert!(root.find_child("ThrmlZn", "Attic").is_none());
    }

    #[test]
    fn yaml_fields_flatten_into_record() {
        let text = "tag: Fan\nName: SF\nFlowCap: 1000\nchildren: []\n";
        let r: Record = serde_yaml::from_str(text).unwrap();
        assert_eq!(r.tag, "Fan");
        assert_eq!(r.get_double("FlowCap"), Some(1000.0));
        assert!(r.children.is_empty());
    }
}
