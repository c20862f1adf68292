//! The results sink: typed, write-once-per-name entries collected in memory
//! and persisted by a single terminal write.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::QcError;

/// One typed QC outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", content = "value", rename_all = "lowercase")]
pub enum ResultEntry {
    Float(f64),
    String(String),
    Bool(bool),
    DateTime(NaiveDateTime),
    /// Path of an exported image file.
    Object(PathBuf),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct NamedEntry {
    name: String,
    #[serde(flatten)]
    entry: ResultEntry,
}

#[derive(Debug, Serialize, Deserialize)]
struct ResultsDocument {
    results: Vec<NamedEntry>,
}

/// Collects results for one invocation. Each name may be written once;
/// `write` persists everything as a single JSON document.
#[derive(Debug, Default)]
pub struct ResultsSink {
    entries: Vec<NamedEntry>,
    names: BTreeSet<String>,
}

impl ResultsSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ResultEntry> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.entry)
    }

    pub fn add_float(&mut self, name: &str, value: f64) -> Result<(), QcError> {
        self.add(name, ResultEntry::Float(value))
    }

    pub fn add_string(&mut self, name: &str, value: &str) -> Result<(), QcError> {
        self.add(name, ResultEntry::String(value.to_string()))
    }

    pub fn add_bool(&mut self, name: &str, value: bool) -> Result<(), QcError> {
        self.add(name, ResultEntry::Bool(value))
    }

    pub fn add_datetime(&mut self, name: &str, value: NaiveDateTime) -> Result<(), QcError> {
        self.add(name, ResultEntry::DateTime(value))
    }

    pub fn add_object(&mut self, name: &str, path: &Path) -> Result<(), QcError> {
        self.add(name, ResultEntry::Object(path.to_path_buf()))
    }

    fn add(&mut self, name: &str, entry: ResultEntry) -> Result<(), QcError> {
        if !self.names.insert(name.to_string()) {
            return Err(QcError::DuplicateResult(name.to_string()));
        }
        self.entries.push(NamedEntry {
            name: name.to_string(),
            entry,
        });
        Ok(())
    }

    /// Terminal write: serializes all collected entries to `path` as
    /// pretty-printed JSON.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), QcError> {
        let doc = ResultsDocument {
            results: self.entries.clone(),
        };
        let json = serde_json::to_string_pretty(&doc)
            .map_err(|e| QcError::Input(format!("results serialization: {e}")))?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_write_once_per_name() {
        let mut sink = ResultsSink::new();
        sink.add_float("Depth", 12.5).unwrap();
        let err = sink.add_string("Depth", "12.5").unwrap_err();
        assert!(matches!(err, QcError::DuplicateResult(_)), "{err}");
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_entries_retrievable_by_name() {
        let mut sink = ResultsSink::new();
        sink.add_bool("Frozen", true).unwrap();
        sink.add_string("Probe", "C5-2").unwrap();
        assert_eq!(sink.get("Frozen"), Some(&ResultEntry::Bool(true)));
        assert_eq!(
            sink.get("Probe"),
            Some(&ResultEntry::String("C5-2".to_string()))
        );
        assert_eq!(sink.get("missing"), None);
    }

    #[test]
    fn test_written_document_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");

        let dt = NaiveDate::from_ymd_opt(2016, 9, 1)
            .unwrap()
            .and_hms_opt(11, 24, 28)
            .unwrap();
        let mut sink = ResultsSink::new();
        sink.add_float("Depth", 12.5).unwrap();
        sink.add_datetime("AcquisitionDateTime", dt).unwrap();
        sink.add_object("Curve", Path::new("Curve.jpg")).unwrap();
        sink.write(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
        let results = doc["results"].as_array().unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0]["name"], "Depth");
        assert_eq!(results[0]["category"], "float");
        assert_eq!(results[0]["value"], 12.5);
        assert_eq!(results[2]["category"], "object");
    }
}
