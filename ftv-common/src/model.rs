//! Worker record model
//!
//! One row of the hosted worker table. Records are created and owned by the
//! remote store; the portal only reads the collection and patches the
//! verification fields of a single record on a successful match.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One worker identity entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkerRecord {
    /// Unique identifier assigned by the store
    pub id: i64,
    /// Factory grouping key; the remote column holds a string or a small
    /// integer depending on deployment, so both forms deserialize to a string
    #[serde(deserialize_with = "factory_key")]
    pub factory: String,
    /// Primary id-string (variable-length digits, not unique across factories)
    pub nik: String,
    /// Secondary id-string
    pub ktp: String,
    /// Display name
    pub name: String,
    pub department: String,
    /// Verified flag
    pub status: bool,
    /// Present iff verified; not enforced by the store
    #[serde(default)]
    pub verified_date: Option<DateTime<Utc>>,
}

impl WorkerRecord {
    /// Human status label used in listings and export rows
    pub fn status_label(&self) -> &'static str {
        if self.status {
            "Verified"
        } else {
            "Unverified"
        }
    }

    /// Factory label used in listings and export rows
    pub fn factory_label(&self) -> String {
        format!("Factory {}", self.factory)
    }
}

/// Accept a string or a number for the factory column
fn factory_key<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

/// Sorted distinct factory keys present in the collection
pub fn factory_keys(records: &[WorkerRecord]) -> Vec<String> {
    let mut keys: Vec<String> = records.iter().map(|r| r.factory.clone()).collect();
    keys.sort();
    keys.dedup();
    keys
}

/// Sorted distinct department names present in the collection
pub fn department_names(records: &[WorkerRecord]) -> Vec<String> {
    let mut names: Vec<String> = records.iter().map(|r| r.department.clone()).collect();
    names.sort();
    names.dedup();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_deserializes_from_number() {
        let json = r#"{"id":1,"factory":2,"nik":"123","ktp":"456","name":"A","department":"Sewing","status":false}"#;
        let record: WorkerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.factory, "2");
        assert_eq!(record.verified_date, None);
    }

    #[test]
    fn test_factory_deserializes_from_string() {
        let json = r#"{"id":1,"factory":"3","nik":"123","ktp":"456","name":"A","department":"Sewing","status":true,"verified_date":"2024-01-01T08:30:00Z"}"#;
        let record: WorkerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.factory, "3");
        assert!(record.verified_date.is_some());
    }

    #[test]
    fn test_null_verified_date() {
        let json = r#"{"id":1,"factory":"2","nik":"123","ktp":"456","name":"A","department":"Sewing","status":false,"verified_date":null}"#;
        let record: WorkerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.verified_date, None);
    }

    #[test]
    fn test_labels() {
        let json = r#"{"id":1,"factory":2,"nik":"123","ktp":"456","name":"A","department":"Sewing","status":false}"#;
        let record: WorkerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.factory_label(), "Factory 2");
        assert_eq!(record.status_label(), "Unverified");
    }

    #[test]
    fn test_distinct_options_sorted() {
        let records: Vec<WorkerRecord> = serde_json::from_str(
            r#"[
                {"id":1,"factory":"3","nik":"1","ktp":"1","name":"A","department":"Sewing","status":false},
                {"id":2,"factory":"2","nik":"2","ktp":"2","name":"B","department":"Cutting","status":false},
                {"id":3,"factory":"2","nik":"3","ktp":"3","name":"C","department":"Sewing","status":false}
            ]"#,
        )
        .unwrap();

        assert_eq!(factory_keys(&records), vec!["2", "3"]);
        assert_eq!(department_names(&records), vec!["Cutting", "Sewing"]);
    }
}
