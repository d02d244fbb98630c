//! Reading conditions from JSON and YAML files.
//!
//! The format is chosen from the file extension: `.json`, `.yaml` or `.yml`.

use crate::condition::Condition;
use crate::{ConditionError, ConditionResult};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RecordFormat {
    Json,
    Yaml,
}

impl RecordFormat {
    fn from_path(path: &Path) -> ConditionResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            _ => Err(ConditionError::UnsupportedFormat(format!(
                "{} (expected .json, .yaml or .yml)",
                path.display()
            ))),
        }
    }
}

fn read_records<T: DeserializeOwned>(path: &Path) -> ConditionResult<T> {
    let format = RecordFormat::from_path(path)?;
    let contents = fs::read_to_string(path).map_err(ConditionError::FileRead)?;

    match format {
        RecordFormat::Json => {
            serde_json::from_str(&contents).map_err(ConditionError::Deserialization)
        }
        RecordFormat::Yaml => {
            serde_yaml::from_str(&contents).map_err(ConditionError::YamlDeserialization)
        }
    }
}

/// Read a single condition.
pub fn read_condition_file(path: &Path) -> ConditionResult<Condition> {
    read_records(path)
}

/// Read a list of conditions.
pub fn read_conditions_file(path: &Path) -> ConditionResult<Vec<Condition>> {
    let conditions: Vec<Condition> = read_records(path)?;
    tracing::debug!(
        path = %path.display(),
        count = conditions.len(),
        "loaded conditions"
    );
    Ok(conditions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use conditionlist_types::ConditionStatus;
    use conditionlist_uuid::RecordUuid;
    use std::io::Write;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).expect("create file");
        file.write_all(contents.as_bytes()).expect("write file");
        path
    }

    #[test]
    fn test_read_condition_file_json() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "candidate.json",
            r#"{"uuid": "U2", "patient": "P1", "status": "ACTIVE",
                "concept": {"uuid": "C1"}, "conditionNonCoded": "fever"}"#,
        );

        let condition = read_condition_file(&path).unwrap();
        assert_eq!(condition.uuid, Some(RecordUuid::parse("U2").unwrap()));
        assert_eq!(condition.non_coded_text(), Some("fever"));
        assert!(condition.creator.is_none());
    }

    #[test]
    fn test_read_conditions_file_yaml() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "existing.yml",
            "- uuid: U1\n  patient: P1\n  status: HISTORY_OF\n  concept:\n    uuid: C1\n  conditionNonCoded: \"Fever  \"\n  dateCreated: \"2024-03-01T10:00:00Z\"\n- uuid: U3\n  patient: P1\n  voided: true\n",
        );

        let conditions = read_conditions_file(&path).unwrap();
        assert_eq!(conditions.len(), 2);
        assert_eq!(conditions[0].status, Some(ConditionStatus::HistoryOf));
        assert_eq!(conditions[0].condition_non_coded.as_deref(), Some("Fever  "));
        assert!(conditions[1].voided);
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "conditions.txt", "[]");

        let err = read_conditions_file(&path).expect_err("unsupported");
        assert!(matches!(err, ConditionError::UnsupportedFormat(msg) if msg.contains(".txt")));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let err = read_condition_file(&dir.path().join("absent.json")).expect_err("missing");
        assert!(matches!(err, ConditionError::FileRead(_)));
    }

    #[test]
    fn test_invalid_uuid_is_deserialization_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "candidate.json", r#"{"uuid": ""}"#);

        let err = read_condition_file(&path).expect_err("blank uuid");
        assert!(matches!(err, ConditionError::Deserialization(_)));
    }
}
