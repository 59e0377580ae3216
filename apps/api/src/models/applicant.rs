use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted applicant. `data` holds the model output after name/email encryption.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicantRow {
    pub id: Uuid,
    pub data: Value,
    pub submitted_by: String,
    pub source_url: String,
    pub created_at: DateTime<Utc>,
}

/// Expected shape of `ApplicantRow::data`.
///
/// Model output is persisted as-is; this view is only used to flag
/// records that drift from the prompt's schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplicantRecord {
    pub name: Option<String>,
    pub email: Option<String>,
    pub education: Option<Education>,
    pub experience: Option<Experience>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Education {
    pub degree: Option<String>,
    pub branch: Option<String>,
    pub institution: Option<String>,
    pub year: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Experience {
    pub job_title: Option<String>,
    pub company: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_accepts_schema_shape() {
        let record: ApplicantRecord = serde_json::from_value(json!({
            "name": "Jane Doe",
            "email": "jane@x.com",
            "education": {"degree": "BS", "branch": "Computer Science", "institution": "XYZ University", "year": 2020},
            "experience": {"job_title": "Software Engineer", "company": "Acme"},
            "skills": ["Rust"],
            "summary": ""
        }))
        .unwrap();
        assert_eq!(record.education.unwrap().year, Some(2020));
        assert_eq!(record.skills, vec!["Rust"]);
    }

    #[test]
    fn test_record_tolerates_missing_fields() {
        let record: ApplicantRecord = serde_json::from_value(json!({"summary": "x"})).unwrap();
        assert!(record.name.is_none());
        assert!(record.skills.is_empty());
    }

    #[test]
    fn test_record_rejects_wrong_types() {
        let result = serde_json::from_value::<ApplicantRecord>(json!({
            "education": {"year": "twenty twenty"}
        }));
        assert!(result.is_err());
    }
}
