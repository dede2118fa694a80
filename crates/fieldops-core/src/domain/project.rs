//! Project entity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::photo::Photo;
use crate::error::DomainError;
use crate::filter::Searchable;
use crate::status::WorkStatus;
use crate::tracked::TrackedValue;

/// A project may carry at most this many survey photos.
pub const MAX_SURVEY_PHOTOS: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(alias = "_id", skip_serializing_if = "String::is_empty")]
    #[serde(default)]
    pub id: String,
    pub client_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: WorkStatus,
    #[serde(default)]
    pub po: TrackedValue,
    #[serde(default)]
    pub quotation: TrackedValue,
    #[serde(default)]
    pub remarks: TrackedValue,
    #[serde(default)]
    pub jc_references: Vec<TrackedValue>,
    #[serde(default)]
    pub dc_references: Vec<TrackedValue>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub survey_photos: Vec<Photo>,
    #[serde(default)]
    pub assigned_workers: Vec<String>,
}

impl Project {
    /// Advisory client-side check; the server remains the authority.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.client_name.trim().is_empty() {
            return Err(DomainError::MissingField("clientName"));
        }
        Ok(())
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == WorkStatus::Cancelled
    }
}

impl Searchable for Project {
    fn haystack(&self) -> Vec<&str> {
        let mut fields = vec![self.client_name.as_str(), self.po.value.as_str()];
        fields.extend(self.jc_references.iter().map(|r| r.value.as_str()));
        fields
    }

    fn status_label(&self) -> &str {
        self.status.label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_requires_client_name() {
        let project = Project::default();
        assert!(matches!(
            project.validate(),
            Err(DomainError::MissingField("clientName"))
        ));

        let project = Project {
            client_name: "Acme".into(),
            ..Default::default()
        };
        assert!(project.validate().is_ok());
    }

    #[test]
    fn search_haystack_covers_jc_references() {
        let project = Project {
            client_name: "Acme".into(),
            jc_references: vec![TrackedValue::new("JC-42")],
            ..Default::default()
        };
        assert!(project.haystack().contains(&"JC-42"));
    }

    #[test]
    fn round_trips_backend_payload() {
        let payload = r#"{
            "_id": "p-1",
            "clientName": "Acme",
            "status": "In Progress",
            "po": {"value": "PO-9", "isEdited": true, "updatedAt": null},
            "surveyPhotos": ["https://img.example/site.jpg"],
            "assignedWorkers": ["u-1", "u-2"]
        }"#;
        let project: Project = serde_json::from_str(payload).unwrap();
        assert_eq!(project.id, "p-1");
        assert_eq!(project.status, WorkStatus::InProgress);
        assert_eq!(project.survey_photos[0].url, "https://img.example/site.jpg");
        assert_eq!(project.assigned_workers.len(), 2);
    }
}
