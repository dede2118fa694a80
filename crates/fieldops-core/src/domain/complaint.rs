//! Complaint entity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::photo::Photo;
use crate::error::DomainError;
use crate::filter::Searchable;
use crate::status::{Priority, WorkStatus};
use crate::tracked::TrackedValue;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    #[serde(alias = "_id", skip_serializing_if = "String::is_empty")]
    #[serde(default)]
    pub id: String,
    pub client_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: WorkStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub complaint_reference: String,
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
    pub visit_dates: Vec<NaiveDate>,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub assigned_workers: Vec<String>,
}

impl Complaint {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.client_name.trim().is_empty() {
            return Err(DomainError::MissingField("clientName"));
        }
        Ok(())
    }
}

impl Searchable for Complaint {
    fn haystack(&self) -> Vec<&str> {
        vec![
            self.client_name.as_str(),
            self.complaint_reference.as_str(),
        ]
    }

    fn status_label(&self) -> &str {
        self.status.label()
    }
}
