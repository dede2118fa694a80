//! Maintenance contract entity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::filter::Searchable;
use crate::status::WorkStatus;
use crate::tracked::TrackedValue;

/// One scheduled service visit under a maintenance contract. Visits are
/// edited per row by index; the array carries no uniqueness or ordering
/// guarantee beyond position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceVisit {
    #[serde(default)]
    pub service_date: Option<NaiveDate>,
    #[serde(default)]
    pub actual_date: Option<NaiveDate>,
    #[serde(default)]
    pub jc_reference: String,
    #[serde(default, alias = "invoiceRef")]
    pub invoice_reference: String,
    #[serde(default)]
    pub payment_status: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub month: u32,
    #[serde(default)]
    pub year: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Maintenance {
    #[serde(alias = "_id", skip_serializing_if = "String::is_empty")]
    #[serde(default)]
    pub id: String,
    pub client_name: String,
    #[serde(default)]
    pub status: WorkStatus,
    #[serde(default)]
    pub remarks: TrackedValue,
    // Wire name predates the per-row fields; kept for backend compatibility.
    #[serde(default, rename = "serviceDates")]
    pub service_visits: Vec<ServiceVisit>,
}

impl Maintenance {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.client_name.trim().is_empty() {
            return Err(DomainError::MissingField("clientName"));
        }
        Ok(())
    }

    /// Replace the visit at `index` wholesale.
    pub fn update_visit(&mut self, index: usize, visit: ServiceVisit) -> Result<(), DomainError> {
        let slot = self
            .service_visits
            .get_mut(index)
            .ok_or(DomainError::VisitIndexOutOfBounds(index))?;
        *slot = visit;
        Ok(())
    }
}

impl Searchable for Maintenance {
    fn haystack(&self) -> Vec<&str> {
        let mut fields = vec![self.client_name.as_str()];
        fields.extend(self.service_visits.iter().map(|v| v.jc_reference.as_str()));
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
    fn update_visit_replaces_only_the_indexed_row() {
        let mut contract = Maintenance {
            id: "m-1".into(),
            client_name: "Acme".into(),
            service_visits: vec![ServiceVisit::default(), ServiceVisit::default()],
            ..Default::default()
        };

        let edited = ServiceVisit {
            jc_reference: "JC-7".into(),
            is_completed: true,
            ..Default::default()
        };
        contract.update_visit(1, edited.clone()).unwrap();

        assert_eq!(contract.service_visits[0], ServiceVisit::default());
        assert_eq!(contract.service_visits[1], edited);
    }

    #[test]
    fn update_visit_out_of_bounds_errors() {
        let mut contract = Maintenance::default();
        assert!(matches!(
            contract.update_visit(0, ServiceVisit::default()),
            Err(DomainError::VisitIndexOutOfBounds(0))
        ));
    }

    #[test]
    fn accepts_legacy_service_dates_key() {
        let payload = r#"{
            "id": "m-2",
            "clientName": "Beta",
            "serviceDates": [
                {"serviceDate": "2026-03-01", "invoiceRef": "INV-1", "month": 3, "year": 2026}
            ]
        }"#;
        let contract: Maintenance = serde_json::from_str(payload).unwrap();
        assert_eq!(contract.service_visits.len(), 1);
        assert_eq!(contract.service_visits[0].invoice_reference, "INV-1");
    }
}
