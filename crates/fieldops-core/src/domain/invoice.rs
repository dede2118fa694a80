//! Invoice entity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::filter::Searchable;
use crate::status::PaymentTerms;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[serde(alias = "_id", skip_serializing_if = "String::is_empty")]
    #[serde(default)]
    pub id: String,
    pub invoice_reference: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub payment_terms: PaymentTerms,
    #[serde(default)]
    pub credit_days: Option<u32>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub project_id: Option<String>,
}

impl Invoice {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.invoice_reference.trim().is_empty() {
            return Err(DomainError::MissingField("invoiceReference"));
        }
        if self.amount <= 0.0 {
            return Err(DomainError::InvalidAmount);
        }
        Ok(())
    }

    /// Credit invoices fall due `credit_days` after issue; cash invoices
    /// are due immediately.
    pub fn is_credit(&self) -> bool {
        self.payment_terms == PaymentTerms::Credit
    }
}

impl Searchable for Invoice {
    fn haystack(&self) -> Vec<&str> {
        vec![self.invoice_reference.as_str()]
    }

    fn status_label(&self) -> &str {
        &self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_missing_reference_and_bad_amount() {
        let invoice = Invoice::default();
        assert!(matches!(
            invoice.validate(),
            Err(DomainError::MissingField("invoiceReference"))
        ));

        let invoice = Invoice {
            invoice_reference: "INV-1".into(),
            amount: 0.0,
            ..Default::default()
        };
        assert!(matches!(invoice.validate(), Err(DomainError::InvalidAmount)));

        let invoice = Invoice {
            invoice_reference: "INV-1".into(),
            amount: 1500.0,
            ..Default::default()
        };
        assert!(invoice.validate().is_ok());
    }

    #[test]
    fn payment_terms_parse_capitalized() {
        let invoice: Invoice = serde_json::from_str(
            r#"{"id":"i-1","invoiceReference":"INV-2","paymentTerms":"Credit","creditDays":30}"#,
        )
        .unwrap();
        assert!(invoice.is_credit());
        assert_eq!(invoice.credit_days, Some(30));
    }
}
