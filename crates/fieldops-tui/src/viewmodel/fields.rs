//! Editable scalar fields per record type
//!
//! The detail and create forms walk a fixed field list per entity; values
//! are read and written as display strings. Tracked fields stamp their
//! edit metadata through `TrackedValue::set`. Unparseable dates and
//! numbers leave the field unchanged; validation is the server's job.

use chrono::NaiveDate;

use crate::entity::Record;

pub fn field_labels(record: &Record) -> &'static [&'static str] {
    match record {
        Record::Project(_) => &[
            "Client Name",
            "Description",
            "PO Number",
            "Quotation",
            "Remarks",
            "Due Date (YYYY-MM-DD)",
        ],
        Record::Complaint(_) => &[
            "Client Name",
            "Description",
            "Complaint Ref",
            "PO Number",
            "Quotation",
            "Remarks",
        ],
        Record::Maintenance(_) => &["Client Name", "Remarks"],
        Record::Invoice(_) => &[
            "Invoice Ref",
            "Amount",
            "Credit Days",
            "Due Date (YYYY-MM-DD)",
        ],
        Record::User(_) => &["Name", "Email", "Phone", "Department"],
    }
}

pub fn field_value(record: &Record, index: usize) -> String {
    match record {
        Record::Project(r) => match index {
            0 => r.client_name.clone(),
            1 => r.description.clone(),
            2 => r.po.value.clone(),
            3 => r.quotation.value.clone(),
            4 => r.remarks.value.clone(),
            5 => r.due_date.map(|d| d.to_string()).unwrap_or_default(),
            _ => String::new(),
        },
        Record::Complaint(r) => match index {
            0 => r.client_name.clone(),
            1 => r.description.clone(),
            2 => r.complaint_reference.clone(),
            3 => r.po.value.clone(),
            4 => r.quotation.value.clone(),
            5 => r.remarks.value.clone(),
            _ => String::new(),
        },
        Record::Maintenance(r) => match index {
            0 => r.client_name.clone(),
            1 => r.remarks.value.clone(),
            _ => String::new(),
        },
        Record::Invoice(r) => match index {
            0 => r.invoice_reference.clone(),
            1 => format!("{:.2}", r.amount),
            2 => r.credit_days.map(|d| d.to_string()).unwrap_or_default(),
            3 => r.due_date.map(|d| d.to_string()).unwrap_or_default(),
            _ => String::new(),
        },
        Record::User(r) => match index {
            0 => r.name.clone(),
            1 => r.email.clone(),
            2 => r.phone.clone(),
            3 => r.department.clone(),
            _ => String::new(),
        },
    }
}

pub fn set_field(record: &mut Record, index: usize, value: &str) {
    match record {
        Record::Project(r) => match index {
            0 => r.client_name = value.to_string(),
            1 => r.description = value.to_string(),
            2 => r.po.set(value),
            3 => r.quotation.set(value),
            4 => r.remarks.set(value),
            5 => r.due_date = parse_date(value).or(r.due_date.filter(|_| !value.is_empty())),
            _ => {}
        },
        Record::Complaint(r) => match index {
            0 => r.client_name = value.to_string(),
            1 => r.description = value.to_string(),
            2 => r.complaint_reference = value.to_string(),
            3 => r.po.set(value),
            4 => r.quotation.set(value),
            5 => r.remarks.set(value),
            _ => {}
        },
        Record::Maintenance(r) => match index {
            0 => r.client_name = value.to_string(),
            1 => r.remarks.set(value),
            _ => {}
        },
        Record::Invoice(r) => match index {
            0 => r.invoice_reference = value.to_string(),
            1 => {
                if let Ok(amount) = value.trim().parse::<f64>() {
                    r.amount = amount;
                }
            }
            2 => {
                r.credit_days = if value.trim().is_empty() {
                    None
                } else {
                    value.trim().parse().ok().or(r.credit_days)
                }
            }
            3 => r.due_date = parse_date(value).or(r.due_date.filter(|_| !value.is_empty())),
            _ => {}
        },
        Record::User(r) => match index {
            0 => r.name = value.to_string(),
            1 => r.email = value.to_string(),
            2 => r.phone = value.to_string(),
            3 => r.department = value.to_string(),
            _ => {}
        },
    }
}

pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldops_core::{Invoice, Project};

    #[test]
    fn tracked_fields_stamp_on_edit() {
        let mut record = Record::Project(Project {
            client_name: "Acme".into(),
            ..Default::default()
        });
        set_field(&mut record, 2, "PO-500");

        let Record::Project(project) = &record else {
            unreachable!()
        };
        assert_eq!(project.po.value, "PO-500");
        assert!(project.po.is_edited);
    }

    #[test]
    fn bad_amount_leaves_invoice_unchanged() {
        let mut record = Record::Invoice(Invoice {
            invoice_reference: "INV-1".into(),
            amount: 900.0,
            ..Default::default()
        });
        set_field(&mut record, 1, "not-a-number");

        let Record::Invoice(invoice) = &record else {
            unreachable!()
        };
        assert_eq!(invoice.amount, 900.0);
    }

    #[test]
    fn empty_date_clears_due_date() {
        let mut record = Record::Project(Project {
            client_name: "Acme".into(),
            due_date: parse_date("2026-09-01"),
            ..Default::default()
        });
        set_field(&mut record, 5, "");

        let Record::Project(project) = &record else {
            unreachable!()
        };
        assert!(project.due_date.is_none());
    }

    #[test]
    fn malformed_date_keeps_previous_value() {
        let original = parse_date("2026-09-01");
        let mut record = Record::Project(Project {
            client_name: "Acme".into(),
            due_date: original,
            ..Default::default()
        });
        set_field(&mut record, 5, "next tuesday");

        let Record::Project(project) = &record else {
            unreachable!()
        };
        assert_eq!(project.due_date, original);
    }

    #[test]
    fn labels_and_values_stay_in_step() {
        let record = Record::Invoice(Invoice::default());
        let labels = field_labels(&record);
        for index in 0..labels.len() {
            // Must not panic on any advertised index.
            let _ = field_value(&record, index);
        }
    }
}
