//! Service visit editor view model
//!
//! Row selection plus a field walk over one visit's scalar fields. The
//! draft is a detached copy; nothing touches the contract until the draft
//! is applied, which replaces exactly the indexed row.

use fieldops_core::{DomainError, Maintenance, ServiceVisit};

use crate::viewmodel::fields;

pub const VISIT_FIELD_LABELS: &[&str] = &[
    "Service Date (YYYY-MM-DD)",
    "Actual Date (YYYY-MM-DD)",
    "JC Reference",
    "Invoice Reference",
    "Payment Status",
    "Completed (y/n)",
];

pub struct VisitVm {
    pub cursor: usize,
    pub draft: Option<VisitDraft>,
}

impl VisitVm {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            draft: None,
        }
    }

    pub fn cursor_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn cursor_down(&mut self, len: usize) {
        if self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    pub fn begin_edit(&mut self, index: usize, visit: ServiceVisit) {
        self.draft = Some(VisitDraft {
            index,
            visit,
            field_index: 0,
            input: None,
        });
    }

    pub fn cancel_edit(&mut self) {
        self.draft = None;
    }

    pub fn take_draft(&mut self) -> Option<VisitDraft> {
        self.draft.take()
    }
}

/// One visit being edited, detached from the contract it came from.
pub struct VisitDraft {
    pub index: usize,
    pub visit: ServiceVisit,
    pub field_index: usize,
    pub input: Option<String>,
}

impl VisitDraft {
    pub fn field_value(&self, index: usize) -> String {
        match index {
            0 => self.visit.service_date.map(|d| d.to_string()).unwrap_or_default(),
            1 => self.visit.actual_date.map(|d| d.to_string()).unwrap_or_default(),
            2 => self.visit.jc_reference.clone(),
            3 => self.visit.invoice_reference.clone(),
            4 => self.visit.payment_status.clone(),
            5 => {
                if self.visit.is_completed {
                    "y".to_string()
                } else {
                    "n".to_string()
                }
            }
            _ => String::new(),
        }
    }

    fn set_field(&mut self, index: usize, value: &str) {
        match index {
            0 => {
                self.visit.service_date = fields::parse_date(value)
                    .or(self.visit.service_date.filter(|_| !value.trim().is_empty()))
            }
            1 => {
                self.visit.actual_date = fields::parse_date(value)
                    .or(self.visit.actual_date.filter(|_| !value.trim().is_empty()))
            }
            2 => self.visit.jc_reference = value.to_string(),
            3 => self.visit.invoice_reference = value.to_string(),
            4 => self.visit.payment_status = value.to_string(),
            5 => {
                self.visit.is_completed =
                    matches!(value.trim().to_lowercase().as_str(), "y" | "yes" | "true")
            }
            _ => {}
        }
    }

    pub fn next_field(&mut self) {
        self.commit_input();
        if self.field_index + 1 < VISIT_FIELD_LABELS.len() {
            self.field_index += 1;
        }
    }

    pub fn prev_field(&mut self) {
        self.commit_input();
        if self.field_index > 0 {
            self.field_index -= 1;
        }
    }

    pub fn begin_input(&mut self) {
        if self.input.is_none() {
            self.input = Some(self.field_value(self.field_index));
        }
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(input) = self.input.as_mut() {
            input.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(input) = self.input.as_mut() {
            input.pop();
        }
    }

    pub fn commit_input(&mut self) {
        if let Some(input) = self.input.take() {
            self.set_field(self.field_index, &input);
        }
    }

    pub fn discard_input(&mut self) {
        self.input = None;
    }

    /// Replace the contract's indexed visit with the edited copy.
    pub fn apply(mut self, contract: &mut Maintenance) -> Result<(), DomainError> {
        self.commit_input();
        contract.update_visit(self.index, self.visit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn contract() -> Maintenance {
        Maintenance {
            id: "m-1".into(),
            client_name: "Acme".into(),
            service_visits: vec![
                ServiceVisit {
                    jc_reference: "JC-1".into(),
                    ..Default::default()
                },
                ServiceVisit {
                    jc_reference: "JC-2".into(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    fn type_in(draft: &mut VisitDraft, text: &str) {
        draft.begin_input();
        draft.input = Some(String::new());
        for c in text.chars() {
            draft.push_char(c);
        }
        draft.commit_input();
    }

    #[test]
    fn applying_a_draft_replaces_only_the_indexed_visit() {
        let mut contract = contract();
        let mut vm = VisitVm::new();
        vm.cursor_down(contract.service_visits.len());
        vm.begin_edit(vm.cursor, contract.service_visits[vm.cursor].clone());

        let draft = vm.draft.as_mut().unwrap();
        draft.next_field();
        draft.next_field(); // JC Reference
        type_in(draft, "JC-99");
        draft.next_field();
        draft.next_field();
        draft.next_field(); // Completed
        type_in(draft, "y");

        vm.take_draft().unwrap().apply(&mut contract).unwrap();
        assert_eq!(contract.service_visits[0].jc_reference, "JC-1");
        assert_eq!(contract.service_visits[1].jc_reference, "JC-99");
        assert!(contract.service_visits[1].is_completed);
        assert!(!contract.service_visits[0].is_completed);
    }

    #[test]
    fn pending_input_commits_on_apply() {
        let mut contract = contract();
        let mut vm = VisitVm::new();
        vm.begin_edit(0, contract.service_visits[0].clone());

        let draft = vm.draft.as_mut().unwrap();
        draft.input = Some("2026-09-15".into());

        vm.take_draft().unwrap().apply(&mut contract).unwrap();
        assert_eq!(
            contract.service_visits[0].service_date,
            NaiveDate::from_ymd_opt(2026, 9, 15)
        );
    }

    #[test]
    fn malformed_date_keeps_previous_value() {
        let scheduled = NaiveDate::from_ymd_opt(2026, 9, 15);
        let mut vm = VisitVm::new();
        vm.begin_edit(
            0,
            ServiceVisit {
                service_date: scheduled,
                ..Default::default()
            },
        );

        let draft = vm.draft.as_mut().unwrap();
        type_in(draft, "next tuesday");
        assert_eq!(draft.visit.service_date, scheduled);

        type_in(draft, "");
        assert_eq!(draft.visit.service_date, None);
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let mut contract = contract();
        let mut vm = VisitVm::new();
        vm.begin_edit(5, ServiceVisit::default());

        let err = vm.take_draft().unwrap().apply(&mut contract).unwrap_err();
        assert!(matches!(err, DomainError::VisitIndexOutOfBounds(5)));
    }

    #[test]
    fn cancelled_draft_leaves_nothing_behind() {
        let mut vm = VisitVm::new();
        vm.begin_edit(0, ServiceVisit::default());
        vm.cancel_edit();
        assert!(vm.draft.is_none());
        assert!(vm.take_draft().is_none());
    }
}
