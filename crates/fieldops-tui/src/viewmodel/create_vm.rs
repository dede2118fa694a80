//! Record create view model
//!
//! A locally-built draft mirroring the detail record's shape. The same
//! field walk and sub-array operations apply; there is no persistence, so
//! an abandoned draft is silently dropped with the screen.

use fieldops_core::DomainError;

use crate::entity::{EntityKind, Record, SubList};
use crate::viewmodel::fields;

pub struct CreateVm {
    pub draft: Record,
    pub field_index: usize,
    pub input: Option<String>,
    pub submitting: bool,
}

impl CreateVm {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            draft: Record::empty(kind),
            field_index: 0,
            input: None,
            submitting: false,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.draft.kind()
    }

    pub fn field_count(&self) -> usize {
        fields::field_labels(&self.draft).len()
    }

    pub fn next_field(&mut self) {
        self.commit_input();
        if self.field_index + 1 < self.field_count() {
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
            self.input = Some(fields::field_value(&self.draft, self.field_index));
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
            fields::set_field(&mut self.draft, self.field_index, &input);
        }
    }

    pub fn append_sub_entry(&mut self, list: SubList) {
        self.draft.append_sub_entry(list);
    }

    pub fn remove_sub_entry(&mut self, list: SubList, index: usize) {
        self.draft.remove_sub_entry(list, index);
    }

    /// Validate and hand out the whole draft for one create call.
    pub fn begin_submit(&mut self) -> Result<Record, DomainError> {
        self.commit_input();
        self.draft.validate()?;
        self.submitting = true;
        Ok(self.draft.clone())
    }

    pub fn submit_failed(&mut self) {
        self.submitting = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_draft_fails_validation() {
        let mut vm = CreateVm::new(EntityKind::Projects);
        assert!(vm.begin_submit().is_err());
        assert!(!vm.submitting);
    }

    #[test]
    fn draft_accumulates_fields_and_sub_entries() {
        let mut vm = CreateVm::new(EntityKind::Complaints);
        vm.begin_input();
        for c in "Acme".chars() {
            vm.push_char(c);
        }
        vm.commit_input();
        vm.append_sub_entry(SubList::VisitDates);
        vm.append_sub_entry(SubList::VisitDates);
        vm.remove_sub_entry(SubList::VisitDates, 1);

        let draft = vm.begin_submit().unwrap();
        assert_eq!(draft.title(), "Acme");
        assert_eq!(draft.sub_list_len(SubList::VisitDates), 1);
        // Drafts have no id until the backend assigns one.
        assert!(draft.id().is_empty());
    }
}
