//! Record detail/edit view model
//!
//! Two booleans drive the screen: `edit_mode` and `saving`. Entering edit
//! mode snapshots the fetched record, so cancelling restores it exactly;
//! nothing reaches the server until an explicit save.

use fieldops_core::{DomainError, User};

use crate::entity::{Record, SubList};
use crate::viewmodel::fields;

pub struct DetailVm {
    pub record: Record,
    snapshot: Option<Record>,
    pub edit_mode: bool,
    pub saving: bool,
    pub field_index: usize,
    /// Focused-field input buffer; committed on Enter, discarded on Esc.
    pub input: Option<String>,
    pub sub_list_index: usize,
    /// Approved users fetched alongside the record for the assign modal.
    pub reference_users: Vec<User>,
}

impl DetailVm {
    pub fn new(record: Record, reference_users: Vec<User>) -> Self {
        Self {
            record,
            snapshot: None,
            edit_mode: false,
            saving: false,
            field_index: 0,
            input: None,
            sub_list_index: 0,
            reference_users,
        }
    }

    pub fn field_count(&self) -> usize {
        fields::field_labels(&self.record).len()
    }

    pub fn enter_edit(&mut self) {
        if self.edit_mode {
            return;
        }
        self.snapshot = Some(self.record.clone());
        self.edit_mode = true;
        self.field_index = 0;
    }

    /// Discard all local edits and restore the last-fetched state.
    pub fn cancel_edit(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            self.record = snapshot;
        }
        self.edit_mode = false;
        self.input = None;
    }

    /// Validate and hand out the record for submission; the caller owns
    /// the network call and reports back via `save_finished`.
    pub fn begin_save(&mut self) -> Result<Record, DomainError> {
        self.commit_input();
        self.record.validate()?;
        self.saving = true;
        Ok(self.record.clone())
    }

    pub fn save_finished(&mut self, saved: Option<Record>) {
        self.saving = false;
        if let Some(record) = saved {
            // Server copy wins; drop the snapshot along with edit mode.
            self.record = record;
            self.snapshot = None;
            self.edit_mode = false;
        }
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
        if self.edit_mode && self.input.is_none() {
            self.input = Some(fields::field_value(&self.record, self.field_index));
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
            fields::set_field(&mut self.record, self.field_index, &input);
        }
    }

    pub fn discard_input(&mut self) {
        self.input = None;
    }

    pub fn append_sub_entry(&mut self, list: SubList) {
        if self.edit_mode {
            self.record.append_sub_entry(list);
        }
    }

    pub fn remove_sub_entry(&mut self, list: SubList, index: usize) {
        if self.edit_mode {
            self.record.remove_sub_entry(list, index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldops_core::{Project, TrackedValue};

    fn project_record() -> Record {
        Record::Project(Project {
            id: "p-1".into(),
            client_name: "Acme".into(),
            po: TrackedValue::new("PO-1"),
            jc_references: vec![TrackedValue::new("JC-1")],
            ..Default::default()
        })
    }

    #[test]
    fn toggling_edit_mode_without_saving_leaves_record_untouched() {
        let mut vm = DetailVm::new(project_record(), Vec::new());
        let fetched = vm.record.clone();

        vm.enter_edit();
        vm.begin_input();
        vm.push_char('X');
        vm.push_char('Y');
        vm.commit_input();
        vm.next_field();
        vm.append_sub_entry(SubList::JcReferences);

        vm.cancel_edit();
        assert!(!vm.edit_mode);
        assert_eq!(vm.record, fetched);
    }

    #[test]
    fn begin_save_validates_pending_input() {
        let mut vm = DetailVm::new(project_record(), Vec::new());
        vm.enter_edit();
        // Blank out the client name without committing first.
        vm.input = Some(String::new());
        assert!(vm.begin_save().is_err());
        assert!(!vm.saving);
    }

    #[test]
    fn successful_save_exits_edit_mode_with_server_copy() {
        let mut vm = DetailVm::new(project_record(), Vec::new());
        vm.enter_edit();
        vm.begin_input();
        vm.push_char('!');
        let submitted = vm.begin_save().unwrap();
        assert!(vm.saving);

        vm.save_finished(Some(submitted.clone()));
        assert!(!vm.saving);
        assert!(!vm.edit_mode);
        assert_eq!(vm.record, submitted);
    }

    #[test]
    fn failed_save_keeps_edit_mode_and_local_state() {
        let mut vm = DetailVm::new(project_record(), Vec::new());
        vm.enter_edit();
        let _ = vm.begin_save().unwrap();

        vm.save_finished(None);
        assert!(!vm.saving);
        assert!(vm.edit_mode);
    }

    #[test]
    fn sub_entry_edits_require_edit_mode() {
        let mut vm = DetailVm::new(project_record(), Vec::new());
        vm.append_sub_entry(SubList::JcReferences);
        assert_eq!(vm.record.sub_list_len(SubList::JcReferences), 1);

        vm.enter_edit();
        vm.append_sub_entry(SubList::JcReferences);
        assert_eq!(vm.record.sub_list_len(SubList::JcReferences), 2);
    }
}
