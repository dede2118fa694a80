//! Record list view model
//!
//! Search string and status selector are independent pieces of local
//! state; both predicates run through `fieldops_core::filter_records` on
//! every render. The cursor addresses the filtered view, not the raw
//! collection.

use fieldops_core::StatusFilter;

use crate::entity::{Collection, EntityKind, Record};

pub struct ListVm {
    pub collection: Collection,
    pub search: String,
    pub status_filter: StatusFilter,
    pub cursor: usize,
    pub search_focused: bool,
    pub loading: bool,
    pub last_error: Option<String>,
}

impl ListVm {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            collection: Collection::empty(kind),
            search: String::new(),
            status_filter: StatusFilter::All,
            cursor: 0,
            search_focused: false,
            loading: true,
            last_error: None,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.collection.kind()
    }

    pub fn set_collection(&mut self, collection: Collection) {
        self.collection = collection;
        self.loading = false;
        self.clamp_cursor();
    }

    /// Filtered indices into the unfiltered collection, insertion order.
    pub fn visible(&self) -> Vec<usize> {
        self.collection.filtered(&self.search, &self.status_filter)
    }

    pub fn selected_record(&self) -> Option<Record> {
        let visible = self.visible();
        visible
            .get(self.cursor)
            .and_then(|&i| self.collection.record(i))
    }

    pub fn cursor_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn cursor_down(&mut self) {
        let visible = self.visible().len();
        if self.cursor + 1 < visible {
            self.cursor += 1;
        }
    }

    pub fn push_search(&mut self, c: char) {
        self.search.push(c);
        self.clamp_cursor();
    }

    pub fn pop_search(&mut self) {
        self.search.pop();
        self.clamp_cursor();
    }

    /// Cycle All -> each status option -> All.
    pub fn cycle_status_filter(&mut self) {
        let options = self.kind().status_options();
        self.status_filter = match &self.status_filter {
            StatusFilter::All => match options.first() {
                Some(first) => StatusFilter::Only(first.to_string()),
                None => StatusFilter::All,
            },
            StatusFilter::Only(current) => {
                match options.iter().position(|o| o == current) {
                    Some(pos) if pos + 1 < options.len() => {
                        StatusFilter::Only(options[pos + 1].to_string())
                    }
                    _ => StatusFilter::All,
                }
            }
        };
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        let visible = self.visible().len();
        if visible == 0 {
            self.cursor = 0;
        } else if self.cursor >= visible {
            self.cursor = visible - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldops_core::{Complaint, WorkStatus};

    fn vm() -> ListVm {
        let mut vm = ListVm::new(EntityKind::Complaints);
        vm.set_collection(Collection::Complaints(vec![
            Complaint {
                id: "c-1".into(),
                client_name: "Acme".into(),
                status: WorkStatus::Pending,
                ..Default::default()
            },
            Complaint {
                id: "c-2".into(),
                client_name: "Beta".into(),
                status: WorkStatus::Completed,
                ..Default::default()
            },
        ]));
        vm
    }

    #[test]
    fn search_then_filter_scenario() {
        let mut vm = vm();

        vm.search = "acme".into();
        let visible = vm.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(vm.selected_record().unwrap().title(), "Acme");

        vm.search.clear();
        vm.status_filter = StatusFilter::Only("Completed".into());
        let visible = vm.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(vm.selected_record().unwrap().title(), "Beta");
    }

    #[test]
    fn cursor_clamps_when_filter_narrows() {
        let mut vm = vm();
        vm.cursor_down();
        assert_eq!(vm.cursor, 1);

        vm.push_search('a');
        vm.push_search('c');
        assert_eq!(vm.cursor, 0);
        assert_eq!(vm.selected_record().unwrap().title(), "Acme");
    }

    #[test]
    fn status_filter_cycles_back_to_all() {
        let mut vm = vm();
        let options = vm.kind().status_options().len();
        for _ in 0..options + 1 {
            vm.cycle_status_filter();
        }
        assert_eq!(vm.status_filter, StatusFilter::All);
    }

    #[test]
    fn empty_collection_keeps_cursor_at_zero() {
        let mut vm = ListVm::new(EntityKind::Projects);
        vm.set_collection(Collection::empty(EntityKind::Projects));
        vm.cursor_down();
        assert_eq!(vm.cursor, 0);
        assert!(vm.selected_record().is_none());
    }
}
