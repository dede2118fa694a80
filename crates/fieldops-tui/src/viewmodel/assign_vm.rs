//! Worker assignment modal
//!
//! Opened with the record's current assignment preloaded. Each toggle is
//! a plain membership flip; confirm hands the whole id array to the bulk
//! endpoint (replace semantics), cancel restores the preloaded set.

use fieldops_core::User;

pub struct AssignVm {
    pub users: Vec<User>,
    pub cursor: usize,
    original: Vec<String>,
    pub selected: Vec<String>,
}

impl AssignVm {
    pub fn new(users: Vec<User>, assigned: &[String]) -> Self {
        Self {
            users,
            cursor: 0,
            original: assigned.to_vec(),
            selected: assigned.to_vec(),
        }
    }

    pub fn cursor_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.users.len() {
            self.cursor += 1;
        }
    }

    pub fn is_selected(&self, user_id: &str) -> bool {
        self.selected.iter().any(|id| id == user_id)
    }

    /// Flip membership of the highlighted user.
    pub fn toggle_current(&mut self) {
        let Some(user) = self.users.get(self.cursor) else {
            return;
        };
        if let Some(pos) = self.selected.iter().position(|id| id == &user.id) {
            self.selected.remove(pos);
        } else {
            self.selected.push(user.id.clone());
        }
    }

    /// Discard local toggles, restoring the assignment as fetched.
    pub fn reset(&mut self) {
        self.selected = self.original.clone();
    }

    pub fn confirmed(&self) -> Vec<String> {
        self.selected.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> Vec<User> {
        ["u-1", "u-2", "u-3"]
            .iter()
            .map(|id| User {
                id: id.to_string(),
                name: id.to_uppercase(),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn confirm_without_toggles_resubmits_exactly_the_preloaded_set() {
        let assigned = vec!["u-2".to_string(), "u-1".to_string()];
        let vm = AssignVm::new(users(), &assigned);
        assert_eq!(vm.confirmed(), assigned);
    }

    #[test]
    fn toggle_flips_membership_both_ways() {
        let mut vm = AssignVm::new(users(), &["u-1".to_string()]);

        vm.toggle_current(); // cursor on u-1, already selected -> removed
        assert!(!vm.is_selected("u-1"));

        vm.cursor_down();
        vm.toggle_current(); // u-2 added
        assert!(vm.is_selected("u-2"));
        assert_eq!(vm.confirmed(), vec!["u-2".to_string()]);
    }

    #[test]
    fn reset_restores_the_fetched_assignment() {
        let assigned = vec!["u-3".to_string()];
        let mut vm = AssignVm::new(users(), &assigned);
        vm.toggle_current();
        vm.cursor_down();
        vm.toggle_current();
        assert_ne!(vm.confirmed(), assigned);

        vm.reset();
        assert_eq!(vm.confirmed(), assigned);
    }

    #[test]
    fn toggle_on_empty_user_list_is_a_noop() {
        let mut vm = AssignVm::new(Vec::new(), &[]);
        vm.toggle_current();
        assert!(vm.confirmed().is_empty());
    }
}
