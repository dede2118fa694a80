//! Photo manager view model
//!
//! Wraps the bounded `PhotoSet`: adds go through the upload pipeline and
//! land here as URLs; removal and reordering are keyed by the synthetic
//! photo id. Hitting the limit surfaces a warning without mutating.

use fieldops_core::{Photo, PhotoSet};

pub struct PhotosVm {
    pub set: PhotoSet,
    pub cursor: usize,
    pub warning: Option<String>,
    pub uploading: bool,
    /// Path entry for the next upload (the console's file picker).
    pub path_input: Option<String>,
    pub confirm_remove: bool,
}

impl PhotosVm {
    pub fn new(photos: Vec<Photo>, max_photos: usize) -> Self {
        Self {
            set: PhotoSet::from_photos(photos, max_photos),
            cursor: 0,
            warning: None,
            uploading: false,
            path_input: None,
            confirm_remove: false,
        }
    }

    pub fn cursor_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.set.len() {
            self.cursor += 1;
        }
    }

    pub fn selected(&self) -> Option<&Photo> {
        self.set.photos().get(self.cursor)
    }

    /// Start a new upload; refused with a warning once the set is full.
    pub fn begin_add(&mut self) -> bool {
        if !self.set.can_add() {
            self.warning = Some(format!(
                "Photo limit reached (max {})",
                self.set.max_photos()
            ));
            return false;
        }
        self.warning = None;
        self.path_input = Some(String::new());
        true
    }

    pub fn add_uploaded(&mut self, url: String) {
        self.uploading = false;
        match self.set.add(url) {
            Ok(_) => self.warning = None,
            Err(e) => self.warning = Some(e.to_string()),
        }
    }

    pub fn upload_failed(&mut self, message: String) {
        self.uploading = false;
        self.warning = Some(message);
    }

    pub fn remove_selected(&mut self) {
        if let Some(photo) = self.selected() {
            let id = photo.id;
            if self.set.remove(id).is_ok() && self.cursor >= self.set.len() && self.cursor > 0 {
                self.cursor -= 1;
            }
        }
        self.confirm_remove = false;
    }

    pub fn make_selected_primary(&mut self) {
        if let Some(photo) = self.selected() {
            let id = photo.id;
            if self.set.make_primary(id).is_ok() {
                self.cursor = 0;
            }
        }
    }

    pub fn into_photos(self) -> Vec<Photo> {
        self.set.into_photos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vm_with(urls: &[&str], max: usize) -> PhotosVm {
        let photos = urls.iter().map(|u| Photo::new(*u)).collect();
        PhotosVm::new(photos, max)
    }

    #[test]
    fn add_at_limit_warns_without_mutating() {
        let mut vm = vm_with(&["a", "b"], 2);
        assert!(!vm.begin_add());
        assert!(vm.warning.is_some());
        assert_eq!(vm.set.len(), 2);
        assert!(vm.path_input.is_none());
    }

    #[test]
    fn upload_result_appends_under_the_limit() {
        let mut vm = vm_with(&["a"], 3);
        assert!(vm.begin_add());
        vm.add_uploaded("https://img.example/b.jpg".into());
        assert_eq!(vm.set.len(), 2);
        assert!(vm.warning.is_none());
    }

    #[test]
    fn removing_last_photo_pulls_cursor_back() {
        let mut vm = vm_with(&["a", "b"], 5);
        vm.cursor_down();
        vm.remove_selected();
        assert_eq!(vm.set.len(), 1);
        assert_eq!(vm.cursor, 0);
    }

    #[test]
    fn primary_promotion_follows_selection() {
        let mut vm = vm_with(&["a", "b", "c"], 5);
        vm.cursor_down();
        vm.cursor_down();
        vm.make_selected_primary();
        assert_eq!(vm.set.primary().unwrap().url, "c");
        assert_eq!(vm.cursor, 0);
    }

    #[test]
    fn failed_upload_keeps_the_set_unchanged() {
        let mut vm = vm_with(&["a"], 5);
        assert!(vm.begin_add());
        vm.uploading = true;
        vm.upload_failed("upload failed".into());
        assert_eq!(vm.set.len(), 1);
        assert!(!vm.uploading);
        assert!(vm.warning.is_some());
    }
}
