//! Keyboard routing
//!
//! One entry point per key press; overlays take precedence over the
//! screen underneath them. Role capabilities gate the mutating actions
//! here so a disallowed key simply surfaces a message instead of firing
//! a request that would 403.

use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use fieldops_core::ApprovalStatus;

use crate::app::{App, MenuItem, Overlay, Screen};

/// Non-blocking key poll for the draw loop.
pub fn poll_key(timeout_ms: u64) -> anyhow::Result<Option<KeyEvent>> {
    if crossterm::event::poll(Duration::from_millis(timeout_ms))? {
        if let Event::Key(key) = crossterm::event::read()? {
            return Ok(Some(key));
        }
    }
    Ok(None)
}

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    // A visible toast eats the key that dismisses it.
    if app.message.take().is_some() {
        return;
    }
    if let Some(overlay) = app.overlay.clone() {
        match overlay {
            Overlay::ConfirmDelete => confirm_delete_key(app, key),
            Overlay::Assign => assign_key(app, key),
            Overlay::Photos => photos_key(app, key),
            Overlay::Visits => visits_key(app, key),
        }
        return;
    }
    match app.screen {
        Screen::Menu => menu_key(app, key),
        Screen::List => list_key(app, key),
        Screen::Detail => detail_key(app, key),
        Screen::Create => create_key(app, key),
        Screen::Approvals => approvals_key(app, key),
    }
}

fn menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.menu_up(),
        KeyCode::Down | KeyCode::Char('j') => app.menu_down(),
        KeyCode::Enter => match app.selected_menu_item() {
            MenuItem::Entity(kind) => app.open_list(kind),
            MenuItem::Approvals => {
                if app.capabilities().can_approve {
                    app.open_approvals();
                } else {
                    app.show_message("Your role cannot review approvals", true);
                }
            }
            MenuItem::Exit => app.should_quit = true,
        },
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
}

fn list_key(app: &mut App, key: KeyEvent) {
    let Some(list) = app.list.as_mut() else {
        app.screen = Screen::Menu;
        return;
    };
    if list.search_focused {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => list.search_focused = false,
            KeyCode::Backspace => list.pop_search(),
            KeyCode::Char(c) => list.push_search(c),
            _ => {}
        }
        return;
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => list.cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => list.cursor_down(),
        KeyCode::Char('/') => list.search_focused = true,
        KeyCode::Tab | KeyCode::Char('f') => list.cycle_status_filter(),
        KeyCode::Enter => {
            if let Some(record) = list.selected_record() {
                let kind = record.kind();
                let id = record.id().to_string();
                app.open_detail(kind, id);
            }
        }
        KeyCode::Char('n') => {
            let kind = list.kind();
            if kind == crate::entity::EntityKind::Users {
                app.show_message("Users are created through signup", true);
            } else if app.capabilities().can_edit {
                app.open_create(kind);
            } else {
                app.show_message("Your role cannot create records", true);
            }
        }
        KeyCode::Char('r') => {
            let kind = list.kind();
            app.refresh_list(kind);
        }
        KeyCode::Esc => app.screen = Screen::Menu,
        KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
}

fn detail_key(app: &mut App, key: KeyEvent) {
    let caps = app.capabilities();
    let Some(detail) = app.detail.as_mut() else {
        // Still loading; allow backing out.
        if key.code == KeyCode::Esc {
            app.screen = Screen::List;
        }
        return;
    };
    if detail.saving {
        return;
    }

    if detail.edit_mode {
        if detail.input.is_some() {
            match key.code {
                KeyCode::Enter => detail.commit_input(),
                KeyCode::Esc => detail.discard_input(),
                KeyCode::Backspace => detail.pop_char(),
                KeyCode::Char(c) => detail.push_char(c),
                _ => {}
            }
            return;
        }
        match key.code {
            KeyCode::Up => detail.prev_field(),
            KeyCode::Down => detail.next_field(),
            KeyCode::Enter => detail.begin_input(),
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.save_detail();
            }
            KeyCode::Tab => {
                let count = detail.record.sub_lists().len();
                if count > 0 {
                    detail.sub_list_index = (detail.sub_list_index + 1) % count;
                }
            }
            KeyCode::Char('+') => {
                if let Some(&list) = detail.record.sub_lists().get(detail.sub_list_index) {
                    detail.append_sub_entry(list);
                }
            }
            KeyCode::Char('-') => {
                if let Some(&list) = detail.record.sub_lists().get(detail.sub_list_index) {
                    let len = detail.record.sub_list_len(list);
                    if len > 0 {
                        detail.remove_sub_entry(list, len - 1);
                    }
                }
            }
            KeyCode::Char('v') => app.open_visits(),
            KeyCode::Esc => detail.cancel_edit(),
            _ => {}
        }
        return;
    }

    let kind = detail.record.kind();
    match key.code {
        KeyCode::Char('e') => {
            if caps.can_edit {
                detail.enter_edit();
            } else {
                app.show_message("Your role cannot edit records", true);
            }
        }
        KeyCode::Char('d') => {
            if caps.can_delete {
                app.overlay = Some(Overlay::ConfirmDelete);
            } else {
                app.show_message("Your role cannot delete records", true);
            }
        }
        KeyCode::Char('a') if kind.supports_assignment() => {
            if caps.can_assign {
                app.open_assign();
            } else {
                app.show_message("Your role cannot assign workers", true);
            }
        }
        KeyCode::Char('p') if kind.supports_photos() => {
            if caps.can_edit {
                app.open_photos();
            } else {
                app.show_message("Your role cannot edit records", true);
            }
        }
        KeyCode::Char('r') => {
            let id = detail.record.id().to_string();
            app.open_detail(kind, id);
        }
        KeyCode::Esc => {
            app.detail = None;
            app.screen = Screen::List;
        }
        KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
}

fn create_key(app: &mut App, key: KeyEvent) {
    let Some(create) = app.create.as_mut() else {
        app.screen = Screen::List;
        return;
    };
    if create.submitting {
        return;
    }
    if create.input.is_some() {
        match key.code {
            KeyCode::Enter => create.commit_input(),
            KeyCode::Esc => {
                create.input = None;
            }
            KeyCode::Backspace => create.pop_char(),
            KeyCode::Char(c) => create.push_char(c),
            _ => {}
        }
        return;
    }
    match key.code {
        KeyCode::Up => create.prev_field(),
        KeyCode::Down => create.next_field(),
        KeyCode::Enter => create.begin_input(),
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.submit_create();
        }
        KeyCode::Char('+') => {
            if let Some(&list) = create.draft.sub_lists().first() {
                create.append_sub_entry(list);
            }
        }
        KeyCode::Char('-') => {
            if let Some(&list) = create.draft.sub_lists().first() {
                let len = create.draft.sub_list_len(list);
                if len > 0 {
                    create.remove_sub_entry(list, len - 1);
                }
            }
        }
        KeyCode::Esc => {
            // Abandoned drafts are dropped, nothing was persisted.
            app.create = None;
            app.screen = Screen::List;
        }
        _ => {}
    }
}

fn approvals_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            if app.approvals_cursor > 0 {
                app.approvals_cursor -= 1;
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.approvals_cursor + 1 < app.approvals.len() {
                app.approvals_cursor += 1;
            }
        }
        KeyCode::Char('a') => app.decide_approval(ApprovalStatus::Approved),
        KeyCode::Char('x') => app.decide_approval(ApprovalStatus::Rejected),
        KeyCode::Char('r') => app.refresh_approvals(),
        KeyCode::Esc => app.screen = Screen::Menu,
        KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
}

fn confirm_delete_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => app.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Esc => app.overlay = None,
        _ => {}
    }
}

fn assign_key(app: &mut App, key: KeyEvent) {
    let Some(assign) = app.assign.as_mut() else {
        app.overlay = None;
        return;
    };
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => assign.cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => assign.cursor_down(),
        KeyCode::Char(' ') => assign.toggle_current(),
        KeyCode::Enter => app.confirm_assign(),
        KeyCode::Esc => app.cancel_assign(),
        _ => {}
    }
}

fn visits_key(app: &mut App, key: KeyEvent) {
    let cursor = match app.visits.as_ref() {
        Some(visits) => visits.cursor,
        None => {
            app.overlay = None;
            return;
        }
    };
    // Rows render straight off the record; pull what the keys need first.
    let (len, at_cursor) = match app.detail.as_ref().map(|d| &d.record) {
        Some(crate::entity::Record::Maintenance(contract)) => (
            contract.service_visits.len(),
            contract.service_visits.get(cursor).cloned(),
        ),
        _ => {
            app.close_visits();
            return;
        }
    };
    let Some(visits) = app.visits.as_mut() else {
        return;
    };

    if let Some(draft) = visits.draft.as_mut() {
        if draft.input.is_some() {
            match key.code {
                KeyCode::Enter => draft.commit_input(),
                KeyCode::Esc => draft.discard_input(),
                KeyCode::Backspace => draft.pop_char(),
                KeyCode::Char(c) => draft.push_char(c),
                _ => {}
            }
            return;
        }
        match key.code {
            KeyCode::Up => draft.prev_field(),
            KeyCode::Down => draft.next_field(),
            KeyCode::Enter => draft.begin_input(),
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.apply_visit_draft();
            }
            KeyCode::Esc => visits.cancel_edit(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => visits.cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => visits.cursor_down(len),
        KeyCode::Enter => {
            if let Some(visit) = at_cursor {
                visits.begin_edit(cursor, visit);
            }
        }
        KeyCode::Esc => app.close_visits(),
        _ => {}
    }
}

fn photos_key(app: &mut App, key: KeyEvent) {
    let Some(photos) = app.photos.as_mut() else {
        app.overlay = None;
        return;
    };
    if photos.uploading {
        return;
    }
    if photos.path_input.is_some() {
        match key.code {
            KeyCode::Enter => {
                if let Some(path) = photos.path_input.clone() {
                    if !path.trim().is_empty() {
                        app.upload_photo(path.trim().to_string());
                    } else {
                        photos.path_input = None;
                    }
                }
            }
            KeyCode::Esc => photos.path_input = None,
            KeyCode::Backspace => {
                if let Some(input) = photos.path_input.as_mut() {
                    input.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(input) = photos.path_input.as_mut() {
                    input.push(c);
                }
            }
            _ => {}
        }
        return;
    }
    if photos.confirm_remove {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => photos.remove_selected(),
            _ => photos.confirm_remove = false,
        }
        return;
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => photos.cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => photos.cursor_down(),
        KeyCode::Char('a') => {
            photos.begin_add();
        }
        KeyCode::Char('d') => {
            if photos.selected().is_some() {
                photos.confirm_remove = true;
            }
        }
        KeyCode::Char('m') => photos.make_selected_primary(),
        KeyCode::Esc => app.close_photos(),
        _ => {}
    }
}
