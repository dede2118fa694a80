use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use fieldops_core::StatusFilter;

use crate::app::{App, Overlay, Screen};
use crate::theme::Theme;
use crate::viewmodel::fields;

pub fn render(frame: &mut Frame, app: &App) {
    let theme = Theme::default();

    match app.screen {
        Screen::Menu => render_menu(frame, app, &theme),
        Screen::List => render_list(frame, app, &theme),
        Screen::Detail => render_detail(frame, app, &theme),
        Screen::Create => render_create(frame, app, &theme),
        Screen::Approvals => render_approvals(frame, app, &theme),
    }

    match &app.overlay {
        Some(Overlay::ConfirmDelete) => render_confirm_delete(frame, app, &theme),
        Some(Overlay::Assign) => render_assign(frame, app, &theme),
        Some(Overlay::Photos) => render_photos(frame, app, &theme),
        Some(Overlay::Visits) => render_visits(frame, app, &theme),
        None => {}
    }

    if let Some((msg, is_error)) = &app.message {
        render_message(frame, msg, *is_error, &theme);
    }
}

fn render_menu(frame: &mut Frame, app: &App, theme: &Theme) {
    let area = frame.area();

    let title = format!(
        " 🛠  FieldOps Console: {} ({}) ",
        app.session().user().name,
        app.session().role().label()
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(title)
        .title_style(theme.title);

    frame.render_widget(block, area);

    let inner = Layout::default()
        .constraints([
            Constraint::Length(2), // Padding
            Constraint::Min(10),   // Menu
            Constraint::Length(2), // Footer
        ])
        .split(inner_rect(area, 2));

    let items: Vec<ListItem> = app
        .menu_items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let style = if i == app.menu_index {
                theme.selected
            } else {
                theme.normal
            };
            ListItem::new(format!("  {}  ", item.label())).style(style)
        })
        .collect();

    frame.render_widget(List::new(items), inner[1]);

    let footer = hint_footer(
        theme,
        &[("↑/↓", "Navigate"), ("Enter", "Select"), ("q", "Quit")],
    );
    frame.render_widget(footer, inner[2]);
}

fn render_list(frame: &mut Frame, app: &App, theme: &Theme) {
    let area = frame.area();
    let Some(list) = app.list.as_ref() else {
        return;
    };
    let visible = list.visible();

    let title = format!(" 📋 {} ({}) ", list.kind().label(), visible.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(title)
        .title_style(theme.title);

    frame.render_widget(block, area);

    let inner = Layout::default()
        .constraints([
            Constraint::Length(1), // Search + filter
            Constraint::Length(1), // Padding
            Constraint::Min(5),    // Rows
            Constraint::Length(2), // Footer
        ])
        .split(inner_rect(area, 2));

    // Search bar and status selector share one line.
    let search_style = if list.search_focused {
        theme.title
    } else {
        theme.muted
    };
    let filter_label = match &list.status_filter {
        StatusFilter::All => "All".to_string(),
        StatusFilter::Only(status) => status.clone(),
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled("Search: ", theme.muted),
        Span::styled(
            if list.search.is_empty() && !list.search_focused {
                "(press / to search)".to_string()
            } else {
                format!("{}_", list.search)
            },
            search_style,
        ),
        Span::raw("    "),
        Span::styled("Status: ", theme.muted),
        Span::styled(filter_label, theme.info),
    ]));
    frame.render_widget(header, inner[0]);

    if visible.is_empty() {
        let msg = if list.loading {
            "Loading..."
        } else if let Some(err) = &list.last_error {
            err.as_str()
        } else {
            "(No records)"
        };
        let p = Paragraph::new(msg)
            .style(theme.muted)
            .alignment(Alignment::Center);
        frame.render_widget(p, inner[2]);
    } else {
        let items: Vec<ListItem> = visible
            .iter()
            .enumerate()
            .filter_map(|(pos, &idx)| {
                let (title, reference, status) = list.collection.row(idx)?;
                let prefix = if pos == list.cursor { "▸ " } else { "  " };
                let row_style = if pos == list.cursor {
                    theme.selected
                } else {
                    theme.normal
                };
                Some(ListItem::new(Line::from(vec![
                    Span::styled(format!("{prefix}{title:<28}"), row_style),
                    Span::styled(format!(" {reference:<18}"), theme.muted),
                    Span::styled(format!(" {status}"), theme.status_style(&status)),
                ])))
            })
            .collect();
        frame.render_widget(List::new(items), inner[2]);
    }

    let footer = hint_footer(
        theme,
        &[
            ("↑/↓", "Navigate"),
            ("Enter", "Open"),
            ("/", "Search"),
            ("Tab", "Filter"),
            ("n", "New"),
            ("r", "Refresh"),
            ("Esc", "Back"),
        ],
    );
    frame.render_widget(footer, inner[3]);
}

fn render_detail(frame: &mut Frame, app: &App, theme: &Theme) {
    let area = frame.area();
    let Some(detail) = app.detail.as_ref() else {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border)
            .title(" Loading... ")
            .title_style(theme.title);
        frame.render_widget(block, area);
        let p = Paragraph::new("Loading record...")
            .style(theme.muted)
            .alignment(Alignment::Center);
        frame.render_widget(p, inner_rect(area, 2));
        return;
    };
    let record = &detail.record;

    let mode = if detail.saving {
        "saving"
    } else if detail.edit_mode {
        "editing"
    } else {
        "view"
    };
    let title = format!(" {}: {} [{}] ", record.kind().label(), record.title(), mode);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if detail.edit_mode {
            theme.title
        } else {
            theme.border
        })
        .title(title)
        .title_style(theme.title);
    frame.render_widget(block, area);

    let inner = Layout::default()
        .constraints([
            Constraint::Length(1), // Status line
            Constraint::Length(1), // Padding
            Constraint::Min(6),    // Fields
            Constraint::Min(4),    // Sub lists + workers
            Constraint::Length(2), // Footer
        ])
        .split(inner_rect(area, 2));

    let status = record.status_label().to_string();
    let status_line = Paragraph::new(Line::from(vec![
        Span::styled("Status: ", theme.muted),
        Span::styled(status.clone(), theme.status_style(&status)),
    ]));
    frame.render_widget(status_line, inner[0]);

    // Field rows; the focused one shows the live input buffer.
    let labels = fields::field_labels(record);
    let items: Vec<ListItem> = labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let focused = detail.edit_mode && i == detail.field_index;
            let value = if focused {
                match &detail.input {
                    Some(input) => format!("{input}_"),
                    None => fields::field_value(record, i),
                }
            } else {
                fields::field_value(record, i)
            };
            let style = if focused { theme.selected } else { theme.normal };
            ListItem::new(Line::from(vec![
                Span::styled(format!("  {label:<16}"), theme.muted),
                Span::styled(value, style),
            ]))
        })
        .collect();
    frame.render_widget(List::new(items), inner[2]);

    // Sub-arrays and assignment, below the fields.
    let mut lines: Vec<Line> = Vec::new();
    for (i, list) in record.sub_lists().iter().enumerate() {
        let marker = if detail.edit_mode && i == detail.sub_list_index {
            "▸ "
        } else {
            "  "
        };
        let entries: Vec<String> = (0..record.sub_list_len(*list))
            .filter_map(|j| record.sub_list_entry(*list, j))
            .collect();
        lines.push(Line::from(vec![
            Span::styled(format!("{marker}{}: ", list.label()), theme.muted),
            Span::styled(
                if entries.is_empty() {
                    "(none)".to_string()
                } else {
                    entries.join(", ")
                },
                theme.normal,
            ),
        ]));
    }
    if let Some(workers) = record.assigned_workers() {
        lines.push(Line::from(vec![
            Span::styled("  Assigned: ", theme.muted),
            Span::styled(
                format!("{} worker(s)", workers.len()),
                theme.info,
            ),
        ]));
    }
    if let Some(photos) = record.photos() {
        lines.push(Line::from(vec![
            Span::styled("  Photos: ", theme.muted),
            Span::styled(format!("{}", photos.len()), theme.info),
        ]));
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner[3]);

    let footer = if detail.edit_mode {
        let mut hints = vec![
            ("↑/↓", "Field"),
            ("Enter", "Edit"),
            ("Tab", "Sub-list"),
            ("+/-", "Add/Remove"),
        ];
        if matches!(record, crate::entity::Record::Maintenance(_)) {
            hints.push(("v", "Visits"));
        }
        hints.push(("Ctrl+S", "Save"));
        hints.push(("Esc", "Cancel"));
        hint_footer(theme, &hints)
    } else {
        hint_footer(
            theme,
            &[
                ("e", "Edit"),
                ("d", "Delete"),
                ("a", "Assign"),
                ("p", "Photos"),
                ("r", "Refresh"),
                ("Esc", "Back"),
            ],
        )
    };
    frame.render_widget(footer, inner[4]);
}

fn render_create(frame: &mut Frame, app: &App, theme: &Theme) {
    let area = frame.area();
    let Some(create) = app.create.as_ref() else {
        return;
    };
    let draft = &create.draft;

    let title = format!(" ✏️  New {} ", create.kind().label());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.title)
        .title(title)
        .title_style(theme.title);
    frame.render_widget(block, area);

    let inner = Layout::default()
        .constraints([
            Constraint::Min(6),    // Fields
            Constraint::Length(2), // Footer
        ])
        .split(inner_rect(area, 2));

    let labels = fields::field_labels(draft);
    let items: Vec<ListItem> = labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let focused = i == create.field_index;
            let value = if focused {
                match &create.input {
                    Some(input) => format!("{input}_"),
                    None => fields::field_value(draft, i),
                }
            } else {
                fields::field_value(draft, i)
            };
            let style = if focused { theme.selected } else { theme.normal };
            ListItem::new(Line::from(vec![
                Span::styled(format!("  {label:<16}"), theme.muted),
                Span::styled(value, style),
            ]))
        })
        .collect();
    frame.render_widget(List::new(items), inner[0]);

    let footer = hint_footer(
        theme,
        &[
            ("↑/↓", "Field"),
            ("Enter", "Edit"),
            ("Ctrl+S", "Create"),
            ("Esc", "Discard"),
        ],
    );
    frame.render_widget(footer, inner[1]);
}

fn render_approvals(frame: &mut Frame, app: &App, theme: &Theme) {
    let area = frame.area();

    let title = format!(" 🔑 Pending Approvals ({}) ", app.approvals.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(title)
        .title_style(theme.title);
    frame.render_widget(block, area);

    let inner = Layout::default()
        .constraints([
            Constraint::Length(1), // Padding
            Constraint::Min(5),    // Rows
            Constraint::Length(2), // Footer
        ])
        .split(inner_rect(area, 2));

    if app.approvals.is_empty() {
        let msg = if app.approvals_loading {
            "Loading..."
        } else {
            "(No pending requests)"
        };
        let p = Paragraph::new(msg)
            .style(theme.muted)
            .alignment(Alignment::Center);
        frame.render_widget(p, inner[1]);
    } else {
        let items: Vec<ListItem> = app
            .approvals
            .iter()
            .enumerate()
            .map(|(i, request)| {
                let prefix = if i == app.approvals_cursor { "▸ " } else { "  " };
                let style = if i == app.approvals_cursor {
                    theme.selected
                } else {
                    theme.normal
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{prefix}{:<24}", request.user.name), style),
                    Span::styled(format!(" {:<28}", request.user.email), theme.muted),
                    Span::styled(request.user.role.label().to_string(), theme.info),
                ]))
            })
            .collect();
        frame.render_widget(List::new(items), inner[1]);
    }

    let footer = hint_footer(
        theme,
        &[
            ("↑/↓", "Navigate"),
            ("a", "Approve"),
            ("x", "Reject"),
            ("r", "Refresh"),
            ("Esc", "Back"),
        ],
    );
    frame.render_widget(footer, inner[2]);
}

fn render_confirm_delete(frame: &mut Frame, app: &App, theme: &Theme) {
    let area = center_rect(frame.area(), 50, 8);
    frame.render_widget(Clear, area);

    let Some(detail) = app.detail.as_ref() else {
        return;
    };
    // Business records are cancelled in place; only users are removed.
    let verb = if detail.record.kind() == crate::entity::EntityKind::Users {
        "Delete"
    } else {
        "Cancel"
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.danger)
        .title(format!(" ⚠️  Confirm {verb} "))
        .title_style(theme.danger);
    frame.render_widget(block, area);

    let text = Paragraph::new(vec![
        Line::raw(""),
        Line::from(vec![
            Span::raw(format!("{verb}: ")),
            Span::styled(detail.record.title().to_string(), theme.title),
        ]),
        Line::raw(""),
        Line::from(vec![
            Span::styled(" [Y] ", theme.key_hint),
            Span::styled(format!("Yes, {verb}"), theme.danger),
            Span::raw("    "),
            Span::styled(" [N] ", theme.key_hint),
            Span::raw("Keep"),
        ]),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    frame.render_widget(text, inner_rect(area, 2));
}

fn render_assign(frame: &mut Frame, app: &App, theme: &Theme) {
    let area = center_rect(frame.area(), 60, 14);
    frame.render_widget(Clear, area);

    let Some(assign) = app.assign.as_ref() else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.title)
        .title(" 👥 Assign Workers ")
        .title_style(theme.title);
    frame.render_widget(block, area);

    let inner = Layout::default()
        .constraints([
            Constraint::Min(5),    // Users
            Constraint::Length(1), // Footer
        ])
        .split(inner_rect(area, 2));

    if assign.users.is_empty() {
        let p = Paragraph::new("(No approved users)")
            .style(theme.muted)
            .alignment(Alignment::Center);
        frame.render_widget(p, inner[0]);
    } else {
        let items: Vec<ListItem> = assign
            .users
            .iter()
            .enumerate()
            .map(|(i, user)| {
                let mark = if assign.is_selected(&user.id) {
                    "[x]"
                } else {
                    "[ ]"
                };
                let prefix = if i == assign.cursor { "▸ " } else { "  " };
                let style = if i == assign.cursor {
                    theme.selected
                } else {
                    theme.normal
                };
                ListItem::new(format!("{prefix}{mark} {}", user.name)).style(style)
            })
            .collect();
        frame.render_widget(List::new(items), inner[0]);
    }

    let footer = hint_footer(
        theme,
        &[
            ("Space", "Toggle"),
            ("Enter", "Confirm"),
            ("Esc", "Cancel"),
        ],
    );
    frame.render_widget(footer, inner[1]);
}

fn render_photos(frame: &mut Frame, app: &App, theme: &Theme) {
    let area = center_rect(frame.area(), 70, 14);
    frame.render_widget(Clear, area);

    let Some(photos) = app.photos.as_ref() else {
        return;
    };

    let title = format!(
        " 📷 Photos ({}/{}) ",
        photos.set.len(),
        photos.set.max_photos()
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.title)
        .title(title)
        .title_style(theme.title);
    frame.render_widget(block, area);

    let inner = Layout::default()
        .constraints([
            Constraint::Min(4),    // Photo rows
            Constraint::Length(1), // Warning / input
            Constraint::Length(1), // Footer
        ])
        .split(inner_rect(area, 2));

    if photos.set.is_empty() {
        let p = Paragraph::new("(No photos)")
            .style(theme.muted)
            .alignment(Alignment::Center);
        frame.render_widget(p, inner[0]);
    } else {
        let items: Vec<ListItem> = photos
            .set
            .photos()
            .iter()
            .enumerate()
            .map(|(i, photo)| {
                let tag = if i == 0 { "★ " } else { "  " };
                let prefix = if i == photos.cursor { "▸ " } else { "  " };
                let style = if i == photos.cursor {
                    theme.selected
                } else {
                    theme.normal
                };
                ListItem::new(format!("{prefix}{tag}{}", photo.url)).style(style)
            })
            .collect();
        frame.render_widget(List::new(items), inner[0]);
    }

    let status: Line = if photos.uploading {
        Line::from(Span::styled("Uploading...", theme.info))
    } else if let Some(input) = &photos.path_input {
        Line::from(vec![
            Span::styled("File path: ", theme.muted),
            Span::styled(format!("{input}_"), theme.title),
        ])
    } else if photos.confirm_remove {
        Line::from(Span::styled("Remove selected photo? [y/n]", theme.danger))
    } else if let Some(warning) = &photos.warning {
        Line::from(Span::styled(warning.as_str(), theme.warning))
    } else {
        Line::raw("")
    };
    frame.render_widget(Paragraph::new(status), inner[1]);

    let footer = hint_footer(
        theme,
        &[
            ("a", "Add"),
            ("d", "Remove"),
            ("m", "Make primary"),
            ("Esc", "Close & save"),
        ],
    );
    frame.render_widget(footer, inner[2]);
}

fn render_visits(frame: &mut Frame, app: &App, theme: &Theme) {
    let area = center_rect(frame.area(), 70, 14);
    frame.render_widget(Clear, area);

    let (Some(visits), Some(detail)) = (app.visits.as_ref(), app.detail.as_ref()) else {
        return;
    };
    let record = &detail.record;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.title)
        .title(" 🔧 Service Visits ")
        .title_style(theme.title);
    frame.render_widget(block, area);

    let inner = Layout::default()
        .constraints([
            Constraint::Min(5),    // Rows or draft fields
            Constraint::Length(1), // Footer
        ])
        .split(inner_rect(area, 2));

    if let Some(draft) = visits.draft.as_ref() {
        let items: Vec<ListItem> = crate::viewmodel::visit_vm::VISIT_FIELD_LABELS
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let focused = i == draft.field_index;
                let value = if focused {
                    match &draft.input {
                        Some(input) => format!("{input}_"),
                        None => draft.field_value(i),
                    }
                } else {
                    draft.field_value(i)
                };
                let style = if focused { theme.selected } else { theme.normal };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("  {label:<26}"), theme.muted),
                    Span::styled(value, style),
                ]))
            })
            .collect();
        frame.render_widget(List::new(items), inner[0]);

        let footer = hint_footer(
            theme,
            &[
                ("↑/↓", "Field"),
                ("Enter", "Edit"),
                ("Ctrl+S", "Apply"),
                ("Esc", "Back"),
            ],
        );
        frame.render_widget(footer, inner[1]);
        return;
    }

    let count = record.sub_list_len(crate::entity::SubList::ServiceVisits);
    if count == 0 {
        let p = Paragraph::new("(No visits; press + on the detail screen to add one)")
            .style(theme.muted)
            .alignment(Alignment::Center);
        frame.render_widget(p, inner[0]);
    } else {
        let items: Vec<ListItem> = (0..count)
            .filter_map(|i| {
                let entry = record.sub_list_entry(crate::entity::SubList::ServiceVisits, i)?;
                let prefix = if i == visits.cursor { "▸ " } else { "  " };
                let style = if i == visits.cursor {
                    theme.selected
                } else {
                    theme.normal
                };
                Some(ListItem::new(format!("{prefix}{entry}")).style(style))
            })
            .collect();
        frame.render_widget(List::new(items), inner[0]);
    }

    let footer = hint_footer(
        theme,
        &[("↑/↓", "Navigate"), ("Enter", "Edit visit"), ("Esc", "Close")],
    );
    frame.render_widget(footer, inner[1]);
}

fn render_message(frame: &mut Frame, msg: &str, is_error: bool, theme: &Theme) {
    let area = center_rect(frame.area(), 50, 6);
    frame.render_widget(Clear, area);

    let style = if is_error { theme.danger } else { theme.success };
    let title = if is_error { " ❌ Error " } else { " ✅ Done " };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title)
        .title_style(style);
    frame.render_widget(block, area);

    let text = Paragraph::new(vec![
        Line::raw(""),
        Line::raw(msg),
        Line::raw(""),
        Line::from(Span::styled("Press any key to continue", theme.muted)),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    frame.render_widget(text, inner_rect(area, 2));
}

// Helper: shrink rect by margin
fn inner_rect(area: Rect, margin: u16) -> Rect {
    Rect {
        x: area.x + margin,
        y: area.y + margin,
        width: area.width.saturating_sub(margin * 2),
        height: area.height.saturating_sub(margin * 2),
    }
}

// Helper: center a popup
fn center_rect(area: Rect, percent_x: u16, height: u16) -> Rect {
    let width = area.width * percent_x / 100;
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    Rect {
        x: area.x + x,
        y: area.y + y,
        width,
        height: height.min(area.height),
    }
}

fn hint_footer<'a>(theme: &Theme, hints: &[(&'a str, &'a str)]) -> Paragraph<'a> {
    let mut spans: Vec<Span> = Vec::new();
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(format!(" {key} "), theme.key_hint));
        spans.push(Span::styled(*action, theme.muted));
    }
    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}
