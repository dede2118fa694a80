use ratatui::style::{Color, Modifier, Style};

/// Theme tokens for consistent styling across the console
pub struct Theme {
    pub title: Style,
    pub border: Style,
    pub selected: Style,
    pub normal: Style,
    pub muted: Style,
    pub danger: Style,
    pub warning: Style,
    pub success: Style,
    pub info: Style,
    pub key_hint: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::DarkGray),
            selected: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            normal: Style::default().fg(Color::White),
            muted: Style::default().fg(Color::DarkGray),
            danger: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            warning: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            success: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            info: Style::default().fg(Color::Cyan),
            key_hint: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        }
    }
}

impl Theme {
    /// Row color per status label, shared by every list and detail view.
    pub fn status_style(&self, label: &str) -> Style {
        match label {
            "Pending" | "pending" => Style::default().fg(Color::Yellow),
            "In Progress" => Style::default().fg(Color::Cyan),
            "Completed" | "approved" | "Paid" => Style::default().fg(Color::Green),
            "Cancelled" | "rejected" | "Overdue" => Style::default().fg(Color::Red),
            _ => self.normal,
        }
    }
}
