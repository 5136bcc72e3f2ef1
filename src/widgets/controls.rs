use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    widgets::{Paragraph, Widget},
};

const CONTROLS: [(&str, &str); 7] = [
    ("Tab", "Focus"),
    ("↑↓", "Select"),
    ("1/2", "Page"),
    ("a", "All"),
    ("e", "Export"),
    ("r", "Reload"),
    ("q", "Quit"),
];

/// Bottom key-hint bar with the filtered row count and a transient status.
#[derive(Default)]
pub struct Controls {
    pub row_count: Option<usize>,
    pub status: Option<String>,
    pub background: Option<Color>,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_row_count(mut self, row_count: usize) -> Self {
        self.row_count = Some(row_count);
        self
    }

    pub fn with_status(mut self, status: Option<String>) -> Self {
        self.status = status;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }
}

impl Widget for &Controls {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut constraints = CONTROLS.iter().fold(vec![], |mut acc, (key, action)| {
            acc.push(Constraint::Length(key.chars().count() as u16 + 2));
            acc.push(Constraint::Length(action.chars().count() as u16 + 1));
            acc
        });
        constraints.push(Constraint::Fill(1));
        if self.row_count.is_some() {
            constraints.push(Constraint::Length(14)); // "Rows: 12345"
        }

        let layout = Layout::new(Direction::Horizontal, constraints).split(area);
        let bg = self.background.unwrap_or(Color::DarkGray);

        for (i, (key, action)) in CONTROLS.iter().enumerate() {
            let j = i * 2;
            Paragraph::new(*key)
                .style(Style::default().bold())
                .centered()
                .render(layout[j], buf);
            Paragraph::new(*action)
                .style(Style::default().bg(bg))
                .render(layout[j + 1], buf);
        }

        let fill_idx = CONTROLS.len() * 2;
        Paragraph::new(self.status.clone().unwrap_or_default())
            .style(Style::default().bg(bg).fg(Color::Yellow))
            .render(layout[fill_idx], buf);

        if let Some(count) = self.row_count {
            Paragraph::new(format!("Rows: {}", count))
                .style(Style::default().bg(bg).fg(Color::White))
                .right_aligned()
                .render(layout[fill_idx + 1], buf);
        }
    }
}
