//! Bordered radio list (● selected, ○ unselected), one option per row.
//! Used for the sidebar page navigation.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

pub struct RadioBlock<'a> {
    pub title: &'a str,
    pub options: &'a [&'a str],
    pub selected: usize,
    pub focused: bool,
    pub border_color: Color,
    pub active_color: Color,
    /// Show "1", "2", ... shortcut hints before each option.
    pub numbered: bool,
}

impl<'a> RadioBlock<'a> {
    pub fn new(title: &'a str, options: &'a [&'a str], selected: usize) -> Self {
        Self {
            title,
            options,
            selected,
            focused: false,
            border_color: Color::Reset,
            active_color: Color::Reset,
            numbered: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn colors(mut self, border: Color, active: Color) -> Self {
        self.border_color = border;
        self.active_color = active;
        self
    }

    pub fn numbered(mut self, numbered: bool) -> Self {
        self.numbered = numbered;
        self
    }

    /// Rows needed to show every option inside the border.
    pub fn height(&self) -> u16 {
        self.options.len() as u16 + 2
    }

    fn option_line(&self, idx: usize, label: &str) -> Line<'static> {
        let is_selected = idx == self.selected;
        let marker = if is_selected { "●" } else { "○" };
        let mut style = if is_selected {
            Style::default().fg(self.active_color)
        } else {
            Style::default().fg(self.border_color)
        };
        if self.focused && is_selected {
            style = style.add_modifier(Modifier::REVERSED);
        }

        let mut spans = Vec::with_capacity(2);
        if self.numbered {
            spans.push(Span::styled(
                format!("{} ", idx + 1),
                Style::default().add_modifier(Modifier::DIM),
            ));
        }
        spans.push(Span::styled(format!("{} {}", marker, label), style));
        Line::from(spans)
    }
}

impl Widget for RadioBlock<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block_style = if self.focused {
            Style::default().fg(self.active_color)
        } else {
            Style::default().fg(self.border_color)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(self.title)
            .border_style(block_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = self
            .options
            .iter()
            .enumerate()
            .map(|(idx, label)| self.option_line(idx, label))
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }
}
