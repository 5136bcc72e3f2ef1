//! Sidebar: title card, page navigation, wine filter and footer.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{
        Block, BorderType, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget,
        Wrap,
    },
};

use crate::config::Theme;
use crate::dashboard::{NavState, FOOTER, TAGLINE, TITLE};
use crate::widgets::radio_block::RadioBlock;

pub const SIDEBAR_WIDTH: u16 = 34;

/// Which sidebar control receives arrow keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SidebarFocus {
    Navigation,
    #[default]
    Filter,
}

impl SidebarFocus {
    pub fn toggle(self) -> Self {
        match self {
            SidebarFocus::Navigation => SidebarFocus::Filter,
            SidebarFocus::Filter => SidebarFocus::Navigation,
        }
    }
}

pub struct Sidebar<'a> {
    pub nav: NavState,
    pub wine_options: &'a [String],
    /// Highlighted row in the filter list.
    pub cursor: usize,
    /// Index into `wine_options` of the applied selection.
    pub applied: usize,
    pub focus: SidebarFocus,
    pub theme: &'a Theme,
}

impl Widget for Sidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let primary = self.theme.get("primary");
        let border = self.theme.get("border");
        let active = self.theme.get("border_active");

        let nav_labels: Vec<&str> = NavState::ALL.iter().map(|n| n.label()).collect();
        let radio = RadioBlock::new(" Navigate ", &nav_labels, self.nav.index())
            .focused(self.focus == SidebarFocus::Navigation)
            .colors(border, active)
            .numbered(true);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(radio.height()),
                Constraint::Fill(1),
                Constraint::Length(2),
            ])
            .split(area);

        // Title card
        let header = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(self.theme.get("secondary")));
        let header_inner = header.inner(chunks[0]);
        header.render(chunks[0], buf);
        Paragraph::new(vec![
            Line::styled(TITLE, Style::default().fg(primary).add_modifier(Modifier::BOLD)),
            Line::styled(TAGLINE, Style::default().fg(self.theme.get("text_secondary"))),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(header_inner, buf);

        radio.render(chunks[1], buf);

        // Wine filter
        let filter_focused = self.focus == SidebarFocus::Filter;
        let filter_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(" Filter Wine 🍷 ")
            .border_style(Style::default().fg(if filter_focused { active } else { border }));
        let items: Vec<ListItem> = self
            .wine_options
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let marker = if i == self.applied { "● " } else { "  " };
                ListItem::new(format!("{}{}", marker, w))
            })
            .collect();
        let highlight = if filter_focused {
            Style::default()
                .fg(active)
                .add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(primary).add_modifier(Modifier::BOLD)
        };
        let list = List::new(items)
            .block(filter_block)
            .highlight_style(highlight)
            .highlight_symbol("▸ ");
        let mut state = ListState::default().with_selected(Some(self.cursor));
        StatefulWidget::render(list, chunks[2], buf, &mut state);

        Paragraph::new(FOOTER)
            .style(Style::default().fg(self.theme.get("dimmed")))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[3], buf);
    }
}
