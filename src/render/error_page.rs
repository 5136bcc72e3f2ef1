//! Full-screen page shown when loading or schema resolution fails.
//! Nothing else is drawn while it is up.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use super::layout::centered_rect_fixed;
use crate::config::Theme;

const PAGE_WIDTH: u16 = 72;

pub fn render_error_page(area: Rect, buf: &mut Buffer, message: &str, theme: &Theme) {
    let error = theme.get("error");
    let popup = centered_rect_fixed(area, PAGE_WIDTH, 7);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" Error ")
        .border_style(Style::default().fg(error));
    let inner = block.inner(popup);
    block.render(popup, buf);

    Paragraph::new(vec![
        Line::styled(
            message.to_string(),
            Style::default().fg(error).add_modifier(Modifier::BOLD),
        ),
        Line::default(),
        Line::styled(
            "Press q to quit",
            Style::default().fg(theme.get("dimmed")),
        ),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .render(inner, buf);
}
