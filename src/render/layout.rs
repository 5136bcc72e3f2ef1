use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::widgets::sidebar::SIDEBAR_WIDTH;

/// Top-level regions: sidebar, main panel and the one-row control bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub sidebar: Rect,
    pub main_view: Rect,
    pub control_bar: Rect,
}

/// Control bar takes the bottom row; the rest is split into a fixed-width
/// sidebar and the main panel. Narrow terminals shrink the sidebar first.
pub fn app_layout(area: Rect) -> AppLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(1)])
        .split(area);

    let sidebar_width = SIDEBAR_WIDTH.min(rows[0].width / 2);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Fill(1)])
        .split(rows[0]);

    AppLayout {
        sidebar: cols[0],
        main_view: cols[1],
        control_bar: rows[1],
    }
}

/// Centered rect with fixed width and height, clamped to fit inside `r`.
pub fn centered_rect_fixed(r: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(r.width);
    let h = height.min(r.height);
    let x = r.x + r.width.saturating_sub(w) / 2;
    let y = r.y + r.height.saturating_sub(h) / 2;
    Rect {
        x,
        y,
        width: w,
        height: h,
    }
}
