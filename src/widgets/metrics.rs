//! Row of metric cards: a dim label above a bold value.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::pairings::FoodCount;

pub const CARD_HEIGHT: u16 = 4;

pub struct Metric {
    pub label: String,
    pub value: String,
}

impl Metric {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Ranked food cards: "#1 Fish" / "2 pairings".
pub fn ranking_metrics(top: &[FoodCount]) -> Vec<Metric> {
    top.iter()
        .enumerate()
        .map(|(i, fc)| {
            let unit = if fc.count == 1 { "pairing" } else { "pairings" };
            Metric::new(
                format!("#{} {}", i + 1, fc.food),
                format!("{} {}", fc.count, unit),
            )
        })
        .collect()
}

pub struct MetricCards<'a> {
    pub metrics: &'a [Metric],
    pub border_color: Color,
    pub label_color: Color,
    pub value_color: Color,
}

impl Widget for MetricCards<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.metrics.is_empty() {
            return;
        }
        let constraints: Vec<Constraint> = self
            .metrics
            .iter()
            .map(|_| Constraint::Ratio(1, self.metrics.len() as u32))
            .collect();
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        for (metric, cell) in self.metrics.iter().zip(cells.iter()) {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(self.border_color));
            let inner = block.inner(*cell);
            block.render(*cell, buf);
            Paragraph::new(vec![
                Line::styled(metric.label.as_str(), Style::default().fg(self.label_color)),
                Line::styled(
                    metric.value.as_str(),
                    Style::default()
                        .fg(self.value_color)
                        .add_modifier(Modifier::BOLD),
                ),
            ])
            .alignment(Alignment::Left)
            .render(inner, buf);
        }
    }
}
