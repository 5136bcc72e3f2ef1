//! Main panel: overview metrics, top-N cards, frequency chart and the
//! wine vs food comparison, in that order.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Paragraph, Widget, Wrap},
};

use crate::config::Theme;
use crate::dashboard::{DashboardView, CAPTION, NO_DATA_MESSAGE, OVERVIEW_INTRO};
use crate::widgets::chart::{render_frequency_chart, ComparisonChart};
use crate::widgets::metrics::{ranking_metrics, Metric, MetricCards, CARD_HEIGHT};

enum Section {
    Heading(String),
    Text(&'static str),
    Cards(Vec<Metric>),
    NoData,
    Frequency,
    Comparison,
    Caption,
}

impl Section {
    fn constraint(&self) -> Constraint {
        match self {
            Section::Heading(_) | Section::NoData | Section::Caption => Constraint::Length(1),
            Section::Text(_) => Constraint::Length(2),
            Section::Cards(_) => Constraint::Length(CARD_HEIGHT),
            Section::Frequency | Section::Comparison => Constraint::Fill(1),
        }
    }
}

fn sections(view: &DashboardView, top_n: usize) -> Vec<Section> {
    let mut out = Vec::new();

    if let Some(overview) = &view.overview {
        out.push(Section::Heading("🍇 Overview".to_string()));
        out.push(Section::Text(OVERVIEW_INTRO));
        out.push(Section::Cards(vec![
            Metric::new("Total Pairings", overview.total_pairings.to_string()),
            Metric::new("Unique Wines", overview.unique_wines.to_string()),
        ]));
    }

    out.push(Section::Heading(format!(
        "🍾 Top {} Food Pairings · {}",
        top_n,
        view.selection.label()
    )));
    if view.is_empty() {
        out.push(Section::NoData);
    } else {
        out.push(Section::Cards(ranking_metrics(&view.top_foods)));
    }

    if !view.selection.is_all() && !view.top_foods_overall.is_empty() {
        out.push(Section::Heading(format!(
            "🍾 Top {} Food Pairings · All wines",
            top_n
        )));
        out.push(Section::Cards(ranking_metrics(&view.top_foods_overall)));
    }

    if !view.frequencies.is_empty() {
        out.push(Section::Frequency);
    }
    if view.comparison.as_ref().is_some_and(|t| !t.is_empty()) {
        out.push(Section::Comparison);
    }
    if view.show_caption {
        out.push(Section::Caption);
    }
    out
}

pub fn render_dashboard(
    area: Rect,
    buf: &mut Buffer,
    view: &DashboardView,
    top_n: usize,
    theme: &Theme,
) {
    let sections = sections(view, top_n);
    let constraints: Vec<Constraint> = sections.iter().map(Section::constraint).collect();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let primary = theme.get("primary");
    let frequency_title = format!(" Pairings by food · {} ", view.selection.label());

    for (section, chunk) in sections.iter().zip(chunks.iter()) {
        let chunk = *chunk;
        match section {
            Section::Heading(text) => {
                Paragraph::new(text.as_str())
                    .style(Style::default().fg(primary).add_modifier(Modifier::BOLD))
                    .render(chunk, buf);
            }
            Section::Text(text) => {
                Paragraph::new(*text)
                    .style(Style::default().fg(theme.get("text_secondary")))
                    .wrap(Wrap { trim: true })
                    .render(chunk, buf);
            }
            Section::Cards(metrics) => MetricCards {
                metrics,
                border_color: theme.get("border"),
                label_color: theme.get("text_secondary"),
                value_color: theme.get("text_primary"),
            }
            .render(chunk, buf),
            Section::NoData => {
                Paragraph::new(NO_DATA_MESSAGE)
                    .style(Style::default().fg(theme.get("dimmed")))
                    .render(chunk, buf);
            }
            Section::Frequency => {
                render_frequency_chart(chunk, buf, &frequency_title, &view.frequencies, theme)
            }
            Section::Comparison => {
                if let Some(tab) = &view.comparison {
                    ComparisonChart {
                        title: " 🍷 Wine vs Food Pairing Comparison ",
                        tab,
                        theme,
                    }
                    .render(chunk, buf);
                }
            }
            Section::Caption => {
                Paragraph::new(Line::from(CAPTION).centered())
                    .style(Style::default().fg(primary).add_modifier(Modifier::ITALIC))
                    .render(chunk, buf);
            }
        }
    }
}
