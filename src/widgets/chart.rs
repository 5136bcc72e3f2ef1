//! Terminal charts: horizontal food-frequency bars and the stacked
//! wine vs food comparison.

use ratatui::{
    buffer::Buffer,
    layout::{Direction, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders, Paragraph, Widget},
};

use crate::chart_data::{max_count, scale_span, stacked_segments};
use crate::config::Theme;
use crate::pairings::{CrossTab, FoodCount};

const LABEL_WIDTH: u16 = 16;

fn chart_block<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title)
        .border_style(Style::default().fg(theme.get("border")))
}

/// Truncate `s` to `width` characters, marking the cut with '…'.
fn fit_label(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        format!("{:<width$}", s, width = width)
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

/// Most frequent food first, one bar per row.
pub fn render_frequency_chart(
    area: Rect,
    buf: &mut Buffer,
    title: &str,
    frequencies: &[FoodCount],
    theme: &Theme,
) {
    let block = chart_block(title, theme);
    let bar_color = theme.get("bar");
    let bars: Vec<Bar> = frequencies
        .iter()
        .map(|fc| {
            Bar::default()
                .value(fc.count)
                .label(Line::from(fit_label(&fc.food, LABEL_WIDTH as usize)))
                .text_value(fc.count.to_string())
                .style(Style::default().fg(bar_color))
                .value_style(
                    Style::default()
                        .fg(theme.get("text_primary"))
                        .bg(bar_color)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    BarChart::default()
        .block(block)
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .max(max_count(frequencies).max(1))
        .data(BarGroup::default().bars(&bars))
        .render(area, buf);
}

/// One row per food, each row split into wine-colored segments sized by count.
pub struct ComparisonChart<'a> {
    pub title: &'a str,
    pub tab: &'a CrossTab,
    pub theme: &'a Theme,
}

impl Widget for ComparisonChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = chart_block(self.title, self.theme);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height < 2 || inner.width <= LABEL_WIDTH + 8 {
            return;
        }

        let text = Style::default().fg(self.theme.get("text_primary"));
        let legend_y = inner.y + inner.height - 1;
        let rows = (inner.height - 1) as usize;
        let bar_x = inner.x + LABEL_WIDTH + 1;
        // room for the " 12" total after the bar
        let bar_width = inner.width - LABEL_WIDTH - 1 - 5;
        let max = self.tab.max_row_total();

        // Keep the last row for a "+N more" marker when foods overflow.
        let shown = if self.tab.foods.len() > rows {
            rows - 1
        } else {
            rows
        };
        let segments = stacked_segments(self.tab);
        for (row, (food, segs)) in self.tab.foods.iter().zip(&segments).take(shown).enumerate() {
            let y = inner.y + row as u16;
            buf.set_string(inner.x, y, fit_label(food, LABEL_WIDTH as usize), text);

            let mut end_cell = 0;
            for seg in segs {
                let (a, b) = scale_span(seg.start, seg.end, max, bar_width);
                if b > a {
                    let color = self.theme.wine_color(seg.wine_idx);
                    buf.set_string(
                        bar_x + a,
                        y,
                        "█".repeat((b - a) as usize),
                        Style::default().fg(color),
                    );
                }
                end_cell = end_cell.max(b);
            }
            let total: u64 = segs.iter().map(|s| s.len()).sum();
            buf.set_string(bar_x + end_cell + 1, y, total.to_string(), text);
        }
        let hidden = self.tab.foods.len() - shown;
        if hidden > 0 {
            buf.set_string(
                inner.x,
                inner.y + shown as u16,
                format!("+{} more", hidden),
                Style::default().fg(self.theme.get("dimmed")),
            );
        }

        let mut legend: Vec<Span> = Vec::new();
        for (idx, wine) in self.tab.wines.iter().enumerate() {
            legend.push(Span::styled("■ ", Style::default().fg(self.theme.wine_color(idx))));
            legend.push(Span::styled(format!("{}  ", wine), text));
        }
        Paragraph::new(Line::from(legend)).render(
            Rect::new(inner.x, legend_y, inner.width, 1),
            buf,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn fit_label_pads_and_truncates() {
        assert_eq!(fit_label("Fish", 6), "Fish  ");
        assert_eq!(fit_label("Chocolate cake", 6), "Choco…");
    }

    #[test]
    fn comparison_draws_rows_and_legend() {
        let tab = CrossTab {
            foods: vec!["Cheese".into(), "Fish".into()],
            wines: vec!["Red".into(), "White".into()],
            counts: vec![vec![1, 1], vec![0, 2]],
        };
        let theme = Theme::default();
        let area = Rect::new(0, 0, 60, 6);
        let mut buf = Buffer::empty(area);
        ComparisonChart {
            title: "Comparison",
            tab: &tab,
            theme: &theme,
        }
        .render(area, &mut buf);

        assert!(row_text(&buf, 1).contains("Cheese"));
        assert!(row_text(&buf, 1).contains('█'));
        assert!(row_text(&buf, 2).contains("Fish"));
        let legend = row_text(&buf, 4);
        assert!(legend.contains("Red") && legend.contains("White"));
    }

    #[test]
    fn comparison_marks_foods_that_do_not_fit() {
        let foods = ["Cheese", "Fish", "Pasta", "Salad", "Steak"];
        let tab = CrossTab {
            foods: foods.iter().map(|f| f.to_string()).collect(),
            wines: vec!["Red".into()],
            counts: vec![vec![1]; foods.len()],
        };
        let theme = Theme::default();
        // 3 inner rows: two foods, the marker, then the legend row.
        let area = Rect::new(0, 0, 60, 6);
        let mut buf = Buffer::empty(area);
        ComparisonChart {
            title: "Comparison",
            tab: &tab,
            theme: &theme,
        }
        .render(area, &mut buf);

        assert!(row_text(&buf, 1).contains("Cheese"));
        assert!(row_text(&buf, 2).contains("Fish"));
        assert!(row_text(&buf, 3).contains("+3 more"));
        assert!(row_text(&buf, 4).contains("Red"));
    }

    #[test]
    fn frequency_chart_lists_foods() {
        let freqs = vec![FoodCount::new("Fish", 2), FoodCount::new("Steak", 1)];
        let theme = Theme::default();
        let area = Rect::new(0, 0, 50, 5);
        let mut buf = Buffer::empty(area);
        render_frequency_chart(area, &mut buf, "Pairings", &freqs, &theme);
        assert!(row_text(&buf, 1).contains("Fish"));
        assert!(row_text(&buf, 2).contains("Steak"));
    }
}
