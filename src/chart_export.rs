//! Chart export to PNG (plotters bitmap backend).

use color_eyre::Result;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::chart_data::{max_count, stacked_segments};
use crate::config::Theme;
use crate::dashboard::DashboardView;
use crate::pairings::{CrossTab, FoodCount};

pub const FREQUENCY_FILE: &str = "food_frequency.png";
pub const COMPARISON_FILE: &str = "wine_food_comparison.png";

const SIZE: (u32, u32) = (960, 540);
const BAR_RGB: RGBColor = RGBColor(192, 57, 43);

/// Label for an axis position that should sit exactly on bar `idx`.
fn label_at(labels: &[String], v: f64) -> String {
    if (v - v.round()).abs() > 1e-6 || v < 0.0 {
        return String::new();
    }
    labels.get(v.round() as usize).cloned().unwrap_or_default()
}

/// Horizontal bar chart of the food ranking, most frequent on top.
pub fn write_frequency_png(path: &Path, frequencies: &[FoodCount], subtitle: &str) -> Result<()> {
    if frequencies.is_empty() {
        return Err(color_eyre::eyre::eyre!("No data to export"));
    }

    let n = frequencies.len();
    let x_max = max_count(frequencies) as f64 * 1.1;
    // Row 0 is drawn at the top.
    let labels: Vec<String> = frequencies.iter().rev().map(|f| f.food.clone()).collect();

    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let caption = format!("Food pairings: {}", subtitle);
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 22))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(140)
        .build_cartesian_2d(0.0..x_max.max(1.0), -0.5..(n as f64 - 0.5))?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(n)
        .y_label_formatter(&|v| label_at(&labels, *v))
        .x_desc("Number of Pairings")
        .y_desc("Food")
        .draw()?;

    chart.draw_series(frequencies.iter().enumerate().map(|(rank, f)| {
        let y = (n - 1 - rank) as f64;
        Rectangle::new([(0.0, y - 0.35), (f.count as f64, y + 0.35)], BAR_RGB.filled())
    }))?;

    root.present()?;
    Ok(())
}

/// Stacked bars of food × wine counts with a wine legend.
pub fn write_comparison_png(path: &Path, tab: &CrossTab, palette: &[(u8, u8, u8)]) -> Result<()> {
    if tab.is_empty() {
        return Err(color_eyre::eyre::eyre!("No data to export"));
    }

    let n = tab.foods.len();
    let y_max = tab.max_row_total() as f64 * 1.1;
    let segments = stacked_segments(tab);

    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Wine vs Food Pairing Comparison", ("sans-serif", 22))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(50)
        .build_cartesian_2d(-0.5..(n as f64 - 0.5), 0.0..y_max.max(1.0))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&|v| label_at(&tab.foods, *v))
        .x_desc("Food")
        .y_desc("Count")
        .draw()?;

    for (wine_idx, wine) in tab.wines.iter().enumerate() {
        let (r, g, b) = if palette.is_empty() {
            (128, 128, 128)
        } else {
            palette[wine_idx % palette.len()]
        };
        let color = RGBColor(r, g, b);
        let rects = segments.iter().enumerate().flat_map(|(food_idx, segs)| {
            segs.iter()
                .filter(|s| s.wine_idx == wine_idx)
                .map(move |s| {
                    let x = food_idx as f64;
                    Rectangle::new(
                        [(x - 0.35, s.start as f64), (x + 0.35, s.end as f64)],
                        color.filled(),
                    )
                })
        });
        chart
            .draw_series(rects)?
            .label(wine.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Write every chart the dashboard currently shows into `dir`.
/// Returns the files written; an empty selection writes nothing.
pub fn export_dashboard_charts(
    dir: &Path,
    view: &DashboardView,
    theme: &Theme,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    if !view.frequencies.is_empty() {
        let path = dir.join(FREQUENCY_FILE);
        write_frequency_png(&path, &view.frequencies, view.selection.label())?;
        written.push(path);
    }

    if let Some(tab) = view.comparison.as_ref().filter(|t| !t.is_empty()) {
        let path = dir.join(COMPARISON_FILE);
        write_comparison_png(&path, tab, &theme.wine_palette_rgb)?;
        written.push(path);
    }

    info!(dir = %dir.display(), files = written.len(), "charts exported");
    Ok(written)
}
